//! In-memory archive and manifest fixtures.

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build a zip archive in memory from `(path, contents)` pairs.
///
/// Paths ending in `/` become directory entries.
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (path, contents) in entries {
        if path.ends_with('/') {
            writer.add_directory(*path, options).unwrap();
        } else {
            writer.start_file(*path, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

/// Contents of a `sap-ui-version.json` marker for `version`.
pub fn marker_json(version: &str) -> String {
    format!(r#"{{"name":"SAPUI5 Distribution","version":"{version}","buildTimestamp":"202401010000"}}"#)
}

/// A small but realistically laid out runtime archive for `version`.
pub fn runtime_zip(version: &str) -> Vec<u8> {
    let marker = marker_json(version);
    zip_archive(&[
        ("resources/", ""),
        ("resources/sap-ui-version.json", &marker),
        ("resources/sap-ui-core.js", "sap.ui.define([], function() {});"),
        ("resources/sap/m/library.js", "sap.ui.define('sap/m/library', []);"),
        ("resources/sap/ui/core/themes/base/library.css", ".sapUiBody{}"),
    ])
}

/// A version manifest document in the server's wire format.
pub fn manifest_json(current: &str, patch_history: &[&str]) -> String {
    serde_json::json!({
        "name": "SAPUI5 Distribution",
        "version": current,
        "libraries": [
            { "name": "sap.ui.core", "patchHistory": patch_history },
            { "name": "sap.m", "patchHistory": patch_history }
        ]
    })
    .to_string()
}
