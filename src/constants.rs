//! Global constants used throughout the ui5rt codebase.
//!
//! Remote endpoints, file names and header values shared by the resolver,
//! fetcher and installer. Defining them centrally keeps the wire-level
//! details of the SAP distribution servers in one place.

/// Version manifest published alongside the SAPUI5 SDK.
///
/// The document has the shape
/// `{ "version": "1.x.y", "libraries": [ { "patchHistory": [...] } ] }`.
pub const DEFAULT_MANIFEST_URL: &str = "https://sapui5.hana.ondemand.com/version.json";

/// Base URL the runtime archives are served from.
pub const DEFAULT_DOWNLOAD_BASE: &str = "https://tools.hana.ondemand.com/additional/";

/// Prefix of every runtime archive file name (`sapui5-rt-{version}.zip`).
pub const ARCHIVE_PREFIX: &str = "sapui5-rt-";

/// Extension of every runtime archive file name.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Cookie header the download server requires before it serves an archive.
///
/// Sending it records acceptance of the SAP developer license; without it the
/// server answers with the license page instead of the archive.
pub const EULA_COOKIE: &str = "eula_3_1_agreed=tools.hana.ondemand.com/developer-license-3_1.txt";

/// File name of the installed-version marker shipped inside the archive.
pub const MARKER_FILE_NAME: &str = "sap-ui-version.json";

/// Directory inside the archive (and the destination) holding the runtime files.
pub const RESOURCES_DIR: &str = "resources";

/// Key of the installer section inside the host project's `package.json`.
pub const PACKAGE_JSON_KEY: &str = "sapui5-runtime";

/// Legacy camel-case key still found in older host projects.
pub const LEGACY_PACKAGE_JSON_KEY: &str = "sapui5Runtime";

/// Default destination directory, relative to the project directory.
pub const DEFAULT_DESTINATION: &str = "lib";

/// Name of the scratch directory created next to the destination.
pub const SCRATCH_DIR_NAME: &str = ".ui5rt-tmp";

/// Environment variable that disables progress bars when set.
pub const NO_PROGRESS_ENV: &str = "UI5RT_NO_PROGRESS";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("ui5rt/", env!("CARGO_PKG_VERSION"));

/// Build the archive file name for a runtime version.
///
/// ```
/// assert_eq!(ui5rt_cli::constants::archive_file_name("1.120.4"), "sapui5-rt-1.120.4.zip");
/// ```
#[must_use]
pub fn archive_file_name(version: &str) -> String {
    format!("{ARCHIVE_PREFIX}{version}{ARCHIVE_EXTENSION}")
}
