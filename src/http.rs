//! Shared HTTP client construction.
//!
//! Every request ui5rt makes (manifest, probes, download) goes through one
//! [`reqwest::Client`] built here. The client always carries the
//! EULA-acceptance cookie the download server insists on, and tunnels through
//! the configured [`ProxyConfig`] when there is one.
//!
//! Automatic proxy detection in reqwest is switched off: the proxy is decided
//! once by the CLI and passed in, never picked up from the environment here.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Proxy};
use tracing::debug;

use crate::config::ProxyConfig;
use crate::constants::{EULA_COOKIE, USER_AGENT};
use crate::core::{Result, RuntimeError};

/// Build the HTTP client used for all remote calls of a run.
pub fn build_client(proxy: Option<&ProxyConfig>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static(EULA_COOKIE));

    let mut builder = Client::builder().user_agent(USER_AGENT).default_headers(headers).no_proxy();

    if let Some(proxy) = proxy {
        debug!("Routing requests through proxy {}", proxy);
        let mut tunnel = Proxy::all(&proxy.url).map_err(|e| {
            RuntimeError::config(format!("invalid proxy URL '{}': {e}", proxy.url))
        })?;
        if let Some(username) = &proxy.username {
            tunnel = tunnel.basic_auth(username, proxy.password.as_deref().unwrap_or_default());
        }
        builder = builder.proxy(tunnel);
    }

    builder.build().map_err(|e| RuntimeError::config(format!("failed to build HTTP client: {e}")))
}
