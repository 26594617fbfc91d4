use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("redwall/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by the feed query and the image download
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Short description of a transport error for user output
pub fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else if let Some(status) = err.status() {
        format!("server returned {}", status)
    } else {
        err.to_string()
    }
}
