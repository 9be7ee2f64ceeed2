// src/core/net.rs
// Blocking HTTP GET for results pages.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::Http { url: s!(), message: e.to_string() })
}

/// GET `url` and return the body. Any non-2xx status is an error.
pub fn http_get(client: &Client, url: &str) -> Result<String> {
    let http_err = |e: reqwest::Error| Error::Http { url: url.to_string(), message: e.to_string() };

    let resp = client.get(url).send().map_err(http_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Http { url: url.to_string(), message: format!("HTTP {status}") });
    }
    resp.text().map_err(http_err)
}
