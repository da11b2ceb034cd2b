use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::error::ScrapeError;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const BROWSER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// Downloads the results page. One attempt, no retry.
pub fn fetch_page(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let network = |source| ScrapeError::Network {
        url: url.to_string(),
        source,
    };

    let resp = client
        .get(url)
        .header(USER_AGENT, BROWSER_AGENT)
        .send()
        .map_err(network)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    resp.text().map_err(network)
}
