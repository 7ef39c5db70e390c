use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide client. The timeout of the first caller wins.
pub fn http_client(timeout_secs: u64) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build http client")
    })
}

pub fn fetch_bytes(url: &str, timeout_secs: u64) -> Result<Vec<u8>> {
    let client = http_client(timeout_secs)?;
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("HTTP {} for {url}", status.as_u16());
    }
    let body = resp.bytes().context("failed to read response body")?;
    Ok(body.to_vec())
}
