use crate::config::HttpTimeouts;
use crate::error::{Result, TranslateError};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

/// User-Agent sent by providers that identify as this application.
pub(crate) const APP_USER_AGENT: &str = concat!("transchain/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body kept in a transport error message.
const MAX_ERROR_BODY: usize = 200;

pub(crate) fn build_client(timeouts: HttpTimeouts) -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(timeouts.connect)
        .read_timeout(timeouts.read)
        .timeout(timeouts.connect + timeouts.read)
        .build()?;
    Ok(client)
}

/// Send `request` and return the body of a 2xx response. Anything else is a
/// transport error for `provider`.
pub(crate) async fn fetch_body(provider: &'static str, request: RequestBuilder) -> Result<String> {
    let response = request
        .send()
        .await
        .map_err(|e| TranslateError::transport(provider, e))?;

    let status = response.status();
    debug!("{} response status: {}", provider, status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TranslateError::Transport {
            provider,
            status: Some(status.as_u16()),
            message: truncate(&body, MAX_ERROR_BODY).to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| TranslateError::transport(provider, e))?;

    debug!("{} response: {}", provider, truncate(&body, 500));
    Ok(body)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
