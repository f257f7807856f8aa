use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::SourceError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error bodies are kept in errors for context, cut to this many bytes.
const MAX_ERROR_BODY: usize = 512;

pub fn http_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        SourceError::Client(e)
    })
}

/// Appends percent-encoded `segments` to the path of `base`.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, SourceError> {
    let mut url = Url::parse(base).map_err(|_| SourceError::InvalidBaseUrl(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| SourceError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &Url,
) -> Result<T, SourceError> {
    tracing::debug!(url = %url, "GET");

    let response = request.send().await.map_err(|source| SourceError::Transport {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    let body = response.text().await.map_err(|source| SourceError::Transport {
        url: url.to_string(),
        source,
    })?;

    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: truncate(body, MAX_ERROR_BODY),
        });
    }

    serde_json::from_str(&body).map_err(|source| SourceError::Decode {
        url: url.to_string(),
        source,
    })
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut cut = max;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
