//! Machine inventory fetch: one GET, no retry.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::capabilities::{AppHttp, ValidatedUrl};
use crate::event::Event;
use crate::model::MachineSnapshot;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {message}")]
    Decode { message: String },
}

impl FetchError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }
}

pub type FetchResult = Result<MachineSnapshot, FetchError>;

/// Issues the request; the outcome comes back as [`Event::MachineFetched`].
#[instrument(skip_all, fields(url = %endpoint))]
pub fn fetch_machine(endpoint: &ValidatedUrl, http: &AppHttp) {
    debug!("outgoing inventory request");
    http.get(endpoint.as_str())
        .header("Accept", "application/json")
        .send(|result| Event::MachineFetched(interpret_response(result)));
}

/// Folds the shell's HTTP outcome into the fetch taxonomy.
pub fn interpret_response(result: crux_http::Result<crux_http::Response<Vec<u8>>>) -> FetchResult {
    match result {
        Ok(mut response) => {
            let status: u16 = response.status().into();
            let body = response.take_body().unwrap_or_default();
            decode_machine(status, &body)
        }
        // crux_http reports every non-2xx response here, carrying the body.
        Err(crux_http::Error::Http(e)) => Err(FetchError::Status {
            status: e.code.into(),
            message: error_body_excerpt(e.body.as_deref().unwrap_or_default()),
        }),
        Err(other) => Err(FetchError::Network { message: other.to_string() }),
    }
}

/// Decodes a response body, rejecting non-2xx statuses first.
pub fn decode_machine(status: u16, body: &[u8]) -> FetchResult {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { status, message: error_body_excerpt(body) });
    }

    serde_json::from_slice(body).map_err(|e| FetchError::Decode { message: e.to_string() })
}

fn error_body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "no response body".to_string();
    }
    let mut excerpt: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if text.chars().count() > MAX_ERROR_BODY_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}
