use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a product fetch.
///
/// The `Display` output is the normalized, human-readable message; the
/// variants keep the structure for callers that want to branch on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No response was received.
    #[error("An error occurred {message}")]
    Transport { message: String },

    /// A response was received but indicates failure.
    #[error("server returned code {status}, error is {message}")]
    Application { status: u16, message: String },
}

/// Error body shape many JSON services return.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FetchError {
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }

    /// Build an application failure from a non-success response.
    ///
    /// Prefers the `message` field of a JSON error body, falling back to a
    /// description of the status line.
    pub fn from_response(status: StatusCode, body: &str, url: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.message,
            Err(_) => format!(
                "Http failure response for {}: {} {}",
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Error")
            ),
        };

        Self::Application {
            status: status.as_u16(),
            message,
        }
    }

    /// A success status whose body is not a product list.
    pub fn undecodable(status: StatusCode, url: &str) -> Self {
        Self::Application {
            status: status.as_u16(),
            message: format!("Http failure during parsing for {}", url),
        }
    }
}
