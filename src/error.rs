use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by every [`Client`](crate::Client) operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered 404 for the request.
    ///
    /// Bulk bill search also treats this as "no more pages".
    #[error("Not found: {url}")]
    NotFound { url: String },

    /// Any other non-2xx answer. `body` is the raw response text.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// The caller passed contradictory or incomplete arguments.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// A successful response lacked a structure this crate reads directly.
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse API JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Maps a non-success status to the matching error kind.
pub(crate) fn error_for_status(status: StatusCode, url: &str, body: String) -> Error {
    if status == StatusCode::NOT_FOUND {
        return Error::NotFound {
            url: url.to_string(),
        };
    }
    Error::Api {
        status: status.as_u16(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_url() {
        let err = error_for_status(
            StatusCode::NOT_FOUND,
            "https://v3.openstates.org/bills/?page=4",
            "ignored".to_string(),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("bills/?page=4"));
    }

    #[test]
    fn other_statuses_keep_body_text() {
        let err = error_for_status(
            StatusCode::BAD_REQUEST,
            "https://v3.openstates.org/bills/",
            "{\"detail\":\"must provide either jurisdiction or q\"}".to_string(),
        );
        match &err {
            Error::Api { status, body } => {
                assert_eq!(*status, 400);
                assert!(body.contains("must provide either jurisdiction or q"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_not_found());
    }

    #[test]
    fn validation_display() {
        let err = Error::validation("Chamber must be \"upper\" or \"lower\"");
        let display = format!("{}", err);
        assert!(display.contains("Invalid arguments"));
        assert!(display.contains("upper"));
    }
}
