use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("{provider} transport error{}: {message}", status_suffix(.status))]
    Transport {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("All {attempts} providers failed: {summary}")]
    AllProvidersFailed { attempts: usize, summary: String },

    #[error("Translation cancelled")]
    Cancelled,

    #[error("Translation exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TranslateError {
    /// Wrap a failed request for `provider`, keeping the status code when reqwest has one.
    pub fn transport(provider: &'static str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };

        TranslateError::Transport {
            provider,
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, TranslateError::Transport { .. })
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, TranslateError>;
