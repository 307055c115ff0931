use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixtureError>;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("navigation failed: {url}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    #[error("javascript evaluation failed: {0}")]
    JsEval(String),

    #[error("screenshot failed: {path}")]
    Screenshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("timeout after {ms}ms waiting for: {condition}")]
    Timeout { ms: u64, condition: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

impl FixtureError {
    /// Whether the error is a locator/visibility failure rather than an
    /// infrastructure failure. Optional steps swallow only these.
    pub fn is_locator_failure(&self) -> bool {
        matches!(
            self,
            FixtureError::ElementNotFound { .. } | FixtureError::Timeout { .. }
        )
    }
}
