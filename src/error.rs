use async_tungstenite::tungstenite::{self, error::UrlError};
use thiserror::Error;

/// Type alias of the [`Result`] type specific to `sea-recorder`.
pub type RecorderResult<T> = std::result::Result<T, RecorderErr>;

#[derive(Error, Debug)]
/// Errors that may occur while recording.
pub enum RecorderErr {
    #[error("WebSocket Error: {0}")]
    WebSocket(#[source] tungstenite::Error),
    #[error("Connection timeout")]
    ConnectTimeout,
    #[error("IO Error: {0}")]
    IoError(#[source] std::io::Error),
    #[error("serde_json::Error {0}")]
    Json(#[source] serde_json::Error),
    #[error("Timestamp format error: {0}")]
    Format(#[source] time::error::Format),
    #[error("Runtime error: {0}")]
    Runtime(Box<dyn std::error::Error + Send + Sync>),
}

impl RecorderErr {
    /// Whether the supervisor may retry after this error.
    ///
    /// Transport level failures are worth another attempt; a target address that can never be
    /// connected to, or a broken runtime, is not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::WebSocket(tungstenite::Error::Url(UrlError::UnsupportedUrlScheme))
            | Self::WebSocket(tungstenite::Error::Url(UrlError::NoHostName))
            | Self::WebSocket(tungstenite::Error::Url(UrlError::EmptyHostName))
            | Self::WebSocket(tungstenite::Error::Url(UrlError::TlsFeatureNotEnabled)) => false,
            Self::WebSocket(_) | Self::ConnectTimeout => true,
            Self::IoError(_) | Self::Json(_) | Self::Format(_) | Self::Runtime(_) => false,
        }
    }
}

/// Function to construct a [`RecorderErr::Runtime`] error variant.
pub fn runtime_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> RecorderErr {
    RecorderErr::Runtime(Box::new(e))
}
