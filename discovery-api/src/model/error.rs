use std::time::Duration;
use thiserror::Error;

/// Failure of a call to the discovery backend.
///
/// The selector handles every variant the same way: the refresh is abandoned
/// and the previous snapshot is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The backend could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend did not answer within the client's deadline.
    #[error("discovery request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with an error status.
    #[error("discovery backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend answered with something that is not a descriptor list.
    #[error("malformed discovery response: {0}")]
    Malformed(String),
}

impl DiscoveryError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<std::io::Error> for DiscoveryError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<anyhow::Error> for DiscoveryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Transport(format!("{:#}", err))
    }
}
