use thiserror::Error;

/// Failure on the wire: the request never completed or the server refused it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("server returned status {status}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl GatewayError {
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            GatewayError::Transport(err) => Some(err),
            GatewayError::Decode { .. } => None,
        }
    }
}
