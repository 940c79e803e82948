use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ComError {
    Io(std::io::Error),
    WebSocket(tokio_websockets::Error),
    InvalidUri(String),
    Timeout { op: &'static str, after: Duration },
    ConnectionClosed,
}

impl fmt::Display for ComError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComError::Io(err) => write!(f, "io error: {err}"),
            ComError::WebSocket(err) => write!(f, "websocket error: {err}"),
            ComError::InvalidUri(msg) => write!(f, "invalid endpoint uri: {msg}"),
            ComError::Timeout { op, after } => write!(f, "{op} timed out after {after:?}"),
            ComError::ConnectionClosed => write!(f, "connection closed"),
        }
    }
}

impl std::error::Error for ComError {}

impl From<std::io::Error> for ComError {
    fn from(err: std::io::Error) -> Self {
        ComError::Io(err)
    }
}

impl From<tokio_websockets::Error> for ComError {
    fn from(err: tokio_websockets::Error) -> Self {
        ComError::WebSocket(err)
    }
}
