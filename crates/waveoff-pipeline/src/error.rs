use std::fmt;

#[derive(Debug)]
pub enum SourceError {
    /// The source will deliver no more frames.
    Closed,
    /// One capture failed; later frames may still arrive.
    Capture(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Closed => write!(f, "frame source closed"),
            SourceError::Capture(msg) => write!(f, "capture error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

#[derive(Debug)]
pub enum ActionError {
    Platform(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for ActionError {}
