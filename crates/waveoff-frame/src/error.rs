use std::fmt;

#[derive(Debug)]
pub enum FrameError {
    UnsupportedFormat { planes: usize },
    PlaneTooSmall { plane: usize, len: usize, required: usize },
    Decode(base64::DecodeError),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::UnsupportedFormat { planes } => {
                write!(f, "unsupported planar format: {planes} planes (expected 3)")
            }
            FrameError::PlaneTooSmall {
                plane,
                len,
                required,
            } => {
                write!(f, "plane {plane} too small: {len} bytes (need {required})")
            }
            FrameError::Decode(err) => write!(f, "base64 decode error: {err}"),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<base64::DecodeError> for FrameError {
    fn from(err: base64::DecodeError) -> Self {
        FrameError::Decode(err)
    }
}
