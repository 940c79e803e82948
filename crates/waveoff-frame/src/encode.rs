use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::{FrameError, PackedFrame};

/// Textual form of one packed frame, safe for a websocket text channel.
///
/// Standard base64 alphabet, padded, no line wrapping — the service decodes
/// the payload byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPayload {
    pub seq: u64,
    pub text: String,
}

/// Encode a packed frame. Pure and total: well-formed input cannot fail.
pub fn encode(frame: &PackedFrame) -> EncodedPayload {
    EncodedPayload {
        seq: frame.seq,
        text: STANDARD.encode(&frame.data),
    }
}

/// Decode a payload back to raw bytes.
pub fn decode(text: &str) -> Result<Vec<u8>, FrameError> {
    Ok(STANDARD.decode(text)?)
}
