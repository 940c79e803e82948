use waveoff_frame::PlanarFrame;

use crate::{ActionError, SourceError};

/// Async source of planar camera frames.
///
/// Implementations own the platform camera session and hand over one owned
/// frame per call. A source backed by a push-style callback should keep only
/// the latest frame (see [`crate::SlotSource`]); the pipeline never queues.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Receive the next frame.
    ///
    /// Returns `SourceError::Closed` once no more frames will arrive.
    async fn recv(&mut self) -> Result<PlanarFrame, SourceError>;
}

/// The platform's call-control capability.
#[allow(async_fn_in_trait)]
pub trait ActionSink {
    /// Terminate the active call. Idempotent when no call is active; the
    /// pipeline fires and forgets, it never retries a failed attempt.
    async fn end_call(&mut self) -> Result<(), ActionError>;
}
