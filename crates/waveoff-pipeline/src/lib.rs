//! End-to-end gesture pipeline: capture → convert → encode → send, and
//! receive → track → end call.
//!
//! The platform delivers planar frames (push-style, drop-if-busy) and owns
//! the call-control capability; both sides are trait-shaped here
//! ([`FrameSource`], [`ActionSink`]). [`Pipeline`] is a single-writer actor:
//! one loop multiplexes captured frames and inbound classification messages,
//! so the connection state has exactly one owner and nothing is shared
//! between the two paths.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod slot;
pub mod traits;

pub use config::PipelineConfig;
pub use error::{ActionError, SourceError};
pub use pipeline::{Pipeline, PipelineMetrics, StopHandle};
pub use slot::{LatestSlot, SlotSource};
pub use traits::{ActionSink, FrameSource};
