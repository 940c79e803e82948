//! Frame data model and per-frame processing for the waveoff pipeline.
//!
//! A camera delivers planar YUV frames (separate Y/U/V buffers with their own
//! row and pixel strides). This crate converts one planar frame into a packed
//! interleaved B,G,R buffer at a fixed target resolution, and wraps that
//! buffer into the base64 text payload the recognition service expects.

pub mod convert;
pub mod encode;
pub mod error;
pub mod types;

pub use convert::convert_to_bgr;
pub use encode::{EncodedPayload, decode, encode};
pub use error::FrameError;
pub use types::{PackedFrame, PlanarFrame, Plane, PlaneBuf, RawFrame};
