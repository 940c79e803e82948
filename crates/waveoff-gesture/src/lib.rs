//! Classification message schema and the gesture stability decision.
//!
//! The recognition service answers each frame with a JSON document carrying
//! the current hand sign, the previous one, and a same-sign run counter.
//! [`GestureTracker`] turns that stream into at most one decision per
//! message, using the previous sign as a one-message hysteresis against
//! single-frame misclassifications.

pub mod message;
pub mod tracker;

pub use message::{Classification, HandSign};
pub use tracker::{Decision, GestureTracker};
