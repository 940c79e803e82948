//! Websocket transport to the gesture recognition service.
//!
//! [`WsLink`] owns one logical connection: it sends base64 frame payloads as
//! text messages and forwards inbound classification text to an independent
//! receiver. There is no retry loop — a failed or closed connection is
//! re-established by the next `send()`.

pub mod config;
pub mod error;
pub mod link;

pub use config::LinkConfig;
pub use error::ComError;
pub use link::{ConnectionState, WsLink};
