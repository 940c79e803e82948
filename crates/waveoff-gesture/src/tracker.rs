use crate::Classification;

/// Outcome of one classification message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    NoAction,
    Confirmed(String),
}

/// Decides when a reported gesture counts as deliberate.
///
/// A gesture is confirmed only when the *previous* sign reported by the
/// service is in the trigger set. The service reports both the current and
/// the previous sign per message, so acting on the previous one means the
/// sign already survived one more classification — a single noisy frame
/// never triggers. There is no cross-call state: every qualifying message
/// confirms again, and the action sink is expected to be idempotent.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    trigger_labels: Vec<String>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        GestureTracker {
            trigger_labels: vec!["Index".to_string(), "Open".to_string()],
        }
    }
}

impl GestureTracker {
    pub fn new(trigger_labels: Vec<String>) -> Self {
        GestureTracker { trigger_labels }
    }

    /// Parse a raw message and evaluate it.
    ///
    /// Malformed payloads are logged and mapped to `Decision::NoAction`;
    /// they never interrupt the message stream.
    pub fn on_message(&self, raw: &str) -> Decision {
        match Classification::from_json(raw) {
            Ok(msg) => self.evaluate(&msg),
            Err(err) => {
                log::warn!("discarding malformed classification: {err}");
                Decision::NoAction
            }
        }
    }

    /// Evaluate a parsed message. Only the previous sign matters.
    pub fn evaluate(&self, msg: &Classification) -> Decision {
        let previous = &msg.previous_result.hand_sign;
        if self.trigger_labels.iter().any(|label| label == previous) {
            log::debug!(
                "gesture {:?} held (current {:?}, unchanged_count {})",
                previous,
                msg.result.hand_sign,
                msg.unchanged_count
            );
            Decision::Confirmed(previous.clone())
        } else {
            Decision::NoAction
        }
    }
}
