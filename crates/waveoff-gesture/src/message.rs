use serde::Deserialize;

/// One recognized hand sign.
#[derive(Clone, Debug, Deserialize)]
pub struct HandSign {
    pub hand_sign: String,
}

/// Inbound classification message.
///
/// Unknown fields are ignored; a missing required field is a parse failure.
/// `unchanged_count` is the service's own same-sign run counter, carried for
/// diagnostics only — it never drives a decision.
#[derive(Clone, Debug, Deserialize)]
pub struct Classification {
    pub result: HandSign,
    pub previous_result: HandSign,
    pub unchanged_count: u64,
}

impl Classification {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
