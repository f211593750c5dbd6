//! Message request and response types

use serde::{de, Deserialize, Deserializer, Serialize};

/// Inbound message request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageRequest {
    /// Free-text message body
    pub message: String,

    /// Recipient identifier
    pub to: String,

    /// Sender identifier
    #[serde(rename = "from")]
    pub sender: String,

    /// Requested time-to-live in seconds
    #[serde(rename = "timeToLifeSec", deserialize_with = "lax_integer")]
    pub time_to_life_sec: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerLike {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accept an integer, a whole-valued float, or a numeric string
fn lax_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntegerLike::deserialize(deserializer)? {
        IntegerLike::Int(n) => Ok(n),
        IntegerLike::Float(f) => whole_float(f),
        IntegerLike::Text(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Ok(n);
            }
            match s.parse::<f64>() {
                Ok(f) => whole_float(f),
                Err(_) => Err(de::Error::custom(format!(
                    "timeToLifeSec must be an integer, got {:?}",
                    s
                ))),
            }
        }
    }
}

fn whole_float<E: de::Error>(f: f64) -> Result<i64, E> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(E::custom(format!(
            "timeToLifeSec must be an integer, got {}",
            f
        )))
    }
}

/// Outbound message response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    /// Confirmation text
    pub message: String,
}

/// Build the confirmation for an authenticated request.
///
/// Only the recipient is used; body, sender and TTL are accepted but not
/// part of the output.
pub fn format_message(request: &MessageRequest) -> MessageResponse {
    MessageResponse {
        message: format!("Hello {} your message will be send", request.to),
    }
}
