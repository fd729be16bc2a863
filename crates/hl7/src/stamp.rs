//! Encode-time message stamps.
//!
//! Every MSH segment carries two values that are derived at encode time and
//! never persisted: the message date/time (MSH-7) and the message control ID
//! (MSH-10). Two encodes of identical input must still differ in exactly
//! these two fields.
//!
//! Wall-clock timestamps alone are not collision-proof under rapid repeated
//! calls, so [`MessageStamp::generate`] accepts the previous stamp and bumps
//! the timestamp when the clock has not advanced, and the control ID is a
//! freshly generated UUID, unique regardless of the clock.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// HL7 DTM format used for MSH-7 and observation timestamps.
pub const MESSAGE_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Per-message values generated at encode time.
///
/// # Monotonicity guarantee
///
/// When [`MessageStamp::generate`] is given the previous stamp, the new
/// timestamp is guaranteed to be strictly greater than the previous one
/// (incremented by at least one second if necessary, matching the one-second
/// resolution of the HL7 DTM format). This keeps successive messages for the
/// same order distinguishable and ordered even when generated within the
/// same clock tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageStamp {
    timestamp: DateTime<Utc>,
    control_id: Uuid,
}

impl MessageStamp {
    /// Generate a new message stamp.
    ///
    /// If `last` is provided, the timestamp is guaranteed to be strictly
    /// greater than the last one (by at least one second).
    pub fn generate(last: Option<&MessageStamp>) -> Self {
        let now = Utc::now();

        let timestamp = match last {
            Some(prev) if now <= prev.timestamp => prev.timestamp + Duration::seconds(1),
            _ => now,
        };

        Self {
            timestamp,
            control_id: Uuid::new_v4(),
        }
    }

    /// Returns the timestamp component of this stamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the message date/time in HL7 DTM form (`YYYYMMDDHHMMSS`).
    pub fn message_time(&self) -> String {
        self.timestamp.format(MESSAGE_TIME_FORMAT).to_string()
    }

    /// Returns the control ID as 32 lowercase hex characters (no hyphens).
    pub fn control_id(&self) -> String {
        self.control_id.simple().to_string()
    }
}
