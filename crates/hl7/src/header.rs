//! MSH (message header) wire model and encoder.
//!
//! The header identifies the sending and receiving systems. It is immutable
//! per message; the date/time and control ID are supplied by a
//! [`MessageStamp`](crate::MessageStamp) at encode time rather than stored
//! on the header itself.

use crate::stamp::MessageStamp;
use crate::{escape_field, ENCODING_CHARACTERS, MESSAGE_TYPE, PROCESSING_ID, VERSION_ID};

/// Routing metadata for the MSH segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    /// Sending application name (MSH-3).
    pub sending_application: String,
    /// Sending facility name (MSH-4).
    pub sending_facility: String,
    /// Receiving application name (MSH-5).
    pub receiving_application: String,
    /// Receiving facility name (MSH-6).
    pub receiving_facility: String,
}

impl MessageHeader {
    /// Encodes this header as one MSH segment line.
    ///
    /// Field layout (positions preserved, missing optionals emitted empty):
    ///
    /// ```text
    /// MSH|^~\&|app|facility|app|facility|<time>||ORU^R01|<control id>|P|2.5.1
    /// ```
    ///
    /// MSH-1 is the field separator itself and MSH-2 the encoding
    /// characters; neither is escaped. The date/time and control ID come
    /// from `stamp`, so encoding the same header twice with fresh stamps
    /// differs only in those two fields.
    pub fn render_msh(&self, stamp: &MessageStamp) -> String {
        format!(
            "MSH|{enc}|{sa}|{sf}|{ra}|{rf}|{time}||{msg_type}|{control}|{proc}|{version}",
            enc = ENCODING_CHARACTERS,
            sa = escape_field(&self.sending_application),
            sf = escape_field(&self.sending_facility),
            ra = escape_field(&self.receiving_application),
            rf = escape_field(&self.receiving_facility),
            time = stamp.message_time(),
            msg_type = MESSAGE_TYPE,
            control = stamp.control_id(),
            proc = PROCESSING_ID,
            version = VERSION_ID,
        )
    }
}
