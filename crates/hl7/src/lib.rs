//! HL7 v2 wire/boundary support for LabBridge.
//!
//! This crate provides **wire models** and **encoders** for the subset of the
//! HL7 v2.5.1 ORU^R01 (observation result) message family that LabBridge
//! emits:
//! - one MSH (message header) segment
//! - one PID (patient identification) segment
//! - one OBR (observation request) segment
//! - one OBX (observation result) segment per measured parameter
//!
//! This crate focuses on:
//! - encoding structured records into pipe-delimited segment lines
//! - escaping field content so delimiter characters cannot corrupt structure
//! - assembling segments into a single terminated message string
//!
//! It does NOT parse arbitrary third-party HL7 messages, handle batches, or
//! support segment types beyond the four listed above.

pub mod header;
pub mod message;
pub mod observation;
pub mod patient;
pub mod request;
pub mod stamp;

// Re-export public wire types
pub use header::MessageHeader;
pub use message::{assemble, EncodedMessage, SEGMENT_TERMINATOR};
pub use observation::{AbnormalFlag, Observation};
pub use patient::{Gender, PatientIdentity};
pub use request::ObservationRequest;
pub use stamp::MessageStamp;

/// Field separator (MSH-1).
pub const FIELD_SEPARATOR: char = '|';

/// Encoding characters (MSH-2): component, repetition, escape, sub-component.
pub const ENCODING_CHARACTERS: &str = "^~\\&";

/// Message type emitted by this crate (MSH-9).
pub const MESSAGE_TYPE: &str = "ORU^R01";

/// Processing ID (MSH-11): production.
pub const PROCESSING_ID: &str = "P";

/// HL7 version ID (MSH-12).
pub const VERSION_ID: &str = "2.5.1";

/// Errors returned by the `hl7` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum Hl7Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("message must contain at least one observation")]
    EmptyObservationSet,
}

/// Type alias for Results that can fail with a [`Hl7Error`].
pub type Hl7Result<T> = Result<T, Hl7Error>;

/// Escapes HL7 delimiter characters in field content.
///
/// Applies the standard HL7 escape sequences so that free-text field values
/// containing `|`, `^`, `~`, `\` or `&` cannot break segment structure:
///
/// | character | escape |
/// |-----------|--------|
/// | `\`       | `\E\`  |
/// | `|`       | `\F\`  |
/// | `^`       | `\S\`  |
/// | `~`       | `\R\`  |
/// | `&`       | `\T\`  |
///
/// The escape character itself is handled first so already-escaped output is
/// never double-escaped.
pub fn escape_field(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => escaped.push_str("\\E\\"),
            '|' => escaped.push_str("\\F\\"),
            '^' => escaped.push_str("\\S\\"),
            '~' => escaped.push_str("\\R\\"),
            '&' => escaped.push_str("\\T\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_field_passes_plain_text_through() {
        assert_eq!(escape_field("Nguyen Van A"), "Nguyen Van A");
    }

    #[test]
    fn escape_field_escapes_all_delimiters() {
        assert_eq!(escape_field("a|b^c~d&e"), "a\\F\\b\\S\\c\\R\\d\\T\\e");
    }

    #[test]
    fn escape_field_escapes_backslash_without_double_escaping() {
        assert_eq!(escape_field("a\\b"), "a\\E\\b");
        assert_eq!(escape_field("\\|"), "\\E\\\\F\\");
    }
}
