//! ORU^R01 message assembly.
//!
//! The assembler owns segment ordering: one MSH, one PID, one OBR, then one
//! OBX per observation, each terminated by a carriage return. Callers never
//! reorder segments; they hand over the four records and receive a single
//! [`EncodedMessage`] snapshot.

use crate::header::MessageHeader;
use crate::observation::Observation;
use crate::patient::PatientIdentity;
use crate::request::ObservationRequest;
use crate::stamp::MessageStamp;
use crate::{Hl7Error, Hl7Result};

/// Segment terminator: a single carriage return, not a platform newline.
pub const SEGMENT_TERMINATOR: char = '\r';

/// A fully assembled message string.
///
/// Snapshot semantics: an `EncodedMessage` has no identity beyond its
/// content and is never kept in sync with later edits to the records it was
/// assembled from. Callers regenerate on demand and discard on reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedMessage(String);

impl EncodedMessage {
    /// Returns the raw message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the message and returns the raw text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Iterates over the segment lines, without terminators.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_TERMINATOR).filter(|s| !s.is_empty())
    }
}

impl std::fmt::Display for EncodedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assembles one ORU^R01 message from its four record kinds.
///
/// Segment order is fixed: MSH, PID, OBR, then one OBX per entry of
/// `observations` in slice order, with 1-based contiguous sequence numbers.
/// Every segment, including the last, is terminated by a single carriage
/// return.
///
/// The date/time and control ID fields of the MSH segment come from `stamp`,
/// so assembling identical input with fresh stamps differs only in those two
/// fields.
///
/// # Errors
///
/// Returns [`Hl7Error::EmptyObservationSet`] if `observations` is empty. A
/// row with a non-positive value cannot occur here: observation values are
/// [`PositiveQuantity`](labbridge_types::PositiveQuantity), validated when
/// the rows were built.
pub fn assemble(
    header: &MessageHeader,
    identity: &PatientIdentity,
    request: &ObservationRequest,
    observations: &[Observation],
    stamp: &MessageStamp,
) -> Hl7Result<EncodedMessage> {
    if observations.is_empty() {
        return Err(Hl7Error::EmptyObservationSet);
    }

    let mut message = String::new();
    message.push_str(&header.render_msh(stamp));
    message.push(SEGMENT_TERMINATOR);
    message.push_str(&identity.render_pid());
    message.push(SEGMENT_TERMINATOR);
    message.push_str(&request.render_obr());
    message.push(SEGMENT_TERMINATOR);

    for (index, observation) in observations.iter().enumerate() {
        message.push_str(&observation.render_obx(index + 1));
        message.push(SEGMENT_TERMINATOR);
    }

    Ok(EncodedMessage(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::AbnormalFlag;
    use chrono::{TimeZone, Utc};
    use labbridge_types::{NonEmptyText, PositiveQuantity};

    fn sample_header() -> MessageHeader {
        MessageHeader {
            sending_application: "LabBridge".to_string(),
            sending_facility: "Haematology Lab".to_string(),
            receiving_application: "LIS".to_string(),
            receiving_facility: "Central Hospital".to_string(),
        }
    }

    fn sample_identity() -> PatientIdentity {
        PatientIdentity {
            internal_id: "42".to_string(),
            patient_code: "PAT-001".to_string(),
            full_name: "Nguyen Van A".to_string(),
            date_of_birth: "1985-07-14".to_string(),
            gender: Some(crate::Gender::Male),
        }
    }

    fn sample_request() -> ObservationRequest {
        ObservationRequest {
            accession_number: NonEmptyText::new("ACC123").expect("non-empty"),
            test_code: "CBC".to_string(),
            test_name: "Complete Blood Count".to_string(),
            observed_at: Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).single().expect("valid time"),
        }
    }

    fn observation(code: &str, value: f64, flag: AbnormalFlag) -> Observation {
        Observation {
            test_code: code.to_string(),
            test_name: code.to_string(),
            value: PositiveQuantity::new(value).expect("positive value"),
            unit: "10*9/L".to_string(),
            reference_range: "4.0-10.0".to_string(),
            flag,
        }
    }

    #[test]
    fn assembles_segments_in_fixed_order() {
        let observations = vec![
            observation("WBC", 6.2, AbnormalFlag::Normal),
            observation("RBC", 4.8, AbnormalFlag::Normal),
        ];
        let message = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &observations,
            &MessageStamp::generate(None),
        )
        .expect("assemble message");

        let segments: Vec<&str> = message.segments().collect();
        assert_eq!(segments.len(), 5);
        assert!(segments[0].starts_with("MSH|"));
        assert!(segments[1].starts_with("PID|"));
        assert!(segments[2].starts_with("OBR|"));
        assert!(segments[3].starts_with("OBX|1|"));
        assert!(segments[4].starts_with("OBX|2|"));
    }

    #[test]
    fn uses_carriage_return_terminators_including_trailing() {
        let observations = vec![observation("WBC", 6.2, AbnormalFlag::Normal)];
        let message = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &observations,
            &MessageStamp::generate(None),
        )
        .expect("assemble message");

        let raw = message.as_str();
        assert!(raw.ends_with('\r'));
        assert!(!raw.contains('\n'));
        assert_eq!(raw.matches('\r').count(), 4);
    }

    #[test]
    fn rejects_empty_observation_set() {
        let err = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &[],
            &MessageStamp::generate(None),
        )
        .expect_err("should reject empty rows");
        assert!(matches!(err, Hl7Error::EmptyObservationSet));
    }

    #[test]
    fn sequence_numbers_are_contiguous_in_row_order() {
        let observations: Vec<Observation> = [9.9, 5.5, 7.7, 3.3]
            .iter()
            .map(|v| observation("PLT", *v, AbnormalFlag::Normal))
            .collect();
        let message = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &observations,
            &MessageStamp::generate(None),
        )
        .expect("assemble message");

        let sequences: Vec<&str> = message
            .segments()
            .filter(|s| s.starts_with("OBX"))
            .map(|s| s.split('|').nth(1).expect("sequence field"))
            .collect();
        assert_eq!(sequences, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn round_trip_scenario_contains_expected_fields() {
        let observations = vec![observation("WBC", 6.2, AbnormalFlag::Normal)];
        let message = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &observations,
            &MessageStamp::generate(None),
        )
        .expect("assemble message");

        let segments: Vec<&str> = message.segments().collect();
        let pid = segments.iter().find(|s| s.starts_with("PID")).expect("PID");
        assert!(pid.contains("PAT-001"));
        assert!(pid.contains("Nguyen Van A"));

        let obr = segments.iter().find(|s| s.starts_with("OBR")).expect("OBR");
        assert!(obr.contains("ACC123"));

        let obx = segments.iter().find(|s| s.starts_with("OBX")).expect("OBX");
        assert!(obx.contains("WBC"));
        assert!(obx.contains("|6.2|"));
        assert!(obx.contains("|N|"));
    }

    #[test]
    fn deterministic_except_for_stamp_fields() {
        let observations = vec![observation("WBC", 6.2, AbnormalFlag::Normal)];
        let first_stamp = MessageStamp::generate(None);
        let second_stamp = MessageStamp::generate(Some(&first_stamp));

        let a = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &observations,
            &first_stamp,
        )
        .expect("assemble first");
        let b = assemble(
            &sample_header(),
            &sample_identity(),
            &sample_request(),
            &observations,
            &second_stamp,
        )
        .expect("assemble second");

        assert_ne!(a, b);

        let tail_a: Vec<&str> = a.segments().skip(1).collect();
        let tail_b: Vec<&str> = b.segments().skip(1).collect();
        assert_eq!(tail_a, tail_b);
    }
}
