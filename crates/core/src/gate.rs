//! The send gate.
//!
//! A pre-transmission check with three guarded conditions, evaluated in
//! order and short-circuiting on the first failure:
//!
//! 1. a message has been assembled,
//! 2. the order is not already complete,
//! 3. the patient identity carries both a code and a name.
//!
//! Only when all three pass may the caller hand the message to the
//! transport. A rejected attempt makes no network call; there is no retry —
//! the operator corrects the condition and triggers the send again.

use crate::order::OrderStatus;
use crate::{CoreError, CoreResult};
use hl7::{EncodedMessage, PatientIdentity};

/// Checks whether `message` may be submitted for the given order.
///
/// On success returns the message ready for transport.
///
/// # Errors
///
/// Returns the first failing precondition:
/// - [`CoreError::NothingToSend`] if no message has been assembled,
/// - [`CoreError::OrderAlreadyComplete`] if the order already has a result,
/// - [`CoreError::IncompletePatientIdentity`] if the patient code or name
///   is empty.
pub fn ensure_sendable<'a>(
    message: Option<&'a EncodedMessage>,
    status: OrderStatus,
    identity: &PatientIdentity,
) -> CoreResult<&'a EncodedMessage> {
    let message = match message {
        Some(message) if !message.as_str().is_empty() => message,
        _ => {
            tracing::warn!("send rejected: no assembled message");
            return Err(CoreError::NothingToSend);
        }
    };

    if status == OrderStatus::Complete {
        tracing::warn!("send rejected: order already complete");
        return Err(CoreError::OrderAlreadyComplete);
    }

    if !identity.is_complete() {
        tracing::warn!("send rejected: incomplete patient identity");
        return Err(CoreError::IncompletePatientIdentity);
    }

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hl7::{assemble, AbnormalFlag, MessageHeader, MessageStamp, Observation, ObservationRequest};
    use labbridge_types::{NonEmptyText, PositiveQuantity};

    fn identity() -> PatientIdentity {
        PatientIdentity {
            patient_code: "PAT-001".to_string(),
            full_name: "Nguyen Van A".to_string(),
            ..Default::default()
        }
    }

    fn message() -> EncodedMessage {
        let header = MessageHeader {
            sending_application: "LabBridge".to_string(),
            sending_facility: "Lab".to_string(),
            receiving_application: "LIS".to_string(),
            receiving_facility: "Hospital".to_string(),
        };
        let request = ObservationRequest {
            accession_number: NonEmptyText::new("ACC123").expect("non-empty"),
            test_code: "CBC".to_string(),
            test_name: "Complete Blood Count".to_string(),
            observed_at: Utc::now(),
        };
        let observations = vec![Observation {
            test_code: "WBC".to_string(),
            test_name: "White Blood Cells".to_string(),
            value: PositiveQuantity::new(6.2).expect("positive"),
            unit: "10*9/L".to_string(),
            reference_range: "4.0-10.0".to_string(),
            flag: AbnormalFlag::Normal,
        }];
        assemble(
            &header,
            &identity(),
            &request,
            &observations,
            &MessageStamp::generate(None),
        )
        .expect("assemble message")
    }

    #[test]
    fn passes_when_all_preconditions_hold() {
        let message = message();
        let result = ensure_sendable(Some(&message), OrderStatus::InProgress, &identity());
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_when_no_message_assembled() {
        let err = ensure_sendable(None, OrderStatus::InProgress, &identity())
            .expect_err("no message");
        assert!(matches!(err, CoreError::NothingToSend));
    }

    #[test]
    fn rejects_completed_order_regardless_of_message_validity() {
        let message = message();
        let err = ensure_sendable(Some(&message), OrderStatus::Complete, &identity())
            .expect_err("completed order");
        assert!(matches!(err, CoreError::OrderAlreadyComplete));
    }

    #[test]
    fn rejects_empty_identity_before_any_transport_call() {
        let message = message();
        let empty = PatientIdentity::default();
        let err = ensure_sendable(Some(&message), OrderStatus::InProgress, &empty)
            .expect_err("empty identity");
        assert!(matches!(err, CoreError::IncompletePatientIdentity));
    }

    #[test]
    fn checks_short_circuit_in_order() {
        // A completed order with an empty identity reports the status
        // failure, not the identity failure.
        let message = message();
        let err = ensure_sendable(
            Some(&message),
            OrderStatus::Complete,
            &PatientIdentity::default(),
        )
        .expect_err("completed order");
        assert!(matches!(err, CoreError::OrderAlreadyComplete));
    }
}
