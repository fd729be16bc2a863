//! Export adapters: file and clipboard.
//!
//! Both operations take an already-assembled message and persist or copy it
//! unchanged; neither re-encodes or mutates it.

use crate::constants::{EXPORT_FILE_EXTENSION, EXPORT_FILE_PREFIX, EXPORT_TIME_FORMAT};
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use hl7::EncodedMessage;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the export filename for the given instant:
/// `test_result_<YYYYMMDDHHMMSS>.hl7`.
pub fn export_filename(at: DateTime<Utc>) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}{}.{EXPORT_FILE_EXTENSION}",
        at.format(EXPORT_TIME_FORMAT)
    )
}

/// Writes the raw message to a timestamp-named file under `dir`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`CoreError::FileWrite`] if the file cannot be written.
pub fn export_to_file(dir: &Path, message: &EncodedMessage) -> CoreResult<PathBuf> {
    let path = dir.join(export_filename(Utc::now()));
    fs::write(&path, message.as_str()).map_err(CoreError::FileWrite)?;
    tracing::info!("exported message to {}", path.display());
    Ok(path)
}

/// Copies the raw message to the system clipboard.
///
/// Returns `true` on success. Failures (for example, no clipboard available
/// in a headless session) are logged and reported as `false`; the message
/// itself is never altered.
pub fn copy_to_clipboard(message: &EncodedMessage) -> bool {
    let result = arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(message.as_str().to_string()));

    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("clipboard copy failed: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hl7::{assemble, AbnormalFlag, MessageHeader, MessageStamp, Observation, ObservationRequest, PatientIdentity};
    use labbridge_types::{NonEmptyText, PositiveQuantity};

    fn message() -> EncodedMessage {
        let header = MessageHeader {
            sending_application: "LabBridge".to_string(),
            sending_facility: "Lab".to_string(),
            receiving_application: "LIS".to_string(),
            receiving_facility: "Hospital".to_string(),
        };
        let identity = PatientIdentity {
            patient_code: "PAT-001".to_string(),
            full_name: "Nguyen Van A".to_string(),
            ..Default::default()
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
            &identity,
            &request,
            &observations,
            &MessageStamp::generate(None),
        )
        .expect("assemble message")
    }

    #[test]
    fn filename_embeds_timestamp_and_extension() {
        let at = Utc.with_ymd_and_hms(2026, 3, 15, 9, 30, 0).single().expect("valid time");
        assert_eq!(export_filename(at), "test_result_20260315093000.hl7");
    }

    #[test]
    fn file_export_writes_raw_message_bytes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let message = message();

        let path = export_to_file(dir.path(), &message).expect("export file");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("hl7"));

        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(written, message.as_str());
    }

    #[test]
    fn file_export_fails_for_missing_directory() {
        let err = export_to_file(Path::new("/nonexistent/export/dir"), &message())
            .expect_err("missing directory");
        assert!(matches!(err, CoreError::FileWrite(_)));
    }
}
