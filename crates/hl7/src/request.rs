//! OBR (observation request) wire model and encoder.
//!
//! The request identifies the test order this message answers. The accession
//! number is the natural key correlating the message to its order, so it is
//! carried as [`NonEmptyText`] and cannot be blank once a request exists.

use crate::stamp::MESSAGE_TIME_FORMAT;
use chrono::{DateTime, Utc};
use labbridge_types::NonEmptyText;

/// Test order metadata for the OBR segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservationRequest {
    /// Accession number correlating this message to its order (OBR-2).
    pub accession_number: NonEmptyText,
    /// Test type code, e.g. `CBC` (OBR-4 component 1).
    pub test_code: String,
    /// Test display name (OBR-4 component 2).
    pub test_name: String,
    /// When the observation was made (OBR-7).
    pub observed_at: DateTime<Utc>,
}

impl ObservationRequest {
    /// Encodes this request as one OBR segment line.
    ///
    /// Field layout:
    ///
    /// ```text
    /// OBR|1|<accession>||<test code>^<test name>|||<observed at>
    /// ```
    pub fn render_obr(&self) -> String {
        format!(
            "OBR|1|{accession}||{code}^{name}|||{observed}",
            accession = crate::escape_field(self.accession_number.as_str()),
            code = crate::escape_field(&self.test_code),
            name = crate::escape_field(&self.test_name),
            observed = self.observed_at.format(MESSAGE_TIME_FORMAT),
        )
    }
}
