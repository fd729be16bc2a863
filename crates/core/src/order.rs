//! Order-file wire model and translation helpers.
//!
//! An order file is the YAML record the CLI consumes: identity and request
//! data from the external lookups, the order's status, and the entered
//! result values. This module provides:
//! - a strict wire model (`OrderWire`) with `deny_unknown_fields`
//! - `parse`/`render` between YAML text and the domain-level [`Order`]
//! - translation from an [`Order`] into a seeded, filled [`Worksheet`]

use crate::worksheet::Worksheet;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use hl7::{AbnormalFlag, Gender, ObservationRequest, PatientIdentity};
use labbridge_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a test order.
///
/// An order that is already `Complete` must not receive a second result;
/// the send gate enforces this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    InProgress,
    Complete,
}

impl OrderStatus {
    /// Convert to wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Complete => "COMPLETE",
        }
    }

    /// Parse from wire format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(OrderStatus::Pending),
            "IN_PROGRESS" => Some(OrderStatus::InProgress),
            "COMPLETE" => Some(OrderStatus::Complete),
            _ => None,
        }
    }
}

/// Domain-level carrier for one test order and its entered results.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub request: ObservationRequest,
    pub identity: PatientIdentity,
    pub status: OrderStatus,
    pub entries: Vec<ResultEntry>,
}

/// One entered result value, with an optional operator flag override.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultEntry {
    pub code: String,
    pub value: f64,
    pub flag_override: Option<AbnormalFlag>,
}

impl Order {
    /// Parse an order from YAML text.
    ///
    /// Uses `serde_path_to_error` to surface a best-effort path (e.g.
    /// `results.2.value`) to the failing field when the YAML does not match
    /// the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OrderSchema`] if the YAML does not match the
    /// wire schema (including unknown keys), and [`CoreError::InvalidInput`]
    /// if a field value is outside its vocabulary (status, gender) or the
    /// accession number is empty.
    pub fn parse(yaml_text: &str) -> CoreResult<Order> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, OrderWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>".to_string()
                } else {
                    path
                };
                return Err(CoreError::OrderSchema { path, source });
            }
        };

        wire_to_domain(wire)
    }

    /// Render an order as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OrderSerialization`] if serialisation fails.
    pub fn render(&self) -> CoreResult<String> {
        let wire = domain_to_wire(self);
        serde_yaml::to_string(&wire).map_err(CoreError::OrderSerialization)
    }

    /// Seeds a worksheet and applies this order's entries to it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if an entry names a parameter
    /// that is not on the worksheet.
    pub fn worksheet(&self) -> CoreResult<Worksheet> {
        let mut sheet = Worksheet::seed();
        for entry in &self.entries {
            sheet = sheet.with_value(&entry.code, entry.value)?;
            if let Some(flag) = entry.flag_override {
                sheet = sheet.with_flag_override(&entry.code, flag)?;
            }
        }
        Ok(sheet)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of an order file.
///
/// This is the exact structure serialised to/from YAML. All structs use
/// `#[serde(deny_unknown_fields)]` for strict validation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct OrderWire {
    accession_number: String,
    test_code: String,
    test_name: String,
    status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    observed_at: Option<DateTime<Utc>>,

    patient: PatientWire,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    results: Vec<ResultWire>,
}

/// Wire representation of the patient block.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    internal_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    code: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    date_of_birth: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
}

/// Wire representation of one result entry.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct ResultWire {
    code: String,
    value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<AbnormalFlag>,
}

fn wire_to_domain(wire: OrderWire) -> CoreResult<Order> {
    let accession_number = NonEmptyText::new(&wire.accession_number)
        .map_err(|_| CoreError::InvalidInput("accession_number cannot be empty".into()))?;

    let status = OrderStatus::from_wire(&wire.status).ok_or_else(|| {
        CoreError::InvalidInput(format!(
            "unknown order status '{}' (expected PENDING, IN_PROGRESS or COMPLETE)",
            wire.status
        ))
    })?;

    let gender = match wire.patient.gender.as_deref() {
        None => None,
        Some(code) => Some(Gender::from_wire(code).ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "unknown gender code '{code}' (expected M, F, O or U)"
            ))
        })?),
    };

    let entries = wire
        .results
        .into_iter()
        .map(|result| ResultEntry {
            code: result.code,
            value: result.value,
            flag_override: result.flag,
        })
        .collect();

    Ok(Order {
        request: ObservationRequest {
            accession_number,
            test_code: wire.test_code,
            test_name: wire.test_name,
            observed_at: wire.observed_at.unwrap_or_else(Utc::now),
        },
        identity: PatientIdentity {
            internal_id: wire.patient.internal_id,
            patient_code: wire.patient.code,
            full_name: wire.patient.name,
            date_of_birth: wire.patient.date_of_birth,
            gender,
        },
        status,
        entries,
    })
}

fn domain_to_wire(order: &Order) -> OrderWire {
    OrderWire {
        accession_number: order.request.accession_number.as_str().to_string(),
        test_code: order.request.test_code.clone(),
        test_name: order.request.test_name.clone(),
        status: order.status.to_wire().to_string(),
        observed_at: Some(order.request.observed_at),
        patient: PatientWire {
            internal_id: order.identity.internal_id.clone(),
            code: order.identity.patient_code.clone(),
            name: order.identity.full_name.clone(),
            date_of_birth: order.identity.date_of_birth.clone(),
            gender: order.identity.gender.map(|g| g.to_wire().to_string()),
        },
        results: order
            .entries
            .iter()
            .map(|entry| ResultWire {
                code: entry.code.clone(),
                value: entry.value,
                flag: entry.flag_override,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"accession_number: ACC123
test_code: CBC
test_name: Complete Blood Count
status: IN_PROGRESS
patient:
  internal_id: "42"
  code: PAT-001
  name: Nguyen Van A
  date_of_birth: 1985-07-14
  gender: M
results:
  - code: WBC
    value: 6.2
  - code: HGB
    value: 11.0
    flag: low
"#;

    #[test]
    fn parses_sample_order() {
        let order = Order::parse(SAMPLE).expect("parse order");
        assert_eq!(order.request.accession_number.as_str(), "ACC123");
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(order.identity.patient_code, "PAT-001");
        assert_eq!(order.entries.len(), 2);
        assert_eq!(order.entries[1].flag_override, Some(AbnormalFlag::Low));
    }

    #[test]
    fn round_trips_through_render() {
        let order = Order::parse(SAMPLE).expect("parse order");
        let rendered = order.render().expect("render order");
        let reparsed = Order::parse(&rendered).expect("reparse order");
        assert_eq!(order, reparsed);
    }

    #[test]
    fn rejects_unknown_keys_with_path() {
        let input = format!("{SAMPLE}unexpected_key: should_fail\n");
        let err = Order::parse(&input).expect_err("should reject unknown key");
        assert!(matches!(err, CoreError::OrderSchema { .. }));
    }

    #[test]
    fn rejects_empty_accession_number() {
        let input = SAMPLE.replace("accession_number: ACC123", "accession_number: \"\"");
        let err = Order::parse(&input).expect_err("empty accession");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn rejects_unknown_status() {
        let input = SAMPLE.replace("IN_PROGRESS", "DONE");
        let err = Order::parse(&input).expect_err("unknown status");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn tolerates_missing_patient_fields() {
        let input = "accession_number: ACC9\ntest_code: CBC\ntest_name: CBC\nstatus: PENDING\npatient: {}\n";
        let order = Order::parse(input).expect("parse order");
        assert!(order.identity.patient_code.is_empty());
        assert!(!order.identity.is_complete());
    }

    #[test]
    fn worksheet_applies_entries_and_overrides() {
        let order = Order::parse(SAMPLE).expect("parse order");
        let sheet = order.worksheet().expect("build worksheet");

        let wbc = sheet.rows().iter().find(|r| r.code() == "WBC").expect("WBC row");
        assert_eq!(wbc.value(), Some(6.2));
        assert_eq!(wbc.flag(), Some(AbnormalFlag::Normal));

        let hgb = sheet.rows().iter().find(|r| r.code() == "HGB").expect("HGB row");
        assert!(hgb.is_overridden());
        assert_eq!(hgb.flag(), Some(AbnormalFlag::Low));
    }

    #[test]
    fn order_status_wire_codes_round_trip() {
        for status in [OrderStatus::Pending, OrderStatus::InProgress, OrderStatus::Complete] {
            assert_eq!(OrderStatus::from_wire(status.to_wire()), Some(status));
        }
        assert_eq!(OrderStatus::from_wire("DONE"), None);
    }
}
