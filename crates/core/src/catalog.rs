//! Reference-range catalog.
//!
//! A fixed complete-blood-count panel: one template per supported parameter
//! with its code, display name, unit, numeric reference bounds, and the
//! range string printed on reports. Worksheets are seeded from this panel
//! when a new session starts.

use crate::classify::ReferenceRange;

/// Template for one supported parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSpec {
    /// Parameter code, e.g. `WBC`.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Unit of measure. ISO-2955 style (`10*9/L`) so units survive encoding
    /// without escape sequences.
    pub unit: &'static str,
    /// Inclusive low bound of the normal band.
    pub low: f64,
    /// Exclusive high bound of the normal band.
    pub high: f64,
    /// Value at or below which the result is critical.
    pub critical_low: Option<f64>,
    /// Value at or above which the result is critical.
    pub critical_high: Option<f64>,
    /// Range string as printed on reports.
    pub reference_display: &'static str,
}

impl ParameterSpec {
    /// Numeric bounds for classification.
    pub fn reference_range(&self) -> ReferenceRange {
        ReferenceRange {
            low: self.low,
            high: self.high,
            critical_low: self.critical_low,
            critical_high: self.critical_high,
        }
    }
}

/// The supported CBC panel, in report order.
pub const CBC_PANEL: &[ParameterSpec] = &[
    ParameterSpec {
        code: "WBC",
        name: "White Blood Cells",
        unit: "10*9/L",
        low: 4.0,
        high: 10.0,
        critical_low: Some(1.0),
        critical_high: Some(30.0),
        reference_display: "4.0-10.0",
    },
    ParameterSpec {
        code: "RBC",
        name: "Red Blood Cells",
        unit: "10*12/L",
        low: 3.8,
        high: 5.8,
        critical_low: None,
        critical_high: None,
        reference_display: "3.8-5.8",
    },
    ParameterSpec {
        code: "HGB",
        name: "Hemoglobin",
        unit: "g/dL",
        low: 12.0,
        high: 17.5,
        critical_low: Some(6.5),
        critical_high: Some(20.0),
        reference_display: "12.0-17.5",
    },
    ParameterSpec {
        code: "HCT",
        name: "Hematocrit",
        unit: "%",
        low: 36.0,
        high: 52.0,
        critical_low: None,
        critical_high: None,
        reference_display: "36.0-52.0",
    },
    ParameterSpec {
        code: "MCV",
        name: "Mean Corpuscular Volume",
        unit: "fL",
        low: 80.0,
        high: 100.0,
        critical_low: None,
        critical_high: None,
        reference_display: "80.0-100.0",
    },
    ParameterSpec {
        code: "MCH",
        name: "Mean Corpuscular Hemoglobin",
        unit: "pg",
        low: 27.0,
        high: 33.0,
        critical_low: None,
        critical_high: None,
        reference_display: "27.0-33.0",
    },
    ParameterSpec {
        code: "MCHC",
        name: "Mean Corpuscular Hemoglobin Concentration",
        unit: "g/dL",
        low: 32.0,
        high: 36.0,
        critical_low: None,
        critical_high: None,
        reference_display: "32.0-36.0",
    },
    ParameterSpec {
        code: "PLT",
        name: "Platelets",
        unit: "10*9/L",
        low: 150.0,
        high: 450.0,
        critical_low: Some(20.0),
        critical_high: Some(1000.0),
        reference_display: "150-450",
    },
];

/// Looks up a parameter by code (case-sensitive).
pub fn find(code: &str) -> Option<&'static ParameterSpec> {
    CBC_PANEL.iter().find(|spec| spec.code == code)
}
