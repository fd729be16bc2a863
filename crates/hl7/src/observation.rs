//! OBX (observation result) wire model and encoder.
//!
//! One OBX segment is emitted per measured parameter. The value type is
//! fixed to `NM` (numeric) and the result status to `F` (final) for every
//! row this system produces.

use labbridge_types::PositiveQuantity;
use serde::{Deserialize, Serialize};

/// OBX value type: numeric.
pub const VALUE_TYPE: &str = "NM";

/// OBX result status: final.
pub const RESULT_STATUS: &str = "F";

/// Classification of a result relative to its reference range (OBX-8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbnormalFlag {
    /// Within the reference range.
    Normal,
    /// Below the low bound.
    Low,
    /// At or above the high bound.
    High,
    /// Outside the critical bounds in either direction.
    Critical,
}

impl AbnormalFlag {
    /// Convert to HL7 wire format code.
    pub fn to_wire(self) -> &'static str {
        match self {
            AbnormalFlag::Normal => "N",
            AbnormalFlag::Low => "L",
            AbnormalFlag::High => "H",
            AbnormalFlag::Critical => "C",
        }
    }

    /// Parse from HL7 wire format code.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "N" => Some(AbnormalFlag::Normal),
            "L" => Some(AbnormalFlag::Low),
            "H" => Some(AbnormalFlag::High),
            "C" => Some(AbnormalFlag::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for AbnormalFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AbnormalFlag::Normal => "Normal",
            AbnormalFlag::Low => "Low",
            AbnormalFlag::High => "High",
            AbnormalFlag::Critical => "Critical",
        };
        write!(f, "{name}")
    }
}

/// One measured parameter ready for encoding.
///
/// The value is a [`PositiveQuantity`], so a row with a missing or
/// non-positive value cannot reach the encoder; enforcing that rule is the
/// worksheet's job when it converts entered values into observations.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Parameter code, e.g. `WBC` (OBX-3 component 1).
    pub test_code: String,
    /// Parameter display name (OBX-3 component 2).
    pub test_name: String,
    /// Measured value (OBX-5).
    pub value: PositiveQuantity,
    /// Unit of measure (OBX-6).
    pub unit: String,
    /// Reference range display string, e.g. `4.0-10.0` (OBX-7).
    pub reference_range: String,
    /// Abnormal flag (OBX-8).
    pub flag: AbnormalFlag,
}

impl Observation {
    /// Encodes this observation as one OBX segment line.
    ///
    /// `sequence` is the row's 1-based position in the message, assigned by
    /// the assembler; it is contiguous in row order regardless of any
    /// identifiers the rows carry internally.
    ///
    /// Field layout:
    ///
    /// ```text
    /// OBX|<seq>|NM|<code>^<name>||<value>|<unit>|<range>|<flag>|||F
    /// ```
    pub fn render_obx(&self, sequence: usize) -> String {
        format!(
            "OBX|{seq}|{vt}|{code}^{name}||{value}|{unit}|{range}|{flag}|||{status}",
            seq = sequence,
            vt = VALUE_TYPE,
            code = crate::escape_field(&self.test_code),
            name = crate::escape_field(&self.test_name),
            value = self.value,
            unit = crate::escape_field(&self.unit),
            range = crate::escape_field(&self.reference_range),
            flag = self.flag.to_wire(),
            status = RESULT_STATUS,
        )
    }
}
