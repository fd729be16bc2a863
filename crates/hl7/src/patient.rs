//! PID (patient identification) wire model and encoder.
//!
//! Patient identity is supplied by an external lookup and may be partially
//! empty before that lookup completes. The encoder tolerates empty fields
//! (they are emitted as empty to preserve positions); rejecting an
//! incomplete identity is the send gate's job, not the encoder's.

/// Administrative gender (PID-8).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    /// Other gender.
    Other,
    /// Gender not known.
    Unknown,
}

impl Gender {
    /// Convert to HL7 wire format code.
    pub fn to_wire(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
            Gender::Unknown => "U",
        }
    }

    /// Parse from HL7 wire format code.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            "O" => Some(Gender::Other),
            "U" => Some(Gender::Unknown),
            _ => None,
        }
    }
}

/// Patient demographics for the PID segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientIdentity {
    /// Internal record identifier (PID-2).
    pub internal_id: String,
    /// Patient code assigned by the ordering system (PID-3).
    pub patient_code: String,
    /// Full name as a single text field (PID-5).
    pub full_name: String,
    /// Date of birth, free text as supplied by the lookup (PID-7).
    pub date_of_birth: String,
    /// Administrative gender, when known (PID-8).
    pub gender: Option<Gender>,
}

impl PatientIdentity {
    /// Returns true when both the patient code and name carry content.
    ///
    /// The send gate requires a complete identity before transmission.
    pub fn is_complete(&self) -> bool {
        !self.patient_code.trim().is_empty() && !self.full_name.trim().is_empty()
    }

    /// Encodes this identity as one PID segment line.
    ///
    /// Field layout:
    ///
    /// ```text
    /// PID|1|<internal id>|<patient code>||<full name>||<date of birth>|<gender>
    /// ```
    ///
    /// Empty fields are emitted as empty rather than omitted so downstream
    /// parsers see stable field positions.
    pub fn render_pid(&self) -> String {
        format!(
            "PID|1|{id}|{code}||{name}||{dob}|{gender}",
            id = crate::escape_field(&self.internal_id),
            code = crate::escape_field(&self.patient_code),
            name = crate::escape_field(&self.full_name),
            dob = crate::escape_field(&self.date_of_birth),
            gender = self.gender.map(Gender::to_wire).unwrap_or(""),
        )
    }
}
