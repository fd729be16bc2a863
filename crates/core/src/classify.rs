//! Abnormal-flag classification.
//!
//! [`classify`] is a pure function from a numeric value and a reference
//! range to an [`AbnormalFlag`]. It is used both to suggest a default flag
//! when a value is entered and to re-derive the flag after edits; an
//! operator override is carried separately as [`FlagState::Overridden`] so
//! the classifier itself stays side-effect free and testable in isolation.
//!
//! # Boundary convention
//!
//! Bounds are **inclusive low, exclusive high**: a value equal to the low
//! bound is Normal, a value equal to the high bound is High. This matches
//! typical lab reporting where the printed range `4.0-10.0` means
//! `4.0 <= value < 10.0`. Critical bounds use the same convention on the
//! abnormal side: a value at or below `critical_low`, or at or above
//! `critical_high`, is Critical.

use hl7::AbnormalFlag;

/// Numeric reference bounds for one parameter.
///
/// `low`/`high` delimit the normal band; the optional critical bounds mark
/// values requiring immediate attention. Supplied per row by the catalog,
/// never hard-coded globally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
    pub critical_low: Option<f64>,
    pub critical_high: Option<f64>,
}

impl ReferenceRange {
    /// A range with no critical bounds.
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            critical_low: None,
            critical_high: None,
        }
    }
}

/// Classifies a value against its reference range.
///
/// Stable: the same input always yields the same output. See the module
/// documentation for the boundary convention.
pub fn classify(value: f64, range: &ReferenceRange) -> AbnormalFlag {
    if let Some(critical_low) = range.critical_low {
        if value <= critical_low {
            return AbnormalFlag::Critical;
        }
    }
    if let Some(critical_high) = range.critical_high {
        if value >= critical_high {
            return AbnormalFlag::Critical;
        }
    }
    if value < range.low {
        AbnormalFlag::Low
    } else if value >= range.high {
        AbnormalFlag::High
    } else {
        AbnormalFlag::Normal
    }
}

/// Current flag of a worksheet row: computed by the classifier, or chosen by
/// the operator.
///
/// The encoder always emits whichever is current; re-entering a value
/// replaces an override with a freshly computed flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagState {
    /// Suggested by [`classify`] from the entered value.
    Computed(AbnormalFlag),
    /// Chosen manually by the operator.
    Overridden(AbnormalFlag),
}

impl FlagState {
    /// Returns the flag currently in effect.
    pub fn flag(&self) -> AbnormalFlag {
        match self {
            FlagState::Computed(flag) | FlagState::Overridden(flag) => *flag,
        }
    }

    /// Returns true when the operator has overridden the computed flag.
    pub fn is_overridden(&self) -> bool {
        matches!(self, FlagState::Overridden(_))
    }
}
