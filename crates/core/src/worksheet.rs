//! The observation worksheet.
//!
//! A worksheet is the row set behind one result message: one row per catalog
//! parameter, seeded empty, filled in as values arrive. The row list is
//! immutable — every edit returns a new `Worksheet` — so a message being
//! assembled can never observe a half-applied edit. Callers serialize
//! concurrent edits themselves; the core performs no locking.
//!
//! Generating a message is all-or-nothing: every row must hold a positive
//! value, otherwise generation fails and no partial message is produced. A
//! missing or non-positive value means "not yet entered".

use crate::catalog::{self, ParameterSpec};
use crate::classify::{classify, FlagState, ReferenceRange};
use crate::{CoreError, CoreResult};
use hl7::{
    assemble, AbnormalFlag, EncodedMessage, MessageHeader, MessageStamp, Observation,
    ObservationRequest, PatientIdentity,
};
use labbridge_types::PositiveQuantity;

/// One parameter row: template data plus the operator's entries.
#[derive(Clone, Debug, PartialEq)]
pub struct WorksheetRow {
    code: String,
    name: String,
    unit: String,
    reference_display: String,
    range: ReferenceRange,
    value: Option<f64>,
    flag: Option<FlagState>,
}

impl WorksheetRow {
    fn seeded_from(spec: &ParameterSpec) -> Self {
        Self {
            code: spec.code.to_string(),
            name: spec.name.to_string(),
            unit: spec.unit.to_string(),
            reference_display: spec.reference_display.to_string(),
            range: spec.reference_range(),
            value: None,
            flag: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn reference_display(&self) -> &str {
        &self.reference_display
    }

    /// The entered value, if any.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// The flag currently in effect, if a value has been entered.
    pub fn flag(&self) -> Option<AbnormalFlag> {
        self.flag.map(|state| state.flag())
    }

    /// Whether the operator has overridden the computed flag.
    pub fn is_overridden(&self) -> bool {
        self.flag.map(|state| state.is_overridden()).unwrap_or(false)
    }

    /// Converts this row into a wire observation, enforcing the positive
    /// value invariant.
    fn to_observation(&self) -> CoreResult<Observation> {
        let raw = self
            .value
            .ok_or_else(|| CoreError::MissingValue(self.code.clone()))?;
        let value = PositiveQuantity::new(raw).map_err(|source| CoreError::InvalidValue {
            code: self.code.clone(),
            source,
        })?;
        let flag = self
            .flag
            .map(|state| state.flag())
            .unwrap_or_else(|| classify(raw, &self.range));

        Ok(Observation {
            test_code: self.code.clone(),
            test_name: self.name.clone(),
            value,
            unit: self.unit.clone(),
            reference_range: self.reference_display.clone(),
            flag,
        })
    }
}

/// Immutable row list for one result session.
#[derive(Clone, Debug, PartialEq)]
pub struct Worksheet {
    rows: Vec<WorksheetRow>,
}

impl Worksheet {
    /// Seeds a fresh worksheet, one empty row per catalog parameter, in
    /// panel order.
    pub fn seed() -> Self {
        Self {
            rows: catalog::CBC_PANEL.iter().map(WorksheetRow::seeded_from).collect(),
        }
    }

    /// The rows in stored order.
    pub fn rows(&self) -> &[WorksheetRow] {
        &self.rows
    }

    /// Returns a new worksheet with the value for `code` set.
    ///
    /// The row's flag becomes `Computed` from the classifier; any previous
    /// operator override is discarded, since it applied to the old value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `code` is not on the worksheet.
    pub fn with_value(&self, code: &str, value: f64) -> CoreResult<Self> {
        self.map_row(code, |row| {
            row.value = Some(value);
            row.flag = Some(FlagState::Computed(classify(value, &row.range)));
        })
    }

    /// Returns a new worksheet with the flag for `code` overridden.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if `code` is not on the worksheet
    /// or if no value has been entered for it yet.
    pub fn with_flag_override(&self, code: &str, flag: AbnormalFlag) -> CoreResult<Self> {
        let row = self
            .rows
            .iter()
            .find(|row| row.code == code)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown parameter code: {code}")))?;
        if row.value.is_none() {
            return Err(CoreError::InvalidInput(format!(
                "cannot override flag for {code}: no value entered"
            )));
        }
        self.map_row(code, |row| {
            row.flag = Some(FlagState::Overridden(flag));
        })
    }

    /// Returns a freshly seeded worksheet, discarding all entries.
    pub fn reset(&self) -> Self {
        Self::seed()
    }

    fn map_row(&self, code: &str, edit: impl FnOnce(&mut WorksheetRow)) -> CoreResult<Self> {
        let index = self
            .rows
            .iter()
            .position(|row| row.code == code)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown parameter code: {code}")))?;

        let mut rows = self.rows.clone();
        edit(&mut rows[index]);
        Ok(Self { rows })
    }

    /// Converts all rows to wire observations.
    ///
    /// All-or-nothing: the first missing or non-positive value fails the
    /// whole conversion.
    pub fn observations(&self) -> CoreResult<Vec<Observation>> {
        self.rows.iter().map(WorksheetRow::to_observation).collect()
    }

    /// Assembles the result message for this worksheet.
    ///
    /// The returned [`EncodedMessage`] is a snapshot: later edits to the
    /// worksheet do not change it, and callers regenerate on demand.
    ///
    /// # Errors
    ///
    /// Fails if any row is missing a positive value, or if the row set is
    /// empty.
    pub fn generate(
        &self,
        header: &MessageHeader,
        identity: &PatientIdentity,
        request: &ObservationRequest,
        stamp: &MessageStamp,
    ) -> CoreResult<EncodedMessage> {
        let observations = self.observations()?;
        Ok(assemble(header, identity, request, &observations, stamp)?)
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::seed()
    }
}
