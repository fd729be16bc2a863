//! Validated primitive types shared across the LabBridge crates.
//!
//! These wrappers make invalid values unrepresentable once constructed:
//! - [`NonEmptyText`] for identifiers that must carry content (accession
//!   numbers, routing application and facility names).
//! - [`PositiveQuantity`] for observation values, which must be finite and
//!   strictly positive before a message may be assembled (a non-positive
//!   value means "not yet entered").

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating validated quantity types.
#[derive(Debug, thiserror::Error)]
pub enum QuantityError {
    /// The value was zero or negative
    #[error("Quantity must be positive, got {0}")]
    NotPositive(f64),
    /// The value was NaN or infinite
    #[error("Quantity must be a finite number")]
    NotFinite,
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. The input is trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NonEmptyText::new(s)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A finite, strictly positive numeric value.
///
/// Observation values in a result message must be positive numbers; anything
/// else is treated as "not yet entered" and blocks assembly. Constructing a
/// `PositiveQuantity` is the single place that rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositiveQuantity(f64);

impl PositiveQuantity {
    /// Creates a new `PositiveQuantity` from a raw value.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::NotFinite` for NaN or infinite inputs, and
    /// `QuantityError::NotPositive` for zero or negative inputs.
    pub fn new(value: f64) -> Result<Self, QuantityError> {
        if !value.is_finite() {
            return Err(QuantityError::NotFinite);
        }
        if value <= 0.0 {
            return Err(QuantityError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for PositiveQuantity {
    /// Formats the value with the shortest representation that round-trips
    /// (`6.2` renders as `6.2`, `10.0` as `10`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for PositiveQuantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PositiveQuantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        PositiveQuantity::new(value).map_err(serde::de::Error::custom)
    }
}
