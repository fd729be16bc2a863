use labbridge_types::QuantityError;

/// Errors returned by the LabBridge core.
///
/// The first three variants form the precondition family checked by the send
/// gate; `MissingValue` and `InvalidValue` form the validation family that
/// blocks message assembly. Both are terminal for the attempt: the operator
/// corrects the condition and re-triggers generation or sending manually.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no message has been generated yet")]
    NothingToSend,

    #[error("order is already complete and must not receive a second result")]
    OrderAlreadyComplete,

    #[error("patient identity is incomplete: patient code and name are required")]
    IncompletePatientIdentity,

    #[error("no value entered for {0}")]
    MissingValue(String),

    #[error("invalid value for {code}: {source}")]
    InvalidValue {
        code: String,
        #[source]
        source: QuantityError,
    },

    #[error("HL7 encoding error: {0}")]
    Hl7(#[from] hl7::Hl7Error),

    #[error("order schema mismatch at {path}: {source}")]
    OrderSchema {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize order: {0}")]
    OrderSerialization(serde_yaml::Error),

    #[error("failed to write export file: {0}")]
    FileWrite(std::io::Error),
}

/// Type alias for Results that can fail with a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
