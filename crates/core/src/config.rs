//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core functions. The core never reads process-wide environment variables
//! itself; the binary resolves them into a `CoreConfig` and hands it over,
//! which keeps behaviour consistent across multi-threaded runtimes and test
//! harnesses.

use crate::constants::{
    DEFAULT_RECEIVING_APPLICATION, DEFAULT_RECEIVING_FACILITY, DEFAULT_SENDING_APPLICATION,
    DEFAULT_SENDING_FACILITY,
};
use crate::{CoreError, CoreResult};
use hl7::MessageHeader;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    sending_application: String,
    sending_facility: String,
    receiving_application: String,
    receiving_facility: String,
    results_endpoint: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the results endpoint is empty.
    pub fn new(
        sending_application: String,
        sending_facility: String,
        receiving_application: String,
        receiving_facility: String,
        results_endpoint: String,
    ) -> CoreResult<Self> {
        if results_endpoint.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "results_endpoint cannot be empty".into(),
            ));
        }

        Ok(Self {
            sending_application,
            sending_facility,
            receiving_application,
            receiving_facility,
            results_endpoint,
        })
    }

    /// Create a config with default routing names and the given endpoint.
    pub fn with_endpoint(results_endpoint: String) -> CoreResult<Self> {
        Self::new(
            DEFAULT_SENDING_APPLICATION.to_string(),
            DEFAULT_SENDING_FACILITY.to_string(),
            DEFAULT_RECEIVING_APPLICATION.to_string(),
            DEFAULT_RECEIVING_FACILITY.to_string(),
            results_endpoint,
        )
    }

    pub fn results_endpoint(&self) -> &str {
        &self.results_endpoint
    }

    /// Builds the MSH routing metadata from the configured names.
    pub fn message_header(&self) -> MessageHeader {
        MessageHeader {
            sending_application: self.sending_application.clone(),
            sending_facility: self.sending_facility.clone(),
            receiving_application: self.receiving_application.clone(),
            receiving_facility: self.receiving_facility.clone(),
        }
    }
}
