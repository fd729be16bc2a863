//! # LabBridge Core
//!
//! Domain logic for the LabBridge results relay.
//!
//! This crate contains the pure encoding pipeline and its guards:
//! - Reference-range catalog and the worksheet row lifecycle
//! - Abnormal-flag classification with operator override
//! - Order-file parsing and rendering (strict YAML)
//! - The pre-send gate and the file/clipboard export adapters
//!
//! **No transport concerns**: the HTTP submission to the results endpoint
//! lives in `labbridge-transport`; the wire encoders live in `hl7`. The
//! pipeline here is synchronous and free of shared mutable state — every
//! call receives fresh records and returns a new value.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod gate;
pub mod order;
pub mod worksheet;

pub use catalog::{ParameterSpec, CBC_PANEL};
pub use classify::{classify, FlagState, ReferenceRange};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use gate::ensure_sendable;
pub use order::{Order, OrderStatus, ResultEntry};
pub use worksheet::{Worksheet, WorksheetRow};
