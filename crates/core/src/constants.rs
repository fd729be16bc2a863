//! Constants used throughout the LabBridge core crate.

/// Prefix for exported message filenames.
pub const EXPORT_FILE_PREFIX: &str = "test_result_";

/// File extension for exported messages.
pub const EXPORT_FILE_EXTENSION: &str = "hl7";

/// Timestamp format embedded in exported filenames.
pub const EXPORT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Default sending application name when none is configured.
pub const DEFAULT_SENDING_APPLICATION: &str = "LabBridge";

/// Default sending facility name when none is configured.
pub const DEFAULT_SENDING_FACILITY: &str = "Haematology Lab";

/// Default receiving application name when none is configured.
pub const DEFAULT_RECEIVING_APPLICATION: &str = "LIS";

/// Default receiving facility name when none is configured.
pub const DEFAULT_RECEIVING_FACILITY: &str = "Central Hospital";
