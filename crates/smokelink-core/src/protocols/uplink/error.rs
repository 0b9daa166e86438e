use thiserror::Error;

/// Errors returned by uplink parsing and reading.
///
/// Unrecognized packet types and sub-types are not errors; they decode into
/// explicit `Uplink` variants. Only the strict length policy produces errors.
///
/// # Examples
/// ```
/// use smokelink_core::UplinkError;
///
/// let err = UplinkError::TooShort { needed: 7, actual: 3 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UplinkError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
