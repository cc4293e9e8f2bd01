use thiserror::Error;

/// Errors returned by PHOENIX frame decoding.
///
/// # Examples
/// ```
/// use phoenix_beacon_core::PhoenixError;
///
/// let err = PhoenixError::FrameTooShort { needed: 76, actual: 10 };
/// assert!(err.to_string().contains("frame too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoenixError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    FrameTooShort { needed: usize, actual: usize },
}
