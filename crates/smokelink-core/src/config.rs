use serde::{Deserialize, Serialize};

/// How reads past the end of a payload behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthPolicy {
    /// Missing bytes read as zero; decoding never fails.
    #[default]
    ZeroFill,
    /// Payloads shorter than their format require are rejected.
    Strict,
}

/// Rendering of decoded dates and date-times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampStyle {
    /// Unpadded components, e.g. `2024-3-15T14:5:00Z`.
    #[default]
    Legacy,
    /// Zero-padded and calendar-validated, e.g. `2024-03-15T14:05:00Z`.
    /// Invalid values fall back to the legacy rendering.
    Iso8601,
}

/// Decoder options.
///
/// # Examples
/// ```
/// use smokelink_core::{DecoderConfig, LengthPolicy, TimestampStyle};
///
/// let config = DecoderConfig::default();
/// assert_eq!(config.length_policy, LengthPolicy::ZeroFill);
/// assert_eq!(config.timestamp_style, TimestampStyle::Legacy);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub length_policy: LengthPolicy,
    pub timestamp_style: TimestampStyle,
}
