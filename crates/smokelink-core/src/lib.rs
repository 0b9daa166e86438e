//! smokelink core library for decoding smoke-alarm LoRaWAN uplinks.
//!
//! The decoder is a pure function from payload bytes to a [`DecodedPacket`]:
//! the protocol layer (layout/reader/parser) turns bytes into a typed
//! [`Uplink`], and the record layer renders it into the uniform record shape
//! consumed downstream. Hex-text sources feed the analysis layer, which
//! collects records into a deterministic [`Report`]. All I/O is isolated in
//! `source` modules.
//!
//! Invariants:
//! - `status_decoded` is false only for unrecognized type or sub-type nibbles.
//! - Records are built once per payload; decoding the same bytes twice yields
//!   equal records.
//! - Report entries keep input order.
//!
//! Version française (résumé):
//! Cette crate décode les trames LoRaWAN d'un détecteur de fumée : octets ->
//! `Uplink` typé -> enregistrement uniforme. Les E/S restent dans `source`,
//! l'agrégation dans `analysis`. Le décodage est pur et déterministe.
//!
//! # Examples
//! ```
//! use smokelink_core::{StatusInterpretation, decode_payload};
//!
//! let record = decode_payload(&[0xA0, 0x02, 0x00, 0x6F, 0x03]);
//! assert_eq!(record.timestamp.as_deref(), Some("2024-3-15"));
//! assert_eq!(
//!     record.status_interpretation,
//!     Some(StatusInterpretation::Label("removal".to_string()))
//! );
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

mod analysis;
mod config;
mod protocols;
mod record;
mod source;

pub use analysis::{AnalysisError, analyze_hex_file, analyze_source};
pub use config::{DecoderConfig, LengthPolicy, TimestampStyle};
pub use protocols::uplink::{
    EventCode, IdentityReport, MonthlyStatus, PackedDate, PackedDateTime, StatusEvent, Uplink,
    UplinkError, parse_uplink,
};
pub use source::{
    HexArgsSource, HexLinesSource, PayloadEvent, PayloadSource, SourceError, parse_hex_payload,
};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded uplink record.
///
/// Every field is serialized, absent values as `null`.
///
/// # Examples
/// ```
/// use smokelink_core::decode_payload;
///
/// let record = decode_payload(&[0x30, 0x01]);
/// assert_eq!(record.packet_type, None);
/// assert!(!record.status_decoded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedPacket {
    /// Packet family (1 or 9), `None` when the type nibble is unrecognized.
    pub packet_type: Option<u8>,
    /// Sub-type within family 9 (1 or 2), 0 for families without sub-types.
    pub packet_subtype: Option<u8>,
    /// Sync or async classification.
    pub packet_type_info: Option<PacketTypeInfo>,
    /// Decoded date or date-time, for formats that carry one.
    pub timestamp: Option<String>,
    /// Decoded status: one label or an ordered list, depending on the family.
    pub status_interpretation: Option<StatusInterpretation>,
    /// False when the type or sub-type nibble was unrecognized.
    pub status_decoded: bool,
    /// Diagnostic with the raw bytes, only set when decoding failed.
    pub status_info: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketTypeInfo {
    Sync,
    Async,
}

/// Status payload; serialized as a bare string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusInterpretation {
    Label(String),
    Labels(Vec<String>),
}

/// Decode a payload with the default configuration.
///
/// Missing bytes read as zero, so this never fails.
pub fn decode_payload(payload: &[u8]) -> DecodedPacket {
    match decode_payload_with(payload, &DecoderConfig::default()) {
        Ok(record) => record,
        Err(err) => {
            warn!(error = %err, len = payload.len(), "zero-fill decode failed");
            record::build_record(
                &Uplink::UnknownType { packet_type: 0 },
                payload,
                TimestampStyle::default(),
            )
        }
    }
}

/// Decode a payload with explicit options.
///
/// # Errors
/// Returns `UplinkError::TooShort` under [`LengthPolicy::Strict`] when the
/// payload is shorter than its format requires.
///
/// # Examples
/// ```
/// use smokelink_core::{DecoderConfig, LengthPolicy, decode_payload_with};
///
/// let config = DecoderConfig {
///     length_policy: LengthPolicy::Strict,
///     ..DecoderConfig::default()
/// };
/// assert!(decode_payload_with(&[0x91, 0x05], &config).is_err());
/// ```
pub fn decode_payload_with(
    payload: &[u8],
    config: &DecoderConfig,
) -> Result<DecodedPacket, UplinkError> {
    let uplink = parse_uplink(payload, config.length_policy)?;
    Ok(record::build_record(
        &uplink,
        payload,
        config.timestamp_style,
    ))
}

/// Decode report with deterministic ordering.
///
/// # Examples
/// ```
/// use smokelink_core::make_stub_report;
///
/// let report = make_stub_report(None);
/// assert_eq!(report.report_version, smokelink_core::REPORT_VERSION);
/// assert!(report.packets.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input file metadata, absent when payloads came from arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<InputInfo>,
    /// Outcome counts.
    pub summary: DecodeSummary,
    /// One entry per payload, in input order.
    pub packets: Vec<PacketEntry>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input file metadata embedded in reports.
///
/// # Examples
/// ```
/// use smokelink_core::InputInfo;
///
/// let input = InputInfo {
///     path: "uplinks.hex".to_string(),
///     bytes: 64,
/// };
/// assert_eq!(input.bytes, 64);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Counts over all report entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub payloads_total: u64,
    /// Records with `status_decoded == true`.
    pub decoded: u64,
    /// Records with `status_decoded == false`.
    pub failed: u64,
    /// Payloads rejected before a record could be built.
    pub errors: u64,
}

/// One decoded payload; exactly one of `decoded` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketEntry {
    /// Line number in the input file, or argument position.
    pub line: usize,
    /// Uppercase hex without separators.
    pub payload_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded: Option<DecodedPacket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a report with base fields filled and no entries.
pub fn make_stub_report(input: Option<InputInfo>) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "smokelink".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input,
        summary: DecodeSummary::default(),
        packets: vec![],
    }
}
