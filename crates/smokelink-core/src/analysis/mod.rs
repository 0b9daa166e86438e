use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::source::{HexLinesSource, PayloadEvent, PayloadSource, SourceError};
use crate::{
    DecodeSummary, DecoderConfig, InputInfo, PacketEntry, Report, decode_payload_with,
    make_stub_report,
};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode every payload of a hex text file.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use smokelink_core::{DecoderConfig, analyze_hex_file};
///
/// let report = analyze_hex_file(Path::new("uplinks.hex"), &DecoderConfig::default())?;
/// println!("payloads: {}", report.summary.payloads_total);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn analyze_hex_file(path: &Path, config: &DecoderConfig) -> Result<Report, AnalysisError> {
    let source = HexLinesSource::open(path)?;
    let input = InputInfo {
        path: path.display().to_string(),
        bytes: path.metadata()?.len(),
    };
    analyze_source(Some(input), source, config)
}

/// Decode every payload of a source into a report.
///
/// Strict-length failures become entries with an `error`; source errors
/// (I/O, invalid hex) abort the analysis.
pub fn analyze_source<S: PayloadSource>(
    input: Option<InputInfo>,
    mut source: S,
    config: &DecoderConfig,
) -> Result<Report, AnalysisError> {
    let mut report = make_stub_report(input);

    while let Some(PayloadEvent { line, payload }) = source.next_payload()? {
        let entry = match decode_payload_with(&payload, config) {
            Ok(record) => PacketEntry {
                line,
                payload_hex: hex::encode_upper(&payload),
                decoded: Some(record),
                error: None,
            },
            Err(err) => {
                debug!(line, error = %err, "payload rejected");
                PacketEntry {
                    line,
                    payload_hex: hex::encode_upper(&payload),
                    decoded: None,
                    error: Some(err.to_string()),
                }
            }
        };
        report.packets.push(entry);
    }

    report.summary = summarize(&report.packets);
    debug!(
        payloads = report.summary.payloads_total,
        failed = report.summary.failed,
        errors = report.summary.errors,
        "analysis complete"
    );
    Ok(report)
}

fn summarize(entries: &[PacketEntry]) -> DecodeSummary {
    let mut summary = DecodeSummary {
        payloads_total: entries.len() as u64,
        ..DecodeSummary::default()
    };
    for entry in entries {
        match &entry.decoded {
            Some(record) if record.status_decoded => summary.decoded += 1,
            Some(_) => summary.failed += 1,
            None => summary.errors += 1,
        }
    }
    summary
}
