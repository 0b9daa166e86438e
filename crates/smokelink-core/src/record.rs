use tracing::warn;

use crate::config::TimestampStyle;
use crate::protocols::uplink::layout;
use crate::protocols::uplink::{
    IdentityReport, MonthlyStatus, PackedDate, PackedDateTime, StatusEvent, Uplink, fields,
};
use crate::{DecodedPacket, PacketTypeInfo, StatusInterpretation};

const DAILY_STATUS_TYPE: u8 = 1;
const STATUS_EVENT_TYPE: u8 = 1;
const PERIODIC_TYPE: u8 = 9;
const MONTHLY_STATUS_SUBTYPE: u8 = 1;
const IDENTITY_REPORT_SUBTYPE: u8 = 2;
const NO_SUBTYPE: u8 = 0;

/// Build the complete record for a typed uplink.
///
/// `payload` is only used for the diagnostic of unrecognized packets.
pub(crate) fn build_record(uplink: &Uplink, payload: &[u8], style: TimestampStyle) -> DecodedPacket {
    match uplink {
        Uplink::DailyStatus => DecodedPacket {
            packet_type: Some(DAILY_STATUS_TYPE),
            packet_subtype: Some(NO_SUBTYPE),
            packet_type_info: Some(PacketTypeInfo::Sync),
            timestamp: None,
            status_interpretation: None,
            status_decoded: true,
            status_info: None,
        },
        Uplink::MonthlyStatus(status) => monthly_status_record(status, style),
        Uplink::IdentityReport(report) => identity_report_record(report),
        Uplink::StatusEvent(event) => status_event_record(event, style),
        Uplink::UnknownSubtype { .. } => DecodedPacket {
            packet_type: Some(PERIODIC_TYPE),
            packet_subtype: None,
            packet_type_info: Some(PacketTypeInfo::Sync),
            timestamp: None,
            status_interpretation: None,
            status_decoded: false,
            status_info: Some(decode_failure_info(payload)),
        },
        Uplink::UnknownType { .. } => DecodedPacket {
            packet_type: None,
            packet_subtype: None,
            packet_type_info: None,
            timestamp: None,
            status_interpretation: None,
            status_decoded: false,
            status_info: Some(decode_failure_info(payload)),
        },
    }
}

fn monthly_status_record(status: &MonthlyStatus, style: TimestampStyle) -> DecodedPacket {
    DecodedPacket {
        packet_type: Some(PERIODIC_TYPE),
        packet_subtype: Some(MONTHLY_STATUS_SUBTYPE),
        packet_type_info: Some(PacketTypeInfo::Sync),
        timestamp: Some(render_date_time(&status.timestamp, style)),
        status_interpretation: Some(StatusInterpretation::Labels(fields::status_summary(
            status.status_a,
            status.status_b,
        ))),
        status_decoded: true,
        status_info: None,
    }
}

fn identity_report_record(report: &IdentityReport) -> DecodedPacket {
    let [major, minor, patch] = report.lorawan_version;
    let lines = vec![
        format!("firmware version: {:X}", report.firmware_version),
        format!("LoRa WAN version: {major:x}.{minor:x}.{patch:x}"),
        format!(
            "LoRa command version: {:x}.{:x}",
            report.command_version_major, report.command_version_minor
        ),
        format!("device type: {:x}", report.device_type),
        format!("meter ID: {:X}", report.meter_id),
    ];

    DecodedPacket {
        packet_type: Some(PERIODIC_TYPE),
        packet_subtype: Some(IDENTITY_REPORT_SUBTYPE),
        packet_type_info: Some(PacketTypeInfo::Sync),
        timestamp: None,
        status_interpretation: Some(StatusInterpretation::Labels(lines)),
        status_decoded: true,
        status_info: None,
    }
}

// Unknown event codes keep the status fields empty and still count as decoded.
fn status_event_record(event: &StatusEvent, style: TimestampStyle) -> DecodedPacket {
    DecodedPacket {
        packet_type: Some(STATUS_EVENT_TYPE),
        packet_subtype: Some(NO_SUBTYPE),
        packet_type_info: Some(PacketTypeInfo::Async),
        timestamp: event.date.as_ref().map(|date| render_date(date, style)),
        status_interpretation: event
            .code
            .label()
            .map(|label| StatusInterpretation::Label(label.to_string())),
        status_decoded: true,
        status_info: None,
    }
}

fn render_date(date: &PackedDate, style: TimestampStyle) -> String {
    match style {
        TimestampStyle::Legacy => date.to_string(),
        TimestampStyle::Iso8601 => date.to_iso8601().unwrap_or_else(|| {
            warn!(%date, "date is not a calendar date, keeping legacy rendering");
            date.to_string()
        }),
    }
}

fn render_date_time(stamp: &PackedDateTime, style: TimestampStyle) -> String {
    match style {
        TimestampStyle::Legacy => stamp.to_string(),
        TimestampStyle::Iso8601 => stamp.to_iso8601().unwrap_or_else(|| {
            warn!(%stamp, "date-time is out of range, keeping legacy rendering");
            stamp.to_string()
        }),
    }
}

/// Diagnostic for unrecognized packets, with the raw bytes as decimal values.
pub(crate) fn decode_failure_info(payload: &[u8]) -> String {
    let raw = payload
        .iter()
        .map(|byte| byte.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "Error at point: {} payload_raw: {}",
        layout::HEADER_OFFSET,
        raw
    )
}
