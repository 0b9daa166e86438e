use tracing::{debug, warn};

use super::error::UplinkError;
use super::fields::{PackedDate, PackedDateTime};
use super::layout;
use super::reader::UplinkReader;
use crate::config::LengthPolicy;

/// A decoded uplink, one variant per packet format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uplink {
    /// Daily status report; the body is not interpreted.
    DailyStatus,
    MonthlyStatus(MonthlyStatus),
    IdentityReport(IdentityReport),
    StatusEvent(StatusEvent),
    /// Periodic family with an unrecognized sub-type nibble.
    UnknownSubtype { subtype: u8 },
    /// Unrecognized packet type nibble.
    UnknownType { packet_type: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStatus {
    pub timestamp: PackedDateTime,
    pub status_a: u8,
    pub status_b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityReport {
    pub firmware_version: u32,
    /// Major, minor, patch.
    pub lorawan_version: [u8; 3],
    pub command_version_major: u8,
    pub command_version_minor: u8,
    pub device_type: u8,
    pub meter_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub code: EventCode,
    /// Present only for codes that carry a date.
    pub date: Option<PackedDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCode {
    Removal,
    BatteryEndOfLife,
    HornDriveLevelFailure,
    ObstructionDetection,
    ObjectInSurroundingArea,
    Unknown(u8),
}

impl EventCode {
    pub fn from_u8(code: u8) -> Self {
        match code {
            layout::EVENT_REMOVAL => EventCode::Removal,
            layout::EVENT_BATTERY_END_OF_LIFE => EventCode::BatteryEndOfLife,
            layout::EVENT_HORN_DRIVE_LEVEL_FAILURE => EventCode::HornDriveLevelFailure,
            layout::EVENT_OBSTRUCTION_DETECTION => EventCode::ObstructionDetection,
            layout::EVENT_OBJECT_IN_SURROUNDING_AREA => EventCode::ObjectInSurroundingArea,
            other => EventCode::Unknown(other),
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            EventCode::Removal => Some("removal"),
            EventCode::BatteryEndOfLife => Some("battery end of life"),
            EventCode::HornDriveLevelFailure => Some("horn drive level failure"),
            EventCode::ObstructionDetection => Some("obstruction detection"),
            EventCode::ObjectInSurroundingArea => Some("object in the surrounding area"),
            EventCode::Unknown(_) => None,
        }
    }

    pub fn carries_date(&self) -> bool {
        matches!(self, EventCode::Removal | EventCode::ObjectInSurroundingArea)
    }
}

/// Decode a raw uplink payload into a typed [`Uplink`].
///
/// Unrecognized type or sub-type nibbles are returned as variants, not
/// errors. Errors only occur under [`LengthPolicy::Strict`] when the payload
/// is shorter than its format requires.
pub fn parse_uplink(payload: &[u8], policy: LengthPolicy) -> Result<Uplink, UplinkError> {
    let reader = UplinkReader::new(payload, policy);
    reader.require_len(layout::HEADER_LEN)?;

    let packet_type = reader.type_nibble()?;
    debug!(packet_type, len = payload.len(), "dispatching uplink");
    match packet_type {
        layout::TYPE_DAILY_STATUS => Ok(Uplink::DailyStatus),
        layout::TYPE_PERIODIC => parse_periodic(&reader),
        layout::TYPE_STATUS_EVENT => parse_status_event(&reader).map(Uplink::StatusEvent),
        other => {
            warn!(packet_type = other, "unrecognized packet type");
            Ok(Uplink::UnknownType { packet_type: other })
        }
    }
}

fn parse_periodic(reader: &UplinkReader<'_>) -> Result<Uplink, UplinkError> {
    match reader.subtype_nibble()? {
        layout::SUBTYPE_MONTHLY_STATUS => parse_monthly_status(reader).map(Uplink::MonthlyStatus),
        layout::SUBTYPE_IDENTITY_REPORT => {
            parse_identity_report(reader).map(Uplink::IdentityReport)
        }
        other => {
            warn!(subtype = other, "unrecognized periodic sub-type");
            Ok(Uplink::UnknownSubtype { subtype: other })
        }
    }
}

fn parse_monthly_status(reader: &UplinkReader<'_>) -> Result<MonthlyStatus, UplinkError> {
    reader.require_len(layout::MONTHLY_STATUS_LEN)?;
    let raw = reader.read_u32_be(layout::MONTHLY_TIMESTAMP_RANGE)?;
    Ok(MonthlyStatus {
        timestamp: PackedDateTime::from_u32(raw),
        status_a: reader.read_u8(layout::MONTHLY_STATUS_A_OFFSET)?,
        status_b: reader.read_u8(layout::MONTHLY_STATUS_B_OFFSET)?,
    })
}

fn parse_identity_report(reader: &UplinkReader<'_>) -> Result<IdentityReport, UplinkError> {
    reader.require_len(layout::IDENTITY_REPORT_LEN)?;
    Ok(IdentityReport {
        firmware_version: reader.read_u32_be(layout::FIRMWARE_VERSION_RANGE)?,
        lorawan_version: reader.read_array(layout::LORAWAN_VERSION_RANGE)?,
        command_version_major: reader.read_u8(layout::COMMAND_VERSION_MAJOR_OFFSET)?,
        command_version_minor: reader.read_u8(layout::COMMAND_VERSION_MINOR_OFFSET)?,
        device_type: reader.read_u8(layout::DEVICE_TYPE_OFFSET)?,
        meter_id: reader.read_u32_be(layout::METER_ID_RANGE)?,
    })
}

fn parse_status_event(reader: &UplinkReader<'_>) -> Result<StatusEvent, UplinkError> {
    reader.require_len(layout::STATUS_EVENT_LEN)?;
    let code = EventCode::from_u8(reader.read_u8(layout::EVENT_CODE_OFFSET)?);
    if let EventCode::Unknown(value) = code {
        debug!(code = value, "unrecognized status event code");
    }

    let date = if code.carries_date() {
        reader.require_len(layout::STATUS_EVENT_DATED_LEN)?;
        let raw = reader.read_u16_be(layout::EVENT_DATE_RANGE)?;
        Some(PackedDate::from_u16(raw))
    } else {
        None
    };

    Ok(StatusEvent { code, date })
}
