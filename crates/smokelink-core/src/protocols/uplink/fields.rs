//! Bit-packed field decoders shared by the uplink formats.
//!
//! Dates follow the EN 13757-3 compact layouts as emitted by the device
//! firmware. Values are unpacked as-is: sentinel fields (e.g. `0xFF`) are not
//! special-cased, and the century is fixed to 20.
//!
//! `Display` renders the legacy unpadded form consumers already depend on
//! (`2024-3-15T14:5:00Z`); `to_iso8601` renders a validated, zero-padded form.

use std::fmt;

use time::format_description::well_known::Rfc3339;
use time::{Date, Month, PrimitiveDateTime, Time};

use super::layout;

const CENTURY: i32 = 2000;

/// 16-bit packed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedDate {
    /// Two-digit year within the century (0..=63).
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

impl PackedDate {
    pub fn from_u16(raw: u16) -> Self {
        Self {
            year: unpack_year(raw),
            month: (raw & 0x000F) as u8,
            day: ((raw & 0x1F00) >> 8) as u8,
        }
    }

    /// Zero-padded `YYYY-MM-DD`, or `None` when the fields are not a calendar
    /// date.
    pub fn to_iso8601(&self) -> Option<String> {
        let date = self.calendar_date()?;
        Some(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ))
    }

    fn calendar_date(&self) -> Option<Date> {
        let month = Month::try_from(self.month).ok()?;
        Date::from_calendar_date(CENTURY + i32::from(self.year), month, self.day).ok()
    }
}

impl fmt::Display for PackedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "20{:02}-{}-{}", self.year, self.month, self.day)
    }
}

/// 32-bit packed date and time (minute resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedDateTime {
    pub date: PackedDate,
    pub hour: u8,
    pub minute: u8,
}

impl PackedDateTime {
    pub fn from_u32(raw: u32) -> Self {
        Self {
            date: PackedDate::from_u16((raw & 0xFFFF) as u16),
            hour: ((raw & 0x001F_0000) >> 16) as u8,
            minute: ((raw & 0x3F00_0000) >> 24) as u8,
        }
    }

    /// RFC 3339 in UTC (`2024-03-15T14:05:00Z`), or `None` when the fields are
    /// out of range.
    pub fn to_iso8601(&self) -> Option<String> {
        let date = self.date.calendar_date()?;
        let time = Time::from_hms(self.hour, self.minute, 0).ok()?;
        PrimitiveDateTime::new(date, time)
            .assume_utc()
            .format(&Rfc3339)
            .ok()
    }
}

impl fmt::Display for PackedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}:{}:00Z", self.date, self.hour, self.minute)
    }
}

// Bits 15-13 land on 5-3 and bits 7-4 on 3-0; bit 3 is OR-ed from both.
fn unpack_year(raw: u16) -> u8 {
    (((raw & 0xE000) >> 10) | ((raw & 0x00F0) >> 4)) as u8
}

/// Labels for the two monthly status bytes.
///
/// Each byte is read as its unpadded base-2 string, so a label's position
/// depends on the byte's highest set bit (`0x20` is `"100000"` and maps its
/// single bit to position 0). Byte `a` is fully processed before `b`.
pub fn status_summary(a: u8, b: u8) -> Vec<String> {
    let mut labels = Vec::new();
    push_status_labels(a, &mut labels);
    push_status_labels(b, &mut labels);
    labels
}

fn push_status_labels(byte: u8, labels: &mut Vec<String>) {
    let bits = format!("{byte:b}");
    for (index, bit) in bits.chars().enumerate() {
        if bit != '1' {
            continue;
        }
        if let Some(Some(label)) = layout::STATUS_SUMMARY_LABELS.get(index) {
            labels.push((*label).to_string());
        }
    }
}
