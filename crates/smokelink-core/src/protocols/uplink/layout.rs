use std::ops::Range;

pub const HEADER_OFFSET: usize = 0;
pub const HEADER_LEN: usize = 1;
pub const TYPE_NIBBLE_SHIFT: u8 = 4;
pub const SUBTYPE_NIBBLE_MASK: u8 = 0x0F;

/// Daily status report (sync). Sent once per day, body not decoded.
pub const TYPE_DAILY_STATUS: u8 = 0x1;
/// Periodic reports (sync), split by the sub-type nibble.
pub const TYPE_PERIODIC: u8 = 0x9;
/// Event-driven status packet (async).
pub const TYPE_STATUS_EVENT: u8 = 0xA;

pub const SUBTYPE_MONTHLY_STATUS: u8 = 0x01;
pub const SUBTYPE_IDENTITY_REPORT: u8 = 0x02;

// Monthly status report (9.1)
pub const MONTHLY_TIMESTAMP_RANGE: Range<usize> = 1..5;
pub const MONTHLY_STATUS_A_OFFSET: usize = 5;
pub const MONTHLY_STATUS_B_OFFSET: usize = 6;
pub const MONTHLY_STATUS_LEN: usize = 7;

// Identity report (9.2)
pub const FIRMWARE_VERSION_RANGE: Range<usize> = 1..5;
pub const LORAWAN_VERSION_RANGE: Range<usize> = 5..8;
pub const COMMAND_VERSION_MINOR_OFFSET: usize = 8;
pub const COMMAND_VERSION_MAJOR_OFFSET: usize = 9;
pub const DEVICE_TYPE_OFFSET: usize = 10;
pub const METER_ID_RANGE: Range<usize> = 11..15;
pub const IDENTITY_REPORT_LEN: usize = 15;

// Status event (A)
pub const EVENT_CODE_OFFSET: usize = 1;
pub const EVENT_DATE_RANGE: Range<usize> = 3..5;
pub const STATUS_EVENT_LEN: usize = 2;
pub const STATUS_EVENT_DATED_LEN: usize = 5;

pub const EVENT_REMOVAL: u8 = 0x02;
pub const EVENT_BATTERY_END_OF_LIFE: u8 = 0x0C;
pub const EVENT_HORN_DRIVE_LEVEL_FAILURE: u8 = 0x16;
pub const EVENT_OBSTRUCTION_DETECTION: u8 = 0x1A;
pub const EVENT_OBJECT_IN_SURROUNDING_AREA: u8 = 0x1C;

/// Bit-string positions of the monthly status summary, left to right.
/// Position 1 is unassigned.
pub const STATUS_SUMMARY_LABELS: [Option<&str>; 6] = [
    Some("removal"),
    None,
    Some("battery end of life"),
    Some("acoustic alarm failure"),
    Some("obstruction detection"),
    Some("surrounding area monitoring"),
];
