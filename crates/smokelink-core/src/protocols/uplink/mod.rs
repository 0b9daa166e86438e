//! Smoke-alarm uplink decoding.
//!
//! The first payload byte selects the packet family through its high nibble:
//! `0x1` daily status (sync, body not interpreted), `0x9` periodic reports
//! (sync, low nibble selects monthly status or identity report) and `0xA`
//! status events (async). The parser turns a payload into a typed `Uplink`;
//! unrecognized type and sub-type nibbles become explicit variants rather
//! than errors.
//!
//! Payload length is not validated by default: bytes past the end read as
//! zero. The strict length policy turns short payloads into `TooShort`
//! errors. Byte offsets live in `layout`, bit-packed dates and the status
//! summary in `fields`.
//!
//! Version française (résumé):
//! Le quartet haut du premier octet choisit la famille (0x1 quotidien,
//! 0x9 périodique avec sous-type, 0xA événement). Les positions sont dans
//! `layout`, les champs compacts (dates, résumé d'état) dans `fields`.

pub mod error;
pub mod fields;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::UplinkError;
pub use fields::{PackedDate, PackedDateTime};
pub use parser::{
    EventCode, IdentityReport, MonthlyStatus, StatusEvent, Uplink, parse_uplink,
};
