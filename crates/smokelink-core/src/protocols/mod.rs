//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: nibble values, byte offsets and ranges (source of truth)
//! - `reader`: safe byte access under a length policy
//! - `parser`: typed dispatch into domain values (no direct byte indexing)
//! - `fields`: bit-packed field decoders shared across formats
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and analysis layers handle
//! file access and aggregation.

pub mod uplink;
