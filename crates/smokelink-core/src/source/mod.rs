mod hex_text;

pub use hex_text::{HexArgsSource, HexLinesSource, parse_hex_payload};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct PayloadEvent {
    /// 1-based line number (files) or argument position (argument lists).
    pub line: usize,
    pub payload: Vec<u8>,
}

pub trait PayloadSource {
    fn next_payload(&mut self) -> Result<Option<PayloadEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex payload on line {line}: {message}")]
    InvalidHex { line: usize, message: String },
}
