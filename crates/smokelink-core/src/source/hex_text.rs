//! Hex-text payload sources.
//!
//! Files hold one payload per line. Blank lines and `#` comments are skipped;
//! bytes may be separated by whitespace, `:` or `-`, and each token may carry
//! a `0x` prefix.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::debug;

use super::{PayloadEvent, PayloadSource, SourceError};

/// Parse one hex payload, ignoring separators and `0x` prefixes.
///
/// # Examples
/// ```
/// use smokelink_core::parse_hex_payload;
///
/// assert_eq!(parse_hex_payload("A0 02 00 6F 03").unwrap(), vec![0xA0, 0x02, 0x00, 0x6F, 0x03]);
/// assert_eq!(parse_hex_payload("0x91:05").unwrap(), vec![0x91, 0x05]);
/// assert!(parse_hex_payload("A0 2").is_err());
/// ```
pub fn parse_hex_payload(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let cleaned: String = text
        .split(|c: char| c.is_whitespace() || c == ':' || c == '-')
        .map(|token| {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        })
        .collect();
    hex::decode(cleaned)
}

fn is_skipped(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Line-oriented source over any buffered reader.
pub struct HexLinesSource<R> {
    lines: Lines<R>,
    line: usize,
}

impl HexLinesSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened hex payload file");
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> HexLinesSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> PayloadSource for HexLinesSource<R> {
    fn next_payload(&mut self) -> Result<Option<PayloadEvent>, SourceError> {
        for text in self.lines.by_ref() {
            self.line += 1;
            let text = text?;
            if is_skipped(&text) {
                continue;
            }
            let payload = parse_hex_payload(&text).map_err(|err| SourceError::InvalidHex {
                line: self.line,
                message: err.to_string(),
            })?;
            return Ok(Some(PayloadEvent {
                line: self.line,
                payload,
            }));
        }
        Ok(None)
    }
}

/// Source over payloads given as separate strings, e.g. command-line
/// arguments. Positions are 1-based.
pub struct HexArgsSource {
    args: std::vec::IntoIter<String>,
    position: usize,
}

impl HexArgsSource {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args: args.into_iter(),
            position: 0,
        }
    }
}

impl PayloadSource for HexArgsSource {
    fn next_payload(&mut self) -> Result<Option<PayloadEvent>, SourceError> {
        let Some(text) = self.args.next() else {
            return Ok(None);
        };
        self.position += 1;
        let payload = parse_hex_payload(&text).map_err(|err| SourceError::InvalidHex {
            line: self.position,
            message: err.to_string(),
        })?;
        Ok(Some(PayloadEvent {
            line: self.position,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn collect<S: PayloadSource>(mut source: S) -> Vec<PayloadEvent> {
        let mut events = Vec::new();
        while let Some(event) = source.next_payload().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn parse_separators_and_prefixes() {
        assert_eq!(
            parse_hex_payload("0x92 0x00-01:02").unwrap(),
            vec![0x92, 0x00, 0x01, 0x02]
        );
        assert_eq!(parse_hex_payload("a0ff").unwrap(), vec![0xA0, 0xFF]);
        assert!(parse_hex_payload("zz").is_err());
    }

    #[test]
    fn parse_prefix_on_every_separated_byte() {
        assert_eq!(parse_hex_payload("0x91:0x05").unwrap(), vec![0x91, 0x05]);
        assert_eq!(parse_hex_payload("0xA0-0X02").unwrap(), vec![0xA0, 0x02]);
        assert_eq!(
            parse_hex_payload(" 0x10 : 0xAB ").unwrap(),
            vec![0x10, 0xAB]
        );
    }

    #[test]
    fn lines_skip_comments_and_blanks() {
        let text = "# header\n\n10 00\n  # indented comment\nA0 0C\n";
        let events = collect(HexLinesSource::from_reader(Cursor::new(text)));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].line, 3);
        assert_eq!(events[0].payload, vec![0x10, 0x00]);
        assert_eq!(events[1].line, 5);
    }

    #[test]
    fn lines_report_invalid_hex_line() {
        let text = "10 00\nA0 0\n";
        let mut source = HexLinesSource::from_reader(Cursor::new(text));
        assert!(source.next_payload().unwrap().is_some());
        let err = source.next_payload().unwrap_err();
        assert!(matches!(err, SourceError::InvalidHex { line: 2, .. }));
    }

    #[test]
    fn args_positions() {
        let events = collect(HexArgsSource::new(vec![
            "10".to_string(),
            "A0 02 00 6F 03".to_string(),
        ]));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].line, 2);
        assert_eq!(events[1].payload.len(), 5);
    }

    #[test]
    fn args_invalid_hex() {
        let mut source = HexArgsSource::new(vec!["xyz".to_string()]);
        let err = source.next_payload().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
