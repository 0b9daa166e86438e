use std::ops::Range;

use super::error::UplinkError;
use super::layout;
use crate::config::LengthPolicy;

pub struct UplinkReader<'a> {
    payload: &'a [u8],
    policy: LengthPolicy,
}

impl<'a> UplinkReader<'a> {
    pub fn new(payload: &'a [u8], policy: LengthPolicy) -> Self {
        Self { payload, policy }
    }

    /// Check the payload length; a no-op under [`LengthPolicy::ZeroFill`].
    pub fn require_len(&self, needed: usize) -> Result<(), UplinkError> {
        if self.policy == LengthPolicy::Strict && self.payload.len() < needed {
            return Err(UplinkError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    /// Read one byte. Offsets past the end read as zero unless the policy is
    /// strict.
    pub fn read_u8(&self, offset: usize) -> Result<u8, UplinkError> {
        match self.payload.get(offset) {
            Some(value) => Ok(*value),
            None => match self.policy {
                LengthPolicy::ZeroFill => Ok(0),
                LengthPolicy::Strict => Err(UplinkError::TooShort {
                    needed: offset + 1,
                    actual: self.payload.len(),
                }),
            },
        }
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, UplinkError> {
        Ok(u16::from_be_bytes(self.read_array(range)?))
    }

    pub fn read_u32_be(&self, range: Range<usize>) -> Result<u32, UplinkError> {
        Ok(u32::from_be_bytes(self.read_array(range)?))
    }

    pub fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], UplinkError> {
        if range.len() != N {
            return Err(UplinkError::TooShort {
                needed: N,
                actual: range.len(),
            });
        }
        let mut bytes = [0u8; N];
        for (slot, offset) in bytes.iter_mut().zip(range) {
            *slot = self.read_u8(offset)?;
        }
        Ok(bytes)
    }

    pub fn type_nibble(&self) -> Result<u8, UplinkError> {
        Ok(self.read_u8(layout::HEADER_OFFSET)? >> layout::TYPE_NIBBLE_SHIFT)
    }

    pub fn subtype_nibble(&self) -> Result<u8, UplinkError> {
        Ok(self.read_u8(layout::HEADER_OFFSET)? & layout::SUBTYPE_NIBBLE_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::UplinkReader;
    use crate::config::LengthPolicy;
    use crate::protocols::uplink::error::UplinkError;

    #[test]
    fn header_nibbles() {
        let payload = [0x92];
        let reader = UplinkReader::new(&payload, LengthPolicy::Strict);
        assert_eq!(reader.type_nibble().unwrap(), 0x9);
        assert_eq!(reader.subtype_nibble().unwrap(), 0x2);
    }

    #[test]
    fn read_u32_big_endian() {
        let payload = [0x91, 0x12, 0x34, 0x56, 0x78];
        let reader = UplinkReader::new(&payload, LengthPolicy::Strict);
        assert_eq!(reader.read_u32_be(1..5).unwrap(), 0x1234_5678);
        assert_eq!(reader.read_u16_be(3..5).unwrap(), 0x5678);
    }

    #[test]
    fn zero_fill_past_end() {
        let payload = [0xA0, 0x02, 0x00, 0x6F];
        let reader = UplinkReader::new(&payload, LengthPolicy::ZeroFill);
        reader.require_len(5).unwrap();
        assert_eq!(reader.read_u16_be(3..5).unwrap(), 0x6F00);
        assert_eq!(reader.read_u8(40).unwrap(), 0);
    }

    #[test]
    fn zero_fill_empty_payload_reads_type_zero() {
        let reader = UplinkReader::new(&[], LengthPolicy::ZeroFill);
        assert_eq!(reader.type_nibble().unwrap(), 0);
    }

    #[test]
    fn strict_past_end() {
        let payload = [0xA0, 0x02, 0x00, 0x6F];
        let reader = UplinkReader::new(&payload, LengthPolicy::Strict);
        let err = reader.read_u16_be(3..5).unwrap_err();
        assert_eq!(
            err,
            UplinkError::TooShort {
                needed: 5,
                actual: 4
            }
        );
        assert!(matches!(
            reader.require_len(5),
            Err(UplinkError::TooShort { needed: 5, .. })
        ));
    }

    #[test]
    fn array_range_mismatch() {
        let payload = [0u8; 8];
        let reader = UplinkReader::new(&payload, LengthPolicy::ZeroFill);
        let err = reader.read_array::<4>(0..2).unwrap_err();
        assert!(err.to_string().contains("payload too short"));
    }
}
