use super::error::PhoenixError;

/// Assemble a 16-bit word from its low and high bytes (`lo + 256 * hi`).
///
/// # Examples
/// ```
/// use phoenix_beacon_core::assemble_word;
///
/// assert_eq!(assemble_word(0x34, 0x12), 0x1234);
/// ```
pub fn assemble_word(lo: u8, hi: u8) -> u16 {
    u16::from_le_bytes([lo, hi])
}

pub struct PhoenixReader<'a> {
    frame: &'a [u8],
}

impl<'a> PhoenixReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), PhoenixError> {
        if self.frame.len() < needed {
            return Err(PhoenixError::FrameTooShort {
                needed,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, PhoenixError> {
        self.frame
            .get(offset)
            .copied()
            .ok_or(PhoenixError::FrameTooShort {
                needed: offset + 1,
                actual: self.frame.len(),
            })
    }

    /// Read the little-endian word whose low byte sits at `lo`.
    pub fn read_u16_le(&self, lo: usize) -> Result<u16, PhoenixError> {
        let low = self.read_u8(lo)?;
        let high = self.read_u8(lo + 1)?;
        Ok(assemble_word(low, high))
    }

    /// Concatenate the bytes at `offsets`, in the given order, as lowercase hex.
    pub fn read_register_hex(&self, offsets: &[usize]) -> Result<String, PhoenixError> {
        offsets
            .iter()
            .map(|&offset| self.read_u8(offset).map(|b| format!("{:02x}", b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{PhoenixReader, assemble_word};
    use crate::protocols::phoenix::error::PhoenixError;

    #[test]
    fn word_is_little_endian() {
        assert_eq!(assemble_word(0x34, 0x12), 4660);
        assert_eq!(assemble_word(0xff, 0x00), 0x00ff);
        assert_eq!(assemble_word(0x00, 0xff), 0xff00);
    }

    #[test]
    fn read_u16_le_uses_following_byte_as_high() {
        let frame = [0x00, 0x34, 0x12, 0x00];
        let reader = PhoenixReader::new(&frame);
        assert_eq!(reader.read_u16_le(1).unwrap(), 0x1234);
    }

    #[test]
    fn read_past_end_is_too_short() {
        let frame = [0u8; 3];
        let reader = PhoenixReader::new(&frame);
        let err = reader.read_u16_le(2).unwrap_err();
        assert_eq!(
            err,
            PhoenixError::FrameTooShort {
                needed: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn register_hex_follows_offset_order() {
        let frame = [0xef, 0xbe, 0xaf, 0xde];
        let reader = PhoenixReader::new(&frame);
        assert_eq!(reader.read_register_hex(&[3, 2, 1, 0]).unwrap(), "deafbeef");
        assert_eq!(reader.read_register_hex(&[0, 1, 2, 3]).unwrap(), "efbeafde");
    }

    #[test]
    fn require_len_reports_actual() {
        let frame = [0u8; 5];
        let reader = PhoenixReader::new(&frame);
        assert!(reader.require_len(5).is_ok());
        let err = reader.require_len(6).unwrap_err();
        assert!(err.to_string().contains("need 6 bytes, got 5"));
    }
}
