mod file;

pub use file::FileFrameSource;

use thiserror::Error;

use crate::FrameSummary;

/// Raw beacon bytes, one element per input byte, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteSequence {
    bytes: Vec<u8>,
}

impl ByteSequence {
    /// Wrap bytes verbatim.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Strip leading and trailing ASCII whitespace (including vertical tab),
    /// then wrap. NUL is not whitespace and is kept.
    ///
    /// # Examples
    /// ```
    /// use phoenix_beacon_core::ByteSequence;
    ///
    /// let bytes = ByteSequence::from_raw(b"\r\n\x00\x7e \x0c");
    /// assert_eq!(bytes.as_slice(), &[0x00, 0x7e]);
    /// ```
    pub fn from_raw(raw: &[u8]) -> Self {
        let start = raw
            .iter()
            .position(|b| !is_strippable(*b))
            .unwrap_or(raw.len());
        let end = raw
            .iter()
            .rposition(|b| !is_strippable(*b))
            .map_or(start, |last| last + 1);
        Self::new(raw[start..end].to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase two-digit hex, for diagnostics only.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Header byte, size byte and hex dump of the frame.
    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            header: self.bytes.first().copied(),
            size: self.bytes.get(1).copied(),
            length: self.bytes.len(),
            hex: self.to_hex(),
        }
    }
}

fn is_strippable(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

/// Anything that yields beacon frames.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<ByteSequence>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
