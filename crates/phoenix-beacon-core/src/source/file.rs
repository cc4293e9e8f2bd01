//! File-backed frame source.
//!
//! Beacon dumps (`.bin` or `.txt`) are read as raw bytes; no text decoding
//! happens even for `.txt`. Surrounding whitespace is stripped before the
//! bytes are handed to the decoder.

use std::fs;
use std::path::Path;

use tracing::trace;

use super::{ByteSequence, FrameSource, SourceError};

pub struct FileFrameSource {
    pending: Option<ByteSequence>,
}

impl FileFrameSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let raw = fs::read(path)?;
        let frame = ByteSequence::from_raw(&raw);
        trace!(
            path = %path.display(),
            raw_len = raw.len(),
            frame_len = frame.len(),
            "read beacon dump"
        );
        Ok(Self {
            pending: Some(frame),
        })
    }
}

impl FrameSource for FileFrameSource {
    /// A dump holds exactly one frame.
    fn next_frame(&mut self) -> Result<Option<ByteSequence>, SourceError> {
        Ok(self.pending.take())
    }
}
