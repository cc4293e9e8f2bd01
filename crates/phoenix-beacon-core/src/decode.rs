use std::path::Path;
use std::time::SystemTime;

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, warn};

use crate::protocols::phoenix::decode_phoenix;
use crate::protocols::phoenix::error::PhoenixError;
use crate::source::{FileFrameSource, FrameSource, SourceError};
use crate::{BeaconReport, DEFAULT_GENERATED_AT, make_stub_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Frame error: {0}")]
    Frame(#[from] PhoenixError),
    #[error("no frame in input")]
    NoFrame,
}

/// Read a beacon dump from `path` and decode its PHOENIX frame.
pub fn decode_beacon_file(path: &Path) -> Result<BeaconReport, DecodeError> {
    let source = FileFrameSource::open(path)?;
    decode_source(path, source)
}

/// Decode the first frame of `source`, attributing it to `path` in the report.
pub fn decode_source<S: FrameSource>(
    path: &Path,
    mut source: S,
) -> Result<BeaconReport, DecodeError> {
    let frame = source.next_frame()?.ok_or(DecodeError::NoFrame)?;
    let telemetry = decode_phoenix(&frame).inspect_err(|err| {
        warn!(path = %path.display(), error = %err, "frame rejected");
    })?;

    let metadata = path.metadata()?;
    let mut report = make_stub_report(&path.display().to_string(), metadata.len());
    report.generated_at = metadata
        .modified()
        .ok()
        .and_then(system_time_to_rfc3339)
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.frame = Some(frame.summary());
    report.telemetry = telemetry;
    debug!(path = %path.display(), "beacon report ready");
    Ok(report)
}

fn system_time_to_rfc3339(ts: SystemTime) -> Option<String> {
    OffsetDateTime::from(ts).format(&Rfc3339).ok()
}
