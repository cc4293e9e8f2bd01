//! PHOENIX beacon core library.
//!
//! Decodes the fixed-layout EPS telemetry frame that a spacecraft emits in
//! PHOENIX mode. Sources turn a beacon dump into a `ByteSequence`, the
//! `protocols::phoenix` decoder maps it onto the static field table, and the
//! result is an ordered `TelemetryRecord` wrapped in a serializable report.
//! Decoding is pure; all file access stays in `source`.
//!
//! Invariants:
//! - Field order in a record always follows the schema table.
//! - A frame shorter than 76 bytes never yields a partial record.
//! - Two-byte fields are little-endian (`lo + 256 * hi`).
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use phoenix_beacon_core::decode_beacon_file;
//!
//! let report = decode_beacon_file(Path::new("beacon.bin"))?;
//! print!("{}", report.telemetry);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod decode;
pub mod protocols;
mod source;

pub use decode::{DecodeError, decode_beacon_file, decode_source};
pub use protocols::phoenix::error::PhoenixError;
pub use protocols::phoenix::reader::assemble_word;
pub use protocols::phoenix::schema::{DecodeKind, FieldLocation, FieldSpec, Schema, Unit};
pub use protocols::phoenix::{
    AntennaStatus, OperatingMode, classify_antenna, classify_mode, decode_frame, decode_phoenix,
    decode_temperature,
};
pub use source::{ByteSequence, FileFrameSource, FrameSource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when the input has no modification time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

const LABEL_WIDTH: usize = 32;

/// Decoded beacon plus provenance.
///
/// # Examples
/// ```
/// use phoenix_beacon_core::make_stub_report;
///
/// let report = make_stub_report("beacon.bin", 76);
/// assert_eq!(report.report_version, phoenix_beacon_core::REPORT_VERSION);
/// assert!(report.telemetry.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 modification time of the input dump.
    pub generated_at: String,
    pub input: InputInfo,
    /// Hex diagnostics of the stripped frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameSummary>,
    pub telemetry: TelemetryRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes, before whitespace stripping.
    pub bytes: u64,
}

/// Diagnostic view of the frame: first two bytes and a hex dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub header: Option<u8>,
    pub size: Option<u8>,
    pub length: usize,
    pub hex: String,
}

/// Ordered decode output, one entry per schema field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub fields: Vec<Field>,
}

impl TelemetryRecord {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            writeln!(f, "{:<width$}: {}", field.label, field.value, width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Stable key from the schema table.
    pub name: String,
    pub label: String,
    pub value: FieldValue,
}

/// A decoded field value.
///
/// # Examples
/// ```
/// use phoenix_beacon_core::{FieldValue, Unit};
///
/// let value = FieldValue::Number { value: 1.5, unit: Some(Unit::Volt) };
/// assert_eq!(value.to_string(), "1.5 V");
/// assert_eq!(FieldValue::Hex { raw: 0 }.to_string(), "0x0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    Number {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<Unit>,
    },
    Count {
        value: u16,
    },
    /// Classification result with the raw bits it was derived from.
    Label {
        text: String,
        raw: String,
    },
    Hex {
        raw: u16,
    },
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number {
                value,
                unit: Some(unit),
            } => write!(f, "{} {}", value, unit),
            FieldValue::Number { value, unit: None } => write!(f, "{}", value),
            FieldValue::Count { value } => write!(f, "{}", value),
            FieldValue::Label { text, raw } => write!(f, "{} ({})", text, raw),
            FieldValue::Hex { raw } => write!(f, "{:#x}", raw),
        }
    }
}

/// Build a report with base fields filled and an empty record.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> BeaconReport {
    BeaconReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "phoenix-beacon".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        frame: None,
        telemetry: TelemetryRecord::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_frame_when_none() {
        let report = make_stub_report("beacon.bin", 76);
        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("frame").is_none());
        assert_eq!(value["telemetry"]["fields"], serde_json::json!([]));
    }

    #[test]
    fn field_values_are_tagged_by_kind() {
        let number = FieldValue::Number {
            value: 0.5,
            unit: Some(Unit::Celsius),
        };
        assert_eq!(
            serde_json::to_value(&number).unwrap(),
            serde_json::json!({"kind": "number", "value": 0.5, "unit": "°C"})
        );
        assert_eq!(
            serde_json::to_value(FieldValue::Hex { raw: 0x1234 }).unwrap(),
            serde_json::json!({"kind": "hex", "raw": 4660})
        );
        let unitless = FieldValue::Number {
            value: 1.0,
            unit: None,
        };
        assert!(serde_json::to_value(&unitless).unwrap().get("unit").is_none());
    }

    #[test]
    fn record_display_is_one_line_per_field_in_order() {
        let record = TelemetryRecord {
            fields: vec![
                Field {
                    name: "mode".to_string(),
                    label: "ConOps magic num ID".to_string(),
                    value: FieldValue::Label {
                        text: "Other".to_string(),
                        raw: "0x0000".to_string(),
                    },
                },
                Field {
                    name: "power_on_cycles".to_string(),
                    label: "Power ON Cycle Counter".to_string(),
                    value: FieldValue::Count { value: 7 },
                },
            ],
        };
        let text = record.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ConOps magic num ID "));
        assert!(lines[0].ends_with(": Other (0x0000)"));
        assert!(lines[1].ends_with(": 7"));
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = make_stub_report("beacon.bin", 80);
        report.telemetry.fields.push(Field {
            name: "status_control_word".to_string(),
            label: "UHF Status Control Word".to_string(),
            value: FieldValue::Hex { raw: 0x7e01 },
        });
        let json = serde_json::to_string(&report).unwrap();
        let back: BeaconReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
