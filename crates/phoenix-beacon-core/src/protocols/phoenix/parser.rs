use tracing::debug;

use super::error::PhoenixError;
use super::reader::PhoenixReader;
use super::schema::{DecodeKind, FieldSpec, Schema};
use crate::source::ByteSequence;
use crate::{Field, FieldValue, TelemetryRecord};

const POSITIVE_RANGE_LIMIT: u16 = 0x8000;
const POSITIVE_CELSIUS_PER_COUNT: f64 = 0.00390625;
const NEGATIVE_CELSIUS_PER_COUNT: f64 = -0.0625;
const TWELVE_BIT_MASK: u16 = 0x0FFF;

pub const PHOENIX_MODE_LABEL: &str = "PHOENIX operating mode";
pub const OTHER_MODE_LABEL: &str = "Other";
pub const ANTENNA_STOWED_LABEL: &str = "antenna stowed (registers cleared)";
pub const ANTENNA_DEPLOYED_LABEL: &str = "antenna connected/deployed";

/// Operating mode derived from the mode-id word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    Phoenix,
    Other,
}

impl OperatingMode {
    pub fn label(self) -> &'static str {
        match self {
            OperatingMode::Phoenix => PHOENIX_MODE_LABEL,
            OperatingMode::Other => OTHER_MODE_LABEL,
        }
    }
}

/// UHF antenna state derived from the register span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AntennaStatus {
    Stowed { registers: String },
    Deployed { registers: String },
}

impl AntennaStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AntennaStatus::Stowed { .. } => ANTENNA_STOWED_LABEL,
            AntennaStatus::Deployed { .. } => ANTENNA_DEPLOYED_LABEL,
        }
    }

    pub fn registers(&self) -> &str {
        match self {
            AntennaStatus::Stowed { registers } | AntennaStatus::Deployed { registers } => {
                registers
            }
        }
    }
}

/// Decode a battery temperature word.
///
/// Words below `0x8000` count 1/256 °C. Above that, the upper 12 bits are a
/// sign-folded magnitude in 1/16 °C and the low nibble is ignored.
///
/// # Examples
/// ```
/// use phoenix_beacon_core::decode_temperature;
///
/// assert_eq!(decode_temperature(0x0100), 1.0);
/// assert_eq!(decode_temperature(0xFF00), -1.0);
/// ```
pub fn decode_temperature(raw: u16) -> f64 {
    if raw < POSITIVE_RANGE_LIMIT {
        f64::from(raw) * POSITIVE_CELSIUS_PER_COUNT
    } else {
        let magnitude = ((raw >> 4) - 1) ^ TWELVE_BIT_MASK;
        f64::from(magnitude) * NEGATIVE_CELSIUS_PER_COUNT
    }
}

/// Compare the mode-id word against the PHOENIX identifier only.
pub fn classify_mode(raw: u16, schema: &Schema) -> OperatingMode {
    if raw == schema.phoenix_mode_id {
        OperatingMode::Phoenix
    } else {
        OperatingMode::Other
    }
}

/// Compare the register hex string against the stowed magic literal.
pub fn classify_antenna(registers: &str, schema: &Schema) -> AntennaStatus {
    let registers = registers.to_string();
    if registers == schema.antenna_stowed_magic {
        AntennaStatus::Stowed { registers }
    } else {
        AntennaStatus::Deployed { registers }
    }
}

/// Decode a frame against `schema`, producing fields in table order.
///
/// Fails only when the frame is shorter than `schema.min_frame_len`; trailing
/// bytes past the schema are ignored.
pub fn decode_frame(
    bytes: &ByteSequence,
    schema: &Schema,
) -> Result<TelemetryRecord, PhoenixError> {
    let reader = PhoenixReader::new(bytes.as_slice());
    reader.require_len(schema.min_frame_len)?;

    let mut fields = Vec::with_capacity(schema.fields.len());
    for spec in schema.fields {
        let value = decode_field(&reader, spec, schema)?;
        fields.push(Field {
            name: spec.name.to_string(),
            label: spec.label.to_string(),
            value,
        });
    }

    let record = TelemetryRecord { fields };
    debug!(
        frame_len = bytes.len(),
        fields = record.len(),
        "decoded PHOENIX frame"
    );
    Ok(record)
}

/// Decode with the built-in PHOENIX schema.
///
/// # Examples
/// ```
/// use phoenix_beacon_core::{ByteSequence, PhoenixError, decode_phoenix};
///
/// let err = decode_phoenix(&ByteSequence::new(vec![0u8; 10])).unwrap_err();
/// assert!(matches!(err, PhoenixError::FrameTooShort { needed: 76, actual: 10 }));
///
/// let record = decode_phoenix(&ByteSequence::new(vec![0u8; 76]))?;
/// assert_eq!(record.fields[0].name, "mode");
/// # Ok::<(), PhoenixError>(())
/// ```
pub fn decode_phoenix(bytes: &ByteSequence) -> Result<TelemetryRecord, PhoenixError> {
    decode_frame(bytes, Schema::phoenix())
}

fn decode_field(
    reader: &PhoenixReader<'_>,
    spec: &FieldSpec,
    schema: &Schema,
) -> Result<FieldValue, PhoenixError> {
    let value = match spec.kind {
        DecodeKind::Mode { lo } => {
            let raw = reader.read_u16_le(lo)?;
            let mode = classify_mode(raw, schema);
            if mode == OperatingMode::Other {
                debug!(mode_id = raw, "mode id is not PHOENIX");
            }
            FieldValue::Label {
                text: mode.label().to_string(),
                raw: format!("{:#06x}", raw),
            }
        }
        DecodeKind::Scaled { lo, scale } => {
            number(f64::from(reader.read_u16_le(lo)?) * scale, spec)
        }
        DecodeKind::Affine {
            lo,
            scale,
            offset,
            divisor,
        } => {
            let raw = f64::from(reader.read_u16_le(lo)?);
            number((raw * scale - offset) / divisor, spec)
        }
        DecodeKind::Temperature { lo } => {
            number(decode_temperature(reader.read_u16_le(lo)?), spec)
        }
        DecodeKind::RawUnsigned { lo } => FieldValue::Count {
            value: reader.read_u16_le(lo)?,
        },
        DecodeKind::HexStatus { lo } => FieldValue::Hex {
            raw: reader.read_u16_le(lo)?,
        },
        DecodeKind::ByteLiteral { offset } => FieldValue::Hex {
            raw: u16::from(reader.read_u8(offset)?),
        },
        DecodeKind::MagicString { offsets } => {
            let registers = reader.read_register_hex(&offsets)?;
            let status = classify_antenna(&registers, schema);
            FieldValue::Label {
                text: status.label().to_string(),
                raw: format!("0x{}", status.registers()),
            }
        }
    };
    Ok(value)
}

fn number(value: f64, spec: &FieldSpec) -> FieldValue {
    FieldValue::Number {
        value,
        unit: spec.unit,
    }
}
