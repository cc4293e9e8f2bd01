//! The fixed PHOENIX field table and classification constants.
//!
//! `Schema::phoenix()` is the only schema version; it is a `'static` value and
//! is never mutated, so decoders can share it freely across threads.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout;

const BATTERY_VOLTS_PER_COUNT: f64 = 0.0023394775;
const BATTERY_MILLIAMPS_PER_COUNT: f64 = 3.0517578;
const BCR_MILLIAMPS_PER_COUNT: f64 = 1.5258789;
const PANEL_VOLTS_PER_COUNT: f64 = 0.0024414063;
const PANEL_MILLIAMPS_PER_COUNT: f64 = 0.6103516;
const BUS_MILLIAMPS_PER_COUNT: f64 = 2.0345052;
const RESISTANCE_OHMS_PER_COUNT: f64 = 1.4972656;

/// Physical unit attached to a scaled measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "mA")]
    Milliamp,
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "Ω")]
    Ohm,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Volt => "V",
            Unit::Milliamp => "mA",
            Unit::Celsius => "°C",
            Unit::Ohm => "Ω",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where a field's bytes live in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// Little-endian word with its low byte at `lo` and high byte at `lo + 1`.
    Word { lo: usize },
    Byte { offset: usize },
    /// Bytes concatenated in the listed order.
    Register { offsets: [usize; 4] },
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLocation::Word { lo } => write!(f, "({},{})", lo, lo + 1),
            FieldLocation::Byte { offset } => write!(f, "{}", offset),
            FieldLocation::Register { offsets } => {
                let listed: Vec<String> = offsets.iter().map(|o| o.to_string()).collect();
                write!(f, "({})", listed.join(","))
            }
        }
    }
}

/// How a field's raw bits become a value, together with where they are read.
///
/// Each variant carries exactly the kind of location it can decode, so a
/// byte literal can never be declared over a word and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodeKind {
    /// Raw word compared against the schema's mode identifiers.
    Mode { lo: usize },
    /// `raw * scale`.
    Scaled { lo: usize, scale: f64 },
    /// `(raw * scale - offset) / divisor`.
    Affine {
        lo: usize,
        scale: f64,
        offset: f64,
        divisor: f64,
    },
    Temperature { lo: usize },
    HexStatus { lo: usize },
    RawUnsigned { lo: usize },
    ByteLiteral { offset: usize },
    /// Register hex compared against the antenna magic literal.
    MagicString { offsets: [usize; 4] },
}

impl DecodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            DecodeKind::Mode { .. } => "mode",
            DecodeKind::Scaled { .. } => "scaled",
            DecodeKind::Affine { .. } => "affine",
            DecodeKind::Temperature { .. } => "temperature",
            DecodeKind::HexStatus { .. } => "hex-status",
            DecodeKind::RawUnsigned { .. } => "raw-unsigned",
            DecodeKind::ByteLiteral { .. } => "byte-literal",
            DecodeKind::MagicString { .. } => "magic-string",
        }
    }

    pub fn location(&self) -> FieldLocation {
        match *self {
            DecodeKind::Mode { lo }
            | DecodeKind::Scaled { lo, .. }
            | DecodeKind::Affine { lo, .. }
            | DecodeKind::Temperature { lo }
            | DecodeKind::HexStatus { lo }
            | DecodeKind::RawUnsigned { lo } => FieldLocation::Word { lo },
            DecodeKind::ByteLiteral { offset } => FieldLocation::Byte { offset },
            DecodeKind::MagicString { offsets } => FieldLocation::Register { offsets },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Stable machine-readable key.
    pub name: &'static str,
    /// Display label, as printed by ground tooling.
    pub label: &'static str,
    pub kind: DecodeKind,
    pub unit: Option<Unit>,
}

const fn field(
    name: &'static str,
    label: &'static str,
    kind: DecodeKind,
    unit: Option<Unit>,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        unit,
    }
}

const fn scaled(
    name: &'static str,
    label: &'static str,
    lo: usize,
    scale: f64,
    unit: Unit,
) -> FieldSpec {
    field(name, label, DecodeKind::Scaled { lo, scale }, Some(unit))
}

const fn temperature(name: &'static str, label: &'static str, lo: usize) -> FieldSpec {
    field(name, label, DecodeKind::Temperature { lo }, Some(Unit::Celsius))
}

const fn hex_status(name: &'static str, label: &'static str, lo: usize) -> FieldSpec {
    field(name, label, DecodeKind::HexStatus { lo }, None)
}

#[rustfmt::skip]
pub const PHOENIX_FIELDS: &[FieldSpec] = &[
    field("mode", "ConOps magic num ID", DecodeKind::Mode { lo: layout::MODE_ID }, None),
    scaled("battery_voltage", "EPS I Battery Voltage", layout::BATTERY_VOLTAGE, BATTERY_VOLTS_PER_COUNT, Unit::Volt),
    scaled("battery_current", "EPS I Battery Current", layout::BATTERY_CURRENT, BATTERY_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("bcr_voltage", "BCR Voltage", layout::BCR_VOLTAGE, BATTERY_VOLTS_PER_COUNT, Unit::Volt),
    scaled("bcr_current", "BCR Current", layout::BCR_CURRENT, BCR_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("panel_x_voltage", "SOL PAN X V", layout::PANEL_X_VOLTAGE, PANEL_VOLTS_PER_COUNT, Unit::Volt),
    scaled("panel_x_minus_current", "SOL PAN X- Current", layout::PANEL_X_MINUS_CURRENT, PANEL_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("panel_x_plus_current", "SOL PAN X+ Current", layout::PANEL_X_PLUS_CURRENT, PANEL_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("panel_y_voltage", "SOL PAN Y V", layout::PANEL_Y_VOLTAGE, PANEL_VOLTS_PER_COUNT, Unit::Volt),
    scaled("panel_y_minus_current", "SOL PAN Y- Current", layout::PANEL_Y_MINUS_CURRENT, PANEL_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("panel_y_plus_current", "SOL PAN Y+ Current", layout::PANEL_Y_PLUS_CURRENT, PANEL_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("panel_z_voltage", "SOL PAN Z V", layout::PANEL_Z_VOLTAGE, PANEL_VOLTS_PER_COUNT, Unit::Volt),
    scaled("panel_z_minus_current", "SOL PAN Z- Current", layout::PANEL_Z_MINUS_CURRENT, PANEL_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("panel_z_plus_current", "SOL PAN Z+ Current", layout::PANEL_Z_PLUS_CURRENT, PANEL_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("bus_3v3_current", "3.3V Bus Current", layout::BUS_3V3_CURRENT, BUS_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    scaled("bus_5v_current", "5V   Bus Current", layout::BUS_5V_CURRENT, BUS_MILLIAMPS_PER_COUNT, Unit::Milliamp),
    field(
        "mcu_temperature",
        "MCU Temperature",
        DecodeKind::Affine {
            lo: layout::MCU_TEMPERATURE,
            scale: 0.0006103516,
            offset: 0.986,
            divisor: 0.00355,
        },
        Some(Unit::Celsius),
    ),
    temperature("battery_cell_1_temp", "Battery Cell 1 Temp", layout::BATTERY_CELL_1_TEMP),
    temperature("battery_cell_2_temp", "Battery Cell 2 Temp", layout::BATTERY_CELL_2_TEMP),
    temperature("battery_cell_3_temp", "Battery Cell 3 Temp", layout::BATTERY_CELL_3_TEMP),
    temperature("battery_cell_4_temp", "Battery Cell 4 Temp", layout::BATTERY_CELL_4_TEMP),
    hex_status("input_condition", "Input Condition", layout::INPUT_CONDITION),
    hex_status("output_condition_1", "Output Conditions 1", layout::OUTPUT_CONDITION_1),
    hex_status("output_condition_2", "Output Conditions 2", layout::OUTPUT_CONDITION_2),
    field("power_on_cycles", "Power ON Cycle Counter", DecodeKind::RawUnsigned { lo: layout::POWER_ON_CYCLES }, None),
    hex_status("under_voltage_events", "Under Voltage Cond Counter", layout::UNDER_VOLTAGE_EVENTS),
    hex_status("short_circuit_events", "Short Circuit Cond Counter", layout::SHORT_CIRCUIT_EVENTS),
    hex_status("over_temperature_events", "Over Temp Cond Counter", layout::OVER_TEMPERATURE_EVENTS),
    temperature("battpack_temp_max", "Battpack1 temp sensor 1 max temp", layout::BATTPACK_TEMP_MAX),
    temperature("battpack_temp_min", "Battpack1 temp sensor 1 min temp", layout::BATTPACK_TEMP_MIN),
    hex_status("default_lup_fastcharge", "Default Vals LUPs & fastcharge", layout::DEFAULT_LUP_FASTCHARGE),
    scaled("battery_internal_resistance", "Battery Internal Resistance", layout::BATTERY_INTERNAL_RESISTANCE, RESISTANCE_OHMS_PER_COUNT, Unit::Ohm),
    scaled("battery_ideal_voltage", "Battery Ideal Voltage", layout::BATTERY_IDEAL_VOLTAGE, BATTERY_VOLTS_PER_COUNT, Unit::Volt),
    field("uhf_antenna", "UHF Antenna Registers", DecodeKind::MagicString { offsets: layout::ANTENNA_REGISTERS }, None),
    hex_status("status_control_word", "UHF Status Control Word", layout::STATUS_CONTROL_WORD),
    field("default_outs", "Default Vals OUTs 1:6", DecodeKind::ByteLiteral { offset: layout::DEFAULT_OUTS }, None),
];

/// Immutable decoding configuration: field table plus classification constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
    pub min_frame_len: usize,
    pub phoenix_mode_id: u16,
    /// Named by the beacon format but not consulted when classifying.
    pub other_mode_id: u16,
    pub antenna_stowed_magic: &'static str,
}

static PHOENIX_SCHEMA: Schema = Schema {
    fields: PHOENIX_FIELDS,
    min_frame_len: layout::MIN_FRAME_LEN,
    phoenix_mode_id: layout::PHOENIX_MODE_ID,
    other_mode_id: layout::OTHER_MODE_ID,
    antenna_stowed_magic: layout::ANTENNA_STOWED_MAGIC,
};

impl Schema {
    pub fn phoenix() -> &'static Schema {
        &PHOENIX_SCHEMA
    }
}
