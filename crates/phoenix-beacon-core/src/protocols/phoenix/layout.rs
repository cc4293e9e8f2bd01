//! Absolute byte offsets of the PHOENIX beacon frame.
//!
//! Word fields are addressed by their low byte; the high byte always follows
//! at `lo + 1`.

pub const MODE_ID: usize = 2;
pub const BATTERY_VOLTAGE: usize = 4;
pub const BATTERY_CURRENT: usize = 6;
pub const BCR_VOLTAGE: usize = 8;
pub const BCR_CURRENT: usize = 10;
pub const PANEL_X_VOLTAGE: usize = 12;
pub const PANEL_X_MINUS_CURRENT: usize = 14;
pub const PANEL_X_PLUS_CURRENT: usize = 16;
pub const PANEL_Y_VOLTAGE: usize = 18;
pub const PANEL_Y_MINUS_CURRENT: usize = 20;
pub const PANEL_Y_PLUS_CURRENT: usize = 22;
pub const PANEL_Z_VOLTAGE: usize = 24;
pub const PANEL_Z_MINUS_CURRENT: usize = 26;
pub const PANEL_Z_PLUS_CURRENT: usize = 28;
pub const BUS_3V3_CURRENT: usize = 30;
pub const BUS_5V_CURRENT: usize = 32;
pub const MCU_TEMPERATURE: usize = 34;
pub const BATTERY_CELL_1_TEMP: usize = 36;
pub const BATTERY_CELL_2_TEMP: usize = 38;
pub const BATTERY_CELL_3_TEMP: usize = 40;
pub const BATTERY_CELL_4_TEMP: usize = 42;
pub const INPUT_CONDITION: usize = 44;
pub const OUTPUT_CONDITION_1: usize = 46;
pub const OUTPUT_CONDITION_2: usize = 48;
pub const RESERVED_RANGE: std::ops::Range<usize> = 50..52;
pub const POWER_ON_CYCLES: usize = 52;
pub const UNDER_VOLTAGE_EVENTS: usize = 54;
pub const SHORT_CIRCUIT_EVENTS: usize = 56;
pub const OVER_TEMPERATURE_EVENTS: usize = 58;
pub const BATTPACK_TEMP_MAX: usize = 60;
pub const BATTPACK_TEMP_MIN: usize = 62;
pub const DEFAULT_LUP_FASTCHARGE: usize = 64;
pub const BATTERY_INTERNAL_RESISTANCE: usize = 66;
pub const BATTERY_IDEAL_VOLTAGE: usize = 68;
/// Antenna register bytes, in the order they are concatenated (high to low).
pub const ANTENNA_REGISTERS: [usize; 4] = [73, 72, 71, 70];
pub const STATUS_CONTROL_WORD: usize = 74;
/// Shares its byte with the low half of the battery internal resistance word.
pub const DEFAULT_OUTS: usize = BATTERY_INTERNAL_RESISTANCE;

/// The status-control word ends at offset 75.
pub const MIN_FRAME_LEN: usize = STATUS_CONTROL_WORD + 2;

pub const PHOENIX_MODE_ID: u16 = 0xA1C9;
pub const OTHER_MODE_ID: u16 = 0xE7A9;
pub const ANTENNA_STOWED_MAGIC: &str = "deafbeef";
