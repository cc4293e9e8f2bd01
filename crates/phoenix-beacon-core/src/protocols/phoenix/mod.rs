//! PHOENIX mode EPS beacon decoding.
//!
//! The frame is a fixed 76-byte layout (longer input is accepted, the tail is
//! ignored). Two-byte fields are little-endian words; each field is scaled,
//! temperature-decoded, printed as hex, or classified against a magic
//! constant according to the `schema` table. Link-layer framing (flags,
//! addresses, CRC) is not validated.
//!
//! Offsets live in `layout`, safe byte access in `reader`, the field table in
//! `schema`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod schema;

pub use parser::{
    AntennaStatus, OperatingMode, classify_antenna, classify_mode, decode_frame, decode_phoenix,
    decode_temperature,
};
