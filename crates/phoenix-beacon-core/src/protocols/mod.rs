//! Beacon decoding modules.
//!
//! Each beacon format follows a layered structure:
//! - `layout`: byte offsets and constants (source of truth)
//! - `reader`: safe byte access and word assembly
//! - `schema`: the static field table
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O.

pub mod phoenix;
