//! Repository modules implementing operations for all qualcode entities.
//!
//! Each module adds methods to `QcService` via `impl QcService` blocks.

pub mod code;
pub mod coding;
pub mod source;
