//! Partial-update builders for entities edited after creation.

pub mod coding;
pub mod source;
