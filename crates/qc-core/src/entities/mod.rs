//! Entity structs for all qualcode domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`, and use camelCase field names
//! on the wire.

mod code;
mod coding;
mod source;

pub use code::{Code, normalize_code_name};
pub use coding::Coding;
pub use source::Source;
