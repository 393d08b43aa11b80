//! Request handlers, grouped by resource.

pub mod code;
pub mod coding;
pub mod health;
pub mod source;
pub mod tree;
