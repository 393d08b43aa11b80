//! # qc-core
//!
//! Core types, the code hierarchy transformer, and error types for qualcode.
//!
//! This crate provides the foundational types shared across all qualcode crates:
//! - Entity structs for codes, codings, and sources
//! - The tree transformer: build a forest from parent pointers, flatten an
//!   edited forest back, and validate that the hierarchy stays a forest
//! - The edit-session state machine and the `CodeStore` seam it saves through
//! - Cross-cutting error types
//! - API/CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod session;
pub mod tree;
