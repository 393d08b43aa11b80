//! Identifier types for qualcode entities.
//!
//! All entities use SQLite `INTEGER PRIMARY KEY` ids. The aliases keep call
//! sites readable about which table an id belongs to.

/// Id of a row in `codes`.
pub type CodeId = i64;

/// Id of a row in `codings`.
pub type CodingId = i64;

/// Id of a row in `sources`.
pub type SourceId = i64;
