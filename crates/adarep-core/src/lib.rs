//! Core types and the aggregation catalog for the adarep report builder.
//!
//! This crate is deliberately free of I/O: records come in already parsed,
//! tables go out as plain row vectors. All other crates depend on it.

pub mod catalog;
pub mod document;
pub mod types;

pub use catalog::Catalog;
pub use document::AdaDocument;
pub use types::{DocumentType, GimlaToDocument, GimlaType};
