//! teller-core: statement line reconstruction and transaction extraction
//! from positioned page text.
//!
//! The input is a flat set of text fragments per page, each with a
//! horizontal position, a vertical position, and a width, but no row or
//! record structure. The pipeline rebuilds visual lines, classifies them,
//! attaches multi-line continuations to their transaction anchor, splits
//! each line into description/type columns, and emits one transaction per
//! anchor.

pub mod assemble;
pub mod classify;
pub mod cluster;
pub mod columns;
pub mod config;
pub mod extract;
pub mod lines;
pub mod types;

pub use config::ExtractConfig;
pub use extract::{MemoryPages, PageSource, UNKNOWN_ACCOUNT, extract_document};
pub use types::{DocumentExtraction, TextFragment, Transaction};
