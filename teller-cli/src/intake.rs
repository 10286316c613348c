//! Fragment dump intake: the serialized form of the page-text interface.
//!
//! A dump is one JSON file per document:
//! `{ "pages": [ [ {"text", "x", "width", "y"}, ... ], ... ] }`
//! as produced by the external text-extraction backend.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use teller_core::{DocumentExtraction, ExtractConfig, MemoryPages, extract_document};

/// Load a fragment dump and run the full extraction pipeline on it.
pub fn extract_file(path: &Path, cfg: &ExtractConfig) -> Result<DocumentExtraction> {
    let pages = read_dump(path)?;
    extract_document(&pages, cfg)
}

/// Parse a dump file, rejecting anything that is not a `.json` document.
pub fn read_dump(path: &Path) -> Result<MemoryPages> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        bail!("{} is not a fragment dump (.json)", path.display());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse fragment dump {}", path.display()))
}
