//! Per-document extraction pipeline.
//!
//! Pages run strictly in order: orphan clustering on page N depends on the
//! last anchor seen on pages 1..N. Independent documents share no state
//! and can run in parallel; the caller merges their results.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::assemble::build_transactions;
use crate::classify::{LineClass, LineRules};
use crate::cluster::attach_page_orphans;
use crate::config::ExtractConfig;
use crate::lines::group_page_lines;
use crate::types::{Anchor, DocumentExtraction, Orphan, TextFragment};

/// Account label in effect before any header line has been seen on a page.
pub const UNKNOWN_ACCOUNT: &str = "Unknown";

/// The consumed page-text interface: positioned fragments, one batch per
/// page, in no particular order.
///
/// A retrieval failure aborts the whole document; there are no partial
/// results and no retries at this layer.
pub trait PageSource {
    fn page_count(&self) -> usize;
    /// Fragments for a 1-based page number.
    fn page_fragments(&self, page: usize) -> Result<Vec<TextFragment>>;
}

/// In-memory page source; also the serialized shape of a fragment dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryPages {
    pub pages: Vec<Vec<TextFragment>>,
}

impl PageSource for MemoryPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&self, page: usize) -> Result<Vec<TextFragment>> {
        self.pages
            .get(page - 1)
            .cloned()
            .ok_or_else(|| anyhow!("page {page} out of range"))
    }
}

/// Run the full pipeline over one document.
///
/// Deterministic: the same fragment set always yields the same
/// transactions. Heuristic misses (unattachable orphans, lines with
/// neither date nor amount) are dropped silently; they are not errors.
pub fn extract_document(
    source: &impl PageSource,
    cfg: &ExtractConfig,
) -> Result<DocumentExtraction> {
    let rules = LineRules::new()?;
    let mut result = DocumentExtraction::default();
    let mut anchors: Vec<Anchor> = Vec::new();
    let mut global_last: Option<usize> = None;

    for page in 1..=source.page_count() {
        let fragments = source
            .page_fragments(page)
            .with_context(|| format!("reading text fragments for page {page}"))?;
        let lines = group_page_lines(&fragments, page, cfg);

        // The account context resets on every page boundary; only the
        // clusterer's trailing-anchor fallback crosses pages.
        let mut active_account = UNKNOWN_ACCOUNT.to_string();
        let page_start = anchors.len();
        let mut orphans: Vec<Orphan> = Vec::new();

        for line in lines {
            match rules.classify(&line.text) {
                LineClass::AccountHeader(name) => {
                    result.accounts.insert(name.clone());
                    active_account = name;
                }
                LineClass::Boilerplate => {}
                LineClass::Anchor { date, amount_str } => {
                    anchors.push(Anchor {
                        line,
                        account: active_account.clone(),
                        date,
                        amount_str,
                        sub_lines: Vec::new(),
                    });
                }
                LineClass::Continuation => {
                    orphans.push(Orphan {
                        line,
                        account: active_account.clone(),
                    });
                }
            }
        }

        attach_page_orphans(&mut anchors, page_start, global_last, orphans, cfg);

        if anchors.len() > page_start {
            global_last = Some(anchors.len() - 1);
        }
    }

    result.transactions = build_transactions(&anchors, &rules, cfg);
    Ok(result)
}
