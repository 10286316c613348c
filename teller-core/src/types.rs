//! Shared pipeline types: fragments in, transactions out.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One positioned run of text as reported by the text-extraction backend.
///
/// `y` is a baseline in page units; larger means higher on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub width: f64,
    pub y: f64,
}

/// A visual line: every fragment sharing one quantized vertical position.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Quantized vertical position (rounded `y`).
    pub y: i64,
    /// Fragments sorted ascending by `x`.
    pub fragments: Vec<TextFragment>,
    /// Fragment texts joined with single spaces, trimmed.
    pub text: String,
    /// 1-based page number.
    pub page: usize,
    /// The page's "transaction type" column boundary.
    pub type_column_x: f64,
}

/// A line recognized as the start of a transaction.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub line: Line,
    /// Account context active when the line was classified.
    pub account: String,
    /// Matched leading date text, e.g. "Jan 22".
    pub date: String,
    /// Signed amount matched inline on the anchor line, e.g. "-$4.50".
    pub amount_str: Option<String>,
    /// Continuation lines attached by the clusterer.
    pub sub_lines: Vec<Line>,
}

/// A dateless line pending assignment to an anchor as a continuation.
#[derive(Debug, Clone)]
pub struct Orphan {
    pub line: Line,
    pub account: String,
}

/// Final extracted transaction.
///
/// The serialized field names (`type`, `amountStr`, ...) are the contract
/// the CSV/display consumers rely on; do not rename them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Signed value: positive = income, negative = expense.
    pub amount: f64,
    /// Original formatted string, e.g. "+$123.45".
    #[serde(rename = "amountStr")]
    pub amount_str: String,
    pub page: usize,
    pub account: String,
    /// The anchor's original joined line text.
    pub raw: String,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentExtraction {
    pub transactions: Vec<Transaction>,
    pub accounts: BTreeSet<String>,
}
