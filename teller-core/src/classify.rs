//! Line classification, evaluated in fixed priority order:
//! account header > boilerplate > anchor > continuation.

use anyhow::Result;
use regex::Regex;

/// Footer/header phrases from the observed statement template, matched
/// case-insensitively against the start of a line.
const IGNORED_PREFIXES: &[&str] = &[
    "total",
    "debit x",
    "savings x",
    "direct inquiries to",
    "los angeles, ca",
    "member fdic",
    "onepay cash banking",
    "one finance, inc.",
    "transaction history",
    "account summary",
    "activity summary",
    "beginning balance",
    "beg. balance",
    "incoming transactions",
    "outgoing transactions",
    "ending balance",
    "in case of errors or questions",
];

/// What a single line turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// `Debit x1234` / `Savings x5678`: switches the account context and
    /// produces no anchor or orphan.
    AccountHeader(String),
    /// Statement furniture; ignored.
    Boilerplate,
    /// Starts with a date: the first line of a transaction.
    Anchor {
        date: String,
        amount_str: Option<String>,
    },
    /// Anything else: a continuation candidate.
    Continuation,
}

/// Compiled classification patterns, built once per document run.
pub struct LineRules {
    account_re: Regex,
    date_re: Regex,
    amount_re: Regex,
}

impl LineRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            account_re: Regex::new(r"(?i)^(debit|savings)\s+x\d+$")?,
            date_re: Regex::new(
                r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s\d{1,2}",
            )?,
            amount_re: Regex::new(r"[+\-]\$[\d,]+\.\d{2}")?,
        })
    }

    /// Classify one line's text. Pure: the account context belongs to the
    /// caller, which threads it through the page scan.
    pub fn classify(&self, text: &str) -> LineClass {
        if self.account_re.is_match(text) {
            return LineClass::AccountHeader(text.to_string());
        }
        if is_boilerplate(text) {
            return LineClass::Boilerplate;
        }
        if let Some(m) = self.date_re.find(text) {
            return LineClass::Anchor {
                date: m.as_str().to_string(),
                amount_str: self.find_amount(text),
            };
        }
        LineClass::Continuation
    }

    /// First signed dollar amount on a line, if any.
    pub fn find_amount(&self, text: &str) -> Option<String> {
        self.amount_re.find(text).map(|m| m.as_str().to_string())
    }
}

fn is_boilerplate(text: &str) -> bool {
    let lt = text.to_lowercase();
    if IGNORED_PREFIXES.iter().any(|p| lt.starts_with(p)) {
        return true;
    }
    if lt.contains("date") && lt.contains("description") && lt.contains("amount") {
        return true;
    }
    lt.contains("page") && lt.contains("of")
}
