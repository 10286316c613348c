//! Transaction assembly: one record per anchor, folding in continuations.

use crate::classify::LineRules;
use crate::columns::split_line;
use crate::config::ExtractConfig;
use crate::types::{Anchor, Line, Transaction};

/// Fallback when neither the anchor nor any continuation carries an amount.
const ZERO_AMOUNT: &str = "$0.00";

/// Build final transactions from clustered anchors, in discovery order.
pub fn build_transactions(
    anchors: &[Anchor],
    rules: &LineRules,
    cfg: &ExtractConfig,
) -> Vec<Transaction> {
    anchors.iter().map(|a| assemble_one(a, rules, cfg)).collect()
}

fn assemble_one(anchor: &Anchor, rules: &LineRules, cfg: &ExtractConfig) -> Transaction {
    // Anchor line plus continuations, re-ordered top to bottom regardless
    // of attach order.
    let mut lines: Vec<&Line> = Vec::with_capacity(1 + anchor.sub_lines.len());
    lines.push(&anchor.line);
    lines.extend(anchor.sub_lines.iter());
    lines.sort_by(|a, b| b.y.cmp(&a.y));

    // An anchor without an inline amount adopts the first one found in
    // its line group.
    let amount_str = anchor
        .amount_str
        .clone()
        .or_else(|| lines.iter().find_map(|l| rules.find_amount(&l.text)));

    let mut description = String::new();
    let mut kind = String::new();
    for line in &lines {
        let split = split_line(line, &anchor.date, amount_str.as_deref(), cfg);
        if !split.description.is_empty() {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(&split.description);
        }
        if !split.kind.is_empty() {
            if !kind.is_empty() {
                kind.push(' ');
            }
            kind.push_str(&split.kind);
        }
    }

    let amount_str = amount_str.unwrap_or_else(|| ZERO_AMOUNT.to_string());
    let amount = parse_signed_amount(&amount_str);

    Transaction {
        date: anchor.date.clone(),
        description,
        kind,
        amount,
        amount_str,
        page: anchor.line.page,
        account: anchor.account.clone(),
        raw: anchor.line.text.clone(),
    }
}

/// `"-$1,234.50"` → -1234.50. Everything but digits and dots is stripped
/// for the magnitude; the leading `-` alone decides the sign.
fn parse_signed_amount(amount_str: &str) -> f64 {
    let magnitude: String = amount_str
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value: f64 = magnitude.parse().unwrap_or(0.0);
    if amount_str.starts_with('-') { -value } else { value }
}
