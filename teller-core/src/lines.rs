//! Line grouping: rebuild visual lines from a page's flat fragment list.

use std::collections::BTreeMap;

use crate::config::ExtractConfig;
use crate::types::{Line, TextFragment};

/// Phrase marking the column header for the transaction-type column.
const TYPE_HEADER: &str = "transaction type";

/// Group one page's fragments into visual lines, top to bottom.
///
/// Fragments sharing a rounded `y` form one line. Footer fragments (below
/// the cutoff) are discarded before grouping, and lines whose joined text
/// is empty are dropped from the output.
pub fn group_page_lines(
    fragments: &[TextFragment],
    page: usize,
    cfg: &ExtractConfig,
) -> Vec<Line> {
    let mut buckets: BTreeMap<i64, Vec<TextFragment>> = BTreeMap::new();
    for frag in fragments {
        let y = frag.y.round() as i64;
        if (y as f64) < cfg.footer_cutoff_y {
            continue;
        }
        buckets.entry(y).or_default().push(frag.clone());
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    // First pass: find the "Transaction Type" header. Its fragment's x
    // fixes the column boundary for every line on the page.
    let mut type_column_x = cfg.default_type_column_x;
    for bucket in buckets.values() {
        if join_texts(bucket).to_lowercase().contains(TYPE_HEADER) {
            if let Some(frag) = bucket
                .iter()
                .find(|f| f.text.to_lowercase().contains(TYPE_HEADER))
            {
                type_column_x = frag.x;
            }
        }
    }

    // Second pass: emit lines in descending y (top of page first).
    let mut lines = Vec::new();
    for (y, bucket) in buckets.into_iter().rev() {
        let text = join_texts(&bucket);
        if text.is_empty() {
            continue;
        }
        lines.push(Line {
            y,
            fragments: bucket,
            text,
            page,
            type_column_x,
        });
    }
    lines
}

fn join_texts(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
