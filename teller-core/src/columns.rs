//! Column splitting: partition a line's remaining fragments into
//! description vs. transaction-type text by horizontal position.

use crate::config::ExtractConfig;
use crate::types::{Line, TextFragment};

/// Description/type text recovered from one line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSplit {
    pub description: String,
    pub kind: String,
}

/// Split one line against its owning anchor's date and amount tokens.
///
/// `date` and `amount_str` may belong to a different physical line than
/// the one being split: continuation lines are matched against the
/// anchor's tokens so stray date/amount pieces never leak into the
/// description.
pub fn split_line(
    line: &Line,
    date: &str,
    amount_str: Option<&str>,
    cfg: &ExtractConfig,
) -> LineSplit {
    let mut fragments: Vec<&TextFragment> = line.fragments.iter().collect();
    // Ascending x; identical x resolved top fragment first.
    fragments.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| b.y.total_cmp(&a.y)));

    let content: Vec<&TextFragment> = fragments
        .into_iter()
        .filter(|f| !is_anchor_token(f, date, amount_str, cfg))
        .collect();
    if content.is_empty() {
        return LineSplit::default();
    }

    let threshold = cfg.split_threshold(line.type_column_x);
    let mut desc: Vec<&TextFragment> = Vec::new();
    let mut kind: Vec<&TextFragment> = Vec::new();
    for &frag in &content {
        if frag.x >= threshold {
            kind.push(frag);
        } else {
            desc.push(frag);
        }
    }

    // Fallback: the type column came up empty but the description carries
    // a large horizontal gap. Everything after the last such gap is type
    // text that merely started left of the detected column.
    if kind.is_empty() && desc.len() > 1 {
        let mut split_index = None;
        for i in 0..desc.len() - 1 {
            let gap = desc[i + 1].x - (desc[i].x + desc[i].width);
            if gap > cfg.gap_split_min {
                split_index = Some(i);
            }
        }
        if let Some(i) = split_index {
            kind = desc.split_off(i + 1);
        }
    }

    LineSplit {
        description: join(&desc),
        kind: join(&kind),
    }
}

/// True when the fragment is (a piece of) the anchor's date or amount.
fn is_anchor_token(
    frag: &TextFragment,
    date: &str,
    amount_str: Option<&str>,
    cfg: &ExtractConfig,
) -> bool {
    let txt = frag.text.trim();
    if txt.is_empty() {
        return true;
    }
    if txt == date || date.contains(txt) {
        return true;
    }
    if let Some(amount) = amount_str {
        if txt == amount || amount.contains(txt) {
            return true;
        }
        // The amount itself can arrive split into fragments; its tail
        // shows up far right.
        if frag.x > cfg.amount_zone_min_x && amount.ends_with(txt) {
            return true;
        }
    }
    // Same for the date, far left.
    if frag.x < cfg.date_zone_max_x && date.starts_with(txt) {
        return true;
    }
    false
}

fn join(fragments: &[&TextFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, x: f64, width: f64) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            x,
            width,
            y: 500.0,
        }
    }

    fn line_of(fragments: Vec<TextFragment>, type_column_x: f64) -> Line {
        let text = fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Line {
            y: 500,
            fragments,
            text,
            page: 1,
            type_column_x,
        }
    }

    #[test]
    fn test_splits_at_detected_column() {
        let line = line_of(
            vec![
                frag("GROCERY", 60.0, 50.0),
                frag("STORE", 120.0, 40.0),
                frag("PURCHASE", 360.0, 60.0),
            ],
            340.0,
        );
        let split = split_line(&line, "Jan 5", None, &ExtractConfig::default());
        assert_eq!(split.description, "GROCERY STORE");
        assert_eq!(split.kind, "PURCHASE");
    }

    #[test]
    fn test_date_and_amount_tokens_excluded() {
        let line = line_of(
            vec![
                frag("Jan 5", 40.0, 30.0),
                frag("Coffee", 110.0, 40.0),
                frag("Shop", 160.0, 30.0),
                frag("-$4.50", 560.0, 35.0),
            ],
            340.0,
        );
        let split = split_line(&line, "Jan 5", Some("-$4.50"), &ExtractConfig::default());
        assert_eq!(split.description, "Coffee Shop");
        assert_eq!(split.kind, "");
    }

    #[test]
    fn test_split_date_prefix_and_amount_suffix_excluded() {
        // The backend sometimes splits "Jan 5" and "-$1,204.33" into
        // multiple fragments.
        let line = line_of(
            vec![
                frag("Jan", 40.0, 20.0),
                frag("Wire", 110.0, 30.0),
                frag("204.33", 560.0, 35.0),
            ],
            340.0,
        );
        let split = split_line(&line, "Jan 5", Some("-$1,204.33"), &ExtractConfig::default());
        assert_eq!(split.description, "Wire");
        assert_eq!(split.kind, "");
    }

    #[test]
    fn test_gap_fallback_reassigns_tail() {
        // Everything sits left of the column threshold, but a 90-unit gap
        // separates description from type.
        let line = line_of(
            vec![
                frag("VENDING", 60.0, 50.0),
                frag("MACHINE", 115.0, 55.0),
                frag("PURCHASE", 260.0, 60.0),
            ],
            400.0,
        );
        let split = split_line(&line, "Jan 9", None, &ExtractConfig::default());
        assert_eq!(split.description, "VENDING MACHINE");
        assert_eq!(split.kind, "PURCHASE");
    }

    #[test]
    fn test_small_gaps_do_not_split() {
        let line = line_of(
            vec![frag("COFFEE", 60.0, 50.0), frag("SHOP", 140.0, 40.0)],
            400.0,
        );
        let split = split_line(&line, "Jan 9", None, &ExtractConfig::default());
        assert_eq!(split.description, "COFFEE SHOP");
        assert_eq!(split.kind, "");
    }

    #[test]
    fn test_all_tokens_excluded_yields_empty_split() {
        let line = line_of(vec![frag("Jan 5", 40.0, 30.0)], 340.0);
        let split = split_line(&line, "Jan 5", None, &ExtractConfig::default());
        assert_eq!(split, LineSplit::default());
    }
}
