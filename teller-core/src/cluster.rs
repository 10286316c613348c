//! Orphan clustering: attach continuation lines to the nearest compatible
//! transaction anchor, within and across pages.
//!
//! Continuations are wrapped or indented below their date/amount line,
//! sometimes spilling across a page break, so ownership is resolved by
//! vertical proximity among same-account anchors.

use crate::config::ExtractConfig;
use crate::types::{Anchor, Orphan};

/// Resolve one page's orphans against the anchors seen so far.
///
/// `anchors` holds every anchor discovered up to and including this page
/// in page + top-to-bottom order; `page_start` indexes this page's first
/// anchor; `global_last` indexes the most recent anchor from any prior
/// page. Each orphan is resolved independently; an orphan whose chosen
/// anchor belongs to a different account is dropped, never reassigned.
pub fn attach_page_orphans(
    anchors: &mut [Anchor],
    page_start: usize,
    global_last: Option<usize>,
    orphans: Vec<Orphan>,
    cfg: &ExtractConfig,
) {
    for orphan in orphans {
        if let Some(idx) = resolve_owner(anchors, page_start, global_last, &orphan, cfg) {
            if anchors[idx].account == orphan.account {
                anchors[idx].sub_lines.push(orphan.line);
            }
        }
    }
}

fn resolve_owner(
    anchors: &[Anchor],
    page_start: usize,
    global_last: Option<usize>,
    orphan: &Orphan,
    cfg: &ExtractConfig,
) -> Option<usize> {
    // A page without any anchors: the previous page's trailing anchor may
    // still own this text, but only within the same account.
    if anchors.len() == page_start {
        return global_last.filter(|&g| anchors[g].account == orphan.account);
    }

    // Nearest same-account anchors strictly above and at-or-below the
    // orphan, scanning the page top to bottom.
    let mut above: Option<usize> = None;
    let mut below: Option<usize> = None;
    for (i, anchor) in anchors[page_start..].iter().enumerate() {
        if anchor.account != orphan.account {
            continue;
        }
        if anchor.line.y > orphan.line.y {
            above = Some(page_start + i);
        } else {
            below = Some(page_start + i);
            break;
        }
    }

    match (above, below) {
        (None, _) => {
            // Top of page: a close-by anchor below wins over the previous
            // page's trailing anchor.
            let global = global_last.filter(|&g| anchors[g].account == orphan.account);
            match (global, below) {
                (Some(_), Some(b)) if orphan.line.y - anchors[b].line.y < cfg.cluster_gap_max => {
                    Some(b)
                }
                (Some(g), _) => Some(g),
                (None, b) => b,
            }
        }
        (Some(a), None) => Some(a),
        (Some(a), Some(b)) => {
            let dist_above = anchors[a].line.y - orphan.line.y;
            let dist_below = orphan.line.y - anchors[b].line.y;
            if dist_above <= dist_below { Some(a) } else { Some(b) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Line, TextFragment};

    fn line(text: &str, y: i64, page: usize) -> Line {
        Line {
            y,
            fragments: vec![TextFragment {
                text: text.to_string(),
                x: 60.0,
                width: 40.0,
                y: y as f64,
            }],
            text: text.to_string(),
            page,
            type_column_x: 340.0,
        }
    }

    fn anchor(date: &str, account: &str, y: i64, page: usize) -> Anchor {
        Anchor {
            line: line(&format!("{date} entry"), y, page),
            account: account.to_string(),
            date: date.to_string(),
            amount_str: None,
            sub_lines: Vec::new(),
        }
    }

    fn orphan(account: &str, y: i64, page: usize) -> Orphan {
        Orphan {
            line: line("continuation", y, page),
            account: account.to_string(),
        }
    }

    #[test]
    fn test_nearest_anchor_wins_tie_goes_above() {
        let mut anchors = vec![
            anchor("Jan 5", "Debit x1", 500, 1),
            anchor("Jan 6", "Debit x1", 460, 1),
        ];
        // Equidistant from both: the one above owns it.
        attach_page_orphans(&mut anchors, 0, None, vec![orphan("Debit x1", 480, 1)], &ExtractConfig::default());
        assert_eq!(anchors[0].sub_lines.len(), 1);
        assert!(anchors[1].sub_lines.is_empty());

        // Strictly closer to the lower anchor.
        attach_page_orphans(&mut anchors, 0, None, vec![orphan("Debit x1", 470, 1)], &ExtractConfig::default());
        assert_eq!(anchors[1].sub_lines.len(), 1);
    }

    #[test]
    fn test_orphan_below_all_anchors_attaches_above() {
        let mut anchors = vec![anchor("Jan 5", "Debit x1", 500, 1)];
        attach_page_orphans(&mut anchors, 0, None, vec![orphan("Debit x1", 300, 1)], &ExtractConfig::default());
        assert_eq!(anchors[0].sub_lines.len(), 1);
    }

    #[test]
    fn test_account_mismatch_drops_orphan() {
        let mut anchors = vec![anchor("Jan 5", "Debit x1", 500, 1)];
        attach_page_orphans(&mut anchors, 0, None, vec![orphan("Savings x2", 480, 1)], &ExtractConfig::default());
        assert!(anchors[0].sub_lines.is_empty());
    }

    #[test]
    fn test_empty_page_falls_back_to_global_last() {
        let mut anchors = vec![anchor("Jan 30", "Debit x1", 120, 1)];
        // Page 2 produced no anchors of its own.
        attach_page_orphans(&mut anchors, 1, Some(0), vec![orphan("Debit x1", 700, 2)], &ExtractConfig::default());
        assert_eq!(anchors[0].sub_lines.len(), 1);

        attach_page_orphans(&mut anchors, 1, Some(0), vec![orphan("Savings x2", 690, 2)], &ExtractConfig::default());
        assert_eq!(anchors[0].sub_lines.len(), 1);
    }

    #[test]
    fn test_top_of_page_prefers_close_anchor_below() {
        let mut anchors = vec![
            anchor("Jan 30", "Debit x1", 120, 1),
            anchor("Feb 1", "Debit x1", 690, 2),
        ];
        // Orphan at the very top of page 2, 10 units above the first
        // anchor of that page: stays with the page-2 anchor.
        attach_page_orphans(&mut anchors, 1, Some(0), vec![orphan("Debit x1", 700, 2)], &ExtractConfig::default());
        assert!(anchors[0].sub_lines.is_empty());
        assert_eq!(anchors[1].sub_lines.len(), 1);
    }

    #[test]
    fn test_top_of_page_wide_gap_goes_to_global_last() {
        let mut anchors = vec![
            anchor("Jan 30", "Debit x1", 120, 1),
            anchor("Feb 1", "Debit x1", 600, 2),
        ];
        // 100 units above page 2's first anchor: continuation of the
        // previous page's trailing transaction.
        attach_page_orphans(&mut anchors, 1, Some(0), vec![orphan("Debit x1", 700, 2)], &ExtractConfig::default());
        assert_eq!(anchors[0].sub_lines.len(), 1);
        assert!(anchors[1].sub_lines.is_empty());
    }

    #[test]
    fn test_top_of_page_without_global_takes_anchor_below() {
        let mut anchors = vec![anchor("Feb 1", "Debit x1", 600, 1)];
        attach_page_orphans(&mut anchors, 0, None, vec![orphan("Debit x1", 700, 1)], &ExtractConfig::default());
        assert_eq!(anchors[0].sub_lines.len(), 1);
    }
}
