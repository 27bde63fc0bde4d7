//! Table boundary scan — find where the repair-line grid starts and ends.
//!
//! Estimate documents open with letterhead, customer info, and a first "RO"
//! reference block before the repair-line table. The table itself begins at
//! the *second* row containing the standalone word "RO" and runs until the
//! "ESTIMATE TOTALS" row. Both markers are best-effort: a missing marker
//! widens the processed range instead of failing.

use std::sync::LazyLock;

use regex::Regex;

use crate::rows::{DEFAULT_Y_THRESHOLD, Row, group_rows};
use crate::token::Token;

/// Standalone, case-sensitive "RO" word. "PRO" or "ro" do not count.
static RO_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bRO\b").unwrap());

/// A 4-digit model year, 1900-2099.
static MODEL_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").unwrap());

/// End-of-table marker, whitespace-flexible between the two words.
static ESTIMATE_TOTALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bESTIMATE\s+TOTALS\b").unwrap());

/// How many rows below the anchor to search for the vehicle info line.
const VEHICLE_LOOKAHEAD: usize = 10;

/// Vertical slack applied on boundary pages, in page units.
const BOUNDARY_TOLERANCE: f64 = 3.0;

/// Inclusive page/ymid range of rows eligible for column detection and
/// classification. An unset bound means no restriction in that direction.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentBounds {
    /// 1-based page of the start anchor (second "RO" row).
    pub anchor_page: Option<usize>,
    /// Row mean ymid of the start anchor.
    pub anchor_ymid: Option<f64>,
    /// 1-based page of the "ESTIMATE TOTALS" row.
    pub end_page: Option<usize>,
    /// Row mean ymid of the "ESTIMATE TOTALS" row.
    pub end_ymid: Option<f64>,
}

impl DocumentBounds {
    /// Whether a token at (`page`, `ymid`) lies inside the bounded range.
    ///
    /// On the anchor page, tokens slightly above the anchor row are kept
    /// (`ymid >= anchor_ymid - 3.0`); on the end page, tokens at or after
    /// the end marker are rejected (`ymid >= end_ymid - 3.0`).
    pub fn contains(&self, page: usize, ymid: f64) -> bool {
        if let Some(anchor_page) = self.anchor_page {
            if page < anchor_page {
                return false;
            }
            if page == anchor_page {
                if let Some(anchor_ymid) = self.anchor_ymid {
                    if ymid < anchor_ymid - BOUNDARY_TOLERANCE {
                        return false;
                    }
                }
            }
        }
        if let Some(end_page) = self.end_page {
            if page > end_page {
                return false;
            }
            if page == end_page {
                if let Some(end_ymid) = self.end_ymid {
                    if ymid >= end_ymid - BOUNDARY_TOLERANCE {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Result of the boundary scan: bounds plus the two report-header strings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryScan {
    pub bounds: DocumentBounds,
    /// Joined text of the anchor row, e.g. "RO 1001".
    pub second_ro_line: String,
    /// Joined text of the first row below the anchor carrying a model year.
    pub vehicle_info_line: String,
}

/// Scan pages for the table's start anchor and end marker.
///
/// Pages are walked in order; each page's tokens are grouped into rows at
/// the default threshold and each row's joined text is matched. The second
/// row containing a standalone "RO" becomes the anchor, and the rows just
/// below it (same page, up to [`VEHICLE_LOOKAHEAD`]) are searched for the
/// vehicle info line. Independently, the first "ESTIMATE TOTALS" row sets
/// the end bound. Scanning stops as soon as both have been found.
///
/// `pages[0]` is page 1. Markers that never match simply leave their bound
/// unset; the caller then processes the document from the start and/or to
/// the last page.
pub fn scan_bounds(pages: &[Vec<Token>]) -> BoundaryScan {
    let mut scan = BoundaryScan::default();
    let mut ro_count = 0usize;

    'pages: for (i, tokens) in pages.iter().enumerate() {
        let page_number = i + 1;
        let rows = group_rows(tokens, DEFAULT_Y_THRESHOLD);

        for (idx, row) in rows.iter().enumerate() {
            let row_text = row.text();

            if RO_WORD.is_match(&row_text) {
                ro_count += 1;
                if ro_count == 2 && scan.bounds.anchor_page.is_none() {
                    scan.bounds.anchor_page = Some(page_number);
                    scan.bounds.anchor_ymid = Some(row.ymid);
                    scan.second_ro_line = row_text.clone();
                    scan.vehicle_info_line = find_vehicle_info(&rows, idx);
                }
            }

            if scan.bounds.end_page.is_none() && ESTIMATE_TOTALS.is_match(&row_text) {
                scan.bounds.end_page = Some(page_number);
                scan.bounds.end_ymid = Some(row.ymid);
            }

            if scan.bounds.anchor_page.is_some() && scan.bounds.end_page.is_some() {
                break 'pages;
            }
        }
    }

    scan
}

/// First row within the lookahead window below `anchor_idx` whose text
/// carries a 4-digit model year.
fn find_vehicle_info(rows: &[Row], anchor_idx: usize) -> String {
    let end = (anchor_idx + VEHICLE_LOOKAHEAD).min(rows.len());
    for row in &rows[anchor_idx + 1..end] {
        let text = row.text();
        if MODEL_YEAR.is_match(&text) {
            return text;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;

    /// One token per word, laid out left-to-right on the given line.
    fn line(page: usize, top: f64, words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let x0 = 30.0 + i as f64 * 60.0;
                Token::new(*w, BBox::new(x0, top, x0 + 50.0, top + 10.0), page)
            })
            .collect()
    }

    fn page_of(lines: Vec<Vec<Token>>) -> Vec<Token> {
        lines.into_iter().flatten().collect()
    }

    #[test]
    fn test_second_ro_row_becomes_anchor() {
        let page = page_of(vec![
            line(1, 50.0, &["CUSTOMER:", "Jane", "Doe"]),
            line(1, 80.0, &["RO", "1001"]),
            line(1, 110.0, &["2019", "HONDA", "CIVIC"]),
            line(1, 140.0, &["RO", "1001"]),
        ]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.bounds.anchor_page, Some(1));
        assert_eq!(scan.bounds.anchor_ymid, Some(145.0));
        assert_eq!(scan.second_ro_line, "RO 1001");
    }

    #[test]
    fn test_single_ro_leaves_anchor_unset() {
        let page = page_of(vec![line(1, 80.0, &["RO", "1001"])]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.bounds.anchor_page, None);
        assert_eq!(scan.bounds.anchor_ymid, None);
        assert_eq!(scan.second_ro_line, "");
    }

    #[test]
    fn test_ro_match_requires_standalone_word() {
        // "PROP" and "Road" contain the letters but not the standalone token
        let page = page_of(vec![
            line(1, 50.0, &["PROP", "Road"]),
            line(1, 80.0, &["ROT", "FROM"]),
        ]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.bounds.anchor_page, None);
    }

    #[test]
    fn test_vehicle_info_found_below_anchor() {
        let page = page_of(vec![
            line(1, 50.0, &["RO", "1001"]),
            line(1, 80.0, &["RO", "1001"]),
            line(1, 110.0, &["Insured:", "Jane", "Doe"]),
            line(1, 140.0, &["2019", "HONDA", "CIVIC"]),
        ]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.vehicle_info_line, "2019 HONDA CIVIC");
    }

    #[test]
    fn test_vehicle_info_lookahead_is_bounded() {
        let mut lines = vec![line(1, 30.0, &["RO", "1"]), line(1, 60.0, &["RO", "1"])];
        // Push the year line past the lookahead window
        for i in 0..10 {
            lines.push(line(1, 90.0 + i as f64 * 30.0, &["filler", "row"]));
        }
        lines.push(line(1, 420.0, &["2020", "FORD", "F-150"]));
        let scan = scan_bounds(&[page_of(lines)]);
        assert_eq!(scan.vehicle_info_line, "");
    }

    #[test]
    fn test_estimate_totals_sets_end_bound() {
        let page = page_of(vec![
            line(1, 50.0, &["RO", "1001"]),
            line(1, 80.0, &["RO", "1001"]),
            line(1, 300.0, &["ESTIMATE", "TOTALS", "4.5"]),
        ]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.bounds.end_page, Some(1));
        assert_eq!(scan.bounds.end_ymid, Some(305.0));
    }

    #[test]
    fn test_missing_end_marker_leaves_end_unset() {
        let page = page_of(vec![
            line(1, 50.0, &["RO", "1001"]),
            line(1, 80.0, &["RO", "1001"]),
        ]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.bounds.end_page, None);
        assert_eq!(scan.bounds.end_ymid, None);
    }

    #[test]
    fn test_markers_found_across_pages() {
        let page1 = page_of(vec![line(1, 50.0, &["RO", "1001"])]);
        let page2 = page_of(vec![line(2, 60.0, &["RO", "1001"])]);
        let page3 = page_of(vec![line(3, 400.0, &["ESTIMATE", "TOTALS"])]);
        let scan = scan_bounds(&[page1, page2, page3]);
        assert_eq!(scan.bounds.anchor_page, Some(2));
        assert_eq!(scan.bounds.end_page, Some(3));
    }

    #[test]
    fn test_first_totals_row_wins() {
        let page = page_of(vec![
            line(1, 100.0, &["ESTIMATE", "TOTALS"]),
            line(1, 200.0, &["ESTIMATE", "TOTALS"]),
        ]);
        let scan = scan_bounds(&[page]);
        assert_eq!(scan.bounds.end_ymid, Some(105.0));
    }

    #[test]
    fn test_empty_document() {
        let scan = scan_bounds(&[]);
        assert_eq!(scan.bounds, DocumentBounds::default());
        assert_eq!(scan.second_ro_line, "");
        assert_eq!(scan.vehicle_info_line, "");
    }

    #[test]
    fn test_contains_unbounded_accepts_everything() {
        let bounds = DocumentBounds::default();
        assert!(bounds.contains(1, 0.0));
        assert!(bounds.contains(99, 1000.0));
    }

    #[test]
    fn test_contains_anchor_page_rule() {
        let bounds = DocumentBounds {
            anchor_page: Some(2),
            anchor_ymid: Some(100.0),
            end_page: None,
            end_ymid: None,
        };
        assert!(!bounds.contains(1, 500.0));
        assert!(!bounds.contains(2, 96.9));
        assert!(bounds.contains(2, 97.0));
        assert!(bounds.contains(3, 10.0));
    }

    #[test]
    fn test_contains_end_page_rule() {
        let bounds = DocumentBounds {
            anchor_page: None,
            anchor_ymid: None,
            end_page: Some(2),
            end_ymid: Some(400.0),
        };
        assert!(bounds.contains(1, 999.0));
        assert!(bounds.contains(2, 396.9));
        assert!(!bounds.contains(2, 397.0));
        assert!(!bounds.contains(3, 10.0));
    }
}
