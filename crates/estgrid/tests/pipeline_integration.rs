//! End-to-end pipeline tests over realistic two-page documents.

use estgrid::input::{PageInput, TokenInput};
use estgrid::{ColumnStrategy, extract_estimate};

fn page(tokens: Vec<TokenInput>) -> PageInput {
    PageInput {
        width: 612.0,
        height: 792.0,
        tokens,
    }
}

/// Lay the given words out on one line, each centered at its x position.
fn words(top: f64, entries: &[(&str, f64)]) -> Vec<TokenInput> {
    entries
        .iter()
        .map(|&(text, xmid)| TokenInput {
            text: text.into(),
            x0: xmid - 12.0,
            y0: top,
            x1: xmid + 12.0,
            y1: top + 10.0,
        })
        .collect()
}

/// The canonical layout: letterhead and customer noise, a first RO block,
/// the anchor RO row, the vehicle info line, a header row, repair lines,
/// and the totals marker.
fn canonical_document() -> Vec<PageInput> {
    let mut page1 = Vec::new();
    page1.extend(words(40.0, &[("CUSTOMER:", 60.0), ("Jane", 140.0), ("Doe", 200.0)]));
    page1.extend(words(70.0, &[("RO", 30.0), ("1001", 90.0)]));
    page1.extend(words(100.0, &[("RO", 30.0), ("1001", 90.0)]));
    page1.extend(words(130.0, &[("2019", 40.0), ("HONDA", 110.0), ("CIVIC", 180.0)]));
    page1.extend(words(
        160.0,
        &[
            ("LINE", 30.0),
            ("OPER", 75.0),
            ("DESCRIPTION", 180.0),
            ("PART", 320.0),
            ("QTY", 420.0),
            ("EXTENDED", 480.0),
            ("LABOR", 540.0),
            ("PAINT", 590.0),
        ],
    ));
    page1.extend(words(
        190.0,
        &[
            ("1", 30.0),
            ("REPL", 75.0),
            ("Front", 160.0),
            ("Bumper", 220.0),
            ("Cover", 280.0),
            ("4.5", 540.0),
            ("2.0", 590.0),
        ],
    ));

    let page2 = words(
        60.0,
        &[("ESTIMATE", 60.0), ("TOTALS", 140.0), ("4.5", 540.0), ("2.0", 590.0)],
    );

    vec![page(page1), page(page2)]
}

#[test]
fn canonical_document_extracts_one_line_item_per_list() {
    let extraction = extract_estimate(&canonical_document());

    assert_eq!(extraction.second_ro_line, "RO 1001");
    assert_eq!(extraction.vehicle_info_line, "2019 HONDA CIVIC");
    assert_eq!(extraction.anchor_page, Some(1));
    assert_eq!(extraction.end_page, Some(2));

    assert_eq!(extraction.labor_items.len(), 1);
    assert_eq!(extraction.labor_items[0].line, "1");
    assert_eq!(extraction.labor_items[0].description, "Front Bumper Cover");
    assert_eq!(extraction.labor_items[0].value, 4.5);

    assert_eq!(extraction.paint_items.len(), 1);
    assert_eq!(extraction.paint_items[0].line, "1");
    assert_eq!(extraction.paint_items[0].value, 2.0);

    assert_eq!(extraction.total_labor, 4.5);
    assert_eq!(extraction.total_paint, 2.0);
    assert!(!extraction.labor_column_collapsed);
}

#[test]
fn vehicle_info_is_read_below_the_anchor() {
    // Vehicle year line between the anchor and the header row
    let mut page1 = Vec::new();
    page1.extend(words(40.0, &[("RO", 30.0), ("1001", 90.0)]));
    page1.extend(words(70.0, &[("RO", 30.0), ("1001", 90.0)]));
    page1.extend(words(100.0, &[("2019", 40.0), ("HONDA", 110.0), ("CIVIC", 180.0)]));

    let extraction = extract_estimate(&[page(page1)]);
    assert_eq!(extraction.second_ro_line, "RO 1001");
    assert_eq!(extraction.vehicle_info_line, "2019 HONDA CIVIC");
}

#[test]
fn year_rows_above_the_anchor_are_not_the_vehicle_line() {
    // The lookahead only walks forward from the anchor; a year row in the
    // customer block stays a header-noise row.
    let mut page1 = Vec::new();
    page1.extend(words(40.0, &[("RO", 30.0), ("1001", 90.0)]));
    page1.extend(words(70.0, &[("2019", 40.0), ("HONDA", 110.0), ("CIVIC", 180.0)]));
    page1.extend(words(100.0, &[("RO", 30.0), ("1001", 90.0)]));

    let extraction = extract_estimate(&[page(page1)]);
    assert_eq!(extraction.second_ro_line, "RO 1001");
    assert_eq!(extraction.vehicle_info_line, "");
}

#[test]
fn totals_row_and_later_pages_are_not_classified() {
    let mut doc = canonical_document();
    // A fake repair line after the totals marker must be ignored
    doc[1].tokens.extend(words(
        200.0,
        &[("9", 30.0), ("REPL", 75.0), ("Ghost", 180.0), ("9.9", 540.0)],
    ));

    let extraction = extract_estimate(&doc);
    assert_eq!(extraction.labor_items.len(), 1);
    assert_eq!(extraction.total_labor, 4.5);
}

#[test]
fn rows_above_the_anchor_are_not_classified() {
    let mut doc = canonical_document();
    // A digit-led row in the customer block, above the second RO
    doc[0].tokens.extend(words(
        10.0,
        &[("7", 30.0), ("REPL", 75.0), ("Noise", 180.0), ("5.0", 540.0)],
    ));

    let extraction = extract_estimate(&doc);
    assert_eq!(extraction.labor_items.len(), 1);
    assert_eq!(extraction.labor_items[0].line, "1");
}

#[test]
fn missing_markers_fall_back_to_whole_document() {
    // No RO rows and no totals row: the single repair line still extracts
    let mut page1 = Vec::new();
    page1.extend(words(
        40.0,
        &[
            ("LINE", 30.0),
            ("OPER", 75.0),
            ("DESCRIPTION", 180.0),
            ("QTY", 420.0),
            ("LABOR", 540.0),
            ("PAINT", 590.0),
        ],
    ));
    page1.extend(words(
        70.0,
        &[("1", 30.0), ("RPR", 75.0), ("Hood", 180.0), ("3.0", 540.0)],
    ));

    let extraction = extract_estimate(&[page(page1)]);
    assert_eq!(extraction.anchor_page, None);
    assert_eq!(extraction.end_page, None);
    assert_eq!(extraction.labor_items.len(), 1);
    assert_eq!(extraction.total_labor, 3.0);
}

#[test]
fn headerless_document_falls_back_to_clustering() {
    // Eight-column layout with no header row anywhere: clustering must
    // still find the hour columns from the token geometry alone.
    let xs = [30.0, 75.0, 180.0, 320.0, 420.0, 480.0, 540.0, 590.0];
    let mut page1 = Vec::new();
    for (i, line) in [("1", "REPL"), ("2", "RPR"), ("3", "R&R"), ("4", "REPL")]
        .iter()
        .enumerate()
    {
        let top = 40.0 + i as f64 * 30.0;
        page1.extend(words(
            top,
            &[
                (line.0, xs[0]),
                (line.1, xs[1]),
                ("Panel", xs[2]),
                ("PN12345", xs[3]),
                ("1", xs[4]),
                ("250.00", xs[5]),
                ("2.0", xs[6]),
                ("1.0", xs[7]),
            ],
        ));
    }

    let extraction = extract_estimate(&[page(page1)]);
    assert_eq!(extraction.labor_items.len(), 4);
    assert_eq!(extraction.paint_items.len(), 4);
    assert_eq!(extraction.total_labor, 8.0);
    assert_eq!(extraction.total_paint, 4.0);

    // The sanity check on strategy selection itself
    let tokens = estgrid::input::pages_to_tokens(&[page(Vec::new())]);
    let map = estgrid_core::locate_columns(&tokens, &Default::default());
    assert_eq!(map.strategy, ColumnStrategy::Clustered);
}
