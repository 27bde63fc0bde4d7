//! Row classification — turn bounded rows into labor and paint line items.
//!
//! Each row is matched against the column anchors: a 1-3 digit token near
//! the line anchor gates the row in, an operation code and hour values are
//! read from their columns, and domain validity rules reject price tokens
//! that collided with the hours columns. A whole-document post-pass corrects
//! the known vendor export that collapses the labor column to zeros.

use std::sync::LazyLock;

use regex::Regex;

use crate::bounds::DocumentBounds;
use crate::columns::ColumnMap;
use crate::rows::{DEFAULT_Y_THRESHOLD, Row, group_rows};
use crate::token::Token;

/// A repair line number: 1-3 digits and nothing else.
static LINE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{1,3}$").unwrap());

/// An hour value candidate: decimal with an explicit fraction part.
static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+\.\d+$").unwrap());

/// Operation codes recognized in the Oper column (stored lowercased).
const OPERATION_CODES: [&str; 4] = ["r&i", "rpr", "repl", "r&r"];

/// Hour values outside this band are prices or extended amounts that
/// collided positionally with the hours column; they are rejected.
const HOURS_MAX: f64 = 99.9;

/// Safety margin subtracted from the description span's right bound so that
/// quantity digits never leak into the description.
const DESCRIPTION_MARGIN: f64 = 50.0;

/// Vendor adder line that must never be billed as a repair operation.
const CLEAR_COAT_PHRASE: &str = "add for clear coat";

/// One classified repair line: the original line-number token, the
/// description text, and an hour value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairLineItem {
    /// Line number exactly as printed, leading zeros preserved.
    pub line: String,
    /// Space-joined description tokens.
    pub description: String,
    /// Hours. `0.0` can mean either an explicit zero or the "Incl" sentinel.
    pub value: f64,
}

/// Classify all in-bounds rows into `(labor_items, paint_items)`.
///
/// `pages[0]` is page 1. Tokens outside `bounds` are dropped before row
/// grouping, so a repair line split across the anchor boundary is judged
/// only by its in-bounds tokens. The quirk correction is *not* applied
/// here; see [`correct_collapsed_labor`].
pub fn classify_rows(
    pages: &[Vec<Token>],
    bounds: &DocumentBounds,
    columns: &ColumnMap,
) -> (Vec<RepairLineItem>, Vec<RepairLineItem>) {
    let mut labor_items = Vec::new();
    let mut paint_items = Vec::new();

    for (i, tokens) in pages.iter().enumerate() {
        let page_number = i + 1;
        let in_bounds: Vec<Token> = tokens
            .iter()
            .filter(|t| bounds.contains(page_number, t.ymid()))
            .cloned()
            .collect();

        for row in group_rows(&in_bounds, DEFAULT_Y_THRESHOLD) {
            classify_row(&row, columns, &mut labor_items, &mut paint_items);
        }
    }

    (labor_items, paint_items)
}

/// Fields read off a single row before the emission rules run.
#[derive(Debug, Default)]
struct RowFields {
    line: Option<String>,
    oper: Option<String>,
    labor: Option<f64>,
    paint: Option<f64>,
    description: Vec<String>,
}

fn classify_row(
    row: &Row,
    columns: &ColumnMap,
    labor_items: &mut Vec<RepairLineItem>,
    paint_items: &mut Vec<RepairLineItem>,
) {
    let tolerance = columns.tolerance();
    let desc_lower = columns.oper.or(columns.line);
    let desc_upper = columns.qty.or(columns.labor);

    let mut fields = RowFields::default();

    for token in &row.tokens {
        let xmid = token.xmid();
        let text = token.text.trim();

        if fields.line.is_none()
            && near(xmid, columns.line, tolerance)
            && LINE_NUMBER.is_match(text)
        {
            fields.line = Some(text.to_string());
        }

        if fields.oper.is_none() && near(xmid, columns.oper, tolerance) {
            let lowered = text.to_lowercase();
            if OPERATION_CODES.contains(&lowered.as_str()) {
                fields.oper = Some(lowered);
            }
        }

        if let (Some(lower), Some(upper)) = (desc_lower, desc_upper) {
            if xmid > lower && xmid < upper - DESCRIPTION_MARGIN && !is_part_number_like(text) {
                fields.description.push(text.to_string());
            }
        }

        if fields.labor.is_none() && near(xmid, columns.labor, tolerance) {
            fields.labor = hour_value(text);
        }

        if fields.paint.is_none() && near(xmid, columns.paint, tolerance) {
            fields.paint = hour_value(text);
        }
    }

    // No line number: customer info, headers, totals — not a repair line.
    let Some(line) = fields.line else {
        return;
    };

    let description = fields.description.join(" ");
    if description.to_lowercase().contains(CLEAR_COAT_PHRASE) {
        return;
    }

    if let Some(value) = fields.labor {
        labor_items.push(RepairLineItem {
            line: line.clone(),
            description: description.clone(),
            value,
        });
    }

    if let Some(value) = fields.paint {
        // R&I rows carry the panel's refinish hours only as a reference;
        // zero paint is "nothing to refinish" either way.
        if fields.oper.as_deref() != Some("r&i") && value != 0.0 {
            paint_items.push(RepairLineItem {
                line,
                description,
                value,
            });
        }
    }
}

/// Whether `xmid` lies within `tolerance` of a column anchor. An unset
/// anchor never matches.
fn near(xmid: f64, anchor: Option<f64>, tolerance: f64) -> bool {
    match anchor {
        Some(x) => (xmid - x).abs() < tolerance,
        None => false,
    }
}

/// Parse a token in an hours column.
///
/// `Incl` maps to the sentinel `0.0` — hours included in another line, but
/// a *present* value as opposed to an absent one. Numeric candidates are
/// accepted only inside `[0.0, HOURS_MAX]`; anything outside that band is a
/// price fragment and is rejected rather than coerced.
fn hour_value(text: &str) -> Option<f64> {
    if HOURS.is_match(text) {
        let value: f64 = text.parse().ok()?;
        if (0.0..=HOURS_MAX).contains(&value) {
            return Some(value);
        }
        return None;
    }
    if text.eq_ignore_ascii_case("incl") {
        return Some(0.0);
    }
    None
}

/// Mixed letters-and-digits tokens of part-number length; excluded from
/// descriptions even when positionally eligible.
fn is_part_number_like(text: &str) -> bool {
    text.len() >= 4
        && text.chars().any(|c| c.is_ascii_alphabetic())
        && text.chars().any(|c| c.is_ascii_digit())
}

/// Correct the vendor export that renders every labor value as zero while
/// the genuine hours land in the paint column.
///
/// Applied exactly once, globally, after full classification: when every
/// labor item is `0.0` (vacuously true for an empty list) and any paint
/// item is nonzero, the two lists are swapped wholesale. Returns the
/// possibly-swapped lists and whether the correction fired — the one
/// condition worth surfacing to callers as an anomaly.
pub fn correct_collapsed_labor(
    labor_items: Vec<RepairLineItem>,
    paint_items: Vec<RepairLineItem>,
) -> (Vec<RepairLineItem>, Vec<RepairLineItem>, bool) {
    let labor_collapsed = labor_items.iter().all(|item| item.value == 0.0);
    let paint_has_hours = paint_items.iter().any(|item| item.value != 0.0);

    if labor_collapsed && paint_has_hours {
        (paint_items, labor_items, true)
    } else {
        (labor_items, paint_items, false)
    }
}

/// Plain floating-point sum of item hours. Rounding is a caller concern.
pub fn sum_hours(items: &[RepairLineItem]) -> f64 {
    items.iter().map(|item| item.value).sum()
}
