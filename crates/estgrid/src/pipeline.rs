//! End-to-end extraction pipeline.
//!
//! Wires the four core stages together for one document: boundary scan,
//! column location, row classification, quirk correction, totals. The
//! pipeline is synchronous and holds no state between invocations, so
//! concurrent documents are just concurrent calls.

use serde::Serialize;
use tracing::{debug, warn};

use estgrid_core::{
    RepairLineItem, classify_rows, correct_collapsed_labor, locate_columns, scan_bounds, sum_hours,
};

use crate::input::{PageInput, pages_to_tokens};

/// Terminal output of the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub labor_items: Vec<RepairLineItem>,
    pub paint_items: Vec<RepairLineItem>,
    pub total_labor: f64,
    pub total_paint: f64,
    /// Joined text of the anchor row, for report headers.
    pub second_ro_line: String,
    /// Joined text of the vehicle info row, for report headers.
    pub vehicle_info_line: String,
    pub anchor_page: Option<usize>,
    pub anchor_ymid: Option<f64>,
    pub end_page: Option<usize>,
    pub end_ymid: Option<f64>,
    /// True when the collapsed-labor-column quirk correction fired — the
    /// document deviated from the expected layout family.
    pub labor_column_collapsed: bool,
}

/// Run the full pipeline over one document's pages.
///
/// Never fails: missing markers widen the processed range, unlocatable
/// columns yield fewer (possibly zero) items, and an empty document
/// produces empty item lists with zero totals.
pub fn extract_estimate(pages: &[PageInput]) -> Extraction {
    let token_pages = pages_to_tokens(pages);

    let scan = scan_bounds(&token_pages);
    debug!(
        anchor_page = ?scan.bounds.anchor_page,
        anchor_ymid = ?scan.bounds.anchor_ymid,
        end_page = ?scan.bounds.end_page,
        end_ymid = ?scan.bounds.end_ymid,
        "boundary scan complete"
    );

    let columns = locate_columns(&token_pages, &scan.bounds);
    debug!(strategy = ?columns.strategy, columns = ?columns, "columns located");

    let (labor_items, paint_items) = classify_rows(&token_pages, &scan.bounds, &columns);
    let (labor_items, paint_items, labor_column_collapsed) =
        correct_collapsed_labor(labor_items, paint_items);
    if labor_column_collapsed {
        warn!("labor column collapsed to zeros; swapped labor and paint items");
    }

    let total_labor = sum_hours(&labor_items);
    let total_paint = sum_hours(&paint_items);
    debug!(
        labor_items = labor_items.len(),
        paint_items = paint_items.len(),
        total_labor,
        total_paint,
        "classification complete"
    );

    Extraction {
        labor_items,
        paint_items,
        total_labor,
        total_paint,
        second_ro_line: scan.second_ro_line,
        vehicle_info_line: scan.vehicle_info_line,
        anchor_page: scan.bounds.anchor_page,
        anchor_ymid: scan.bounds.anchor_ymid,
        end_page: scan.bounds.end_page,
        end_ymid: scan.bounds.end_ymid,
        labor_column_collapsed,
    }
}
