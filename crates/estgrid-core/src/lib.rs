//! estgrid-core: token source independent data types and algorithms.
//!
//! This crate provides the foundational types (BBox, Token, Row, ColumnMap,
//! RepairLineItem) and the four inference stages used by estgrid-rs to
//! recover the repair-line table from a positioned-text estimate document:
//!
//! 1. [`rows::group_rows`] — cluster a page's tokens into horizontal rows
//! 2. [`bounds::scan_bounds`] — locate the table's start anchor and end marker
//! 3. [`columns::locate_columns`] — find the x-center of each logical column
//! 4. [`classify::classify_rows`] — turn rows into labor/paint line items
//!
//! All stages are pure functions over owned values; nothing here holds
//! module-level state, so documents can be processed concurrently by simply
//! invoking the stages per document.

pub mod bounds;
pub mod classify;
pub mod columns;
pub mod geometry;
pub mod rows;
pub mod token;

pub use bounds::{BoundaryScan, DocumentBounds, scan_bounds};
pub use classify::{RepairLineItem, classify_rows, correct_collapsed_labor, sum_hours};
pub use columns::{ColumnMap, ColumnStrategy, locate_columns};
pub use geometry::BBox;
pub use rows::{DEFAULT_Y_THRESHOLD, Row, group_rows};
pub use token::Token;
