//! estgrid: recover the repair-line table from a positioned-text estimate.
//!
//! This is the public API facade crate for estgrid-rs. It deserializes the
//! token-extraction service's page dumps and runs the inference pipeline
//! from estgrid-core.
//!
//! # Architecture
//!
//! - **estgrid-core**: token source independent data types and algorithms
//! - **estgrid** (this crate): input contract, pipeline orchestration, logging
//! - **estgrid-cli**: command-line front end
//!
//! # Example
//!
//! ```
//! use estgrid::input::{PageInput, TokenInput};
//!
//! let page = PageInput {
//!     width: 612.0,
//!     height: 792.0,
//!     tokens: vec![TokenInput {
//!         text: "RO".into(),
//!         x0: 30.0,
//!         y0: 50.0,
//!         x1: 50.0,
//!         y1: 60.0,
//!     }],
//! };
//! let extraction = estgrid::extract_estimate(&[page]);
//! assert!(extraction.labor_items.is_empty());
//! ```

pub use estgrid_core;

pub mod input;
pub mod pipeline;

pub use estgrid_core::{
    BBox, BoundaryScan, ColumnMap, ColumnStrategy, DocumentBounds, RepairLineItem, Row, Token,
};
pub use input::{InputError, PageInput, TokenInput};
pub use pipeline::{Extraction, extract_estimate};
