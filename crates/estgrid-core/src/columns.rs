//! Column location — find the x-center of each logical table column.
//!
//! Two interchangeable strategies produce the same [`ColumnMap`] interface:
//! reading anchors off a literal header row when one exists, or clustering
//! token x-centers into the canonical column count when it does not. The
//! header strategy supersedes clustering because its anchors are exact;
//! clustering is the robust fallback for vendor exports that omit the
//! header inside the bounded range.

use crate::bounds::DocumentBounds;
use crate::rows::{DEFAULT_Y_THRESHOLD, group_rows};
use crate::token::Token;

/// Canonical left-to-right column order of the repair-line grid.
const COLUMN_COUNT: usize = 8;

/// Iteration cap for the 1-D k-means fallback.
const KMEANS_MAX_ITERS: usize = 40;

/// Header words that must all appear in a row for it to qualify as the
/// column header.
const REQUIRED_HEADER_WORDS: [&str; 5] = ["LINE", "OPER", "DESCRIPTION", "LABOR", "PAINT"];

/// Which strategy populated a [`ColumnMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnStrategy {
    /// Anchors read directly from a literal header row.
    Header,
    /// Anchors from k-means clustering of token x-centers.
    Clustered,
}

impl ColumnStrategy {
    /// Horizontal distance within which a token matches a column anchor.
    ///
    /// Header anchors are exact word positions, so the band is tight;
    /// cluster centers wander with the data, so the band is loose.
    pub fn tolerance(&self) -> f64 {
        match self {
            ColumnStrategy::Header => 25.0,
            ColumnStrategy::Clustered => 40.0,
        }
    }
}

/// Named column x-anchors. An unset entry means the column could not be
/// located and never matches any token.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMap {
    pub line: Option<f64>,
    pub oper: Option<f64>,
    pub description: Option<f64>,
    pub part_number: Option<f64>,
    pub qty: Option<f64>,
    pub ext_price: Option<f64>,
    pub labor: Option<f64>,
    pub paint: Option<f64>,
    /// Strategy that produced these anchors.
    pub strategy: ColumnStrategy,
}

impl ColumnMap {
    fn unset(strategy: ColumnStrategy) -> Self {
        Self {
            line: None,
            oper: None,
            description: None,
            part_number: None,
            qty: None,
            ext_price: None,
            labor: None,
            paint: None,
            strategy,
        }
    }

    /// Horizontal match tolerance for these anchors.
    pub fn tolerance(&self) -> f64 {
        self.strategy.tolerance()
    }
}

/// Locate column anchors from the in-bounds tokens of `pages`.
///
/// Tries the header-anchored strategy first and falls back to clustering.
/// `pages[0]` is page 1; tokens outside `bounds` are ignored entirely.
pub fn locate_columns(pages: &[Vec<Token>], bounds: &DocumentBounds) -> ColumnMap {
    let in_bounds: Vec<Vec<Token>> = pages
        .iter()
        .enumerate()
        .map(|(i, tokens)| {
            tokens
                .iter()
                .filter(|t| bounds.contains(i + 1, t.ymid()))
                .cloned()
                .collect()
        })
        .collect();

    if let Some(map) = locate_from_header(&in_bounds) {
        return map;
    }
    locate_by_clustering(&in_bounds)
}

/// Header-anchored strategy: find the first in-bounds row whose text
/// contains every required header word, then read each recognized word's
/// `xmid` into its slot. First occurrence wins per slot.
fn locate_from_header(pages: &[Vec<Token>]) -> Option<ColumnMap> {
    for tokens in pages {
        for row in group_rows(tokens, DEFAULT_Y_THRESHOLD) {
            let upper = row.text().to_uppercase();
            if !REQUIRED_HEADER_WORDS.iter().all(|w| upper.contains(w)) {
                continue;
            }

            let mut map = ColumnMap::unset(ColumnStrategy::Header);
            for token in &row.tokens {
                let word = token.text.trim().to_uppercase();
                let xmid = token.xmid();
                if word == "LINE" {
                    map.line.get_or_insert(xmid);
                } else if word == "OPER" {
                    map.oper.get_or_insert(xmid);
                } else if word.contains("DESC") {
                    map.description.get_or_insert(xmid);
                } else if word.contains("PART") {
                    map.part_number.get_or_insert(xmid);
                } else if word == "QTY" {
                    map.qty.get_or_insert(xmid);
                } else if word.contains("EXT") {
                    map.ext_price.get_or_insert(xmid);
                } else if word == "LABOR" {
                    map.labor.get_or_insert(xmid);
                } else if word == "PAINT" {
                    map.paint.get_or_insert(xmid);
                }
            }
            return Some(map);
        }
    }
    None
}

/// Clustering fallback: k-means over all in-bounds x-centers, centers
/// sorted ascending and assigned positionally to the canonical order.
///
/// The caller guarantees (via the boundary scan) that the in-bounds token
/// set follows the canonical left-to-right layout; only positional
/// plausibility is checked here. Duplicate centers — clusters that
/// collapsed onto the same x — are dropped, leaving trailing slots unset.
fn locate_by_clustering(pages: &[Vec<Token>]) -> ColumnMap {
    let xvals: Vec<f64> = pages
        .iter()
        .flatten()
        .map(|t| t.xmid())
        .collect();

    let mut centers = kmeans_1d(&xvals, COLUMN_COUNT, KMEANS_MAX_ITERS);
    centers.sort_by(|a, b| a.partial_cmp(b).unwrap());
    centers.dedup();

    let mut map = ColumnMap::unset(ColumnStrategy::Clustered);
    let slots: [&mut Option<f64>; COLUMN_COUNT] = [
        &mut map.line,
        &mut map.oper,
        &mut map.description,
        &mut map.part_number,
        &mut map.qty,
        &mut map.ext_price,
        &mut map.labor,
        &mut map.paint,
    ];
    for (slot, center) in slots.into_iter().zip(centers) {
        *slot = Some(center);
    }
    map
}

/// 1-D k-means with deterministic quantile initialization.
///
/// Centers start at evenly spaced quantiles of the sorted values and are
/// iterated until no center moves more than 1e-6 or `max_iters` is hit.
/// Empty clusters keep their previous center.
fn kmeans_1d(values: &[f64], k: usize, max_iters: usize) -> Vec<f64> {
    if values.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut vals = values.to_vec();
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = vals.len();

    let mut centers: Vec<f64> = (0..k)
        .map(|i| {
            let idx = ((i as f64 + 0.5) * n as f64 / k as f64) as usize;
            vals[idx.min(n - 1)]
        })
        .collect();

    for _ in 0..max_iters {
        let mut sums = vec![0.0f64; k];
        let mut counts = vec![0usize; k];

        for &v in &vals {
            let mut best = 0;
            for c in 1..k {
                if (v - centers[c]).abs() < (v - centers[best]).abs() {
                    best = c;
                }
            }
            sums[best] += v;
            counts[best] += 1;
        }

        let mut changed = false;
        for i in 0..k {
            if counts[i] > 0 {
                let updated = sums[i] / counts[i] as f64;
                if (updated - centers[i]).abs() > 1e-6 {
                    changed = true;
                }
                centers[i] = updated;
            }
        }
        if !changed {
            break;
        }
    }

    centers
}
