use crate::token::Token;

/// Default vertical proximity threshold for row grouping, in page units.
pub const DEFAULT_Y_THRESHOLD: f64 = 6.0;

/// A horizontal row: tokens clustered by vertical proximity.
///
/// `ymid` is the running arithmetic mean of the members' vertical midpoints.
/// It is recomputed after every insertion, so a row's identity can drift
/// slightly while tokens are added. The drift is part of the grouping
/// contract and downstream stages rely on reproducing it exactly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Mean vertical midpoint of the member tokens.
    pub ymid: f64,
    /// Member tokens, sorted left-to-right by `xmid` after grouping.
    pub tokens: Vec<Token>,
}

impl Row {
    /// Member texts joined with single spaces, in left-to-right order.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Cluster one page's tokens into rows by vertical proximity.
///
/// Tokens are sorted by `ymid` ascending and assigned greedily: each token
/// joins the first existing row whose current `ymid` is within `y_threshold`
/// (inclusive), and that row's `ymid` is recomputed as the mean of all its
/// members; otherwise the token seeds a new row. Rows are never merged after
/// creation, even if their means drift into range of each other.
///
/// Because sorting is the first step, the partition is deterministic for a
/// fixed token set regardless of input order. Rows come back in creation
/// order (ascending seed `ymid`) with each row's tokens sorted by `xmid`.
///
/// A stray token at the page's top or bottom forms a singleton row; such
/// rows are not filtered here — they fail the line-number gate downstream.
pub fn group_rows(tokens: &[Token], y_threshold: f64) -> Vec<Row> {
    let mut sorted: Vec<&Token> = tokens.iter().collect();
    sorted.sort_by(|a, b| a.ymid().partial_cmp(&b.ymid()).unwrap());

    let mut rows: Vec<Row> = Vec::new();

    for token in sorted {
        let ymid = token.ymid();
        let mut placed = false;
        for row in &mut rows {
            if (row.ymid - ymid).abs() <= y_threshold {
                row.tokens.push(token.clone());
                row.ymid =
                    row.tokens.iter().map(|t| t.ymid()).sum::<f64>() / row.tokens.len() as f64;
                placed = true;
                break;
            }
        }
        if !placed {
            rows.push(Row {
                ymid,
                tokens: vec![token.clone()],
            });
        }
    }

    for row in &mut rows {
        row.tokens
            .sort_by(|a, b| a.xmid().partial_cmp(&b.xmid()).unwrap());
    }

    rows
}
