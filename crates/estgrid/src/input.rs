//! Input contract with the token-extraction service.
//!
//! The service hands this engine a sequence of pages, each a bag of text
//! tokens with bounding boxes and no semantic tags. Midpoints are derived
//! here; the service is not required to supply them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use estgrid_core::{BBox, Token};

/// A positioned text token as serialized by the token source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenInput {
    pub text: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// One page of the dump: dimensions plus its tokens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageInput {
    pub width: f64,
    pub height: f64,
    pub tokens: Vec<TokenInput>,
}

/// Errors reading or decoding a token dump.
///
/// These are input-layer failures, distinct from the engine's best-effort
/// posture: a dump that cannot be decoded is a real error, while a decoded
/// document with missing markers degrades gracefully downstream.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read token dump: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode token dump: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parse a token dump from a JSON string.
pub fn parse_pages(json: &str) -> Result<Vec<PageInput>, InputError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a token dump from any reader.
pub fn read_pages<R: Read>(reader: R) -> Result<Vec<PageInput>, InputError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a token dump from a file.
pub fn load_pages(path: &Path) -> Result<Vec<PageInput>, InputError> {
    read_pages(BufReader::new(File::open(path)?))
}

/// Convert input pages to core tokens, page-indexed from 1.
///
/// The outer Vec is per page: `result[0]` holds page 1's tokens.
pub fn pages_to_tokens(pages: &[PageInput]) -> Vec<Vec<Token>> {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            page.tokens
                .iter()
                .map(|t| {
                    Token::new(
                        t.text.clone(),
                        BBox::new(t.x0, t.y0, t.x1, t.y1),
                        i + 1,
                    )
                })
                .collect()
        })
        .collect()
}
