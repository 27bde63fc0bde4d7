use crate::geometry::BBox;

/// A positioned text token from one page of the source document.
///
/// Tokens are produced by an external token-extraction service and are
/// read-only input to this engine. Page numbers are 1-based, matching the
/// numbering the boundary scan reports back to callers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The text content of this token.
    pub text: String,
    /// Bounding box on the page.
    pub bbox: BBox,
    /// 1-based page number.
    pub page: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, bbox: BBox, page: usize) -> Self {
        Self {
            text: text.into(),
            bbox,
            page,
        }
    }

    /// Horizontal midpoint of the bounding box.
    pub fn xmid(&self) -> f64 {
        self.bbox.xmid()
    }

    /// Vertical midpoint of the bounding box.
    pub fn ymid(&self) -> f64 {
        self.bbox.ymid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_midpoints_derived_from_bbox() {
        let token = Token::new("4.5", BBox::new(400.0, 100.0, 420.0, 112.0), 1);
        assert_eq!(token.xmid(), 410.0);
        assert_eq!(token.ymid(), 106.0);
        assert_eq!(token.page, 1);
    }

    #[test]
    fn test_token_text_preserved_verbatim() {
        let token = Token::new("007", BBox::new(0.0, 0.0, 10.0, 10.0), 2);
        assert_eq!(token.text, "007");
    }
}
