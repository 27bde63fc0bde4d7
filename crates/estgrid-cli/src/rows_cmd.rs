use std::path::Path;

use estgrid::estgrid_core::group_rows;
use estgrid::input::pages_to_tokens;

use crate::cli::OutputFormat;
use crate::shared::read_pages;

pub fn run(file: &Path, format: &OutputFormat, y_threshold: f64) -> Result<(), i32> {
    let pages = read_pages(file)?;
    let token_pages = pages_to_tokens(&pages);

    match format {
        OutputFormat::Text => {
            println!("page\tymid\ttokens\ttext");
            for (i, tokens) in token_pages.iter().enumerate() {
                for row in group_rows(tokens, y_threshold) {
                    println!("{}\t{:.2}\t{}\t{}", i + 1, row.ymid, row.tokens.len(), row.text());
                }
            }
        }
        OutputFormat::Json => {
            let mut all_rows = Vec::new();
            for (i, tokens) in token_pages.iter().enumerate() {
                for row in group_rows(tokens, y_threshold) {
                    all_rows.push(serde_json::json!({
                        "page": i + 1,
                        "ymid": row.ymid,
                        "tokens": row.tokens.len(),
                        "text": row.text(),
                    }));
                }
            }
            let json_str = serde_json::to_string(&all_rows).unwrap();
            println!("{json_str}");
        }
    }
    Ok(())
}
