use std::path::Path;

use estgrid::estgrid_core::{ColumnStrategy, locate_columns, scan_bounds};
use estgrid::input::pages_to_tokens;

use crate::cli::OutputFormat;
use crate::shared::read_pages;

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let pages = read_pages(file)?;
    let token_pages = pages_to_tokens(&pages);

    let scan = scan_bounds(&token_pages);
    let columns = locate_columns(&token_pages, &scan.bounds);

    let strategy = match columns.strategy {
        ColumnStrategy::Header => "header",
        ColumnStrategy::Clustered => "clustered",
    };
    let anchors = [
        ("line", columns.line),
        ("oper", columns.oper),
        ("description", columns.description),
        ("part_number", columns.part_number),
        ("qty", columns.qty),
        ("ext_price", columns.ext_price),
        ("labor", columns.labor),
        ("paint", columns.paint),
    ];

    match format {
        OutputFormat::Text => {
            println!("strategy\t{strategy}");
            println!("tolerance\t{:.1}", columns.tolerance());
            for (name, anchor) in anchors {
                match anchor {
                    Some(x) => println!("{name}\t{x:.2}"),
                    None => println!("{name}\t-"),
                }
            }
        }
        OutputFormat::Json => {
            let mut obj = serde_json::Map::new();
            obj.insert("strategy".into(), strategy.into());
            obj.insert("tolerance".into(), columns.tolerance().into());
            for (name, anchor) in anchors {
                obj.insert(name.into(), anchor.into());
            }
            let json_str = serde_json::to_string(&serde_json::Value::Object(obj)).unwrap();
            println!("{json_str}");
        }
    }
    Ok(())
}
