use std::path::Path;

use estgrid::{Extraction, extract_estimate};

use crate::cli::OutputFormat;
use crate::shared::read_pages;

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let pages = read_pages(file)?;
    let extraction = extract_estimate(&pages);

    match format {
        OutputFormat::Text => write_text(&extraction),
        OutputFormat::Json => write_json(&extraction),
    }
    Ok(())
}

fn write_text(extraction: &Extraction) {
    if !extraction.second_ro_line.is_empty() {
        println!("ro\t{}", extraction.second_ro_line);
    }
    if !extraction.vehicle_info_line.is_empty() {
        println!("vehicle\t{}", extraction.vehicle_info_line);
    }
    if extraction.labor_column_collapsed {
        println!("note\tlabor column collapsed; labor and paint were swapped");
    }

    println!("kind\tline\tvalue\tdescription");
    for item in &extraction.labor_items {
        println!("labor\t{}\t{:.1}\t{}", item.line, item.value, item.description);
    }
    for item in &extraction.paint_items {
        println!("paint\t{}\t{:.1}\t{}", item.line, item.value, item.description);
    }
    println!("total_labor\t{:.1}", extraction.total_labor);
    println!("total_paint\t{:.1}", extraction.total_paint);
}

fn write_json(extraction: &Extraction) {
    let json_str = serde_json::to_string(extraction).unwrap();
    println!("{json_str}");
}
