//! Run the extraction pipeline over a tiny hand-built token dump.
//!
//! ```sh
//! cargo run --example extract_estimate
//! ```

use estgrid::input::{PageInput, TokenInput};

fn words(top: f64, entries: &[(&str, f64)]) -> Vec<TokenInput> {
    entries
        .iter()
        .map(|&(text, xmid)| TokenInput {
            text: text.into(),
            x0: xmid - 12.0,
            y0: top,
            x1: xmid + 12.0,
            y1: top + 10.0,
        })
        .collect()
}

fn main() {
    let mut tokens = Vec::new();
    tokens.extend(words(40.0, &[("RO", 30.0), ("1001", 90.0)]));
    tokens.extend(words(70.0, &[("RO", 30.0), ("1001", 90.0)]));
    tokens.extend(words(100.0, &[("2019", 40.0), ("HONDA", 110.0), ("CIVIC", 180.0)]));
    tokens.extend(words(
        130.0,
        &[
            ("LINE", 30.0),
            ("OPER", 75.0),
            ("DESCRIPTION", 180.0),
            ("QTY", 420.0),
            ("LABOR", 540.0),
            ("PAINT", 590.0),
        ],
    ));
    tokens.extend(words(
        160.0,
        &[
            ("1", 30.0),
            ("REPL", 75.0),
            ("Front", 160.0),
            ("Bumper", 220.0),
            ("4.5", 540.0),
            ("2.0", 590.0),
        ],
    ));
    tokens.extend(words(300.0, &[("ESTIMATE", 60.0), ("TOTALS", 140.0)]));

    let pages = vec![PageInput {
        width: 612.0,
        height: 792.0,
        tokens,
    }];

    let extraction = estgrid::extract_estimate(&pages);

    println!("{}", extraction.second_ro_line);
    println!("{}", extraction.vehicle_info_line);
    for item in &extraction.labor_items {
        println!("labor  line {:>3}  {:<30} {:.1}", item.line, item.description, item.value);
    }
    for item in &extraction.paint_items {
        println!("paint  line {:>3}  {:<30} {:.1}", item.line, item.description, item.value);
    }
    println!("total labor: {:.1}", extraction.total_labor);
    println!("total paint: {:.1}", extraction.total_paint);
}
