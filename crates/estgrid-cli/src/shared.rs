use std::io::Read;
use std::path::Path;

use estgrid::input::{self, PageInput};

/// Load a token dump from a file path, or from stdin when the path is "-".
///
/// Errors are printed to stderr and mapped to exit code 1.
pub fn read_pages(file: &Path) -> Result<Vec<PageInput>, i32> {
    let result = if file == Path::new("-") {
        let mut buf = String::new();
        match std::io::stdin().read_to_string(&mut buf) {
            Ok(_) => input::parse_pages(&buf),
            Err(e) => Err(e.into()),
        }
    } else {
        input::load_pages(file)
    };

    result.map_err(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        1
    })
}
