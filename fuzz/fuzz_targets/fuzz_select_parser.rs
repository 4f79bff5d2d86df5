#![no_main]

use libfuzzer_sys::fuzz_target;
use rowsql::{parse_select_list, parse_select_list_with_config, SelectConfig};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, skip invalid UTF-8
    if let Ok(list) = std::str::from_utf8(data) {
        // The parser should never panic, only return Ok or Err
        if let Ok(exprs) = parse_select_list(list) {
            // Rendered expressions go through the parser again
            for expr in &exprs {
                let _ = parse_select_list(&expr.to_string());
            }
        }
        let _ = parse_select_list_with_config(list, SelectConfig::strict());
    }
});
