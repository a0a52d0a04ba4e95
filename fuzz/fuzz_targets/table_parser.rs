#![no_main]

use laprank::table::RawTable;
use laprank::validation::validate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and validation must reject bad input with an error, never a panic
        for delimiter in [b',', b';', b'\t'] {
            if let Ok(table) = RawTable::parse(input, delimiter) {
                let _ = validate(&table);
            }
        }
    }
});
