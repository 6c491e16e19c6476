#![no_main]

use libfuzzer_sys::fuzz_target;
use skillscope::dataset::parse_csv;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must be rejected with an error, never a panic
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_csv(input);
    }
});
