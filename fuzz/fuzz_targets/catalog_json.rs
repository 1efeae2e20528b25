#![no_main]

use libfuzzer_sys::fuzz_target;
use packroot_converter::cataloger::parse_catalog;

fuzz_target!(|data: &[u8]| {
    let _ = parse_catalog(data);
});
