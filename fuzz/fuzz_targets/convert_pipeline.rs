#![no_main]

use libfuzzer_sys::fuzz_target;
use packroot_converter::cataloger::parse_catalog;
use packroot_converter::ConverterBuilder;

// 임의 바이트가 카탈로그로 파싱되면 전체 변환 경로가 패닉 없이
// Ok 또는 Err로 끝나야 한다.
fuzz_target!(|data: &[u8]| {
    if let Ok(catalog) = parse_catalog(data) {
        let Ok((converter, _rx)) = ConverterBuilder::new().build() else {
            return;
        };
        let _ = converter.convert(&catalog, "fuzz");
    }
});
