#![no_main]

use http11_utility::HttpHeader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = data;
    let headers = HttpHeader::parse(&mut reader);
    for (name, value) in &headers {
        assert!(!value.is_empty());
        let _ = headers.find_all(name).count();
    }
    assert!(reader.len() <= data.len());
});
