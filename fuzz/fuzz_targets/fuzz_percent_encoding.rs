#![no_main]

use http11_utility::percent::{percent_decode, percent_decode_bytes, percent_encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let encoded = percent_encode(s);
        assert_eq!(percent_decode(&encoded), s);

        let decoded = percent_decode_bytes(s);
        assert!(decoded.len() <= s.len());
        let _ = percent_decode(s);
    }
});
