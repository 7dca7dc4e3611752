#![no_main]

use http11_utility::QueryString;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let fields = QueryString::parse(s);
        for (key, _) in &fields {
            assert!(!key.is_empty());
        }

        let created = QueryString::create(&fields);
        let reparsed = QueryString::parse(&created);
        assert_eq!(reparsed.len(), fields.len());
        for ((k1, v1), (k2, v2)) in fields.iter().zip(reparsed.iter()) {
            assert_eq!(k1, k2);
            assert_eq!(v1, v2);
        }
    }
});
