#![no_main]

use http11_utility::{HttpHead, RequestLine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = data;
    if let Ok(request) = RequestLine::parse(&mut reader) {
        assert!(!request.version.is_empty());
        assert!(!request.path.contains(' '));
        let _ = request.parse_query();
        let _ = request.decoded_path();
        let _ = request.is_keep_alive();
        let _ = request.content_length();
        let _ = request.get_headers("Host");
    }
});
