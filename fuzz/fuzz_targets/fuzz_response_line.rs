#![no_main]

use http11_utility::{HttpHead, ResponseLine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = data;
    if let Ok(response) = ResponseLine::parse(&mut reader) {
        if let Some(code) = response.status() {
            assert!(code <= 999);
        }
        let _ = response.is_success();
        let _ = response.is_keep_alive();
        let _ = response.content_length();
    }
});
