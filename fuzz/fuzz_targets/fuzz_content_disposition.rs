#![no_main]

use http11_utility::content_disposition::ContentDisposition;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let cd = ContentDisposition::parse(s);
        for (name, _) in cd.params() {
            assert!(!name.is_empty());
        }
        let _ = cd.disposition_type();
        let _ = cd.name();
        let _ = cd.filename();
        let _ = cd.is_form_data();
    }
});
