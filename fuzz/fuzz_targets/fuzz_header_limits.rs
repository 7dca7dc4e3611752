#![no_main]

use arbitrary::Arbitrary;
use http11_utility::{HeaderLimits, HttpHeader, RequestLine, ResponseLine};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzLimits {
    max_headers_count: u8,
    max_header_line_size: u16,
    data: Vec<u8>,
}

fn build_limits(input: &FuzzLimits) -> HeaderLimits {
    HeaderLimits {
        max_headers_count: input.max_headers_count as usize,
        max_header_line_size: input.max_header_line_size as usize,
    }
}

fuzz_target!(|input: FuzzLimits| {
    let limits = build_limits(&input);

    let headers = HttpHeader::parse_with_limits(&mut input.data.as_slice(), &limits);
    assert!(headers.len() <= limits.max_headers_count);

    if let Ok(request) = RequestLine::parse_with_limits(&mut input.data.as_slice(), &limits) {
        assert!(request.headers.len() <= limits.max_headers_count);
    }
    if let Ok(response) = ResponseLine::parse_with_limits(&mut input.data.as_slice(), &limits) {
        assert!(response.headers.len() <= limits.max_headers_count);
    }
});
