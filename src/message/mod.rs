//! HTTP/1.1 開始行とヘッダーブロックのパース
//!
//! 行単位の入力 ([`std::io::BufRead`]) から読み取る。`&[u8]` もそのまま渡せる。
//! パースはヘッダーブロックの終端 (空行) まで進み、ボディは入力に残る。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::{HttpHead, RequestLine};
//!
//! let mut input: &[u8] = b"POST /form?lang=ja HTTP/1.1\r\n\
//!     Host: example.com\r\n\
//!     Content-Length: 11\r\n\
//!     \r\n\
//!     hello=world";
//! let request = RequestLine::parse(&mut input).unwrap();
//! assert_eq!(request.method, "POST");
//! assert_eq!(request.parse_query().get("lang"), Some("ja"));
//! assert_eq!(request.content_length(), Some(11));
//! assert_eq!(input, b"hello=world");
//! ```

mod head;
mod header;
mod request;
mod response;

pub use head::HttpHead;
pub use header::HttpHeader;
pub use request::RequestLine;
pub use response::ResponseLine;
