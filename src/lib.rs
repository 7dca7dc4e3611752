//! # http11_utility
//!
//! HTTP/1.1 サーバーフレームワーク向けの低レベルユーティリティ
//!
//! ## 特徴
//!
//! - **寛容なパース**: 不正な入力でパニックせず、読み飛ばすか値としてエラーを返す
//! - **1 パス**: すべてのパーサーは入力長に対して線形時間で動作する
//! - **同期プリミティブ**: 読み取り優先ロックとキャンセル可能なスコープ管理
//!
//! ## 使い方
//!
//! ### リクエストのパース
//!
//! ```rust
//! use http11_utility::{HttpHead, QueryString, RequestLine};
//!
//! let mut input: &[u8] = b"GET /search?q=rust+lang HTTP/1.1\r\nHost: example.com\r\n\r\n";
//! let request = RequestLine::parse(&mut input).unwrap();
//! assert_eq!(request.path, "/search");
//! assert_eq!(request.get_header("host"), Some("example.com"));
//!
//! let query = QueryString::parse(&request.query_string);
//! assert_eq!(query.get("q"), Some("rust lang"));
//! ```
//!
//! ### ハンドラーのキャンセル
//!
//! ```rust
//! use http11_utility::sync::ScopeRunner;
//!
//! let runner = ScopeRunner::new();
//! if let Some(_guard) = runner.try_enter() {
//!     // ハンドラーを実行
//! }
//! // 実行中のハンドラーを待ってから以降を拒否する
//! runner.stop();
//! assert!(runner.try_enter().is_none());
//! ```
//!
//! ## ログ
//!
//! `log` feature を有効にすると [`log`](https://docs.rs/log) クレート経由でログを出力する。

pub mod content_disposition;
mod error;
mod limits;
mod log;
mod message;
pub mod multimap;
pub mod percent;
mod query_string;
pub mod sync;

pub use content_disposition::ContentDisposition;
pub use error::MessageError;
pub use limits::HeaderLimits;
pub use message::{HttpHead, HttpHeader, RequestLine, ResponseLine};
pub use multimap::{CaseInsensitiveMultimap, case_insensitive_equal, case_insensitive_hash};
pub use query_string::QueryString;
