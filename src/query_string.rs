//! クエリ文字列の作成とパース
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::{CaseInsensitiveMultimap, QueryString};
//!
//! let fields = QueryString::parse("q=rust+lang&page=2");
//! assert_eq!(fields.get("q"), Some("rust lang"));
//! assert_eq!(fields.get("PAGE"), Some("2"));
//!
//! let mut fields = CaseInsensitiveMultimap::new();
//! fields.insert("q", "a&b");
//! assert_eq!(QueryString::create(&fields), "q=a%26b");
//! ```

use crate::multimap::CaseInsensitiveMultimap;
use crate::percent::{percent_decode, percent_encode};

/// `key=value&key=value` 形式のクエリ文字列
pub struct QueryString;

impl QueryString {
    /// フィールドからクエリ文字列を作成
    ///
    /// 値のみパーセントエンコードし、キーはそのまま出力する。
    /// 出力順はマルチマップの走査順 (挿入順)。
    pub fn create(fields: &CaseInsensitiveMultimap) -> String {
        let mut result = String::new();
        for (i, (key, value)) in fields.iter().enumerate() {
            if i > 0 {
                result.push('&');
            }
            result.push_str(key);
            result.push('=');
            result.push_str(&percent_encode(value));
        }
        result
    }

    /// クエリ文字列をパース
    ///
    /// - キーは最初の `=` より前 (`=` がなければセグメント全体)
    /// - 値は最初の `=` より後をパーセントデコードしたもの (なければ空文字列)
    /// - キーが空のセグメントは捨てる
    ///
    /// キーはデコードしない。
    pub fn parse(query_string: &str) -> CaseInsensitiveMultimap {
        let mut result = CaseInsensitiveMultimap::new();
        if query_string.is_empty() {
            return result;
        }

        for segment in query_string.split('&') {
            let (name, value) = match segment.split_once('=') {
                Some((name, value)) => (name, value),
                None => (segment, ""),
            };
            if name.is_empty() {
                continue;
            }
            result.insert(name, percent_decode(value));
        }

        result
    }
}
