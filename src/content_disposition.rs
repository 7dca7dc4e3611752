//! Content-Disposition ヘッダー値のパラメータパース
//!
//! ## 概要
//!
//! `multipart/form-data` のパートに付く Content-Disposition ヘッダー値から
//! `;` 区切りのパラメータを取り出す。
//!
//! - `name` のみのパラメータは値が空文字列になる
//! - `name="value"` の値は引用符の内側をそのまま取り出す (エスケープ処理なし)
//! - 閉じ引用符のないパラメータは捨てる
//! - 引用符のない値 (`name=value`) を持つパラメータは捨てる。
//!   後続のパラメータの引用符付き値を取り込むことはない
//!
//! 不正なパラメータは読み飛ばし、パースは失敗しない。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::content_disposition::ContentDisposition;
//!
//! let cd = ContentDisposition::parse("form-data; name=\"file\"; filename=\"image.png\"");
//! assert_eq!(cd.disposition_type(), Some("form-data"));
//! assert_eq!(cd.name(), Some("file"));
//! assert_eq!(cd.filename(), Some("image.png"));
//! assert_eq!(cd.params().len(), 3);
//! ```

use crate::multimap::CaseInsensitiveMultimap;

/// パーサーの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// パラメータの開始を待っている (空白と `;` を読み飛ばす)
    Idle,
    /// パラメータ名を読んでいる
    Name { start: usize },
    /// `=` の後、開き引用符を待っている
    BeforeValue { name_start: usize, name_end: usize },
    /// 引用符の内側を読んでいる
    Quoted {
        name_start: usize,
        name_end: usize,
        value_start: usize,
    },
}

/// Content-Disposition ヘッダー値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDisposition {
    params: CaseInsensitiveMultimap,
}

impl ContentDisposition {
    /// Content-Disposition ヘッダー値をパース
    ///
    /// # 例
    ///
    /// ```rust
    /// use http11_utility::content_disposition::ContentDisposition;
    ///
    /// let cd = ContentDisposition::parse("attachment; filename=\"report.pdf\"");
    /// assert_eq!(cd.disposition_type(), Some("attachment"));
    /// assert_eq!(cd.filename(), Some("report.pdf"));
    ///
    /// // 閉じ引用符のないパラメータは捨てる
    /// let cd = ContentDisposition::parse("form-data; name=\"broken");
    /// assert_eq!(cd.name(), None);
    /// ```
    pub fn parse(input: &str) -> Self {
        let bytes = input.as_bytes();
        let mut params = CaseInsensitiveMultimap::new();
        let mut state = State::Idle;

        for (i, &b) in bytes.iter().enumerate() {
            state = match state {
                State::Idle if b == b' ' || b == b';' => State::Idle,
                State::Idle => State::Name { start: i },
                State::Name { start } => match b {
                    b';' => {
                        params.insert(&input[start..i], "");
                        State::Idle
                    }
                    b'=' => State::BeforeValue {
                        name_start: start,
                        name_end: i,
                    },
                    _ => state,
                },
                State::BeforeValue {
                    name_start,
                    name_end,
                } => match b {
                    // 末尾の引用符は値を開始できない
                    b'"' if i + 1 < bytes.len() => State::Quoted {
                        name_start,
                        name_end,
                        value_start: i + 1,
                    },
                    // 引用符のない値は捨てて次のパラメータへ
                    b';' => State::Idle,
                    _ => state,
                },
                State::Quoted {
                    name_start,
                    name_end,
                    value_start,
                } => {
                    if b == b'"' {
                        params.insert(&input[name_start..name_end], &input[value_start..i]);
                        State::Idle
                    } else {
                        state
                    }
                }
            };
        }

        if let State::Name { start } = state {
            params.insert(&input[start..], "");
        }

        ContentDisposition { params }
    }

    /// パラメータをすべて取得
    pub fn params(&self) -> &CaseInsensitiveMultimap {
        &self.params
    }

    /// パラメータを取り出す
    pub fn into_params(self) -> CaseInsensitiveMultimap {
        self.params
    }

    /// パラメータの値を取得 (大文字小文字を区別しない)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// disposition-type を取得
    ///
    /// 先頭のパラメータが値を持たない場合のみ返す。
    pub fn disposition_type(&self) -> Option<&str> {
        self.params
            .iter()
            .next()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
    }

    /// name パラメータを取得 (form-data 用)
    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    /// filename パラメータを取得
    pub fn filename(&self) -> Option<&str> {
        self.get("filename")
    }

    /// form-data かどうか
    pub fn is_form_data(&self) -> bool {
        self.disposition_type()
            .is_some_and(|t| t.eq_ignore_ascii_case("form-data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(cd: &ContentDisposition) -> Vec<(&str, &str)> {
        cd.params().iter().collect()
    }

    #[test]
    fn test_parse_form_data_with_filename() {
        let cd = ContentDisposition::parse("form-data; name=\"f\"; filename=\"t.txt\"");
        assert_eq!(
            entries(&cd),
            vec![("form-data", ""), ("name", "f"), ("filename", "t.txt")]
        );
        assert!(cd.is_form_data());
    }

    #[test]
    fn test_parse_bare_token() {
        let cd = ContentDisposition::parse("inline");
        assert_eq!(entries(&cd), vec![("inline", "")]);
        assert_eq!(cd.disposition_type(), Some("inline"));
    }

    #[test]
    fn test_parse_without_space() {
        let cd = ContentDisposition::parse("form-data;name=\"a\";filename=\"b\"");
        assert_eq!(cd.name(), Some("a"));
        assert_eq!(cd.filename(), Some("b"));
    }

    #[test]
    fn test_parse_quoted_value_verbatim() {
        let cd = ContentDisposition::parse("form-data; filename=\"a; b=c.txt\"");
        assert_eq!(cd.filename(), Some("a; b=c.txt"));

        // エスケープは処理しない
        let cd = ContentDisposition::parse(r#"form-data; filename="C:\dir\x.txt""#);
        assert_eq!(cd.filename(), Some(r"C:\dir\x.txt"));
    }

    #[test]
    fn test_parse_empty_quoted_value() {
        let cd = ContentDisposition::parse("form-data; name=\"\"; filename=\"x\"");
        assert_eq!(cd.name(), Some(""));
        assert_eq!(cd.filename(), Some("x"));
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let cd = ContentDisposition::parse("form-data; name=\"field");
        assert_eq!(entries(&cd), vec![("form-data", "")]);
    }

    #[test]
    fn test_parse_quote_at_end() {
        let cd = ContentDisposition::parse("form-data; name=\"");
        assert_eq!(entries(&cd), vec![("form-data", "")]);
    }

    #[test]
    fn test_parse_name_without_value_at_end() {
        let cd = ContentDisposition::parse("form-data; name=");
        assert_eq!(entries(&cd), vec![("form-data", "")]);
    }

    #[test]
    fn test_parse_unquoted_value_is_dropped() {
        let cd = ContentDisposition::parse("form-data; name=field; filename=\"x.txt\"");
        assert_eq!(cd.name(), None);
        assert_eq!(cd.filename(), Some("x.txt"));
    }

    #[test]
    fn test_parse_trailing_bare_name() {
        let cd = ContentDisposition::parse("form-data; name=\"a\"; flag");
        assert_eq!(
            entries(&cd),
            vec![("form-data", ""), ("name", "a"), ("flag", "")]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(ContentDisposition::parse("").params().is_empty());
        assert!(ContentDisposition::parse(" ; ;").params().is_empty());
        assert_eq!(ContentDisposition::parse("").disposition_type(), None);
    }

    #[test]
    fn test_parse_case_insensitive_lookup() {
        let cd = ContentDisposition::parse("FORM-DATA; NAME=\"upload\"");
        assert_eq!(cd.name(), Some("upload"));
        assert!(cd.is_form_data());
    }

    #[test]
    fn test_disposition_type_requires_bare_first_param() {
        let cd = ContentDisposition::parse("name=\"x\"");
        assert_eq!(cd.disposition_type(), None);
        assert_eq!(cd.into_params().len(), 1);
    }

    #[test]
    fn test_parse_non_ascii_value() {
        let cd = ContentDisposition::parse("form-data; filename=\"日本語.txt\"");
        assert_eq!(cd.filename(), Some("日本語.txt"));
    }
}
