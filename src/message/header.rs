//! ヘッダーブロックのパース

use std::io::{BufRead, Read};

use crate::limits::HeaderLimits;
use crate::log;
use crate::multimap::CaseInsensitiveMultimap;

/// 1 行読み取りの結果
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ReadLine {
    /// 行終端を取り除いた行
    Line(String),
    /// 入力の終端 (I/O エラーを含む)
    Eof,
    /// 行長制限を超えた
    TooLong,
}

/// 行を 1 行読み取る
///
/// 行終端 (`\r\n` または `\n`) は取り除く。UTF-8 として不正なバイトは U+FFFD に置き換える。
pub(crate) fn read_line<R: BufRead>(reader: &mut R, max_line_size: usize) -> ReadLine {
    let mut buf = Vec::new();
    let limit = (max_line_size as u64).saturating_add(1);
    match reader.by_ref().take(limit).read_until(b'\n', &mut buf) {
        Ok(0) => return ReadLine::Eof,
        Ok(_) => {}
        Err(_e) => {
            log::debug!("header source read error: {_e}");
            return ReadLine::Eof;
        }
    }
    if buf.len() > max_line_size {
        return ReadLine::TooLong;
    }

    // 入力の終端で `\n` がない場合も末尾の `\r` は取り除く
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    match String::from_utf8(buf) {
        Ok(line) => ReadLine::Line(line),
        Err(e) => ReadLine::Line(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}

/// ヘッダー行を名前と値に分割
///
/// `:` を含まない行は `None` (ヘッダーブロックの終端)。
/// `:` の直後の空白は 1 つだけ読み飛ばす。値が空の場合は `Some(None)`。
fn split_header_line(line: &str) -> Option<Option<(&str, &str)>> {
    let (name, rest) = line.split_once(':')?;
    let value = rest.strip_prefix(' ').unwrap_or(rest);
    if value.is_empty() {
        return Some(None);
    }
    Some(Some((name, value)))
}

/// `Name: value` 形式のヘッダーフィールド
pub struct HttpHeader;

impl HttpHeader {
    /// ヘッダーフィールドをパース
    ///
    /// `:` を含まない行 (ヘッダー終端の空行を含む) か入力の終端まで読み進める。
    /// 値が空の行は読み飛ばす。失敗することはなく、途中で入力が尽きた場合は
    /// それまでに読めたヘッダーを返す。
    ///
    /// # 例
    ///
    /// ```rust
    /// use http11_utility::HttpHeader;
    ///
    /// let mut input: &[u8] = b"Host: example.com\r\nAccept: */*\r\n\r\nbody";
    /// let headers = HttpHeader::parse(&mut input);
    /// assert_eq!(headers.get("host"), Some("example.com"));
    /// assert_eq!(headers.get("ACCEPT"), Some("*/*"));
    /// assert_eq!(input, b"body");
    /// ```
    pub fn parse<R: BufRead>(reader: &mut R) -> CaseInsensitiveMultimap {
        Self::parse_with_limits(reader, &HeaderLimits::unlimited())
    }

    /// 制限付きでヘッダーフィールドをパース
    ///
    /// ヘッダー数が `max_headers_count` に達するか、`max_header_line_size` を超える行に
    /// 出会った時点で打ち切り、それまでのヘッダーを返す。
    pub fn parse_with_limits<R: BufRead>(
        reader: &mut R,
        limits: &HeaderLimits,
    ) -> CaseInsensitiveMultimap {
        let mut result = CaseInsensitiveMultimap::new();

        loop {
            let line = match read_line(reader, limits.max_header_line_size) {
                ReadLine::Line(line) => line,
                ReadLine::Eof => break,
                ReadLine::TooLong => {
                    log::warning!(
                        "header line exceeds {} bytes, stop parsing",
                        limits.max_header_line_size
                    );
                    break;
                }
            };
            match split_header_line(&line) {
                Some(Some((name, value))) => {
                    if result.len() >= limits.max_headers_count {
                        log::warning!(
                            "header count exceeds {}, stop parsing",
                            limits.max_headers_count
                        );
                        break;
                    }
                    result.insert(name, value);
                }
                Some(None) => {
                    log::trace!("skip header line with empty value: {line:?}");
                }
                None => break,
            }
        }

        result
    }
}
