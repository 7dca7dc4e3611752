//! ステータス行のパース

use std::io::BufRead;

use crate::error::MessageError;
use crate::limits::HeaderLimits;
use crate::log;
use crate::multimap::CaseInsensitiveMultimap;

use super::head::HttpHead;
use super::header::{HttpHeader, ReadLine, read_line};

/// `HTTP/` の長さ
const PROTOCOL_PREFIX_LEN: usize = "HTTP/".len();

/// パース済みステータス行とヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine {
    /// HTTP バージョン (`HTTP/` より後、`1.1` など)
    pub version: String,
    /// ステータスコード (空白より後。理由フレーズを含む場合がある)
    pub status_code: String,
    /// ヘッダー
    pub headers: CaseInsensitiveMultimap,
}

/// `HTTP/VERSION SP STATUS` を分解
///
/// `HTTP/` の中身は検証せず、空白より前に 5 文字以上あることだけを確認する。
fn split_status_line(line: &str) -> Result<(&str, &str), MessageError> {
    let version_end = line
        .find(' ')
        .ok_or(MessageError::MissingVersionDelimiter)?;
    if version_end < PROTOCOL_PREFIX_LEN {
        return Err(MessageError::VersionTooShort);
    }
    // 先頭 5 バイトが文字境界で終わらないなら `HTTP/` ではありえない
    let version = line
        .get(PROTOCOL_PREFIX_LEN..version_end)
        .ok_or(MessageError::InvalidProtocol)?;

    // 空白の後が空でもエラーにしない
    Ok((version, &line[version_end + 1..]))
}

impl ResponseLine {
    /// ステータス行とヘッダーをパース
    ///
    /// # 例
    ///
    /// ```rust
    /// use http11_utility::ResponseLine;
    ///
    /// let mut input: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";
    /// let response = ResponseLine::parse(&mut input).unwrap();
    /// assert_eq!(response.version, "1.1");
    /// assert_eq!(response.status_code, "200 OK");
    /// assert_eq!(response.status(), Some(200));
    /// ```
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, MessageError> {
        Self::parse_with_limits(reader, &HeaderLimits::unlimited())
    }

    /// 制限付きでステータス行とヘッダーをパース
    pub fn parse_with_limits<R: BufRead>(
        reader: &mut R,
        limits: &HeaderLimits,
    ) -> Result<Self, MessageError> {
        let line = match read_line(reader, limits.max_header_line_size) {
            ReadLine::Line(line) => line,
            ReadLine::Eof => return Err(MessageError::Empty),
            ReadLine::TooLong => return Err(MessageError::StartLineTooLong),
        };

        let (version, status_code) = split_status_line(&line).inspect_err(|_e| {
            log::debug!("invalid status line {line:?}: {_e}");
        })?;

        Ok(ResponseLine {
            version: version.to_string(),
            status_code: status_code.to_string(),
            headers: HttpHeader::parse_with_limits(reader, limits),
        })
    }

    /// 数値のステータスコードを取得
    ///
    /// `status_code` の先頭 3 桁が数字で、その後が終端か空白の場合のみ返す。
    pub fn status(&self) -> Option<u16> {
        let code = self.status_code.get(..3)?;
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match self.status_code.as_bytes().get(3) {
            None | Some(b' ') => code.parse().ok(),
            Some(_) => None,
        }
    }

    /// ステータスコードが成功 (2xx) か確認
    pub fn is_success(&self) -> bool {
        self.status().is_some_and(|c| (200..300).contains(&c))
    }

    /// ステータスコードがリダイレクト (3xx) か確認
    pub fn is_redirect(&self) -> bool {
        self.status().is_some_and(|c| (300..400).contains(&c))
    }

    /// ステータスコードがクライアントエラー (4xx) か確認
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|c| (400..500).contains(&c))
    }

    /// ステータスコードがサーバーエラー (5xx) か確認
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|c| (500..600).contains(&c))
    }

    /// ステータスコードが情報レスポンス (1xx) か確認
    pub fn is_informational(&self) -> bool {
        self.status().is_some_and(|c| (100..200).contains(&c))
    }
}

impl HttpHead for ResponseLine {
    fn version(&self) -> &str {
        &self.version
    }

    fn headers(&self) -> &CaseInsensitiveMultimap {
        &self.headers
    }
}
