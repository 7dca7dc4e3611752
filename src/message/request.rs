//! リクエスト行のパース

use std::io::BufRead;

use crate::error::MessageError;
use crate::limits::HeaderLimits;
use crate::log;
use crate::multimap::CaseInsensitiveMultimap;
use crate::percent::percent_decode;
use crate::query_string::QueryString;

use super::head::HttpHead;
use super::header::{HttpHeader, ReadLine, read_line};

/// パース済みリクエスト行とヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// HTTP メソッド (GET, POST, etc.)
    pub method: String,
    /// パス (クエリ文字列を含まない)
    pub path: String,
    /// クエリ文字列 (`?` より後、デコード前)。なければ空文字列
    pub query_string: String,
    /// HTTP バージョン (`HTTP/` より後、`1.1` など)
    pub version: String,
    /// ヘッダー
    pub headers: CaseInsensitiveMultimap,
}

/// リクエスト行を分解した結果
#[derive(Debug, PartialEq, Eq)]
struct StartLine<'a> {
    method: &'a str,
    path: &'a str,
    query_string: &'a str,
    version: &'a str,
}

/// `METHOD SP PATH[?QUERY] SP HTTP/VERSION` を分解
fn split_request_line(line: &str) -> Result<StartLine<'_>, MessageError> {
    let (method, rest) = line
        .split_once(' ')
        .ok_or(MessageError::MissingMethodDelimiter)?;
    let (target, protocol) = rest
        .split_once(' ')
        .ok_or(MessageError::MissingTargetDelimiter)?;

    // 最初の `?` からがクエリ文字列
    let (path, query_string) = target.split_once('?').unwrap_or((target, ""));

    let (protocol_name, version) = protocol
        .split_once('/')
        .ok_or(MessageError::MissingProtocolDelimiter)?;
    if protocol_name != "HTTP" {
        return Err(MessageError::InvalidProtocol);
    }
    if version.is_empty() {
        return Err(MessageError::MissingVersion);
    }

    Ok(StartLine {
        method,
        path,
        query_string,
        version,
    })
}

impl RequestLine {
    /// リクエスト行とヘッダーをパース
    ///
    /// リクエスト行が文法に合わない場合はエラーを返し、ヘッダーは読まない。
    ///
    /// # 例
    ///
    /// ```rust
    /// use http11_utility::RequestLine;
    ///
    /// let mut input: &[u8] = b"GET /a?x=1 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    /// let request = RequestLine::parse(&mut input).unwrap();
    /// assert_eq!(request.method, "GET");
    /// assert_eq!(request.path, "/a");
    /// assert_eq!(request.query_string, "x=1");
    /// assert_eq!(request.version, "1.1");
    /// assert_eq!(request.headers.get("host"), Some("example.com"));
    ///
    /// let mut input: &[u8] = b"BADLINE\r\n";
    /// assert!(RequestLine::parse(&mut input).is_err());
    /// ```
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, MessageError> {
        Self::parse_with_limits(reader, &HeaderLimits::unlimited())
    }

    /// 制限付きでリクエスト行とヘッダーをパース
    ///
    /// リクエスト行自体にも `max_header_line_size` を適用する。
    pub fn parse_with_limits<R: BufRead>(
        reader: &mut R,
        limits: &HeaderLimits,
    ) -> Result<Self, MessageError> {
        let line = match read_line(reader, limits.max_header_line_size) {
            ReadLine::Line(line) => line,
            ReadLine::Eof => return Err(MessageError::Empty),
            ReadLine::TooLong => return Err(MessageError::StartLineTooLong),
        };

        let start = split_request_line(&line).inspect_err(|_e| {
            log::debug!("invalid request line {line:?}: {_e}");
        })?;

        Ok(RequestLine {
            method: start.method.to_string(),
            path: start.path.to_string(),
            query_string: start.query_string.to_string(),
            version: start.version.to_string(),
            headers: HttpHeader::parse_with_limits(reader, limits),
        })
    }

    /// クエリ文字列をパース
    pub fn parse_query(&self) -> CaseInsensitiveMultimap {
        QueryString::parse(&self.query_string)
    }

    /// パーセントデコードしたパスを取得
    pub fn decoded_path(&self) -> String {
        percent_decode(&self.path)
    }
}

impl HttpHead for RequestLine {
    fn version(&self) -> &str {
        &self.version
    }

    fn headers(&self) -> &CaseInsensitiveMultimap {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<RequestLine, MessageError> {
        RequestLine::parse(&mut input.as_bytes())
    }

    #[test]
    fn test_parse_request() {
        let request = parse("GET /a?x=1 HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/a");
        assert_eq!(request.query_string, "x=1");
        assert_eq!(request.version, "1.1");
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_parse_request_with_headers() {
        let request =
            parse("POST /submit HTTP/1.0\r\nHost: example.com\r\nContent-Length: 3\r\n\r\nabc")
                .unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/submit");
        assert_eq!(request.query_string, "");
        assert_eq!(request.version, "1.0");
        assert_eq!(request.get_header("HOST"), Some("example.com"));
        assert_eq!(request.content_length(), Some(3));
    }

    #[test]
    fn test_parse_leaves_body_in_reader() {
        let mut input: &[u8] = b"PUT /x HTTP/1.1\r\nA: 1\r\n\r\nbody";
        let request = RequestLine::parse(&mut input).unwrap();
        assert_eq!(request.headers.get("A"), Some("1"));
        assert_eq!(input, b"body");
    }

    #[test]
    fn test_parse_query_with_extra_question_marks() {
        let request = parse("GET /p?a=1?b=2 HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.path, "/p");
        assert_eq!(request.query_string, "a=1?b=2");
    }

    #[test]
    fn test_parse_trailing_question_mark() {
        let request = parse("GET /p? HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.path, "/p");
        assert_eq!(request.query_string, "");
    }

    #[test]
    fn test_parse_query_is_not_decoded() {
        let request = parse("GET /search?q=a%20b+c HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.query_string, "q=a%20b+c");
        assert_eq!(request.parse_query().get("q"), Some("a b c"));
    }

    #[test]
    fn test_decoded_path() {
        let request = parse("GET /files/my%20doc.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.path, "/files/my%20doc.txt");
        assert_eq!(request.decoded_path(), "/files/my doc.txt");
    }

    #[test]
    fn test_parse_lf_only() {
        let request = parse("GET / HTTP/1.1\nHost: a\n\n").unwrap();
        assert_eq!(request.version, "1.1");
        assert_eq!(request.get_header("Host"), Some("a"));
    }

    #[test]
    fn test_parse_bad_line() {
        assert_eq!(
            parse("BADLINE\r\n"),
            Err(MessageError::MissingMethodDelimiter)
        );
    }

    #[test]
    fn test_parse_missing_target_delimiter() {
        assert_eq!(
            parse("GET /index.html\r\n\r\n"),
            Err(MessageError::MissingTargetDelimiter)
        );
    }

    #[test]
    fn test_parse_missing_protocol_delimiter() {
        assert_eq!(
            parse("GET / HTTP1.1\r\n\r\n"),
            Err(MessageError::MissingProtocolDelimiter)
        );
    }

    #[test]
    fn test_parse_invalid_protocol() {
        assert_eq!(
            parse("GET / RTSP/1.0\r\n\r\n"),
            Err(MessageError::InvalidProtocol)
        );
        assert_eq!(
            parse("GET / http/1.1\r\n\r\n"),
            Err(MessageError::InvalidProtocol)
        );
    }

    #[test]
    fn test_parse_missing_version() {
        assert_eq!(
            parse("GET / HTTP/\r\n\r\n"),
            Err(MessageError::MissingVersion)
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), Err(MessageError::Empty));
    }

    #[test]
    fn test_keep_alive() {
        let request = parse("GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(request.is_keep_alive());

        let request = parse("GET / HTTP/1.1\r\nConnection: close\r\n\r\n").unwrap();
        assert!(!request.is_keep_alive());

        let request = parse("GET / HTTP/1.0\r\n\r\n").unwrap();
        assert!(!request.is_keep_alive());

        let request = parse("GET / HTTP/1.0\r\nConnection: Keep-Alive\r\n\r\n").unwrap();
        assert!(request.is_keep_alive());

        let request =
            parse("GET / HTTP/1.0\r\nConnection: keep-alive\r\nConnection: close\r\n\r\n")
                .unwrap();
        assert!(!request.is_keep_alive());
    }

    #[test]
    fn test_split_request_line() {
        assert_eq!(
            split_request_line("OPTIONS * HTTP/1.1"),
            Ok(StartLine {
                method: "OPTIONS",
                path: "*",
                query_string: "",
                version: "1.1",
            })
        );
    }

    #[test]
    fn test_parse_start_line_too_long() {
        let limits = HeaderLimits {
            max_header_line_size: 16,
            ..HeaderLimits::default()
        };
        let mut input: &[u8] = b"GET /a/very/long/path HTTP/1.1\r\n\r\n";
        assert_eq!(
            RequestLine::parse_with_limits(&mut input, &limits),
            Err(MessageError::StartLineTooLong)
        );
    }

    #[test]
    fn test_headers_limit_applies() {
        let limits = HeaderLimits {
            max_headers_count: 1,
            ..HeaderLimits::default()
        };
        let mut input: &[u8] = b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\n\r\n";
        let request = RequestLine::parse_with_limits(&mut input, &limits).unwrap();
        assert_eq!(request.headers.len(), 1);
        assert!(request.has_header("a"));
    }
}
