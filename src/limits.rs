/// ヘッダーブロックパースの制限設定
///
/// [`HttpHeader::parse`](crate::HttpHeader::parse) などの制限なし API は
/// [`HeaderLimits::unlimited`] を使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLimits {
    /// 最大ヘッダー数 (デフォルト: 100)
    ///
    /// 到達した時点でパースを打ち切り、それまでのヘッダーを返す。
    pub max_headers_count: usize,
    /// 最大ヘッダー行長 (デフォルト: 8KB)
    ///
    /// 行終端を含むバイト数。超過した行でパースを打ち切る。
    pub max_header_line_size: usize,
}

impl Default for HeaderLimits {
    fn default() -> Self {
        Self {
            max_headers_count: 100,
            max_header_line_size: 8 * 1024, // 8KB
        }
    }
}

impl HeaderLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_headers_count: usize::MAX,
            max_header_line_size: usize::MAX,
        }
    }
}
