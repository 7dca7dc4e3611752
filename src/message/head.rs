//! パース済み開始行とヘッダーに共通する操作

use crate::multimap::CaseInsensitiveMultimap;

/// HTTP ヘッダー操作のための共通トレイト
pub trait HttpHead {
    /// HTTP バージョンを取得 (`HTTP/` を除いた `1.1` など)
    fn version(&self) -> &str;

    /// ヘッダーを取得
    fn headers(&self) -> &CaseInsensitiveMultimap;

    /// ヘッダーを取得 (大文字小文字を区別しない)
    fn get_header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)
    }

    /// 指定した名前のヘッダーをすべて取得
    fn get_headers(&self, name: &str) -> Vec<&str> {
        self.headers().find_all(name).collect()
    }

    /// ヘッダーが存在するか確認
    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    /// Connection ヘッダーの値を取得
    fn connection(&self) -> Option<&str> {
        self.get_header("Connection")
    }

    /// キープアライブ接続かどうかを判定
    ///
    /// 複数の Connection ヘッダーはリストとして結合して処理する。
    /// close トークンがいずれかのヘッダーに存在すれば false を返す。
    fn is_keep_alive(&self) -> bool {
        let mut has_keep_alive = false;

        for conn in self.headers().find_all("Connection") {
            // close トークンがあれば即座に false (close 優先)
            for token in conn.split(',') {
                let token = token.trim();
                if token.eq_ignore_ascii_case("close") {
                    return false;
                }
                if token.eq_ignore_ascii_case("keep-alive") {
                    has_keep_alive = true;
                }
            }
        }

        if has_keep_alive {
            return true;
        }
        self.version() == "1.1"
    }

    /// Content-Length ヘッダーの値を取得
    fn content_length(&self) -> Option<usize> {
        self.get_header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
    }
}
