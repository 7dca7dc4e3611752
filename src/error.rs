use std::fmt;

/// リクエスト行 / ステータス行のパースエラー
///
/// 開始行が文法に合わない場合に返す。ヘッダー行の不正はエラーにせず読み飛ばす。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    /// 開始行がない (入力が空)
    Empty,
    /// 開始行が長すぎる
    StartLineTooLong,
    /// メソッドの後に空白がない
    MissingMethodDelimiter,
    /// リクエストターゲットの後に空白がない
    MissingTargetDelimiter,
    /// プロトコルとバージョンを区切る `/` がない
    MissingProtocolDelimiter,
    /// プロトコルが `HTTP` ではない
    InvalidProtocol,
    /// バージョンが空
    MissingVersion,
    /// バージョンの後に空白がない
    MissingVersionDelimiter,
    /// 空白より前が 5 文字未満 (`HTTP/` を含められない)
    VersionTooShort,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::Empty => write!(f, "empty start line"),
            MessageError::StartLineTooLong => write!(f, "start line too long"),
            MessageError::MissingMethodDelimiter => {
                write!(f, "missing space after method")
            }
            MessageError::MissingTargetDelimiter => {
                write!(f, "missing space after request target")
            }
            MessageError::MissingProtocolDelimiter => {
                write!(f, "missing '/' between protocol and version")
            }
            MessageError::InvalidProtocol => write!(f, "protocol is not HTTP"),
            MessageError::MissingVersion => write!(f, "missing HTTP version"),
            MessageError::MissingVersionDelimiter => {
                write!(f, "missing space after HTTP version")
            }
            MessageError::VersionTooShort => {
                write!(f, "HTTP version token too short")
            }
        }
    }
}

impl std::error::Error for MessageError {}
