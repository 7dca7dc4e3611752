//! クエリ文字列 / フォーム値用パーセントエンコーディング
//!
//! ## 概要
//!
//! `application/x-www-form-urlencoded` 形式の値を対象にした簡易なパーセントエンコーディング。
//! RFC 3986 の unreserved 以外をすべてエスケープするのではなく、
//! クエリ文字列の区切りとして意味を持つ予約文字だけをエスケープする。
//!
//! - エンコード: 空白は `+`、予約文字 `! # $ % & ' ( ) * + , / : ; = ? @ [ ]` は `%XX`
//! - デコード: `%XX` はバイトに、`+` は空白に戻す。それ以外はそのまま
//!
//! デコードは失敗しない。不完全な `%` エスケープは文字列のまま残す。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::percent::{percent_decode, percent_encode};
//!
//! assert_eq!(percent_encode("a b&c"), "a+b%26c");
//! assert_eq!(percent_decode("a+b%26c"), "a b&c");
//! assert_eq!(percent_decode("a%2"), "a%2");
//! ```

/// エスケープ対象の予約文字
fn is_reserved(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b'/'
            | b':'
            | b';'
            | b'='
            | b'?'
            | b'@'
            | b'['
            | b']'
    )
}

fn to_hex_char(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'A' + nibble - 10) as char,
        _ => unreachable!(),
    }
}

fn from_hex_char(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// パーセントエンコーディング
///
/// 空白は `+` に、予約文字は大文字 16 進の `%XX` に変換する。
/// 非 ASCII の UTF-8 バイト列はそのまま残す。
///
/// # 例
///
/// ```rust
/// use http11_utility::percent::percent_encode;
///
/// assert_eq!(percent_encode(" "), "+");
/// assert_eq!(percent_encode("100%"), "100%25");
/// assert_eq!(percent_encode("key=value"), "key%3Dvalue");
/// assert_eq!(percent_encode("日本"), "日本");
/// ```
pub fn percent_encode(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        if c == ' ' {
            result.push('+');
        } else if c.is_ascii() && is_reserved(c as u8) {
            let byte = c as u8;
            result.push('%');
            result.push(to_hex_char(byte >> 4));
            result.push(to_hex_char(byte & 0x0F));
        } else {
            result.push(c);
        }
    }
    result
}

/// パーセントデコーディング (バイト列として)
///
/// `%` の後に 16 進数 2 桁が続く場合のみバイトに変換する。
/// それ以外の `%` は文字どおり残す。`+` は空白になる。
pub fn percent_decode_bytes(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escaped = bytes
                    .get(i + 1..i + 3)
                    .and_then(|hex| Some((from_hex_char(hex[0])? << 4) | from_hex_char(hex[1])?));
                match escaped {
                    Some(byte) => {
                        result.push(byte);
                        i += 3;
                    }
                    None => {
                        result.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                result.push(b' ');
                i += 1;
            }
            b => {
                result.push(b);
                i += 1;
            }
        }
    }

    result
}

/// パーセントデコーディング
///
/// デコード結果が UTF-8 として不正な場合、その部分は U+FFFD に置き換える。
///
/// # 例
///
/// ```rust
/// use http11_utility::percent::percent_decode;
///
/// assert_eq!(percent_decode("a%20b"), "a b");
/// assert_eq!(percent_decode("a+b"), "a b");
/// assert_eq!(percent_decode("%E6%97%A5"), "日");
/// assert_eq!(percent_decode("50%"), "50%");
/// ```
pub fn percent_decode(input: &str) -> String {
    let bytes = percent_decode_bytes(input);
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
