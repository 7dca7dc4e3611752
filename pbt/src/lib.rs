//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// トークン生成 (RFC 9110 tchar の一部)
// ========================================

/// トークン文字
pub fn token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
    ]
}

/// トークン (1 文字以上 max_len 文字以下)
pub fn token_string(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(token_char(), 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

// ========================================
// ヘッダー値生成
// ========================================

/// ヘッダー値 (VCHAR と SP、先頭は VCHAR)
///
/// 先頭の空白は `:` の直後の空白と区別できないため含めない。
pub fn header_value() -> impl Strategy<Value = String> {
    (
        prop::char::range('!', '~'),
        proptest::collection::vec(
            prop_oneof![prop::char::range('!', '~'), Just(' ')],
            0..=48,
        ),
    )
        .prop_map(|(first, rest)| std::iter::once(first).chain(rest).collect())
}

// ========================================
// 任意テキスト生成
// ========================================

/// ASCII 以外も含む任意の文字列
pub fn any_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), 0..=64).prop_map(|chars| chars.into_iter().collect())
}

/// 予約文字と空白を含む ASCII 印字可能文字列
pub fn ascii_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range(' ', '~'), 0..=64)
        .prop_map(|chars| chars.into_iter().collect())
}
