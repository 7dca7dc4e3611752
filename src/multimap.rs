//! 大文字小文字を区別しないマルチマップ
//!
//! ## 概要
//!
//! ヘッダー名やクエリキーのように ASCII の大文字小文字を区別せずに比較するキーを扱う。
//! 同じキーを複数回挿入でき、既存のエントリーが上書きされることはない。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::CaseInsensitiveMultimap;
//!
//! let mut map = CaseInsensitiveMultimap::new();
//! map.insert("Set-Cookie", "a=1");
//! map.insert("set-cookie", "b=2");
//!
//! assert_eq!(map.get("SET-COOKIE"), Some("a=1"));
//! assert_eq!(map.find_all("Set-Cookie").collect::<Vec<_>>(), vec!["a=1", "b=2"]);
//! ```

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hasher};

/// ASCII の大文字小文字を区別せずに比較
pub fn case_insensitive_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// ASCII の大文字小文字を区別しないハッシュ値
///
/// `case_insensitive_equal(a, b)` なら `case_insensitive_hash(a) == case_insensitive_hash(b)`。
pub fn case_insensitive_hash(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    for b in s.bytes() {
        hasher.write_u8(b.to_ascii_lowercase());
    }
    hasher.write_usize(s.len());
    hasher.finish()
}

/// 大文字小文字を区別しないキーを持つマルチマップ
///
/// エントリーは挿入順に保持される。キー検索はハッシュで候補を絞り込んでから
/// `case_insensitive_equal` で照合する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseInsensitiveMultimap {
    entries: Vec<(String, String)>,
    /// キーのハッシュ値 -> entries のインデックス (挿入順)
    index: HashMap<u64, Vec<usize>>,
}

impl CaseInsensitiveMultimap {
    /// 空のマルチマップを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量を指定して作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// エントリーを追加
    ///
    /// 同じキーが既にあっても上書きせず、常に新しいエントリーとして追加する。
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let pos = self.entries.len();
        self.index
            .entry(case_insensitive_hash(&key))
            .or_default()
            .push(pos);
        self.entries.push((key, value.into()));
    }

    /// 指定したキーの値をすべて挿入順に取得
    pub fn find_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.index
            .get(&case_insensitive_hash(key))
            .into_iter()
            .flatten()
            .map(|&pos| &self.entries[pos])
            .filter(move |(k, _)| case_insensitive_equal(k, key))
            .map(|(_, v)| v.as_str())
    }

    /// 指定したキーの最初の値を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.find_all(key).next()
    }

    /// キーが存在するか確認
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 指定したキーのエントリー数
    pub fn count(&self, key: &str) -> usize {
        self.find_all(key).count()
    }

    /// エントリー数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// すべてのエントリーを削除
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// エントリーを挿入順に走査
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// [`CaseInsensitiveMultimap::iter`] のイテレーター
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a CaseInsensitiveMultimap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CaseInsensitiveMultimap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for CaseInsensitiveMultimap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CaseInsensitiveMultimap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = CaseInsensitiveMultimap::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_never_overwrites() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("Accept", "text/html");
        map.insert("accept", "application/json");
        assert_eq!(map.len(), 2);
        assert_eq!(map.count("ACCEPT"), 2);
    }

    #[test]
    fn test_find_all_keeps_insertion_order() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("X-A", "1");
        map.insert("Other", "x");
        map.insert("x-a", "2");
        map.insert("X-a", "3");
        let values: Vec<_> = map.find_all("x-A").collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let map: CaseInsensitiveMultimap = [("Content-Type", "text/plain")].into_iter().collect();
        assert_eq!(map.get("content-type"), Some("text/plain"));
        assert_eq!(map.get("CONTENT-TYPE"), Some("text/plain"));
        assert!(map.contains_key("Content-type"));
        assert!(!map.contains_key("Content-Length"));
        assert_eq!(map.get("Content-Length"), None);
    }

    #[test]
    fn test_values_outlive_lookup_key() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("Host", "example.com");
        map.insert("Accept", "a");
        map.insert("accept", "b");

        // 検索キーを破棄した後も値を使える
        let host = {
            let key = String::from("HOST");
            map.get(&key)
        };
        let accepts: Vec<&str> = {
            let key = "ACCEPT".to_string();
            map.find_all(&key).collect()
        };
        assert_eq!(host, Some("example.com"));
        assert_eq!(accepts, vec!["a", "b"]);
    }

    #[test]
    fn test_prefix_is_not_match() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("Host", "example.com");
        assert_eq!(map.get("Hos"), None);
        assert_eq!(map.get("Hosts"), None);
    }

    #[test]
    fn test_iter_and_into_iter() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        let borrowed: Vec<_> = map.iter().collect();
        assert_eq!(borrowed, vec![("a", "1"), ("b", "2")]);
        assert_eq!(map.iter().len(), 2);

        let owned: Vec<_> = map.into_iter().collect();
        assert_eq!(
            owned,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_clear() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("a", "1");
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get("a"), None);
        map.insert("A", "2");
        assert_eq!(map.get("a"), Some("2"));
    }

    #[test]
    fn test_hash_folds_ascii_case() {
        assert_eq!(
            case_insensitive_hash("Content-Length"),
            case_insensitive_hash("CONTENT-length")
        );
        assert!(case_insensitive_equal("ETag", "etag"));
        assert!(!case_insensitive_equal("ETag", "etags"));
    }

    #[test]
    fn test_non_ascii_keys_compare_exactly() {
        let mut map = CaseInsensitiveMultimap::new();
        map.insert("ÄB", "1");
        assert_eq!(map.get("Äb"), Some("1"));
        assert_eq!(map.get("äb"), None);
    }
}
