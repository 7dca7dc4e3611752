//! 読み取り優先の共有 / 排他ロック
//!
//! ## 概要
//!
//! ルーティングテーブルのように読み取りが大半を占める状態を守るためのロック。
//!
//! - 読み取り側同士は互いにブロックしない
//! - 書き込み側は読み取り側も書き込み側もいないときだけ取得できる
//! - 書き込み側が待っていても、新しい読み取り側は待たされない
//!
//! 読み取りが途切れない場合、書き込み側は待たされ続ける。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::sync::SharedMutex;
//!
//! let mutex = SharedMutex::new();
//! {
//!     let _r1 = mutex.shared_lock();
//!     let _r2 = mutex.shared_lock();
//! }
//! let _w = mutex.unique_lock();
//! ```

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct State {
    /// 共有ロックを保持している数
    readers: usize,
    /// 排他ロックが保持されているか
    writer: bool,
}

/// 読み取り優先の共有 / 排他ロック
///
/// Mutex と Condvar で実装する。ロックを保持したままパニックしても
/// ガードの `Drop` で解放されるため、ロックが汚染されることはない。
#[derive(Debug, Default)]
pub struct SharedMutex {
    state: Mutex<State>,
    cond: Condvar,
}

impl SharedMutex {
    /// 新しいロックを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 共有ロックを取得
    ///
    /// 排他ロックが保持されている間だけブロックする。
    pub fn shared_lock(&self) -> SharedLock<'_> {
        let mut state = self.state.lock();
        while state.writer {
            self.cond.wait(&mut state);
        }
        state.readers += 1;
        SharedLock { mutex: self }
    }

    /// 排他ロックを取得
    ///
    /// 共有ロックと排他ロックがすべて解放されるまでブロックする。
    pub fn unique_lock(&self) -> UniqueLock<'_> {
        let mut state = self.state.lock();
        while state.writer || state.readers > 0 {
            self.cond.wait(&mut state);
        }
        state.writer = true;
        UniqueLock { mutex: self }
    }

    /// 共有ロックの取得を試みる
    ///
    /// 排他ロックが保持されている場合は `None`。
    pub fn try_shared_lock(&self) -> Option<SharedLock<'_>> {
        let mut state = self.state.lock();
        if state.writer {
            return None;
        }
        state.readers += 1;
        Some(SharedLock { mutex: self })
    }

    /// 排他ロックの取得を試みる
    ///
    /// 共有ロックか排他ロックが保持されている場合は `None`。
    pub fn try_unique_lock(&self) -> Option<UniqueLock<'_>> {
        let mut state = self.state.lock();
        if state.writer || state.readers > 0 {
            return None;
        }
        state.writer = true;
        Some(UniqueLock { mutex: self })
    }

    fn release_shared(&self) {
        let mut state = self.state.lock();
        state.readers -= 1;
        if state.readers == 0 {
            self.cond.notify_all();
        }
    }

    fn release_unique(&self) {
        let mut state = self.state.lock();
        state.writer = false;
        self.cond.notify_all();
    }
}

/// 共有ロックのガード
///
/// 破棄時に共有ロックを解放する。
#[derive(Debug)]
#[must_use = "if unused the lock will immediately unlock"]
pub struct SharedLock<'a> {
    mutex: &'a SharedMutex,
}

impl Drop for SharedLock<'_> {
    fn drop(&mut self) {
        self.mutex.release_shared();
    }
}

/// 排他ロックのガード
///
/// 破棄時に排他ロックを解放する。
#[derive(Debug)]
#[must_use = "if unused the lock will immediately unlock"]
pub struct UniqueLock<'a> {
    mutex: &'a SharedMutex,
}

impl Drop for UniqueLock<'_> {
    fn drop(&mut self) {
        self.mutex.release_unique();
    }
}
