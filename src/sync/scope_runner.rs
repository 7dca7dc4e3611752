//! 実行中のハンドラーを待ってから以降の実行を打ち切るためのスコープ管理
//!
//! ## 概要
//!
//! 非同期ランタイム自体を止めずに、ハンドラーの実行だけをキャンセルするために使う。
//!
//! - ハンドラーは処理の前に [`ScopeRunner::try_enter`] でガードを取得し、
//!   取得できなければ処理を打ち切る
//! - シャットダウン時は [`ScopeRunner::stop`] を呼ぶ。すでに取得されたガードが
//!   すべて解放されるまで待ち、以降の `try_enter` はすべて失敗する
//!
//! 状態は 1 つのアトミック変数で表し、ロックを使わない。
//!
//! ## 使い方
//!
//! ```rust
//! use http11_utility::sync::ScopeRunner;
//!
//! let runner = ScopeRunner::new();
//! if let Some(_guard) = runner.try_enter() {
//!     // ハンドラーを実行
//! }
//! runner.stop();
//! assert!(runner.try_enter().is_none());
//! ```

use std::hint;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use crate::log;

/// `Stopped` を表す値
const STOPPED: u32 = u32::MAX;

/// スピンヒントだけで待つ回数の上限 (2 のべき乗で増やす)
const SPIN_LIMIT: u32 = 6;

/// スコープの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// 実行中のスコープ数
    Active(u32),
    /// 停止済み。以降は変化しない
    Stopped,
}

impl ScopeState {
    fn from_raw(raw: u32) -> Self {
        if raw == STOPPED {
            ScopeState::Stopped
        } else {
            ScopeState::Active(raw)
        }
    }

    fn into_raw(self) -> u32 {
        match self {
            ScopeState::Active(count) => count,
            ScopeState::Stopped => STOPPED,
        }
    }
}

/// 待ち時間に応じてスピンとスレッドの譲渡を切り替える
#[derive(Debug, Default)]
struct Backoff {
    step: u32,
}

impl Backoff {
    fn snooze(&mut self) {
        if self.step < SPIN_LIMIT {
            for _ in 0..(1u32 << self.step) {
                hint::spin_loop();
            }
            self.step += 1;
        } else {
            thread::yield_now();
        }
    }
}

/// キャンセル可能なスコープの管理
#[derive(Debug)]
pub struct ScopeRunner {
    state: AtomicU32,
}

impl Default for ScopeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeRunner {
    /// 新しい ScopeRunner を作成
    pub const fn new() -> Self {
        Self {
            state: AtomicU32::new(0),
        }
    }

    /// 現在の状態を取得
    pub fn state(&self) -> ScopeState {
        ScopeState::from_raw(self.state.load(Ordering::Acquire))
    }

    /// 停止済みかどうか
    pub fn is_stopped(&self) -> bool {
        self.state() == ScopeState::Stopped
    }

    /// 実行中のスコープ数 (停止済みなら 0)
    pub fn active_count(&self) -> u32 {
        match self.state() {
            ScopeState::Active(count) => count,
            ScopeState::Stopped => 0,
        }
    }

    /// カウントを 1 増やす。停止済みなら false
    fn increment(&self) -> bool {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let next = match ScopeState::from_raw(current) {
                ScopeState::Stopped => {
                    log::trace!("scope runner stopped, refuse to enter");
                    return false;
                }
                // STOPPED と衝突する値にはしない
                ScopeState::Active(count) if count + 1 == STOPPED => {
                    log::warning!("scope runner reached the maximum active count");
                    return false;
                }
                ScopeState::Active(count) => ScopeState::Active(count + 1),
            };
            match self.state.compare_exchange_weak(
                current,
                next.into_raw(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => {
                    current = actual;
                    hint::spin_loop();
                }
            }
        }
    }

    fn decrement(&self) {
        self.state.fetch_sub(1, Ordering::AcqRel);
    }

    /// スコープに入る
    ///
    /// 停止済みなら `None` を返す。呼び出し側は処理を打ち切ること。
    /// ガードを破棄するとスコープから出る。
    pub fn try_enter(&self) -> Option<ScopeGuard<'_>> {
        self.increment().then(|| ScopeGuard { runner: self })
    }

    /// スコープに入る (`Arc` 版)
    ///
    /// ガードが `'static` になるため、`.await` をまたいだりスレッドに渡したりできる。
    pub fn try_enter_owned(self: &Arc<Self>) -> Option<OwnedScopeGuard> {
        self.increment().then(|| OwnedScopeGuard {
            runner: Arc::clone(self),
        })
    }

    /// 実行中のスコープがすべて終わるまで待ち、以降のスコープを拒否する
    ///
    /// すでに停止済みならすぐに戻る。戻った後の `try_enter` は必ず `None` を返す。
    pub fn stop(&self) {
        let mut backoff = Backoff::default();
        let mut waited = false;
        loop {
            match self
                .state
                .compare_exchange_weak(0, STOPPED, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => break,
                Err(STOPPED) => return,
                Err(_active) => {
                    if !waited {
                        log::debug!("scope runner waiting for {_active} active scopes");
                        waited = true;
                    }
                    backoff.snooze();
                }
            }
        }
        log::debug!("scope runner stopped");
    }
}

/// [`ScopeRunner::try_enter`] のガード
#[derive(Debug)]
#[must_use = "if unused the scope will immediately exit"]
pub struct ScopeGuard<'a> {
    runner: &'a ScopeRunner,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.runner.decrement();
    }
}

/// [`ScopeRunner::try_enter_owned`] のガード
#[derive(Debug)]
#[must_use = "if unused the scope will immediately exit"]
pub struct OwnedScopeGuard {
    runner: Arc<ScopeRunner>,
}

impl Drop for OwnedScopeGuard {
    fn drop(&mut self) {
        self.runner.decrement();
    }
}
