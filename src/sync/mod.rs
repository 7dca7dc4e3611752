//! 接続 / セッション層で使う同期プリミティブ

mod scope_runner;
mod shared_mutex;

pub use scope_runner::{OwnedScopeGuard, ScopeGuard, ScopeRunner, ScopeState};
pub use shared_mutex::{SharedLock, SharedMutex, UniqueLock};
