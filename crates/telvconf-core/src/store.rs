//! The seam to the platform key-value settings store
//!
//! Everything the bridge needs from vconf: typed get/set by path and change
//! subscriptions. Persistence and IPC stay behind this trait.

use std::sync::Arc;

use telvconf_types::{KeyNode, SettingsValue, StoreResult};

/// Callback run by the store whenever a subscribed path is written
pub type KeyListener = Arc<dyn Fn(&KeyNode) + Send + Sync>;

/// Identifies one listener registration on one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Platform settings store
///
/// Calls are synchronous. Listeners run on the writer's thread after the
/// write is visible, and the store must not hold internal locks while a
/// listener runs (listeners may write back).
pub trait SettingsStore: Send + Sync {
    fn get_int(&self, path: &str) -> StoreResult<i32>;

    fn get_bool(&self, path: &str) -> StoreResult<bool>;

    fn get_str(&self, path: &str) -> StoreResult<String>;

    fn set_int(&self, path: &str, value: i32) -> StoreResult<()>;

    fn set_bool(&self, path: &str, value: bool) -> StoreResult<()>;

    fn set_str(&self, path: &str, value: &str) -> StoreResult<()>;

    /// Subscribe `listener` to writes on `path`
    fn notify_key_changed(&self, path: &str, listener: KeyListener) -> StoreResult<ListenerId>;

    /// Drop a subscription made by [`notify_key_changed`](Self::notify_key_changed)
    fn ignore_key_changed(&self, path: &str, id: ListenerId) -> StoreResult<()>;

    /// Write a tagged value with the matching typed setter
    fn set_value(&self, path: &str, value: &SettingsValue) -> StoreResult<()> {
        match value {
            SettingsValue::Int(v) => self.set_int(path, *v),
            SettingsValue::Bool(v) => self.set_bool(path, *v),
            SettingsValue::String(v) => self.set_str(path, v),
        }
    }
}
