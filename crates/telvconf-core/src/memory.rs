//! In-process settings store
//!
//! [`MemoryStore`] behaves like vconf for a single process: paths are typed
//! on first write, reads of missing paths fail, and every write notifies the
//! path's listeners. It also counts write calls and can be told to fail
//! writes to chosen paths, which makes it the backend of choice for tests and
//! for hosts that run without a platform store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};
use telvconf_types::{KeyNode, SettingsValue, StoreError, StoreResult, ValueType};

use crate::store::{KeyListener, ListenerId, SettingsStore};

/// Thread-safe in-memory settings store
pub struct MemoryStore {
    values: RwLock<HashMap<String, SettingsValue>>,
    listeners: Mutex<HashMap<String, Vec<(ListenerId, KeyListener)>>>,
    failing: RwLock<HashSet<String>>,
    next_listener: AtomicU64,
    write_calls: AtomicUsize,
    writes_by_path: Mutex<HashMap<String, usize>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            listeners: Mutex::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            next_listener: AtomicU64::new(1),
            write_calls: AtomicUsize::new(0),
            writes_by_path: Mutex::new(HashMap::new()),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a value without counting a write or notifying listeners
    pub fn seed(&self, path: impl Into<String>, value: impl Into<SettingsValue>) {
        self.values.write().insert(path.into(), value.into());
    }

    /// Current value at `path`
    pub fn value(&self, path: &str) -> Option<SettingsValue> {
        self.values.read().get(path).cloned()
    }

    /// Ordered copy of every stored value
    pub fn snapshot(&self) -> BTreeMap<String, SettingsValue> {
        self.values
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Total number of set calls received, failed ones included
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Number of set calls received for `path`
    pub fn writes_to(&self, path: &str) -> usize {
        self.writes_by_path.lock().get(path).copied().unwrap_or(0)
    }

    /// Forget the write counters
    pub fn reset_counters(&self) {
        self.write_calls.store(0, Ordering::SeqCst);
        self.writes_by_path.lock().clear();
    }

    /// Make every later write to `path` fail with a backend error
    pub fn fail_writes_to(&self, path: impl Into<String>) {
        self.failing.write().insert(path.into());
    }

    /// Number of listeners subscribed to `path`
    pub fn listener_count(&self, path: &str) -> usize {
        self.listeners.lock().get(path).map(Vec::len).unwrap_or(0)
    }

    fn read(&self, path: &str, expected: ValueType) -> StoreResult<SettingsValue> {
        let values = self.values.read();
        let value = values.get(path).ok_or_else(|| StoreError::NotFound {
            path: path.to_string(),
        })?;
        if value.value_type() != expected {
            return Err(StoreError::TypeMismatch {
                path: path.to_string(),
                expected,
                actual: value.value_type(),
            });
        }
        Ok(value.clone())
    }

    fn write(&self, path: &str, value: SettingsValue) -> StoreResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .writes_by_path
            .lock()
            .entry(path.to_string())
            .or_insert(0) += 1;

        if self.failing.read().contains(path) {
            return Err(StoreError::Backend(format!("write to {} rejected", path)));
        }

        {
            let mut values = self.values.write();
            if let Some(current) = values.get(path) {
                if current.value_type() != value.value_type() {
                    return Err(StoreError::TypeMismatch {
                        path: path.to_string(),
                        expected: current.value_type(),
                        actual: value.value_type(),
                    });
                }
            }
            values.insert(path.to_string(), value.clone());
        }

        // Listeners run without any store lock held.
        let listeners: Vec<KeyListener> = self
            .listeners
            .lock()
            .get(path)
            .map(|list| list.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default();
        if !listeners.is_empty() {
            let node = KeyNode::new(path, value);
            for listener in listeners {
                listener(&node);
            }
        }
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn get_int(&self, path: &str) -> StoreResult<i32> {
        self.read(path, ValueType::Int)
            .map(|v| v.as_int().unwrap_or_default())
    }

    fn get_bool(&self, path: &str) -> StoreResult<bool> {
        self.read(path, ValueType::Bool)
            .map(|v| v.as_bool().unwrap_or_default())
    }

    fn get_str(&self, path: &str) -> StoreResult<String> {
        self.read(path, ValueType::String)
            .map(|v| v.as_str().unwrap_or_default().to_string())
    }

    fn set_int(&self, path: &str, value: i32) -> StoreResult<()> {
        self.write(path, SettingsValue::Int(value))
    }

    fn set_bool(&self, path: &str, value: bool) -> StoreResult<()> {
        self.write(path, SettingsValue::Bool(value))
    }

    fn set_str(&self, path: &str, value: &str) -> StoreResult<()> {
        self.write(path, SettingsValue::String(value.to_string()))
    }

    fn notify_key_changed(&self, path: &str, listener: KeyListener) -> StoreResult<ListenerId> {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        self.listeners
            .lock()
            .entry(path.to_string())
            .or_default()
            .push((id, listener));
        Ok(id)
    }

    fn ignore_key_changed(&self, path: &str, id: ListenerId) -> StoreResult<()> {
        let mut listeners = self.listeners.lock();
        let list = listeners
            .get_mut(path)
            .ok_or(StoreError::ListenerNotFound {
                path: path.to_string(),
                listener: id.0,
            })?;
        let before = list.len();
        list.retain(|(lid, _)| *lid != id);
        if list.len() == before {
            return Err(StoreError::ListenerNotFound {
                path: path.to_string(),
                listener: id.0,
            });
        }
        if list.is_empty() {
            listeners.remove(path);
        }
        Ok(())
    }
}
