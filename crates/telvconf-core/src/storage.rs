//! Storage Adapter - the vconf backend of the telephony core's storage layer
//!
//! [`StorageOps`] is the capability set the telephony core consumes for any
//! storage backend; its methods follow the core's contract (`bool` results,
//! sentinel reads) and never fail loudly. [`VconfStorage`] implements it on
//! top of a [`SettingsStore`], with `try_*` inherent methods that expose the
//! underlying [`BridgeResult`].
//!
//! # Change dispatch
//!
//! Each adapter owns a registry mapping a subscribed path to its callbacks.
//! The first callback on a path installs one store listener; the listener
//! translates the changed path back to a [`StorageKey`] and runs every
//! callback registered for it, once per change.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use telvconf_types::{
    BridgeError, BridgeResult, KeyNode, SettingsValue, StorageKey, ValueType,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::keymap::KeyMap;
use crate::store::{KeyListener, ListenerId, SettingsStore};

/// Backend name the adapter registers under
pub const VCONF_STORAGE_NAME: &str = "vconf";

/// Identity of one adapter instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdapterId(pub Uuid);

impl AdapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AdapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AdapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Adapter-local bookkeeping handed out by `create_handle`
///
/// vconf has no per-path backend handle; this only satisfies the storage
/// interface shared with other backends.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StorageHandle {
    id: Uuid,
    path: String,
}

impl StorageHandle {
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Identifies one callback registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(pub u64);

/// An external change to a subscribed key
#[derive(Debug, Clone, PartialEq)]
pub struct StorageEvent {
    pub adapter: AdapterId,
    pub key: StorageKey,
    pub value: SettingsValue,
}

/// Callback run on external changes to a subscribed key
pub type StorageCallback = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

/// Storage backend capability set consumed by the telephony core
///
/// Reads of unmapped or mistyped keys return sentinels (`-1`, `false`,
/// `None`); writes and registrations return `false`. Store failures are
/// logged and reported the same way.
pub trait StorageOps: Send + Sync {
    /// Backend name used for registry lookups
    fn name(&self) -> &str;

    fn create_handle(&self, path: &str) -> Option<StorageHandle>;

    fn remove_handle(&self, handle: StorageHandle) -> bool;

    fn get_int(&self, key: StorageKey) -> i32;

    fn get_bool(&self, key: StorageKey) -> bool;

    fn get_string(&self, key: StorageKey) -> Option<String>;

    fn set_int(&self, key: StorageKey, value: i32) -> bool;

    fn set_bool(&self, key: StorageKey, value: bool) -> bool;

    fn set_string(&self, key: StorageKey, value: &str) -> bool;

    fn set_key_callback(&self, key: StorageKey, callback: StorageCallback) -> bool;

    fn remove_key_callback(&self, key: StorageKey) -> bool;
}

struct Route {
    listener: ListenerId,
    callbacks: Vec<(CallbackId, StorageCallback)>,
}

/// Path → callbacks registry shared with the store listeners
struct Dispatch {
    adapter: AdapterId,
    keymap: Arc<KeyMap>,
    routes: RwLock<HashMap<&'static str, Route>>,
}

impl Dispatch {
    fn on_key_changed(&self, node: &KeyNode) {
        let key = match self.keymap.resolve_path(&node.name) {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "Dropping settings change");
                return;
            }
        };

        let callbacks: Vec<StorageCallback> = match self.routes.read().get(node.name.as_str()) {
            Some(route) => route.callbacks.iter().map(|(_, cb)| cb.clone()).collect(),
            None => return,
        };

        let event = StorageEvent {
            adapter: self.adapter,
            key,
            value: node.value.clone(),
        };
        debug!(
            adapter = %self.adapter,
            key = %key,
            value = %event.value,
            callbacks = callbacks.len(),
            "Dispatching settings change"
        );
        for callback in callbacks {
            callback(&event);
        }
    }
}

/// vconf storage adapter
pub struct VconfStorage {
    name: String,
    keymap: Arc<KeyMap>,
    store: Arc<dyn SettingsStore>,
    dispatch: Arc<Dispatch>,
    handles: Mutex<HashSet<Uuid>>,
    next_callback: AtomicU64,
}

impl VconfStorage {
    /// Adapter over `store` using the standard mapping table
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_keymap(VCONF_STORAGE_NAME, Arc::new(KeyMap::standard()), store)
    }

    /// Adapter with an injected name and mapping table
    pub fn with_keymap(
        name: impl Into<String>,
        keymap: Arc<KeyMap>,
        store: Arc<dyn SettingsStore>,
    ) -> Self {
        let dispatch = Arc::new(Dispatch {
            adapter: AdapterId::new(),
            keymap: keymap.clone(),
            routes: RwLock::new(HashMap::new()),
        });
        Self {
            name: name.into(),
            keymap,
            store,
            dispatch,
            handles: Mutex::new(HashSet::new()),
            next_callback: AtomicU64::new(1),
        }
    }

    pub fn id(&self) -> AdapterId {
        self.dispatch.adapter
    }

    pub fn try_get_int(&self, key: StorageKey) -> BridgeResult<i32> {
        let path = self.keymap.resolve(key, ValueType::Int)?;
        Ok(self.store.get_int(path)?)
    }

    pub fn try_get_bool(&self, key: StorageKey) -> BridgeResult<bool> {
        let path = self.keymap.resolve(key, ValueType::Bool)?;
        Ok(self.store.get_bool(path)?)
    }

    pub fn try_get_string(&self, key: StorageKey) -> BridgeResult<String> {
        let path = self.keymap.resolve(key, ValueType::String)?;
        Ok(self.store.get_str(path)?)
    }

    pub fn try_set_int(&self, key: StorageKey, value: i32) -> BridgeResult<()> {
        let path = self.keymap.resolve(key, ValueType::Int)?;
        Ok(self.store.set_int(path, value)?)
    }

    pub fn try_set_bool(&self, key: StorageKey, value: bool) -> BridgeResult<()> {
        let path = self.keymap.resolve(key, ValueType::Bool)?;
        Ok(self.store.set_bool(path, value)?)
    }

    pub fn try_set_string(&self, key: StorageKey, value: &str) -> BridgeResult<()> {
        let path = self.keymap.resolve(key, ValueType::String)?;
        Ok(self.store.set_str(path, value)?)
    }

    /// Register `callback` for external changes to `key`
    ///
    /// The first callback on a key subscribes to the store; later ones join
    /// the same subscription.
    pub fn subscribe(&self, key: StorageKey, callback: StorageCallback) -> BridgeResult<CallbackId> {
        let path = self
            .keymap
            .to_external_path(key)
            .ok_or(BridgeError::UnmappedKey { key })?;
        let id = CallbackId(self.next_callback.fetch_add(1, Ordering::SeqCst));

        let mut routes = self.dispatch.routes.write();
        if let Some(route) = routes.get_mut(path) {
            route.callbacks.push((id, callback));
            return Ok(id);
        }

        let weak: Weak<Dispatch> = Arc::downgrade(&self.dispatch);
        let listener: KeyListener = Arc::new(move |node: &KeyNode| {
            if let Some(dispatch) = weak.upgrade() {
                dispatch.on_key_changed(node);
            }
        });
        let listener = self.store.notify_key_changed(path, listener)?;
        debug!(key = %key, path, %listener, "Subscribed to settings changes");
        routes.insert(
            path,
            Route {
                listener,
                callbacks: vec![(id, callback)],
            },
        );
        Ok(id)
    }

    /// Drop every callback on `key` and its store subscription
    ///
    /// Returns how many callbacks were removed.
    pub fn unsubscribe(&self, key: StorageKey) -> BridgeResult<usize> {
        let path = self
            .keymap
            .to_external_path(key)
            .ok_or(BridgeError::UnmappedKey { key })?;
        let Some(route) = self.dispatch.routes.write().remove(path) else {
            return Ok(0);
        };
        self.store.ignore_key_changed(path, route.listener)?;
        debug!(key = %key, path, "Unsubscribed from settings changes");
        Ok(route.callbacks.len())
    }

    /// Drop a single callback, unsubscribing the key when it was the last
    pub fn remove_callback(&self, key: StorageKey, id: CallbackId) -> BridgeResult<bool> {
        let path = self
            .keymap
            .to_external_path(key)
            .ok_or(BridgeError::UnmappedKey { key })?;
        let emptied = {
            let mut routes = self.dispatch.routes.write();
            let Some(route) = routes.get_mut(path) else {
                return Ok(false);
            };
            let before = route.callbacks.len();
            route.callbacks.retain(|(cid, _)| *cid != id);
            if route.callbacks.len() == before {
                return Ok(false);
            }
            if route.callbacks.is_empty() {
                routes.remove(path)
            } else {
                None
            }
        };
        if let Some(route) = emptied {
            self.store.ignore_key_changed(path, route.listener)?;
        }
        Ok(true)
    }

    /// Number of callbacks registered for `key`
    pub fn callback_count(&self, key: StorageKey) -> usize {
        self.keymap
            .to_external_path(key)
            .and_then(|path| self.dispatch.routes.read().get(path).map(|r| r.callbacks.len()))
            .unwrap_or(0)
    }

    fn clear_subscriptions(&self) {
        let routes: Vec<(&'static str, Route)> = self.dispatch.routes.write().drain().collect();
        for (path, route) in routes {
            if let Err(e) = self.store.ignore_key_changed(path, route.listener) {
                warn!(path, error = %e, "Failed to drop settings subscription");
            }
        }
    }
}

impl Drop for VconfStorage {
    fn drop(&mut self) {
        self.clear_subscriptions();
    }
}

impl StorageOps for VconfStorage {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_handle(&self, path: &str) -> Option<StorageHandle> {
        let handle = StorageHandle {
            id: Uuid::new_v4(),
            path: path.to_string(),
        };
        self.handles.lock().insert(handle.id);
        Some(handle)
    }

    fn remove_handle(&self, handle: StorageHandle) -> bool {
        if self.handles.lock().remove(&handle.id) {
            return true;
        }
        let err = BridgeError::InvalidHandle {
            handle: handle.id.to_string(),
        };
        warn!(error = %err, "remove_handle failed");
        false
    }

    fn get_int(&self, key: StorageKey) -> i32 {
        self.try_get_int(key).unwrap_or_else(|e| {
            debug!(key = %key, error = %e, "get_int fell back to sentinel");
            -1
        })
    }

    fn get_bool(&self, key: StorageKey) -> bool {
        self.try_get_bool(key).unwrap_or_else(|e| {
            debug!(key = %key, error = %e, "get_bool fell back to sentinel");
            false
        })
    }

    fn get_string(&self, key: StorageKey) -> Option<String> {
        self.try_get_string(key)
            .map_err(|e| debug!(key = %key, error = %e, "get_string fell back to sentinel"))
            .ok()
    }

    fn set_int(&self, key: StorageKey, value: i32) -> bool {
        report("set_int", key, self.try_set_int(key, value))
    }

    fn set_bool(&self, key: StorageKey, value: bool) -> bool {
        report("set_bool", key, self.try_set_bool(key, value))
    }

    fn set_string(&self, key: StorageKey, value: &str) -> bool {
        report("set_string", key, self.try_set_string(key, value))
    }

    fn set_key_callback(&self, key: StorageKey, callback: StorageCallback) -> bool {
        report("set_key_callback", key, self.subscribe(key, callback).map(|_| ()))
    }

    fn remove_key_callback(&self, key: StorageKey) -> bool {
        report("remove_key_callback", key, self.unsubscribe(key).map(|_| ()))
    }
}

fn report(op: &str, key: StorageKey, result: BridgeResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e @ BridgeError::Store(_)) => {
            warn!(op, key = %key, error = %e, "Settings store call failed");
            false
        }
        Err(e) => {
            debug!(op, key = %key, error = %e, "Storage operation rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::paths;

    fn adapter() -> (Arc<MemoryStore>, VconfStorage) {
        let store = Arc::new(MemoryStore::new());
        let storage = VconfStorage::new(store.clone());
        (store, storage)
    }

    #[test]
    fn test_get_reads_mapped_path() {
        let (store, storage) = adapter();
        store.seed(paths::TELEPHONY_PLMN, 45005);
        store.seed(paths::TELEPHONY_NWNAME, "Carrier");
        store.seed(paths::TELEPHONY_FLIGHT_MODE, true);

        assert_eq!(storage.get_int(StorageKey::TelephonyPlmn), 45005);
        assert_eq!(
            storage.get_string(StorageKey::TelephonyNwName),
            Some("Carrier".to_string())
        );
        assert!(storage.get_bool(StorageKey::FlightModeBool));
    }

    #[test]
    fn test_sentinels_on_miss() {
        let (_store, storage) = adapter();
        // mapped but never written
        assert_eq!(storage.get_int(StorageKey::TelephonyLac), -1);
        assert!(!storage.get_bool(StorageKey::TelephonyReady));
        assert_eq!(storage.get_string(StorageKey::TelephonySpnName), None);
        // wrong type
        assert_eq!(storage.get_int(StorageKey::FlightModeBool), -1);
    }

    #[test]
    fn test_type_guard_skips_backend() {
        let (store, storage) = adapter();
        assert!(!storage.set_int(StorageKey::FlightModeBool, 1));
        assert!(!storage.set_bool(StorageKey::TelephonyPlmn, true));
        assert!(!storage.set_string(StorageKey::TelephonyLac, "1"));
        assert_eq!(store.write_calls(), 0);
    }

    #[test]
    fn test_setters_propagate_store_result() {
        let (store, storage) = adapter();
        assert!(storage.set_int(StorageKey::TelephonyCellId, 77));
        assert!(storage.set_bool(StorageKey::FlightModeBool, true));
        assert!(storage.set_string(StorageKey::TelephonyNwName, "A"));
        assert_eq!(store.write_calls(), 3);

        store.fail_writes_to(paths::TELEPHONY_NWNAME);
        store.fail_writes_to(paths::TELEPHONY_FLIGHT_MODE);
        assert!(!storage.set_string(StorageKey::TelephonyNwName, "B"));
        assert!(!storage.set_bool(StorageKey::FlightModeBool, false));
    }

    #[test]
    fn test_handles_are_owned() {
        let (_store, storage) = adapter();
        let handle = storage.create_handle("memory/telephony").unwrap();
        assert_eq!(handle.path(), "memory/telephony");
        assert!(storage.remove_handle(handle));

        let (_other_store, other) = adapter();
        let foreign = other.create_handle("x").unwrap();
        assert!(!storage.remove_handle(foreign));
    }

    #[test]
    fn test_one_store_listener_per_path() {
        let (store, storage) = adapter();
        let noop: StorageCallback = Arc::new(|_e: &StorageEvent| {});
        assert!(storage.set_key_callback(StorageKey::TelephonyPlmn, noop.clone()));
        assert!(storage.set_key_callback(StorageKey::TelephonyPlmn, noop));
        assert_eq!(store.listener_count(paths::TELEPHONY_PLMN), 1);
        assert_eq!(storage.callback_count(StorageKey::TelephonyPlmn), 2);

        assert!(storage.remove_key_callback(StorageKey::TelephonyPlmn));
        assert_eq!(store.listener_count(paths::TELEPHONY_PLMN), 0);
        assert_eq!(storage.callback_count(StorageKey::TelephonyPlmn), 0);
    }

    #[cfg(not(feature = "prepaid-sim-apn"))]
    #[test]
    fn test_unmapped_key_callback_rejected() {
        let (_store, storage) = adapter();
        let noop: StorageCallback = Arc::new(|_e: &StorageEvent| {});
        assert!(!storage.set_key_callback(StorageKey::PdpLastConnectedContextBool, noop));
        assert!(!storage.remove_key_callback(StorageKey::PdpLastConnectedContextBool));
    }

    #[test]
    fn test_remove_single_callback() {
        let (store, storage) = adapter();
        let noop: StorageCallback = Arc::new(|_e: &StorageEvent| {});
        let a = storage.subscribe(StorageKey::TelephonyRssi, noop.clone()).unwrap();
        let b = storage.subscribe(StorageKey::TelephonyRssi, noop).unwrap();

        assert!(storage.remove_callback(StorageKey::TelephonyRssi, a).unwrap());
        assert!(!storage.remove_callback(StorageKey::TelephonyRssi, a).unwrap());
        assert_eq!(store.listener_count(paths::TELEPHONY_RSSI), 1);

        assert!(storage.remove_callback(StorageKey::TelephonyRssi, b).unwrap());
        assert_eq!(store.listener_count(paths::TELEPHONY_RSSI), 0);
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let store = Arc::new(MemoryStore::new());
        {
            let storage = VconfStorage::new(store.clone());
            let noop: StorageCallback = Arc::new(|_e: &StorageEvent| {});
            storage.subscribe(StorageKey::TelephonyReady, noop).unwrap();
            assert_eq!(store.listener_count(paths::TELEPHONY_READY), 1);
        }
        assert_eq!(store.listener_count(paths::TELEPHONY_READY), 0);
    }
}
