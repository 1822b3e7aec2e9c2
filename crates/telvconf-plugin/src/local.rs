//! In-process host
//!
//! [`LocalHost`] wires a notification bus, a storage registry and a set of
//! simulated modems around a [`MemoryStore`]. Notifications are delivered
//! synchronously on the caller's thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use telvconf_core::{MemoryStore, SettingsStore, StorageOps};
use telvconf_types::{BridgeError, BridgeResult};
use tracing::{debug, info};

use crate::host::{
    HookFn, HookId, NetworkAccess, NetworkSnapshot, NotificationBus, PluginHost, StorageRegistry,
};
use crate::notification::{CoreObject, HookReturn, NotificationCommand, NotificationData};

// =============================================================================
// Notification bus
// =============================================================================

/// Bus delivering notifications to hooks in registration order
pub struct LocalBus {
    hooks: RwLock<Vec<(HookId, NotificationCommand, HookFn)>>,
    next_id: AtomicU64,
}

impl Default for LocalBus {
    fn default() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl LocalBus {
    /// Deliver a notification; stops at the first hook asking to
    pub fn emit(
        &self,
        source: &CoreObject,
        command: NotificationCommand,
        data: Option<&NotificationData>,
    ) -> HookReturn {
        let hooks: Vec<HookFn> = self
            .hooks
            .read()
            .iter()
            .filter(|(_, cmd, _)| *cmd == command)
            .map(|(_, _, hook)| hook.clone())
            .collect();

        for hook in hooks {
            if hook(source, command, data) == HookReturn::StopPropagation {
                return HookReturn::StopPropagation;
            }
        }
        HookReturn::Continue
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }
}

impl NotificationBus for LocalBus {
    fn add_notification_hook(&self, command: NotificationCommand, hook: HookFn) -> HookId {
        let id = HookId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.hooks.write().push((id, command, hook));
        id
    }

    fn remove_notification_hook(&self, id: HookId) -> bool {
        let mut hooks = self.hooks.write();
        let before = hooks.len();
        hooks.retain(|(hid, _, _)| *hid != id);
        hooks.len() != before
    }
}

// =============================================================================
// Storage registry
// =============================================================================

#[derive(Default)]
pub struct LocalRegistry {
    storages: RwLock<HashMap<String, Arc<dyn StorageOps>>>,
}

impl StorageRegistry for LocalRegistry {
    fn register_storage(&self, storage: Arc<dyn StorageOps>) -> BridgeResult<()> {
        let name = storage.name().to_string();
        let mut storages = self.storages.write();
        if storages.contains_key(&name) {
            return Err(BridgeError::StorageExists { name });
        }
        info!(storage = %name, "Storage registered");
        storages.insert(name, storage);
        Ok(())
    }

    fn find_storage(&self, name: &str) -> Option<Arc<dyn StorageOps>> {
        self.storages.read().get(name).cloned()
    }

    fn unregister_storage(&self, name: &str) -> Option<Arc<dyn StorageOps>> {
        let removed = self.storages.write().remove(name);
        if removed.is_some() {
            info!(storage = %name, "Storage unregistered");
        }
        removed
    }
}

// =============================================================================
// Simulated modems
// =============================================================================

#[derive(Default)]
struct Modem {
    cp_name: String,
    network: Option<NetworkSnapshot>,
}

/// Modems keyed by the plugin that owns them
#[derive(Default)]
pub struct LocalNetwork {
    modems: RwLock<HashMap<String, Modem>>,
}

impl LocalNetwork {
    pub fn attach_modem(&self, plugin: impl Into<String>, cp_name: impl Into<String>) {
        let plugin = plugin.into();
        let cp_name = cp_name.into();
        debug!(plugin = %plugin, cp_name = %cp_name, "Modem attached");
        self.modems.write().insert(
            plugin,
            Modem {
                cp_name,
                network: None,
            },
        );
    }

    /// Replace the network state reported for the modem owned by `plugin`
    pub fn set_network(&self, plugin: &str, snapshot: NetworkSnapshot) {
        if let Some(modem) = self.modems.write().get_mut(plugin) {
            modem.network = Some(snapshot);
        }
    }
}

impl NetworkAccess for LocalNetwork {
    fn cp_name(&self, source: &CoreObject) -> Option<String> {
        self.modems
            .read()
            .get(&source.plugin)
            .map(|m| m.cp_name.clone())
    }

    fn network(&self, source: &CoreObject) -> Option<NetworkSnapshot> {
        self.modems
            .read()
            .get(&source.plugin)
            .and_then(|m| m.network.clone())
    }
}

// =============================================================================
// Host
// =============================================================================

/// In-process [`PluginHost`]
pub struct LocalHost {
    bus: Arc<LocalBus>,
    registry: Arc<LocalRegistry>,
    network: Arc<LocalNetwork>,
    store: Arc<MemoryStore>,
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalHost {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self {
            bus: Arc::new(LocalBus::default()),
            registry: Arc::new(LocalRegistry::default()),
            network: Arc::new(LocalNetwork::default()),
            store,
        }
    }

    pub fn local_bus(&self) -> &Arc<LocalBus> {
        &self.bus
    }

    pub fn local_network(&self) -> &Arc<LocalNetwork> {
        &self.network
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Deliver `data` with its own command
    pub fn notify(&self, source: &CoreObject, data: NotificationData) -> HookReturn {
        self.bus.emit(source, data.command(), Some(&data))
    }

    /// Deliver a command that carries no payload
    pub fn notify_bare(&self, source: &CoreObject, command: NotificationCommand) -> HookReturn {
        self.bus.emit(source, command, None)
    }
}

impl PluginHost for LocalHost {
    fn bus(&self) -> Arc<dyn NotificationBus> {
        self.bus.clone()
    }

    fn registry(&self) -> Arc<dyn StorageRegistry> {
        self.registry.clone()
    }

    fn network(&self) -> Arc<dyn NetworkAccess> {
        self.network.clone()
    }

    fn settings_store(&self) -> Arc<dyn SettingsStore> {
        self.store.clone()
    }
}
