//! Services the plugin consumes from the telephony host
//!
//! The host owns the notification bus, the storage registry and the network
//! objects. The plugin only talks to them through these traits, so it runs
//! the same against a full telephony server or [`LocalHost`](crate::LocalHost).

use std::sync::Arc;

use telvconf_core::{SettingsStore, StorageOps};
use telvconf_types::{AccessTechnology, BridgeResult, NamePriority, ServiceType};

use crate::notification::{CoreObject, HookReturn, NotificationCommand, NotificationData};

/// Hook run for every notification of the command it was added for
pub type HookFn =
    Arc<dyn Fn(&CoreObject, NotificationCommand, Option<&NotificationData>) -> HookReturn + Send + Sync>;

/// Identifies one hook registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u64);

/// Notification bus of the telephony server
pub trait NotificationBus: Send + Sync {
    fn add_notification_hook(&self, command: NotificationCommand, hook: HookFn) -> HookId;

    /// Returns false when `id` is not registered
    fn remove_notification_hook(&self, id: HookId) -> bool;
}

/// Registry of storage backends, keyed by name
pub trait StorageRegistry: Send + Sync {
    /// Fails with `StorageExists` when the name is taken
    fn register_storage(&self, storage: Arc<dyn StorageOps>) -> BridgeResult<()>;

    fn find_storage(&self, name: &str) -> Option<Arc<dyn StorageOps>>;

    fn unregister_storage(&self, name: &str) -> Option<Arc<dyn StorageOps>>;
}

/// Network state as the network core object reports it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSnapshot {
    pub service_type: Option<ServiceType>,
    pub access_technology: AccessTechnology,
    pub name_priority: NamePriority,
    pub spn_name: Option<String>,
    pub full_name: Option<String>,
    pub short_name: Option<String>,
    pub plmn: Option<String>,
}

/// Read access to modems and their network objects
pub trait NetworkAccess: Send + Sync {
    /// CP name of the modem owning `source`
    fn cp_name(&self, source: &CoreObject) -> Option<String>;

    /// Current network state of the modem owning `source`
    fn network(&self, source: &CoreObject) -> Option<NetworkSnapshot>;
}

/// Everything a plugin receives from its host
pub trait PluginHost: Send + Sync {
    fn bus(&self) -> Arc<dyn NotificationBus>;

    fn registry(&self) -> Arc<dyn StorageRegistry>;

    fn network(&self) -> Arc<dyn NetworkAccess>;

    fn settings_store(&self) -> Arc<dyn SettingsStore>;
}
