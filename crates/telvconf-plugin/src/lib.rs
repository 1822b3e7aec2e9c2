//! # telvconf-plugin
//!
//! Telephony plugin that mirrors modem, SIM and network state into vconf.
//!
//! ```text
//!   telephony core ──notifications──▶ VconfHandler ──writes──▶ SettingsStore
//!        │                                                       ▲    │
//!        └──registry "vconf"──▶ VconfStorage ──typed get/set─────┘    │
//!                                     ▲                               │
//!                                     └────────change listeners───────┘
//! ```
//!
//! [`VconfPlugin`] drives the lifecycle against any [`PluginHost`];
//! [`LocalHost`] is the in-process host used by tests and tools.

pub mod config;
pub mod handler;
pub mod host;
pub mod local;
pub mod notification;
pub mod plugin;
pub mod reset;
pub mod runtime;

pub use config::{BridgeConfig, PluginSettings, Subscription, SubscriptionSettings};
pub use handler::{VconfHandler, NWNAME_NO_SIM, NWNAME_SIM_ERROR};
pub use host::{
    HookFn, HookId, NetworkAccess, NetworkSnapshot, NotificationBus, PluginHost, StorageRegistry,
};
pub use local::{LocalBus, LocalHost, LocalNetwork, LocalRegistry};
pub use notification::*;
pub use plugin::{PluginDescriptor, TelephonyPlugin, VconfPlugin};
pub use reset::{reset_paths, reset_telephony_keys, ResetReport};
pub use runtime::{PowerTransition, RuntimeState};
