//! Telvconf Core - Storage keys ↔ vconf paths, and the storage adapter
//!
//! # Architecture
//!
//! ```text
//! telephony core ──StorageOps──→ VconfStorage ──KeyMap──→ SettingsStore
//!       ↑                              │                        │
//!       └──── StorageCallback ←── dispatch registry ←── KeyNode change
//! ```
//!
//! - [`KeyMap`] is the bidirectional mapping table, built from one list of
//!   `(StorageKey, path, ValueType)` triples.
//! - [`SettingsStore`] is the seam to the platform key-value store;
//!   [`MemoryStore`] is the in-process implementation.
//! - [`VconfStorage`] implements [`StorageOps`], the capability set the
//!   telephony core uses for every storage backend.

pub mod paths;
pub mod keymap;
pub mod store;
pub mod memory;
pub mod storage;

pub use keymap::{KeyEntry, KeyMap};
pub use store::{KeyListener, ListenerId, SettingsStore};
pub use memory::MemoryStore;
pub use storage::{
    AdapterId, CallbackId, StorageCallback, StorageEvent, StorageHandle, StorageOps,
    VconfStorage, VCONF_STORAGE_NAME,
};

pub use telvconf_types::*;
