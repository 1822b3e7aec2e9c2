//! Error types for the settings bridge
//!
//! None of these are fatal. Public entry points log and swallow them so that
//! telephony keeps running when the settings store misbehaves.

use thiserror::Error;

use crate::{StorageKey, ValueType};

/// Result type for bridge operations
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Result type for settings-store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors reported by a settings store backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("Path {path} holds a {actual} value, not {expected}")]
    TypeMismatch {
        path: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("No listener {listener} registered on {path}")]
    ListenerNotFound { path: String, listener: u64 },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors raised inside the bridge
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    // ========================================================================
    // Translation
    // ========================================================================

    /// Key has no external path in the mapping table
    #[error("Storage key {key} has no external path")]
    UnmappedKey { key: StorageKey },

    /// External path has no storage key in the mapping table
    #[error("External path {path} has no storage key")]
    UnmappedPath { path: String },

    /// Operation type differs from the key's legal value type
    #[error("Storage key {key} holds {expected} values, not {requested}")]
    TypeMismatch {
        key: StorageKey,
        expected: ValueType,
        requested: ValueType,
    },

    // ========================================================================
    // Backend
    // ========================================================================

    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),

    #[error("Handle {handle} is not owned by this storage")]
    InvalidHandle { handle: String },

    // ========================================================================
    // Host
    // ========================================================================

    #[error("Storage {name} is not registered")]
    StorageNotFound { name: String },

    #[error("Storage {name} is already registered")]
    StorageExists { name: String },

    #[error("Host service unavailable: {0}")]
    HostUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
