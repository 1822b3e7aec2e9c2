//! Telvconf Types - Vocabulary shared between the telephony core and the
//! vconf settings bridge
//!
//! This crate has no dependency on the other telvconf crates. It defines:
//!
//! - [`StorageKey`]: the telephony core's enumerated setting identifiers
//! - [`ValueType`] and [`SettingsValue`]: the typed payloads moved through
//!   the bridge
//! - [`KeyNode`]: a change notification as delivered by the settings store
//! - Telephony enums carried by notification payloads
//! - Error types for the bridge and the settings-store seam

pub mod keys;
pub mod value;
pub mod telephony;
pub mod error;

pub use keys::*;
pub use value::*;
pub use telephony::*;
pub use error::*;
