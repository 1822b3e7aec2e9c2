//! Typed settings payloads

use serde::{Deserialize, Serialize};

/// The single legal value type of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Int,
    Bool,
    String,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::String => write!(f, "string"),
        }
    }
}

/// A transient value read from or written to the settings store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsValue {
    Int(i32),
    Bool(bool),
    String(String),
}

impl SettingsValue {
    /// The type tag of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            SettingsValue::Int(_) => ValueType::Int,
            SettingsValue::Bool(_) => ValueType::Bool,
            SettingsValue::String(_) => ValueType::String,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SettingsValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingsValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingsValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl From<i32> for SettingsValue {
    fn from(v: i32) -> Self {
        SettingsValue::Int(v)
    }
}

impl From<bool> for SettingsValue {
    fn from(v: bool) -> Self {
        SettingsValue::Bool(v)
    }
}

impl From<&str> for SettingsValue {
    fn from(v: &str) -> Self {
        SettingsValue::String(v.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(v: String) -> Self {
        SettingsValue::String(v)
    }
}

impl std::fmt::Display for SettingsValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsValue::Int(v) => write!(f, "{}", v),
            SettingsValue::Bool(v) => write!(f, "{}", v),
            SettingsValue::String(v) => write!(f, "\"{}\"", v),
        }
    }
}

/// A change notification from the settings store: the path that changed and
/// its new value (whose variant is the path's declared type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNode {
    pub name: String,
    pub value: SettingsValue,
}

impl KeyNode {
    pub fn new(name: impl Into<String>, value: impl Into<SettingsValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Declared type of the changed path
    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }
}
