//! Plugin configuration
//!
//! Loaded from an optional config file plus `TELVCONF__*` environment
//! variables. Every field has a default, so an empty source yields the
//! stock vconf plugin.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use telvconf_core::VCONF_STORAGE_NAME;
use telvconf_types::{BridgeError, BridgeResult};

/// Priority of the telephony core's "high" plugin tier
pub const PLUGIN_PRIORITY_HIGH: i32 = -100;

/// Bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Name the storage backend is registered under
    #[serde(default = "default_storage_name")]
    pub storage_name: String,

    #[serde(default)]
    pub plugin: PluginSettings,

    #[serde(default)]
    pub subscription: SubscriptionSettings,

    /// Operator names by PLMN, used when the network sends no name
    #[serde(default)]
    pub operators: HashMap<String, String>,

    /// Reset the volatile telephony keys during init
    #[serde(default = "default_true")]
    pub reset_on_init: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            storage_name: default_storage_name(),
            plugin: PluginSettings::default(),
            subscription: SubscriptionSettings::default(),
            operators: HashMap::new(),
            reset_on_init: true,
        }
    }
}

/// Plugin descriptor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(default = "default_plugin_name")]
    pub name: String,

    #[serde(default = "default_priority")]
    pub priority: i32,

    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            name: default_plugin_name(),
            priority: default_priority(),
            version: default_version(),
        }
    }
}

/// How a modem's CP name maps to a subscription slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionSettings {
    /// CP name suffix of the primary subscription
    #[serde(default = "default_primary_suffix")]
    pub primary_suffix: String,

    /// CP name suffix of the secondary subscription
    #[serde(default = "default_secondary_suffix")]
    pub secondary_suffix: String,
}

impl Default for SubscriptionSettings {
    fn default() -> Self {
        Self {
            primary_suffix: default_primary_suffix(),
            secondary_suffix: default_secondary_suffix(),
        }
    }
}

/// Subscription slot a modem serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    Primary,
    Secondary,
}

impl SubscriptionSettings {
    /// Slot served by the modem named `cp_name`
    pub fn classify(&self, cp_name: &str) -> Option<Subscription> {
        if cp_name.ends_with(self.primary_suffix.as_str()) {
            Some(Subscription::Primary)
        } else if cp_name.ends_with(self.secondary_suffix.as_str()) {
            Some(Subscription::Secondary)
        } else {
            None
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_storage_name() -> String {
    VCONF_STORAGE_NAME.to_string()
}

fn default_plugin_name() -> String {
    "VCONF_STORAGE".to_string()
}

fn default_priority() -> i32 {
    PLUGIN_PRIORITY_HIGH - 1
}

fn default_version() -> u32 {
    1
}

fn default_primary_suffix() -> String {
    "0".to_string()
}

fn default_secondary_suffix() -> String {
    "1".to_string()
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl BridgeConfig {
    /// Load configuration from `.env`, an optional file and the environment
    pub fn load(config_path: Option<&str>) -> BridgeResult<Self> {
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("TELVCONF")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    /// Parse a TOML document, without consulting the environment
    pub fn from_toml_str(source: &str) -> BridgeResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml));
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> BridgeResult<Self> {
        let loaded: Self = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the plugin cannot run with
    pub fn validate(&self) -> BridgeResult<()> {
        if self.storage_name.trim().is_empty() {
            return Err(BridgeError::Config("storage_name must not be empty".into()));
        }
        let sub = &self.subscription;
        if sub.primary_suffix.is_empty() || sub.secondary_suffix.is_empty() {
            return Err(BridgeError::Config(
                "subscription suffixes must not be empty".into(),
            ));
        }
        if sub.primary_suffix == sub.secondary_suffix {
            return Err(BridgeError::Config(format!(
                "primary and secondary subscriptions share suffix {:?}",
                sub.primary_suffix
            )));
        }
        Ok(())
    }

    /// Operator name configured for `plmn`
    pub fn operator_name(&self, plmn: &str) -> Option<&str> {
        self.operators.get(plmn).map(String::as_str)
    }
}
