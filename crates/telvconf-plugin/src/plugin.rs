//! Plugin lifecycle
//!
//! `init` brings up the core (the vconf storage adapter, registered with the
//! host) and then the handler (reset, notification hooks, READY watcher).
//! A handler failure tears the core down again. `unload` reverses both.

use std::sync::Arc;

use telvconf_core::paths::{self, tapi_state};
use telvconf_core::{KeyListener, KeyMap, ListenerId, SettingsStore, StorageOps, VconfStorage};
use telvconf_types::{BridgeError, BridgeResult, KeyNode, StorageKey};
use tracing::{debug, error, info, warn};

use crate::config::{BridgeConfig, PluginSettings};
use crate::handler::VconfHandler;
use crate::host::{HookFn, HookId, PluginHost};
use crate::notification::{CoreObject, NotificationCommand, NotificationData};

/// Static plugin identity handed to the telephony core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: String,
    pub priority: i32,
    pub version: u32,
}

impl From<&PluginSettings> for PluginDescriptor {
    fn from(settings: &PluginSettings) -> Self {
        Self {
            name: settings.name.clone(),
            priority: settings.priority,
            version: settings.version,
        }
    }
}

/// Lifecycle the telephony core drives
pub trait TelephonyPlugin {
    fn descriptor(&self) -> &PluginDescriptor;

    fn load(&mut self) -> bool;

    fn init(&mut self) -> bool;

    fn unload(&mut self);
}

struct HandlerBinding {
    handler: Arc<VconfHandler>,
    hooks: Vec<HookId>,
    ready_listener: ListenerId,
}

/// The vconf storage plugin
pub struct VconfPlugin {
    descriptor: PluginDescriptor,
    config: BridgeConfig,
    host: Arc<dyn PluginHost>,
    core: Option<Arc<VconfStorage>>,
    binding: Option<HandlerBinding>,
}

impl VconfPlugin {
    pub fn new(config: BridgeConfig, host: Arc<dyn PluginHost>) -> Self {
        Self {
            descriptor: PluginDescriptor::from(&config.plugin),
            config,
            host,
            core: None,
            binding: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.core.is_some() && self.binding.is_some()
    }

    /// The registered storage adapter, once the core is up
    pub fn storage(&self) -> Option<&Arc<VconfStorage>> {
        self.core.as_ref()
    }

    pub fn handler(&self) -> Option<&Arc<VconfHandler>> {
        self.binding.as_ref().map(|b| &b.handler)
    }

    /// Bring up core and handler
    pub fn try_init(&mut self) -> BridgeResult<()> {
        if self.is_initialized() {
            return Ok(());
        }
        self.config.validate()?;

        self.core_init().inspect_err(|e| error!(error = %e, "vconf core init failed"))?;

        if let Err(e) = self.handler_init() {
            error!(error = %e, "vconf handler init failed");
            self.core_deinit();
            return Err(e);
        }
        info!(plugin = %self.descriptor.name, "Plugin initialized");
        Ok(())
    }

    fn core_init(&mut self) -> BridgeResult<()> {
        let storage = Arc::new(VconfStorage::with_keymap(
            self.config.storage_name.clone(),
            Arc::new(KeyMap::standard()),
            self.host.settings_store(),
        ));
        self.host.registry().register_storage(storage.clone())?;
        debug!(storage = %self.config.storage_name, adapter = %storage.id(), "vconf core up");
        self.core = Some(storage);
        Ok(())
    }

    fn core_deinit(&mut self) {
        if self.core.take().is_some()
            && self
                .host
                .registry()
                .unregister_storage(&self.config.storage_name)
                .is_none()
        {
            warn!(storage = %self.config.storage_name, "Storage was already unregistered");
        }
    }

    fn handler_init(&mut self) -> BridgeResult<()> {
        let storage = self
            .host
            .registry()
            .find_storage(&self.config.storage_name)
            .ok_or_else(|| BridgeError::StorageNotFound {
                name: self.config.storage_name.clone(),
            })?;

        let handler = Arc::new(VconfHandler::new(
            &self.config,
            self.host.settings_store(),
            self.host.network(),
        ));

        if self.config.reset_on_init {
            handler.reset();
        }
        let tapi_reset = storage.set_int(StorageKey::TelephonyTapiState, tapi_state::NONE);
        let ready_reset = storage.set_bool(StorageKey::TelephonyReady, false);
        if !(tapi_reset && ready_reset) {
            warn!(tapi_reset, ready_reset, "Failed to reset telephony state keys");
        }

        let bus = self.host.bus();
        let hooks = NotificationCommand::HOOKED
            .iter()
            .map(|&command| {
                let handler = handler.clone();
                let hook: HookFn = Arc::new(
                    move |source: &CoreObject,
                          command: NotificationCommand,
                          data: Option<&NotificationData>| {
                        handler.handle(source, command, data)
                    },
                );
                bus.add_notification_hook(command, hook)
            })
            .collect::<Vec<_>>();

        // Store-level listener, independent of the adapter's callback registry
        let watcher = handler.clone();
        let listener: KeyListener = Arc::new(move |node: &KeyNode| match node.value.as_bool() {
            Some(ready) => watcher.on_telephony_ready(ready),
            None => debug!(value = %node.value, "READY change without a bool"),
        });
        let ready_listener = match self
            .host
            .settings_store()
            .notify_key_changed(paths::TELEPHONY_READY, listener)
        {
            Ok(id) => id,
            Err(e) => {
                for id in hooks {
                    bus.remove_notification_hook(id);
                }
                return Err(BridgeError::HostUnavailable(format!(
                    "cannot watch the telephony READY key: {}",
                    e
                )));
            }
        };

        debug!(hooks = hooks.len(), "vconf handler up");
        self.binding = Some(HandlerBinding {
            handler,
            hooks,
            ready_listener,
        });
        Ok(())
    }

    fn handler_deinit(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        let bus = self.host.bus();
        for id in binding.hooks {
            if !bus.remove_notification_hook(id) {
                warn!(hook = id.0, "Hook was already removed");
            }
        }
        if let Err(e) = self
            .host
            .settings_store()
            .ignore_key_changed(paths::TELEPHONY_READY, binding.ready_listener)
        {
            warn!(error = %e, "Failed to stop watching the READY key");
        }
    }
}

impl TelephonyPlugin for VconfPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn load(&mut self) -> bool {
        info!(
            plugin = %self.descriptor.name,
            priority = self.descriptor.priority,
            version = self.descriptor.version,
            "Plugin loaded"
        );
        true
    }

    fn init(&mut self) -> bool {
        self.try_init().is_ok()
    }

    fn unload(&mut self) {
        if self.core.is_none() && self.binding.is_none() {
            return;
        }
        self.handler_deinit();
        self.core_deinit();
        info!(plugin = %self.descriptor.name, "Plugin unloaded");
    }
}

impl Drop for VconfPlugin {
    fn drop(&mut self) {
        self.unload();
    }
}
