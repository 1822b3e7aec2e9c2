//! Notification hooks
//!
//! [`VconfHandler`] turns telephony core notifications into settings-store
//! writes. Every hook runs synchronously on the bus thread and always lets
//! the notification propagate. Per-modem hooks only act for the primary
//! subscription, so single-SIM devices keep their historic key layout.
//!
//! Most writes go through check-and-set: the current value is read first and
//! the write is skipped when nothing changes. The modem-state, slot,
//! phonebook, flight-mode and TAPI keys are written unconditionally.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use telvconf_core::paths::{self, dnet, pstype, sim_slot, svc_domain, svctype, tapi_state};
use telvconf_core::SettingsStore;
use telvconf_types::{
    ModemState, NamePriority, PsProtocolStatus, ServiceDomainStatus, ServiceType, SimStatus,
};
use tracing::{debug, info, warn};

use crate::config::{BridgeConfig, Subscription};
use crate::host::{NetworkAccess, NetworkSnapshot};
use crate::notification::{
    CellInfo, CoreObject, DefaultDataSubscription, FlightMode, HookReturn, IconInfo, ModemPower,
    NetworkChange, NetworkIdentity, NotificationCommand, NotificationData, PhonebookStatus,
    PsProtocolStatusInfo, RegistrationStatus, SimStatusInfo,
};
use crate::reset::{reset_telephony_keys, ResetReport};
use crate::runtime::RuntimeState;

pub const NWNAME_SIM_ERROR: &str = "SIM Error";
pub const NWNAME_NO_SIM: &str = "NO SIM";

/// Settings writer behind the notification hooks
pub struct VconfHandler {
    store: Arc<dyn SettingsStore>,
    network: Arc<dyn NetworkAccess>,
    config: BridgeConfig,
    state: Mutex<RuntimeState>,
}

impl VconfHandler {
    pub fn new(
        config: &BridgeConfig,
        store: Arc<dyn SettingsStore>,
        network: Arc<dyn NetworkAccess>,
    ) -> Self {
        Self {
            store,
            network,
            config: config.clone(),
            state: Mutex::new(RuntimeState::new(Utc::now())),
        }
    }

    /// Copy of the power bookkeeping
    pub fn runtime_state(&self) -> RuntimeState {
        self.state.lock().clone()
    }

    /// Reset the volatile keys to their "no service" defaults
    pub fn reset(&self) -> ResetReport {
        reset_telephony_keys(self.store.as_ref())
    }

    /// Entry point for every hooked notification
    pub fn handle(
        &self,
        source: &CoreObject,
        command: NotificationCommand,
        data: Option<&NotificationData>,
    ) -> HookReturn {
        use NotificationCommand as Cmd;
        use NotificationData as Data;

        match (command, data) {
            (Cmd::NetworkLocationCellinfo, Some(Data::CellInfo(info))) => {
                self.on_cell_info(source, info)
            }
            (Cmd::NetworkIconInfo, Some(Data::IconInfo(info))) => self.on_icon_info(source, info),
            (Cmd::NetworkRegistrationStatus, Some(Data::RegistrationStatus(info))) => {
                self.on_registration_status(source, info)
            }
            (Cmd::NetworkChange, Some(Data::NetworkChange(info))) => {
                self.on_network_change(source, info)
            }
            (Cmd::NetworkIdentity, Some(Data::NetworkIdentity(info))) => {
                self.on_network_identity(source, info)
            }
            (Cmd::NetworkDefaultDataSubscription, Some(Data::DefaultDataSubscription(info))) => {
                self.on_default_data_subscription(info)
            }
            (Cmd::SimStatus, Some(Data::SimStatus(info))) => self.on_sim_status(source, info),
            (Cmd::PhonebookStatus, Some(Data::PhonebookStatus(info))) => {
                self.on_phonebook_status(source, info)
            }
            (Cmd::PsProtocolStatus, Some(Data::PsProtocolStatus(info))) => {
                self.on_ps_protocol_status(source, info)
            }
            (Cmd::ModemPower, Some(Data::ModemPower(info))) => self.on_modem_power(source, info),
            (Cmd::ModemFlightMode, Some(Data::FlightMode(info))) => {
                self.on_flight_mode(source, info)
            }
            (Cmd::ModemBootup, _) => self.on_modem_bootup(),
            (Cmd::ServerAddedModemPlugin, _) => self.on_modem_plugin_added(source),
            (Cmd::ServerRemovedModemPlugin, _) => self.on_modem_plugin_removed(source),
            (command, data) => {
                debug!(
                    ?command,
                    has_payload = data.is_some(),
                    "Ignoring notification without a matching payload"
                );
            }
        }
        HookReturn::Continue
    }

    // =========================================================================
    // Network
    // =========================================================================

    pub fn on_cell_info(&self, source: &CoreObject, info: &CellInfo) {
        if !self.is_primary(source) {
            return;
        }
        debug!(cell_id = info.cell_id, lac = info.lac, "Cell info");
        self.check_and_set_int(paths::TELEPHONY_CELLID, info.cell_id);
        self.check_and_set_int(paths::TELEPHONY_LAC, info.lac);
    }

    pub fn on_icon_info(&self, source: &CoreObject, info: &IconInfo) {
        if !self.is_primary(source) {
            return;
        }
        if let Some(rssi) = info.rssi {
            self.check_and_set_int(paths::TELEPHONY_RSSI, rssi);
        }
        self.update_roam_icon(info);
    }

    #[cfg(feature = "cdma")]
    fn update_roam_icon(&self, info: &IconInfo) {
        if let Some(mode) = info.roam_icon_mode {
            self.check_and_set_int(paths::TELEPHONY_ROAM_ICON_MODE, mode);
        }
    }

    #[cfg(not(feature = "cdma"))]
    fn update_roam_icon(&self, _info: &IconInfo) {}

    pub fn on_registration_status(&self, source: &CoreObject, info: &RegistrationStatus) {
        info!(
            cs = ?info.cs_domain,
            ps = ?info.ps_domain,
            service_type = ?info.service_type,
            roaming = info.roaming,
            "Registration status"
        );
        if !self.is_primary(source) {
            return;
        }

        self.check_and_set_int(paths::TELEPHONY_SVC_CS, domain_code(info.cs_domain));
        self.check_and_set_int(paths::TELEPHONY_SVC_PS, domain_code(info.ps_domain));
        self.check_and_set_int(paths::TELEPHONY_SVCTYPE, info.service_type.code());
        self.check_and_set_int(paths::TELEPHONY_SVC_ROAM, info.roaming as i32);

        self.update_network_name(source, Some(info.service_type), None);

        // Packet indicator must not show "on" while roaming data is disallowed.
        let roaming_allowed = self
            .store
            .get_bool(paths::SETAPPL_STATE_DATA_ROAMING_BOOL)
            .unwrap_or(false);
        if info.service_type.is_in_service() && info.roaming && !roaming_allowed {
            let packet_state = self.store.get_int(paths::DNET_STATE).unwrap_or(dnet::OFF);
            if packet_state > dnet::OFF {
                debug!(packet_state, "Roaming data disallowed, hiding packet indicator");
                self.check_and_set_int(paths::DNET_STATE, dnet::OFF);
            }
        }
    }

    pub fn on_network_change(&self, source: &CoreObject, info: &NetworkChange) {
        debug!(plmn = %info.plmn, lac = ?info.lac, "Network change");
        if !self.is_primary(source) {
            return;
        }
        self.check_and_set_int(paths::TELEPHONY_PLMN, parse_plmn(&info.plmn));
        if let Some(lac) = info.lac {
            self.check_and_set_int(paths::TELEPHONY_LAC, lac);
        }
        let identity = NetworkIdentity {
            plmn: info.plmn.clone(),
            ..Default::default()
        };
        self.update_network_name(source, None, Some(&identity));
    }

    pub fn on_network_identity(&self, source: &CoreObject, info: &NetworkIdentity) {
        debug!(plmn = %info.plmn, "Network identity");
        if !self.is_primary(source) {
            return;
        }
        self.check_and_set_int(paths::TELEPHONY_PLMN, parse_plmn(&info.plmn));
        self.update_network_name(source, None, Some(info));
    }

    pub fn on_default_data_subscription(&self, info: &DefaultDataSubscription) {
        debug!(subscription = info.subscription, "Default data subscription");
        self.check_and_set_int(paths::TELEPHONY_DB_DEFAULT_DATA_SUBS, info.subscription);
    }

    /// Recompute every name-related key from the modem's network state
    ///
    /// `service_type` and `identity` take precedence over what the network
    /// object reports.
    fn update_network_name(
        &self,
        source: &CoreObject,
        service_type: Option<ServiceType>,
        identity: Option<&NetworkIdentity>,
    ) {
        let snapshot = self.network.network(source).unwrap_or_default();
        let service_type = service_type
            .or(snapshot.service_type)
            .unwrap_or(ServiceType::Unknown);

        if service_type != ServiceType::Umts3G
            && self.store.get_int(paths::TELEPHONY_PSTYPE).unwrap_or(pstype::NONE) != pstype::NONE
        {
            debug!("Forcing HSDPA state off");
            self.check_and_set_int(paths::TELEPHONY_PSTYPE, pstype::NONE);
        }

        self.check_and_set_int(paths::TELEPHONY_SVC_ACT, snapshot.access_technology.0);
        self.check_and_set_int(
            paths::TELEPHONY_SPN_DISP_CONDITION,
            disp_condition_code(snapshot.name_priority),
        );

        if !service_type.is_in_service() {
            debug!(?service_type, "No service, network name left unchanged");
            return;
        }

        if let Some(spn) = snapshot.spn_name.as_deref() {
            self.check_and_set_str(paths::TELEPHONY_SPN_NAME, spn);
        }

        match self.resolve_network_name(&snapshot, identity) {
            Some(name) => {
                debug!(name = %name, ?service_type, "Network name resolved");
                self.check_and_set_str(paths::TELEPHONY_NWNAME, &name);
            }
            None => debug!(?service_type, "Network name not fixed yet"),
        }
    }

    /// First non-empty of long name, short name, operator table entry, PLMN
    fn resolve_network_name(
        &self,
        snapshot: &NetworkSnapshot,
        identity: Option<&NetworkIdentity>,
    ) -> Option<String> {
        let pick = |event: Option<&str>, object: Option<&str>| {
            event
                .filter(|s| !s.is_empty())
                .or(object.filter(|s| !s.is_empty()))
                .map(str::to_string)
        };

        let plmn = pick(
            identity.map(|i| i.plmn.as_str()),
            snapshot.plmn.as_deref(),
        );

        pick(
            identity.map(|i| i.full_name.as_str()),
            snapshot.full_name.as_deref(),
        )
        .or_else(|| {
            pick(
                identity.map(|i| i.short_name.as_str()),
                snapshot.short_name.as_deref(),
            )
        })
        .or_else(|| {
            plmn.as_deref()
                .and_then(|p| self.config.operator_name(p))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
        .or(plmn)
    }

    pub fn on_ps_protocol_status(&self, source: &CoreObject, info: &PsProtocolStatusInfo) {
        debug!(status = ?info.status, "PS protocol status");
        if !self.is_primary(source) {
            return;
        }

        let svc = self
            .store
            .get_int(paths::TELEPHONY_SVCTYPE)
            .unwrap_or(svctype::NONE);
        if svc < svctype::SVC_2G {
            debug!(svc, "Service not available, PS type cleared");
            self.check_and_set_int(paths::TELEPHONY_PSTYPE, pstype::NONE);
            return;
        }

        let code = match info.status {
            PsProtocolStatus::HsdpaOff => pstype::NONE,
            PsProtocolStatus::HsdpaOn => pstype::HSDPA,
            PsProtocolStatus::HsupaOn => pstype::HSUPA,
            PsProtocolStatus::HspaOn => pstype::HSPA,
            PsProtocolStatus::HspapOn => pstype::HSPAP,
            PsProtocolStatus::Unknown => {
                warn!("Invalid PS protocol status");
                return;
            }
        };
        self.check_and_set_int(paths::TELEPHONY_PSTYPE, code);
    }

    // =========================================================================
    // SIM
    // =========================================================================

    pub fn on_sim_status(&self, source: &CoreObject, info: &SimStatusInfo) {
        let Some(cp_name) = self.network.cp_name(source) else {
            warn!(plugin = %source.plugin, "SIM status from a modem without CP name");
            return;
        };
        let Some(subscription) = self.config.subscription.classify(&cp_name) else {
            warn!(cp_name = %cp_name, "No SIM slot keys for this CP name");
            return;
        };
        info!(status = ?info.status, ?subscription, "SIM status");

        self.check_and_set_int(paths::TELEPHONY_SIM_STATUS, info.status.code());

        let slot_path = match subscription {
            Subscription::Primary => paths::TELEPHONY_SIM_SLOT,
            Subscription::Secondary => paths::TELEPHONY_SIM_SLOT2,
        };
        let (slot_state, banner) = sim_slot_state(info.status);
        self.set_int(slot_path, slot_state);
        if let Some(banner) = banner {
            self.check_and_set_str(paths::TELEPHONY_NWNAME, banner);
        }
    }

    pub fn on_phonebook_status(&self, source: &CoreObject, info: &PhonebookStatus) {
        debug!(initialized = info.initialized, "Phonebook status");
        if !self.is_primary(source) {
            return;
        }
        self.set_int(paths::TELEPHONY_SIM_PB_INIT, info.initialized as i32);
    }

    // =========================================================================
    // Modem
    // =========================================================================

    pub fn on_modem_power(&self, source: &CoreObject, info: &ModemPower) {
        if !self.is_primary(source) {
            return;
        }
        info!(state = ?info.state, "Modem power");

        match info.state {
            ModemState::Resume => {
                self.set_int(paths::TELEPHONY_TAPI_STATE, tapi_state::READY);
            }
            ModemState::Online => {
                self.set_int(paths::TELEPHONY_TAPI_STATE, tapi_state::READY);
                self.set_bool(paths::TELEPHONY_PRIVATE_MODEM_STATE, true);
                self.record_power_state(ModemState::Online);
            }
            ModemState::Low => {
                self.set_bool(paths::TELEPHONY_PRIVATE_MODEM_STATE, false);
                self.record_power_state(ModemState::Low);
            }
            ModemState::Error => {
                warn!("Modem error, resetting telephony keys");
                self.reset();
            }
            ModemState::Unknown | ModemState::Offline | ModemState::Reset => {}
        }
    }

    pub fn on_flight_mode(&self, source: &CoreObject, info: &FlightMode) {
        if !self.is_primary(source) {
            return;
        }
        info!(enabled = info.enabled, "Flight mode");
        self.set_bool(paths::TELEPHONY_FLIGHT_MODE, info.enabled);

        let mut state = self.state.lock();
        let transition = match (info.enabled, state.last_modem_power_state, state.last_flight_mode) {
            (true, ModemState::Online, false) => Some(ModemState::Low),
            (false, ModemState::Low, true) => Some(ModemState::Online),
            _ => None,
        };
        if let Some(next) = transition {
            state.record_power_state(next, Utc::now(), self.store.as_ref());
            state.last_flight_mode = info.enabled;
        }
    }

    pub fn on_modem_bootup(&self) {
        info!("Modem boot-up complete, TAPI ready");
        self.set_int(paths::TELEPHONY_TAPI_STATE, tapi_state::READY);
    }

    pub fn on_modem_plugin_added(&self, source: &CoreObject) {
        debug!(plugin = %source.plugin, "Modem plugin added");
        self.set_int(paths::TELEPHONY_TAPI_STATE, tapi_state::NONE);
    }

    pub fn on_modem_plugin_removed(&self, source: &CoreObject) {
        info!(plugin = %source.plugin, "Modem plugin removed, resetting telephony keys");
        self.reset();
    }

    /// Mirror an external change of the READY key into the TAPI state
    pub fn on_telephony_ready(&self, ready: bool) {
        debug!(ready, "Telephony ready changed");
        let state = if ready {
            tapi_state::READY
        } else {
            tapi_state::NONE
        };
        self.set_int(paths::TELEPHONY_TAPI_STATE, state);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn record_power_state(&self, next: ModemState) {
        self.state
            .lock()
            .record_power_state(next, Utc::now(), self.store.as_ref());
    }

    /// Primary-subscription filter
    fn is_primary(&self, source: &CoreObject) -> bool {
        let primary = self
            .network
            .cp_name(source)
            .and_then(|name| self.config.subscription.classify(&name))
            == Some(Subscription::Primary);
        if !primary {
            debug!(plugin = %source.plugin, "Notification not for the primary subscription");
        }
        primary
    }

    /// Write `value` unless the store already holds it; true when written
    fn check_and_set_int(&self, path: &str, value: i32) -> bool {
        if matches!(self.store.get_int(path), Ok(current) if current == value) {
            return false;
        }
        self.set_int(path, value)
    }

    fn check_and_set_str(&self, path: &str, value: &str) -> bool {
        if matches!(self.store.get_str(path), Ok(ref current) if current == value) {
            return false;
        }
        match self.store.set_str(path, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path, error = %e, "Settings write failed");
                false
            }
        }
    }

    fn set_int(&self, path: &str, value: i32) -> bool {
        match self.store.set_int(path, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path, value, error = %e, "Settings write failed");
                false
            }
        }
    }

    fn set_bool(&self, path: &str, value: bool) -> bool {
        match self.store.set_bool(path, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path, value, error = %e, "Settings write failed");
                false
            }
        }
    }
}

fn domain_code(status: ServiceDomainStatus) -> i32 {
    match status {
        ServiceDomainStatus::Full => svc_domain::ON,
        _ => svc_domain::OFF,
    }
}

fn disp_condition_code(priority: NamePriority) -> i32 {
    use paths::disp_condition;
    match priority {
        NamePriority::Spn => disp_condition::SPN,
        NamePriority::Network => disp_condition::PLMN,
        NamePriority::Any => disp_condition::SPN_PLMN,
        NamePriority::Unknown => disp_condition::INVALID,
    }
}

/// Slot state for a SIM status, plus the network-name banner it implies
fn sim_slot_state(status: SimStatus) -> (i32, Option<&'static str>) {
    match status {
        SimStatus::CardError | SimStatus::CardCrashed => {
            (sim_slot::CARD_ERROR, Some(NWNAME_SIM_ERROR))
        }
        SimStatus::CardNotPresent | SimStatus::CardRemoved => {
            (sim_slot::NOT_PRESENT, Some(NWNAME_NO_SIM))
        }
        SimStatus::Initializing
        | SimStatus::InitCompleted
        | SimStatus::PinRequired
        | SimStatus::PukRequired
        | SimStatus::LockRequired
        | SimStatus::CardBlocked
        | SimStatus::NckRequired
        | SimStatus::NsckRequired
        | SimStatus::SpckRequired
        | SimStatus::CckRequired => (sim_slot::INSERTED, None),
        SimStatus::CardPowerOff | SimStatus::Unknown => (sim_slot::UNKNOWN, None),
    }
}

/// Leading decimal digits of `plmn`, 0 when there are none
fn parse_plmn(plmn: &str) -> i32 {
    let digits: String = plmn
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
