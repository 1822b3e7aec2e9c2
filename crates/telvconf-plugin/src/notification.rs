//! Telephony core notifications consumed by the plugin

use serde::{Deserialize, Serialize};
use telvconf_types::{ModemState, PsProtocolStatus, ServiceDomainStatus, ServiceType, SimStatus};

/// Notification kinds the plugin hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationCommand {
    NetworkLocationCellinfo,
    NetworkIconInfo,
    NetworkRegistrationStatus,
    NetworkChange,
    NetworkIdentity,
    NetworkDefaultDataSubscription,
    SimStatus,
    PhonebookStatus,
    PsProtocolStatus,
    ModemPower,
    ModemBootup,
    ModemFlightMode,
    ServerAddedModemPlugin,
    ServerRemovedModemPlugin,
}

impl NotificationCommand {
    /// Every command the handler registers a hook for
    pub const HOOKED: [NotificationCommand; 14] = [
        NotificationCommand::NetworkLocationCellinfo,
        NotificationCommand::NetworkIconInfo,
        NotificationCommand::NetworkRegistrationStatus,
        NotificationCommand::NetworkChange,
        NotificationCommand::NetworkIdentity,
        NotificationCommand::NetworkDefaultDataSubscription,
        NotificationCommand::SimStatus,
        NotificationCommand::PhonebookStatus,
        NotificationCommand::PsProtocolStatus,
        NotificationCommand::ModemPower,
        NotificationCommand::ModemBootup,
        NotificationCommand::ModemFlightMode,
        NotificationCommand::ServerAddedModemPlugin,
        NotificationCommand::ServerRemovedModemPlugin,
    ];
}

/// Whether later hooks should still see a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookReturn {
    Continue,
    StopPropagation,
}

/// The core object a notification originates from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoreObject {
    /// Object kind, e.g. "network" or "sim"
    pub name: String,
    /// Modem plugin owning the object
    pub plugin: String,
}

impl CoreObject {
    pub fn new(name: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugin: plugin.into(),
        }
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInfo {
    pub cell_id: i32,
    pub lac: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconInfo {
    pub rssi: Option<i32>,
    pub roam_icon_mode: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStatus {
    pub cs_domain: ServiceDomainStatus,
    pub ps_domain: ServiceDomainStatus,
    pub service_type: ServiceType,
    pub roaming: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkChange {
    pub plmn: String,
    pub lac: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentity {
    pub plmn: String,
    pub short_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultDataSubscription {
    pub subscription: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStatusInfo {
    pub status: SimStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonebookStatus {
    pub initialized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsProtocolStatusInfo {
    pub status: PsProtocolStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModemPower {
    pub state: ModemState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightMode {
    pub enabled: bool,
}

/// Notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationData {
    CellInfo(CellInfo),
    IconInfo(IconInfo),
    RegistrationStatus(RegistrationStatus),
    NetworkChange(NetworkChange),
    NetworkIdentity(NetworkIdentity),
    DefaultDataSubscription(DefaultDataSubscription),
    SimStatus(SimStatusInfo),
    PhonebookStatus(PhonebookStatus),
    PsProtocolStatus(PsProtocolStatusInfo),
    ModemPower(ModemPower),
    FlightMode(FlightMode),
}

impl NotificationData {
    /// Command this payload is delivered with
    pub fn command(&self) -> NotificationCommand {
        match self {
            NotificationData::CellInfo(_) => NotificationCommand::NetworkLocationCellinfo,
            NotificationData::IconInfo(_) => NotificationCommand::NetworkIconInfo,
            NotificationData::RegistrationStatus(_) => {
                NotificationCommand::NetworkRegistrationStatus
            }
            NotificationData::NetworkChange(_) => NotificationCommand::NetworkChange,
            NotificationData::NetworkIdentity(_) => NotificationCommand::NetworkIdentity,
            NotificationData::DefaultDataSubscription(_) => {
                NotificationCommand::NetworkDefaultDataSubscription
            }
            NotificationData::SimStatus(_) => NotificationCommand::SimStatus,
            NotificationData::PhonebookStatus(_) => NotificationCommand::PhonebookStatus,
            NotificationData::PsProtocolStatus(_) => NotificationCommand::PsProtocolStatus,
            NotificationData::ModemPower(_) => NotificationCommand::ModemPower,
            NotificationData::FlightMode(_) => NotificationCommand::ModemFlightMode,
        }
    }
}
