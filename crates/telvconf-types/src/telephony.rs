//! Telephony enums carried by notification payloads
//!
//! Numeric codes follow the telephony core's wire values, so a value written
//! "verbatim" to the settings store is the code returned by `code()`.

use serde::{Deserialize, Serialize};

/// Registration status of a CS or PS service domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceDomainStatus {
    NoService,
    Emergency,
    Search,
    Full,
}

/// Network service type, ordered from "no service" to the richest RAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Unknown,
    NoService,
    Emergency,
    Search,
    Gsm2G,
    Gprs2_5G,
    Edge2_5G,
    Umts3G,
    Hsdpa,
    Lte,
}

impl ServiceType {
    pub fn code(self) -> i32 {
        match self {
            ServiceType::Unknown => 0,
            ServiceType::NoService => 1,
            ServiceType::Emergency => 2,
            ServiceType::Search => 3,
            ServiceType::Gsm2G => 4,
            ServiceType::Gprs2_5G => 5,
            ServiceType::Edge2_5G => 6,
            ServiceType::Umts3G => 7,
            ServiceType::Hsdpa => 8,
            ServiceType::Lte => 9,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => ServiceType::Unknown,
            1 => ServiceType::NoService,
            2 => ServiceType::Emergency,
            3 => ServiceType::Search,
            4 => ServiceType::Gsm2G,
            5 => ServiceType::Gprs2_5G,
            6 => ServiceType::Edge2_5G,
            7 => ServiceType::Umts3G,
            8 => ServiceType::Hsdpa,
            9 => ServiceType::Lte,
            _ => return None,
        })
    }

    /// True once the modem is camped on a network beyond searching
    pub fn is_in_service(self) -> bool {
        self > ServiceType::Search
    }
}

/// Radio access technology code as reported by the modem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessTechnology(pub i32);

/// Which network name the operator wants displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NamePriority {
    #[default]
    Unknown,
    Spn,
    Network,
    Any,
}

/// SIM card status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimStatus {
    CardError,
    CardNotPresent,
    Initializing,
    InitCompleted,
    PinRequired,
    PukRequired,
    CardBlocked,
    NckRequired,
    NsckRequired,
    SpckRequired,
    CckRequired,
    CardRemoved,
    LockRequired,
    CardCrashed,
    CardPowerOff,
    Unknown,
}

impl SimStatus {
    pub fn code(self) -> i32 {
        match self {
            SimStatus::CardError => 0x00,
            SimStatus::CardNotPresent => 0x01,
            SimStatus::Initializing => 0x02,
            SimStatus::InitCompleted => 0x03,
            SimStatus::PinRequired => 0x04,
            SimStatus::PukRequired => 0x05,
            SimStatus::CardBlocked => 0x06,
            SimStatus::NckRequired => 0x07,
            SimStatus::NsckRequired => 0x08,
            SimStatus::SpckRequired => 0x09,
            SimStatus::CckRequired => 0x0a,
            SimStatus::CardRemoved => 0x0b,
            SimStatus::LockRequired => 0x0c,
            SimStatus::CardCrashed => 0x0d,
            SimStatus::CardPowerOff => 0x0e,
            SimStatus::Unknown => 0xff,
        }
    }
}

/// Modem power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModemState {
    #[default]
    Unknown,
    Online,
    Offline,
    Reset,
    Low,
    Error,
    Resume,
}

/// HSPA family protocol status of the packet domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsProtocolStatus {
    HsdpaOff,
    HsdpaOn,
    HsupaOn,
    HspaOn,
    HspapOn,
    Unknown,
}
