//! Storage keys owned by the telephony core
//!
//! A [`StorageKey`] names a logical setting independently of any backend. The
//! backend-specific location and the legal value type of each key live in the
//! mapping table of the adapter, not here.

use serde::{Deserialize, Serialize};

/// Enumerated identifier of a telephony setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageKey {
    // ========================================================================
    // Network
    // ========================================================================
    TelephonyPlmn,
    TelephonyLac,
    TelephonyCellId,
    TelephonySvcType,
    TelephonySvcCs,
    TelephonySvcPs,
    TelephonySvcRoam,
    TelephonyRssi,
    TelephonyNwName,
    TelephonySpnName,
    TelephonySpnDispCondition,

    // ========================================================================
    // SIM / Phonebook / Call
    // ========================================================================
    TelephonySimPbInit,
    TelephonySimSlot,
    TelephonySimSlot2,
    TelephonySimSlotCount,
    TelephonyCallForwardState,

    // ========================================================================
    // Telephony state
    // ========================================================================
    TelephonyTapiState,
    TelephonyReady,
    FlightModeBool,

    // ========================================================================
    // Dual SIM
    // ========================================================================
    TelephonyDualsimDefaultDataServiceInt,
    TelephonyDualsimDefaultServiceInt,
    TelephonyPreferredVoiceSubscription,

    // ========================================================================
    // Packet service
    // ========================================================================
    PacketServiceState,
    PacketServiceState2,
    PacketIndicatorState,
    CellularState,
    CellularPktTotalRcv,
    CellularPktTotalRcv2,
    CellularPktTotalSnt,
    CellularPktTotalSnt2,
    CellularPktLastRcv,
    CellularPktLastRcv2,
    CellularPktLastSnt,
    CellularPktLastSnt2,
    PdpLastConnectedContextBool,
    PdpLastConnectedContextProfileId,
    TelephonyLastConnectedContextPlmn,

    // ========================================================================
    // Platform settings
    // ========================================================================
    PmState,
    Enable3g,
    SetapplStateDataRoamingBool,
    SetapplNetworkRestrictMode,
    PowerSavingMode,
    LanguageSet,
    MsgServerReadyBool,
    WifiStateInt,
    WeconnAllConnected,
    SapConnectionType,
}

impl StorageKey {
    /// Every key the telephony core defines, in declaration order
    pub const ALL: &'static [StorageKey] = &[
        StorageKey::TelephonyPlmn,
        StorageKey::TelephonyLac,
        StorageKey::TelephonyCellId,
        StorageKey::TelephonySvcType,
        StorageKey::TelephonySvcCs,
        StorageKey::TelephonySvcPs,
        StorageKey::TelephonySvcRoam,
        StorageKey::TelephonyRssi,
        StorageKey::TelephonyNwName,
        StorageKey::TelephonySpnName,
        StorageKey::TelephonySpnDispCondition,
        StorageKey::TelephonySimPbInit,
        StorageKey::TelephonySimSlot,
        StorageKey::TelephonySimSlot2,
        StorageKey::TelephonySimSlotCount,
        StorageKey::TelephonyCallForwardState,
        StorageKey::TelephonyTapiState,
        StorageKey::TelephonyReady,
        StorageKey::FlightModeBool,
        StorageKey::TelephonyDualsimDefaultDataServiceInt,
        StorageKey::TelephonyDualsimDefaultServiceInt,
        StorageKey::TelephonyPreferredVoiceSubscription,
        StorageKey::PacketServiceState,
        StorageKey::PacketServiceState2,
        StorageKey::PacketIndicatorState,
        StorageKey::CellularState,
        StorageKey::CellularPktTotalRcv,
        StorageKey::CellularPktTotalRcv2,
        StorageKey::CellularPktTotalSnt,
        StorageKey::CellularPktTotalSnt2,
        StorageKey::CellularPktLastRcv,
        StorageKey::CellularPktLastRcv2,
        StorageKey::CellularPktLastSnt,
        StorageKey::CellularPktLastSnt2,
        StorageKey::PdpLastConnectedContextBool,
        StorageKey::PdpLastConnectedContextProfileId,
        StorageKey::TelephonyLastConnectedContextPlmn,
        StorageKey::PmState,
        StorageKey::Enable3g,
        StorageKey::SetapplStateDataRoamingBool,
        StorageKey::SetapplNetworkRestrictMode,
        StorageKey::PowerSavingMode,
        StorageKey::LanguageSet,
        StorageKey::MsgServerReadyBool,
        StorageKey::WifiStateInt,
        StorageKey::WeconnAllConnected,
        StorageKey::SapConnectionType,
    ];
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
