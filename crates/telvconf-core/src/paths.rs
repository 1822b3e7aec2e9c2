//! vconf paths and the value codes stored under them
//!
//! The `db/` prefix marks persisted keys, `memory/` volatile ones. The bridge
//! does not enforce the convention.

// ============================================================================
// Network
// ============================================================================

pub const TELEPHONY_PLMN: &str = "memory/telephony/plmn";
pub const TELEPHONY_LAC: &str = "memory/telephony/lac";
pub const TELEPHONY_CELLID: &str = "memory/telephony/cell_id";
pub const TELEPHONY_SVCTYPE: &str = "memory/telephony/svctype";
pub const TELEPHONY_SVC_CS: &str = "memory/telephony/svc_cs";
pub const TELEPHONY_SVC_PS: &str = "memory/telephony/svc_ps";
pub const TELEPHONY_SVC_ROAM: &str = "memory/telephony/svc_roam";
pub const TELEPHONY_SVC_ACT: &str = "memory/telephony/svc_act";
pub const TELEPHONY_PSTYPE: &str = "memory/telephony/pstype";
pub const TELEPHONY_RSSI: &str = "memory/telephony/rssi";
pub const TELEPHONY_ROAM_ICON_MODE: &str = "memory/telephony/roam_icon_mode";
pub const TELEPHONY_NWNAME: &str = "memory/telephony/nw_name";
pub const TELEPHONY_SPN_NAME: &str = "memory/telephony/spn";
pub const TELEPHONY_SPN_DISP_CONDITION: &str = "memory/telephony/spn_disp_condition";
pub const TELEPHONY_NITZ_GMT: &str = "memory/telephony/nitz_gmt";
pub const TELEPHONY_NITZ_EVENT_GMT: &str = "memory/telephony/nitz_event_gmt";
pub const TELEPHONY_NITZ_ZONE: &str = "memory/telephony/nitz_zone";

// ============================================================================
// SIM / Phonebook / Call
// ============================================================================

pub const TELEPHONY_SIM_STATUS: &str = "memory/telephony/sim_status";
pub const TELEPHONY_SIM_SLOT: &str = "memory/telephony/sim_slot";
pub const TELEPHONY_SIM_SLOT2: &str = "memory/telephony/sim_slot2";
pub const TELEPHONY_SIM_SLOT_COUNT: &str = "db/telephony/sim_slot_count";
pub const TELEPHONY_SIM_PB_INIT: &str = "memory/telephony/sim/pb_init";
pub const TELEPHONY_CALL_FORWARD_STATE: &str = "db/telephony/call_forward_state";

// ============================================================================
// Telephony state
// ============================================================================

pub const TELEPHONY_TAPI_STATE: &str = "memory/telephony/tapi_state";
pub const TELEPHONY_READY: &str = "memory/telephony/ready";
pub const TELEPHONY_FLIGHT_MODE: &str = "db/telephony/flight_mode";
pub const TELEPHONY_PRIVATE_MODEM_STATE: &str = "memory/private/telephony/modem_state";
pub const TELEPHONY_PRIVATE_MODEM_ON_COUNT: &str = "memory/private/telephony/modem_on_count";

// ============================================================================
// Dual SIM
// ============================================================================

pub const TELEPHONY_DB_DEFAULT_DATA_SUBS: &str = "db/telephony/dualsim/default_data_service";
pub const TELEPHONY_DB_DEFAULT_SUBS: &str = "db/telephony/dualsim/default_subscription";
pub const TELEPHONY_PREFERRED_VOICE_SUBSCRIPTION: &str =
    "db/telephony/dualsim/preferred_voice_subscription";

// ============================================================================
// Packet service
// ============================================================================

pub const DNET_STATE: &str = "memory/dnet/state";
pub const DNET_STATE2: &str = "memory/dnet/state2";
pub const PACKET_STATE: &str = "memory/dnet/packet_state";
pub const NETWORK_CELLULAR_STATE: &str = "memory/dnet/cellular";
pub const NETWORK_CELLULAR_PKT_TOTAL_RCV: &str = "db/dnet/statistics/cellular/totalrcv";
pub const NETWORK_CELLULAR_PKT_TOTAL_RCV2: &str = "db/dnet/statistics/cellular/totalrcv2";
pub const NETWORK_CELLULAR_PKT_TOTAL_SNT: &str = "db/dnet/statistics/cellular/totalsnt";
pub const NETWORK_CELLULAR_PKT_TOTAL_SNT2: &str = "db/dnet/statistics/cellular/totalsnt2";
pub const NETWORK_CELLULAR_PKT_LAST_RCV: &str = "db/dnet/statistics/cellular/lastrcv";
pub const NETWORK_CELLULAR_PKT_LAST_RCV2: &str = "db/dnet/statistics/cellular/lastrcv2";
pub const NETWORK_CELLULAR_PKT_LAST_SNT: &str = "db/dnet/statistics/cellular/lastsnt";
pub const NETWORK_CELLULAR_PKT_LAST_SNT2: &str = "db/dnet/statistics/cellular/lastsnt2";
pub const TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT: &str =
    "db/private/telephony/pdp_last_connected_context";
pub const TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT_PROFILE_ID: &str =
    "db/private/telephony/pdp_last_connected_context_profile_id";
pub const TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT_PLMN: &str =
    "db/private/telephony/pdp_last_connected_context_plmn";

// ============================================================================
// Platform settings
// ============================================================================

pub const PM_STATE: &str = "memory/pm/state";
pub const ENABLE_3G: &str = "db/setting/3gEnabled";
pub const SETAPPL_STATE_DATA_ROAMING_BOOL: &str = "db/setting/data_roaming";
pub const SETAPPL_NETWORK_RESTRICT_MODE: &str = "db/setting/network_restrict_mode";
pub const SETAPPL_PSMODE: &str = "db/setting/psmode";
pub const LANGSET: &str = "db/menu_widget/language";
pub const MSG_SERVER_READY: &str = "memory/msg/ready";
pub const WIFI_STATE: &str = "memory/wifi/state";
pub const WECONN_ALL_CONNECTED: &str = "memory/private/weconn/all_connected";
pub const SAP_CONNECTION_TYPE: &str = "memory/private/sap/conn_type";

// ============================================================================
// Value codes
// ============================================================================

pub mod svctype {
    pub const NONE: i32 = 0;
    pub const NOSVC: i32 = 1;
    pub const EMERGENCY: i32 = 2;
    pub const SEARCH: i32 = 3;
    pub const SVC_2G: i32 = 4;
}

/// Shared by `svc_cs` and `svc_ps`
pub mod svc_domain {
    pub const UNKNOWN: i32 = 0;
    pub const OFF: i32 = 1;
    pub const ON: i32 = 2;
}

pub mod svc_roam {
    pub const OFF: i32 = 0;
    pub const ON: i32 = 1;
}

pub mod pstype {
    pub const NONE: i32 = 0;
    pub const HSDPA: i32 = 1;
    pub const HSUPA: i32 = 2;
    pub const HSPA: i32 = 3;
    pub const HSPAP: i32 = 4;
}

pub mod sim_slot {
    pub const UNKNOWN: i32 = 0;
    pub const INSERTED: i32 = 1;
    pub const NOT_PRESENT: i32 = 2;
    pub const CARD_ERROR: i32 = 3;
}

pub mod pb_init {
    pub const NONE: i32 = 0;
    pub const COMPLETED: i32 = 1;
}

pub mod disp_condition {
    pub const INVALID: i32 = 0;
    pub const SPN: i32 = 1;
    pub const PLMN: i32 = 2;
    pub const SPN_PLMN: i32 = 3;
}

pub mod rssi {
    pub const LEVEL_0: i32 = 0;
}

pub mod tapi_state {
    pub const NONE: i32 = 0;
    pub const READY: i32 = 1;
}

pub mod dnet {
    pub const OFF: i32 = 0;
    pub const ON: i32 = 1;
}

pub mod roam_icon {
    pub const OFF: i32 = 0;
}
