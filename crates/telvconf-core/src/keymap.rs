//! Key Translator - the bidirectional StorageKey ↔ vconf path table
//!
//! Both directions are compiled from one list of [`KeyEntry`] triples, so the
//! reverse lookup is the exact inverse of the forward lookup for every mapped
//! key. Keys absent from the list translate to `None`.

use std::collections::HashMap;

use telvconf_types::{BridgeError, BridgeResult, StorageKey, ValueType};

use crate::paths;

/// One row of the mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: StorageKey,
    pub path: &'static str,
    pub value_type: ValueType,
}

impl KeyEntry {
    pub const fn new(key: StorageKey, path: &'static str, value_type: ValueType) -> Self {
        Self {
            key,
            path,
            value_type,
        }
    }
}

const fn int(key: StorageKey, path: &'static str) -> KeyEntry {
    KeyEntry::new(key, path, ValueType::Int)
}

const fn boolean(key: StorageKey, path: &'static str) -> KeyEntry {
    KeyEntry::new(key, path, ValueType::Bool)
}

const fn string(key: StorageKey, path: &'static str) -> KeyEntry {
    KeyEntry::new(key, path, ValueType::String)
}

/// The vconf mapping table
pub const STANDARD_ENTRIES: &[KeyEntry] = &[
    int(StorageKey::TelephonyPlmn, paths::TELEPHONY_PLMN),
    int(StorageKey::TelephonyLac, paths::TELEPHONY_LAC),
    int(StorageKey::TelephonyCellId, paths::TELEPHONY_CELLID),
    int(StorageKey::TelephonySvcType, paths::TELEPHONY_SVCTYPE),
    int(StorageKey::TelephonySvcCs, paths::TELEPHONY_SVC_CS),
    int(StorageKey::TelephonySvcPs, paths::TELEPHONY_SVC_PS),
    int(StorageKey::TelephonySvcRoam, paths::TELEPHONY_SVC_ROAM),
    int(StorageKey::TelephonySimPbInit, paths::TELEPHONY_SIM_PB_INIT),
    int(StorageKey::TelephonyCallForwardState, paths::TELEPHONY_CALL_FORWARD_STATE),
    int(StorageKey::TelephonyTapiState, paths::TELEPHONY_TAPI_STATE),
    int(StorageKey::TelephonySpnDispCondition, paths::TELEPHONY_SPN_DISP_CONDITION),
    int(StorageKey::TelephonyRssi, paths::TELEPHONY_RSSI),
    boolean(StorageKey::TelephonyReady, paths::TELEPHONY_READY),
    int(StorageKey::TelephonySimSlot, paths::TELEPHONY_SIM_SLOT),
    int(StorageKey::TelephonySimSlot2, paths::TELEPHONY_SIM_SLOT2),
    int(StorageKey::TelephonySimSlotCount, paths::TELEPHONY_SIM_SLOT_COUNT),
    int(StorageKey::PmState, paths::PM_STATE),
    int(StorageKey::PacketServiceState, paths::DNET_STATE),
    int(StorageKey::PacketServiceState2, paths::DNET_STATE2),
    int(StorageKey::PacketIndicatorState, paths::PACKET_STATE),
    boolean(StorageKey::Enable3g, paths::ENABLE_3G),
    int(StorageKey::TelephonyDualsimDefaultDataServiceInt, paths::TELEPHONY_DB_DEFAULT_DATA_SUBS),
    boolean(StorageKey::SetapplStateDataRoamingBool, paths::SETAPPL_STATE_DATA_ROAMING_BOOL),
    string(StorageKey::TelephonyNwName, paths::TELEPHONY_NWNAME),
    string(StorageKey::TelephonySpnName, paths::TELEPHONY_SPN_NAME),
    int(StorageKey::CellularState, paths::NETWORK_CELLULAR_STATE),
    int(StorageKey::CellularPktTotalRcv, paths::NETWORK_CELLULAR_PKT_TOTAL_RCV),
    int(StorageKey::CellularPktTotalRcv2, paths::NETWORK_CELLULAR_PKT_TOTAL_RCV2),
    int(StorageKey::CellularPktTotalSnt, paths::NETWORK_CELLULAR_PKT_TOTAL_SNT),
    int(StorageKey::CellularPktTotalSnt2, paths::NETWORK_CELLULAR_PKT_TOTAL_SNT2),
    int(StorageKey::CellularPktLastRcv, paths::NETWORK_CELLULAR_PKT_LAST_RCV),
    int(StorageKey::CellularPktLastRcv2, paths::NETWORK_CELLULAR_PKT_LAST_RCV2),
    int(StorageKey::CellularPktLastSnt, paths::NETWORK_CELLULAR_PKT_LAST_SNT),
    int(StorageKey::CellularPktLastSnt2, paths::NETWORK_CELLULAR_PKT_LAST_SNT2),
    string(StorageKey::LanguageSet, paths::LANGSET),
    boolean(StorageKey::FlightModeBool, paths::TELEPHONY_FLIGHT_MODE),
    int(StorageKey::PowerSavingMode, paths::SETAPPL_PSMODE),
    int(StorageKey::SetapplNetworkRestrictMode, paths::SETAPPL_NETWORK_RESTRICT_MODE),
    boolean(StorageKey::MsgServerReadyBool, paths::MSG_SERVER_READY),
    int(StorageKey::TelephonyPreferredVoiceSubscription, paths::TELEPHONY_PREFERRED_VOICE_SUBSCRIPTION),
    int(StorageKey::TelephonyDualsimDefaultServiceInt, paths::TELEPHONY_DB_DEFAULT_SUBS),
    int(StorageKey::WifiStateInt, paths::WIFI_STATE),
    boolean(StorageKey::WeconnAllConnected, paths::WECONN_ALL_CONNECTED),
    int(StorageKey::SapConnectionType, paths::SAP_CONNECTION_TYPE),
];

/// Keys mapped only when prepaid SIM APN handling is built in
#[cfg(feature = "prepaid-sim-apn")]
pub const PREPAID_SIM_APN_ENTRIES: &[KeyEntry] = &[
    boolean(
        StorageKey::PdpLastConnectedContextBool,
        paths::TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT,
    ),
    int(
        StorageKey::PdpLastConnectedContextProfileId,
        paths::TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT_PROFILE_ID,
    ),
    string(
        StorageKey::TelephonyLastConnectedContextPlmn,
        paths::TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT_PLMN,
    ),
];

/// Bidirectional mapping table
#[derive(Debug, Clone)]
pub struct KeyMap {
    forward: HashMap<StorageKey, KeyEntry>,
    reverse: HashMap<&'static str, StorageKey>,
}

impl KeyMap {
    /// Build a table from entries, rejecting a key or a path listed twice
    pub fn new(entries: impl IntoIterator<Item = KeyEntry>) -> BridgeResult<Self> {
        let mut map = Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        };
        for entry in entries {
            if map.forward.contains_key(&entry.key) {
                return Err(BridgeError::Config(format!(
                    "storage key {} listed twice in mapping table",
                    entry.key
                )));
            }
            if map.reverse.contains_key(entry.path) {
                return Err(BridgeError::Config(format!(
                    "path {} listed twice in mapping table",
                    entry.path
                )));
            }
            map.insert(entry);
        }
        Ok(map)
    }

    /// The vconf table, including feature-gated entries
    pub fn standard() -> Self {
        let mut map = Self {
            forward: HashMap::with_capacity(STANDARD_ENTRIES.len()),
            reverse: HashMap::with_capacity(STANDARD_ENTRIES.len()),
        };
        for entry in STANDARD_ENTRIES {
            map.insert(*entry);
        }
        #[cfg(feature = "prepaid-sim-apn")]
        for entry in PREPAID_SIM_APN_ENTRIES {
            map.insert(*entry);
        }
        map
    }

    fn insert(&mut self, entry: KeyEntry) {
        self.forward.insert(entry.key, entry);
        self.reverse.insert(entry.path, entry.key);
    }

    pub fn to_external_path(&self, key: StorageKey) -> Option<&'static str> {
        self.forward.get(&key).map(|e| e.path)
    }

    pub fn to_internal_key(&self, path: &str) -> Option<StorageKey> {
        self.reverse.get(path).copied()
    }

    /// Key mapped to `path`
    pub fn resolve_path(&self, path: &str) -> BridgeResult<StorageKey> {
        self.to_internal_key(path)
            .ok_or_else(|| BridgeError::UnmappedPath {
                path: path.to_string(),
            })
    }

    pub fn value_type(&self, key: StorageKey) -> Option<ValueType> {
        self.forward.get(&key).map(|e| e.value_type)
    }

    /// Path of `key` for an operation of type `requested`
    ///
    /// Fails when the key is unmapped or its legal type is different.
    pub fn resolve(&self, key: StorageKey, requested: ValueType) -> BridgeResult<&'static str> {
        let entry = self
            .forward
            .get(&key)
            .ok_or(BridgeError::UnmappedKey { key })?;
        if entry.value_type != requested {
            return Err(BridgeError::TypeMismatch {
                key,
                expected: entry.value_type,
                requested,
            });
        }
        Ok(entry.path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &KeyEntry> {
        self.forward.values()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_every_mapped_key() {
        let map = KeyMap::standard();
        for entry in map.entries() {
            let path = map.to_external_path(entry.key).unwrap();
            assert_eq!(map.to_internal_key(path), Some(entry.key));
        }
    }

    #[test]
    fn test_every_key_is_mapped_or_not_found() {
        let map = KeyMap::standard();
        let listed: Vec<_> = map.entries().map(|e| e.key).collect();
        for key in StorageKey::ALL {
            assert_eq!(map.to_external_path(*key).is_some(), listed.contains(key));
        }
    }

    #[cfg(not(feature = "prepaid-sim-apn"))]
    #[test]
    fn test_pdp_keys_unmapped_without_feature() {
        let map = KeyMap::standard();
        assert_eq!(map.to_external_path(StorageKey::PdpLastConnectedContextBool), None);
        assert_eq!(map.to_external_path(StorageKey::TelephonyLastConnectedContextPlmn), None);
        assert_eq!(
            map.to_internal_key(paths::TELEPHONY_PRIVATE_PDP_LAST_CONNECTED_CONTEXT),
            None
        );
        assert_eq!(map.len(), StorageKey::ALL.len() - 3);
    }

    #[cfg(feature = "prepaid-sim-apn")]
    #[test]
    fn test_pdp_keys_mapped_with_feature() {
        let map = KeyMap::standard();
        assert_eq!(map.len(), StorageKey::ALL.len());
        assert_eq!(
            map.value_type(StorageKey::PdpLastConnectedContextProfileId),
            Some(ValueType::Int)
        );
    }

    #[test]
    fn test_unknown_path_not_found() {
        let map = KeyMap::standard();
        assert_eq!(map.to_internal_key("memory/telephony/does_not_exist"), None);
        assert_eq!(map.to_internal_key(""), None);
        assert!(matches!(
            map.resolve_path("memory/telephony/does_not_exist"),
            Err(BridgeError::UnmappedPath { .. })
        ));
        assert_eq!(
            map.resolve_path(paths::TELEPHONY_READY).unwrap(),
            StorageKey::TelephonyReady
        );
    }

    #[test]
    fn test_resolve_checks_type() {
        let map = KeyMap::standard();
        assert_eq!(
            map.resolve(StorageKey::TelephonyPlmn, ValueType::Int).unwrap(),
            paths::TELEPHONY_PLMN
        );
        assert!(matches!(
            map.resolve(StorageKey::FlightModeBool, ValueType::Int),
            Err(BridgeError::TypeMismatch {
                expected: ValueType::Bool,
                requested: ValueType::Int,
                ..
            })
        ));
    }

    #[test]
    fn test_injected_table_rejects_duplicates() {
        let dup_key = KeyMap::new([
            int(StorageKey::TelephonyPlmn, "memory/a"),
            int(StorageKey::TelephonyPlmn, "memory/b"),
        ]);
        assert!(dup_key.is_err());

        let dup_path = KeyMap::new([
            int(StorageKey::TelephonyPlmn, "memory/a"),
            int(StorageKey::TelephonyLac, "memory/a"),
        ]);
        assert!(dup_path.is_err());
    }

    #[test]
    fn test_injected_table_is_partial() {
        let map = KeyMap::new([string(StorageKey::TelephonyNwName, "memory/test/nw_name")]).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.to_external_path(StorageKey::TelephonyPlmn), None);
        assert_eq!(
            map.to_internal_key("memory/test/nw_name"),
            Some(StorageKey::TelephonyNwName)
        );
    }
}
