use std::sync::Arc;

use parking_lot::Mutex;

use telvconf_core::paths::{self, dnet, sim_slot, svc_domain, tapi_state};
use telvconf_core::{SettingsStore, StorageEvent, StorageOps};
use telvconf_plugin::{
    BridgeConfig, CellInfo, CoreObject, FlightMode, IconInfo, LocalHost, ModemPower,
    NetworkIdentity, NetworkSnapshot, NotificationCommand, NotificationData, PluginHost,
    RegistrationStatus, SimStatusInfo, TelephonyPlugin, VconfPlugin, NWNAME_NO_SIM,
};
use telvconf_types::{ModemState, ServiceDomainStatus, ServiceType, SimStatus, StorageKey};

const PRIMARY: &str = "modem-plugin-0";
const SECONDARY: &str = "modem-plugin-1";

struct Rig {
    host: Arc<LocalHost>,
    plugin: VconfPlugin,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    fn with_config(config: BridgeConfig) -> Self {
        let host = Arc::new(LocalHost::new());
        host.local_network().attach_modem(PRIMARY, "imcmodem0");
        host.local_network().attach_modem(SECONDARY, "imcmodem1");
        let mut plugin = VconfPlugin::new(config, host.clone());
        assert!(plugin.load());
        assert!(plugin.init());
        host.store().reset_counters();
        Self { host, plugin }
    }

    fn in_service(&self, plugin: &str) {
        self.host.local_network().set_network(
            plugin,
            NetworkSnapshot {
                service_type: Some(ServiceType::Lte),
                ..Default::default()
            },
        );
    }

    fn notify(&self, plugin: &str, data: NotificationData) {
        self.host.notify(&CoreObject::new("network", plugin), data);
    }

    fn int(&self, path: &str) -> i32 {
        self.host.store().get_int(path).unwrap()
    }

    fn string(&self, path: &str) -> String {
        self.host.store().get_str(path).unwrap()
    }
}

fn registration(roaming: bool) -> NotificationData {
    NotificationData::RegistrationStatus(RegistrationStatus {
        cs_domain: ServiceDomainStatus::Full,
        ps_domain: ServiceDomainStatus::Search,
        service_type: ServiceType::Lte,
        roaming,
    })
}

#[test]
fn test_cell_info_writes_only_changes() {
    let rig = Rig::new();
    let cell = || NotificationData::CellInfo(CellInfo { cell_id: 4711, lac: 12 });

    rig.notify(PRIMARY, cell());
    assert_eq!(rig.int(paths::TELEPHONY_CELLID), 4711);
    assert_eq!(rig.int(paths::TELEPHONY_LAC), 12);
    assert_eq!(rig.host.store().write_calls(), 2);

    rig.notify(PRIMARY, cell());
    assert_eq!(rig.host.store().write_calls(), 2);
}

#[test]
fn test_secondary_subscription_is_filtered() {
    let rig = Rig::new();
    rig.notify(
        SECONDARY,
        NotificationData::CellInfo(CellInfo { cell_id: 1, lac: 1 }),
    );
    rig.notify(SECONDARY, registration(false));
    assert_eq!(rig.host.store().write_calls(), 0);
}

#[test]
fn test_empty_names_fall_back_to_plmn() {
    let rig = Rig::new();
    rig.in_service(PRIMARY);

    rig.notify(
        PRIMARY,
        NotificationData::NetworkIdentity(NetworkIdentity {
            plmn: "310260".into(),
            short_name: String::new(),
            full_name: String::new(),
        }),
    );
    assert_eq!(rig.string(paths::TELEPHONY_NWNAME), "310260");
    assert_eq!(rig.int(paths::TELEPHONY_PLMN), 310260);
}

#[test]
fn test_long_name_wins() {
    let mut config = BridgeConfig::default();
    config
        .operators
        .insert("310260".to_string(), "Table Name".to_string());
    let rig = Rig::with_config(config);
    rig.in_service(PRIMARY);

    rig.notify(
        PRIMARY,
        NotificationData::NetworkIdentity(NetworkIdentity {
            plmn: "310260".into(),
            short_name: "Short".into(),
            full_name: "Carrier".into(),
        }),
    );
    assert_eq!(rig.string(paths::TELEPHONY_NWNAME), "Carrier");
}

#[test]
fn test_registration_status_codes() {
    let rig = Rig::new();
    rig.notify(PRIMARY, registration(false));

    assert_eq!(rig.int(paths::TELEPHONY_SVC_CS), svc_domain::ON);
    assert_eq!(rig.int(paths::TELEPHONY_SVC_PS), svc_domain::OFF);
    assert_eq!(rig.int(paths::TELEPHONY_SVCTYPE), ServiceType::Lte.code());
    assert_eq!(rig.int(paths::TELEPHONY_SVC_ROAM), 0);
}

#[test]
fn test_roaming_mismatch_hides_packet_indicator() {
    let rig = Rig::new();
    rig.host
        .store()
        .seed(paths::SETAPPL_STATE_DATA_ROAMING_BOOL, false);
    rig.host.store().seed(paths::DNET_STATE, dnet::ON);

    rig.notify(PRIMARY, registration(true));
    assert_eq!(rig.int(paths::DNET_STATE), dnet::OFF);
    assert_eq!(rig.host.store().writes_to(paths::DNET_STATE), 1);

    rig.notify(PRIMARY, registration(true));
    assert_eq!(rig.host.store().writes_to(paths::DNET_STATE), 1);
}

#[test]
fn test_roaming_allowed_keeps_packet_indicator() {
    let rig = Rig::new();
    rig.host
        .store()
        .seed(paths::SETAPPL_STATE_DATA_ROAMING_BOOL, true);
    rig.host.store().seed(paths::DNET_STATE, dnet::ON);

    rig.notify(PRIMARY, registration(true));
    assert_eq!(rig.int(paths::DNET_STATE), dnet::ON);
    assert_eq!(rig.host.store().writes_to(paths::DNET_STATE), 0);
}

#[test]
fn test_sim_status_selects_slot_by_cp_name() {
    let rig = Rig::new();

    rig.notify(
        SECONDARY,
        NotificationData::SimStatus(SimStatusInfo {
            status: SimStatus::CardNotPresent,
        }),
    );
    assert_eq!(rig.int(paths::TELEPHONY_SIM_SLOT2), sim_slot::NOT_PRESENT);
    assert_eq!(rig.int(paths::TELEPHONY_SIM_SLOT), sim_slot::UNKNOWN);
    assert_eq!(rig.string(paths::TELEPHONY_NWNAME), NWNAME_NO_SIM);
    assert_eq!(
        rig.int(paths::TELEPHONY_SIM_STATUS),
        SimStatus::CardNotPresent.code()
    );

    rig.notify(
        PRIMARY,
        NotificationData::SimStatus(SimStatusInfo {
            status: SimStatus::InitCompleted,
        }),
    );
    assert_eq!(rig.int(paths::TELEPHONY_SIM_SLOT), sim_slot::INSERTED);
}

#[test]
fn test_modem_power_cycle() {
    let rig = Rig::new();
    let power = |state| NotificationData::ModemPower(ModemPower { state });

    rig.notify(PRIMARY, power(ModemState::Online));
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::READY);
    assert!(rig
        .host
        .store()
        .get_bool(paths::TELEPHONY_PRIVATE_MODEM_STATE)
        .unwrap());

    rig.notify(PRIMARY, power(ModemState::Low));
    assert!(!rig
        .host
        .store()
        .get_bool(paths::TELEPHONY_PRIVATE_MODEM_STATE)
        .unwrap());

    rig.notify(PRIMARY, power(ModemState::Online));
    assert_eq!(rig.int(paths::TELEPHONY_PRIVATE_MODEM_ON_COUNT), 1);

    let state = rig.plugin.handler().unwrap().runtime_state();
    assert_eq!(state.last_modem_power_state, ModemState::Online);
}

#[test]
fn test_modem_error_resets_keys() {
    let rig = Rig::new();
    rig.notify(
        PRIMARY,
        NotificationData::CellInfo(CellInfo { cell_id: 9, lac: 9 }),
    );

    let error = NotificationData::ModemPower(ModemPower {
        state: ModemState::Error,
    });
    rig.notify(PRIMARY, error.clone());
    assert_eq!(rig.int(paths::TELEPHONY_CELLID), 0);
    let once = rig.host.store().snapshot();

    rig.notify(PRIMARY, error);
    assert_eq!(rig.host.store().snapshot(), once);
}

#[test]
fn test_flight_mode_tracks_power_diagnostics() {
    let rig = Rig::new();
    rig.notify(
        PRIMARY,
        NotificationData::ModemPower(ModemPower {
            state: ModemState::Online,
        }),
    );
    let tapi_writes = rig.host.store().writes_to(paths::TELEPHONY_TAPI_STATE);

    rig.notify(
        PRIMARY,
        NotificationData::FlightMode(FlightMode { enabled: true }),
    );
    assert!(rig
        .host
        .store()
        .get_bool(paths::TELEPHONY_FLIGHT_MODE)
        .unwrap());

    let state = rig.plugin.handler().unwrap().runtime_state();
    assert_eq!(state.last_modem_power_state, ModemState::Low);
    assert!(state.last_flight_mode);
    assert_eq!(
        rig.host.store().writes_to(paths::TELEPHONY_TAPI_STATE),
        tapi_writes
    );

    rig.notify(
        PRIMARY,
        NotificationData::FlightMode(FlightMode { enabled: false }),
    );
    let state = rig.plugin.handler().unwrap().runtime_state();
    assert_eq!(state.last_modem_power_state, ModemState::Online);
    assert!(!state.last_flight_mode);
    assert_eq!(rig.int(paths::TELEPHONY_PRIVATE_MODEM_ON_COUNT), 1);
}

#[test]
fn test_bootup_and_plugin_events() {
    let rig = Rig::new();
    let source = CoreObject::new("modem", PRIMARY);

    rig.host
        .notify_bare(&source, NotificationCommand::ModemBootup);
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::READY);

    rig.host
        .notify_bare(&source, NotificationCommand::ServerAddedModemPlugin);
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::NONE);

    rig.host.store().set_int(paths::TELEPHONY_RSSI, 5).unwrap();
    rig.host
        .notify_bare(&source, NotificationCommand::ServerRemovedModemPlugin);
    assert_eq!(rig.int(paths::TELEPHONY_RSSI), 0);
}

#[test]
fn test_ready_key_drives_tapi_state() {
    let rig = Rig::new();
    rig.host
        .store()
        .set_bool(paths::TELEPHONY_READY, true)
        .unwrap();
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::READY);

    rig.host
        .store()
        .set_bool(paths::TELEPHONY_READY, false)
        .unwrap();
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::NONE);
}

#[test]
fn test_ready_watcher_survives_core_callback_removal() {
    let rig = Rig::new();
    let storage = rig.host.registry().find_storage("vconf").unwrap();
    assert!(storage.set_key_callback(
        StorageKey::TelephonyReady,
        Arc::new(|_event: &StorageEvent| {}),
    ));
    assert!(storage.remove_key_callback(StorageKey::TelephonyReady));

    rig.host
        .store()
        .set_bool(paths::TELEPHONY_READY, true)
        .unwrap();
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::READY);
}

#[test]
fn test_icon_info_rssi_check_and_set() {
    let rig = Rig::new();
    let icon = |rssi| {
        NotificationData::IconInfo(IconInfo {
            rssi: Some(rssi),
            roam_icon_mode: None,
        })
    };

    rig.notify(PRIMARY, icon(3));
    assert_eq!(rig.int(paths::TELEPHONY_RSSI), 3);
    assert_eq!(rig.host.store().writes_to(paths::TELEPHONY_RSSI), 1);

    rig.notify(PRIMARY, icon(3));
    assert_eq!(rig.host.store().writes_to(paths::TELEPHONY_RSSI), 1);

    rig.notify(SECONDARY, icon(5));
    assert_eq!(rig.int(paths::TELEPHONY_RSSI), 3);
    assert_eq!(rig.host.store().writes_to(paths::TELEPHONY_RSSI), 1);
}

#[test]
fn test_modem_resume_marks_tapi_ready() {
    let rig = Rig::new();
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::NONE);

    rig.notify(
        PRIMARY,
        NotificationData::ModemPower(ModemPower {
            state: ModemState::Resume,
        }),
    );
    assert_eq!(rig.int(paths::TELEPHONY_TAPI_STATE), tapi_state::READY);
}

#[test]
fn test_roaming_without_service_keeps_packet_indicator() {
    let rig = Rig::new();
    rig.host
        .store()
        .seed(paths::SETAPPL_STATE_DATA_ROAMING_BOOL, false);
    rig.host.store().seed(paths::DNET_STATE, dnet::ON);

    rig.notify(
        PRIMARY,
        NotificationData::RegistrationStatus(RegistrationStatus {
            cs_domain: ServiceDomainStatus::Search,
            ps_domain: ServiceDomainStatus::Search,
            service_type: ServiceType::Search,
            roaming: true,
        }),
    );
    assert_eq!(rig.host.store().writes_to(paths::DNET_STATE), 0);
    assert_eq!(rig.int(paths::DNET_STATE), dnet::ON);
}

#[test]
fn test_registered_storage_reports_external_changes() {
    let rig = Rig::new();
    let storage = rig.host.registry().find_storage("vconf").unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    assert!(storage.set_key_callback(
        StorageKey::TelephonySvcRoam,
        Arc::new(move |event: &StorageEvent| sink.lock().push(event.key)),
    ));

    rig.notify(PRIMARY, registration(true));
    assert_eq!(*seen.lock(), vec![StorageKey::TelephonySvcRoam]);
    assert_eq!(storage.get_int(StorageKey::TelephonySvcRoam), 1);
}

#[test]
fn test_unload_stops_hooks() {
    let mut rig = Rig::new();
    rig.plugin.unload();

    rig.notify(
        PRIMARY,
        NotificationData::CellInfo(CellInfo { cell_id: 3, lac: 3 }),
    );
    rig.host
        .store()
        .set_bool(paths::TELEPHONY_READY, true)
        .unwrap();
    assert_eq!(rig.host.store().write_calls(), 1);
    assert!(rig.host.registry().find_storage("vconf").is_none());
}
