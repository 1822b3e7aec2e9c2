use std::sync::Arc;

use proptest::prelude::*;

use telvconf_core::paths;
use telvconf_core::SettingsStore;
use telvconf_plugin::{
    BridgeConfig, CellInfo, CoreObject, LocalHost, NetworkIdentity, NetworkSnapshot,
    NotificationData, TelephonyPlugin, VconfPlugin,
};
use telvconf_types::ServiceType;

fn started() -> (Arc<LocalHost>, VconfPlugin) {
    let host = Arc::new(LocalHost::new());
    host.local_network().attach_modem("p0", "modem0");
    host.local_network().set_network(
        "p0",
        NetworkSnapshot {
            service_type: Some(ServiceType::Umts3G),
            ..Default::default()
        },
    );
    let mut plugin = VconfPlugin::new(BridgeConfig::default(), host.clone());
    assert!(plugin.init());
    (host, plugin)
}

proptest! {
    #[test]
    fn repeated_cell_info_writes_once(cell_id in 1..i32::MAX, lac in 1..65535i32) {
        let (host, _plugin) = started();
        let source = CoreObject::new("network", "p0");
        let data = NotificationData::CellInfo(CellInfo { cell_id, lac });

        host.notify(&source, data.clone());
        let after_first = host.store().write_calls();
        host.notify(&source, data);

        prop_assert_eq!(host.store().write_calls(), after_first);
        prop_assert_eq!(host.store().get_int(paths::TELEPHONY_CELLID).unwrap(), cell_id);
    }

    #[test]
    fn nameless_identity_shows_plmn(plmn in "[1-9][0-9]{4,5}") {
        let (host, _plugin) = started();
        let source = CoreObject::new("network", "p0");

        host.notify(
            &source,
            NotificationData::NetworkIdentity(NetworkIdentity {
                plmn: plmn.clone(),
                ..Default::default()
            }),
        );

        prop_assert_eq!(host.store().get_str(paths::TELEPHONY_NWNAME).unwrap(), plmn.clone());
        prop_assert_eq!(
            host.store().get_int(paths::TELEPHONY_PLMN).unwrap(),
            plmn.parse::<i32>().unwrap()
        );
    }
}
