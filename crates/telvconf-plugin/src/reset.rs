//! Reset of the volatile telephony keys

use telvconf_core::paths::{self, disp_condition, pb_init, rssi, sim_slot, svc_domain, svc_roam, svctype};
use telvconf_core::SettingsStore;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy)]
enum ResetValue {
    Int(i32),
    Str(&'static str),
}

const RESET_DEFAULTS: &[(&str, ResetValue)] = &[
    (paths::TELEPHONY_NWNAME, ResetValue::Str("")),
    (paths::TELEPHONY_PLMN, ResetValue::Int(0)),
    (paths::TELEPHONY_LAC, ResetValue::Int(0)),
    (paths::TELEPHONY_CELLID, ResetValue::Int(0)),
    (paths::TELEPHONY_SVCTYPE, ResetValue::Int(svctype::NONE)),
    (paths::TELEPHONY_SVC_CS, ResetValue::Int(svc_domain::UNKNOWN)),
    (paths::TELEPHONY_SVC_PS, ResetValue::Int(svc_domain::UNKNOWN)),
    (paths::TELEPHONY_SVC_ROAM, ResetValue::Int(svc_roam::OFF)),
    (paths::TELEPHONY_SIM_SLOT, ResetValue::Int(sim_slot::UNKNOWN)),
    (paths::TELEPHONY_SIM_SLOT2, ResetValue::Int(sim_slot::UNKNOWN)),
    (paths::TELEPHONY_SIM_PB_INIT, ResetValue::Int(pb_init::NONE)),
    (
        paths::TELEPHONY_SPN_DISP_CONDITION,
        ResetValue::Int(disp_condition::INVALID),
    ),
    (paths::TELEPHONY_SPN_NAME, ResetValue::Str("")),
    (paths::TELEPHONY_RSSI, ResetValue::Int(rssi::LEVEL_0)),
    (paths::TELEPHONY_NITZ_GMT, ResetValue::Int(0)),
    (paths::TELEPHONY_NITZ_EVENT_GMT, ResetValue::Int(0)),
    (paths::TELEPHONY_NITZ_ZONE, ResetValue::Str("")),
];

#[cfg(feature = "cdma")]
const CDMA_RESET_DEFAULTS: &[(&str, ResetValue)] = &[(
    paths::TELEPHONY_ROAM_ICON_MODE,
    ResetValue::Int(paths::roam_icon::OFF),
)];

#[cfg(not(feature = "cdma"))]
const CDMA_RESET_DEFAULTS: &[(&str, ResetValue)] = &[];

/// Outcome of a reset pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub written: usize,
    pub failed: Vec<String>,
}

impl ResetReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Paths the reset writes, in write order
pub fn reset_paths() -> impl Iterator<Item = &'static str> {
    RESET_DEFAULTS
        .iter()
        .chain(CDMA_RESET_DEFAULTS)
        .map(|(path, _)| *path)
}

/// Write every volatile telephony key back to its "no service" default
///
/// Best effort: a failed write is logged and recorded, and the remaining
/// keys are still written.
pub fn reset_telephony_keys(store: &dyn SettingsStore) -> ResetReport {
    let mut report = ResetReport::default();

    for (path, value) in RESET_DEFAULTS.iter().chain(CDMA_RESET_DEFAULTS) {
        let result = match *value {
            ResetValue::Int(v) => store.set_int(path, v),
            ResetValue::Str(v) => store.set_str(path, v),
        };
        match result {
            Ok(()) => report.written += 1,
            Err(e) => {
                warn!(path = %path, error = %e, "Reset write failed");
                report.failed.push(path.to_string());
            }
        }
    }

    info!(
        written = report.written,
        failed = report.failed.len(),
        "Telephony keys reset"
    );
    report
}
