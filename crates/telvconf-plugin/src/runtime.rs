//! Power and flight-mode bookkeeping across notifications

use chrono::{DateTime, Utc};
use telvconf_core::{paths, SettingsStore};
use telvconf_types::ModemState;
use tracing::{info, warn};

/// Mutable state the handler carries between notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeState {
    pub last_modem_power_state: ModemState,
    pub last_flight_mode: bool,
    pub last_power_change: DateTime<Utc>,
}

impl RuntimeState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_modem_power_state: ModemState::Unknown,
            last_flight_mode: false,
            last_power_change: now,
        }
    }
}

/// One logged modem power transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerTransition {
    pub from: ModemState,
    pub to: ModemState,
    pub elapsed_secs: i64,
    /// Modem on-count after the transition, when it was bumped
    pub on_count: Option<i32>,
}

impl RuntimeState {
    /// Record that the modem reached `state` at `now`
    ///
    /// Only Low→Online and Online→Low are logged. The first Online or Low
    /// after start just records the state. Low→Online bumps the persistent
    /// modem on-count.
    pub fn record_power_state(
        &mut self,
        state: ModemState,
        now: DateTime<Utc>,
        store: &dyn SettingsStore,
    ) -> Option<PowerTransition> {
        let from = self.last_modem_power_state;
        let transition = match (from, state) {
            (ModemState::Low, ModemState::Online) => {
                let count = store
                    .get_int(paths::TELEPHONY_PRIVATE_MODEM_ON_COUNT)
                    .unwrap_or(0)
                    + 1;
                if let Err(e) = store.set_int(paths::TELEPHONY_PRIVATE_MODEM_ON_COUNT, count) {
                    warn!(error = %e, "Failed to store modem on-count");
                }
                Some(self.transition(from, state, now, Some(count)))
            }
            (ModemState::Online, ModemState::Low) => Some(self.transition(from, state, now, None)),
            (ModemState::Unknown, ModemState::Online | ModemState::Low) => None,
            _ => return None,
        };

        self.last_modem_power_state = state;
        self.last_power_change = now;
        transition
    }

    fn transition(
        &self,
        from: ModemState,
        to: ModemState,
        now: DateTime<Utc>,
        on_count: Option<i32>,
    ) -> PowerTransition {
        let elapsed_secs = (now - self.last_power_change).num_seconds();
        info!(
            from = ?from,
            to = ?to,
            elapsed_secs,
            on_count = ?on_count,
            "Modem power transition"
        );
        PowerTransition {
            from,
            to,
            elapsed_secs,
            on_count,
        }
    }
}
