use serde::Serialize;
use tauri::{AppHandle, Emitter};

use super::lock_state::FieldView;
use super::state::LedgerSnapshot;

pub const LOCK_STATE_CHANGED: &str = "lock-state-changed";
pub const READINGS_UPDATED: &str = "readings-updated";
pub const LEDGER_UPDATED: &str = "ledger-updated";
pub const RIG_LINK_STATUS: &str = "rig-link-status";

/// Presentation side of the console. Called after every state change, with
/// the state lock already released.
pub trait ConsoleObserver: Send + Sync {
    fn lock_changed(&self, field: &FieldView);
    fn readings_updated(&self, fields: &[FieldView]);
    fn ledger_changed(&self, ledger: &LedgerSnapshot);
    fn link_status_changed(&self, connected: bool);
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct ReadingsUpdatedEvent<'a> {
    fields: &'a [FieldView],
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct RigLinkStatusEvent {
    connected: bool,
}

impl ConsoleObserver for AppHandle {
    fn lock_changed(&self, field: &FieldView) {
        let _ = self.emit(LOCK_STATE_CHANGED, field);
    }

    fn readings_updated(&self, fields: &[FieldView]) {
        let _ = self.emit(READINGS_UPDATED, ReadingsUpdatedEvent { fields });
    }

    fn ledger_changed(&self, ledger: &LedgerSnapshot) {
        let _ = self.emit(LEDGER_UPDATED, ledger);
    }

    fn link_status_changed(&self, connected: bool) {
        let _ = self.emit(RIG_LINK_STATUS, RigLinkStatusEvent { connected });
    }
}
