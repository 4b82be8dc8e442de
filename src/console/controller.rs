use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Mutex;

use super::events::ConsoleObserver;
use super::field::TrackedField;
use super::inbound::InboundEvent;
use super::ledger::LedgerRow;
use super::lock_state::SensorReading;
use super::state::{ConsoleChange, ConsoleSnapshot, ConsoleState};

/// Shared handle to the console session. Every mutation and its observer
/// notifications run under one lock, so events never interleave.
#[derive(Clone)]
pub struct ConsoleController {
    state: Arc<Mutex<ConsoleState>>,
    observer: Arc<dyn ConsoleObserver>,
}

impl ConsoleController {
    pub fn new(observer: Arc<dyn ConsoleObserver>) -> Self {
        Self::with_state(ConsoleState::new(), observer)
    }

    pub fn with_state(state: ConsoleState, observer: Arc<dyn ConsoleObserver>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            observer,
        }
    }

    pub async fn get_snapshot(&self) -> ConsoleSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn handle_event(&self, event: &InboundEvent) -> ConsoleChange {
        self.run(|state| state.apply(event)).await
    }

    pub async fn ingest_reading(&self, reading: &SensorReading) -> ConsoleChange {
        self.run(|state| state.ingest(reading)).await
    }

    pub async fn toggle_lock(&self, field: TrackedField) -> bool {
        match self.run(|state| state.toggle(field)).await {
            ConsoleChange::LockToggled { locked, .. } => locked,
            _ => false,
        }
    }

    pub async fn attempt_commit(&self) -> Option<LedgerRow> {
        let change = self
            .run(|state| {
                state
                    .attempt_commit()
                    .map_or(ConsoleChange::Unchanged, ConsoleChange::Committed)
            })
            .await;
        match change {
            ConsoleChange::Committed(row) => Some(row),
            _ => None,
        }
    }

    pub async fn undo_last(&self) -> Option<LedgerRow> {
        let change = self
            .run(|state| {
                state
                    .undo_last()
                    .map_or(ConsoleChange::Unchanged, ConsoleChange::Retracted)
            })
            .await;
        match change {
            ConsoleChange::Retracted(row) => Some(row),
            _ => None,
        }
    }

    pub fn notify_link_status(&self, connected: bool) {
        self.observer.link_status_changed(connected);
    }

    async fn run<F>(&self, mutate: F) -> ConsoleChange
    where
        F: FnOnce(&mut ConsoleState) -> ConsoleChange,
    {
        let mut guard = self.state.lock().await;
        let change = mutate(&mut guard);
        // Observers are notified before the lock is released so the webview
        // sees changes in the order they were applied.
        if !matches!(change, ConsoleChange::Unchanged) {
            self.publish(&change, &guard.snapshot());
        }
        change
    }

    fn publish(&self, change: &ConsoleChange, snapshot: &ConsoleSnapshot) {
        match change {
            ConsoleChange::Unchanged => {}
            ConsoleChange::LockToggled { field, locked } => {
                debug!("{} {}", field.as_str(), if *locked { "locked" } else { "unlocked" });
                self.observer.lock_changed(&snapshot.fields[field.index()]);
            }
            ConsoleChange::ReadingsUpdated(_) => {
                self.observer.readings_updated(&snapshot.fields);
            }
            ConsoleChange::Committed(row) => {
                info!(
                    "Committed reading #{}: {} ({})",
                    snapshot.ledger.count,
                    row.species,
                    row.name.as_deref().unwrap_or("unnamed")
                );
                self.observer.ledger_changed(&snapshot.ledger);
                for field in &snapshot.fields {
                    self.observer.lock_changed(field);
                }
            }
            ConsoleChange::Retracted(row) => {
                info!("Retracted reading {} ({})", row.id, row.species);
                self.observer.ledger_changed(&snapshot.ledger);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::inbound::ButtonCode;
    use crate::console::lock_state::FieldView;
    use crate::console::state::LedgerSnapshot;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct Recorder {
        calls: StdMutex<Vec<String>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl ConsoleObserver for Recorder {
        fn lock_changed(&self, field: &FieldView) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("lock {} {}", field.field.as_str(), field.locked));
        }

        fn readings_updated(&self, fields: &[FieldView]) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("readings {}", fields.len()));
        }

        fn ledger_changed(&self, ledger: &LedgerSnapshot) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("ledger {}", ledger.count));
        }

        fn link_status_changed(&self, connected: bool) {
            self.calls.lock().unwrap().push(format!("link {connected}"));
        }
    }

    fn controller() -> (ConsoleController, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (ConsoleController::new(recorder.clone()), recorder)
    }

    #[tokio::test]
    async fn toggle_notifies_observer() {
        let (console, recorder) = controller();
        assert!(console.toggle_lock(TrackedField::Infrared).await);
        assert_eq!(recorder.take(), vec!["lock IR true"]);
    }

    #[tokio::test]
    async fn silent_noops_do_not_notify() {
        let (console, recorder) = controller();
        assert!(console.attempt_commit().await.is_none());
        assert!(console.undo_last().await.is_none());
        console.ingest_reading(&SensorReading::default()).await;
        assert!(recorder.take().is_empty());
    }

    #[tokio::test]
    async fn commit_publishes_ledger_then_unlocks() {
        let (console, recorder) = controller();
        for code in 0..4 {
            let button = ButtonCode::from_code(code).unwrap();
            console.handle_event(&InboundEvent::Button(button)).await;
        }
        recorder.take();

        let change = console
            .handle_event(&InboundEvent::Button(ButtonCode::Commit))
            .await;
        assert!(matches!(change, ConsoleChange::Committed(_)));
        assert_eq!(
            recorder.take(),
            vec![
                "ledger 1",
                "lock RF false",
                "lock IR false",
                "lock NAME false",
                "lock MAGNET false"
            ]
        );

        console
            .handle_event(&InboundEvent::Button(ButtonCode::UndoLast))
            .await;
        assert_eq!(recorder.take(), vec!["ledger 0"]);
        assert_eq!(console.get_snapshot().await.ledger.count, 0);
    }

    /// Sleeps through the first ledger notification only.
    #[derive(Default)]
    struct SlowLedger {
        counts: StdMutex<Vec<usize>>,
    }

    impl ConsoleObserver for SlowLedger {
        fn lock_changed(&self, _field: &FieldView) {}
        fn readings_updated(&self, _fields: &[FieldView]) {}
        fn ledger_changed(&self, ledger: &LedgerSnapshot) {
            let first = self.counts.lock().unwrap().is_empty();
            if first {
                std::thread::sleep(std::time::Duration::from_millis(300));
            }
            self.counts.lock().unwrap().push(ledger.count);
        }
        fn link_status_changed(&self, _connected: bool) {}
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn notifications_follow_mutation_order() {
        let observer = Arc::new(SlowLedger::default());
        let console = ConsoleController::new(observer.clone());
        for field in TrackedField::ALL {
            console.toggle_lock(field).await;
        }

        let committing = {
            let console = console.clone();
            tokio::spawn(async move { console.attempt_commit().await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let undone = console.undo_last().await;

        assert!(committing.await.unwrap().is_some());
        assert!(undone.is_some());
        assert_eq!(console.get_snapshot().await.ledger.count, 0);
        assert_eq!(*observer.counts.lock().unwrap(), vec![1, 0]);
    }

    #[tokio::test]
    async fn link_status_is_forwarded() {
        let (console, recorder) = controller();
        console.notify_link_status(true);
        assert_eq!(recorder.take(), vec!["link true"]);
    }
}
