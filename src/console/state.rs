use serde::{Deserialize, Serialize};

use super::field::TrackedField;
use super::inbound::{ButtonCode, InboundEvent};
use super::ledger::{LedgerRow, ReadingLedger};
use super::lock_state::{FieldView, LockState, SensorReading};
use super::species::SpeciesMatcher;

/// What a single event did to the console.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleChange {
    Unchanged,
    LockToggled { field: TrackedField, locked: bool },
    ReadingsUpdated(Vec<TrackedField>),
    Committed(LedgerRow),
    Retracted(LedgerRow),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRowView {
    #[serde(flatten)]
    pub row: LedgerRow,
    pub cells: [String; 5],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub count: usize,
    pub rows: Vec<LedgerRowView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSnapshot {
    pub fields: Vec<FieldView>,
    pub ledger: LedgerSnapshot,
}

/// Lock state, ledger and classifier for one operator session.
#[derive(Debug, Clone, Default)]
pub struct ConsoleState {
    locks: LockState,
    ledger: ReadingLedger,
    matcher: SpeciesMatcher,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matcher(matcher: SpeciesMatcher) -> Self {
        Self {
            matcher,
            ..Self::default()
        }
    }

    pub fn locks(&self) -> &LockState {
        &self.locks
    }

    pub fn ledger(&self) -> &ReadingLedger {
        &self.ledger
    }

    pub fn apply(&mut self, event: &InboundEvent) -> ConsoleChange {
        match event {
            InboundEvent::Readings(reading) => self.ingest(reading),
            InboundEvent::Button(ButtonCode::ToggleLock(field)) => self.toggle(*field),
            InboundEvent::Button(ButtonCode::Commit) => self
                .attempt_commit()
                .map_or(ConsoleChange::Unchanged, ConsoleChange::Committed),
            InboundEvent::Button(ButtonCode::UndoLast) => self
                .undo_last()
                .map_or(ConsoleChange::Unchanged, ConsoleChange::Retracted),
        }
    }

    pub fn toggle(&mut self, field: TrackedField) -> ConsoleChange {
        let locked = self.locks.toggle(field);
        ConsoleChange::LockToggled { field, locked }
    }

    pub fn ingest(&mut self, reading: &SensorReading) -> ConsoleChange {
        let updated = self.locks.ingest_reading(reading);
        if updated.is_empty() {
            ConsoleChange::Unchanged
        } else {
            ConsoleChange::ReadingsUpdated(updated)
        }
    }

    /// Classifies and records the locked reading set, then unlocks every
    /// field. Does nothing while any field is unlocked.
    pub fn attempt_commit(&mut self) -> Option<LedgerRow> {
        if !self.locks.all_locked() {
            return None;
        }

        let infrared = self.locks.frequency(TrackedField::Infrared);
        let radio_frequency = self.locks.frequency(TrackedField::RadioFrequency);
        let magnetic = self
            .locks
            .text(TrackedField::MagneticOrientation)
            .map(str::to_string);
        let name = self.locks.text(TrackedField::Name).map(str::to_string);

        let species = self.matcher.classify(
            infrared,
            radio_frequency,
            magnetic.as_deref().unwrap_or_default(),
        );

        let row = LedgerRow::new(name, species, infrared, radio_frequency, magnetic);
        self.ledger.commit(row.clone());
        self.locks.reset();
        Some(row)
    }

    pub fn undo_last(&mut self) -> Option<LedgerRow> {
        self.ledger.undo_last()
    }

    pub fn ledger_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            count: self.ledger.len(),
            rows: self
                .ledger
                .rows()
                .iter()
                .map(|row| LedgerRowView {
                    cells: row.cells(),
                    row: row.clone(),
                })
                .collect(),
        }
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            fields: self.locks.views(),
            ledger: self.ledger_snapshot(),
        }
    }
}
