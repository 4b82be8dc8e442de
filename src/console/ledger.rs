use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::format_frequency;

pub const NOT_AVAILABLE: &str = "N/A";

/// A committed, classified reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    pub id: String,
    pub committed_at: DateTime<Utc>,
    pub name: Option<String>,
    pub species: String,
    pub infrared: Option<f64>,
    pub radio_frequency: Option<f64>,
    pub magnetic_orientation: Option<String>,
}

impl LedgerRow {
    pub fn new(
        name: Option<String>,
        species: impl Into<String>,
        infrared: Option<f64>,
        radio_frequency: Option<f64>,
        magnetic_orientation: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            committed_at: Utc::now(),
            name,
            species: species.into(),
            infrared,
            radio_frequency,
            magnetic_orientation,
        }
    }

    /// Table cells in column order: name, species, IR, RF, magnet.
    pub fn cells(&self) -> [String; 5] {
        let frequency = |hz: Option<f64>| {
            hz.map(|hz| format!("{}Hz", format_frequency(hz)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        let text = |value: &Option<String>| {
            value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        [
            text(&self.name),
            self.species.clone(),
            frequency(self.infrared),
            frequency(self.radio_frequency),
            text(&self.magnetic_orientation),
        ]
    }
}

/// Ordered results of the session. Undo removes the newest row outright.
#[derive(Debug, Clone, Default)]
pub struct ReadingLedger {
    rows: Vec<LedgerRow>,
}

impl ReadingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, row: LedgerRow) {
        self.rows.push(row);
    }

    /// Removes and returns the newest row; `None` on an empty ledger.
    pub fn undo_last(&mut self) -> Option<LedgerRow> {
        self.rows.pop()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> LedgerRow {
        LedgerRow::new(
            Some(name.into()),
            "Wibbo",
            Some(457.0),
            None,
            Some("South".into()),
        )
    }

    #[test]
    fn commit_appends_in_order() {
        let mut ledger = ReadingLedger::new();
        ledger.commit(row("first"));
        ledger.commit(row("second"));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.rows()[0].name.as_deref(), Some("first"));
        assert_eq!(ledger.rows()[1].name.as_deref(), Some("second"));
    }

    #[test]
    fn undo_on_empty_is_noop() {
        let mut ledger = ReadingLedger::new();
        assert!(ledger.undo_last().is_none());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.undo_last().is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn undo_removes_only_the_newest_row() {
        let mut ledger = ReadingLedger::new();
        ledger.commit(row("keep"));
        ledger.commit(row("drop"));

        let removed = ledger.undo_last().map(|r| r.name);
        assert_eq!(removed, Some(Some("drop".to_string())));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.rows()[0].name.as_deref(), Some("keep"));
    }

    #[test]
    fn cells_fill_missing_values_with_na() {
        let row = LedgerRow::new(None, "Unknown species", None, Some(100.0), None);
        assert_eq!(
            row.cells(),
            [
                "N/A".to_string(),
                "Unknown species".to_string(),
                "N/A".to_string(),
                "100Hz".to_string(),
                "N/A".to_string(),
            ]
        );
    }

    #[test]
    fn rows_get_distinct_ids() {
        assert_ne!(row("a").id, row("a").id);
    }
}
