use serde::{Deserialize, Serialize};

use super::field::{FieldValue, TrackedField};

/// One push from the rig. Absent fields leave the console untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    pub radio_frequency: Option<f64>,
    pub infrared: Option<f64>,
    pub magnetic_orientation: Option<String>,
    pub name: Option<String>,
}

impl SensorReading {
    fn value_for(&self, field: TrackedField) -> Option<FieldValue> {
        match field {
            TrackedField::RadioFrequency => self.radio_frequency.map(FieldValue::Frequency),
            TrackedField::Infrared => self.infrared.map(FieldValue::Frequency),
            TrackedField::Name => self.name.clone().map(FieldValue::Text),
            TrackedField::MagneticOrientation => {
                self.magnetic_orientation.clone().map(FieldValue::Text)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct FieldSlot {
    locked: bool,
    value: Option<FieldValue>,
}

/// Per-field view handed to the webview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: TrackedField,
    pub locked: bool,
    pub value: Option<FieldValue>,
    pub display: String,
}

/// Lock flag and latest value for each tracked field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockState {
    slots: [FieldSlot; 4],
}

impl LockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the lock on `field` and returns the new flag.
    pub fn toggle(&mut self, field: TrackedField) -> bool {
        let slot = &mut self.slots[field.index()];
        slot.locked = !slot.locked;
        slot.locked
    }

    pub fn is_locked(&self, field: TrackedField) -> bool {
        self.slots[field.index()].locked
    }

    /// Applies a push to every unlocked field it carries. Returns the fields
    /// whose value was replaced.
    pub fn ingest_reading(&mut self, reading: &SensorReading) -> Vec<TrackedField> {
        let mut updated = Vec::new();
        for field in TrackedField::ALL {
            let Some(value) = reading.value_for(field) else {
                continue;
            };
            let slot = &mut self.slots[field.index()];
            if slot.locked {
                continue;
            }
            slot.value = Some(value);
            updated.push(field);
        }
        updated
    }

    pub fn all_locked(&self) -> bool {
        self.slots.iter().all(|slot| slot.locked)
    }

    /// Unlocks every field. Values are kept until the next push replaces them.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.locked = false;
        }
    }

    pub fn value(&self, field: TrackedField) -> Option<&FieldValue> {
        self.slots[field.index()].value.as_ref()
    }

    pub fn frequency(&self, field: TrackedField) -> Option<f64> {
        self.value(field).and_then(FieldValue::as_frequency)
    }

    pub fn text(&self, field: TrackedField) -> Option<&str> {
        self.value(field).and_then(FieldValue::as_text)
    }

    pub fn view(&self, field: TrackedField) -> FieldView {
        let slot = &self.slots[field.index()];
        FieldView {
            field,
            locked: slot.locked,
            value: slot.value.clone(),
            display: slot
                .value
                .as_ref()
                .map(FieldValue::display)
                .unwrap_or_default(),
        }
    }

    pub fn views(&self) -> Vec<FieldView> {
        TrackedField::ALL.iter().map(|field| self.view(*field)).collect()
    }
}
