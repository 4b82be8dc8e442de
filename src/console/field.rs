use serde::{Deserialize, Serialize};

/// The four readings the operator can lock.
///
/// Declaration order is the wire contract: the rig's button codes `0..=3`
/// address fields by [`TrackedField::index`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    RadioFrequency,
    Infrared,
    Name,
    MagneticOrientation,
}

impl TrackedField {
    pub const ALL: [TrackedField; 4] = [
        TrackedField::RadioFrequency,
        TrackedField::Infrared,
        TrackedField::Name,
        TrackedField::MagneticOrientation,
    ];

    pub fn index(self) -> usize {
        match self {
            TrackedField::RadioFrequency => 0,
            TrackedField::Infrared => 1,
            TrackedField::Name => 2,
            TrackedField::MagneticOrientation => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedField::RadioFrequency => "RF",
            TrackedField::Infrared => "IR",
            TrackedField::Name => "NAME",
            TrackedField::MagneticOrientation => "MAGNET",
        }
    }
}

/// Raw value held for a tracked field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Frequency(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_frequency(&self) -> Option<f64> {
        match self {
            FieldValue::Frequency(hz) => Some(*hz),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Frequency(_) => None,
            FieldValue::Text(text) => Some(text),
        }
    }

    /// Text shown on the field's card. Frequencies carry an `Hz` suffix.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Frequency(hz) => format!("{}Hz", format_frequency(*hz)),
            FieldValue::Text(text) => text.clone(),
        }
    }
}

/// Whole-number frequencies render without a fractional part.
pub fn format_frequency(hz: f64) -> String {
    if hz.fract() == 0.0 && hz.abs() < 1e15 {
        format!("{}", hz as i64)
    } else {
        format!("{hz}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_field() {
        for field in TrackedField::ALL {
            assert_eq!(TrackedField::from_index(field.index()), Some(field));
        }
        assert_eq!(TrackedField::from_index(4), None);
    }

    #[test]
    fn button_indices_follow_declared_order() {
        assert_eq!(TrackedField::from_index(0), Some(TrackedField::RadioFrequency));
        assert_eq!(TrackedField::from_index(1), Some(TrackedField::Infrared));
        assert_eq!(TrackedField::from_index(2), Some(TrackedField::Name));
        assert_eq!(TrackedField::from_index(3), Some(TrackedField::MagneticOrientation));
    }

    #[test]
    fn frequency_display_has_unit_suffix() {
        assert_eq!(FieldValue::Frequency(457.0).display(), "457Hz");
        assert_eq!(FieldValue::Frequency(99.5).display(), "99.5Hz");
        assert_eq!(FieldValue::Text("South".into()).display(), "South");
    }
}
