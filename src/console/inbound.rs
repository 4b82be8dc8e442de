use serde_json::Value;

use super::field::TrackedField;
use super::lock_state::SensorReading;

pub const NEW_READINGS_EVENT: &str = "new_readings";
pub const BUTTON_PRESSED_EVENT: &str = "buttonPressed";

/// Discrete rig button, decoded from its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonCode {
    ToggleLock(TrackedField),
    Commit,
    UndoLast,
}

impl ButtonCode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0..=3 => TrackedField::from_index(code as usize).map(ButtonCode::ToggleLock),
            4 => Some(ButtonCode::Commit),
            5 => Some(ButtonCode::UndoLast),
            _ => None,
        }
    }
}

/// Push events the console reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Readings(SensorReading),
    Button(ButtonCode),
}

impl InboundEvent {
    /// Decodes a named push event. Unknown events, unparseable payloads and
    /// out-of-range button codes yield `None`.
    pub fn parse(event: &str, data: &str) -> Option<Self> {
        match event {
            NEW_READINGS_EVENT => parse_readings(data).map(InboundEvent::Readings),
            BUTTON_PRESSED_EVENT => parse_button(data).map(InboundEvent::Button),
            _ => None,
        }
    }
}

fn parse_readings(data: &str) -> Option<SensorReading> {
    let payload: Value = serde_json::from_str(data).ok()?;
    let object = payload.as_object()?;

    Some(SensorReading {
        radio_frequency: object.get("RF").and_then(frequency_of),
        infrared: object.get("IR").and_then(frequency_of),
        magnetic_orientation: object.get("MAGNETIC").and_then(text_of),
        name: object.get("NAME").and_then(text_of),
    })
}

fn frequency_of(value: &Value) -> Option<f64> {
    let hz = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => {
            let text = text.trim();
            let text = text.strip_suffix("Hz").unwrap_or(text).trim_end();
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };
    hz.is_finite().then_some(hz)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Reads the leading integer of the payload and ignores whatever follows it,
/// so `"4.0"` and `"4 extra"` both decode as code 4.
fn parse_button(data: &str) -> Option<ButtonCode> {
    let trimmed = data.trim().trim_matches('"').trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let code = digits[..end].parse::<i64>().ok()?;
    ButtonCode::from_code(if negative { -code } else { code })
}
