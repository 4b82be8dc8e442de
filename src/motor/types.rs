use serde::{Deserialize, Serialize};

/// Keys the relay forwards to the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorKey {
    Forward,
    Backward,
    Left,
    Right,
    SpecialLeft,
    SpecialRight,
}

impl MotorKey {
    /// Maps a browser `KeyboardEvent.key` value. Unmapped keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(MotorKey::Forward),
            "s" => Some(MotorKey::Backward),
            "a" => Some(MotorKey::Left),
            "d" => Some(MotorKey::Right),
            "q" => Some(MotorKey::SpecialLeft),
            "e" => Some(MotorKey::SpecialRight),
            _ => None,
        }
    }
}

/// Body of `POST /controllerdata`: one 0/1 flag per motor input.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MotorCommand {
    pub forward: u8,
    pub backward: u8,
    pub left: u8,
    pub right: u8,
    pub special_left: u8,
    pub special_right: u8,
}

impl MotorCommand {
    pub fn apply(&mut self, key: MotorKey, pressed: bool) {
        let flag = u8::from(pressed);
        match key {
            MotorKey::Forward => self.forward = flag,
            MotorKey::Backward => self.backward = flag,
            MotorKey::Left => self.left = flag,
            MotorKey::Right => self.right = flag,
            MotorKey::SpecialLeft => self.special_left = flag,
            MotorKey::SpecialRight => self.special_right = flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        assert_eq!(MotorKey::from_key("W"), Some(MotorKey::Forward));
        assert_eq!(MotorKey::from_key("e"), Some(MotorKey::SpecialRight));
        assert_eq!(MotorKey::from_key("x"), None);
        assert_eq!(MotorKey::from_key("ArrowUp"), None);
    }

    #[test]
    fn press_and_release_toggle_one_flag() {
        let mut command = MotorCommand::default();
        command.apply(MotorKey::Left, true);
        command.apply(MotorKey::Forward, true);
        assert_eq!(
            command,
            MotorCommand {
                forward: 1,
                left: 1,
                ..Default::default()
            }
        );

        command.apply(MotorKey::Left, false);
        assert_eq!(command.left, 0);
        assert_eq!(command.forward, 1);
    }

    #[test]
    fn payload_uses_rig_field_names() {
        let mut command = MotorCommand::default();
        command.apply(MotorKey::SpecialLeft, true);
        let json = serde_json::to_value(command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "forward": 0,
                "backward": 0,
                "left": 0,
                "right": 0,
                "specialLeft": 1,
                "specialRight": 0
            })
        );
    }
}
