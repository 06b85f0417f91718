use bevy::prelude::*;

use crate::shared::*;

/// The ENTER/CLOSE button on the start screen.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorAction {
    Toggle,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DoorState {
    pub open: bool,
}

impl DoorState {
    pub fn button_label(&self) -> &'static str {
        if self.open {
            "CLOSE"
        } else {
            "ENTER"
        }
    }

    /// Flips the door. Returns true when this opened it.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

pub fn close_door(mut door: ResMut<DoorState>) {
    door.open = false;
}

/// Opening the door starts the flythrough.
pub fn handle_door_actions(
    mut actions: EventReader<DoorAction>,
    mut door: ResMut<DoorState>,
    mut requests: EventWriter<StageRequest>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    for action in actions.read() {
        match action {
            DoorAction::Toggle => {
                if door.toggle() {
                    sfx.send(PlaySfxEvent {
                        sfx_id: "door".to_string(),
                    });
                    requests.send(StageRequest::Enter(Stage::Flying));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_label() {
        let mut door = DoorState::default();
        assert_eq!(door.button_label(), "ENTER");
        assert!(door.toggle());
        assert_eq!(door.button_label(), "CLOSE");
        assert!(!door.toggle());
        assert_eq!(door.button_label(), "ENTER");
    }
}
