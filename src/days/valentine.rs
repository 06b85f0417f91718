use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct ValentinePlugin;

impl Plugin for ValentinePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ValentineAction>()
            .add_systems(OnEnter(Stage::Valentine), enter_valentine)
            .add_systems(
                Update,
                handle_valentine_actions.run_if(in_state(Stage::Valentine)),
            );
        register_scene::<ValentineLetter>(app);
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValentineAction {
    OpenLetter,
    /// Close / "Replay Journey" puts the letter back in its envelope.
    CloseLetter,
    SayYes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValentinePhase {
    #[default]
    Sealed,
    LetterOpen,
    Celebrated,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ValentineLetter {
    phase: ValentinePhase,
}

impl ValentineLetter {
    pub fn phase(&self) -> ValentinePhase {
        self.phase
    }

    pub fn apply(&mut self, action: ValentineAction) -> bool {
        let next = match (self.phase, action) {
            (ValentinePhase::Sealed, ValentineAction::OpenLetter) => ValentinePhase::LetterOpen,
            (ValentinePhase::LetterOpen, ValentineAction::CloseLetter) => ValentinePhase::Sealed,
            (ValentinePhase::LetterOpen, ValentineAction::SayYes) => ValentinePhase::Celebrated,
            _ => return false,
        };
        self.phase = next;
        true
    }
}

impl DayScene for ValentineLetter {
    const DAY: Day = Day::Valentine;

    fn is_complete(&self) -> bool {
        self.phase == ValentinePhase::Celebrated
    }
}

fn enter_valentine(mut commands: Commands) {
    commands.insert_resource(ValentineLetter::default());
}

pub fn handle_valentine_actions(
    mut actions: EventReader<ValentineAction>,
    letter: Option<ResMut<ValentineLetter>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(mut letter) = letter else {
        return;
    };
    for action in actions.read() {
        if letter.apply(*action) && *action == ValentineAction::OpenLetter {
            sfx.send(PlaySfxEvent {
                sfx_id: "chime".to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_needs_an_open_letter() {
        let mut letter = ValentineLetter::default();
        assert!(!letter.apply(ValentineAction::SayYes));
        assert!(letter.apply(ValentineAction::OpenLetter));
        assert!(letter.apply(ValentineAction::SayYes));
        assert!(letter.is_complete());
    }

    #[test]
    fn test_close_reseals() {
        let mut letter = ValentineLetter::default();
        letter.apply(ValentineAction::OpenLetter);
        assert!(letter.apply(ValentineAction::CloseLetter));
        assert_eq!(letter.phase(), ValentinePhase::Sealed);
    }

    #[test]
    fn test_celebration_is_terminal() {
        let mut letter = ValentineLetter::default();
        letter.apply(ValentineAction::OpenLetter);
        letter.apply(ValentineAction::SayYes);
        assert!(!letter.apply(ValentineAction::CloseLetter));
        assert!(!letter.apply(ValentineAction::OpenLetter));
        assert_eq!(letter.phase(), ValentinePhase::Celebrated);
    }
}
