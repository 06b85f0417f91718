use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct ProposePlugin;

impl Plugin for ProposePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProposeAction>()
            .add_systems(OnEnter(Stage::Propose), enter_propose)
            .add_systems(
                Update,
                (handle_propose_actions, tick_letter)
                    .chain()
                    .run_if(in_state(Stage::Propose)),
            );
        register_scene::<ProposalBottle>(app);
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ProposeAction {
    /// Cork dragged upward by this many pixels.
    PullCork(f32),
    ReleaseCork,
    AcceptYes,
    DodgeNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposePhase {
    #[default]
    Corked,
    /// The cork is out; the letter is on its way.
    Uncorked,
    LetterShown,
    Accepted,
}

/// Pull the cork, read the letter, answer.
#[derive(Resource, Debug, Clone)]
pub struct ProposalBottle {
    phase: ProposePhase,
    pull: f32,
    threshold: f32,
    letter_timer: Timer,
    /// Position of the NO button, percent of the panel on each axis.
    pub decoy: Vec2,
}

impl ProposalBottle {
    pub fn new(tuning: &ProposeTuning) -> Self {
        Self {
            phase: ProposePhase::Corked,
            pull: 0.0,
            threshold: tuning.cork_pull_threshold_px,
            letter_timer: Timer::new(Duration::from_millis(tuning.letter_delay_ms), TimerMode::Once),
            decoy: Vec2::new(60.0, 50.0),
        }
    }

    pub fn phase(&self) -> ProposePhase {
        self.phase
    }

    /// Current cork offset in pixels, never negative.
    pub fn pull(&self) -> f32 {
        self.pull
    }

    pub fn drag(&mut self, upward_px: f32) {
        if self.phase != ProposePhase::Corked {
            return;
        }
        self.pull = (self.pull + upward_px).max(0.0);
    }

    /// Pops the cork when pulled far enough, otherwise it snaps back.
    pub fn release(&mut self) -> bool {
        if self.phase != ProposePhase::Corked {
            return false;
        }
        if self.pull > self.threshold {
            self.phase = ProposePhase::Uncorked;
            return true;
        }
        self.pull = 0.0;
        false
    }

    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.phase != ProposePhase::Uncorked {
            return false;
        }
        if self.letter_timer.tick(delta).just_finished() {
            self.phase = ProposePhase::LetterShown;
            return true;
        }
        false
    }

    pub fn accept(&mut self) -> bool {
        if self.phase != ProposePhase::LetterShown {
            return false;
        }
        self.phase = ProposePhase::Accepted;
        true
    }

    /// NO runs away. It never answers.
    pub fn dodge(&mut self, rng: &mut impl Rng) {
        self.decoy = Vec2::new(rng.gen_range(10.0..90.0), rng.gen_range(10.0..90.0));
    }
}

impl DayScene for ProposalBottle {
    const DAY: Day = Day::Propose;

    fn is_complete(&self) -> bool {
        self.phase == ProposePhase::Accepted
    }
}

fn enter_propose(mut commands: Commands, tuning: Res<Tuning>) {
    commands.insert_resource(ProposalBottle::new(&tuning.propose));
}

pub fn handle_propose_actions(
    mut actions: EventReader<ProposeAction>,
    bottle: Option<ResMut<ProposalBottle>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(mut bottle) = bottle else {
        return;
    };
    let mut rng = rand::thread_rng();
    for action in actions.read() {
        match *action {
            ProposeAction::PullCork(px) => bottle.drag(px),
            ProposeAction::ReleaseCork => {
                if bottle.release() {
                    info!("[Propose] Cork popped");
                    sfx.send(PlaySfxEvent {
                        sfx_id: "pop".to_string(),
                    });
                }
            }
            ProposeAction::AcceptYes => {
                bottle.accept();
            }
            ProposeAction::DodgeNo => bottle.dodge(&mut rng),
        }
    }
}

pub fn tick_letter(time: Res<Time>, bottle: Option<ResMut<ProposalBottle>>) {
    let Some(mut bottle) = bottle else {
        return;
    };
    if bottle.phase() == ProposePhase::Uncorked {
        bottle.tick(time.delta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn opened() -> ProposalBottle {
        let mut bottle = ProposalBottle::new(&ProposeTuning::default());
        bottle.drag(150.0);
        assert!(bottle.release());
        bottle.tick(Duration::from_millis(1500));
        bottle
    }

    #[test]
    fn test_short_pull_snaps_back() {
        let mut bottle = ProposalBottle::new(&ProposeTuning::default());
        bottle.drag(60.0);
        assert!(!bottle.release());
        assert_eq!(bottle.pull(), 0.0);
        assert_eq!(bottle.phase(), ProposePhase::Corked);
    }

    #[test]
    fn test_letter_waits_after_cork() {
        let mut bottle = ProposalBottle::new(&ProposeTuning::default());
        bottle.drag(101.0);
        bottle.release();
        assert!(!bottle.tick(Duration::from_millis(1000)));
        assert!(!bottle.accept());
        assert!(bottle.tick(Duration::from_millis(500)));
        assert_eq!(bottle.phase(), ProposePhase::LetterShown);
    }

    #[test]
    fn test_yes_completes() {
        let mut bottle = opened();
        assert!(bottle.accept());
        assert!(bottle.is_complete());
        assert!(!bottle.accept());
    }

    #[test]
    fn test_no_never_answers() {
        let mut bottle = opened();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            bottle.dodge(&mut rng);
            assert!((10.0..90.0).contains(&bottle.decoy.x));
            assert!((10.0..90.0).contains(&bottle.decoy.y));
        }
        assert_eq!(bottle.phase(), ProposePhase::LetterShown);
        assert!(!bottle.is_complete());
    }
}
