use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct PromisePlugin;

impl Plugin for PromisePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StarSelected>()
            .add_systems(OnEnter(Stage::Promise), enter_promise)
            .add_systems(Update, handle_star_selection.run_if(in_state(Stage::Promise)));
        register_scene::<Constellation>(app);
    }
}

/// One text per star. The last star closes the heart.
pub const PROMISES: [&str; 7] = [
    "Start the Journey",
    "I promise to always hold you when things go wrong.",
    "I promise to always listen, even when you're silent.",
    "I promise to honor the versions of you that you haven't even met yet.",
    "I promise to let you have the last bite, even if it's my favorite.",
    "I promise to protect your peace as if it were my own.",
    "I promise to love you, infinitely.",
];

/// Heart outline in scene units; star 6 sits back on star 0.
pub const STAR_POINTS: [Vec2; 7] = [
    Vec2::new(0.0, -2.5),
    Vec2::new(-2.0, -0.5),
    Vec2::new(-2.0, 1.5),
    Vec2::new(0.0, 0.5),
    Vec2::new(2.0, 1.5),
    Vec2::new(2.0, -0.5),
    Vec2::new(0.0, -2.5),
];

pub const PROMISE_INTRO: &str = "Tap the glowing star to begin...";
pub const PROMISE_FINISHED: &str = "Happy Promise Day!";

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarSelected {
    pub index: usize,
}

/// What a successful selection uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub index: usize,
    pub text: &'static str,
    /// Set only on the selection that closes the heart.
    pub finished: bool,
}

/// Stars connected in order; anything else is ignored.
#[derive(Resource, Debug, Clone, Default)]
pub struct Constellation {
    connected: usize,
    finished: bool,
}

impl Constellation {
    pub fn connected(&self) -> usize {
        self.connected
    }

    pub fn last_index() -> usize {
        STAR_POINTS.len() - 1
    }

    /// The star waiting to be tapped, if any.
    pub fn next(&self) -> Option<usize> {
        (!self.finished).then_some(self.connected + 1)
    }

    pub fn select(&mut self, index: usize) -> Option<Reveal> {
        if self.finished || index != self.connected + 1 {
            return None;
        }
        self.connected = index;
        let finished = index == Self::last_index();
        if finished {
            self.finished = true;
        }
        Some(Reveal {
            index,
            text: PROMISES[index],
            finished,
        })
    }

    /// Text above the stars for the current state.
    pub fn message(&self) -> &'static str {
        if self.finished {
            PROMISE_FINISHED
        } else if self.connected == 0 {
            PROMISE_INTRO
        } else {
            PROMISES[self.connected]
        }
    }
}

impl DayScene for Constellation {
    const DAY: Day = Day::Promise;

    fn is_complete(&self) -> bool {
        self.finished
    }
}

fn enter_promise(mut commands: Commands) {
    commands.insert_resource(Constellation::default());
}

pub fn handle_star_selection(
    mut selections: EventReader<StarSelected>,
    constellation: Option<ResMut<Constellation>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(mut constellation) = constellation else {
        return;
    };
    for selection in selections.read() {
        if let Some(reveal) = constellation.select(selection.index) {
            debug!("[Promise] Star {} connected", reveal.index);
            sfx.send(PlaySfxEvent {
                sfx_id: "chime".to_string(),
            });
        }
    }
}
