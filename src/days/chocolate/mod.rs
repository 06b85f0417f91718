//! Chocolate Day: catch falling sweets in a basket.
//!
//! The falling and overlap testing live in `physics` and run on the fixed
//! tick, so a long frame cannot carry an item past the basket. This module
//! reacts to the `ItemCaught` / `ItemMissed` reports they produce later in
//! the same frame.

mod physics;
mod spawner;

pub use physics::*;
pub use spawner::*;

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct ChocolatePlugin;

impl Plugin for ChocolatePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemCaught>()
            .add_event::<ItemMissed>()
            .add_systems(OnEnter(Stage::Chocolate), (enter_chocolate, physics::spawn_basket))
            .add_systems(
                FixedUpdate,
                (physics::fall_items, physics::detect_contacts)
                    .chain()
                    .run_if(in_state(Stage::Chocolate)),
            )
            .add_systems(
                Update,
                (physics::move_basket, spawner::spawn_items, score_catches)
                    .chain()
                    .run_if(in_state(Stage::Chocolate)),
            );
        register_scene::<CatchGame>(app);
    }
}

// ─── Items ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Heart,
    Truffle,
    Berry,
}

impl ItemKind {
    /// Maps a uniform roll in [0, 1) to a kind: 20% berry, 30% heart,
    /// 50% truffle.
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.8 {
            ItemKind::Berry
        } else if roll > 0.5 {
            ItemKind::Heart
        } else {
            ItemKind::Truffle
        }
    }

    pub fn feedback(self) -> &'static str {
        match self {
            ItemKind::Heart => "Sweet! +1",
            ItemKind::Berry => "Ouch! Bitter! -2",
            ItemKind::Truffle => "Yum!",
        }
    }
}

/// The basket's sensor touched item `id`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCaught {
    pub id: u64,
}

/// Item `id` fell past the bottom of the field.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMissed {
    pub id: u64,
}

// ─── Game state ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatchPhase {
    #[default]
    Playing,
    Won,
}

#[derive(Resource, Debug, Clone)]
pub struct CatchGame {
    score: u32,
    phase: CatchPhase,
    live: HashMap<u64, ItemKind>,
    next_id: u64,
    message: &'static str,
    spawn_timer: Timer,
    tuning: CatchTuning,
}

impl CatchGame {
    pub fn new(tuning: &CatchTuning) -> Self {
        Self {
            score: 0,
            phase: CatchPhase::Playing,
            live: HashMap::new(),
            next_id: 0,
            message: "Catch the Hearts!",
            spawn_timer: Timer::new(
                Duration::from_millis(tuning.spawn_interval_ms),
                TimerMode::Repeating,
            ),
            tuning: tuning.clone(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> CatchPhase {
        self.phase
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn tuning(&self) -> &CatchTuning {
        &self.tuning
    }

    /// Sweetness meter fill in [0, 1].
    pub fn meter(&self) -> f32 {
        self.score as f32 / self.tuning.win_score.max(1) as f32
    }

    /// Registers a new item and returns its id.
    pub fn spawn(&mut self, kind: ItemKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, kind);
        id
    }

    /// How many items are due this frame. Nothing spawns once won.
    pub fn tick_spawner(&mut self, delta: Duration) -> u32 {
        if self.phase != CatchPhase::Playing {
            return 0;
        }
        self.spawn_timer.tick(delta).times_finished_this_tick()
    }

    /// Scores item `id` once. Unknown or already-scored ids return `None`,
    /// as does every catch after the game is won.
    pub fn capture(&mut self, id: u64) -> Option<ItemKind> {
        let kind = self.live.remove(&id)?;
        if self.phase == CatchPhase::Won {
            return None;
        }
        self.score = match kind {
            ItemKind::Heart => (self.score + self.tuning.heart_points).min(self.tuning.win_score),
            ItemKind::Berry => self.score.saturating_sub(self.tuning.berry_penalty),
            ItemKind::Truffle => self.score,
        };
        self.message = kind.feedback();
        if self.score >= self.tuning.win_score {
            self.phase = CatchPhase::Won;
        }
        Some(kind)
    }

    pub fn miss(&mut self, id: u64) -> bool {
        self.live.remove(&id).is_some()
    }
}

impl DayScene for CatchGame {
    const DAY: Day = Day::Chocolate;

    fn is_complete(&self) -> bool {
        self.phase == CatchPhase::Won
    }
}

fn enter_chocolate(mut commands: Commands, tuning: Res<Tuning>) {
    commands.insert_resource(CatchGame::new(&tuning.catch));
}

pub fn score_catches(
    mut caught: EventReader<ItemCaught>,
    mut missed: EventReader<ItemMissed>,
    game: Option<ResMut<CatchGame>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(mut game) = game else {
        return;
    };
    for event in caught.read() {
        let Some(kind) = game.capture(event.id) else {
            continue;
        };
        sfx.send(PlaySfxEvent {
            sfx_id: "pop".to_string(),
        });
        if kind == ItemKind::Heart && game.phase() == CatchPhase::Won {
            info!("[Chocolate] Won with score {}", game.score());
        }
    }
    for event in missed.read() {
        game.miss(event.id);
    }
}
