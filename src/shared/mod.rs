//! Shared states, resources, events and tuning for Valentine Week.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain reaches into another domain's mutable state directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

// ═══════════════════════════════════════════════════════════════════════
// STAGE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// The one process-wide piece of mutable state: which stage is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum Stage {
    #[default]
    Start,
    Flying,
    Hub,
    Rose,
    Propose,
    Chocolate,
    Teddy,
    Promise,
    Hug,
    Kiss,
    Valentine,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::Start,
        Stage::Flying,
        Stage::Hub,
        Stage::Rose,
        Stage::Propose,
        Stage::Chocolate,
        Stage::Teddy,
        Stage::Promise,
        Stage::Hug,
        Stage::Kiss,
        Stage::Valentine,
    ];

    /// The day this stage hosts, if it is a day scene.
    pub fn day(self) -> Option<Day> {
        match self {
            Stage::Start | Stage::Flying | Stage::Hub => None,
            Stage::Rose => Some(Day::Rose),
            Stage::Propose => Some(Day::Propose),
            Stage::Chocolate => Some(Day::Chocolate),
            Stage::Teddy => Some(Day::Teddy),
            Stage::Promise => Some(Day::Promise),
            Stage::Hug => Some(Day::Hug),
            Stage::Kiss => Some(Day::Kiss),
            Stage::Valentine => Some(Day::Valentine),
        }
    }

    pub fn is_day(self) -> bool {
        self.day().is_some()
    }
}

/// The eight day scenes, in hub order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Rose,
    Propose,
    Chocolate,
    Teddy,
    Promise,
    Hug,
    Kiss,
    Valentine,
}

impl Day {
    pub const ALL: [Day; 8] = [
        Day::Rose,
        Day::Propose,
        Day::Chocolate,
        Day::Teddy,
        Day::Promise,
        Day::Hug,
        Day::Kiss,
        Day::Valentine,
    ];

    /// Checkpoint index → day. Out-of-range indices have no day.
    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Day::Rose => 0,
            Day::Propose => 1,
            Day::Chocolate => 2,
            Day::Teddy => 3,
            Day::Promise => 4,
            Day::Hug => 5,
            Day::Kiss => 6,
            Day::Valentine => 7,
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            Day::Rose => Stage::Rose,
            Day::Propose => Stage::Propose,
            Day::Chocolate => Stage::Chocolate,
            Day::Teddy => Stage::Teddy,
            Day::Promise => Stage::Promise,
            Day::Hug => Stage::Hug,
            Day::Kiss => Stage::Kiss,
            Day::Valentine => Stage::Valentine,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Rose => "Rose Day",
            Day::Propose => "Propose Day",
            Day::Chocolate => "Chocolate Day",
            Day::Teddy => "Teddy Day",
            Day::Promise => "Promise Day",
            Day::Hug => "Hug Day",
            Day::Kiss => "Kiss Day",
            Day::Valentine => "Valentine's Day",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// The stage controller's whole contract: `enter(stage)` and `back()`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageRequest {
    Enter(Stage),
    Back,
}

/// Sent once per visit when a day's mini-game reaches its terminal state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCompletedEvent {
    pub day: Day,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

/// `None` stops whatever is playing.
#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Hardware input folded into actions, rebuilt every frame in PreUpdate.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Space/Enter, left mouse or any touch is down.
    pub hold: bool,
    /// Pointer position normalised to [-1, 1] on both axes, y up.
    pub pointer: Option<Vec2>,
    /// Pointer movement this frame in logical pixels, y down.
    pub pointer_delta: Vec2,
    /// Scroll this frame, positive = further along the hub path.
    pub scroll: f32,
    pub cancel: bool,
    /// Digit 1–8 pressed this frame (0-based).
    pub day_hotkey: Option<usize>,
}

/// Which actions the input layer produces, derived from the stage.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Door,
    /// Nothing is read; used while the flythrough runs.
    Disabled,
    Hub,
    Scene,
}

// ═══════════════════════════════════════════════════════════════════════
// TUNING: loaded by the data plugin from assets/config/tuning.ron
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Tuning {
    pub flight: FlightTuning,
    pub hub: HubTuning,
    pub catch: CatchTuning,
    pub charge: ChargeTuning,
    pub rose: RoseTuning,
    pub teddy: TeddyTuning,
    pub propose: ProposeTuning,
    pub kiss: KissTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub delay_ms: u64,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubTuning {
    /// Seconds for the eased offset to close most of the gap to the target.
    pub damping: f32,
    /// Offset change per scroll line.
    pub scroll_step: f32,
}

impl Default for HubTuning {
    fn default() -> Self {
        Self {
            damping: 0.3,
            scroll_step: 1.0 / 64.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchTuning {
    pub spawn_interval_ms: u64,
    pub win_score: u32,
    pub heart_points: u32,
    pub berry_penalty: u32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
    pub field_width: f32,
    pub spawn_y: f32,
    pub miss_y: f32,
    pub item_radius: f32,
    pub basket_y: f32,
    pub basket_half_width: f32,
    pub basket_half_height: f32,
}

impl Default for CatchTuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 800,
            win_score: 10,
            heart_points: 1,
            berry_penalty: 2,
            gravity: 350.0,
            field_width: 1000.0,
            spawn_y: 420.0,
            miss_y: -420.0,
            item_radius: 22.0,
            basket_y: -250.0,
            basket_half_width: 70.0,
            basket_half_height: 35.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeTuning {
    pub charge_per_tick: f32,
    pub drain_per_tick: f32,
    pub max_energy: f32,
    pub tick_hz: f64,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            charge_per_tick: 0.8,
            drain_per_tick: 2.0,
            max_energy: 100.0,
            tick_hz: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoseTuning {
    pub bloom_step: f32,
    pub bloom_complete: f32,
}

impl Default for RoseTuning {
    fn default() -> Self {
        Self {
            bloom_step: 0.2,
            bloom_complete: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeddyTuning {
    pub hug_duration_ms: u64,
}

impl Default for TeddyTuning {
    fn default() -> Self {
        Self {
            hug_duration_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposeTuning {
    pub cork_pull_threshold_px: f32,
    pub letter_delay_ms: u64,
}

impl Default for ProposeTuning {
    fn default() -> Self {
        Self {
            cork_pull_threshold_px: 100.0,
            letter_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KissTuning {
    /// Depth units per second toward the heart.
    pub speed: f32,
    pub start_z: f32,
    pub start_y: f32,
    pub target_z: f32,
    pub hit_z: f32,
    /// Half the scene width the pointer x maps onto.
    pub half_width: f32,
}

impl Default for KissTuning {
    fn default() -> Self {
        Self {
            speed: 24.0,
            start_z: 4.0,
            start_y: -3.0,
            target_z: -10.0,
            hit_z: -9.0,
            half_width: 5.0,
        }
    }
}
