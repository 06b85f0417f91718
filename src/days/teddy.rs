use std::time::Duration;

use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct TeddyPlugin;

impl Plugin for TeddyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TeddyAction>()
            .add_systems(OnEnter(Stage::Teddy), enter_teddy)
            .add_systems(
                Update,
                (handle_teddy_actions, tick_teddy_hug)
                    .chain()
                    .run_if(in_state(Stage::Teddy)),
            );
        register_scene::<TeddyHug>(app);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeddyColor {
    #[default]
    Brown,
    Pink,
    White,
    Gold,
}

impl TeddyColor {
    pub const ALL: [TeddyColor; 4] = [
        TeddyColor::Brown,
        TeddyColor::Pink,
        TeddyColor::White,
        TeddyColor::Gold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TeddyColor::Brown => "Brown",
            TeddyColor::Pink => "Pink",
            TeddyColor::White => "White",
            TeddyColor::Gold => "Gold",
        }
    }

    pub fn color(self) -> Color {
        match self {
            TeddyColor::Brown => Color::srgb_u8(0x8b, 0x45, 0x13),
            TeddyColor::Pink => Color::srgb_u8(0xff, 0x99, 0xcc),
            TeddyColor::White => Color::WHITE,
            TeddyColor::Gold => Color::srgb_u8(0xff, 0xd7, 0x00),
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeddyAction {
    PickColor(TeddyColor),
    Hug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeddyPhase {
    #[default]
    Customizing,
    /// The slow hug animation is playing.
    Hugging,
    Finished,
}

#[derive(Resource, Debug, Clone)]
pub struct TeddyHug {
    pub color: TeddyColor,
    phase: TeddyPhase,
    hug_timer: Timer,
}

impl TeddyHug {
    pub fn new(tuning: &TeddyTuning) -> Self {
        Self {
            color: TeddyColor::default(),
            phase: TeddyPhase::Customizing,
            hug_timer: Timer::new(Duration::from_millis(tuning.hug_duration_ms), TimerMode::Once),
        }
    }

    pub fn phase(&self) -> TeddyPhase {
        self.phase
    }

    /// Colours can change until the hug starts.
    pub fn pick_color(&mut self, color: TeddyColor) -> bool {
        if self.phase != TeddyPhase::Customizing {
            return false;
        }
        self.color = color;
        true
    }

    pub fn start_hug(&mut self) -> bool {
        if self.phase != TeddyPhase::Customizing {
            return false;
        }
        self.phase = TeddyPhase::Hugging;
        true
    }

    /// Returns true on the tick the hug finishes.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.phase != TeddyPhase::Hugging {
            return false;
        }
        if self.hug_timer.tick(delta).just_finished() {
            self.phase = TeddyPhase::Finished;
            return true;
        }
        false
    }

    /// 0 → 1 over the hug, for the arms closing in.
    pub fn hug_fraction(&self) -> f32 {
        match self.phase {
            TeddyPhase::Customizing => 0.0,
            TeddyPhase::Hugging => self.hug_timer.fraction(),
            TeddyPhase::Finished => 1.0,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self.phase {
            TeddyPhase::Finished => "Sent with a Hug!",
            _ => "Customize Your Teddy",
        }
    }
}

impl DayScene for TeddyHug {
    const DAY: Day = Day::Teddy;

    fn is_complete(&self) -> bool {
        self.phase == TeddyPhase::Finished
    }
}

fn enter_teddy(mut commands: Commands, tuning: Res<Tuning>) {
    commands.insert_resource(TeddyHug::new(&tuning.teddy));
}

pub fn handle_teddy_actions(mut actions: EventReader<TeddyAction>, teddy: Option<ResMut<TeddyHug>>) {
    let Some(mut teddy) = teddy else {
        return;
    };
    for action in actions.read() {
        match *action {
            TeddyAction::PickColor(color) => {
                teddy.pick_color(color);
            }
            TeddyAction::Hug => {
                if teddy.start_hug() {
                    info!("[Teddy] Hug started in {}", teddy.color.label());
                }
            }
        }
    }
}

pub fn tick_teddy_hug(time: Res<Time>, teddy: Option<ResMut<TeddyHug>>) {
    let Some(mut teddy) = teddy else {
        return;
    };
    if teddy.phase() == TeddyPhase::Hugging {
        teddy.tick(time.delta());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hug_finishes_after_duration() {
        let mut teddy = TeddyHug::new(&TeddyTuning::default());
        assert!(teddy.start_hug());
        assert!(!teddy.tick(Duration::from_millis(2999)));
        assert!(teddy.tick(Duration::from_millis(1)));
        assert!(teddy.is_complete());
        assert_eq!(teddy.headline(), "Sent with a Hug!");
    }

    #[test]
    fn test_timer_idle_until_hug_starts() {
        let mut teddy = TeddyHug::new(&TeddyTuning::default());
        assert!(!teddy.tick(Duration::from_secs(10)));
        assert_eq!(teddy.phase(), TeddyPhase::Customizing);
    }

    #[test]
    fn test_color_locked_once_hugging() {
        let mut teddy = TeddyHug::new(&TeddyTuning::default());
        assert!(teddy.pick_color(TeddyColor::Gold));
        teddy.start_hug();
        assert!(!teddy.pick_color(TeddyColor::Pink));
        assert_eq!(teddy.color, TeddyColor::Gold);
        assert!(!teddy.start_hug());
    }
}
