use bevy::prelude::*;

use super::{register_scene, DayScene};
use crate::shared::*;

pub struct RosePlugin;

impl Plugin for RosePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RoseAction>()
            .add_systems(OnEnter(Stage::Rose), enter_rose)
            .add_systems(Update, handle_rose_actions.run_if(in_state(Stage::Rose)));
        register_scene::<RoseBloom>(app);
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoseAction {
    TapBud,
}

/// Tap the bud until it blooms.
#[derive(Resource, Debug, Clone)]
pub struct RoseBloom {
    bloom: f32,
    step: f32,
    complete_at: f32,
    complete: bool,
}

impl RoseBloom {
    pub fn new(tuning: &RoseTuning) -> Self {
        Self {
            bloom: 0.0,
            step: tuning.bloom_step,
            complete_at: tuning.bloom_complete,
            complete: false,
        }
    }

    /// 0 = closed bud, 1 = full bloom.
    pub fn bloom(&self) -> f32 {
        self.bloom
    }

    /// Returns true on the tap that finishes the bloom. Taps after that
    /// change nothing.
    pub fn tap(&mut self) -> bool {
        if self.complete {
            return false;
        }
        self.bloom = (self.bloom + self.step).min(1.0);
        if self.bloom >= self.complete_at {
            self.complete = true;
            return true;
        }
        false
    }

    pub fn prompt(&self) -> &'static str {
        if self.complete {
            "Happy Rose Day"
        } else {
            "Tap the bud to make it bloom"
        }
    }

    /// Target scale of the rose for the current bloom.
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            0.2 + self.bloom * 2.9,
            0.5 + self.bloom * 2.5,
            0.1 + self.bloom * 2.9,
        )
    }

    /// Radians per second; a bud spins fast, a bloom turns slowly.
    pub fn spin_speed(&self) -> f32 {
        2.0 - self.bloom * 1.5
    }
}

impl DayScene for RoseBloom {
    const DAY: Day = Day::Rose;

    fn is_complete(&self) -> bool {
        self.complete
    }
}

fn enter_rose(mut commands: Commands, tuning: Res<Tuning>) {
    commands.insert_resource(RoseBloom::new(&tuning.rose));
}

pub fn handle_rose_actions(
    mut actions: EventReader<RoseAction>,
    rose: Option<ResMut<RoseBloom>>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(mut rose) = rose else {
        return;
    };
    for action in actions.read() {
        match action {
            RoseAction::TapBud => {
                if rose.is_complete() {
                    continue;
                }
                rose.tap();
                sfx.send(PlaySfxEvent {
                    sfx_id: "pop".to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_taps_bloom_the_rose() {
        let mut rose = RoseBloom::new(&RoseTuning::default());
        for _ in 0..4 {
            assert!(!rose.tap());
            assert!(!rose.is_complete());
        }
        assert!(rose.tap());
        assert!(rose.is_complete());
        assert_eq!(rose.bloom(), 1.0);
        assert_eq!(rose.prompt(), "Happy Rose Day");
    }

    #[test]
    fn test_bloom_frozen_after_completion() {
        let mut rose = RoseBloom::new(&RoseTuning::default());
        for _ in 0..5 {
            rose.tap();
        }
        let bloom = rose.bloom();
        assert!(!rose.tap());
        assert_eq!(rose.bloom(), bloom);
    }

    #[test]
    fn test_bud_spins_faster_than_bloom() {
        let mut rose = RoseBloom::new(&RoseTuning::default());
        let bud_spin = rose.spin_speed();
        for _ in 0..5 {
            rose.tap();
        }
        assert!(rose.spin_speed() < bud_spin);
    }
}
