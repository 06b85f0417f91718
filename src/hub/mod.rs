//! Hub navigation: scroll along the path, click a checkpoint to enter
//! its day.
//!
//! Progress only moves the camera. Entering a day always takes an
//! explicit click (or digit hotkey) on one checkpoint, and every
//! checkpoint is available regardless of progress or past visits.

mod path;

pub use path::*;

use bevy::prelude::*;
use crate::shared::*;

pub struct HubPlugin;

impl Plugin for HubPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CheckpointClicked>()
            .add_systems(OnEnter(Stage::Hub), enter_hub)
            .add_systems(OnExit(Stage::Hub), exit_hub)
            .add_systems(
                Update,
                (scroll_hub, handle_checkpoint_clicks)
                    .chain()
                    .run_if(in_state(Stage::Hub)),
            );
    }
}

/// A click on checkpoint `index` (0 = Rose … 7 = Valentine).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointClicked {
    pub index: usize,
}

/// Scroll position along the hub path, scoped to one hub visit.
#[derive(Resource, Debug, Clone, Default)]
pub struct HubProgress {
    /// Eased offset the camera follows, in [0, 1].
    pub offset: f32,
    /// Where scrolling has asked to go, in [0, 1].
    pub target: f32,
}

impl HubProgress {
    pub fn scroll(&mut self, lines: f32, step: f32) {
        self.target = (self.target + lines * step).clamp(0.0, 1.0);
    }

    /// Moves `offset` toward `target`; `damping` is the smoothing time.
    pub fn ease(&mut self, dt: f32, damping: f32) {
        if damping <= 0.0 {
            self.offset = self.target;
            return;
        }
        let k = 1.0 - (-dt / damping).exp();
        self.offset += (self.target - self.offset) * k;
        if (self.target - self.offset).abs() < 1e-4 {
            self.offset = self.target;
        }
    }
}

/// Path geometry for the hub camera and orbs.
#[derive(Resource, Debug, Clone, Default)]
pub struct HubLayout {
    pub path: HubPath,
}

/// Which stage a checkpoint click leads to.
pub fn checkpoint_stage(index: usize) -> Option<Stage> {
    Day::from_index(index).map(Day::stage)
}

fn enter_hub(mut commands: Commands) {
    commands.insert_resource(HubProgress::default());
    commands.insert_resource(HubLayout::default());
}

fn exit_hub(mut commands: Commands) {
    commands.remove_resource::<HubProgress>();
    commands.remove_resource::<HubLayout>();
}

pub fn scroll_hub(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<Tuning>,
    progress: Option<ResMut<HubProgress>>,
) {
    let Some(mut progress) = progress else {
        return;
    };
    if input.scroll != 0.0 {
        progress.scroll(input.scroll, tuning.hub.scroll_step);
    }
    if progress.offset != progress.target {
        progress.ease(time.delta_secs(), tuning.hub.damping);
    }
}

/// One click, one request.
pub fn handle_checkpoint_clicks(
    mut clicks: EventReader<CheckpointClicked>,
    input: Res<PlayerInput>,
    mut requests: EventWriter<StageRequest>,
) {
    let hotkey = input.day_hotkey.map(|index| CheckpointClicked { index });
    for click in clicks.read().copied().chain(hotkey) {
        match checkpoint_stage(click.index) {
            Some(stage) => {
                info!("[Hub] Checkpoint {} -> {:?}", click.index, stage);
                requests.send(StageRequest::Enter(stage));
            }
            None => warn!("[Hub] No day at checkpoint {}", click.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoints_map_to_days_in_order() {
        let expected = [
            Stage::Rose,
            Stage::Propose,
            Stage::Chocolate,
            Stage::Teddy,
            Stage::Promise,
            Stage::Hug,
            Stage::Kiss,
            Stage::Valentine,
        ];
        for (i, stage) in expected.iter().enumerate() {
            assert_eq!(checkpoint_stage(i), Some(*stage));
        }
        assert_eq!(checkpoint_stage(8), None);
    }

    #[test]
    fn test_scroll_clamps_to_unit_range() {
        let mut progress = HubProgress::default();
        progress.scroll(-10.0, 0.1);
        assert_eq!(progress.target, 0.0);
        progress.scroll(100.0, 0.1);
        assert_eq!(progress.target, 1.0);
    }

    #[test]
    fn test_ease_converges_to_target() {
        let mut progress = HubProgress::default();
        progress.scroll(5.0, 0.1);
        for _ in 0..600 {
            progress.ease(1.0 / 60.0, 0.3);
        }
        assert_eq!(progress.offset, progress.target);
    }
}
