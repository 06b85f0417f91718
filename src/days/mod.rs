//! The eight day scenes.
//!
//! Each day owns its mini-game as a resource that exists only while its
//! stage is active: inserted fresh on `OnEnter`, removed on `OnExit`.
//! Re-entering a day always starts from scratch, and every timer the
//! scene owns dies with it. Scenes talk to the stage controller only
//! through `StageRequest::Back`.

mod rose;
mod propose;
mod chocolate;
mod teddy;
mod promise;
mod hug;
mod kiss;
mod valentine;

pub use rose::*;
pub use propose::*;
pub use chocolate::*;
pub use teddy::*;
pub use promise::*;
pub use hug::*;
pub use kiss::*;
pub use valentine::*;

use bevy::prelude::*;
use crate::shared::*;

pub struct DaysPlugin;

impl Plugin for DaysPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BackPressed>()
            .add_plugins((
                RosePlugin,
                ProposePlugin,
                ChocolatePlugin,
                TeddyPlugin,
                PromisePlugin,
                HugPlugin,
                KissPlugin,
                ValentinePlugin,
            ))
            .add_systems(Update, handle_back.run_if(in_day_stage));
    }
}

/// A day's mini-game state.
pub trait DayScene: Resource {
    const DAY: Day;

    /// True once the scene reached its terminal state. Flips the back
    /// action to "Continue Journey"; where it leads never changes.
    fn is_complete(&self) -> bool;
}

/// The back/continue button was pressed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct BackPressed;

pub fn back_label(complete: bool) -> &'static str {
    if complete {
        "Continue Journey"
    } else {
        "Go Back"
    }
}

pub fn in_day_stage(stage: Res<State<Stage>>) -> bool {
    stage.get().is_day()
}

/// Back button and Escape both leave for the hub.
pub fn handle_back(
    mut pressed: EventReader<BackPressed>,
    input: Res<PlayerInput>,
    mut requests: EventWriter<StageRequest>,
) {
    let clicked = pressed.read().count() > 0;
    if clicked || input.cancel {
        requests.send(StageRequest::Back);
    }
}

/// Wires the removal and completion announcement shared by every day.
pub(crate) fn register_scene<T: DayScene>(app: &mut App) {
    let stage = T::DAY.stage();
    app.add_systems(OnExit(stage), remove_scene::<T>).add_systems(
        Update,
        announce_completion::<T>.run_if(in_state(stage)),
    );
}

fn remove_scene<T: DayScene>(mut commands: Commands) {
    commands.remove_resource::<T>();
}

/// Sends `DayCompletedEvent` once per visit.
pub fn announce_completion<T: DayScene>(
    scene: Option<Res<T>>,
    mut announced: Local<bool>,
    mut completed: EventWriter<DayCompletedEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    let Some(scene) = scene else {
        return;
    };
    if scene.is_added() {
        *announced = false;
    }
    if !*announced && scene.is_complete() {
        *announced = true;
        info!("[Days] {} complete", T::DAY.label());
        completed.send(DayCompletedEvent { day: T::DAY });
        sfx.send(PlaySfxEvent {
            sfx_id: "fanfare".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_label_follows_completion() {
        assert_eq!(back_label(false), "Go Back");
        assert_eq!(back_label(true), "Continue Journey");
    }
}
