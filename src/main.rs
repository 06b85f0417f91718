mod shared;
mod data;
mod input;
mod registry;
mod stage;
mod hub;
mod days;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Valentine Week".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Stage state; screens tagged StateScoped vanish with their stage
        .init_state::<Stage>()
        .enable_state_scoped_entities::<Stage>()
        // Events
        .add_event::<StageRequest>()
        .add_event::<DayCompletedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>()
        // Data first: tuning must exist before any OnEnter runs
        .add_plugins(data::DataPlugin)
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(registry::RegistryPlugin)
        .add_plugins(stage::StagePlugin)
        .add_plugins(hub::HubPlugin)
        .add_plugins(days::DaysPlugin)
        // Presentation (also spawns the camera)
        .add_plugins(ui::UiPlugin)
        .run();
}
