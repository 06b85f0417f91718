mod audio;
mod backdrop;
mod chocolate_screen;
mod day_screens;
mod door_screen;
mod hub_screen;
mod kiss_screen;
mod scene_kit;
mod transitions;

pub use audio::MusicState;
pub use backdrop::MainCamera;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── CAMERA, BACKDROP AND FADE OVERLAY, always present ───
        app.add_systems(
            Startup,
            (backdrop::spawn_camera, transitions::spawn_fade_overlay),
        );
        app.add_systems(
            Update,
            (
                transitions::trigger_fade_on_transition,
                transitions::update_fade,
            )
                .chain(),
        );
        app.add_systems(Update, (backdrop::apply_ambiance, backdrop::twinkle));

        // ─── AUDIO ───
        app.init_resource::<audio::MusicState>();
        app.add_systems(
            Update,
            (
                audio::music_for_stage.run_if(state_changed::<Stage>),
                audio::handle_play_music,
                audio::handle_play_sfx,
            )
                .chain(),
        );

        // ─── START DOOR AND FLYTHROUGH ───
        app.add_systems(OnEnter(Stage::Start), door_screen::spawn_door_screen);
        app.add_systems(
            Update,
            door_screen::update_door_screen.run_if(in_state(Stage::Start)),
        );
        app.add_systems(OnEnter(Stage::Flying), door_screen::spawn_flight_screen);
        app.add_systems(
            Update,
            door_screen::animate_flight.run_if(in_state(Stage::Flying)),
        );

        // ─── HUB ───
        app.add_systems(OnEnter(Stage::Hub), hub_screen::spawn_hub_screen);
        app.add_systems(OnExit(Stage::Hub), hub_screen::reset_camera);
        app.add_systems(
            Update,
            (hub_screen::follow_path, hub_screen::highlight_nearest)
                .run_if(in_state(Stage::Hub)),
        );

        // ─── DAYS ───
        day_screens::register(app);
        chocolate_screen::register(app);
        kiss_screen::register(app);
    }
}
