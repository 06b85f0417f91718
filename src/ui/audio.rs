use bevy::prelude::*;

use crate::registry::scene_spec;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MUSIC STATE: tracks the currently playing music entity
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Maps SFX IDs sent by the scenes to audio file paths.
pub fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "pop" => Some("audio/sfx/pop.ogg"),
        "chime" => Some("audio/sfx/chime.ogg"),
        "fanfare" => Some("audio/sfx/fanfare.ogg"),
        "door" => Some("audio/sfx/door.ogg"),
        _ => None,
    }
}

pub fn music_path(track_id: &str) -> Option<&'static str> {
    match track_id {
        "love" => Some("audio/music/love.ogg"),
        "hub" => Some("audio/music/hub.ogg"),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Spawns one-shot players that despawn when done. Unknown ids are
/// skipped; a sound that fails to load just stays silent.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        match sfx_path(&event.sfx_id) {
            Some(path) => {
                commands.spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::DESPAWN,
                ));
            }
            None => debug!("[Audio] No sound for '{}'", event.sfx_id),
        }
    }
}

/// Stops the current track and starts the requested one, looping.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        if music_state.current_track_id == event.track_id {
            continue;
        }
        if let Some(entity) = music_state.current_track.take() {
            commands.entity(entity).despawn_recursive();
        }
        music_state.current_track_id = None;

        let Some(track_id) = event.track_id.as_deref() else {
            continue;
        };
        let Some(path) = music_path(track_id) else {
            warn!("[Audio] Unknown music track '{}'", track_id);
            continue;
        };
        let entity = commands
            .spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::LOOP,
            ))
            .id();
        music_state.current_track = Some(entity);
        music_state.current_track_id = Some(track_id.to_string());
    }
}

/// Every stage plays whatever its registry entry names, or silence.
pub fn music_for_stage(stage: Res<State<Stage>>, mut music: EventWriter<PlayMusicEvent>) {
    let track = scene_spec(*stage.get()).music;
    music.send(PlayMusicEvent {
        track_id: track.map(str::to_string),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_sound_is_mapped() {
        for id in ["pop", "chime", "fanfare", "door"] {
            assert!(sfx_path(id).is_some(), "{} has no file", id);
        }
        assert_eq!(sfx_path("nope"), None);
    }

    #[test]
    fn test_registry_tracks_have_files() {
        for stage in Stage::ALL {
            if let Some(track) = scene_spec(stage).music {
                assert!(music_path(track).is_some(), "{} has no file", track);
            }
        }
    }
}
