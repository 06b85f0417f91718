//! Scene registry: the static description of every stage.
//!
//! `scene_spec` is total over `Stage`: each stage has a title, a
//! three-stop background gradient, a decoration flag and an optional
//! music track. The `Ambiance` resource mirrors the spec of whichever
//! stage is active so the rendering side only ever reads one place.

use bevy::prelude::*;
use crate::shared::*;

pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Ambiance>()
            .add_systems(Update, sync_ambiance.run_if(state_changed::<Stage>));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    pub stage: Stage,
    pub title: &'static str,
    /// Top, middle and bottom colours of the backdrop.
    pub gradient: [Color; 3],
    pub shows_decorations: bool,
    pub music: Option<&'static str>,
}

/// Trees, sparkles and fireflies belong to the outdoor stages only.
pub fn shows_background_decoration(stage: Stage) -> bool {
    matches!(stage, Stage::Start | Stage::Flying | Stage::Hub)
}

pub fn scene_spec(stage: Stage) -> SceneSpec {
    let night = [
        Color::srgb_u8(0x3c, 0x01, 0x76),
        Color::srgb_u8(0x2d, 0x00, 0x60),
        Color::srgb_u8(0x12, 0x00, 0x31),
    ];
    let (title, gradient, music) = match stage {
        Stage::Start => ("Valentine Week", night, None),
        Stage::Flying => ("", night, None),
        Stage::Hub => ("Choose a day", night, Some("hub")),
        Stage::Rose => (
            Day::Rose.label(),
            [Color::BLACK, Color::srgb_u8(0x14, 0x00, 0x08), Color::BLACK],
            None,
        ),
        Stage::Propose => (
            Day::Propose.label(),
            [
                Color::srgb_u8(0x05, 0x10, 0x20),
                Color::srgb_u8(0x0a, 0x1c, 0x38),
                Color::srgb_u8(0x05, 0x10, 0x20),
            ],
            None,
        ),
        Stage::Chocolate => (
            Day::Chocolate.label(),
            [
                Color::srgb_u8(0xff, 0xf1, 0xe0),
                Color::srgb_u8(0xf3, 0xd9, 0xc0),
                Color::srgb_u8(0xd8, 0xb0, 0x8c),
            ],
            None,
        ),
        Stage::Teddy => (
            Day::Teddy.label(),
            [
                Color::srgb_u8(0xff, 0xef, 0xf5),
                Color::srgb_u8(0xff, 0xe0, 0xec),
                Color::srgb_u8(0xff, 0xef, 0xf5),
            ],
            None,
        ),
        Stage::Promise => (
            Day::Promise.label(),
            [
                Color::srgb_u8(0x02, 0x02, 0x0a),
                Color::srgb_u8(0x04, 0x06, 0x18),
                Color::srgb_u8(0x02, 0x02, 0x0a),
            ],
            None,
        ),
        Stage::Hug => (
            Day::Hug.label(),
            [
                Color::srgb_u8(0xaa, 0xcc, 0xff),
                Color::srgb_u8(0xc4, 0xdc, 0xff),
                Color::srgb_u8(0xaa, 0xcc, 0xff),
            ],
            None,
        ),
        Stage::Kiss => (
            Day::Kiss.label(),
            [
                Color::srgb_u8(0x22, 0x00, 0x11),
                Color::srgb_u8(0x33, 0x00, 0x1a),
                Color::srgb_u8(0x22, 0x00, 0x11),
            ],
            None,
        ),
        Stage::Valentine => (
            Day::Valentine.label(),
            [
                Color::srgb_u8(0x10, 0x00, 0x10),
                Color::srgb_u8(0x20, 0x00, 0x20),
                Color::srgb_u8(0x10, 0x00, 0x10),
            ],
            Some("love"),
        ),
    };

    SceneSpec {
        stage,
        title,
        gradient,
        shows_decorations: shows_background_decoration(stage),
        music,
    }
}

/// Backdrop parameters of the active stage.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Ambiance {
    pub stage: Stage,
    pub gradient: [Color; 3],
    pub show_decorations: bool,
}

impl Default for Ambiance {
    fn default() -> Self {
        Self::for_stage(Stage::default())
    }
}

impl Ambiance {
    pub fn for_stage(stage: Stage) -> Self {
        let spec = scene_spec(stage);
        Self {
            stage,
            gradient: spec.gradient,
            show_decorations: spec.shows_decorations,
        }
    }
}

pub fn sync_ambiance(stage: Res<State<Stage>>, mut ambiance: ResMut<Ambiance>) {
    let stage = *stage.get();
    if ambiance.stage != stage {
        *ambiance = Ambiance::for_stage(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorations_only_outdoors() {
        for stage in Stage::ALL {
            assert_eq!(
                scene_spec(stage).shows_decorations,
                !stage.is_day(),
                "decoration flag wrong for {:?}",
                stage
            );
        }
    }

    #[test]
    fn test_day_titles_match_day_labels() {
        for day in Day::ALL {
            assert_eq!(scene_spec(day.stage()).title, day.label());
        }
    }

    #[test]
    fn test_hub_and_valentine_have_music() {
        let with_music: Vec<Stage> = Stage::ALL
            .into_iter()
            .filter(|s| scene_spec(*s).music.is_some())
            .collect();
        assert_eq!(with_music, vec![Stage::Hub, Stage::Valentine]);
        assert_eq!(scene_spec(Stage::Hub).music, Some("hub"));
    }
}
