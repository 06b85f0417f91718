//! Background of every stage: the clear colour plus two gradient bands
//! and a handful of twinkling sparkles. All of it hangs off the camera,
//! so it stays put while the hub camera travels.

use bevy::prelude::*;
use rand::Rng;

use crate::registry::Ambiance;
use crate::shared::*;

const SPARKLE_COUNT: usize = 40;

#[derive(Component)]
pub struct MainCamera;

#[derive(Component, Debug, Clone, Copy)]
pub enum GradientBand {
    Top,
    Bottom,
}

/// Outdoor decoration; only shown on the start, flying and hub stages.
#[derive(Component, Debug, Clone, Copy)]
pub struct Sparkle {
    pub phase: f32,
    pub speed: f32,
}

pub fn spawn_camera(mut commands: Commands, ambiance: Res<Ambiance>) {
    let mut rng = rand::thread_rng();
    commands
        .spawn((Camera2d, MainCamera))
        .with_children(|cam| {
            let band = Vec2::new(SCREEN_WIDTH * 2.0, SCREEN_HEIGHT * 0.5);
            cam.spawn((
                GradientBand::Top,
                Sprite::from_color(ambiance.gradient[0], band),
                Transform::from_xyz(0.0, SCREEN_HEIGHT * 0.5, -900.0),
            ));
            cam.spawn((
                GradientBand::Bottom,
                Sprite::from_color(ambiance.gradient[2], band),
                Transform::from_xyz(0.0, -SCREEN_HEIGHT * 0.5, -900.0),
            ));
            for _ in 0..SPARKLE_COUNT {
                let x = rng.gen_range(-0.5..0.5) * SCREEN_WIDTH;
                let y = rng.gen_range(-0.5..0.5) * SCREEN_HEIGHT;
                let size = rng.gen_range(2.0..5.0);
                cam.spawn((
                    Sparkle {
                        phase: rng.gen_range(0.0..std::f32::consts::TAU),
                        speed: rng.gen_range(1.0..3.0),
                    },
                    Sprite::from_color(Color::srgb(1.0, 0.85, 0.4), Vec2::splat(size)),
                    Transform::from_xyz(x, y, -800.0),
                    if ambiance.show_decorations {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    },
                ));
            }
        });
}

pub fn apply_ambiance(
    ambiance: Res<Ambiance>,
    mut clear: ResMut<ClearColor>,
    mut bands: Query<(&GradientBand, &mut Sprite)>,
    mut sparkles: Query<&mut Visibility, With<Sparkle>>,
) {
    if !ambiance.is_changed() {
        return;
    }
    clear.0 = ambiance.gradient[1];
    for (band, mut sprite) in &mut bands {
        sprite.color = match band {
            GradientBand::Top => ambiance.gradient[0],
            GradientBand::Bottom => ambiance.gradient[2],
        };
    }
    let visibility = if ambiance.show_decorations {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut v in &mut sparkles {
        *v = visibility;
    }
}

pub fn twinkle(time: Res<Time>, mut sparkles: Query<(&Sparkle, &mut Sprite)>) {
    let t = time.elapsed_secs();
    for (sparkle, mut sprite) in &mut sparkles {
        let alpha = 0.35 + 0.65 * (0.5 + 0.5 * (t * sparkle.speed + sparkle.phase).sin());
        sprite.color = sprite.color.with_alpha(alpha);
    }
}
