//! Kiss Day: tap anywhere to throw a kiss at the heart. Projectiles live
//! in depth space; sprites shrink as they travel away from the viewer.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::scene_kit::*;
use crate::days::{KissLaunched, KissVolley};
use crate::shared::*;

/// Pixels per scene unit at the launch plane.
const KISS_PX: f32 = 90.0;
/// Depth of the eye; the launch plane (z = 4) sits one unit in front.
const VIEWER_Z: f32 = 5.0;
const HEART_Y: f32 = 40.0;
const HEART_COLOR: Color = Color::srgb(1.0, 0.0, 0.33);

#[derive(Component, Debug, Clone, Copy)]
pub struct KissSprite {
    pub id: u64,
}

#[derive(Component)]
pub struct BigHeart;

#[derive(Component)]
pub struct HitCounter;

fn perspective(z: f32) -> f32 {
    1.0 / (VIEWER_Z - z).max(0.5)
}

fn kiss_transform(position: Vec3) -> Transform {
    let s = perspective(position.z);
    Transform::from_xyz(
        position.x * KISS_PX * s,
        HEART_Y + position.y * KISS_PX * s,
        2.0,
    )
    .with_scale(Vec3::splat(s * 1.5))
}

pub fn spawn_kiss_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        BigHeart,
        Sprite {
            image: asset_server.load("images/heart.png"),
            custom_size: Some(Vec2::splat(120.0)),
            color: HEART_COLOR,
            ..default()
        },
        Transform::from_xyz(0.0, HEART_Y, 1.0),
        StateScoped(Stage::Kiss),
    ));

    // Tap layer behind everything else on the screen.
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::NONE),
            StateScoped(Stage::Kiss),
        ))
        .observe(
            |trigger: Trigger<Pointer<Click>>,
             windows: Query<&Window, With<PrimaryWindow>>,
             mut launches: EventWriter<KissLaunched>| {
                let Ok(window) = windows.get_single() else {
                    return;
                };
                let width = window.width();
                if width <= 0.0 {
                    return;
                }
                let x = trigger.event().pointer_location.position.x;
                launches.send(KissLaunched {
                    x_ratio: x / width * 2.0 - 1.0,
                });
            },
        );

    commands
        .spawn((scene_root(Stage::Kiss), GlobalZIndex(10), PickingBehavior::IGNORE))
        .with_children(|root| {
            spawn_title(root, Day::Kiss.label(), TEXT_LIGHT);
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|stats| {
                stats.spawn((
                    HitCounter,
                    Text::new("Kisses: 0"),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(TEXT_LIGHT),
                    PickingBehavior::IGNORE,
                ));
                spawn_message(stats, "Tap screen to send kisses", TEXT_LIGHT);
            });
            spawn_back_button(root, TEXT_LIGHT);
        });
}

/// Keeps one sprite per live projectile, keyed by id.
pub fn sync_kiss_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    volley: Option<Res<KissVolley>>,
    mut sprites: Query<(Entity, &KissSprite, &mut Transform)>,
) {
    let Some(volley) = volley else {
        return;
    };
    let live = volley.live();
    for (entity, sprite, mut transform) in &mut sprites {
        match live.iter().find(|p| p.id == sprite.id) {
            Some(p) => *transform = kiss_transform(p.position),
            None => commands.entity(entity).despawn_recursive(),
        }
    }
    for p in live {
        if sprites.iter().any(|(_, s, _)| s.id == p.id) {
            continue;
        }
        commands.spawn((
            KissSprite { id: p.id },
            Sprite {
                image: asset_server.load("images/kiss.png"),
                custom_size: Some(Vec2::splat(48.0)),
                ..default()
            },
            kiss_transform(p.position),
            StateScoped(Stage::Kiss),
        ));
    }
}

pub fn update_kiss_screen(
    time: Res<Time>,
    volley: Option<Res<KissVolley>>,
    mut hearts: Query<(&mut Transform, &mut Sprite), With<BigHeart>>,
    mut counters: Query<&mut Text, (With<HitCounter>, Without<SceneMessage>)>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(volley) = volley else {
        return;
    };
    let now = time.elapsed_secs();
    let flash = volley.flash(now);
    for (mut transform, mut sprite) in &mut hearts {
        transform.scale = Vec3::splat(volley.heart_scale(now) / 1.5);
        let glow = flash * 0.6;
        sprite.color = Color::srgb(1.0, glow, 0.33 + 0.67 * glow);
    }
    let hits = format!("Kisses: {}", volley.hits());
    for mut text in &mut counters {
        if text.0 != hits {
            text.0 = hits.clone();
        }
    }
    let message = if volley.live().is_empty() {
        "Tap screen to send kisses"
    } else {
        "Sending Love..."
    };
    set_message(&mut messages, message);
}

pub(super) fn register(app: &mut App) {
    app.add_systems(OnEnter(Stage::Kiss), spawn_kiss_screen).add_systems(
        Update,
        (sync_kiss_sprites, update_kiss_screen).run_if(in_state(Stage::Kiss)),
    );
    track_back_label::<KissVolley>(app);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kisses_shrink_with_depth() {
        assert!(perspective(4.0) > perspective(0.0));
        assert!(perspective(0.0) > perspective(-9.0));
        assert_eq!(perspective(4.0), 1.0);
    }
}
