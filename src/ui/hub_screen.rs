//! The hub: a top-down map of the winding path with one orb per day, and
//! a column of checkpoint buttons. The camera rides the path as the hub
//! progress eases along it.

use bevy::prelude::*;

use super::backdrop::MainCamera;
use super::scene_kit::{spawn_tagged_button, spawn_title, HoverTint, TEXT_LIGHT};
use crate::hub::{CheckpointClicked, HubLayout, HubPath, HubProgress};
use crate::shared::*;

/// Pixels per path unit across and along the path.
const MAP_SCALE: Vec2 = Vec2::new(60.0, 14.0);
const PATH_DOTS: usize = 120;
const ORB_SIZE: f32 = 26.0;
const ORB_COLOR: Color = Color::srgb(1.0, 0.41, 0.71);
const ORB_NEAR: Color = Color::srgb(1.0, 0.84, 0.0);

#[derive(Component, Debug, Clone, Copy)]
pub struct CheckpointOrb {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct CheckpointButton {
    pub index: usize,
}

/// Path space to map space: x stays sideways, depth becomes up.
pub fn project(p: Vec3) -> Vec2 {
    Vec2::new(p.x * MAP_SCALE.x, -p.z * MAP_SCALE.y)
}

pub fn spawn_hub_screen(mut commands: Commands) {
    let path = HubPath::default();

    for i in 0..=PATH_DOTS {
        let p = project(path.point_at(i as f32 / PATH_DOTS as f32));
        commands.spawn((
            Sprite::from_color(Color::srgba(1.0, 0.9, 0.95, 0.5), Vec2::splat(4.0)),
            Transform::from_xyz(p.x, p.y, 0.0),
            StateScoped(Stage::Hub),
        ));
    }
    for index in 0..path.checkpoint_count() {
        let Some(pos) = path.checkpoint_position(index) else {
            continue;
        };
        let p = project(pos);
        commands.spawn((
            CheckpointOrb { index },
            Sprite::from_color(ORB_COLOR, Vec2::splat(ORB_SIZE)),
            Transform::from_xyz(p.x, p.y, 1.0),
            StateScoped(Stage::Hub),
        ));
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            StateScoped(Stage::Hub),
            PickingBehavior::IGNORE,
        ))
        .with_children(|root| {
            spawn_title(root, "Choose a day", TEXT_LIGHT);
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_self: AlignSelf::FlexEnd,
                    row_gap: Val::Px(8.0),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|list| {
                for day in Day::ALL {
                    let index = day.index();
                    let label = format!("{}  {}", index + 1, day.label());
                    spawn_tagged_button(list, &label, 18.0, TEXT_LIGHT, ())
                        .insert((CheckpointButton { index }, BorderColor(Color::NONE)))
                        .observe(
                            move |_: Trigger<Pointer<Click>>,
                                  mut clicks: EventWriter<CheckpointClicked>| {
                                clicks.send(CheckpointClicked { index });
                            },
                        );
                }
            });
            root.spawn((
                Text::new("Scroll to travel, click a day to visit"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(TEXT_LIGHT.with_alpha(0.7)),
                PickingBehavior::IGNORE,
            ));
        });
}

/// Camera sits on the path and turns to face the look-ahead point.
pub fn follow_path(
    progress: Option<Res<HubProgress>>,
    layout: Option<Res<HubLayout>>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let (Some(progress), Some(layout)) = (progress, layout) else {
        return;
    };
    let (pos, look) = layout.path.camera_target(progress.offset);
    let from = project(pos);
    let dir = project(look) - from;
    let angle = if dir.length_squared() > f32::EPSILON {
        -dir.x.atan2(dir.y)
    } else {
        0.0
    };
    for mut transform in &mut cameras {
        transform.translation.x = from.x;
        transform.translation.y = from.y;
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

/// The orb and button of the day currently being travelled light up.
pub fn highlight_nearest(
    time: Res<Time>,
    progress: Option<Res<HubProgress>>,
    layout: Option<Res<HubLayout>>,
    mut orbs: Query<(&CheckpointOrb, &mut Sprite, &mut Transform)>,
    mut buttons: Query<(&CheckpointButton, &mut BorderColor, &mut Node), With<HoverTint>>,
) {
    let (Some(progress), Some(layout)) = (progress, layout) else {
        return;
    };
    let nearest = layout.path.nearest_checkpoint(progress.offset);
    let pulse = 1.0 + (time.elapsed_secs() * 3.0).sin() * 0.15;
    for (orb, mut sprite, mut transform) in &mut orbs {
        let near = orb.index == nearest;
        sprite.color = if near { ORB_NEAR } else { ORB_COLOR };
        transform.scale = Vec3::splat(if near { pulse } else { 1.0 });
    }
    for (button, mut border, mut node) in &mut buttons {
        let near = button.index == nearest;
        border.0 = if near { ORB_NEAR } else { Color::NONE };
        node.border = UiRect::all(Val::Px(if near { 2.0 } else { 0.0 }));
    }
}

pub fn reset_camera(mut cameras: Query<&mut Transform, With<MainCamera>>) {
    for mut transform in &mut cameras {
        *transform = Transform::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_runs_up_the_map() {
        let path = HubPath::default();
        let start = project(path.point_at(0.0));
        let end = project(path.point_at(1.0));
        assert!(end.y > start.y);
    }
}
