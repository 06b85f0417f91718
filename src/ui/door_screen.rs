//! Start screen (the closed door) and the flythrough that follows it.

use bevy::prelude::*;

use super::scene_kit::{spawn_tagged_button, spawn_title, TEXT_LIGHT};
use crate::stage::{DoorAction, DoorState, FlightClock};
use crate::shared::*;

const DOOR_WIDTH: f32 = 220.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct DoorPanel {
    pub left: bool,
}

#[derive(Component)]
pub struct DoorButtonLabel;

/// The arch the camera flies through; grows with the flight.
#[derive(Component)]
pub struct FlightArch;

pub fn spawn_door_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    let left = asset_server.load("images/leftdoor.png");
    let right = asset_server.load("images/rightdoor.png");
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceEvenly,
                align_items: AlignItems::Center,
                ..default()
            },
            StateScoped(Stage::Start),
        ))
        .with_children(|root| {
            spawn_title(root, "Valentine Week", TEXT_LIGHT);
            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                ..default()
            })
            .with_children(|doors| {
                for (is_left, image) in [(true, left), (false, right)] {
                    doors.spawn((
                        DoorPanel { left: is_left },
                        ImageNode::new(image),
                        Node {
                            width: Val::Px(DOOR_WIDTH / 2.0),
                            height: Val::Px(DOOR_WIDTH * 1.4),
                            ..default()
                        },
                        PickingBehavior::IGNORE,
                    ));
                }
            });
            spawn_tagged_button(root, "ENTER", 28.0, TEXT_LIGHT, DoorButtonLabel).observe(
                |_: Trigger<Pointer<Click>>, mut actions: EventWriter<DoorAction>| {
                    actions.send(DoorAction::Toggle);
                },
            );
        });
}

/// Swings the panels and flips the button label with the door state.
pub fn update_door_screen(
    door: Res<DoorState>,
    mut panels: Query<(&DoorPanel, &mut Node)>,
    mut labels: Query<&mut Text, With<DoorButtonLabel>>,
) {
    if !door.is_changed() {
        return;
    }
    for (panel, mut node) in &mut panels {
        node.width = Val::Px(if door.open { 8.0 } else { DOOR_WIDTH / 2.0 });
        node.margin = if door.open {
            let gap = Val::Px(DOOR_WIDTH / 2.0 - 8.0);
            if panel.left {
                UiRect::right(gap)
            } else {
                UiRect::left(gap)
            }
        } else {
            UiRect::ZERO
        };
    }
    for mut text in &mut labels {
        text.0 = door.button_label().to_string();
    }
}

pub fn spawn_flight_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            StateScoped(Stage::Flying),
            PickingBehavior::IGNORE,
        ))
        .with_children(|root| {
            root.spawn((
                FlightArch,
                ImageNode::new(asset_server.load("images/arch.png")),
                Node {
                    width: Val::Px(DOOR_WIDTH * 1.5),
                    height: Val::Px(DOOR_WIDTH * 1.5),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ));
        });
}

/// The arch rushes toward the camera and fades as the flight runs out.
pub fn animate_flight(
    clock: Option<Res<FlightClock>>,
    mut arches: Query<(&mut Node, &mut ImageNode), With<FlightArch>>,
) {
    let Some(clock) = clock else {
        return;
    };
    let f = clock.fraction();
    let size = DOOR_WIDTH * 1.5 * (1.0 + f * f * 4.0);
    for (mut node, mut image) in &mut arches {
        node.width = Val::Px(size);
        node.height = Val::Px(size);
        image.color = Color::WHITE.with_alpha(1.0 - f);
    }
}
