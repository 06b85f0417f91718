//! Chocolate Day: sprites for the basket and falling items, the
//! sweetness meter and the victory card.

use bevy::prelude::*;

use super::scene_kit::*;
use crate::days::{Basket, CatchGame, CatchPhase, FallingItem, ItemKind};
use crate::shared::*;

const CHOCOLATE_TEXT: Color = Color::srgb(0.24, 0.15, 0.14);
const METER_FILL: Color = Color::srgb(0.82, 0.41, 0.12);

#[derive(Component)]
pub struct SweetnessFill;

#[derive(Component)]
pub struct ScoreLabel;

#[derive(Component)]
pub struct VictoryCard;

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Heart => Color::srgb(1.0, 0.08, 0.58),
        ItemKind::Truffle => Color::srgb(0.36, 0.25, 0.2),
        ItemKind::Berry => Color::srgb(0.55, 0.0, 0.55),
    }
}

pub fn spawn_chocolate_screen(mut commands: Commands) {
    commands
        .spawn(scene_root(Stage::Chocolate))
        .insert(PickingBehavior::IGNORE)
        .with_children(|root| {
            spawn_title(root, Day::Chocolate.label(), CHOCOLATE_TEXT);
            spawn_message(root, "Catch the Hearts!", CHOCOLATE_TEXT);
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(6.0),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|meter| {
                meter.spawn((
                    ScoreLabel,
                    Text::new("0"),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(CHOCOLATE_TEXT),
                    PickingBehavior::IGNORE,
                ));
                meter
                    .spawn((
                        Node {
                            width: Val::Px(320.0),
                            height: Val::Px(18.0),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BorderColor(CHOCOLATE_TEXT),
                        BorderRadius::all(Val::Px(9.0)),
                        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.4)),
                        PickingBehavior::IGNORE,
                    ))
                    .with_children(|bar| {
                        bar.spawn((
                            SweetnessFill,
                            Node {
                                width: Val::Percent(0.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(METER_FILL),
                            BorderRadius::all(Val::Px(9.0)),
                            PickingBehavior::IGNORE,
                        ));
                    });
            });
            root.spawn((
                VictoryCard,
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    padding: UiRect::all(Val::Px(28.0)),
                    row_gap: Val::Px(10.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 0.98, 0.94, 0.92)),
                BorderRadius::all(Val::Px(16.0)),
                Visibility::Hidden,
                PickingBehavior::IGNORE,
            ))
            .with_children(|card| {
                for (text, size) in [
                    ("Sweet Victory!", 40.0),
                    ("You've filled the sweetness meter!", 20.0),
                ] {
                    card.spawn((
                        Text::new(text),
                        TextFont {
                            font_size: size,
                            ..default()
                        },
                        TextColor(CHOCOLATE_TEXT),
                        PickingBehavior::IGNORE,
                    ));
                }
            });
            spawn_back_button(root, CHOCOLATE_TEXT);
        });
}

/// Gives freshly spawned game entities something to look at.
pub fn dress_catch_entities(
    mut commands: Commands,
    tuning: Res<Tuning>,
    items: Query<(Entity, &FallingItem), Added<FallingItem>>,
    baskets: Query<Entity, Added<Basket>>,
) {
    let size = Vec2::splat(tuning.catch.item_radius * 2.0);
    for (entity, item) in &items {
        commands
            .entity(entity)
            .insert(Sprite::from_color(item_color(item.kind), size));
    }
    let basket = Vec2::new(
        tuning.catch.basket_half_width * 2.0,
        tuning.catch.basket_half_height * 2.0,
    );
    for entity in &baskets {
        commands
            .entity(entity)
            .insert(Sprite::from_color(Color::srgb(0.55, 0.35, 0.2), basket));
    }
}

pub fn update_chocolate_screen(
    game: Option<Res<CatchGame>>,
    mut fills: Query<&mut Node, With<SweetnessFill>>,
    mut scores: Query<&mut Text, (With<ScoreLabel>, Without<SceneMessage>)>,
    mut cards: Query<&mut Visibility, With<VictoryCard>>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(game) = game else {
        return;
    };
    if !game.is_changed() {
        return;
    }
    for mut node in &mut fills {
        node.width = Val::Percent(game.meter() * 100.0);
    }
    for mut text in &mut scores {
        text.0 = format!("{} / {}", game.score(), game.tuning().win_score);
    }
    let won = game.phase() == CatchPhase::Won;
    for mut visibility in &mut cards {
        *visibility = if won {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    set_message(&mut messages, game.message());
}

pub(super) fn register(app: &mut App) {
    app.add_systems(OnEnter(Stage::Chocolate), spawn_chocolate_screen)
        .add_systems(
            Update,
            (dress_catch_entities, update_chocolate_screen)
                .run_if(in_state(Stage::Chocolate)),
        );
    track_back_label::<CatchGame>(app);
}
