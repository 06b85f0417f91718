//! Rendering adapters for the small day scenes: each reads its scene
//! resource and redraws; clicks go back out as that day's action event.

use bevy::prelude::*;

use super::scene_kit::*;
use crate::days::*;
use crate::shared::*;

fn show(visibility: &mut Visibility, on: bool) {
    let want = if on {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != want {
        *visibility = want;
    }
}

fn overlay_panel(background: Color) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            width: Val::Px(560.0),
            margin: UiRect {
                left: Val::Px(-280.0),
                top: Val::Px(-200.0),
                ..default()
            },
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(14.0),
            padding: UiRect::all(Val::Px(32.0)),
            ..default()
        },
        BackgroundColor(background),
        BorderRadius::all(Val::Px(16.0)),
        Visibility::Hidden,
    )
}

fn paragraph(parent: &mut ChildBuilder, text: &str, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        TextLayout::new_with_justify(JustifyText::Center),
        PickingBehavior::IGNORE,
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// ROSE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct RoseBud;

pub fn spawn_rose_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        RoseBud,
        Sprite {
            image: asset_server.load("images/rose.png"),
            custom_size: Some(Vec2::splat(90.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -20.0, 1.0).with_scale(Vec3::new(0.2, 0.5, 1.0)),
        StateScoped(Stage::Rose),
    ));
    commands.spawn(scene_root(Stage::Rose)).with_children(|root| {
        spawn_title(root, Day::Rose.label(), TEXT_LIGHT);
        spawn_message(root, "Tap the bud to make it bloom", TEXT_LIGHT);
        root.spawn((
            Node {
                width: Val::Px(280.0),
                height: Val::Px(320.0),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .observe(|_: Trigger<Pointer<Click>>, mut actions: EventWriter<RoseAction>| {
            actions.send(RoseAction::TapBud);
        });
        spawn_back_button(root, TEXT_LIGHT);
    });
}

/// Grows the rose toward its bloom scale. The spin is faked by squeezing
/// the sprite horizontally.
pub fn animate_rose(
    time: Res<Time>,
    rose: Option<Res<RoseBloom>>,
    mut spin: Local<f32>,
    mut grown: Local<Vec2>,
    mut buds: Query<&mut Transform, With<RoseBud>>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(rose) = rose else {
        return;
    };
    let dt = time.delta_secs();
    if rose.is_added() {
        *grown = rose.scale().truncate();
    }
    *spin += rose.spin_speed() * dt;
    let target = rose.scale().truncate();
    let squeeze = 0.6 + 0.4 * spin.cos().abs();
    let k = (dt * 6.0).min(1.0);
    *grown = grown.lerp(target, k);
    for mut transform in &mut buds {
        transform.scale = Vec3::new(grown.x * squeeze, grown.y, 1.0);
    }
    set_message(&mut messages, rose.prompt());
}

// ═══════════════════════════════════════════════════════════════════════
// PROPOSE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposePanel {
    Bottle,
    Letter,
    Accepted,
}

#[derive(Component)]
pub struct Cork;

#[derive(Component)]
pub struct DecoyButton;

const PARCHMENT: Color = Color::srgba(1.0, 0.98, 0.94, 0.95);
const LETTER_INK: Color = Color::srgb(0.24, 0.15, 0.08);

pub fn spawn_propose_screen(mut commands: Commands) {
    commands.spawn(scene_root(Stage::Propose)).with_children(|root| {
        spawn_title(root, Day::Propose.label(), TEXT_LIGHT);
        spawn_message(root, "", TEXT_LIGHT);

        root.spawn((
            ProposePanel::Bottle,
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Inherited,
            PickingBehavior::IGNORE,
        ))
        .with_children(|bottle| {
            bottle
                .spawn((
                    Cork,
                    Node {
                        width: Val::Px(44.0),
                        height: Val::Px(40.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.72, 0.53, 0.34)),
                    BorderRadius::all(Val::Px(6.0)),
                ))
                .observe(
                    |trigger: Trigger<Pointer<Drag>>, mut actions: EventWriter<ProposeAction>| {
                        actions.send(ProposeAction::PullCork(-trigger.event().delta.y));
                    },
                )
                .observe(|_: Trigger<Pointer<DragEnd>>, mut actions: EventWriter<ProposeAction>| {
                    actions.send(ProposeAction::ReleaseCork);
                });
            bottle.spawn((
                Node {
                    width: Val::Px(110.0),
                    height: Val::Px(220.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.45, 0.75, 0.9, 0.35)),
                BorderRadius::all(Val::Px(30.0)),
                PickingBehavior::IGNORE,
            ));
        });

        root.spawn((ProposePanel::Letter, overlay_panel(PARCHMENT)))
            .with_children(|letter| {
                paragraph(letter, "My Dearest...", 30.0, TEXT_DARK);
                paragraph(
                    letter,
                    "In a world of variables, you are my only constant.\nMy love for you grows exponentially every day.",
                    18.0,
                    LETTER_INK,
                );
                paragraph(letter, "Will you be mine?", 36.0, Color::srgb(0.55, 0.0, 0.0));
                letter
                    .spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(110.0),
                            ..default()
                        },
                        PickingBehavior::IGNORE,
                    ))
                    .with_children(|answers| {
                        spawn_button(answers, "YES!", 24.0, Color::WHITE)
                            .insert((
                                Node {
                                    position_type: PositionType::Absolute,
                                    left: Val::Percent(15.0),
                                    top: Val::Percent(30.0),
                                    padding: UiRect::axes(Val::Px(36.0), Val::Px(12.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::srgb(0.35, 1.0, 0.0)),
                                HoverTint {
                                    normal: Color::srgb(0.35, 1.0, 0.0),
                                    hover: Color::srgb(0.5, 1.0, 0.3),
                                },
                            ))
                            .observe(
                                |_: Trigger<Pointer<Click>>, mut actions: EventWriter<ProposeAction>| {
                                    actions.send(ProposeAction::AcceptYes);
                                },
                            );
                        spawn_button(answers, "NO", 24.0, Color::WHITE)
                            .insert((
                                DecoyButton,
                                Node {
                                    position_type: PositionType::Absolute,
                                    left: Val::Percent(60.0),
                                    top: Val::Percent(30.0),
                                    padding: UiRect::axes(Val::Px(36.0), Val::Px(12.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::srgb(0.87, 0.09, 0.0)),
                                HoverTint {
                                    normal: Color::srgb(0.87, 0.09, 0.0),
                                    hover: Color::srgb(0.87, 0.09, 0.0),
                                },
                            ))
                            .observe(
                                |_: Trigger<Pointer<Over>>, mut actions: EventWriter<ProposeAction>| {
                                    actions.send(ProposeAction::DodgeNo);
                                },
                            )
                            .observe(
                                |_: Trigger<Pointer<Click>>, mut actions: EventWriter<ProposeAction>| {
                                    actions.send(ProposeAction::DodgeNo);
                                },
                            );
                    });
            });

        root.spawn((ProposePanel::Accepted, overlay_panel(PARCHMENT)))
            .with_children(|done| {
                paragraph(done, "YES!", 48.0, ACCENT);
                paragraph(done, "Happy Propose Day", 26.0, TEXT_DARK);
            });

        spawn_back_button(root, TEXT_LIGHT);
    });
}

pub fn update_propose_screen(
    bottle: Option<Res<ProposalBottle>>,
    mut panels: Query<(&ProposePanel, &mut Visibility)>,
    mut corks: Query<&mut Node, (With<Cork>, Without<DecoyButton>)>,
    mut decoys: Query<&mut Node, (With<DecoyButton>, Without<Cork>)>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(bottle) = bottle else {
        return;
    };
    let phase = bottle.phase();
    for (panel, mut visibility) in &mut panels {
        let on = match panel {
            ProposePanel::Bottle => matches!(phase, ProposePhase::Corked | ProposePhase::Uncorked),
            ProposePanel::Letter => phase == ProposePhase::LetterShown,
            ProposePanel::Accepted => phase == ProposePhase::Accepted,
        };
        show(&mut visibility, on);
    }
    for mut node in &mut corks {
        node.top = Val::Px(match phase {
            ProposePhase::Corked => -bottle.pull(),
            _ => -400.0,
        });
    }
    for mut node in &mut decoys {
        node.left = Val::Percent(bottle.decoy.x);
        node.top = Val::Percent(bottle.decoy.y);
    }
    let message = match phase {
        ProposePhase::Corked => "Drag the cork up to open the bottle",
        ProposePhase::Uncorked => "A message is unrolling...",
        ProposePhase::LetterShown | ProposePhase::Accepted => "",
    };
    set_message(&mut messages, message);
}

// ═══════════════════════════════════════════════════════════════════════
// TEDDY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct TeddySprite;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeddyPanel {
    Controls,
    Finished,
}

pub fn spawn_teddy_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        TeddySprite,
        Sprite {
            image: asset_server.load("images/teddy.png"),
            custom_size: Some(Vec2::splat(240.0)),
            color: TeddyColor::default().color(),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        StateScoped(Stage::Teddy),
    ));
    commands.spawn(scene_root(Stage::Teddy)).with_children(|root| {
        spawn_title(root, Day::Teddy.label(), TEXT_DARK);
        spawn_message(root, "Customize Your Teddy", TEXT_DARK);
        root.spawn((
            TeddyPanel::Controls,
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            Visibility::Inherited,
            PickingBehavior::IGNORE,
        ))
        .with_children(|controls| {
            controls
                .spawn((
                    Node {
                        column_gap: Val::Px(10.0),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|swatches| {
                    for color in TeddyColor::ALL {
                        swatches
                            .spawn((
                                Node {
                                    width: Val::Px(40.0),
                                    height: Val::Px(40.0),
                                    border: UiRect::all(Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(color.color()),
                                BorderColor(TEXT_DARK),
                                BorderRadius::MAX,
                            ))
                            .observe(
                                move |_: Trigger<Pointer<Click>>,
                                      mut actions: EventWriter<TeddyAction>| {
                                    actions.send(TeddyAction::PickColor(color));
                                },
                            );
                    }
                });
            spawn_button(controls, "Send Hug", 22.0, TEXT_DARK).observe(
                |_: Trigger<Pointer<Click>>, mut actions: EventWriter<TeddyAction>| {
                    actions.send(TeddyAction::Hug);
                },
            );
        });
        root.spawn((TeddyPanel::Finished, overlay_panel(PARCHMENT)))
            .with_children(|done| {
                paragraph(done, "Happy Teddy Day!", 40.0, ACCENT);
                paragraph(done, "Here is a warm hug for you.", 20.0, TEXT_DARK);
            });
        spawn_back_button(root, TEXT_DARK);
    });
}

pub fn update_teddy_screen(
    teddy: Option<Res<TeddyHug>>,
    mut sprites: Query<(&mut Sprite, &mut Transform), With<TeddySprite>>,
    mut panels: Query<(&TeddyPanel, &mut Visibility)>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(teddy) = teddy else {
        return;
    };
    let squash = (teddy.hug_fraction() * std::f32::consts::PI).sin();
    for (mut sprite, mut transform) in &mut sprites {
        sprite.color = teddy.color.color();
        transform.scale = Vec3::new(1.0 + squash * 0.2, 1.0 - squash * 0.25, 1.0);
    }
    for (panel, mut visibility) in &mut panels {
        let on = match panel {
            TeddyPanel::Controls => teddy.phase() == TeddyPhase::Customizing,
            TeddyPanel::Finished => teddy.is_complete(),
        };
        show(&mut visibility, on);
    }
    set_message(&mut messages, teddy.headline());
}

// ═══════════════════════════════════════════════════════════════════════
// PROMISE
// ═══════════════════════════════════════════════════════════════════════

const SKY_SIZE: f32 = 420.0;
const STAR_SPACING: f32 = 72.0;
const STAR_SIZE: f32 = 26.0;
const DOTS_PER_LINE: usize = 8;
const STAR_LIT: Color = Color::srgb(0.0, 1.0, 1.0);
const STAR_DIM: Color = Color::srgb(0.27, 0.27, 0.27);

#[derive(Component, Debug, Clone, Copy)]
pub struct StarNode {
    pub index: usize,
}

/// One dot of the line from star `segment` to star `segment + 1`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ConstellationDot {
    pub segment: usize,
}

fn sky_position(p: Vec2) -> Vec2 {
    Vec2::new(SKY_SIZE / 2.0 + p.x * STAR_SPACING, SKY_SIZE / 2.0 - p.y * STAR_SPACING)
}

pub fn spawn_promise_screen(mut commands: Commands) {
    commands.spawn(scene_root(Stage::Promise)).with_children(|root| {
        spawn_title(root, Day::Promise.label(), Color::srgb(0.68, 0.98, 0.98));
        spawn_message(root, PROMISE_INTRO, Color::srgb(0.68, 0.98, 0.98));
        root.spawn((
            Node {
                width: Val::Px(SKY_SIZE),
                height: Val::Px(SKY_SIZE),
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|sky| {
            for segment in 0..STAR_POINTS.len() - 1 {
                let a = sky_position(STAR_POINTS[segment]);
                let b = sky_position(STAR_POINTS[segment + 1]);
                for step in 1..DOTS_PER_LINE {
                    let p = a.lerp(b, step as f32 / DOTS_PER_LINE as f32);
                    sky.spawn((
                        ConstellationDot { segment },
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(p.x - 2.0),
                            top: Val::Px(p.y - 2.0),
                            width: Val::Px(4.0),
                            height: Val::Px(4.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.43, 0.85, 0.85)),
                        Visibility::Hidden,
                        PickingBehavior::IGNORE,
                    ));
                }
            }
            for (index, point) in STAR_POINTS.iter().enumerate() {
                let p = sky_position(*point);
                sky.spawn((
                    StarNode { index },
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(p.x - STAR_SIZE / 2.0),
                        top: Val::Px(p.y - STAR_SIZE / 2.0),
                        width: Val::Px(STAR_SIZE),
                        height: Val::Px(STAR_SIZE),
                        ..default()
                    },
                    BackgroundColor(STAR_DIM),
                    BorderRadius::MAX,
                ))
                .observe(
                    move |_: Trigger<Pointer<Click>>, mut selected: EventWriter<StarSelected>| {
                        selected.send(StarSelected { index });
                    },
                );
            }
        });
        spawn_back_button(root, Color::srgb(0.68, 0.98, 0.98));
    });
}

pub fn update_promise_screen(
    time: Res<Time>,
    constellation: Option<Res<Constellation>>,
    mut stars: Query<(&StarNode, &mut BackgroundColor, &mut Transform)>,
    mut dots: Query<(&ConstellationDot, &mut Visibility)>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(constellation) = constellation else {
        return;
    };
    let connected = constellation.connected();
    let next = constellation.next();
    let pulse = 1.0 + (time.elapsed_secs() * 3.0).sin() * 0.3;
    for (star, mut bg, mut transform) in &mut stars {
        let is_next = next == Some(star.index);
        let lit = star.index <= connected;
        bg.0 = if is_next || lit {
            STAR_LIT
        } else if star.index == Constellation::last_index() {
            // sits on top of the first star until it is the one to tap
            Color::NONE
        } else {
            STAR_DIM
        };
        transform.scale = Vec3::splat(if is_next { pulse } else { 1.0 });
    }
    for (dot, mut visibility) in &mut dots {
        show(&mut visibility, dot.segment < connected);
    }
    set_message(&mut messages, constellation.message());
}

// ═══════════════════════════════════════════════════════════════════════
// HUG
// ═══════════════════════════════════════════════════════════════════════

const HUGGER_SPREAD: f32 = 3.0;
const HUG_PX: f32 = 100.0;

#[derive(Component, Debug, Clone, Copy)]
pub struct Hugger {
    pub is_left: bool,
}

#[derive(Component)]
pub struct HugMeterFill;

#[derive(Component)]
pub struct HugMeterBar;

pub fn spawn_hug_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    for (is_left, image) in [(true, "images/girl.png"), (false, "images/boy.png")] {
        let x = if is_left { -HUGGER_SPREAD } else { HUGGER_SPREAD } * HUG_PX;
        commands.spawn((
            Hugger { is_left },
            Sprite {
                image: asset_server.load(image),
                custom_size: Some(Vec2::splat(150.0)),
                ..default()
            },
            Transform::from_xyz(x, -60.0, 1.0),
            StateScoped(Stage::Hug),
        ));
    }
    commands.spawn(scene_root(Stage::Hug)).with_children(|root| {
        spawn_title(root, Day::Hug.label(), Color::WHITE);
        spawn_message(root, "Hold Space / Touch Screen", Color::WHITE);
        root.spawn((
            HugMeterBar,
            Node {
                width: Val::Px(300.0),
                height: Val::Px(20.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor(Color::WHITE),
            BorderRadius::all(Val::Px(15.0)),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.3)),
            Visibility::Inherited,
            PickingBehavior::IGNORE,
        ))
        .with_children(|bar| {
            bar.spawn((
                HugMeterFill,
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(ACCENT),
                BorderRadius::all(Val::Px(15.0)),
                PickingBehavior::IGNORE,
            ));
        });
        spawn_back_button(root, Color::WHITE);
    });
}

pub fn update_hug_screen(
    time: Res<Time>,
    meter: Option<Res<HugMeter>>,
    mut huggers: Query<(&Hugger, &mut Transform)>,
    mut fills: Query<&mut Node, With<HugMeterFill>>,
    mut bars: Query<&mut Visibility, With<HugMeterBar>>,
    mut messages: Query<&mut Text, With<SceneMessage>>,
) {
    let Some(meter) = meter else {
        return;
    };
    let t = time.elapsed_secs();
    let dt = time.delta_secs();
    let finished = meter.is_complete();
    let shake = if meter.energy() > 0.0 && !finished {
        (t * 50.0).sin() * meter.energy() * 0.002 * HUG_PX
    } else {
        0.0
    };
    for (hugger, mut transform) in &mut huggers {
        let start = if hugger.is_left { -HUGGER_SPREAD } else { HUGGER_SPREAD };
        let target = meter.hugger_x(start, hugger.is_left) * HUG_PX;
        transform.translation.x += (target - transform.translation.x) * (dt * 10.0).min(1.0);
        transform.translation.x += shake;
        transform.translation.y = -60.0 + (t * 2.0).sin() * 10.0;
        transform.scale = if finished {
            Vec3::new(1.3, 0.7, 1.0)
        } else {
            Vec3::ONE
        };
    }
    for mut node in &mut fills {
        node.width = Val::Percent(meter.fraction() * 100.0);
    }
    for mut visibility in &mut bars {
        show(&mut visibility, !finished);
    }
    set_message(&mut messages, meter.headline());
}

// ═══════════════════════════════════════════════════════════════════════
// VALENTINE
// ═══════════════════════════════════════════════════════════════════════

const MEMORY_COUNT: usize = 6;
const MEMORY_FILES: [&str; MEMORY_COUNT] = [
    "images/memories/1.png",
    "images/memories/2.png",
    "images/memories/3.png",
    "images/memories/4.png",
    "images/memories/5.png",
    "images/memories/7.png",
];

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValentinePanel {
    Envelope,
    Letter,
    Celebration,
}

/// A photo circling the scene; spreads into a gallery on YES.
#[derive(Component, Debug, Clone, Copy)]
pub struct Memory {
    pub index: usize,
}

pub fn spawn_valentine_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    for (index, path) in MEMORY_FILES.iter().enumerate() {
        commands.spawn((
            Memory { index },
            Sprite {
                image: asset_server.load(*path),
                custom_size: Some(Vec2::new(120.0, 90.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            StateScoped(Stage::Valentine),
        ));
    }
    commands.spawn(scene_root(Stage::Valentine)).with_children(|root| {
        spawn_title(root, Day::Valentine.label(), TEXT_LIGHT);
        root.spawn((
            ValentinePanel::Envelope,
            Node::default(),
            Visibility::Inherited,
            PickingBehavior::IGNORE,
        ))
        .with_children(|envelope| {
            spawn_button(envelope, "Click Me", 26.0, TEXT_LIGHT).observe(
                |_: Trigger<Pointer<Click>>, mut actions: EventWriter<ValentineAction>| {
                    actions.send(ValentineAction::OpenLetter);
                },
            );
        });
        root.spawn((
            ValentinePanel::Letter,
            overlay_panel(Color::srgba(1.0, 0.98, 0.94, 0.9)),
        ))
        .with_children(|letter| {
            spawn_button(letter, "X", 18.0, TEXT_DARK)
                .insert(Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(12.0),
                    top: Val::Px(8.0),
                    padding: UiRect::all(Val::Px(6.0)),
                    ..default()
                })
                .observe(
                    |_: Trigger<Pointer<Click>>, mut actions: EventWriter<ValentineAction>| {
                        actions.send(ValentineAction::CloseLetter);
                    },
                );
            paragraph(letter, "To My Valentine", 38.0, ACCENT);
            paragraph(
                letter,
                "Every line of code I wrote for this, I wrote thinking of you.\n\nYou are the CSS to my HTML,\nThe Logic to my Controller,\nThe Heart of my Life.\n\nI love you more than words (or code) can say.",
                18.0,
                Color::srgb(0.2, 0.2, 0.2),
            );
            paragraph(letter, "Will you be my Valentine?", 30.0, Color::srgb(0.55, 0.0, 0.0));
            letter
                .spawn((
                    Node {
                        column_gap: Val::Px(15.0),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|answers| {
                    spawn_button(answers, "YES!", 22.0, Color::WHITE)
                        .insert((
                            BackgroundColor(ACCENT),
                            HoverTint {
                                normal: ACCENT,
                                hover: Color::srgb(1.0, 0.3, 0.5),
                            },
                        ))
                        .observe(
                            |_: Trigger<Pointer<Click>>, mut actions: EventWriter<ValentineAction>| {
                                actions.send(ValentineAction::SayYes);
                            },
                        );
                    spawn_button(answers, "Replay Journey", 22.0, Color::srgb(0.33, 0.33, 0.33))
                        .observe(
                            |_: Trigger<Pointer<Click>>, mut actions: EventWriter<ValentineAction>| {
                                actions.send(ValentineAction::CloseLetter);
                            },
                        );
                });
        });
        root.spawn((
            ValentinePanel::Celebration,
            Node::default(),
            Visibility::Hidden,
            PickingBehavior::IGNORE,
        ))
        .with_children(|party| {
            paragraph(party, "Happy Valentine's Day!", 48.0, ACCENT);
        });
        spawn_back_button(root, TEXT_LIGHT);
    });
}

pub fn update_valentine_screen(
    time: Res<Time>,
    letter: Option<Res<ValentineLetter>>,
    mut panels: Query<(&ValentinePanel, &mut Visibility), Without<Memory>>,
    mut memories: Query<(&Memory, &mut Transform, &mut Visibility), Without<ValentinePanel>>,
) {
    let Some(letter) = letter else {
        return;
    };
    let phase = letter.phase();
    for (panel, mut visibility) in &mut panels {
        let on = match panel {
            ValentinePanel::Envelope => phase == ValentinePhase::Sealed,
            ValentinePanel::Letter => phase == ValentinePhase::LetterOpen,
            ValentinePanel::Celebration => phase == ValentinePhase::Celebrated,
        };
        show(&mut visibility, on);
    }
    let t = time.elapsed_secs();
    let dt = time.delta_secs();
    for (memory, mut transform, mut visibility) in &mut memories {
        show(&mut visibility, phase != ValentinePhase::LetterOpen);
        let i = memory.index as f32;
        let (target, scale) = if phase == ValentinePhase::Celebrated {
            let side = if memory.index % 2 == 0 { -1.0 } else { 1.0 };
            let row = (memory.index % 3) as f32;
            (Vec2::new(side * 470.0, -180.0 + row * 150.0), 1.5)
        } else {
            let angle = i / MEMORY_COUNT as f32 * std::f32::consts::TAU + t * 0.3;
            (Vec2::new(angle.cos() * 330.0, -120.0 + i * 40.0 + angle.sin() * 30.0), 1.0)
        };
        let k = (dt * 3.0).min(1.0);
        let current = transform.translation.truncate();
        let next = current.lerp(target, k);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
        transform.scale = transform.scale.lerp(Vec3::new(scale, scale, 1.0), k);
    }
}

/// Day screens wired to their stages.
pub(super) fn register(app: &mut App) {
    app.add_systems(OnEnter(Stage::Rose), spawn_rose_screen)
        .add_systems(OnEnter(Stage::Propose), spawn_propose_screen)
        .add_systems(OnEnter(Stage::Teddy), spawn_teddy_screen)
        .add_systems(OnEnter(Stage::Promise), spawn_promise_screen)
        .add_systems(OnEnter(Stage::Hug), spawn_hug_screen)
        .add_systems(OnEnter(Stage::Valentine), spawn_valentine_screen)
        .add_systems(Update, animate_rose.run_if(in_state(Stage::Rose)))
        .add_systems(Update, update_propose_screen.run_if(in_state(Stage::Propose)))
        .add_systems(Update, update_teddy_screen.run_if(in_state(Stage::Teddy)))
        .add_systems(Update, update_promise_screen.run_if(in_state(Stage::Promise)))
        .add_systems(Update, update_hug_screen.run_if(in_state(Stage::Hug)))
        .add_systems(
            Update,
            update_valentine_screen.run_if(in_state(Stage::Valentine)),
        );
    track_back_label::<RoseBloom>(app);
    track_back_label::<ProposalBottle>(app);
    track_back_label::<TeddyHug>(app);
    track_back_label::<Constellation>(app);
    track_back_label::<HugMeter>(app);
    track_back_label::<ValentineLetter>(app);
}
