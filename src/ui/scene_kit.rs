//! Shared builders for the day screens.
//!
//! Every day screen is a full-screen column: title on top, a message
//! line, the scene's own widgets, and the back button at the bottom.
//! Buttons get pointer observers for hover tint; callers attach their
//! own click observer to the returned `EntityCommands`.

use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;

use crate::days::{back_label, BackPressed, DayScene};
use crate::shared::*;

pub const TEXT_LIGHT: Color = Color::srgb(1.0, 0.95, 0.97);
pub const TEXT_DARK: Color = Color::srgb(0.36, 0.23, 0.13);
pub const BUTTON_BG: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
pub const BUTTON_HOVER: Color = Color::srgba(1.0, 0.6, 0.75, 0.45);
pub const ACCENT: Color = Color::srgb(1.0, 0.0, 0.33);

/// The message line under the title.
#[derive(Component)]
pub struct SceneMessage;

/// Text inside the back button; relabelled once the day is complete.
#[derive(Component)]
pub struct BackButtonLabel;

#[derive(Component, Debug, Clone, Copy)]
pub struct HoverTint {
    pub normal: Color,
    pub hover: Color,
}

/// Full-screen root that lives exactly as long as `stage`.
pub fn scene_root(stage: Stage) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        },
        StateScoped(stage),
    )
}

pub fn spawn_title(parent: &mut ChildBuilder, text: &str, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 44.0,
            ..default()
        },
        TextColor(color),
        PickingBehavior::IGNORE,
    ));
}

pub fn spawn_message(parent: &mut ChildBuilder, text: &str, color: Color) {
    parent.spawn((
        SceneMessage,
        Text::new(text),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(color),
        PickingBehavior::IGNORE,
    ));
}

/// A rounded text button with hover tint.
pub fn spawn_button<'a>(
    parent: &'a mut ChildBuilder,
    label: &str,
    font_size: f32,
    text_color: Color,
) -> EntityCommands<'a> {
    spawn_tagged_button(parent, label, font_size, text_color, ())
}

/// Like `spawn_button`, with `tag` added to the label text so it can be
/// rewritten later.
pub fn spawn_tagged_button<'a>(
    parent: &'a mut ChildBuilder,
    label: &str,
    font_size: f32,
    text_color: Color,
    tag: impl Bundle,
) -> EntityCommands<'a> {
    let mut button = parent.spawn((
        Node {
            padding: UiRect::axes(Val::Px(22.0), Val::Px(10.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(BUTTON_BG),
        BorderRadius::all(Val::Px(24.0)),
        HoverTint {
            normal: BUTTON_BG,
            hover: BUTTON_HOVER,
        },
    ));
    button
        .observe(on_hover_over)
        .observe(on_hover_out)
        .with_children(|b| {
            b.spawn((
                tag,
                Text::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(text_color),
                PickingBehavior::IGNORE,
            ));
        });
    button
}

/// "Go Back" until the day is complete, then "Continue Journey".
pub fn spawn_back_button(parent: &mut ChildBuilder, text_color: Color) {
    parent
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor(text_color),
            BorderRadius::all(Val::Px(20.0)),
            BackgroundColor(Color::NONE),
            HoverTint {
                normal: Color::NONE,
                hover: BUTTON_HOVER,
            },
        ))
        .observe(on_hover_over)
        .observe(on_hover_out)
        .observe(|_: Trigger<Pointer<Click>>, mut back: EventWriter<BackPressed>| {
            back.send(BackPressed);
        })
        .with_children(|b| {
            b.spawn((
                BackButtonLabel,
                Text::new(back_label(false)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text_color),
                PickingBehavior::IGNORE,
            ));
        });
}

fn on_hover_over(trigger: Trigger<Pointer<Over>>, mut q: Query<(&HoverTint, &mut BackgroundColor)>) {
    if let Ok((tint, mut bg)) = q.get_mut(trigger.entity()) {
        bg.0 = tint.hover;
    }
}

fn on_hover_out(trigger: Trigger<Pointer<Out>>, mut q: Query<(&HoverTint, &mut BackgroundColor)>) {
    if let Ok((tint, mut bg)) = q.get_mut(trigger.entity()) {
        bg.0 = tint.normal;
    }
}

/// Keeps the back button's label in step with the scene's completion.
pub fn update_back_label<T: DayScene>(
    scene: Option<Res<T>>,
    mut labels: Query<&mut Text, With<BackButtonLabel>>,
) {
    let Some(scene) = scene else {
        return;
    };
    if !scene.is_changed() {
        return;
    }
    let label = back_label(scene.is_complete());
    for mut text in &mut labels {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}

pub fn set_message(labels: &mut Query<&mut Text, With<SceneMessage>>, message: &str) {
    for mut text in labels.iter_mut() {
        if text.0 != message {
            text.0 = message.to_string();
        }
    }
}

/// Registers the back-label updater for one day.
pub(super) fn track_back_label<T: DayScene>(app: &mut App) {
    app.add_systems(
        Update,
        update_back_label::<T>.run_if(in_state(T::DAY.stage())),
    );
}
