use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

/// Wheel pixels that count as one scroll line.
const PIXELS_PER_LINE: f32 = 40.0;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<InputContext>()
            .add_systems(
                PreUpdate,
                (manage_input_context, reset_and_read_input).chain(),
            );
    }
}

/// The single point where hardware input becomes actions.
///
/// `hold` is one boolean merged across keyboard, mouse and touch, so a
/// release or touch cancel on whichever source was active clears it.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
    mut last_pointer_px: Local<Option<Vec2>>,
) {
    *input = PlayerInput::default();

    let window = windows.get_single().ok();
    let pointer_px = window.and_then(|w| {
        touches
            .iter()
            .next()
            .map(|t| t.position())
            .or_else(|| w.cursor_position())
    });

    let wheel_lines: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();

    if *context == InputContext::Disabled {
        *last_pointer_px = pointer_px;
        return;
    }

    input.hold = keys.pressed(KeyCode::Space)
        || keys.pressed(KeyCode::Enter)
        || mouse.pressed(MouseButton::Left)
        || touches.iter().next().is_some();
    input.cancel = keys.just_pressed(KeyCode::Escape);

    if let (Some(w), Some(px)) = (window, pointer_px) {
        let half = Vec2::new(w.width(), w.height()) * 0.5;
        if half.x > 0.0 && half.y > 0.0 {
            input.pointer = Some(Vec2::new(
                ((px.x - half.x) / half.x).clamp(-1.0, 1.0),
                ((half.y - px.y) / half.y).clamp(-1.0, 1.0),
            ));
        }
        if let Some(last) = *last_pointer_px {
            input.pointer_delta = px - last;
        }
    }
    *last_pointer_px = pointer_px;

    if *context == InputContext::Hub {
        // Wheel down and arrow down both move further along the path.
        let mut lines = -wheel_lines;
        if keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS) {
            lines += 0.5;
        }
        if keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW) {
            lines -= 0.5;
        }
        if touches.iter().next().is_some() {
            lines -= input.pointer_delta.y / PIXELS_PER_LINE;
        }
        input.scroll = lines;

        for (i, key) in [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
        ]
        .iter()
        .enumerate()
        {
            if keys.just_pressed(*key) {
                input.day_hotkey = Some(i);
                break;
            }
        }
    }
}

/// Derives InputContext from the current stage.
fn manage_input_context(stage: Res<State<Stage>>, mut context: ResMut<InputContext>) {
    let next = context_for(*stage.get());
    if *context != next {
        *context = next;
    }
}

pub fn context_for(stage: Stage) -> InputContext {
    match stage {
        Stage::Start => InputContext::Door,
        Stage::Flying => InputContext::Disabled,
        Stage::Hub => InputContext::Hub,
        _ => InputContext::Scene,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn input_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<Stage>()
            .add_event::<MouseWheel>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .add_plugins(InputPlugin);
        app.update();
        app
    }

    fn hold(app: &App) -> bool {
        app.world().resource::<PlayerInput>().hold
    }

    #[test]
    fn test_hold_merges_keyboard_and_mouse() {
        let mut app = input_app();
        assert!(!hold(&app));

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert!(hold(&app));

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(KeyCode::Space);
        app.update();
        assert!(hold(&app), "The mouse is still down");

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        app.update();
        assert!(!hold(&app));
    }

    #[test]
    fn test_nothing_is_held_while_flying() {
        let mut app = input_app();
        app.world_mut()
            .resource_mut::<NextState<Stage>>()
            .set(Stage::Flying);
        app.update();

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        assert_eq!(
            *app.world().resource::<InputContext>(),
            InputContext::Disabled
        );
        assert!(!hold(&app));
    }

    #[test]
    fn test_flight_disables_input() {
        assert_eq!(context_for(Stage::Flying), InputContext::Disabled);
        assert_eq!(context_for(Stage::Start), InputContext::Door);
        assert_eq!(context_for(Stage::Hub), InputContext::Hub);
        for day in Day::ALL {
            assert_eq!(context_for(day.stage()), InputContext::Scene);
        }
    }
}
