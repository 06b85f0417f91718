use bevy::prelude::*;
use crate::shared::*;

/// Marker for the screen fade overlay
#[derive(Component)]
pub struct ScreenFadeOverlay;

/// Covers every stage change with black, then reveals the new stage.
#[derive(Resource, Debug, Clone)]
pub struct ScreenFade {
    /// 0.0 transparent, 1.0 opaque black
    pub alpha: f32,
    pub target_alpha: f32,
    /// Alpha units per second
    pub speed: f32,
    pub active: bool,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            target_alpha: 0.0,
            speed: 3.0,
            active: false,
        }
    }
}

impl ScreenFade {
    /// Snaps to black so the cut itself is never seen, then clears.
    pub fn start(&mut self) {
        self.alpha = 1.0;
        self.target_alpha = 0.0;
        self.speed = 3.0;
        self.active = true;
    }

    /// Moves alpha toward the target and stops there.
    pub fn step(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let diff = self.target_alpha - self.alpha;
        if diff.abs() < 0.01 {
            self.alpha = self.target_alpha;
            self.active = false;
        } else {
            let step = (self.speed * dt).min(diff.abs());
            self.alpha = (self.alpha + diff.signum() * step).clamp(0.0, 1.0);
        }
    }
}

/// Spawn the fade overlay (always present but invisible)
pub fn spawn_fade_overlay(mut commands: Commands) {
    commands.insert_resource(ScreenFade::default());

    commands.spawn((
        ScreenFadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(100),
        PickingBehavior::IGNORE,
    ));
}

pub fn trigger_fade_on_transition(
    mut events: EventReader<StateTransitionEvent<Stage>>,
    mut fade: ResMut<ScreenFade>,
) {
    for event in events.read() {
        if event.exited.is_some() && event.exited != event.entered {
            fade.start();
        }
    }
}

pub fn update_fade(
    time: Res<Time>,
    mut fade: ResMut<ScreenFade>,
    mut query: Query<&mut BackgroundColor, With<ScreenFadeOverlay>>,
) {
    if !fade.active {
        return;
    }
    fade.step(time.delta_secs());
    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(0.0, 0.0, 0.0, fade.alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_covers_cut_then_clears() {
        let mut fade = ScreenFade::default();
        fade.start();
        assert_eq!(fade.alpha, 1.0, "Opaque in the frame the stage changes");

        fade.step(1.0 / 60.0);
        assert!(fade.alpha > 0.9 && fade.alpha < 1.0);

        let mut last = fade.alpha;
        for _ in 0..200 {
            fade.step(1.0 / 60.0);
            assert!(fade.alpha <= last, "Never darkens again");
            last = fade.alpha;
        }
        assert!(!fade.active);
        assert_eq!(fade.alpha, 0.0);
    }
}
