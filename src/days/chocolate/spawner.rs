use bevy::prelude::*;
use rand::Rng;

use super::{CatchGame, FallSpeed, ItemKind};
use crate::shared::*;

/// A sweet in flight. `id` is its key in `CatchGame`.
#[derive(Component, Debug, Clone, Copy)]
pub struct FallingItem {
    pub id: u64,
    pub kind: ItemKind,
}

/// Spawn x for a uniform roll in [0, 1): the middle 80% of the field.
pub fn spawn_x(roll: f32, field_width: f32) -> f32 {
    (roll - 0.5) * field_width * 0.8
}

pub fn spawn_items(mut commands: Commands, time: Res<Time>, game: Option<ResMut<CatchGame>>) {
    let Some(mut game) = game else {
        return;
    };
    let due = game.tick_spawner(time.delta());
    if due == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    for _ in 0..due {
        let kind = ItemKind::from_roll(rng.gen::<f32>());
        let x = spawn_x(rng.gen::<f32>(), game.tuning().field_width);
        let y = game.tuning().spawn_y;
        let id = game.spawn(kind);
        commands.spawn((
            FallingItem { id, kind },
            FallSpeed::default(),
            Transform::from_xyz(x, y, 1.0),
            StateScoped(Stage::Chocolate),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_x_stays_inside_field() {
        assert_eq!(spawn_x(0.5, 1000.0), 0.0);
        assert_eq!(spawn_x(0.0, 1000.0), -400.0);
        assert!(spawn_x(0.9999, 1000.0) < 400.0);
    }
}
