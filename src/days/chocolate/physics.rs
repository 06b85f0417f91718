//! Kinematic step for the catch game: gravity on every falling item and
//! an overlap test against the basket's sensor box.

use bevy::prelude::*;

use super::{CatchGame, FallingItem, ItemCaught, ItemMissed};
use crate::shared::*;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FallSpeed(pub f32);

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Basket;

pub fn spawn_basket(mut commands: Commands, tuning: Res<Tuning>) {
    commands.spawn((
        Basket,
        Transform::from_xyz(0.0, tuning.catch.basket_y, 2.0),
        StateScoped(Stage::Chocolate),
    ));
}

/// True when a circle of `radius` at `item` touches the basket box.
pub fn touches_basket(item: Vec2, basket: Vec2, tuning: &CatchTuning) -> bool {
    let d = (item - basket).abs();
    d.x <= tuning.basket_half_width + tuning.item_radius
        && d.y <= tuning.basket_half_height + tuning.item_radius
}

/// The basket follows the pointer across the field.
pub fn move_basket(
    input: Res<PlayerInput>,
    tuning: Res<Tuning>,
    mut baskets: Query<&mut Transform, With<Basket>>,
) {
    let Some(pointer) = input.pointer else {
        return;
    };
    let half = tuning.catch.field_width / 2.0;
    for mut transform in &mut baskets {
        transform.translation.x = (pointer.x * half).clamp(-half, half);
    }
}

/// Integrates on the fixed step; `Time` here is `Time<Fixed>`.
pub fn fall_items(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut items: Query<(&mut Transform, &mut FallSpeed), With<FallingItem>>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut speed) in &mut items {
        speed.0 += tuning.catch.gravity * dt;
        transform.translation.y -= speed.0 * dt;
    }
}

/// Reports each item exactly once, as caught or missed, and despawns it.
pub fn detect_contacts(
    mut commands: Commands,
    game: Option<Res<CatchGame>>,
    items: Query<(Entity, &FallingItem, &Transform)>,
    baskets: Query<&Transform, With<Basket>>,
    mut caught: EventWriter<ItemCaught>,
    mut missed: EventWriter<ItemMissed>,
) {
    let Some(game) = game else {
        return;
    };
    let tuning = game.tuning();
    let basket = baskets
        .iter()
        .next()
        .map(|t| t.translation.truncate());
    for (entity, item, transform) in &items {
        let pos = transform.translation.truncate();
        if basket.is_some_and(|b| touches_basket(pos, b, tuning)) {
            caught.send(ItemCaught { id: item.id });
            commands.entity(entity).despawn_recursive();
        } else if pos.y < tuning.miss_y {
            missed.send(ItemMissed { id: item.id });
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_includes_item_radius() {
        let tuning = CatchTuning::default();
        let basket = Vec2::new(0.0, -250.0);
        assert!(touches_basket(Vec2::new(0.0, -250.0), basket, &tuning));
        assert!(touches_basket(Vec2::new(90.0, -250.0), basket, &tuning));
        assert!(!touches_basket(Vec2::new(93.0, -250.0), basket, &tuning));
        assert!(touches_basket(Vec2::new(0.0, -193.0), basket, &tuning));
        assert!(!touches_basket(Vec2::new(0.0, -100.0), basket, &tuning));
    }
}
