//! Movement: враги идут на игрока, velocity → Transform
//!
//! Архитектура:
//! - seek: единичный вектор к игроку × move_speed (velocity, не позиция)
//! - integrate: position += velocity × dt (headless; во внешнем движке
//!   это делает его физика)
//!
//! Детерминизм: dt = 1 / tick_rate_hz из GameSettings, не Time.

use bevy::prelude::*;

use crate::components::{Enemy, PhysicsBody, Player, TypedTarget};
use crate::config::GameSettings;
use crate::schedules::SimSet;

/// System: velocity врагов к текущей позиции игрока
///
/// Позиция игрока — read-only query (без ссылки на сцену).
/// Враг ровно на игроке → velocity не меняется.
pub fn steer_enemies_toward_player(
    players: Query<&Transform, With<Player>>,
    mut enemies: Query<(&Transform, &Enemy, &TypedTarget, &mut PhysicsBody), Without<Player>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let player_pos = player.translation.truncate();

    for (transform, enemy, target, mut body) in enemies.iter_mut() {
        if target.is_destroyed() {
            continue;
        }

        if let Some(velocity) = enemy.seek_velocity(transform.translation.truncate(), player_pos) {
            body.velocity = velocity;
        }
    }
}

/// System: интеграция velocity → Transform.translation
pub fn integrate_velocity(
    settings: Res<GameSettings>,
    mut bodies: Query<(&PhysicsBody, &mut Transform)>,
) {
    let delta = settings.tick_seconds();

    for (body, mut transform) in bodies.iter_mut() {
        transform.translation += body.velocity.extend(0.0) * delta;
    }
}

/// Movement Plugin (SimSet::Movement)
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (steer_enemies_toward_player, integrate_velocity)
                .chain()
                .in_set(SimSet::Movement),
        );
    }
}
