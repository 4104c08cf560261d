//! Physics body: velocity + display size (для label позиционирования)

use bevy::prelude::*;

/// Упрощённое физ. тело (2D)
///
/// Velocity пишут системы (seek), интегрирует `integrate_velocity`.
/// Во внешнем движке — синхронизируется в его body.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    /// Скорость (пиксели/сек)
    pub velocity: Vec2,
    /// Высота спрайта на экране (texture × scale)
    pub display_height: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            display_height: 64.0, // 16px × SPRITE_SCALE 4
        }
    }
}
