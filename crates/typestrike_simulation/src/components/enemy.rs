//! Enemy — движение к игроку + knockback поверх TypedTarget
//!
//! Композиция вместо наследования: враг = TypedTarget + Enemy + PhysicsBody.
//! Векторная математика здесь (чистые функции), системы — в movement/combat.

use bevy::prelude::*;

use crate::components::PhysicsBody;
use crate::config::{EnemyKind, EnemyOptions};

/// Враг, идущий на игрока
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, PhysicsBody)]
pub struct Enemy {
    pub kind: EnemyKind,

    /// Скорость (пиксели/сек)
    pub move_speed: f32,

    /// Смещение назад от игрока при попадании (пиксели, разовый толчок)
    pub knockback: f32,

    /// Contact damage по игроку
    pub damage: u32,

    /// Спрайт отражён по X (смотрит влево). Решается один раз при spawn.
    pub flip_x: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, options: &EnemyOptions) -> Self {
        Self {
            kind,
            move_speed: options.move_speed,
            knockback: options.knockback,
            damage: options.damage,
            flip_x: false,
        }
    }

    /// Facing при spawn: справа от игрока → смотрим влево
    pub fn with_facing(mut self, spawn_x: f32, player_x: f32) -> Self {
        self.flip_x = spawn_x > player_x;
        self
    }

    /// Velocity к игроку. None если стоим ровно на игроке (velocity не трогаем).
    pub fn seek_velocity(&self, position: Vec2, player: Vec2) -> Option<Vec2> {
        direction_to(position, player).map(|dir| dir * self.move_speed)
    }

    /// Смещение knockback (от игрока). None при knockback == 0 или совпадении позиций.
    pub fn knockback_offset(&self, position: Vec2, player: Vec2) -> Option<Vec2> {
        if self.knockback == 0.0 {
            return None;
        }
        direction_to(position, player).map(|dir| -dir * self.knockback)
    }
}

/// Единичный вектор from → to (None при нулевой длине)
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let length = delta.length();

    if length > 0.0 {
        Some(delta / length)
    } else {
        None
    }
}
