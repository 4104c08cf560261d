//! Spawn ring — точка за пределами viewport
//!
//! Алгоритм:
//! - центр (w/2, h/2)
//! - радиус r = sqrt(w² + h²)/2 + margin (описанная окружность + отступ)
//! - угол θ ∈ [0, 2π) равномерно
//!
//! Равномерно по углу, НЕ по площади: точки лежат на окружности радиуса r.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

/// Случайная точка на spawn ring вокруг viewport `width × height`
pub fn place_outside_viewport<R: Rng>(width: f32, height: f32, margin: f32, rng: &mut R) -> Vec2 {
    let center = Vec2::new(width / 2.0, height / 2.0);
    let radius = spawn_ring_radius(width, height, margin);
    let angle = rng.gen_range(0.0..TAU);

    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Радиус spawn ring
pub fn spawn_ring_radius(width: f32, height: f32, margin: f32) -> f32 {
    (width * width + height * height).sqrt() / 2.0 + margin
}
