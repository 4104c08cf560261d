//! ECS Components для игровых entity
//!
//! - typed: TypedTarget (слово, прогресс, pending/hit урон)
//! - enemy: движение к игроку, knockback
//! - player: player marker
//! - movement: PhysicsBody (velocity, display size)

pub mod typed;
pub mod enemy;
pub mod player;
pub mod movement;

#[cfg(test)]
mod typed_tests;

// Re-exports для удобного импорта
pub use typed::*;
pub use enemy::*;
pub use player::*;
pub use movement::*;
