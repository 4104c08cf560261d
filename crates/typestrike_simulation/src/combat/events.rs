//! Combat events — граница ECS ↔ внешний слой (input, ballistics, collisions, HUD)
//!
//! Входящие (сцена → ECS): LetterTyped, ProjectileHit, DestroyTarget, PlayerContact
//! Исходящие (ECS → сцена): ProjectileFired, TargetDestroyed, HudEvent

use bevy::prelude::*;

use crate::components::TargetId;

/// Event: игрок нажал букву (keyboard capture — внешний)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterTyped {
    pub letter: char,
}

/// Event: снаряд выпущен (ECS → внешний ballistics)
///
/// Полёт и коллизию считает внешний слой, по попаданию
/// он отвечает ProjectileHit с тем же target.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileFired {
    /// Кто стреляет (игрок)
    pub shooter: Entity,
    /// В кого летит
    pub target: Entity,
    pub target_id: TargetId,
    pub damage: u32,
}

/// Event: снаряд долетел (внешний collision → ECS)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub target: Entity,
    pub damage: u32,
}

/// Event: принудительно уничтожить цель (teardown сцены)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyTarget {
    pub entity: Entity,
}

/// Event: цель уничтожена (ровно один раз на цель)
///
/// Точка расширения вместо onKill hook: очки, звуки, дроп — читают это событие.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TargetDestroyed {
    pub entity: Entity,
    pub id: TargetId,
    pub word: String,
    /// true — слово добито, false — принудительный destroy
    pub killed: bool,
}

/// Event: враг коснулся игрока (внешний collision → ECS)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerContact {
    pub enemy: Entity,
}

/// HUD команды (health пул и смерть игрока — во внешнем HUD)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudEvent {
    DecreaseHealth { amount: u32 },
}
