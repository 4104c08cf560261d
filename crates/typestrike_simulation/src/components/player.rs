//! Player control marker component
//!
//! У игрока нет слова: только позиция (внешняя физика) и контакт-урон.
//! Health пул живёт во внешнем HUD (HudEvent::DecreaseHealth).

use bevy::prelude::*;

use crate::components::PhysicsBody;

/// Marker component для игрока
///
/// # Single-player
/// Ровно один entity с этим компонентом. Враги читают его Transform
/// read-only (Query<&Transform, With<Player>>), без глобальной ссылки на сцену.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, PhysicsBody)]
pub struct Player;
