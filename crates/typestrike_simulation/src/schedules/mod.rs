//! Tick counter и порядок фаз FixedUpdate
//!
//! # Архитектура
//!
//! **FixedUpdate (60 Hz)**, фазы по порядку (SimSet, chained):
//!   Tick → Spawn → Input → Movement → Combat → Presentation
//!
//! Для одного entity за тик: нажатие → движение → синхронизация label.
//! Отложенные эффекты (tint revert) считаются в тиках, не в секундах:
//! детерминизм не зависит от FPS.

use bevy::prelude::*;

/// Глобальный tick counter (детерминистичный, wraparound safe)
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct FixedTickCounter {
    pub tick: u64,
}

/// Фазы симуляции внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Tick counter
    Tick,
    /// SpawnEnemy запросы → новые entities
    Spawn,
    /// LetterTyped → выбор цели → выстрелы
    Input,
    /// Seek к игроку + интеграция velocity
    Movement,
    /// ProjectileHit / DestroyTarget / PlayerContact
    Combat,
    /// Label sync + отложенные визуальные эффекты
    Presentation,
}

/// System: Increment tick counter (FixedUpdate, запускается ПЕРВЫМ)
pub fn increment_tick_counter(mut counter: ResMut<FixedTickCounter>) {
    counter.tick = counter.tick.wrapping_add(1);
}
