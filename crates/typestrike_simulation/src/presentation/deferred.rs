//! Отложенные эффекты (timing collaborator)
//!
//! Вместо closure над entity: сообщение {entity, due_tick, action}.
//! При исполнении entity резолвится заново через Query:
//! - entity despawned → эффект отбрасывается
//! - TypedTarget.is_destroyed() → эффект отбрасывается
//! Отдельного списка отмены нет, guard — единственный механизм.

use bevy::prelude::*;

use super::VisualCommand;
use crate::components::TypedTarget;
use crate::config::GameSettings;
use crate::schedules::FixedTickCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Снять hit flash tint
    ClearTint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEffect {
    pub entity: Entity,
    pub due_tick: u64,
    pub action: DeferredAction,
}

/// Очередь fire-once эффектов
#[derive(Resource, Debug, Default)]
pub struct DeferredEffects {
    pending: Vec<ScheduledEffect>,
}

impl DeferredEffects {
    pub fn schedule(&mut self, entity: Entity, due_tick: u64, action: DeferredAction) {
        self.pending.push(ScheduledEffect {
            entity,
            due_tick,
            action,
        });
    }

    /// Через `delay` тиков от `now` (у края u64 — на u64::MAX)
    pub fn schedule_after(&mut self, entity: Entity, now: u64, delay: u64, action: DeferredAction) {
        self.schedule(entity, now.saturating_add(delay), action);
    }

    /// Забрать созревшие эффекты (порядок планирования сохраняется)
    pub fn take_due(&mut self, now: u64) -> Vec<ScheduledEffect> {
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|effect| effect.due_tick <= now);

        self.pending = rest;
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Hit flash: tint сейчас + ClearTint через hit_flash_ticks
pub fn flash_hit(
    entity: Entity,
    now: u64,
    settings: &GameSettings,
    deferred: &mut DeferredEffects,
    visuals: &mut EventWriter<VisualCommand>,
) {
    visuals.write(VisualCommand::SetTint {
        entity,
        color: settings.hit_tint,
    });
    deferred.schedule_after(entity, now, settings.hit_flash_ticks(), DeferredAction::ClearTint);
}

/// System: исполнение созревших эффектов с повторной проверкой цели
pub fn run_deferred_effects(
    counter: Res<FixedTickCounter>,
    mut deferred: ResMut<DeferredEffects>,
    live: Query<Option<&TypedTarget>>,
    mut visuals: EventWriter<VisualCommand>,
) {
    for effect in deferred.take_due(counter.tick) {
        match live.get(effect.entity) {
            Err(_) => {
                crate::logger::log(&format!(
                    "Deferred {:?} dropped: entity {:?} no longer exists",
                    effect.action, effect.entity
                ));
            }
            Ok(Some(target)) if target.is_destroyed() => {
                crate::logger::log(&format!(
                    "Deferred {:?} dropped: target {:?} destroyed",
                    effect.action, target.id
                ));
            }
            Ok(_) => match effect.action {
                DeferredAction::ClearTint => {
                    visuals.write(VisualCommand::ClearTint {
                        entity: effect.entity,
                    });
                }
            },
        }
    }
}
