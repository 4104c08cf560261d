//! Presentation boundary (ECS → внешний рендер)
//!
//! ECS не владеет спрайтами/текстом. Всё, что должно появиться на экране,
//! уходит наружу как VisualCommand события:
//! - Spawn/Release визуала entity
//! - Word label (остаток слова) и debug overlay
//! - Tint вспышка при попадании (revert через DeferredEffects)

use bevy::prelude::*;

use crate::components::{Enemy, PhysicsBody, TypedTarget};
use crate::config::GameSettings;
use crate::schedules::SimSet;

pub mod deferred;

pub use deferred::{flash_hit, run_deferred_effects, DeferredAction, DeferredEffects, ScheduledEffect};

/// Команда внешнему рендеру
#[derive(Event, Debug, Clone, PartialEq)]
pub enum VisualCommand {
    /// Создать визуал (спрайт) entity
    Spawn {
        entity: Entity,
        sprite: String,
        position: Vec2,
        flip_x: bool,
        scale: f32,
    },

    /// Текст над спрайтом (видимый остаток слова)
    SetWordLabel { entity: Entity, text: String },

    /// Debug overlay (word/display/typed/hit/pending)
    SetDebugText { entity: Entity, text: String },

    /// Переместить label'ы вслед за entity
    MoveLabels {
        entity: Entity,
        word_label: Vec2,
        debug_label: Vec2,
    },

    /// Окрасить спрайт (hit flash)
    SetTint { entity: Entity, color: u32 },

    /// Снять tint
    ClearTint { entity: Entity },

    /// Освободить визуал + label'ы (entity уничтожен)
    Release { entity: Entity },
}

/// Позиции label'ов: слово над спрайтом, debug — под ним
pub fn label_positions(position: Vec2, display_height: f32, settings: &GameSettings) -> (Vec2, Vec2) {
    let word_label = Vec2::new(
        position.x,
        position.y - display_height / 2.0 - settings.word_label_gap,
    );
    let debug_label = Vec2::new(position.x, position.y + settings.debug_label_offset);

    (word_label, debug_label)
}

/// Debug overlay команда (None если overlay выключен)
pub fn debug_text(entity: Entity, target: &TypedTarget, settings: &GameSettings) -> Option<VisualCommand> {
    settings.debug_overlay.then(|| VisualCommand::SetDebugText {
        entity,
        text: target.debug_summary(),
    })
}

/// System: label'ы следуют за врагами (после движения)
pub fn sync_enemy_labels(
    settings: Res<GameSettings>,
    enemies: Query<(Entity, &Transform, &PhysicsBody, &TypedTarget), With<Enemy>>,
    mut visuals: EventWriter<VisualCommand>,
) {
    for (entity, transform, body, target) in enemies.iter() {
        if target.is_destroyed() {
            continue;
        }

        let (word_label, debug_label) =
            label_positions(transform.translation.truncate(), body.display_height, &settings);

        visuals.write(VisualCommand::MoveLabels {
            entity,
            word_label,
            debug_label,
        });
    }
}

/// Presentation Plugin
///
/// Порядок (SimSet::Presentation):
/// 1. sync_enemy_labels — позиции label'ов после движения/knockback
/// 2. run_deferred_effects — созревшие отложенные эффекты (tint revert)
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<VisualCommand>()
            .init_resource::<DeferredEffects>();

        app.add_systems(
            FixedUpdate,
            (sync_enemy_labels, run_deferred_effects)
                .chain()
                .in_set(SimSet::Presentation),
        );
    }
}
