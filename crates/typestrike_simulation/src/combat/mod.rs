//! Combat module (typed combat)
//!
//! ECS ответственность:
//! - Game state: TypedTarget (word, typed/hit index, pending damage)
//! - Combat rules: выбор цели, выстрел по совпавшей букве, применение урона
//! - Events: ProjectileFired, TargetDestroyed, HudEvent
//!
//! Внешний слой:
//! - Keyboard capture → LetterTyped
//! - Полёт снаряда + collision → ProjectileHit
//! - Контакт врага с игроком → PlayerContact

use bevy::prelude::*;

use crate::config::GameSettings;
use crate::schedules::SimSet;

pub mod damage;
pub mod events;
pub mod launcher;
pub mod targeting;

// Re-export основных типов
pub use damage::{apply_contact_damage, damage_player, finish_destruction, process_destroy_requests, process_projectile_hits};
pub use events::{DestroyTarget, HudEvent, LetterTyped, PlayerContact, ProjectileFired, ProjectileHit, TargetDestroyed};
pub use launcher::ProjectileLauncher;
pub use targeting::{route_keystrokes, ActiveTarget, TargetCandidate};

/// Combat Plugin
///
/// SimSet::Input:
/// 1. route_keystrokes — LetterTyped → выстрел
///
/// SimSet::Combat (chain):
/// 1. process_projectile_hits — урон, knockback, kill
/// 2. process_destroy_requests — принудительный destroy
/// 3. apply_contact_damage — враг → игрок
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<LetterTyped>()
            .add_event::<ProjectileFired>()
            .add_event::<ProjectileHit>()
            .add_event::<DestroyTarget>()
            .add_event::<TargetDestroyed>()
            .add_event::<PlayerContact>()
            .add_event::<HudEvent>()
            .init_resource::<ActiveTarget>();

        if !app.world().contains_resource::<ProjectileLauncher>() {
            let launcher = app
                .world()
                .get_resource::<GameSettings>()
                .map(ProjectileLauncher::from_settings)
                .unwrap_or_default();
            app.insert_resource(launcher);
        }

        app.add_systems(FixedUpdate, route_keystrokes.in_set(SimSet::Input));
        app.add_systems(
            FixedUpdate,
            (
                process_projectile_hits,
                process_destroy_requests,
                apply_contact_damage,
            )
                .chain()
                .in_set(SimSet::Combat),
        );
    }
}
