//! Damage application: попадания снарядов, принудительный destroy, contact damage
//!
//! Порядок внутри ProjectileHit (для одной цели):
//! 1. apply_damage (hit_index, pending, resync typed_index)
//! 2. word label ← остаток слова
//! 3. hit flash + knockback (только Enemy)
//! 4. слово кончилось → Release визуала, TargetDestroyed, despawn
//!
//! Несколько попаданий за тик обрабатываются строго по очереди событий.

use bevy::prelude::*;

use super::events::{DestroyTarget, HudEvent, PlayerContact, ProjectileHit, TargetDestroyed};
use super::targeting::ActiveTarget;
use crate::components::{DamageOutcome, Enemy, Player, TypedTarget};
use crate::config::GameSettings;
use crate::presentation::{debug_text, flash_hit, DeferredEffects, VisualCommand};
use crate::schedules::FixedTickCounter;

/// Терминальный переход: освободить визуал, уведомить, despawn
///
/// Вызывается ровно один раз на цель (guard — TypedTarget::destroyed).
pub fn finish_destruction(
    commands: &mut Commands,
    entity: Entity,
    target: &TypedTarget,
    killed: bool,
    active: &mut ActiveTarget,
    visuals: &mut EventWriter<VisualCommand>,
    destroyed: &mut EventWriter<TargetDestroyed>,
) {
    visuals.write(VisualCommand::Release { entity });
    destroyed.write(TargetDestroyed {
        entity,
        id: target.id,
        word: target.word().to_string(),
        killed,
    });
    active.forget(entity);
    commands.entity(entity).despawn();

    crate::logger::log_info(&format!(
        "Target {:?} \"{}\" destroyed ({})",
        target.id,
        target.word(),
        if killed { "killed" } else { "forced" }
    ));
}

/// System: ProjectileHit → урон цели
pub fn process_projectile_hits(
    mut commands: Commands,
    mut hits: EventReader<ProjectileHit>,
    counter: Res<FixedTickCounter>,
    settings: Res<GameSettings>,
    mut deferred: ResMut<DeferredEffects>,
    mut active: ResMut<ActiveTarget>,
    players: Query<&Transform, With<Player>>,
    mut targets: Query<(&mut TypedTarget, &mut Transform, Option<&Enemy>), Without<Player>>,
    mut visuals: EventWriter<VisualCommand>,
    mut destroyed: EventWriter<TargetDestroyed>,
) {
    let player_pos = players.single().ok().map(|t| t.translation.truncate());

    for hit in hits.read() {
        let Ok((mut target, mut transform, enemy)) = targets.get_mut(hit.target) else {
            crate::logger::log(&format!("ProjectileHit: target {:?} no longer exists", hit.target));
            continue;
        };

        let outcome = target.apply_damage(hit.damage);

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::NothingPending => {
                crate::logger::log(&format!(
                    "ProjectileHit on {:?} dropped: nothing pending",
                    target.id
                ));
                if let Some(command) = debug_text(hit.target, &target, &settings) {
                    visuals.write(command);
                }
            }
            DamageOutcome::Hit { .. } | DamageOutcome::Killed => {
                visuals.write(VisualCommand::SetWordLabel {
                    entity: hit.target,
                    text: target.displayed_word().to_string(),
                });

                flash_hit(hit.target, counter.tick, &settings, &mut deferred, &mut visuals);

                if let (Some(enemy), Some(player_pos)) = (enemy, player_pos) {
                    let position = transform.translation.truncate();
                    if let Some(offset) = enemy.knockback_offset(position, player_pos) {
                        transform.translation += offset.extend(0.0);
                    }
                }

                if outcome == DamageOutcome::Killed {
                    finish_destruction(
                        &mut commands,
                        hit.target,
                        &target,
                        true,
                        &mut active,
                        &mut visuals,
                        &mut destroyed,
                    );
                } else if let Some(command) = debug_text(hit.target, &target, &settings) {
                    visuals.write(command);
                }
            }
        }
    }
}

/// System: DestroyTarget → принудительное уничтожение (идемпотентно)
pub fn process_destroy_requests(
    mut commands: Commands,
    mut requests: EventReader<DestroyTarget>,
    mut active: ResMut<ActiveTarget>,
    mut targets: Query<&mut TypedTarget>,
    mut visuals: EventWriter<VisualCommand>,
    mut destroyed: EventWriter<TargetDestroyed>,
) {
    for request in requests.read() {
        let Ok(mut target) = targets.get_mut(request.entity) else {
            crate::logger::log(&format!("DestroyTarget: {:?} already gone", request.entity));
            continue;
        };

        if target.destroy() {
            finish_destruction(
                &mut commands,
                request.entity,
                &target,
                false,
                &mut active,
                &mut visuals,
                &mut destroyed,
            );
        }
    }
}

/// Игрок получил урон: hit flash + HUD уменьшает health
pub fn damage_player(
    player: Entity,
    amount: u32,
    now: u64,
    settings: &GameSettings,
    deferred: &mut DeferredEffects,
    visuals: &mut EventWriter<VisualCommand>,
    hud: &mut EventWriter<HudEvent>,
) {
    flash_hit(player, now, settings, deferred, visuals);
    hud.write(HudEvent::DecreaseHealth { amount });
}

/// System: PlayerContact → contact damage врага по игроку
pub fn apply_contact_damage(
    mut contacts: EventReader<PlayerContact>,
    counter: Res<FixedTickCounter>,
    settings: Res<GameSettings>,
    mut deferred: ResMut<DeferredEffects>,
    players: Query<Entity, With<Player>>,
    enemies: Query<(&Enemy, &TypedTarget)>,
    mut visuals: EventWriter<VisualCommand>,
    mut hud: EventWriter<HudEvent>,
) {
    for contact in contacts.read() {
        let Ok((enemy, target)) = enemies.get(contact.enemy) else {
            continue;
        };
        if target.is_destroyed() {
            continue;
        }

        let Ok(player) = players.single() else {
            crate::logger::log_warning("PlayerContact without player entity");
            continue;
        };

        damage_player(
            player,
            enemy.damage,
            counter.tick,
            &settings,
            &mut deferred,
            &mut visuals,
            &mut hud,
        );

        crate::logger::log(&format!("{:?} hit player for {}", target.id, enemy.damage));
    }
}
