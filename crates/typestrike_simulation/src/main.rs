//! Headless сессия TYPESTRIKE
//!
//! Сцена-заглушка вместо рендера: спавнит игрока и зомби, "печатает"
//! слово ближайшей цели и доставляет снаряды через фиксированное число тиков.

use bevy::prelude::*;
use typestrike_simulation::{
    create_headless_app, drain_events, run_tick, ActiveTarget, EnemyKind, GameSettings, HudEvent, LetterTyped,
    ProjectileFired, ProjectileHit, SimulationPlugin, SpawnEnemy, SpawnPlayer, TargetDestroyed,
    TypedTarget, VisualCommand,
};

/// Тики полёта снаряда до попадания
const PROJECTILE_FLIGHT_TICKS: u64 = 12;
/// Одна буква каждые N тиков
const TYPING_INTERVAL_TICKS: u64 = 8;
const TOTAL_TICKS: u64 = 3_000;

fn main() {
    let seed = 42;
    println!("Starting TYPESTRIKE headless session (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let settings = app.world().resource::<GameSettings>().clone();
    app.world_mut().send_event(SpawnPlayer {
        position: Vec2::new(settings.viewport_width / 2.0, settings.viewport_height / 2.0),
    });
    for _ in 0..3 {
        app.world_mut().send_event(SpawnEnemy::new(EnemyKind::Zombie));
    }

    // Снаряды в полёте: (тик попадания, событие)
    let mut in_flight: Vec<(u64, ProjectileHit)> = Vec::new();
    let mut kills = 0;

    for tick in 0..TOTAL_TICKS {
        // Доставка долетевших снарядов
        let (landed, flying): (Vec<_>, Vec<_>) = in_flight.into_iter().partition(|(at, _)| *at <= tick);
        in_flight = flying;
        for (_, hit) in landed {
            app.world_mut().send_event(hit);
        }

        if tick % TYPING_INTERVAL_TICKS == 0 {
            if let Some(letter) = next_letter_to_type(&mut app) {
                app.world_mut().send_event(LetterTyped { letter });
            }
        }

        run_tick(&mut app);

        for fired in drain_events::<ProjectileFired>(&mut app) {
            in_flight.push((
                tick + PROJECTILE_FLIGHT_TICKS,
                ProjectileHit {
                    target: fired.target,
                    damage: fired.damage,
                },
            ));
        }

        for destroyed in drain_events::<TargetDestroyed>(&mut app) {
            kills += 1;
            println!("Tick {}: \"{}\" destroyed ({:?})", tick, destroyed.word, destroyed.id);
            app.world_mut().send_event(SpawnEnemy::new(EnemyKind::Zombie));
        }

        // Визуальные команды и HUD уходят в никуда (нет рендера)
        drain_events::<VisualCommand>(&mut app);
        drain_events::<HudEvent>(&mut app);

        if tick % 500 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities, {} kills", tick, entity_count, kills);
        }
    }

    println!("Session complete: {} kills", kills);
}

/// "Игрок": печатает следующую букву locked цели, иначе самой старой цели
fn next_letter_to_type(app: &mut App) -> Option<char> {
    let locked = app.world().resource::<ActiveTarget>().locked();
    let world = app.world_mut();

    let mut query = world.query::<(Entity, &TypedTarget)>();
    let mut targets: Vec<_> = query
        .iter(world)
        .filter_map(|(entity, target)| target.next_letter().map(|letter| (entity, target.id, letter)))
        .collect();
    targets.sort_by_key(|(_, id, _)| *id);

    if let Some(locked) = locked {
        if let Some((_, _, letter)) = targets.iter().find(|(entity, _, _)| *entity == locked) {
            return Some(*letter);
        }
    }

    targets.first().map(|(_, _, letter)| *letter)
}
