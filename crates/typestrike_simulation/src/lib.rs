//! TYPESTRIKE Simulation Core
//!
//! ECS-симуляция typed combat на Bevy 0.16 (headless, strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = правила: слово цели, прогресс набора, pending/hit урон, spawn ring
//! - Сцена (внешняя) = рендер, физика снарядов, коллизии, клавиатура, HUD
//!
//! Граница — только события (LetterTyped / ProjectileHit / ... ⇄ VisualCommand / HudEvent).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod presentation;
pub mod schedules;
pub mod shared;
pub mod spawn;
pub mod words;

// Re-export для удобства
pub use combat::{
    ActiveTarget, CombatPlugin, DestroyTarget, HudEvent, LetterTyped, PlayerContact, ProjectileFired,
    ProjectileHit, ProjectileLauncher, TargetDestroyed,
};
pub use components::*;
pub use config::{ConfigError, EnemyKind, EnemyOptions, GameSettings};
pub use logger::init_logger;
pub use movement::MovementPlugin;
pub use presentation::{DeferredEffects, PresentationPlugin, VisualCommand};
pub use schedules::{FixedTickCounter, SimSet};
pub use shared::Viewport;
pub use spawn::{place_outside_viewport, SpawnCounter, SpawnEnemy, SpawnPlayer, SpawnPlugin};
pub use words::{WordBank, WordCategory};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Ресурсы, вставленные ДО plugin (GameSettings, WordBank, DeterministicRng,
/// Viewport, ProjectileLauncher), не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSettings>()
            .init_resource::<WordBank>()
            .init_resource::<FixedTickCounter>();

        let settings = app.world().resource::<GameSettings>().clone();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<Viewport>() {
            app.insert_resource(Viewport::from_settings(&settings));
        }

        app
            // Fixed timestep для real-time прогона (app.update())
            .insert_resource(Time::<Fixed>::from_hz(settings.tick_rate_hz))
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Tick,
                    SimSet::Spawn,
                    SimSet::Input,
                    SimSet::Movement,
                    SimSet::Combat,
                    SimSet::Presentation,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                schedules::increment_tick_counter.in_set(SimSet::Tick),
            )
            // Подсистемы
            .add_plugins((SpawnPlugin, CombatPlugin, MovementPlugin, PresentationPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Один детерминированный тик симуляции (FixedUpdate без привязки к wall clock)
///
/// `First` (и event_update_system) здесь не запускается, поэтому входящие
/// буферы обновляем сами: событие живёт два тика, системы читают его один раз.
/// Исходящие (VisualCommand, ProjectileFired, ...) забирает сцена через `drain_events`.
pub fn run_tick(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(FixedUpdate);

    update_events::<LetterTyped>(world);
    update_events::<ProjectileHit>(world);
    update_events::<DestroyTarget>(world);
    update_events::<PlayerContact>(world);
    update_events::<SpawnEnemy>(world);
    update_events::<SpawnPlayer>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Забрать все накопившиеся события типа E (исходящая граница ECS → сцена)
pub fn drain_events<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut()
        .resource_mut::<Events<E>>()
        .drain()
        .collect()
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug формат — простейшая сериализация
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
