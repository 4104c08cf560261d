//! Spawn домен: размещение врагов на spawn ring, выдача ID, player spawn
//!
//! Архитектура:
//! - Сцена (внешняя) решает КОГДА спавнить → SpawnEnemy событие
//! - ECS решает ГДЕ и С КАКИМ словом (DeterministicRng + WordBank)
//! - Визуал создаётся снаружи по VisualCommand::Spawn

use bevy::prelude::*;

use crate::components::{Enemy, PhysicsBody, Player, TargetId, TypedTarget};
use crate::config::{EnemyKind, EnemyOptions, GameSettings};
use crate::presentation::{debug_text, VisualCommand};
use crate::schedules::SimSet;
use crate::words::WordBank;
use crate::DeterministicRng;

pub mod placement;

pub use placement::{place_outside_viewport, spawn_ring_radius};

/// Event: заспавнить врага (сцена → ECS)
#[derive(Event, Debug, Clone)]
pub struct SpawnEnemy {
    pub kind: EnemyKind,
    /// Переопределение пресета (None = kind.options())
    pub options: Option<EnemyOptions>,
}

impl SpawnEnemy {
    pub fn new(kind: EnemyKind) -> Self {
        Self { kind, options: None }
    }
}

/// Event: заспавнить игрока (сцена → ECS)
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnPlayer {
    pub position: Vec2,
}

/// Монотонный генератор TargetId
#[derive(Resource, Debug, Default)]
pub struct SpawnCounter {
    next: u32,
}

impl SpawnCounter {
    pub fn next_id(&mut self) -> TargetId {
        let id = TargetId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Spawn helper: враг с готовым словом в заданной позиции
///
/// Facing (flip_x) решается один раз здесь относительно игрока.
pub fn spawn_enemy(
    commands: &mut Commands,
    visuals: &mut EventWriter<VisualCommand>,
    settings: &GameSettings,
    id: TargetId,
    word: &str,
    position: Vec2,
    kind: EnemyKind,
    options: &EnemyOptions,
    player_x: f32,
) -> Entity {
    let enemy = Enemy::new(kind, options).with_facing(position.x, player_x);
    let flip_x = enemy.flip_x;
    let target = TypedTarget::new(id, word);

    let entity = commands
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            PhysicsBody {
                velocity: Vec2::ZERO,
                display_height: settings.sprite_display_height(),
            },
            enemy,
            target.clone(),
        ))
        .id();

    visuals.write(VisualCommand::Spawn {
        entity,
        sprite: kind.sprite().to_string(),
        position,
        flip_x,
        scale: settings.sprite_scale,
    });
    visuals.write(VisualCommand::SetWordLabel {
        entity,
        text: word.to_string(),
    });
    if let Some(command) = debug_text(entity, &target, settings) {
        visuals.write(command);
    }

    entity
}

/// Spawn helper: игрок
pub fn spawn_player(
    commands: &mut Commands,
    visuals: &mut EventWriter<VisualCommand>,
    settings: &GameSettings,
    position: Vec2,
) -> Entity {
    let entity = commands
        .spawn((
            Player,
            Transform::from_translation(position.extend(0.0)),
            PhysicsBody {
                velocity: Vec2::ZERO,
                display_height: settings.sprite_display_height(),
            },
        ))
        .id();

    visuals.write(VisualCommand::Spawn {
        entity,
        sprite: "player".to_string(),
        position,
        flip_x: false,
        scale: settings.sprite_scale,
    });

    entity
}

/// System: SpawnPlayer → Player entity (single-player: второй запрос игнорируется)
pub fn process_player_spawn(
    mut commands: Commands,
    mut requests: EventReader<SpawnPlayer>,
    settings: Res<GameSettings>,
    players: Query<(), With<Player>>,
    mut visuals: EventWriter<VisualCommand>,
) {
    let mut has_player = !players.is_empty();

    for request in requests.read() {
        if has_player {
            crate::logger::log_warning("SpawnPlayer ignored: player already exists");
            continue;
        }

        let entity = spawn_player(&mut commands, &mut visuals, &settings, request.position);
        has_player = true;

        crate::logger::log_info(&format!(
            "Spawned player {:?} at ({:.1}, {:.1})",
            entity, request.position.x, request.position.y
        ));
    }
}

/// System: SpawnEnemy → слово из WordBank + позиция на spawn ring
pub fn process_spawn_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnEnemy>,
    mut rng: ResMut<DeterministicRng>,
    mut counter: ResMut<SpawnCounter>,
    bank: Res<WordBank>,
    settings: Res<GameSettings>,
    players: Query<&Transform, With<Player>>,
    mut visuals: EventWriter<VisualCommand>,
) {
    for request in requests.read() {
        let options = request.options.clone().unwrap_or_else(|| request.kind.options());

        // Слово тянем раньше позиции (порядок draw фиксирован для детерминизма)
        let Some(word) = bank
            .draw(options.word_category, &mut rng.rng)
            .map(str::to_owned)
        else {
            crate::logger::log_warning(&format!(
                "SpawnEnemy {:?}: word category {:?} is empty, skipped",
                request.kind, options.word_category
            ));
            continue;
        };

        if word.is_empty() {
            crate::logger::log_warning(&format!("SpawnEnemy {:?}: drew empty word, skipped", request.kind));
            continue;
        }

        let position = place_outside_viewport(
            settings.viewport_width,
            settings.viewport_height,
            settings.spawn_margin,
            &mut rng.rng,
        );

        // Без игрока facing считаем от центра viewport
        let player_x = players
            .single()
            .map(|t| t.translation.x)
            .unwrap_or(settings.viewport_width / 2.0);

        let id = counter.next_id();
        let entity = spawn_enemy(
            &mut commands,
            &mut visuals,
            &settings,
            id,
            &word,
            position,
            request.kind,
            &options,
            player_x,
        );

        crate::logger::log_info(&format!(
            "Spawned {:?} {:?} ({:?}) word=\"{}\" at ({:.1}, {:.1})",
            request.kind, id, entity, word, position.x, position.y
        ));
    }
}

/// Spawn Plugin
pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnEnemy>()
            .add_event::<SpawnPlayer>()
            .init_resource::<SpawnCounter>();

        // Игрок раньше врагов: facing врага считается от позиции игрока
        app.add_systems(
            FixedUpdate,
            (process_player_spawn, process_spawn_requests)
                .chain()
                .in_set(SimSet::Spawn),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_counter_is_monotonic() {
        let mut counter = SpawnCounter::default();
        assert_eq!(counter.next_id(), TargetId(0));
        assert_eq!(counter.next_id(), TargetId(1));
        assert_eq!(counter.next_id(), TargetId(2));
    }
}
