//! Target selection: какой враг получает нажатую букву
//!
//! Политика (single active target):
//! 1. Есть locked цель, она на экране и ещё принимает буквы → буква идёт ей
//!    (даже если не совпала: mismatch — тихий no-op, lock не сбрасывается)
//! 2. Иначе lock сбрасывается и выбирается ближайший к игроку враг на экране,
//!    чья следующая буква совпала (tie-break: меньший TargetId)
//! 3. Никто не подходит → буква теряется
//!
//! Lock снимается когда цель уничтожена, ушла с экрана или все её буквы в полёте.

use bevy::prelude::*;

use super::events::{LetterTyped, ProjectileFired};
use super::launcher::ProjectileLauncher;
use crate::components::{Enemy, LetterOutcome, Player, TargetId, TypedTarget};
use crate::config::GameSettings;
use crate::presentation::{debug_text, VisualCommand};
use crate::schedules::FixedTickCounter;
use crate::shared::Viewport;

/// Снимок кандидата на момент нажатия
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub id: TargetId,
    /// Квадрат расстояния до игрока
    pub distance_sq: f32,
    /// None — цель закрыта для ввода
    pub next_letter: Option<char>,
    pub on_screen: bool,
}

impl TargetCandidate {
    fn accepts_input(&self) -> bool {
        self.on_screen && self.next_letter.is_some()
    }
}

/// Текущая цель ввода
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTarget {
    locked: Option<Entity>,
}

impl ActiveTarget {
    pub fn locked(&self) -> Option<Entity> {
        self.locked
    }

    /// Снять lock, если он на этом entity
    pub fn forget(&mut self, entity: Entity) {
        if self.locked == Some(entity) {
            self.locked = None;
        }
    }

    pub fn select(&mut self, letter: char, candidates: &[TargetCandidate]) -> Option<Entity> {
        if let Some(locked) = self.locked {
            if candidates
                .iter()
                .any(|c| c.entity == locked && c.accepts_input())
            {
                return Some(locked);
            }
            self.locked = None;
        }

        let best = candidates
            .iter()
            .filter(|c| c.accepts_input() && c.next_letter == Some(letter))
            .min_by(|a, b| {
                a.distance_sq
                    .total_cmp(&b.distance_sq)
                    .then(a.id.cmp(&b.id))
            })?;

        self.locked = Some(best.entity);
        Some(best.entity)
    }
}

/// System: LetterTyped → выбор цели → on_letter_typed → ProjectileFired
///
/// Только враги на экране (viewport + on_screen_margin) получают буквы.
pub fn route_keystrokes(
    mut letters: EventReader<LetterTyped>,
    counter: Res<FixedTickCounter>,
    settings: Res<GameSettings>,
    viewport: Res<Viewport>,
    mut active: ResMut<ActiveTarget>,
    mut launcher: ResMut<ProjectileLauncher>,
    players: Query<(Entity, &Transform), With<Player>>,
    mut targets: Query<(Entity, &Transform, &mut TypedTarget), (With<Enemy>, Without<Player>)>,
    mut fired: EventWriter<ProjectileFired>,
    mut visuals: EventWriter<VisualCommand>,
) {
    let now = counter.tick;

    for typed in letters.read() {
        let Ok((shooter, player_transform)) = players.single() else {
            crate::logger::log(&format!("Letter '{}' dropped: no player to shoot from", typed.letter));
            continue;
        };
        let player_pos = player_transform.translation.truncate();

        let candidates: Vec<TargetCandidate> = targets
            .iter()
            .map(|(entity, transform, target)| {
                let position = transform.translation.truncate();
                TargetCandidate {
                    entity,
                    id: target.id,
                    distance_sq: position.distance_squared(player_pos),
                    next_letter: target.next_letter(),
                    on_screen: viewport.contains(position, settings.on_screen_margin),
                }
            })
            .collect();

        let Some(entity) = active.select(typed.letter, &candidates) else {
            continue;
        };

        let Ok((_, _, mut target)) = targets.get_mut(entity) else {
            continue;
        };

        let outcome = target.on_letter_typed(typed.letter, || launcher.try_fire(now));

        match outcome {
            LetterOutcome::Fired { damage } => {
                fired.write(ProjectileFired {
                    shooter,
                    target: entity,
                    target_id: target.id,
                    damage,
                });

                crate::logger::log(&format!(
                    "'{}' → {:?} fired (dmg {}, typed {}/{})",
                    typed.letter,
                    target.id,
                    damage,
                    target.typed_index(),
                    target.word_len()
                ));
            }
            LetterOutcome::Refused => {
                crate::logger::log(&format!(
                    "'{}' → {:?} refused by launcher (cooldown)",
                    typed.letter, target.id
                ));
            }
            LetterOutcome::Mismatch | LetterOutcome::Closed => continue,
        }

        if let Some(command) = debug_text(entity, &target, &settings) {
            visuals.write(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: u32, distance_sq: f32, next_letter: Option<char>, on_screen: bool) -> TargetCandidate {
        TargetCandidate {
            entity: Entity::from_raw(index),
            id: TargetId(index),
            distance_sq,
            next_letter,
            on_screen,
        }
    }

    #[test]
    fn test_selects_nearest_matching() {
        let mut active = ActiveTarget::default();
        let candidates = [
            candidate(1, 900.0, Some('c'), true),
            candidate(2, 100.0, Some('d'), true),
            candidate(3, 400.0, Some('c'), true),
        ];

        assert_eq!(active.select('c', &candidates), Some(Entity::from_raw(3)));
        assert_eq!(active.locked(), Some(Entity::from_raw(3)));
    }

    #[test]
    fn test_tie_breaks_by_id() {
        let mut active = ActiveTarget::default();
        let candidates = [
            candidate(5, 100.0, Some('c'), true),
            candidate(2, 100.0, Some('c'), true),
        ];

        assert_eq!(active.select('c', &candidates), Some(Entity::from_raw(2)));
    }

    #[test]
    fn test_lock_keeps_receiving_mismatches() {
        let mut active = ActiveTarget::default();
        let candidates = [
            candidate(1, 100.0, Some('a'), true),
            candidate(2, 900.0, Some('x'), true),
        ];

        assert_eq!(active.select('c', &[candidate(1, 100.0, Some('c'), true)]), Some(Entity::from_raw(1)));

        // 'x' совпадает с другим врагом, но lock держит цель 1
        assert_eq!(active.select('x', &candidates), Some(Entity::from_raw(1)));
    }

    #[test]
    fn test_lock_released_when_closed_or_offscreen() {
        let mut active = ActiveTarget::default();
        active.select('c', &[candidate(1, 100.0, Some('c'), true)]);

        // Все буквы цели 1 в полёте → lock снимается, выбирается 2
        let candidates = [
            candidate(1, 100.0, None, true),
            candidate(2, 900.0, Some('x'), true),
        ];
        assert_eq!(active.select('x', &candidates), Some(Entity::from_raw(2)));

        // Цель 2 ушла с экрана → никто не подходит
        let candidates = [candidate(2, 900.0, Some('y'), false)];
        assert_eq!(active.select('y', &candidates), None);
        assert_eq!(active.locked(), None);
    }

    #[test]
    fn test_offscreen_never_selected() {
        let mut active = ActiveTarget::default();
        let candidates = [candidate(1, 1.0, Some('c'), false)];
        assert_eq!(active.select('c', &candidates), None);
    }

    #[test]
    fn test_forget() {
        let mut active = ActiveTarget::default();
        active.select('c', &[candidate(1, 1.0, Some('c'), true)]);

        active.forget(Entity::from_raw(2));
        assert_eq!(active.locked(), Some(Entity::from_raw(1)));

        active.forget(Entity::from_raw(1));
        assert_eq!(active.locked(), None);
    }
}
