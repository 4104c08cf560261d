//! TypedTarget — state machine "печатаемой" цели
//!
//! Инварианты (на всё время жизни):
//! - 0 ≤ hit_index ≤ typed_index ≤ word_len
//! - pending_damage — урон выпущенных, но ещё не долетевших снарядов
//!   (после попадания typed_index = hit_index, поэтому разница индексов
//!   снаряды в полёте НЕ считает)
//! - destroyed: false → true, терминально
//!
//! Состояния: Active (hit_index < word_len) → Destroyed.
//! Все аномалии (не та буква, урон без pending, мёртвая цель) — тихие no-op,
//! результат операции описывает Outcome enum.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Стабильный ID цели (выдаётся SpawnCounter при создании)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub struct TargetId(pub u32);

/// Результат `on_letter_typed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterOutcome {
    /// Цель уничтожена или все буквы уже напечатаны
    Closed,
    /// Не та буква (без штрафа, без сброса прогресса)
    Mismatch,
    /// Буква совпала, но launcher вернул 0 (например, cooldown)
    Refused,
    /// Снаряд выпущен: typed_index += 1, pending_damage += damage
    Fired { damage: u32 },
}

/// Результат `apply_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Цель уже уничтожена
    Ignored,
    /// pending_damage == 0 — попадание отброшено
    NothingPending,
    /// Урон применён, слово ещё не закончилось
    Hit { remaining: usize },
    /// Урон применён, слово закончилось → Destroyed
    Killed,
}

/// Цель, по которой стреляют набором слова
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TypedTarget {
    pub id: TargetId,
    word: String,
    word_len: usize,
    typed_index: usize,
    hit_index: usize,
    pending_damage: u32,
    destroyed: bool,
}

impl TypedTarget {
    pub fn new(id: TargetId, word: impl Into<String>) -> Self {
        let word = word.into();
        let word_len = word.chars().count();

        Self {
            id,
            word,
            word_len,
            typed_index: 0,
            hit_index: 0,
            pending_damage: 0,
            destroyed: false,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn word_len(&self) -> usize {
        self.word_len
    }

    pub fn typed_index(&self) -> usize {
        self.typed_index
    }

    pub fn hit_index(&self) -> usize {
        self.hit_index
    }

    pub fn pending_damage(&self) -> u32 {
        self.pending_damage
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Видимый остаток слова: word[hit_index..]
    pub fn displayed_word(&self) -> &str {
        match self.word.char_indices().nth(self.hit_index) {
            Some((offset, _)) => &self.word[offset..],
            None => "",
        }
    }

    /// Следующая ожидаемая буква (None — закрыта для ввода)
    pub fn next_letter(&self) -> Option<char> {
        if self.destroyed {
            return None;
        }
        self.word.chars().nth(self.typed_index)
    }

    /// Обработка нажатой буквы
    ///
    /// `launch` — внешний ballistics: выпускает снаряд и возвращает его урон
    /// (0 = выстрел отклонён). Вызывается только при совпадении буквы.
    pub fn on_letter_typed(&mut self, letter: char, launch: impl FnOnce() -> u32) -> LetterOutcome {
        if self.destroyed || self.typed_index >= self.word_len {
            return LetterOutcome::Closed;
        }

        if self.next_letter() != Some(letter) {
            return LetterOutcome::Mismatch;
        }

        let damage = launch();
        if damage == 0 {
            return LetterOutcome::Refused;
        }

        self.typed_index += 1;
        self.pending_damage += damage;

        LetterOutcome::Fired { damage }
    }

    /// Снаряд долетел: применяем `amount` урона
    ///
    /// hit_index клампится к длине слова, pending_damage — к нулю.
    /// typed_index всегда синхронизируется с hit_index.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::Ignored;
        }

        if self.pending_damage == 0 {
            return DamageOutcome::NothingPending;
        }

        self.hit_index = self.hit_index.saturating_add(amount as usize).min(self.word_len);
        self.pending_damage = self.pending_damage.saturating_sub(amount);
        self.typed_index = self.hit_index;

        if self.hit_index == self.word_len {
            self.destroyed = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hit {
                remaining: self.word_len - self.hit_index,
            }
        }
    }

    /// Принудительное уничтожение (teardown сцены)
    ///
    /// Возвращает true только при первом переходе в Destroyed.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        true
    }

    /// Текст debug overlay
    pub fn debug_summary(&self) -> String {
        [
            format!("Word: \"{}\"", self.word),
            format!("Display: \"{}\"", self.displayed_word()),
            format!("Typed: {}/{}", self.typed_index, self.word_len),
            format!("Hit: {}", self.hit_index),
            format!("PendingDmg: {}", self.pending_damage),
        ]
        .join("\n")
    }
}
