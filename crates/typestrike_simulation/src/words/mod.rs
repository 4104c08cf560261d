//! WordBank — статические списки слов по категориям сложности
//!
//! Чистый lookup без состояния. Выбор слова — равномерный draw
//! из DeterministicRng (детерминизм spawn'ов при одинаковом seed).

use std::collections::BTreeMap;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Категория сложности слова
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "lowercase")]
pub enum WordCategory {
    Easy,
    Medium,
    Hard,
}

const EASY_WORDS: &[&str] = &[
    "cat", "dog", "sun", "run", "map", "hat", "box", "cup", "red", "fox",
    "owl", "bat", "rat", "pig", "jam", "net", "top", "web", "zip", "ant",
];

const MEDIUM_WORDS: &[&str] = &[
    "zombie", "shadow", "candle", "forest", "bridge", "hunter", "spirit", "winter",
    "garden", "rocket", "castle", "silver", "thunder", "lantern",
];

const HARD_WORDS: &[&str] = &[
    "necromancer", "labyrinth", "phantasmal", "cataclysm", "apparition",
    "bewilderment", "incantation", "sepulchre", "malevolence", "quagmire",
];

/// Word bank resource
///
/// BTreeMap — стабильный порядок при сериализации/snapshot.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBank {
    categories: BTreeMap<WordCategory, Vec<String>>,
}

impl Default for WordBank {
    fn default() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(WordCategory::Easy, to_owned_words(EASY_WORDS));
        categories.insert(WordCategory::Medium, to_owned_words(MEDIUM_WORDS));
        categories.insert(WordCategory::Hard, to_owned_words(HARD_WORDS));
        Self { categories }
    }
}

fn to_owned_words(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl WordBank {
    /// Загрузить из JSON вида `{ "categories": { "easy": [..], ... } }`
    ///
    /// Категория с пустым списком — ошибка (draw по ней невозможен).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let bank: Self = serde_json::from_str(json)?;

        for (category, words) in &bank.categories {
            if words.is_empty() {
                return Err(ConfigError::EmptyCategory(*category));
            }
        }

        Ok(bank)
    }

    /// Упорядоченный список слов категории (пустой если категории нет)
    pub fn lookup(&self, category: WordCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Равномерно случайное слово категории
    pub fn draw<R: Rng>(&self, category: WordCategory, rng: &mut R) -> Option<&str> {
        let words = self.lookup(category);
        if words.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..words.len());
        Some(words[index].as_str())
    }
}
