//! Конфигурация симуляции: GameSettings (resource) + EnemyOptions (пресеты врагов)
//!
//! Всё сериализуемо (serde), отсутствующие поля в JSON → Default.
//! Ошибки загрузки — ConfigError (единственный Result в crate).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::words::WordCategory;

/// Ошибки загрузки конфигурации / word bank
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("word category {0:?} has no words")]
    EmptyCategory(WordCategory),

    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("tick rate must be finite and positive, got {0}")]
    InvalidTickRate(f64),

    #[error("spawn margin must be non-negative, got {0}")]
    InvalidSpawnMargin(f32),
}

/// Глобальные настройки игры
///
/// Координаты экранные (y вниз), единицы — пиксели.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Размер видимой области (камеры)
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Отступ spawn ring от описанной окружности viewport
    pub spawn_margin: f32,

    /// Буфер вокруг viewport, в котором враг считается "на экране"
    pub on_screen_margin: f32,

    /// Частота FixedUpdate (Hz)
    pub tick_rate_hz: f64,

    /// Длительность красной вспышки при попадании (мс)
    pub hit_flash_ms: u32,
    pub hit_tint: u32,

    /// Размер текстуры спрайта до масштабирования и сам масштаб
    pub sprite_size: f32,
    pub sprite_scale: f32,

    /// Зазор между верхом спрайта и словом
    pub word_label_gap: f32,
    /// Смещение debug текста вниз от центра
    pub debug_label_offset: f32,
    pub debug_overlay: bool,

    /// Урон одного снаряда и cooldown launcher'а (тики, 0 = без ограничения)
    pub projectile_damage: u32,
    pub launcher_cooldown_ticks: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            spawn_margin: 50.0,
            on_screen_margin: 50.0,
            tick_rate_hz: 60.0,
            hit_flash_ms: 100,
            hit_tint: 0xff0000,
            sprite_size: 16.0,
            sprite_scale: 4.0,
            word_label_gap: 10.0,
            debug_label_offset: 40.0,
            debug_overlay: true,
            projectile_damage: 1,
            launcher_cooldown_ticks: 0,
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;

        if settings.viewport_width <= 0.0 || settings.viewport_height <= 0.0 {
            return Err(ConfigError::InvalidViewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
            });
        }

        // Time::<Fixed>::from_hz паникует на 0/NaN/inf
        if !settings.tick_rate_hz.is_finite() || settings.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate(settings.tick_rate_hz));
        }

        // Отрицательный отступ кладёт spawn ring внутрь viewport
        if settings.spawn_margin.is_nan() || settings.spawn_margin < 0.0 {
            return Err(ConfigError::InvalidSpawnMargin(settings.spawn_margin));
        }

        Ok(settings)
    }

    /// Длительность одного fixed тика (секунды)
    pub fn tick_seconds(&self) -> f32 {
        (1.0 / self.tick_rate_hz) as f32
    }

    /// hit_flash_ms → тики (округление вверх, минимум 1)
    pub fn hit_flash_ticks(&self) -> u64 {
        let ticks = (self.hit_flash_ms as f64 * self.tick_rate_hz / 1000.0).ceil() as u64;
        ticks.max(1)
    }

    /// Высота спрайта на экране (для позиционирования label)
    pub fn sprite_display_height(&self) -> f32 {
        self.sprite_size * self.sprite_scale
    }
}

/// Параметры врага (move speed, knockback, категория слов, contact damage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyOptions {
    pub move_speed: f32,
    pub knockback: f32,
    pub word_category: WordCategory,
    pub damage: u32,
}

impl Default for EnemyOptions {
    fn default() -> Self {
        Self {
            move_speed: 50.0,
            knockback: 10.0,
            word_category: WordCategory::Easy,
            damage: 10,
        }
    }
}

/// Виды врагов (пресеты поверх EnemyOptions::default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum EnemyKind {
    /// Базовый враг без переопределений
    Grunt,
    /// Медленный, но сильно отлетает при попадании
    Zombie,
}

impl EnemyKind {
    pub fn sprite(&self) -> &'static str {
        match self {
            EnemyKind::Grunt => "enemy",
            EnemyKind::Zombie => "zombie",
        }
    }

    pub fn options(&self) -> EnemyOptions {
        match self {
            EnemyKind::Grunt => EnemyOptions::default(),
            EnemyKind::Zombie => EnemyOptions {
                move_speed: 40.0,
                knockback: 80.0,
                word_category: WordCategory::Easy,
                ..default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.viewport_width, 800.0);
        assert_eq!(settings.viewport_height, 600.0);
        assert_eq!(settings.sprite_display_height(), 64.0);

        // 100ms @ 60Hz → 6 тиков
        assert_eq!(settings.hit_flash_ticks(), 6);
    }

    #[test]
    fn test_settings_partial_json() {
        let settings = GameSettings::from_json(r#"{ "viewport_width": 1024.0, "hit_flash_ms": 1 }"#)
            .expect("valid settings");

        assert_eq!(settings.viewport_width, 1024.0);
        assert_eq!(settings.viewport_height, 600.0); // default
        assert_eq!(settings.hit_flash_ticks(), 1); // минимум 1 тик
    }

    #[test]
    fn test_settings_rejects_bad_viewport() {
        let err = GameSettings::from_json(r#"{ "viewport_height": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { .. }));

        let err = GameSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_settings_rejects_bad_tick_rate() {
        for json in [r#"{ "tick_rate_hz": 0.0 }"#, r#"{ "tick_rate_hz": -30.0 }"#] {
            let err = GameSettings::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTickRate(_)), "{}", json);
        }

        // Переполнение f64: либо ошибка парсера, либо inf — в любом случае Err
        let err = GameSettings::from_json(r#"{ "tick_rate_hz": 1e400 }"#);
        assert!(!matches!(err, Ok(_)));

        let settings = GameSettings::from_json(r#"{ "tick_rate_hz": 30.0 }"#).expect("valid tick rate");
        assert_eq!(settings.hit_flash_ticks(), 3);
    }

    #[test]
    fn test_settings_rejects_negative_spawn_margin() {
        let err = GameSettings::from_json(r#"{ "spawn_margin": -10.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpawnMargin(_)));

        // Нулевой отступ допустим: ring = описанная окружность
        let settings = GameSettings::from_json(r#"{ "spawn_margin": 0.0 }"#).expect("zero margin");
        assert_eq!(settings.spawn_margin, 0.0);
    }

    #[test]
    fn test_zombie_preset() {
        let zombie = EnemyKind::Zombie.options();
        assert_eq!(zombie.move_speed, 40.0);
        assert_eq!(zombie.knockback, 80.0);
        assert_eq!(zombie.damage, 10); // из defaults
        assert_eq!(EnemyKind::Zombie.sprite(), "zombie");

        let grunt = EnemyKind::Grunt.options();
        assert_eq!(grunt, EnemyOptions::default());
    }
}
