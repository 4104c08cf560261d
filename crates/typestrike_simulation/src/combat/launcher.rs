//! Projectile launcher (ballistics collaborator)
//!
//! ECS хранит: урон за выстрел, cooldown (в тиках).
//! Внешний слой: спавн снаряда, полёт, коллизия.
//! `try_fire` → урон снаряда или 0, если выстрел отклонён (cooldown).

use bevy::prelude::*;

use crate::config::GameSettings;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ProjectileLauncher {
    /// Урон одного снаряда
    pub damage_per_shot: u32,

    /// Минимум тиков между выстрелами (0 = без ограничения)
    pub cooldown_ticks: u64,

    /// Тик последнего выстрела
    last_fired_tick: Option<u64>,
}

impl Default for ProjectileLauncher {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl ProjectileLauncher {
    pub fn new(damage_per_shot: u32, cooldown_ticks: u64) -> Self {
        Self {
            damage_per_shot,
            cooldown_ticks,
            last_fired_tick: None,
        }
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(settings.projectile_damage, settings.launcher_cooldown_ticks)
    }

    pub fn can_fire(&self, now: u64) -> bool {
        match self.last_fired_tick {
            None => true,
            Some(last) => now >= last.saturating_add(self.cooldown_ticks),
        }
    }

    /// Выстрел: урон снаряда или 0 (отклонён)
    pub fn try_fire(&mut self, now: u64) -> u32 {
        if !self.can_fire(now) {
            return 0;
        }

        self.last_fired_tick = Some(now);
        self.damage_per_shot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cooldown_fires_every_time() {
        let mut launcher = ProjectileLauncher::new(1, 0);
        assert_eq!(launcher.try_fire(5), 1);
        assert_eq!(launcher.try_fire(5), 1); // тот же тик — можно
        assert_eq!(launcher.try_fire(6), 1);
    }

    #[test]
    fn test_cooldown_refuses() {
        let mut launcher = ProjectileLauncher::new(2, 3);
        assert!(launcher.can_fire(0));
        assert_eq!(launcher.try_fire(10), 2);

        assert_eq!(launcher.try_fire(11), 0);
        assert_eq!(launcher.try_fire(12), 0);
        assert!(!launcher.can_fire(12));

        assert_eq!(launcher.try_fire(13), 2);
    }

    #[test]
    fn test_from_settings() {
        let settings = GameSettings {
            projectile_damage: 3,
            launcher_cooldown_ticks: 4,
            ..GameSettings::default()
        };
        let launcher = ProjectileLauncher::from_settings(&settings);
        assert_eq!(launcher.damage_per_shot, 3);
        assert_eq!(launcher.cooldown_ticks, 4);
    }
}
