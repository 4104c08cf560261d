//! Viewport (камера) — видимая область в мировых координатах

use bevy::prelude::*;

use crate::config::GameSettings;

/// Видимая область: scroll (левый верхний угол) + размер
///
/// Внешний слой камеры обновляет scroll; симуляция только читает.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(settings.viewport_width, settings.viewport_height)
    }

    pub fn center(&self) -> Vec2 {
        self.scroll + self.size / 2.0
    }

    /// Точка внутри viewport, расширенного на `margin` (строгие неравенства)
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.x > self.scroll.x - margin
            && point.x < self.scroll.x + self.size.x + margin
            && point.y > self.scroll.y - margin
            && point.y < self.scroll.y + self.size.y + margin
    }
}
