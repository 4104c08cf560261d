//! Shared domain — cross-cutting ресурсы
//!
//! - Viewport (камера, on-screen проверка)

pub mod viewport;

pub use viewport::*;
