//! Drawing surface, CPU rasterization and the per-date frame renderer.

pub mod backdrop;
pub mod backend;
pub mod cpu;
pub mod frame;
pub mod legend;
pub mod style;
pub mod surface;
pub mod text;
