//! Breakpoint classification, palette interpolation and legend labels.

pub mod breakpoints;
pub mod color;
pub mod label;
