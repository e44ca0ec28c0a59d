//! Geographic window and its projection onto the canvas.

pub mod projection;
