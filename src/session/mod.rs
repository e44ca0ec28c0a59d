//! Frame sequencing: dates in, frames out to a sink.

/// [`driver::AnimationDriver`] and the producer seam it drives.
pub mod driver;
/// Config-driven entry points.
pub mod pipeline;
