//! Frame sinks. Frames arrive in date order; sinks never reorder or buffer them.

/// MP4 output through the system `ffmpeg`.
pub mod ffmpeg;
/// The [`sink::FrameSink`] contract and the in-memory sink.
pub mod sink;
