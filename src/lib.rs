#![forbid(unsafe_code)]
//! `choromap` renders choropleth time-series animations.
//!
//! For every date column of a case table, each region on a world map is colored by the
//! bucket its count falls into, the frame is rasterized on the CPU with `vello_cpu`, and the
//! frames are streamed to a [`FrameSink`] (MP4 through the system `ffmpeg`, or memory).
//!
//! ```no_run
//! # fn main() -> choromap::ChoroResult<()> {
//! let cfg = choromap::AppConfig::load_or_default(None)?;
//! let stats = choromap::render_to_mp4(&cfg)?;
//! println!("{} frames", stats.frames);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod encode;
mod foundation;
pub mod map;
pub mod render;
pub mod scale;
pub mod session;

pub use config::{AppConfig, InputConfig, OutputConfig, ScaleConfig, ScaleEntryConfig};
pub use data::cases::CaseTable;
pub use data::regions::{Region, load_geojson, load_regions};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8Premul};
pub use foundation::error::{ChoroError, ChoroResult};
pub use map::projection::{LonLatWindow, Projection};
pub use render::backend::FrameRGBA;
pub use render::cpu::CpuRasterizer;
pub use render::frame::{FrameRenderer, FrameStats, RenderOpts};
pub use render::style::MapStyle;
pub use render::surface::{DrawOp, DrawSurface, OverlayPolicy};
pub use render::text::{FontBytes, TextEngine};
pub use scale::breakpoints::{BreakpointScale, ScaleEntry};
pub use scale::color::{ColorDef, ColorScale};
pub use session::driver::{
    AnimationDriver, ChoroplethProducer, DriverState, FrameProducer, RenderStats,
};
pub use session::pipeline::{load_renderer, render_to_mp4, render_to_sink};
