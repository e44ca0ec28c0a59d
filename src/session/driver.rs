use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuRasterizer;
use crate::render::frame::{FrameRenderer, FrameStats};
use crate::render::surface::DrawSurface;

/// Turns one date into one frame.
pub trait FrameProducer {
    fn canvas(&self) -> Canvas;
    /// `index` is the frame's position in the run; `date` is the date it shows.
    fn produce(&mut self, index: usize, date: &str) -> ChoroResult<(FrameRGBA, FrameStats)>;
}

/// [`FrameRenderer`] plus the surface and rasterizer that live for the whole run.
pub struct ChoroplethProducer {
    renderer: FrameRenderer,
    surface: DrawSurface,
    raster: CpuRasterizer,
}

impl ChoroplethProducer {
    /// Build the static layers once; every produced frame reuses them.
    pub fn new(mut renderer: FrameRenderer) -> ChoroResult<Self> {
        let surface = renderer.new_surface()?;
        let raster = CpuRasterizer::new(renderer.canvas())?;
        Ok(Self {
            renderer,
            surface,
            raster,
        })
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &DrawSurface {
        &self.surface
    }
}

impl FrameProducer for ChoroplethProducer {
    fn canvas(&self) -> Canvas {
        self.renderer.canvas()
    }

    fn produce(&mut self, index: usize, date: &str) -> ChoroResult<(FrameRGBA, FrameStats)> {
        let date_index = if self.renderer.dates().get(index).map(String::as_str) == Some(date) {
            index
        } else {
            self.renderer.table().date_index(date).ok_or_else(|| {
                ChoroError::validation(format!("date '{date}' not in case table"))
            })?
        };
        let stats = self.renderer.render_date(&mut self.surface, date_index)?;
        let frame = self.raster.render(&self.surface)?;
        Ok((frame, stats))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Rendering { index: usize },
    Done,
}

/// Totals over one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames: u64,
    pub regions_filled: u64,
    pub regions_unfilled: u64,
}

/// Walks the dates in order, once each: produce, then hand the frame to the sink.
///
/// A driver runs once. On failure the state stays at the failing frame and the sink is not
/// finalized.
#[derive(Debug)]
pub struct AnimationDriver {
    fps: Fps,
    state: DriverState,
}

impl AnimationDriver {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            state: DriverState::Idle,
        }
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    #[tracing::instrument(skip_all, fields(dates = dates.len()))]
    pub fn run(
        &mut self,
        dates: &[String],
        producer: &mut dyn FrameProducer,
        sink: &mut dyn FrameSink,
    ) -> ChoroResult<RenderStats> {
        if self.state != DriverState::Idle {
            return Err(ChoroError::validation("animation driver already ran"));
        }
        if dates.is_empty() {
            return Err(ChoroError::validation("no dates to animate"));
        }

        let canvas = producer.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let mut stats = RenderStats::default();
        for (index, date) in dates.iter().enumerate() {
            self.state = DriverState::Rendering { index };
            let (frame, frame_stats) = producer.produce(index, date)?;
            sink.push_frame(FrameIndex(index as u64), &frame)?;

            stats.frames += 1;
            stats.regions_filled += frame_stats.filled as u64;
            stats.regions_unfilled += frame_stats.unfilled as u64;
        }

        sink.end()?;
        self.state = DriverState::Done;
        tracing::info!(
            frames = stats.frames,
            filled = stats.regions_filled,
            unfilled = stats.regions_unfilled,
            secs = self.fps.frames_to_secs(stats.frames),
            "animation rendered"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
