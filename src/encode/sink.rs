use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::render::backend::FrameRGBA;

/// Stream parameters handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing indices between one `begin` and one `end`.
/// When a run fails midway, `end` is not called.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> ChoroResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ChoroResult<()>;
    fn end(&mut self) -> ChoroResult<()>;
}

/// Keeps every frame in memory. Used by tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` has been called for the current stream.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Playback length implied by the captured frames and the configured fps.
    pub fn duration_secs(&self) -> Option<f64> {
        self.cfg
            .map(|c| c.fps.frames_to_secs(self.frames.len() as u64))
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ChoroResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ChoroResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ChoroError::encode("in-memory sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ChoroError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ChoroResult<()> {
        self.finished = true;
        Ok(())
    }
}
