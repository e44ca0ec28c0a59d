use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8Premul};
use crate::render::text::PreparedText;

/// One drawing command in pixel space.
#[derive(Clone, Debug)]
pub enum DrawOp {
    Fill {
        path: BezPath,
        color: Rgba8Premul,
    },
    Stroke {
        path: BezPath,
        color: Rgba8Premul,
        width: f64,
    },
    /// Text block with its layout box's top-left corner at `origin`.
    Text {
        text: Arc<PreparedText>,
        origin: Point,
    },
}

impl DrawOp {
    pub fn fill_rect(rect: Rect, color: Rgba8Premul) -> Self {
        Self::Fill {
            path: rect_path(rect),
            color,
        }
    }

    pub fn stroke_rect(rect: Rect, color: Rgba8Premul, width: f64) -> Self {
        Self::Stroke {
            path: rect_path(rect),
            color,
            width,
        }
    }
}

fn rect_path(rect: Rect) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((rect.x0, rect.y0));
    p.line_to((rect.x1, rect.y0));
    p.line_to((rect.x1, rect.y1));
    p.line_to((rect.x0, rect.y1));
    p.close_path();
    p
}

/// What happens to the previous frame's region overlays when a new frame begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPolicy {
    /// Each frame shows only its own date's fills.
    #[default]
    Replace,
    /// Fills from earlier frames stay underneath the current ones.
    Accumulate,
}

/// Explicit drawing surface shared by every frame of one run.
///
/// Draw order: background, backdrop, overlays (both clipped to the map rect when set),
/// caption, foreground. Backdrop and foreground are static; overlays and caption belong to the
/// current frame.
#[derive(Clone, Debug)]
pub struct DrawSurface {
    canvas: Canvas,
    background: Rgba8Premul,
    map_clip: Option<Rect>,
    policy: OverlayPolicy,
    backdrop: Vec<DrawOp>,
    overlays: Vec<DrawOp>,
    caption: Option<DrawOp>,
    foreground: Vec<DrawOp>,
    frames_begun: u64,
}

impl DrawSurface {
    pub fn new(canvas: Canvas, background: Rgba8Premul, policy: OverlayPolicy) -> Self {
        Self {
            canvas,
            background,
            map_clip: None,
            policy,
            backdrop: Vec::new(),
            overlays: Vec::new(),
            caption: None,
            foreground: Vec::new(),
            frames_begun: 0,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn background(&self) -> Rgba8Premul {
        self.background
    }

    pub fn policy(&self) -> OverlayPolicy {
        self.policy
    }

    pub fn set_map_clip(&mut self, clip: Option<Rect>) {
        self.map_clip = clip;
    }

    pub fn map_clip(&self) -> Option<Rect> {
        self.map_clip
    }

    pub fn push_backdrop(&mut self, op: DrawOp) {
        self.backdrop.push(op);
    }

    pub fn push_foreground(&mut self, op: DrawOp) {
        self.foreground.push(op);
    }

    /// Start a new frame: applies the overlay policy and drops the previous caption.
    pub fn begin_frame(&mut self) {
        if self.policy == OverlayPolicy::Replace {
            self.overlays.clear();
        }
        self.caption = None;
        self.frames_begun += 1;
    }

    pub fn push_overlay(&mut self, op: DrawOp) {
        self.overlays.push(op);
    }

    pub fn set_caption(&mut self, op: DrawOp) {
        self.caption = Some(op);
    }

    pub fn backdrop(&self) -> &[DrawOp] {
        &self.backdrop
    }

    pub fn overlays(&self) -> &[DrawOp] {
        &self.overlays
    }

    pub fn caption(&self) -> Option<&DrawOp> {
        self.caption.as_ref()
    }

    pub fn foreground(&self) -> &[DrawOp] {
        &self.foreground
    }

    pub fn frames_begun(&self) -> u64 {
        self.frames_begun
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
