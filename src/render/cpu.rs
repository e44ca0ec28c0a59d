use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{BezPath, Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::render::backend::FrameRGBA;
use crate::render::surface::{DrawOp, DrawSurface};

/// CPU rasterizer powered by `vello_cpu`.
///
/// Every call repaints the whole surface from its layers into a reused pixmap, so no pixels
/// leak from one frame into the next.
pub struct CpuRasterizer {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRasterizer {
    pub fn new(canvas: Canvas) -> ChoroResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ChoroError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ChoroError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ChoroError::validation("canvas width/height must be non-zero"));
        }
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn render(&mut self, surface: &DrawSurface) -> ChoroResult<FrameRGBA> {
        if surface.canvas() != self.canvas {
            return Err(ChoroError::validation(format!(
                "surface is {}x{} but rasterizer is {}x{}",
                surface.canvas().width,
                surface.canvas().height,
                self.canvas.width,
                self.canvas.height
            )));
        }

        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        set_color(&mut ctx, surface.background());
        ctx.fill_rect(&rect_to_cpu(self.canvas.rect()));

        if let Some(clip) = surface.map_clip() {
            ctx.push_clip_layer(&rect_to_cpu(clip).to_path(0.1));
        }
        for op in surface.backdrop().iter().chain(surface.overlays()) {
            draw_op(&mut ctx, op);
        }
        if surface.map_clip().is_some() {
            ctx.pop_layer();
        }

        for op in surface.caption().into_iter().chain(surface.foreground()) {
            draw_op(&mut ctx, op);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Fill { path, color } => {
            set_color(ctx, *color);
            ctx.set_fill_rule(vello_cpu::peniko::Fill::EvenOdd);
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::Stroke { path, color, width } => {
            set_color(ctx, *color);
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
        DrawOp::Text { text, origin } => {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
            for line in text.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&text.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, color: Rgba8Premul) {
    let [r, g, b, a] = color.to_straight_rgba();
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
