use crate::data::cases::CaseTable;
use crate::data::regions::Region;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{ChoroError, ChoroResult};
use crate::map::projection::{LonLatWindow, Projection};
use crate::render::backdrop::{MapRegion, build_backdrop, build_chrome, project_regions};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuRasterizer;
use crate::render::legend::{LegendLayout, draw_legend};
use crate::render::style::MapStyle;
use crate::render::surface::{DrawOp, DrawSurface, OverlayPolicy};
use crate::render::text::{FontBytes, TextEngine};
use crate::scale::breakpoints::BreakpointScale;

/// Layout and look of every frame in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOpts {
    pub canvas: Canvas,
    pub window: LonLatWindow,
    pub style: MapStyle,
    pub overlay_policy: OverlayPolicy,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1300,
                height: 900,
            },
            window: LonLatWindow::default(),
            style: MapStyle::default(),
            overlay_policy: OverlayPolicy::Replace,
        }
    }
}

/// Per-date region counts produced by one [`FrameRenderer::render_date`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub filled: usize,
    pub unfilled: usize,
}

/// Colors regions by their count on a given date.
///
/// Regions are projected once at construction. The renderer never owns the draw surface; the
/// caller creates it with [`FrameRenderer::new_surface`] and passes it to every call.
pub struct FrameRenderer {
    table: CaseTable,
    scale: BreakpointScale,
    regions: Vec<MapRegion>,
    projection: Projection,
    opts: RenderOpts,
    text: Option<TextEngine>,
}

impl FrameRenderer {
    pub fn new(
        table: CaseTable,
        regions: &[Region],
        scale: BreakpointScale,
        opts: RenderOpts,
        font: Option<FontBytes>,
    ) -> ChoroResult<Self> {
        let canvas = opts.canvas;
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ChoroError::validation("canvas width/height must be non-zero"));
        }
        let m = opts.style.margin_px.max(0.0);
        let viewport = Rect::new(
            m,
            m,
            f64::from(canvas.width) - m,
            f64::from(canvas.height) - m,
        );
        let projection = Projection::fit(opts.window, viewport)?;
        let regions = project_regions(regions, &projection);
        let text = font.map(TextEngine::new).transpose()?;

        Ok(Self {
            table,
            scale,
            regions,
            projection,
            opts,
            text,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.opts.canvas
    }

    pub fn dates(&self) -> &[String] {
        self.table.dates()
    }

    pub fn table(&self) -> &CaseTable {
        &self.table
    }

    pub fn scale(&self) -> &BreakpointScale {
        &self.scale
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn regions(&self) -> &[MapRegion] {
        &self.regions
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Fresh surface with the static layers (backdrop, frame, title, legend) already built.
    pub fn new_surface(&mut self) -> ChoroResult<DrawSurface> {
        let style = &self.opts.style;
        let mut surface = DrawSurface::new(
            self.opts.canvas,
            style.background.to_rgba8_premul(),
            self.opts.overlay_policy,
        );
        build_backdrop(&mut surface, &self.projection, &self.regions, style);
        build_chrome(&mut surface, &self.projection, style, self.text.as_mut())?;
        let legend = LegendLayout::inset(&self.scale, self.projection.map_rect());
        draw_legend(&mut surface, &legend, style, self.text.as_mut())?;
        Ok(surface)
    }

    /// Draw the overlays and caption for the table's `date_index`-th date.
    pub fn render_date(
        &mut self,
        surface: &mut DrawSurface,
        date_index: usize,
    ) -> ChoroResult<FrameStats> {
        let date = self.table.dates().get(date_index).ok_or_else(|| {
            ChoroError::validation(format!(
                "date index {date_index} out of range (table has {} dates)",
                self.table.dates().len()
            ))
        })?;

        surface.begin_frame();

        let style = &self.opts.style;
        let border = style.region_border.to_rgba8_premul();
        let mut stats = FrameStats::default();
        for region in &self.regions {
            let count = self.table.count(&region.code, date_index);
            let Some(bucket) = self.scale.classify_count(count) else {
                stats.unfilled += 1;
                continue;
            };
            surface.push_overlay(DrawOp::Fill {
                path: region.path.clone(),
                color: self.scale.color(bucket),
            });
            if style.region_border_width_px > 0.0 {
                surface.push_overlay(DrawOp::Stroke {
                    path: region.path.clone(),
                    color: border,
                    width: style.region_border_width_px,
                });
            }
            stats.filled += 1;
        }

        if let Some(engine) = self.text.as_mut() {
            let caption = engine.layout(
                date,
                style.caption_size_px,
                style.text_color.to_rgba8_premul(),
            )?;
            let [fx, fy] = style.caption_at;
            let anchor = self.projection.axes_fraction(fx, fy);
            // anchor is the text's lower-left corner
            surface.set_caption(DrawOp::Text {
                origin: Point::new(anchor.x, anchor.y - caption.height()),
                text: caption,
            });
        }

        tracing::debug!(
            date = %date,
            filled = stats.filled,
            unfilled = stats.unfilled,
            "frame drawn"
        );
        Ok(stats)
    }

    /// Render one date to pixels on a throwaway surface (previews, `frame` command).
    pub fn render_single(&mut self, date: &str) -> ChoroResult<(FrameRGBA, FrameStats)> {
        let idx = self
            .table
            .date_index(date)
            .ok_or_else(|| ChoroError::validation(format!("date '{date}' not in case table")))?;
        let mut surface = self.new_surface()?;
        let stats = self.render_date(&mut surface, idx)?;
        let frame = CpuRasterizer::new(self.opts.canvas)?.render(&surface)?;
        Ok((frame, stats))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
