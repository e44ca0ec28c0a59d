use crate::foundation::core::{BezPath, Point, Rect, Rgba8Premul};
use crate::foundation::error::ChoroResult;
use crate::render::style::MapStyle;
use crate::render::surface::{DrawOp, DrawSurface};
use crate::render::text::TextEngine;
use crate::scale::breakpoints::BreakpointScale;

/// Legend bar width as a fraction of the map rect width.
pub const LEGEND_WIDTH_FRAC: f64 = 0.03;
/// Legend bar height as a fraction of the map rect height.
pub const LEGEND_HEIGHT_FRAC: f64 = 0.5;
const INSET_PAD_PX: f64 = 8.0;
const TICK_LEN_PX: f64 = 4.0;
const LABEL_GAP_PX: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendCell {
    pub rect: Rect,
    pub color: Rgba8Premul,
    pub label: String,
}

impl LegendCell {
    /// Y coordinate of the cell's lower edge, where its threshold tick sits.
    pub fn tick_y(&self) -> f64 {
        self.rect.y1
    }
}

/// Pixel geometry of the colorbar: cells stacked bottom-to-top in bucket order.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
    pub bar: Rect,
    pub cells: Vec<LegendCell>,
}

impl LegendLayout {
    /// Place the bar in the lower-left corner of `map_rect`.
    pub fn inset(scale: &BreakpointScale, map_rect: Rect) -> Self {
        let w = map_rect.width() * LEGEND_WIDTH_FRAC;
        let h = map_rect.height() * LEGEND_HEIGHT_FRAC;
        let x0 = map_rect.x0 + INSET_PAD_PX;
        let y1 = map_rect.y1 - INSET_PAD_PX;
        Self::within(scale, Rect::new(x0, y1 - h, x0 + w, y1))
    }

    pub fn within(scale: &BreakpointScale, bar: Rect) -> Self {
        let n = scale.len().max(1);
        let cell_h = bar.height() / n as f64;
        let cells = scale
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let y1 = bar.y1 - cell_h * i as f64;
                LegendCell {
                    rect: Rect::new(bar.x0, y1 - cell_h, bar.x1, y1),
                    color: e.color,
                    label: e.label.clone(),
                }
            })
            .collect();
        Self { bar, cells }
    }
}

/// Draw the legend into the surface's static foreground.
///
/// Labels are skipped when `text` is `None`.
pub fn draw_legend(
    surface: &mut DrawSurface,
    layout: &LegendLayout,
    style: &MapStyle,
    mut text: Option<&mut TextEngine>,
) -> ChoroResult<()> {
    let ink = style.text_color.to_rgba8_premul();

    for cell in &layout.cells {
        surface.push_foreground(DrawOp::fill_rect(cell.rect, cell.color));
    }
    surface.push_foreground(DrawOp::stroke_rect(layout.bar, ink, 0.5));

    for cell in &layout.cells {
        let y = cell.tick_y();
        let mut tick = BezPath::new();
        tick.move_to((layout.bar.x1, y));
        tick.line_to((layout.bar.x1 + TICK_LEN_PX, y));
        surface.push_foreground(DrawOp::Stroke {
            path: tick,
            color: ink,
            width: 0.5,
        });

        if let Some(engine) = text.as_deref_mut() {
            let label = engine.layout(&cell.label, style.legend_label_size_px, ink)?;
            let origin = Point::new(
                layout.bar.x1 + TICK_LEN_PX + LABEL_GAP_PX,
                y - label.height() / 2.0,
            );
            surface.push_foreground(DrawOp::Text {
                text: label,
                origin,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/legend.rs"]
mod tests;
