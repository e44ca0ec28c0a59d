use crate::data::regions::Region;
use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::ChoroResult;
use crate::map::projection::Projection;
use crate::render::style::MapStyle;
use crate::render::surface::{DrawOp, DrawSurface};
use crate::render::text::TextEngine;

/// A region already projected into pixel space.
#[derive(Clone, Debug)]
pub struct MapRegion {
    pub code: String,
    pub path: BezPath,
}

/// Project every region that touches the map window. Regions entirely outside it are dropped.
pub fn project_regions(regions: &[Region], projection: &Projection) -> Vec<MapRegion> {
    let window = projection.window();
    let mut out = Vec::with_capacity(regions.len());
    for region in regions {
        let Some(bounds) = region.bounds() else {
            continue;
        };
        if !window.intersects(&bounds) {
            tracing::debug!(code = %region.code, "region outside map window");
            continue;
        }
        out.push(MapRegion {
            code: region.code.clone(),
            path: projection.project_multipolygon(&region.geometry),
        });
    }
    out
}

/// Static base map: ocean, land masses and coastlines, clipped to the map rect.
pub fn build_backdrop(
    surface: &mut DrawSurface,
    projection: &Projection,
    regions: &[MapRegion],
    style: &MapStyle,
) {
    let map_rect = projection.map_rect();
    surface.set_map_clip(Some(map_rect));
    surface.push_backdrop(DrawOp::fill_rect(map_rect, style.ocean.to_rgba8_premul()));

    let land = style.land.to_rgba8_premul();
    for r in regions {
        surface.push_backdrop(DrawOp::Fill {
            path: r.path.clone(),
            color: land,
        });
    }

    if style.coastline_width_px > 0.0 {
        let coast = style.coastline.to_rgba8_premul();
        for r in regions {
            surface.push_backdrop(DrawOp::Stroke {
                path: r.path.clone(),
                color: coast,
                width: style.coastline_width_px,
            });
        }
    }
}

/// Static chrome around the map: the frame line and the title centered above the map.
pub fn build_chrome(
    surface: &mut DrawSurface,
    projection: &Projection,
    style: &MapStyle,
    text: Option<&mut TextEngine>,
) -> ChoroResult<()> {
    let map_rect = projection.map_rect();
    let ink = style.text_color.to_rgba8_premul();
    surface.push_foreground(DrawOp::stroke_rect(map_rect, ink, 1.0));

    if let Some(engine) = text
        && !style.title.is_empty()
    {
        let title = engine.layout(&style.title, style.title_size_px, ink)?;
        let x = map_rect.x0 + (map_rect.width() - title.width()) / 2.0;
        let y = (map_rect.y0 - title.height() - 6.0).max(0.0);
        surface.push_foreground(DrawOp::Text {
            text: title,
            origin: Point::new(x, y),
        });
    }
    Ok(())
}
