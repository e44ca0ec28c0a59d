use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, BezPath, Point, Rect};
use crate::foundation::error::{ChoroError, ChoroResult};

/// Geographic window in degrees (lower-left and upper-right corners).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLatWindow {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Default for LonLatWindow {
    fn default() -> Self {
        Self {
            lon_min: -180.0,
            lon_max: 180.0,
            lat_min: -70.0,
            lat_max: 90.0,
        }
    }
}

impl LonLatWindow {
    pub fn validate(&self) -> ChoroResult<()> {
        let finite = [self.lon_min, self.lon_max, self.lat_min, self.lat_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.lon_min >= self.lon_max || self.lat_min >= self.lat_max {
            return Err(ChoroError::validation(
                "map window must have finite bounds with min < max",
            ));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn intersects(&self, bounds: &geo::Rect<f64>) -> bool {
        bounds.max().x >= self.lon_min
            && bounds.min().x <= self.lon_max
            && bounds.max().y >= self.lat_min
            && bounds.min().y <= self.lat_max
    }
}

/// Equirectangular ("cylindrical") projection of a lon/lat window into a pixel viewport.
///
/// The window keeps its aspect ratio (one degree is the same number of pixels on both axes)
/// and is centered inside the viewport. North is up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    window: LonLatWindow,
    map_rect: Rect,
    scale: f64,
}

impl Projection {
    pub fn fit(window: LonLatWindow, viewport: Rect) -> ChoroResult<Self> {
        window.validate()?;
        if viewport.width() <= 0.0 || viewport.height() <= 0.0 {
            return Err(ChoroError::validation("map viewport must have positive size"));
        }

        let scale = (viewport.width() / window.width()).min(viewport.height() / window.height());
        let w = window.width() * scale;
        let h = window.height() * scale;
        let x0 = viewport.x0 + (viewport.width() - w) / 2.0;
        let y0 = viewport.y0 + (viewport.height() - h) / 2.0;

        Ok(Self {
            window,
            map_rect: Rect::new(x0, y0, x0 + w, y0 + h),
            scale,
        })
    }

    pub fn window(&self) -> LonLatWindow {
        self.window
    }

    /// Pixel rectangle actually covered by the map.
    pub fn map_rect(&self) -> Rect {
        self.map_rect
    }

    /// Pixels per degree.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Affine transform from (lon, lat) to pixel coordinates.
    pub fn to_affine(&self) -> Affine {
        Affine::new([
            self.scale,
            0.0,
            0.0,
            -self.scale,
            self.map_rect.x0 - self.window.lon_min * self.scale,
            self.map_rect.y1 + self.window.lat_min * self.scale,
        ])
    }

    pub fn project(&self, lon: f64, lat: f64) -> Point {
        self.to_affine() * Point::new(lon, lat)
    }

    /// Point at a fraction of the map rect, measured from its bottom-left corner.
    pub fn axes_fraction(&self, fx: f64, fy: f64) -> Point {
        Point::new(
            self.map_rect.x0 + fx * self.map_rect.width(),
            self.map_rect.y1 - fy * self.map_rect.height(),
        )
    }

    /// Project every ring (exteriors and holes) of `geometry` into one closed pixel-space path.
    ///
    /// The raster backend fills region paths with the even-odd rule, so holes stay empty
    /// whatever their winding.
    pub fn project_multipolygon(&self, geometry: &MultiPolygon<f64>) -> BezPath {
        let affine = self.to_affine();
        let mut path = BezPath::new();
        for polygon in &geometry.0 {
            push_ring(&mut path, polygon.exterior(), affine);
            for hole in polygon.interiors() {
                push_ring(&mut path, hole, affine);
            }
        }
        path
    }
}

fn push_ring(path: &mut BezPath, ring: &geo::LineString<f64>, affine: Affine) {
    let mut coords = ring.coords();
    let Some(first) = coords.next() else {
        return;
    };
    path.move_to(affine * Point::new(first.x, first.y));
    for c in coords {
        path.line_to(affine * Point::new(c.x, c.y));
    }
    path.close_path();
}

#[cfg(test)]
#[path = "../../tests/unit/map/projection.rs"]
mod tests;
