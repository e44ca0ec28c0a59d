use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;
use geo::{BoundingRect, MultiPolygon, Rect};

use crate::foundation::error::{ChoroError, ChoroResult};

/// A country (or any region) boundary keyed by its standardized code.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub code: String,
    /// Boundary in lon/lat degrees.
    pub geometry: MultiPolygon<f64>,
}

impl Region {
    pub fn new(code: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            code: code.into(),
            geometry,
        }
    }

    /// Lon/lat bounding box; `None` for empty geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.geometry.bounding_rect()
    }
}

/// Load region boundaries, choosing the format from the file extension.
///
/// `.shp` reads a shapefile (with its `.dbf` sidecar); `.json`/`.geojson` read a GeoJSON
/// FeatureCollection. `id_field` names the attribute holding the region code.
#[tracing::instrument]
pub fn load_regions(path: &Path, id_field: &str) -> ChoroResult<Vec<Region>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .ok_or_else(|| {
            ChoroError::input(format!(
                "boundary file '{}' has no extension",
                path.display()
            ))
        })?;

    let regions = match extension.as_str() {
        "shp" => load_shapefile(path, id_field)?,
        "json" | "geojson" => {
            let file = File::open(path)
                .with_context(|| format!("failed to open GeoJSON file '{}'", path.display()))?;
            load_geojson(BufReader::new(file), id_field)?
        }
        other => {
            return Err(ChoroError::input(format!(
                "unsupported boundary format '.{other}' (expected .shp, .json or .geojson)"
            )));
        }
    };

    tracing::info!(regions = regions.len(), "loaded region boundaries");
    Ok(regions)
}

fn load_shapefile(path: &Path, id_field: &str) -> ChoroResult<Vec<Region>> {
    let mut reader = shapefile::Reader::from_path(path).map_err(|e| {
        ChoroError::input(format!("failed to open shapefile '{}': {e}", path.display()))
    })?;

    let mut regions = Vec::new();
    for result in reader.iter_shapes_and_records() {
        let (shape, record) =
            result.map_err(|e| ChoroError::input(format!("malformed shapefile record: {e}")))?;

        let code = match record.get(id_field) {
            Some(shapefile::dbase::FieldValue::Character(Some(s))) => s.trim().to_string(),
            Some(shapefile::dbase::FieldValue::Character(None)) => continue,
            Some(_) => {
                return Err(ChoroError::input(format!(
                    "shapefile field '{id_field}' must be a character field"
                )));
            }
            None => {
                return Err(ChoroError::input(format!(
                    "field '{id_field}' not found in shapefile attributes"
                )));
            }
        };
        if code.is_empty() {
            continue;
        }

        let geometry: MultiPolygon<f64> = match shape {
            shapefile::Shape::Polygon(polygon) => polygon
                .try_into()
                .map_err(|e| ChoroError::input(format!("failed to convert polygon: {e:?}")))?,
            shapefile::Shape::PolygonM(polygon) => polygon
                .try_into()
                .map_err(|e| ChoroError::input(format!("failed to convert polygonM: {e:?}")))?,
            shapefile::Shape::PolygonZ(polygon) => polygon
                .try_into()
                .map_err(|e| ChoroError::input(format!("failed to convert polygonZ: {e:?}")))?,
            _ => {
                tracing::warn!(code = %code, "skipping non-polygon shape");
                continue;
            }
        };

        regions.push(Region::new(code, geometry));
    }
    Ok(regions)
}

/// Read regions from a GeoJSON FeatureCollection.
///
/// Features whose `id_field` property is absent or not a string/number, and features without
/// polygonal geometry, are skipped.
pub fn load_geojson<R: Read>(reader: R, id_field: &str) -> ChoroResult<Vec<Region>> {
    let geojson = geojson::GeoJson::from_reader(reader)
        .map_err(|e| ChoroError::input(format!("failed to parse GeoJSON: {e}")))?;

    let geojson::GeoJson::FeatureCollection(collection) = geojson else {
        return Err(ChoroError::input("GeoJSON must be a FeatureCollection"));
    };

    let mut regions = Vec::new();
    for feature in collection.features {
        let code = match feature
            .properties
            .as_ref()
            .and_then(|props| props.get(id_field))
        {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        if code.is_empty() {
            continue;
        }

        let Some(geometry) = feature.geometry else {
            continue;
        };
        let geometry: geo::Geometry<f64> = geometry
            .value
            .try_into()
            .map_err(|e| ChoroError::input(format!("failed to convert geometry: {e:?}")))?;

        let geometry = match geometry {
            geo::Geometry::MultiPolygon(mp) => mp,
            geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            _ => {
                tracing::warn!(code = %code, "skipping non-polygon feature");
                continue;
            }
        };

        regions.push(Region::new(code, geometry));
    }
    Ok(regions)
}

#[cfg(test)]
#[path = "../../tests/unit/data/regions.rs"]
mod tests;
