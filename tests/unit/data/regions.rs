use super::*;
use serde_json::json;

fn collection() -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"ISO3": "USA"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-120.0, 30.0], [-70.0, 30.0], [-70.0, 48.0], [-120.0, 48.0], [-120.0, 30.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"ISO3": "JPN"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[130.0, 31.0], [135.0, 31.0], [135.0, 35.0], [130.0, 31.0]]],
                        [[[140.0, 36.0], [145.0, 36.0], [145.0, 44.0], [140.0, 36.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {"NAME": "no code"},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            },
            {
                "type": "Feature",
                "properties": {"ISO3": "PIN"},
                "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}
            }
        ]
    })
}

#[test]
fn reads_polygons_and_multipolygons() {
    let bytes = serde_json::to_vec(&collection()).unwrap();
    let regions = load_geojson(bytes.as_slice(), "ISO3").unwrap();
    let codes: Vec<&str> = regions.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["USA", "JPN"]);
    assert_eq!(regions[0].geometry.0.len(), 1);
    assert_eq!(regions[1].geometry.0.len(), 2);
}

#[test]
fn region_bounds_cover_geometry() {
    let bytes = serde_json::to_vec(&collection()).unwrap();
    let regions = load_geojson(bytes.as_slice(), "ISO3").unwrap();
    let b = regions[0].bounds().unwrap();
    assert_eq!((b.min().x, b.min().y), (-120.0, 30.0));
    assert_eq!((b.max().x, b.max().y), (-70.0, 48.0));
}

#[test]
fn numeric_ids_are_stringified() {
    let fc = json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"id": 840},
            "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}
        }]
    });
    let bytes = serde_json::to_vec(&fc).unwrap();
    let regions = load_geojson(bytes.as_slice(), "id").unwrap();
    assert_eq!(regions[0].code, "840");
}

#[test]
fn non_collection_is_input_error() {
    let point = json!({"type": "Point", "coordinates": [0.0, 0.0]});
    let bytes = serde_json::to_vec(&point).unwrap();
    let err = load_geojson(bytes.as_slice(), "ISO3").unwrap_err();
    assert!(matches!(err, ChoroError::Input(_)));
}

#[test]
fn unsupported_extension_is_input_error() {
    let err = load_regions(Path::new("world.kml"), "ISO3").unwrap_err();
    assert!(matches!(err, ChoroError::Input(_)));
    assert!(load_regions(Path::new("world"), "ISO3").is_err());
}

#[test]
fn geojson_file_roundtrip_through_load_regions() {
    let dir = std::path::PathBuf::from("target").join("regions_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("world.geojson");
    std::fs::write(&path, serde_json::to_vec(&collection()).unwrap()).unwrap();

    let regions = load_regions(&path, "ISO3").unwrap();
    assert_eq!(regions.len(), 2);
}
