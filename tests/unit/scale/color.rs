use super::*;
use serde_json::json;

fn hex(s: &str) -> ColorDef {
    ColorDef::hex(s).unwrap()
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_rgba_object_and_array() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn rejects_malformed_hex() {
    assert!(ColorDef::hex("#fff").is_err());
    assert!(ColorDef::hex("#gg0000").is_err());
    assert!(serde_json::from_value::<ColorDef>(json!([1.0, 0.0])).is_err());
}

#[test]
fn one_color_per_bucket_reproduces_palette_exactly() {
    let palette = vec![hex("#FFE5E5"), hex("#FF6A6A"), hex("#CD0000"), hex("#330000")];
    let scale = ColorScale::new(palette.clone(), 4).unwrap();
    for (i, c) in palette.iter().enumerate() {
        assert_eq!(scale.color_for_bucket(i), c.to_rgba8_premul());
    }
}

#[test]
fn interpolates_between_anchors() {
    let scale = ColorScale::new(vec![hex("#000000"), hex("#ffffff")], 5).unwrap();
    assert_eq!(scale.color_for_bucket(0), Rgba8Premul::opaque(0, 0, 0));
    assert_eq!(scale.color_for_bucket(2), Rgba8Premul::opaque(128, 128, 128));
    assert_eq!(scale.color_for_bucket(4), Rgba8Premul::opaque(255, 255, 255));
}

#[test]
fn out_of_range_bucket_clamps_to_last() {
    let scale = ColorScale::new(vec![hex("#000000"), hex("#ff0000")], 2).unwrap();
    assert_eq!(scale.color_for_bucket(7), scale.color_for_bucket(1));
}

#[test]
fn color_for_bucket_is_pure() {
    let scale = ColorScale::new(vec![hex("#FFE5E5"), hex("#8B0000"), hex("#330000")], 16).unwrap();
    for i in 0..16 {
        assert_eq!(scale.color_for_bucket(i), scale.color_for_bucket(i));
    }
}

#[test]
fn single_color_and_single_bucket() {
    let scale = ColorScale::new(vec![hex("#123456")], 5).unwrap();
    assert_eq!(scale.color_for_bucket(3), hex("#123456").to_rgba8_premul());

    let scale = ColorScale::new(vec![hex("#000000"), hex("#ffffff")], 1).unwrap();
    assert_eq!(scale.normalize(0), 0.0);
}

#[test]
fn rejects_empty_inputs() {
    assert!(ColorScale::new(vec![], 3).is_err());
    assert!(ColorScale::new(vec![hex("#000000")], 0).is_err());
}

#[test]
fn rgb8_matches_hex_and_round_trips_to_bytes() {
    assert_eq!(ColorDef::rgb8(0x87, 0xCE, 0xFA), hex("#87CEFA"));
    assert_eq!(ColorDef::rgb8(0x87, 0xCE, 0xFA).to_rgba8_straight(), [135, 206, 250, 255]);
}

#[test]
fn one_color_per_interval_keeps_exact_colors_and_repeats_last() {
    let palette = vec![hex("#FFE5E5"), hex("#FF6A6A"), hex("#330000")];
    let scale = ColorScale::new(palette.clone(), 4).unwrap();
    for (i, c) in palette.iter().enumerate() {
        assert_eq!(scale.color_for_bucket(i), c.to_rgba8_premul());
    }
    assert_eq!(scale.color_for_bucket(3), hex("#330000").to_rgba8_premul());
    assert_eq!(scale.color_for_bucket(9), hex("#330000").to_rgba8_premul());

    let two = ColorScale::new(vec![hex("#123456")], 2).unwrap();
    assert_eq!(two.color_for_bucket(1), hex("#123456").to_rgba8_premul());
}
