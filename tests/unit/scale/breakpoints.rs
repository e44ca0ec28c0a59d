use super::*;

fn five_bucket_scale() -> BreakpointScale {
    let palette = ["#FFE5E5", "#FF6A6A", "#FF0000", "#CD0000", "#660000"]
        .iter()
        .map(|h| ColorDef::hex(h).unwrap())
        .collect();
    let labels = vec![None; 5];
    BreakpointScale::from_palette(&[1.0, 20.0, 100.0, 500.0, 1000.0], &labels, palette).unwrap()
}

#[test]
fn below_first_threshold_is_bucket_zero() {
    let s = five_bucket_scale();
    for v in [-5.0, 0.0, 0.999, f64::NEG_INFINITY] {
        assert_eq!(s.classify(v), 0, "value {v}");
    }
}

#[test]
fn at_or_above_last_threshold_is_last_bucket() {
    let s = five_bucket_scale();
    for v in [1000.0, 1000.5, 1e12, f64::INFINITY] {
        assert_eq!(s.classify(v), 4, "value {v}");
    }
}

#[test]
fn thresholds_are_inclusive_lower_bounds() {
    let s = five_bucket_scale();
    let thresholds: Vec<f64> = s.thresholds().collect();
    for (i, t) in thresholds.iter().enumerate() {
        assert_eq!(s.classify(*t), i);
        if i > 0 {
            assert_eq!(s.classify(t - 1e-6), i - 1);
        }
    }
}

#[test]
fn interior_values_land_between_thresholds() {
    let s = five_bucket_scale();
    assert_eq!(s.classify(10.0), 0);
    assert_eq!(s.classify(99.0), 1);
    assert_eq!(s.classify(600.0), 3);
}

#[test]
fn missing_and_nan_counts_are_not_classified() {
    let s = five_bucket_scale();
    assert_eq!(s.classify_count(None), None);
    assert_eq!(s.classify_count(Some(f64::NAN)), None);
    assert_eq!(s.classify_count(Some(600.0)), Some(3));
}

#[test]
fn generated_and_explicit_labels() {
    let palette = vec![ColorDef::hex("#000000").unwrap()];
    let s = BreakpointScale::from_palette(
        &[1.0, 1000.0, 100_000.0],
        &[None, None, Some("1 L".to_string())],
        palette,
    )
    .unwrap();
    let labels: Vec<&str> = s.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "1 K", "1 L"]);
}

#[test]
fn rejects_non_increasing_or_non_finite_thresholds() {
    let entry = |t: f64| ScaleEntry {
        threshold: t,
        color: Rgba8Premul::opaque(0, 0, 0),
        label: String::new(),
    };
    assert!(BreakpointScale::new(vec![]).is_err());
    assert!(BreakpointScale::new(vec![entry(1.0), entry(1.0)]).is_err());
    assert!(BreakpointScale::new(vec![entry(5.0), entry(1.0)]).is_err());
    assert!(BreakpointScale::new(vec![entry(f64::NAN)]).is_err());
    assert!(BreakpointScale::new(vec![entry(1.0), entry(2.0)]).is_ok());
}

#[test]
fn rejects_length_mismatch() {
    let palette = vec![ColorDef::hex("#000000").unwrap()];
    assert!(BreakpointScale::from_palette(&[1.0, 2.0], &[None], palette).is_err());
}

#[test]
fn bucket_colors_follow_entries() {
    let s = five_bucket_scale();
    assert_eq!(s.color_for_value(10.0), s.entries()[0].color);
    assert_eq!(s.color_for_value(600.0), s.entries()[3].color);
    assert_eq!(s.color(99), s.entries()[4].color);
    assert_ne!(s.entries()[0].color, s.entries()[3].color);
}
