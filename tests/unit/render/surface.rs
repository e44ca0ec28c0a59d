use super::*;

fn surface(policy: OverlayPolicy) -> DrawSurface {
    DrawSurface::new(
        Canvas {
            width: 32,
            height: 32,
        },
        Rgba8Premul::opaque(255, 255, 255),
        policy,
    )
}

fn red_square() -> DrawOp {
    DrawOp::fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8Premul::opaque(255, 0, 0))
}

#[test]
fn replace_policy_clears_overlays_each_frame() {
    let mut s = surface(OverlayPolicy::Replace);
    s.begin_frame();
    s.push_overlay(red_square());
    s.push_overlay(red_square());
    assert_eq!(s.overlays().len(), 2);

    s.begin_frame();
    assert!(s.overlays().is_empty());
    s.push_overlay(red_square());
    assert_eq!(s.overlays().len(), 1);
    assert_eq!(s.frames_begun(), 2);
}

#[test]
fn accumulate_policy_keeps_earlier_overlays() {
    let mut s = surface(OverlayPolicy::Accumulate);
    s.begin_frame();
    s.push_overlay(red_square());
    s.begin_frame();
    s.push_overlay(red_square());
    assert_eq!(s.overlays().len(), 2);
}

#[test]
fn caption_is_replaced_under_both_policies() {
    for policy in [OverlayPolicy::Replace, OverlayPolicy::Accumulate] {
        let mut s = surface(policy);
        s.begin_frame();
        s.set_caption(red_square());
        assert!(s.caption().is_some());
        s.begin_frame();
        assert!(s.caption().is_none());
    }
}

#[test]
fn static_layers_survive_frames() {
    let mut s = surface(OverlayPolicy::Replace);
    s.push_backdrop(red_square());
    s.push_foreground(red_square());
    for _ in 0..3 {
        s.begin_frame();
    }
    assert_eq!(s.backdrop().len(), 1);
    assert_eq!(s.foreground().len(), 1);
}

#[test]
fn policy_parses_snake_case() {
    let p: OverlayPolicy = serde_json::from_str("\"accumulate\"").unwrap();
    assert_eq!(p, OverlayPolicy::Accumulate);
    assert_eq!(OverlayPolicy::default(), OverlayPolicy::Replace);
}
