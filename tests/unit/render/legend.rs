use super::*;
use crate::foundation::core::Canvas;
use crate::render::surface::OverlayPolicy;
use crate::scale::breakpoints::ScaleEntry;

fn scale(n: usize) -> BreakpointScale {
    let entries = (0..n)
        .map(|i| ScaleEntry {
            threshold: (i as f64 + 1.0) * 10.0,
            color: Rgba8Premul::opaque(i as u8 * 20, 0, 0),
            label: format!("{}", (i + 1) * 10),
        })
        .collect();
    BreakpointScale::new(entries).unwrap()
}

#[test]
fn inset_sits_in_lower_left_with_relative_size() {
    let map = Rect::new(100.0, 50.0, 1100.0, 550.0);
    let l = LegendLayout::inset(&scale(4), map);
    assert!((l.bar.width() - 30.0).abs() < 1e-9);
    assert!((l.bar.height() - 250.0).abs() < 1e-9);
    assert!(l.bar.x0 > map.x0 && l.bar.x0 < map.x0 + 20.0);
    assert!(l.bar.y1 < map.y1 && l.bar.y1 > map.y1 - 20.0);
}

#[test]
fn cells_stack_bottom_to_top_in_bucket_order() {
    let bar = Rect::new(0.0, 0.0, 10.0, 100.0);
    let l = LegendLayout::within(&scale(4), bar);
    assert_eq!(l.cells.len(), 4);
    assert_eq!(l.cells[0].rect, Rect::new(0.0, 75.0, 10.0, 100.0));
    assert_eq!(l.cells[3].rect, Rect::new(0.0, 0.0, 10.0, 25.0));
    assert_eq!(l.cells[0].tick_y(), 100.0);
    assert_eq!(l.cells[2].label, "30");
    assert_eq!(l.cells[1].color, Rgba8Premul::opaque(20, 0, 0));
}

#[test]
fn draw_without_text_pushes_cells_outline_and_ticks() {
    let mut s = DrawSurface::new(
        Canvas {
            width: 64,
            height: 64,
        },
        Rgba8Premul::opaque(255, 255, 255),
        OverlayPolicy::Replace,
    );
    let l = LegendLayout::within(&scale(3), Rect::new(4.0, 4.0, 12.0, 60.0));
    draw_legend(&mut s, &l, &MapStyle::default(), None).unwrap();
    assert_eq!(s.foreground().len(), 3 + 1 + 3);
    assert!(s.backdrop().is_empty());
    assert!(s.overlays().is_empty());
}
