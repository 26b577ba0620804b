//! End-to-end input handling through a workspace.

use ivis::*;
use proptest::prelude::*;

fn window_with(domain: UVec3, options: WindowOptions) -> RenderWindow {
    RenderWindow::new("volume", Box::new(HeadlessRenderer::new(domain)), options)
}

fn slice_window(domain: UVec3, mode: WindowMode) -> (RenderWindow, RegionId) {
    let mut w = window_with(domain, WindowOptions::default());
    let region = w.region_at(RegionSlot::new(0, RegionKind::Slice(mode))).unwrap();
    w.set_view_mode(&[region], ViewMode::Single).unwrap();
    w.pointer_move(&PointerEvent::moved(200, 200, PointerButtons::NONE));
    (w, region)
}

#[test]
fn test_drag_is_logged_once_at_release() {
    let mut ws = Workspace::new();
    let id = ws.add_window(window_with(UVec3::splat(32), WindowOptions::default()));

    ws.pointer_down(id, &PointerEvent::button(200, 200, PointerButton::Left))
        .unwrap();
    for step in 1..=5 {
        ws.pointer_move(id, &PointerEvent::moved(200 + step * 10, 200, PointerButtons::LEFT))
            .unwrap();
    }

    let rotations = |ws: &Workspace| {
        ws.window(id)
            .unwrap()
            .renderer()
            .provenance()
            .entries()
            .filter(|e| e.command == "setRegionRotation4x4")
            .count()
    };
    assert_eq!(rotations(&ws), 0);
    assert!(!ws.window(id).unwrap().renderer().provenance().is_suppressed());

    ws.pointer_up(id, &PointerEvent::button(250, 200, PointerButton::Left))
        .unwrap();
    assert_eq!(rotations(&ws), 1);

    let w = ws.window(id).unwrap();
    assert_ne!(w.rotation(w.active_regions()[0]).unwrap(), Mat4::IDENTITY);
}

#[test]
fn test_locked_drag_moves_sibling() {
    let mut ws = Workspace::new();
    let a = ws.add_window(window_with(UVec3::splat(32), WindowOptions::default()));
    let b = ws.add_window(window_with(UVec3::splat(32), WindowOptions::default()));
    ws.lock(a, b, LockKind::View).unwrap();

    ws.pointer_down(a, &PointerEvent::button(100, 100, PointerButton::Right))
        .unwrap();
    ws.pointer_move(a, &PointerEvent::moved(200, 100, PointerButtons::RIGHT))
        .unwrap();

    let b = ws.window(b).unwrap();
    let t = b.translation(b.active_regions()[0]).unwrap();
    assert!((t.w_axis.x - 0.5).abs() < 1e-6);
}

#[test]
fn test_wheel_clamps_slice_range() {
    for (size, expected_max) in [(1, 0), (256, 255)] {
        let (mut w, region) = slice_window(UVec3::splat(size), WindowMode::Axial);
        for _ in 0..300 {
            w.wheel(&WheelEvent::new(120));
        }
        assert_eq!(w.slice_depth(region).unwrap(), expected_max);
        for _ in 0..300 {
            w.wheel(&WheelEvent::new(-120));
        }
        assert_eq!(w.slice_depth(region).unwrap(), 0);
    }
}

#[test]
fn test_wheel_on_empty_axis() {
    let (mut w, region) = slice_window(UVec3::new(8, 0, 8), WindowMode::Axial);
    w.wheel(&WheelEvent::new(120));
    assert_eq!(w.slice_depth(region).unwrap(), 0);
}

#[test]
fn test_paint_failure_is_reported_once() {
    let mut renderer = HeadlessRenderer::new(UVec3::splat(16));
    renderer.set_fail_paint(true);
    let mut w = RenderWindow::new("broken", Box::new(renderer), WindowOptions::default());

    assert!(!w.paint());
    assert!(!w.paint());
    let errors = w
        .take_notifications()
        .into_iter()
        .filter(|n| matches!(n, WindowNotification::RenderError(_)))
        .count();
    assert_eq!(errors, 1);
}

#[test]
fn test_options_from_json_drive_window() {
    let options =
        WindowOptions::from_json_str(r#"{ "default_size": [300, 120], "invert_wheel": true }"#)
            .unwrap();
    let mut w = window_with(UVec3::splat(16), options);
    assert_eq!(w.size(), UVec2::new(300, 120));

    let region = w.active_regions()[0];
    w.pointer_move(&PointerEvent::moved(150, 60, PointerButtons::NONE));
    let commands = w.wheel(&WheelEvent::new(1000));
    assert_eq!(
        commands,
        vec![WindowCommand::TranslationDelta {
            region,
            delta: Vec3::new(0.0, 0.0, -1.0),
        }]
    );
    w.apply_all(&commands).unwrap();
    assert_eq!(w.translation(region).unwrap().w_axis.z, -1.0);
}

#[test]
fn test_close_releases_renderer() {
    let mut ws = Workspace::new();
    let id = ws.add_window(window_with(UVec3::splat(16), WindowOptions::default()));
    ws.window_mut(id).unwrap().close();

    let w = ws.window(id).unwrap();
    assert!(w.is_released());
    assert!(w.renderer().active_regions().is_empty());
}

proptest! {
    #[test]
    fn prop_wheel_keeps_slice_in_range(
        size in 0u32..64,
        steps in proptest::collection::vec(-3i32..=3, 0..40),
    ) {
        let (mut w, region) = slice_window(UVec3::splat(size), WindowMode::Sagittal);
        for step in steps {
            w.wheel(&WheelEvent::new(step * 120));
            let depth = w.slice_depth(region).unwrap();
            prop_assert!(depth <= u64::from(size.saturating_sub(1)));
        }
    }

    #[test]
    fn prop_two_by_two_regions_do_not_overlap(
        fx in 0.0f32..=1.0,
        fy in 0.0f32..=1.0,
        width in 1u32..800,
        height in 1u32..800,
    ) {
        let mut w = window_with(UVec3::splat(16), WindowOptions::default());
        w.toggle_view_2x2().unwrap();
        w.resize(width, height);
        w.set_window_fraction(Vec2::new(fx, fy));

        let rects: Vec<_> = w
            .active_regions()
            .into_iter()
            .map(|r| w.region_bounds(r).unwrap())
            .collect();
        for (i, a) in rects.iter().enumerate() {
            prop_assert!(a.0.x <= a.1.x && a.0.y <= a.1.y);
            prop_assert!(a.1.x <= width && a.1.y <= height);
            for b in &rects[i + 1..] {
                let overlap = a.0.x < b.1.x && b.0.x < a.1.x && a.0.y < b.1.y && b.0.y < a.1.y;
                prop_assert!(!overlap);
            }
        }
    }
}
