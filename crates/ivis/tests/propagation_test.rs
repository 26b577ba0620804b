//! Lock propagation between windows of a workspace.

use ivis::*;
use proptest::prelude::*;

fn new_window(name: &str) -> RenderWindow {
    RenderWindow::new(
        name,
        Box::new(HeadlessRenderer::new(UVec3::new(64, 64, 64))),
        WindowOptions::default(),
    )
}

fn workspace(n: usize) -> (Workspace, Vec<WindowId>) {
    let mut ws = Workspace::new();
    let ids = (0..n)
        .map(|i| ws.add_window(new_window(&format!("window {i}"))))
        .collect();
    (ws, ids)
}

fn main_region(ws: &Workspace, id: WindowId) -> RegionId {
    ws.window(id).unwrap().active_regions()[0]
}

fn rotation(ws: &Workspace, id: WindowId) -> Mat4 {
    let region = main_region(ws, id);
    ws.window(id).unwrap().rotation(region).unwrap()
}

fn count_commands(ws: &Workspace, id: WindowId, command: &str) -> usize {
    ws.window(id)
        .unwrap()
        .renderer()
        .provenance()
        .entries()
        .filter(|e| e.command == command)
        .count()
}

#[test]
fn test_absolute_lock_copies_resulting_rotation() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();

    // Give the sibling a different starting pose.
    let b_region = main_region(&ws, ids[1]);
    ws.set_rotation_delta(ids[1], b_region, Mat4::from_rotation_x(1.0), false)
        .unwrap();

    let a_region = main_region(&ws, ids[0]);
    ws.set_rotation_delta(ids[0], a_region, Mat4::from_rotation_y(0.5), true)
        .unwrap();

    assert!(rotation(&ws, ids[1]).abs_diff_eq(rotation(&ws, ids[0]), 1e-6));
    assert!(rotation(&ws, ids[0]).abs_diff_eq(Mat4::from_rotation_y(0.5), 1e-6));
}

#[test]
fn test_relative_lock_applies_delta() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    ws.window_mut(ids[0]).unwrap().set_absolute_view_lock(false);

    let start = Mat4::from_rotation_x(1.0);
    let b_region = main_region(&ws, ids[1]);
    ws.set_rotation_delta(ids[1], b_region, start, false).unwrap();

    let delta = Mat4::from_rotation_y(0.5);
    let a_region = main_region(&ws, ids[0]);
    ws.set_rotation_delta(ids[0], a_region, delta, true).unwrap();

    assert!(rotation(&ws, ids[1]).abs_diff_eq(delta * start, 1e-6));
}

#[test]
fn test_translation_lock_modes() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    let a_region = main_region(&ws, ids[0]);
    let b_region = main_region(&ws, ids[1]);
    ws.set_translation_delta(ids[1], b_region, Vec3::new(0.0, 0.0, 2.0), false)
        .unwrap();

    ws.set_translation_delta(ids[0], a_region, Vec3::new(1.0, 1.0, 0.0), true)
        .unwrap();
    let a = ws.window(ids[0]).unwrap().translation(a_region).unwrap();
    let b = ws.window(ids[1]).unwrap().translation(b_region).unwrap();
    assert_eq!(a, b);

    ws.window_mut(ids[0]).unwrap().set_absolute_view_lock(false);
    ws.set_translation_delta(ids[1], b_region, Vec3::new(0.0, 0.0, 2.0), false)
        .unwrap();
    ws.set_translation_delta(ids[0], a_region, Vec3::new(1.0, 0.0, 0.0), true)
        .unwrap();
    let b = ws.window(ids[1]).unwrap().translation(b_region).unwrap();
    assert_eq!(b.w_axis, Vec4::new(2.0, -1.0, 2.0, 1.0));
}

#[test]
fn test_propagation_is_one_hop() {
    let (mut ws, ids) = workspace(3);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    ws.lock(ids[1], ids[2], LockKind::View).unwrap();

    let region = main_region(&ws, ids[0]);
    ws.set_translation_delta(ids[0], region, Vec3::new(0.25, 0.0, 0.0), true)
        .unwrap();

    let moved = |id: WindowId| {
        let w = ws.window(id).unwrap();
        w.translation(w.active_regions()[0]).unwrap().w_axis.x
    };
    assert_eq!(moved(ids[0]), 0.25);
    assert_eq!(moved(ids[1]), 0.25);
    assert_eq!(moved(ids[2]), 0.0);
}

#[test]
fn test_propagation_targets_corresponding_region() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    for id in &ids {
        ws.window_mut(*id).unwrap().toggle_view_2x2().unwrap();
    }

    let slot = RegionSlot::new(0, RegionKind::ThreeD);
    let a_region = ws.window(ids[0]).unwrap().region_at(slot).unwrap();
    ws.set_translation_delta(ids[0], a_region, Vec3::Z, true).unwrap();

    let b = ws.window(ids[1]).unwrap();
    assert_eq!(b.translation(b.region_at(slot).unwrap()).unwrap().w_axis.z, 1.0);
}

#[test]
fn test_finalize_reaches_siblings() {
    for clip_locked in [true, false] {
        let (mut ws, ids) = workspace(2);
        ws.lock(ids[0], ids[1], LockKind::View).unwrap();
        for id in &ids {
            ws.set_clip_plane_relative_lock(*id, clip_locked, false)
                .unwrap();
        }
        let region = main_region(&ws, ids[0]);
        ws.set_rotation_delta(ids[0], region, Mat4::from_rotation_z(0.2), true)
            .unwrap();
        assert_eq!(count_commands(&ws, ids[1], "setRegionRotation4x4"), 0);
        let before: Vec<_> = ids.iter().map(|id| rotation(&ws, *id)).collect();

        ws.finalize_rotation(ids[0], region, true).unwrap();
        for (id, before) in ids.iter().zip(before) {
            assert_eq!(count_commands(&ws, *id, "setRegionRotation4x4"), 1);
            assert_eq!(rotation(&ws, *id), before);
            let w = ws.window(*id).unwrap();
            assert_eq!(w.clip_plane_locked(), clip_locked);
            let data = w.region_data(w.active_regions()[0]).unwrap();
            assert_eq!(data.clip_rotation, [Mat4::IDENTITY; 2]);
        }
    }
}

#[test]
fn test_remove_window_unlinks_locks() {
    let (mut ws, ids) = workspace(3);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    ws.lock(ids[0], ids[2], LockKind::RenderParameters).unwrap();

    let removed = ws.remove_window(ids[0]).unwrap();
    assert_eq!(removed.name(), "window 0");
    for id in &ids[1..] {
        for kind in LockKind::ALL {
            assert!(ws.locked(*id, kind).unwrap().is_empty());
        }
    }
    assert_eq!(ws.len(), 2);
}

#[test]
fn test_lock_kinds_are_independent() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::RenderParameters).unwrap();

    let region = main_region(&ws, ids[0]);
    ws.set_translation_delta(ids[0], region, Vec3::X, true).unwrap();
    ws.set_render_parameter(ids[0], RenderParameter::UseLighting(false), true)
        .unwrap();

    let b = ws.window(ids[1]).unwrap();
    assert_eq!(b.translation(b.active_regions()[0]).unwrap(), Mat4::IDENTITY);
    assert!(!b.render_parameters().use_lighting);
}

#[test]
fn test_clip_translation_follows_each_normal() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    ws.window_mut(ids[0]).unwrap().set_absolute_view_lock(false);
    for id in &ids {
        ws.set_clip_plane_relative_lock(*id, false, false).unwrap();
    }

    // Turn the sibling's plane to face +X.
    let b_region = main_region(&ws, ids[1]);
    ws.set_clip_rotation_delta(
        ids[1],
        b_region,
        Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
        true,
        false,
    )
    .unwrap();

    let a_region = main_region(&ws, ids[0]);
    ws.set_clip_translation_delta(ids[0], a_region, Vec3::new(0.3, 0.4, 0.5), true, true)
        .unwrap();

    let a = ws.window(ids[0]).unwrap().clip_plane();
    let b = ws.window(ids[1]).unwrap().clip_plane();
    assert!((a.point() - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
    assert!((b.point() - Vec3::new(0.3, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_absolute_clip_rotation_copies_plane() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::View).unwrap();
    let region = main_region(&ws, ids[0]);
    ws.set_plane_at_click(ids[0], true).unwrap();
    ws.set_clip_rotation_delta(ids[0], region, Mat4::from_rotation_x(0.3), true, true)
        .unwrap();

    let a = ws.window(ids[0]).unwrap().clip_plane();
    let b = ws.window(ids[1]).unwrap().clip_plane();
    assert_eq!(a, b);
    assert!((a.normal() - Vec3::Z).length() > 1e-3);
}

#[test]
fn test_clip_enable_propagates_through_parameter_lock() {
    let (mut ws, ids) = workspace(2);
    ws.lock(ids[0], ids[1], LockKind::RenderParameters).unwrap();
    ws.set_clip_plane_enabled(ids[0], true, true).unwrap();
    assert!(ws.window(ids[1]).unwrap().clip_plane_enabled());

    ws.set_clip_plane_relative_lock(ids[0], false, true).unwrap();
    ws.set_clip_plane_enabled(ids[0], false, true).unwrap();
    assert!(ws.window(ids[1]).unwrap().clip_plane_locked());
    ws.set_clip_plane_enabled(ids[0], true, true).unwrap();
    assert!(!ws.window(ids[1]).unwrap().clip_plane_locked());
}

#[test]
fn test_clone_view_state_between_windows() {
    let (mut ws, ids) = workspace(2);
    let region = main_region(&ws, ids[0]);
    ws.set_rotation_delta(ids[0], region, Mat4::from_rotation_x(0.4), false)
        .unwrap();
    ws.clone_view_state(ids[1], ids[0]).unwrap();
    assert!(rotation(&ws, ids[1]).abs_diff_eq(Mat4::from_rotation_x(0.4), 1e-6));
}

proptest! {
    #[test]
    fn prop_rotation_round_trip(
        ax in -1.0f32..1.0,
        ay in -1.0f32..1.0,
        az in 0.1f32..1.0,
        angle in -3.0f32..3.0,
    ) {
        let (mut ws, ids) = workspace(2);
        ws.lock(ids[0], ids[1], LockKind::View).unwrap();
        let region = main_region(&ws, ids[0]);
        let delta = Mat4::from_axis_angle(Vec3::new(ax, ay, az).normalize(), angle);

        ws.set_rotation_delta(ids[0], region, delta, true).unwrap();
        ws.set_rotation_delta(ids[0], region, delta.inverse(), true).unwrap();

        for id in &ids {
            prop_assert!(rotation(&ws, *id).abs_diff_eq(Mat4::IDENTITY, 1e-4));
        }
    }
}
