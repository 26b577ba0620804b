//! Pointer, wheel and keyboard handling.
//!
//! Handlers update window-local interaction state directly and return the
//! commands that locked windows must mirror. The caller applies those
//! commands, either through [`Workspace`](crate::Workspace) or with
//! [`RenderWindow::apply_all`].

use glam::{IVec2, UVec2, Vec2, Vec3};
use ivis_core::{RegionId, RegionSplitter, ViewMode};

use super::{RenderWindow, WindowCommand};
use crate::input::{CursorShape, Key, PointerButton, PointerEvent, WheelEvent};
use crate::notification::WindowNotification;

impl RenderWindow {
    /// Handles a button press.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Vec<WindowCommand> {
        let pos = event.position;
        self.mouse_pos = pos;
        self.active_region = self.region_under_cursor(pos);

        let Some(region) = self.active_region else {
            self.selected_splitter = self.region_splitter(pos);
            self.initial_click_pos = pos;
            return Vec::new();
        };
        if !self.is_region_3d(region).unwrap_or(false) {
            return Vec::new();
        }

        let mut commands = vec![WindowCommand::PlaneAtClick];
        match event.button {
            Some(PointerButton::Right) => self.initial_click_pos = pos,
            Some(PointerButton::Left) => {
                let point = pos.as_uvec2();
                if let Ok(data) = self.region_data_mut(region) {
                    data.clip_arcball.click(point);
                    if !event.modifiers.control {
                        data.arcball.click(point);
                    }
                }
            }
            _ => commands.clear(),
        }
        commands
    }

    /// Handles pointer motion.
    ///
    /// The region under the cursor is manipulated, so a drag that leaves the
    /// region it started in stops affecting it. While a splitter is held no
    /// region is manipulated.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Vec<WindowCommand> {
        let pos = event.position;
        self.mouse_pos = pos;
        let rotate = event.buttons.left;
        let translate = event.buttons.right;

        let region = if self.selected_splitter == RegionSplitter::None {
            self.region_under_cursor(pos)
        } else {
            None
        };
        self.update_cursor(region, pos, translate);

        let Some(region) = region.filter(|r| self.is_region_3d(*r).unwrap_or(false)) else {
            if self.selected_splitter != RegionSplitter::None && (rotate || translate) {
                self.drag_splitter(pos);
            }
            return Vec::new();
        };

        let mut commands = Vec::new();
        if event.modifiers.control {
            if rotate {
                if let Some(delta) = self.drag_arcball(region, pos, true) {
                    commands.push(WindowCommand::ClipRotationDelta {
                        region,
                        delta,
                        secondary: true,
                    });
                }
            }
            if translate {
                if let Some(delta) = self.drag_translation(pos) {
                    commands.push(WindowCommand::ClipTranslationDelta {
                        region,
                        delta,
                        secondary: true,
                    });
                }
            }
            return commands;
        }

        if event.modifiers.shift && self.render_parameters().clear_view_focus_active() {
            commands.push(WindowCommand::ClearViewFocus { region, pos });
        }
        if rotate {
            if let Some(delta) = self.drag_arcball(region, pos, false) {
                commands.push(WindowCommand::RotationDelta { region, delta });
            }
        }
        if translate {
            if let Some(delta) = self.drag_translation(pos) {
                commands.push(WindowCommand::TranslationDelta { region, delta });
            }
        }
        commands
    }

    /// Handles a button release.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Vec<WindowCommand> {
        let mut commands = Vec::new();
        if event.button == Some(PointerButton::Left) {
            if let Some(region) = self.active_region {
                // Slice views keep the clip plane untouched.
                if self.is_region_3d(region).unwrap_or(false) {
                    commands.push(WindowCommand::FinalizeRotation { region });
                }
            }
        }
        self.selected_splitter = RegionSplitter::None;
        self.active_region = None;
        let hovered = self.region_under_cursor(event.position);
        self.update_cursor(hovered, event.position, false);
        commands
    }

    /// Handles a wheel step over the region under the last pointer position.
    ///
    /// 3D regions zoom (or move the clip plane with Control held); slice views
    /// step one slice.
    pub fn wheel(&mut self, event: &WheelEvent) -> Vec<WindowCommand> {
        let mut commands = Vec::new();
        let Some(region) = self.region_under_cursor(self.mouse_pos) else {
            return commands;
        };

        let delta = event.delta;
        match self.region_window_mode(region) {
            Ok(None) => {
                let sign = if self.options.invert_wheel { -1.0 } else { 1.0 };
                let zoom = sign * delta as f32 / self.options.wheel_zoom_divisor;
                log::debug!("wheel zoom {zoom} on region {region}");
                if event.modifiers.control {
                    let step = zoom * self.options.clip_wheel_scale;
                    commands.push(WindowCommand::ClipTranslationDelta {
                        region,
                        delta: Vec3::new(step, step, 0.0),
                        secondary: true,
                    });
                } else {
                    commands.push(WindowCommand::TranslationDelta {
                        region,
                        delta: Vec3::new(0.0, 0.0, zoom),
                    });
                }
            }
            Ok(Some(_)) if delta != 0 => self.step_slice(region, if delta > 0 { 1 } else { -1 }),
            Ok(Some(_)) => {}
            Err(e) => log::error!("wheel over unknown region: {e}"),
        }
        self.request_redraw();
        commands
    }

    /// Handles a key press over the region under the last pointer position.
    pub fn key_press(&mut self, key: Key) -> Vec<WindowCommand> {
        let region = self.region_under_cursor(self.mouse_pos);
        let is_2d = region.is_some_and(|r| self.is_region_2d(r).unwrap_or(false));
        let mut commands = Vec::new();

        match key {
            Key::F => self.notify(WindowNotification::ToggleFullscreen),
            Key::C => self.toggle_coord_arrows(),
            Key::T => self.transfer_3d_rotation_to_mip(),
            Key::P => self.toggle_planes_2d_in_3d(),
            Key::R => {
                if let Err(e) = self.reset_rendering_parameters() {
                    log::error!("failed to reset rendering parameters: {e}");
                }
            }
            Key::S => self.pick_under_cursor(),
            Key::Space => {
                if let Some(region) = region {
                    self.cycle_view_mode(region);
                }
            }
            Key::X | Key::Y => {
                if let Some(region) = region.filter(|_| is_2d) {
                    self.toggle_flip(region, key == Key::X);
                }
            }
            Key::M => {
                if let Some(region) = region.filter(|_| is_2d) {
                    let result = self
                        .use_mip(region)
                        .and_then(|mip| self.set_use_mip(region, !mip));
                    if let Err(e) = result {
                        log::error!("failed to toggle MIP: {e}");
                    }
                }
            }
            Key::A => {
                if let Some(data) = region.and_then(|r| self.region_data_mut(r).ok()) {
                    let use_translation = !data.arcball.use_translation();
                    data.arcball.set_use_translation(use_translation);
                }
            }
            Key::PageUp | Key::PageDown => {
                let up = key == Key::PageUp;
                match region {
                    Some(region) if is_2d => self.page_slice(region, up),
                    Some(region) => {
                        let step = self.options.page_zoom_step;
                        commands.push(WindowCommand::TranslationDelta {
                            region,
                            delta: Vec3::new(0.0, 0.0, if up { -step } else { step }),
                        });
                    }
                    None => {}
                }
            }
            Key::Other => return commands,
        }
        self.request_redraw();
        commands
    }

    fn update_cursor(&mut self, region: Option<RegionId>, pos: IVec2, translate: bool) {
        let shape = match region {
            Some(region) if translate && self.is_region_3d(region).unwrap_or(false) => {
                CursorShape::ClosedHand
            }
            Some(_) => CursorShape::Default,
            // A held splitter keeps its cursor.
            None if self.selected_splitter != RegionSplitter::None => return,
            None => splitter_cursor(self.region_splitter(pos)),
        };
        self.set_cursor(shape);
    }

    fn drag_splitter(&mut self, pos: IVec2) {
        if self.win_dim.x == 0 || self.win_dim.y == 0 {
            return;
        }
        let mut fraction = self.fraction;
        let relative = pos.as_vec2() / self.win_dim.as_vec2();
        if self.selected_splitter.moves_x() {
            fraction.x = relative.x;
        }
        if self.selected_splitter.moves_y() {
            fraction.y = relative.y;
        }
        self.set_window_fraction(fraction);
        self.setup_arcballs();
        self.request_redraw();
    }

    /// Returns the incremental arcball rotation since the last drag step.
    fn drag_arcball(&mut self, region: RegionId, pos: IVec2, clip: bool) -> Option<glam::Mat4> {
        let point = UVec2::new(pos.x.max(0).unsigned_abs(), pos.y.max(0).unsigned_abs());
        let data = self.region_data_mut(region).ok()?;
        let ball = if clip {
            &mut data.clip_arcball
        } else {
            &mut data.arcball
        };
        let delta = ball.drag_rotation(point);
        ball.click(point);
        Some(delta)
    }

    /// Returns the normalized pointer motion since the last translation step.
    fn drag_translation(&mut self, pos: IVec2) -> Option<Vec3> {
        if self.win_dim.x == 0 || self.win_dim.y == 0 {
            return None;
        }
        let moved = (pos - self.initial_click_pos).as_vec2();
        self.initial_click_pos = pos;
        let delta = Vec2::splat(2.0) * moved / self.win_dim.as_vec2();
        Some(delta.extend(0.0))
    }

    /// Largest valid slice index of a slice view.
    fn max_slice(&self, region: RegionId) -> Option<u64> {
        let mode = self.region_window_mode(region).ok()??;
        let size = u64::from(self.renderer.domain_size()[mode.axis()]);
        Some(size.saturating_sub(1))
    }

    fn step_slice(&mut self, region: RegionId, step: i64) {
        let Some(max) = self.max_slice(region) else {
            return;
        };
        let result = self.slice_depth(region).and_then(|depth| {
            let depth = depth.saturating_add_signed(step).min(max);
            self.set_slice_depth(region, depth)
        });
        if let Err(e) = result {
            log::error!("failed to change slice: {e}");
        }
    }

    fn page_slice(&mut self, region: RegionId, up: bool) {
        let Some(max) = self.max_slice(region) else {
            return;
        };
        let divisions = u64::from(self.options.page_step_divisions.max(1));
        let step = max / divisions;
        let step = i64::try_from(step).unwrap_or(i64::MAX);
        self.step_slice(region, if up { step } else { -step });
    }

    fn toggle_flip(&mut self, region: RegionId, horizontal: bool) {
        let result = self.flip_mode(region).and_then(|(x, y)| {
            if horizontal {
                self.set_flip_mode(region, !x, y)
            } else {
                self.set_flip_mode(region, x, !y)
            }
        });
        if let Err(e) = result {
            log::error!("failed to flip region {region}: {e}");
        }
    }

    fn pick_under_cursor(&mut self) {
        let pos = self.mouse_pos;
        let gl_y = i64::from(self.win_dim.y) - i64::from(pos.y);
        let (Ok(x), Ok(y)) = (u32::try_from(pos.x), u32::try_from(gl_y)) else {
            log::error!("pick position {pos} outside the window");
            return;
        };
        match self.renderer.pick(UVec2::new(x, y)) {
            Ok(location) => log::info!("picked dataset position {location}"),
            Err(e) => log::error!("pick failed: {e}"),
        }
    }

    /// Switches between single and 2x2 view. Single view shows `hovered`.
    fn cycle_view_mode(&mut self, hovered: RegionId) {
        let result = match self.view_mode.next() {
            ViewMode::TwoByTwo => {
                if self.stereo() {
                    self.set_stereo(false);
                    self.notify(WindowNotification::StereoDisabled);
                }
                self.toggle_view_2x2()
            }
            ViewMode::Single => self.set_view_mode(&[hovered], ViewMode::Single),
        };
        if let Err(e) = result {
            log::error!("failed to switch view mode: {e}");
        }
    }
}

fn splitter_cursor(splitter: RegionSplitter) -> CursorShape {
    match splitter {
        RegionSplitter::None => CursorShape::Default,
        RegionSplitter::Horizontal => CursorShape::SplitVertical,
        RegionSplitter::Vertical => CursorShape::SplitHorizontal,
        RegionSplitter::Both => CursorShape::SizeAll,
    }
}
