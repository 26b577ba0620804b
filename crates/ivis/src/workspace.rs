//! Window registry and lock propagation.
//!
//! Windows never reference each other directly. Each one keeps two lock
//! lists of [`WindowId`]s and the [`Workspace`] resolves them when a change
//! has to be mirrored.

use std::collections::HashMap;
use std::fmt;

use glam::{IVec2, Mat4, Vec3};
use ivis_core::{IvisError, RegionId, Result, ViewMode};
use ivis_render::RenderParameter;

use crate::input::{Key, PointerEvent, WheelEvent};
use crate::window::{RenderWindow, WindowCommand};

/// Handle of a window registered in a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Which kind of state a lock keeps in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockKind {
    /// Rotation, translation and clip plane.
    View,
    /// Render parameters and clip-plane switches.
    RenderParameters,
}

impl LockKind {
    pub const ALL: [LockKind; 2] = [LockKind::View, LockKind::RenderParameters];

    pub(crate) fn index(self) -> usize {
        match self {
            LockKind::View => 0,
            LockKind::RenderParameters => 1,
        }
    }
}

/// Owns the render windows of an application and mirrors changes between
/// locked windows.
#[derive(Debug, Default)]
pub struct Workspace {
    windows: HashMap<WindowId, RenderWindow>,
    next_id: u64,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a window and returns its id.
    pub fn add_window(&mut self, window: RenderWindow) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        log::debug!("registered '{}' as {id}", window.name());
        self.windows.insert(id, window);
        id
    }

    /// Removes a window and unlinks it from every lock list.
    pub fn remove_window(&mut self, id: WindowId) -> Result<RenderWindow> {
        let window = self
            .windows
            .remove(&id)
            .ok_or(IvisError::WindowNotFound(id.0))?;
        for other in self.windows.values_mut() {
            for kind in LockKind::ALL {
                other.remove_lock(kind, id);
            }
        }
        log::debug!("removed {id}");
        Ok(window)
    }

    /// Returns a registered window.
    pub fn window(&self, id: WindowId) -> Result<&RenderWindow> {
        self.windows.get(&id).ok_or(IvisError::WindowNotFound(id.0))
    }

    /// Returns a registered window mutably.
    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut RenderWindow> {
        self.windows
            .get_mut(&id)
            .ok_or(IvisError::WindowNotFound(id.0))
    }

    /// Returns the registered ids in ascending order.
    pub fn ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<_> = self.windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is registered.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Links two windows both ways. Self-locks are ignored.
    pub fn lock(&mut self, a: WindowId, b: WindowId, kind: LockKind) -> Result<()> {
        if a == b {
            return Ok(());
        }
        self.window(b)?;
        self.window_mut(a)?.add_lock(kind, b);
        self.window_mut(b)?.add_lock(kind, a);
        Ok(())
    }

    /// Removes the link between two windows in both directions.
    pub fn unlock(&mut self, a: WindowId, b: WindowId, kind: LockKind) -> Result<()> {
        self.window_mut(a)?.remove_lock(kind, b);
        self.window_mut(b)?.remove_lock(kind, a);
        Ok(())
    }

    /// Returns the windows locked to `id`.
    pub fn locked(&self, id: WindowId, kind: LockKind) -> Result<&[WindowId]> {
        Ok(self.window(id)?.locks(kind))
    }

    /// Applies a command to a window and, with `propagate`, to every window
    /// in the matching lock list.
    ///
    /// Siblings receive the command on their corresponding region with
    /// propagation off, so changes travel exactly one hop. When the origin
    /// uses an absolute view lock, transform deltas reach siblings as the
    /// origin's resulting absolute state. A finished rotation is finalized on
    /// siblings before the origin.
    pub fn dispatch(&mut self, id: WindowId, command: WindowCommand, propagate: bool) -> Result<()> {
        if !propagate {
            return self.window_mut(id)?.apply(&command);
        }

        let origin = self.window(id)?;
        let siblings = origin.locks(command.lock_kind()).to_vec();

        if matches!(command, WindowCommand::FinalizeRotation { .. }) {
            self.fan_out(id, &siblings, command)?;
            return self.window_mut(id)?.apply(&command);
        }

        let origin = self.window_mut(id)?;
        origin.apply(&command)?;
        let outgoing = if origin.absolute_view_lock() {
            origin.absolute_command(&command)?
        } else {
            command
        };
        self.fan_out(id, &siblings, outgoing)
    }

    /// Sends `command` to each sibling, retargeted to its corresponding
    /// region. A failing or missing sibling is logged and skipped.
    fn fan_out(&mut self, origin: WindowId, siblings: &[WindowId], command: WindowCommand) -> Result<()> {
        let targets = {
            let source = self.window(origin)?;
            let mut targets = Vec::with_capacity(siblings.len());
            for sibling in siblings {
                let Some(window) = self.windows.get(sibling) else {
                    log::warn!("{origin} is locked to {sibling}, which no longer exists");
                    continue;
                };
                let retargeted = match command.region() {
                    Some(region) => command.with_region(source.corresponding_region(window, region)?),
                    None => command,
                };
                targets.push((*sibling, retargeted));
            }
            targets
        };

        for (sibling, command) in targets {
            if let Some(window) = self.windows.get_mut(&sibling) {
                if let Err(e) = window.apply(&command) {
                    log::error!("failed to mirror {command:?} on {sibling}: {e}");
                }
            }
        }
        Ok(())
    }

    fn dispatch_all(&mut self, id: WindowId, commands: Vec<WindowCommand>) -> Result<()> {
        for command in commands {
            self.dispatch(id, command, true)?;
        }
        Ok(())
    }

    // Propagating operations

    /// Rotates a region, mirroring to view-locked windows.
    pub fn set_rotation_delta(
        &mut self,
        id: WindowId,
        region: RegionId,
        delta: Mat4,
        propagate: bool,
    ) -> Result<()> {
        self.dispatch(id, WindowCommand::RotationDelta { region, delta }, propagate)
    }

    /// Moves a region, mirroring to view-locked windows.
    pub fn set_translation_delta(
        &mut self,
        id: WindowId,
        region: RegionId,
        delta: Vec3,
        propagate: bool,
    ) -> Result<()> {
        self.dispatch(id, WindowCommand::TranslationDelta { region, delta }, propagate)
    }

    /// Rotates the clip plane, mirroring to view-locked windows.
    pub fn set_clip_rotation_delta(
        &mut self,
        id: WindowId,
        region: RegionId,
        delta: Mat4,
        secondary: bool,
        propagate: bool,
    ) -> Result<()> {
        let command = WindowCommand::ClipRotationDelta {
            region,
            delta,
            secondary,
        };
        self.dispatch(id, command, propagate)
    }

    /// Moves the clip plane, mirroring to view-locked windows.
    pub fn set_clip_translation_delta(
        &mut self,
        id: WindowId,
        region: RegionId,
        delta: Vec3,
        secondary: bool,
        propagate: bool,
    ) -> Result<()> {
        let command = WindowCommand::ClipTranslationDelta {
            region,
            delta,
            secondary,
        };
        self.dispatch(id, command, propagate)
    }

    /// Ends a rotation here and on view-locked windows.
    pub fn finalize_rotation(&mut self, id: WindowId, region: RegionId, propagate: bool) -> Result<()> {
        self.dispatch(id, WindowCommand::FinalizeRotation { region }, propagate)
    }

    /// Records the current clip plane as the rotation baseline.
    pub fn set_plane_at_click(&mut self, id: WindowId, propagate: bool) -> Result<()> {
        self.dispatch(id, WindowCommand::PlaneAtClick, propagate)
    }

    /// Sets a render parameter, mirroring to parameter-locked windows.
    pub fn set_render_parameter(
        &mut self,
        id: WindowId,
        param: RenderParameter,
        propagate: bool,
    ) -> Result<()> {
        self.dispatch(id, WindowCommand::RenderParameter(param), propagate)
    }

    /// Enables or disables the clip plane.
    pub fn set_clip_plane_enabled(&mut self, id: WindowId, enabled: bool, propagate: bool) -> Result<()> {
        self.dispatch(id, WindowCommand::ClipPlaneEnabled(enabled), propagate)
    }

    /// Locks or unlocks the clip plane to the volume.
    pub fn set_clip_plane_relative_lock(
        &mut self,
        id: WindowId,
        locked: bool,
        propagate: bool,
    ) -> Result<()> {
        self.dispatch(id, WindowCommand::ClipPlaneRelativeLock(locked), propagate)
    }

    /// Moves the ClearView focus.
    pub fn set_clear_view_focus(
        &mut self,
        id: WindowId,
        region: RegionId,
        pos: IVec2,
        propagate: bool,
    ) -> Result<()> {
        self.dispatch(id, WindowCommand::ClearViewFocus { region, pos }, propagate)
    }

    /// Switches one window's view mode. View modes are never mirrored.
    pub fn set_view_mode_for(&mut self, id: WindowId, regions: &[RegionId], mode: ViewMode) -> Result<()> {
        self.window_mut(id)?.set_view_mode(regions, mode)
    }

    // Input forwarding

    /// Forwards a button press and dispatches the resulting commands.
    pub fn pointer_down(&mut self, id: WindowId, event: &PointerEvent) -> Result<()> {
        let commands = self.window_mut(id)?.pointer_down(event);
        self.dispatch_all(id, commands)
    }

    /// Forwards pointer motion and dispatches the resulting commands.
    pub fn pointer_move(&mut self, id: WindowId, event: &PointerEvent) -> Result<()> {
        let commands = self.window_mut(id)?.pointer_move(event);
        self.dispatch_all(id, commands)
    }

    /// Forwards a button release and dispatches the resulting commands.
    pub fn pointer_up(&mut self, id: WindowId, event: &PointerEvent) -> Result<()> {
        let commands = self.window_mut(id)?.pointer_up(event);
        self.dispatch_all(id, commands)
    }

    /// Forwards a wheel step and dispatches the resulting commands.
    pub fn wheel(&mut self, id: WindowId, event: &WheelEvent) -> Result<()> {
        let commands = self.window_mut(id)?.wheel(event);
        self.dispatch_all(id, commands)
    }

    /// Forwards a key press and dispatches the resulting commands.
    pub fn key_press(&mut self, id: WindowId, key: Key) -> Result<()> {
        let commands = self.window_mut(id)?.key_press(key);
        self.dispatch_all(id, commands)
    }

    // Cloning

    /// Copies the view state of `src` into `dst`.
    pub fn clone_view_state(&mut self, dst: WindowId, src: WindowId) -> Result<()> {
        let state = self.window(src)?.view_state()?;
        self.window_mut(dst)?.apply_view_state(&state)
    }

    /// Copies the render parameters of `src` into `dst`.
    pub fn clone_render_parameters(&mut self, dst: WindowId, src: WindowId) -> Result<()> {
        let params = self.window(src)?.render_parameters().as_parameters();
        let enabled = self.window(src)?.clip_plane_enabled();
        let window = self.window_mut(dst)?;
        for param in params {
            window.set_render_parameter(param);
        }
        window.set_clip_plane_enabled(enabled);
        Ok(())
    }
}
