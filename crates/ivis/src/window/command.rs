//! Changes that travel between locked windows.

use glam::{IVec2, Mat4, Vec3};
use ivis_core::{ExtendedPlane, RegionId, Result};
use ivis_render::RenderParameter;

use super::RenderWindow;
use crate::workspace::LockKind;

/// A window change that locked windows mirror.
///
/// Delta variants come from user interaction. The `Set*` variants carry
/// absolute state and are what siblings receive when the originating window
/// uses an absolute view lock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowCommand {
    RotationDelta { region: RegionId, delta: Mat4 },
    TranslationDelta { region: RegionId, delta: Vec3 },
    ClipRotationDelta { region: RegionId, delta: Mat4, secondary: bool },
    ClipTranslationDelta { region: RegionId, delta: Vec3, secondary: bool },
    SetRotation { region: RegionId, rotation: Mat4 },
    SetTranslation { region: RegionId, translation: Mat4 },
    SetClipPlane { region: RegionId, plane: ExtendedPlane },
    /// End of an interactive rotation.
    FinalizeRotation { region: RegionId },
    /// Each window records its own clip plane as the click baseline.
    PlaneAtClick,
    RenderParameter(RenderParameter),
    ClipPlaneEnabled(bool),
    ClipPlaneRelativeLock(bool),
    ClearViewFocus { region: RegionId, pos: IVec2 },
}

impl WindowCommand {
    /// Returns the lock set this command propagates through.
    pub fn lock_kind(&self) -> LockKind {
        match self {
            Self::RotationDelta { .. }
            | Self::TranslationDelta { .. }
            | Self::ClipRotationDelta { .. }
            | Self::ClipTranslationDelta { .. }
            | Self::SetRotation { .. }
            | Self::SetTranslation { .. }
            | Self::SetClipPlane { .. }
            | Self::FinalizeRotation { .. }
            | Self::PlaneAtClick => LockKind::View,
            Self::RenderParameter(_)
            | Self::ClipPlaneEnabled(_)
            | Self::ClipPlaneRelativeLock(_)
            | Self::ClearViewFocus { .. } => LockKind::RenderParameters,
        }
    }

    /// Returns the region the command targets, if any.
    pub fn region(&self) -> Option<RegionId> {
        match *self {
            Self::RotationDelta { region, .. }
            | Self::TranslationDelta { region, .. }
            | Self::ClipRotationDelta { region, .. }
            | Self::ClipTranslationDelta { region, .. }
            | Self::SetRotation { region, .. }
            | Self::SetTranslation { region, .. }
            | Self::SetClipPlane { region, .. }
            | Self::FinalizeRotation { region }
            | Self::ClearViewFocus { region, .. } => Some(region),
            Self::PlaneAtClick
            | Self::RenderParameter(_)
            | Self::ClipPlaneEnabled(_)
            | Self::ClipPlaneRelativeLock(_) => None,
        }
    }

    /// Returns the command aimed at a different region.
    #[must_use]
    pub fn with_region(mut self, target: RegionId) -> Self {
        match &mut self {
            Self::RotationDelta { region, .. }
            | Self::TranslationDelta { region, .. }
            | Self::ClipRotationDelta { region, .. }
            | Self::ClipTranslationDelta { region, .. }
            | Self::SetRotation { region, .. }
            | Self::SetTranslation { region, .. }
            | Self::SetClipPlane { region, .. }
            | Self::FinalizeRotation { region }
            | Self::ClearViewFocus { region, .. } => *region = target,
            Self::PlaneAtClick
            | Self::RenderParameter(_)
            | Self::ClipPlaneEnabled(_)
            | Self::ClipPlaneRelativeLock(_) => {}
        }
        self
    }
}

impl RenderWindow {
    /// Applies a command to this window only.
    pub fn apply(&mut self, command: &WindowCommand) -> Result<()> {
        match *command {
            WindowCommand::RotationDelta { region, delta } => {
                self.set_rotation_delta(region, delta)?;
            }
            WindowCommand::TranslationDelta { region, delta } => {
                self.set_translation_delta(region, delta)?;
            }
            WindowCommand::ClipRotationDelta {
                region,
                delta,
                secondary,
            } => {
                self.set_clip_rotation_delta(region, delta, secondary)?;
            }
            WindowCommand::ClipTranslationDelta {
                region,
                delta,
                secondary,
            } => {
                self.set_clip_translation_delta(region, delta, secondary)?;
            }
            WindowCommand::SetRotation { region, rotation } => {
                self.set_rotation(region, rotation, false)?;
            }
            WindowCommand::SetTranslation {
                region,
                translation,
            } => self.set_translation(region, translation, false)?,
            WindowCommand::SetClipPlane { region, plane } => self.set_clip_plane(region, plane)?,
            WindowCommand::FinalizeRotation { region } => self.finalize_rotation(region)?,
            WindowCommand::PlaneAtClick => self.set_plane_at_click(self.clip_plane),
            WindowCommand::RenderParameter(param) => self.set_render_parameter(param),
            WindowCommand::ClipPlaneEnabled(enabled) => self.set_clip_plane_enabled(enabled),
            WindowCommand::ClipPlaneRelativeLock(locked) => {
                self.set_clip_plane_relative_lock(locked);
            }
            WindowCommand::ClearViewFocus { region, pos } => self.set_clear_view_focus(region, pos)?,
        }
        self.request_redraw();
        Ok(())
    }

    /// Applies commands in order, stopping at the first error.
    pub fn apply_all(&mut self, commands: &[WindowCommand]) -> Result<()> {
        commands.iter().try_for_each(|command| self.apply(command))
    }

    /// Returns what an absolutely locked sibling should receive after
    /// `command` was applied here.
    ///
    /// Transform deltas become the resulting absolute state; everything else
    /// is passed on unchanged.
    pub fn absolute_command(&self, command: &WindowCommand) -> Result<WindowCommand> {
        Ok(match *command {
            WindowCommand::RotationDelta { region, .. } => WindowCommand::SetRotation {
                region,
                rotation: self.rotation(region)?,
            },
            WindowCommand::TranslationDelta { region, .. } => WindowCommand::SetTranslation {
                region,
                translation: self.translation(region)?,
            },
            WindowCommand::ClipRotationDelta { region, .. }
            | WindowCommand::ClipTranslationDelta { region, .. } => WindowCommand::SetClipPlane {
                region,
                plane: self.clip_plane,
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::tests::window;

    #[test]
    fn test_lock_kinds() {
        let region = RegionId(1);
        assert_eq!(
            WindowCommand::FinalizeRotation { region }.lock_kind(),
            LockKind::View
        );
        assert_eq!(WindowCommand::PlaneAtClick.lock_kind(), LockKind::View);
        assert_eq!(
            WindowCommand::ClipPlaneEnabled(true).lock_kind(),
            LockKind::RenderParameters
        );
    }

    #[test]
    fn test_with_region() {
        let cmd = WindowCommand::TranslationDelta {
            region: RegionId(1),
            delta: Vec3::X,
        };
        assert_eq!(cmd.with_region(RegionId(7)).region(), Some(RegionId(7)));
        assert_eq!(
            WindowCommand::PlaneAtClick.with_region(RegionId(7)),
            WindowCommand::PlaneAtClick
        );
    }

    #[test]
    fn test_absolute_command() {
        let mut w = window();
        let region = w.active_regions()[0];
        let cmd = WindowCommand::TranslationDelta {
            region,
            delta: Vec3::new(1.0, 2.0, 3.0),
        };
        w.apply(&cmd).unwrap();
        let WindowCommand::SetTranslation { translation, .. } = w.absolute_command(&cmd).unwrap()
        else {
            panic!("expected an absolute translation");
        };
        assert_eq!(translation.w_axis.truncate(), Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_apply_plane_at_click_uses_own_plane() {
        let mut w = window();
        let region = w.active_regions()[0];
        w.apply(&WindowCommand::TranslationDelta {
            region,
            delta: Vec3::Z,
        })
        .unwrap();
        w.apply(&WindowCommand::PlaneAtClick).unwrap();
        assert_eq!(w.plane_at_click(), w.clip_plane());
    }
}
