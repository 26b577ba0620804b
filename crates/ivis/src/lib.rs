//! imagevis3d-rs: multi-region render windows for interactive volume rendering.
//!
//! A [`RenderWindow`] shows one volume in a single view or a 2x2 grid of
//! regions (one 3D view and three axis-aligned slice views). It turns pointer,
//! wheel and keyboard input into rotations, translations and clip-plane
//! changes, and drives a rendering engine through the
//! [`Renderer`] trait.
//!
//! # Quick Start
//!
//! ```
//! use ivis::*;
//!
//! fn main() -> Result<()> {
//!     init();
//!
//!     let mut workspace = Workspace::new();
//!     let a = workspace.add_window(RenderWindow::new(
//!         "left",
//!         Box::new(HeadlessRenderer::new(UVec3::new(64, 64, 64))),
//!         WindowOptions::default(),
//!     ));
//!     let b = workspace.add_window(RenderWindow::new(
//!         "right",
//!         Box::new(HeadlessRenderer::new(UVec3::new(64, 64, 64))),
//!         WindowOptions::default(),
//!     ));
//!     workspace.lock(a, b, LockKind::View)?;
//!
//!     // Dragging with the right button in `a` moves both volumes.
//!     workspace.pointer_down(a, &PointerEvent::button(200, 200, PointerButton::Right))?;
//!     workspace.pointer_move(a, &PointerEvent::moved(240, 200, PointerButtons::RIGHT))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Locking
//!
//! Windows registered in a [`Workspace`] can be locked together per
//! [`LockKind`]. A change made in one window is mirrored on the
//! corresponding region of every locked window, one hop deep.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod input;
pub mod notification;
pub mod window;
pub mod workspace;

pub use input::{
    CursorShape, Key, Modifiers, PointerButton, PointerButtons, PointerEvent, WheelEvent,
};
pub use notification::WindowNotification;
pub use window::{RenderWindow, ViewState, WindowCommand};
pub use workspace::{LockKind, WindowId, Workspace};

// Re-export core types
pub use ivis_core::{
    ExtendedPlane, IvisError, ProvenanceEntry, ProvenanceLog, ProvenanceScope, ProvenanceSink,
    RegionData, RegionId, RegionKind, RegionSlot, RegionSplitter, Result, ViewMode, WindowMode,
    WindowOptions,
};

// Re-export renderer types
pub use ivis_render::{
    HeadlessRenderer, PerfMeasures, RenderError, RenderMode, RenderParameter, RenderParameters,
    Renderer, RendererTarget,
};

pub use glam::{IVec2, Mat4, UVec2, UVec3, Vec2, Vec3, Vec4};

/// Installs the default `env_logger` backend.
///
/// Safe to call more than once; later calls keep the first logger.
pub fn init() {
    let _ = env_logger::try_init();
    log::info!("imagevis3d-rs initialized");
}
