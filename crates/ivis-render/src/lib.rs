//! Renderer boundary for imagevis3d-rs.
//!
//! This crate defines what a render window needs from a volume rendering
//! engine:
//! - The [`Renderer`] trait (regions, clip plane, parameters, frame control)
//! - Render parameters shared across locked windows
//! - [`HeadlessRenderer`], an in-memory engine for tests and headless hosts

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod headless;
pub mod params;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use headless::HeadlessRenderer;
pub use params::{PerfMeasures, RenderMode, RenderParameter, RenderParameters, RendererTarget};
pub use renderer::Renderer;
