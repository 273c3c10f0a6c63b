//! Ridge Viewer - interactive terrain fly-through
//!
//! This crate provides the `ViewerApp` application handler and the
//! terrain generation step that runs before the window opens.

mod terrain_setup;
mod viewer_app;

pub use terrain_setup::{generate_terrain, resolve_seed, GeneratedTerrain};
pub use viewer_app::ViewerApp;
