//! Ridge Core - Foundational types for the Ridge terrain viewer
//!
//! This crate provides the types that all other Ridge crates depend on:
//! - `Vec3`, `Mat4`, `Transform` - Spatial types
//! - `Direction` - Camera translation directions
//! - `RidgeConfig` - Layered TOML configuration
//! - Error types and Result alias

mod config;
mod direction;
mod error;
mod types;

pub use config::{
    CameraSettings, RenderSettings, RidgeConfig, TerrainSettings, TexCoordMode,
    LOCAL_CONFIG_FILE, MAX_GRID_SIZE,
};
pub use direction::Direction;
pub use error::{Result, RidgeError};
pub use types::{Mat4, Transform, Vec3, MAT4_IDENTITY};
