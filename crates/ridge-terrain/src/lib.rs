//! Ridge Terrain - Procedural heightfield generation
//!
//! Samples a coherent-noise field over a regular grid and produces raw
//! vertex and index buffers. Does not depend on ridge-render; the renderer
//! uploads the buffers it produces.

mod mesh;
mod noise_field;

pub use mesh::{grid_indices, TerrainMesh, TerrainVertex};
pub use noise_field::{HeightSource, NoiseField};
pub use ridge_core::{TexCoordMode, MAX_GRID_SIZE};
