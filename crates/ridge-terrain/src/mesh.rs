//! Regular-grid terrain mesh generation

use crate::noise_field::HeightSource;
use bytemuck::{Pod, Zeroable};
use ridge_core::{Result, RidgeError, TexCoordMode, MAX_GRID_SIZE};

/// A terrain vertex: position followed by texture coordinate, 20 bytes interleaved
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// CPU-side terrain geometry ready for upload as an indexed triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    /// Vertices per grid side
    pub size: u32,
    /// Row-major vertices; cell `(i, j)` lives at `i * size + j`
    pub vertices: Vec<TerrainVertex>,
    /// Two triangles per quad, `6 * (size - 1)²` entries
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build a `size` x `size` grid sampled from `heights`, with `(x, height)` texture coordinates.
    pub fn build(size: u32, heights: &impl HeightSource) -> Result<Self> {
        Self::build_with(size, heights, TexCoordMode::XHeight)
    }

    /// Build with an explicit texture coordinate mapping.
    ///
    /// Grids with `size <= 1` produce no triangles. Sizes above
    /// [`MAX_GRID_SIZE`] are rejected since `size²` would overflow `u32` indices.
    pub fn build_with(
        size: u32,
        heights: &impl HeightSource,
        tex_coords: TexCoordMode,
    ) -> Result<Self> {
        if size > MAX_GRID_SIZE {
            return Err(RidgeError::GridTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }
        if size <= 1 {
            log::warn!("Terrain grid size {} has no quads; mesh will be empty", size);
        }

        let vertices = grid_vertices(size, heights, tex_coords);
        let indices = grid_indices(size);

        log::debug!(
            "Built {}x{} terrain: {} vertices, {} indices",
            size,
            size,
            vertices.len(),
            indices.len()
        );

        Ok(Self {
            size,
            vertices,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat vertex index of grid cell `(i, j)`
    pub fn flat_index(&self, i: u32, j: u32) -> usize {
        (i * self.size + j) as usize
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Min/max height over all vertices, `None` for an empty mesh
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.position[1]).fold(None, |acc, y| {
            Some(match acc {
                None => (y, y),
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
            })
        })
    }
}

/// Sample the grid row-major (`i` outer, `j` inner) over the unit square `[0, 1)`.
fn grid_vertices(
    size: u32,
    heights: &impl HeightSource,
    tex_coords: TexCoordMode,
) -> Vec<TerrainVertex> {
    let mut vertices = Vec::with_capacity(size as usize * size as usize);

    for i in 0..size {
        for j in 0..size {
            let x = i as f32 / size as f32;
            let z = j as f32 / size as f32;
            let y = heights.height(x as f64, z as f64) as f32;

            let tex_coord = match tex_coords {
                TexCoordMode::XHeight => [x, y],
                TexCoordMode::XZ => [x, z],
            };

            vertices.push(TerrainVertex {
                position: [x, y, z],
                tex_coord,
            });
        }
    }

    vertices
}

/// Triangle-list indices for a `size` x `size` vertex grid.
///
/// Each quad with top-left vertex `v = i * size + j` is split into
/// `{v, v+1, v+size}` and `{v+1, v+1+size, v+size}`.
pub fn grid_indices(size: u32) -> Vec<u32> {
    let quads = size.saturating_sub(1) as usize;
    let mut indices = Vec::with_capacity(quads * quads * 6);

    for i in 0..size.saturating_sub(1) {
        for j in 0..size.saturating_sub(1) {
            let v = i * size + j;

            indices.extend_from_slice(&[v, v + 1, v + size]);
            indices.extend_from_slice(&[v + 1, v + 1 + size, v + size]);
        }
    }

    indices
}
