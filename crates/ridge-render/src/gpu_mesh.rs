//! GPU upload of terrain geometry

use crate::context::RenderError;
use ridge_terrain::{TerrainMesh, TerrainVertex};
use wgpu::util::DeviceExt;

const TERRAIN_VERTEX_ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,   // position
    1 => Float32x2,   // tex_coord
];

/// Interleaved vertex layout of [`TerrainVertex`]
pub fn terrain_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &TERRAIN_VERTEX_ATTRIBS,
    }
}

/// Static terrain geometry resident on the GPU
pub struct GpuTerrain {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuTerrain {
    /// Upload vertex and index buffers once.
    ///
    /// Fails instead of handing wgpu a buffer larger than the device allows.
    pub fn upload(device: &wgpu::Device, mesh: &TerrainMesh) -> Result<Self, RenderError> {
        let index_count = check_fits(
            mesh.vertices.len(),
            mesh.indices.len(),
            device.limits().max_buffer_size,
        )?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }
}

/// Check both terrain buffers against `max_buffer_size` and return the draw count
fn check_fits(
    vertex_count: usize,
    index_count: usize,
    max_buffer_size: u64,
) -> Result<u32, RenderError> {
    let draw_count = u32::try_from(index_count)
        .map_err(|_| RenderError::IndexCountOverflow { count: index_count })?;

    let buffers = [
        ("vertex", vertex_count as u64 * std::mem::size_of::<TerrainVertex>() as u64),
        ("index", index_count as u64 * std::mem::size_of::<u32>() as u64),
    ];
    for (buffer, bytes) in buffers {
        if bytes > max_buffer_size {
            return Err(RenderError::BufferTooLarge {
                buffer,
                bytes,
                max: max_buffer_size,
            });
        }
    }

    Ok(draw_count)
}
