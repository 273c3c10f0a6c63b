//! Draws the uploaded terrain each frame

use crate::context::{RenderContext, RenderError};
use crate::gpu_mesh::GpuTerrain;
use crate::shader::ShaderSource;
use crate::terrain_pipeline::{SceneUniforms, TerrainPipeline};
use ridge_terrain::TerrainMesh;
use wgpu::util::DeviceExt;

/// Owns the terrain pipeline, its uniform buffer and the static terrain geometry
pub struct TerrainRenderer {
    pipeline: TerrainPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    terrain: GpuTerrain,
    clear_color: wgpu::Color,
}

impl TerrainRenderer {
    /// Build the pipeline and upload `mesh` once
    pub fn new(
        context: &RenderContext,
        mesh: &TerrainMesh,
        shader: &ShaderSource,
        clear_color: [f64; 4],
    ) -> Result<Self, RenderError> {
        let device = &context.device;
        let pipeline = TerrainPipeline::new(device, context.format(), shader)?;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Uniform Buffer"),
            contents: bytemuck::cast_slice(&[SceneUniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("Terrain Uniform Bind Group"),
        });

        let terrain = GpuTerrain::upload(device, mesh)?;
        log::info!(
            "Uploaded terrain: {} vertices, {} indices",
            mesh.vertex_count(),
            terrain.index_count
        );

        let [r, g, b, a] = clear_color;
        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            terrain,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Write this frame's view, projection and model matrices
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Clear `target` and draw the terrain as an indexed triangle list
    pub fn render(&self, context: &RenderContext, target: &wgpu::TextureView) {
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Terrain Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Terrain Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.terrain.is_empty() {
                render_pass.set_pipeline(&self.pipeline.pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.terrain.vertex_buffer.slice(..));
                render_pass.set_index_buffer(
                    self.terrain.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..self.terrain.index_count, 0, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }

    pub fn index_count(&self) -> u32 {
        self.terrain.index_count
    }
}
