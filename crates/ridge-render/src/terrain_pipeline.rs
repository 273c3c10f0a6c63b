//! Terrain render pipeline: height-coloured indexed triangle list

use crate::camera::Camera;
use crate::context::{RenderError, DEPTH_FORMAT};
use crate::gpu_mesh::terrain_vertex_layout;
use crate::shader::{validated, ShaderSource, FRAGMENT_ENTRY, VERTEX_ENTRY};
use bytemuck::{Pod, Zeroable};
use ridge_core::{Mat4, MAT4_IDENTITY};

/// Per-frame matrices (bind group 0, binding 0).
///
/// Field order and names mirror the shader's `Uniforms` block: `view`,
/// `projection`, `model`, each a column-major 4x4.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view: Mat4,
    pub projection: Mat4,
    pub model: Mat4,
}

impl SceneUniforms {
    /// Matrices from the camera's last `update`, plus the terrain's model matrix
    pub fn from_camera(camera: &Camera, model: Mat4) -> Self {
        Self {
            view: camera.view(),
            projection: camera.projection(),
            model,
        }
    }
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view: MAT4_IDENTITY,
            projection: MAT4_IDENTITY,
            model: MAT4_IDENTITY,
        }
    }
}

/// The terrain render pipeline
pub struct TerrainPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub uniform_bind_group_layout: wgpu::BindGroupLayout,
}

impl TerrainPipeline {
    /// Compile `shader` and build the pipeline.
    ///
    /// Fails if the shader does not compile or does not match the vertex
    /// layout and uniform block the pipeline expects.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        shader: &ShaderSource,
    ) -> Result<Self, RenderError> {
        let module = shader.compile(device)?;

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Terrain Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<SceneUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Terrain Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = validated(device, &shader.label, || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Terrain Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some(VERTEX_ENTRY),
                    buffers: &[terrain_vertex_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some(FRAGMENT_ENTRY),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    // Grid triangles wind counter-clockwise seen from +Y
                    front_face: wgpu::FrontFace::Ccw,
                    // Both sides are drawn so the terrain stays visible from below
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        })?;

        Ok(Self {
            pipeline,
            uniform_bind_group_layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_are_three_packed_matrices() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 3 * 64);
        let uniforms = SceneUniforms {
            view: [[1.0; 4]; 4],
            projection: [[2.0; 4]; 4],
            model: [[3.0; 4]; 4],
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniforms));
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[16], 2.0);
        assert_eq!(floats[32], 3.0);
    }

    #[test]
    fn uniforms_follow_camera() {
        let mut camera = Camera::with_screen(800, 600);
        camera.update();
        let model = ridge_core::Transform::from_uniform_scale(50.0).to_matrix();
        let uniforms = SceneUniforms::from_camera(&camera, model);
        assert_eq!(uniforms.view, camera.view());
        assert_eq!(uniforms.projection, camera.projection());
        assert_eq!(uniforms.model, model);
    }
}
