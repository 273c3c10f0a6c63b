//! Ridge Render - wgpu renderer for procedural terrain
//!
//! This crate owns the GPU side of the viewer: the surface and device
//! context, the free-look camera that produces view and projection
//! matrices, and the pipeline that draws a [`ridge_terrain::TerrainMesh`]
//! as an indexed triangle list coloured by height.

mod camera;
mod context;
mod gpu_mesh;
mod shader;
mod terrain_pipeline;
mod terrain_renderer;

pub use camera::{Camera, DEFAULT_FOV, DEFAULT_SENSITIVITY, FAR_PLANE, NEAR_PLANE, PITCH_LIMIT};
pub use context::{DepthBuffer, RenderContext, RenderError, DEPTH_FORMAT};
pub use gpu_mesh::{terrain_vertex_layout, GpuTerrain};
pub use shader::{
    ShaderSource, BUILTIN_TERRAIN_SHADER, FRAGMENT_ENTRY, UNIFORM_NAMES, VERTEX_ENTRY,
};
pub use terrain_pipeline::{SceneUniforms, TerrainPipeline};
pub use terrain_renderer::TerrainRenderer;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_terrain_shader() -> naga::Module {
        naga::front::wgsl::parse_str(BUILTIN_TERRAIN_SHADER)
            .expect("terrain_shader.wgsl failed to parse")
    }

    #[test]
    fn terrain_shader_wgsl_parses() {
        parse_terrain_shader();
    }

    #[test]
    fn terrain_shader_validates() {
        let module = parse_terrain_shader();
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .expect("terrain_shader.wgsl failed validation");
    }

    #[test]
    fn terrain_shader_declares_entry_points() {
        let module = parse_terrain_shader();
        let find = |name: &str| module.entry_points.iter().find(|ep| ep.name == name);

        let vs = find(VERTEX_ENTRY).expect("missing vertex entry point");
        assert_eq!(vs.stage, naga::ShaderStage::Vertex);
        let fs = find(FRAGMENT_ENTRY).expect("missing fragment entry point");
        assert_eq!(fs.stage, naga::ShaderStage::Fragment);
    }

    #[test]
    fn terrain_shader_uniform_block_matches_scene_uniforms() {
        let module = parse_terrain_shader();
        let members = module
            .types
            .iter()
            .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
                (Some(name), naga::TypeInner::Struct { members, .. }) if name == "Uniforms" => {
                    Some(members.clone())
                }
                _ => None,
            })
            .expect("shader has no Uniforms struct");

        let names: Vec<_> = members.iter().filter_map(|m| m.name.as_deref()).collect();
        assert_eq!(names, UNIFORM_NAMES);

        // Offsets line up with the packed Rust struct
        let offsets: Vec<u32> = members.iter().map(|m| m.offset).collect();
        assert_eq!(offsets, vec![0, 64, 128]);
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 192);
    }
}
