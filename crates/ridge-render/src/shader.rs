//! Terrain shader source loading and validation

use crate::context::RenderError;
use std::path::Path;

/// WGSL shader used when no external shader is configured or it cannot be read
pub const BUILTIN_TERRAIN_SHADER: &str = include_str!("terrain_shader.wgsl");

/// Members the shader's uniform block (group 0, binding 0) must declare, in order
pub const UNIFORM_NAMES: [&str; 3] = ["view", "projection", "model"];

/// Vertex stage entry point
pub const VERTEX_ENTRY: &str = "vs_main";
/// Fragment stage entry point
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// WGSL source plus a label for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub label: String,
    pub code: String,
}

impl ShaderSource {
    pub fn builtin() -> Self {
        Self {
            label: "built-in terrain shader".to_string(),
            code: BUILTIN_TERRAIN_SHADER.to_string(),
        }
    }

    /// Read a WGSL file
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let code = std::fs::read_to_string(path).map_err(|e| RenderError::ShaderLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            label: path.display().to_string(),
            code,
        })
    }

    /// Read `path` if given, falling back to the built-in shader when it can't be read.
    ///
    /// A missing or unreadable file is reported but not fatal.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        match path.map(Self::from_file) {
            Some(Ok(source)) => {
                log::info!("Using shader {}", source.label);
                source
            }
            Some(Err(e)) => {
                log::error!("{}; falling back to the built-in shader", e);
                Self::builtin()
            }
            None => Self::builtin(),
        }
    }

    /// Compile into a shader module, turning validation errors into `RenderError`
    pub fn compile(&self, device: &wgpu::Device) -> Result<wgpu::ShaderModule, RenderError> {
        validated(device, &self.label, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&self.label),
                source: wgpu::ShaderSource::Wgsl(self.code.as_str().into()),
            })
        })
    }
}

/// Run `create` inside a validation error scope.
///
/// wgpu reports shader and pipeline errors asynchronously; by default they
/// abort the process. Capturing them lets a bad shader surface as an error.
pub(crate) fn validated<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> Result<T, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(value),
        Some(error) => Err(RenderError::ShaderValidation {
            label: label.to_string(),
            message: error.to_string(),
        }),
    }
}
