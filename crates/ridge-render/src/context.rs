//! Window surface, GPU device and depth buffer

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Depth buffer format shared by the context and the terrain pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),
    #[error("Failed to get adapter")]
    AdapterNotFound,
    #[error("Failed to create device: {0}")]
    DeviceCreation(String),
    #[error("Failed to load shader '{}': {message}", path.display())]
    ShaderLoad { path: PathBuf, message: String },
    #[error("Shader '{label}' failed validation: {message}")]
    ShaderValidation { label: String, message: String },
    #[error("Terrain {buffer} buffer needs {bytes} bytes, over the device limit of {max}")]
    BufferTooLarge {
        buffer: &'static str,
        bytes: u64,
        max: u64,
    },
    #[error("Terrain has {count} indices, more than a single u32 draw can address")]
    IndexCountOverflow { count: usize },
}

/// Depth attachment sized to the surface
pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthBuffer {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Terrain Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Everything the terrain renderer draws through
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub depth: DepthBuffer,
}

impl RenderContext {
    /// Open a surface on `window` and a device on the best matching adapter
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::AdapterNotFound)?;

        let (device, queue) = request_device(&adapter).await?;

        let config = surface_config(&surface.get_capabilities(&adapter), size)?;
        surface.configure(&device, &config);
        let depth = DepthBuffer::new(&device, config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth,
        })
    }

    /// Resize the surface and depth buffer; zero-sized requests (minimized windows) are ignored
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.reconfigure();
    }

    /// Reconfigure the surface at its current size, after it was lost or outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthBuffer::new(&self.device, self.config.width, self.config.height);
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

/// Ask for everything the adapter offers.
///
/// Terrain buffers grow with the square of the grid size, so the default
/// 256 MiB `max_buffer_size` is often lower than what the hardware supports.
async fn request_device(
    adapter: &wgpu::Adapter,
) -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
    let info = adapter.get_info();
    let limits = adapter.limits();
    log::info!(
        "Using adapter '{}' ({:?}), max buffer size {} MiB",
        info.name,
        info.backend,
        limits.max_buffer_size >> 20
    );

    adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Ridge Device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        )
        .await
        .map_err(|e| RenderError::DeviceCreation(e.to_string()))
}

/// Pick an sRGB format when offered, else the first one the surface reports
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration, RenderError> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| {
            RenderError::SurfaceCreation("surface reports no supported formats".to_string())
        })?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}
