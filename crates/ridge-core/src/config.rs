//! Layered configuration system
//!
//! Config is assembled from several layers (highest wins):
//! 1. Environment variable `RIDGE_SEED`
//! 2. An explicitly requested file (`--config <path>`)
//! 3. Project-local: `ridge.toml`
//! 4. Global: `~/.ridge/config.toml`
//! 5. Built-in defaults
//!
//! Command-line flags are applied on top by the viewer binary.

use crate::error::{Result, RidgeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ridge.toml";

/// Largest grid side whose vertex count (`size²`) still fits a 32-bit index.
///
/// This bounds mesh generation only. Drawing is further limited by the GPU:
/// the renderer rejects grids of 26756 or more (index count past `u32`) and
/// any grid whose buffers exceed the device's `max_buffer_size`. Under wgpu's
/// default 256 MiB limit the largest drawable grid is 3345.
pub const MAX_GRID_SIZE: u32 = 65_535;

const SEED_ENV_VAR: &str = "RIDGE_SEED";

/// What the second texture coordinate of a terrain vertex carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TexCoordMode {
    /// `(x, height)`: the layout existing terrain shaders read
    #[default]
    XHeight,
    /// `(x, z)`: planar mapping over the unit square
    XZ,
}

/// Grid and noise parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Vertices per grid side
    pub size: u32,
    /// Noise seed; `None` means pick one at startup
    pub seed: Option<u32>,
    pub frequency: f64,
    pub scale: f64,
    pub bias: f64,
    pub tex_coords: TexCoordMode,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: 1000,
            seed: None,
            frequency: 2.0,
            scale: 0.1,
            bias: 0.35,
            tex_coords: TexCoordMode::default(),
        }
    }
}

/// Free camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Numerator of the projection aspect ratio
    pub screen_height: u32,
    /// Denominator of the projection aspect ratio
    pub screen_width: u32,
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Movement speed in world units per second
    pub base_speed: f32,
    /// Degrees of rotation per pixel of cursor motion
    pub sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            screen_height: 800,
            screen_width: 600,
            position: [2.5, 30.0, 2.5],
            fov: 90.0,
            base_speed: 10.0,
            sensitivity: 0.1,
        }
    }
}

/// Renderer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Uniform scale applied by the model matrix
    pub model_scale: f32,
    /// WGSL shader to load instead of the built-in one
    pub shader: Option<PathBuf>,
    pub clear_color: [f64; 4],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            model_scale: 50.0,
            shader: None,
            clear_color: [0.1, 0.1, 0.15, 1.0],
        }
    }
}

impl RenderSettings {
    /// Configured shader path, treating an empty string as unset
    pub fn shader_path(&self) -> Option<&Path> {
        self.shader
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeConfig {
    pub terrain: TerrainSettings,
    pub camera: CameraSettings,
    pub render: RenderSettings,
}

impl RidgeConfig {
    /// Load config with layered precedence: global < project < explicit < env vars
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        // Layer 1: Global config (~/.ridge/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_tables(&mut merged, Self::load_table(&global_path)?);
            }
        }

        // Layer 2: Project-local config (ridge.toml)
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            merge_tables(&mut merged, Self::load_table(&local_path)?);
        }

        // Layer 3: Explicit file, which must exist
        if let Some(path) = explicit {
            merge_tables(&mut merged, Self::load_table(path)?);
        }

        let mut config = Self::from_table(merged, "<merged>")?;
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (no env overrides)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let table = Self::load_table(path)?;
        let config = Self::from_table(table, &path.display().to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content).map_err(|e| RidgeError::ConfigParse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_table(table, "<string>")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply variable overrides from `lookup` (the process environment in `load`)
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(raw) = lookup(SEED_ENV_VAR) {
            let seed = raw.trim().parse::<u32>().map_err(|_| {
                RidgeError::InvalidConfig(format!(
                    "{} must be an unsigned 32-bit integer, got '{}'",
                    SEED_ENV_VAR, raw
                ))
            })?;
            self.terrain.seed = Some(seed);
        }
        Ok(())
    }

    /// Check value ranges that would otherwise produce a broken mesh or projection
    pub fn validate(&self) -> Result<()> {
        let t = &self.terrain;
        if t.size > MAX_GRID_SIZE {
            return Err(RidgeError::GridTooLarge {
                size: t.size,
                max: MAX_GRID_SIZE,
            });
        }
        for (name, value) in [
            ("terrain.frequency", t.frequency),
            ("terrain.scale", t.scale),
            ("terrain.bias", t.bias),
        ] {
            if !value.is_finite() {
                return Err(RidgeError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        let c = &self.camera;
        if !(c.fov > 0.0 && c.fov < 180.0) {
            return Err(RidgeError::InvalidConfig(format!(
                "camera.fov must be between 0 and 180 degrees, got {}",
                c.fov
            )));
        }
        if c.screen_height == 0 || c.screen_width == 0 {
            return Err(RidgeError::InvalidConfig(format!(
                "camera screen dimensions must be non-zero, got {}x{}",
                c.screen_height, c.screen_width
            )));
        }
        if !c.sensitivity.is_finite() || !c.base_speed.is_finite() {
            return Err(RidgeError::InvalidConfig(
                "camera.sensitivity and camera.base_speed must be finite".to_string(),
            ));
        }
        if c.position.iter().any(|v| !v.is_finite()) {
            return Err(RidgeError::InvalidConfig(
                "camera.position must be finite".to_string(),
            ));
        }

        if !self.render.model_scale.is_finite() {
            return Err(RidgeError::InvalidConfig(
                "render.model_scale must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ridge").join("config.toml"))
    }

    fn load_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RidgeError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn from_table(table: toml::Table, origin: &str) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| RidgeError::ConfigParse {
                path: origin.to_string(),
                message: e.to_string(),
            })
    }
}

/// Recursively merge `overlay` into `base`; overlay values win, sub-tables merge
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
