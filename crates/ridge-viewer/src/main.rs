//! Ridge Viewer - fly through a procedurally generated heightmap
//!
//! Usage:
//!   ridge-viewer [--config <file>] [--seed <n>] [--size <n>] [--fov <deg>] [--shader <file>]

use anyhow::{Context, Result};
use clap::Parser;
use ridge_core::RidgeConfig;
use ridge_viewer::{generate_terrain, ViewerApp};
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "ridge-viewer")]
#[command(about = "Ridge terrain viewer - fly over Perlin noise terrain")]
struct Args {
    /// Config file layered over ~/.ridge/config.toml and ./ridge.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Noise seed (random when unset)
    #[arg(long)]
    seed: Option<u32>,

    /// Vertices per grid side
    #[arg(long)]
    size: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// WGSL shader replacing the built-in terrain shader
    #[arg(long)]
    shader: Option<PathBuf>,
}

impl Args {
    fn apply_to(&self, config: &mut RidgeConfig) {
        if let Some(seed) = self.seed {
            config.terrain.seed = Some(seed);
        }
        if let Some(size) = self.size {
            config.terrain.size = size;
        }
        if let Some(fov) = self.fov {
            config.camera.fov = fov;
        }
        if let Some(shader) = &self.shader {
            config.render.shader = Some(shader.clone());
        }
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let mut config = RidgeConfig::load(args.config.as_deref()).context("Failed to load config")?;
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    let terrain = generate_terrain(&config.terrain).context("Failed to generate terrain")?;

    log::info!("Controls: W/S/A/D move, Q/Z rise/sink, mouse looks, Esc releases cursor / exits");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config, terrain.mesh);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_config() {
        let args = Args::parse_from([
            "ridge-viewer",
            "--seed",
            "42",
            "--size",
            "64",
            "--fov",
            "60",
            "--shader",
            "custom.wgsl",
        ]);
        let mut config = RidgeConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.terrain.seed, Some(42));
        assert_eq!(config.terrain.size, 64);
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.render.shader, Some(PathBuf::from("custom.wgsl")));
    }

    #[test]
    fn absent_flags_leave_config() {
        let args = Args::parse_from(["ridge-viewer"]);
        let mut config = RidgeConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config, RidgeConfig::default());
    }
}
