//! Heightmap generation ahead of rendering

use ridge_core::{Result, TerrainSettings};
use ridge_terrain::{NoiseField, TerrainMesh};

/// A built terrain mesh and the seed its noise field used
#[derive(Debug, Clone)]
pub struct GeneratedTerrain {
    pub seed: u32,
    pub mesh: TerrainMesh,
}

/// The configured seed, or a fresh random one
pub fn resolve_seed(configured: Option<u32>) -> u32 {
    configured.unwrap_or_else(rand::random)
}

/// Sample a noise field over the configured grid
pub fn generate_terrain(settings: &TerrainSettings) -> Result<GeneratedTerrain> {
    let seed = resolve_seed(settings.seed);
    match settings.seed {
        Some(_) => log::info!("Terrain seed: {}", seed),
        None => log::info!("Terrain seed: {} (random; set RIDGE_SEED to reproduce)", seed),
    }

    let field = NoiseField::from_settings(settings, seed);
    let mesh = TerrainMesh::build_with(settings.size, &field, settings.tex_coords)?;

    if let Some((low, high)) = mesh.height_range() {
        log::info!(
            "Generated {}x{} terrain: {} vertices, {} triangles, heights {:.3}..{:.3}",
            settings.size,
            settings.size,
            mesh.vertex_count(),
            mesh.triangle_count(),
            low,
            high
        );
    }

    Ok(GeneratedTerrain { seed, mesh })
}
