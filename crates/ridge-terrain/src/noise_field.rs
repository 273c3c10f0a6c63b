//! Coherent-noise height source

use noise::{NoiseFn, Perlin, ScaleBias, ScalePoint};
use ridge_core::TerrainSettings;
use std::fmt;

/// Anything that can be sampled as a height over the unit square
pub trait HeightSource {
    /// Height at normalized grid coordinates `(x, z)`
    fn height(&self, x: f64, z: f64) -> f64;
}

impl<F> HeightSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn height(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// Perlin noise with frequency scaling and a scale/bias post-transform.
///
/// `height(x, z) = perlin(x * f, 0, z * f) * scale + bias`. Only the `y = 0`
/// slice of the 3D noise is used, so one generator serves the whole heightfield.
pub struct NoiseField {
    seed: u32,
    frequency: f64,
    scale: f64,
    bias: f64,
    source: ScaleBias<f64, ScalePoint<Perlin>, 3>,
}

impl NoiseField {
    pub const DEFAULT_FREQUENCY: f64 = 2.0;
    pub const DEFAULT_SCALE: f64 = 0.1;
    pub const DEFAULT_BIAS: f64 = 0.35;

    /// Noise field with the default frequency, scale and bias
    pub fn new(seed: u32) -> Self {
        Self::with_params(
            seed,
            Self::DEFAULT_FREQUENCY,
            Self::DEFAULT_SCALE,
            Self::DEFAULT_BIAS,
        )
    }

    pub fn with_params(seed: u32, frequency: f64, scale: f64, bias: f64) -> Self {
        let base = ScalePoint::new(Perlin::new(seed)).set_scale(frequency);
        let source = ScaleBias::new(base).set_scale(scale).set_bias(bias);
        Self {
            seed,
            frequency,
            scale,
            bias,
            source,
        }
    }

    /// Build from terrain settings; `seed` is passed separately since settings may leave it unset
    pub fn from_settings(settings: &TerrainSettings, seed: u32) -> Self {
        Self::with_params(seed, settings.frequency, settings.scale, settings.bias)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl HeightSource for NoiseField {
    fn height(&self, x: f64, z: f64) -> f64 {
        self.source.get([x, 0.0, z])
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("frequency", &self.frequency)
            .field("scale", &self.scale)
            .field("bias", &self.bias)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_is_deterministic() {
        let a = NoiseField::new(7);
        let b = NoiseField::new(7);
        for &(x, z) in &[(0.0, 0.0), (0.123, 0.456), (0.999, 0.5), (0.5, 0.999)] {
            let h = a.height(x, z);
            assert_eq!(h, a.height(x, z));
            assert_eq!(h, b.height(x, z));
        }
    }

    #[test]
    fn output_stays_near_bias() {
        // Perlin output is roughly [-1, 1], so heights land in bias ± scale (with slack)
        let field = NoiseField::new(3);
        for i in 0..50 {
            for j in 0..50 {
                let h = field.height(i as f64 / 50.0, j as f64 / 50.0);
                assert!(h.is_finite());
                assert!((h - NoiseField::DEFAULT_BIAS).abs() <= 0.2, "height {} out of range", h);
            }
        }
    }

    #[test]
    fn field_is_continuous() {
        let field = NoiseField::new(11);
        let step = 1e-4;
        for i in 0..100 {
            let x = i as f64 / 100.0;
            let here = field.height(x, 0.37);
            let next = field.height(x + step, 0.37);
            assert!((here - next).abs() < 0.01, "jump at x={}", x);
        }
    }

    #[test]
    fn zero_scale_is_flat_at_bias() {
        let field = NoiseField::with_params(5, 2.0, 0.0, 0.35);
        assert_eq!(field.height(0.3, 0.8), 0.35);
        assert_eq!(field.height(0.9, 0.1), 0.35);
    }

    #[test]
    fn settings_are_carried_over() {
        let settings = TerrainSettings {
            frequency: 4.0,
            scale: 0.5,
            bias: -1.0,
            ..TerrainSettings::default()
        };
        let field = NoiseField::from_settings(&settings, 99);
        assert_eq!(field.seed(), 99);
        assert_eq!(field.frequency(), 4.0);
        assert_eq!(field.scale(), 0.5);
        assert_eq!(field.bias(), -1.0);
    }

    #[test]
    fn closures_are_height_sources() {
        let ramp = |x: f64, z: f64| x + z;
        assert_eq!(ramp.height(0.25, 0.5), 0.75);
    }
}
