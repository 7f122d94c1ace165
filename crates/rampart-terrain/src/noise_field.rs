//! Column height sources: flat, multi-octave value noise, or a heightmap image.
//!
//! [`NoiseField`] is a pure function from a grid column to its height. It holds
//! no mutable state, so it can be shared freely between threads and sampled
//! again during meshing without caching.

use noise::{NoiseFn, Value};
use rampart_config::{Config, NoiseConfig};

use crate::error::TerrainError;
use crate::heightmap_image::HeightmapImage;
use crate::seed::{SeedStream, noise_seed};

/// Multi-octave fractal sum over 2D value noise.
///
/// Each successive octave multiplies frequency by `lacunarity` and amplitude
/// by `persistence`. The sum is normalized by the total amplitude, so
/// [`sample`](Self::sample) always lands in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct FractalNoise {
    noise: Value,
    params: NoiseConfig,
}

impl FractalNoise {
    /// Create a new sampler with the given parameters and permutation seed.
    pub fn new(params: NoiseConfig, seed: u32) -> Self {
        Self {
            noise: Value::new(seed),
            params,
        }
    }

    /// Sample the normalized fractal sum at a grid column.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let p = &self.params;
        let px = (x + p.offset[0]) * p.scale;
        let pz = (z + p.offset[1]) * p.scale;

        let mut total = 0.0;
        let mut total_amplitude = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..p.octaves {
            let raw = self.noise.get([px * frequency, pz * frequency]);
            total += unit_interval(raw) * amplitude;
            total_amplitude += amplitude;

            frequency *= p.lacunarity;
            amplitude *= p.persistence;
        }

        if total_amplitude > 0.0 {
            (total / total_amplitude).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &NoiseConfig {
        &self.params
    }
}

/// Map raw `noise` output from `[-1, 1]` to `[0, 1]`.
pub(crate) fn unit_interval(raw: f64) -> f64 {
    ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Where column heights come from.
#[derive(Clone, Debug)]
pub enum HeightSource {
    /// Every column has the same height.
    Flat {
        /// Unclamped column height.
        height: u32,
    },
    /// Fractal value noise mapped onto `[min, min + amplitude]`.
    Fractal(FractalNoise),
    /// Bilinear lookup into a grayscale image scaled by an elevation constant.
    Image {
        /// Decoded lookup table.
        image: HeightmapImage,
        /// Column height of a white sample.
        elevation_scale: f64,
    },
}

/// Maps a grid column to its terrain height.
#[derive(Clone, Debug)]
pub struct NoiseField {
    source: HeightSource,
    width: u32,
    depth: u32,
    max_height: u32,
}

impl NoiseField {
    /// A flat field at `min_column_height + amplitude`.
    pub fn flat(min_column_height: u32, amplitude: u32, width: u32, depth: u32, max_height: u32) -> Self {
        Self {
            source: HeightSource::Flat {
                height: min_column_height.saturating_add(amplitude),
            },
            width,
            depth,
            max_height,
        }
    }

    /// A fractal value-noise field.
    pub fn fractal(params: NoiseConfig, seed: u32, width: u32, depth: u32, max_height: u32) -> Self {
        Self {
            source: HeightSource::Fractal(FractalNoise::new(params, seed)),
            width,
            depth,
            max_height,
        }
    }

    /// An image-driven field.
    pub fn image(
        image: HeightmapImage,
        elevation_scale: f64,
        width: u32,
        depth: u32,
        max_height: u32,
    ) -> Self {
        Self {
            source: HeightSource::Image {
                image,
                elevation_scale,
            },
            width,
            depth,
            max_height,
        }
    }

    /// Build the field the configuration selects.
    ///
    /// A configured heightmap image takes precedence over noise; otherwise the
    /// noise enable flag picks fractal or flat.
    pub fn from_config(config: &Config, world_seed: u64) -> Result<Self, TerrainError> {
        let map = &config.map;
        if let Some(path) = &config.heightmap.image {
            let image = HeightmapImage::open(path)?;
            return Ok(Self::image(
                image,
                config.heightmap.elevation_scale,
                map.width,
                map.depth,
                map.height,
            ));
        }
        if config.noise.enabled {
            Ok(Self::fractal(
                config.noise.clone(),
                noise_seed(world_seed, SeedStream::HeightNoise),
                map.width,
                map.depth,
                map.height,
            ))
        } else {
            Ok(Self::flat(
                config.noise.min_column_height,
                config.noise.amplitude,
                map.width,
                map.depth,
                map.height,
            ))
        }
    }

    /// Column height at `(x, z)`.
    ///
    /// Flat and image modes clamp to `[1, max_height]`; fractal mode clamps to
    /// `[max(min_column_height, 1), max_height]`.
    pub fn height(&self, x: i32, z: i32) -> u32 {
        let max = self.max_height.max(1);
        match &self.source {
            HeightSource::Flat { height } => (*height).clamp(1, max),
            HeightSource::Fractal(fractal) => {
                let params = fractal.params();
                let n = fractal.sample(x as f64, z as f64);
                let floor = params.min_column_height.clamp(1, max);
                let raw = params.min_column_height as f64 + (n * params.amplitude as f64).round();
                (raw as u32).clamp(floor, max)
            }
            HeightSource::Image {
                image,
                elevation_scale,
            } => {
                let u = x as f64 / self.width.max(1) as f64;
                let v = z as f64 / self.depth.max(1) as f64;
                let raw = (image.sample_bilinear(u, v) * elevation_scale).round();
                // The cast saturates and maps NaN to 0, so clamp afterwards.
                (raw as u32).clamp(1, max)
            }
        }
    }

    /// Return the active height source.
    pub fn source(&self) -> &HeightSource {
        &self.source
    }

    /// Upper clamp for every column.
    pub fn max_height(&self) -> u32 {
        self.max_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    const EPSILON: f64 = 1e-12;

    fn fractal_params() -> NoiseConfig {
        NoiseConfig {
            min_column_height: 2,
            amplitude: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let a = FractalNoise::new(fractal_params(), 42);
        let b = FractalNoise::new(fractal_params(), 42);
        let h1 = a.sample(13.0, 27.0);
        let h2 = b.sample(13.0, 27.0);
        assert!(
            (h1 - h2).abs() < EPSILON,
            "Same seed + same coord must produce identical value: {h1} vs {h2}"
        );
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let a = FractalNoise::new(fractal_params(), 1);
        let b = FractalNoise::new(fractal_params(), 999);
        let differs = (0..64).any(|i| {
            let x = i as f64 * 1.7;
            (a.sample(x, x * 0.5) - b.sample(x, x * 0.5)).abs() > EPSILON
        });
        assert!(differs, "Different seeds should produce different fields");
    }

    #[test]
    fn test_fractal_sample_is_normalized() {
        let fractal = FractalNoise::new(fractal_params(), 7);
        for x in 0..50 {
            for z in 0..50 {
                let n = fractal.sample(x as f64, z as f64);
                assert!((0.0..=1.0).contains(&n), "sample {n} outside [0, 1]");
            }
        }
    }

    #[test]
    fn test_zero_octaves_returns_midpoint() {
        let params = NoiseConfig {
            octaves: 0,
            ..fractal_params()
        };
        let fractal = FractalNoise::new(params, 3);
        assert!((fractal.sample(4.0, 4.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_fractal_heights_within_range() {
        let field = NoiseField::fractal(fractal_params(), 11, 40, 40, 16);
        for x in 0..40 {
            for z in 0..40 {
                let h = field.height(x, z);
                assert!((2..=12).contains(&h), "height {h} outside [2, 12] at ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_fractal_clamps_to_max_height() {
        let params = NoiseConfig {
            min_column_height: 3,
            amplitude: 50,
            ..Default::default()
        };
        let field = NoiseField::fractal(params, 5, 32, 32, 8);
        for x in 0..32 {
            for z in 0..32 {
                let h = field.height(x, z);
                assert!((3..=8).contains(&h), "height {h} outside [3, 8]");
            }
        }
    }

    #[test]
    fn test_flat_field_is_constant() {
        let field = NoiseField::flat(2, 0, 10, 10, 4);
        for x in 0..10 {
            for z in 0..10 {
                assert_eq!(field.height(x, z), 2);
            }
        }
    }

    #[test]
    fn test_flat_field_clamps() {
        assert_eq!(NoiseField::flat(0, 0, 4, 4, 4).height(0, 0), 1);
        assert_eq!(NoiseField::flat(3, 9, 4, 4, 4).height(0, 0), 4);
    }

    #[test]
    fn test_mid_gray_image_gives_uniform_height() {
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        let heightmap = HeightmapImage::from_dynamic(&DynamicImage::ImageLuma8(img)).unwrap();
        let field = NoiseField::image(heightmap, 10.0, 20, 20, 16);

        let expected = field.height(0, 0);
        assert_eq!(expected, 5, "128/255 * 10 rounds to 5");
        for x in 0..20 {
            for z in 0..20 {
                assert_eq!(field.height(x, z), expected);
            }
        }
    }

    #[test]
    fn test_image_heights_clamp_to_bounds() {
        let black = GrayImage::from_pixel(4, 4, Luma([0]));
        let heightmap = HeightmapImage::from_dynamic(&DynamicImage::ImageLuma8(black)).unwrap();
        assert_eq!(NoiseField::image(heightmap, 10.0, 8, 8, 6).height(3, 3), 1);

        let white = GrayImage::from_pixel(4, 4, Luma([255]));
        let heightmap = HeightmapImage::from_dynamic(&DynamicImage::ImageLuma8(white)).unwrap();
        assert_eq!(NoiseField::image(heightmap, 10.0, 8, 8, 6).height(3, 3), 6);
    }

    #[test]
    fn test_non_finite_elevation_scale_stays_in_bounds() {
        let gray = GrayImage::from_pixel(4, 4, Luma([128]));
        let heightmap = HeightmapImage::from_dynamic(&DynamicImage::ImageLuma8(gray)).unwrap();
        let nan = NoiseField::image(heightmap.clone(), f64::NAN, 8, 8, 6);
        assert_eq!(nan.height(2, 2), 1);
        let inf = NoiseField::image(heightmap, f64::INFINITY, 8, 8, 6);
        assert_eq!(inf.height(2, 2), 6);
    }

    #[test]
    fn test_from_config_selects_flat_when_noise_disabled() {
        let mut config = Config::default();
        config.noise.enabled = false;
        config.noise.min_column_height = 2;
        config.noise.amplitude = 1;
        let field = NoiseField::from_config(&config, 1).unwrap();
        assert!(matches!(field.source(), HeightSource::Flat { height: 3 }));
    }

    #[test]
    fn test_from_config_prefers_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(4, 4, Luma([128])).save(&path).unwrap();

        let mut config = Config::default();
        config.heightmap.image = Some(path);
        let field = NoiseField::from_config(&config, 1).unwrap();
        assert!(matches!(field.source(), HeightSource::Image { .. }));
    }
}
