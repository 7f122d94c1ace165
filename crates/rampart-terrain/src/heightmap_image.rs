//! Grayscale heightmap lookup with bilinear sampling.

use std::path::Path;

use image::DynamicImage;

use crate::error::TerrainError;

/// A grayscale lookup table decoded from an image.
///
/// Samples are stored normalized to `[0.0, 1.0]` in row-major order.
#[derive(Clone, Debug)]
pub struct HeightmapImage {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl HeightmapImage {
    /// Open and decode an image file, converting it to luma.
    pub fn open(path: &Path) -> Result<Self, TerrainError> {
        let image = image::open(path).map_err(|source| TerrainError::HeightmapLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let heightmap = Self::from_dynamic(&image)?;
        tracing::debug!(
            path = %path.display(),
            width = heightmap.width,
            height = heightmap.height,
            "Loaded heightmap image"
        );
        Ok(heightmap)
    }

    /// Convert an already decoded image.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, TerrainError> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyHeightmap);
        }
        let samples = luma.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn texel(&self, x: u32, y: u32) -> f32 {
        self.samples[(y * self.width + x) as usize]
    }

    /// Sample at normalized coordinates with bilinear filtering.
    ///
    /// `u` and `v` are clamped to `[0, 1]`; `0` maps to the first pixel
    /// centre and `1` to the last.
    pub fn sample_bilinear(&self, u: f64, v: f64) -> f64 {
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f64;
        let fy = v.clamp(0.0, 1.0) * (self.height - 1) as f64;

        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let top = lerp(self.texel(x0, y0) as f64, self.texel(x1, y0) as f64, tx);
        let bottom = lerp(self.texel(x0, y1) as f64, self.texel(x1, y1) as f64, tx);
        lerp(top, bottom, ty)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
