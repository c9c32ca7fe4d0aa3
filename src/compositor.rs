//! Core compositing pipeline: placement sampling, sprite rotation, alpha
//! blending, and pixel noise.
//!
//! The pipeline is single-threaded and synchronous; each image is produced
//! to completion before the next begins. All randomness comes from the
//! compositor's own generator, seeded from [`GeneratorConfig::seed`], so two
//! compositors never interfere with each other's reproducibility.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GenerateError;
use crate::ports::AssetProvider;

/// Generation parameters. Immutable after construction.
///
/// Values are not validated here; callers are expected to check
/// `min_cells <= max_cells` and positive dimensions up front (see
/// `params`). Violations panic in the underlying range sampling.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Output image height in pixels.
    pub img_height: u32,
    /// Output image width in pixels.
    pub img_width: u32,
    /// Number of images to generate.
    pub num_imgs: u32,
    /// Minimum sprite count per image (inclusive).
    pub min_cells: u32,
    /// Maximum sprite count per image (inclusive).
    pub max_cells: u32,
    /// Seed for the compositor's generator; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            img_height: 480,
            img_width: 640,
            num_imgs: 5,
            min_cells: 5,
            max_cells: 25,
            seed: None,
        }
    }
}

/// Top-left anchor for a sprite overlay, in background coordinates.
///
/// Sampled before the rotated sprite size is known, so the overlay may hang
/// past the southeast edge; [`alpha_blend`] clips it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Row offset into the background grid.
    pub row: u32,
    /// Column offset into the background grid.
    pub col: u32,
}

/// Produces synthetic raster images from a background/sprite source.
pub struct Compositor {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Compositor {
    /// Build a compositor, seeding its generator from the config.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Generate exactly `num_imgs` images.
    ///
    /// # Errors
    ///
    /// Returns an error as soon as any provider path fails to decode; the
    /// run is not resumed or retried.
    pub fn generate(
        &mut self,
        provider: &mut dyn AssetProvider,
    ) -> Result<Vec<RgbImage>, GenerateError> {
        let mut images = Vec::with_capacity(self.config.num_imgs as usize);
        for _ in 0..self.config.num_imgs {
            images.push(self.generate_image(provider)?);
        }
        Ok(images)
    }

    /// Generate one synthetic image.
    ///
    /// The draw order on the compositor's generator is fixed and part of the
    /// seeded-reproducibility contract: sprite count, all placements, then
    /// per sprite transparency / scale / angle, then the noise percentage
    /// and the per-pixel noise draws. Per-sprite draws happen even when the
    /// sprite turns out to carry no alpha channel, so the stream does not
    /// depend on asset file formats.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::AssetLoad`] when a provider path fails to
    /// decode.
    pub fn generate_image(
        &mut self,
        provider: &mut dyn AssetProvider,
    ) -> Result<RgbImage, GenerateError> {
        let cell_count = self.rng.gen_range(self.config.min_cells..=self.config.max_cells);
        let placements = self.sample_placements(cell_count);

        let mut background = self.load_background(&provider.random_background())?;

        for placement in placements {
            let cell = load_raster(&provider.random_cell())?;
            self.overlay_sprite(&mut background, &cell, placement);
        }

        let percent = self.rng.gen_range(1.0..50.0);
        apply_noise(&mut background, percent, &mut self.rng);

        Ok(background)
    }

    /// Sample `count` placements, uniform with replacement.
    ///
    /// Rows stay in `[0, H - ceil(0.01 * H)]` and columns in
    /// `[0, W - ceil(0.01 * W)]`, both inclusive, so every anchor lands
    /// strictly inside the background.
    fn sample_placements(&mut self, count: u32) -> Vec<Placement> {
        let row_max = self.config.img_height - self.config.img_height.div_ceil(100);
        let col_max = self.config.img_width - self.config.img_width.div_ceil(100);
        (0..count)
            .map(|_| Placement {
                row: self.rng.gen_range(0..=row_max),
                col: self.rng.gen_range(0..=col_max),
            })
            .collect()
    }

    /// Decode a background and resize it to the configured dimensions.
    fn load_background(&self, path: &Path) -> Result<RgbImage, GenerateError> {
        let decoded = load_raster(path)?;
        Ok(decoded
            .resize_exact(self.config.img_width, self.config.img_height, FilterType::Triangle)
            .to_rgb8())
    }

    /// Scale, rotate, and blend one sprite onto the background.
    ///
    /// The sprite is resized to a square with side
    /// `round_2(uniform(0.05, 0.20)) * min(H, W)` pixels, rotated by a
    /// uniform integer angle in `[0, 360]` (0 and 360 are both drawn; they
    /// render identically), and blended with a transparency multiplier
    /// uniform in `[0.6, 1.0]`.
    ///
    /// Sprites decoded without an alpha channel are skipped silently: their
    /// random numbers are drawn, but nothing is blended.
    fn overlay_sprite(
        &mut self,
        background: &mut RgbImage,
        cell: &DynamicImage,
        placement: Placement,
    ) {
        let transparency = self.rng.gen_range(0.6..1.0);
        let scale = round_2(self.rng.gen_range(0.05..0.20));
        let side = (f64::from(self.config.img_height.min(self.config.img_width)) * scale) as u32;
        let angle = self.rng.gen_range(0..=360_u32);

        if !cell.color().has_alpha() {
            return;
        }

        let sprite = cell.resize_exact(side, side, FilterType::Triangle).to_rgba8();
        let rotated = rotate_sprite(&sprite, f64::from(angle));
        alpha_blend(background, &rotated, placement, transparency);
    }
}

/// Decode a raster file, preserving any alpha channel.
fn load_raster(path: &Path) -> Result<DynamicImage, GenerateError> {
    image::open(path)
        .map_err(|source| GenerateError::AssetLoad { path: path.to_path_buf(), source })
}

/// Rotate a sprite about its center, expanding the canvas to the minimal
/// bounding box that holds the rotated content.
///
/// The bounding box follows from the absolute cosine/sine of the rotation
/// matrix, so nothing is clipped by the rotation itself. Regions exposed
/// outside the original silhouette are transparent black. Sampling is
/// inverse-mapped bilinear with source and destination centers aligned; at
/// angle 0 the output equals the input bit for bit.
#[must_use]
pub fn rotate_sprite(sprite: &RgbaImage, angle_degrees: f64) -> RgbaImage {
    let (w, h) = sprite.dimensions();
    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();

    let new_w = (f64::from(h) * sin.abs() + f64::from(w) * cos.abs()) as u32;
    let new_h = (f64::from(h) * cos.abs() + f64::from(w) * sin.abs()) as u32;

    let src_cx = f64::from(w.saturating_sub(1)) / 2.0;
    let src_cy = f64::from(h.saturating_sub(1)) / 2.0;
    let dst_cx = f64::from(new_w.saturating_sub(1)) / 2.0;
    let dst_cy = f64::from(new_h.saturating_sub(1)) / 2.0;

    let mut rotated = RgbaImage::new(new_w, new_h);
    for (x, y, pixel) in rotated.enumerate_pixels_mut() {
        let dx = f64::from(x) - dst_cx;
        let dy = f64::from(y) - dst_cy;
        // Inverse of a counter-clockwise rotation in image coordinates.
        let sx = cos * dx - sin * dy + src_cx;
        let sy = sin * dx + cos * dy + src_cy;
        *pixel = sample_bilinear(sprite, sx, sy);
    }
    rotated
}

/// Bilinear sample with a transparent-black border outside the image.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let fx = x - x.floor();
    let fy = y - y.floor();
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let fetch = |ix: i64, iy: i64| -> [f64; 4] {
        if ix < 0 || iy < 0 || ix >= i64::from(image.width()) || iy >= i64::from(image.height()) {
            [0.0; 4]
        } else {
            let p = image.get_pixel(ix as u32, iy as u32);
            [f64::from(p[0]), f64::from(p[1]), f64::from(p[2]), f64::from(p[3])]
        }
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round() as u8;
    }
    Rgba(out)
}

/// Blend a sprite onto the background at `placement`, in place.
///
/// Overhang past the southeast edge is clipped to fit (anchors are never
/// negative, so no other edge can overhang); there is no wraparound and no
/// out-of-bounds write. Per pixel, the blend factor is
/// `(alpha / 255) * transparency` and each color channel becomes
/// `(1 - factor) * background + factor * sprite`, truncated to `u8`.
pub fn alpha_blend(
    background: &mut RgbImage,
    sprite: &RgbaImage,
    placement: Placement,
    transparency: f64,
) {
    let (bg_w, bg_h) = background.dimensions();
    if placement.row >= bg_h || placement.col >= bg_w {
        return;
    }
    let clip_h = sprite.height().min(bg_h - placement.row);
    let clip_w = sprite.width().min(bg_w - placement.col);

    for y in 0..clip_h {
        for x in 0..clip_w {
            let sp = sprite.get_pixel(x, y);
            let factor = f64::from(sp[3]) / 255.0 * transparency;
            let bp = background.get_pixel_mut(placement.col + x, placement.row + y);
            for c in 0..3 {
                let blended = (1.0 - factor) * f64::from(bp[c]) + factor * f64::from(sp[c]);
                bp[c] = blended as u8;
            }
        }
    }
}

/// Replace pixels with uniform random RGB triples, in place.
///
/// Every pixel is an independent Bernoulli trial with probability
/// `percent / 100`; a hit replaces all three channels with independently
/// drawn bytes, not one coherent color. At 0 the image is untouched, at 100
/// every pixel is replaced.
pub fn apply_noise(image: &mut RgbImage, percent: f64, rng: &mut StdRng) {
    let probability = percent / 100.0;
    for pixel in image.pixels_mut() {
        if rng.gen::<f64>() < probability {
            *pixel = Rgb([rng.gen(), rng.gen(), rng.gen()]);
        }
    }
}

/// Round to two decimal places. Sprite scales are quantized this way before
/// being applied.
fn round_2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
