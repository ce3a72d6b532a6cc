//! Raw image statistics for screen classification

use crate::config::ScreenConfig;
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use serde::{Deserialize, Serialize};

/// Stateless per-frame screen statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenFeatures {
    /// Grayscale mean, 0..255
    pub avg_brightness: f32,
    /// Saturation channel standard deviation, 0..255
    pub color_std: f32,
    /// Fraction of Canny edge pixels
    pub edge_density: f32,
    /// Fraction of pixels below the dark cutoff
    pub dark_ratio: f32,
    /// 1 − std(blurred grayscale)/128; high for flat/video-like frames
    pub uniformity: f32,
}

impl ScreenFeatures {
    /// Compute all statistics for a decoded frame, downscaling first
    pub fn compute(image: &DynamicImage, config: &ScreenConfig) -> Self {
        let image = downscale(image, config.max_width);
        let gray = image.to_luma8();

        let total = (gray.width() * gray.height()) as f32;

        let mut sum = 0.0f64;
        let mut dark = 0u32;
        for pixel in gray.pixels() {
            sum += pixel.0[0] as f64;
            if pixel.0[0] < config.dark_pixel {
                dark += 1;
            }
        }
        let avg_brightness = (sum / total as f64) as f32;
        let dark_ratio = dark as f32 / total;

        let edges = canny(&gray, config.canny_low, config.canny_high);
        let edge_pixels = edges.pixels().filter(|p| p.0[0] > 0).count();
        let edge_density = edge_pixels as f32 / total;

        let blurred = gaussian_blur_f32(&gray, config.blur_sigma);
        let uniformity = 1.0 - std_dev(&blurred) / 128.0;

        let color_std = saturation_std(&image);

        Self {
            avg_brightness,
            color_std,
            edge_density,
            dark_ratio,
            uniformity,
        }
    }
}

fn downscale(image: &DynamicImage, max_width: u32) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    if w <= max_width {
        return image.clone();
    }
    let new_h = ((h as u64 * max_width as u64) / w as u64).max(1) as u32;
    image.resize_exact(max_width, new_h, image::imageops::FilterType::Triangle)
}

fn std_dev(gray: &GrayImage) -> f32 {
    let n = (gray.width() * gray.height()) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for pixel in gray.pixels() {
        let v = pixel.0[0] as f64;
        sum += v;
        sum_sq += v * v;
    }
    let mean = sum / n;
    ((sum_sq / n - mean * mean).max(0.0)).sqrt() as f32
}

/// Standard deviation of the HSV saturation channel (0..255 scale)
fn saturation_std(image: &DynamicImage) -> f32 {
    let rgb = image.to_rgb8();
    let n = (rgb.width() * rgb.height()) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        let max = r.max(g).max(b) as f64;
        let min = r.min(g).min(b) as f64;
        let s = if max > 0.0 {
            255.0 * (max - min) / max
        } else {
            0.0
        };
        sum += s;
        sum_sq += s * s;
    }
    let mean = sum / n;
    ((sum_sq / n - mean * mean).max(0.0)).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_black_frame_stats() {
        let stats = ScreenFeatures::compute(&solid(64, 48, [0, 0, 0]), &ScreenConfig::default());
        assert_eq!(stats.avg_brightness, 0.0);
        assert_eq!(stats.dark_ratio, 1.0);
        assert_eq!(stats.edge_density, 0.0);
        assert_eq!(stats.color_std, 0.0);
        assert!((stats.uniformity - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_solid_color_is_uniform_with_zero_color_std() {
        let stats =
            ScreenFeatures::compute(&solid(64, 48, [250, 10, 10]), &ScreenConfig::default());
        // Constant saturation: mean is high but the deviation is zero
        assert_eq!(stats.color_std, 0.0);
        assert!(stats.uniformity > 0.95);
        assert_eq!(stats.dark_ratio, 0.0);
    }

    #[test]
    fn test_wide_frame_downscaled() {
        let image = solid(1280, 720, [128, 128, 128]);
        let scaled = downscale(&image, 640);
        assert_eq!(scaled.width(), 640);
        assert_eq!(scaled.height(), 360);
    }

    #[test]
    fn test_narrow_frame_untouched() {
        let image = solid(320, 240, [128, 128, 128]);
        let scaled = downscale(&image, 640);
        assert_eq!((scaled.width(), scaled.height()), (320, 240));
    }

    #[test]
    fn test_checkerboard_has_edges() {
        let mut img = image::RgbImage::new(64, 64);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let on = ((x / 8) + (y / 8)) % 2 == 0;
            *pixel = if on { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) };
        }
        let stats = ScreenFeatures::compute(
            &DynamicImage::ImageRgb8(img),
            &ScreenConfig::default(),
        );
        assert!(stats.edge_density > 0.0);
        assert!(stats.dark_ratio > 0.4);
    }
}
