use image::{DynamicImage, GrayImage, Luma};
use imageproc::gradients::horizontal_sobel;

use crate::config::PipelineConfig;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Edge-preserving smoothing.
///
/// Each output pixel is the average of a circular neighbourhood weighted by
/// both spatial distance and intensity difference, so flat texture is
/// smoothed while strong steps between spines survive. A `diameter` of 0
/// derives the window radius from `sigma_space`.
pub fn bilateral_filter(
    img: &GrayImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let sigma_color = if sigma_color <= 0.0 { 1.0 } else { sigma_color };
    let sigma_space = if sigma_space <= 0.0 { 1.0 } else { sigma_space };
    let radius = match diameter {
        0 => (sigma_space * 1.5).round() as i32,
        d => (d / 2) as i32,
    };
    let radius = radius.max(1);

    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let color_coeff = -0.5 / (sigma_color * sigma_color);

    // Offsets inside the circular window with their spatial weights
    let mut window = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            window.push((dx, dy, (r2 * space_coeff).exp()));
        }
    }

    let color_weights: Vec<f32> = (0..256)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let max_x = width as i32 - 1;
    let max_y = height as i32 - 1;

    GrayImage::from_fn(width, height, |x, y| {
        let center = img.get_pixel(x, y)[0];
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for &(dx, dy, space_weight) in &window {
            let nx = (x as i32 + dx).clamp(0, max_x) as u32;
            let ny = (y as i32 + dy).clamp(0, max_y) as u32;
            let value = img.get_pixel(nx, ny)[0];
            let weight = space_weight * color_weights[center.abs_diff(value) as usize];
            sum += value as f32 * weight;
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            Luma([(sum / weight_sum).round().clamp(0.0, 255.0) as u8])
        } else {
            Luma([center])
        }
    })
}

/// Apply the 3x3 horizontal-gradient kernel `[-1,0,1; -2,0,2; -1,0,1]`.
///
/// Responses saturate to the u8 range: dark-to-light transitions (left to
/// right) light up, the opposite polarity clips to zero.
pub fn horizontal_gradient(img: &GrayImage) -> GrayImage {
    let gradient = horizontal_sobel(img);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([gradient.get_pixel(x, y)[0].clamp(0, 255) as u8])
    })
}

/// Preprocessor stage: grayscale, bilateral smoothing, horizontal gradient.
pub fn preprocess(img: &DynamicImage, config: &PipelineConfig) -> GrayImage {
    let gray = to_grayscale(img);
    let smoothed = bilateral_filter(
        &gray,
        config.bilateral_diameter,
        config.sigma_color,
        config.sigma_space,
    );
    horizontal_gradient(&smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilateral_keeps_uniform_image() {
        let img = GrayImage::from_pixel(20, 20, Luma([90]));
        let out = bilateral_filter(&img, 9, 75.0, 75.0);
        assert!(out.pixels().all(|p| p[0] == 90));
    }

    #[test]
    fn bilateral_preserves_hard_step() {
        let img = GrayImage::from_fn(30, 10, |x, _| if x < 15 { Luma([20]) } else { Luma([230]) });
        let out = bilateral_filter(&img, 9, 30.0, 75.0);
        assert!(out.get_pixel(13, 5)[0] < 40);
        assert!(out.get_pixel(16, 5)[0] > 210);
    }

    #[test]
    fn gradient_marks_dark_to_light_step_only() {
        let dark_then_light =
            GrayImage::from_fn(20, 10, |x, _| if x < 10 { Luma([0]) } else { Luma([200]) });
        let out = horizontal_gradient(&dark_then_light);
        assert_eq!(out.get_pixel(10, 5)[0], 255);
        assert_eq!(out.get_pixel(3, 5)[0], 0);

        let light_then_dark =
            GrayImage::from_fn(20, 10, |x, _| if x < 10 { Luma([200]) } else { Luma([0]) });
        let out = horizontal_gradient(&light_then_dark);
        assert!(out.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn preprocess_keeps_dimensions() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(37, 21));
        let out = preprocess(&img, &PipelineConfig::default());
        assert_eq!(out.dimensions(), (37, 21));
    }
}
