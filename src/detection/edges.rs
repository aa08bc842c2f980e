//! Binary edge extraction tuned for vertical strokes.
//!
//! Pixels are treated as set when `> 0`; morphology outputs are `0` or `255`.

use image::{GrayImage, Luma};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use imageproc::morphology::{Mask, grayscale_close};

use crate::config::PipelineConfig;

/// Widest horizontal closing element supported.
pub const MAX_CLOSE_WIDTH: u32 = 255;

/// Binomial 3-tap kernel, applied along both axes.
const LOW_PASS_KERNEL: [f32; 3] = [0.25, 0.5, 0.25];

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Morphological closing with a 1×`width` horizontal element.
///
/// Bridges horizontal breaks narrower than the element without thickening
/// strokes vertically. Columns outside the image are ignored, so strokes
/// touching the border are not eaten away. `width` must not exceed
/// [`MAX_CLOSE_WIDTH`].
pub fn close_horizontal(src: &GrayImage, width: u32) -> GrayImage {
    if width <= 1 || src.width() == 0 || src.height() == 0 {
        return src.clone();
    }
    let element = GrayImage::from_pixel(width, 1, Luma([255]));
    let mask = Mask::from_image(&element, (width / 2) as u8, 0);
    grayscale_close(src, &mask)
}

/// 3x3 Gaussian low-pass so single-pixel jitter does not split lines.
pub fn low_pass(img: &GrayImage) -> GrayImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    separable_filter_equal(img, &LOW_PASS_KERNEL)
}

/// Edge extractor stage: hysteresis edges, horizontal closing, low-pass.
pub fn extract_edges(filtered: &GrayImage, config: &PipelineConfig) -> GrayImage {
    let edges = detect_edges(filtered, config.canny_low as f32, config.canny_high as f32);
    let closed = close_horizontal(&edges, config.morph_kernel_width);
    low_pass(&closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> GrayImage {
        let width = rows[0].len() as u32;
        GrayImage::from_fn(width, rows.len() as u32, |x, y| {
            let set = rows[y as usize].as_bytes()[x as usize] == b'#';
            Luma([if set { 255 } else { 0 }])
        })
    }

    fn row_string(img: &GrayImage, y: u32) -> String {
        (0..img.width())
            .map(|x| if img.get_pixel(x, y)[0] != 0 { '#' } else { '.' })
            .collect()
    }

    #[test]
    fn closing_bridges_small_horizontal_gap() {
        let img = mask_from_rows(&["....##...##....", "...#......#...."]);
        let out = close_horizontal(&img, 5);
        assert_eq!(row_string(&out, 0), "....#######....");
        assert_eq!(row_string(&out, 1), "...#......#....");
    }

    #[test]
    fn closing_does_not_bridge_vertically() {
        let img = mask_from_rows(&["...#...", ".......", "...#..."]);
        let out = close_horizontal(&img, 5);
        assert_eq!(row_string(&out, 1), ".......");
    }

    #[test]
    fn closing_keeps_strokes_at_border() {
        let img = mask_from_rows(&["#.....#"]);
        let out = close_horizontal(&img, 5);
        assert_eq!(row_string(&out, 0), "#.....#");
    }

    #[test]
    fn width_one_is_identity() {
        let img = mask_from_rows(&["#.#..#"]);
        assert_eq!(close_horizontal(&img, 1), img);
    }

    #[test]
    fn low_pass_spreads_a_stroke_one_column_each_side() {
        let mut img = GrayImage::new(21, 9);
        for y in 0..9 {
            img.put_pixel(10, y, Luma([255]));
        }
        let out = low_pass(&img);
        let lit: Vec<u32> = (0..21).filter(|&x| out.get_pixel(x, 4)[0] != 0).collect();
        assert_eq!(lit, vec![9, 10, 11]);
        assert!(out.get_pixel(10, 4)[0] > out.get_pixel(9, 4)[0]);
    }

    #[test]
    fn low_pass_keeps_dimensions() {
        let img = GrayImage::new(7, 3);
        assert_eq!(low_pass(&img).dimensions(), (7, 3));
    }

    #[test]
    fn widest_closing_element_is_accepted() {
        let img = mask_from_rows(&["#....#"]);
        let out = close_horizontal(&img, MAX_CLOSE_WIDTH);
        assert_eq!(row_string(&out, 0), "######");
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImage::from_pixel(40, 40, Luma([0]));
        let out = extract_edges(&img, &PipelineConfig::default());
        assert!(out.pixels().all(|p| p[0] == 0));
    }
}
