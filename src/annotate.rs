use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::models::Detection;

const BOUNDARY_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const GAP_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const LABEL_COLOR: Rgb<u8> = Rgb([20, 255, 57]);

/// Horizontal offset of a gap label from the gap midpoint
pub const LABEL_OFFSET: i32 = 10;

/// Draw a detection onto a copy of the region it came from.
///
/// Boundaries become 2 px vertical lines over the full height; each gap is a
/// horizontal span at mid-height with a marker at its label anchor.
pub fn annotate(roi: &DynamicImage, detection: &Detection) -> RgbImage {
    let mut canvas = roi.to_rgb8();
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return canvas;
    }

    for &x in &detection.boundaries {
        draw_filled_rect_mut(&mut canvas, Rect::at(x - 1, 0).of_size(2, height), BOUNDARY_COLOR);
    }

    let mid_y = (height / 2) as f32;
    for gap in &detection.gaps {
        draw_line_segment_mut(
            &mut canvas,
            (gap.start_x as f32, mid_y),
            (gap.end_x as f32, mid_y),
            GAP_COLOR,
        );
        let (ax, ay) = gap.label_anchor(height, LABEL_OFFSET);
        draw_filled_rect_mut(&mut canvas, Rect::at(ax - 1, ay - 4).of_size(3, 9), LABEL_COLOR);
    }

    canvas
}
