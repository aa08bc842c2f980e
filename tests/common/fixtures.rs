use image::{DynamicImage, GrayImage, Luma};

pub const BACKGROUND: u8 = 210;
pub const SPINE: u8 = 30;
pub const SPINE_WIDTH: u32 = 6;

/// A light shelf band with a dark vertical spine edge starting at each x.
///
/// Each spine is `SPINE_WIDTH` pixels wide and runs the full height, so the
/// dark-to-light transition sits at `x + SPINE_WIDTH`.
pub fn shelf_band(width: u32, height: u32, spines: &[u32]) -> GrayImage {
    GrayImage::from_fn(width, height, |x, _| {
        let on_spine = spines.iter().any(|&s| x >= s && x < s + SPINE_WIDTH);
        Luma([if on_spine { SPINE } else { BACKGROUND }])
    })
}

/// The standard test shelf: 400x300 with spines at 100, 200 and 300.
pub fn standard_shelf() -> DynamicImage {
    DynamicImage::ImageLuma8(shelf_band(400, 300, &[100, 200, 300]))
}

/// Where the pipeline should place the boundary for a spine starting at `x`
pub fn expected_boundary(spine_x: u32) -> i32 {
    (spine_x + SPINE_WIDTH) as i32
}

/// Two bands stacked vertically, each with its own spines.
pub fn two_shelves(width: u32, band_height: u32, upper: &[u32], lower: &[u32]) -> DynamicImage {
    let top = shelf_band(width, band_height, upper);
    let bottom = shelf_band(width, band_height, lower);
    let img = GrayImage::from_fn(width, band_height * 2, |x, y| {
        if y < band_height {
            *top.get_pixel(x, y)
        } else {
            *bottom.get_pixel(x, y - band_height)
        }
    });
    DynamicImage::ImageLuma8(img)
}

pub fn assert_near(actual: &[i32], expected: &[i32], tolerance: i32) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "expected boundaries near {:?}, got {:?}",
        expected,
        actual
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() <= tolerance,
            "boundary {} is not within {} of {} (all: {:?})",
            a,
            tolerance,
            e,
            actual
        );
    }
}
