use image::{GrayImage, Luma, Rgb, RgbImage};
use shelfgaps::{Pipeline, PipelineConfig, Roi, annotate};

/// Paint a two-shelf scene: books of varying widths and shades on each shelf,
/// separated by a dark shelf board.
fn build_scene() -> RgbImage {
    let (width, height) = (900, 700);
    let mut img = RgbImage::from_pixel(width, height, Rgb([225, 215, 200]));

    let shelves = [
        (20u32, 330u32, [70u32, 160, 230, 380, 470, 610, 700]),
        (370, 680, [40, 150, 300, 360, 520, 640, 800]),
    ];
    for (top, bottom, edges) in shelves {
        for (i, pair) in edges.windows(2).enumerate() {
            let shade = if i % 2 == 0 { 60 } else { 140 };
            for y in top..bottom {
                for x in pair[0]..pair[1] - 4 {
                    img.put_pixel(x, y, Rgb([shade, shade / 2, shade / 3]));
                }
            }
        }
    }
    for y in 330..370 {
        for x in 0..width {
            img.put_pixel(x, y, Rgb([90, 60, 40]));
        }
    }
    img
}

fn main() -> anyhow::Result<()> {
    let scene = image::DynamicImage::ImageRgb8(build_scene());
    scene.save("synthetic_shelf.png")?;
    println!("Created synthetic_shelf.png (900x700, two shelves)");

    let pipeline = Pipeline::new(PipelineConfig::default())?;
    let rois = Roi::bands(&[20, 330, 370, 680], 900, 700);

    // The board between the shelves forms its own band; it should come back empty
    let detections = pipeline.run_shelves(&scene, &rois)?;

    for (i, (roi, detection)) in rois.iter().zip(&detections).enumerate() {
        println!("\nBand {} (rows {}..{})", i + 1, roi.top, roi.bottom);
        println!("  boundaries: {:?}", detection.boundaries);
        for gap in &detection.gaps {
            println!("  {} -> {}: {} px", gap.start_x, gap.end_x, gap.width);
        }

        let annotated = annotate(&roi.crop(&scene)?, detection);
        let path = format!("synthetic_shelf_band_{:02}.png", i + 1);
        annotated.save(&path)?;
        println!("  saved {}", path);
    }

    // Stage-by-stage view of the first band's edge mask
    let mask: GrayImage = pipeline.edge_mask(&rois[0].crop(&scene)?, 0)?;
    let lit = mask.pixels().filter(|p| **p != Luma([0])).count();
    println!("\nEdge mask of band 1: {} lit pixels", lit);

    Ok(())
}
