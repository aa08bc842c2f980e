use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, RgbImage};
use std::path::Path;

use crate::annotate::annotate;
use crate::config::PipelineConfig;
use crate::error::{DetectError, Result};
use crate::models::Detection;
use crate::pipeline::detect_boundaries;
use crate::roi::Roi;

/// Largest display size an image is scaled down (or up) to fit.
pub const DEFAULT_MAX_DISPLAY: (u32, u32) = (800, 600);

/// State an interactive front end keeps between user actions.
///
/// Holds the loaded image, the ratio between display and image pixels, and
/// the region picked by dragging a rectangle on the displayed image.
#[derive(Debug, Clone)]
pub struct ShelfSession {
    image: DynamicImage,
    scale_ratio: f64,
    selection: Option<Roi>,
}

/// Outcome of processing the current selection
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub roi: Roi,
    pub detection: Detection,
    pub annotated: RgbImage,
}

impl ShelfSession {
    pub fn new(image: DynamicImage) -> Result<Self> {
        let (max_w, max_h) = DEFAULT_MAX_DISPLAY;
        Self::with_display_size(image, max_w, max_h)
    }

    pub fn with_display_size(image: DynamicImage, max_width: u32, max_height: u32) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || max_width == 0 || max_height == 0 {
            return Err(DetectError::InvalidInput(format!(
                "cannot display a {}x{} image in {}x{}",
                width, height, max_width, max_height
            )));
        }
        let scale_ratio =
            (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
        Ok(Self {
            image,
            scale_ratio,
            selection: None,
        })
    }

    /// Load an image file into a fresh session
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let image = ImageReader::open(path)?
            .decode()
            .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
        Ok(Self::new(image)?)
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn scale_ratio(&self) -> f64 {
        self.scale_ratio
    }

    pub fn display_size(&self) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        (
            ((width as f64 * self.scale_ratio) as u32).max(1),
            ((height as f64 * self.scale_ratio) as u32).max(1),
        )
    }

    /// The image resized for display
    pub fn display_image(&self) -> DynamicImage {
        let (width, height) = self.display_size();
        self.image.resize_exact(width, height, FilterType::Triangle)
    }

    /// Map a display position to image pixels, clamped to the image.
    pub fn canvas_to_image(&self, x: f64, y: f64) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        let ix = (x / self.scale_ratio).max(0.0) as u32;
        let iy = (y / self.scale_ratio).max(0.0) as u32;
        (ix.min(width), iy.min(height))
    }

    /// Turn a drag from `start` to `end` (display coordinates) into the
    /// current selection. A degenerate drag leaves the old selection alone.
    pub fn select(&mut self, start: (f64, f64), end: (f64, f64)) -> Result<Roi> {
        let (x1, y1) = self.canvas_to_image(start.0, start.1);
        let (x2, y2) = self.canvas_to_image(end.0, end.1);
        let roi = Roi::new(y1.min(y2), y1.max(y2), x1.min(x2), x1.max(x2));

        let (width, height) = self.image.dimensions();
        roi.validate(width, height)?;
        self.selection = Some(roi);
        Ok(roi)
    }

    pub fn selection(&self) -> Option<Roi> {
        self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Run the pipeline on the selected region and render the result.
    pub fn process(&self, config: &PipelineConfig) -> Result<SessionResult> {
        let roi = self.selection.ok_or_else(|| {
            DetectError::InvalidInput("select a shelf region before processing".to_string())
        })?;
        let region = roi.crop(&self.image)?;
        let detection = detect_boundaries(&region, config)?;
        let annotated = annotate(&region, &detection);
        Ok(SessionResult {
            roi,
            detection,
            annotated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: u32, height: u32) -> ShelfSession {
        ShelfSession::new(DynamicImage::ImageRgb8(RgbImage::new(width, height))).unwrap()
    }

    #[test]
    fn scale_fits_the_tighter_dimension() {
        let s = session(1600, 600);
        assert_eq!(s.scale_ratio(), 0.5);
        assert_eq!(s.display_size(), (800, 300));
    }

    #[test]
    fn canvas_maps_back_to_image_pixels() {
        let s = session(1600, 1200);
        assert_eq!(s.canvas_to_image(100.0, 50.0), (200, 100));
        assert_eq!(s.canvas_to_image(-5.0, 700.0), (0, 1200));
    }

    #[test]
    fn drag_in_any_direction_gives_same_roi() {
        let mut s = session(1600, 1200);
        let a = s.select((300.0, 400.0), (100.0, 50.0)).unwrap();
        let b = s.select((100.0, 50.0), (300.0, 400.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Roi::new(100, 800, 200, 600));
        assert_eq!(s.selection(), Some(a));
    }

    #[test]
    fn degenerate_drag_is_rejected() {
        let mut s = session(800, 600);
        s.select((10.0, 10.0), (100.0, 100.0)).unwrap();
        assert!(s.select((50.0, 10.0), (50.0, 300.0)).is_err());
        assert_eq!(s.selection(), Some(Roi::new(10, 100, 10, 100)));
    }

    #[test]
    fn processing_without_selection_fails() {
        let s = session(100, 100);
        assert!(matches!(
            s.process(&PipelineConfig::default()),
            Err(DetectError::InvalidInput(_))
        ));
    }
}
