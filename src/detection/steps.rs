use crate::detection::{edges, preprocessing};
use crate::pipeline::{PipelineContext, PipelineStep};
use image::GrayImage;

/// Edge-preserving bilateral smoothing
pub struct BilateralStep {
    pub diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl PipelineStep for BilateralStep {
    fn process(&self, image: GrayImage, _context: &PipelineContext) -> GrayImage {
        preprocessing::bilateral_filter(&image, self.diameter, self.sigma_color, self.sigma_space)
    }

    fn name(&self) -> &str {
        "Bilateral Smoothing"
    }
}

/// Emphasize vertical structure with the horizontal-gradient kernel
pub struct HorizontalGradientStep;

impl PipelineStep for HorizontalGradientStep {
    fn process(&self, image: GrayImage, _context: &PipelineContext) -> GrayImage {
        preprocessing::horizontal_gradient(&image)
    }

    fn name(&self) -> &str {
        "Horizontal Gradient"
    }
}

/// Detect edges using Canny
pub struct EdgeDetectionStep {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, image: GrayImage, _context: &PipelineContext) -> GrayImage {
        edges::detect_edges(&image, self.low_threshold, self.high_threshold)
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Close small horizontal breaks in edge strokes
pub struct HorizontalCloseStep {
    pub kernel_width: u32,
}

impl PipelineStep for HorizontalCloseStep {
    fn process(&self, image: GrayImage, _context: &PipelineContext) -> GrayImage {
        edges::close_horizontal(&image, self.kernel_width)
    }

    fn name(&self) -> &str {
        "Horizontal Closing"
    }
}

/// Final 3x3 Gaussian low-pass before line detection
pub struct LowPassStep;

impl PipelineStep for LowPassStep {
    fn process(&self, image: GrayImage, _context: &PipelineContext) -> GrayImage {
        edges::low_pass(&image)
    }

    fn name(&self) -> &str {
        "Low Pass"
    }
}
