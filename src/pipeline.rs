use image::{DynamicImage, GenericImageView, GrayImage};
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::detection::steps::{
    BilateralStep, EdgeDetectionStep, HorizontalCloseStep, HorizontalGradientStep, LowPassStep,
};
use crate::detection::{
    AngleBand, HoughParams, detect_segments, filter_vertical, group_close_lines, preprocessing,
    report_gaps,
};
use crate::error::{DetectError, Result};
use crate::models::Detection;
use crate::roi::Roi;

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Write one intermediate raster as `<output_dir>/<step_dir>/<item>.png`
    fn save(&self, step_dir: &str, item: usize, image: &DynamicImage) -> Result<()> {
        let dir = self.output_dir.join(step_dir);
        std::fs::create_dir_all(&dir)?;
        let filename = format!("{:02}.png", item + 1);
        image.save(dir.join(&filename))?;
        debug!("saved {}/{}", step_dir, filename);
        Ok(())
    }
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// A raster stage between the grayscale ROI and the edge mask
pub trait PipelineStep: Send + Sync {
    fn process(&self, image: GrayImage, context: &PipelineContext) -> GrayImage;

    /// Human-readable name, also used for the debug directory
    fn name(&self) -> &str;
}

fn step_dir_name(index: usize, name: &str) -> String {
    format!("{:02}_{}", index, name.to_lowercase().replace(' ', "_"))
}

/// The boundary detection pipeline.
///
/// Raster steps turn a region into an edge mask; line detection, the angle
/// filter, clustering and gap reporting then run on that mask. A pipeline
/// holds no per-run state, so one instance can serve any number of regions,
/// including from several threads at once.
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    config: PipelineConfig,
    context: PipelineContext,
}

impl Pipeline {
    /// Build the standard pipeline for `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let steps: Vec<Arc<dyn PipelineStep>> = vec![
            Arc::new(BilateralStep {
                diameter: config.bilateral_diameter,
                sigma_color: config.sigma_color,
                sigma_space: config.sigma_space,
            }),
            Arc::new(HorizontalGradientStep),
            Arc::new(EdgeDetectionStep {
                low_threshold: config.canny_low as f32,
                high_threshold: config.canny_high as f32,
            }),
            Arc::new(HorizontalCloseStep {
                kernel_width: config.morph_kernel_width,
            }),
            Arc::new(LowPassStep),
        ];
        Ok(Self {
            steps,
            config,
            context: PipelineContext::default(),
        })
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(DetectError::InvalidInput(format!(
                    "debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Replace the raster steps, e.g. to skip smoothing on synthetic input
    pub fn with_steps(mut self, steps: Vec<Arc<dyn PipelineStep>>) -> Self {
        self.steps = steps;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn debug_dir(&self) -> Option<&Path> {
        self.context.debug.as_ref().map(|d| d.output_dir.as_path())
    }

    /// Run the raster steps and return the edge mask fed to line detection.
    ///
    /// `item` numbers the debug images when several regions share a run.
    pub fn edge_mask(&self, roi: &DynamicImage, item: usize) -> Result<GrayImage> {
        let (width, height) = roi.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidInput(format!(
                "region has zero area ({}x{})",
                width, height
            )));
        }

        if let Some(debug_config) = &self.context.debug {
            debug_config.save("00_input", item, roi)?;
        }

        let mut image = preprocessing::to_grayscale(roi);
        for (step_idx, step) in self.steps.iter().enumerate() {
            debug!("running step: {}", step.name());
            image = step.process(image, &self.context);

            if let Some(debug_config) = &self.context.debug {
                let step_dir = step_dir_name(step_idx + 1, step.name());
                debug_config.save(&step_dir, item, &DynamicImage::ImageLuma8(image.clone()))?;
            }
        }
        Ok(image)
    }

    /// Detect boundaries and gaps in one region.
    pub fn run(&self, roi: &DynamicImage) -> Result<Detection> {
        self.run_item(roi, 0)
    }

    fn run_item(&self, roi: &DynamicImage, item: usize) -> Result<Detection> {
        let mask = self.edge_mask(roi, item)?;

        let segments = detect_segments(&mask, &HoughParams::from(&self.config));
        debug!("line detection: {} segments", segments.len());

        let vertical = filter_vertical(&segments, AngleBand::from(&self.config));
        debug!("angle filter: kept {} of {}", vertical.len(), segments.len());

        let grouped = group_close_lines(&vertical, self.config.cluster_distance_px);
        let (boundaries, gaps) = report_gaps(&grouped);
        debug!("{} boundaries, {} gaps", boundaries.len(), gaps.len());

        Ok(Detection { boundaries, gaps })
    }

    /// Run every region of `image` in order, one detection per region.
    ///
    /// All bounds are checked before any region is processed.
    pub fn run_shelves(&self, image: &DynamicImage, rois: &[Roi]) -> Result<Vec<Detection>> {
        let (width, height) = image.dimensions();
        for roi in rois {
            roi.validate(width, height)?;
        }

        rois.iter()
            .enumerate()
            .map(|(item, roi)| {
                debug!("shelf {}: {:?}", item + 1, roi);
                self.run_item(&roi.crop(image)?, item)
            })
            .collect()
    }
}

/// Detect boundaries in a region with the given configuration.
pub fn detect_boundaries(roi: &DynamicImage, config: &PipelineConfig) -> Result<Detection> {
    Pipeline::new(config.clone())?.run(roi)
}

/// Detect boundaries in each region of `image`.
pub fn detect_shelves(
    image: &DynamicImage,
    rois: &[Roi],
    config: &PipelineConfig,
) -> Result<Vec<Detection>> {
    Pipeline::new(config.clone())?.run_shelves(image, rois)
}
