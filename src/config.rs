use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::detection::edges::MAX_CLOSE_WIDTH;
use crate::error::{DetectError, Result};

/// Tunable parameters for every stage of the pipeline.
///
/// The angular band and the cluster distance were tuned on a handful of
/// shelf photos; expect to adjust them for other imagery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Bilateral window diameter; 0 derives it from `sigma_space`
    pub bilateral_diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,

    pub canny_low: u32,
    pub canny_high: u32,
    /// Width of the 1×N horizontal closing element
    pub morph_kernel_width: u32,

    pub hough_rho: f32,
    pub hough_theta_deg: f32,
    pub hough_vote_threshold: u32,
    pub hough_min_length: u32,
    pub hough_max_gap: u32,

    pub vertical_angle_min_deg: f64,
    pub vertical_angle_max_deg: f64,

    pub cluster_distance_px: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bilateral_diameter: 9,
            sigma_color: 75.0,
            sigma_space: 75.0,
            canny_low: 50,
            canny_high: 150,
            morph_kernel_width: 5,
            hough_rho: 2.0,
            hough_theta_deg: 1.0,
            hough_vote_threshold: 100,
            hough_min_length: 200,
            hough_max_gap: 5,
            vertical_angle_min_deg: 75.0,
            vertical_angle_max_deg: 105.0,
            cluster_distance_px: 20,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma_color >= 0.0 && self.sigma_space >= 0.0) {
            return Err(invalid("bilateral sigmas must be non-negative"));
        }
        if self.canny_low > self.canny_high {
            return Err(invalid(format!(
                "canny_low ({}) exceeds canny_high ({})",
                self.canny_low, self.canny_high
            )));
        }
        if self.morph_kernel_width == 0 || self.morph_kernel_width > MAX_CLOSE_WIDTH {
            return Err(invalid(format!(
                "morph_kernel_width must be in 1..={}, got {}",
                MAX_CLOSE_WIDTH, self.morph_kernel_width
            )));
        }
        if !(self.hough_rho > 0.0) {
            return Err(invalid("hough_rho must be positive"));
        }
        if !(self.hough_theta_deg > 0.0 && self.hough_theta_deg <= 180.0) {
            return Err(invalid("hough_theta_deg must be in (0, 180]"));
        }
        if !(self.vertical_angle_min_deg <= self.vertical_angle_max_deg) {
            return Err(invalid(format!(
                "vertical angle band is empty: [{}, {}]",
                self.vertical_angle_min_deg, self.vertical_angle_max_deg
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> DetectError {
    DetectError::InvalidConfig(message.into())
}
