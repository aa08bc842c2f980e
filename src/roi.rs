use image::{DynamicImage, GenericImageView};
use serde::Serialize;

use crate::error::{DetectError, Result};

/// Rectangular region of a source image, half-open on `bottom` and `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Roi {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Roi {
    pub fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// The whole image as one region
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, height, 0, width)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check `0 <= top < bottom <= height` and `0 <= left < right <= width`.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if self.top >= self.bottom || self.left >= self.right {
            return Err(DetectError::InvalidInput(format!(
                "malformed region bounds: top={} bottom={} left={} right={}",
                self.top, self.bottom, self.left, self.right
            )));
        }
        if self.bottom > height || self.right > width {
            return Err(DetectError::InvalidInput(format!(
                "region {}..{} x {}..{} exceeds image {}x{}",
                self.left, self.right, self.top, self.bottom, width, height
            )));
        }
        Ok(())
    }

    /// Copy the region out of `image` after validating the bounds.
    pub fn crop(&self, image: &DynamicImage) -> Result<DynamicImage> {
        let (width, height) = image.dimensions();
        self.validate(width, height)?;
        Ok(image.crop_imm(self.left, self.top, self.width(), self.height()))
    }

    /// Full-width bands between consecutive shelf lines.
    ///
    /// Lines are sorted and deduplicated; lines past the bottom of the image
    /// are clamped to it, and empty bands are skipped.
    pub fn bands(shelf_lines: &[u32], width: u32, height: u32) -> Vec<Roi> {
        let mut lines: Vec<u32> = shelf_lines.iter().map(|&y| y.min(height)).collect();
        lines.sort_unstable();
        lines.dedup();

        lines
            .windows(2)
            .map(|pair| Roi::new(pair[0], pair[1], 0, width))
            .filter(|roi| roi.height() > 0 && roi.width() > 0)
            .collect()
    }
}

impl std::str::FromStr for Roi {
    type Err = String;

    /// Parse `top,bottom,left,right`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| format!("invalid region '{}': {}", s, e))?;
        match parts.as_slice() {
            [top, bottom, left, right] => Ok(Roi::new(*top, *bottom, *left, *right)),
            _ => Err(format!(
                "expected top,bottom,left,right but got {} values",
                parts.len()
            )),
        }
    }
}
