use serde::Serialize;

/// A straight segment reported by the line detector, in ROI-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Direction of the segment in degrees, in (-180, 180]
    pub fn angle_deg(&self) -> f64 {
        let dy = (self.y2 - self.y1) as f64;
        let dx = (self.x2 - self.x1) as f64;
        dy.atan2(dx).to_degrees()
    }

    /// Horizontal midpoint, floored
    pub fn mid_x(&self) -> i32 {
        (self.x1 + self.x2).div_euclid(2)
    }

    pub fn length(&self) -> f64 {
        let dx = (self.x2 - self.x1) as f64;
        let dy = (self.y2 - self.y1) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A detected divider between two books: an x-position in the ROI.
pub type Boundary = i32;

/// Distance between two horizontally adjacent boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GapRecord {
    pub start_x: Boundary,
    pub end_x: Boundary,
    pub width: i32,
}

impl GapRecord {
    pub fn new(start_x: Boundary, end_x: Boundary) -> Self {
        Self {
            start_x,
            end_x,
            width: end_x - start_x,
        }
    }

    pub fn mid_x(&self) -> i32 {
        (self.start_x + self.end_x).div_euclid(2)
    }

    /// Where a display layer places the gap label: `(mid_x - offset, roi_height / 2)`
    pub fn label_anchor(&self, roi_height: u32, offset: i32) -> (i32, i32) {
        (self.mid_x() - offset, (roi_height / 2) as i32)
    }
}

/// Result of one pipeline run over one ROI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detection {
    /// Boundary positions, ascending
    pub boundaries: Vec<Boundary>,
    /// Gaps between consecutive boundaries, left to right
    pub gaps: Vec<GapRecord>,
}

impl Detection {
    pub fn gap_count(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_segment_angles() {
        assert_eq!(LineSegment::new(10, 0, 10, 50).angle_deg(), 90.0);
        assert_eq!(LineSegment::new(10, 50, 10, 0).angle_deg(), -90.0);
        assert_eq!(LineSegment::new(0, 0, 10, 0).angle_deg(), 0.0);
        assert_eq!(LineSegment::new(10, 0, 0, 0).angle_deg(), 180.0);
    }

    #[test]
    fn midpoint_floors() {
        assert_eq!(LineSegment::new(100, 0, 103, 200).mid_x(), 101);
        assert_eq!(LineSegment::new(100, 0, 100, 200).mid_x(), 100);
    }

    #[test]
    fn label_anchor_sits_mid_height() {
        let gap = GapRecord::new(100, 200);
        assert_eq!(gap.width, 100);
        assert_eq!(gap.label_anchor(300, 10), (140, 150));
    }
}
