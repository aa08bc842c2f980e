//! Progressive probabilistic Hough transform.
//!
//! Edge pixels are visited in a shuffled order. Each pixel votes into a
//! (theta, rho) accumulator; as soon as one bin reaches the vote threshold
//! the corridor through that pixel is walked in both directions, tolerating
//! up to `max_line_gap` missing pixels. Pixels on the walked corridor are
//! removed from the mask, and when the run is long enough their votes are
//! withdrawn and the run is reported as a segment.

use image::GrayImage;
use log::trace;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::PipelineConfig;
use crate::models::LineSegment;

/// Seed for the visiting order; fixed so detection is repeatable.
const VISIT_SEED: u64 = 0x5EED_5EED;

/// Fixed-point precision used while stepping along a corridor.
const SHIFT: u32 = 16;

#[derive(Debug, Clone, Copy)]
pub struct HoughParams {
    pub rho: f32,
    pub theta_deg: f32,
    pub vote_threshold: u32,
    pub min_line_length: u32,
    pub max_line_gap: u32,
}

impl From<&PipelineConfig> for HoughParams {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            rho: config.hough_rho,
            theta_deg: config.hough_theta_deg,
            vote_threshold: config.hough_vote_threshold,
            min_line_length: config.hough_min_length,
            max_line_gap: config.hough_max_gap,
        }
    }
}

struct Accumulator {
    num_rho: usize,
    trig: Vec<(f32, f32)>,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(width: u32, height: u32, rho: f32, theta_deg: f32) -> Self {
        let theta = theta_deg.to_radians();
        let num_angle = ((std::f32::consts::PI / theta).round() as usize).max(1);
        let num_rho = ((((width + height) * 2 + 1) as f32 / rho).round() as usize).max(1);
        let inv_rho = 1.0 / rho;
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f32 * theta;
                (angle.cos() * inv_rho, angle.sin() * inv_rho)
            })
            .collect();
        Self {
            num_rho,
            trig,
            votes: vec![0; num_angle * num_rho],
        }
    }

    fn rho_index(&self, n: usize, x: u32, y: u32) -> usize {
        let (cos_t, sin_t) = self.trig[n];
        let r = (x as f32 * cos_t + y as f32 * sin_t).round() as i64 + (self.num_rho as i64 - 1) / 2;
        r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Vote for every angle; returns the strongest bin touched and its count.
    fn vote(&mut self, x: u32, y: u32) -> (usize, u32) {
        let mut best = (0, 0);
        for n in 0..self.trig.len() {
            let idx = n * self.num_rho + self.rho_index(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.1 {
                best = (n, self.votes[idx]);
            }
        }
        best
    }

    fn unvote(&mut self, x: u32, y: u32) {
        for n in 0..self.trig.len() {
            let idx = n * self.num_rho + self.rho_index(n, x, y);
            self.votes[idx] = self.votes[idx].saturating_sub(1);
        }
    }
}

/// Fixed-point walker along the direction of one accumulator angle.
#[derive(Clone, Copy)]
struct Corridor {
    x0: i64,
    y0: i64,
    dx: i64,
    dy: i64,
    steps_along_x: bool,
}

impl Corridor {
    fn new(x: u32, y: u32, cos_t: f32, sin_t: f32) -> Self {
        // The line direction is the normal rotated by 90 degrees
        let a = -sin_t as f64;
        let b = cos_t as f64;
        let one = (1i64 << SHIFT) as f64;
        let half = 1i64 << (SHIFT - 1);

        if a.abs() > b.abs() {
            Self {
                x0: x as i64,
                y0: ((y as i64) << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                steps_along_x: true,
            }
        } else {
            Self {
                x0: ((x as i64) << SHIFT) + half,
                y0: y as i64,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                steps_along_x: false,
            }
        }
    }

    /// Pixel positions from the start outwards, in direction `k` (0 or 1),
    /// until the image border.
    fn walk(self, k: usize, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
        let (dx, dy) = if k == 0 { (self.dx, self.dy) } else { (-self.dx, -self.dy) };
        let (mut x, mut y) = (self.x0, self.y0);
        std::iter::from_fn(move || {
            let (px, py) = if self.steps_along_x {
                (x, y >> SHIFT)
            } else {
                (x >> SHIFT, y)
            };
            if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                return None;
            }
            x += dx;
            y += dy;
            Some((px as u32, py as u32))
        })
    }
}

/// Detect line segments in a mask; any nonzero pixel is an edge.
///
/// Returns an empty list when nothing reaches the vote threshold.
pub fn detect_segments(mask: &GrayImage, params: &HoughParams) -> Vec<LineSegment> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut live = vec![false; (width * height) as usize];
    let mut points = Vec::new();
    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel[0] != 0 {
            live[(y * width + x) as usize] = true;
            points.push((x, y));
        }
    }

    let mut rng = StdRng::seed_from_u64(VISIT_SEED);
    points.shuffle(&mut rng);

    let mut accumulator = Accumulator::new(width, height, params.rho, params.theta_deg);
    let mut segments = Vec::new();
    let index = |x: u32, y: u32| (y * width + x) as usize;

    for &(x, y) in &points {
        // Already consumed by an earlier corridor
        if !live[index(x, y)] {
            continue;
        }

        let (best_n, best_votes) = accumulator.vote(x, y);
        if best_votes < params.vote_threshold {
            continue;
        }

        let (cos_t, sin_t) = accumulator.trig[best_n];
        let corridor = Corridor::new(x, y, cos_t, sin_t);

        // Find how far the run of edge pixels extends each way
        let mut line_end = [(x, y); 2];
        for (k, end) in line_end.iter_mut().enumerate() {
            let mut gap = 0;
            for (px, py) in corridor.walk(k, width, height) {
                if live[index(px, py)] {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > params.max_line_gap {
                        break;
                    }
                }
            }
        }

        let min_len = params.min_line_length;
        let good_line = line_end[0].0.abs_diff(line_end[1].0) >= min_len
            || line_end[0].1.abs_diff(line_end[1].1) >= min_len;

        // Consume the run so its pixels cannot seed another segment
        for (k, &end) in line_end.iter().enumerate() {
            for (px, py) in corridor.walk(k, width, height) {
                if live[index(px, py)] {
                    if good_line {
                        accumulator.unvote(px, py);
                    }
                    live[index(px, py)] = false;
                }
                if (px, py) == end {
                    break;
                }
            }
        }

        if good_line {
            let segment = LineSegment::new(
                line_end[0].0 as i32,
                line_end[0].1 as i32,
                line_end[1].0 as i32,
                line_end[1].1 as i32,
            );
            trace!("segment {:?} ({} votes)", segment, best_votes);
            segments.push(segment);
        }
    }

    segments
}
