use log::trace;

use crate::models::{Boundary, LineSegment};

/// Collapse duplicate detections of the same divider into one boundary each.
///
/// Midpoints are sorted and swept left to right. A midpoint joins the open
/// group when it lies within `distance_threshold` of the group's last
/// member, so a group may drift further than the threshold from its first
/// member. Each group becomes the rounded mean of its midpoints.
pub fn group_close_lines(segments: &[LineSegment], distance_threshold: u32) -> Vec<Boundary> {
    let mut mids: Vec<i32> = segments.iter().map(LineSegment::mid_x).collect();
    mids.sort_unstable();
    group_positions(&mids, distance_threshold)
}

/// Chained grouping over sorted positions.
fn group_positions(sorted: &[i32], distance_threshold: u32) -> Vec<Boundary> {
    let mut groups: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    for &x in sorted {
        let joins = current
            .last()
            .is_some_and(|&last| x.abs_diff(last) <= distance_threshold);
        if !joins && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
        current.push(x);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups
        .iter()
        .map(|group| {
            let sum: i64 = group.iter().map(|&x| x as i64).sum();
            let mean = (sum as f64 / group.len() as f64).round() as i32;
            trace!("group {:?} -> {}", group, mean);
            mean
        })
        .collect()
}
