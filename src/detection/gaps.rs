use crate::models::{Boundary, GapRecord};

/// Sort and deduplicate boundaries, then pair neighbours left to right.
///
/// Fewer than two distinct boundaries give no gaps.
pub fn report_gaps(boundaries: &[Boundary]) -> (Vec<Boundary>, Vec<GapRecord>) {
    let mut sorted = boundaries.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let gaps = sorted
        .windows(2)
        .map(|pair| GapRecord::new(pair[0], pair[1]))
        .collect();
    (sorted, gaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_between_neighbours() {
        let (sorted, gaps) = report_gaps(&[107, 300, 420]);
        assert_eq!(sorted, vec![107, 300, 420]);
        assert_eq!(gaps, vec![GapRecord::new(107, 300), GapRecord::new(300, 420)]);
        assert_eq!(gaps[0].width, 193);
        assert_eq!(gaps[1].width, 120);
    }

    #[test]
    fn sorted_and_shuffled_inputs_agree() {
        let (_, from_sorted) = report_gaps(&[10, 55, 90, 200]);
        let (_, from_shuffled) = report_gaps(&[200, 10, 90, 55]);
        assert_eq!(from_sorted, from_shuffled);
    }

    #[test]
    fn widths_are_positive_and_sum_to_span() {
        let (sorted, gaps) = report_gaps(&[400, 3, 3, 77, 250, 77, 12]);
        assert!(gaps.iter().all(|g| g.width > 0));
        let total: i32 = gaps.iter().map(|g| g.width).sum();
        assert_eq!(total, sorted[sorted.len() - 1] - sorted[0]);
    }

    #[test]
    fn fewer_than_two_boundaries_give_no_gaps() {
        assert!(report_gaps(&[]).1.is_empty());
        assert!(report_gaps(&[50]).1.is_empty());
        assert!(report_gaps(&[50, 50]).1.is_empty());
    }
}
