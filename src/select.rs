use crate::histogram::WeightedColor;

/// Weighted order-statistics selection: a weighted counterpart of
/// quickselect over `colors[first..=last]` along one channel axis.
///
/// Returns the index `i` whose left-cumulative population within the range
/// comes as close as possible to `target` without exceeding it, while the
/// entry at `i` is the first to cross the threshold. The range is
/// partitioned in place as a side effect.
///
/// Preconditions: `first <= last` and `target` is strictly less than the
/// total population of the range. Each iteration strictly shrinks the
/// active sub-range, so the loop terminates.
pub(crate) fn weighted_select(
    colors: &mut [WeightedColor],
    mut first: usize,
    mut last: usize,
    axis: usize,
    mut target: u64,
) -> usize {
    loop {
        if first == last {
            return first;
        }

        let (mid, left_weight) = partition_by_last(colors, first, last, axis);
        let pivot_weight = u64::from(colors[mid].count);

        if left_weight > target {
            // The target lies in the lower side. Back up over any run of
            // equal-valued entries at the partition point so the next range
            // ends on a value boundary instead of inside the run.
            let mut i = mid;
            let mut w = left_weight;
            while w > target
                && i > first + 1
                && colors[i - 1].channel(axis) == colors[i - 2].channel(axis)
            {
                i -= 1;
                w -= u64::from(colors[i].count);
            }
            last = if w <= target { i } else { i - 1 };
        } else if left_weight + pivot_weight <= target {
            // The target lies in the upper side. Entries there are strictly
            // greater than the pivot, so its lower edge is already a value
            // boundary; no walk is needed on this side.
            target -= left_weight + pivot_weight;
            first = mid + 1;
        } else {
            // The pivot entry itself crosses the target.
            return mid;
        }
    }
}

/// Lomuto partition of `colors[first..=last]` by the last entry's channel
/// value, parking the pivot entry between the two sides.
///
/// On return, entries in `[first, mid)` have values `<= pivot`, the pivot
/// entry sits at `mid`, and entries in `(mid, last]` have strictly greater
/// values. Returns `mid` and the cumulative population of `[first, mid)`.
fn partition_by_last(
    colors: &mut [WeightedColor],
    first: usize,
    last: usize,
    axis: usize,
) -> (usize, u64) {
    let pivot = colors[last].channel(axis);
    let mut mid = first;
    let mut left_weight = 0u64;
    for j in first..last {
        if colors[j].channel(axis) <= pivot {
            colors.swap(mid, j);
            left_weight += u64::from(colors[mid].count);
            mid += 1;
        }
    }
    colors.swap(mid, last);
    (mid, left_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use rgb::RGB;

    fn entry(v: u8, count: u32) -> WeightedColor {
        WeightedColor { color: RGB { r: v, g: 0, b: 0 }, count }
    }

    /// Cumulative population of `colors[first..i]` on return order.
    fn prefix_weight(colors: &[WeightedColor], first: usize, i: usize) -> u64 {
        colors[first..i].iter().map(|e| u64::from(e.count)).sum()
    }

    #[test]
    fn heavy_head_selects_first_entry() {
        // Populations 10, 1, 1: the median target for this box is 6, and
        // the first entry alone already reaches past it.
        let mut colors = vec![entry(0, 10), entry(100, 1), entry(200, 1)];
        let i = weighted_select(&mut colors, 0, 2, 0, 6);
        assert_eq!(prefix_weight(&colors, 0, i), 0);
        assert!(prefix_weight(&colors, 0, i + 1) > 6);
        assert_eq!(colors[i].channel(0), 0);
    }

    #[test]
    fn uniform_weights_behave_like_plain_selection() {
        let mut colors: Vec<WeightedColor> =
            [40u8, 10, 30, 0, 20].iter().map(|&v| entry(v, 1)).collect();
        // target 2 → two entries on the left.
        let i = weighted_select(&mut colors, 0, 4, 0, 2);
        assert_eq!(prefix_weight(&colors, 0, i), 2);
        assert_eq!(colors[i].channel(0), 20);
    }

    #[test]
    fn crossing_entry_is_returned() {
        // Weights 2, 5, 2 with target 3: the middle entry crosses.
        let mut colors = vec![entry(10, 2), entry(20, 5), entry(30, 2)];
        let i = weighted_select(&mut colors, 0, 2, 0, 3);
        assert!(prefix_weight(&colors, 0, i) <= 3);
        assert!(prefix_weight(&colors, 0, i + 1) > 3);
        assert_eq!(colors[i].channel(0), 20);
    }

    #[test]
    fn all_equal_values_terminate() {
        let mut colors = vec![entry(5, 1), entry(5, 1), entry(5, 1), entry(5, 1)];
        let i = weighted_select(&mut colors, 0, 3, 0, 2);
        assert!(prefix_weight(&colors, 0, i) <= 2);
        assert!(prefix_weight(&colors, 0, i + 1) > 2);
    }

    #[test]
    fn selection_within_subrange() {
        let mut colors = vec![entry(0, 9), entry(80, 1), entry(40, 1), entry(120, 1)];
        // Operate on [1, 3] only; target 1 relative to that range.
        let i = weighted_select(&mut colors, 1, 3, 0, 1);
        assert!(i >= 1 && i <= 3);
        assert_eq!(prefix_weight(&colors, 1, i), 1);
        assert_eq!(colors[i].channel(0), 80);
        // The untouched prefix stays put.
        assert_eq!(colors[0].channel(0), 0);
    }

    #[test]
    fn zero_target_returns_leftmost_crossing() {
        let mut colors = vec![entry(50, 3), entry(60, 1), entry(70, 1)];
        let i = weighted_select(&mut colors, 0, 2, 0, 0);
        assert_eq!(prefix_weight(&colors, 0, i), 0);
        assert_eq!(colors[i].channel(0), 50);
    }
}
