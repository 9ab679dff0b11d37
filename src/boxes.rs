use crate::histogram::WeightedColor;

/// An axis-aligned box of colors: an inclusive index range `[first, last]`
/// into the shared weighted-color buffer, plus fields derived from it.
///
/// Live boxes hold disjoint ranges that together cover the whole buffer.
/// Every range assignment goes through `new`, so the derived fields are
/// never stale or approximated.
#[derive(Debug, Clone)]
pub(crate) struct ColorBox {
    pub(crate) first: usize,
    pub(crate) last: usize,
    /// Sum of entry counts in the range.
    pub(crate) population: u64,
    /// Cumulative population of every entry left of `first` in split order.
    pub(crate) pre_count: u64,
    pub(crate) min: [u8; 3],
    pub(crate) max: [u8; 3],
    /// Product of `(max - min + 1)` over the three channels, never zero.
    pub(crate) volume: u32,
    /// Channel with the widest extent; lowest axis index wins ties.
    pub(crate) axis: usize,
    /// Extent of that channel.
    pub(crate) spread: u8,
}

impl ColorBox {
    /// Derive population, channel bounds, volume and the split axis in one
    /// pass over `colors[first..=last]`.
    pub(crate) fn new(
        colors: &[WeightedColor],
        first: usize,
        last: usize,
        pre_count: u64,
    ) -> Self {
        debug_assert!(first <= last && last < colors.len());

        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        let mut population = 0u64;
        for entry in &colors[first..=last] {
            population += u64::from(entry.count);
            for axis in 0..3 {
                let v = entry.channel(axis);
                if v < min[axis] {
                    min[axis] = v;
                }
                if v > max[axis] {
                    max[axis] = v;
                }
            }
        }

        let mut volume = 1u32;
        let mut axis = 0;
        let mut spread = 0u8;
        for a in 0..3 {
            let extent = max[a] - min[a];
            volume *= u32::from(extent) + 1;
            if extent > spread {
                spread = extent;
                axis = a;
            }
        }

        Self { first, last, population, pre_count, min, max, volume, axis, spread }
    }

    /// A box holding a single distinct color. It can never be usefully
    /// split and goes straight to the finished list.
    pub(crate) fn is_terminal(&self) -> bool {
        self.volume == 1
    }
}

/// Partition `colors[first..=last]` in place so that every entry whose
/// value on `axis` is `<= pivot` lands before the returned index and every
/// entry with a greater value at or after it. Relative order within each
/// side is unspecified. Returns the first index whose value exceeds the
/// pivot.
pub(crate) fn split_at_value(
    colors: &mut [WeightedColor],
    first: usize,
    last: usize,
    axis: usize,
    pivot: u8,
) -> usize {
    let mut mid = first;
    for j in first..=last {
        if colors[j].channel(axis) <= pivot {
            colors.swap(mid, j);
            mid += 1;
        }
    }
    mid
}
