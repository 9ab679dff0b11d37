extern crate alloc;
use alloc::collections::VecDeque;

use crate::boxes::ColorBox;
use crate::error::QuantizeError;

/// Priority-ordered worklist of splittable boxes.
///
/// Boxes are kept sorted by a priority computed once at insertion: the
/// volume–population product `volume * min(255, 255 * population /
/// max_population) >> 8`, where `max_population` is the largest box
/// population inserted so far. The normalization favors boxes that are
/// large both in color-space extent and in pixel population while keeping
/// the product well inside `u64`. Equal priorities keep insertion order,
/// which keeps quantization output deterministic.
pub(crate) struct Worklist {
    entries: VecDeque<(u64, ColorBox)>,
    max_population: u64,
}

impl Worklist {
    pub(crate) fn new() -> Self {
        Self { entries: VecDeque::new(), max_population: 0 }
    }

    fn priority(&self, bx: &ColorBox) -> u64 {
        let scaled = (255 * bx.population / self.max_population).min(255);
        (u64::from(bx.volume) * scaled) >> 8
    }

    /// Insert in priority order, after any existing entries of equal
    /// priority.
    pub(crate) fn insert(&mut self, bx: ColorBox) -> Result<(), QuantizeError> {
        self.entries.try_reserve(1)?;
        self.max_population = self.max_population.max(bx.population);
        let key = self.priority(&bx);
        let at = self.entries.partition_point(|(k, _)| *k >= key);
        self.entries.insert(at, (key, bx));
        Ok(())
    }

    /// Remove and return the highest-priority box; `None` when empty.
    pub(crate) fn pop(&mut self) -> Option<ColorBox> {
        self.entries.pop_front().map(|(_, bx)| bx)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ColorBox> {
        self.entries.iter().map(|(_, bx)| bx)
    }
}
