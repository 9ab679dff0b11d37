extern crate alloc;
use alloc::vec::Vec;

use crate::boxes::{split_at_value, ColorBox};
use crate::error::QuantizeError;
use crate::histogram::WeightedColor;
use crate::select::weighted_select;
use crate::worklist::Worklist;

/// Median-cut driver.
///
/// Owns the weighted color buffer and both box queues for the duration of
/// one quantization call. Boxes reference disjoint inclusive ranges of the
/// buffer that together always cover it, so splitting is pure in-place
/// index work with no copying.
pub(crate) struct MedianCut {
    colors: Vec<WeightedColor>,
    active: Worklist,
    finished: Vec<ColorBox>,
    budget: u32,
    color_count: u32,
}

impl MedianCut {
    /// Seed the driver with one box spanning the whole table. An empty
    /// table yields a driver that is already done.
    pub(crate) fn new(colors: Vec<WeightedColor>, budget: u32) -> Result<Self, QuantizeError> {
        debug_assert!(budget >= 1, "the color budget is a caller contract: at least 1");

        let mut driver = Self {
            colors,
            active: Worklist::new(),
            finished: Vec::new(),
            budget,
            color_count: 0,
        };
        if !driver.colors.is_empty() {
            let root = ColorBox::new(&driver.colors, 0, driver.colors.len() - 1, 0);
            driver.color_count = 1;
            driver.route(root)?;
        }
        Ok(driver)
    }

    /// Terminal boxes go straight to the finished list; everything else is
    /// queued for further splitting.
    fn route(&mut self, bx: ColorBox) -> Result<(), QuantizeError> {
        if bx.is_terminal() {
            self.finished.try_reserve(1)?;
            self.finished.push(bx);
            Ok(())
        } else {
            self.active.insert(bx)
        }
    }

    /// Split the highest-priority box once. Returns `false` once the color
    /// budget is reached or no splittable box remains.
    pub(crate) fn step(&mut self) -> Result<bool, QuantizeError> {
        if self.color_count >= self.budget {
            return Ok(false);
        }
        let Some(bx) = self.active.pop() else {
            return Ok(false);
        };

        // Index that divides the box population (not its entry count) as
        // evenly as possible, biased to the lower half on ties.
        let target = (2 * bx.pre_count + bx.population - 1).div_ceil(2) - bx.pre_count;
        let axis = bx.axis;
        let median = weighted_select(&mut self.colors, bx.first, bx.last, axis, target);
        let value = self.colors[median].channel(axis);

        // Cut halfway between the median value and the nearer extremum, so
        // the boundary never falls between two entries of identical value.
        // Clamping keeps both sides of the value split non-empty when the
        // median sits on an extremum itself.
        let lo = bx.min[axis];
        let hi = bx.max[axis];
        debug_assert_eq!(hi - lo, bx.spread);
        let pivot = if value - lo <= hi - value {
            ((u16::from(lo) + u16::from(value)) / 2) as u8
        } else {
            ((u16::from(value) + u16::from(hi)) / 2) as u8
        };
        let pivot = pivot.clamp(lo, hi - 1);

        let mid = split_at_value(&mut self.colors, bx.first, bx.last, axis, pivot);
        debug_assert!(bx.first < mid && mid <= bx.last);

        let left = ColorBox::new(&self.colors, bx.first, mid - 1, bx.pre_count);
        let right = ColorBox::new(&self.colors, mid, bx.last, bx.pre_count + left.population);
        self.route(left)?;
        self.route(right)?;
        self.color_count += 1;
        Ok(true)
    }

    /// Split until the budget is reached or nothing is splittable, then
    /// drain the remaining active boxes verbatim into the finished list.
    pub(crate) fn run(mut self) -> Result<(Vec<WeightedColor>, Vec<ColorBox>), QuantizeError> {
        while self.step()? {}
        while let Some(bx) = self.active.pop() {
            self.finished.try_reserve(1)?;
            self.finished.push(bx);
        }
        Ok((self.colors, self.finished))
    }
}
