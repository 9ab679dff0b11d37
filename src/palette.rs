extern crate alloc;
use alloc::vec::Vec;

use rgb::RGB;

use crate::boxes::ColorBox;
use crate::error::QuantizeError;
use crate::histogram::WeightedColor;

/// Synthesize one palette entry per finished box: the population-weighted
/// mean of the box's colors, rounded to nearest per channel.
///
/// A box holding a single distinct color yields that color verbatim, so a
/// palette built from all-terminal boxes reproduces the source colors
/// exactly. Palette order follows the finished-box order; it is
/// deterministic for a given input but otherwise unspecified.
pub(crate) fn synthesize(
    colors: &[WeightedColor],
    boxes: &[ColorBox],
) -> Result<Vec<RGB<u8>>, QuantizeError> {
    let mut palette = Vec::new();
    palette.try_reserve_exact(boxes.len())?;

    for bx in boxes {
        let mut sums = [0u64; 3];
        for entry in &colors[bx.first..=bx.last] {
            let count = u64::from(entry.count);
            sums[0] += u64::from(entry.color.r) * count;
            sums[1] += u64::from(entry.color.g) * count;
            sums[2] += u64::from(entry.color.b) * count;
        }
        let half = bx.population / 2;
        palette.push(RGB {
            r: ((sums[0] + half) / bx.population) as u8,
            g: ((sums[1] + half) / bx.population) as u8,
            b: ((sums[2] + half) / bx.population) as u8,
        });
    }

    Ok(palette)
}
