extern crate alloc;
use alloc::vec::Vec;

use rgb::{RGB, RGBA};

use crate::error::QuantizeError;

/// A deduplicated source color: one entry per distinct opaque RGB value,
/// carrying the number of source pixels that share it.
///
/// Entries live in one contiguous buffer owned by the median-cut driver and
/// are freely reordered in place while boxes are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeightedColor {
    pub(crate) color: RGB<u8>,
    pub(crate) count: u32,
}

impl WeightedColor {
    /// Channel value along a split axis: 0 = red, 1 = green, 2 = blue.
    #[inline]
    pub(crate) fn channel(&self, axis: usize) -> u8 {
        match axis {
            0 => self.color.r,
            1 => self.color.g,
            _ => self.color.b,
        }
    }
}

#[inline]
fn pack(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

#[inline]
fn unpack(key: u32) -> RGB<u8> {
    RGB {
        r: (key >> 16) as u8,
        g: (key >> 8) as u8,
        b: key as u8,
    }
}

/// Build the weighted color table for an RGB image.
///
/// Returns the table sorted by packed 24-bit value, together with the number
/// of source pixels it accounts for (the sum of all entry counts).
pub(crate) fn build_table(
    pixels: &[RGB<u8>],
) -> Result<(Vec<WeightedColor>, u64), QuantizeError> {
    let mut keys = Vec::new();
    keys.try_reserve_exact(pixels.len())?;
    keys.extend(pixels.iter().map(|p| pack(p.r, p.g, p.b)));
    collapse(keys)
}

/// Build the weighted color table for an RGBA image.
///
/// Fully transparent pixels (alpha == 0) are excluded entirely: they do not
/// participate in quantization and do not consume palette slots.
pub(crate) fn build_table_rgba(
    pixels: &[RGBA<u8>],
) -> Result<(Vec<WeightedColor>, u64), QuantizeError> {
    let mut keys = Vec::new();
    keys.try_reserve_exact(pixels.len())?;
    keys.extend(
        pixels
            .iter()
            .filter(|p| p.a != 0)
            .map(|p| pack(p.r, p.g, p.b)),
    );
    collapse(keys)
}

/// Sort packed keys and run-length collapse equal runs into weighted entries.
fn collapse(mut keys: Vec<u32>) -> Result<(Vec<WeightedColor>, u64), QuantizeError> {
    let total = keys.len() as u64;
    keys.sort_unstable();

    let mut table = Vec::new();
    // Distinct-color count is unknown until the scan; the pixel count is a
    // safe upper bound.
    table.try_reserve(keys.len())?;

    let mut iter = keys.into_iter();
    if let Some(first) = iter.next() {
        let mut key = first;
        let mut count: u32 = 1;
        for k in iter {
            if k == key {
                count += 1;
            } else {
                table.push(WeightedColor { color: unpack(key), count });
                key = k;
                count = 1;
            }
        }
        table.push(WeightedColor { color: unpack(key), count });
    }

    Ok((table, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rgb(r: u8, g: u8, b: u8) -> RGB<u8> {
        RGB { r, g, b }
    }

    #[test]
    fn empty_input() {
        let (table, total) = build_table(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn collapses_duplicates_and_conserves_population() {
        let pixels = vec![
            rgb(10, 20, 30),
            rgb(0, 0, 0),
            rgb(10, 20, 30),
            rgb(255, 255, 255),
            rgb(10, 20, 30),
        ];
        let (table, total) = build_table(&pixels).unwrap();
        assert_eq!(total, 5);
        assert_eq!(table.len(), 3);
        assert_eq!(u64::from(table.iter().map(|e| e.count).sum::<u32>()), total);

        let dup = table.iter().find(|e| e.color == rgb(10, 20, 30)).unwrap();
        assert_eq!(dup.count, 3);
    }

    #[test]
    fn output_is_sorted_by_packed_value() {
        let pixels = vec![rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255), rgb(0, 255, 0)];
        let (table, _) = build_table(&pixels).unwrap();
        let keys: Vec<u32> = table
            .iter()
            .map(|e| pack(e.color.r, e.color.g, e.color.b))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn transparent_pixels_are_excluded() {
        let pixels = vec![
            RGBA { r: 1, g: 2, b: 3, a: 255 },
            RGBA { r: 9, g: 9, b: 9, a: 0 },
            RGBA { r: 1, g: 2, b: 3, a: 7 },
        ];
        let (table, total) = build_table_rgba(&pixels).unwrap();
        assert_eq!(total, 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].count, 2);
        assert_eq!(table[0].color, rgb(1, 2, 3));
    }

    #[test]
    fn channel_accessor_order() {
        let entry = WeightedColor { color: rgb(1, 2, 3), count: 1 };
        assert_eq!(entry.channel(0), 1);
        assert_eq!(entry.channel(1), 2);
        assert_eq!(entry.channel(2), 3);
    }
}
