extern crate alloc;
use alloc::vec::Vec;

use rgb::{RGB, RGBA};

/// Squared channel-space distance. Raw channel differences, no perceptual
/// weighting: mapping uses the same distance model the splitter does.
#[inline]
fn distance_sq(a: RGB<u8>, b: RGB<u8>) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    (dr * dr + dg * dg + db * db) as u32
}

/// Index of the nearest palette entry; the first entry wins ties.
fn nearest(palette: &[RGB<u8>], color: RGB<u8>) -> u8 {
    debug_assert!(!palette.is_empty() && palette.len() <= 256);

    let mut best = 0usize;
    let mut best_dist = u32::MAX;
    for (i, &entry) in palette.iter().enumerate() {
        let d = distance_sq(entry, color);
        if d < best_dist {
            best_dist = d;
            best = i;
            if d == 0 {
                break;
            }
        }
    }
    best as u8
}

/// Map every pixel to the index of its nearest palette entry.
///
/// The palette must be non-empty and hold at most 256 entries.
pub fn remap(pixels: &[RGB<u8>], palette: &[RGB<u8>]) -> Vec<u8> {
    pixels.iter().map(|&p| nearest(palette, p)).collect()
}

/// Map RGBA pixels to palette indices.
///
/// Fully transparent pixels (alpha == 0) all share a dedicated transparency
/// index equal to `palette.len()`, appended after the palette entries; the
/// second return value is that index if any pixel needed it. Callers that
/// want a transparency slot should quantize to at most 255 colors. All
/// other pixels map by RGB alone.
pub fn remap_rgba(pixels: &[RGBA<u8>], palette: &[RGB<u8>]) -> (Vec<u8>, Option<u8>) {
    let mut used_transparent = false;
    let indices = pixels
        .iter()
        .map(|p| {
            if p.a == 0 {
                debug_assert!(palette.len() <= 255, "no index left for transparency");
                used_transparent = true;
                palette.len() as u8
            } else {
                nearest(palette, RGB { r: p.r, g: p.g, b: p.b })
            }
        })
        .collect();
    (indices, used_transparent.then(|| palette.len() as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rgb(r: u8, g: u8, b: u8) -> RGB<u8> {
        RGB { r, g, b }
    }

    #[test]
    fn exact_matches_map_to_their_entry() {
        let palette = vec![rgb(0, 0, 0), rgb(128, 128, 128), rgb(255, 255, 255)];
        let pixels = vec![rgb(255, 255, 255), rgb(0, 0, 0), rgb(128, 128, 128)];
        assert_eq!(remap(&pixels, &palette), vec![2, 0, 1]);
    }

    #[test]
    fn nearest_entry_wins() {
        let palette = vec![rgb(0, 0, 0), rgb(200, 0, 0)];
        let pixels = vec![rgb(90, 0, 0), rgb(110, 0, 0)];
        assert_eq!(remap(&pixels, &palette), vec![0, 1]);
    }

    #[test]
    fn ties_prefer_the_first_entry() {
        let palette = vec![rgb(0, 0, 0), rgb(100, 0, 0)];
        let pixels = vec![rgb(50, 0, 0)];
        assert_eq!(remap(&pixels, &palette), vec![0]);
    }

    #[test]
    fn transparent_pixels_get_the_appended_index() {
        let palette = vec![rgb(10, 10, 10), rgb(240, 240, 240)];
        let pixels = vec![
            RGBA { r: 12, g: 12, b: 12, a: 255 },
            RGBA { r: 0, g: 0, b: 0, a: 0 },
            RGBA { r: 250, g: 250, b: 250, a: 128 },
        ];
        let (indices, transparent) = remap_rgba(&pixels, &palette);
        assert_eq!(transparent, Some(2));
        assert_eq!(indices, vec![0, 2, 1]);
    }

    #[test]
    fn no_transparency_index_without_transparent_pixels() {
        let palette = vec![rgb(10, 10, 10)];
        let pixels = vec![RGBA { r: 0, g: 0, b: 0, a: 255 }];
        let (indices, transparent) = remap_rgba(&pixels, &palette);
        assert_eq!(transparent, None);
        assert_eq!(indices, vec![0]);
    }
}
