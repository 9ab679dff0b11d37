#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

//! Weighted median-cut color quantization.
//!
//! Reduces a true-color bitmap to a palette of at most N representative
//! colors: source pixels are deduplicated into a weighted color table, the
//! table is repeatedly split at the population-weighted median along the
//! box axis with the widest extent, and each terminal box contributes the
//! population-weighted mean of its colors as one palette entry. Splitting
//! compares raw channel values; there is no perceptual color model anywhere
//! in the pipeline, which keeps the arithmetic exact and the output
//! deterministic.
//!
//! [`quantize`] and [`quantize_rgba`] produce a palette; [`remap`] /
//! [`remap_rgba`] assign every pixel its nearest palette entry, and
//! [`quantize_indexed`] runs both stages in one call.

extern crate alloc;

mod boxes;
mod error;
mod histogram;
mod median_cut;
mod palette;
mod remap;
mod select;
mod worklist;

pub use error::QuantizeError;
pub use remap::{remap, remap_rgba};

use alloc::vec::Vec;

use rgb::{RGB, RGBA};

use crate::histogram::WeightedColor;
use crate::median_cut::MedianCut;

/// Reduce an RGB image to at most `max_colors` representative colors.
///
/// The palette holds `min(max_colors, distinct colors)` entries: when the
/// distinct colors already fit the budget they are returned verbatim, with
/// no averaging. An empty input yields an empty palette. The source slice
/// is never mutated.
///
/// `max_colors` must be at least 1; that is a caller contract, not a
/// checked error.
pub fn quantize(pixels: &[RGB<u8>], max_colors: u32) -> Result<Vec<RGB<u8>>, QuantizeError> {
    let (table, _) = histogram::build_table(pixels)?;
    quantize_table(table, max_colors)
}

/// Reduce an RGBA image to at most `max_colors` representative colors.
///
/// Fully transparent pixels (alpha == 0) are excluded entirely: they do
/// not participate in quantization and do not consume palette slots. An
/// image with no opaque pixels yields an empty palette.
pub fn quantize_rgba(pixels: &[RGBA<u8>], max_colors: u32) -> Result<Vec<RGB<u8>>, QuantizeError> {
    let (table, _) = histogram::build_table_rgba(pixels)?;
    quantize_table(table, max_colors)
}

fn quantize_table(
    table: Vec<WeightedColor>,
    max_colors: u32,
) -> Result<Vec<RGB<u8>>, QuantizeError> {
    debug_assert!(max_colors >= 1, "max_colors must be at least 1");
    let (colors, boxes) = MedianCut::new(table, max_colors)?.run()?;
    palette::synthesize(&colors, &boxes)
}

/// An image expressed as palette indices plus the palette itself.
#[derive(Debug, Clone)]
pub struct IndexedBitmap {
    palette: Vec<RGB<u8>>,
    indices: Vec<u8>,
    transparent_index: Option<u8>,
}

impl IndexedBitmap {
    /// The synthesized palette entries.
    pub fn palette(&self) -> &[RGB<u8>] {
        &self.palette
    }

    /// One palette index per source pixel, in source order.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// The index assigned to fully transparent pixels, if any were present.
    /// It equals `palette().len()`, one slot past the last color.
    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent_index
    }
}

/// Quantize an RGBA image and map every pixel to its nearest palette entry.
///
/// When the image contains fully transparent pixels, one slot of the color
/// budget is reserved so the transparency index still fits in a `u8` table
/// of 256 entries; those pixels all map to [`IndexedBitmap::transparent_index`].
pub fn quantize_indexed(
    pixels: &[RGBA<u8>],
    max_colors: u32,
) -> Result<IndexedBitmap, QuantizeError> {
    // Indices are u8, so the palette is capped at 256 entries, or 255 when
    // a transparency slot has to fit after it.
    let has_transparent = pixels.iter().any(|p| p.a == 0);
    let cap = if has_transparent { 255 } else { 256 };
    let budget = max_colors.min(cap);

    let palette = quantize_rgba(pixels, budget)?;
    let (indices, transparent_index) = remap::remap_rgba(pixels, &palette);
    Ok(IndexedBitmap { palette, indices, transparent_index })
}
