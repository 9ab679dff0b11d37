extern crate alloc;
use alloc::collections::TryReserveError;

use thiserror::Error;

/// Errors produced by quantization.
///
/// The engine recognizes exactly one failure kind: resource exhaustion while
/// building the pixel table, the box queues, or the palette. Any such failure
/// aborts the whole call and releases everything built so far; no partial
/// palette is ever returned.
#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("allocation failed during quantization")]
    OutOfMemory(#[from] TryReserveError),
}
