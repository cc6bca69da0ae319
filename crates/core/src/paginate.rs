//! Fixed-size batch pagination over an ordered id space.
//!
//! Both id enumeration ("list media in pages") and bulk mutation
//! ("patch/delete 100 ids at a time") walk the same arithmetic
//! progression; the underlying bulk endpoints impose the page ceilings.

// ---------------------------------------------------------------------------
// Page-size ceilings
// ---------------------------------------------------------------------------

/// Maximum page size when enumerating media ids.
pub const MEDIA_PAGE_SIZE: usize = 1000;

/// Maximum batch size for one bulk update/delete call.
pub const MUTATION_BATCH_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Batch ranges
// ---------------------------------------------------------------------------

/// Half-open offset range `[start, stop)` bounding one list or mutation
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    pub start: usize,
    pub stop: usize,
}

impl BatchRange {
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }
}

/// Lazily yield batch ranges covering `[0, total)`.
///
/// The effective batch size is `min(batch_size, total)`, so a small
/// total never produces a zero-length range; the final range may be
/// shorter than the batch size.  The iterator is stateless and can be
/// restarted by calling again with the same arguments.  A `batch_size`
/// of zero is treated as one.
pub fn batches(total: usize, batch_size: usize) -> impl Iterator<Item = BatchRange> {
    let size = batch_size.min(total).max(1);
    (0..total).step_by(size).map(move |start| BatchRange {
        start,
        stop: (start + size).min(total),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
