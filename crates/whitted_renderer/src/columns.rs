//! Column partitioning for parallel rendering.
//!
//! The image is cut into contiguous, non-overlapping column ranges, one
//! per worker. Each worker renders full-height columns, so no two workers
//! ever produce the same pixel.

use std::ops::Range;

/// A contiguous range of image columns, full height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRange {
    /// First column (inclusive)
    pub start: u32,
    /// One past the last column
    pub end: u32,
    /// Position of this range in the partition
    pub index: usize,
}

impl ColumnRange {
    pub fn new(start: u32, end: u32, index: usize) -> Self {
        Self { start, end, index }
    }

    /// Number of columns in the range.
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    pub fn columns(&self) -> Range<u32> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Split `width` columns evenly across `workers` ranges.
///
/// Every range gets `width / workers` columns and the last one also takes
/// the remainder. With more workers than columns the leading ranges are
/// empty and the last range holds everything, so callers may skip empty
/// ranges. Zero workers is treated as one.
pub fn partition_columns(width: u32, workers: usize) -> Vec<ColumnRange> {
    let workers = workers.max(1);
    let per_worker = width / workers as u32;

    (0..workers)
        .map(|i| {
            let start = i as u32 * per_worker;
            let end = if i == workers - 1 {
                width
            } else {
                (i as u32 + 1) * per_worker
            };
            ColumnRange::new(start, end, i)
        })
        .collect()
}

/// Rendered pixels of one column range, column-major.
#[derive(Debug, Clone)]
pub struct ColumnResult {
    pub range: ColumnRange,
    /// `range.width() * height` RGB triples, column by column
    pub pixels: Vec<[u8; 3]>,
}

impl ColumnResult {
    pub fn new(range: ColumnRange, pixels: Vec<[u8; 3]>) -> Self {
        Self { range, pixels }
    }
}
