//! Practice-sheet placement: where each image instance goes on the grid.
//!
//! A sheet shows the selected images, concatenated `repeats` times, on a
//! grid read right to left. Placement is pure integer arithmetic on the
//! instance index; pixel sizing lives in [`cells`](crate::cells).
//!
//! # Example
//!
//! ```
//! use zensheet::{ReadingOrder, SheetParams, compute_placements};
//!
//! let params = SheetParams::new().columns(3).order(ReadingOrder::RowMajorRtl);
//! let placements = compute_placements(6, &params).unwrap();
//!
//! // First row fills from the right.
//! assert_eq!((placements[0].row, placements[0].col), (0, 2));
//! assert_eq!((placements[2].row, placements[2].col), (0, 0));
//! assert_eq!((placements[3].row, placements[3].col), (1, 2));
//! ```

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Order in which instances fill the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadingOrder {
    /// Fill rows first; within a row the rightmost column comes first.
    #[default]
    RowMajorRtl,
    /// Fill columns first, top to bottom; the rightmost column comes first.
    ///
    /// `columns` is then the number of characters per column.
    ColumnMajorRtl,
}

/// Display parameters for a practice sheet.
///
/// `columns` is the number of characters per line: per row for
/// [`RowMajorRtl`](ReadingOrder::RowMajorRtl), per column for
/// [`ColumnMajorRtl`](ReadingOrder::ColumnMajorRtl).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetParams {
    /// Contrast factor, 1.0 = unchanged.
    pub contrast: f32,
    /// Brightness factor, 1.0 = unchanged.
    pub brightness: f32,
    /// Characters per line.
    pub columns: usize,
    /// How many times the whole image sequence is repeated.
    pub repeats: usize,
    /// Reading order.
    pub order: ReadingOrder,
}

impl Default for SheetParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetParams {
    /// Smallest contrast/brightness factor the settings surface offers.
    pub const MIN_FACTOR: f32 = 0.1;
    /// Largest contrast/brightness factor the settings surface offers.
    pub const MAX_FACTOR: f32 = 2.0;
    /// Contrast/brightness slider step.
    pub const FACTOR_STEP: f32 = 0.1;
    /// Largest column count the settings surface offers.
    pub const MAX_COLUMNS: usize = 10;
    /// Largest repeat count the settings surface offers.
    pub const MAX_REPEATS: usize = 10;

    /// Unenhanced, five characters per line, one repetition, row-major.
    pub const fn new() -> Self {
        Self {
            contrast: 1.0,
            brightness: 1.0,
            columns: 5,
            repeats: 1,
            order: ReadingOrder::RowMajorRtl,
        }
    }

    /// Set the contrast factor.
    pub fn contrast(mut self, contrast: f32) -> Self {
        self.contrast = contrast;
        self
    }

    /// Set the brightness factor.
    pub fn brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set characters per line.
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the repeat count.
    pub fn repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the reading order.
    pub fn order(mut self, order: ReadingOrder) -> Self {
        self.order = order;
        self
    }

    /// Clamp every field into the range the settings surface offers.
    ///
    /// Factors snap to the nearest 0.1 step. A NaN factor becomes 1.0.
    pub fn clamped(self) -> Self {
        Self {
            contrast: clamp_factor(self.contrast),
            brightness: clamp_factor(self.brightness),
            columns: self.columns.clamp(1, Self::MAX_COLUMNS),
            repeats: self.repeats.clamp(1, Self::MAX_REPEATS),
            order: self.order,
        }
    }

    /// Total number of displayed instances for `count` source images.
    pub fn total_instances(&self, count: usize) -> usize {
        count.saturating_mul(self.repeats)
    }

    fn validate(&self) -> Result<(), SheetError> {
        if self.columns == 0 {
            return Err(SheetError::ZeroColumns);
        }
        if self.repeats == 0 {
            return Err(SheetError::ZeroRepeats);
        }
        Ok(())
    }
}

pub(crate) fn clamp_factor(v: f32) -> f32 {
    if v.is_nan() {
        return 1.0;
    }
    let steps = (v / SheetParams::FACTOR_STEP).round();
    (steps * SheetParams::FACTOR_STEP).clamp(SheetParams::MIN_FACTOR, SheetParams::MAX_FACTOR)
}

/// Grid cell assignment for one displayed instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index in the repeated sequence, `0..count * repeats`.
    pub instance: usize,
    /// Index of the source image shown, `instance % count`.
    pub source: usize,
    /// Row, 0 at the top.
    pub row: usize,
    /// Column, 0 at the left.
    pub col: usize,
}

/// Extent of the placement grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    /// Number of cells.
    pub const fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

/// Sheet parameter error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SheetError {
    /// Column count is zero.
    #[error("column count must be at least 1")]
    ZeroColumns,
    /// Repeat count is zero.
    #[error("repeat count must be at least 1")]
    ZeroRepeats,
}

/// Iterator over the placements of a sheet, in instance order.
///
/// Created by [`placements`]. Allocation-free.
#[derive(Clone, Debug)]
pub struct Placements {
    count: usize,
    total: usize,
    columns: usize,
    total_cols: usize,
    order: ReadingOrder,
    next: usize,
}

impl Placements {
    fn place(&self, instance: usize) -> Placement {
        let (row, col) = match self.order {
            ReadingOrder::RowMajorRtl => (
                instance / self.columns,
                (self.columns - 1) - (instance % self.columns),
            ),
            ReadingOrder::ColumnMajorRtl => (
                instance % self.columns,
                (self.total_cols - 1) - (instance / self.columns),
            ),
        };
        Placement {
            instance,
            source: instance % self.count,
            row,
            col,
        }
    }
}

impl Iterator for Placements {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        if self.next >= self.total {
            return None;
        }
        let p = self.place(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.total - self.next;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Placement> {
        self.next = self.next.saturating_add(n).min(self.total);
        self.next()
    }
}

impl ExactSizeIterator for Placements {}

impl core::iter::FusedIterator for Placements {}

/// Iterate the placements for `count` source images.
///
/// `count == 0` yields nothing.
pub fn placements(count: usize, params: &SheetParams) -> Result<Placements, SheetError> {
    params.validate()?;
    let total = params.total_instances(count);
    Ok(Placements {
        count,
        total,
        columns: params.columns,
        total_cols: total.div_ceil(params.columns),
        order: params.order,
        next: 0,
    })
}

/// Compute every placement for `count` source images.
///
/// The result has exactly `count * repeats` entries with pairwise-distinct
/// `(row, col)` cells, all inside [`grid_dims`].
#[cfg(feature = "alloc")]
pub fn compute_placements(count: usize, params: &SheetParams) -> Result<Vec<Placement>, SheetError> {
    Ok(placements(count, params)?.collect())
}

/// Extent of the grid the placements occupy.
///
/// Row-major sheets are always `columns` wide; the last row may be partial
/// and fills from the right. Column-major sheets are at most `columns` tall.
pub fn grid_dims(count: usize, params: &SheetParams) -> Result<GridDims, SheetError> {
    params.validate()?;
    let total = params.total_instances(count);
    if total == 0 {
        return Ok(GridDims::default());
    }
    let lines = total.div_ceil(params.columns);
    Ok(match params.order {
        ReadingOrder::RowMajorRtl => GridDims {
            rows: lines,
            cols: params.columns,
        },
        ReadingOrder::ColumnMajorRtl => GridDims {
            rows: total.min(params.columns),
            cols: lines,
        },
    })
}
