//! Pixel cell sizing for a practice sheet.
//!
//! The sheet view gives every cell the same size, derived from the
//! viewport width and the number of characters per line. Character images
//! are taller than wide, so cells are 1.2 times as tall as they are wide.

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::geometry::{Rect, Size, fit_inside};
use crate::sheet::GridDims;

/// Cell size and spacing for a sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellMetrics {
    /// Size of one cell.
    pub cell: Size,
    /// Gap between neighbouring cells, both axes.
    pub spacing: u32,
    /// Margin around the whole grid.
    pub margin: u32,
}

impl CellMetrics {
    /// Width kept free for a vertical scrollbar.
    pub const SCROLLBAR_RESERVE: u32 = 20;
    /// Default gap between cells.
    pub const SPACING: u32 = 5;
    /// Default margin around the grid.
    pub const MARGIN: u32 = 5;
    /// Cell height as a multiple of cell width.
    pub const ASPECT: f64 = 1.2;
    /// Widest viewport cells are sized for.
    pub const MAX_VIEWPORT: u32 = 65535;

    /// Size cells so that `columns` of them span `viewport_width`.
    ///
    /// Never returns a cell smaller than 1×1. `columns == 0` is treated as 1;
    /// the viewport is capped at [`MAX_VIEWPORT`](Self::MAX_VIEWPORT).
    pub fn for_viewport(viewport_width: u32, columns: usize) -> Self {
        let columns = to_u32(columns.max(1));
        let area = viewport_width
            .min(Self::MAX_VIEWPORT)
            .saturating_sub(Self::SCROLLBAR_RESERVE);
        let gaps = (columns - 1).saturating_mul(Self::SPACING);
        let width = (area.saturating_sub(gaps) / columns).max(1);
        let height = ((width as f64 * Self::ASPECT).floor() as u32).max(1);
        Self::with_cell(Size::new(width, height))
    }

    /// Fixed cell size with default spacing and margin.
    pub const fn with_cell(cell: Size) -> Self {
        Self {
            cell,
            spacing: Self::SPACING,
            margin: Self::MARGIN,
        }
    }

    /// Override the spacing.
    pub const fn spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Override the margin.
    pub const fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Pixel rect of the cell at `(row, col)`.
    ///
    /// Offsets saturate at `u32::MAX`.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let offset = |i: usize, cell: u32| {
            let pitch = cell.saturating_add(self.spacing);
            self.margin.saturating_add(to_u32(i).saturating_mul(pitch))
        };
        Rect::new(
            offset(col, self.cell.width),
            offset(row, self.cell.height),
            self.cell.width,
            self.cell.height,
        )
    }

    /// Total sheet size for a grid, margins included.
    ///
    /// An empty grid is just the two margins. Saturates at `u32::MAX`.
    pub fn sheet_size(&self, dims: GridDims) -> Size {
        let span = |n: usize, cell: u32| {
            let n = to_u32(n);
            n.saturating_mul(cell)
                .saturating_add(n.saturating_sub(1).saturating_mul(self.spacing))
                .saturating_add(self.margin.saturating_mul(2))
        };
        Size::new(
            span(dims.cols, self.cell.width),
            span(dims.rows, self.cell.height),
        )
    }

    /// Size an image of `image` dimensions is drawn at inside one cell.
    ///
    /// Aspect ratio is preserved; the image is anchored at the cell's
    /// top-left corner.
    pub fn fit_image(&self, image: Size) -> Size {
        fit_inside(image, self.cell)
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
