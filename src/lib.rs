//! Calligraphy practice-sheet layout, capture guide grids, and sequential
//! capture naming.
//!
//! The placement and guide geometry is pure integer arithmetic and works
//! without `std`. Pixel work and file handling sit behind features.
//!
//! # Modules
//!
//! - [`sheet`]: placement of repeated images on a right-to-left grid
//! - [`cells`]: pixel cell sizing from the viewport width
//! - [`enhance`]: contrast and brightness adjustment of RGB pixels
//! - [`guide`]: 田 / 米 / 回 guide-grid geometry for the capture frame
//! - [`naming`]: `prefix_NNN.jpg` allocation that never overwrites (`std`)
//! - [`capture`]: capture frame state and the capture cycle (`std`)
//! - [`compose`]: render a sheet to a raster (`image`)
//! - [`svg`]: SVG previews of a frame or a sheet layout (`svg`)
//! - [`settings`]: settings from a query string (`settings`)
//!
//! # Example
//!
//! ```
//! use zensheet::{CellMetrics, ReadingOrder, SheetParams, compute_placements, grid_dims};
//!
//! let params = SheetParams::new().columns(4).repeats(2).order(ReadingOrder::ColumnMajorRtl);
//! let placements = compute_placements(3, &params).unwrap();
//! assert_eq!(placements.len(), 6);
//!
//! let dims = grid_dims(3, &params).unwrap();
//! let metrics = CellMetrics::for_viewport(1000, params.columns);
//! let first = metrics.cell_rect(placements[0].row, placements[0].col);
//! assert_eq!((first.x, first.y), (metrics.cell_rect(0, dims.cols - 1).x, 5));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod cells;
pub mod enhance;
pub mod geometry;
pub mod guide;
pub mod sheet;

#[cfg(feature = "std")]
pub mod capture;
#[cfg(feature = "std")]
pub mod naming;

#[cfg(feature = "image")]
pub mod compose;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "settings")]
pub mod settings;

pub use cells::CellMetrics;
pub use geometry::{Color, Point, Rect, Size, fit_inside};
pub use guide::{GridType, Overlay, guide_primitives};
#[cfg(feature = "alloc")]
pub use sheet::compute_placements;
pub use sheet::{GridDims, Placement, Placements, ReadingOrder, SheetError, SheetParams, grid_dims, placements};

#[cfg(feature = "std")]
pub use capture::{
    CaptureError, CaptureRegion, CaptureState, HotkeyRegistry, PendingCapture, ScreenArea, ScreenCapture,
};
#[cfg(feature = "std")]
pub use naming::{NamingError, next_file_name};

#[cfg(feature = "image")]
pub use compose::compose_sheet;
