//! Parsed settings: every field optional, unset fields keep their defaults.

use alloc::string::String;

use crate::geometry::Color;
use crate::guide::GridType;
use crate::sheet::ReadingOrder;

/// Settings parsed from a query string.
///
/// Produced by [`crate::settings::parse()`]. Numeric values are already
/// clamped to the ranges the settings surface offers.
#[derive(Debug, Clone, Default, PartialEq)]
#[non_exhaustive]
pub struct Settings {
    // ── Practice sheet ──
    /// Contrast factor (`contrast`), 0.1–2.0.
    pub contrast: Option<f32>,
    /// Brightness factor (`brightness`), 0.1–2.0.
    pub brightness: Option<f32>,
    /// Characters per line (`columns`, `cols`), 1–10.
    pub columns: Option<usize>,
    /// Sequence repetitions (`repeats`, `repeat`), 1–10.
    pub repeats: Option<usize>,
    /// Reading order (`order`, `layout`).
    pub order: Option<ReadingOrder>,
    /// Viewport width cells are sized for (`viewport`), 1–65535.
    pub viewport: Option<u32>,
    /// Sheet background (`bgcolor`).
    pub bgcolor: Option<Color>,

    // ── Capture frame ──
    /// Frame origin x (`x`).
    pub x: Option<i32>,
    /// Frame origin y (`y`).
    pub y: Option<i32>,
    /// Frame width (`width`, `w`), 100–2000.
    pub width: Option<u32>,
    /// Frame height (`height`, `h`), 100–2000.
    pub height: Option<u32>,
    /// Border width in pixels (`border`), 1–10.
    pub border: Option<u32>,
    /// Guide opacity percent (`opacity`), 0–100.
    pub opacity: Option<u32>,
    /// Guide grid (`grid`).
    pub grid: Option<GridType>,
    /// Capture hotkey (`hotkey`).
    pub hotkey: Option<String>,
    /// Capture file prefix (`prefix`).
    pub prefix: Option<String>,
}

impl Settings {
    /// Empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing was set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
