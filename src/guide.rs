//! Guide-grid geometry for the capture frame.
//!
//! The capture frame always draws a solid outer border and may draw one of
//! the traditional practice grids on top of it, dashed:
//!
//! - 田 ([`GridType::Tian`]): one vertical and one horizontal center line.
//! - 米 ([`GridType::Mi`]): both diagonals plus the 田 lines.
//! - 回 ([`GridType::Hui`]): the 田 lines plus a centered inner box, half as
//!   wide and two thirds as tall as the frame.
//!
//! All coordinates are local to the frame, origin at its top-left. Integer
//! division truncates.
//!
//! # Example
//!
//! ```
//! use zensheet::guide::{GridType, Primitive, guide_primitives};
//! use zensheet::Rect;
//!
//! let guides = guide_primitives(200, 300, GridType::Hui);
//! assert_eq!(guides.len(), 3);
//! assert_eq!(guides[2], Primitive::Rect(Rect::new(50, 50, 100, 200)));
//! ```

use core::ops::Deref;

use crate::geometry::{Color, Point, Rect};

/// Smallest capture frame edge, in pixels.
pub const MIN_FRAME_SIZE: u32 = 100;
/// Largest capture frame edge, in pixels.
pub const MAX_FRAME_SIZE: u32 = 2000;
/// Thinnest border stroke.
pub const MIN_BORDER: u32 = 1;
/// Thickest border stroke.
pub const MAX_BORDER: u32 = 10;

/// Guide grid drawn inside the capture frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridType {
    /// Border only.
    #[default]
    None,
    /// 田 grid.
    Tian,
    /// 米 grid.
    Mi,
    /// 回 grid.
    Hui,
}

impl GridType {
    /// All grid types, in settings-menu order.
    pub const ALL: [GridType; 4] = [Self::None, Self::Tian, Self::Mi, Self::Hui];

    /// Short lowercase name, as used in settings.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tian => "tian",
            Self::Mi => "mi",
            Self::Hui => "hui",
        }
    }

    /// Parse a short name or the grid's character. Case-insensitive.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| s.eq_ignore_ascii_case(g.name()))
            .or(match s {
                "" | "无" => Some(Self::None),
                "田" | "田字格" => Some(Self::Tian),
                "米" | "米字格" => Some(Self::Mi),
                "回" | "回宫格" => Some(Self::Hui),
                _ => None,
            })
    }
}

/// A straight line segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    /// Line from `(x1, y1)` to `(x2, y2)`.
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }
}

/// One drawable guide element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Line(Line),
    /// Rectangle outline.
    Rect(Rect),
}

/// The guide primitives of one grid, in drawing order. At most four.
///
/// Derefs to a slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GuideSet {
    items: [Primitive; GuideSet::CAPACITY],
    len: usize,
}

impl GuideSet {
    const CAPACITY: usize = 4;

    const fn empty() -> Self {
        Self {
            items: [Primitive::Line(Line::new(0, 0, 0, 0)); Self::CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, p: Primitive) {
        self.items[self.len] = p;
        self.len += 1;
    }

    /// The primitives as a slice.
    pub fn as_slice(&self) -> &[Primitive] {
        &self.items[..self.len]
    }
}

impl Deref for GuideSet {
    type Target = [Primitive];

    fn deref(&self) -> &[Primitive] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a GuideSet {
    type Item = &'a Primitive;
    type IntoIter = core::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Guide primitives for a `width` × `height` frame.
///
/// [`GridType::None`] yields an empty set; the border is separate, see
/// [`border_rect`].
pub fn guide_primitives(width: u32, height: u32, grid: GridType) -> GuideSet {
    let mut set = GuideSet::empty();
    let (w, h) = (width, height);
    let vertical = Primitive::Line(Line::new(w / 2, 0, w / 2, h));
    let horizontal = Primitive::Line(Line::new(0, h / 2, w, h / 2));
    match grid {
        GridType::None => {}
        GridType::Tian => {
            set.push(vertical);
            set.push(horizontal);
        }
        GridType::Mi => {
            set.push(Primitive::Line(Line::new(0, 0, w, h)));
            set.push(Primitive::Line(Line::new(w, 0, 0, h)));
            set.push(vertical);
            set.push(horizontal);
        }
        GridType::Hui => {
            set.push(vertical);
            set.push(horizontal);
            set.push(Primitive::Rect(inner_box(w, h)));
        }
    }
    set
}

/// The 回 grid's inner box.
fn inner_box(w: u32, h: u32) -> Rect {
    let inner_w = w / 2;
    let inner_h = (h as u64 * 2 / 3) as u32;
    Rect::new((w - inner_w) / 2, (h - inner_h) / 2, inner_w, inner_h)
}

/// Outer border outline, from `(0, 0)` to `(width - 1, height - 1)` so a
/// one-pixel stroke stays inside the frame.
pub fn border_rect(width: u32, height: u32) -> Rect {
    Rect::new(0, 0, width.saturating_sub(1), height.saturating_sub(1))
}

/// Pen used to stroke a primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Stroke width in pixels.
    pub width: u32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Dashed (4 on, 2 off, in stroke widths) rather than solid.
    pub dashed: bool,
}

/// Everything needed to paint the capture frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlay {
    /// Frame size the geometry was computed for.
    pub width: u32,
    pub height: u32,
    /// Outer border outline.
    pub border: Rect,
    /// Always solid, always opaque.
    pub border_stroke: Stroke,
    pub guides: GuideSet,
    /// Dashed, with the configured opacity.
    pub guide_stroke: Stroke,
}

/// Compute the full overlay for a frame.
///
/// The border is drawn in the accent color at `border_width` regardless of
/// `opacity`; guides share color and width but are dashed and faded by
/// `opacity` (clamped to `0.0..=1.0`).
pub fn overlay(width: u32, height: u32, grid: GridType, border_width: u32, opacity: f32) -> Overlay {
    let opacity = if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    };
    Overlay {
        width,
        height,
        border: border_rect(width, height),
        border_stroke: Stroke {
            color: Color::RED,
            width: border_width,
            opacity: 1.0,
            dashed: false,
        },
        guides: guide_primitives(width, height, grid),
        guide_stroke: Stroke {
            color: Color::RED,
            width: border_width,
            opacity,
            dashed: true,
        },
    }
}
