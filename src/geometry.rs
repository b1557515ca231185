//! Pixel geometry shared by the sheet and capture halves of the crate.
//!
//! Everything here is plain integer geometry in a top-left-origin pixel
//! space. No allocations, `no_std` compatible.

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A point in pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// When a rect is stroked as an outline its corners are `(x, y)` and
/// `(x + width, y + height)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Dimensions of the rect.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether `other` lies entirely inside this rect.
    pub const fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the two rects share any pixel.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// An sRGB color with alpha, 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// White, fully opaque.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Black, fully opaque.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Pure red, the capture frame's accent.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#RRGGBB` form, alpha dropped.
    pub fn to_hex(&self) -> [u8; 7] {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut out = [b'#'; 7];
        for (i, c) in [self.r, self.g, self.b].into_iter().enumerate() {
            out[1 + i * 2] = DIGITS[(c >> 4) as usize];
            out[2 + i * 2] = DIGITS[(c & 0xf) as usize];
        }
        out
    }
}

// ============================================================================
// Aspect-preserving fit
// ============================================================================

/// Largest size with the source aspect ratio that fits inside `target`.
///
/// One dimension matches the target; the other is ≤ target. Zero-sized
/// inputs produce `Size::new(0, 0)`.
pub fn fit_inside(source: Size, target: Size) -> Size {
    if source.is_empty() || target.is_empty() {
        return Size::new(0, 0);
    }
    let (sw, sh, tw, th) = (source.width, source.height, target.width, target.height);
    let ratio_w = tw as f64 / sw as f64;
    let ratio_h = th as f64 / sh as f64;
    if ratio_w <= ratio_h {
        // Width constrains.
        let h = proportional(sw, sh, tw, true, tw, th);
        Size::new(tw, h.min(th))
    } else {
        // Height constrains.
        let w = proportional(sw, sh, th, false, tw, th);
        Size::new(w.min(tw), th)
    }
}

/// Compute the free dimension proportionally, with snap-aware rounding.
///
/// Given a ratio source (`ratio_w`×`ratio_h`), a fixed dimension (`basis`,
/// `basis_is_width`), and a snap target (`target_w`×`target_h`), snaps to
/// whichever candidate (source or target dimension) is within the rounding
/// loss, so 1200×400 into 100×33 gives 100×33 rather than 99×33.
fn proportional(
    ratio_w: u32,
    ratio_h: u32,
    basis: u32,
    basis_is_width: bool,
    target_w: u32,
    target_h: u32,
) -> u32 {
    let ratio = ratio_w as f64 / ratio_h as f64;

    let snap_amount = if basis_is_width {
        rounding_loss_height(ratio_w, ratio_h, target_h)
    } else {
        rounding_loss_width(ratio_w, ratio_h, target_w)
    };

    let snap_a = if basis_is_width { ratio_h } else { ratio_w };
    let snap_b = if basis_is_width { target_h } else { target_w };

    let float = if basis_is_width {
        basis as f64 / ratio
    } else {
        ratio * basis as f64
    };

    let delta_a = (float - snap_a as f64).abs();
    let delta_b = (float - snap_b as f64).abs();

    let v = if delta_a <= snap_amount && delta_a <= delta_b {
        snap_a
    } else if delta_b <= snap_amount {
        snap_b
    } else {
        float.round() as u32
    };

    if v == 0 { 1 } else { v }
}

fn rounding_loss_width(ratio_w: u32, ratio_h: u32, target_width: u32) -> f64 {
    let ratio = ratio_w as f64 / ratio_h as f64;
    let recreate_y = ratio_h as f64 * (target_width as f64 / ratio_w as f64);
    (target_width as f64 - recreate_y.round() * ratio).abs()
}

fn rounding_loss_height(ratio_w: u32, ratio_h: u32, target_height: u32) -> f64 {
    let ratio = ratio_w as f64 / ratio_h as f64;
    let recreate_x = ratio_w as f64 * (target_height as f64 / ratio_h as f64);
    (target_height as f64 - recreate_x.round() / ratio).abs()
}
