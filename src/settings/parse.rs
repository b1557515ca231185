//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external
//! dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use super::color::parse_color;
use super::values::Settings;
use crate::cells::CellMetrics;
use crate::guide::{self, GridType};
use crate::sheet::{ReadingOrder, SheetParams, clamp_factor};

/// Parse a settings query string into Settings + warnings.
pub(crate) fn parse_query(query: &str) -> (Settings, Vec<ParseWarning>) {
    let mut settings = Settings::new();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);
        dispatch_key(key.trim(), value.trim(), &mut settings, &mut warnings);
    }

    (settings, warnings)
}

fn dispatch_key(key: &str, value: &str, s: &mut Settings, warnings: &mut Vec<ParseWarning>) {
    let mut w = Warn {
        key: static_key(key),
        value,
        warnings,
    };
    match key {
        "contrast" => {
            let v = w.factor(value);
            w.set(&mut s.contrast, v);
        }
        "brightness" => {
            let v = w.factor(value);
            w.set(&mut s.brightness, v);
        }
        "columns" | "cols" => {
            let v = w.ranged(value, 1, SheetParams::MAX_COLUMNS as i64);
            w.set(&mut s.columns, v.map(|v| v as usize));
        }
        "repeats" | "repeat" => {
            let v = w.ranged(value, 1, SheetParams::MAX_REPEATS as i64);
            w.set(&mut s.repeats, v.map(|v| v as usize));
        }
        "order" | "layout" => {
            let v = parse_order(value);
            if v.is_none() {
                w.invalid("expected row|column");
            }
            w.set(&mut s.order, v);
        }
        "viewport" => {
            let v = w.ranged(value, 1, CellMetrics::MAX_VIEWPORT as i64);
            w.set(&mut s.viewport, v.map(|v| v as u32));
        }
        "bgcolor" => {
            let v = parse_color(value);
            if v.is_none() {
                w.invalid("expected hex color or paper color name");
            }
            w.set(&mut s.bgcolor, v);
        }
        "x" => {
            let v = w.ranged(value, i32::MIN as i64, i32::MAX as i64);
            w.set(&mut s.x, v.map(|v| v as i32));
        }
        "y" => {
            let v = w.ranged(value, i32::MIN as i64, i32::MAX as i64);
            w.set(&mut s.y, v.map(|v| v as i32));
        }
        "width" | "w" => {
            let v = w.ranged(value, guide::MIN_FRAME_SIZE as i64, guide::MAX_FRAME_SIZE as i64);
            w.set(&mut s.width, v.map(|v| v as u32));
        }
        "height" | "h" => {
            let v = w.ranged(value, guide::MIN_FRAME_SIZE as i64, guide::MAX_FRAME_SIZE as i64);
            w.set(&mut s.height, v.map(|v| v as u32));
        }
        "border" => {
            let v = w.ranged(value, guide::MIN_BORDER as i64, guide::MAX_BORDER as i64);
            w.set(&mut s.border, v.map(|v| v as u32));
        }
        "opacity" => {
            let v = w.ranged(value.trim_end_matches('%'), 0, 100);
            w.set(&mut s.opacity, v.map(|v| v as u32));
        }
        "grid" => {
            let v = GridType::from_name(value);
            if v.is_none() {
                w.invalid("expected none|tian|mi|hui");
            }
            w.set(&mut s.grid, v);
        }
        "hotkey" => {
            let v = (!value.is_empty()).then(|| value.to_ascii_lowercase());
            if v.is_none() {
                w.invalid("expected a key name");
            }
            w.set(&mut s.hotkey, v);
        }
        "prefix" => {
            let v = (!value.is_empty() && !value.contains(['/', '\\'])).then(|| String::from(value));
            if v.is_none() {
                w.invalid("expected a non-empty name without path separators");
            }
            w.set(&mut s.prefix, v);
        }
        _ => w.warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

/// Canonical `&'static str` for a key or alias, used in warnings.
fn static_key(key: &str) -> &'static str {
    match key {
        "contrast" => "contrast",
        "brightness" => "brightness",
        "columns" | "cols" => "columns",
        "repeats" | "repeat" => "repeats",
        "order" | "layout" => "order",
        "viewport" => "viewport",
        "bgcolor" => "bgcolor",
        "x" => "x",
        "y" => "y",
        "width" | "w" => "width",
        "height" | "h" => "height",
        "border" => "border",
        "opacity" => "opacity",
        "grid" => "grid",
        "hotkey" => "hotkey",
        "prefix" => "prefix",
        _ => "unknown",
    }
}

/// Warning sink bound to the key being parsed.
struct Warn<'a> {
    key: &'static str,
    value: &'a str,
    warnings: &'a mut Vec<ParseWarning>,
}

impl Warn<'_> {
    fn invalid(&mut self, reason: &'static str) {
        self.warnings.push(ParseWarning::ValueInvalid {
            key: self.key,
            value: String::from(self.value),
            reason,
        });
    }

    fn clamped(&mut self) {
        self.warnings.push(ParseWarning::ValueClamped {
            key: self.key,
            value: String::from(self.value),
        });
    }

    /// Set a field, warning on duplicate.
    fn set<T>(&mut self, field: &mut Option<T>, parsed: Option<T>) {
        if let Some(v) = parsed {
            if field.is_some() {
                self.warnings.push(ParseWarning::DuplicateKey {
                    key: self.key,
                    value: String::from(self.value),
                });
            }
            *field = Some(v);
        }
    }

    /// Integer clamped into `min..=max`.
    fn ranged(&mut self, s: &str, min: i64, max: i64) -> Option<i64> {
        let Some(v) = parse_int(s) else {
            self.invalid("expected an integer");
            return None;
        };
        let c = v.clamp(min, max);
        if c != v {
            self.clamped();
        }
        Some(c)
    }

    /// Contrast/brightness factor, snapped and clamped like the slider.
    fn factor(&mut self, s: &str) -> Option<f32> {
        let Some(v) = s.parse::<f32>().ok().filter(|v| v.is_finite()) else {
            self.invalid("expected a number");
            return None;
        };
        if !(SheetParams::MIN_FACTOR..=SheetParams::MAX_FACTOR).contains(&v) {
            self.clamped();
        }
        Some(clamp_factor(v))
    }
}

// ---- Value parsers ----

/// Integer, accepting a fractional part that is truncated ("3.0" → 3).
fn parse_int(s: &str) -> Option<i64> {
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(f as i64)
}

fn parse_order(s: &str) -> Option<ReadingOrder> {
    match s.to_ascii_lowercase().as_str() {
        "row" | "rows" | "horizontal" | "rowmajor" | "rtl" => Some(ReadingOrder::RowMajorRtl),
        "column" | "columns" | "vertical" | "columnmajor" => Some(ReadingOrder::ColumnMajorRtl),
        "横向" => Some(ReadingOrder::RowMajorRtl),
        "纵向" => Some(ReadingOrder::ColumnMajorRtl),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&', dropping a leading '?'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Decoded bytes are reassembled as UTF-8, so `%E7%B1%B3` is `米`.
/// Invalid sequences are replaced with U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
