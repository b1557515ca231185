//! Sheet background colors: hex (`#RGB`, `#RRGGBB`, `#RRGGBBAA`) or a paper name.

use crate::geometry::Color;

/// Parse a hex color or one of the [`PAPER_COLORS`] names.
pub(crate) fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    parse_hex(hex).or_else(|| lookup_named(s))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let b = hex.as_bytes();
    if !b.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    match b.len() {
        3 => Some(Color::rgb(nibble(b[0])? * 17, nibble(b[1])? * 17, nibble(b[2])? * 17)),
        6 | 8 => {
            let byte = |i: usize| Some(nibble(b[i])? << 4 | nibble(b[i + 1])?);
            let a = if b.len() == 8 { byte(6)? } else { 255 };
            Some(Color {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a,
            })
        }
        _ => None,
    }
}

fn nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn lookup_named(name: &str) -> Option<Color> {
    PAPER_COLORS
        .iter()
        .find(|(n, _)| name.eq_ignore_ascii_case(n))
        .map(|&(_, [r, g, b])| Color::rgb(r, g, b))
}

/// Named paper tones, sorted.
pub(crate) const PAPER_COLORS: &[(&str, [u8; 3])] = &[
    ("antiquewhite", [250, 235, 215]),
    ("beige", [245, 245, 220]),
    ("black", [0, 0, 0]),
    ("cornsilk", [255, 248, 220]),
    ("floralwhite", [255, 250, 240]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("ivory", [255, 255, 240]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("linen", [250, 240, 230]),
    ("oldlace", [253, 245, 230]),
    ("seashell", [255, 245, 238]),
    ("snow", [255, 250, 250]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
];
