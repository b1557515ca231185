//! Settings as a query string.
//!
//! Both tools expose a handful of bounded controls. This module reads them
//! from a string like `columns=6&order=column&grid=mi&opacity=60`, clamps
//! out-of-range values the way the sliders would, and converts the result
//! into [`SheetParams`](crate::SheetParams), [`CellMetrics`](crate::CellMetrics)
//! or a [`CaptureRegion`](crate::capture::CaptureRegion) update.
//!
//! # Example
//!
//! ```
//! use zensheet::{ReadingOrder, SheetParams, settings};
//!
//! let result = settings::parse("cols=6&order=column&contrast=1.5");
//! assert!(result.warnings.is_empty());
//!
//! let params = result.settings.sheet_params(SheetParams::new());
//! assert_eq!(params.columns, 6);
//! assert_eq!(params.order, ReadingOrder::ColumnMajorRtl);
//! ```
//!
//! Parsing never fails. Problems are reported as [`ParseWarning`]s and the
//! offending key is skipped (or stored clamped).

mod color;
mod convert;
mod parse;
pub mod values;

pub use values::Settings;

use alloc::string::String;
use alloc::vec::Vec;

/// Result of parsing a settings string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed settings.
    pub settings: Settings,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from settings parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: &'static str, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    /// A value was outside the allowed range and was clamped into it.
    ValueClamped { key: &'static str, value: String },
}

/// Parse a settings query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (settings, warnings) = parse::parse_query(query);
    ParseResult { settings, warnings }
}
