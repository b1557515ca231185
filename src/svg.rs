//! SVG previews of the capture frame and of a sheet layout.
//!
//! Useful for documentation and for checking a layout without any pixels:
//! the frame preview draws the border and guides exactly as the overlay
//! describes them, the sheet preview draws one labelled box per cell.
//!
//! # Example
//!
//! ```
//! use zensheet::guide::{GridType, overlay};
//! use zensheet::svg::render_overlay_svg;
//!
//! let svg = render_overlay_svg(&overlay(400, 400, GridType::Mi, 3, 0.5));
//! assert!(svg.starts_with("<svg"));
//! assert_eq!(svg.matches("<line").count(), 4);
//! ```

use crate::cells::CellMetrics;
use crate::geometry::{Color, Rect};
use crate::guide::{Overlay, Primitive, Stroke};
use crate::sheet::{GridDims, Placement};

/// Render the capture frame as a standalone SVG document.
///
/// The document is the frame's size. The border is a solid outline; guides
/// are dashed 4 on, 2 off (in stroke widths) at the guide opacity.
pub fn render_overlay_svg(overlay: &Overlay) -> String {
    let mut svg = String::with_capacity(1024);
    push_header(&mut svg, overlay.width, overlay.height);

    let guide = stroke_attrs(&overlay.guide_stroke);
    for primitive in &overlay.guides {
        match primitive {
            Primitive::Line(line) => svg.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {guide}/>"#,
                line.from.x, line.from.y, line.to.x, line.to.y
            )),
            Primitive::Rect(rect) => push_rect(&mut svg, rect, &guide),
        }
        svg.push('\n');
    }

    // Border last so it sits on top of the guide ends.
    push_rect(&mut svg, &overlay.border, &stroke_attrs(&overlay.border_stroke));
    svg.push('\n');
    svg.push_str("</svg>\n");
    svg
}

/// Render a sheet layout as a standalone SVG document.
///
/// Every grid cell is outlined; occupied cells are filled and labelled
/// `#instance` over `src N`.
pub fn render_sheet_svg(placements: &[Placement], dims: GridDims, metrics: &CellMetrics) -> String {
    let size = metrics.sheet_size(dims);
    if size.is_empty() {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let mut svg = String::with_capacity(256 + placements.len() * 256);
    push_header(&mut svg, size.width, size.height);
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; text-anchor: middle; }
  .cell { fill: none; stroke: #bbb; stroke-width: 1; }
  .used { fill: #f4ecd8; stroke: #8a6d3b; stroke-width: 1; }
  .instance { font-size: 13px; font-weight: bold; fill: #333; }
  .source { font-size: 11px; fill: #666; }
</style>
"##,
    );

    for row in 0..dims.rows {
        for col in 0..dims.cols {
            push_rect(&mut svg, &metrics.cell_rect(row, col), r#"class="cell""#);
            svg.push('\n');
        }
    }

    for p in placements {
        let cell = metrics.cell_rect(p.row, p.col);
        push_rect(&mut svg, &cell, r#"class="used""#);
        let cx = cell.x as f64 + cell.width as f64 / 2.0;
        let cy = cell.y as f64 + cell.height as f64 / 2.0;
        svg.push_str(&format!(
            r#"<text x="{cx}" y="{}" class="instance">{}</text>"#,
            cy - 2.0,
            escape_xml(&format!("#{}", p.instance))
        ));
        svg.push_str(&format!(
            r#"<text x="{cx}" y="{}" class="source">src {}</text>"#,
            cy + 12.0,
            p.source
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_header(svg: &mut String, width: u32, height: u32) {
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    ));
    svg.push('\n');
}

fn push_rect(svg: &mut String, rect: &Rect, attrs: &str) {
    svg.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" {attrs}/>"#,
        rect.x, rect.y, rect.width, rect.height
    ));
}

/// Presentation attributes for a stroke, unfilled.
fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#"fill="none" stroke="{}" stroke-width="{}""#,
        hex(stroke.color),
        stroke.width
    );
    if stroke.opacity < 1.0 {
        attrs.push_str(&format!(r#" stroke-opacity="{}""#, stroke.opacity));
    }
    if stroke.dashed {
        attrs.push_str(&format!(
            r#" stroke-dasharray="{},{}""#,
            stroke.width * 4,
            stroke.width * 2
        ));
    }
    attrs
}

fn hex(color: Color) -> String {
    let digits = color.to_hex();
    // to_hex only produces ASCII.
    digits.iter().map(|&b| b as char).collect()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
