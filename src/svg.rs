//! SVG visualization of crops and print sheets.
//!
//! Produces small annotated diagrams for debugging and documentation: a crop
//! panel showing where the document photo sits in the source image, and a
//! sheet panel showing how copies and trim marks land on the paper.
//!
//! # Example
//!
//! ```
//! use zenidphoto::{Size, catalog, print, svg::render_sheet_svg};
//!
//! let grid = print::layout(
//!     Size::new(413, 531),
//!     &catalog::PASSPORT_KG,
//!     &catalog::GRID_2X2,
//!     print::PrintOptions::default(),
//! );
//! let svg = render_sheet_svg(&grid);
//! assert!(svg.contains("1181×1772"));
//! ```

use alloc::format;
use alloc::string::String;

use crate::crop::CropRect;
use crate::edit::overlay_guides;
use crate::face::FaceRect;
use crate::print::PlacementGrid;
use crate::spec::{DocumentSpec, Size};

/// Maximum pixel width of the drawing panel.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height of the drawing panel.
const MAX_PANEL_H: f64 = 400.0;
/// Horizontal margin.
const MARGIN_X: f64 = 40.0;
/// Top margin.
const MARGIN_TOP: f64 = 20.0;
/// Height of label text area above the panel.
const LABEL_H: f64 = 22.0;
/// Height of the annotation area below the panel.
const ANNOTATION_H: f64 = 24.0;

const STYLE: &str = r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .paper { fill: #ffffff; stroke: #999; stroke-width: 1; }
  .inner { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; fill-opacity: 0.6; }
  .cut { stroke: #cccccc; stroke-width: 1; stroke-dasharray: 5,5; }
  .eye { stroke: #d9534f; stroke-width: 1; stroke-dasharray: 4,2; }
  .oval { fill: none; stroke: #f0ad4e; stroke-width: 1.5; }
  .face { fill: none; stroke: #5cb85c; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .paper { fill: #3a3a3a; stroke: #555; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##;

/// Render the print sheet: paper, placed cells, and trim marks.
pub fn render_sheet_svg(grid: &PlacementGrid) -> String {
    let (pw, ph, scale) = scale_to_fit(grid.paper);
    let mut svg = open_document(ph);
    let (left, top) = panel_origin(pw);

    push_label(
        &mut svg,
        &format!("Sheet  {}×{}", grid.paper.width, grid.paper.height),
    );
    svg.push_str(&format!(
        r#"<rect x="{left:.1}" y="{top:.1}" width="{pw:.1}" height="{ph:.1}" class="paper"/>"#
    ));
    svg.push('\n');

    for p in &grid.placements {
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner"/>"#,
            left + p.x as f64 * scale,
            top + p.y as f64 * scale,
            p.width as f64 * scale,
            p.height as f64 * scale
        ));
        svg.push('\n');
    }

    for s in &grid.cut_guides {
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" class="cut"/>"#,
            left + s.x1 as f64 * scale,
            top + s.y1 as f64 * scale,
            left + s.x2 as f64 * scale,
            top + s.y2 as f64 * scale
        ));
        svg.push('\n');
    }

    let annotation = format!(
        "{} × {}×{}, gap {}px{}",
        grid.placements.len(),
        grid.cell.width,
        grid.cell.height,
        grid.gap_px,
        if grid.overflows_paper() {
            ", overflows paper"
        } else {
            ""
        }
    );
    push_annotation(&mut svg, ph, &annotation);
    close_document(svg)
}

/// Render the crop over the source image with the eye line, face oval, and
/// the detected face box if there is one.
pub fn render_crop_svg(
    image: Size,
    crop: &CropRect,
    spec: &DocumentSpec,
    face: Option<&FaceRect>,
) -> String {
    let (pw, ph, scale) = scale_to_fit(image);
    let mut svg = open_document(ph);
    let (left, top) = panel_origin(pw);
    let x = |v: f64| left + v * scale;
    let y = |v: f64| top + v * scale;

    push_label(
        &mut svg,
        &format!("{}  {}×{}", spec.name, image.width, image.height),
    );
    svg.push_str(&format!(
        r#"<rect x="{left:.1}" y="{top:.1}" width="{pw:.1}" height="{ph:.1}" class="outer" rx="2"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="1"/>"#,
        x(crop.x),
        y(crop.y),
        crop.width * scale,
        crop.height * scale
    ));
    svg.push('\n');

    let guides = overlay_guides(crop, spec);
    let (a, b) = guides.eye_line;
    svg.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" class="eye"/>"#,
        x(a.x),
        y(a.y),
        x(b.x),
        y(b.y)
    ));
    svg.push('\n');
    let oval = guides.face_oval;
    svg.push_str(&format!(
        r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" class="oval"/>"#,
        x(oval.center.x),
        y(oval.center.y),
        oval.radius_x * scale,
        oval.radius_y * scale
    ));
    svg.push('\n');

    if let Some(f) = face {
        let iw = image.width as f64;
        let ih = image.height as f64;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="face"/>"#,
            x(f.x * iw),
            y(f.y * ih),
            f.width * iw * scale,
            f.height * ih * scale
        ));
        svg.push('\n');
    }

    let annotation = format!(
        "crop {:.0}×{:.0} at ({:.0}, {:.0}), ratio {}",
        crop.width, crop.height, crop.x, crop.y, spec.ratio
    );
    push_annotation(&mut svg, ph, &annotation);
    close_document(svg)
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let w = size.width as f64;
    let h = size.height as f64;
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn total_width() -> f64 {
    MAX_PANEL_W + 2.0 * MARGIN_X
}

/// Top-left corner of a panel `pw` wide, horizontally centered.
fn panel_origin(pw: f64) -> (f64, f64) {
    ((total_width() - pw) / 2.0, MARGIN_TOP + LABEL_H)
}

fn open_document(ph: f64) -> String {
    let total_w = total_width();
    let total_h = MARGIN_TOP + LABEL_H + ph + ANNOTATION_H + MARGIN_TOP;
    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');
    svg.push_str(STYLE);
    svg
}

fn push_label(svg: &mut String, label: &str) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        total_width() / 2.0,
        MARGIN_TOP + 14.0,
        escape_xml(label)
    ));
    svg.push('\n');
}

fn push_annotation(svg: &mut String, ph: f64, text: &str) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
        total_width() / 2.0,
        MARGIN_TOP + LABEL_H + ph + 14.0,
        escape_xml(text)
    ));
    svg.push('\n');
}

fn close_document(mut svg: String) -> String {
    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
