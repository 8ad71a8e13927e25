//! Print-sheet tiling.
//!
//! Places copies of one document photo on a sheet of paper in a centered
//! grid and, optionally, emits trim marks at every cell corner. Output is
//! pure geometry in paper pixels; compositing and rasterizing are left to the
//! caller.
//!
//! # Example
//!
//! ```
//! use zenidphoto::{Size, catalog, print};
//!
//! let grid = print::layout(
//!     Size::new(413, 531),
//!     &catalog::PASSPORT_KG,
//!     &catalog::GRID_2X2,
//!     print::PrintOptions::default(),
//! );
//! assert_eq!(grid.paper, Size::new(1181, 1772));
//! assert_eq!(grid.placements.len(), 4);
//! ```

use alloc::vec::Vec;

use num_traits::Float;

use crate::spec::{DocumentSpec, Size, SpecError};

/// Length of each trim mark, in millimetres.
pub const CUT_MARK_MM: f64 = 5.0;

/// Largest accepted gap between photos, in millimetres.
pub const MAX_GAP_MM: f64 = 50.0;

/// Points per inch, for PDF page sizes.
const POINTS_PER_INCH: f64 = 72.0;

/// Named paper size in millimetres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaperSize {
    pub name: &'static str,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperSize {
    /// 10×15 cm photo paper.
    pub const PHOTO_10X15: Self = Self::new("10×15", 100.0, 150.0);
    /// ISO A4.
    pub const A4: Self = Self::new("A4", 210.0, 297.0);

    /// Create a paper size.
    pub const fn new(name: &'static str, width_mm: f64, height_mm: f64) -> Self {
        Self {
            name,
            width_mm,
            height_mm,
        }
    }

    /// Paper size in pixels at `px_per_mm`, rounded.
    pub fn to_pixels(&self, px_per_mm: f64) -> Size {
        Size::new(
            Float::round(self.width_mm * px_per_mm) as u32,
            Float::round(self.height_mm * px_per_mm) as u32,
        )
    }
}

/// Grid shape for a print sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrintLayout {
    pub id: &'static str,
    pub name: &'static str,
    pub cols: u32,
    pub rows: u32,
    /// `None` sizes the paper to one photo plus a gap on every side.
    pub paper: Option<PaperSize>,
}

impl PrintLayout {
    /// Create a layout. Catalog entries are built through here too, so
    /// `cols` and `rows` are trusted to be non-zero; use
    /// [`custom_grid`](Self::custom_grid) for user input.
    pub const fn new(
        id: &'static str,
        name: &'static str,
        cols: u32,
        rows: u32,
        paper: Option<PaperSize>,
    ) -> Self {
        Self {
            id,
            name,
            cols,
            rows,
            paper,
        }
    }

    /// A user-chosen grid, checked before it reaches the engine.
    pub fn custom_grid(cols: u32, rows: u32, paper: Option<PaperSize>) -> Result<Self, SpecError> {
        if cols == 0 || rows == 0 {
            return Err(SpecError::EmptyGrid);
        }
        if let Some(p) = paper
            && !(p.width_mm > 0.0 && p.height_mm > 0.0)
        {
            return Err(SpecError::InvalidPaper);
        }
        let template = crate::catalog::CUSTOM_GRID;
        Ok(Self::new(template.id, template.name, cols, rows, paper))
    }

    /// Number of photos on the sheet.
    pub const fn count(&self) -> u32 {
        self.cols.saturating_mul(self.rows)
    }
}

/// Print settings that aren't part of the layout itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrintOptions {
    /// Gap between neighbouring photos, and the margin of an auto-sized sheet.
    pub gap_mm: f64,
    /// Whether to emit trim marks.
    pub cut_lines: bool,
}

impl PrintOptions {
    /// Checked options for user input; `gap_mm` must lie in
    /// `0..=MAX_GAP_MM`.
    pub fn new(gap_mm: f64, cut_lines: bool) -> Result<Self, SpecError> {
        if !(0.0..=MAX_GAP_MM).contains(&gap_mm) {
            return Err(SpecError::InvalidGap);
        }
        Ok(Self { gap_mm, cut_lines })
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            gap_mm: 2.0,
            cut_lines: true,
        }
    }
}

/// One photo copy on the sheet, in paper pixels.
///
/// `x`/`y` can be negative when the grid is larger than the paper.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub row: u32,
    pub col: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A straight line segment in paper pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment {
    const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether the segment is axis-aligned horizontally.
    pub const fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    /// Length in pixels along its axis.
    pub const fn length(&self) -> u32 {
        self.x1.abs_diff(self.x2) + self.y1.abs_diff(self.y2)
    }
}

/// Computed print sheet.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementGrid {
    /// Paper size in pixels.
    pub paper: Size,
    /// Size of each placed copy.
    pub cell: Size,
    /// Size of the cropped photo being tiled; scaled to `cell` when drawn.
    pub source: Size,
    /// Gap between cells in pixels.
    pub gap_px: u32,
    /// Row-major placements.
    pub placements: Vec<Placement>,
    /// Trim marks; empty when disabled.
    pub cut_guides: Vec<Segment>,
}

impl PlacementGrid {
    /// Bounding box of all placements as `(x, y, width, height)`.
    pub fn content_bounds(&self) -> Option<(i32, i32, u32, u32)> {
        let first = self.placements.first()?;
        let last = self.placements.last()?;
        let extent = |start: i32, end: i32, len: u32| {
            let span = end as i64 + len as i64 - start as i64;
            u32::try_from(span).unwrap_or(u32::MAX)
        };
        Some((
            first.x,
            first.y,
            extent(first.x, last.x, last.width),
            extent(first.y, last.y, last.height),
        ))
    }

    /// Whether any placement extends beyond the paper.
    pub fn overflows_paper(&self) -> bool {
        self.content_bounds().is_some_and(|(x, y, w, h)| {
            x < 0
                || y < 0
                || x as i64 + w as i64 > self.paper.width as i64
                || y as i64 + h as i64 > self.paper.height as i64
        })
    }

    /// Downscaled sheet size for on-screen preview, never upscaled.
    pub fn preview_size(&self, max_width: u32) -> Size {
        self.paper.scaled_to_width(max_width)
    }
}

/// Tile `photo` onto a sheet.
///
/// Cell size comes from the spec (pixel specs directly, physical specs at
/// their dpi), paper from the layout or, when it has none, one cell plus
/// `gap` on every side. The grid is centered; start offsets are floored and
/// go negative when the grid doesn't fit, which is left for the caller to
/// detect with [`PlacementGrid::overflows_paper`]. Coordinates saturate at
/// the `i32` range, so unchecked options can't wrap.
pub fn layout(
    photo: Size,
    spec: &DocumentSpec,
    print: &PrintLayout,
    options: PrintOptions,
) -> PlacementGrid {
    let px_per_mm = spec.px_per_mm();
    let cell = spec.print_pixels();
    let gap = Float::round(options.gap_mm * px_per_mm) as u32;

    let paper = match &print.paper {
        Some(p) => p.to_pixels(px_per_mm),
        None => Size::new(
            cell.width.saturating_add(gap.saturating_mul(2)),
            cell.height.saturating_add(gap.saturating_mul(2)),
        ),
    };

    let start_x = centered_start(paper.width, print.cols, cell.width, gap);
    let start_y = centered_start(paper.height, print.rows, cell.height, gap);
    let step_x = cell.width as i64 + gap as i64;
    let step_y = cell.height as i64 + gap as i64;

    let mut placements = Vec::with_capacity(print.count() as usize);
    for row in 0..print.rows {
        for col in 0..print.cols {
            placements.push(Placement {
                row,
                col,
                x: saturate_i32(start_x + col as i64 * step_x),
                y: saturate_i32(start_y + row as i64 * step_y),
                width: cell.width,
                height: cell.height,
            });
        }
    }

    let cut_guides = if options.cut_lines {
        let mark = Float::round(CUT_MARK_MM * px_per_mm) as i32;
        placements.iter().flat_map(|p| corner_marks(p, mark)).collect()
    } else {
        Vec::new()
    };

    let grid = PlacementGrid {
        paper,
        cell,
        source: photo,
        gap_px: gap,
        placements,
        cut_guides,
    };
    if grid.overflows_paper() {
        tracing::debug!(
            layout = print.id,
            spec = spec.id,
            paper_w = paper.width,
            paper_h = paper.height,
            "print grid larger than paper"
        );
    }
    grid
}

/// Floored offset that centers `n` cells of `cell` px with `gap` px between
/// them on `paper` px.
fn centered_start(paper: u32, n: u32, cell: u32, gap: u32) -> i64 {
    let n = n as i64;
    let total = (n * cell as i64).saturating_add((n - 1).saturating_mul(gap as i64));
    (paper as i64 - total).div_euclid(2)
}

fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Two marks per corner, each running outward from the corner along one
/// edge's extension: top-left, top-right, bottom-left, bottom-right.
fn corner_marks(p: &Placement, len: i32) -> [Segment; 8] {
    let (l, t) = (p.x, p.y);
    let r = p.x.saturating_add_unsigned(p.width);
    let b = p.y.saturating_add_unsigned(p.height);
    [
        Segment::new(l.saturating_sub(len), t, l, t),
        Segment::new(l, t.saturating_sub(len), l, t),
        Segment::new(r, t.saturating_sub(len), r, t),
        Segment::new(r, t, r.saturating_add(len), t),
        Segment::new(l.saturating_sub(len), b, l, b),
        Segment::new(l, b, l, b.saturating_add(len)),
        Segment::new(r, b, r.saturating_add(len), b),
        Segment::new(r, b, r, b.saturating_add(len)),
    ]
}

/// PDF page size in points for a raster of `size` pixels printed at `dpi`.
pub fn pdf_page_points(size: Size, dpi: u32) -> (u32, u32) {
    let to_pt = |px: u32| Float::round(px as f64 / dpi as f64 * POINTS_PER_INCH) as u32;
    (to_pt(size.width), to_pt(size.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, GRID_2X2, GRID_2X3, GRID_2X4, SINGLE};

    const PHOTO: Size = Size::new(413, 531);

    fn sheet(grid: &PrintLayout) -> PlacementGrid {
        layout(PHOTO, &catalog::PASSPORT_KG, grid, PrintOptions::default())
    }

    #[test]
    fn two_by_two_on_10x15() {
        let g = sheet(&GRID_2X2);
        assert_eq!(g.paper, Size::new(1181, 1772));
        assert_eq!(g.cell, Size::new(413, 531));
        assert_eq!(g.gap_px, 24);
        // total 850×1086 → start (165, 343)
        let xy: Vec<(i32, i32)> = g.placements.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(xy, [(165, 343), (602, 343), (165, 898), (602, 898)]);
        assert_eq!((g.placements[1].row, g.placements[1].col), (0, 1));
        assert_eq!((g.placements[2].row, g.placements[2].col), (1, 0));
        assert!(!g.overflows_paper());
    }

    #[test]
    fn single_auto_sized_paper() {
        let g = sheet(&SINGLE);
        assert_eq!(g.paper, Size::new(413 + 48, 531 + 48));
        assert_eq!(g.placements.len(), 1);
        assert_eq!((g.placements[0].x, g.placements[0].y), (24, 24));
    }

    #[test]
    fn single_auto_sized_with_zero_gap() {
        let options = PrintOptions {
            gap_mm: 0.0,
            cut_lines: false,
        };
        let g = layout(PHOTO, &catalog::PASSPORT_KG, &SINGLE, options);
        assert_eq!(g.paper, g.cell);
        assert_eq!((g.placements[0].x, g.placements[0].y), (0, 0));
        assert!(g.cut_guides.is_empty());
    }

    #[test]
    fn two_by_three_spacing() {
        let g = sheet(&GRID_2X3);
        assert_eq!(g.placements.len(), 6);
        for pair in g.placements.windows(2) {
            if pair[0].row == pair[1].row {
                assert_eq!(pair[1].x - pair[0].x, 413 + 24);
            } else {
                assert_eq!(pair[1].y - pair[0].y, 531 + 24);
            }
        }
    }

    #[test]
    fn two_by_four_on_a4() {
        let g = sheet(&GRID_2X4);
        assert_eq!(g.paper, Size::new(2480, 3508));
        assert_eq!(g.placements.len(), 8);
        let (x, y, w, h) = g.content_bounds().unwrap();
        // Centered within a pixel.
        assert!((x - (2480 - x - w as i32)).abs() <= 1);
        assert!((y - (3508 - y - h as i32)).abs() <= 1);
    }

    #[test]
    fn oversized_grid_starts_negative() {
        let big = PrintLayout::custom_grid(4, 4, Some(PaperSize::PHOTO_10X15)).unwrap();
        let g = sheet(&big);
        assert!(g.placements[0].x < 0);
        assert!(g.placements[0].y < 0);
        assert!(g.overflows_paper());
    }

    #[test]
    fn huge_gap_saturates_instead_of_overflowing() {
        let options = PrintOptions {
            gap_mm: 1e10,
            cut_lines: true,
        };
        let g = layout(PHOTO, &catalog::PASSPORT_KG, &SINGLE, options);
        assert_eq!(g.gap_px, u32::MAX);
        assert_eq!(g.paper, Size::new(u32::MAX, u32::MAX));
        assert_eq!(g.placements.len(), 1);
        assert_eq!(g.cut_guides.len(), 8);
        assert!(!g.overflows_paper());

        let g = layout(PHOTO, &catalog::PASSPORT_KG, &GRID_2X4, options);
        assert_eq!(g.placements.len(), 8);
        assert!(g.overflows_paper());
    }

    #[test]
    fn checked_options_bound_the_gap() {
        assert_eq!(PrintOptions::new(2.0, true), Ok(PrintOptions::default()));
        assert!(PrintOptions::new(0.0, false).is_ok());
        assert!(PrintOptions::new(MAX_GAP_MM, true).is_ok());
        for gap in [1e10, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(PrintOptions::new(gap, true), Err(SpecError::InvalidGap), "{gap}");
        }
    }

    #[test]
    fn floored_start_for_odd_slack() {
        // paper 10, one cell of 7 → slack 3 → start 1; negative slack -3 → -2.
        assert_eq!(centered_start(10, 1, 7, 0), 1);
        assert_eq!(centered_start(4, 1, 7, 0), -2);
    }

    #[test]
    fn cut_guides_per_corner() {
        let g = sheet(&GRID_2X2);
        assert_eq!(g.cut_guides.len(), 4 * 8);
        let mark = 59; // round(5mm at 300dpi) = round(59.06)
        assert!(g.cut_guides.iter().all(|s| s.length() == mark));
        // First cell's top-left corner.
        assert_eq!(g.cut_guides[0], Segment::new(165 - mark as i32, 343, 165, 343));
        assert_eq!(g.cut_guides[1], Segment::new(165, 343 - mark as i32, 165, 343));
        let horizontal = g.cut_guides.iter().filter(|s| s.is_horizontal()).count();
        assert_eq!(horizontal, 16);
    }

    #[test]
    fn pixel_spec_uses_its_own_dpi() {
        let photo = Size::new(600, 600);
        let g = layout(photo, &catalog::LINKEDIN, &GRID_2X2, PrintOptions::default());
        // 72 dpi: 100×150mm → 283×425, gap 2mm → 6px
        assert_eq!(g.paper, Size::new(283, 425));
        assert_eq!(g.gap_px, 6);
        assert_eq!(g.cell, Size::new(600, 600));
        assert!(g.overflows_paper());
    }

    #[test]
    fn preview_downscales_only() {
        let g = sheet(&GRID_2X2);
        assert_eq!(g.preview_size(600), Size::new(600, 900));
        let small = sheet(&SINGLE);
        assert_eq!(small.preview_size(600), small.paper);
    }

    #[test]
    fn custom_grid_rejects_empty() {
        assert_eq!(PrintLayout::custom_grid(0, 2, None), Err(SpecError::EmptyGrid));
        assert_eq!(
            PrintLayout::custom_grid(2, 2, Some(PaperSize::new("bad", 0.0, 10.0))),
            Err(SpecError::InvalidPaper)
        );
        let g = PrintLayout::custom_grid(3, 1, None).unwrap();
        assert_eq!(g.count(), 3);
        assert_eq!(g.id, "custom_grid");
    }

    #[test]
    fn pdf_points() {
        assert_eq!(pdf_page_points(Size::new(413, 531), 300), (99, 127));
        assert_eq!(pdf_page_points(Size::new(600, 600), 72), (600, 600));
    }
}
