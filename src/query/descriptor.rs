//! Descriptor records and their conversion to checked specs and layouts.

use num_traits::Float;

use crate::catalog;
use crate::print::{PaperSize, PrintLayout, PrintOptions};
use crate::spec::{AspectRatio, Background, DocumentSpec, FaceRange, SizeMode, SpecError};

/// Unit of a descriptor's `w`/`h`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Millimetres,
    Pixels,
}

/// Parsed custom-spec parameters. Unset fields fall back to
/// [`catalog::CUSTOM`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecDescriptor {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub unit: Option<Unit>,
    pub dpi: Option<u32>,
    pub ratio: Option<AspectRatio>,
    pub background: Option<Background>,
    pub face: Option<(f64, f64)>,
    pub eye_line: Option<f64>,
}

impl SpecDescriptor {
    /// Build a checked [`DocumentSpec`].
    ///
    /// The ratio defaults to `width:height`. Missing dimensions come from the
    /// template: its size in millimetres, or its print size in pixels when
    /// `unit=px`.
    pub fn to_spec(&self) -> Result<DocumentSpec, SpecError> {
        let template = catalog::CUSTOM;
        let unit = self.unit.unwrap_or_default();
        let dpi = self.dpi.unwrap_or(template.size.dpi());

        let (default_w, default_h) = match (unit, template.size) {
            (
                Unit::Millimetres,
                SizeMode::Physical {
                    width_mm,
                    height_mm,
                    ..
                },
            ) => (
                Float::round(width_mm) as u32,
                Float::round(height_mm) as u32,
            ),
            (Unit::Millimetres, SizeMode::Pixel { width, height, .. }) => {
                let px_per_mm = template.px_per_mm();
                (
                    Float::round(width as f64 / px_per_mm) as u32,
                    Float::round(height as f64 / px_per_mm) as u32,
                )
            }
            (Unit::Pixels, _) => {
                let px = template.print_pixels();
                (px.width, px.height)
            }
        };
        let width = self.width.unwrap_or(default_w);
        let height = self.height.unwrap_or(default_h);
        let ratio = match self.ratio {
            Some(r) => r,
            None => AspectRatio::new(width, height)?,
        };
        let size = match unit {
            Unit::Millimetres => SizeMode::Physical {
                width_mm: width as f64,
                height_mm: height as f64,
                dpi,
            },
            Unit::Pixels => SizeMode::Pixel { width, height, dpi },
        };
        let face = match self.face {
            Some((min, max)) => FaceRange::new(min, max)?,
            None => template.face,
        };

        DocumentSpec::new(
            template.id,
            template.name,
            ratio,
            size,
            self.background.unwrap_or(template.background),
            face,
            self.eye_line.unwrap_or(template.eye_line),
        )
    }
}

/// Parsed print-grid parameters. Unset fields fall back to
/// [`catalog::CUSTOM_GRID`] and [`PrintOptions::default`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutDescriptor {
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    /// `Some(None)` asks for an auto-sized sheet.
    pub paper: Option<Option<PaperSize>>,
    pub gap_mm: Option<f64>,
    pub cut_lines: Option<bool>,
}

impl LayoutDescriptor {
    /// Build a checked [`PrintLayout`] and its options.
    pub fn to_layout(&self) -> Result<(PrintLayout, PrintOptions), SpecError> {
        let template = catalog::CUSTOM_GRID;
        let layout = PrintLayout::custom_grid(
            self.cols.unwrap_or(template.cols),
            self.rows.unwrap_or(template.rows),
            self.paper.unwrap_or(template.paper),
        )?;
        let defaults = PrintOptions::default();
        let options = PrintOptions::new(
            self.gap_mm.unwrap_or(defaults.gap_mm),
            self.cut_lines.unwrap_or(defaults.cut_lines),
        )?;
        Ok((layout, options))
    }
}
