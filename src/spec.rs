//! Document photo standards.
//!
//! A [`DocumentSpec`] is an immutable description of one official photo
//! standard: target aspect ratio, physical or pixel size, print density,
//! background requirement, acceptable face prominence, and the ideal eye line.
//!
//! # Example
//!
//! ```
//! use zenidphoto::{AspectRatio, DocumentSpec, Size};
//!
//! let spec = DocumentSpec::custom(35, 45, zenidphoto::Background::white()).unwrap();
//! assert_eq!(spec.ratio, AspectRatio::new(7, 9).unwrap());
//! assert_eq!(spec.required_pixels(), Size::new(414, 532));
//! ```

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

use crate::color::Rgb;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Print density used when a spec doesn't name one.
pub const DEFAULT_DPI: u32 = 300;

/// Relative tolerance between a declared ratio and the declared size.
const RATIO_SIZE_TOLERANCE: f64 = 0.005;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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

    /// Whether either axis is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Downscale to at most `max_width` wide, keeping the aspect ratio and
    /// rounding both axes. Never upscales.
    pub fn scaled_to_width(&self, max_width: u32) -> Size {
        let scale = (max_width as f64 / self.width as f64).min(1.0);
        Size::new(
            Float::round(self.width as f64 * scale) as u32,
            Float::round(self.height as f64 * scale) as u32,
        )
    }
}

/// Aspect ratio as a reduced integer pair `w:h`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    w: u32,
    h: u32,
}

impl AspectRatio {
    /// Create a ratio, reducing it by the greatest common divisor.
    ///
    /// `AspectRatio::new(35, 45)` is `7:9`.
    pub const fn new(w: u32, h: u32) -> Result<Self, SpecError> {
        if w == 0 || h == 0 {
            return Err(SpecError::ZeroRatio);
        }
        let d = gcd(w, h);
        Ok(Self { w: w / d, h: h / d })
    }

    /// Catalog constructor for ratios already known to be valid.
    pub(crate) const fn reduced(w: u32, h: u32) -> Self {
        let d = gcd(w, h);
        Self { w: w / d, h: h / d }
    }

    /// Width term.
    pub const fn w(&self) -> u32 {
        self.w
    }

    /// Height term.
    pub const fn h(&self) -> u32 {
        self.h
    }

    /// `w / h` as a float.
    pub fn value(&self) -> f64 {
        self.w as f64 / self.h as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}

impl FromStr for AspectRatio {
    type Err = SpecError;

    /// Parse `"W:H"`. Whitespace around either term is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once(':').ok_or(SpecError::InvalidRatio)?;
        let w: u32 = w.trim().parse().map_err(|_| SpecError::InvalidRatio)?;
        let h: u32 = h.trim().parse().map_err(|_| SpecError::InvalidRatio)?;
        Self::new(w, h)
    }
}

const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// How a spec expresses its output size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SizeMode {
    /// Physical print size at a given resolution.
    Physical {
        width_mm: f64,
        height_mm: f64,
        dpi: u32,
    },
    /// Exact pixel size. `dpi` is only the nominal density used when the
    /// photo is placed on paper; resolution checks ignore it.
    Pixel { width: u32, height: u32, dpi: u32 },
}

impl SizeMode {
    /// Print density in dots per inch.
    pub const fn dpi(&self) -> u32 {
        match *self {
            Self::Physical { dpi, .. } | Self::Pixel { dpi, .. } => dpi,
        }
    }

    /// Whether the size is given directly in pixels.
    pub const fn is_pixel(&self) -> bool {
        matches!(self, Self::Pixel { .. })
    }

    /// Declared width/height in the mode's own unit.
    fn extent(&self) -> (f64, f64) {
        match *self {
            Self::Physical {
                width_mm,
                height_mm,
                ..
            } => (width_mm, height_mm),
            Self::Pixel { width, height, .. } => (width as f64, height as f64),
        }
    }
}

/// Required photo background.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    /// Any background is accepted.
    Any,
    /// A specific solid color.
    Fixed(Rgb),
}

impl Background {
    /// Plain white, the most common requirement.
    pub const fn white() -> Self {
        Self::Fixed(Rgb::WHITE)
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Fixed(c) => write!(f, "{c}"),
        }
    }
}

/// Acceptable face-height-to-crop-height range, in percent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl FaceRange {
    /// Create a range; `min` must be below `max`.
    pub fn new(min: f64, max: f64) -> Result<Self, SpecError> {
        if !(min > 0.0 && min < max && max <= 100.0) {
            return Err(SpecError::InvalidFaceRange);
        }
        Ok(Self { min, max })
    }

    /// Midpoint of the range, the target face prominence.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Whether `percent` lies within the inclusive range.
    pub fn contains(&self, percent: f64) -> bool {
        percent >= self.min && percent <= self.max
    }
}

/// One document-photo standard.
///
/// Catalog entries live in [`crate::catalog`]. User-parameterized specs are
/// built through [`DocumentSpec::new`] or [`DocumentSpec::custom`], which check
/// the invariants the engines rely on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DocumentSpec {
    /// Stable identifier, e.g. `"passport_kg"`.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Target aspect ratio.
    pub ratio: AspectRatio,
    /// Output size.
    pub size: SizeMode,
    /// Background requirement.
    pub background: Background,
    /// Acceptable face percent.
    pub face: FaceRange,
    /// Ideal eye-line position as a fraction of crop height from the top.
    pub eye_line: f64,
}

impl DocumentSpec {
    /// Catalog constructor for a physically sized spec.
    pub(crate) const fn physical(
        id: &'static str,
        name: &'static str,
        width_mm: u32,
        height_mm: u32,
        background: Background,
        face: (f64, f64),
        eye_line: f64,
    ) -> Self {
        Self {
            id,
            name,
            ratio: AspectRatio::reduced(width_mm, height_mm),
            size: SizeMode::Physical {
                width_mm: width_mm as f64,
                height_mm: height_mm as f64,
                dpi: DEFAULT_DPI,
            },
            background,
            face: FaceRange {
                min: face.0,
                max: face.1,
            },
            eye_line,
        }
    }

    /// Build a spec, checking every invariant.
    pub fn new(
        id: &'static str,
        name: &'static str,
        ratio: AspectRatio,
        size: SizeMode,
        background: Background,
        face: FaceRange,
        eye_line: f64,
    ) -> Result<Self, SpecError> {
        let spec = Self {
            id,
            name,
            ratio,
            size,
            background,
            face,
            eye_line,
        };
        spec.check()?;
        Ok(spec)
    }

    /// A custom physical spec of `width_mm × height_mm`, derived from the
    /// catalog's custom template.
    pub fn custom(width_mm: u32, height_mm: u32, background: Background) -> Result<Self, SpecError> {
        let template = crate::catalog::CUSTOM;
        Self::new(
            template.id,
            template.name,
            AspectRatio::new(width_mm, height_mm)?,
            SizeMode::Physical {
                width_mm: width_mm as f64,
                height_mm: height_mm as f64,
                dpi: template.size.dpi(),
            },
            background,
            template.face,
            template.eye_line,
        )
    }

    /// Verify the spec invariants.
    pub fn check(&self) -> Result<(), SpecError> {
        let (w, h) = self.size.extent();
        if !(w > 0.0 && h > 0.0) {
            return Err(SpecError::ZeroSize);
        }
        if self.size.dpi() == 0 {
            return Err(SpecError::ZeroDpi);
        }
        let declared = w / h;
        let ratio = self.ratio.value();
        if Float::abs(declared - ratio) / ratio > RATIO_SIZE_TOLERANCE {
            return Err(SpecError::RatioMismatch);
        }
        FaceRange::new(self.face.min, self.face.max)?;
        if !(self.eye_line > 0.0 && self.eye_line < 1.0) {
            return Err(SpecError::EyeLineOutOfRange);
        }
        Ok(())
    }

    /// Pixels per millimetre at the spec's print density.
    pub fn px_per_mm(&self) -> f64 {
        self.size.dpi() as f64 / MM_PER_INCH
    }

    /// Minimum pixel size a compliant photo needs, rounded up.
    pub fn required_pixels(&self) -> Size {
        match self.size {
            SizeMode::Pixel { width, height, .. } => Size::new(width, height),
            SizeMode::Physical {
                width_mm,
                height_mm,
                dpi,
            } => {
                let scale = dpi as f64 / MM_PER_INCH;
                Size::new(
                    Float::ceil(width_mm * scale) as u32,
                    Float::ceil(height_mm * scale) as u32,
                )
            }
        }
    }

    /// Pixel size of one printed copy, rounded to the nearest pixel.
    pub fn print_pixels(&self) -> Size {
        match self.size {
            SizeMode::Pixel { width, height, .. } => Size::new(width, height),
            SizeMode::Physical {
                width_mm,
                height_mm,
                ..
            } => {
                let scale = self.px_per_mm();
                Size::new(
                    Float::round(width_mm * scale) as u32,
                    Float::round(height_mm * scale) as u32,
                )
            }
        }
    }

    /// Size as shown to users: `"35×45 mm"` or `"600×600 px"`.
    pub fn size_label(&self) -> SizeLabel {
        SizeLabel(self.size)
    }
}

/// Display adapter returned by [`DocumentSpec::size_label`].
#[derive(Copy, Clone, Debug)]
pub struct SizeLabel(SizeMode);

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SizeMode::Physical {
                width_mm,
                height_mm,
                ..
            } => write!(f, "{width_mm}×{height_mm} mm"),
            SizeMode::Pixel { width, height, .. } => write!(f, "{width}×{height} px"),
        }
    }
}

/// Invalid document spec or print layout parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// A ratio term is zero.
    #[error("aspect ratio terms must be non-zero")]
    ZeroRatio,
    /// A ratio string is not `W:H`.
    #[error("aspect ratio must be written as W:H")]
    InvalidRatio,
    /// The declared ratio doesn't match the declared size.
    #[error("aspect ratio does not match the declared size")]
    RatioMismatch,
    /// Width or height is zero.
    #[error("size must be non-zero")]
    ZeroSize,
    /// Print density is zero.
    #[error("dpi must be non-zero")]
    ZeroDpi,
    /// Face range is empty or outside 0–100%.
    #[error("face range must satisfy 0 < min < max <= 100")]
    InvalidFaceRange,
    /// Eye line is not strictly between 0 and 1.
    #[error("eye line must lie strictly between 0 and 1")]
    EyeLineOutOfRange,
    /// A print grid has zero columns or rows.
    #[error("print grid needs at least one column and one row")]
    EmptyGrid,
    /// A paper size is zero or negative.
    #[error("paper size must be positive")]
    InvalidPaper,
    /// A print gap is negative, not finite, or above [`MAX_GAP_MM`](crate::print::MAX_GAP_MM).
    #[error("print gap must be between 0 and 50 mm")]
    InvalidGap,
}
