//! Crop region derivation.
//!
//! Computes the region of the source image that becomes the document photo,
//! either by centering on the image or by sizing the crop around a detected
//! face so the face fills the spec's target share of the crop height.
//!
//! # Example
//!
//! ```
//! use zenidphoto::{FaceRect, Size, catalog, crop};
//!
//! let spec = &catalog::PASSPORT_KG;
//! let face = FaceRect::with_center(0.3, 0.2, 0.4, 0.4, 0.5, 0.4).unwrap();
//! let rect = crop::crop_from_face(Size::new(1000, 1000), &face, spec);
//!
//! // Face is 400px tall and should fill 75% of the crop.
//! assert!((rect.height - 533.33).abs() < 0.01);
//! assert!((rect.width / rect.height - 7.0 / 9.0).abs() < 1e-9);
//! ```

use num_traits::Float;

use crate::face::FaceRect;
use crate::spec::{DocumentSpec, Size};

/// Share of the limiting image dimension covered by [`default_crop`].
pub const DEFAULT_FILL: f64 = 0.85;

/// A point in source-image pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Crop rectangle in source-image pixel coordinates.
///
/// Fractional: sizes derived from face geometry rarely land on whole pixels,
/// and repeated interactive edits must not accumulate rounding drift. Use
/// [`to_pixel_rect`](Self::to_pixel_rect) when handing the crop to an encoder.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Create a crop rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `width / height`.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rect lies fully inside `(0, 0, image.width, image.height)`.
    pub fn is_within(&self, image: Size) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= image.width as f64
            && self.bottom() <= image.height as f64
    }

    /// Whether `p` lies strictly inside the rect.
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Round to whole pixels and clamp to the image.
    ///
    /// Edges are rounded independently so adjacent crops stay adjacent.
    /// Width and height are at least 1.
    pub fn to_pixel_rect(&self, image: Size) -> Rect {
        let max_w = image.width as f64;
        let max_h = image.height as f64;
        let x0 = Float::round(self.x.clamp(0.0, max_w));
        let y0 = Float::round(self.y.clamp(0.0, max_h));
        let x1 = Float::round(self.right().clamp(0.0, max_w));
        let y1 = Float::round(self.bottom().clamp(0.0, max_h));
        Rect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        }
        .clamp_to(image.width, image.height)
    }
}

/// Axis-aligned rectangle in whole pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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

    /// Clamp this rect to fit within `(0, 0, max_w, max_h)`.
    /// Width and height are clamped to at least 1.
    pub fn clamp_to(self, max_w: u32, max_h: u32) -> Self {
        let x = self.x.min(max_w.saturating_sub(1));
        let y = self.y.min(max_h.saturating_sub(1));
        let w = self.width.min(max_w.saturating_sub(x)).max(1);
        let h = self.height.min(max_h.saturating_sub(y)).max(1);
        Self {
            x,
            y,
            width: w,
            height: h,
        }
    }
}

/// Largest spec-ratio rectangle that fits the image, scaled to
/// [`DEFAULT_FILL`] of the limiting dimension and centered.
///
/// Used when no face was detected. `image` must be non-empty.
pub fn default_crop(image: Size, spec: &DocumentSpec) -> CropRect {
    let iw = image.width as f64;
    let ih = image.height as f64;
    let spec_ratio = spec.ratio.value();

    let (w, h) = if iw / ih > spec_ratio {
        // Image is wider than the spec: height limits.
        let h = ih * DEFAULT_FILL;
        (h * spec_ratio, h)
    } else {
        let w = iw * DEFAULT_FILL;
        (w, w / spec_ratio)
    };

    CropRect::new((iw - w) / 2.0, (ih - h) / 2.0, w, h)
}

/// Face-driven crop together with what the clamping step had to do.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceCrop {
    /// The crop, always inside the image.
    pub rect: CropRect,
    /// The ideal position was moved to keep the crop inside the image.
    pub shifted: bool,
    /// The ideal size exceeded the image and was cut down. The crop then no
    /// longer matches the spec's ratio or face percent.
    pub capped: bool,
}

/// Crop sized so the face fills the midpoint of the spec's face range.
///
/// See [`place_on_face`] for the full placement report.
pub fn crop_from_face(image: Size, face: &FaceRect, spec: &DocumentSpec) -> CropRect {
    place_on_face(image, face, spec).rect
}

/// Size and position a crop around `face`.
///
/// Height is `face_height / (midpoint(face range) / 100)`, width follows from
/// the spec ratio. The crop is centered on the face horizontally and placed so
/// the face center sits at the spec's eye line. Position is clamped into the
/// image; a crop larger than the image is capped to the image size rather than
/// rejected, and the validator reports the resulting non-compliance.
pub fn place_on_face(image: Size, face: &FaceRect, spec: &DocumentSpec) -> FaceCrop {
    let iw = image.width as f64;
    let ih = image.height as f64;

    let target = spec.face.midpoint() / 100.0;
    let crop_h = face.height_px(image) / target;
    let crop_w = crop_h * spec.ratio.value();

    let ideal_x = face.x_center * iw - crop_w / 2.0;
    let ideal_y = face.y_center * ih - crop_h * spec.eye_line;

    // Lower bound wins when the crop is larger than the image.
    let x = ideal_x.min(iw - crop_w).max(0.0);
    let y = ideal_y.min(ih - crop_h).max(0.0);
    let w = crop_w.min(iw);
    let h = crop_h.min(ih);

    let capped = crop_w > iw || crop_h > ih;
    let shifted = x != ideal_x || y != ideal_y;
    if capped {
        tracing::debug!(
            spec = spec.id,
            crop_w,
            crop_h,
            image_w = image.width,
            image_h = image.height,
            "face crop exceeds image, capped to image bounds"
        );
    } else if shifted {
        tracing::trace!(spec = spec.id, ideal_x, ideal_y, x, y, "face crop shifted into image");
    }

    FaceCrop {
        rect: CropRect::new(x, y, w, h),
        shifted,
        capped,
    }
}

/// [`crop_from_face`] when a face was detected, [`default_crop`] otherwise.
pub fn auto_crop(image: Size, face: Option<&FaceRect>, spec: &DocumentSpec) -> CropRect {
    match face {
        Some(face) => crop_from_face(image, face, spec),
        None => default_crop(image, spec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn face(x: f64, y: f64, w: f64, h: f64) -> FaceRect {
        FaceRect::new(x, y, w, h).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_crop_wide_image_height_limits() {
        let c = default_crop(Size::new(2000, 1000), &catalog::PASSPORT_KG);
        assert!(close(c.height, 850.0));
        assert!(close(c.width, 850.0 * 7.0 / 9.0));
        assert!(close(c.y, 75.0));
        assert!(close(c.x, (2000.0 - c.width) / 2.0));
    }

    #[test]
    fn default_crop_tall_image_width_limits() {
        let c = default_crop(Size::new(600, 2000), &catalog::PASSPORT_KG);
        assert!(close(c.width, 510.0));
        assert!(close(c.height, 510.0 * 9.0 / 7.0));
        assert!(close(c.x, 45.0));
        assert!(c.is_within(Size::new(600, 2000)));
    }

    #[test]
    fn default_crop_square_spec_on_square_image() {
        // Equal ratios take the width branch.
        let c = default_crop(Size::new(1000, 1000), &catalog::VISA_US);
        assert!(close(c.width, 850.0));
        assert!(close(c.height, 850.0));
        assert!(close(c.x, 75.0));
        assert!(close(c.y, 75.0));
    }

    #[test]
    fn default_crop_one_pixel_image() {
        let c = default_crop(Size::new(1, 1), &catalog::PASSPORT_KG);
        assert!(c.is_within(Size::new(1, 1)));
        assert!(close(c.aspect(), 7.0 / 9.0));
    }

    #[test]
    fn face_crop_concrete_scenario() {
        let f = FaceRect::with_center(0.3, 0.2, 0.4, 0.4, 0.5, 0.4).unwrap();
        let r = place_on_face(Size::new(1000, 1000), &f, &catalog::PASSPORT_KG);
        assert!(!r.capped);
        assert!(!r.shifted);
        assert!(close(r.rect.height, 400.0 / 0.75));
        assert!(close(r.rect.width, 400.0 / 0.75 * 7.0 / 9.0));
        assert!(close(r.rect.x, 500.0 - r.rect.width / 2.0));
        assert!(close(r.rect.y, 400.0 - r.rect.height * 0.45));
    }

    #[test]
    fn face_crop_shifted_at_left_edge() {
        // Face hugging the left edge: ideal x is negative.
        let f = face(0.0, 0.3, 0.1, 0.2);
        let r = place_on_face(Size::new(1000, 1000), &f, &catalog::PASSPORT_KG);
        assert!(r.shifted);
        assert!(!r.capped);
        assert_eq!(r.rect.x, 0.0);
        assert!(r.rect.is_within(Size::new(1000, 1000)));
        // Size is untouched by a shift.
        assert!(close(r.rect.height, 200.0 / 0.75));
    }

    #[test]
    fn face_crop_shifted_at_bottom_edge() {
        // Ideal y = 950 - 60 = 890, past the last valid origin 866.7.
        let f = face(0.4, 0.9, 0.1, 0.1);
        let r = place_on_face(Size::new(1000, 1000), &f, &catalog::PASSPORT_KG);
        assert!(r.shifted);
        assert!(close(r.rect.bottom(), 1000.0));
    }

    #[test]
    fn face_crop_capped_when_face_too_large() {
        // 90% tall face needs a 1200px crop in a 1000px image.
        let f = face(0.1, 0.05, 0.8, 0.9);
        let image = Size::new(1000, 1000);
        let r = place_on_face(image, &f, &catalog::PASSPORT_KG);
        assert!(r.capped);
        assert_eq!(r.rect.height, 1000.0);
        assert_eq!(r.rect.y, 0.0);
        assert!(r.rect.is_within(image));
        // Face percent is now above the midpoint.
        let pct = f.height_px(image) / r.rect.height * 100.0;
        assert!(pct > catalog::PASSPORT_KG.face.midpoint());
    }

    #[test]
    fn face_crop_capped_width_only_breaks_ratio() {
        // Narrow image, square spec: width overflows, height fits.
        let f = face(0.2, 0.4, 0.6, 0.2);
        let image = Size::new(200, 1000);
        let r = place_on_face(image, &f, &catalog::VISA_JAPAN);
        assert!(r.capped);
        assert_eq!(r.rect.width, 200.0);
        assert_eq!(r.rect.x, 0.0);
        assert!(close(r.rect.height, 200.0 / 0.65));
        assert!(r.rect.aspect() < 1.0);
    }

    #[test]
    fn auto_crop_dispatches() {
        let image = Size::new(1000, 800);
        let spec = &catalog::PASSPORT_KG;
        assert_eq!(auto_crop(image, None, spec), default_crop(image, spec));
        let f = face(0.4, 0.3, 0.2, 0.3);
        assert_eq!(auto_crop(image, Some(&f), spec), crop_from_face(image, &f, spec));
    }

    #[test]
    fn pixel_rect_rounds_edges() {
        let c = CropRect::new(10.4, 20.6, 100.2, 50.3);
        let r = c.to_pixel_rect(Size::new(1000, 1000));
        assert_eq!(r, Rect::new(10, 21, 101, 50));
    }

    #[test]
    fn pixel_rect_clamps_to_image() {
        let c = CropRect::new(-5.0, 990.0, 50.0, 50.0);
        let r = c.to_pixel_rect(Size::new(100, 1000));
        assert_eq!(r, Rect::new(0, 990, 45, 10));
    }

    #[test]
    fn contains_is_strict() {
        let c = CropRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(c.contains(Point::new(5.0, 5.0)));
        assert!(!c.contains(Point::new(0.0, 5.0)));
        assert!(!c.contains(Point::new(10.0, 5.0)));
    }
}
