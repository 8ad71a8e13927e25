//! Detected face rectangles.
//!
//! Detectors report boxes in different shapes: some give a center, some only
//! the top-left corner and size, most work in pixels. [`FaceRect`] is the one
//! canonical form the geometry code consumes: normalized to `0.0..=1.0` of the
//! source image, with the center always populated.

use crate::spec::Size;

/// Fraction of face height, from the top of the box, used as the eye height
/// when the detector gives no center.
pub const EYE_HEIGHT_FRACTION: f64 = 0.35;

/// Normalized face bounding box relative to the source image.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub x_center: f64,
    pub y_center: f64,
    /// Whether the center came from the detector rather than `x + width / 2`.
    detected_center: bool,
}

impl FaceRect {
    /// Box without a detector-supplied center; the center is derived.
    ///
    /// Returns `None` for an empty box: no detection is represented by the
    /// absence of a `FaceRect`, never a zero-sized one.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
            x_center: x + width / 2.0,
            y_center: y + height / 2.0,
            detected_center: false,
        })
    }

    /// Box with an explicit center from the detector.
    pub fn with_center(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        x_center: f64,
        y_center: f64,
    ) -> Option<Self> {
        let mut face = Self::new(x, y, width, height)?;
        face.x_center = x_center;
        face.y_center = y_center;
        face.detected_center = true;
        Some(face)
    }

    /// Normalize a pixel-space detection against the image it came from.
    ///
    /// The center is the box center, recorded as detector-supplied.
    pub fn from_pixel_box(x_min: f64, y_min: f64, width: f64, height: f64, image: Size) -> Option<Self> {
        if image.is_empty() {
            return None;
        }
        let iw = image.width as f64;
        let ih = image.height as f64;
        Self::with_center(
            x_min / iw,
            y_min / ih,
            width / iw,
            height / ih,
            (x_min + width / 2.0) / iw,
            (y_min + height / 2.0) / ih,
        )
    }

    /// Whether the center was supplied by the detector.
    pub fn has_detected_center(&self) -> bool {
        self.detected_center
    }

    /// Estimated eye height, normalized.
    ///
    /// The detected center when there is one, otherwise
    /// [`EYE_HEIGHT_FRACTION`] of the way down the box.
    pub fn eye_y(&self) -> f64 {
        if self.detected_center {
            self.y_center
        } else {
            self.y + self.height * EYE_HEIGHT_FRACTION
        }
    }

    /// Face height in source pixels.
    pub fn height_px(&self, image: Size) -> f64 {
        self.height * image.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_center() {
        let f = FaceRect::new(0.3, 0.2, 0.4, 0.4).unwrap();
        assert!((f.x_center - 0.5).abs() < 1e-12);
        assert!((f.y_center - 0.4).abs() < 1e-12);
        assert!(!f.has_detected_center());
    }

    #[test]
    fn empty_box_is_no_detection() {
        assert!(FaceRect::new(0.5, 0.5, 0.0, 0.2).is_none());
        assert!(FaceRect::new(0.5, 0.5, 0.2, -0.1).is_none());
        assert!(FaceRect::new(0.5, 0.5, f64::NAN, 0.2).is_none());
    }

    #[test]
    fn eye_height_uses_detected_center() {
        let f = FaceRect::with_center(0.3, 0.2, 0.4, 0.4, 0.5, 0.42).unwrap();
        assert_eq!(f.eye_y(), 0.42);
    }

    #[test]
    fn eye_height_falls_back_to_fraction() {
        let f = FaceRect::new(0.3, 0.2, 0.4, 0.4).unwrap();
        assert!((f.eye_y() - 0.34).abs() < 1e-12);
    }

    #[test]
    fn pixel_box_normalizes() {
        let f = FaceRect::from_pixel_box(300.0, 100.0, 400.0, 200.0, Size::new(1000, 500)).unwrap();
        assert!((f.x - 0.3).abs() < 1e-12);
        assert!((f.y - 0.2).abs() < 1e-12);
        assert!((f.width - 0.4).abs() < 1e-12);
        assert!((f.height - 0.4).abs() < 1e-12);
        assert!((f.x_center - 0.5).abs() < 1e-12);
        assert!((f.y_center - 0.4).abs() < 1e-12);
        assert!(f.has_detected_center());
    }

    #[test]
    fn pixel_box_on_empty_image() {
        assert!(FaceRect::from_pixel_box(0.0, 0.0, 10.0, 10.0, Size::new(0, 10)).is_none());
    }
}
