//! Compliance checks for a candidate crop.
//!
//! [`validate`] runs a fixed battery of geometric checks and returns one
//! [`ValidationResult`] per check, in a stable order. Each result carries a
//! detail string with the measured value and the requirement; it is the only
//! explanation users see, so it is formatted with fixed precision and is
//! identical for identical inputs.
//!
//! # Example
//!
//! ```
//! use zenidphoto::{Check, FaceRect, Size, catalog, crop, validate};
//!
//! let spec = &catalog::PASSPORT_KG;
//! let image = Size::new(1000, 1000);
//! let face = FaceRect::with_center(0.3, 0.2, 0.4, 0.4, 0.5, 0.4).unwrap();
//! let rect = crop::crop_from_face(image, &face, spec);
//!
//! let results = validate::validate(spec, &rect, image, Some(&face));
//! assert_eq!(results[2].check, Check::FaceSize);
//! assert!(results[2].pass);
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use num_traits::Float;

use crate::crop::CropRect;
use crate::face::FaceRect;
use crate::spec::{DocumentSpec, Size};

/// Maximum relative deviation from the spec ratio (exclusive).
pub const RATIO_TOLERANCE: f64 = 0.02;
/// Share of the required pixel size that still passes; exports may upscale.
pub const RESOLUTION_FLOOR: f64 = 0.8;
/// Maximum eye-line deviation as a fraction of crop height (exclusive).
pub const EYE_LINE_TOLERANCE: f64 = 0.08;
/// Maximum horizontal face offset as a fraction of crop width (exclusive).
pub const CENTERING_TOLERANCE: f64 = 0.08;

/// Which rule a result reports on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Check {
    AspectRatio,
    Resolution,
    FaceSize,
    EyeLine,
    Centering,
    /// Emitted, failing, in place of the face checks when no face was found.
    FaceDetected,
}

impl Check {
    /// Label shown next to the result.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AspectRatio => "Aspect ratio",
            Self::Resolution => "Resolution",
            Self::FaceSize => "Face size",
            Self::EyeLine => "Eye line",
            Self::Centering => "Centering",
            Self::FaceDetected => "Face",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationResult {
    pub check: Check,
    pub pass: bool,
    /// Measured value and requirement, e.g. `"75.0% (need 70-80%)"`.
    pub detail: String,
}

impl ValidationResult {
    fn new(check: Check, pass: bool, detail: String) -> Self {
        Self {
            check,
            pass,
            detail,
        }
    }
}

/// Whether every result passed. An empty list hasn't been validated and
/// doesn't pass.
pub fn all_passed(results: &[ValidationResult]) -> bool {
    !results.is_empty() && results.iter().all(|r| r.pass)
}

/// Validate `crop` of an `image`-sized source against `spec`.
///
/// Order: aspect ratio, resolution, then face size, eye line and centering
/// when `face` is present, or a single failing [`Check::FaceDetected`] when
/// it isn't.
pub fn validate(
    spec: &DocumentSpec,
    crop: &CropRect,
    image: Size,
    face: Option<&FaceRect>,
) -> Vec<ValidationResult> {
    let mut results = Vec::with_capacity(5);
    results.push(check_aspect(spec, crop));
    results.push(check_resolution(spec, crop));

    match face {
        Some(face) => {
            results.push(check_face_size(spec, crop, image, face));
            results.push(check_eye_line(spec, crop, image, face));
            results.push(check_centering(crop, image, face));
        }
        None => results.push(ValidationResult::new(
            Check::FaceDetected,
            false,
            String::from("not detected"),
        )),
    }

    tracing::trace!(
        spec = spec.id,
        failed = results.iter().filter(|r| !r.pass).count(),
        "validated crop"
    );
    results
}

/// [`validate`] for an editing session that may not have a spec or crop yet.
/// Missing either yields no results.
pub fn validate_session(
    spec: Option<&DocumentSpec>,
    crop: Option<&CropRect>,
    image: Size,
    face: Option<&FaceRect>,
) -> Vec<ValidationResult> {
    match (spec, crop) {
        (Some(spec), Some(crop)) => validate(spec, crop, image, face),
        _ => Vec::new(),
    }
}

fn ratio_within(rel_diff: f64) -> bool {
    rel_diff < RATIO_TOLERANCE
}

fn check_aspect(spec: &DocumentSpec, crop: &CropRect) -> ValidationResult {
    let expected = spec.ratio.value();
    let actual = crop.aspect();
    let rel_diff = Float::abs(actual - expected) / expected;
    let pass = ratio_within(rel_diff);
    ValidationResult::new(
        Check::AspectRatio,
        pass,
        format!(
            "{} required, {:.3} measured ({:.1}% off, limit {:.0}%)",
            spec.ratio,
            actual,
            rel_diff * 100.0,
            RATIO_TOLERANCE * 100.0
        ),
    )
}

fn check_resolution(spec: &DocumentSpec, crop: &CropRect) -> ValidationResult {
    let need = spec.required_pixels();
    let pass = crop.width >= need.width as f64 * RESOLUTION_FLOOR
        && crop.height >= need.height as f64 * RESOLUTION_FLOOR;
    ValidationResult::new(
        Check::Resolution,
        pass,
        format!(
            "{}×{}px (need ≥{}×{})",
            Float::round(crop.width) as u64,
            Float::round(crop.height) as u64,
            need.width,
            need.height
        ),
    )
}

fn check_face_size(spec: &DocumentSpec, crop: &CropRect, image: Size, face: &FaceRect) -> ValidationResult {
    let percent = face.height_px(image) / crop.height * 100.0;
    ValidationResult::new(
        Check::FaceSize,
        spec.face.contains(percent),
        format!("{:.1}% (need {}-{}%)", percent, spec.face.min, spec.face.max),
    )
}

fn check_eye_line(spec: &DocumentSpec, crop: &CropRect, image: Size, face: &FaceRect) -> ValidationResult {
    let in_crop = (face.eye_y() * image.height as f64 - crop.y) / crop.height;
    let pass = Float::abs(in_crop - spec.eye_line) < EYE_LINE_TOLERANCE;
    ValidationResult::new(
        Check::EyeLine,
        pass,
        format!(
            "{:.1}% from top (ideal {:.0}%, tolerance ±{:.0}%)",
            in_crop * 100.0,
            spec.eye_line * 100.0,
            EYE_LINE_TOLERANCE * 100.0
        ),
    )
}

fn check_centering(crop: &CropRect, image: Size, face: &FaceRect) -> ValidationResult {
    let face_x = face.x_center * image.width as f64;
    let offset = Float::abs(face_x - crop.center().x) / crop.width;
    let pass = offset < CENTERING_TOLERANCE;
    ValidationResult::new(
        Check::Centering,
        pass,
        format!(
            "{} ({:.1}% off, limit {:.0}%)",
            if pass { "centered" } else { "off-center" },
            offset * 100.0,
            CENTERING_TOLERANCE * 100.0
        ),
    )
}
