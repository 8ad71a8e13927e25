//! Identity-document photo geometry: face-driven cropping, compliance
//! validation, and print-sheet tiling.
//!
//! Pure geometry. No pixel operations, no I/O, `no_std` compatible (with
//! `alloc`). Face detection, image decoding, and rendering are left to the
//! caller; this crate decides where the crop goes, whether it is compliant,
//! and where each copy lands on the paper.
//!
//! # Modules
//!
//! - [`spec`]: document standards, aspect ratios, size modes
//! - [`catalog`]: built-in document standards and print layouts
//! - [`face`]: normalized face rectangles from a detector
//! - [`crop`]: default and face-driven crop derivation
//! - [`edit`]: interactive crop drags and overlay guides
//! - [`validate`]: compliance checks with human-readable detail
//! - [`print`]: print-sheet tiling with trim marks
//! - `query`: query-string descriptors for custom specs (feature `query`)
//! - `svg`: diagrams of crops and sheets (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zenidphoto::{FaceRect, Size, catalog, crop, print, validate};
//!
//! let image = Size::new(1000, 1000);
//! let spec = &catalog::PASSPORT_KG;
//! let face = FaceRect::with_center(0.3, 0.2, 0.4, 0.4, 0.5, 0.4).unwrap();
//!
//! let rect = crop::auto_crop(image, Some(&face), spec);
//! let results = validate::validate(spec, &rect, image, Some(&face));
//! assert!(results.iter().any(|r| r.check == validate::Check::FaceSize && r.pass));
//!
//! let grid = print::layout(
//!     spec.print_pixels(),
//!     spec,
//!     &catalog::GRID_2X2,
//!     print::PrintOptions::default(),
//! );
//! assert_eq!(grid.placements.len(), 4);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod catalog;
pub mod color;
pub mod crop;
pub mod edit;
pub mod face;
pub mod print;
pub mod spec;
pub mod validate;

#[cfg(feature = "query")]
pub mod query;

#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: core types
pub use color::Rgb;
pub use crop::{CropRect, FaceCrop, Point, Rect, auto_crop, crop_from_face, default_crop};
pub use edit::{CropDrag, DragHandle, OverlayGuides, hit_test, overlay_guides};
pub use face::FaceRect;
pub use print::{PaperSize, Placement, PlacementGrid, PrintLayout, PrintOptions, Segment};
pub use spec::{AspectRatio, Background, DocumentSpec, FaceRange, Size, SizeMode, SpecError};
pub use validate::{Check, ValidationResult, all_passed};
