//! Interactive crop adjustment policy.
//!
//! Pointer handling lives with the UI; this module decides what a press hits
//! and what rectangle a drag produces. Corner drags keep the opposite corner
//! fixed and the aspect ratio locked, with width as the independent variable.
//! Move drags translate the crop and keep it inside the image.

use num_traits::Float;

use crate::crop::{CropRect, Point};
use crate::spec::{AspectRatio, DocumentSpec, Size};

/// Distance from a corner, per axis, that still grabs its handle.
pub const HANDLE_TOLERANCE: f64 = 20.0;

/// Smallest crop width a resize produces, unless the image edge is closer.
pub const MIN_CROP_SIDE: f64 = 50.0;

/// What a pointer press grabbed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragHandle {
    /// Inside the crop: translate.
    Move,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DragHandle {
    const CORNERS: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Whether dragging this handle moves the right edge.
    fn is_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    /// Corner position on `crop`. `Move` maps to the top-left corner.
    fn anchor(self, crop: &CropRect) -> Point {
        match self {
            Self::Move | Self::TopLeft => Point::new(crop.x, crop.y),
            Self::TopRight => Point::new(crop.right(), crop.y),
            Self::BottomLeft => Point::new(crop.x, crop.bottom()),
            Self::BottomRight => Point::new(crop.right(), crop.bottom()),
        }
    }
}

/// Find the handle under `p`.
///
/// Corners are tested first, in top-left, top-right, bottom-left,
/// bottom-right order; then the strict interior of the crop yields
/// [`DragHandle::Move`].
pub fn hit_test(crop: &CropRect, p: Point, tolerance: f64) -> Option<DragHandle> {
    DragHandle::CORNERS
        .into_iter()
        .find(|h| {
            let c = h.anchor(crop);
            Float::abs(p.x - c.x) < tolerance && Float::abs(p.y - c.y) < tolerance
        })
        .or_else(|| crop.contains(p).then_some(DragHandle::Move))
}

/// An in-progress drag. Every update is computed from the rectangle and
/// pointer position at the start, so the result doesn't drift.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropDrag {
    handle: DragHandle,
    start: CropRect,
    origin: Point,
}

impl CropDrag {
    /// Start dragging `handle` of `crop` from pointer position `origin`.
    pub fn begin(handle: DragHandle, crop: CropRect, origin: Point) -> Self {
        Self {
            handle,
            start: crop,
            origin,
        }
    }

    /// The handle being dragged.
    pub fn handle(&self) -> DragHandle {
        self.handle
    }

    /// Crop for the pointer at `p`.
    pub fn update(&self, p: Point, image: Size, ratio: AspectRatio) -> CropRect {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        let s = self.start;

        if self.handle == DragHandle::Move {
            let max_x = (image.width as f64 - s.width).max(0.0);
            let max_y = (image.height as f64 - s.height).max(0.0);
            return CropRect::new(
                (s.x + dx).clamp(0.0, max_x),
                (s.y + dy).clamp(0.0, max_y),
                s.width,
                s.height,
            );
        }

        let dragged = if self.handle.is_right() {
            s.width + dx
        } else {
            s.width - dx
        };
        let r = ratio.value();
        let (room_w, room_h) = self.room(image);
        let mut w = dragged.max(MIN_CROP_SIDE).min(room_w);
        let mut h = w / r;
        if h > room_h {
            h = room_h;
            w = (h * r).min(room_w);
        }

        // Opposite corner stays put.
        let (x, y) = match self.handle {
            DragHandle::TopLeft => (s.right() - w, s.bottom() - h),
            DragHandle::TopRight => (s.x, s.bottom() - h),
            DragHandle::BottomLeft => (s.right() - w, s.y),
            DragHandle::BottomRight | DragHandle::Move => (s.x, s.y),
        };
        CropRect::new(x, y, w, h)
    }

    /// Width and height available from the fixed corner to the image edges.
    fn room(&self, image: Size) -> (f64, f64) {
        let s = self.start;
        let iw = image.width as f64;
        let ih = image.height as f64;
        match self.handle {
            DragHandle::TopLeft => (s.right(), s.bottom()),
            DragHandle::TopRight => (iw - s.x, s.bottom()),
            DragHandle::BottomLeft => (s.right(), ih - s.y),
            DragHandle::BottomRight | DragHandle::Move => (iw - s.x, ih - s.y),
        }
    }
}

/// An axis-aligned ellipse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
}

/// Guide geometry drawn over the crop while editing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayGuides {
    /// Horizontal line at the spec's eye line, spanning the crop.
    pub eye_line: (Point, Point),
    /// Oval showing where the head should sit.
    pub face_oval: Ellipse,
    /// Corner handle centers, top-left, top-right, bottom-left, bottom-right.
    pub handles: [Point; 4],
}

/// Where the head oval's center sits, as a fraction of crop height.
const OVAL_CENTER_Y: f64 = 0.42;
/// Oval radii as fractions of crop width and height.
const OVAL_RADIUS_X: f64 = 0.28;
const OVAL_RADIUS_Y: f64 = 0.32;

/// Guide geometry for `crop` under `spec`.
pub fn overlay_guides(crop: &CropRect, spec: &DocumentSpec) -> OverlayGuides {
    let eye_y = crop.y + crop.height * spec.eye_line;
    OverlayGuides {
        eye_line: (Point::new(crop.x, eye_y), Point::new(crop.right(), eye_y)),
        face_oval: Ellipse {
            center: Point::new(crop.center().x, crop.y + crop.height * OVAL_CENTER_Y),
            radius_x: crop.width * OVAL_RADIUS_X,
            radius_y: crop.height * OVAL_RADIUS_Y,
        },
        handles: DragHandle::CORNERS.map(|h| h.anchor(crop)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    const IMAGE: Size = Size::new(1000, 1000);

    fn ratio_7_9() -> AspectRatio {
        AspectRatio::new(7, 9).unwrap()
    }

    fn crop() -> CropRect {
        CropRect::new(100.0, 100.0, 350.0, 450.0)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hit_corners_before_interior() {
        let c = crop();
        assert_eq!(hit_test(&c, Point::new(105.0, 95.0), HANDLE_TOLERANCE), Some(DragHandle::TopLeft));
        assert_eq!(hit_test(&c, Point::new(440.0, 110.0), HANDLE_TOLERANCE), Some(DragHandle::TopRight));
        assert_eq!(hit_test(&c, Point::new(100.0, 560.0), HANDLE_TOLERANCE), Some(DragHandle::BottomLeft));
        assert_eq!(hit_test(&c, Point::new(455.0, 540.0), HANDLE_TOLERANCE), Some(DragHandle::BottomRight));
        assert_eq!(hit_test(&c, Point::new(300.0, 300.0), HANDLE_TOLERANCE), Some(DragHandle::Move));
    }

    #[test]
    fn hit_outside_is_none() {
        let c = crop();
        assert_eq!(hit_test(&c, Point::new(50.0, 300.0), HANDLE_TOLERANCE), None);
        // Exactly at tolerance misses.
        assert_eq!(hit_test(&c, Point::new(80.0, 80.0), HANDLE_TOLERANCE), None);
    }

    #[test]
    fn bottom_right_resize_keeps_top_left() {
        let drag = CropDrag::begin(DragHandle::BottomRight, crop(), Point::new(450.0, 550.0));
        let r = drag.update(Point::new(520.0, 0.0), IMAGE, ratio_7_9());
        assert_eq!((r.x, r.y), (100.0, 100.0));
        assert_eq!(r.width, 420.0);
        assert!(close(r.height, 540.0));
    }

    #[test]
    fn top_left_resize_keeps_bottom_right() {
        let c = crop();
        let drag = CropDrag::begin(DragHandle::TopLeft, c, Point::new(100.0, 100.0));
        let r = drag.update(Point::new(170.0, 100.0), IMAGE, ratio_7_9());
        assert_eq!(r.width, 280.0);
        assert!(close(r.height, 360.0));
        assert!(close(r.right(), c.right()));
        assert!(close(r.bottom(), c.bottom()));
    }

    #[test]
    fn top_right_and_bottom_left_anchor_opposite_corner() {
        let c = crop();
        let tr = CropDrag::begin(DragHandle::TopRight, c, Point::new(450.0, 100.0))
            .update(Point::new(380.0, 100.0), IMAGE, ratio_7_9());
        assert_eq!(tr.x, c.x);
        assert_eq!(tr.width, 280.0);
        assert!(close(tr.bottom(), c.bottom()));

        let bl = CropDrag::begin(DragHandle::BottomLeft, c, Point::new(100.0, 550.0))
            .update(Point::new(30.0, 550.0), IMAGE, ratio_7_9());
        assert!(close(bl.right(), c.right()));
        assert_eq!(bl.y, c.y);
        assert_eq!(bl.width, 420.0);
    }

    #[test]
    fn resize_floors_width() {
        let drag = CropDrag::begin(DragHandle::BottomRight, crop(), Point::new(450.0, 550.0));
        let r = drag.update(Point::new(-500.0, 0.0), IMAGE, ratio_7_9());
        assert_eq!(r.width, MIN_CROP_SIDE);
        assert!(close(r.height, MIN_CROP_SIDE * 9.0 / 7.0));
    }

    #[test]
    fn top_left_resize_stops_at_image_edge() {
        let c = crop();
        let drag = CropDrag::begin(DragHandle::TopLeft, c, Point::new(100.0, 100.0));
        let r = drag.update(Point::new(-400.0, 100.0), IMAGE, ratio_7_9());
        assert!(r.is_within(IMAGE), "{r:?}");
        // Height hits the top edge first: 550px above the fixed bottom.
        assert_eq!(r.y, 0.0);
        assert_eq!(r.height, 550.0);
        assert!(close(r.right(), c.right()));
        assert!(close(r.bottom(), c.bottom()));
        assert!(close(r.aspect(), 7.0 / 9.0));
    }

    #[test]
    fn bottom_right_resize_stops_at_image_edge() {
        let drag = CropDrag::begin(DragHandle::BottomRight, crop(), Point::new(450.0, 550.0));
        let r = drag.update(Point::new(1400.0, 550.0), IMAGE, ratio_7_9());
        assert!(r.is_within(IMAGE), "{r:?}");
        assert_eq!((r.x, r.y), (100.0, 100.0));
        assert_eq!(r.bottom(), 1000.0);
        assert!(close(r.width, 700.0));
    }

    #[test]
    fn width_limited_resize_stops_at_image_edge() {
        // Square crop near the right edge of a tall image runs out of width first.
        let c = CropRect::new(800.0, 100.0, 100.0, 100.0);
        let image = Size::new(1000, 2000);
        let square = AspectRatio::new(1, 1).unwrap();
        let drag = CropDrag::begin(DragHandle::TopRight, c, Point::new(900.0, 100.0));
        let r = drag.update(Point::new(1500.0, 100.0), image, square);
        assert!(r.is_within(image), "{r:?}");
        assert_eq!(r.width, 200.0);
        assert_eq!(r.height, 200.0);
        assert_eq!(r.bottom(), c.bottom());
    }

    #[test]
    fn move_translates_and_clamps() {
        let c = crop();
        let drag = CropDrag::begin(DragHandle::Move, c, Point::new(200.0, 200.0));
        let r = drag.update(Point::new(230.0, 190.0), IMAGE, ratio_7_9());
        assert_eq!((r.x, r.y, r.width, r.height), (130.0, 90.0, c.width, c.height));

        let r = drag.update(Point::new(5000.0, -5000.0), IMAGE, ratio_7_9());
        assert_eq!((r.x, r.y), (650.0, 0.0));
        assert!(r.is_within(IMAGE));
    }

    #[test]
    fn move_larger_than_image_pins_to_origin() {
        let c = CropRect::new(0.0, 0.0, 1200.0, 1200.0);
        let drag = CropDrag::begin(DragHandle::Move, c, Point::new(0.0, 0.0));
        let r = drag.update(Point::new(50.0, 50.0), IMAGE, ratio_7_9());
        assert_eq!((r.x, r.y), (0.0, 0.0));
    }

    #[test]
    fn guides_follow_eye_line() {
        let c = crop();
        let g = overlay_guides(&c, &catalog::PASSPORT_KG);
        assert_eq!(g.eye_line.0, Point::new(100.0, 100.0 + 450.0 * 0.45));
        assert_eq!(g.eye_line.1.x, c.right());
        assert_eq!(g.face_oval.center.x, 275.0);
        assert_eq!(g.face_oval.radius_x, 350.0 * 0.28);
        assert_eq!(g.handles[3], Point::new(450.0, 550.0));
    }
}
