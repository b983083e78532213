//! Axis-aligned bounding boxes over symbol geometry.
//!
//! A `BoundingBox` starts out with no bounds at all ("invalid") and only
//! ever widens as points, arcs, and other boxes are added. Queries on an
//! invalid box degrade to neutral values instead of panicking, so rule code
//! can chain them without guarding every call.

use std::f64::consts::PI;

use crate::symbol::Point;

/// Extent of a bounding box, in the same unit as its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Mutable axis-aligned rectangle with four independently-optional bounds.
///
/// Each axis can be bounded on its own: a box seeded with only an x
/// coordinate has x bounds but no y bounds and is not yet `valid`. Whenever
/// the box is valid, `xmin <= xmax` and `ymin <= ymax` hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingBox {
    xmin: Option<f64>,
    ymin: Option<f64>,
    xmax: Option<f64>,
    ymax: Option<f64>,
}

fn widen_min(current: Option<f64>, candidate: f64) -> Option<f64> {
    match current {
        Some(cur) if cur <= candidate => Some(cur),
        _ => Some(candidate),
    }
}

fn widen_max(current: Option<f64>, candidate: f64) -> Option<f64> {
    match current {
        Some(cur) if cur >= candidate => Some(cur),
        _ => Some(candidate),
    }
}

impl BoundingBox {
    /// An empty box: no bounds defined, `valid()` is false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with up to two corner points. Each coordinate is independently
    /// optional, so a partially-bounded box is possible.
    pub fn from_corners(
        x0: Option<f64>,
        y0: Option<f64>,
        x1: Option<f64>,
        y1: Option<f64>,
    ) -> Self {
        let mut bbox = Self::new();
        bbox.add_partial_point(x0, y0);
        bbox.add_partial_point(x1, y1);
        bbox
    }

    /// Extend the box to cover `(x, y)`.
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.add_point_with_radius(x, y, 0.0);
    }

    /// Extend the box to cover `(x, y)` inflated by `radius` along each axis.
    pub fn add_point_with_radius(&mut self, x: f64, y: f64, radius: f64) {
        self.xmin = widen_min(self.xmin, x - radius);
        self.xmax = widen_max(self.xmax, x + radius);
        self.ymin = widen_min(self.ymin, y - radius);
        self.ymax = widen_max(self.ymax, y + radius);
    }

    /// Extend the box by a point whose coordinates may be individually
    /// absent. An absent coordinate leaves that axis untouched; a present
    /// coordinate of exactly `0.0` widens the box like any other value.
    pub fn add_partial_point(&mut self, x: Option<f64>, y: Option<f64>) {
        if let Some(x) = x {
            self.xmin = widen_min(self.xmin, x);
            self.xmax = widen_max(self.xmax, x);
        }
        if let Some(y) = y {
            self.ymin = widen_min(self.ymin, y);
            self.ymax = widen_max(self.ymax, y);
        }
    }

    /// Extend the box to cover a circular arc from `start` to `end` around
    /// `center`, sweeping counter-clockwise.
    ///
    /// Both endpoints are always covered. On top of that, every cardinal
    /// extremum of the full circle (top, left, bottom, right) that the sweep
    /// passes through is covered as well, found by walking the quadrant
    /// boundaries from the start angle to the end angle.
    pub fn add_arc(&mut self, start: Point, end: Point, center: Point) {
        self.add_point(start.x, start.y);
        self.add_point(end.x, end.y);

        let radius = ((start.x - center.x).powi(2) + (start.y - center.y).powi(2)).sqrt();

        // Angles measured counter-clockwise from +x, normalized so that
        // 0 <= start < 2*pi and end >= start.
        let mut start_phi = (start.y - center.y).atan2(start.x - center.x);
        if start_phi < 0.0 {
            start_phi += 2.0 * PI;
        }
        let mut end_phi = (end.y - center.y).atan2(end.x - center.x);
        while end_phi < start_phi {
            end_phi += 2.0 * PI;
        }

        let start_quad = (start_phi / (PI / 2.0)).floor() as i64;
        let end_quad = (end_phi / (PI / 2.0)).floor() as i64;

        // Each quadrant boundary crossed contributes the cardinal point that
        // opens the next quadrant.
        for quad in start_quad..end_quad {
            match quad.rem_euclid(4) {
                0 => self.add_point(center.x, center.y + radius),
                1 => self.add_point(center.x - radius, center.y),
                2 => self.add_point(center.x, center.y - radius),
                _ => self.add_point(center.x + radius, center.y),
            }
        }
    }

    /// Extend the box to cover another box. Axes `other` does not bound are
    /// left untouched, so an invalid `other` is a no-op.
    pub fn add_bounding_box(&mut self, other: &BoundingBox) {
        self.add_partial_point(other.xmin, other.ymin);
        self.add_partial_point(other.xmax, other.ymax);
    }

    /// True iff all four bounds are defined.
    pub fn valid(&self) -> bool {
        self.xmin.is_some() && self.ymin.is_some() && self.xmax.is_some() && self.ymax.is_some()
    }

    /// Inclusive containment test. Always false for an invalid box.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        match (self.xmin, self.ymin, self.xmax, self.ymax) {
            (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) => {
                xmin <= x && x <= xmax && ymin <= y && y <= ymax
            }
            _ => false,
        }
    }

    /// Move every bound outward by `distance` (inward when negative).
    /// No-op on an invalid box.
    pub fn expand(&mut self, distance: f64) {
        if !self.valid() {
            return;
        }
        self.xmin = self.xmin.map(|v| v - distance);
        self.ymin = self.ymin.map(|v| v - distance);
        self.xmax = self.xmax.map(|v| v + distance);
        self.ymax = self.ymax.map(|v| v + distance);
    }

    /// Corner containment test against `other`.
    ///
    /// Deliberately asymmetric: only `other`'s corners are tested against
    /// `self`. A box that strictly contains `self` without sharing a corner
    /// does not register, and neither do two boxes crossing plus-sign style.
    /// Callers that need a symmetric test must check both directions.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        match (other.xmin, other.ymin, other.xmax, other.ymax) {
            (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) => {
                self.contains_point(xmin, ymin)
                    || self.contains_point(xmin, ymax)
                    || self.contains_point(xmax, ymax)
                    || self.contains_point(xmax, ymin)
            }
            _ => false,
        }
    }

    /// Lower x bound, if defined.
    pub fn x(&self) -> Option<f64> {
        self.xmin
    }

    /// Lower y bound, if defined.
    pub fn y(&self) -> Option<f64> {
        self.ymin
    }

    /// Horizontal extent; 0.0 while the x axis is unbounded.
    pub fn width(&self) -> f64 {
        match (self.xmin, self.xmax) {
            (Some(xmin), Some(xmax)) => xmax - xmin,
            _ => 0.0,
        }
    }

    /// Vertical extent; 0.0 while the y axis is unbounded.
    pub fn height(&self) -> f64 {
        match (self.ymin, self.ymax) {
            (Some(ymin), Some(ymax)) => ymax - ymin,
            _ => 0.0,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Midpoint of the box, or the origin for an invalid box.
    pub fn center(&self) -> Point {
        match (self.xmin, self.ymin, self.xmax, self.ymax) {
            (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) => {
                Point::new(xmin + (xmax - xmin) / 2.0, ymin + (ymax - ymin) / 2.0)
            }
            _ => Point::new(0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_is_invalid() {
        let bbox = BoundingBox::new();
        assert!(!bbox.valid());
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
        assert_eq!(bbox.center(), Point::new(0.0, 0.0));
        assert!(!bbox.contains_point(0.0, 0.0));
    }

    #[test]
    fn added_point_is_contained() {
        let mut bbox = BoundingBox::new();
        bbox.add_point(3.5, -2.0);
        assert!(bbox.valid());
        assert!(bbox.contains_point(3.5, -2.0));
    }

    #[test]
    fn zero_coordinate_is_a_real_value() {
        // Regression: 0.0 must widen the box, it is not "no coordinate".
        let mut bbox = BoundingBox::new();
        bbox.add_point(0.0, 5.0);
        assert_eq!(bbox.x(), Some(0.0));
        assert_eq!(bbox.width(), 0.0);
        assert!(bbox.contains_point(0.0, 5.0));
    }

    #[test]
    fn partial_point_leaves_missing_axis_unbounded() {
        let mut bbox = BoundingBox::new();
        bbox.add_partial_point(Some(2.0), None);
        assert!(!bbox.valid());
        assert_eq!(bbox.x(), Some(2.0));
        assert_eq!(bbox.y(), None);

        bbox.add_partial_point(None, Some(7.0));
        assert!(bbox.valid());
        assert_eq!(bbox.size(), Size { width: 0.0, height: 0.0 });
    }

    #[test]
    fn from_corners_normalizes_order() {
        let bbox = BoundingBox::from_corners(Some(10.0), Some(-5.0), Some(-10.0), Some(5.0));
        assert_eq!(bbox.x(), Some(-10.0));
        assert_eq!(bbox.y(), Some(-5.0));
        assert_eq!(bbox.width(), 20.0);
        assert_eq!(bbox.height(), 10.0);
    }

    #[test]
    fn add_point_is_idempotent_inside() {
        let mut bbox = BoundingBox::from_corners(Some(-1.0), Some(-1.0), Some(1.0), Some(1.0));
        let before = bbox.clone();
        bbox.add_point(0.25, -0.75);
        assert_eq!(bbox, before);
    }

    #[test]
    fn growth_is_monotonic() {
        let mut bbox = BoundingBox::new();
        let mut last = (0.0, 0.0);
        for &(x, y) in &[(1.0, 1.0), (-3.0, 0.5), (2.0, -8.0), (0.0, 0.0)] {
            bbox.add_point(x, y);
            assert!(bbox.width() >= last.0);
            assert!(bbox.height() >= last.1);
            last = (bbox.width(), bbox.height());
        }
    }

    #[test]
    fn radius_inflates_both_axes() {
        let mut bbox = BoundingBox::new();
        bbox.add_point_with_radius(0.0, 0.0, 2.5);
        assert!(bbox.contains_point(-2.5, 2.5));
        assert!(bbox.contains_point(2.5, -2.5));
        assert!(!bbox.contains_point(2.6, 0.0));
    }

    #[test]
    fn add_bounding_box_covers_other_corners() {
        let mut a = BoundingBox::from_corners(Some(0.0), Some(0.0), Some(1.0), Some(1.0));
        let b = BoundingBox::from_corners(Some(-4.0), Some(2.0), Some(-2.0), Some(6.0));
        a.add_bounding_box(&b);
        assert!(a.contains_point(-4.0, 2.0));
        assert!(a.contains_point(-2.0, 6.0));
        assert!(a.contains_point(1.0, 0.0));
    }

    #[test]
    fn add_invalid_bounding_box_is_noop() {
        let mut a = BoundingBox::from_corners(Some(0.0), Some(0.0), Some(1.0), Some(1.0));
        let before = a.clone();
        a.add_bounding_box(&BoundingBox::new());
        assert_eq!(a, before);
    }

    #[test]
    fn half_circle_arc_covers_top_extremum() {
        // CCW from (r, 0) to (-r, 0) through (0, r).
        let r = 10.0;
        let mut bbox = BoundingBox::new();
        bbox.add_arc(
            Point::new(r, 0.0),
            Point::new(-r, 0.0),
            Point::new(0.0, 0.0),
        );
        assert!(bbox.contains_point(0.0, r));
        assert!(bbox.contains_point(-r, 0.0));
        assert!(bbox.contains_point(r, 0.0));
        // The sweep never reaches the bottom of the circle.
        assert!(!bbox.contains_point(0.0, -r));
    }

    #[test]
    fn quarter_arc_stays_in_quadrant() {
        // CCW from (0, r) to (-r, 0): crosses only the left extremum.
        let r = 4.0;
        let mut bbox = BoundingBox::new();
        bbox.add_arc(
            Point::new(0.0, r),
            Point::new(-r, 0.0),
            Point::new(0.0, 0.0),
        );
        assert_eq!(bbox.width(), r);
        assert_eq!(bbox.height(), r);
    }

    #[test]
    fn arc_crossing_zero_angle() {
        // CCW from the fourth quadrant boundary region across 0 degrees:
        // start at (0, -r), end at (0, r), passing through (r, 0).
        let r = 3.0;
        let mut bbox = BoundingBox::new();
        bbox.add_arc(
            Point::new(0.0, -r),
            Point::new(0.0, r),
            Point::new(0.0, 0.0),
        );
        assert!(bbox.contains_point(r, 0.0));
        assert!(!bbox.contains_point(-r, 0.0));
    }

    #[test]
    fn expand_grows_and_shrinks() {
        let mut bbox = BoundingBox::from_corners(Some(0.0), Some(0.0), Some(10.0), Some(10.0));
        bbox.expand(2.0);
        assert!(bbox.contains_point(-2.0, 12.0));
        bbox.expand(-2.0);
        assert!(!bbox.contains_point(-0.1, 5.0));

        let mut invalid = BoundingBox::new();
        invalid.expand(5.0);
        assert!(!invalid.valid());
    }

    #[test]
    fn overlaps_is_corner_based() {
        let a = BoundingBox::from_corners(Some(0.0), Some(0.0), Some(10.0), Some(10.0));
        let b = BoundingBox::from_corners(Some(5.0), Some(5.0), Some(15.0), Some(15.0));
        assert!(a.overlaps(&b));

        // Corner-only semantics: a box strictly containing `a` shares no
        // corner with it, so the test reports no overlap in this direction.
        let outer = BoundingBox::from_corners(Some(-5.0), Some(-5.0), Some(20.0), Some(20.0));
        assert!(!a.overlaps(&outer));
        assert!(outer.overlaps(&a));
    }

    #[test]
    fn center_is_midpoint() {
        let bbox = BoundingBox::from_corners(Some(-4.0), Some(0.0), Some(8.0), Some(6.0));
        assert_eq!(bbox.center(), Point::new(2.0, 3.0));
    }
}
