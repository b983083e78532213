//! Point-versus-polygon and point-versus-segment predicates.
//!
//! These back the precise half of the outline containment check, after the
//! bounding-box pre-filter has had its say.

use crate::symbol::Point;

/// Even-odd ray cast: true iff `p` lies strictly inside the polygon formed
/// by `points`. The last vertex is treated as connecting back to the first.
/// Fewer than three vertices never contain anything.
pub fn point_in_polygon(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True iff `a`, `b`, and `c` all lie on one line (cross-product test).
pub fn collinear(a: Point, b: Point, c: Point) -> bool {
    (b.x - a.x) * (c.y - a.y) == (c.x - a.x) * (b.y - a.y)
}

/// True iff `q` is between `p` and `r`, inclusive.
fn within(p: f64, q: f64, r: f64) -> bool {
    (p <= q && q <= r) || (r <= q && q <= p)
}

/// True iff `c` lies on the segment from `a` to `b`, endpoints included.
/// Between-ness is measured along x, or along y for a vertical segment.
pub fn point_on_segment(a: Point, b: Point, c: Point) -> bool {
    collinear(a, b, c)
        && if a.x != b.x {
            within(a.x, c.x, b.x)
        } else {
            within(a.y, c.y, b.y)
        }
}

/// True iff `p` lies on any segment of the open polyline `points`.
pub fn point_on_polyline(points: &[Point], p: Point) -> bool {
    points.windows(2).any(|seg| point_on_segment(seg[0], seg[1], p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 100.0),
        ]
    }

    #[test]
    fn point_inside_triangle() {
        assert!(point_in_polygon(&triangle(), Point::new(50.0, 30.0)));
    }

    #[test]
    fn point_outside_triangle() {
        assert!(!point_in_polygon(&triangle(), Point::new(90.0, 90.0)));
        assert!(!point_in_polygon(&triangle(), Point::new(-1.0, 0.5)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert!(!point_in_polygon(&line, Point::new(5.0, 0.0)));
        assert!(!point_in_polygon(&[], Point::new(0.0, 0.0)));
    }

    #[test]
    fn concave_polygon() {
        // A "U" shape; the notch between the arms is outside.
        let u = vec![
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(20.0, 30.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(&u, Point::new(5.0, 20.0)));
        assert!(point_in_polygon(&u, Point::new(25.0, 20.0)));
        assert!(!point_in_polygon(&u, Point::new(15.0, 20.0)));
    }

    #[test]
    fn on_segment_diagonal() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        assert!(point_on_segment(a, b, Point::new(5.0, 5.0)));
        assert!(point_on_segment(a, b, a));
        assert!(point_on_segment(a, b, b));
        assert!(!point_on_segment(a, b, Point::new(5.0, 5.1)));
        // Collinear but past the endpoint.
        assert!(!point_on_segment(a, b, Point::new(11.0, 11.0)));
    }

    #[test]
    fn on_segment_vertical() {
        let a = Point::new(3.0, -2.0);
        let b = Point::new(3.0, 4.0);
        assert!(point_on_segment(a, b, Point::new(3.0, 0.0)));
        assert!(!point_on_segment(a, b, Point::new(3.0, 5.0)));
        assert!(!point_on_segment(a, b, Point::new(3.1, 0.0)));
    }

    #[test]
    fn on_polyline_any_segment() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        assert!(point_on_polyline(&pts, Point::new(4.0, 0.0)));
        assert!(point_on_polyline(&pts, Point::new(10.0, 7.0)));
        assert!(!point_on_polyline(&pts, Point::new(4.0, 1.0)));
        assert!(!point_on_polyline(&[Point::new(1.0, 1.0)], Point::new(1.0, 1.0)));
    }
}
