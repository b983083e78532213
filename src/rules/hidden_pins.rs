//! Hidden-pin checks (KLC rule S4.6).
//!
//! No-connect pins must be typed `no_connect` and hidden, power inputs must
//! stay visible outside power symbols, and every hidden NC pin must lie on
//! or within the drawn outline of its unit. A hidden pin outside the
//! outline is invisible on the sheet but still electrically present, so it
//! can short to an unrelated net the moment the symbol is placed.

use std::collections::HashSet;

use crate::core::{CheckOptions, Verbosity};
use crate::geometry::bbox::BoundingBox;
use crate::geometry::poly;
use crate::rules::{Issue, Severity, SymbolRule};
use crate::symbol::{ElectricalType, FillMode, Pin, Point, Polyline, Symbol};

/// Pin names conventionally meaning "no connect".
const NC_NAMES: &[&str] = &["nc", "dnc", "n.c."];

/// Offset used when retrying the interior test for pins sitting almost on
/// a sloped outline edge (op-amp triangles and the like).
const POSITION_TOLERANCE: f64 = 0.01;

pub struct HiddenPinsRule;

fn is_nc_name(name: &str) -> bool {
    NC_NAMES.iter().any(|nc| name.eq_ignore_ascii_case(nc))
}

fn is_orthogonal_line(line: &Polyline) -> bool {
    if line.points.len() != 2 {
        return false;
    }
    line.points[0].x == line.points[1].x || line.points[0].y == line.points[1].y
}

/// True iff some box contains every one of `points`.
fn surrounded_by_any(boxes: &[BoundingBox], points: &[Point]) -> bool {
    boxes
        .iter()
        .any(|bbox| points.iter().all(|p| bbox.contains_point(p.x, p.y)))
}

/// The eight neighbors of `p` offset by the position tolerance along each
/// axis and diagonal.
fn neighbor_points(p: Point) -> [Point; 8] {
    let d = POSITION_TOLERANCE;
    [
        Point::new(p.x + d, p.y + d),
        Point::new(p.x - d, p.y + d),
        Point::new(p.x + d, p.y - d),
        Point::new(p.x - d, p.y - d),
        Point::new(p.x + d, p.y),
        Point::new(p.x - d, p.y),
        Point::new(p.x, p.y + d),
        Point::new(p.x, p.y - d),
    ]
}

/// Outline candidates collected from a symbol's drawn shapes, ordered from
/// cheapest to most expensive test.
struct Outline {
    boxes: Vec<BoundingBox>,
    filled_shapes: Vec<Polyline>,
    edge_polylines: Vec<Polyline>,
}

impl Outline {
    fn from_symbol(symbol: &Symbol) -> Self {
        // Rectangles are very fast to test, so they come first: drawn
        // rectangles, polylines that trace a rectangle, and two-point
        // orthogonal lines (a pin sitting on one of those is assumed to be
        // intentional routing).
        let mut boxes: Vec<BoundingBox> =
            symbol.rectangles().map(|r| r.bounding_box()).collect();
        boxes.extend(
            symbol
                .polylines()
                .filter(|pl| pl.is_rectangle())
                .map(|pl| pl.bounding_box()),
        );
        boxes.extend(
            symbol
                .polylines()
                .filter(|pl| is_orthogonal_line(pl))
                .map(|pl| pl.bounding_box()),
        );

        // Closed polygons support a real interior test. Open polylines with
        // background fill render as closed areas, so they are treated as
        // closed too; the synthetic closing edge goes on a copy.
        let mut closed_shapes: Vec<Polyline> =
            symbol.polylines().filter(|pl| pl.is_closed()).cloned().collect();
        closed_shapes.extend(
            symbol
                .polylines()
                .filter(|pl| {
                    !pl.is_closed() && pl.fill == FillMode::Background && pl.points.len() >= 2
                })
                .map(|pl| pl.closed()),
        );

        // A polygon whose every vertex sits inside one of the boxes is
        // redundant with that cheaper test. Filtering builds a fresh list
        // instead of removing while iterating.
        let filled_shapes: Vec<Polyline> = closed_shapes
            .into_iter()
            .filter(|shape| !surrounded_by_any(&boxes, &shape.points))
            .collect();

        // Open unfilled polylines have no interior to test; they are kept
        // for point-on-segment checks unless a box already absorbs them.
        let edge_polylines: Vec<Polyline> = symbol
            .polylines()
            .filter(|pl| {
                !pl.is_closed() && pl.fill == FillMode::None && pl.points.len() > 2
            })
            .filter(|pl| !surrounded_by_any(&boxes, &pl.points))
            .cloned()
            .collect();

        Self {
            boxes,
            filled_shapes,
            edge_polylines,
        }
    }

    fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.filled_shapes.is_empty() && self.edge_polylines.is_empty()
    }

    /// Cheapest test first, short-circuiting on the first hit: boxes, then
    /// polygon interiors (with the tolerance retry), then edge segments.
    fn contains(&self, position: Point) -> bool {
        if self
            .boxes
            .iter()
            .any(|bbox| bbox.contains_point(position.x, position.y))
        {
            return true;
        }

        for shape in &self.filled_shapes {
            if shape.point_inside(position) {
                return true;
            }
            // Hidden pins are sometimes *almost* within the polygon, as on
            // op-amp triangle outlines; a nudged retry absorbs that noise.
            if neighbor_points(position)
                .iter()
                .any(|p| shape.point_inside(*p))
            {
                return true;
            }
        }

        self.edge_polylines
            .iter()
            .any(|pl| poly::point_on_polyline(&pl.points, position))
    }
}

impl SymbolRule for HiddenPinsRule {
    fn id(&self) -> &'static str {
        "S4.6"
    }

    fn name(&self) -> &'static str {
        "Hidden pins"
    }

    fn check(&self, symbol: &Symbol, options: &CheckOptions) -> Vec<Issue> {
        // Derived symbols inherit geometry and pins from their parent.
        if symbol.extends.is_some() {
            return Vec::new();
        }

        let mut issues = Vec::new();

        for pin in &symbol.pins {
            let is_nc = is_nc_name(&pin.name) || pin.etype == ElectricalType::NoConnect;
            if is_nc {
                if pin.etype != ElectricalType::NoConnect {
                    issues.push(
                        Issue::new(
                            self.id(),
                            Severity::Error,
                            format!(
                                "{} should be of type no_connect, but is of type {}",
                                pin.describe(),
                                pin.etype
                            ),
                        )
                        .with_pin(pin)
                        .with_suggestion("Change the pin's electrical type to no_connect"),
                    );
                }
                if !pin.hidden {
                    issues.push(
                        Issue::new(
                            self.id(),
                            Severity::Warning,
                            format!(
                                "{} is visible; no-connect pins should be invisible",
                                pin.describe()
                            ),
                        )
                        .with_pin(pin)
                        .with_suggestion("Mark the pin invisible"),
                    );
                }
            }

            if !symbol.is_power && pin.etype == ElectricalType::PowerIn && pin.hidden {
                issues.push(
                    Issue::new(
                        self.id(),
                        Severity::Error,
                        format!(
                            "{} is of type power_in and invisible; power input pins \
                             must not be invisible outside power symbols",
                            pin.describe()
                        ),
                    )
                    .with_pin(pin),
                );
            }
        }

        issues.extend(self.check_pin_positions(symbol, options));
        issues
    }
}

impl HiddenPinsRule {
    /// Flag hidden NC pins lying outside every plausible outline of their
    /// unit.
    fn check_pin_positions(&self, symbol: &Symbol, options: &CheckOptions) -> Vec<Issue> {
        let mut issues = Vec::new();

        let outline = Outline::from_symbol(symbol);
        if options.verbosity >= Verbosity::High {
            tracing::trace!(
                "{}: outline has {} boxes, {} filled shapes, {} edge polylines",
                symbol.name,
                outline.boxes.len(),
                outline.filled_shapes.len(),
                outline.edge_polylines.len()
            );
        }
        // Nothing drawn means nothing to validate against.
        if outline.is_empty() {
            return issues;
        }

        // Common (unit 0) pins are candidates in every unit; each pin is
        // still reported at most once.
        let mut flagged: HashSet<usize> = HashSet::new();

        for unit in 1..=symbol.unit_count {
            let unit_pins: Vec<(usize, &Pin)> = symbol
                .pins
                .iter()
                .enumerate()
                .filter(|(_, p)| p.unit == unit || p.unit == 0)
                .collect();
            if unit_pins.is_empty() {
                continue;
            }

            for (index, pin) in unit_pins {
                if pin.etype != ElectricalType::NoConnect || !pin.hidden {
                    continue;
                }
                if outline.contains(pin.position) {
                    continue;
                }
                if !flagged.insert(index) {
                    continue;
                }
                issues.push(
                    Issue::new(
                        self.id(),
                        Severity::Error,
                        format!(
                            "{} is outside the symbol outline; hidden NC pins should \
                             lie on or within the outline to prevent unwanted connections",
                            pin.describe()
                        ),
                    )
                    .with_pin(pin),
                );
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Rectangle, Shape};

    fn nc_pin(x: f64, y: f64, hidden: bool) -> Pin {
        Pin {
            name: "NC".to_string(),
            number: "9".to_string(),
            position: Point::new(x, y),
            etype: ElectricalType::NoConnect,
            hidden,
            unit: 1,
        }
    }

    fn rect_shape(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Rectangle(Rectangle {
            start: Point::new(x0, y0),
            end: Point::new(x1, y1),
            fill: FillMode::Background,
            unit: 1,
        })
    }

    fn outline_issues(issues: &[Issue]) -> Vec<&Issue> {
        issues
            .iter()
            .filter(|i| i.message.contains("outside the symbol outline"))
            .collect()
    }

    #[test]
    fn nc_name_matching_is_case_insensitive() {
        assert!(is_nc_name("NC"));
        assert!(is_nc_name("nc"));
        assert!(is_nc_name("DNC"));
        assert!(is_nc_name("N.C."));
        assert!(!is_nc_name("NCS"));
        assert!(!is_nc_name("SYNC"));
    }

    #[test]
    fn orthogonal_line_detection() {
        let horizontal = Polyline {
            points: vec![Point::new(0.0, 2.0), Point::new(8.0, 2.0)],
            fill: FillMode::None,
            unit: 1,
        };
        let diagonal = Polyline {
            points: vec![Point::new(0.0, 0.0), Point::new(8.0, 2.0)],
            fill: FillMode::None,
            unit: 1,
        };
        assert!(is_orthogonal_line(&horizontal));
        assert!(!is_orthogonal_line(&diagonal));
    }

    #[test]
    fn pin_inside_rectangle_outline_is_ok() {
        let mut symbol = Symbol::new("U1", 1);
        symbol.shapes.push(rect_shape(-100.0, -100.0, 100.0, 100.0));
        symbol.pins.push(nc_pin(0.0, 0.0, true));

        let issues = HiddenPinsRule.check(&symbol, &CheckOptions::default());
        assert!(outline_issues(&issues).is_empty());
    }

    #[test]
    fn pin_outside_rectangle_outline_is_flagged() {
        let mut symbol = Symbol::new("U1", 1);
        symbol.shapes.push(rect_shape(-100.0, -100.0, 100.0, 100.0));
        symbol.pins.push(nc_pin(150.0, 0.0, true));

        let issues = HiddenPinsRule.check(&symbol, &CheckOptions::default());
        let outline = outline_issues(&issues);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].severity, Severity::Error);
        assert_eq!(outline[0].pin.as_deref(), Some("NC (9)"));
    }

    #[test]
    fn visible_pin_is_not_a_containment_candidate() {
        let mut symbol = Symbol::new("U1", 1);
        symbol.shapes.push(rect_shape(-100.0, -100.0, 100.0, 100.0));
        symbol.pins.push(nc_pin(150.0, 0.0, false));

        let issues = HiddenPinsRule.check(&symbol, &CheckOptions::default());
        // The visibility check fires instead of the containment check.
        assert!(outline_issues(&issues).is_empty());
        assert!(issues.iter().any(|i| i.message.contains("is visible")));
    }

    #[test]
    fn no_shapes_means_no_containment_check() {
        let mut symbol = Symbol::new("U1", 1);
        symbol.pins.push(nc_pin(150.0, 0.0, true));

        let issues = HiddenPinsRule.check(&symbol, &CheckOptions::default());
        assert!(outline_issues(&issues).is_empty());
    }

    #[test]
    fn common_unit_pin_reported_once() {
        let mut symbol = Symbol::new("U1", 4);
        symbol.shapes.push(rect_shape(-10.0, -10.0, 10.0, 10.0));
        let mut pin = nc_pin(50.0, 0.0, true);
        pin.unit = 0;
        symbol.pins.push(pin);

        let issues = HiddenPinsRule.check(&symbol, &CheckOptions::default());
        assert_eq!(outline_issues(&issues).len(), 1);
    }

    #[test]
    fn degenerate_polyline_is_skipped() {
        let mut symbol = Symbol::new("U1", 1);
        symbol.shapes.push(Shape::Polyline(Polyline {
            points: vec![Point::new(1.0, 1.0)],
            fill: FillMode::Background,
            unit: 1,
        }));
        symbol.pins.push(nc_pin(0.0, 0.0, true));

        // One degenerate shape: outline is empty, check skipped, no panic.
        let issues = HiddenPinsRule.check(&symbol, &CheckOptions::default());
        assert!(outline_issues(&issues).is_empty());
    }
}
