//! In-memory symbol model handed to the rule checks.
//!
//! This crate does not read library files. An external parser builds these
//! records and passes them in; each shape kind is its own struct under a
//! closed `Shape` enum, so the compiler enforces which fields a kind
//! carries instead of a string-keyed lookup at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::KlcCheckError;
use crate::geometry::bbox::BoundingBox;
use crate::geometry::poly;

/// A 2D point in the library's drawing unit. The checks are unit-agnostic
/// as long as every coordinate of one symbol uses the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fill mode of a drawn shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    None,
    Foreground,
    Background,
}

impl FromStr for FillMode {
    type Err = KlcCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(FillMode::None),
            // Symbol files call foreground fill "outline".
            "outline" | "foreground" => Ok(FillMode::Foreground),
            "background" => Ok(FillMode::Background),
            other => Err(KlcCheckError::UnknownFillMode(other.to_string())),
        }
    }
}

/// Electrical type of a pin, as tagged in symbol files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricalType {
    Input,
    Output,
    Bidirectional,
    TriState,
    Passive,
    Free,
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NoConnect,
}

impl ElectricalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectricalType::Input => "input",
            ElectricalType::Output => "output",
            ElectricalType::Bidirectional => "bidirectional",
            ElectricalType::TriState => "tri_state",
            ElectricalType::Passive => "passive",
            ElectricalType::Free => "free",
            ElectricalType::Unspecified => "unspecified",
            ElectricalType::PowerIn => "power_in",
            ElectricalType::PowerOut => "power_out",
            ElectricalType::OpenCollector => "open_collector",
            ElectricalType::OpenEmitter => "open_emitter",
            ElectricalType::NoConnect => "no_connect",
        }
    }
}

impl fmt::Display for ElectricalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectricalType {
    type Err = KlcCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(ElectricalType::Input),
            "output" => Ok(ElectricalType::Output),
            "bidirectional" => Ok(ElectricalType::Bidirectional),
            "tri_state" => Ok(ElectricalType::TriState),
            "passive" => Ok(ElectricalType::Passive),
            "free" => Ok(ElectricalType::Free),
            "unspecified" => Ok(ElectricalType::Unspecified),
            "power_in" => Ok(ElectricalType::PowerIn),
            "power_out" => Ok(ElectricalType::PowerOut),
            "open_collector" => Ok(ElectricalType::OpenCollector),
            "open_emitter" => Ok(ElectricalType::OpenEmitter),
            "no_connect" => Ok(ElectricalType::NoConnect),
            other => Err(KlcCheckError::UnknownPinType(other.to_string())),
        }
    }
}

/// Axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub fill: FillMode,
    pub unit: u32,
}

impl Rectangle {
    /// The rectangle as a closed five-point ring, winding through the two
    /// derived corners.
    pub fn as_polyline(&self) -> Polyline {
        Polyline {
            points: vec![
                self.start,
                Point::new(self.end.x, self.start.y),
                self.end,
                Point::new(self.start.x, self.end.y),
                self.start,
            ],
            fill: self.fill,
            unit: self.unit,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        bbox.add_point(self.start.x, self.start.y);
        bbox.add_point(self.end.x, self.end.y);
        bbox
    }
}

/// Open or closed sequence of line segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub fill: FillMode,
    pub unit: u32,
}

impl Polyline {
    /// Closed means the first vertex is repeated as the last one.
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    /// A closed ring of exactly four edges, each strictly horizontal or
    /// strictly vertical. Closure forces opposite edges to match, so no
    /// further angle checks are needed.
    pub fn is_rectangle(&self) -> bool {
        if self.points.len() != 5 || !self.is_closed() {
            return false;
        }
        self.points.windows(2).all(|seg| {
            let horizontal = seg[0].y == seg[1].y && seg[0].x != seg[1].x;
            let vertical = seg[0].x == seg[1].x && seg[0].y != seg[1].y;
            horizontal || vertical
        })
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        for p in &self.points {
            bbox.add_point(p.x, p.y);
        }
        bbox
    }

    /// Interior test via even-odd ray casting.
    pub fn point_inside(&self, p: Point) -> bool {
        poly::point_in_polygon(&self.points, p)
    }

    /// A copy with a synthetic closing edge appended when the polyline is
    /// not already closed. The original is never touched.
    pub fn closed(&self) -> Polyline {
        let mut copy = self.clone();
        if !copy.is_closed() {
            if let Some(&first) = copy.points.first() {
                copy.points.push(first);
            }
        }
        copy
    }
}

/// Circular arc from `start` to `end` around `center`, counter-clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub start: Point,
    pub end: Point,
    pub center: Point,
    pub fill: FillMode,
    pub unit: u32,
}

impl Arc {
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        bbox.add_arc(self.start, self.end, self.center);
        bbox
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: FillMode,
    pub unit: u32,
}

impl Circle {
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        bbox.add_point_with_radius(self.center.x, self.center.y, self.radius);
        bbox
    }
}

/// A drawn primitive belonging to one symbol unit (unit 0 = common).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
    Polyline(Polyline),
    Arc(Arc),
    Circle(Circle),
}

impl Shape {
    pub fn unit(&self) -> u32 {
        match self {
            Shape::Rectangle(s) => s.unit,
            Shape::Polyline(s) => s.unit,
            Shape::Arc(s) => s.unit,
            Shape::Circle(s) => s.unit,
        }
    }

    pub fn fill(&self) -> FillMode {
        match self {
            Shape::Rectangle(s) => s.fill,
            Shape::Polyline(s) => s.fill,
            Shape::Arc(s) => s.fill,
            Shape::Circle(s) => s.fill,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Rectangle(s) => s.bounding_box(),
            Shape::Polyline(s) => s.bounding_box(),
            Shape::Arc(s) => s.bounding_box(),
            Shape::Circle(s) => s.bounding_box(),
        }
    }
}

/// A symbol pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub number: String,
    pub position: Point,
    pub etype: ElectricalType,
    pub hidden: bool,
    pub unit: u32,
}

impl Pin {
    /// "Pin NAME (NUM) @ (x, y)", the form used in issue messages.
    pub fn describe(&self) -> String {
        format!(
            "Pin {} ({}) @ ({}, {})",
            self.name, self.number, self.position.x, self.position.y
        )
    }
}

/// One schematic symbol: its drawn shapes, its pins, and how many
/// interchangeable units it has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub unit_count: u32,
    pub shapes: Vec<Shape>,
    pub pins: Vec<Pin>,
    /// Power symbols relax the hidden power-input check.
    pub is_power: bool,
    /// Name of the parent symbol this one derives from, if any. Derived
    /// symbols inherit their geometry and are skipped by geometric rules.
    pub extends: Option<String>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, unit_count: u32) -> Self {
        Self {
            name: name.into(),
            unit_count,
            shapes: Vec::new(),
            pins: Vec::new(),
            is_power: false,
            extends: None,
        }
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Rectangle> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Rectangle(r) => Some(r),
            _ => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Polyline(p) => Some(p),
            _ => None,
        })
    }

    /// Pins belonging to `unit`, including the common (unit 0) pins.
    pub fn unit_pins(&self, unit: u32) -> Vec<&Pin> {
        self.pins
            .iter()
            .filter(|p| p.unit == unit || p.unit == 0)
            .collect()
    }
}
