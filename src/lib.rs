//! klc-check - geometric core of a KiCad Library Convention checker
//!
//! This library implements the 2D reasoning behind the KLC hidden-pin rule:
//! a bounding-box algebra over points, arcs, and rectangles, and an outline
//! containment checker that flags hidden no-connect pins placed outside
//! every plausible drawn outline of a symbol unit.
//!
//! File parsing and diagnostic formatting live outside this crate; callers
//! build a [`symbol::Symbol`] and receive severity-graded [`rules::Issue`]s.
//!
//! # Quick Start
//!
//! ```
//! use klc_check::prelude::*;
//! use klc_check::symbol::{ElectricalType, FillMode, Pin, Point, Rectangle, Shape, Symbol};
//!
//! let mut symbol = Symbol::new("MCU_Example", 1);
//! symbol.shapes.push(Shape::Rectangle(Rectangle {
//!     start: Point::new(-7.62, -10.16),
//!     end: Point::new(7.62, 10.16),
//!     fill: FillMode::Background,
//!     unit: 1,
//! }));
//! symbol.pins.push(Pin {
//!     name: "NC".to_string(),
//!     number: "8".to_string(),
//!     position: Point::new(12.7, 0.0),
//!     etype: ElectricalType::NoConnect,
//!     hidden: true,
//!     unit: 1,
//! });
//!
//! let result = KlcCheckCore::check_symbol(&symbol, &CheckOptions::default());
//! assert!(result.has_errors());
//! for issue in &result.issues {
//!     println!("{:?}: {}", issue.severity, issue.message);
//! }
//! ```

pub mod core;
pub mod geometry;
pub mod rules;
pub mod symbol;

// Re-export main types
pub use crate::core::{
    CheckOptions, CheckResult, CheckStats, KlcCheckCore, KlcCheckError, Verbosity,
};
pub use crate::geometry::bbox::{BoundingBox, Size};
pub use crate::rules::{Issue, RulesEngine, Severity, SymbolRule};
pub use crate::symbol::{ElectricalType, FillMode, Pin, Point, Shape, Symbol};

/// Check a symbol with default options (convenience wrapper).
pub fn check_symbol(symbol: &Symbol) -> CheckResult {
    KlcCheckCore::check_symbol(symbol, &CheckOptions::default())
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BoundingBox, CheckOptions, CheckResult, CheckStats, Issue, KlcCheckCore, KlcCheckError,
        RulesEngine, Severity, Verbosity,
    };
}
