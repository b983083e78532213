//! Symbol anchor placement (KLC rule S4.2).
//!
//! The drawn body of a symbol should be centered on the origin so parts
//! land on the placement grid predictably when dropped into a schematic.

use crate::core::{CheckOptions, Verbosity};
use crate::geometry::bbox::BoundingBox;
use crate::rules::{Issue, Severity, SymbolRule};
use crate::symbol::Symbol;

/// Pin placement grid, 100 mil in mm.
const PLACEMENT_GRID: f64 = 2.54;

pub struct AnchorRule;

impl SymbolRule for AnchorRule {
    fn id(&self) -> &'static str {
        "S4.2"
    }

    fn name(&self) -> &'static str {
        "Symbol anchor centering"
    }

    fn check(&self, symbol: &Symbol, options: &CheckOptions) -> Vec<Issue> {
        if symbol.extends.is_some() {
            return Vec::new();
        }

        let mut bbox = BoundingBox::new();
        for shape in &symbol.shapes {
            bbox.add_bounding_box(&shape.bounding_box());
        }
        // Nothing drawn (e.g. a power flag made of pins only): skip.
        if !bbox.valid() {
            return Vec::new();
        }

        let center = bbox.center();
        if options.verbosity >= Verbosity::High {
            tracing::trace!(
                "{}: body center at ({}, {}), size {}x{}",
                symbol.name,
                center.x,
                center.y,
                bbox.width(),
                bbox.height()
            );
        }

        let limit = PLACEMENT_GRID / 2.0;
        if center.x.abs() > limit || center.y.abs() > limit {
            return vec![Issue::new(
                self.id(),
                Severity::Warning,
                format!(
                    "Symbol body is centered at ({:.3}, {:.3}); it should be centered \
                     on the origin",
                    center.x, center.y
                ),
            )
            .with_suggestion(
                "Move the drawing so its bounding-box center lies within half a grid \
                 step of the origin",
            )];
        }
        Vec::new()
    }
}
