//! Simple check example: build a symbol in code, check it, print results.

use anyhow::Result;
use klc_check::prelude::*;
use klc_check::symbol::{
    ElectricalType, FillMode, Pin, Point, Polyline, Shape, Symbol,
};

fn main() -> Result<()> {
    // An op-amp style symbol: triangular body with background fill and a
    // hidden no-connect pin that drifted outside the outline.
    let mut symbol = Symbol::new("OpAmp_Demo", 1);
    symbol.shapes.push(Shape::Polyline(Polyline {
        points: vec![
            Point::new(-5.08, 5.08),
            Point::new(5.08, 0.0),
            Point::new(-5.08, -5.08),
            Point::new(-5.08, 5.08),
        ],
        fill: FillMode::Background,
        unit: 1,
    }));
    symbol.pins.push(Pin {
        name: "NC".to_string(),
        number: "8".to_string(),
        position: Point::new(7.62, 5.08),
        etype: ElectricalType::NoConnect,
        hidden: true,
        unit: 1,
    });
    symbol.pins.push(Pin {
        name: "V+".to_string(),
        number: "7".to_string(),
        position: Point::new(-2.54, 2.54),
        etype: ElectricalType::PowerIn,
        hidden: false,
        unit: 1,
    });

    let options = CheckOptions {
        verbosity: Verbosity::Normal,
        rules: vec![],
    };
    let result = KlcCheckCore::check_symbol(&symbol, &options);

    println!("Check results for: {}", result.symbol);
    println!("Total issues: {}", result.total_issues());
    println!();

    for issue in &result.issues {
        println!("[{:?}] {}: {}", issue.severity, issue.rule_id, issue.message);
        if let Some(ref suggestion) = issue.suggestion {
            println!("    fix: {}", suggestion);
        }
    }

    println!();
    println!("{}", result.to_json()?);

    if result.has_errors() {
        println!("\nCheck failed (errors present).");
        std::process::exit(1);
    }

    println!("\nCheck passed.");
    Ok(())
}
