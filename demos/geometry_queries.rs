//! Bounding-box algebra walkthrough: grow a box from points, arcs, and
//! other boxes, then query it.

use klc_check::symbol::Point;
use klc_check::BoundingBox;

fn main() {
    let mut body = BoundingBox::new();
    println!("empty box valid: {}", body.valid());

    body.add_point(-7.62, -10.16);
    body.add_point(7.62, 10.16);
    println!(
        "body: {}x{} centered at ({}, {})",
        body.size().width,
        body.size().height,
        body.center().x,
        body.center().y
    );

    // A decoration arc sweeping over the top of the body widens it upward.
    let mut decorated = body.clone();
    decorated.add_arc(
        Point::new(7.62, 10.16),
        Point::new(-7.62, 10.16),
        Point::new(0.0, 10.16),
    );
    println!(
        "with top arc: height {} -> {}",
        body.height(),
        decorated.height()
    );

    // Merging boxes covers both corner pairs.
    let pin_field = BoundingBox::from_corners(Some(10.0), Some(-2.54), Some(15.24), Some(2.54));
    let mut merged = decorated.clone();
    merged.add_bounding_box(&pin_field);
    println!(
        "merged contains (12.0, 0.0): {}",
        merged.contains_point(12.0, 0.0)
    );

    // Corner-based overlap test is asymmetric by design.
    println!("body overlaps pin_field: {}", body.overlaps(&pin_field));
    println!("merged overlaps body: {}", merged.overlaps(&body));
}
