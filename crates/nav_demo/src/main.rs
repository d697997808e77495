//! Scripted demo-mode session: search, pick, tap, route, clear, printing
//! every directive the coordinator sends to the map surface.
//!
//! Run with: cargo run -p nav_demo

use nav_core::backend::FixedLocator;
use nav_core::coordinator::NavSession;
use nav_core::geo::{Coordinate, Extent, NamedLocation};
use nav_core::panel::{format_distance, format_duration, glyph_for};
use nav_core::session::Endpoint;
use nav_core::sync::{MapSurface, MarkerRole, RouteStyle};

/// A map surface that prints directives instead of rendering them.
struct PrintingSurface;

impl MapSurface for PrintingSurface {
    fn upsert_marker(
        &mut self,
        role: MarkerRole,
        location: &NamedLocation,
        accuracy_radius_m: Option<f64>,
    ) {
        let accuracy = accuracy_radius_m
            .map(|radius| format!(" (±{} m)", radius))
            .unwrap_or_default();
        println!(
            "[map] marker {:?} at ({:.4}, {:.4}) {}{}",
            role,
            location.at.lat,
            location.at.lng,
            location.name.as_deref().unwrap_or("(unnamed)"),
            accuracy,
        );
    }

    fn remove_marker(&mut self, role: MarkerRole) {
        println!("[map] remove marker {:?}", role);
    }

    fn set_route_line(&mut self, geometry: &[Coordinate], style: &RouteStyle) {
        println!(
            "[map] route line with {} points ({} over {})",
            geometry.len(),
            style.line.color,
            style.casing.color,
        );
    }

    fn clear_route_line(&mut self) {
        println!("[map] clear route line");
    }

    fn fly_to(&mut self, center: Coordinate, zoom: f64) {
        println!(
            "[map] fly to ({:.4}, {:.4}) zoom {}",
            center.lat, center.lng, zoom
        );
    }

    fn fit_bounds(&mut self, extent: Extent, padding: f64) {
        println!(
            "[map] fit bounds ({:.4}, {:.4})..({:.4}, {:.4}) padding {}",
            extent.south_west.lat,
            extent.south_west.lng,
            extent.north_east.lat,
            extent.north_east.lng,
            padding,
        );
    }
}

fn main() {
    // City-center fix so "use current location" has something to return.
    let here = Coordinate::new(9.0054, 38.7636);
    let mut session = NavSession::new(
        "demo",
        Box::new(PrintingSurface),
        Box::new(FixedLocator(here)),
    );

    println!("--- Searching for the origin ---");
    session.type_into(Endpoint::Origin, "bole");
    session.settle();
    let results = session.search(Endpoint::Origin).results.clone();
    for place in &results {
        println!(
            "  result: {} ({})",
            place.name,
            place.category.as_deref().unwrap_or("place")
        );
    }

    println!("--- Picking {} ---", results[0].name);
    session.pick_place(Endpoint::Origin, results[0].clone());
    session.settle();

    println!("--- Tapping the map for the destination ---");
    session.tap_map(9.0107, 38.7612);
    session.settle();

    if let Some(route) = session.state().route() {
        println!(
            "--- Route: {} in {} ---",
            format_distance(route.distance_m),
            format_duration(route.duration_secs),
        );
        for step in &route.instructions {
            println!(
                "  {} {} ({})",
                glyph_for(&step.maneuver, step.modifier.as_deref()).symbol(),
                step.text,
                format_distance(step.distance_m),
            );
        }
    } else {
        println!("--- No route found ---");
    }

    for notice in session.drain_notices() {
        println!("[notice] {:?}: {}", notice.kind, notice.message);
    }

    println!("--- Clearing the trip ---");
    session.clear_route();
    session.settle();

    println!("--- Using the current location as origin ---");
    session.use_current_location();
    session.settle();
    for notice in session.drain_notices() {
        println!("[notice] {:?}: {}", notice.kind, notice.message);
    }
}
