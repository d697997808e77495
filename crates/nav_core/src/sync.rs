//! Map surface contract and synchronizer state.
//!
//! The map engine itself is an external collaborator; the coordinator talks
//! to it through [MapSurface]. Directives are keyed by role, so re-issuing an
//! unchanged value is a no-op in effect and a changed value fully replaces
//! the prior rendering (remove-then-add, never "move"). The diffing itself
//! lives in [crate::systems::map_sync].

use bevy_ecs::prelude::Resource;

use crate::geo::{Coordinate, Extent, NamedLocation};

/// Zoom used when flying to a search selection or location fix.
pub const FLY_TO_ZOOM: f64 = 15.0;
/// Padding (px) around the route extent when framing it.
pub const FIT_BOUNDS_PADDING: f64 = 60.0;
/// Radius (m) of the accuracy indicator around the current-location marker.
pub const ACCURACY_RADIUS_M: f64 = 50.0;

/// Which rendering slot a marker directive addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    Origin,
    Destination,
    /// Rendered with an [ACCURACY_RADIUS_M] indicator around the pin.
    CurrentLocation,
}

/// One stroke of the route polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

/// Route rendering: a wide light casing beneath a narrower primary line, for
/// contrast against arbitrary basemap colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStyle {
    pub casing: Stroke,
    pub line: Stroke,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            casing: Stroke {
                color: "white",
                width: 10.0,
                opacity: 0.5,
            },
            line: Stroke {
                color: "hsl(145, 55%, 35%)",
                width: 6.0,
                opacity: 0.9,
            },
        }
    }
}

/// Render directives the coordinator issues to the map engine. All methods
/// are idempotent per role/key.
pub trait MapSurface: Send + Sync {
    /// Place or replace a marker. `accuracy_radius_m` is set only for the
    /// current-location role, which renders an indicator circle of that
    /// radius around the pin.
    fn upsert_marker(
        &mut self,
        role: MarkerRole,
        location: &NamedLocation,
        accuracy_radius_m: Option<f64>,
    );
    fn remove_marker(&mut self, role: MarkerRole);
    fn set_route_line(&mut self, geometry: &[Coordinate], style: &RouteStyle);
    fn clear_route_line(&mut self);
    /// Animate the viewport center to a coordinate without touching markers.
    fn fly_to(&mut self, center: Coordinate, zoom: f64);
    /// Frame an extent with padding. One-shot; never a continuous follow.
    fn fit_bounds(&mut self, extent: Extent, padding: f64);
}

/// [MapSurface] handle stored in the world.
#[derive(Resource)]
pub struct MapHandle(pub Box<dyn MapSurface>);

/// Last state pushed to the surface, for diffing.
#[derive(Debug, Default, Resource)]
pub struct SyncedLayout {
    pub(crate) origin: Option<NamedLocation>,
    pub(crate) destination: Option<NamedLocation>,
    pub(crate) current_location: Option<NamedLocation>,
    pub(crate) route_geometry: Option<Vec<Coordinate>>,
}

/// A pending viewport animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    pub center: Coordinate,
    pub zoom: f64,
}

/// Fly-to requests queued by systems and drained into the surface after the
/// marker diff.
#[derive(Debug, Default, Resource)]
pub struct CameraQueue(pub(crate) Vec<CameraMove>);

impl CameraQueue {
    pub(crate) fn fly_to(&mut self, center: Coordinate) {
        self.0.push(CameraMove {
            center,
            zoom: FLY_TO_ZOOM,
        });
    }
}
