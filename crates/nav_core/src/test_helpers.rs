//! Recording and scripted fakes for exercising a session without a real map
//! engine or network. Feature-gated so downstream crates can use them in
//! their own tests.

use std::sync::{Arc, Mutex};

use crate::backend::{FixedLocator, GeoLocator, NavApi, FALLBACK_PLACE_NAME};
use crate::coordinator::NavSession;
use crate::error::{RouteFailure, SearchFailure};
use crate::geo::{Coordinate, Extent, NamedLocation};
use crate::session::{PlaceCandidate, Route};
use crate::sync::{MapSurface, MarkerRole, RouteStyle};

/// One directive a session issued to its map surface, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    UpsertMarker {
        role: MarkerRole,
        location: NamedLocation,
        accuracy_radius_m: Option<f64>,
    },
    RemoveMarker {
        role: MarkerRole,
    },
    SetRouteLine {
        geometry: Vec<Coordinate>,
    },
    ClearRouteLine,
    FlyTo {
        center: Coordinate,
        zoom: f64,
    },
    FitBounds {
        extent: Extent,
        padding: f64,
    },
}

/// Shared view of the directives a [RecordingSurface] has captured.
#[derive(Debug, Clone, Default)]
pub struct DirectiveLog(Arc<Mutex<Vec<Directive>>>);

impl DirectiveLog {
    /// Takes everything captured so far, leaving the log empty.
    pub fn taken(&self) -> Vec<Directive> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// A [MapSurface] that records directives instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: DirectiveLog,
}

impl RecordingSurface {
    pub fn new() -> (Self, DirectiveLog) {
        let log = DirectiveLog::default();
        (Self { log: log.clone() }, log)
    }

    fn record(&self, directive: Directive) {
        self.log.0.lock().unwrap().push(directive);
    }
}

impl MapSurface for RecordingSurface {
    fn upsert_marker(
        &mut self,
        role: MarkerRole,
        location: &NamedLocation,
        accuracy_radius_m: Option<f64>,
    ) {
        self.record(Directive::UpsertMarker {
            role,
            location: location.clone(),
            accuracy_radius_m,
        });
    }

    fn remove_marker(&mut self, role: MarkerRole) {
        self.record(Directive::RemoveMarker { role });
    }

    fn set_route_line(&mut self, geometry: &[Coordinate], _style: &RouteStyle) {
        self.record(Directive::SetRouteLine {
            geometry: geometry.to_vec(),
        });
    }

    fn clear_route_line(&mut self) {
        self.record(Directive::ClearRouteLine);
    }

    fn fly_to(&mut self, center: Coordinate, zoom: f64) {
        self.record(Directive::FlyTo { center, zoom });
    }

    fn fit_bounds(&mut self, extent: Extent, padding: f64) {
        self.record(Directive::FitBounds { extent, padding });
    }
}

/// A backend whose search and route calls always fail. Reverse resolution
/// still degrades to the placeholder, as the contract requires.
#[derive(Debug, Default)]
pub struct FailingApi;

impl NavApi for FailingApi {
    fn search(&self, _query: &str) -> Result<Vec<PlaceCandidate>, SearchFailure> {
        Err(SearchFailure("connection refused".into()))
    }

    fn reverse_resolve(&self, at: Coordinate) -> PlaceCandidate {
        PlaceCandidate {
            id: "fallback".into(),
            name: FALLBACK_PLACE_NAME.into(),
            at,
            category: None,
            address: None,
        }
    }

    fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        _want_instructions: bool,
    ) -> Result<Route, RouteFailure> {
        Err(RouteFailure::Request("connection refused".into()))
    }
}

fn default_locator() -> Box<dyn GeoLocator> {
    Box::new(FixedLocator(Coordinate::new(9.0054, 38.7636)))
}

/// A demo-mode session wired to a [RecordingSurface] and a fixed locator.
pub fn recording_session() -> (NavSession, DirectiveLog) {
    let (surface, log) = RecordingSurface::new();
    let session = NavSession::new("demo", Box::new(surface), default_locator());
    (session, log)
}

/// A session whose backend fails every search and route call.
pub fn failing_session() -> (NavSession, DirectiveLog) {
    let (surface, log) = RecordingSurface::new();
    let session = NavSession::with_api(
        Box::new(FailingApi),
        crate::session::ApiMode::Live,
        Box::new(surface),
        default_locator(),
    );
    (session, log)
}
