//! Backend capability traits and credential-based selection.
//!
//! The session talks to geocoding and routing through [NavApi] and to the
//! platform location service through [GeoLocator]. Two `NavApi`
//! implementations exist: an offline fixture-backed demo and a live HTTP
//! client; the variant is picked once at session start from the credential.

pub mod demo;
pub mod http;

use bevy_ecs::prelude::Resource;

use crate::error::{LocateFailure, RouteFailure, SearchFailure};
use crate::geo::Coordinate;
use crate::session::{ApiMode, PlaceCandidate, Route};

/// The distinguished credential that selects demo mode. Always valid and
/// never reaches the network.
pub const DEMO_CREDENTIAL: &str = "demo";

/// Name used when reverse resolution cannot produce anything better. Tapping
/// the map must always yield a usable location.
pub const FALLBACK_PLACE_NAME: &str = "Selected Location";

/// Geocoding and routing capabilities behind one seam.
///
/// The latency accessors report how long a completion should be deferred on
/// the session clock; the demo backend injects realistic delays, the live
/// backend resolves blockingly and reports zero.
pub trait NavApi: Send + Sync {
    /// Free-text place search. Failures are reported, never panicked; the
    /// caller converts them to an empty result list plus a notice.
    fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchFailure>;

    /// Coordinate → place-name resolution. Infallible by contract: any
    /// failure degrades to a [FALLBACK_PLACE_NAME] candidate at the given
    /// coordinate.
    fn reverse_resolve(&self, at: Coordinate) -> PlaceCandidate;

    /// Directions between two coordinates.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        want_instructions: bool,
    ) -> Result<Route, RouteFailure>;

    fn search_latency_ms(&self) -> u64 {
        0
    }

    fn route_latency_ms(&self) -> u64 {
        0
    }
}

/// One-shot "get current position" (high accuracy requested of the
/// platform). Timeout is whatever the platform service enforces.
pub trait GeoLocator: Send + Sync {
    fn current_position(&self) -> Result<Coordinate, LocateFailure>;
}

/// [NavApi] handle stored in the world.
#[derive(Resource)]
pub struct ApiHandle(pub Box<dyn NavApi>);

/// [GeoLocator] handle stored in the world.
#[derive(Resource)]
pub struct LocatorHandle(pub Box<dyn GeoLocator>);

/// Select the backend variant for a credential. The demo credential (or an
/// empty string) stays offline; anything else becomes a live API key.
pub fn api_for_credential(credential: &str) -> (Box<dyn NavApi>, ApiMode) {
    if credential.is_empty() || credential == DEMO_CREDENTIAL {
        (Box::new(demo::DemoApi::new()), ApiMode::Demo)
    } else {
        (
            Box::new(http::HttpApi::new(http::DEFAULT_API_BASE, credential)),
            ApiMode::Live,
        )
    }
}

/// Locator that always yields the same fix. Useful for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinate);

impl GeoLocator for FixedLocator {
    fn current_position(&self) -> Result<Coordinate, LocateFailure> {
        Ok(self.0)
    }
}

/// Locator for platforms without a location service.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocator;

impl GeoLocator for UnavailableLocator {
    fn current_position(&self) -> Result<Coordinate, LocateFailure> {
        Err(LocateFailure::Unavailable(
            "no location service on this platform".into(),
        ))
    }
}
