//! Live HTTP backend for geocoding, reverse geocoding, and directions.
//!
//! Wraps a blocking client around the routing service's REST endpoints and
//! normalizes its loosely-shaped responses into the session's domain types
//! without leaking wire details past this module.

mod client;
mod error;
mod parser;
mod response;

#[cfg(test)]
mod tests;

pub use client::{NavHttpClient, DEFAULT_API_BASE};
pub use error::ApiError;

use crate::backend::{NavApi, FALLBACK_PLACE_NAME};
use crate::error::{RouteFailure, SearchFailure};
use crate::geo::Coordinate;
use crate::session::{PlaceCandidate, Route};

/// [NavApi] implementation backed by [NavHttpClient]. Converts transport
/// errors to the cloneable session failure taxonomy at this boundary.
pub struct HttpApi {
    client: NavHttpClient,
}

impl HttpApi {
    pub fn new(base: &str, api_key: &str) -> Self {
        Self {
            client: NavHttpClient::new(base, api_key),
        }
    }
}

impl NavApi for HttpApi {
    fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchFailure> {
        self.client
            .geocode(query)
            .map_err(|err| SearchFailure(err.to_string()))
    }

    fn reverse_resolve(&self, at: Coordinate) -> PlaceCandidate {
        // Reverse geocoding is an enhancement, not a correctness
        // requirement: any failure degrades to the fallback candidate.
        self.client
            .reverse_geocode(at)
            .unwrap_or_else(|_| PlaceCandidate {
                id: "current-location".into(),
                name: FALLBACK_PLACE_NAME.into(),
                at,
                category: None,
                address: None,
            })
    }

    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        want_instructions: bool,
    ) -> Result<Route, RouteFailure> {
        self.client
            .directions(origin, destination, want_instructions)
            .map_err(|err| match err {
                ApiError::NoRoute => RouteFailure::NoRoute,
                ApiError::Json(inner) => RouteFailure::InvalidResponse(inner.to_string()),
                other => RouteFailure::Request(other.to_string()),
            })
    }
}
