//! Offline demo backend: fixture gazetteer and straight-line routing.
//!
//! Search is a case-insensitive substring match returned in gazetteer order
//! (stable, no ranking). Routing approximates distance as Euclidean degrees
//! scaled by [METERS_PER_DEGREE] at a fixed 10 m/s. Latencies are injected so
//! UI timing stays realistic without a network.

use crate::backend::{NavApi, FALLBACK_PLACE_NAME};
use crate::error::{RouteFailure, SearchFailure};
use crate::geo::{Coordinate, METERS_PER_DEGREE};
use crate::session::{PlaceCandidate, Route, RouteInstruction};

pub const DEMO_SEARCH_LATENCY_MS: u64 = 300;
pub const DEMO_ROUTE_LATENCY_MS: u64 = 500;

/// Assumed travel speed for the demo duration estimate (m/s).
const DEMO_SPEED_MPS: f64 = 10.0;

/// (name, lat, lng, category) rows of the built-in gazetteer.
const GAZETTEER: &[(&str, f64, f64, &str)] = &[
    ("Bole International Airport", 8.9779, 38.7993, "airport"),
    ("Meskel Square", 9.0107, 38.7612, "landmark"),
    ("National Museum of Ethiopia", 9.0355, 38.7468, "museum"),
    ("Holy Trinity Cathedral", 9.0257, 38.7575, "church"),
    ("Entoto Park", 9.0833, 38.7667, "park"),
    ("Merkato Market", 9.0320, 38.7340, "market"),
    ("Unity Park", 9.0183, 38.7611, "park"),
    ("Friendship Park", 9.0122, 38.7644, "park"),
];

const GAZETTEER_ADDRESS: &str = "Addis Ababa, Ethiopia";

#[derive(Debug, Default)]
pub struct DemoApi {
    places: Vec<PlaceCandidate>,
}

impl DemoApi {
    pub fn new() -> Self {
        let places = GAZETTEER
            .iter()
            .enumerate()
            .map(|(index, (name, lat, lng, category))| PlaceCandidate {
                id: format!("{}", index + 1),
                name: (*name).to_string(),
                at: Coordinate::new(*lat, *lng),
                category: Some((*category).to_string()),
                address: Some(GAZETTEER_ADDRESS.to_string()),
            })
            .collect();
        Self { places }
    }
}

impl NavApi for DemoApi {
    fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchFailure> {
        let needle = query.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|place| place.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn reverse_resolve(&self, at: Coordinate) -> PlaceCandidate {
        PlaceCandidate {
            id: "current-location".into(),
            name: FALLBACK_PLACE_NAME.into(),
            at,
            category: None,
            address: None,
        }
    }

    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        want_instructions: bool,
    ) -> Result<Route, RouteFailure> {
        let dlat = destination.lat - origin.lat;
        let dlng = destination.lng - origin.lng;
        let distance_m = ((dlat * dlat + dlng * dlng).sqrt() * METERS_PER_DEGREE).round();
        let duration_secs = (distance_m / DEMO_SPEED_MPS).round();

        let instructions = if want_instructions {
            vec![
                RouteInstruction {
                    text: "Start navigation".into(),
                    distance_m: 0.0,
                    duration_secs: 0.0,
                    maneuver: "depart".into(),
                    modifier: None,
                },
                RouteInstruction {
                    text: "Continue to destination".into(),
                    distance_m,
                    duration_secs,
                    maneuver: "straight".into(),
                    modifier: None,
                },
                RouteInstruction {
                    text: "Arrive at destination".into(),
                    distance_m: 0.0,
                    duration_secs: 0.0,
                    maneuver: "arrive".into(),
                    modifier: None,
                },
            ]
        } else {
            Vec::new()
        };

        Ok(Route {
            distance_m,
            duration_secs,
            geometry: vec![origin, destination],
            instructions,
        })
    }

    fn search_latency_ms(&self) -> u64 {
        DEMO_SEARCH_LATENCY_MS
    }

    fn route_latency_ms(&self) -> u64 {
        DEMO_ROUTE_LATENCY_MS
    }
}
