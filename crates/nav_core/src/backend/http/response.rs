//! Wire-format structs for the routing service's responses.
//!
//! The service is loose about shapes: `data` may be a list or a single
//! object, coordinates arrive under several key names and sometimes as
//! strings. Everything here is tolerant and `pub(super)`; normalization
//! lives in the parser.

use serde::Deserialize;

/// Common `{ data, msg }` envelope. Some error bodies use `message`.
#[derive(Deserialize)]
pub(super) struct Envelope<T> {
    pub(super) data: Option<T>,
    pub(super) msg: Option<String>,
    pub(super) message: Option<String>,
}

impl<T> Envelope<T> {
    pub(super) fn error_text(&self) -> Option<&str> {
        self.msg.as_deref().or(self.message.as_deref())
    }
}

/// A numeric field that may arrive as a JSON number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    pub(super) fn value(&self) -> Option<f64> {
        match self {
            NumberLike::Number(value) => Some(*value),
            NumberLike::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Geocoding `data`: a list of matches or one bare match object.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum OneOrMany {
    Many(Vec<PlaceRecord>),
    One(PlaceRecord),
}

#[derive(Deserialize)]
pub(super) struct PlaceRecord {
    pub(super) name: Option<String>,
    pub(super) display_name: Option<String>,
    pub(super) lat: Option<NumberLike>,
    pub(super) latitude: Option<NumberLike>,
    pub(super) lng: Option<NumberLike>,
    pub(super) lon: Option<NumberLike>,
    pub(super) longitude: Option<NumberLike>,
    #[serde(rename = "type")]
    pub(super) kind: Option<String>,
    pub(super) address: Option<String>,
}

impl PlaceRecord {
    pub(super) fn lat(&self) -> Option<f64> {
        self.lat
            .as_ref()
            .or(self.latitude.as_ref())
            .and_then(NumberLike::value)
    }

    pub(super) fn lng(&self) -> Option<f64> {
        self.lng
            .as_ref()
            .or(self.lon.as_ref())
            .or(self.longitude.as_ref())
            .and_then(NumberLike::value)
    }
}

/// Reverse geocoding `data`. An absent payload is success-with-defaults.
#[derive(Deserialize)]
pub(super) struct ReverseRecord {
    pub(super) name: Option<String>,
    pub(super) display_name: Option<String>,
    pub(super) address: Option<String>,
}

/// Directions `data`.
#[derive(Deserialize)]
pub(super) struct DirectionsBody {
    #[serde(rename = "totalDistance")]
    pub(super) total_distance: Option<f64>,
    #[serde(rename = "totalTime")]
    pub(super) total_time: Option<f64>,
    pub(super) direction: Option<Vec<DirectionStep>>,
}

#[derive(Deserialize)]
pub(super) struct DirectionStep {
    /// `[lat, lng]` of this step's vertex.
    pub(super) point: Option<[f64; 2]>,
    pub(super) instruction: Option<String>,
    pub(super) name: Option<String>,
    pub(super) distance: Option<f64>,
    pub(super) time: Option<f64>,
    #[serde(rename = "type")]
    pub(super) kind: Option<String>,
    pub(super) modifier: Option<String>,
}
