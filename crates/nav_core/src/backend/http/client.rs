use reqwest::{blocking::Client, StatusCode, Url};
use std::time::Duration;

use super::error::ApiError;
use super::parser::{parse_directions, parse_geocoding, parse_reverse};
use super::response::{DirectionsBody, Envelope, OneOrMany, ReverseRecord};
use crate::geo::Coordinate;
use crate::session::{PlaceCandidate, Route};

pub const DEFAULT_API_BASE: &str = "https://mapapi.gebeta.app/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin blocking HTTP client for the routing service.
#[derive(Debug, Clone)]
pub struct NavHttpClient {
    client: Client,
    base: String,
    api_key: String,
}

impl NavHttpClient {
    /// Create a client for the given API base (e.g. the hosted endpoint in
    /// [DEFAULT_API_BASE]) and opaque key.
    pub fn new(base: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build http client");
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Free-text geocoding.
    pub fn geocode(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApiError> {
        let mut url = self.url("/v1/route/geocoding")?;
        url.query_pairs_mut()
            .append_pair("name", query)
            .append_pair("apiKey", &self.api_key);

        let envelope: Envelope<OneOrMany> = self.fetch(url)?;
        parse_geocoding(envelope, query)
    }

    /// Coordinate → place name.
    pub fn reverse_geocode(&self, at: Coordinate) -> Result<PlaceCandidate, ApiError> {
        let mut url = self.url("/v1/route/revgeocode")?;
        url.query_pairs_mut()
            .append_pair("lat", &at.lat.to_string())
            .append_pair("lng", &at.lng.to_string())
            .append_pair("apiKey", &self.api_key);

        let envelope: Envelope<ReverseRecord> = self.fetch(url)?;
        Ok(parse_reverse(envelope, at))
    }

    /// Directions between two coordinates.
    pub fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        want_instructions: bool,
    ) -> Result<Route, ApiError> {
        let mut url = self.url("/route/direction/")?;
        url.query_pairs_mut()
            .append_pair("origin", &format!("{},{}", origin.lat, origin.lng))
            .append_pair(
                "destination",
                &format!("{},{}", destination.lat, destination.lng),
            )
            .append_pair("apiKey", &self.api_key);
        if want_instructions {
            url.query_pairs_mut().append_pair("instruction", "1");
        }

        let envelope: Envelope<DirectionsBody> = self.fetch(url)?;
        parse_directions(envelope)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{}", self.base, path))
            .map_err(|err| ApiError::Api(format!("failed to build request url: {}", err)))
    }

    /// Issue a GET and decode the `{ data, msg }` envelope. Non-2xx bodies
    /// may still carry a usable error message.
    fn fetch<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, ApiError> {
        let response = self.client.get(url).send().map_err(ApiError::Http)?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Api(describe_failure(status, response)));
        }

        response.json().map_err(ApiError::Json)
    }
}

fn describe_failure(status: StatusCode, response: reqwest::blocking::Response) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        msg: Option<String>,
        message: Option<String>,
    }

    response
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.message.or(body.msg))
        .unwrap_or_else(|| format!("request failed with status {}", status))
}
