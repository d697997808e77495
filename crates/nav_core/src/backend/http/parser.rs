//! Normalization of wire responses into session domain types.

use super::error::ApiError;
use super::response::{DirectionsBody, Envelope, OneOrMany, PlaceRecord, ReverseRecord};
use crate::backend::FALLBACK_PLACE_NAME;
use crate::geo::Coordinate;
use crate::session::{PlaceCandidate, Route, RouteInstruction};

/// Normalize a geocoding envelope into candidates with synthesized stable
/// ids. Records without usable coordinates are skipped.
pub(super) fn parse_geocoding(
    envelope: Envelope<OneOrMany>,
    query: &str,
) -> Result<Vec<PlaceCandidate>, ApiError> {
    let records = match envelope.data {
        Some(OneOrMany::Many(records)) => records,
        Some(OneOrMany::One(record)) => vec![record],
        None => return Ok(Vec::new()),
    };

    Ok(records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| candidate_from_record(record, index, query))
        .collect())
}

fn candidate_from_record(
    record: &PlaceRecord,
    index: usize,
    query: &str,
) -> Option<PlaceCandidate> {
    let lat = record.lat().filter(|value| value.is_finite())?;
    let lng = record.lng().filter(|value| value.is_finite())?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }

    let name = record
        .name
        .clone()
        .or_else(|| record.display_name.clone())
        .unwrap_or_else(|| query.to_string());

    Some(PlaceCandidate {
        id: format!("place-{}", index),
        name,
        at: Coordinate::new(lat, lng),
        category: Some(record.kind.clone().unwrap_or_else(|| "place".into())),
        address: record
            .address
            .clone()
            .or_else(|| record.display_name.clone()),
    })
}

/// Normalize a reverse-geocoding envelope. An absent payload or missing name
/// falls back to [FALLBACK_PLACE_NAME]; the candidate always sits at the
/// exact queried coordinate.
pub(super) fn parse_reverse(envelope: Envelope<ReverseRecord>, at: Coordinate) -> PlaceCandidate {
    let (name, address) = match envelope.data {
        Some(record) => (
            record
                .name
                .clone()
                .or_else(|| record.display_name.clone())
                .unwrap_or_else(|| FALLBACK_PLACE_NAME.into()),
            record.address.or(record.display_name),
        ),
        None => (FALLBACK_PLACE_NAME.into(), None),
    };

    PlaceCandidate {
        id: "current-location".into(),
        name,
        at,
        category: None,
        address,
    }
}

/// Normalize a directions envelope. An absent payload or an explicit
/// `NoRoute` marker is the canonical no-route outcome. Geometry and
/// instructions derive from the same ordered step list; aggregate totals come
/// from the backend (authoritative; they may include turn penalties a
/// per-step sum would miss).
pub(super) fn parse_directions(envelope: Envelope<DirectionsBody>) -> Result<Route, ApiError> {
    if envelope.error_text() == Some("NoRoute") {
        return Err(ApiError::NoRoute);
    }
    let body = envelope.data.ok_or(ApiError::NoRoute)?;

    let steps = body.direction.unwrap_or_default();

    // Step vertices get the same coordinate validation as geocoding
    // records; a malformed vertex is skipped, not propagated.
    let geometry: Vec<Coordinate> = steps
        .iter()
        .filter_map(|step| step.point)
        .filter(|point| {
            point[0].is_finite()
                && point[1].is_finite()
                && (-90.0..=90.0).contains(&point[0])
                && (-180.0..=180.0).contains(&point[1])
        })
        .map(|point| Coordinate::new(point[0], point[1]))
        .collect();

    let instructions: Vec<RouteInstruction> = steps
        .iter()
        .map(|step| RouteInstruction {
            text: step
                .instruction
                .clone()
                .or_else(|| step.name.clone())
                .unwrap_or_else(|| "Continue".into()),
            distance_m: step.distance.unwrap_or(0.0),
            duration_secs: step.time.unwrap_or(0.0),
            maneuver: step.kind.clone().unwrap_or_else(|| "turn".into()),
            modifier: step.modifier.clone(),
        })
        .collect();

    Ok(Route {
        distance_m: body.total_distance.unwrap_or(0.0),
        duration_secs: body.total_time.unwrap_or(0.0),
        geometry,
        instructions,
    })
}
