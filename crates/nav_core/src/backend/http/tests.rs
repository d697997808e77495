use super::error::ApiError;
use super::parser::{parse_directions, parse_geocoding, parse_reverse};
use super::response::{DirectionsBody, Envelope, OneOrMany, ReverseRecord};
use crate::backend::FALLBACK_PLACE_NAME;
use crate::geo::Coordinate;

fn geocoding(json: &str) -> Envelope<OneOrMany> {
    serde_json::from_str(json).expect("geocoding envelope")
}

fn reverse(json: &str) -> Envelope<ReverseRecord> {
    serde_json::from_str(json).expect("reverse envelope")
}

fn directions(json: &str) -> Envelope<DirectionsBody> {
    serde_json::from_str(json).expect("directions envelope")
}

#[test]
fn geocoding_parses_a_list_with_synthesized_ids() {
    let envelope = geocoding(
        r#"{"data":[
            {"name":"Meskel Square","lat":9.0107,"lng":38.7612,"type":"landmark"},
            {"display_name":"Unity Park, Addis Ababa","latitude":"9.0183","lon":"38.7611"}
        ]}"#,
    );

    let places = parse_geocoding(envelope, "park").expect("places");
    assert_eq!(places.len(), 2);

    assert_eq!(places[0].id, "place-0");
    assert_eq!(places[0].name, "Meskel Square");
    assert_eq!(places[0].category.as_deref(), Some("landmark"));

    // Second record: display_name fallback, string coordinates, alternate keys.
    assert_eq!(places[1].id, "place-1");
    assert_eq!(places[1].name, "Unity Park, Addis Ababa");
    assert_eq!(places[1].at, Coordinate::new(9.0183, 38.7611));
    assert_eq!(places[1].category.as_deref(), Some("place"));
    assert_eq!(places[1].address.as_deref(), Some("Unity Park, Addis Ababa"));
}

#[test]
fn geocoding_accepts_a_single_object_payload() {
    let envelope = geocoding(r#"{"data":{"name":"Bole Airport","lat":8.9779,"lng":38.7993}}"#);
    let places = parse_geocoding(envelope, "bole").expect("places");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, "place-0");
    assert_eq!(places[0].at, Coordinate::new(8.9779, 38.7993));
}

#[test]
fn geocoding_names_fall_back_to_the_query() {
    let envelope = geocoding(r#"{"data":[{"lat":9.0,"lng":38.7}]}"#);
    let places = parse_geocoding(envelope, "merkato").expect("places");
    assert_eq!(places[0].name, "merkato");
}

#[test]
fn geocoding_skips_records_without_usable_coordinates() {
    let envelope = geocoding(
        r#"{"data":[
            {"name":"No coordinates"},
            {"name":"Bad latitude","lat":"not-a-number","lng":38.7},
            {"name":"Out of range","lat":123.0,"lng":38.7},
            {"name":"Good","lat":9.0,"lng":38.7}
        ]}"#,
    );
    let places = parse_geocoding(envelope, "x").expect("places");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Good");
    assert_eq!(places[0].id, "place-3", "ids index the original list");
}

#[test]
fn geocoding_with_absent_payload_is_empty() {
    let envelope = geocoding(r#"{"msg":"ok"}"#);
    assert!(parse_geocoding(envelope, "x").expect("places").is_empty());
}

#[test]
fn reverse_prefers_name_then_display_name() {
    let at = Coordinate::new(9.01, 38.76);

    let named = parse_reverse(
        reverse(r#"{"data":{"name":"Meskel Square","address":"Addis Ababa"}}"#),
        at,
    );
    assert_eq!(named.name, "Meskel Square");
    assert_eq!(named.address.as_deref(), Some("Addis Ababa"));
    assert_eq!(named.at, at);

    let display = parse_reverse(reverse(r#"{"data":{"display_name":"Churchill Avenue"}}"#), at);
    assert_eq!(display.name, "Churchill Avenue");
    assert_eq!(display.address.as_deref(), Some("Churchill Avenue"));
}

#[test]
fn reverse_with_absent_payload_degrades_to_the_fallback_name() {
    let at = Coordinate::new(9.01, 38.76);
    let place = parse_reverse(reverse(r#"{}"#), at);
    assert_eq!(place.name, FALLBACK_PLACE_NAME);
    assert_eq!(place.at, at);
}

#[test]
fn directions_derive_geometry_and_instructions_from_the_same_steps() {
    let envelope = directions(
        r#"{"data":{
            "totalDistance":2500.0,
            "totalTime":420.0,
            "direction":[
                {"point":[9.01,38.76],"instruction":"Head north","distance":800.0,"time":120.0,"type":"depart"},
                {"point":[9.02,38.76],"name":"Churchill Avenue","distance":900.0,"time":150.0,"type":"turn","modifier":"left"},
                {"point":[9.03,38.77],"type":"arrive"}
            ]
        }}"#,
    );

    let route = parse_directions(envelope).expect("route");
    assert_eq!(route.distance_m, 2500.0);
    assert_eq!(route.duration_secs, 420.0);
    assert_eq!(
        route.geometry,
        vec![
            Coordinate::new(9.01, 38.76),
            Coordinate::new(9.02, 38.76),
            Coordinate::new(9.03, 38.77),
        ]
    );

    assert_eq!(route.instructions.len(), 3);
    assert_eq!(route.instructions[0].text, "Head north");
    assert_eq!(route.instructions[1].text, "Churchill Avenue");
    assert_eq!(route.instructions[1].modifier.as_deref(), Some("left"));
    assert_eq!(route.instructions[2].text, "Continue");
    assert_eq!(route.instructions[2].distance_m, 0.0);
}

#[test]
fn directions_totals_come_from_the_backend_not_step_sums() {
    // Step sums (100) disagree with the reported total (160, e.g. turn
    // penalties); the reported total wins.
    let envelope = directions(
        r#"{"data":{
            "totalDistance":160.0,
            "totalTime":16.0,
            "direction":[
                {"point":[9.0,38.7],"distance":50.0,"time":5.0},
                {"point":[9.1,38.7],"distance":50.0,"time":5.0}
            ]
        }}"#,
    );
    let route = parse_directions(envelope).expect("route");
    assert_eq!(route.distance_m, 160.0);
    assert_eq!(route.duration_secs, 16.0);
}

#[test]
fn directions_missing_totals_default_to_zero() {
    let envelope = directions(r#"{"data":{"direction":[{"point":[9.0,38.7]}]}}"#);
    let route = parse_directions(envelope).expect("route");
    assert_eq!(route.distance_m, 0.0);
    assert_eq!(route.duration_secs, 0.0);
    assert_eq!(route.geometry.len(), 1);
}

#[test]
fn directions_skip_steps_with_out_of_range_points() {
    let envelope = directions(
        r#"{"data":{
            "totalDistance":100.0,
            "totalTime":10.0,
            "direction":[
                {"point":[999.0,38.7]},
                {"point":[9.0,-400.0]},
                {"point":[9.0,38.7]}
            ]
        }}"#,
    );
    let route = parse_directions(envelope).expect("route");
    assert_eq!(route.geometry, vec![Coordinate::new(9.0, 38.7)]);
    // Instructions still cover every step; only the geometry is filtered.
    assert_eq!(route.instructions.len(), 3);
}

#[test]
fn directions_no_route_marker_is_the_canonical_no_route_outcome() {
    assert!(matches!(
        parse_directions(directions(r#"{"msg":"NoRoute"}"#)),
        Err(ApiError::NoRoute)
    ));
    assert!(matches!(
        parse_directions(directions(r#"{"msg":"ok"}"#)),
        Err(ApiError::NoRoute),
    ));
}
