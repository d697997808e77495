//! Session state: the aggregate owned by one navigation session.
//!
//! All mutation happens inside systems reacting to clock tasks; everything
//! else reads snapshots. `route` is cleared whenever an endpoint changes, and
//! clearing the route resets the selection target.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, NamedLocation};

/// Quiet period a search input must hold before a query commits.
pub const DEBOUNCE_MS: u64 = 300;
/// Inputs shorter than this are suppressed without a resolver call.
pub const MIN_QUERY_LEN: usize = 2;

/// Which backend variant the session was started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Demo,
    Live,
}

/// Origin or destination of a route. Doubles as the search-field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

/// Which endpoint the next map tap or "use current location" fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionTarget {
    #[default]
    None,
    Origin,
    Destination,
}

/// One search result. Transient: lives only inside a result list for a
/// single query cycle; `id` is stable within that list and carries no
/// cross-query meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    pub at: Coordinate,
    pub category: Option<String>,
    pub address: Option<String>,
}

impl PlaceCandidate {
    pub fn to_location(&self) -> NamedLocation {
        NamedLocation::new(self.at, self.name.clone())
    }
}

/// A single turn-by-turn step, in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInstruction {
    pub text: String,
    pub distance_m: f64,
    pub duration_secs: f64,
    pub maneuver: String,
    pub modifier: Option<String>,
}

/// A resolved route. Empty geometry means "not found" and is never rendered
/// as a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance_m: f64,
    pub duration_secs: f64,
    pub geometry: Vec<Coordinate>,
    pub instructions: Vec<RouteInstruction>,
}

/// Route slot lifecycle. A settled outcome (`NoRoute` or `Ready`) ends
/// auto-triggering for the current endpoint pair; any endpoint change resets
/// to `NotRequested` and stales an in-flight request by sequence number.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteState {
    #[default]
    NotRequested,
    Pending {
        seq: u64,
    },
    NoRoute,
    Ready(Route),
}

/// The aggregate session state, exclusively owned by the coordinator.
#[derive(Debug, Resource)]
pub struct SessionState {
    pub mode: ApiMode,
    pub origin: Option<NamedLocation>,
    pub destination: Option<NamedLocation>,
    pub current_location: Option<NamedLocation>,
    pub route: RouteState,
    pub selection_target: SelectionTarget,
    /// On while a geolocation fix is outstanding.
    pub locating: bool,
    /// A pending fix was requested on behalf of the origin field.
    pub(crate) fix_for_origin: bool,
    route_seq: u64,
}

impl SessionState {
    pub fn new(mode: ApiMode) -> Self {
        Self {
            mode,
            origin: None,
            destination: None,
            current_location: None,
            route: RouteState::default(),
            selection_target: SelectionTarget::default(),
            locating: false,
            fix_for_origin: false,
            route_seq: 0,
        }
    }

    /// The held route, if one has been resolved.
    pub fn route(&self) -> Option<&Route> {
        match &self.route {
            RouteState::Ready(route) => Some(route),
            _ => None,
        }
    }

    pub fn endpoint(&self, which: Endpoint) -> Option<&NamedLocation> {
        match which {
            Endpoint::Origin => self.origin.as_ref(),
            Endpoint::Destination => self.destination.as_ref(),
        }
    }

    /// Assign an endpoint, replacing the previous value wholesale. A
    /// value-changing assignment clears the route and resets the selection
    /// target. Returns whether the value actually changed.
    pub(crate) fn assign_endpoint(&mut self, which: Endpoint, location: NamedLocation) -> bool {
        let slot = match which {
            Endpoint::Origin => &mut self.origin,
            Endpoint::Destination => &mut self.destination,
        };
        if slot.as_ref() == Some(&location) {
            return false;
        }
        *slot = Some(location);
        self.route = RouteState::NotRequested;
        self.selection_target = SelectionTarget::None;
        true
    }

    /// Both endpoints are known and no route request has been made for the
    /// current pair.
    pub(crate) fn route_ready_to_request(&self) -> bool {
        self.origin.is_some()
            && self.destination.is_some()
            && matches!(self.route, RouteState::NotRequested)
    }

    /// Move the route slot to `Pending`, returning the request sequence
    /// number a completion must present to be applied.
    pub(crate) fn begin_route_request(&mut self) -> u64 {
        self.route_seq += 1;
        self.route = RouteState::Pending {
            seq: self.route_seq,
        };
        self.route_seq
    }

    /// Whether a completion with `seq` is still the in-flight request.
    pub(crate) fn route_request_is_current(&self, seq: u64) -> bool {
        matches!(self.route, RouteState::Pending { seq: pending } if pending == seq)
    }

    /// Reset origin, destination, route, and target to their initial empty
    /// values atomically.
    pub(crate) fn clear_route(&mut self) {
        self.origin = None;
        self.destination = None;
        self.route = RouteState::NotRequested;
        self.selection_target = SelectionTarget::None;
    }
}

/// Per-field search pipeline state.
#[derive(Debug, Default)]
pub struct FieldSearch {
    /// Raw input text as last typed (or as set by a selection).
    pub text: String,
    /// Results of the latest applied resolution.
    pub results: Vec<PlaceCandidate>,
    /// On between a commit and its settlement.
    pub searching: bool,
    next_seq: u64,
    /// Sequence number armed for the pending debounce timer, if any.
    armed: Option<u64>,
    /// Sequence number of the latest committed query.
    committed: Option<u64>,
}

impl FieldSearch {
    /// Record an input change and arm a fresh debounce timer, cancelling any
    /// previous one. Returns the armed sequence number.
    pub(crate) fn arm(&mut self, text: &str) -> u64 {
        self.text = text.to_string();
        self.next_seq += 1;
        self.armed = Some(self.next_seq);
        self.next_seq
    }

    /// Record an input too short to query: cancels pending work and empties
    /// the result list.
    pub(crate) fn suppress(&mut self, text: &str) {
        self.text = text.to_string();
        self.armed = None;
        self.results.clear();
        self.searching = false;
    }

    /// Whether a debounce fire with `seq` is still the armed timer.
    pub(crate) fn debounce_is_current(&self, seq: u64) -> bool {
        self.armed == Some(seq)
    }

    /// Transition the armed timer into a committed query.
    pub(crate) fn commit(&mut self, seq: u64) {
        self.armed = None;
        self.committed = Some(seq);
        self.searching = true;
    }

    /// A resolution may be applied only if it belongs to the latest commit
    /// and the input has not changed since it was issued.
    pub(crate) fn resolution_is_current(&self, seq: u64, query: &str) -> bool {
        self.committed == Some(seq) && self.text == query
    }

    /// Settle the latest commit (success or failure).
    pub(crate) fn settle(&mut self) {
        self.searching = false;
        self.committed = None;
    }

    /// Adopt the name of a picked or assigned place and close the result
    /// list without arming a query for the synthesized text.
    pub(crate) fn adopt(&mut self, name: &str) {
        self.text = name.to_string();
        self.armed = None;
        self.results.clear();
        self.searching = false;
    }
}

/// Search pipeline state for both fields.
#[derive(Debug, Default, Resource)]
pub struct SearchState {
    origin: FieldSearch,
    destination: FieldSearch,
}

impl SearchState {
    pub fn field(&self, which: Endpoint) -> &FieldSearch {
        match which {
            Endpoint::Origin => &self.origin,
            Endpoint::Destination => &self.destination,
        }
    }

    pub(crate) fn field_mut(&mut self, which: Endpoint) -> &mut FieldSearch {
        match which {
            Endpoint::Origin => &mut self.origin,
            Endpoint::Destination => &mut self.destination,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.origin = FieldSearch::default();
        self.destination = FieldSearch::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(lat: f64, lng: f64) -> NamedLocation {
        NamedLocation::new(Coordinate::new(lat, lng), "somewhere")
    }

    #[test]
    fn assigning_an_endpoint_clears_the_route_and_target() {
        let mut session = SessionState::new(ApiMode::Demo);
        session.origin = Some(location(1.0, 1.0));
        session.destination = Some(location(2.0, 2.0));
        session.route = RouteState::Ready(Route {
            distance_m: 10.0,
            duration_secs: 1.0,
            geometry: vec![],
            instructions: vec![],
        });
        session.selection_target = SelectionTarget::Destination;

        let changed = session.assign_endpoint(Endpoint::Destination, location(3.0, 3.0));

        assert!(changed);
        assert_eq!(session.route, RouteState::NotRequested);
        assert_eq!(session.selection_target, SelectionTarget::None);
    }

    #[test]
    fn reassigning_the_same_value_is_a_no_op() {
        let mut session = SessionState::new(ApiMode::Demo);
        session.assign_endpoint(Endpoint::Origin, location(1.0, 1.0));
        session.selection_target = SelectionTarget::Destination;

        let changed = session.assign_endpoint(Endpoint::Origin, location(1.0, 1.0));

        assert!(!changed);
        assert_eq!(session.selection_target, SelectionTarget::Destination);
    }

    #[test]
    fn route_request_gating_requires_both_endpoints_and_unset_route() {
        let mut session = SessionState::new(ApiMode::Demo);
        assert!(!session.route_ready_to_request());

        session.assign_endpoint(Endpoint::Origin, location(1.0, 1.0));
        assert!(!session.route_ready_to_request());

        session.assign_endpoint(Endpoint::Destination, location(2.0, 2.0));
        assert!(session.route_ready_to_request());

        let seq = session.begin_route_request();
        assert!(!session.route_ready_to_request());
        assert!(session.route_request_is_current(seq));

        session.route = RouteState::NoRoute;
        assert!(!session.route_ready_to_request(), "settled outcome ends auto-trigger");
    }

    #[test]
    fn endpoint_change_stales_a_pending_route_request() {
        let mut session = SessionState::new(ApiMode::Demo);
        session.assign_endpoint(Endpoint::Origin, location(1.0, 1.0));
        session.assign_endpoint(Endpoint::Destination, location(2.0, 2.0));
        let seq = session.begin_route_request();

        session.assign_endpoint(Endpoint::Destination, location(3.0, 3.0));
        assert!(!session.route_request_is_current(seq));
    }

    #[test]
    fn field_search_cancellation_and_staleness() {
        let mut field = FieldSearch::default();

        let first = field.arm("ad");
        let second = field.arm("adi");
        assert!(!field.debounce_is_current(first), "restart cancels the previous timer");
        assert!(field.debounce_is_current(second));

        field.commit(second);
        assert!(field.searching);
        assert!(field.resolution_is_current(second, "adi"));
        assert!(!field.resolution_is_current(first, "ad"));

        // Input changed after the commit was issued.
        field.arm("addi");
        assert!(!field.resolution_is_current(second, "adi"));
    }

    #[test]
    fn suppress_clears_pending_state() {
        let mut field = FieldSearch::default();
        let seq = field.arm("ad");
        field.results.push(PlaceCandidate {
            id: "place-0".into(),
            name: "Somewhere".into(),
            at: Coordinate::new(9.0, 38.7),
            category: None,
            address: None,
        });

        field.suppress("a");
        assert!(!field.debounce_is_current(seq));
        assert!(field.results.is_empty());
        assert!(!field.searching);
    }
}
