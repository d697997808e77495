pub mod clear_route;
pub mod locate;
pub mod map_sync;
pub mod map_tap;
pub mod place_picked;
pub mod route_request;
pub mod route_resolved;
pub mod search_commit;
pub mod search_input;
pub mod search_resolved;

use crate::clock::{SessionClock, TaskKind};
use crate::session::SessionState;

/// Auto-trigger: whenever both endpoints are known and no route request has
/// been made for the pair, ask the resolver exactly once. A settled outcome
/// (even no-route) ends the auto-trigger until an endpoint changes.
pub(crate) fn schedule_route_if_ready(session: &SessionState, clock: &mut SessionClock) {
    if session.route_ready_to_request() {
        clock.schedule_in(0, TaskKind::RouteRequested);
    }
}
