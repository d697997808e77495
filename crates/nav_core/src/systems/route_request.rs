//! RouteRequested system: ask the route resolver for the current endpoint
//! pair, deferring the completion by the backend's injected latency.

use bevy_ecs::prelude::{Res, ResMut};

use crate::backend::ApiHandle;
use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::session::SessionState;

pub fn route_request_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<SessionState>,
    api: Res<ApiHandle>,
) {
    if task.0.kind != TaskKind::RouteRequested {
        return;
    }

    // An endpoint may have changed or been cleared since this request was
    // scheduled; re-check before touching the resolver.
    if !session.route_ready_to_request() {
        return;
    }
    let seq = session.begin_route_request();

    let (origin, destination) = match (&session.origin, &session.destination) {
        (Some(origin), Some(destination)) => (origin.at, destination.at),
        _ => return,
    };

    let outcome = api.0.route(origin, destination, true);
    clock.schedule_in(
        api.0.route_latency_ms(),
        TaskKind::RouteResolved { seq, outcome },
    );
}
