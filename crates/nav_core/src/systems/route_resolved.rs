//! RouteResolved system: settle the route slot, unless the endpoints have
//! changed since the request was issued.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentTask, TaskKind};
use crate::error::RouteFailure;
use crate::notices::{NoticeKind, SessionNotices};
use crate::panel::{format_distance, format_duration};
use crate::session::{RouteState, SessionState};

pub fn route_resolved_system(
    task: Res<CurrentTask>,
    mut session: ResMut<SessionState>,
    mut notices: ResMut<SessionNotices>,
) {
    let TaskKind::RouteResolved { seq, ref outcome } = task.0.kind else {
        return;
    };

    if !session.route_request_is_current(seq) {
        // Endpoint changed mid-flight; the slot was reset and the change
        // will trigger its own request.
        return;
    }

    match outcome {
        Ok(route) => {
            notices.push(
                NoticeKind::RouteFound,
                format!(
                    "{} / {}",
                    format_distance(route.distance_m),
                    format_duration(route.duration_secs)
                ),
            );
            session.route = RouteState::Ready(route.clone());
        }
        Err(RouteFailure::NoRoute) => {
            session.route = RouteState::NoRoute;
            notices.push(NoticeKind::NoRouteFound, "No route found");
        }
        Err(failure) => {
            // Request and decode failures settle the slot the same way a
            // no-route answer does; a later endpoint change re-arms it.
            session.route = RouteState::NoRoute;
            notices.push(NoticeKind::NoRouteFound, failure.to_string());
        }
    }
}
