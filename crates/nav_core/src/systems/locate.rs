//! UseCurrentLocation, LocateRequested, and LocationFixed systems.
//!
//! UseCurrentLocation fills the origin (reusing a cached fix directly);
//! LocateRequested only refreshes the current-location pin. Either way the
//! locator is asked once; repeated requests while a fix is pending are
//! ignored.

use bevy_ecs::prelude::{Res, ResMut};

use crate::backend::{ApiHandle, LocatorHandle};
use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::geo::NamedLocation;
use crate::notices::{NoticeKind, SessionNotices};
use crate::session::{Endpoint, SearchState, SessionState};
use crate::sync::CameraQueue;

pub fn use_current_location_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<SessionState>,
    mut search: ResMut<SearchState>,
    mut notices: ResMut<SessionNotices>,
    locator: Res<LocatorHandle>,
) {
    if task.0.kind != TaskKind::UseCurrentLocation {
        return;
    }

    if let Some(location) = session.current_location.clone() {
        adopt_as_origin(&mut session, &mut search, &mut notices, &mut clock, location);
        return;
    }

    if session.locating {
        return;
    }
    session.locating = true;
    session.fix_for_origin = true;

    let outcome = locator.0.current_position();
    clock.schedule_in(0, TaskKind::LocationFixed { outcome });
}

pub fn locate_requested_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<SessionState>,
    locator: Res<LocatorHandle>,
) {
    if task.0.kind != TaskKind::LocateRequested {
        return;
    }

    if session.locating {
        return;
    }
    session.locating = true;
    session.fix_for_origin = false;

    let outcome = locator.0.current_position();
    clock.schedule_in(0, TaskKind::LocationFixed { outcome });
}

pub fn location_fixed_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<SessionState>,
    mut search: ResMut<SearchState>,
    mut notices: ResMut<SessionNotices>,
    mut camera: ResMut<CameraQueue>,
    api: Res<ApiHandle>,
) {
    let TaskKind::LocationFixed { ref outcome } = task.0.kind else {
        return;
    };

    session.locating = false;
    let for_origin = std::mem::take(&mut session.fix_for_origin);

    match outcome {
        Ok(at) => {
            // Name the fix through reverse resolution; that degrades to a
            // placeholder rather than failing.
            let place = api.0.reverse_resolve(*at);
            let location = NamedLocation {
                at: *at,
                name: Some(place.name),
            };
            session.current_location = Some(location.clone());
            camera.fly_to(*at);
            if for_origin {
                adopt_as_origin(&mut session, &mut search, &mut notices, &mut clock, location);
            }
        }
        Err(failure) => {
            notices.push(NoticeKind::LocationError, failure.to_string());
        }
    }
}

fn adopt_as_origin(
    session: &mut SessionState,
    search: &mut SearchState,
    notices: &mut SessionNotices,
    clock: &mut SessionClock,
    location: NamedLocation,
) {
    let name = location.name.clone().unwrap_or_default();
    if session.assign_endpoint(Endpoint::Origin, location) {
        search.field_mut(Endpoint::Origin).adopt(&name);
        notices.push(NoticeKind::OriginSet, name);
        super::schedule_route_if_ready(session, clock);
    }
}
