//! PlacePicked system: explicit selection of a search result for a field.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::notices::{NoticeKind, SessionNotices};
use crate::session::{Endpoint, SearchState, SessionState};
use crate::sync::CameraQueue;

pub fn place_picked_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<SessionState>,
    mut search: ResMut<SearchState>,
    mut notices: ResMut<SessionNotices>,
    mut camera: ResMut<CameraQueue>,
) {
    let TaskKind::PlacePicked { field, ref place } = task.0.kind else {
        return;
    };

    // Picking always recenters, even when it reselects the same endpoint.
    camera.fly_to(place.at);

    if session.assign_endpoint(field, place.to_location()) {
        let kind = match field {
            Endpoint::Origin => NoticeKind::OriginSet,
            Endpoint::Destination => NoticeKind::DestinationSet,
        };
        notices.push(kind, place.name.clone());
        super::schedule_route_if_ready(&session, &mut clock);
    }
    search.field_mut(field).adopt(&place.name);
}
