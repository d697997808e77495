//! MapTapped system: reverse-resolve the tapped coordinate into an endpoint.
//!
//! With no explicit selection target the tap fills the origin first, then
//! the destination. With a target armed it fills that endpoint regardless of
//! what is already set.

use bevy_ecs::prelude::{Res, ResMut};

use crate::backend::ApiHandle;
use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::notices::{NoticeKind, SessionNotices};
use crate::session::{Endpoint, SearchState, SelectionTarget, SessionState};

pub fn map_tap_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<SessionState>,
    mut search: ResMut<SearchState>,
    mut notices: ResMut<SessionNotices>,
    api: Res<ApiHandle>,
) {
    let TaskKind::MapTapped { at } = task.0.kind else {
        return;
    };

    let fills_origin = match session.selection_target {
        SelectionTarget::Origin => true,
        SelectionTarget::Destination => false,
        SelectionTarget::None => session.origin.is_none(),
    };
    let which = if fills_origin {
        Endpoint::Origin
    } else {
        Endpoint::Destination
    };

    // Reverse resolution is infallible: it degrades to a placeholder name at
    // the tapped coordinate, never to an error.
    let place = api.0.reverse_resolve(at);
    if session.assign_endpoint(which, place.to_location()) {
        // Any tap that filled the origin advances the sequence so the next
        // tap fills the destination.
        if which == Endpoint::Origin {
            session.selection_target = SelectionTarget::Destination;
        }
        search.field_mut(which).adopt(&place.name);
        let kind = match which {
            Endpoint::Origin => NoticeKind::OriginSet,
            Endpoint::Destination => NoticeKind::DestinationSet,
        };
        notices.push(kind, place.name);
        super::schedule_route_if_ready(&session, &mut clock);
    }
}
