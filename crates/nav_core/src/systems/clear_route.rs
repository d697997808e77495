//! ClearRoute system: reset endpoints, route, target, and both search fields
//! in one step. Cached geolocation survives the reset.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentTask, TaskKind};
use crate::session::{SearchState, SessionState};

pub fn clear_route_system(
    task: Res<CurrentTask>,
    mut session: ResMut<SessionState>,
    mut search: ResMut<SearchState>,
) {
    if task.0.kind != TaskKind::ClearRoute {
        return;
    }

    session.clear_route();
    search.reset();
}
