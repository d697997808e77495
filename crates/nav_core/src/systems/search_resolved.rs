//! SearchResolved system: adopt resolver results unless the field has moved
//! on since the query was committed.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentTask, TaskKind};
use crate::notices::{NoticeKind, SessionNotices};
use crate::session::SearchState;

pub fn search_resolved_system(
    task: Res<CurrentTask>,
    mut search: ResMut<SearchState>,
    mut notices: ResMut<SessionNotices>,
) {
    let TaskKind::SearchResolved {
        field,
        seq,
        ref query,
        ref outcome,
    } = task.0.kind
    else {
        return;
    };

    let entry = search.field_mut(field);
    if !entry.resolution_is_current(seq, query) {
        // The input changed (or a newer commit landed) while this query was
        // in flight; its results no longer describe what the field shows.
        return;
    }

    entry.settle();
    match outcome {
        Ok(results) => entry.results = results.clone(),
        Err(failure) => {
            entry.results.clear();
            notices.push(NoticeKind::SearchFailed, failure.to_string());
        }
    }
}
