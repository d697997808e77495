//! DebounceElapsed system: commit the armed query and invoke the place
//! resolver, deferring the completion by the backend's injected latency.

use bevy_ecs::prelude::{Res, ResMut};

use crate::backend::ApiHandle;
use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::session::SearchState;

pub fn search_commit_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut search: ResMut<SearchState>,
    api: Res<ApiHandle>,
) {
    let TaskKind::DebounceElapsed { field, seq } = task.0.kind else {
        return;
    };

    let entry = search.field_mut(field);
    if !entry.debounce_is_current(seq) {
        // A newer input restarted the quiet period; this fire is stale.
        return;
    }

    entry.commit(seq);
    let query = entry.text.clone();
    let outcome = api.0.search(&query);
    clock.schedule_in(
        api.0.search_latency_ms(),
        TaskKind::SearchResolved {
            field,
            seq,
            query,
            outcome,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::demo::{DemoApi, DEMO_SEARCH_LATENCY_MS};
    use crate::session::Endpoint;
    use bevy_ecs::prelude::{Schedule, World};

    fn new_world() -> World {
        let mut world = World::new();
        world.insert_resource(SessionClock::default());
        world.insert_resource(SearchState::default());
        world.insert_resource(ApiHandle(Box::new(DemoApi::new())));
        world
    }

    fn run_fire(world: &mut World, field: Endpoint, seq: u64) {
        world
            .resource_mut::<SessionClock>()
            .schedule_in(0, TaskKind::DebounceElapsed { field, seq });
        let task = world
            .resource_mut::<SessionClock>()
            .pop_next()
            .expect("fire task");
        world.insert_resource(CurrentTask(task));
        let mut schedule = Schedule::default();
        schedule.add_systems(search_commit_system);
        schedule.run(world);
    }

    #[test]
    fn current_fire_commits_and_schedules_a_resolution() {
        let mut world = new_world();
        let seq = world
            .resource_mut::<SearchState>()
            .field_mut(Endpoint::Origin)
            .arm("meskel");

        run_fire(&mut world, Endpoint::Origin, seq);

        assert!(world
            .resource::<SearchState>()
            .field(Endpoint::Origin)
            .searching);

        let resolved = world
            .resource_mut::<SessionClock>()
            .pop_next()
            .expect("resolution task");
        assert_eq!(resolved.timestamp, DEMO_SEARCH_LATENCY_MS);
        let TaskKind::SearchResolved { query, outcome, .. } = resolved.kind else {
            panic!("unexpected task");
        };
        assert_eq!(query, "meskel");
        assert_eq!(outcome.expect("results").len(), 1);
    }

    #[test]
    fn stale_fire_is_ignored() {
        let mut world = new_world();
        let stale = world
            .resource_mut::<SearchState>()
            .field_mut(Endpoint::Origin)
            .arm("me");
        world
            .resource_mut::<SearchState>()
            .field_mut(Endpoint::Origin)
            .arm("mes");

        run_fire(&mut world, Endpoint::Origin, stale);

        assert!(world.resource::<SessionClock>().is_empty());
        assert!(!world
            .resource::<SearchState>()
            .field(Endpoint::Origin)
            .searching);
    }
}
