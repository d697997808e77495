//! SearchInput system: debounce raw keystrokes into at most one pending
//! query per pause in typing.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::session::{SearchState, DEBOUNCE_MS, MIN_QUERY_LEN};

pub fn search_input_system(
    task: Res<CurrentTask>,
    mut clock: ResMut<SessionClock>,
    mut search: ResMut<SearchState>,
) {
    let TaskKind::SearchInput { field, ref text } = task.0.kind else {
        return;
    };

    let entry = search.field_mut(field);

    // Short inputs are suppressed, not errored: clear pending work and
    // results without any resolver call.
    if text.chars().count() < MIN_QUERY_LEN {
        entry.suppress(text);
        return;
    }

    // Arming restarts the quiet period; the previous timer's sequence number
    // is now stale and its fire will be ignored.
    let seq = entry.arm(text);
    clock.schedule_in(DEBOUNCE_MS, TaskKind::DebounceElapsed { field, seq });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Endpoint;
    use bevy_ecs::prelude::{Schedule, World};

    fn run_input(world: &mut World, at: u64, text: &str) {
        world
            .resource_mut::<SessionClock>()
            .schedule_at(
                at,
                TaskKind::SearchInput {
                    field: Endpoint::Origin,
                    text: text.into(),
                },
            );
        let task = world
            .resource_mut::<SessionClock>()
            .pop_next()
            .expect("input task");
        world.insert_resource(CurrentTask(task));

        let mut schedule = Schedule::default();
        schedule.add_systems(search_input_system);
        schedule.run(world);
    }

    fn new_world() -> World {
        let mut world = World::new();
        world.insert_resource(SessionClock::default());
        world.insert_resource(SearchState::default());
        world
    }

    #[test]
    fn input_arms_a_debounce_timer_after_the_quiet_period() {
        let mut world = new_world();
        run_input(&mut world, 10, "me");

        let fire = world
            .resource_mut::<SessionClock>()
            .pop_next()
            .expect("debounce task");
        assert_eq!(fire.timestamp, 10 + DEBOUNCE_MS);
        assert!(matches!(
            fire.kind,
            TaskKind::DebounceElapsed {
                field: Endpoint::Origin,
                ..
            }
        ));
    }

    #[test]
    fn short_input_suppresses_without_scheduling() {
        let mut world = new_world();
        run_input(&mut world, 0, "m");

        assert!(world.resource::<SessionClock>().is_empty());
        let search = world.resource::<SearchState>();
        assert!(search.field(Endpoint::Origin).results.is_empty());
        assert!(!search.field(Endpoint::Origin).searching);
    }

    #[test]
    fn rapid_inputs_leave_only_the_last_timer_current() {
        let mut world = new_world();
        run_input(&mut world, 0, "a");
        run_input(&mut world, 50, "ad");
        run_input(&mut world, 100, "adi");

        // Two timers are on the clock ("ad", "adi"), but only the last one's
        // sequence is still armed.
        let mut current = 0;
        while let Some(task) = world.resource_mut::<SessionClock>().pop_next() {
            let TaskKind::DebounceElapsed { field, seq } = task.kind else {
                panic!("unexpected task");
            };
            if world
                .resource::<SearchState>()
                .field(field)
                .debounce_is_current(seq)
            {
                current += 1;
            }
        }
        assert_eq!(current, 1);
    }
}
