//! Session runner: advances the clock and routes tasks into the ECS.
//!
//! Clock progression and task routing happen here, outside systems. Each step
//! pops the next task from [SessionClock], inserts it as [CurrentTask], then
//! runs the schedule.

use bevy_ecs::prelude::Res;
use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentTask, SessionClock, TaskKind};
use crate::systems::{
    clear_route::clear_route_system,
    locate::{locate_requested_system, location_fixed_system, use_current_location_system},
    map_sync::map_sync_system,
    map_tap::map_tap_system,
    place_picked::place_picked_system,
    route_request::route_request_system,
    route_resolved::route_resolved_system,
    search_commit::search_commit_system,
    search_input::search_input_system,
    search_resolved::search_resolved_system,
};

// Condition functions for each task kind
fn is_search_input(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::SearchInput { .. }))
        .unwrap_or(false)
}

fn is_debounce_elapsed(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::DebounceElapsed { .. }))
        .unwrap_or(false)
}

fn is_search_resolved(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::SearchResolved { .. }))
        .unwrap_or(false)
}

fn is_place_picked(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::PlacePicked { .. }))
        .unwrap_or(false)
}

fn is_map_tapped(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::MapTapped { .. }))
        .unwrap_or(false)
}

fn is_use_current_location(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| t.0.kind == TaskKind::UseCurrentLocation)
        .unwrap_or(false)
}

fn is_locate_requested(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| t.0.kind == TaskKind::LocateRequested)
        .unwrap_or(false)
}

fn is_location_fixed(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::LocationFixed { .. }))
        .unwrap_or(false)
}

fn is_route_requested(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| t.0.kind == TaskKind::RouteRequested)
        .unwrap_or(false)
}

fn is_route_resolved(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| matches!(t.0.kind, TaskKind::RouteResolved { .. }))
        .unwrap_or(false)
}

fn is_clear_route(task: Option<Res<CurrentTask>>) -> bool {
    task.map(|t| t.0.kind == TaskKind::ClearRoute)
        .unwrap_or(false)
}

/// Runs one session step: pops the next task, inserts it as [CurrentTask],
/// then runs the schedule. Returns `false` when the clock is empty.
pub fn run_next_task(world: &mut World, schedule: &mut Schedule) -> bool {
    let task = match world.resource_mut::<SessionClock>().pop_next() {
        Some(task) => task,
        None => return false,
    };
    world.insert_resource(CurrentTask(task));
    schedule.run(world);
    true
}

/// Runs session steps until the clock is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_settled(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_task(world, schedule) {
        steps += 1;
    }
    steps
}

/// Builds the session schedule: all task-reacting systems, gated per task
/// kind, followed by the map synchronizer.
///
/// The synchronizer is chained after the gated group so every step ends with
/// the surface reflecting the session.
pub fn session_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.add_systems(
        (
            (
                // SearchInput
                search_input_system.run_if(is_search_input),
                // DebounceElapsed
                search_commit_system.run_if(is_debounce_elapsed),
                // SearchResolved
                search_resolved_system.run_if(is_search_resolved),
                // PlacePicked
                place_picked_system.run_if(is_place_picked),
                // MapTapped
                map_tap_system.run_if(is_map_tapped),
                // UseCurrentLocation
                use_current_location_system.run_if(is_use_current_location),
                // LocateRequested
                locate_requested_system.run_if(is_locate_requested),
                // LocationFixed
                location_fixed_system.run_if(is_location_fixed),
                // RouteRequested
                route_request_system.run_if(is_route_requested),
                // RouteResolved
                route_resolved_system.run_if(is_route_resolved),
                // ClearRoute
                clear_route_system.run_if(is_clear_route),
            ),
            map_sync_system,
        )
            .chain(),
    );

    schedule
}
