//! Map synchronizer: diff the session against the last pushed layout and
//! issue only the directives that changed. Runs after every task, so it must
//! be a no-op when nothing changed.

use bevy_ecs::prelude::{Res, ResMut};

use crate::geo::{Extent, NamedLocation};
use crate::session::SessionState;
use crate::sync::{
    CameraQueue, MapHandle, MapSurface, MarkerRole, RouteStyle, SyncedLayout, ACCURACY_RADIUS_M,
    FIT_BOUNDS_PADDING,
};

pub fn map_sync_system(
    session: Res<SessionState>,
    mut layout: ResMut<SyncedLayout>,
    mut camera: ResMut<CameraQueue>,
    mut map: ResMut<MapHandle>,
) {
    let surface = map.0.as_mut();

    sync_marker(surface, MarkerRole::Origin, &session.origin, &mut layout.origin);
    sync_marker(
        surface,
        MarkerRole::Destination,
        &session.destination,
        &mut layout.destination,
    );
    sync_marker(
        surface,
        MarkerRole::CurrentLocation,
        &session.current_location,
        &mut layout.current_location,
    );

    // Empty geometry is treated as no line.
    let desired = session
        .route()
        .map(|route| route.geometry.clone())
        .filter(|geometry| !geometry.is_empty());
    if desired != layout.route_geometry {
        match &desired {
            Some(geometry) => {
                surface.set_route_line(geometry, &RouteStyle::default());
                // Framing happens once, when the line first changes; camera
                // moves after that are left to the user.
                if let Some(extent) = Extent::of(geometry) {
                    surface.fit_bounds(extent, FIT_BOUNDS_PADDING);
                }
            }
            None => surface.clear_route_line(),
        }
        layout.route_geometry = desired;
    }

    for step in camera.0.drain(..) {
        surface.fly_to(step.center, step.zoom);
    }
}

fn sync_marker(
    surface: &mut dyn MapSurface,
    role: MarkerRole,
    desired: &Option<NamedLocation>,
    synced: &mut Option<NamedLocation>,
) {
    if desired == synced {
        return;
    }
    match desired {
        Some(location) => {
            let accuracy = match role {
                MarkerRole::CurrentLocation => Some(ACCURACY_RADIUS_M),
                _ => None,
            };
            surface.upsert_marker(role, location, accuracy);
        }
        None => surface.remove_marker(role),
    }
    *synced = desired.clone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::session::{ApiMode, Endpoint, Route, RouteState};
    use crate::test_helpers::{Directive, DirectiveLog, RecordingSurface};
    use bevy_ecs::prelude::{Schedule, World};

    fn new_world() -> (World, DirectiveLog) {
        let mut world = World::new();
        world.insert_resource(SessionState::new(ApiMode::Demo));
        world.insert_resource(SyncedLayout::default());
        world.insert_resource(CameraQueue::default());
        let (surface, log) = RecordingSurface::new();
        world.insert_resource(MapHandle(Box::new(surface)));
        (world, log)
    }

    fn run_sync(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(map_sync_system);
        schedule.run(world);
    }

    #[test]
    fn repeated_sync_of_unchanged_state_issues_nothing() {
        let (mut world, log) = new_world();
        world.resource_mut::<SessionState>().assign_endpoint(
            Endpoint::Origin,
            NamedLocation::new(Coordinate::new(9.01, 38.76), "Meskel Square"),
        );

        run_sync(&mut world);
        assert_eq!(log.taken().len(), 1);

        run_sync(&mut world);
        run_sync(&mut world);
        assert!(log.taken().is_empty());
    }

    #[test]
    fn changed_endpoint_reissues_only_that_marker() {
        let (mut world, log) = new_world();
        {
            let mut session = world.resource_mut::<SessionState>();
            session.assign_endpoint(
                Endpoint::Origin,
                NamedLocation::new(Coordinate::new(9.01, 38.76), "A"),
            );
            session.assign_endpoint(
                Endpoint::Destination,
                NamedLocation::new(Coordinate::new(9.03, 38.76), "B"),
            );
        }
        run_sync(&mut world);
        assert_eq!(log.taken().len(), 2);

        world.resource_mut::<SessionState>().assign_endpoint(
            Endpoint::Origin,
            NamedLocation::new(Coordinate::new(9.05, 38.70), "C"),
        );
        run_sync(&mut world);

        let directives = log.taken();
        assert_eq!(directives.len(), 1);
        assert!(matches!(
            &directives[0],
            Directive::UpsertMarker {
                role: MarkerRole::Origin,
                location,
                ..
            } if location.name.as_deref() == Some("C")
        ));
    }

    #[test]
    fn current_location_marker_carries_the_accuracy_radius() {
        let (mut world, log) = new_world();
        {
            let mut session = world.resource_mut::<SessionState>();
            session.current_location =
                Some(NamedLocation::new(Coordinate::new(9.0054, 38.7636), "Home"));
            session.assign_endpoint(
                Endpoint::Origin,
                NamedLocation::new(Coordinate::new(9.01, 38.76), "A"),
            );
        }

        run_sync(&mut world);

        let directives = log.taken();
        assert!(directives.iter().any(|directive| matches!(
            directive,
            Directive::UpsertMarker {
                role: MarkerRole::CurrentLocation,
                accuracy_radius_m: Some(radius),
                ..
            } if *radius == crate::sync::ACCURACY_RADIUS_M
        )));
        assert!(directives.iter().any(|directive| matches!(
            directive,
            Directive::UpsertMarker {
                role: MarkerRole::Origin,
                accuracy_radius_m: None,
                ..
            }
        )));
    }

    #[test]
    fn route_line_is_drawn_once_and_framed_once() {
        let (mut world, log) = new_world();
        let geometry = vec![Coordinate::new(9.01, 38.76), Coordinate::new(9.03, 38.80)];
        world.resource_mut::<SessionState>().route = RouteState::Ready(Route {
            distance_m: 1_000.0,
            duration_secs: 100.0,
            geometry: geometry.clone(),
            instructions: Vec::new(),
        });

        run_sync(&mut world);
        let directives = log.taken();
        assert!(matches!(
            &directives[0],
            Directive::SetRouteLine { geometry: drawn } if *drawn == geometry
        ));
        assert!(matches!(
            &directives[1],
            Directive::FitBounds { padding, .. } if *padding == FIT_BOUNDS_PADDING
        ));

        // Unchanged route: no redraw, no reframe.
        run_sync(&mut world);
        assert!(log.taken().is_empty());
    }

    #[test]
    fn clearing_the_route_removes_the_line() {
        let (mut world, log) = new_world();
        world.resource_mut::<SessionState>().route = RouteState::Ready(Route {
            distance_m: 1.0,
            duration_secs: 1.0,
            geometry: vec![Coordinate::new(9.0, 38.7), Coordinate::new(9.1, 38.8)],
            instructions: Vec::new(),
        });
        run_sync(&mut world);
        log.taken();

        world.resource_mut::<SessionState>().route = RouteState::NotRequested;
        run_sync(&mut world);

        let directives = log.taken();
        assert_eq!(directives, vec![Directive::ClearRouteLine]);
    }

    #[test]
    fn queued_camera_moves_drain_after_the_marker_diff() {
        let (mut world, log) = new_world();
        world
            .resource_mut::<CameraQueue>()
            .fly_to(Coordinate::new(9.02, 38.75));

        run_sync(&mut world);

        let directives = log.taken();
        assert_eq!(directives.len(), 1);
        assert!(matches!(
            directives[0],
            Directive::FlyTo { center, zoom }
                if center == Coordinate::new(9.02, 38.75) && zoom == crate::sync::FLY_TO_ZOOM
        ));
        assert!(world.resource::<CameraQueue>().0.is_empty());
    }
}
