//! Session facade: owns the world and schedule, translates UI gestures into
//! scheduled tasks, and exposes read views of the session.

use bevy_ecs::prelude::{Schedule, World};

use crate::backend::{api_for_credential, ApiHandle, GeoLocator, LocatorHandle, NavApi};
use crate::clock::{SessionClock, TaskKind};
use crate::geo::Coordinate;
use crate::notices::{Notice, SessionNotices};
use crate::runner::{run_until_settled, session_schedule};
use crate::session::{ApiMode, Endpoint, FieldSearch, PlaceCandidate, SearchState, SessionState};
use crate::sync::{CameraQueue, MapHandle, MapSurface, SyncedLayout};

/// Upper bound on tasks per [NavSession::settle] call. A session step fans
/// out into at most a handful of follow-up tasks, so hitting this means a
/// scheduling loop.
const MAX_STEPS: usize = 10_000;

/// A navigation session: one origin/destination pair, one map surface.
///
/// All gestures are scheduled on the session clock and applied by
/// [NavSession::settle], which also dispatches every pending completion
/// (debounce fires, resolver results, location fixes).
pub struct NavSession {
    world: World,
    schedule: Schedule,
}

impl NavSession {
    /// Builds a session for a credential. The demo credential (or an empty
    /// string) selects the offline backend; anything else is used as a live
    /// API key.
    pub fn new(
        credential: &str,
        surface: Box<dyn MapSurface>,
        locator: Box<dyn GeoLocator>,
    ) -> Self {
        let (api, mode) = api_for_credential(credential);
        Self::with_api(api, mode, surface, locator)
    }

    /// Builds a session around an explicit backend.
    pub fn with_api(
        api: Box<dyn NavApi>,
        mode: ApiMode,
        surface: Box<dyn MapSurface>,
        locator: Box<dyn GeoLocator>,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(SessionClock::default());
        world.insert_resource(SessionState::new(mode));
        world.insert_resource(SearchState::default());
        world.insert_resource(SessionNotices::default());
        world.insert_resource(SyncedLayout::default());
        world.insert_resource(CameraQueue::default());
        world.insert_resource(ApiHandle(api));
        world.insert_resource(LocatorHandle(locator));
        world.insert_resource(MapHandle(surface));

        Self {
            world,
            schedule: session_schedule(),
        }
    }

    fn submit(&mut self, kind: TaskKind) {
        self.world
            .resource_mut::<SessionClock>()
            .schedule_in(0, kind);
    }

    /// Text change in a search field.
    pub fn type_into(&mut self, field: Endpoint, text: impl Into<String>) {
        self.submit(TaskKind::SearchInput {
            field,
            text: text.into(),
        });
    }

    /// Explicit selection of a search result.
    pub fn pick_place(&mut self, field: Endpoint, place: PlaceCandidate) {
        self.submit(TaskKind::PlacePicked { field, place });
    }

    /// Tap on the map surface.
    pub fn tap_map(&mut self, lat: f64, lng: f64) {
        self.submit(TaskKind::MapTapped {
            at: Coordinate::new(lat, lng),
        });
    }

    /// Use the device position as the origin.
    pub fn use_current_location(&mut self) {
        self.submit(TaskKind::UseCurrentLocation);
    }

    /// Refresh the current-location pin and recenter on it, leaving the
    /// endpoints alone.
    pub fn locate(&mut self) {
        self.submit(TaskKind::LocateRequested);
    }

    /// Reset endpoints, route, and both search fields.
    pub fn clear_route(&mut self) {
        self.submit(TaskKind::ClearRoute);
    }

    /// Dispatches every scheduled task, including deferred completions, and
    /// returns how many ran. Session time advances to the last task's
    /// timestamp.
    pub fn settle(&mut self) -> usize {
        run_until_settled(&mut self.world, &mut self.schedule, MAX_STEPS)
    }

    /// Session time in milliseconds.
    pub fn now(&self) -> u64 {
        self.world.resource::<SessionClock>().now()
    }

    pub fn state(&self) -> &SessionState {
        self.world.resource::<SessionState>()
    }

    pub fn search(&self, field: Endpoint) -> &FieldSearch {
        self.world.resource::<SearchState>().field(field)
    }

    pub fn notices(&self) -> &[Notice] {
        self.world.resource::<SessionNotices>().all()
    }

    /// Takes the accumulated notices, leaving the buffer empty.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.world.resource_mut::<SessionNotices>().drain()
    }
}
