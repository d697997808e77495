//! Session clock: a min-heap of timestamped tasks driving the coordinator.
//!
//! Every stimulus — keystroke, debounce fire, resolver completion, map tap,
//! geolocation fix — is a [Task]. The runner pops the next task, exposes it
//! as [CurrentTask], and runs the schedule. Demo-mode resolver latencies are
//! future-scheduled completions, which keeps timing behavior deterministic
//! under test.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

use crate::error::{LocateFailure, RouteFailure, SearchFailure};
use crate::geo::Coordinate;
use crate::session::{Endpoint, PlaceCandidate, Route};

/// What a scheduled task asks the coordinator to do.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Raw text-input change on a search field.
    SearchInput { field: Endpoint, text: String },
    /// A field's debounce quiet period elapsed for the armed sequence.
    DebounceElapsed { field: Endpoint, seq: u64 },
    /// A committed search settled. `query` is the text the commit was issued
    /// for; a resolution is discarded if the input has changed since.
    SearchResolved {
        field: Endpoint,
        seq: u64,
        query: String,
        outcome: Result<Vec<PlaceCandidate>, SearchFailure>,
    },
    /// Explicit selection of a search result for a named field.
    PlacePicked { field: Endpoint, place: PlaceCandidate },
    /// Tap on the map surface.
    MapTapped { at: Coordinate },
    /// "Use current location" as origin.
    UseCurrentLocation,
    /// Refresh the current-location pin without touching the endpoints.
    LocateRequested,
    /// A geolocation fix settled.
    LocationFixed {
        outcome: Result<Coordinate, LocateFailure>,
    },
    /// Both endpoints are known; ask the route resolver.
    RouteRequested,
    /// A route request settled.
    RouteResolved {
        seq: u64,
        outcome: Result<Route, RouteFailure>,
    },
    /// Reset endpoints, route, and target atomically.
    ClearRoute,
}

/// A task scheduled at a millisecond timestamp. Equal timestamps run in
/// insertion order.
#[derive(Debug, Clone)]
pub struct Task {
    pub timestamp: u64,
    pub kind: TaskKind,
    order: u64,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp && self.order == other.order
    }
}

impl Eq for Task {}

impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp,
        // breaking ties by insertion order (FIFO).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The task the runner is currently dispatching.
#[derive(Debug, Resource)]
pub struct CurrentTask(pub Task);

#[derive(Debug, Default, Resource)]
pub struct SessionClock {
    now: u64,
    next_order: u64,
    tasks: BinaryHeap<Task>,
}

impl SessionClock {
    /// Current session time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule a task at an absolute timestamp.
    pub fn schedule_at(&mut self, timestamp: u64, kind: TaskKind) {
        debug_assert!(
            timestamp >= self.now,
            "task timestamp must be >= current time"
        );
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.push(Task {
            timestamp,
            kind,
            order,
        });
    }

    /// Schedule a task `delay_ms` from now.
    pub fn schedule_in(&mut self, delay_ms: u64, kind: TaskKind) {
        self.schedule_at(self.now + delay_ms, kind);
    }

    /// Pop the next task, advancing the clock to its timestamp.
    pub fn pop_next(&mut self) -> Option<Task> {
        let task = self.tasks.pop()?;
        self.now = task.timestamp;
        Some(task)
    }

    pub fn next_timestamp(&self) -> Option<u64> {
        self.tasks.peek().map(|task| task.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
