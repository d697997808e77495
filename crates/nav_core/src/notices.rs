//! Session notices: the user-visible record of what happened.
//!
//! Systems append here instead of logging; the embedding UI drains and
//! presents them. No notice is fatal — the session stays interactive after
//! any failure.

use bevy_ecs::prelude::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    OriginSet,
    DestinationSet,
    RouteFound,
    NoRouteFound,
    SearchFailed,
    LocationError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Append-only notice buffer for one session.
#[derive(Debug, Default, Resource)]
pub struct SessionNotices(Vec<Notice>);

impl SessionNotices {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.0.push(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn all(&self) -> &[Notice] {
        &self.0
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.0)
    }

    /// Latest notice of the given kind, if any.
    pub fn last_of(&self, kind: NoticeKind) -> Option<&Notice> {
        self.0.iter().rev().find(|notice| notice.kind == kind)
    }
}
