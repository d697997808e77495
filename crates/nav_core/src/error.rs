//! User-facing failure taxonomy.
//!
//! Resolver-level transport errors (see [crate::backend::http::ApiError]) are
//! converted to these cloneable variants at the backend boundary so that
//! completion tasks can carry them through the clock; the session collapses
//! them to notices but the variants stay distinguishable up to that point.

use thiserror::Error;

/// A failed place search. Surfaces as an empty result list plus a notice;
/// never propagates across the component boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("search failed: {0}")]
pub struct SearchFailure(pub String);

/// A failed or empty directions request. `NoRoute` is the canonical
/// "no route found" outcome, distinct from transport and parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteFailure {
    #[error("no route found")]
    NoRoute,
    #[error("route request failed: {0}")]
    Request(String),
    #[error("invalid directions response: {0}")]
    InvalidResponse(String),
}

/// A failed geolocation fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateFailure {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}
