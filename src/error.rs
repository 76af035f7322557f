// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::GeoCoord;

/// Error conditions which may occur during [find_route](crate::find_route) or
/// [plan](crate::plan).
///
/// Neither condition is retried internally: re-running an exhaustive search
/// with identical input reproduces the same failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A start or end coordinate has no segments recorded in the
    /// [GeoIndex](crate::GeoIndex) - the map data does not cover it.
    #[error("coordinate not covered by map data: {0}")]
    InvalidCoordinate(GeoCoord),

    /// Both coordinates are on the map, but no sequence of segments
    /// connects them.
    #[error("no route from {from} to {to}")]
    NoRoute { from: GeoCoord, to: GeoCoord },
}
