// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Delivery route planning over street-segment map data.
//!
//! Lastmile indexes a street network given as coordinate-to-coordinate
//! segments, finds shortest point-to-point paths with A*, reorders delivery
//! stops with simulated annealing to shorten the tour, and compiles the
//! resulting segment paths into turn-by-turn [DeliveryCommands](DeliveryCommand).
//!
//! # Example
//!
//! ```no_run
//! let mut index = lastmile::GeoIndex::new();
//! lastmile::map::load_map_from_file(&mut index, "path/to/mapdata.txt")
//!     .expect("failed to load mapdata.txt");
//!
//! let depot = lastmile::GeoCoord::new("34.0625329", "-118.4470263").unwrap();
//! let deliveries = vec![lastmile::DeliveryRequest {
//!     location: lastmile::GeoCoord::new("34.0712323", "-118.4505969").unwrap(),
//!     item: "Chicken tenders".to_string(),
//! }];
//!
//! let plan = lastmile::plan(&index, &depot, &deliveries, &mut rand::rng())
//!     .expect("failed to generate a delivery plan");
//!
//! for command in &plan.commands {
//!     println!("{}", command);
//! }
//! println!("Total distance: {:.2} miles", plan.total_distance);
//! ```

mod astar;
mod compile;
mod error;
mod geo;
mod hashmap;
mod index;
pub mod map;
mod optimize;
mod plan;

pub use astar::find_route;
pub use compile::{compile_route, CompassDirection, DeliveryCommand, TurnDirection};
pub use error::PlanError;
pub use geo::{angle_between, bearing, earth_distance};
pub use hashmap::ChainedHashMap;
pub use index::GeoIndex;
pub use optimize::{crow_distance, optimize_delivery_order, OptimizedOrder};
pub use plan::{plan, DeliveryPlan};

use std::fmt;
use std::hash::{Hash, Hasher};

/// A point on the map.
///
/// The textual latitude and longitude are the coordinate's identity: two
/// GeoCoords are the same place if and only if their texts are equal, and
/// hashing follows the same rule. The parsed `f64` values are only used
/// for geometry ([earth_distance], [bearing]).
#[derive(Debug, Clone)]
pub struct GeoCoord {
    latitude_text: String,
    longitude_text: String,
    latitude: f64,
    longitude: f64,
}

impl GeoCoord {
    /// Parses a coordinate from its textual representation.
    /// Returns None if either value is not a finite decimal number
    /// ("nan" and "inf" parse as f64, but are no place on a map).
    pub fn new(latitude: &str, longitude: &str) -> Option<Self> {
        let latitude = latitude.trim();
        let longitude = longitude.trim();
        Some(Self {
            latitude: parse_finite(latitude)?,
            longitude: parse_finite(longitude)?,
            latitude_text: latitude.to_string(),
            longitude_text: longitude.to_string(),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }
}

impl PartialEq for GeoCoord {
    fn eq(&self, other: &Self) -> bool {
        self.latitude_text == other.latitude_text && self.longitude_text == other.longitude_text
    }
}

impl Eq for GeoCoord {}

impl Hash for GeoCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude_text.hash(state);
        self.longitude_text.hash(state);
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.latitude_text, self.longitude_text)
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A directed street segment: one edge of the street network.
///
/// A bidirectional street is represented by two segments, one per direction.
/// Traversal direction matters for the compiled route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetSegment {
    pub start: GeoCoord,
    pub end: GeoCoord,
    pub name: String,
}

impl StreetSegment {
    /// The same stretch of street, traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
            name: self.name.clone(),
        }
    }
}

/// A delivery to be made: where, and what to drop off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub location: GeoCoord,
    pub item: String,
}
