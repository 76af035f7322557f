// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use rand::Rng;

use crate::astar::find_route;
use crate::compile::compile_route;
use crate::optimize::optimize_delivery_order;
use crate::{DeliveryCommand, DeliveryRequest, GeoCoord, GeoIndex, PlanError};

/// A complete delivery route: the commands to execute in order, and the
/// total road distance travelled in miles (including the return to the depot).
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPlan {
    pub commands: Vec<DeliveryCommand>,
    pub total_distance: f64,
}

/// Plans a delivery route starting and ending at the depot.
///
/// The deliveries are first reordered by [optimize_delivery_order], then a
/// road path is computed with [find_route] for every consecutive pair
/// (depot → first stop, stop → stop, last stop → depot) and the per-leg
/// paths are compiled into turn-by-turn [DeliveryCommands](DeliveryCommand).
/// The first failing leg aborts planning and its error is propagated.
///
/// An empty delivery list succeeds with no commands and zero distance;
/// no depot-to-depot leg is generated.
pub fn plan<R: Rng>(
    index: &GeoIndex,
    depot: &GeoCoord,
    deliveries: &[DeliveryRequest],
    rng: &mut R,
) -> Result<DeliveryPlan, PlanError> {
    if deliveries.is_empty() {
        return Ok(DeliveryPlan {
            commands: Vec::new(),
            total_distance: 0.0,
        });
    }

    let order = optimize_delivery_order(depot, deliveries, rng);

    let mut legs = Vec::with_capacity(order.deliveries.len() + 1);
    let mut total_distance = 0.0;
    let mut current = depot;

    for delivery in &order.deliveries {
        let (segments, distance) = find_route(index, current, &delivery.location)?;
        total_distance += distance;
        legs.push(segments);
        current = &delivery.location;
    }

    let (segments, distance) = find_route(index, current, depot)?;
    total_distance += distance;
    legs.push(segments);

    log::debug!(
        "planned {} legs, {:.4} mi total",
        legs.len(),
        total_distance
    );

    Ok(DeliveryPlan {
        commands: compile_route(&legs, &order.deliveries),
        total_distance,
    })
}
