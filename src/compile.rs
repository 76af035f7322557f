// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::geo::{angle_between, bearing, earth_distance};
use crate::{DeliveryRequest, StreetSegment};

/// Which way to turn at a junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// One of the eight compass octants, 45° each, with east centered on 0°.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassDirection {
    East,
    Northeast,
    North,
    Northwest,
    West,
    Southwest,
    South,
    Southeast,
}

impl CompassDirection {
    /// Classifies a bearing in degrees. Bearings outside [0, 360)
    /// (including negative and non-finite values) are rejected.
    pub fn from_bearing(degrees: f64) -> Option<Self> {
        if !(0.0..360.0).contains(&degrees) {
            return None;
        }
        Some(if degrees < 22.5 {
            Self::East
        } else if degrees < 67.5 {
            Self::Northeast
        } else if degrees < 112.5 {
            Self::North
        } else if degrees < 157.5 {
            Self::Northwest
        } else if degrees < 202.5 {
            Self::West
        } else if degrees < 247.5 {
            Self::Southwest
        } else if degrees < 292.5 {
            Self::South
        } else if degrees < 337.5 {
            Self::Southeast
        } else {
            Self::East
        })
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::East => write!(f, "east"),
            Self::Northeast => write!(f, "northeast"),
            Self::North => write!(f, "north"),
            Self::Northwest => write!(f, "northwest"),
            Self::West => write!(f, "west"),
            Self::Southwest => write!(f, "southwest"),
            Self::South => write!(f, "south"),
            Self::Southeast => write!(f, "southeast"),
        }
    }
}

/// A single turn-by-turn navigation instruction, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryCommand {
    /// Follow one street for a stretch; `distance` is in miles.
    Proceed {
        direction: CompassDirection,
        street: String,
        distance: f64,
    },

    /// Turn onto another street at a junction.
    Turn {
        direction: TurnDirection,
        street: String,
    },

    /// Drop off an item at the current position.
    Deliver { item: String },
}

impl fmt::Display for DeliveryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed {
                direction,
                street,
                distance,
            } => write!(f, "Proceed {} on {} for {:.2} miles", direction, street, distance),
            Self::Turn { direction, street } => write!(f, "Turn {} on {}", direction, street),
            Self::Deliver { item } => write!(f, "Deliver {}", item),
        }
    }
}

fn direction_of(segment: &StreetSegment) -> CompassDirection {
    CompassDirection::from_bearing(bearing(segment)).expect("segment bearing out of range")
}

/// Compiles per-leg segment paths into a linear sequence of
/// [DeliveryCommands](DeliveryCommand).
///
/// `legs` holds one path per consecutive depot/stop pair, including the final
/// return-to-depot leg, so `legs.len() == deliveries.len() + 1`. Within a
/// leg, consecutive segments sharing a street name collapse into a single
/// proceed command (direction of the first grouped segment, distance summed
/// over the whole group). A street-name change first flushes the finished
/// proceed, then classifies the junction angle: [1°, 180°) turns left,
/// [180°, 359°] turns right, anything else is straight ahead and produces no
/// turn command. Every leg but the last is followed by a deliver command.
///
/// An empty leg means the vehicle is already at the next stop (two parcels
/// to one address, or a stop at the depot itself): no proceed is emitted,
/// only the deliver.
pub fn compile_route(
    legs: &[Vec<StreetSegment>],
    deliveries: &[DeliveryRequest],
) -> Vec<DeliveryCommand> {
    assert_eq!(
        legs.len(),
        deliveries.len() + 1,
        "one leg per delivery plus the return to the depot"
    );

    let mut commands = Vec::new();

    for (leg_idx, leg) in legs.iter().enumerate() {
        if !leg.is_empty() {
            let mut street = &leg[0].name;
            let mut direction = direction_of(&leg[0]);
            let mut distance = earth_distance(&leg[0].start, &leg[0].end);

            for pair in leg.windows(2) {
                let (previous, segment) = (&pair[0], &pair[1]);

                if segment.name != *street {
                    commands.push(DeliveryCommand::Proceed {
                        direction,
                        street: street.clone(),
                        distance,
                    });

                    street = &segment.name;
                    direction = direction_of(segment);
                    distance = 0.0;

                    let turn = angle_between(previous, segment);
                    if (1.0..180.0).contains(&turn) {
                        commands.push(DeliveryCommand::Turn {
                            direction: TurnDirection::Left,
                            street: segment.name.clone(),
                        });
                    } else if (180.0..=359.0).contains(&turn) {
                        commands.push(DeliveryCommand::Turn {
                            direction: TurnDirection::Right,
                            street: segment.name.clone(),
                        });
                    }
                }

                distance += earth_distance(&segment.start, &segment.end);
            }

            commands.push(DeliveryCommand::Proceed {
                direction,
                street: street.clone(),
                distance,
            });
        }

        if leg_idx < deliveries.len() {
            commands.push(DeliveryCommand::Deliver {
                item: deliveries[leg_idx].item.clone(),
            });
        }
    }

    commands
}
