use thiserror::Error;

use crate::base_types::{KmPerHour, Meters};

/// Failure taxonomy of the simulation. Segment-level errors abort only the
/// enclosing segment or train computation; topology-level errors are fatal to
/// the whole run, as no traversal is meaningful without a valid line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// a velocity profile cannot be computed for a non-positive distance or
    /// speed ceiling.
    #[error("invalid segment: distance {distance}m at speed ceiling {ceiling}km/h")]
    InvalidSegment { distance: Meters, ceiling: KmPerHour },

    /// a configured start or reference station is not part of the line.
    #[error("unknown station '{0}'")]
    UnknownStation(String),

    #[error("invalid line topology: {0}")]
    InvalidTopology(String),

    #[error("invalid instance input: {0}")]
    InvalidInput(String),
}
