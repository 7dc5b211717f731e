use crate::base_types::{Duration, KmPerHour, Meters};

/// static attributes of one station. Immutable reference data for the whole
/// run; owned by the [`LineTopology`](crate::line::LineTopology).
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    distance_from_origin: Meters,
    base_dwell: Duration,
    civil_speed: KmPerHour,
    max_speed: Option<KmPerHour>,
}

impl Station {
    pub fn new(
        name: String,
        distance_from_origin: Meters,
        base_dwell: Duration,
        civil_speed: KmPerHour,
        max_speed: Option<KmPerHour>,
    ) -> Station {
        Station {
            name,
            distance_from_origin,
            base_dwell,
            civil_speed,
            max_speed,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn distance_from_origin(&self) -> Meters {
        self.distance_from_origin
    }

    /// nominal dwell for boarding/alighting; actual dwells are sampled from
    /// this value.
    pub fn base_dwell(&self) -> Duration {
        self.base_dwell
    }

    /// track-imposed speed limit, independent of train capability.
    pub fn civil_speed(&self) -> KmPerHour {
        self.civil_speed
    }

    /// absolute cap a boosted train may not exceed, where one is imposed.
    pub fn max_speed(&self) -> Option<KmPerHour> {
        self.max_speed
    }
}
