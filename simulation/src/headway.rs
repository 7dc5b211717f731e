use model::base_types::{KmPerHour, Meters, Seconds};
use model::config::SimulationConfig;
use model::Error;

use crate::kinematics::kmph_to_ms;

/// minimum time separation a following train must keep behind its leader on
/// a segment. Depends only on the speed in use and the geometric safety
/// margins, never on the achieved runtime.
#[derive(Debug, Clone)]
pub struct SafetyHeadwayModel {
    brake_distance: Meters,
    buffer_distance: Meters,
    reaction_time: Seconds,
}

impl SafetyHeadwayModel {
    pub fn new(
        brake_distance: Meters,
        buffer_distance: Meters,
        reaction_time: Seconds,
    ) -> SafetyHeadwayModel {
        SafetyHeadwayModel {
            brake_distance,
            buffer_distance,
            reaction_time,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> SafetyHeadwayModel {
        SafetyHeadwayModel::new(
            config.kinematics.brake_distance,
            config.kinematics.buffer_distance,
            config.headway.reaction_time,
        )
    }

    /// the time needed to clear the braking-plus-buffer window at the given
    /// speed, plus the reaction margin.
    pub fn safe_headway(&self, speed_kmph: KmPerHour, distance: Meters) -> Result<Seconds, Error> {
        if speed_kmph <= 0.0 || distance < 0.0 {
            return Err(Error::InvalidSegment {
                distance,
                ceiling: speed_kmph,
            });
        }
        let speed = kmph_to_ms(speed_kmph);
        Ok((self.brake_distance + self.buffer_distance) / speed + self.reaction_time)
    }
}
