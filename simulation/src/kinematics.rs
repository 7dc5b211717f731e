use model::base_types::{KmPerHour, Meters, Seconds};
use model::config::ConfigKinematics;
use model::Error;

/// converts a km/h figure to m/s.
pub(crate) fn kmph_to_ms(speed: KmPerHour) -> f64 {
    speed * 1000.0 / 3600.0
}

/// the three phases of one segment traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunProfile {
    /// effective speed ceiling the profile was computed for; the reported
    /// top speed of the traversal.
    pub ceiling: KmPerHour,
    pub t_accel: Seconds,
    pub t_cruise: Seconds,
    pub t_decel: Seconds,
}

impl RunProfile {
    pub fn total(&self) -> Seconds {
        self.t_accel + self.t_cruise + self.t_decel
    }
}

/// computes segment traversal times under a trapezoidal velocity profile:
/// constant acceleration over the first eighth of the segment, cruise at the
/// effective ceiling, then a fixed braking window into the stop.
#[derive(Debug, Clone)]
pub struct KinematicsModel {
    config: ConfigKinematics,
}

impl KinematicsModel {
    pub fn new(config: ConfigKinematics) -> KinematicsModel {
        KinematicsModel { config }
    }

    /// speed tier implied by the segment length alone, before any civil or
    /// absolute cap.
    pub fn base_tier(&self, distance: Meters) -> KmPerHour {
        if distance > self.config.long_segment_threshold {
            self.config.long_segment_speed
        } else {
            self.config.short_segment_speed
        }
    }

    /// profile at the unboosted tier for this segment under the given speed
    /// ceiling.
    pub fn profile(&self, distance: Meters, ceiling: KmPerHour) -> Result<RunProfile, Error> {
        if ceiling <= 0.0 {
            return Err(Error::InvalidSegment { distance, ceiling });
        }
        self.profile_at_speed(distance, self.base_tier(distance).min(ceiling))
    }

    /// profile when the train may reach at most `vmax_kmph` on the segment.
    pub fn profile_at_speed(
        &self,
        distance: Meters,
        vmax_kmph: KmPerHour,
    ) -> Result<RunProfile, Error> {
        if distance <= 0.0 || vmax_kmph <= 0.0 {
            return Err(Error::InvalidSegment {
                distance,
                ceiling: vmax_kmph,
            });
        }
        let c = &self.config;
        let vmax = kmph_to_ms(vmax_kmph);

        // acceleration to reach vmax within the acceleration stretch:
        // v^2 = 2*a*s, so a = v^2 / (2*s). distance > 0 keeps d_accel > 0.
        let d_accel = distance * c.acceleration_fraction;
        let accel = vmax * vmax / (2.0 * d_accel);

        let mut t_accel = vmax / accel;
        let mut t_decel = (2.0 * (c.brake_distance + c.buffer_distance) / accel).sqrt();

        let d_cruise = distance - d_accel - c.brake_distance;
        let mut t_cruise = if d_cruise > 0.0 { d_cruise / vmax } else { 0.0 };
        if d_cruise < 0.0 {
            // the segment is too short to reach vmax: accelerate over what
            // room there is, then brake.
            let d_half = (distance - c.brake_distance).max(distance / 2.0);
            let v_peak = (2.0 * accel * d_half).sqrt();
            t_accel = v_peak / accel;
            t_decel = (2.0 * c.brake_distance / accel).sqrt();
            t_cruise = 0.0;
        }

        Ok(RunProfile {
            ceiling: vmax_kmph,
            t_accel,
            t_cruise,
            t_decel,
        })
    }

    /// total traversal time for the segment at the unboosted tier.
    pub fn runtime(&self, distance: Meters, ceiling: KmPerHour) -> Result<Seconds, Error> {
        self.profile(distance, ceiling).map(|p| p.total())
    }
}

#[cfg(test)]
#[path = "kinematics_tests.rs"]
mod tests;
