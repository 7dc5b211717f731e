use std::fmt;

use model::base_types::{Duration, KmPerHour, Seconds, TrainCount};
use model::config::{BoostTiering, SimulationConfig};
use model::line::Segment;
use model::Error;

use crate::headway::SafetyHeadwayModel;
use crate::kinematics::KinematicsModel;

/// outcome tag of the per-segment speed decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentAction {
    NoBoost,
    BoostApplied,
    /// the achievable headway sits below the safety floor even after the
    /// boost decision; operationally this triggers a slow-down or delay
    /// procedure, reported here as a flag.
    EmergencyDelay,
}

impl fmt::Display for SegmentAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SegmentAction::NoBoost => write!(f, "NO_BOOST"),
            SegmentAction::BoostApplied => write!(f, "BOOST_APPLIED"),
            SegmentAction::EmergencyDelay => write!(f, "EMERGENCY_DELAY"),
        }
    }
}

/// everything decided for one segment traversal. Transient; recomputed per
/// simulated traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    pub base_speed: KmPerHour,
    pub chosen_speed: KmPerHour,
    pub runtime: Seconds,
    /// section headway at the chosen speed: (runtime + dwell) spread over
    /// the fleet.
    pub headway: Seconds,
    /// safety floor at the chosen speed.
    pub safe_headway: Seconds,
    pub base_dwell: Duration,
    pub actual_dwell: Duration,
    pub action: SegmentAction,
}

/// decides per segment whether to raise the speed tier to recover schedule
/// after a dwell overrun, subject to the safety headway constraint.
pub struct BoostDecisionPolicy {
    kinematics: KinematicsModel,
    headway_model: SafetyHeadwayModel,
    trigger_ratio: f64,
    tiering: BoostTiering,
    train_count: TrainCount,
}

impl BoostDecisionPolicy {
    pub fn from_config(config: &SimulationConfig) -> BoostDecisionPolicy {
        BoostDecisionPolicy {
            kinematics: KinematicsModel::new(config.kinematics.clone()),
            headway_model: SafetyHeadwayModel::from_config(config),
            trigger_ratio: config.boost.trigger_ratio,
            tiering: config.boost.tiering.clone(),
            train_count: config.headway.train_count,
        }
    }

    /// candidate speed one tier up, before the civil/absolute caps.
    fn boosted_tier(&self, base_speed: KmPerHour) -> KmPerHour {
        match self.tiering {
            BoostTiering::DiscreteStep {
                mid_speed,
                top_speed,
            } => {
                if base_speed < mid_speed {
                    mid_speed
                } else {
                    top_speed
                }
            }
            BoostTiering::Multiplier { factor, cap } => (base_speed * factor).min(cap),
        }
    }

    fn section_headway(&self, runtime: Seconds, dwell: Duration) -> Seconds {
        (runtime + dwell.in_sec() as f64) / self.train_count as f64
    }

    /// plans one traversal of `segment` given the dwell just observed at the
    /// departing station.
    pub fn plan_segment(
        &self,
        segment: &Segment,
        base_dwell: Duration,
        actual_dwell: Duration,
    ) -> Result<SegmentPlan, Error> {
        let cap = segment
            .max_speed
            .map_or(segment.civil_speed, |m| segment.civil_speed.min(m));
        let base_profile = self.kinematics.profile(segment.distance, cap)?;
        let base_speed = base_profile.ceiling;

        let mut chosen_speed = base_speed;
        let mut runtime = base_profile.total();
        let mut headway = self.section_headway(runtime, actual_dwell);
        let mut boosted = false;

        let triggered =
            actual_dwell.in_sec() as f64 > self.trigger_ratio * base_dwell.in_sec() as f64;
        if triggered {
            let candidate = self.boosted_tier(base_speed).min(cap);
            if candidate > base_speed {
                let boosted_runtime = self
                    .kinematics
                    .profile_at_speed(segment.distance, candidate)?
                    .total();
                let boosted_headway = self.section_headway(boosted_runtime, actual_dwell);
                let boosted_safe = self.headway_model.safe_headway(candidate, segment.distance)?;
                // recovering time must never push the operation below the
                // safety floor
                if boosted_headway >= boosted_safe {
                    chosen_speed = candidate;
                    runtime = boosted_runtime;
                    headway = boosted_headway;
                    boosted = true;
                }
            }
        }

        let safe_headway = self.headway_model.safe_headway(chosen_speed, segment.distance)?;
        let action = if boosted {
            SegmentAction::BoostApplied
        } else if headway < safe_headway {
            SegmentAction::EmergencyDelay
        } else {
            SegmentAction::NoBoost
        };

        Ok(SegmentPlan {
            base_speed,
            chosen_speed,
            runtime,
            headway,
            safe_headway,
            base_dwell,
            actual_dwell,
            action,
        })
    }
}

#[cfg(test)]
#[path = "boost_tests.rs"]
mod tests;
