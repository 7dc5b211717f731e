use model::base_types::{Duration, KmPerHour, Meters, Seconds};
use model::config::SimulationConfig;
use model::line::LineTopology;
use model::Error;

use crate::boost::{BoostDecisionPolicy, SegmentAction};
use crate::dwell::DwellSampler;

/// one row of the segment-level safety report: the boost decision and the
/// headway situation of a single forward segment under a sampled dwell.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReportRow {
    pub from: String,
    pub to: String,
    pub distance: Meters,
    pub base_speed: KmPerHour,
    /// speed actually planned; equals `base_speed` when no boost applied.
    pub boosted_speed: KmPerHour,
    pub base_dwell: Duration,
    pub actual_dwell: Duration,
    pub runtime: Seconds,
    pub safe_headway: Seconds,
    pub actual_headway: Seconds,
    pub action: SegmentAction,
}

/// aggregate of one forward traversal, reported after the segment rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary {
    pub total_distance: Meters,
    pub total_runtime: Seconds,
    pub total_dwell: Duration,
    /// headway achievable when the configured fleet shares one round trip.
    pub round_trip_headway: Seconds,
}

#[derive(Debug)]
pub struct SafetyReport {
    pub rows: Vec<SegmentReportRow>,
    pub summary: LineSummary,
}

impl SafetyReport {
    /// walks one forward traversal of the line, sampling a dwell at every
    /// departing station and running the boost decision per segment.
    pub fn compute(
        topology: &LineTopology,
        config: &SimulationConfig,
        seed: u64,
    ) -> Result<SafetyReport, Error> {
        let policy = BoostDecisionPolicy::from_config(config);
        let mut sampler = DwellSampler::from_seed(&config.dwell, seed);

        let mut rows = Vec::with_capacity(topology.size() - 1);
        let mut total_runtime = 0.0;
        // the far terminus has no departure in a forward pass, so its stand
        // time is the nominal dwell
        let mut total_dwell = topology
            .station(topology.last_terminus())
            .base_dwell();
        for segment in topology.segments_forward() {
            let from = topology.station(segment.from);
            let to = topology.station(segment.to);
            let actual_dwell = sampler.sample(from.base_dwell());
            let plan = policy.plan_segment(&segment, from.base_dwell(), actual_dwell)?;

            total_runtime += plan.runtime;
            total_dwell = total_dwell + actual_dwell;
            rows.push(SegmentReportRow {
                from: from.name().to_string(),
                to: to.name().to_string(),
                distance: segment.distance,
                base_speed: plan.base_speed,
                boosted_speed: plan.chosen_speed,
                base_dwell: plan.base_dwell,
                actual_dwell: plan.actual_dwell,
                runtime: plan.runtime,
                safe_headway: plan.safe_headway,
                actual_headway: plan.headway,
                action: plan.action,
            });
        }

        let last = topology.station(topology.last_terminus());
        let total_distance = last.distance_from_origin()
            - topology
                .station(topology.first_terminus())
                .distance_from_origin();
        let round_trip_headway = (total_runtime + total_dwell.in_sec() as f64) * 2.0
            / config.headway.train_count as f64;

        Ok(SafetyReport {
            rows,
            summary: LineSummary {
                total_distance,
                total_runtime,
                total_dwell,
                round_trip_headway,
            },
        })
    }
}
