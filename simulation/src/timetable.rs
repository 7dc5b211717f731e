use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use rayon::prelude::*;

use model::base_types::{Direction, Duration, KmPerHour, ServiceTime, TrainId};
use model::config::{RunPlan, SimulationConfig};
use model::line::LineTopology;
use model::Error;

use crate::boost::{BoostDecisionPolicy, SegmentAction};
use crate::dwell::DwellSampler;

/// direction column of a stop event; turnarounds are their own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDirection {
    Forward,
    Return,
    Turnaround,
}

impl From<Direction> for EntryDirection {
    fn from(direction: Direction) -> EntryDirection {
        match direction {
            Direction::Forward => EntryDirection::Forward,
            Direction::Return => EntryDirection::Return,
        }
    }
}

impl fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntryDirection::Forward => write!(f, "forward"),
            EntryDirection::Return => write!(f, "return"),
            EntryDirection::Turnaround => write!(f, "turnaround"),
        }
    }
}

/// one stop event of one train. Never mutated after creation; the per-train
/// sequence is chronological by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableEntry {
    pub train_id: TrainId,
    /// None at the very first stop of a train's service.
    pub arrival: Option<ServiceTime>,
    pub departure: ServiceTime,
    pub station: String,
    pub direction: EntryDirection,
    /// top speed of the segment just completed; None at the first stop and
    /// at turnarounds.
    pub top_speed: Option<KmPerHour>,
}

/// start parameters of a single train automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainRun {
    pub id: TrainId,
    pub start_station: String,
    pub direction: Direction,
    pub first_departure: ServiceTime,
    /// per-train rng seed, derived from the batch seed so that runs are
    /// reproducible and independent of generation order.
    pub seed: u64,
}

/// a generated batch: all stop events plus the trains whose generation
/// failed. One train's failure never aborts its siblings.
#[derive(Debug)]
pub struct Timetable {
    pub entries: Vec<TimetableEntry>,
    pub failures: Vec<(TrainId, Error)>,
}

/// walks the line topology once per configured train, stamping arrival and
/// departure times from the kinematic runtimes and sampled dwells, and
/// reversing direction at the termini until the service-end cutoff.
pub struct TimetableGenerator<'a> {
    topology: &'a LineTopology,
    config: &'a SimulationConfig,
    policy: BoostDecisionPolicy,
    seed: u64,
}

impl<'a> TimetableGenerator<'a> {
    pub fn new(
        topology: &'a LineTopology,
        config: &'a SimulationConfig,
        seed: u64,
    ) -> TimetableGenerator<'a> {
        TimetableGenerator {
            topology,
            config,
            policy: BoostDecisionPolicy::from_config(config),
            seed,
        }
    }

    /// expands the run plan into one [`TrainRun`] per train, staggering
    /// successive trains from the same start station by the configured
    /// headway. Train numbers count up per station across plan entries so
    /// that ids stay unique.
    pub fn expand_run_plan(&self, plan: &RunPlan) -> Vec<TrainRun> {
        let mut runs = Vec::new();
        let mut numbers: HashMap<&str, u8> = HashMap::new();
        for start in &plan.starts {
            for n in 0..start.trains {
                let number = numbers.entry(start.station.as_str()).or_insert(0);
                *number += 1;
                let mut departure = start.first_departure;
                for _ in 0..n {
                    departure = departure + self.config.service.stagger;
                }
                runs.push(TrainRun {
                    id: TrainId::new(&start.station, *number),
                    start_station: start.station.clone(),
                    direction: start.direction,
                    first_departure: departure,
                    seed: self.seed.wrapping_add(runs.len() as u64),
                });
            }
        }
        runs
    }

    /// generates the stop sequence of one train; [`Error::UnknownStation`]
    /// if its start station is not on the line.
    pub fn generate_train(&self, run: &TrainRun) -> Result<Vec<TimetableEntry>, Error> {
        let mut idx = self.topology.station_idx_of(&run.start_station)?;
        let mut sampler = DwellSampler::from_seed(&self.config.dwell, run.seed);
        let end_of_service = self.config.service.end_of_service;

        let mut entries = Vec::new();
        let mut direction = run.direction;
        let mut clock = run.first_departure;
        let mut arrival: Option<ServiceTime> = None;
        let mut top_speed: Option<KmPerHour> = None;

        while clock <= end_of_service {
            let station = self.topology.station(idx);
            let at_leading_terminus = self.topology.neighbour(idx, direction).is_none();

            // stamp the stop at the current station
            let (departure, entry_direction, dwell_for_boost) = if at_leading_terminus {
                direction = direction.reversed();
                (
                    clock + self.config.service.turnaround,
                    EntryDirection::Turnaround,
                    station.base_dwell(), // a constant turnaround is no overrun
                )
            } else if entries.is_empty() {
                // service start: the train departs on the dot
                (clock, direction.into(), station.base_dwell())
            } else {
                let dwell = sampler.sample(station.base_dwell());
                (clock + dwell, direction.into(), dwell)
            };
            entries.push(TimetableEntry {
                train_id: run.id,
                arrival,
                departure,
                station: station.name().to_string(),
                direction: entry_direction,
                top_speed: if entry_direction == EntryDirection::Turnaround {
                    None
                } else {
                    top_speed
                },
            });
            clock = departure;
            if clock > end_of_service {
                break;
            }

            // traverse to the next station
            let next = match self.topology.neighbour(idx, direction) {
                Some(next) => next,
                None => break, // single-sided line; cannot happen on a valid topology
            };
            let segment = self.topology.segment_between(idx, next);
            let plan = self
                .policy
                .plan_segment(&segment, station.base_dwell(), dwell_for_boost)?;
            if plan.action == SegmentAction::EmergencyDelay {
                log::warn!(
                    "train {}: headway {:.1}s below the {:.1}s safety floor on {} -> {}",
                    run.id,
                    plan.headway,
                    plan.safe_headway,
                    station.name(),
                    self.topology.station(next).name()
                );
            }
            clock = clock + Duration::from_seconds_f64(plan.runtime);
            arrival = Some(clock);
            top_speed = Some(plan.chosen_speed);
            idx = next;
        }
        Ok(entries)
    }

    /// generates all trains of the plan. Train instances share no state, so
    /// they run in parallel; results are ordered by train id, then
    /// chronologically within each train.
    pub fn generate(&self, plan: &RunPlan) -> Timetable {
        let runs = self.expand_run_plan(plan);
        let results: Vec<(TrainId, Result<Vec<TimetableEntry>, Error>)> = runs
            .par_iter()
            .map(|run| (run.id, self.generate_train(run)))
            .collect();

        let mut entries = Vec::new();
        let mut failures = Vec::new();
        for (train_id, result) in results.into_iter().sorted_by_key(|(id, _)| *id) {
            match result {
                Ok(train_entries) => entries.extend(train_entries),
                Err(error) => {
                    log::warn!("skipping train {}: {}", train_id, error);
                    failures.push((train_id, error));
                }
            }
        }
        Timetable { entries, failures }
    }
}

#[cfg(test)]
#[path = "timetable/tests.rs"]
mod tests;
