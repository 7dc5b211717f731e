use serde::Deserialize;

use crate::base_types::{Direction, Duration, ServiceTime};
use crate::config::{BoostTiering, RunPlan, SimulationConfig, TrainStart};
use crate::error::Error;
use crate::line::LineTopology;
use crate::station::Station;

/// fallback seed when the instance does not pin one.
const DEFAULT_SEED: u64 = 42;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    line: JsonLine,
    config: Option<JsonConfig>,
    run_plan: JsonRunPlan,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonLine {
    name: String,
    stations: Vec<JsonStation>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonStation {
    name: String,
    /// cumulative distance from the line origin; mutually exclusive with
    /// `segment_length`.
    distance_from_origin: Option<f64>,
    /// distance from the preceding station; the first station's value is
    /// ignored.
    segment_length: Option<f64>,
    base_dwell_seconds: u32,
    civil_speed_kmph: f64,
    max_speed_kmph: Option<f64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonConfig {
    short_segment_speed_kmph: Option<f64>,
    long_segment_speed_kmph: Option<f64>,
    long_segment_threshold_meter: Option<f64>,
    acceleration_fraction: Option<f64>,
    brake_distance_meter: Option<f64>,
    buffer_distance_meter: Option<f64>,
    reaction_time_seconds: Option<f64>,
    train_count: Option<u32>,
    dwell_variation: Option<JsonDwellVariation>,
    boost_trigger_ratio: Option<f64>,
    boost_tiering: Option<JsonBoostTiering>,
    start_of_service: Option<String>,
    end_of_service: Option<String>,
    turnaround_seconds: Option<u32>,
    stagger_seconds: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct JsonDwellVariation {
    lo: f64,
    hi: f64,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "strategy", rename_all = "camelCase")]
enum JsonBoostTiering {
    #[serde(rename_all = "camelCase")]
    DiscreteStep { mid_speed_kmph: f64, top_speed_kmph: f64 },
    #[serde(rename_all = "camelCase")]
    Multiplier { factor: f64, cap_kmph: f64 },
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRunPlan {
    starts: Vec<JsonTrainStart>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonTrainStart {
    station: String,
    trains: Option<u32>,
    direction: Option<String>,
    first_departure: Option<String>,
}

/// a fully loaded problem instance.
pub struct Instance {
    pub topology: LineTopology,
    pub config: SimulationConfig,
    pub run_plan: RunPlan,
    pub seed: u64,
}

pub fn load_instance_from_json(input: serde_json::Value) -> Result<Instance, Error> {
    let json_input: JsonInput =
        serde_json::from_value(input).map_err(|e| Error::InvalidInput(e.to_string()))?;

    let topology = create_topology(&json_input.line)?;
    let config = create_config(json_input.config.as_ref())?;
    let run_plan = create_run_plan(&json_input.run_plan, &config)?;
    Ok(Instance {
        topology,
        config,
        run_plan,
        seed: json_input.seed.unwrap_or(DEFAULT_SEED),
    })
}

fn create_topology(json_line: &JsonLine) -> Result<LineTopology, Error> {
    let cumulative = json_line
        .stations
        .iter()
        .skip(1)
        .all(|s| s.distance_from_origin.is_some());
    let by_deltas = json_line
        .stations
        .iter()
        .skip(1)
        .all(|s| s.segment_length.is_some());
    if !cumulative && !by_deltas {
        return Err(Error::InvalidInput(
            "stations must consistently provide either distanceFromOrigin or segmentLength"
                .to_string(),
        ));
    }

    let station_of = |s: &JsonStation, distance: f64| {
        Station::new(
            s.name.clone(),
            distance,
            Duration::from_seconds(s.base_dwell_seconds),
            s.civil_speed_kmph,
            s.max_speed_kmph,
        )
    };

    if cumulative {
        let stations = json_line
            .stations
            .iter()
            .map(|s| station_of(s, s.distance_from_origin.unwrap_or(0.0)))
            .collect();
        LineTopology::new(json_line.name.clone(), stations)
    } else {
        let stations = json_line
            .stations
            .iter()
            .map(|s| (station_of(s, 0.0), s.segment_length.unwrap_or(0.0)))
            .collect();
        LineTopology::from_segment_lengths(json_line.name.clone(), stations)
    }
}

fn create_config(json_config: Option<&JsonConfig>) -> Result<SimulationConfig, Error> {
    let mut config = SimulationConfig::default();
    let json_config = match json_config {
        Some(c) => c,
        None => return Ok(config),
    };

    if let Some(v) = json_config.short_segment_speed_kmph {
        config.kinematics.short_segment_speed = v;
    }
    if let Some(v) = json_config.long_segment_speed_kmph {
        config.kinematics.long_segment_speed = v;
    }
    if let Some(v) = json_config.long_segment_threshold_meter {
        config.kinematics.long_segment_threshold = v;
    }
    if let Some(v) = json_config.acceleration_fraction {
        if v <= 0.0 || v >= 1.0 {
            return Err(Error::InvalidInput(format!(
                "accelerationFraction must lie in (0, 1), got {}",
                v
            )));
        }
        config.kinematics.acceleration_fraction = v;
    }
    if let Some(v) = json_config.brake_distance_meter {
        config.kinematics.brake_distance = v;
    }
    if let Some(v) = json_config.buffer_distance_meter {
        config.kinematics.buffer_distance = v;
    }
    if let Some(v) = json_config.reaction_time_seconds {
        config.headway.reaction_time = v;
    }
    if let Some(v) = json_config.train_count {
        if v == 0 {
            return Err(Error::InvalidInput("trainCount must be positive".to_string()));
        }
        config.headway.train_count = v;
    }
    if let Some(v) = &json_config.dwell_variation {
        if v.lo <= 0.0 || v.hi < v.lo {
            return Err(Error::InvalidInput(format!(
                "dwellVariation must satisfy 0 < lo <= hi, got ({}, {})",
                v.lo, v.hi
            )));
        }
        config.dwell.variation_lo = v.lo;
        config.dwell.variation_hi = v.hi;
    }
    if let Some(v) = json_config.boost_trigger_ratio {
        config.boost.trigger_ratio = v;
    }
    if let Some(v) = &json_config.boost_tiering {
        config.boost.tiering = match v {
            JsonBoostTiering::DiscreteStep {
                mid_speed_kmph,
                top_speed_kmph,
            } => BoostTiering::DiscreteStep {
                mid_speed: *mid_speed_kmph,
                top_speed: *top_speed_kmph,
            },
            JsonBoostTiering::Multiplier { factor, cap_kmph } => BoostTiering::Multiplier {
                factor: *factor,
                cap: *cap_kmph,
            },
        };
    }
    if let Some(v) = &json_config.start_of_service {
        config.service.start_of_service = ServiceTime::new(v);
    }
    if let Some(v) = &json_config.end_of_service {
        config.service.end_of_service = ServiceTime::new(v);
    }
    if let Some(v) = json_config.turnaround_seconds {
        config.service.turnaround = Duration::from_seconds(v);
    }
    if let Some(v) = json_config.stagger_seconds {
        config.service.stagger = Duration::from_seconds(v);
    }
    Ok(config)
}

fn create_run_plan(
    json_run_plan: &JsonRunPlan,
    config: &SimulationConfig,
) -> Result<RunPlan, Error> {
    let mut starts = Vec::with_capacity(json_run_plan.starts.len());
    for json_start in &json_run_plan.starts {
        let direction = match json_start.direction.as_deref() {
            None | Some("forward") => Direction::Forward,
            Some("return") => Direction::Return,
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "direction must be 'forward' or 'return', got '{}'",
                    other
                )))
            }
        };
        starts.push(TrainStart {
            station: json_start.station.clone(),
            trains: json_start.trains.unwrap_or(1),
            direction,
            first_departure: json_start
                .first_departure
                .as_deref()
                .map(ServiceTime::new)
                .unwrap_or(config.service.start_of_service),
        });
    }
    Ok(RunPlan { starts })
}
