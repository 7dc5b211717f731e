use crate::base_types::{Direction, Duration, KmPerHour, Meters, Seconds, ServiceTime, TrainCount};

/// all tunables of the simulation. The defaults reproduce the production
/// parameter set of the modelled line.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub kinematics: ConfigKinematics,
    pub headway: ConfigHeadway,
    pub dwell: ConfigDwell,
    pub boost: ConfigBoost,
    pub service: ConfigService,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigKinematics {
    /// speed tier for segments at or below the long-segment threshold.
    pub short_segment_speed: KmPerHour,
    /// speed tier for segments above the long-segment threshold.
    pub long_segment_speed: KmPerHour,
    pub long_segment_threshold: Meters,
    /// fraction of the segment distance spent accelerating.
    pub acceleration_fraction: f64,
    pub brake_distance: Meters,
    pub buffer_distance: Meters,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigHeadway {
    /// driver/system reaction margin added on top of the braking window.
    pub reaction_time: Seconds,
    /// fleet size the section headway is spread over.
    pub train_count: TrainCount,
}

/// bounds of the multiplicative crowding factor applied to nominal dwells.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDwell {
    pub variation_lo: f64,
    pub variation_hi: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBoost {
    /// dwell overrun ratio above which a speed boost is considered.
    pub trigger_ratio: f64,
    pub tiering: BoostTiering,
}

/// how a boosted speed candidate is derived from the base tier.
#[derive(Debug, Clone, PartialEq)]
pub enum BoostTiering {
    /// one discrete tier up: the short-segment tier is lifted to `mid_speed`,
    /// anything at or above it to `top_speed`.
    DiscreteStep {
        mid_speed: KmPerHour,
        top_speed: KmPerHour,
    },
    /// flat multiplier, capped at an absolute ceiling.
    Multiplier { factor: f64, cap: KmPerHour },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigService {
    pub start_of_service: ServiceTime,
    /// running clock cutoff after which no further stops are generated.
    pub end_of_service: ServiceTime,
    /// dwell at a terminus while the train reverses.
    pub turnaround: Duration,
    /// departure offset between successive trains from the same start
    /// station.
    pub stagger: Duration,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            kinematics: ConfigKinematics {
                short_segment_speed: 30.0,
                long_segment_speed: 35.0,
                long_segment_threshold: 800.0,
                acceleration_fraction: 1.0 / 8.0,
                brake_distance: 150.0,
                buffer_distance: 50.0,
            },
            headway: ConfigHeadway {
                reaction_time: 2.0,
                train_count: 7,
            },
            dwell: ConfigDwell {
                variation_lo: 0.7,
                variation_hi: 2.0,
            },
            boost: ConfigBoost {
                trigger_ratio: 1.3,
                tiering: BoostTiering::DiscreteStep {
                    mid_speed: 35.0,
                    top_speed: 38.0,
                },
            },
            service: ConfigService {
                start_of_service: ServiceTime::new("05:00"),
                end_of_service: ServiceTime::new("24:00"),
                turnaround: Duration::from_minutes(15),
                stagger: Duration::from_minutes(10),
            },
        }
    }
}

/// which trains enter service where; expanded into one traversal automaton
/// per train.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub starts: Vec<TrainStart>,
}

/// a batch of trains entering service from one station, staggered by the
/// configured headway.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainStart {
    pub station: String,
    pub trains: TrainCount,
    pub direction: Direction,
    pub first_departure: ServiceTime,
}
