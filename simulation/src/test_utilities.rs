use model::base_types::Duration;
use model::config::SimulationConfig;
use model::line::LineTopology;
use model::station::Station;

/// the ten-station Thane stretch used across the engine tests.
pub(crate) fn test_line() -> LineTopology {
    let station = |name: &str, distance: f64, dwell: u32, civil: f64| {
        Station::new(
            name.to_string(),
            distance,
            Duration::from_seconds(dwell),
            civil,
            Some(50.0),
        )
    };
    LineTopology::new(
        "LINE4".to_string(),
        vec![
            Station::new(
                "GAIMUKH".to_string(),
                0.0,
                Duration::from_seconds(60),
                35.0,
                Some(40.0),
            ),
            station("GOWNIWADA", 1502.229, 30, 45.0),
            station("KASARVADVALI", 2887.623, 30, 45.0),
            station("VIJAYGARDEN", 3911.659, 30, 45.0),
            station("DONGARI PADA", 5110.437, 35, 45.0),
            station("TIKUJI NI WADI", 6337.131, 30, 45.0),
            station("MANPADA", 7096.123, 30, 45.0),
            station("KAPURBAWDI", 7911.947, 50, 45.0),
            station("MAJIWADA", 9365.654, 30, 45.0),
            station("CADBUARY JUNCTION", 10190.361, 60, 45.0),
        ],
    )
    .unwrap()
}

pub(crate) fn test_config() -> SimulationConfig {
    SimulationConfig::default()
}
