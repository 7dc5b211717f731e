use super::*;
use crate::test_utilities::{test_config, test_line};
use itertools::Itertools;
use model::base_types::TrainCount;
use model::config::TrainStart;

fn run_plan(station: &str, trains: TrainCount, direction: Direction) -> RunPlan {
    RunPlan {
        starts: vec![TrainStart {
            station: station.to_string(),
            trains,
            direction,
            first_departure: ServiceTime::new("05:00"),
        }],
    }
}

fn single_run(station: &str, direction: Direction) -> TrainRun {
    TrainRun {
        id: TrainId::new(station, 1),
        start_station: station.to_string(),
        direction,
        first_departure: ServiceTime::new("05:00"),
        seed: 42,
    }
}

#[test]
fn first_stop_has_no_arrival_and_departs_on_the_dot() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let entries = generator
        .generate_train(&single_run("GAIMUKH", Direction::Forward))
        .unwrap();

    let first = &entries[0];
    assert_eq!(first.arrival, None);
    assert_eq!(first.departure, ServiceTime::new("05:00"));
    assert_eq!(first.station, "GAIMUKH");
    assert_eq!(first.direction, EntryDirection::Forward);
    assert_eq!(first.top_speed, None);

    // every later stop carries an arrival and is chronological
    for pair in entries.windows(2) {
        let arrival = pair[1].arrival.expect("only the first stop lacks an arrival");
        assert!(pair[0].departure <= arrival);
        assert!(arrival <= pair[1].departure);
    }
}

#[test]
fn turnaround_happens_exactly_once_per_terminus_visit() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let entries = generator
        .generate_train(&single_run("GAIMUKH", Direction::Forward))
        .unwrap();

    let terminus_visits = entries
        .iter()
        .skip(1) // the starting terminus is a departure, not a reversal
        .filter(|e| e.station == "GAIMUKH" || e.station == "CADBUARY JUNCTION")
        .count();
    let turnarounds = entries
        .iter()
        .filter(|e| e.direction == EntryDirection::Turnaround)
        .count();
    assert!(turnarounds > 0, "a full service day must produce turnarounds");
    assert_eq!(
        turnarounds, terminus_visits,
        "every terminus visit must reverse the train exactly once"
    );

    // turnarounds carry no top speed and alternate between the two termini
    for (a, b) in entries
        .iter()
        .filter(|e| e.direction == EntryDirection::Turnaround)
        .tuple_windows()
    {
        assert_eq!(a.top_speed, None);
        assert_ne!(a.station, b.station);
    }
}

#[test]
fn direction_alternates_between_consecutive_turnarounds() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let entries = generator
        .generate_train(&single_run("GAIMUKH", Direction::Forward))
        .unwrap();

    let mut expected = EntryDirection::Forward;
    for entry in &entries {
        match entry.direction {
            EntryDirection::Turnaround => {
                expected = match expected {
                    EntryDirection::Forward => EntryDirection::Return,
                    _ => EntryDirection::Forward,
                };
            }
            direction => assert_eq!(
                direction, expected,
                "travel direction must only flip at turnarounds (station {})",
                entry.station
            ),
        }
    }
}

#[test]
fn same_seed_reproduces_the_timetable_exactly() {
    let line = test_line();
    let config = test_config();
    let plan = run_plan("GAIMUKH", 3, Direction::Forward);

    let first = TimetableGenerator::new(&line, &config, 7).generate(&plan);
    let second = TimetableGenerator::new(&line, &config, 7).generate(&plan);
    assert_eq!(first.entries, second.entries);
    assert!(first.failures.is_empty());

    let other_seed = TimetableGenerator::new(&line, &config, 8).generate(&plan);
    assert_ne!(first.entries, other_seed.entries);
}

#[test]
fn no_stop_is_generated_after_the_service_end_cutoff() {
    let line = test_line();
    let mut config = test_config();
    config.service.end_of_service = ServiceTime::new("06:30");
    let generator = TimetableGenerator::new(&line, &config, 42);
    let entries = generator
        .generate_train(&single_run("GAIMUKH", Direction::Forward))
        .unwrap();

    assert!(!entries.is_empty());
    for entry in &entries {
        if let Some(arrival) = entry.arrival {
            assert!(
                arrival <= config.service.end_of_service,
                "arrival {} at {} lies past the cutoff",
                arrival,
                entry.station
            );
        }
    }
}

#[test]
fn trains_from_one_start_are_staggered_by_the_headway() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let runs = generator.expand_run_plan(&run_plan("GAIMUKH", 3, Direction::Forward));

    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].id.to_string(), "GAI01");
    assert_eq!(runs[1].id.to_string(), "GAI02");
    assert_eq!(runs[0].first_departure, ServiceTime::new("05:00"));
    assert_eq!(runs[1].first_departure, ServiceTime::new("05:10"));
    assert_eq!(runs[2].first_departure, ServiceTime::new("05:20"));
    assert_ne!(runs[0].seed, runs[1].seed);
}

#[test]
fn unknown_start_station_fails_only_that_train() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let plan = RunPlan {
        starts: vec![
            TrainStart {
                station: "GAIMUKH".to_string(),
                trains: 1,
                direction: Direction::Forward,
                first_departure: ServiceTime::new("05:00"),
            },
            TrainStart {
                station: "NOWHERE".to_string(),
                trains: 2,
                direction: Direction::Forward,
                first_departure: ServiceTime::new("05:00"),
            },
        ],
    };
    let timetable = generator.generate(&plan);

    assert_eq!(timetable.failures.len(), 2);
    for (_, error) in &timetable.failures {
        assert_eq!(*error, Error::UnknownStation("NOWHERE".to_string()));
    }
    assert!(
        timetable.entries.iter().all(|e| e.train_id.to_string().starts_with("GAI")),
        "the healthy train keeps its schedule"
    );
    assert!(!timetable.entries.is_empty());
}

#[test]
fn batch_entries_are_grouped_by_train_in_id_order() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let plan = RunPlan {
        starts: vec![
            TrainStart {
                station: "KAPURBAWDI".to_string(),
                trains: 1,
                direction: Direction::Forward,
                first_departure: ServiceTime::new("05:00"),
            },
            TrainStart {
                station: "CADBUARY JUNCTION".to_string(),
                trains: 1,
                direction: Direction::Return,
                first_departure: ServiceTime::new("05:00"),
            },
        ],
    };
    let timetable = generator.generate(&plan);
    assert!(timetable.failures.is_empty());

    let order: Vec<TrainId> = timetable
        .entries
        .iter()
        .map(|e| e.train_id)
        .dedup()
        .collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted, "trains must appear in id order");
    assert_eq!(order.len(), 2, "each train's stops must stay contiguous");
}

#[test]
fn a_mid_line_start_travels_toward_the_chosen_terminus() {
    let line = test_line();
    let config = test_config();
    let generator = TimetableGenerator::new(&line, &config, 42);
    let entries = generator
        .generate_train(&single_run("KAPURBAWDI", Direction::Return))
        .unwrap();

    assert_eq!(entries[0].station, "KAPURBAWDI");
    assert_eq!(entries[1].station, "MANPADA");
    assert_eq!(entries[1].direction, EntryDirection::Return);
    // 815.824m is above the long-segment threshold
    assert_eq!(entries[1].top_speed, Some(35.0));
}
