use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time as stdtime;

use model::base_types::TrainCount;
use model::json_serialisation::load_instance_from_json;
use simulation::boost::SegmentAction;
use simulation::reports::SafetyReport;
use simulation::timetable::{Timetable, TimetableGenerator};

/// field value for "not applicable" cells, e.g. the missing arrival at a
/// train's very first stop.
const NOT_APPLICABLE: &str = "--";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Simulation(#[from] model::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// loads the instance, runs the safety analysis and the timetable
/// generation, writes both CSV reports into `output_dir` and prints the line
/// summary. Returns the paths of the written reports.
pub fn run(
    input_data: serde_json::Value,
    output_dir: &Path,
    instance_name: &str,
) -> Result<Vec<PathBuf>, Error> {
    let start_time = stdtime::Instant::now();
    let instance = load_instance_from_json(input_data)?;
    println!(
        "*** Instance '{}' with {} stations loaded (elapsed time: {:0.2}sec) ***",
        instance.topology.name(),
        instance.topology.size(),
        start_time.elapsed().as_secs_f32()
    );

    let safety_report = SafetyReport::compute(&instance.topology, &instance.config, instance.seed)?;
    let generator = TimetableGenerator::new(&instance.topology, &instance.config, instance.seed);
    let timetable = generator.generate(&instance.run_plan);
    let planned_trains: TrainCount = instance.run_plan.starts.iter().map(|s| s.trains).sum();
    println!(
        "*** {} stop events for {} planned trains generated (elapsed time: {:0.2}sec) ***",
        timetable.entries.len(),
        planned_trains,
        start_time.elapsed().as_secs_f32()
    );

    fs::create_dir_all(output_dir)?;
    let safety_path = output_dir.join(format!("safety_{}.csv", instance_name));
    write_safety_report(&safety_report, File::create(&safety_path)?)?;
    let timetable_path = output_dir.join(format!("timetable_{}.csv", instance_name));
    write_timetable(&timetable, File::create(&timetable_path)?)?;

    print_summary(&safety_report, &timetable);
    Ok(vec![safety_path, timetable_path])
}

/// one row per forward segment, followed by `#`-prefixed trailer rows with
/// the line totals. The column set is the compatibility contract for
/// downstream analysis tooling.
pub fn write_safety_report<W: io::Write>(report: &SafetyReport, writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    csv_writer.write_record([
        "From",
        "To",
        "Distance(m)",
        "BaseSpeed",
        "BoostedSpeed",
        "BaseDwell",
        "ActualDwell",
        "Runtime(s)",
        "SafeHeadway(s)",
        "ActualHeadway(s)",
        "ActionTaken",
    ])?;
    for row in &report.rows {
        csv_writer.write_record([
            row.from.clone(),
            row.to.clone(),
            format!("{:.3}", row.distance),
            format!("{}", row.base_speed),
            format!("{}", row.boosted_speed),
            row.base_dwell.in_sec().to_string(),
            row.actual_dwell.in_sec().to_string(),
            format!("{:.2}", row.runtime),
            format!("{:.2}", row.safe_headway),
            format!("{:.2}", row.actual_headway),
            row.action.to_string(),
        ])?;
    }

    let summary = &report.summary;
    csv_writer.write_record([
        "#Total running distance (m):".to_string(),
        format!("{:.3}", summary.total_distance),
    ])?;
    csv_writer.write_record([
        "#Total run time (s):".to_string(),
        format!("{:.2}", summary.total_runtime),
    ])?;
    csv_writer.write_record([
        "#Total dwell time (s):".to_string(),
        summary.total_dwell.in_sec().to_string(),
    ])?;
    csv_writer.write_record([
        "#Overall round-trip headway (s):".to_string(),
        format!("{:.2}", summary.round_trip_headway),
    ])?;
    csv_writer.flush()?;
    Ok(())
}

/// all stop events, grouped by train in id order, chronological per train.
/// Times are zero-padded `HH:MM:SS`; `--` marks fields without a value.
pub fn write_timetable<W: io::Write>(timetable: &Timetable, writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "train_id",
        "arrival_time",
        "departure_time",
        "station",
        "direction",
        "top_speed",
    ])?;
    for entry in &timetable.entries {
        csv_writer.write_record([
            entry.train_id.to_string(),
            entry
                .arrival
                .map_or(NOT_APPLICABLE.to_string(), |arrival| arrival.to_string()),
            entry.departure.to_string(),
            entry.station.clone(),
            entry.direction.to_string(),
            entry
                .top_speed
                .map_or(NOT_APPLICABLE.to_string(), |speed| speed.to_string()),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn print_summary(report: &SafetyReport, timetable: &Timetable) {
    let summary = &report.summary;
    println!("\n*** Line summary ***");
    println!("total running distance: {:.3}m", summary.total_distance);
    println!("total run time: {:.2}sec", summary.total_runtime);
    println!("total dwell time: {}sec", summary.total_dwell.in_sec());
    println!(
        "overall round-trip headway: {:.2}min",
        summary.round_trip_headway / 60.0
    );

    let emergencies = report
        .rows
        .iter()
        .filter(|row| row.action == SegmentAction::EmergencyDelay)
        .count();
    if emergencies > 0 {
        println!(
            "{} segment(s) sit below the safety headway floor, see the safety report",
            emergencies
        );
    }
    if !timetable.failures.is_empty() {
        println!("{} train(s) failed to generate:", timetable.failures.len());
        for (train_id, error) in &timetable.failures {
            println!("  {}: {}", train_id, error);
        }
    }
}
