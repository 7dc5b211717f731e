use super::*;
use model::base_types::StationIdx;
use model::config::{BoostTiering, SimulationConfig};

fn segment(distance: f64, civil_speed: f64, max_speed: Option<f64>) -> Segment {
    Segment {
        from: StationIdx(0),
        to: StationIdx(1),
        distance,
        civil_speed,
        max_speed,
    }
}

fn policy() -> BoostDecisionPolicy {
    BoostDecisionPolicy::from_config(&SimulationConfig::default())
}

fn seconds(s: u32) -> Duration {
    Duration::from_seconds(s)
}

#[test]
fn no_overrun_means_no_boost() {
    let plan = policy()
        .plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(35))
        .unwrap();
    assert_eq!(plan.action, SegmentAction::NoBoost);
    assert_eq!(plan.chosen_speed, plan.base_speed);
}

#[test]
fn trigger_needs_a_strict_overrun_beyond_the_ratio() {
    // 39s is exactly 1.3 x 30s: not yet an overrun
    let plan = policy()
        .plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(39))
        .unwrap();
    assert_eq!(plan.action, SegmentAction::NoBoost);

    let plan = policy()
        .plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(40))
        .unwrap();
    assert_eq!(plan.action, SegmentAction::BoostApplied);
}

#[test]
fn overrun_on_a_long_segment_boosts_one_tier_up() {
    // base dwell 30s, actual 45s: the overrun fires, and a boost to 38 km/h
    // keeps the headway above the safety floor.
    let plan = policy()
        .plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(45))
        .unwrap();
    assert_eq!(plan.base_speed, 35.0);
    assert_eq!(plan.chosen_speed, 38.0);
    assert_eq!(plan.action, SegmentAction::BoostApplied);
    assert!(
        plan.headway >= plan.safe_headway,
        "accepted boost must respect the safety floor: headway {}s, floor {}s",
        plan.headway,
        plan.safe_headway
    );
    assert!(plan.runtime < policy().plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(35)).unwrap().runtime);
}

#[test]
fn triggered_overrun_never_reports_plain_no_boost() {
    // the concrete scenario of the safety review: 45s > 1.3 x 30s
    let plan = policy()
        .plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(45))
        .unwrap();
    assert!(
        plan.action == SegmentAction::BoostApplied || plan.action == SegmentAction::EmergencyDelay,
        "a triggered overrun must surface as boost or emergency, got {}",
        plan.action
    );
}

#[test]
fn accepted_boosts_always_respect_the_safety_floor() {
    let policy = policy();
    for distance in (1..=25).map(|i| i as f64 * 100.0) {
        for actual_dwell in [40, 60, 90, 120] {
            let plan = policy
                .plan_segment(
                    &segment(distance, 45.0, Some(50.0)),
                    seconds(30),
                    seconds(actual_dwell),
                )
                .unwrap();
            if plan.action == SegmentAction::BoostApplied {
                assert!(
                    plan.headway >= plan.safe_headway,
                    "boost at {}m with dwell {}s undercuts the floor: {}s < {}s",
                    distance,
                    actual_dwell,
                    plan.headway,
                    plan.safe_headway
                );
                assert!(plan.chosen_speed > plan.base_speed);
            }
        }
    }
}

#[test]
fn civil_speed_cap_disarms_the_boost() {
    // civil speed 30 leaves no headroom above the base tier
    let plan = policy()
        .plan_segment(&segment(1502.229, 30.0, None), seconds(30), seconds(90))
        .unwrap();
    assert_eq!(plan.base_speed, 30.0);
    assert_eq!(plan.chosen_speed, 30.0);
    assert_ne!(plan.action, SegmentAction::BoostApplied);
}

#[test]
fn starved_headway_is_flagged_as_emergency() {
    // spreading the section over 60 trains pushes the headway far below the
    // braking window
    let mut config = SimulationConfig::default();
    config.headway.train_count = 60;
    let policy = BoostDecisionPolicy::from_config(&config);
    let plan = policy
        .plan_segment(&segment(1502.229, 45.0, None), seconds(30), seconds(90))
        .unwrap();
    assert_eq!(plan.action, SegmentAction::EmergencyDelay);
    assert!(plan.headway < plan.safe_headway);
}

#[test]
fn multiplier_tiering_caps_at_the_absolute_ceiling() {
    let mut config = SimulationConfig::default();
    config.boost.tiering = BoostTiering::Multiplier {
        factor: 1.2,
        cap: 40.0,
    };
    let policy = BoostDecisionPolicy::from_config(&config);
    let plan = policy
        .plan_segment(&segment(1502.229, 45.0, Some(50.0)), seconds(30), seconds(45))
        .unwrap();
    // 35 x 1.2 = 42, capped at 40
    assert_eq!(plan.chosen_speed, 40.0);
    assert_eq!(plan.action, SegmentAction::BoostApplied);
}

#[test]
fn invalid_segment_distance_propagates() {
    let result = policy().plan_segment(&segment(0.0, 45.0, None), seconds(30), seconds(30));
    assert!(matches!(result, Err(Error::InvalidSegment { .. })));
}
