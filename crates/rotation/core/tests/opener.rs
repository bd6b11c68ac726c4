mod common;

use std::time::Duration;

use common::Harness;
use rotation_core::{
    Ability, AttemptError, Category, Lane, OpenerPlan, OpenerStep, RotationConfig, RotationStatus,
    STANDARD_OPENER, Settings, TickOutcome,
};

/// Spacing that satisfies both lane lockouts on every tick.
const RELAXED: u64 = 700;

fn started() -> Harness {
    let mut harness = Harness::new(RotationConfig::default());
    harness.engine.start();
    harness
}

#[test]
fn opener_executes_every_step_in_order() {
    let mut harness = started();

    for (index, step) in STANDARD_OPENER.iter().enumerate() {
        let outcome = harness.step(RELAXED);
        assert_eq!(outcome.executed(), Some(step.ability), "step {index}");
        let snapshot = harness.engine.snapshot();
        assert_eq!(snapshot.opener_step, index + 1);
        assert_eq!(
            snapshot.status,
            RotationStatus::OpenerProgress {
                step: index + 1,
                total: STANDARD_OPENER.len()
            }
        );
    }

    let expected: Vec<Ability> = STANDARD_OPENER.iter().map(|step| step.ability).collect();
    assert_eq!(harness.host.executed, expected);

    assert_eq!(harness.step(RELAXED), TickOutcome::OpenerComplete);
    let snapshot = harness.engine.snapshot();
    assert!(!snapshot.in_opener);
    assert_eq!(snapshot.status, RotationStatus::OpenerComplete);
    assert_eq!(snapshot.status.to_string(), "Opener Complete - Running");
    assert_eq!(harness.executed_count(), STANDARD_OPENER.len());
}

#[test]
fn opener_gauges_follow_effect_table() {
    let mut harness = started();

    // (steps executed, heat, battery)
    let checkpoints = [
        (2, 0, 20),   // Air Anchor
        (6, 50, 20),  // Barrel Stabilizer
        (8, 55, 20),  // Heated Split Shot
        (10, 60, 20), // Heated Slug Shot
        (12, 65, 30), // Heated Clean Shot
        (15, 65, 50), // Chain Saw
        (20, 15, 50), // Hypercharge
        (31, 15, 50), // final Drill
    ];

    let mut executed = 0;
    for (after, heat, battery) in checkpoints {
        while executed < after {
            assert!(harness.step(RELAXED).executed().is_some());
            executed += 1;
        }
        let gauges = harness.engine.gauges();
        assert_eq!((gauges.heat(), gauges.battery()), (heat, battery), "after {after} steps");
    }

    // Split, Slug, Clean each advanced the combo; the opener leaves it wrapped.
    assert_eq!(harness.engine.session().combo_step, 0);
}

#[test]
fn disabled_steps_are_skipped_without_executing() {
    let mut harness = started();
    harness.settings = Settings::new().with(Category::Reassemble, false);

    assert_eq!(
        harness.step(RELAXED),
        TickOutcome::OpenerSkipped(Ability::Reassemble)
    );
    assert!(harness.host.executed.is_empty());
    assert_eq!(harness.engine.snapshot().opener_step, 1);
    assert_eq!(harness.engine.gauges().heat(), 0);

    assert_eq!(harness.step(RELAXED).executed(), Some(Ability::AirAnchor));

    // Run to completion: both Reassemble steps are skipped, nothing else.
    let mut guard = 0;
    while harness.step(RELAXED) != TickOutcome::OpenerComplete {
        guard += 1;
        assert!(guard < 100, "opener never completed");
    }
    assert!(!harness.host.executed.contains(&Ability::Reassemble));
    assert_eq!(harness.executed_count(), STANDARD_OPENER.len() - 2);
}

#[test]
fn unusable_step_holds_the_cursor() {
    let mut harness = started();
    harness.step(RELAXED);

    harness.host.unusable.insert(Ability::AirAnchor);
    assert_eq!(
        harness.step(RELAXED),
        TickOutcome::OpenerBlocked(AttemptError::Unavailable(Ability::AirAnchor))
    );
    assert_eq!(harness.engine.snapshot().opener_step, 1);
    assert_eq!(harness.engine.snapshot().preview, "[Opener] Air Anchor");

    harness.host.unusable.clear();
    assert_eq!(harness.step(RELAXED).executed(), Some(Ability::AirAnchor));
    assert_eq!(harness.engine.snapshot().opener_step, 2);
}

#[test]
fn rejected_execution_changes_nothing() {
    let mut harness = started();
    harness.step(RELAXED);
    harness.host.rejects.insert(Ability::AirAnchor);

    assert_eq!(
        harness.step(RELAXED),
        TickOutcome::OpenerBlocked(AttemptError::ExecutionFailed(Ability::AirAnchor))
    );
    let snapshot = harness.engine.snapshot();
    assert_eq!(snapshot.opener_step, 1);
    assert_eq!(snapshot.battery, 0);
    assert_eq!(snapshot.last_action, "Reassemble");
    assert_eq!(snapshot.history.len(), 1);
}

#[test]
fn fast_step_waits_for_fast_lockout() {
    let mut harness = started();
    harness.step(RELAXED); // Reassemble
    harness.step(RELAXED); // Air Anchor

    assert_eq!(
        harness.step(300),
        TickOutcome::OpenerBlocked(AttemptError::Locked {
            ability: Ability::GaussRound,
            remaining: Duration::from_millis(300),
        })
    );
    assert_eq!(harness.engine.snapshot().opener_step, 2);
    assert_eq!(harness.step(300).executed(), Some(Ability::GaussRound));
}

static BACK_TO_BACK: [OpenerStep; 3] = [
    OpenerStep {
        ability: Ability::AirAnchor,
        lane: Lane::Slow,
        label: "Air Anchor",
    },
    OpenerStep {
        ability: Ability::Drill,
        lane: Lane::Slow,
        label: "Drill",
    },
    OpenerStep {
        ability: Ability::GaussRound,
        lane: Lane::Fast,
        label: "Gauss Round",
    },
];

#[test]
fn slow_step_waits_for_slow_lockout() {
    let mut harness = Harness::new(RotationConfig::default());
    harness.engine = harness
        .engine
        .clone()
        .with_opener_plan(OpenerPlan::new(&BACK_TO_BACK));
    harness.engine.start();

    assert_eq!(harness.tick().executed(), Some(Ability::AirAnchor));
    assert_eq!(
        harness.step(200),
        TickOutcome::OpenerBlocked(AttemptError::Locked {
            ability: Ability::Drill,
            remaining: Duration::from_millis(400),
        })
    );
    assert_eq!(harness.step(399).executed(), None);
    assert_eq!(harness.step(1).executed(), Some(Ability::Drill));
    assert_eq!(harness.step(RELAXED).executed(), Some(Ability::GaussRound));
    assert_eq!(harness.step(RELAXED), TickOutcome::OpenerComplete);
}

#[test]
fn completion_is_permanent() {
    let mut harness = started();
    while harness.step(RELAXED) != TickOutcome::OpenerComplete {}

    for _ in 0..50 {
        assert_ne!(harness.step(RELAXED), TickOutcome::OpenerComplete);
        let snapshot = harness.engine.snapshot();
        assert!(!snapshot.in_opener);
        assert!(matches!(snapshot.status, RotationStatus::SteadyState { .. }));
    }
}

#[test]
fn target_loss_pauses_and_resumes_the_opener() {
    let mut harness = started();
    harness.step(RELAXED);

    let target = harness.host.target.take();
    assert_eq!(harness.step(RELAXED), TickOutcome::NoTarget);
    assert_eq!(harness.engine.snapshot().status.to_string(), "No Target");
    assert_eq!(harness.engine.session().next_action, "Waiting for target...");

    harness.host.target = target;
    assert_eq!(harness.step(RELAXED).executed(), Some(Ability::AirAnchor));
    assert_eq!(harness.engine.snapshot().status.to_string(), "Opener 2/31");
}
