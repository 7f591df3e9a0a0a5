// tests/critical_path_scenarios.rs

use std::error::Error;

use chrono::NaiveDate;

use ganttdag::dag::compute;
use ganttdag::errors::{ScheduleError, ScheduleWarning};
use ganttdag::phase::summarize;
use ganttdag::store::{ScheduleStore, TaskView};
use ganttdag::types::DependencyType;
use ganttdag_test_utils::builders::TaskBuilder;
use ganttdag_test_utils::fixtures::{chain_ab, chain_ab_with_branch_c};
use ganttdag_test_utils::{date, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn finish_to_start_chain_is_fully_critical() -> TestResult {
    init_tracing();

    let store = ScheduleStore::from_tasks(chain_ab(), None)?;
    let a = store.get_task("A").and_then(|v| v.derived).ok_or("A not scheduled")?;
    let b = store.get_task("B").and_then(|v| v.derived).ok_or("B not scheduled")?;

    assert_eq!(a.early_start, date("2024-05-01"));
    assert_eq!(a.early_finish, date("2024-05-11"));
    assert_eq!(b.early_start, date("2024-05-11"));
    assert_eq!(b.early_finish, date("2024-05-16"));
    assert_eq!(a.slack, 0);
    assert_eq!(b.slack, 0);
    assert!(a.is_on_critical_path);
    assert!(b.is_on_critical_path);
    assert_eq!(store.project_finish(), Some(date("2024-05-16")));
    assert_eq!(store.critical_path(), ["A".to_string(), "B".to_string()]);
    Ok(())
}

#[test]
fn side_branch_gets_slack_up_to_project_finish() -> TestResult {
    init_tracing();

    let store = ScheduleStore::from_tasks(chain_ab_with_branch_c(), None)?;
    let c = store.get_task("C").and_then(|v| v.derived).ok_or("C not scheduled")?;

    assert_eq!(store.project_finish(), Some(date("2024-05-16")));
    assert_eq!(c.early_start, date("2024-05-11"));
    assert_eq!(c.early_finish, date("2024-05-14"));
    assert_eq!(c.late_finish, date("2024-05-16"));
    assert_eq!(c.late_start, date("2024-05-13"));
    assert_eq!(c.slack, 2);
    assert!(!c.is_on_critical_path);

    let a = store.get_task("A").and_then(|v| v.derived).ok_or("A not scheduled")?;
    assert_eq!(a.late_finish, date("2024-05-11"));
    assert!(a.is_on_critical_path);
    Ok(())
}

#[test]
fn removing_predecessor_frees_successor_to_its_own_start() -> TestResult {
    init_tracing();

    let mut store = ScheduleStore::from_tasks(chain_ab(), None)?;
    store.remove_task("A")?;

    let b = store.get_task("B").ok_or("B missing")?;
    assert!(b.task.predecessors.is_empty());
    let d = b.derived.ok_or("B not scheduled")?;
    assert_eq!(d.early_start, date("2024-05-01"));
    assert_eq!(d.early_finish, date("2024-05-06"));
    Ok(())
}

#[test]
fn milestone_duration_is_coerced_to_zero() -> TestResult {
    init_tracing();

    let m = TaskBuilder::milestone("M").duration(5).after("A").build();
    let store = ScheduleStore::from_tasks(vec![TaskBuilder::new("A", 4).build(), m], None)?;

    let view = store.get_task("M").ok_or("M missing")?;
    assert_eq!(view.task.duration_days, 0);
    let d = view.derived.ok_or("M not scheduled")?;
    assert_eq!(d.early_start, date("2024-05-05"));
    assert_eq!(d.early_finish, d.early_start);
    assert_eq!(d.late_finish, d.late_start);
    Ok(())
}

#[test]
fn finish_to_finish_aligns_finishes_with_lag() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5)
            .depends_on("A", DependencyType::FinishToFinish, 2)
            .build(),
    ];
    let outcome = compute(&tasks, None)?;
    let b = outcome.derived["B"];

    assert_eq!(b.early_finish, date("2024-05-13"));
    assert_eq!(b.early_start, date("2024-05-08"));
    assert_eq!(b.slack, 0);
    Ok(())
}

#[test]
fn start_to_start_offsets_successor_start() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5)
            .depends_on("A", DependencyType::StartToStart, 3)
            .build(),
    ];
    let outcome = compute(&tasks, None)?;
    let a = outcome.derived["A"];
    let b = outcome.derived["B"];

    assert_eq!(b.early_start, date("2024-05-04"));
    assert_eq!(b.early_finish, date("2024-05-09"));
    // A drives B's start directly, so it stays critical.
    assert_eq!(a.slack, 0);
    assert!(b.slack >= 0);
    Ok(())
}

#[test]
fn start_to_finish_constrains_successor_finish() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5)
            .start("2024-04-01")
            .depends_on("A", DependencyType::StartToFinish, 0)
            .build(),
    ];
    let outcome = compute(&tasks, None)?;
    let b = outcome.derived["B"];

    assert_eq!(b.early_finish, date("2024-05-01"));
    assert_eq!(b.early_start, date("2024-04-26"));
    Ok(())
}

#[test]
fn negative_lag_lets_successor_overlap() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5)
            .depends_on("A", DependencyType::FinishToStart, -3)
            .build(),
    ];
    let outcome = compute(&tasks, None)?;

    assert_eq!(outcome.derived["B"].early_start, date("2024-05-08"));
    Ok(())
}

#[test]
fn declared_start_date_wins_over_earlier_predecessor_finish() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5).start("2024-05-20").after("A").build(),
    ];
    let outcome = compute(&tasks, None)?;
    let a = outcome.derived["A"];
    let b = outcome.derived["B"];

    assert_eq!(b.early_start, date("2024-05-20"));
    assert_eq!(b.slack, 0);
    assert_eq!(a.late_finish, date("2024-05-20"));
    assert_eq!(a.slack, 9);
    Ok(())
}

#[test]
fn anchor_date_floors_unconstrained_tasks() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("early", 3).start("2024-05-01").build(),
        TaskBuilder::new("late", 3).start("2024-05-20").build(),
    ];
    let outcome = compute(&tasks, Some(date("2024-05-10")))?;

    assert_eq!(outcome.derived["early"].early_start, date("2024-05-10"));
    assert_eq!(outcome.derived["late"].early_start, date("2024-05-20"));
    Ok(())
}

#[test]
fn dangling_predecessor_is_skipped_with_warning() -> TestResult {
    init_tracing();

    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5).after("A").after("ghost").build(),
    ];
    let store = ScheduleStore::from_tasks(tasks, None)?;

    assert!(store.is_valid());
    assert_eq!(
        store.warnings(),
        [ScheduleWarning::DanglingPredecessor {
            task: "B".to_string(),
            predecessor: "ghost".to_string(),
        }]
    );
    let b = store.get_task("B").and_then(|v| v.derived).ok_or("B not scheduled")?;
    assert_eq!(b.early_start, date("2024-05-11"));

    let err = store.ensure_no_dangling().expect_err("strict check must fail");
    assert!(matches!(
        err,
        ScheduleError::DanglingPredecessor { ref task, ref predecessor }
            if task == "B" && predecessor == "ghost"
    ));
    Ok(())
}

#[test]
fn strict_check_passes_on_resolved_graph() -> TestResult {
    let store = ScheduleStore::from_tasks(chain_ab(), None)?;
    store.ensure_no_dangling()?;
    Ok(())
}

#[test]
fn parallel_paths_pick_the_longest() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("start", 1).build(),
        TaskBuilder::new("short", 2).after("start").build(),
        TaskBuilder::new("long", 8).after("start").build(),
        TaskBuilder::new("end", 1).after("short").after("long").build(),
    ];
    let outcome = compute(&tasks, None)?;

    assert_eq!(outcome.derived["end"].early_start, date("2024-05-10"));
    assert_eq!(outcome.derived["short"].slack, 6);
    assert_eq!(
        outcome.critical_path,
        vec!["start".to_string(), "long".to_string(), "end".to_string()]
    );
    Ok(())
}

#[test]
fn empty_snapshot_computes_nothing() -> TestResult {
    let outcome = compute(&[], None)?;
    assert!(outcome.derived.is_empty());
    assert_eq!(outcome.project_finish, None);
    Ok(())
}

#[test]
fn out_of_range_arithmetic_is_an_error_not_a_panic() {
    let huge = vec![TaskBuilder::new("A", i64::MAX).build()];
    assert!(matches!(compute(&huge, None), Err(ScheduleError::DateOutOfRange(_))));

    let far = vec![TaskBuilder::new("A", 200_000_000_000_000).build()];
    assert!(matches!(compute(&far, None), Err(ScheduleError::DateOutOfRange(_))));

    for kind in [
        DependencyType::FinishToStart,
        DependencyType::FinishToFinish,
        DependencyType::StartToStart,
        DependencyType::StartToFinish,
    ] {
        for lag in [i64::MAX, i64::MIN] {
            let tasks = vec![
                TaskBuilder::new("A", 3).build(),
                TaskBuilder::new("B", 2).depends_on("A", kind, lag).build(),
            ];
            assert!(
                matches!(compute(&tasks, None), Err(ScheduleError::DateOutOfRange(_))),
                "{kind} with lag {lag} must fail cleanly"
            );
        }
    }
}

#[test]
fn unscheduled_views_of_huge_tasks_stay_readable() {
    let views = vec![
        TaskView::new(TaskBuilder::new("A", 200_000_000_000_000).build(), None),
        TaskView::new(TaskBuilder::new("B", i64::MAX).build(), None),
    ];

    assert_eq!(views[0].display_finish(), NaiveDate::MAX);
    assert_eq!(views[1].task.planned_finish(), NaiveDate::MAX);
    let summary = summarize(&views);
    assert_eq!(summary.total_tasks, 2);
    assert_eq!(summary.finish, Some(NaiveDate::MAX));
}
