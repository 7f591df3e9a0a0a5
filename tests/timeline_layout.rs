// tests/timeline_layout.rs

use std::error::Error;

use ganttdag::store::{ScheduleStore, TaskView};
use ganttdag::timeline::geometry::ELBOW_STUB;
use ganttdag::timeline::{
    build_layout, connector_path, date_to_offset, task_bar_geometry, DayWidths, Point,
    RowMetrics, TimelineScale, TimelineWindow,
};
use ganttdag::types::{DependencyType, Granularity};
use ganttdag_test_utils::builders::TaskBuilder;
use ganttdag_test_utils::fixtures::chain_ab;
use ganttdag_test_utils::{date, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn offset_is_linear_and_signed() {
    let start = date("2024-05-01");

    assert_eq!(date_to_offset(start, start, 60.0), 0.0);
    assert_eq!(date_to_offset(date("2024-05-11"), start, 60.0), 600.0);
    assert_eq!(date_to_offset(date("2024-04-29"), start, 20.0), -40.0);

    let mut prev = f64::MIN;
    for day in 0..90 {
        let d = start + chrono::TimeDelta::days(day - 30);
        let x = date_to_offset(d, start, 8.0);
        assert!(x > prev);
        prev = x;
    }
}

#[test]
fn bars_use_computed_early_start() -> TestResult {
    init_tracing();

    let store = ScheduleStore::from_tasks(chain_ab(), None)?;
    let b = store.get_task("B").ok_or("B missing")?;

    let bar = task_bar_geometry(&b, date("2024-05-01"), 20.0);
    assert_eq!(bar.x, 200.0);
    assert_eq!(bar.width, 100.0);
    assert!(!bar.is_milestone);
    Ok(())
}

#[test]
fn milestone_bar_has_zero_width() -> TestResult {
    // Built directly, bypassing store normalization.
    let raw = TaskBuilder::milestone("M").duration(5).start("2024-05-03").build();
    let view = TaskView::new(raw, None);
    let bar = task_bar_geometry(&view, date("2024-05-01"), 60.0);
    assert_eq!(bar.width, 0.0);
    assert_eq!(bar.x, 120.0);

    let store = ScheduleStore::from_tasks(
        vec![TaskBuilder::milestone("M").duration(5).build()],
        None,
    )?;
    let bar = task_bar_geometry(&store.get_task("M").ok_or("M missing")?, date("2024-05-01"), 60.0);
    assert_eq!(bar.width, 0.0);
    Ok(())
}

#[test]
fn connector_runs_from_predecessor_finish_to_successor_start() -> TestResult {
    let store = ScheduleStore::from_tasks(chain_ab(), None)?;
    let tasks = store.list_tasks();
    let scale = TimelineScale {
        range_start: date("2024-05-01"),
        unit_width: 10.0,
        rows: RowMetrics::default(),
    };
    let row_index_of = |id: &str| tasks.iter().position(|t| t.id() == id);

    let points = connector_path(&tasks[0], &tasks[1], row_index_of, &scale)
        .ok_or("connector missing")?;

    assert_eq!(points.first(), Some(&Point::new(100.0, 70.0)));
    assert_eq!(points.last(), Some(&Point::new(100.0, 130.0)));
    assert_eq!(points[1], Point::new(100.0 + ELBOW_STUB, 70.0));
    assert_eq!(points[2], Point::new(100.0 + ELBOW_STUB, 130.0));
    Ok(())
}

#[test]
fn connector_needs_both_rows() -> TestResult {
    let store = ScheduleStore::from_tasks(chain_ab(), None)?;
    let tasks = store.list_tasks();
    let scale = TimelineScale {
        range_start: date("2024-05-01"),
        unit_width: 10.0,
        rows: RowMetrics::default(),
    };

    let only_a = |id: &str| (id == "A").then_some(0);
    assert!(connector_path(&tasks[0], &tasks[1], only_a, &scale).is_none());
    Ok(())
}

#[test]
fn window_navigation_steps_by_granularity() {
    let start = date("2024-05-01");
    let cases = [
        (Granularity::Day, "2024-05-08", "2024-04-24"),
        (Granularity::Week, "2024-05-15", "2024-04-17"),
        (Granularity::Month, "2024-05-31", "2024-04-01"),
        (Granularity::Quarter, "2024-07-30", "2024-02-01"),
    ];

    for (g, next, prev) in cases {
        let w = TimelineWindow::new(start, g, 30);
        assert_eq!(w.next().range_start, date(next), "{g:?} next");
        assert_eq!(w.prev().range_start, date(prev), "{g:?} prev");
        assert_eq!(w.next().prev(), w);
        assert_eq!(w.next().granularity, g);
    }
}

#[test]
fn window_today_and_range_end() {
    let w = TimelineWindow::new(date("2024-05-01"), Granularity::Week, 30);
    assert_eq!(w.range_end(), date("2024-05-30"));
    assert!(w.contains(date("2024-05-30")));
    assert!(!w.contains(date("2024-05-31")));

    let t = w.today(date("2024-11-15"));
    assert_eq!(t.range_start, date("2024-11-15"));
    assert_eq!(t.days_to_show, 30);
    assert_eq!(t.granularity, Granularity::Week);
}

#[test]
fn ticks_per_granularity() {
    let week = TimelineWindow::new(date("2024-05-01"), Granularity::Week, 30);
    let ticks = week.ticks(10.0);
    let xs: Vec<f64> = ticks.iter().map(|t| t.x).collect();
    assert_eq!(xs, [0.0, 70.0, 140.0, 210.0, 280.0]);

    let day = TimelineWindow::new(date("2024-05-01"), Granularity::Day, 3);
    assert_eq!(day.ticks(1.0).len(), 3);
    assert_eq!(day.ticks(1.0)[0].label, "May 01");

    let month = TimelineWindow::new(date("2024-05-15"), Granularity::Month, 60);
    let labels: Vec<String> = month.ticks(1.0).into_iter().map(|t| t.label).collect();
    assert_eq!(labels, ["Jun 2024", "Jul 2024"]);

    let quarter = TimelineWindow::new(date("2024-01-01"), Granularity::Quarter, 366);
    let labels: Vec<String> = quarter.ticks(1.0).into_iter().map(|t| t.label).collect();
    assert_eq!(labels, ["Q1 2024", "Q2 2024", "Q3 2024", "Q4 2024"]);
}

#[test]
fn layout_covers_bars_and_valid_connectors_only() -> TestResult {
    let tasks = vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5)
            .after("A")
            .depends_on("ghost", DependencyType::StartToStart, 0)
            .build(),
        TaskBuilder::milestone("M").after("B").build(),
    ];
    let store = ScheduleStore::from_tasks(tasks, None)?;
    let window = TimelineWindow::new(date("2024-05-01"), Granularity::Month, 30);

    let layout = build_layout(&store.list_tasks(), window, &DayWidths::default(), RowMetrics::default());

    assert_eq!(layout.unit_width, DayWidths::default().month);
    assert_eq!(layout.bars.len(), 3);
    assert_eq!(layout.bars[2].row, 2);
    assert_eq!(layout.bars[2].geometry.width, 0.0);
    assert!(layout.bars.iter().all(|b| b.is_on_critical_path));

    let edges: Vec<(&str, &str)> = layout
        .connectors
        .iter()
        .map(|c| (c.from.as_str(), c.to.as_str()))
        .collect();
    assert_eq!(edges, [("A", "B"), ("B", "M")]);
    Ok(())
}
