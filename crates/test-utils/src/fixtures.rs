//! Small reference schedules shared across tests.

use ganttdag::store::TaskInput;

use crate::builders::TaskBuilder;

/// A (10d) -> B (5d), both planned for 2024-05-01.
pub fn chain_ab() -> Vec<TaskInput> {
    vec![
        TaskBuilder::new("A", 10).build(),
        TaskBuilder::new("B", 5).after("A").build(),
    ]
}

/// `chain_ab` plus C (3d) after A, with no successors.
pub fn chain_ab_with_branch_c() -> Vec<TaskInput> {
    let mut tasks = chain_ab();
    tasks.push(TaskBuilder::new("C", 3).after("A").build());
    tasks
}

/// A phased site schedule with a milestone, modelled on a retail build.
pub fn retail_build() -> Vec<TaskInput> {
    use ganttdag::types::TaskStatus;

    vec![
        TaskBuilder::new("steel", 14)
            .name("Structural Steel Erection")
            .start("2024-05-01")
            .phase("Framing")
            .status(TaskStatus::InProgress)
            .progress(80)
            .crew(5, 6)
            .budget(185_000.0, 156_000.0)
            .build(),
        TaskBuilder::new("slab", 5)
            .name("Concrete Slab - Building B")
            .start("2024-05-06")
            .phase("Foundation")
            .status(TaskStatus::Completed)
            .progress(100)
            .crew(8, 8)
            .budget(72_000.0, 70_000.0)
            .build(),
        TaskBuilder::new("studs", 20)
            .name("Metal Stud Framing")
            .start("2024-05-15")
            .phase("Framing")
            .after("steel")
            .crew(0, 10)
            .budget(94_000.0, 0.0)
            .build(),
        TaskBuilder::new("glazing", 12)
            .name("Storefront Glazing Installation")
            .start("2024-05-20")
            .after("studs")
            .crew(0, 4)
            .budget(128_000.0, 0.0)
            .build(),
        TaskBuilder::milestone("dry-in")
            .name("Building Dry-In")
            .phase("Framing")
            .after("glazing")
            .build(),
    ]
}
