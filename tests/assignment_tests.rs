use chrono::NaiveDate;
use yardboard::{
    AssignmentWarning, ServiceStage, StageCode, StageEntry, StageStatus, Unit, UnitCategory,
    Worker, partition_by_skill, percent_complete, review_assignment, workload,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn roster() -> Vec<Worker> {
    let mut ask = Worker::new(10, "Ask");
    ask.skills = vec![
        StageCode::Service(ServiceStage::Inspection),
        StageCode::Service(ServiceStage::Repairs),
    ];
    let mut embla = Worker::new(11, "Embla");
    embla.skills = vec![StageCode::Service(ServiceStage::Antifouling)];
    vec![ask, embla]
}

fn assigned_stage(stage_id: i32, code: ServiceStage, workers: Vec<i32>, status: StageStatus) -> StageEntry {
    let mut stage = StageEntry::new(stage_id, StageCode::Service(code));
    stage.planned_start = Some(d(2024, 2, 1));
    stage.planned_end = Some(d(2024, 2, 5));
    stage.assigned_workers = workers;
    stage.status = status;
    stage
}

#[test]
fn partition_splits_the_roster_by_skill() {
    let partition = partition_by_skill(StageCode::Service(ServiceStage::Inspection), &roster());
    assert_eq!(partition.qualified, vec![10]);
    assert_eq!(partition.lacking, vec![11]);
}

#[test]
fn workload_counts_open_stages_across_units() {
    let mut first = Unit::new(1, "Selkie", UnitCategory::Maintenance);
    first.stages = vec![
        assigned_stage(1, ServiceStage::Inspection, vec![10], StageStatus::InProgress),
        assigned_stage(2, ServiceStage::Repairs, vec![10, 11], StageStatus::Pending),
        assigned_stage(3, ServiceStage::HaulOut, vec![10], StageStatus::Completed),
    ];
    let mut second = Unit::new(2, "Vega", UnitCategory::Refit);
    second.stages = vec![assigned_stage(
        1,
        ServiceStage::Antifouling,
        vec![10],
        StageStatus::Delayed,
    )];

    let units = vec![first, second];
    // Completed stages never count against the worker.
    assert_eq!(workload(10, &units), 3);
    assert_eq!(workload(11, &units), 1);
    assert_eq!(workload(99, &units), 0);
}

#[test]
fn review_warns_on_missing_skill_but_does_not_block() {
    let review = review_assignment(
        StageCode::Service(ServiceStage::Repairs),
        &[10, 11],
        &roster(),
    );
    assert_eq!(review.warnings.len(), 1);
    assert_eq!(
        review.warnings[0],
        AssignmentWarning::LacksSkill { worker_id: 11 }
    );
}

#[test]
fn review_flags_workers_missing_from_the_roster() {
    let review = review_assignment(
        StageCode::Service(ServiceStage::Inspection),
        &[10, 77],
        &roster(),
    );
    assert_eq!(
        review.warnings,
        vec![AssignmentWarning::UnknownWorker { worker_id: 77 }]
    );
}

#[test]
fn review_is_clean_for_fully_qualified_assignments() {
    let review = review_assignment(StageCode::Service(ServiceStage::Inspection), &[10], &roster());
    assert!(review.is_clean());
}

#[test]
fn progress_tracks_the_fixed_vocabulary_not_present_stages() {
    let mut unit = Unit::new(1, "Selkie", UnitCategory::Maintenance);
    unit.stages = vec![
        assigned_stage(1, ServiceStage::HaulOut, vec![], StageStatus::Completed),
        assigned_stage(2, ServiceStage::Inspection, vec![], StageStatus::Completed),
    ];
    // 2 of the 6 service stages: 33%.
    assert_eq!(percent_complete(&unit), 33);

    let empty = Unit::new(2, "Vega", UnitCategory::Refit);
    assert_eq!(percent_complete(&empty), 0);
}
