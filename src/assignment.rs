use crate::stage::{StageCode, StageStatus};
use crate::unit::Unit;
use crate::worker::Worker;
use std::fmt;

/// Worker ids split by whether they hold the skill for a stage code. Lacking
/// the skill is advisory; assignment is still permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPartition {
    pub qualified: Vec<i32>,
    pub lacking: Vec<i32>,
}

pub fn partition_by_skill(code: StageCode, roster: &[Worker]) -> SkillPartition {
    let mut partition = SkillPartition::default();
    for worker in roster {
        if worker.has_skill(code) {
            partition.qualified.push(worker.id);
        } else {
            partition.lacking.push(worker.id);
        }
    }
    partition
}

/// Count of non-completed stages across all units where the worker is
/// assigned.
pub fn workload(worker_id: i32, units: &[Unit]) -> usize {
    units
        .iter()
        .flat_map(|unit| unit.stages.iter())
        .filter(|stage| {
            stage.status != StageStatus::Completed
                && stage.assigned_workers.contains(&worker_id)
        })
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentWarning {
    LacksSkill { worker_id: i32 },
    UnknownWorker { worker_id: i32 },
}

impl fmt::Display for AssignmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentWarning::LacksSkill { worker_id } => {
                write!(f, "worker {worker_id} lacks the skill for this stage")
            }
            AssignmentWarning::UnknownWorker { worker_id } => {
                write!(f, "worker {worker_id} is not on the roster")
            }
        }
    }
}

/// Advisory findings for a proposed assignment set. Warnings annotate the
/// dialog; they never block the assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentReview {
    pub warnings: Vec<AssignmentWarning>,
}

impl AssignmentReview {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub fn review_assignment(
    code: StageCode,
    worker_ids: &[i32],
    roster: &[Worker],
) -> AssignmentReview {
    let mut review = AssignmentReview::default();
    for worker_id in worker_ids {
        match roster.iter().find(|worker| worker.id == *worker_id) {
            None => review.warnings.push(AssignmentWarning::UnknownWorker {
                worker_id: *worker_id,
            }),
            Some(worker) if !worker.has_skill(code) => {
                review.warnings.push(AssignmentWarning::LacksSkill {
                    worker_id: *worker_id,
                });
            }
            Some(_) => {}
        }
    }
    review
}
