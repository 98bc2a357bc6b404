use crate::stage::StageEntry;
use crate::unit::UnitCategory;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct StageValidationError {
    message: String,
}

impl StageValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StageValidationError {}

pub fn validate_stage(
    category: UnitCategory,
    stage: &StageEntry,
) -> Result<(), StageValidationError> {
    if !stage.code.applies_to(category) {
        return Err(StageValidationError::new(format!(
            "stage {} code '{}' does not belong to the {} vocabulary",
            stage.stage_id,
            stage.code.as_str(),
            category.as_str()
        )));
    }

    if let (Some(start), Some(end)) = (stage.planned_start, stage.planned_end) {
        if start > end {
            return Err(StageValidationError::new(format!(
                "stage {} planned interval is inverted ({start} > {end})",
                stage.stage_id
            )));
        }
    }

    if let (Some(start), Some(end)) = (stage.actual_start, stage.actual_end) {
        if start > end {
            return Err(StageValidationError::new(format!(
                "stage {} actual interval is inverted ({start} > {end})",
                stage.stage_id
            )));
        }
    }

    let mut seen_workers = HashSet::with_capacity(stage.assigned_workers.len());
    for worker_id in &stage.assigned_workers {
        if !seen_workers.insert(*worker_id) {
            return Err(StageValidationError::new(format!(
                "stage {} assigns worker {} more than once",
                stage.stage_id, worker_id
            )));
        }
    }

    Ok(())
}

pub fn validate_timeline(
    category: UnitCategory,
    stages: &[StageEntry],
) -> Result<(), StageValidationError> {
    let mut seen_ids = HashSet::with_capacity(stages.len());
    let mut seen_codes = HashSet::with_capacity(stages.len());
    for stage in stages {
        if !seen_ids.insert(stage.stage_id) {
            return Err(StageValidationError::new(format!(
                "duplicate stage id {}",
                stage.stage_id
            )));
        }
        if !seen_codes.insert(stage.code) {
            return Err(StageValidationError::new(format!(
                "duplicate stage code '{}'",
                stage.code.as_str()
            )));
        }
        validate_stage(category, stage)?;
    }
    Ok(())
}
