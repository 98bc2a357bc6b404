use crate::stage::StageStatus;
use crate::unit::Unit;

/// Completion percentage against the fixed stage vocabulary of the unit's
/// category, not the stages currently present. A unit with no timeline yet
/// reads 0%, never a divide-by-zero.
pub fn percent_complete(unit: &Unit) -> u8 {
    let total = unit.category.stage_vocabulary_len().max(1);
    let completed = unit
        .stages
        .iter()
        .filter(|stage| stage.status == StageStatus::Completed)
        .count();
    (100.0 * completed as f64 / total as f64).round() as u8
}
