use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A tentative interval edit produced by dragging, not yet written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdit {
    pub new_start: NaiveDate,
    pub new_end: NaiveDate,
}

/// Why a staged edit could not be written at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnitNotFound,
    StageNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnitNotFound => write!(f, "unit not found"),
            SkipReason::StageNotFound => write!(f, "stage not found"),
        }
    }
}

impl std::error::Error for SkipReason {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    Committed,
    Skipped(SkipReason),
}

/// Per-entry commit report. Skips never abort the remaining entries; the
/// caller inspects these and may re-surface skipped edits to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub unit_id: i32,
    pub stage_id: i32,
    pub result: CommitResult,
}

/// Staged interval edits keyed by (unit id, stage id). At most one edit per
/// key; re-dragging the same stage overwrites the earlier tentative edit.
#[derive(Debug, Clone, Default)]
pub struct PendingChangeSet {
    edits: BTreeMap<(i32, i32), PendingEdit>,
}

impl PendingChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the tentative edit for one stage (last write wins).
    pub fn stage_edit(&mut self, unit_id: i32, stage_id: i32, new_start: NaiveDate, new_end: NaiveDate) {
        self.edits.insert(
            (unit_id, stage_id),
            PendingEdit { new_start, new_end },
        );
    }

    pub fn get(&self, unit_id: i32, stage_id: i32) -> Option<&PendingEdit> {
        self.edits.get(&(unit_id, stage_id))
    }

    /// Drop a single staged edit. Returns whether one existed.
    pub fn discard(&mut self, unit_id: i32, stage_id: i32) -> bool {
        self.edits.remove(&(unit_id, stage_id)).is_some()
    }

    /// Drop every staged edit; persisted state is untouched.
    pub fn discard_all(&mut self) {
        self.edits.clear();
    }

    /// Number of distinct (unit, stage) keys with a staged edit. This drives
    /// the unsaved-changes indicator, so it counts keys, not gestures.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &PendingEdit)> + '_ {
        self.edits.iter().map(|(key, edit)| (*key, edit))
    }

    /// Write every staged edit through `write`, collecting a per-entry
    /// outcome, then clear the set. Entries are visited in key order so the
    /// outcome list is deterministic. A skip does not stop the iteration.
    pub fn commit_all<F>(&mut self, mut write: F) -> Vec<CommitOutcome>
    where
        F: FnMut(i32, i32, NaiveDate, NaiveDate) -> Result<(), SkipReason>,
    {
        let mut outcomes = Vec::with_capacity(self.edits.len());
        for (&(unit_id, stage_id), edit) in &self.edits {
            let result = match write(unit_id, stage_id, edit.new_start, edit.new_end) {
                Ok(()) => CommitResult::Committed,
                Err(reason) => CommitResult::Skipped(reason),
            };
            outcomes.push(CommitOutcome {
                unit_id,
                stage_id,
                result,
            });
        }
        self.edits.clear();
        outcomes
    }
}
