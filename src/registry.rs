use crate::pending::{CommitOutcome, CommitResult, PendingChangeSet, SkipReason};
use crate::stage::StageEntry;
use crate::stage_validation::{self, StageValidationError};
use crate::unit::{Unit, UnitMeta};
use crate::worker::Worker;
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::warn;

pub type SubscriptionId = u64;

/// Change notifications delivered synchronously to this session's
/// subscribers. There is no cross-session propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    UnitChanged { unit_id: i32 },
    TimelineReplaced { unit_id: i32 },
    TimelineCommitted { committed: usize, skipped: usize },
    AssignmentChanged { unit_id: i32, stage_id: i32 },
}

type Listener = Box<dyn FnMut(&BoardEvent)>;

/// Owns the unit metadata, the stage store, and the worker roster for one
/// planning board. The scheduling engine talks to this object only; there is
/// no ambient shared state.
pub struct UnitRegistry {
    units: Vec<UnitMeta>,
    stages: DataFrame,
    workers: Vec<Worker>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let schema = Self::default_schema();
        Self {
            units: Vec::new(),
            stages: DataFrame::empty_with_schema(&schema),
            workers: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Build a registry from fully-populated units plus a roster.
    pub fn from_board(units: Vec<Unit>, workers: Vec<Worker>) -> PolarsResult<Self> {
        let mut registry = Self::new();
        registry.set_workers(workers);
        for unit in units {
            let meta = unit.meta();
            let stages = unit.stages;
            registry.upsert_unit(meta);
            registry.update_unit_timeline(unit.id, stages)?;
        }
        Ok(registry)
    }

    fn default_schema() -> Schema {
        let schema = Schema::from_iter(vec![
            Field::new("unit_id".into(), DataType::Int32),
            Field::new("stage_id".into(), DataType::Int32),
            Field::new("code".into(), DataType::String),
            Field::new("status".into(), DataType::String),
            Field::new("planned_start".into(), DataType::Date),
            Field::new("planned_end".into(), DataType::Date),
            Field::new("actual_start".into(), DataType::Date),
            Field::new("actual_end".into(), DataType::Date),
            Field::new(
                "assigned_workers".into(),
                DataType::List(Box::new(DataType::Int32)),
            ),
        ]);
        schema
    }

    fn validation_error(err: StageValidationError) -> PolarsError {
        PolarsError::ComputeError(err.to_string().into())
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.stages
    }

    pub fn upsert_unit(&mut self, meta: UnitMeta) {
        let unit_id = meta.id;
        match self.units.iter_mut().find(|unit| unit.id == meta.id) {
            Some(existing) => *existing = meta,
            None => self.units.push(meta),
        }
        self.notify(&BoardEvent::UnitChanged { unit_id });
    }

    /// Remove a unit and its stage rows. Returns false when the id is unknown.
    pub fn delete_unit(&mut self, unit_id: i32) -> PolarsResult<bool> {
        let before = self.units.len();
        self.units.retain(|unit| unit.id != unit_id);
        if self.units.len() == before {
            return Ok(false);
        }
        self.remove_unit_rows(unit_id)?;
        self.notify(&BoardEvent::UnitChanged { unit_id });
        Ok(true)
    }

    fn remove_unit_rows(&mut self, unit_id: i32) -> PolarsResult<()> {
        let snapshot = self.stages.clone();
        let mut rebuilt = DataFrame::empty_with_schema(&Self::default_schema());
        let owners = snapshot.column("unit_id")?.i32()?;
        for (idx, owner) in owners.into_iter().enumerate() {
            let Some(owner) = owner else { continue };
            if owner == unit_id {
                continue;
            }
            let stage = StageEntry::from_dataframe_row(&snapshot, idx)?;
            rebuilt = rebuilt.vstack(&stage.to_dataframe_row(owner)?)?;
        }
        self.stages = rebuilt;
        Ok(())
    }

    pub fn find_meta(&self, unit_id: i32) -> Option<&UnitMeta> {
        self.units.iter().find(|unit| unit.id == unit_id)
    }

    /// All units with their stage timelines embedded, ordered as registered;
    /// stages ordered by stage id. A row the codec cannot read is logged and
    /// skipped so one bad record never blanks the whole board.
    pub fn list_units(&self) -> PolarsResult<Vec<Unit>> {
        let mut by_unit: HashMap<i32, Vec<StageEntry>> = HashMap::new();
        let owners = self.stages.column("unit_id")?.i32()?;
        for (idx, owner) in owners.into_iter().enumerate() {
            if let Some(owner) = owner {
                match StageEntry::from_dataframe_row(&self.stages, idx) {
                    Ok(stage) => by_unit.entry(owner).or_default().push(stage),
                    Err(err) => {
                        warn!(unit_id = owner, row = idx, %err, "skipping unreadable stage row");
                    }
                }
            }
        }
        let mut units = Vec::with_capacity(self.units.len());
        for meta in &self.units {
            let mut stages = by_unit.remove(&meta.id).unwrap_or_default();
            stages.sort_by_key(|stage| stage.stage_id);
            units.push(Unit::from_parts(meta.clone(), stages));
        }
        Ok(units)
    }

    pub fn find_unit(&self, unit_id: i32) -> PolarsResult<Option<Unit>> {
        let Some(meta) = self.find_meta(unit_id) else {
            return Ok(None);
        };
        let mut stages = Vec::new();
        let owners = self.stages.column("unit_id")?.i32()?;
        for (idx, owner) in owners.into_iter().enumerate() {
            if owner == Some(unit_id) {
                match StageEntry::from_dataframe_row(&self.stages, idx) {
                    Ok(stage) => stages.push(stage),
                    Err(err) => {
                        warn!(unit_id, row = idx, %err, "skipping unreadable stage row");
                    }
                }
            }
        }
        stages.sort_by_key(|stage| stage.stage_id);
        Ok(Some(Unit::from_parts(meta.clone(), stages)))
    }

    pub fn find_stage(&self, unit_id: i32, stage_id: i32) -> PolarsResult<Option<StageEntry>> {
        let owners = self.stages.column("unit_id")?.i32()?;
        let stage_ids = self.stages.column("stage_id")?.i32()?;
        for (idx, (owner, stage)) in owners.into_iter().zip(stage_ids.into_iter()).enumerate() {
            if owner == Some(unit_id) && stage == Some(stage_id) {
                return Ok(Some(StageEntry::from_dataframe_row(&self.stages, idx)?));
            }
        }
        Ok(None)
    }

    /// Replace a unit's whole stage list. The new timeline is validated
    /// against the unit's category vocabulary before any row changes.
    pub fn update_unit_timeline(
        &mut self,
        unit_id: i32,
        stages: Vec<StageEntry>,
    ) -> PolarsResult<()> {
        let category = self
            .find_meta(unit_id)
            .map(|meta| meta.category)
            .ok_or_else(|| {
                PolarsError::ComputeError(format!("unit {unit_id} not found").into())
            })?;
        stage_validation::validate_timeline(category, &stages).map_err(Self::validation_error)?;

        self.remove_unit_rows(unit_id)?;
        let mut ordered = stages;
        ordered.sort_by_key(|stage| stage.stage_id);
        for mut stage in ordered {
            stage.assigned_workers.sort_unstable();
            stage.assigned_workers.dedup();
            let row = stage.to_dataframe_row(unit_id)?;
            self.stages = self.stages.vstack(&row)?;
        }
        self.notify(&BoardEvent::TimelineReplaced { unit_id });
        Ok(())
    }

    /// Write every staged edit into the store. Planned dates only; actual
    /// dates are never touched by dragging. Entries whose unit or stage
    /// disappeared between staging and commit are skipped, logged, and
    /// reported; the rest still apply.
    pub fn commit_pending(
        &mut self,
        pending: &mut PendingChangeSet,
    ) -> PolarsResult<Vec<CommitOutcome>> {
        let stage_keys = self.stage_keys()?;
        let unit_ids: HashSet<i32> = self.units.iter().map(|meta| meta.id).collect();

        let mut writes: Vec<(i32, i32, NaiveDate, NaiveDate)> = Vec::new();
        let outcomes = pending.commit_all(|unit_id, stage_id, new_start, new_end| {
            if !unit_ids.contains(&unit_id) {
                return Err(SkipReason::UnitNotFound);
            }
            if !stage_keys.contains(&(unit_id, stage_id)) {
                return Err(SkipReason::StageNotFound);
            }
            writes.push((unit_id, stage_id, new_start, new_end));
            Ok(())
        });

        for (unit_id, stage_id, new_start, new_end) in writes {
            self.update_planned_interval(unit_id, stage_id, new_start, new_end)?;
        }

        let mut committed = 0usize;
        let mut skipped = 0usize;
        for outcome in &outcomes {
            match outcome.result {
                CommitResult::Committed => committed += 1,
                CommitResult::Skipped(reason) => {
                    skipped += 1;
                    warn!(
                        unit_id = outcome.unit_id,
                        stage_id = outcome.stage_id,
                        %reason,
                        "staged edit skipped at commit"
                    );
                }
            }
        }
        self.notify(&BoardEvent::TimelineCommitted { committed, skipped });
        Ok(outcomes)
    }

    fn stage_keys(&self) -> PolarsResult<HashSet<(i32, i32)>> {
        let owners = self.stages.column("unit_id")?.i32()?;
        let stage_ids = self.stages.column("stage_id")?.i32()?;
        let mut keys = HashSet::with_capacity(self.stages.height());
        for (owner, stage) in owners.into_iter().zip(stage_ids.into_iter()) {
            if let (Some(owner), Some(stage)) = (owner, stage) {
                keys.insert((owner, stage));
            }
        }
        Ok(keys)
    }

    fn update_planned_interval(
        &mut self,
        unit_id: i32,
        stage_id: i32,
        new_start: NaiveDate,
        new_end: NaiveDate,
    ) -> PolarsResult<()> {
        let matches_row = col("unit_id")
            .eq(lit(unit_id))
            .and(col("stage_id").eq(lit(stage_id)));
        self.stages = self
            .stages
            .clone()
            .lazy()
            .with_column(
                when(matches_row.clone())
                    .then(lit(new_start).cast(DataType::Date))
                    .otherwise(col("planned_start").cast(DataType::Date))
                    .alias("planned_start"),
            )
            .with_column(
                when(matches_row)
                    .then(lit(new_end).cast(DataType::Date))
                    .otherwise(col("planned_end").cast(DataType::Date))
                    .alias("planned_end"),
            )
            .collect()?;
        Ok(())
    }

    /// Replace a stage's full assignment set in one write. Ids are sorted and
    /// deduplicated; there is no incremental add/remove path to race with.
    pub fn set_assigned_workers(
        &mut self,
        unit_id: i32,
        stage_id: i32,
        worker_ids: Vec<i32>,
    ) -> PolarsResult<()> {
        if self.find_meta(unit_id).is_none() {
            return Err(PolarsError::ComputeError(
                format!("unit {unit_id} not found").into(),
            ));
        }

        let mut replacement_ids = worker_ids;
        replacement_ids.sort_unstable();
        replacement_ids.dedup();

        let owner_col = self.stages.column("unit_id")?;
        let stage_col = self.stages.column("stage_id")?;
        let target_col = self.stages.column("assigned_workers")?;

        let mut found = false;
        let replacement = Series::new(PlSmallStr::from_static(""), replacement_ids);
        let new_series = target_col
            .list()?
            .into_iter()
            .zip(owner_col.i32()?.into_iter().zip(stage_col.i32()?.into_iter()))
            .map(|(val, (owner, stage))| {
                if owner == Some(unit_id) && stage == Some(stage_id) {
                    found = true;
                    Some(replacement.clone())
                } else {
                    val
                }
            })
            .collect::<ListChunked>()
            .into_series()
            .with_name("assigned_workers".into());

        if !found {
            return Err(PolarsError::ComputeError(
                format!("stage {stage_id} not found on unit {unit_id}").into(),
            ));
        }
        self.stages.replace("assigned_workers", new_series)?;
        self.notify(&BoardEvent::AssignmentChanged { unit_id, stage_id });
        Ok(())
    }

    pub fn set_workers(&mut self, workers: Vec<Worker>) {
        self.workers = workers;
    }

    pub fn list_workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn find_worker(&self, worker_id: i32) -> Option<&Worker> {
        self.workers.iter().find(|worker| worker.id == worker_id)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&BoardEvent) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: &BoardEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_contains_expected_columns() {
        let schema = UnitRegistry::default_schema();
        let expected = vec![
            "unit_id",
            "stage_id",
            "code",
            "status",
            "planned_start",
            "planned_end",
            "actual_start",
            "actual_end",
            "assigned_workers",
        ];
        for name in expected {
            assert!(schema.contains(name.into()), "missing column {name}");
        }
    }
}
