use crate::unit::UnitCategory;
use chrono::{Duration, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Production stages for a new hull, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewBuildStage {
    HullLamination,
    DeckAssembly,
    EngineInstallation,
    ElectricalFitOut,
    InteriorFitOut,
    Painting,
    SeaTrials,
    Delivery,
}

impl NewBuildStage {
    pub const ALL: [NewBuildStage; 8] = [
        NewBuildStage::HullLamination,
        NewBuildStage::DeckAssembly,
        NewBuildStage::EngineInstallation,
        NewBuildStage::ElectricalFitOut,
        NewBuildStage::InteriorFitOut,
        NewBuildStage::Painting,
        NewBuildStage::SeaTrials,
        NewBuildStage::Delivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewBuildStage::HullLamination => "hull_lamination",
            NewBuildStage::DeckAssembly => "deck_assembly",
            NewBuildStage::EngineInstallation => "engine_installation",
            NewBuildStage::ElectricalFitOut => "electrical_fit_out",
            NewBuildStage::InteriorFitOut => "interior_fit_out",
            NewBuildStage::Painting => "painting",
            NewBuildStage::SeaTrials => "sea_trials",
            NewBuildStage::Delivery => "delivery",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.as_str() == input)
    }

    pub fn default_duration_days(&self) -> i64 {
        match self {
            NewBuildStage::HullLamination => 45,
            NewBuildStage::DeckAssembly => 30,
            NewBuildStage::EngineInstallation => 21,
            NewBuildStage::ElectricalFitOut => 21,
            NewBuildStage::InteriorFitOut => 30,
            NewBuildStage::Painting => 14,
            NewBuildStage::SeaTrials => 7,
            NewBuildStage::Delivery => 1,
        }
    }
}

/// Yard service stages, shared by maintenance and refit units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStage {
    HaulOut,
    Inspection,
    Servicing,
    Repairs,
    Antifouling,
    Relaunch,
}

impl ServiceStage {
    pub const ALL: [ServiceStage; 6] = [
        ServiceStage::HaulOut,
        ServiceStage::Inspection,
        ServiceStage::Servicing,
        ServiceStage::Repairs,
        ServiceStage::Antifouling,
        ServiceStage::Relaunch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStage::HaulOut => "haul_out",
            ServiceStage::Inspection => "inspection",
            ServiceStage::Servicing => "servicing",
            ServiceStage::Repairs => "repairs",
            ServiceStage::Antifouling => "antifouling",
            ServiceStage::Relaunch => "relaunch",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stage| stage.as_str() == input)
    }

    pub fn default_duration_days(&self) -> i64 {
        match self {
            ServiceStage::HaulOut => 1,
            ServiceStage::Inspection => 3,
            ServiceStage::Servicing => 7,
            ServiceStage::Repairs => 14,
            ServiceStage::Antifouling => 5,
            ServiceStage::Relaunch => 1,
        }
    }
}

/// A stage code scoped to its vocabulary. The two vocabularies are disjoint,
/// so a code can never be attached to a unit of the wrong category without
/// failing validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageCode {
    NewBuild(NewBuildStage),
    Service(ServiceStage),
}

impl StageCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageCode::NewBuild(stage) => stage.as_str(),
            StageCode::Service(stage) => stage.as_str(),
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        NewBuildStage::from_str(input)
            .map(StageCode::NewBuild)
            .or_else(|| ServiceStage::from_str(input).map(StageCode::Service))
    }

    /// Whether this code belongs to the vocabulary of the given unit category.
    pub fn applies_to(&self, category: UnitCategory) -> bool {
        match self {
            StageCode::NewBuild(_) => category == UnitCategory::NewBuild,
            StageCode::Service(_) => {
                matches!(category, UnitCategory::Maintenance | UnitCategory::Refit)
            }
        }
    }

    /// Fallback span used to draw a stage whose end date has not been set yet.
    pub fn default_duration_days(&self) -> i64 {
        match self {
            StageCode::NewBuild(stage) => stage.default_duration_days(),
            StageCode::Service(stage) => stage.default_duration_days(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::InProgress => "in_progress",
            StageStatus::Completed => "completed",
            StageStatus::Delayed => "delayed",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input {
            "pending" => Some(StageStatus::Pending),
            "in_progress" => Some(StageStatus::InProgress),
            "completed" => Some(StageStatus::Completed),
            "delayed" => Some(StageStatus::Delayed),
            _ => None,
        }
    }
}

/// One phase of a unit's workflow. The scheduling engine edits the planned
/// interval and the assignment set; it never creates or removes entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEntry {
    pub stage_id: i32,
    pub code: StageCode,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub status: StageStatus,
    pub assigned_workers: Vec<i32>,
}

impl StageEntry {
    pub fn new(stage_id: i32, code: StageCode) -> Self {
        Self {
            stage_id,
            code,
            planned_start: None,
            planned_end: None,
            actual_start: None,
            actual_end: None,
            status: StageStatus::Pending,
            assigned_workers: Vec::new(),
        }
    }

    pub fn to_dataframe_row(&self, unit_id: i32) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(9);

        let unit_data: [i32; 1] = [unit_id];
        columns.push(Series::new(PlSmallStr::from_static("unit_id"), unit_data).into_column());

        let stage_data: [i32; 1] = [self.stage_id];
        columns.push(Series::new(PlSmallStr::from_static("stage_id"), stage_data).into_column());

        let code_data: [&str; 1] = [self.code.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("code"), code_data).into_column());

        let status_data: [&str; 1] = [self.status.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("status"), status_data).into_column());

        columns.push(Self::series_from_date("planned_start", self.planned_start)?.into_column());
        columns.push(Self::series_from_date("planned_end", self.planned_end)?.into_column());
        columns.push(Self::series_from_date("actual_start", self.actual_start)?.into_column());
        columns.push(Self::series_from_date("actual_end", self.actual_end)?.into_column());

        columns.push(
            Self::series_from_i32_list("assigned_workers", &self.assigned_workers).into_column(),
        );

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let stage_id = df
            .column("stage_id")?
            .i32()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("stage row missing stage_id".into()))?;

        let code_str = df.column("code")?.str()?.get(row_idx).unwrap_or("");
        let code = StageCode::from_str(code_str).ok_or_else(|| {
            PolarsError::ComputeError(
                format!("stage {stage_id} has unknown code '{code_str}'").into(),
            )
        })?;

        let status_str = df.column("status")?.str()?.get(row_idx).unwrap_or("");
        let status = StageStatus::from_str(status_str).ok_or_else(|| {
            PolarsError::ComputeError(
                format!("stage {stage_id} has unknown status '{status_str}'").into(),
            )
        })?;

        let assigned_workers =
            Self::vec_from_i32_list(df.column("assigned_workers")?.list()?, row_idx)?;

        Ok(Self {
            stage_id,
            code,
            planned_start: Self::date_from_series(df.column("planned_start")?.date()?, row_idx),
            planned_end: Self::date_from_series(df.column("planned_end")?.date()?, row_idx),
            actual_start: Self::date_from_series(df.column("actual_start")?.date()?, row_idx),
            actual_end: Self::date_from_series(df.column("actual_end")?.date()?, row_idx),
            status,
            assigned_workers,
        })
    }

    fn series_from_i32_list(name: &str, values: &[i32]) -> Series {
        let inner = Series::new(PlSmallStr::from_static(""), values.to_vec());
        Series::new(name.into(), &[inner])
    }

    fn series_from_date(name: &str, date: Option<NaiveDate>) -> PolarsResult<Series> {
        let data: [Option<i32>; 1] = [date.map(Self::date_to_i32)];
        Series::new(name.into(), data).cast(&DataType::Date)
    }

    fn date_from_series(chunked: &DateChunked, row_idx: usize) -> Option<NaiveDate> {
        chunked.get(row_idx).map(Self::date_from_i32)
    }

    fn vec_from_i32_list(list: &ListChunked, row_idx: usize) -> PolarsResult<Vec<i32>> {
        if let Some(series) = list.get_as_series(row_idx) {
            Ok(series.i32()?.into_iter().flatten().collect::<Vec<_>>())
        } else {
            Ok(Vec::new())
        }
    }

    fn date_to_i32(date: NaiveDate) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        (date - epoch).num_days() as i32
    }

    fn date_from_i32(days: i32) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        epoch + Duration::days(days as i64)
    }
}
