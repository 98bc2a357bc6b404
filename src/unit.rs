use crate::stage::{NewBuildStage, ServiceStage, StageEntry};
use serde::{Deserialize, Serialize};

/// What kind of work a unit is in the yard for. The category decides which
/// stage vocabulary its timeline draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    NewBuild,
    Maintenance,
    Refit,
}

impl UnitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::NewBuild => "new_build",
            UnitCategory::Maintenance => "maintenance",
            UnitCategory::Refit => "refit",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input {
            "new_build" => Some(UnitCategory::NewBuild),
            "maintenance" => Some(UnitCategory::Maintenance),
            "refit" => Some(UnitCategory::Refit),
            _ => None,
        }
    }

    /// Fixed size of this category's stage vocabulary. Maintenance and refit
    /// units share the service vocabulary.
    pub fn stage_vocabulary_len(&self) -> usize {
        match self {
            UnitCategory::NewBuild => NewBuildStage::ALL.len(),
            UnitCategory::Maintenance | UnitCategory::Refit => ServiceStage::ALL.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Planned,
    Active,
    OnHold,
    Delivered,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Planned => "planned",
            UnitStatus::Active => "active",
            UnitStatus::OnHold => "on_hold",
            UnitStatus::Delivered => "delivered",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input {
            "planned" => Some(UnitStatus::Planned),
            "active" => Some(UnitStatus::Active),
            "on_hold" => Some(UnitStatus::OnHold),
            "delivered" => Some(UnitStatus::Delivered),
            _ => None,
        }
    }
}

/// Unit identity and status without its timeline. The registry owns one of
/// these per unit; stages live in the stage store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMeta {
    pub id: i32,
    pub name: String,
    pub category: UnitCategory,
    pub status: UnitStatus,
}

impl UnitMeta {
    pub fn new(id: i32, name: impl Into<String>, category: UnitCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            status: UnitStatus::Planned,
        }
    }
}

/// A vessel under production, maintenance, or refit, with its stage timeline
/// embedded. This is the read model handed to the board UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i32,
    pub name: String,
    pub category: UnitCategory,
    pub status: UnitStatus,
    pub stages: Vec<StageEntry>,
}

impl Unit {
    pub fn new(id: i32, name: impl Into<String>, category: UnitCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            status: UnitStatus::Planned,
            stages: Vec::new(),
        }
    }

    pub fn from_parts(meta: UnitMeta, stages: Vec<StageEntry>) -> Self {
        Self {
            id: meta.id,
            name: meta.name,
            category: meta.category,
            status: meta.status,
            stages,
        }
    }

    pub fn meta(&self) -> UnitMeta {
        UnitMeta {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            status: self.status,
        }
    }

    pub fn find_stage(&self, stage_id: i32) -> Option<&StageEntry> {
        self.stages.iter().find(|stage| stage.stage_id == stage_id)
    }
}
