use crate::stage::StageCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerAvailability {
    Available,
    Busy,
    Unavailable,
}

impl WorkerAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerAvailability::Available => "available",
            WorkerAvailability::Busy => "busy",
            WorkerAvailability::Unavailable => "unavailable",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input {
            "available" => Some(WorkerAvailability::Available),
            "busy" => Some(WorkerAvailability::Busy),
            "unavailable" => Some(WorkerAvailability::Unavailable),
            _ => None,
        }
    }
}

/// A roster entry. The scheduling engine reads workers; it never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i32,
    pub name: String,
    /// Stage codes this worker is qualified for.
    pub skills: Vec<StageCode>,
    pub availability: WorkerAvailability,
}

impl Worker {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            skills: Vec::new(),
            availability: WorkerAvailability::Available,
        }
    }

    pub fn has_skill(&self, code: StageCode) -> bool {
        self.skills.contains(&code)
    }
}
