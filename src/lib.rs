pub mod assignment;
pub mod drag;
pub mod pending;
pub mod position;
pub mod progress;
pub mod registry;
pub mod stage;
pub(crate) mod stage_validation;
pub mod timeline;
pub mod timeunit;
pub mod unit;
pub mod worker;

pub use assignment::{
    AssignmentReview, AssignmentWarning, SkillPartition, partition_by_skill, review_assignment,
    workload,
};
pub use drag::{DragController, DragError, DragKind};
pub use pending::{CommitOutcome, CommitResult, PendingChangeSet, PendingEdit, SkipReason};
pub use position::{MIN_WIDTH_PERCENT, StagePosition, effective_interval, position, stage_position};
pub use progress::percent_complete;
pub use registry::{BoardEvent, SubscriptionId, UnitRegistry};
pub use stage::{NewBuildStage, ServiceStage, StageCode, StageEntry, StageStatus};
pub use timeline::{DayColumn, TimelineRange, ViewGranularity, ViewWindow, shift_anchor, window_for};
pub use timeunit::{DateInterval, InvalidDate, add_days, days_between, parse_iso_date, to_iso_date};
pub use unit::{Unit, UnitCategory, UnitMeta, UnitStatus};
pub use worker::{Worker, WorkerAvailability};
