use crate::pending::PendingEdit;
use crate::stage::StageEntry;
use crate::timeline::ViewWindow;
use crate::timeunit::{self, DateInterval};
use tracing::warn;

/// Floor on the rendered bar width so zero-length and heavily-clipped stages
/// stay clickable.
pub const MIN_WIDTH_PERCENT: f64 = 0.5;

/// Horizontal placement of a stage bar, as percentages of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePosition {
    pub left_percent: f64,
    pub width_percent: f64,
}

/// The interval a stage is drawn with: actual dates win, then a pending drag
/// override, then the planned dates. A missing end is synthesized from the
/// stage code's default duration. Returns `None` for an unscheduled stage.
pub fn effective_interval(
    stage: &StageEntry,
    pending: Option<&PendingEdit>,
) -> Option<DateInterval> {
    if let Some(start) = stage.actual_start {
        let end = stage
            .actual_end
            .unwrap_or_else(|| timeunit::add_days(start, stage.code.default_duration_days() - 1));
        return Some(DateInterval::new(start, end));
    }
    if let Some(edit) = pending {
        return Some(DateInterval::new(edit.new_start, edit.new_end));
    }
    let start = stage.planned_start?;
    let end = stage
        .planned_end
        .unwrap_or_else(|| timeunit::add_days(start, stage.code.default_duration_days() - 1));
    Some(DateInterval::new(start, end))
}

/// Map an interval into the window, clipping at both edges. `None` means the
/// interval lies entirely outside the window.
pub fn position(interval: DateInterval, window: &ViewWindow) -> Option<StagePosition> {
    let offset = timeunit::days_between(window.start, interval.start);
    let duration = interval.duration_days();
    let total = window.total_days;
    if offset + duration < 0 || offset > total {
        return None;
    }
    let visible_start = offset.max(0);
    let visible_end = (offset + duration).min(total);
    let left_percent = 100.0 * visible_start as f64 / total as f64;
    let mut width_percent = 100.0 * (visible_end - visible_start) as f64 / total as f64;
    if width_percent < MIN_WIDTH_PERCENT {
        width_percent = MIN_WIDTH_PERCENT;
    }
    Some(StagePosition {
        left_percent,
        width_percent,
    })
}

/// Resolve and place one stage. A corrupt interval (end before start, from a
/// record that bypassed validation) is logged and hidden rather than allowed
/// to break the whole board render.
pub fn stage_position(
    stage: &StageEntry,
    pending: Option<&PendingEdit>,
    window: &ViewWindow,
) -> Option<StagePosition> {
    let interval = effective_interval(stage, pending)?;
    if interval.end < interval.start {
        warn!(
            stage_id = stage.stage_id,
            start = %interval.start,
            end = %interval.end,
            "stage interval is inverted; hiding it from the board"
        );
        return None;
    }
    position(interval, window)
}
