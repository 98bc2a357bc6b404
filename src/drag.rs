use crate::pending::PendingChangeSet;
use crate::timeline::ViewWindow;
use crate::timeunit::{self, DateInterval};
use std::fmt;

/// Which handle the planner grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        kind: DragKind,
        unit_id: i32,
        stage_id: i32,
        original: DateInterval,
        pointer_origin: f64,
        track_width_px: f64,
        total_days: i64,
        last_delta: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    NotPermitted,
    DragInProgress,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragError::NotPermitted => write!(f, "caller does not hold edit permission"),
            DragError::DragInProgress => write!(f, "a drag gesture is already in progress"),
        }
    }
}

impl std::error::Error for DragError {}

/// Owns one in-flight drag gesture and turns pointer movement into staged
/// whole-day interval edits. Releasing the pointer (`end`) keeps the staged
/// edit; discarding is a separate, explicit act on the pending set.
pub struct DragController {
    state: DragState,
    can_edit: bool,
}

impl DragController {
    pub fn new(can_edit: bool) -> Self {
        Self {
            state: DragState::Idle,
            can_edit,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// The (unit, stage) under the active gesture, if any.
    pub fn active_stage(&self) -> Option<(i32, i32)> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging {
                unit_id, stage_id, ..
            } => Some((*unit_id, *stage_id)),
        }
    }

    /// Start a gesture, capturing the stage's current effective interval and
    /// the pointer's starting x. Only one gesture may be in flight.
    pub fn begin(
        &mut self,
        kind: DragKind,
        unit_id: i32,
        stage_id: i32,
        original: DateInterval,
        pointer_x: f64,
        track_width_px: f64,
        window: &ViewWindow,
    ) -> Result<(), DragError> {
        if !self.can_edit {
            return Err(DragError::NotPermitted);
        }
        if self.is_dragging() {
            return Err(DragError::DragInProgress);
        }
        self.state = DragState::Dragging {
            kind,
            unit_id,
            stage_id,
            original,
            pointer_origin: pointer_x,
            track_width_px,
            total_days: window.total_days,
            last_delta: 0,
        };
        Ok(())
    }

    /// Apply a pointer move. Stages an edit only when the computed whole-day
    /// delta changed since the previous update, so a stream of pointer events
    /// within the same day column writes nothing new.
    pub fn update(&mut self, pointer_x: f64, pending: &mut PendingChangeSet) {
        let DragState::Dragging {
            kind,
            unit_id,
            stage_id,
            original,
            pointer_origin,
            track_width_px,
            total_days,
            last_delta,
        } = &mut self.state
        else {
            return;
        };

        let pixels_per_day = *track_width_px / *total_days as f64;
        if !pixels_per_day.is_finite() || pixels_per_day <= 0.0 {
            return;
        }
        let day_delta = ((pointer_x - *pointer_origin) / pixels_per_day).round() as i64;
        if day_delta == *last_delta {
            return;
        }
        *last_delta = day_delta;

        let adjusted = apply_delta(*kind, *original, day_delta);
        pending.stage_edit(*unit_id, *stage_id, adjusted.start, adjusted.end);
    }

    /// Finish the gesture. The staged edit survives; a pointer leaving the
    /// scheduling surface without a release event goes through here too.
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Shift or resize the original interval by whole days. Resizes clamp so the
/// result always keeps start strictly before end; dragging can never produce
/// an inverted interval.
fn apply_delta(kind: DragKind, original: DateInterval, day_delta: i64) -> DateInterval {
    match kind {
        DragKind::Move => DateInterval::new(
            timeunit::add_days(original.start, day_delta),
            timeunit::add_days(original.end, day_delta),
        ),
        DragKind::ResizeStart => {
            let mut start = timeunit::add_days(original.start, day_delta);
            if start >= original.end {
                start = timeunit::add_days(original.end, -1);
            }
            DateInterval::new(start, original.end)
        }
        DragKind::ResizeEnd => {
            let mut end = timeunit::add_days(original.end, day_delta);
            if end <= original.start {
                end = timeunit::add_days(original.start, 1);
            }
            DateInterval::new(original.start, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn apply_delta_moves_both_ends() {
        let original = DateInterval::new(d(2024, 2, 10), d(2024, 2, 20));
        let moved = apply_delta(DragKind::Move, original, 5);
        assert_eq!(moved.start, d(2024, 2, 15));
        assert_eq!(moved.end, d(2024, 2, 25));
    }

    #[test]
    fn resize_start_clamps_before_end() {
        let original = DateInterval::new(d(2024, 2, 10), d(2024, 2, 12));
        let resized = apply_delta(DragKind::ResizeStart, original, 10);
        assert_eq!(resized.start, d(2024, 2, 11));
        assert_eq!(resized.end, d(2024, 2, 12));
    }

    #[test]
    fn resize_end_clamps_after_start() {
        let original = DateInterval::new(d(2024, 2, 10), d(2024, 2, 12));
        let resized = apply_delta(DragKind::ResizeEnd, original, -20);
        assert_eq!(resized.start, d(2024, 2, 10));
        assert_eq!(resized.end, d(2024, 2, 11));
    }
}
