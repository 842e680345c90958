// File: ./src/model/recurrence.rs
//! Recurrence specs (`rec:2d`, `rec:+1m`) and date deferral.
//!
//! A plain spec like `2d` schedules the next occurrence relative to the day
//! the task was completed. A `+` spec like `+2d` schedules it relative to the
//! date the field already carried, so a task that is completed late does not
//! drift.
use crate::model::dates::{Interval, add_interval, format_date, parse_date};
use crate::model::item::Task;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub amount: u32,
    pub unit: Interval,
    /// Set by the leading `+`: defer from the field's own date.
    pub from_original: bool,
}

impl Recurrence {
    pub fn parse(spec: &str) -> Option<Self> {
        let (from_original, body) = match spec.strip_prefix('+') {
            Some(body) => (true, body),
            None => (false, spec),
        };
        let unit_char = body.chars().last()?;
        let unit = Interval::from_char(unit_char)?;
        let digits = &body[..body.len() - unit_char.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            amount: digits.parse().ok()?,
            unit,
            from_original,
        })
    }

    pub fn apply(&self, base: NaiveDate) -> Option<NaiveDate> {
        add_interval(base, self.amount, self.unit)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from_original {
            f.write_str("+")?;
        }
        write!(f, "{}{}", self.amount, self.unit.as_char())
    }
}

/// What a deferral does to a date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferral {
    Set(String),
    Clear,
    Unchanged,
}

/// Computes the new value of a date field.
///
/// `spec` is either an absolute date (used as is), an empty string (clears
/// the field) or a relative spec added to `defer_from`, falling back to the
/// field's `current` value. Anything unusable leaves the field unchanged.
pub fn defer(current: Option<&str>, spec: &str, defer_from: Option<NaiveDate>) -> Deferral {
    if let Some(date) = parse_date(spec) {
        return Deferral::Set(format_date(date));
    }
    if spec.is_empty() {
        return Deferral::Clear;
    }
    let Some(recurrence) = Recurrence::parse(spec) else {
        log::debug!("ignoring unusable defer spec {:?}", spec);
        return Deferral::Unchanged;
    };
    let base = defer_from.or_else(|| current.and_then(parse_date));
    match base.and_then(|b| recurrence.apply(b)) {
        Some(next) => Deferral::Set(format_date(next)),
        None => Deferral::Unchanged,
    }
}

pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Builds the follow-on task for `task`, which is the state of the task
    /// just before it was completed on `completed_on`. Returns `None` when the
    /// task does not recur.
    pub fn next_occurrence(task: &Task, completed_on: NaiveDate) -> Option<Task> {
        let recurrence = task.recurrence()?;
        let spec = recurrence.to_string();
        let defer_from = (!recurrence.from_original).then_some(completed_on);

        let mut next = Task::new(&task.text_without_completion_info());
        let has_due = next.due_date().is_some();
        let has_threshold = next.threshold_date().is_some();
        if !has_due && !has_threshold {
            // Nothing to move yet; anchor a due date on the completion day.
            next.defer_due_date(&spec, Some(completed_on));
        }
        if has_due {
            next.defer_due_date(&spec, defer_from);
        }
        if has_threshold {
            next.defer_threshold_date(&spec, defer_from);
        }
        if task.create_date().is_some()
            && let Err(e) = next.set_create_date(Some(completed_on))
        {
            log::warn!("follow-on task keeps its old creation date: {}", e);
        }

        log::debug!(
            "recurring task {:?} spawned {:?} (rec:{})",
            task.text(),
            next.text(),
            recurrence
        );
        Some(next)
    }
}
