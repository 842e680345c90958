// File: ./src/filter.rs
// Narrowing a task list down to what should be shown.
use crate::model::{Priority, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stands for "has no list" / "has no tag" in `lists` and `tags`.
pub const NONE_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilter {
    #[serde(default)]
    pub priorities: Vec<Priority>,
    #[serde(default)]
    pub priorities_not: bool,
    #[serde(default)]
    pub lists: Vec<String>,
    #[serde(default)]
    pub lists_not: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tags_not: bool,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hide_completed: bool,
    /// Hide tasks whose threshold date is after today.
    #[serde(default)]
    pub hide_future: bool,
    #[serde(default = "default_true")]
    pub hide_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ActiveFilter {
    fn default() -> Self {
        Self {
            priorities: Vec::new(),
            priorities_not: false,
            lists: Vec::new(),
            lists_not: false,
            tags: Vec::new(),
            tags_not: false,
            search: String::new(),
            hide_completed: false,
            hide_future: false,
            hide_hidden: true,
        }
    }
}

impl ActiveFilter {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if task.text().trim().is_empty() {
            return false;
        }
        if self.hide_completed && task.is_completed() {
            return false;
        }
        if self.hide_future && task.in_future(today) {
            return false;
        }
        if self.hide_hidden && !task.is_visible() {
            return false;
        }

        if !self.priorities.is_empty()
            && self.priorities.contains(&task.priority()) == self.priorities_not
        {
            return false;
        }
        if !self.lists.is_empty() && names_match(&self.lists, &task.lists()) == self.lists_not {
            return false;
        }
        if !self.tags.is_empty() && names_match(&self.tags, &task.tags()) == self.tags_not {
            return false;
        }

        self.search.is_empty() || fuzzy_contains(&task.text(), &self.search)
    }

    /// Indices of the matching tasks, in file order.
    pub fn apply(&self, tasks: &[Task], today: NaiveDate) -> Vec<usize> {
        let matched: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches(t, today))
            .map(|(i, _)| i)
            .collect();
        log::debug!("filter kept {} of {} tasks", matched.len(), tasks.len());
        matched
    }
}

fn names_match(wanted: &[String], present: &BTreeSet<String>) -> bool {
    if present.is_empty() {
        return wanted.iter().any(|w| w == NONE_MARKER);
    }
    wanted.iter().any(|w| present.contains(w))
}

/// Case-insensitive subsequence match: every character of `needle` appears
/// in `haystack` in order, not necessarily adjacent.
pub fn fuzzy_contains(haystack: &str, needle: &str) -> bool {
    let mut wanted = needle.chars().flat_map(char::to_lowercase).peekable();
    for c in haystack.chars().flat_map(char::to_lowercase) {
        match wanted.peek() {
            None => return true,
            Some(w) if *w == c => {
                wanted.next();
            }
            Some(_) => {}
        }
    }
    wanted.peek().is_none()
}
