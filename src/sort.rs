// File: ./src/sort.rs
// Multi-key ordering of filtered tasks.
//
// A sort order is a list of `"<dir>!<key>"` strings such as `+!by_prio` or
// `-!by_due_date`, applied left to right. File order always breaks the
// remaining ties, so sorting is total and stable.
use crate::model::Task;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

pub const NORMAL_SORT: &str = "+";
pub const REVERSED_SORT: &str = "-";
pub const SORT_SEPARATOR: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    FileOrder,
    /// First `@list`, tasks without one last.
    ByContext,
    /// First `+tag`, tasks without one last.
    ByProject,
    Alphabetical,
    ByPrio,
    /// Open tasks before completed ones.
    Completed,
    ByCreationDate,
    /// Current tasks before ones whose threshold lies ahead.
    InFuture,
    ByDueDate,
    ByThresholdDate,
}

impl SortKey {
    /// `a` and `b` are positions in the file.
    fn compare(self, tasks: &[Task], a: usize, b: usize, today: NaiveDate) -> Ordering {
        let (ta, tb) = (&tasks[a], &tasks[b]);
        match self {
            SortKey::FileOrder => a.cmp(&b),
            SortKey::ByContext => missing_last(ta.lists().first(), tb.lists().first()),
            SortKey::ByProject => missing_last(ta.tags().first(), tb.tags().first()),
            SortKey::Alphabetical => ta
                .text_without_completion_info()
                .to_lowercase()
                .cmp(&tb.text_without_completion_info().to_lowercase()),
            SortKey::ByPrio => ta.priority().cmp(&tb.priority()),
            SortKey::Completed => ta.is_completed().cmp(&tb.is_completed()),
            SortKey::ByCreationDate => missing_last(ta.create_date(), tb.create_date()),
            SortKey::InFuture => ta.in_future(today).cmp(&tb.in_future(today)),
            SortKey::ByDueDate => missing_last(ta.due_date(), tb.due_date()),
            SortKey::ByThresholdDate => missing_last(ta.threshold_date(), tb.threshold_date()),
        }
    }
}

impl SortKey {
    /// Section title for `task` in a list sorted first by this key. Keys that
    /// do not group give `""`; `empty` stands in for a missing value.
    pub fn header(self, task: &Task, empty: &str) -> String {
        let value = match self {
            SortKey::ByContext => task.lists().into_iter().next(),
            SortKey::ByProject => task.tags().into_iter().next(),
            SortKey::ByThresholdDate => task.threshold_date().map(str::to_string),
            SortKey::ByDueDate => task.due_date().map(str::to_string),
            SortKey::ByPrio => Some(task.priority().code()),
            _ => return String::new(),
        };
        value.unwrap_or_else(|| empty.to_string())
    }
}

/// A run of consecutive tasks sharing a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub title: String,
    pub members: Vec<usize>,
}

/// Dates are `YYYY-MM-DD`, so their text order is their calendar order.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    pub key: SortKey,
    pub reverse: bool,
}

impl FromStr for SortField {
    type Err = strum::ParseError;

    /// Accepts `+!key`, `-!key` and a bare `key`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (reverse, name) = match s.split_once(SORT_SEPARATOR) {
            Some((dir, name)) => (dir == REVERSED_SORT, name),
            None => (false, s),
        };
        Ok(Self {
            key: SortKey::from_str(name)?,
            reverse,
        })
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = if self.reverse { REVERSED_SORT } else { NORMAL_SORT };
        write!(f, "{}{}{}", dir, SORT_SEPARATOR, self.key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub fields: Vec<SortField>,
}

impl SortSpec {
    /// Unknown keys are logged and skipped.
    pub fn parse<S: AsRef<str>>(order: &[S]) -> Self {
        let fields = order
            .iter()
            .filter_map(|s| {
                let s = s.as_ref();
                match s.parse::<SortField>() {
                    Ok(field) => Some(field),
                    Err(_) => {
                        log::warn!("Unknown sort: {}", s);
                        None
                    }
                }
            })
            .collect();
        Self { fields }
    }

    pub fn compare(&self, tasks: &[Task], a: usize, b: usize, today: NaiveDate) -> Ordering {
        for field in &self.fields {
            let ord = field.key.compare(tasks, a, b, today);
            let ord = if field.reverse { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.cmp(&b)
    }

    /// Sorts `indices` (positions in `tasks`) in place.
    pub fn sort(&self, tasks: &[Task], indices: &mut [usize], today: NaiveDate) {
        indices.sort_by(|&a, &b| self.compare(tasks, a, b, today));
    }

    /// Splits already sorted `indices` into runs with the same header under
    /// the first sort key. Without a grouping key everything lands in one
    /// untitled group.
    pub fn group(&self, tasks: &[Task], indices: &[usize], empty: &str) -> Vec<Group> {
        let mut groups: Vec<Group> = Vec::new();
        for &i in indices {
            let title = self
                .fields
                .first()
                .map(|f| f.key.header(&tasks[i], empty))
                .unwrap_or_default();
            match groups.last_mut() {
                Some(group) if group.title == title => group.members.push(i),
                _ => groups.push(Group {
                    title,
                    members: vec![i],
                }),
            }
        }
        groups
    }
}
