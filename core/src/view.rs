//! Derived view over the loaded todos: filtering, ordering and counts.
//!
//! Everything here is a pure function of the list and the current
//! [`ViewFilter`]; nothing is cached between calls.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Priority, Todo};

/// Completion-state selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status filter `{other}`")),
        }
    }
}

/// Selections made in the search/filter bar. `None` and an empty search
/// term mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub status: StatusFilter,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl ViewFilter {
    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }

    /// Applies search, status, category and priority in that order.
    pub fn matches(&self, todo: &Todo) -> bool {
        if self.has_search()
            && !todo
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        if !self.status.matches(todo) {
            return false;
        }
        if let Some(category) = &self.category {
            if todo.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if todo.priority != priority {
                return false;
            }
        }
        true
    }

    /// Message the list shows when this filter leaves nothing to display.
    pub fn empty_state_message(&self) -> String {
        if self.has_search() {
            return format!("No todos match \"{}\".", self.search);
        }
        if self.category.is_some() || self.priority.is_some() {
            return "No todos match the selected filters.".to_string();
        }
        match self.status {
            StatusFilter::Active => "No active todos. Time to add some!".to_string(),
            StatusFilter::Completed => "No completed todos yet.".to_string(),
            StatusFilter::All => "No todos yet. Start by adding one above!".to_string(),
        }
    }
}

/// Display order: priority descending; then dated before undated, earlier
/// due date first; then newest creation first.
pub fn display_order(a: &Todo, b: &Todo) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    })
}

/// Filters `todos` through `filter` and sorts the survivors for display.
pub fn visible<'a>(todos: &'a [Todo], filter: &ViewFilter) -> Vec<&'a Todo> {
    let mut out: Vec<&Todo> = todos.iter().filter(|t| filter.matches(t)).collect();
    out.sort_by(|a, b| display_order(a, b));
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl Counts {
    pub fn of(todos: &[Todo], today: NaiveDate) -> Self {
        todos.iter().fold(
            Counts {
                total: todos.len(),
                ..Counts::default()
            },
            |mut c, t| {
                if t.completed {
                    c.completed += 1;
                } else {
                    c.active += 1;
                }
                if t.is_overdue(today) {
                    c.overdue += 1;
                }
                c
            },
        )
    }
}
