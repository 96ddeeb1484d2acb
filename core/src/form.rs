//! Draft state and local validation for the create/edit form.

use chrono::NaiveDate;

use crate::types::{Priority, Todo, TodoFields};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter a title")]
    EmptyTitle,

    #[error("Title must be at most {MAX_TITLE_LEN} characters")]
    TitleTooLong,

    #[error("Description must be at most {MAX_DESCRIPTION_LEN} characters")]
    DescriptionTooLong,

    #[error("Due date `{0}` is not a valid YYYY-MM-DD date")]
    InvalidDueDate(String),
}

/// Raw, untrimmed input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    /// `YYYY-MM-DD` or empty.
    pub due_date: String,
    completed: bool,
}

impl TodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled from the todo being edited.
    pub fn seeded(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            priority: todo.priority,
            category: todo.category.clone().unwrap_or_default(),
            due_date: todo
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            completed: todo.completed,
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the draft without consuming it.
    pub fn validate(&self) -> Result<TodoFields, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(FormError::TitleTooLong);
        }
        let description = non_empty(&self.description);
        if description
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(FormError::DescriptionTooLong);
        }
        let due_date = match non_empty(&self.due_date) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| FormError::InvalidDueDate(raw))?,
            ),
            None => None,
        };

        Ok(TodoFields {
            title: title.to_string(),
            description,
            completed: self.completed,
            priority: self.priority,
            category: non_empty(&self.category),
            due_date,
        })
    }

    /// Validates, then clears the draft and hands back the fields. A failed
    /// validation leaves the draft untouched so the user can fix it.
    pub fn submit(&mut self) -> Result<TodoFields, FormError> {
        let fields = self.validate()?;
        *self = Self::default();
        Ok(fields)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
