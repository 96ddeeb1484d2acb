use std::io::{self, Write};

use chrono::NaiveDate;
use todo_core::{Todo, ViewFilter};

use super::item::render_item;
use super::theme::{Role, Theme};

/// Rows in the given order plus a count line, or the empty-state message
/// for the active filter.
pub fn render_list<W: Write>(
    out: &mut W,
    todos: &[&Todo],
    filter: &ViewFilter,
    today: NaiveDate,
    theme: &Theme,
) -> io::Result<()> {
    if todos.is_empty() {
        return writeln!(out, "{}", theme.paint(filter.empty_state_message(), Role::Muted));
    }
    render_rows(out, todos, today, theme)
}

/// Rows without filter-aware empty states, for backend query results.
pub fn render_rows<W: Write>(
    out: &mut W,
    todos: &[&Todo],
    today: NaiveDate,
    theme: &Theme,
) -> io::Result<()> {
    if todos.is_empty() {
        return writeln!(out, "{}", theme.paint("No todos returned.", Role::Muted));
    }
    for todo in todos {
        render_item(out, todo, today, theme)?;
    }
    let noun = if todos.len() == 1 { "todo" } else { "todos" };
    writeln!(out, "{}", theme.paint(format!("Showing {} {noun}", todos.len()), Role::Muted))
}
