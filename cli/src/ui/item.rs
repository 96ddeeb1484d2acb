use std::io::{self, Write};

use chrono::NaiveDate;
use todo_core::Todo;

use super::theme::{priority_icon, Role, Theme};

/// `Mar 5, 2025`
pub fn format_due(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// One todo: checkbox, id, title, badges, then the description indented
/// underneath.
pub fn render_item<W: Write>(
    out: &mut W,
    todo: &Todo,
    today: NaiveDate,
    theme: &Theme,
) -> io::Result<()> {
    let checkbox = if todo.completed { "[x]" } else { "[ ]" };
    let title = if todo.completed {
        theme.paint(&todo.title, Role::Done)
    } else {
        theme.paint(&todo.title, Role::Heading)
    };

    let mut line = format!(
        "{checkbox} {} {title}  {}",
        theme.paint(format!("#{}", todo.id), Role::Muted),
        theme.paint(
            format!("{} {}", priority_icon(todo.priority), todo.priority),
            Role::Priority(todo.priority)
        ),
    );
    if let Some(category) = &todo.category {
        line.push_str(&format!("  {}", theme.paint(format!("🏷️ {category}"), Role::Category)));
    }
    if let Some(due) = todo.due_date {
        let mut badge = format!("📅 {}", format_due(due));
        let role = if todo.is_overdue(today) {
            badge.push_str(" (overdue)");
            Role::Overdue
        } else if todo.is_due_on(today) {
            badge.push_str(" (today)");
            Role::DueToday
        } else {
            Role::Muted
        };
        line.push_str(&format!("  {}", theme.paint(badge, role)));
    }
    writeln!(out, "{line}")?;

    if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "      {}", theme.paint(description, Role::Muted))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use todo_core::Priority;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn todo() -> Todo {
        Todo {
            id: 3,
            title: "Buy milk".into(),
            description: Some("2 litres".into()),
            completed: false,
            priority: Priority::High,
            category: Some("Errands".into()),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 9),
            created_at: "2025-03-01T08:00:00".parse().unwrap(),
        }
    }

    fn render(todo: &Todo) -> String {
        let mut buf = Vec::new();
        render_item(&mut buf, todo, today(), &Theme::plain()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_all_badges() {
        let text = render(&todo());
        assert_eq!(
            text,
            "[ ] #3 Buy milk  🔴 HIGH  🏷️ Errands  📅 Mar 9, 2025 (overdue)\n      2 litres\n"
        );
    }

    #[test]
    fn completed_past_due_is_not_flagged() {
        let mut t = todo();
        t.completed = true;
        let text = render(&t);
        assert!(text.starts_with("[x] #3"));
        assert!(!text.contains("overdue"));
    }

    #[test]
    fn due_today_is_flagged() {
        let mut t = todo();
        t.due_date = Some(today());
        assert!(render(&t).contains("📅 Mar 10, 2025 (today)"));
    }

    #[test]
    fn optional_parts_are_skipped() {
        let mut t = todo();
        t.description = None;
        t.category = None;
        t.due_date = None;
        t.priority = Priority::Low;
        assert_eq!(render(&t), "[ ] #3 Buy milk  🟢 LOW\n");
    }
}
