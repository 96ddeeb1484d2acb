use std::io::{self, Write};

use todo_core::{Counts, Priority, StatusFilter, ViewFilter};

use super::theme::{priority_icon, Role, Theme};

/// Status counts and the current selections. Chosen options are bracketed.
pub fn render_filter_bar<W: Write>(
    out: &mut W,
    counts: &Counts,
    filter: &ViewFilter,
    categories: &[String],
    theme: &Theme,
) -> io::Result<()> {
    let option = |label: String, selected: bool| {
        if selected {
            theme.paint(format!("[{label}]"), Role::Selected)
        } else {
            label
        }
    };

    let mut status = vec![
        option(format!("All ({})", counts.total), filter.status == StatusFilter::All),
        option(format!("Active ({})", counts.active), filter.status == StatusFilter::Active),
        option(
            format!("Completed ({})", counts.completed),
            filter.status == StatusFilter::Completed,
        ),
    ];
    if counts.overdue > 0 {
        status.push(theme.paint(format!("🔴 Overdue ({})", counts.overdue), Role::Overdue));
    }
    writeln!(out, "Status:   {}", status.join("  "))?;

    let mut priority = vec![option("All".to_string(), filter.priority.is_none())];
    for p in Priority::ALL {
        priority.push(option(
            format!("{} {}", priority_icon(p), title_case(p.as_str())),
            filter.priority == Some(p),
        ));
    }
    writeln!(out, "Priority: {}", priority.join("  "))?;

    if !categories.is_empty() {
        let mut row = vec![option("All".to_string(), filter.category.is_none())];
        for category in categories {
            row.push(option(
                format!("🏷️ {category}"),
                filter.category.as_deref() == Some(category.as_str()),
            ));
        }
        writeln!(out, "Category: {}", row.join("  "))?;
    }

    if filter.has_search() {
        writeln!(out, "Search:   \"{}\"", filter.search)?;
    }
    Ok(())
}

fn title_case(upper: &str) -> String {
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(counts: Counts, filter: &ViewFilter, categories: &[String]) -> String {
        let mut buf = Vec::new();
        render_filter_bar(&mut buf, &counts, filter, categories, &Theme::plain()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn shows_counts_and_selection() {
        let counts = Counts {
            total: 4,
            active: 3,
            completed: 1,
            overdue: 2,
        };
        let filter = ViewFilter {
            status: StatusFilter::Active,
            priority: Some(Priority::Low),
            ..ViewFilter::default()
        };
        let text = render(counts, &filter, &[]);
        assert_eq!(
            text,
            "Status:   All (4)  [Active (3)]  Completed (1)  🔴 Overdue (2)\n\
             Priority: All  🔴 High  🟡 Medium  [🟢 Low]\n"
        );
    }

    #[test]
    fn overdue_hidden_when_zero_and_categories_listed() {
        let filter = ViewFilter {
            category: Some("Work".into()),
            search: "rep".into(),
            ..ViewFilter::default()
        };
        let text = render(Counts::default(), &filter, &["Home".into(), "Work".into()]);
        assert!(!text.contains("Overdue"));
        assert!(text.contains("Category: All  🏷️ Home  [🏷️ Work]\n"));
        assert!(text.ends_with("Search:   \"rep\"\n"));
    }
}
