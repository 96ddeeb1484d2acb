use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use todo_core::{
    local_today, Controller, DeleteOutcome, PreferenceStore, Todo, TodoClient, TodoForm,
    TodoService, Transport, ViewFilter,
};
use tracing::debug;

use crate::args::{Cli, Command, ListArgs, RemoteQuery, ThemeMode};
use crate::config::{config_dir, Config};
use crate::prefs::FilePreferences;
use crate::transport::UreqTransport;
use crate::ui::{render_filter_bar, render_item, render_list, render_rows, Role, Theme};

pub fn run(cli: Cli) -> Result<()> {
    let dir = config_dir()?;
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => dir.join("config.toml"),
    };
    let config = Config::load_from(&config_path)?;
    let base_url = config.resolve_base_url(cli.base_url.as_deref());
    debug!(%base_url, config = %config_path.display(), "starting");

    let service = TodoService::new(TodoClient::new(&base_url), UreqTransport::new());
    let mut controller = Controller::new(service, FilePreferences::in_dir(&dir));
    let color = Theme::detect(controller.dark_mode(), cli.no_color).color;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut confirm = |todo: &Todo| prompt_delete(todo).unwrap_or(false);
    execute(&mut controller, cli.command, &mut out, color, &mut confirm)
}

/// Asks on stderr, reads the answer from stdin. Anything but y/yes declines.
fn prompt_delete(todo: &Todo) -> io::Result<bool> {
    let mut err = io::stderr();
    write!(err, "Are you sure you want to delete \"{}\"? [y/N] ", todo.title)?;
    err.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Runs one command against `controller`, rendering to `out`.
///
/// `confirm` is consulted before a delete unless `--yes` was given.
pub fn execute<T, P, W>(
    controller: &mut Controller<T, P>,
    command: Command,
    out: &mut W,
    color: bool,
    confirm: &mut dyn FnMut(&Todo) -> bool,
) -> Result<()>
where
    T: Transport,
    P: PreferenceStore,
    W: Write,
{
    let today = local_today();

    match command {
        Command::List(args) => {
            controller.load()?;
            controller.set_filter(view_filter(args));
            render_screen(controller, out, &theme_for(controller, color))?;
        }

        Command::Add(args) => {
            controller.load()?;
            let mut form = TodoForm::new();
            args.apply_to(&mut form);
            let todo = controller.submit_form(&mut form)?.clone();
            writeln!(out, "Added todo #{}", todo.id)?;
            render_item(out, &todo, today, &theme_for(controller, color))?;
        }

        Command::Edit { id, form: args } => {
            controller.load()?;
            let mut form = controller.begin_edit(id)?;
            args.apply_to(&mut form);
            let todo = controller.submit_form(&mut form)?.clone();
            writeln!(out, "Updated todo #{}", todo.id)?;
            render_item(out, &todo, today, &theme_for(controller, color))?;
        }

        Command::Toggle { id } => {
            controller.load()?;
            let todo = controller.toggle(id)?.clone();
            let state = if todo.completed { "completed" } else { "active" };
            writeln!(out, "Marked todo #{} {state}", todo.id)?;
            render_item(out, &todo, today, &theme_for(controller, color))?;
        }

        Command::Delete { id, yes } => {
            controller.load()?;
            match controller.delete(id, |todo| yes || confirm(todo))? {
                DeleteOutcome::Deleted => writeln!(out, "Deleted todo #{id}")?,
                DeleteOutcome::Cancelled => writeln!(out, "Kept todo #{id}")?,
            }
        }

        Command::Show { id } => {
            let todo = controller
                .service()
                .get_by_id(id)
                .with_context(|| format!("Failed to load todo #{id}"))?;
            render_item(out, &todo, today, &theme_for(controller, color))?;
        }

        Command::Remote { query } => {
            run_remote(controller, query, out, &theme_for(controller, color))?;
        }

        Command::Theme { mode } => {
            match mode {
                Some(ThemeMode::Dark) => controller.set_dark_mode(true),
                Some(ThemeMode::Light) => controller.set_dark_mode(false),
                Some(ThemeMode::Toggle) => {
                    controller.toggle_dark_mode();
                }
                None => {}
            }
            let theme = theme_for(controller, color);
            writeln!(out, "Theme: {}", theme.paint(theme.name(), Role::Selected))?;
        }
    }
    Ok(())
}

fn theme_for<T: Transport, P: PreferenceStore>(controller: &Controller<T, P>, color: bool) -> Theme {
    Theme::new(controller.dark_mode(), color)
}

fn view_filter(args: ListArgs) -> ViewFilter {
    ViewFilter {
        status: args.status,
        category: args.category.filter(|c| !c.is_empty()),
        priority: args.priority,
        search: args.search.unwrap_or_default(),
    }
}

/// Header, filter bar and the derived list.
fn render_screen<T, P, W>(controller: &Controller<T, P>, out: &mut W, theme: &Theme) -> Result<()>
where
    T: Transport,
    P: PreferenceStore,
    W: Write,
{
    let today = local_today();
    writeln!(out, "{}", theme.paint("Todo Manager", Role::Heading))?;
    writeln!(
        out,
        "{}",
        theme.paint("Stay organized with priority, categories & due dates", Role::Muted)
    )?;
    writeln!(out)?;
    render_filter_bar(
        out,
        &controller.counts(today),
        controller.filter(),
        controller.categories(),
        theme,
    )?;
    writeln!(out)?;
    if controller.is_loading() {
        writeln!(out, "Loading todos...")?;
        return Ok(());
    }
    render_list(out, &controller.visible_todos(), controller.filter(), today, theme)?;
    Ok(())
}

/// Backend-side queries, rendered as returned without local filtering.
fn run_remote<T, P, W>(
    controller: &Controller<T, P>,
    query: RemoteQuery,
    out: &mut W,
    theme: &Theme,
) -> Result<()>
where
    T: Transport,
    P: PreferenceStore,
    W: Write,
{
    let service = controller.service();
    let todos = match query {
        RemoteQuery::Search { term } => service.search(&term),
        RemoteQuery::Category { name } => service.list_by_category(&name),
        RemoteQuery::Priority { priority } => service.list_by_priority(priority),
        RemoteQuery::Overdue => service.list_overdue(),
        RemoteQuery::Completed => service.list_completed(),
        RemoteQuery::Incomplete => service.list_incomplete(),
        RemoteQuery::Categories => {
            let categories = service
                .list_categories()
                .context("Failed to load categories")?;
            if categories.is_empty() {
                writeln!(out, "{}", theme.paint("No categories yet.", Role::Muted))?;
            }
            for category in categories {
                writeln!(out, "{}", theme.paint(format!("🏷️ {category}"), Role::Category))?;
            }
            return Ok(());
        }
    }
    .context("Failed to load todos")?;

    let rows: Vec<&Todo> = todos.iter().collect();
    render_rows(out, &rows, local_today(), theme)?;
    Ok(())
}
