use std::fmt::Display;

use is_terminal::IsTerminal;
use owo_colors::{OwoColorize, Style};
use todo_core::Priority;

/// What a piece of text means; the theme decides how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading,
    Muted,
    Selected,
    Priority(Priority),
    Category,
    Overdue,
    DueToday,
    Done,
}

/// Dark and light palettes, or no colour at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub color: bool,
}

impl Theme {
    pub fn new(dark: bool, color: bool) -> Self {
        Self { dark, color }
    }

    /// Colour only when stdout is a terminal and the user did not opt out.
    pub fn detect(dark: bool, no_color: bool) -> Self {
        Self::new(dark, !no_color && std::io::stdout().is_terminal())
    }

    pub fn plain() -> Self {
        Self::new(true, false)
    }

    pub fn name(&self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            "light"
        }
    }

    pub fn paint(&self, text: impl Display, role: Role) -> String {
        if self.color {
            text.style(self.style(role)).to_string()
        } else {
            text.to_string()
        }
    }

    fn style(&self, role: Role) -> Style {
        let s = Style::new();
        match (role, self.dark) {
            (Role::Heading, true) => s.bold().bright_white(),
            (Role::Heading, false) => s.bold().black(),
            (Role::Muted, true) => s.bright_black(),
            (Role::Muted, false) => s.dimmed(),
            (Role::Selected, true) => s.bold().bright_cyan(),
            (Role::Selected, false) => s.bold().blue(),
            (Role::Priority(Priority::High), true) => s.bright_red(),
            (Role::Priority(Priority::High), false) => s.red(),
            (Role::Priority(Priority::Medium), true) => s.bright_yellow(),
            (Role::Priority(Priority::Medium), false) => s.yellow(),
            (Role::Priority(Priority::Low), true) => s.bright_green(),
            (Role::Priority(Priority::Low), false) => s.green(),
            (Role::Category, true) => s.bright_magenta(),
            (Role::Category, false) => s.magenta(),
            (Role::Overdue, _) => s.bold().red(),
            (Role::DueToday, _) => s.bold().yellow(),
            (Role::Done, _) => s.strikethrough().dimmed(),
        }
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
    }
}
