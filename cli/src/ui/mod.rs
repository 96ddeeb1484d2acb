//! Presentation components. Each renders into any `Write` and holds no
//! state of its own.

pub mod filter_bar;
pub mod item;
pub mod list;
pub mod theme;

pub use filter_bar::render_filter_bar;
pub use item::render_item;
pub use list::{render_list, render_rows};
pub use theme::{Role, Theme};
