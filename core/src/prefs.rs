//! Persistence seam for the single local display preference.

use std::io;

/// Where the dark-mode flag lives between runs.
pub trait PreferenceStore {
    /// `None` when nothing has been stored yet.
    fn load_dark_mode(&self) -> Option<bool>;

    fn save_dark_mode(&mut self, enabled: bool) -> io::Result<()>;
}

/// Keeps the flag in memory only; used by tests and embedders that do not
/// persist anything.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    dark_mode: Option<bool>,
    pub writes: usize,
}

impl MemoryPreferences {
    pub fn with_dark_mode(enabled: bool) -> Self {
        Self {
            dark_mode: Some(enabled),
            writes: 0,
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_dark_mode(&self) -> Option<bool> {
        self.dark_mode
    }

    fn save_dark_mode(&mut self, enabled: bool) -> io::Result<()> {
        self.dark_mode = Some(enabled);
        self.writes += 1;
        Ok(())
    }
}
