use anyhow::Result;
use std::path::PathBuf;

/// Name of the data file inside the platform data directory.
pub(crate) const DATA_FILE: &str = "expenses.json";

/// Default currency symbol shown in front of amounts.
pub(crate) const DEFAULT_CURRENCY: &str = "₱";

/// Display preferences shared by the CLI and TUI.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Per-user data location, e.g. `~/.local/share/expenses/expenses.json`.
/// The directory is created on first save.
pub(crate) fn default_data_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expenses", "Expenses")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join(DATA_FILE))
}
