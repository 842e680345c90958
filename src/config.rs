// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::filter::ActiveFilter;
use crate::sort::SortSpec;
use crate::store::{atomic_write, with_lock};
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

fn default_sort_order() -> Vec<String> {
    vec!["+!completed".to_string(), "+!by_prio".to_string()]
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Task list; defaults to `todo.txt` in the data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_file: Option<PathBuf>,
    /// Archive; defaults to `done.txt` in the data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_file: Option<PathBuf>,
    /// Stamp today's date on new tasks that carry none.
    #[serde(default = "default_true")]
    pub prepend_date: bool,
    #[serde(default)]
    pub hide_completed: bool,
    #[serde(default)]
    pub hide_future: bool,
    #[serde(default = "default_true")]
    pub hide_hidden: bool,
    #[serde(default = "default_sort_order")]
    pub sort_order: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_file: None,
            done_file: None,
            prepend_date: true,
            hide_completed: false,
            hide_future: false,
            hide_hidden: true,
            sort_order: default_sort_order(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults. Any other failure
    /// is still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether `err` means the config file does not exist, either from our
    /// own message or an IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    pub fn todo_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.todo_file {
            Some(p) => Ok(p.clone()),
            None => ctx.get_todo_path(),
        }
    }

    pub fn done_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.done_file {
            Some(p) => Ok(p.clone()),
            None => ctx.get_done_path(),
        }
    }

    /// The filter implied by the `hide_*` settings.
    pub fn default_filter(&self) -> ActiveFilter {
        ActiveFilter {
            hide_completed: self.hide_completed,
            hide_future: self.hide_future,
            hide_hidden: self.hide_hidden,
            ..ActiveFilter::default()
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::parse(&self.sort_order)
    }
}
