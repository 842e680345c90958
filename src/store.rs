// File: src/store.rs
// Loads and saves todo.txt files.
//
// The file is the compatibility surface: one task per line, UTF-8, written back
// in the same order it was read. Writes go through an exclusive advisory lock
// and a temp-file rename so a crash never leaves a half-written list behind.
use crate::model::Task;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct TodoFile {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TodoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tasks: Vec::new(),
        }
    }

    /// Reads `path`. A missing file is an empty list, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks = with_lock(&path, || read_tasks(&path))?;
        log::debug!("loaded {} tasks from {}", tasks.len(), path.display());
        Ok(Self { path, tasks })
    }

    pub fn save(&self) -> Result<()> {
        let content = self.to_file_string();
        with_lock(&self.path, || atomic_write(&self.path, &content))?;
        log::debug!("saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    /// Load, change and save `path` under one lock, so concurrent writers
    /// cannot overwrite each other's edits. Nothing is written if `f` fails.
    pub fn modify<F, T>(path: impl Into<PathBuf>, f: F) -> Result<T>
    where
        F: FnOnce(&mut TodoFile) -> Result<T>,
    {
        let path = path.into();
        with_lock(&path, || {
            let mut todo = Self {
                tasks: read_tasks(&path)?,
                path: path.clone(),
            };
            let result = f(&mut todo)?;
            atomic_write(&path, todo.to_file_string())?;
            log::debug!("modified {} ({} tasks)", path.display(), todo.len());
            Ok(result)
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn task_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("No task at index {} (list has {})", index, len))
    }

    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        for task in &self.tasks {
            out.push_str(&task.text());
            out.push('\n');
        }
        out
    }

    /// Appends a task, prepending `create_date` when the line has none.
    /// Returns the new task's index.
    pub fn add(&mut self, line: &str, create_date: Option<NaiveDate>) -> usize {
        self.tasks.push(Task::with_create_date(line, create_date));
        self.tasks.len() - 1
    }

    /// Completes the task at `index`. A recurring task's next occurrence is
    /// inserted right after it and its index returned.
    pub fn complete(&mut self, index: usize, today: NaiveDate) -> Result<Option<usize>> {
        let next = self.task_mut(index)?.mark_complete(today);
        Ok(next.map(|task| {
            self.tasks.insert(index + 1, task);
            index + 1
        }))
    }

    pub fn uncomplete(&mut self, index: usize) -> Result<()> {
        self.task_mut(index)?.mark_incomplete();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Task> {
        self.task_mut(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Moves every completed task to the end of `done_path` and returns how
    /// many were moved. The todo file itself is not saved. On error the list
    /// is left as it was.
    pub fn archive(&mut self, done_path: &Path) -> Result<usize> {
        let mut content = String::new();
        let mut moved = 0;
        for task in self.tasks.iter().filter(|t| t.is_completed()) {
            content.push_str(&task.text());
            content.push('\n');
            moved += 1;
        }
        if moved == 0 {
            return Ok(0);
        }

        with_lock(done_path, || {
            let needs_newline = done_path.exists() && {
                let existing = fs::read_to_string(done_path)?;
                !existing.is_empty() && !existing.ends_with('\n')
            };
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(done_path)
                .with_context(|| format!("Failed to open done file: {}", done_path.display()))?;
            if needs_newline {
                file.write_all(b"\n")?;
            }
            file.write_all(content.as_bytes())?;
            Ok(())
        })?;

        self.tasks.retain(|t| !t.is_completed());
        log::info!("archived {} tasks to {}", moved, done_path.display());
        Ok(moved)
    }
}

fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    if !path.exists() {
        log::info!("{} does not exist yet, starting empty", path.display());
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read todo file: {}", path.display()))?;
    Ok(parse_lines(&content))
}

/// Splits file content into tasks. `\r\n` endings are accepted and a final
/// newline does not produce an empty task.
pub fn parse_lines(content: &str) -> Vec<Task> {
    content.lines().map(Task::new).collect()
}

fn lock_path(file_path: &Path) -> PathBuf {
    let mut name = file_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    file_path.with_file_name(name)
}

pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    if let Some(parent) = file_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let lock_path = lock_path(file_path);
    let file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

    file.lock_exclusive()?;
    let result = f();
    file.unlock()?;
    result
}

/// Atomic write: write to a temp file next to `path`, then rename.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
