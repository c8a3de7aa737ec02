//! Per-day task completion and photo bookkeeping.
//!
//! Only the current day is kept. When the day changes the maps are replaced
//! by empty ones; earlier days survive only as photo files on disk.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Task index -> done flag.
pub type TaskFlags = BTreeMap<usize, bool>;

/// Task index -> stored photo filenames, in upload order.
pub type TaskPhotos = BTreeMap<usize, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayState {
    /// The day the two maps belong to.
    pub task_reset_date: Option<NaiveDate>,
    #[serde(default)]
    pub task_state: TaskFlags,
    #[serde(default)]
    pub task_photos: TaskPhotos,
}

/// Admin-side corrections to the current day.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskEdit {
    /// When present, every task already tracked today (plus any listed here)
    /// takes the supplied flag; a missing entry means "not done". Tasks
    /// marked not done lose all their photos.
    #[serde(default)]
    pub task_done: Option<TaskFlags>,
    /// Photos to drop, per task.
    #[serde(default)]
    pub delete_photos: TaskPhotos,
}

impl DayState {
    /// Empty state for `day`.
    pub fn fresh(day: NaiveDate) -> Self {
        Self {
            task_reset_date: Some(day),
            task_state: TaskFlags::new(),
            task_photos: TaskPhotos::new(),
        }
    }

    /// Discard the previous day's state if `today` is a new day.
    ///
    /// Returns `true` when a reset happened. Calling it again on the same
    /// day changes nothing.
    pub fn roll_to(&mut self, today: NaiveDate) -> bool {
        if self.task_reset_date == Some(today) {
            return false;
        }
        *self = Self::fresh(today);
        true
    }

    pub fn is_done(&self, index: usize) -> bool {
        self.task_state.get(&index).copied().unwrap_or(false)
    }

    pub fn photos_for(&self, index: usize) -> &[String] {
        self.task_photos
            .get(&index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every filename referenced today, in task order.
    pub fn all_photos(&self) -> impl Iterator<Item = &String> {
        self.task_photos.values().flatten()
    }

    /// Replace the day's completion flags: every task in `0..task_count` is
    /// recorded as not done except those in `done`.
    pub fn record_completion(
        &mut self,
        done: &[usize],
        task_count: usize,
    ) -> Result<(), CoreError> {
        check_indices(done.iter().copied(), task_count)?;

        self.task_state = (0..task_count).map(|i| (i, false)).collect();
        for &index in done {
            self.task_state.insert(index, true);
        }
        Ok(())
    }

    /// Append stored photos to a task. When `mark_done` is set and at least
    /// one filename was added, the task is recorded as done.
    pub fn attach_photos(&mut self, index: usize, filenames: Vec<String>, mark_done: bool) {
        if filenames.is_empty() {
            return;
        }
        self.task_photos.entry(index).or_default().extend(filenames);
        if mark_done {
            self.task_state.insert(index, true);
        }
    }

    /// Apply an admin correction. Returns the filenames that are no longer
    /// referenced and should be removed from the file store.
    ///
    /// Entries outside `0..task_count` are dropped as well; they are left
    /// behind when the animal type changes and the schedule shrinks.
    pub fn apply_edit(
        &mut self,
        edit: &TaskEdit,
        task_count: usize,
    ) -> Result<Vec<String>, CoreError> {
        if let Some(flags) = &edit.task_done {
            check_indices(flags.keys().copied(), task_count)?;
        }
        check_indices(edit.delete_photos.keys().copied(), task_count)?;

        let mut removed = self.retain_tasks(task_count);

        if let Some(flags) = &edit.task_done {
            let mut tracked: Vec<usize> = self.task_state.keys().copied().collect();
            tracked.extend(flags.keys().copied());
            tracked.sort_unstable();
            tracked.dedup();

            for index in tracked {
                let done = flags.get(&index).copied().unwrap_or(false);
                self.task_state.insert(index, done);
                if !done {
                    if let Some(photos) = self.task_photos.remove(&index) {
                        removed.extend(photos);
                    }
                }
            }
        }

        for (index, doomed) in &edit.delete_photos {
            let Some(photos) = self.task_photos.get_mut(index) else {
                continue;
            };
            let (gone, kept): (Vec<String>, Vec<String>) =
                photos.drain(..).partition(|p| doomed.contains(p));
            *photos = kept;
            removed.extend(gone);
            if photos.is_empty() {
                self.task_photos.remove(index);
            }
        }

        Ok(removed)
    }

    /// Drop flags and photos for indices at or past `task_count`, returning
    /// the dropped filenames.
    fn retain_tasks(&mut self, task_count: usize) -> Vec<String> {
        self.task_state.retain(|&index, _| index < task_count);
        self.task_photos
            .split_off(&task_count)
            .into_values()
            .flatten()
            .collect()
    }
}

fn check_indices(
    indices: impl IntoIterator<Item = usize>,
    task_count: usize,
) -> Result<(), CoreError> {
    for index in indices {
        if index >= task_count {
            return Err(CoreError::Validation(format!(
                "Task index {index} is out of range (schedule has {task_count} tasks)"
            )));
        }
    }
    Ok(())
}
