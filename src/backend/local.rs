use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use super::Backend;
use crate::error::Result;
use crate::models::{NewWorkout, WorkoutEntry};

const STORAGE_KEY: &str = "workouts";

/// Keeps the whole sequence under one storage key, a JSON file in `data_dir`.
pub struct LocalBackend {
    path: PathBuf,
}

impl LocalBackend {
    pub fn new(data_dir: &Path) -> Self {
        LocalBackend {
            path: data_dir.join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for LocalBackend {
    fn fetch_all(&mut self) -> Result<Vec<WorkoutEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json_data = fs::read_to_string(&self.path)?;
        if json_data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&json_data)?)
    }

    fn insert(&mut self, new: NewWorkout) -> Result<WorkoutEntry> {
        // Nothing to write yet; the follow-up sync stores the new sequence.
        Ok(WorkoutEntry {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            date: Some(new.date),
        })
    }

    fn delete(&mut self, _id: &str) -> Result<()> {
        Ok(())
    }

    fn sync(&mut self, entries: &[WorkoutEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(entries)?)?;
        debug!("wrote {} workouts to {}", entries.len(), self.path.display());
        Ok(())
    }
}
