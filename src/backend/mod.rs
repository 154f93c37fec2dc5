use tracing::info;

use crate::config::{BackendKind, Config};
use crate::error::Result;
use crate::models::{NewWorkout, WorkoutEntry};

mod local;
mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

/// A place the workout sequence lives between sessions.
///
/// `insert` and `delete` run before memory changes, so a failure leaves the
/// in-memory sequence untouched. `sync` runs after every change with the full
/// sequence in its new order.
pub trait Backend {
    fn fetch_all(&mut self) -> Result<Vec<WorkoutEntry>>;
    fn insert(&mut self, new: NewWorkout) -> Result<WorkoutEntry>;
    fn delete(&mut self, id: &str) -> Result<()>;
    fn sync(&mut self, entries: &[WorkoutEntry]) -> Result<()>;
}

pub fn from_config(config: &Config) -> Box<dyn Backend> {
    match config.backend {
        BackendKind::Local => {
            let local = LocalBackend::new(&config.local.data_dir);
            info!("storing workouts in {}", local.path().display());
            Box::new(local)
        }
        BackendKind::Remote => {
            info!("storing workouts in table {} at {}", config.remote.table, config.remote.url);
            Box::new(RemoteBackend::new(&config.remote))
        }
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn fetch_all(&mut self) -> Result<Vec<WorkoutEntry>> {
        (**self).fetch_all()
    }

    fn insert(&mut self, new: NewWorkout) -> Result<WorkoutEntry> {
        (**self).insert(new)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        (**self).delete(id)
    }

    fn sync(&mut self, entries: &[WorkoutEntry]) -> Result<()> {
        (**self).sync(entries)
    }
}
