use tracing::{debug, error, info, warn};

use crate::backend::Backend;
use crate::models::{NewWorkout, WorkoutEntry};

/// Moves the element at `from` to `to`, shifting everything in between.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// The ordered workout sequence plus the backend it is mirrored to.
pub struct WorkoutStore<B: Backend> {
    entries: Vec<WorkoutEntry>,
    backend: B,
    // Set when the last load failed; the backing store may still hold data
    // this session never saw, so it must not be overwritten.
    load_failed: bool,
}

impl<B: Backend> WorkoutStore<B> {
    pub fn new(backend: B) -> Self {
        WorkoutStore {
            entries: Vec::new(),
            backend,
            load_failed: false,
        }
    }

    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    pub fn load(&mut self) {
        match self.backend.fetch_all() {
            Ok(entries) => {
                info!("loaded {} workouts", entries.len());
                self.entries = entries;
                self.load_failed = false;
            }
            Err(e) => {
                error!("Error loading workouts: {}", e);
                self.entries.clear();
                self.load_failed = true;
            }
        }
    }

    pub fn add(&mut self, name: &str) {
        if name.trim().is_empty() {
            return;
        }

        match self.backend.insert(NewWorkout::now(name)) {
            Ok(entry) => {
                debug!("added workout {} ({})", entry.name, entry.id);
                self.entries.insert(0, entry);
                self.persist();
            }
            Err(e) => error!("Error adding workout: {}", e),
        }
    }

    pub fn remove(&mut self, id: &str) {
        if let Err(e) = self.backend.delete(id) {
            error!("Error deleting workout {}: {}", id, e);
            return;
        }
        let before = self.entries.len();
        self.entries.retain(|w| w.id != id);
        if self.entries.len() != before {
            debug!("removed workout {}", id);
            self.persist();
        }
    }

    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.entries.len() || to >= self.entries.len() {
            return;
        }
        array_move(&mut self.entries, from, to);
        debug!("moved workout from {} to {}", from, to);
        self.persist();
    }

    fn persist(&mut self) {
        if self.load_failed {
            warn!("Not saving workouts: the stored list could not be loaded");
            return;
        }
        if let Err(e) = self.backend.sync(&self.entries) {
            warn!("Error saving workouts: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LocalBackend, RemoteBackend};
    use crate::config::RemoteConfig;
    use std::io::ErrorKind;
    use std::net::TcpListener;
    use crate::error::{Error, Result};

    /// In-memory stand-in for a remote table that can be switched to failing.
    #[derive(Default)]
    struct FakeTable {
        rows: Vec<WorkoutEntry>,
        next_id: u32,
        failing: bool,
        syncs: usize,
    }

    impl FakeTable {
        fn fail_if_asked(&self) -> Result<()> {
            if self.failing {
                return Err(Error::Config("table unavailable".to_string()));
            }
            Ok(())
        }
    }

    impl Backend for FakeTable {
        fn fetch_all(&mut self) -> Result<Vec<WorkoutEntry>> {
            self.fail_if_asked()?;
            Ok(self.rows.clone())
        }

        fn insert(&mut self, new: NewWorkout) -> Result<WorkoutEntry> {
            self.fail_if_asked()?;
            self.next_id += 1;
            let row = WorkoutEntry {
                id: self.next_id.to_string(),
                name: new.name,
                date: Some(new.date),
            };
            self.rows.push(row.clone());
            Ok(row)
        }

        fn delete(&mut self, id: &str) -> Result<()> {
            self.fail_if_asked()?;
            self.rows.retain(|w| w.id != id);
            Ok(())
        }

        fn sync(&mut self, _entries: &[WorkoutEntry]) -> Result<()> {
            self.syncs += 1;
            Ok(())
        }
    }

    fn names<B: Backend>(store: &WorkoutStore<B>) -> Vec<&str> {
        store.entries().iter().map(|w| w.name.as_str()).collect()
    }

    fn abc() -> WorkoutStore<FakeTable> {
        let mut store = WorkoutStore::new(FakeTable::default());
        store.add("C");
        store.add("B");
        store.add("A");
        store
    }

    #[test]
    fn array_move_examples() {
        let mut v = vec!['A', 'B', 'C'];
        array_move(&mut v, 0, 2);
        assert_eq!(v, vec!['B', 'C', 'A']);
        array_move(&mut v, 2, 0);
        assert_eq!(v, vec!['A', 'B', 'C']);
        array_move(&mut v, 1, 5);
        assert_eq!(v, vec!['A', 'B', 'C']);
    }

    #[test]
    fn array_move_preserves_other_relative_order() {
        for from in 0..6 {
            for to in 0..6 {
                let mut v: Vec<usize> = (0..6).collect();
                array_move(&mut v, from, to);
                assert_eq!(v[to], from);
                let rest: Vec<usize> = v.iter().copied().filter(|&x| x != from).collect();
                let expected: Vec<usize> = (0..6).filter(|&x| x != from).collect();
                assert_eq!(rest, expected);
            }
        }
    }

    #[test]
    fn add_prepends() {
        let mut store = abc();
        assert_eq!(names(&store), vec!["A", "B", "C"]);
        store.add("Deadlift");
        assert_eq!(store.entries().len(), 4);
        assert_eq!(store.entries()[0].name, "Deadlift");
        assert!(store.entries()[0].date.is_some());
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut store = abc();
        store.add("");
        store.add("   \t");
        assert_eq!(names(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn remove_by_id() {
        let mut store = abc();
        let id = store.entries()[1].id.clone();
        store.remove(&id);
        assert_eq!(names(&store), vec!["A", "C"]);
        assert!(store.entries().iter().all(|w| w.id != id));

        store.remove("no-such-id");
        assert_eq!(names(&store), vec!["A", "C"]);
    }

    #[test]
    fn reorder_moves_and_persists() {
        let mut store = abc();
        let syncs = store.backend.syncs;
        store.reorder(0, 2);
        assert_eq!(names(&store), vec!["B", "C", "A"]);
        assert_eq!(store.backend.syncs, syncs + 1);

        store.reorder(1, 1);
        store.reorder(0, 9);
        assert_eq!(names(&store), vec!["B", "C", "A"]);
        assert_eq!(store.backend.syncs, syncs + 1);
    }

    #[test]
    fn failed_remote_calls_leave_memory_alone() {
        let mut store = abc();
        store.backend.failing = true;

        store.add("Squats");
        let id = store.entries()[0].id.clone();
        store.remove(&id);

        assert_eq!(names(&store), vec!["A", "B", "C"]);
        assert_eq!(store.backend.rows.len(), 3);
    }

    #[test]
    fn failed_load_leaves_empty_sequence() {
        let mut store = WorkoutStore::new(FakeTable {
            failing: true,
            ..Default::default()
        });
        store.load();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn local_sequence_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = WorkoutStore::new(LocalBackend::new(dir.path()));
        store.load();
        store.add("Run");
        store.add("Row");
        store.add("Bench");
        store.reorder(0, 2);
        let gone = store.entries()[0].id.clone();
        store.remove(&gone);
        let before = store.entries().to_vec();
        drop(store);

        let mut reopened = WorkoutStore::new(LocalBackend::new(dir.path()));
        reopened.load();
        assert_eq!(reopened.entries(), before.as_slice());
        assert_eq!(names(&reopened), vec!["Run", "Bench"]);
    }

    #[test]
    fn unreadable_local_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        let path = backend.path().to_path_buf();
        std::fs::write(&path, r#"[{"id":"1","name":"Squats"},{"id":"#).unwrap();

        let mut store = WorkoutStore::new(backend);
        store.load();
        store.add("Bench");
        store.reorder(0, 0);

        assert_eq!(names(&store), vec!["Bench"]);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"[{"id":"1","name":"Squats"},{"id":"#
        );
    }

    #[test]
    fn one_odd_date_keeps_the_whole_local_log() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        std::fs::write(
            backend.path(),
            r#"[{"id":"1","name":"Squats","date":"2025-03-01T12:30:00.000Z"},
                {"id":"2","name":"Row","date":"2025-03-01T12:30:00"},
                {"id":"3","name":"Run","date":"someday"}]"#,
        )
        .unwrap();

        let mut store = WorkoutStore::new(backend);
        store.load();
        store.add("Bench");
        assert_eq!(names(&store), vec!["Bench", "Squats", "Row", "Run"]);

        let mut reopened = WorkoutStore::new(LocalBackend::new(dir.path()));
        reopened.load();
        assert_eq!(names(&reopened), vec!["Bench", "Squats", "Row", "Run"]);
        assert!(reopened.entries()[2].date.is_some());
        assert_eq!(reopened.entries()[3].date, None);
    }

    #[test]
    fn remote_reorder_stays_in_memory() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let mut store = WorkoutStore::new(RemoteBackend::new(&RemoteConfig {
            url,
            anon_key: "anon".to_string(),
            table: "workouts".to_string(),
        }));
        store.entries = ["A", "B", "C"]
            .iter()
            .map(|name| WorkoutEntry {
                id: name.to_lowercase(),
                name: name.to_string(),
                date: None,
            })
            .collect();

        store.reorder(0, 2);
        assert_eq!(names(&store), vec!["B", "C", "A"]);
        assert!(store.backend.sync(store.entries.as_slice()).is_ok());

        let err = listener.accept().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WouldBlock);
    }
}
