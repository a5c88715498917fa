use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use log::warn;

use super::error::StoreError;
use super::reminder::{Category, Priority, Reminder, ReminderDraft};

pub const STORE_FILE: &str = "reminders.json";

/// Overrides the default data location; handy for scratch runs.
pub const DATA_PATH_ENV: &str = "REMIND_TUI_DATA";

/// The canonical reminder collection and its durable JSON snapshot.
///
/// The store holds the only writable copy. Every successful mutation
/// rewrites the whole file; read access hands out immutable slices in
/// insertion order.
pub struct ReminderStore {
    path: PathBuf,
    reminders: Vec<Reminder>,
}

impl ReminderStore {
    /// Opens the store at `path`, seeding it with the sample set when the
    /// file is absent or unreadable. Only a failed seed persist errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<Reminder>>(&raw) {
                Ok(reminders) => Ok(Self { path, reminders }),
                Err(err) => {
                    warn!(
                        "discarding unreadable reminder data in {}: {err}",
                        path.display()
                    );
                    Self::seeded(path)
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::seeded(path),
            Err(err) => {
                warn!("cannot read {}: {err}", path.display());
                Self::seeded(path)
            }
        }
    }

    /// Opens the store at the per-user data directory (or wherever
    /// `REMIND_TUI_DATA` points).
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(default_path())
    }

    fn seeded(path: PathBuf) -> Result<Self, StoreError> {
        let store = Self {
            path,
            reminders: seed_reminders(),
        };
        store.persist()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only snapshot, insertion order preserved.
    pub fn all(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Validates the draft, stamps id/created, appends, persists.
    ///
    /// A validation failure mutates nothing. A persist failure leaves the
    /// new reminder in memory and reports it, matching the UI policy of
    /// showing the change while warning that it was not saved.
    pub fn add(&mut self, draft: ReminderDraft) -> Result<Reminder, StoreError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StoreError::MissingField("title"));
        }
        let date = draft.date.ok_or(StoreError::MissingField("date"))?;
        let time = draft.time.ok_or(StoreError::MissingField("time"))?;

        let reminder = Reminder {
            id: self.fresh_id(),
            title: title.to_owned(),
            description: draft.description.trim().to_owned(),
            date,
            time,
            category: draft.category,
            priority: draft.priority,
            completed: false,
            created: Utc::now(),
        };
        self.reminders.push(reminder.clone());
        self.persist()?;
        Ok(reminder)
    }

    /// Flips `completed` on the matching entry and persists.
    pub fn toggle_completed(&mut self, id: i64) -> Result<Reminder, StoreError> {
        let reminder = self
            .reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        reminder.completed = !reminder.completed;
        let updated = reminder.clone();
        self.persist()?;
        Ok(updated)
    }

    /// Removes the matching entry and persists.
    pub fn remove(&mut self, id: i64) -> Result<(), StoreError> {
        let index = self
            .reminders
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.reminders.remove(index);
        self.persist()
    }

    /// Ids derive from the wall clock, which keeps them roughly in
    /// insertion order; a collision (two adds in the same millisecond, or
    /// the low-numbered seed ids) bumps until free.
    fn fresh_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.reminders.iter().any(|r| r.id == id) {
            id += 1;
        }
        id
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Save {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&self.reminders)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Save {
            path: self.path.clone(),
            source,
        })
    }
}

fn default_path() -> PathBuf {
    if let Some(path) = std::env::var_os(DATA_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs::data_dir()
        .map(|d| d.join("remind-tui").join(STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE))
}

/// The starter collection a fresh (or corrupted) store is seeded with.
fn seed_reminders() -> Vec<Reminder> {
    fn seed(
        id: i64,
        title: &str,
        description: &str,
        date: (i32, u32, u32),
        time: (u32, u32),
        category: Category,
        priority: Priority,
        completed: bool,
        created: (i32, u32, u32),
    ) -> Reminder {
        Reminder {
            id,
            title: title.to_owned(),
            description: description.to_owned(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid seed date"),
            time: NaiveTime::from_hms_opt(time.0, time.1, 0).expect("valid seed time"),
            category,
            priority,
            completed,
            created: Utc
                .with_ymd_and_hms(created.0, created.1, created.2, 0, 0, 0)
                .single()
                .expect("valid seed timestamp"),
        }
    }

    vec![
        seed(
            1,
            "Team Meeting",
            "Weekly team sync to discuss project progress",
            (2025, 11, 11),
            (10, 0),
            Category::Work,
            Priority::High,
            false,
            (2025, 11, 10),
        ),
        seed(
            2,
            "Doctor Appointment",
            "Annual health checkup",
            (2025, 11, 12),
            (14, 30),
            Category::Health,
            Priority::Medium,
            false,
            (2025, 11, 9),
        ),
        seed(
            3,
            "Grocery Shopping",
            "Weekly grocery run - milk, bread, vegetables",
            (2025, 11, 11),
            (18, 0),
            Category::Shopping,
            Priority::Low,
            true,
            (2025, 11, 8),
        ),
        seed(
            4,
            "Project Deadline",
            "Submit final deliverables for client",
            (2025, 11, 15),
            (17, 0),
            Category::Work,
            Priority::High,
            false,
            (2025, 11, 7),
        ),
        seed(
            5,
            "Gym Workout",
            "Leg day routine - squats, lunges, calf raises",
            (2025, 11, 13),
            (7, 0),
            Category::Health,
            Priority::Medium,
            false,
            (2025, 11, 6),
        ),
        seed(
            6,
            "Family Dinner",
            "Weekly family get-together at mom's place",
            (2025, 11, 14),
            (19, 0),
            Category::Personal,
            Priority::Medium,
            false,
            (2025, 11, 5),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (ReminderStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ReminderStore::open(dir.path().join(STORE_FILE)).unwrap();
        (store, dir)
    }

    fn draft(title: &str, date: (i32, u32, u32)) -> ReminderDraft {
        ReminderDraft {
            title: title.to_owned(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            time: NaiveTime::from_hms_opt(9, 0, 0),
            category: Category::Work,
            priority: Priority::Low,
        }
    }

    #[test]
    fn fresh_store_is_seeded_and_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);

        let store = ReminderStore::open(&path).unwrap();
        assert_eq!(store.all().len(), 6);
        assert!(path.exists());

        let ids: Vec<i64> = store.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn add_assigns_unique_id_and_clears_completed() {
        let (mut store, _dir) = temp_store();

        let first = store.add(draft("X", (2025, 11, 20))).unwrap();
        let second = store.add(draft("Y", (2025, 11, 21))).unwrap();

        assert!(!first.completed);
        assert_ne!(first.id, second.id);
        let mut ids: Vec<i64> = store.all().iter().map(|r| r.id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn add_rejects_incomplete_drafts_without_mutating() {
        let (mut store, _dir) = temp_store();
        let before = store.all().to_vec();

        let blank_title = ReminderDraft {
            title: "   ".to_owned(),
            ..draft("", (2025, 11, 20))
        };
        assert!(matches!(
            store.add(blank_title),
            Err(StoreError::MissingField("title"))
        ));

        let no_date = ReminderDraft {
            date: None,
            ..draft("X", (2025, 11, 20))
        };
        assert!(matches!(
            store.add(no_date),
            Err(StoreError::MissingField("date"))
        ));

        let no_time = ReminderDraft {
            time: None,
            ..draft("X", (2025, 11, 20))
        };
        assert!(matches!(
            store.add(no_time),
            Err(StoreError::MissingField("time"))
        ));

        assert_eq!(store.all(), &before[..]);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let (mut store, _dir) = temp_store();
        let id = store.all()[0].id;
        let original = store.all()[0].completed;

        let flipped = store.toggle_completed(id).unwrap();
        assert_eq!(flipped.completed, !original);

        let restored = store.toggle_completed(id).unwrap();
        assert_eq!(restored.completed, original);
    }

    #[test]
    fn toggle_and_remove_report_unknown_ids() {
        let (mut store, _dir) = temp_store();
        let before = store.all().to_vec();

        assert!(matches!(
            store.toggle_completed(999),
            Err(StoreError::NotFound(999))
        ));
        assert!(matches!(store.remove(999), Err(StoreError::NotFound(999))));
        assert_eq!(store.all(), &before[..]);
    }

    #[test]
    fn removed_id_never_comes_back() {
        let (mut store, _dir) = temp_store();
        let id = store.all()[2].id;

        store.remove(id).unwrap();
        assert!(store.all().iter().all(|r| r.id != id));

        // And not after a reload either.
        let reloaded = ReminderStore::open(store.path()).unwrap();
        assert!(reloaded.all().iter().all(|r| r.id != id));
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);

        let mut store = ReminderStore::open(&path).unwrap();
        store.add(draft("Round trip", (2025, 12, 1))).unwrap();
        let written = store.all().to_vec();

        let reloaded = ReminderStore::open(&path).unwrap();
        assert_eq!(reloaded.all(), &written[..]);
    }

    #[test]
    fn malformed_payload_reinitializes_to_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        fs::write(&path, "{ not json ]").unwrap();

        let store = ReminderStore::open(&path).unwrap();
        assert_eq!(store.all().len(), 6);
        assert_eq!(store.all()[0].title, "Team Meeting");

        // The rewrite happened immediately, so a reopen parses cleanly.
        let reloaded = ReminderStore::open(&path).unwrap();
        assert_eq!(reloaded.all(), store.all());
    }

    #[test]
    fn added_entry_lands_on_its_date() {
        let (mut store, _dir) = temp_store();
        let added = store.add(draft("X", (2025, 11, 20))).unwrap();

        let on_date: Vec<&Reminder> = store
            .all()
            .iter()
            .filter(|r| r.date == NaiveDate::from_ymd_opt(2025, 11, 20).unwrap())
            .collect();
        assert_eq!(on_date.len(), 1);
        assert_eq!(on_date[0].id, added.id);
        assert_eq!(on_date[0].title, "X");
    }
}
