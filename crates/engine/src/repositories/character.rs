//! Character roster persistence.
//!
//! The whole roster lives in memory and is written to storage as a single
//! versioned record after every mutation. Storage failures never roll back
//! the in-memory state; they are returned as [`PersistOutcome::Failed`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use herosmith_domain::{Character, CharacterId};

use crate::infrastructure::ports::{ClockPort, StorageError, StoragePort};

/// Storage key for the roster record.
pub const STORAGE_KEY: &str = "herosmith:characters";

/// Current roster record version. Records with any other version are ignored.
pub const STORAGE_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct StoredRoster<'a> {
    version: u32,
    characters: BTreeMap<String, &'a Character>,
}

/// Read shape: entries stay raw so one bad character cannot sink the rest.
#[derive(Debug, Deserialize)]
struct RawRoster {
    version: u32,
    #[serde(default)]
    characters: BTreeMap<String, serde_json::Value>,
}

/// Result of a repository mutation.
#[derive(Debug)]
pub enum PersistOutcome {
    /// The in-memory roster changed and was written to storage.
    Saved,
    /// Nothing changed; storage was not touched.
    Unchanged,
    /// The in-memory roster changed but writing it failed.
    Failed(StorageError),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved)
    }
}

/// In-memory roster backed by a [`StoragePort`].
pub struct CharacterRepository {
    characters: HashMap<CharacterId, Character>,
    storage: Arc<dyn StoragePort>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterRepository {
    /// Read the stored roster.
    ///
    /// An absent record, a record that fails to parse, or a record with an
    /// unknown version all start an empty roster. Within a readable record,
    /// entries that fail to decode are skipped and the rest are kept.
    pub fn load(storage: Arc<dyn StoragePort>, clock: Arc<dyn ClockPort>) -> Self {
        let characters = match storage.load(STORAGE_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read character roster, starting empty");
                HashMap::new()
            }
        };

        tracing::debug!(count = characters.len(), "Character roster loaded");

        Self {
            characters,
            storage,
            clock,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// All characters, in no particular order.
    pub fn list(&self) -> Vec<&Character> {
        self.characters.values().collect()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert or overwrite a character by id.
    ///
    /// `updated_at` is refreshed from the clock, and is bumped past the stored
    /// value when the clock has not moved, so it strictly increases per id.
    pub fn upsert(&mut self, mut character: Character) -> PersistOutcome {
        let mut now = self.clock.now();
        if let Some(existing) = self.characters.get(&character.id()) {
            if now <= existing.updated_at() {
                now = existing.updated_at() + Duration::milliseconds(1);
            }
        }
        character.touch(now);

        let id = character.id();
        self.characters.insert(id, character);
        tracing::info!(character_id = %id, "Character saved");
        self.persist()
    }

    /// Remove a character. Unknown ids leave storage untouched.
    pub fn delete(&mut self, id: CharacterId) -> PersistOutcome {
        if self.characters.remove(&id).is_none() {
            return PersistOutcome::Unchanged;
        }
        tracing::info!(character_id = %id, "Character deleted");
        self.persist()
    }

    fn persist(&self) -> PersistOutcome {
        match self.write() {
            Ok(()) => PersistOutcome::Saved,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist character roster");
                PersistOutcome::Failed(e)
            }
        }
    }

    fn write(&self) -> Result<(), StorageError> {
        let record = StoredRoster {
            version: STORAGE_VERSION,
            characters: self
                .characters
                .iter()
                .map(|(id, c)| (id.to_string(), c))
                .collect(),
        };
        let raw = serde_json::to_string(&record)?;
        self.storage.save(STORAGE_KEY, &raw)
    }
}

fn decode(raw: &str) -> HashMap<CharacterId, Character> {
    let record: RawRoster = match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "Stored character roster is unreadable, starting empty");
            return HashMap::new();
        }
    };
    if record.version != STORAGE_VERSION {
        tracing::warn!(
            version = record.version,
            expected = STORAGE_VERSION,
            "Unknown character roster version, starting empty"
        );
        return HashMap::new();
    }
    record
        .characters
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<Character>(value) {
            Ok(character) => Some((character.id(), character)),
            Err(e) => {
                tracing::warn!(entry = %key, error = %e, "Skipping unreadable stored character");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockClockPort, MockStoragePort};
    use crate::infrastructure::storage::{FileStorage, MemoryStorage};
    use crate::test_fixtures::{committed_character, committed_character_with_id, fill_wizard};
    use chrono::{DateTime, TimeZone, Utc};
    use herosmith_domain::{Catalog, DraftCharacter};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 18, 0, 0).unwrap()
    }

    fn fixed_clock() -> Arc<dyn ClockPort> {
        Arc::new(FixedClock(now()))
    }

    #[test]
    fn absent_record_is_empty() {
        let repo = CharacterRepository::load(Arc::new(MemoryStorage::new()), fixed_clock());
        assert!(repo.is_empty());
    }

    #[test]
    fn unknown_version_is_treated_as_empty() {
        let storage = MemoryStorage::new();
        storage
            .save(STORAGE_KEY, r#"{"version": 2, "characters": {}}"#)
            .unwrap();
        let repo = CharacterRepository::load(Arc::new(storage), fixed_clock());
        assert!(repo.is_empty());
    }

    #[test]
    fn unparsable_record_is_treated_as_empty() {
        let storage = MemoryStorage::new();
        storage.save(STORAGE_KEY, "{{{").unwrap();
        let repo = CharacterRepository::load(Arc::new(storage), fixed_clock());
        assert!(repo.is_empty());
    }

    #[test]
    fn storage_read_failure_is_treated_as_empty() {
        let mut storage = MockStoragePort::new();
        storage
            .expect_load()
            .returning(|_| Err(StorageError::LockPoisoned));
        let repo = CharacterRepository::load(Arc::new(storage), fixed_clock());
        assert!(repo.is_empty());
    }

    #[test]
    fn upsert_then_reload_round_trips() {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let character = committed_character(now());
        let id = character.id();

        let mut repo = CharacterRepository::load(storage.clone(), fixed_clock());
        assert!(repo.upsert(character).is_saved());

        let reloaded = CharacterRepository::load(storage, fixed_clock());
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get(id), repo.get(id));
    }

    #[test]
    fn upsert_overwrites_by_id() {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let mut repo = CharacterRepository::load(storage.clone(), fixed_clock());
        let character = committed_character(now());
        let id = character.id();
        repo.upsert(character);

        // Re-commit the same draft identity with a new name and notes.
        let catalog = Catalog::core();
        let mut draft = DraftCharacter::new(id, now());
        fill_wizard(&mut draft, &catalog);
        draft.set_name("Ysolde the White");
        draft.set_notes("Left the tower.");
        let revised = Character::from_draft(&draft, &catalog, now()).unwrap();
        repo.upsert(revised);

        assert_eq!(repo.len(), 1);
        let stored = repo.get(id).unwrap();
        assert_eq!(stored.name().as_str(), "Ysolde the White");
        assert_eq!(stored.notes(), "Left the tower.");

        let reloaded = CharacterRepository::load(storage, fixed_clock());
        assert_eq!(reloaded.get(id), repo.get(id));
    }

    #[test]
    fn corrupt_entry_is_skipped_and_survives_next_save() {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let mut repo = CharacterRepository::load(storage.clone(), fixed_clock());
        let ids: Vec<CharacterId> = (1..=3)
            .map(|n| CharacterId::from_uuid(Uuid::from_u128(n)))
            .collect();
        for id in &ids {
            repo.upsert(committed_character_with_id(*id, now()));
        }

        // Break one entry: level 11 is out of range.
        let raw = storage.load(STORAGE_KEY).unwrap().unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        json["characters"][ids[1].to_string()]["level"] = serde_json::json!(11);
        storage.save(STORAGE_KEY, &json.to_string()).unwrap();

        let mut reloaded = CharacterRepository::load(storage.clone(), fixed_clock());
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.get(ids[0]).is_some());
        assert!(reloaded.get(ids[1]).is_none());
        assert!(reloaded.get(ids[2]).is_some());

        let newcomer = CharacterId::from_uuid(Uuid::from_u128(4));
        reloaded.upsert(committed_character_with_id(newcomer, now()));

        let raw = storage.load(STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["characters"].as_object().unwrap().len(), 3);
    }

    #[test]
    fn updated_at_strictly_increases_with_frozen_clock() {
        let mut repo = CharacterRepository::load(Arc::new(MemoryStorage::new()), fixed_clock());
        let character = committed_character(now());
        let id = character.id();

        repo.upsert(character.clone());
        let first = repo.get(id).unwrap().updated_at();
        repo.upsert(character.clone());
        let second = repo.get(id).unwrap().updated_at();
        repo.upsert(character);
        let third = repo.get(id).unwrap().updated_at();

        assert!(first < second && second < third);
    }

    #[test]
    fn upsert_takes_time_from_clock() {
        let later = now() + Duration::hours(1);
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(later);

        let mut repo = CharacterRepository::load(Arc::new(MemoryStorage::new()), Arc::new(clock));
        let character = committed_character(now());
        let id = character.id();
        repo.upsert(character);
        assert_eq!(repo.get(id).unwrap().updated_at(), later);
    }

    #[test]
    fn delete_absent_id_does_not_touch_storage() {
        let mut storage = MockStoragePort::new();
        storage.expect_load().returning(|_| Ok(None));
        storage.expect_save().never();

        let mut repo = CharacterRepository::load(Arc::new(storage), fixed_clock());
        assert!(matches!(
            repo.delete(CharacterId::new()),
            PersistOutcome::Unchanged
        ));
    }

    #[test]
    fn delete_removes_and_persists() {
        let storage: Arc<dyn StoragePort> = Arc::new(MemoryStorage::new());
        let mut repo = CharacterRepository::load(storage.clone(), fixed_clock());
        let character = committed_character(now());
        let id = character.id();
        repo.upsert(character);

        assert!(repo.delete(id).is_saved());
        assert!(repo.get(id).is_none());
        assert!(CharacterRepository::load(storage, fixed_clock()).is_empty());
    }

    #[test]
    fn failed_write_keeps_memory_authoritative() {
        let mut storage = MockStoragePort::new();
        storage.expect_load().returning(|_| Ok(None));
        storage
            .expect_save()
            .returning(|_, _| Err(StorageError::io("write", "disk full")));

        let mut repo = CharacterRepository::load(Arc::new(storage), fixed_clock());
        let character = committed_character(now());
        let id = character.id();

        assert!(matches!(repo.upsert(character), PersistOutcome::Failed(_)));
        assert!(repo.get(id).is_some());
    }

    #[test]
    fn record_shape_is_versioned() {
        let storage = Arc::new(MemoryStorage::new());
        let mut repo = CharacterRepository::load(storage.clone(), fixed_clock());
        let character = committed_character(now());
        let id = character.id();
        repo.upsert(character);

        let raw = storage.load(STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["characters"][id.to_string()]["kinId"], "human");
    }

    #[test]
    fn file_backed_roster_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let character = committed_character(now());
        let id = character.id();

        let mut repo = CharacterRepository::load(Arc::new(FileStorage::open(&path)), fixed_clock());
        repo.upsert(character);

        let reloaded = CharacterRepository::load(Arc::new(FileStorage::open(&path)), fixed_clock());
        assert_eq!(reloaded.get(id).map(|c| c.name().as_str()), Some("Ysolde the Grey"));
    }
}
