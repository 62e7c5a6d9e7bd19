//! Roster view: the saved characters, most recently updated first.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use herosmith_domain::{Catalog, Character, CharacterId};

use crate::repositories::{CharacterRepository, PersistOutcome};

/// One line of the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub id: CharacterId,
    pub name: String,
    pub level: u8,
    /// Display name of the kin, or its id if the catalog no longer has it.
    pub kin: String,
    /// Display name of the class, or its id if the catalog no longer has it.
    pub class: String,
    pub updated_at: DateTime<Utc>,
}

pub struct RosterUseCase {
    catalog: Arc<Catalog>,
}

impl RosterUseCase {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Every character, newest first. Ties keep a stable order by name then id.
    pub fn list(&self, roster: &CharacterRepository) -> Vec<RosterEntry> {
        let mut characters = roster.list();
        characters.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| a.name().as_str().cmp(b.name().as_str()))
                .then_with(|| a.id().cmp(&b.id()))
        });
        characters.into_iter().map(|c| self.entry(c)).collect()
    }

    pub fn entry(&self, character: &Character) -> RosterEntry {
        RosterEntry {
            id: character.id(),
            name: character.name().to_string(),
            level: character.level().value(),
            kin: self
                .catalog
                .kin(character.kin_id())
                .map_or_else(|| character.kin_id().to_string(), |k| k.name.clone()),
            class: self
                .catalog
                .class(character.class_id())
                .map_or_else(|| character.class_id().to_string(), |c| c.name.clone()),
            updated_at: character.updated_at(),
        }
    }

    pub fn delete(&self, roster: &mut CharacterRepository, id: CharacterId) -> PersistOutcome {
        let outcome = roster.delete(id);
        if matches!(outcome, PersistOutcome::Unchanged) {
            tracing::debug!(character_id = %id, "Delete requested for unknown character");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockClockPort;
    use crate::infrastructure::storage::MemoryStorage;
    use crate::test_fixtures::committed_character_with_id;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 4, 8, 0, 0).unwrap()
    }

    #[test]
    fn lists_newest_first() {
        let mut clock = MockClockPort::new();
        let mut tick = 0;
        clock.expect_now().returning(move || {
            tick += 1;
            t0() + Duration::minutes(tick)
        });
        let mut roster = CharacterRepository::load(Arc::new(MemoryStorage::new()), Arc::new(clock));
        let ids: Vec<CharacterId> = (1..=3)
            .map(|n| CharacterId::from_uuid(Uuid::from_u128(n)))
            .collect();
        for id in &ids {
            roster.upsert(committed_character_with_id(*id, t0()));
        }
        // Touch the first again so it becomes the newest.
        let first = roster.get(ids[0]).cloned().unwrap();
        roster.upsert(first);

        let listed: Vec<CharacterId> = RosterUseCase::new(Arc::new(Catalog::core()))
            .list(&roster)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(listed, vec![ids[0], ids[2], ids[1]]);
    }

    #[test]
    fn entry_uses_catalog_names() {
        let character = committed_character_with_id(CharacterId::new(), t0());
        let entry = RosterUseCase::new(Arc::new(Catalog::core())).entry(&character);
        assert_eq!(entry.kin, "Human");
        assert_eq!(entry.class, "Wizard");
        assert_eq!(entry.level, 1);
    }

    #[test]
    fn delete_unknown_is_unchanged() {
        let mut roster =
            CharacterRepository::load(Arc::new(MemoryStorage::new()), Arc::new(FixedClock(t0())));
        let outcome = RosterUseCase::new(Arc::new(Catalog::core())).delete(&mut roster, CharacterId::new());
        assert!(matches!(outcome, PersistOutcome::Unchanged));
    }
}
