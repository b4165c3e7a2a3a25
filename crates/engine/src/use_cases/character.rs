//! Character use cases: roll a new character, level it up, load it back.

use std::sync::Arc;

use thangorodrim_domain::{DomainError, LevelAdvance, Player, RandomPort};

use crate::infrastructure::storage::{JsonStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Character lifecycle operations against the store.
pub struct CharacterUseCases {
    store: Arc<JsonStore>,
    random: Arc<dyn RandomPort>,
}

impl CharacterUseCases {
    pub fn new(store: Arc<JsonStore>, random: Arc<dyn RandomPort>) -> Self {
        Self { store, random }
    }

    /// Generate a level 1 character and save it.
    pub fn create(
        &self,
        name: &str,
        class_key: &str,
        race_key: &str,
    ) -> Result<Player, CharacterError> {
        let player = Player::generate(name, class_key, race_key, self.random.as_ref())?;
        self.store.save_player(&player)?;

        tracing::info!(
            player = %player.name(),
            archetype = %player.archetype(),
            strength = player.abilities().strength,
            intelligence = player.abilities().intelligence,
            dexterity = player.abilities().dexterity,
            constitution = player.abilities().constitution,
            max_hit_points = player.max_hit_points(),
            max_magic_points = player.max_magic_points(),
            max_carry = player.max_carry(),
            "Character created"
        );
        Ok(player)
    }

    /// Advance a saved character to `target_level` and save the result.
    pub fn level_up(
        &self,
        name: &str,
        target_level: u32,
    ) -> Result<(Player, LevelAdvance), CharacterError> {
        let mut player = self.store.load_player(name)?;
        let advance = player.advance_to_level(target_level, self.random.as_ref());

        tracing::debug!(
            player = %player.name(),
            hit_points_gained = advance.hit_points_gained,
            magic_points_gained = advance.magic_points_gained,
            "Level growth rolled"
        );

        self.store.save_player(&player)?;

        tracing::info!(
            player = %player.name(),
            from_level = advance.from_level,
            level = advance.to_level,
            max_hit_points = player.max_hit_points(),
            max_magic_points = player.max_magic_points(),
            max_carry = player.max_carry(),
            "Character advanced"
        );
        Ok((player, advance))
    }

    pub fn load(&self, name: &str) -> Result<Player, CharacterError> {
        let player = self.store.load_player(name)?;
        tracing::info!(player = %player.name(), level = player.level(), "Character loaded");
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::random::{FixedRandom, SeededRandom};

    fn use_cases(dir: &tempfile::TempDir, random: Arc<dyn RandomPort>) -> CharacterUseCases {
        CharacterUseCases::new(Arc::new(JsonStore::new(dir.path())), random)
    }

    #[test]
    fn test_create_saves_level_one_character() {
        let dir = tempfile::tempdir().unwrap();
        let characters = use_cases(&dir, Arc::new(FixedRandom(3)));

        let bilbo = characters.create("Bilbo", "BURGLAR", "HOBBIT").unwrap();

        assert_eq!(bilbo.level(), 1);
        assert_eq!(bilbo.experience(), 0);
        assert!(dir.path().join("players").join("bilbo.json").exists());
        assert_eq!(characters.load("Bilbo").unwrap(), bilbo);
    }

    #[test]
    fn test_create_rejects_unknown_class() {
        let dir = tempfile::tempdir().unwrap();
        let characters = use_cases(&dir, Arc::new(FixedRandom(3)));

        match characters.create("Bilbo", "BARD", "HOBBIT") {
            Err(CharacterError::Domain(err)) => assert!(err.is_not_found()),
            other => panic!("expected not found, got {other:?}"),
        }
        assert!(!dir.path().join("players").exists());
    }

    #[test]
    fn test_level_up_persists() {
        let dir = tempfile::tempdir().unwrap();
        let characters = use_cases(&dir, Arc::new(FixedRandom(3)));
        let created = characters.create("Aragorn", "RANGER", "DUNADAN").unwrap();

        let (advanced, advance) = characters.level_up("Aragorn", 4).unwrap();

        assert_eq!(advance.levels_gained(), 3);
        assert_eq!(advanced.level(), 4);
        // 3 + con mod 1 per level
        assert_eq!(advanced.max_hit_points(), created.max_hit_points() + 12);
        assert_eq!(characters.load("Aragorn").unwrap(), advanced);
    }

    #[test]
    fn test_level_up_to_current_level_rolls_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let characters = use_cases(&dir, Arc::new(FixedRandom(3)));
        let created = characters.create("Aragorn", "RANGER", "DUNADAN").unwrap();

        let (same, advance) = characters.level_up("Aragorn", 1).unwrap();
        assert_eq!(advance.levels_gained(), 0);
        assert_eq!(same, created);
    }

    #[test]
    fn test_level_up_unknown_character() {
        let dir = tempfile::tempdir().unwrap();
        let characters = use_cases(&dir, Arc::new(FixedRandom(3)));
        assert!(matches!(
            characters.level_up("Nobody", 2),
            Err(CharacterError::Storage(StorageError::PlayerNotFound(_)))
        ));
    }

    #[test]
    fn test_create_refuses_name_sharing_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let characters = use_cases(&dir, Arc::new(FixedRandom(3)));
        let frodo = characters.create("Frodo Baggins", "BURGLAR", "HOBBIT").unwrap();

        assert!(matches!(
            characters.create("Frodo_Baggins", "WIZARD", "ELF"),
            Err(CharacterError::Storage(StorageError::NameCollision { .. }))
        ));
        assert!(matches!(
            characters.level_up("Frodo-Baggins", 3),
            Err(CharacterError::Storage(StorageError::NameCollision { .. }))
        ));
        assert_eq!(characters.load("Frodo Baggins").unwrap(), frodo);
    }

    #[test]
    fn test_seeded_creation_is_reproducible() {
        let first_dir = tempfile::tempdir().unwrap();
        let second_dir = tempfile::tempdir().unwrap();
        let first = use_cases(&first_dir, Arc::new(SeededRandom::new(99)))
            .create("Legolas", "RANGER", "ELF")
            .unwrap();
        let second = use_cases(&second_dir, Arc::new(SeededRandom::new(99)))
            .create("Legolas", "RANGER", "ELF")
            .unwrap();
        assert_eq!(first, second);
    }
}
