//! Player aggregate - a generated character and its progression
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: stats only change through `advance_to_level`
//! - **Newtypes**: `CharacterName`, `ItemId`, `Archetype`
//! - **Valid by construction**: `generate()` and `from_record()` are the only
//!   ways to obtain a player
//! - **Monotonic level**: advancing never lowers the level

use serde_json::Value;

use super::player_record::PlayerRecord;
use crate::error::DomainError;
use crate::ports::RandomPort;
use crate::value_objects::{
    carry_capacity, growth_step, Ability, AbilityScores, Archetype, CharacterClass,
    CharacterName, Equipment, EquipmentSlot, ItemId, Race, ABILITY_ROLL,
};

/// What a call to [`Player::advance_to_level`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelAdvance {
    pub from_level: u32,
    pub to_level: u32,
    pub hit_points_gained: u32,
    pub magic_points_gained: u32,
}

impl LevelAdvance {
    pub fn levels_gained(&self) -> u32 {
        self.to_level - self.from_level
    }
}

/// A player character.
///
/// # Invariants
///
/// - `level >= 1` once generated, and never decreases
/// - `max_hit_points` and `max_magic_points` only grow, one step per level
/// - `max_carry` is within `[50, 500]` after any level change
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: CharacterName,
    level: u32,
    experience: u64,
    archetype: Archetype,

    // Pools
    max_hit_points: u32,
    current_hit_points: u32,
    max_magic_points: u32,
    current_magic_points: u32,
    max_carry: u32,

    abilities: AbilityScores,

    // Possessions
    equipment: Equipment,
    inventory: Vec<ItemId>,
}

impl Player {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Roll a new level 1 character.
    ///
    /// Abilities are rolled with 4d5 in strength, intelligence, dexterity,
    /// constitution order, then the character advances from level 0 to 1,
    /// which rolls the health die and the magic die once each.
    ///
    /// # Errors
    ///
    /// - `DomainError::NotFound` for an unknown race or class key
    /// - `DomainError::Validation` for an empty or over-long name
    pub fn generate(
        name: &str,
        class_key: &str,
        race_key: &str,
        rng: &dyn RandomPort,
    ) -> Result<Self, DomainError> {
        let archetype = Archetype::from_keys(race_key, class_key)?;
        let name = CharacterName::new(name)?;
        let abilities = AbilityScores::from_array(Ability::ALL.map(|_| ABILITY_ROLL.roll(rng).total));

        let mut player = Self {
            name,
            level: 0,
            experience: 0,
            archetype,
            max_hit_points: 0,
            current_hit_points: 0,
            max_magic_points: 0,
            current_magic_points: 0,
            max_carry: carry_capacity(0, abilities.strength),
            abilities,
            equipment: Equipment::empty(),
            inventory: Vec::new(),
        };
        player.advance_to_level(1, rng);
        Ok(player)
    }

    /// Rebuild a stored player. Values are taken as stored; nothing is
    /// recomputed. The one normalization is the name, which is trimmed like
    /// any other `CharacterName`, so `" Bilbo"` comes back as `"Bilbo"`.
    ///
    /// # Errors
    ///
    /// - `DomainError::MissingField` naming the first absent key
    /// - `DomainError::Validation` for wrong value types or a bad name
    /// - `DomainError::NotFound` for an unknown race or class key
    pub fn from_record(value: &Value) -> Result<Self, DomainError> {
        Self::try_from(PlayerRecord::from_value(value)?)
    }

    // =========================================================================
    // Progression
    // =========================================================================

    /// Raise the character to `target_level`.
    ///
    /// For each crossed level the health die is rolled (plus constitution
    /// modifier) and then the magic die (plus intelligence modifier), each
    /// step worth at least 1. Afterwards carry capacity is recomputed and both
    /// pools are refilled. A target at or below the current level rolls
    /// nothing and keeps the level, but still refills the pools.
    pub fn advance_to_level(&mut self, target_level: u32, rng: &dyn RandomPort) -> LevelAdvance {
        let from_level = self.level;
        let to_level = target_level.max(from_level);

        let mut hit_points_gained = 0u32;
        let mut magic_points_gained = 0u32;
        for _ in from_level..to_level {
            hit_points_gained = hit_points_gained.saturating_add(growth_step(
                self.archetype.health_die(),
                self.abilities.constitution,
                rng,
            ));
            magic_points_gained = magic_points_gained.saturating_add(growth_step(
                self.archetype.magic_die(),
                self.abilities.intelligence,
                rng,
            ));
        }

        self.level = to_level;
        self.max_hit_points = self.max_hit_points.saturating_add(hit_points_gained);
        self.max_magic_points = self.max_magic_points.saturating_add(magic_points_gained);
        self.max_carry = carry_capacity(to_level, self.abilities.strength);
        self.current_hit_points = self.max_hit_points;
        self.current_magic_points = self.max_magic_points;

        LevelAdvance {
            from_level,
            to_level,
            hit_points_gained,
            magic_points_gained,
        }
    }

    /// Append an item id to the pack, keeping acquisition order.
    pub fn add_to_inventory(&mut self, item_id: ItemId) {
        self.inventory.push(item_id);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn race(&self) -> Race {
        self.archetype.race()
    }

    pub fn character_class(&self) -> CharacterClass {
        self.archetype.class()
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    pub fn current_hit_points(&self) -> u32 {
        self.current_hit_points
    }

    pub fn max_magic_points(&self) -> u32 {
        self.max_magic_points
    }

    pub fn current_magic_points(&self) -> u32 {
        self.current_magic_points
    }

    pub fn max_carry(&self) -> u32 {
        self.max_carry
    }

    /// Rolled base scores, without archetype bonuses.
    pub fn abilities(&self) -> AbilityScores {
        self.abilities
    }

    /// Base score plus the archetype's merged bonus.
    pub fn effective_ability(&self, ability: Ability) -> i32 {
        self.abilities.get(ability) + self.archetype.bonus(ability)
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Ids in occupied equipment slots, in slot order.
    pub fn equipped_item_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.equipment.iter().map(|(_, id)| id)
    }

    /// Everything the player is carrying: equipped items, then the pack.
    pub fn carried_item_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.equipped_item_ids().chain(self.inventory.iter())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn to_record(&self) -> PlayerRecord {
        let slot = |slot: EquipmentSlot| self.equipment.get(slot).cloned();
        PlayerRecord {
            name: self.name.to_string(),
            level: self.level,
            experience: self.experience,
            race: self.race().key().to_string(),
            character_class: self.character_class().key().to_string(),
            max_hit_points: self.max_hit_points,
            current_hit_points: self.current_hit_points,
            max_magic_points: self.max_magic_points,
            current_magic_points: self.current_magic_points,
            max_carry: self.max_carry,
            strength: self.abilities.strength,
            intelligence: self.abilities.intelligence,
            dexterity: self.abilities.dexterity,
            constitution: self.abilities.constitution,
            helmet: slot(EquipmentSlot::Helmet),
            armor: slot(EquipmentSlot::Armor),
            boots: slot(EquipmentSlot::Boots),
            neck: slot(EquipmentSlot::Neck),
            finger: slot(EquipmentSlot::Finger),
            shield: slot(EquipmentSlot::Shield),
            weapon: slot(EquipmentSlot::Weapon),
            quiver: slot(EquipmentSlot::Quiver),
            inventory: self.inventory.clone(),
        }
    }
}

impl TryFrom<PlayerRecord> for Player {
    type Error = DomainError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let archetype = Archetype::from_keys(&record.race, &record.character_class)?;

        let mut equipment = Equipment::empty();
        for (slot, item) in [
            (EquipmentSlot::Helmet, record.helmet),
            (EquipmentSlot::Armor, record.armor),
            (EquipmentSlot::Boots, record.boots),
            (EquipmentSlot::Neck, record.neck),
            (EquipmentSlot::Finger, record.finger),
            (EquipmentSlot::Shield, record.shield),
            (EquipmentSlot::Weapon, record.weapon),
            (EquipmentSlot::Quiver, record.quiver),
        ] {
            equipment.set(slot, item);
        }

        Ok(Self {
            name: CharacterName::new(record.name)?,
            level: record.level,
            experience: record.experience,
            archetype,
            max_hit_points: record.max_hit_points,
            current_hit_points: record.current_hit_points,
            max_magic_points: record.max_magic_points,
            current_magic_points: record.current_magic_points,
            max_carry: record.max_carry,
            abilities: AbilityScores {
                strength: record.strength,
                intelligence: record.intelligence,
                dexterity: record.dexterity,
                constitution: record.constitution,
            },
            equipment,
            inventory: record.inventory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::testing::{CyclingRandom, FixedRandom};
    use crate::ports::MockRandomPort;
    use mockall::predicate::eq;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records the bounds of every request and answers the lower bound.
    #[derive(Default)]
    struct RecordingRandom {
        calls: Mutex<Vec<(i32, i32)>>,
    }

    impl RandomPort for RecordingRandom {
        fn gen_range(&self, min: i32, max: i32) -> i32 {
            self.calls.lock().unwrap().push((min, max));
            min
        }
    }

    fn stored_aragorn() -> Value {
        json!({
            "name": "Aragorn",
            "level": 3,
            "experience": 1200,
            "race": "DUNADAN",
            "character_class": "RANGER",
            "max_hit_points": 24,
            "current_hit_points": 9,
            "max_magic_points": 12,
            "current_magic_points": 2,
            "max_carry": 180,
            "strength": 12,
            "intelligence": 11,
            "dexterity": 14,
            "constitution": 13,
            "helmet": null,
            "armor": "leather_armor",
            "boots": null,
            "neck": null,
            "finger": null,
            "shield": null,
            "weapon": "longsword",
            "quiver": null,
            "inventory": ["potion_healing_small", "rope"]
        })
    }

    #[test]
    fn test_generate_bilbo() {
        let player = Player::generate("Bilbo", "BURGLAR", "HOBBIT", &CyclingRandom::default()).unwrap();

        assert_eq!(player.name().as_str(), "Bilbo");
        assert_eq!(player.level(), 1);
        assert_eq!(player.experience(), 0);
        assert_eq!(player.archetype().health_die(), "1d6");
        assert_eq!(player.archetype().magic_die(), "1d6");
        for ability in Ability::ALL {
            assert!((4..=20).contains(&player.abilities().get(ability)));
        }
        assert!(player.max_hit_points() >= 1);
        assert!(player.max_magic_points() >= 1);
        assert_eq!(player.current_hit_points(), player.max_hit_points());
        assert_eq!(player.current_magic_points(), player.max_magic_points());
        assert_eq!(player.max_carry(), carry_capacity(1, player.abilities().strength));
        assert!(player.equipment().is_empty());
        assert!(player.inventory().is_empty());
    }

    #[test]
    fn test_generate_aragorn_dice() {
        let player = Player::generate("Aragorn", "ranger", "dunadan", &FixedRandom(3)).unwrap();
        assert_eq!(player.archetype().health_die(), "1d10");
        assert_eq!(player.archetype().magic_die(), "1d8");
        assert_eq!(player.archetype().to_string(), "Dunadan Ranger");
    }

    #[test]
    fn test_generate_rolls_abilities_then_one_growth_step_each() {
        let mut rng = MockRandomPort::new();
        rng.expect_gen_range()
            .with(eq(1), eq(5))
            .times(16)
            .return_const(3);
        rng.expect_gen_range()
            .with(eq(1), eq(10))
            .times(1)
            .return_const(7);
        rng.expect_gen_range()
            .with(eq(1), eq(8))
            .times(1)
            .return_const(4);

        let player = Player::generate("Aragorn", "RANGER", "DUNADAN", &rng).unwrap();

        assert_eq!(player.abilities(), AbilityScores::from_array([12, 12, 12, 12]));
        // 7 + con mod 1, 4 + int mod 1
        assert_eq!(player.max_hit_points(), 8);
        assert_eq!(player.max_magic_points(), 5);
        assert_eq!(player.max_carry(), 170);
    }

    #[test]
    fn test_generate_rejects_unknown_keys_before_rolling() {
        let mut rng = MockRandomPort::new();
        rng.expect_gen_range().times(0);
        assert_eq!(
            Player::generate("Gollum", "BURGLAR", "STOOR", &rng).unwrap_err(),
            DomainError::not_found("Race", "STOOR")
        );
        assert_eq!(
            Player::generate("Gollum", "THIEF", "HOBBIT", &rng).unwrap_err(),
            DomainError::not_found("CharacterClass", "THIEF")
        );
        assert!(matches!(
            Player::generate("  ", "BURGLAR", "HOBBIT", &rng),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_advance_rolls_hp_then_mp_per_level() {
        let mut player = Player::from_record(&stored_aragorn()).unwrap();
        let rng = RecordingRandom::default();

        let advance = player.advance_to_level(5, &rng);

        assert_eq!(
            *rng.calls.lock().unwrap(),
            vec![(1, 10), (1, 8), (1, 10), (1, 8)]
        );
        // rolls of 1; con 13 -> +1, int 11 -> +0
        assert_eq!(advance.hit_points_gained, 4);
        assert_eq!(advance.magic_points_gained, 2);
        assert_eq!(advance.levels_gained(), 2);
        assert_eq!(player.level(), 5);
        assert_eq!(player.max_hit_points(), 28);
        assert_eq!(player.max_magic_points(), 14);
        assert_eq!(player.current_hit_points(), 28);
        assert_eq!(player.current_magic_points(), 14);
        // 170 * 1.12
        assert_eq!(player.max_carry(), 190);
    }

    #[test]
    fn test_advance_to_same_or_lower_level_only_heals() {
        let mut player = Player::from_record(&stored_aragorn()).unwrap();
        let mut rng = MockRandomPort::new();
        rng.expect_gen_range().times(0);

        let advance = player.advance_to_level(2, &rng);

        assert_eq!(advance.levels_gained(), 0);
        assert_eq!(advance.hit_points_gained, 0);
        assert_eq!(player.level(), 3);
        assert_eq!(player.max_hit_points(), 24);
        assert_eq!(player.current_hit_points(), 24);
        assert_eq!(player.current_magic_points(), 12);
    }

    #[test]
    fn test_growth_never_below_one_per_level() {
        let mut record = stored_aragorn();
        record["constitution"] = json!(4);
        record["intelligence"] = json!(4);
        let mut player = Player::from_record(&record).unwrap();

        let advance = player.advance_to_level(13, &FixedRandom(1));

        assert_eq!(advance.hit_points_gained, 10);
        assert_eq!(advance.magic_points_gained, 10);
    }

    #[test]
    fn test_effective_ability_adds_archetype_bonus() {
        let player = Player::from_record(&stored_aragorn()).unwrap();
        for ability in Ability::ALL {
            assert_eq!(
                player.effective_ability(ability),
                player.abilities().get(ability) + player.archetype().bonus(ability)
            );
        }
    }

    #[test]
    fn test_carried_items_are_slots_then_inventory() {
        let mut player = Player::from_record(&stored_aragorn()).unwrap();
        player.add_to_inventory(ItemId::new("rope").unwrap());

        let equipped: Vec<&str> = player.equipped_item_ids().map(ItemId::as_str).collect();
        assert_eq!(equipped, vec!["leather_armor", "longsword"]);

        let carried: Vec<&str> = player.carried_item_ids().map(ItemId::as_str).collect();
        assert_eq!(
            carried,
            vec!["leather_armor", "longsword", "potion_healing_small", "rope", "rope"]
        );
    }

    #[test]
    fn test_record_round_trip_is_exact() {
        let stored = stored_aragorn();
        let player = Player::from_record(&stored).unwrap();
        assert_eq!(serde_json::to_value(player.to_record()).unwrap(), stored);

        let generated = Player::generate("Bilbo", "BURGLAR", "HOBBIT", &CyclingRandom::default()).unwrap();
        let value = serde_json::to_value(generated.to_record()).unwrap();
        assert_eq!(Player::from_record(&value).unwrap(), generated);
    }

    #[test]
    fn test_from_record_trims_stored_name() {
        let mut padded = stored_aragorn();
        padded["name"] = json!(" Aragorn ");
        let player = Player::from_record(&padded).unwrap();
        assert_eq!(player.name().as_str(), "Aragorn");
        assert_eq!(player, Player::from_record(&stored_aragorn()).unwrap());
        assert_eq!(player.to_record().name, "Aragorn");

        let mut blank = stored_aragorn();
        blank["name"] = json!("   ");
        assert!(matches!(
            Player::from_record(&blank),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_from_record_errors() {
        let mut missing = stored_aragorn();
        missing.as_object_mut().unwrap().remove("max_carry");
        assert_eq!(
            Player::from_record(&missing).unwrap_err(),
            DomainError::missing_field("max_carry")
        );

        let mut unknown_race = stored_aragorn();
        unknown_race["race"] = json!("ORC");
        assert!(Player::from_record(&unknown_race).unwrap_err().is_not_found());

        let mut bad_slot = stored_aragorn();
        bad_slot["helmet"] = json!(42);
        assert!(matches!(
            Player::from_record(&bad_slot),
            Err(DomainError::Validation(_))
        ));
    }
}
