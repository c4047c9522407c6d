//! Actor kinds and the data each one contributes to strikes

use modifier_core::Ability;
use serde::{Deserialize, Serialize};

/// The six ability scores of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(default = "default_score")]
    pub strength: i32,
    #[serde(default = "default_score")]
    pub dexterity: i32,
    #[serde(default = "default_score")]
    pub constitution: i32,
    #[serde(default = "default_score")]
    pub intelligence: i32,
    #[serde(default = "default_score")]
    pub wisdom: i32,
    #[serde(default = "default_score")]
    pub charisma: i32,
}

fn default_score() -> i32 {
    10
}

impl Default for AbilityScores {
    fn default() -> Self {
        AbilityScores {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl AbilityScores {
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        crate::tables::ability_modifier_value(self.score(ability))
    }
}

/// Class features the damage synthesizer knows how to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "feature", rename_all = "snake_case")]
pub enum Feature {
    /// Dexterity to damage with melee finesse weapons when it is higher
    ThiefRacket,
    /// Flat damage equal to the weapon proficiency rank from expert up
    WeaponSpecialization,
    /// Doubles weapon specialization
    GreaterWeaponSpecialization,
    /// Precision d6s against flat-footed targets with agile, finesse or ranged weapons
    SneakAttack { dice: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub level: i32,
    #[serde(default)]
    pub abilities: AbilityScores,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl CharacterData {
    pub fn new(level: i32, abilities: AbilityScores) -> Self {
        CharacterData {
            level,
            abilities,
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}

/// NPC strikes carry their full damage in the base profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcData {
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamiliarData {
    pub master_level: i32,
}

/// Closed set of actor kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActorKind {
    Character(CharacterData),
    Npc(NpcData),
    Familiar(FamiliarData),
}

impl ActorKind {
    /// Level used for proficiency; familiars use their master's
    pub fn level(&self) -> i32 {
        match self {
            ActorKind::Character(character) => character.level,
            ActorKind::Npc(npc) => npc.level,
            ActorKind::Familiar(familiar) => familiar.master_level,
        }
    }

    /// Ability modifier, for actors that track ability scores
    pub fn ability_modifier(&self, ability: Ability) -> Option<i32> {
        match self {
            ActorKind::Character(character) => Some(character.abilities.modifier(ability)),
            ActorKind::Npc(_) | ActorKind::Familiar(_) => None,
        }
    }

    pub fn features(&self) -> &[Feature] {
        match self {
            ActorKind::Character(character) => &character.features,
            ActorKind::Npc(_) | ActorKind::Familiar(_) => &[],
        }
    }
}
