use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing one of the vocabulary enums from its string form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown ability: {0}")]
    UnknownAbility(String),
    #[error("Unknown damage type: {0}")]
    UnknownDamageType(String),
    #[error("Unknown die size: {0}")]
    UnknownDieSize(String),
}

/// Proficiency rank outside the untrained..=legendary range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("Proficiency rank {0} is out of range (expected 0..=4)")]
    OutOfRange(i64),
}

/// Stacking bucket of a modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    Ability,
    Proficiency,
    Circumstance,
    Item,
    Status,
    Potency,
    #[default]
    Untyped,
}

impl ModifierType {
    /// Typed modifiers compete for a single best bonus/penalty; untyped ones always stack
    pub fn is_typed(&self) -> bool {
        !matches!(self, ModifierType::Untyped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierType::Ability => "ability",
            ModifierType::Proficiency => "proficiency",
            ModifierType::Circumstance => "circumstance",
            ModifierType::Item => "item",
            ModifierType::Status => "status",
            ModifierType::Potency => "potency",
            ModifierType::Untyped => "untyped",
        }
    }
}

impl fmt::Display for ModifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Three-letter abbreviation used in selectors such as `str-based`
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    /// Selector collecting every modifier keyed off this ability
    pub fn based_selector(&self) -> String {
        format!("{}-based", self.abbreviation())
    }
}

impl FromStr for Ability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(Ability::Strength),
            "dex" | "dexterity" => Ok(Ability::Dexterity),
            "con" | "constitution" => Ok(Ability::Constitution),
            "int" | "intelligence" => Ok(Ability::Intelligence),
            "wis" | "wisdom" => Ok(Ability::Wisdom),
            "cha" | "charisma" => Ok(Ability::Charisma),
            _ => Err(ParseError::UnknownAbility(s.to_string())),
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Proficiency rank, ordered from untrained (0) to legendary (4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyRank {
    #[default]
    Untrained,
    Trained,
    Expert,
    Master,
    Legendary,
}

impl ProficiencyRank {
    pub fn value(&self) -> u8 {
        match self {
            ProficiencyRank::Untrained => 0,
            ProficiencyRank::Trained => 1,
            ProficiencyRank::Expert => 2,
            ProficiencyRank::Master => 3,
            ProficiencyRank::Legendary => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyRank::Untrained => "untrained",
            ProficiencyRank::Trained => "trained",
            ProficiencyRank::Expert => "expert",
            ProficiencyRank::Master => "master",
            ProficiencyRank::Legendary => "legendary",
        }
    }

    /// Roll option marking the rank, e.g. `proficiency:expert`
    pub fn option_tag(&self) -> String {
        format!("proficiency:{}", self.as_str())
    }
}

impl TryFrom<i64> for ProficiencyRank {
    type Error = RankError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ProficiencyRank::Untrained),
            1 => Ok(ProficiencyRank::Trained),
            2 => Ok(ProficiencyRank::Expert),
            3 => Ok(ProficiencyRank::Master),
            4 => Ok(ProficiencyRank::Legendary),
            other => Err(RankError::OutOfRange(other)),
        }
    }
}

impl fmt::Display for ProficiencyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Damage types a die or flat modifier can deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Bludgeoning,
    Piercing,
    Slashing,
    Acid,
    Cold,
    Electricity,
    Fire,
    Sonic,
    Positive,
    Negative,
    Force,
    Chaotic,
    Evil,
    Good,
    Lawful,
    Mental,
    Poison,
    Bleed,
}

impl DamageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Piercing => "piercing",
            DamageType::Slashing => "slashing",
            DamageType::Acid => "acid",
            DamageType::Cold => "cold",
            DamageType::Electricity => "electricity",
            DamageType::Fire => "fire",
            DamageType::Sonic => "sonic",
            DamageType::Positive => "positive",
            DamageType::Negative => "negative",
            DamageType::Force => "force",
            DamageType::Chaotic => "chaotic",
            DamageType::Evil => "evil",
            DamageType::Good => "good",
            DamageType::Lawful => "lawful",
            DamageType::Mental => "mental",
            DamageType::Poison => "poison",
            DamageType::Bleed => "bleed",
        }
    }

    pub fn is_physical(&self) -> bool {
        matches!(
            self,
            DamageType::Bludgeoning | DamageType::Piercing | DamageType::Slashing
        )
    }
}

impl FromStr for DamageType {
    type Err = ParseError;

    /// Accepts full names plus the single-letter physical forms used by versatile traits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.trim().to_ascii_lowercase().as_str() {
            "b" | "bludgeoning" => DamageType::Bludgeoning,
            "p" | "piercing" => DamageType::Piercing,
            "s" | "slashing" => DamageType::Slashing,
            "acid" => DamageType::Acid,
            "cold" => DamageType::Cold,
            "electricity" => DamageType::Electricity,
            "fire" => DamageType::Fire,
            "sonic" => DamageType::Sonic,
            "positive" => DamageType::Positive,
            "negative" => DamageType::Negative,
            "force" => DamageType::Force,
            "chaotic" => DamageType::Chaotic,
            "evil" => DamageType::Evil,
            "good" => DamageType::Good,
            "lawful" => DamageType::Lawful,
            "mental" => DamageType::Mental,
            "poison" => DamageType::Poison,
            "bleed" => DamageType::Bleed,
            _ => return Err(ParseError::UnknownDamageType(s.to_string())),
        };
        Ok(parsed)
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Damage categories that change how a contribution is treated downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageCategory {
    Persistent,
    Precision,
    Splash,
}

impl fmt::Display for DamageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageCategory::Persistent => write!(f, "persistent"),
            DamageCategory::Precision => write!(f, "precision"),
            DamageCategory::Splash => write!(f, "splash"),
        }
    }
}

/// Weapon and bonus damage die sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieSize {
    D4,
    D6,
    D8,
    D10,
    D12,
}

impl DieSize {
    pub fn faces(&self) -> u32 {
        match self {
            DieSize::D4 => 4,
            DieSize::D6 => 6,
            DieSize::D8 => 8,
            DieSize::D10 => 10,
            DieSize::D12 => 12,
        }
    }

    pub fn from_faces(faces: u32) -> Option<DieSize> {
        match faces {
            4 => Some(DieSize::D4),
            6 => Some(DieSize::D6),
            8 => Some(DieSize::D8),
            10 => Some(DieSize::D10),
            12 => Some(DieSize::D12),
            _ => None,
        }
    }
}

impl FromStr for DieSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        trimmed
            .strip_prefix('d')
            .and_then(|faces| faces.parse::<u32>().ok())
            .and_then(DieSize::from_faces)
            .ok_or_else(|| ParseError::UnknownDieSize(s.to_string()))
    }
}

impl fmt::Display for DieSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces())
    }
}
