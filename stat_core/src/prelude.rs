//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Statistics
pub use crate::statistic::{BreakdownEntry, CheckModifier, StatisticModifier};

// Checks
pub use crate::check::{
    calculate_degree_of_success, AdjustmentDirection, AdjustmentScope, CheckOutcome,
    DegreeAdjustment, DegreeOfSuccess, DieRoll,
};

// Tables
pub use crate::tables::{ability_modifier, proficiency_modifier};

// Actors
pub use crate::types::{AbilityScores, ActorKind, CharacterData, FamiliarData, Feature, NpcData};

// Damage system
pub use crate::damage::{
    calculate_weapon_damage, BaseDamage, DamageFormula, PropertyRune, StrikeContext, StrikingRune,
    Weapon, WeaponDamage, WeaponRange,
};

// Config
pub use crate::config::{CriticalDoubling, EngineConfig, ProficiencyConfig};

// Re-exports from modifier_core
pub use modifier_core::{
    Ability, DamageDie, DamageType, DieSize, Modifier, ModifierPools, ModifierType, OptionSet,
    Predicate, ProficiencyRank,
};
