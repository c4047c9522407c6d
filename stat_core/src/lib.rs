//! stat_core - Modifier resolution and damage formula engine
//!
//! This library provides:
//! - StatisticModifier / CheckModifier: stacked modifier totals with breakdowns
//! - Ability and proficiency tables
//! - Degree of success resolution with natural 20/1 and adjustments
//! - Weapon damage synthesis into dice formulas
//!
//! Every computation takes its configuration explicitly; there is no
//! global state.
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::prelude::*;
//!
//! let config = EngineConfig::default();
//! let actor = ActorKind::Character(CharacterData::new(1, AbilityScores::default()));
//!
//! let mut pools = ModifierPools::new();
//! pools.add_modifier("damage", Modifier::new("weapon-potency", 2, ModifierType::Item));
//!
//! let weapon = Weapon::new(
//!     "shortsword",
//!     "Shortsword",
//!     BaseDamage::new(1, DieSize::D6, DamageType::Slashing),
//! )
//! .with_striking(StrikingRune::Striking);
//!
//! let options = OptionSet::new();
//! let context = StrikeContext::new(&actor, ProficiencyRank::Trained, &pools, &options);
//! let damage = calculate_weapon_damage(&weapon, &context, &config);
//! assert_eq!(damage.formula.success.formula, "{2d6,1}kh + 2");
//! ```

pub mod check;
pub mod config;
pub mod damage;
pub mod prelude;
pub mod statistic;
pub mod tables;
pub mod types;

// Core API - what most users need
pub use check::{calculate_degree_of_success, CheckOutcome, DegreeOfSuccess, DieRoll};
pub use damage::{calculate_weapon_damage, DamageFormula, StrikeContext, Weapon, WeaponDamage};
pub use statistic::{CheckModifier, StatisticModifier};
pub use types::ActorKind;

// Configuration
pub use config::{ConfigError, EngineConfig};

// Re-export the shared vocabulary from modifier_core
pub use modifier_core::{Modifier, ModifierPools, ModifierType, OptionSet, Predicate};
