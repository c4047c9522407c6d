//! modifier_core - Value objects for check and damage resolution
//!
//! This library provides:
//! - Modifier: a named, typed numeric contribution
//! - DamageDie: extra damage dice with optional die/type overrides
//! - Predicate: `all` / `any` / `not` gates over an OptionSet
//! - ModifierPools: selector-keyed pools assembled by the caller
//!
//! The stacking engine, proficiency tables and damage synthesis live in
//! `stat_core`; this crate only holds the shared vocabulary.

pub mod modifier;
pub mod pools;
pub mod predicate;
pub mod types;

pub use modifier::{DamageDie, DieOverride, Modifier};
pub use pools::{weapon_damage_selector, ModifierPools, ALL_SELECTOR, DAMAGE_SELECTOR};
pub use predicate::{OptionSet, Predicate};
pub use types::{
    Ability, DamageCategory, DamageType, DieSize, ModifierType, ParseError, ProficiencyRank,
    RankError,
};
