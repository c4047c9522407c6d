//! Weapon damage synthesis
//!
//! Turns a weapon, the striking actor and the caller's selector-keyed pools
//! into two dice formulas: one for a success and one for a critical success.

mod calculation;
mod formula;
mod pool;
mod weapon;

pub use calculation::calculate_weapon_damage;
pub use formula::{DamageFormula, Scaling};
pub use pool::{DamagePool, DiceTerm, TypePool};
pub use weapon::{BaseDamage, PropertyRune, StrikingRune, Weapon, WeaponRange};

use crate::check::DegreeOfSuccess;
use crate::types::ActorKind;
use modifier_core::{DamageDie, Modifier, ModifierPools, OptionSet, ProficiencyRank};
use serde::Serialize;

/// Everything about the attacker that a strike reads
#[derive(Debug, Clone, Copy)]
pub struct StrikeContext<'a> {
    pub actor: &'a ActorKind,
    /// Proficiency rank with the weapon, for specialization damage
    pub proficiency: ProficiencyRank,
    pub pools: &'a ModifierPools,
    pub options: &'a OptionSet,
}

impl<'a> StrikeContext<'a> {
    pub fn new(
        actor: &'a ActorKind,
        proficiency: ProficiencyRank,
        pools: &'a ModifierPools,
        options: &'a OptionSet,
    ) -> Self {
        StrikeContext {
            actor,
            proficiency,
            pools,
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageFormulas {
    pub success: DamageFormula,
    pub critical_success: DamageFormula,
}

/// Result of damage synthesis for one weapon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponDamage {
    /// Base damage after two-hand and versatile toggles
    pub base: BaseDamage,
    /// Weapon dice plus striking dice, for effects that count weapon dice
    pub effect_dice: i32,
    pub dice_modifiers: Vec<DamageDie>,
    pub numeric_modifiers: Vec<Modifier>,
    pub traits: Vec<String>,
    pub formula: DamageFormulas,
}

impl WeaponDamage {
    /// Formula for a degree of success; failures deal no damage
    pub fn formula_for(&self, degree: DegreeOfSuccess) -> Option<&DamageFormula> {
        match degree {
            DegreeOfSuccess::Success => Some(&self.formula.success),
            DegreeOfSuccess::CriticalSuccess => Some(&self.formula.critical_success),
            DegreeOfSuccess::Failure | DegreeOfSuccess::CriticalFailure => None,
        }
    }
}
