//! Selector-keyed modifier and dice pools supplied by the orchestrator

use crate::modifier::{DamageDie, Modifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selector applying to every check
pub const ALL_SELECTOR: &str = "all";
/// Selector applying to every damage roll
pub const DAMAGE_SELECTOR: &str = "damage";

/// Selector for one weapon's damage rolls, e.g. `longsword-damage`
pub fn weapon_damage_selector(slug: &str) -> String {
    format!("{}-damage", slug)
}

/// Modifiers and damage dice grouped by selector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierPools {
    #[serde(default)]
    pub modifiers: BTreeMap<String, Vec<Modifier>>,
    #[serde(default)]
    pub dice: BTreeMap<String, Vec<DamageDie>>,
}

impl ModifierPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_modifier(&mut self, selector: impl Into<String>, modifier: Modifier) {
        self.modifiers.entry(selector.into()).or_default().push(modifier);
    }

    pub fn add_die(&mut self, selector: impl Into<String>, mut die: DamageDie) {
        let selector = selector.into();
        die.selector = selector.clone();
        self.dice.entry(selector).or_default().push(die);
    }

    /// Clones of every modifier under the given selectors, in selector order
    pub fn modifiers_for<S: AsRef<str>>(&self, selectors: &[S]) -> Vec<Modifier> {
        selectors
            .iter()
            .filter_map(|s| self.modifiers.get(s.as_ref()))
            .flatten()
            .cloned()
            .collect()
    }

    /// Clones of every damage die under the given selectors, in selector order
    pub fn dice_for<S: AsRef<str>>(&self, selectors: &[S]) -> Vec<DamageDie> {
        selectors
            .iter()
            .filter_map(|s| self.dice.get(s.as_ref()))
            .flatten()
            .cloned()
            .collect()
    }

    /// Append every entry of `other` after this pool's own entries
    pub fn merge(&mut self, other: ModifierPools) {
        for (selector, modifiers) in other.modifiers {
            self.modifiers.entry(selector).or_default().extend(modifiers);
        }
        for (selector, dice) in other.dice {
            self.dice.entry(selector).or_default().extend(dice);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.values().all(Vec::is_empty) && self.dice.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DieSize, ModifierType};

    #[test]
    fn test_modifiers_for_keeps_selector_order() {
        let mut pools = ModifierPools::new();
        pools.add_modifier("all", Modifier::new("frightened", -1, ModifierType::Status));
        pools.add_modifier("fortitude", Modifier::new("resilient", 1, ModifierType::Item));

        let collected = pools.modifiers_for(&["fortitude", "all", "missing"]);
        let names: Vec<_> = collected.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["resilient", "frightened"]);
    }

    #[test]
    fn test_add_die_records_selector() {
        let mut pools = ModifierPools::new();
        pools.add_die(
            weapon_damage_selector("dagger"),
            DamageDie::new("extra", 1, Some(DieSize::D4)),
        );
        let dice = pools.dice_for(&["dagger-damage"]);
        assert_eq!(dice.len(), 1);
        assert_eq!(dice[0].selector, "dagger-damage");
    }

    #[test]
    fn test_merge_appends() {
        let mut a = ModifierPools::new();
        a.add_modifier("damage", Modifier::untyped("one", 1));
        let mut b = ModifierPools::new();
        b.add_modifier("damage", Modifier::untyped("two", 2));
        a.merge(b);
        assert_eq!(a.modifiers_for(&[DAMAGE_SELECTOR]).len(), 2);
        assert!(!a.is_empty());
    }
}
