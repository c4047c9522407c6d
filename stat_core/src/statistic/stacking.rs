//! Stacking resolution - decides which modifiers count toward a total
//!
//! Rules:
//! - Ignored modifiers are disabled and never count
//! - Untyped modifiers always count in full
//! - Typed modifiers compete per (type, sign): only the best bonus and the
//!   worst penalty of each type stay enabled
//!
//! Replacement uses `>=` for bonuses and `<=` for penalties, so a later
//! modifier of equal value displaces an earlier one.

use modifier_core::{Modifier, ModifierType};
use std::collections::{BTreeMap, HashSet};

/// Resolve `enabled` flags in place and return the total
///
/// Running this again on its own output gives the same flags and total.
pub fn apply_stacking_rules(modifiers: &mut [Modifier]) -> i32 {
    let mut total = 0;
    let mut best_bonus: BTreeMap<ModifierType, usize> = BTreeMap::new();
    let mut best_penalty: BTreeMap<ModifierType, usize> = BTreeMap::new();

    for index in 0..modifiers.len() {
        if modifiers[index].ignored {
            modifiers[index].enabled = false;
            continue;
        }

        let modifier_type = modifiers[index].modifier_type;
        let incoming = modifiers[index].value;

        if !modifier_type.is_typed() {
            modifiers[index].enabled = true;
            total += incoming;
            continue;
        }

        let is_bonus = modifiers[index].is_bonus();
        let best = if is_bonus {
            &mut best_bonus
        } else {
            &mut best_penalty
        };

        match best.get(&modifier_type).copied() {
            None => {
                best.insert(modifier_type, index);
                modifiers[index].enabled = true;
                total += incoming;
            }
            Some(current) => {
                let existing = modifiers[current].value;
                let replaces = if is_bonus {
                    incoming >= existing
                } else {
                    incoming <= existing
                };

                if replaces {
                    modifiers[current].enabled = false;
                    modifiers[index].enabled = true;
                    best.insert(modifier_type, index);
                    total += incoming - existing;
                } else {
                    modifiers[index].enabled = false;
                }
            }
        }
    }

    total
}

/// Collapse modifiers sharing a name, keeping the first occurrence
pub fn dedupe_by_name(modifiers: Vec<Modifier>) -> Vec<Modifier> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(modifiers.len());

    for modifier in modifiers {
        if seen.insert(modifier.name.clone()) {
            kept.push(modifier);
        } else {
            tracing::debug!(
                "Dropping duplicate modifier '{}' ({:+})",
                modifier.name,
                modifier.value
            );
        }
    }

    kept
}
