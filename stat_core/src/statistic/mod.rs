//! Statistic totals built from stacked modifiers

mod stacking;

pub use stacking::{apply_stacking_rules, dedupe_by_name};

use crate::check::DieRoll;
use modifier_core::{Modifier, ModifierPools, OptionSet};
use rand::Rng;
use serde::Serialize;

/// One enabled line of a statistic breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub value: i32,
}

/// All modifiers for one statistic and their resolved total
///
/// Built once per preparation pass. The total is recomputed by every
/// mutation, so it is never observed out of date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticModifier {
    name: String,
    modifiers: Vec<Modifier>,
    total_modifier: i32,
}

impl StatisticModifier {
    /// De-duplicate by name (first occurrence wins) and resolve stacking
    pub fn new(name: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        let mut statistic = StatisticModifier {
            name: name.into(),
            modifiers: dedupe_by_name(modifiers),
            total_modifier: 0,
        };
        statistic.recompute();
        statistic
    }

    /// Build from base modifiers plus every pooled modifier under `selectors`
    ///
    /// Each modifier's predicate is evaluated against `options`; a failing
    /// predicate marks the modifier ignored rather than removing it, so it
    /// still shows up (disabled) in the modifier list.
    pub fn from_pools<S: AsRef<str>>(
        name: impl Into<String>,
        base: Vec<Modifier>,
        pools: &ModifierPools,
        selectors: &[S],
        options: &OptionSet,
    ) -> Self {
        let mut modifiers = base;
        modifiers.extend(pools.modifiers_for(selectors));
        for modifier in &mut modifiers {
            modifier.apply_predicate(options);
        }
        Self::new(name, modifiers)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn total_modifier(&self) -> i32 {
        self.total_modifier
    }

    /// Passive DC for this statistic
    pub fn dc(&self) -> i32 {
        10 + self.total_modifier
    }

    /// Add a modifier unless one with the same name is already present
    pub fn push(&mut self, modifier: Modifier) -> bool {
        if self.modifiers.iter().any(|m| m.name == modifier.name) {
            tracing::debug!(
                "Statistic '{}' already has a modifier named '{}'",
                self.name,
                modifier.name
            );
            return false;
        }
        self.modifiers.push(modifier);
        self.recompute();
        true
    }

    /// Remove the modifier with the given name
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.name != name);
        let removed = self.modifiers.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Enabled modifiers as `(label, value)` pairs, in modifier order
    pub fn breakdown(&self) -> Vec<BreakdownEntry> {
        self.modifiers
            .iter()
            .filter(|m| m.enabled)
            .map(|m| BreakdownEntry {
                label: m.label().to_string(),
                value: m.value,
            })
            .collect()
    }

    /// Breakdown rendered as `Label +2, Other -1`
    pub fn breakdown_string(&self) -> String {
        self.breakdown()
            .iter()
            .map(|entry| format!("{} {:+}", entry.label, entry.value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn recompute(&mut self) {
        self.total_modifier = apply_stacking_rules(&mut self.modifiers);
    }
}

/// A statistic cloned for a single roll, with roll-specific extras added
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckModifier {
    statistic: StatisticModifier,
}

impl CheckModifier {
    /// Clone `statistic` and add the roll-specific `extra` modifiers
    ///
    /// An extra whose name is already present on the statistic is dropped
    /// with a warning; the statistic's own modifier wins.
    pub fn new(statistic: &StatisticModifier, extra: Vec<Modifier>) -> Self {
        let mut statistic = statistic.clone();
        for modifier in extra {
            let name = modifier.name.clone();
            if !statistic.push(modifier) {
                tracing::warn!(
                    "Check '{}' already has a modifier named '{}'; extra dropped",
                    statistic.name(),
                    name
                );
            }
        }
        CheckModifier { statistic }
    }

    /// Like [`CheckModifier::new`], evaluating each extra's predicate first
    pub fn with_options(
        statistic: &StatisticModifier,
        extra: Vec<Modifier>,
        options: &OptionSet,
    ) -> Self {
        let extra = extra
            .into_iter()
            .map(|mut modifier| {
                modifier.apply_predicate(options);
                modifier
            })
            .collect();
        Self::new(statistic, extra)
    }

    pub fn name(&self) -> &str {
        self.statistic.name()
    }

    pub fn modifiers(&self) -> &[Modifier] {
        self.statistic.modifiers()
    }

    pub fn total_modifier(&self) -> i32 {
        self.statistic.total_modifier()
    }

    pub fn breakdown(&self) -> Vec<BreakdownEntry> {
        self.statistic.breakdown()
    }

    pub fn breakdown_string(&self) -> String {
        self.statistic.breakdown_string()
    }

    /// Roll a d20 with this check's total
    pub fn roll(&self, rng: &mut impl Rng) -> DieRoll {
        DieRoll::roll_d20(self.total_modifier(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modifier_core::{ModifierType, Predicate};
    use rand::SeedableRng;

    fn statistic() -> StatisticModifier {
        StatisticModifier::new(
            "fortitude",
            vec![
                Modifier::new("con", 3, ModifierType::Ability).with_label("Constitution"),
                Modifier::new("expert", 9, ModifierType::Proficiency).with_label("Expert"),
                Modifier::new("resilient", 1, ModifierType::Item).with_label("Resilient"),
            ],
        )
    }

    #[test]
    fn test_total_and_breakdown() {
        let stat = statistic();
        assert_eq!(stat.total_modifier(), 13);
        assert_eq!(stat.dc(), 23);
        assert_eq!(stat.breakdown_string(), "Constitution +3, Expert +9, Resilient +1");
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let stat = StatisticModifier::new(
            "ac",
            vec![
                Modifier::new("shield", 2, ModifierType::Circumstance),
                Modifier::new("shield", 4, ModifierType::Circumstance),
            ],
        );
        assert_eq!(stat.modifiers().len(), 1);
        assert_eq!(stat.total_modifier(), 2);
    }

    #[test]
    fn test_push_recomputes() {
        let mut stat = statistic();
        assert!(stat.push(Modifier::new("heroism", 1, ModifierType::Status)));
        assert_eq!(stat.total_modifier(), 14);
        assert!(!stat.push(Modifier::new("heroism", 3, ModifierType::Status)));
        assert_eq!(stat.total_modifier(), 14);
    }

    #[test]
    fn test_push_better_item_bonus_replaces() {
        let mut stat = statistic();
        stat.push(Modifier::new("greater-resilient", 2, ModifierType::Item));
        assert_eq!(stat.total_modifier(), 14);
        assert!(!stat.modifiers()[2].enabled);
    }

    #[test]
    fn test_delete_recomputes() {
        let mut stat = statistic();
        assert!(stat.delete("resilient"));
        assert_eq!(stat.total_modifier(), 12);
        assert!(!stat.delete("resilient"));
    }

    #[test]
    fn test_from_pools_applies_predicates() {
        let mut pools = ModifierPools::new();
        pools.add_modifier("all", Modifier::new("frightened", -2, ModifierType::Status));
        pools.add_modifier(
            "fortitude",
            Modifier::new("poison-resistance", 2, ModifierType::Circumstance)
                .with_predicate(Predicate::all_of(["poison"])),
        );

        let base = vec![Modifier::new("con", 3, ModifierType::Ability)];
        let plain = StatisticModifier::from_pools(
            "fortitude",
            base.clone(),
            &pools,
            &["fortitude", "all"],
            &OptionSet::new(),
        );
        assert_eq!(plain.total_modifier(), 1);
        assert_eq!(plain.modifiers().len(), 3);

        let options: OptionSet = ["poison"].into_iter().collect();
        let vs_poison = StatisticModifier::from_pools(
            "fortitude",
            base,
            &pools,
            &["fortitude", "all"],
            &options,
        );
        assert_eq!(vs_poison.total_modifier(), 3);
    }

    #[test]
    fn test_from_pools_keeps_caller_ignored() {
        let mut inspired = Modifier::new("inspired", 5, ModifierType::Status);
        inspired.ignored = true;
        let mut pools = ModifierPools::new();
        pools.add_modifier("all", inspired);

        let stat =
            StatisticModifier::from_pools("will", Vec::new(), &pools, &["all"], &OptionSet::new());
        assert_eq!(stat.total_modifier(), 0);
        assert!(stat.modifiers()[0].ignored);
        assert!(!stat.modifiers()[0].enabled);
    }

    #[test]
    fn test_check_modifier_does_not_touch_statistic() {
        let stat = statistic();
        let aid = Modifier::new("aid", 1, ModifierType::Circumstance);
        let check = CheckModifier::new(&stat, vec![aid]);
        assert_eq!(check.total_modifier(), 14);
        assert_eq!(stat.total_modifier(), 13);
        assert_eq!(check.name(), "fortitude");
    }

    #[test]
    fn test_check_modifier_drops_duplicate_extra() {
        let stat = statistic();
        let extra = vec![
            Modifier::new("resilient", 3, ModifierType::Status),
            Modifier::new("aid", 1, ModifierType::Circumstance),
        ];
        let check = CheckModifier::new(&stat, extra);
        assert_eq!(check.total_modifier(), 14);
        assert_eq!(check.modifiers().len(), 4);
        assert_eq!(check.modifiers()[2].value, 1);
    }

    #[test]
    fn test_check_modifier_with_options() {
        let stat = statistic();
        let extra = vec![Modifier::new("flanking", -2, ModifierType::Circumstance)
            .with_predicate(Predicate::all_of(["flanked"]))];
        let check = CheckModifier::with_options(&stat, extra, &OptionSet::new());
        assert_eq!(check.total_modifier(), 13);
        assert!(check.modifiers().iter().any(|m| m.ignored));
    }

    #[test]
    fn test_check_roll_uses_total() {
        let check = CheckModifier::new(&statistic(), vec![]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let roll = check.roll(&mut rng);
        assert_eq!(roll.modifier, 13);
        assert!((1..=20).contains(&roll.die_value));
    }
}
