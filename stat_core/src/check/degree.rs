//! Degree of success - four-tier outcome of a check against a DC
//!
//! Order of operations:
//! 1. Tier from the total vs the DC (±10 for criticals)
//! 2. Natural 20 raises and natural 1 lowers one tier
//! 3. The first matching conditional adjustment, if any

use modifier_core::{OptionSet, Predicate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome tier, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeOfSuccess {
    CriticalFailure = 0,
    Failure = 1,
    Success = 2,
    CriticalSuccess = 3,
}

impl DegreeOfSuccess {
    /// Tier of a total against a DC, before any die-value adjustment
    pub fn from_total(total: i32, dc: i32) -> Self {
        if total >= dc + 10 {
            DegreeOfSuccess::CriticalSuccess
        } else if total >= dc {
            DegreeOfSuccess::Success
        } else if total <= dc - 10 {
            DegreeOfSuccess::CriticalFailure
        } else {
            DegreeOfSuccess::Failure
        }
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Move one tier, clamped at the ends
    pub fn adjust(self, direction: AdjustmentDirection) -> Self {
        let shifted = match direction {
            AdjustmentDirection::Increase => self.value().saturating_add(1).min(3),
            AdjustmentDirection::Lower => self.value().saturating_sub(1),
        };
        DegreeOfSuccess::try_from(shifted).unwrap_or(self)
    }

    /// Whether moving in `direction` would change the tier
    pub fn can_adjust(&self, direction: AdjustmentDirection) -> bool {
        self.adjust(direction) != *self
    }
}

impl TryFrom<u8> for DegreeOfSuccess {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DegreeOfSuccess::CriticalFailure),
            1 => Ok(DegreeOfSuccess::Failure),
            2 => Ok(DegreeOfSuccess::Success),
            3 => Ok(DegreeOfSuccess::CriticalSuccess),
            other => Err(other),
        }
    }
}

impl fmt::Display for DegreeOfSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreeOfSuccess::CriticalFailure => write!(f, "Critical Failure"),
            DegreeOfSuccess::Failure => write!(f, "Failure"),
            DegreeOfSuccess::Success => write!(f, "Success"),
            DegreeOfSuccess::CriticalSuccess => write!(f, "Critical Success"),
        }
    }
}

/// A d20 result and the modifier added to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    pub die_value: i32,
    pub modifier: i32,
}

impl DieRoll {
    pub fn new(die_value: i32, modifier: i32) -> Self {
        DieRoll { die_value, modifier }
    }

    pub fn roll_d20(modifier: i32, rng: &mut impl Rng) -> Self {
        DieRoll {
            die_value: rng.gen_range(1..=20),
            modifier,
        }
    }

    pub fn total(&self) -> i32 {
        self.die_value + self.modifier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    Increase,
    Lower,
}

/// Which tier an adjustment listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentScope {
    All,
    CriticalFailure,
    Failure,
    Success,
    CriticalSuccess,
}

impl AdjustmentScope {
    pub fn matches(&self, degree: DegreeOfSuccess) -> bool {
        match self {
            AdjustmentScope::All => true,
            AdjustmentScope::CriticalFailure => degree == DegreeOfSuccess::CriticalFailure,
            AdjustmentScope::Failure => degree == DegreeOfSuccess::Failure,
            AdjustmentScope::Success => degree == DegreeOfSuccess::Success,
            AdjustmentScope::CriticalSuccess => degree == DegreeOfSuccess::CriticalSuccess,
        }
    }
}

/// Predicate-gated one-tier adjustment, e.g. "success on a save becomes critical success"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeAdjustment {
    pub label: String,
    pub scope: AdjustmentScope,
    pub direction: AdjustmentDirection,
    #[serde(default)]
    pub predicate: Predicate,
}

impl DegreeAdjustment {
    pub fn new(
        label: impl Into<String>,
        scope: AdjustmentScope,
        direction: AdjustmentDirection,
    ) -> Self {
        DegreeAdjustment {
            label: label.into(),
            scope,
            direction,
            predicate: Predicate::default(),
        }
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }
}

/// The adjustment that actually changed the tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    pub label: String,
    pub direction: AdjustmentDirection,
}

/// Result of evaluating a roll against a DC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub roll: DieRoll,
    pub dc: i32,
    /// Tier from the total alone
    pub unadjusted: DegreeOfSuccess,
    /// Final tier after natural 20/1 and conditional adjustments
    pub value: DegreeOfSuccess,
    /// Shift from a natural 20 or natural 1, when it changed the tier
    pub die_value_adjustment: Option<AdjustmentDirection>,
    pub adjustment: Option<AppliedAdjustment>,
}

/// Evaluate a roll against a DC with ordered conditional adjustments
///
/// Only the first adjustment whose scope matches the current tier and whose
/// predicate passes is considered. If it cannot move the tier (raising a
/// critical success, lowering a critical failure) nothing is reported.
pub fn calculate_degree_of_success(
    roll: DieRoll,
    dc: i32,
    adjustments: &[DegreeAdjustment],
    options: &OptionSet,
) -> CheckOutcome {
    let unadjusted = DegreeOfSuccess::from_total(roll.total(), dc);

    let die_direction = match roll.die_value {
        20 => Some(AdjustmentDirection::Increase),
        1 => Some(AdjustmentDirection::Lower),
        _ => None,
    };
    let die_value_adjustment = die_direction.filter(|d| unadjusted.can_adjust(*d));
    let mut value = die_value_adjustment.map_or(unadjusted, |d| unadjusted.adjust(d));

    let mut applied = None;
    if let Some(adjustment) = adjustments
        .iter()
        .find(|a| a.scope.matches(value) && a.predicate.test(options))
    {
        if value.can_adjust(adjustment.direction) {
            value = value.adjust(adjustment.direction);
            tracing::debug!("Degree of success adjusted by '{}' to {}", adjustment.label, value);
            applied = Some(AppliedAdjustment {
                label: adjustment.label.clone(),
                direction: adjustment.direction,
            });
        }
    }

    CheckOutcome {
        roll,
        dc,
        unadjusted,
        value,
        die_value_adjustment,
        adjustment: applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn outcome(die: i32, modifier: i32, dc: i32) -> CheckOutcome {
        calculate_degree_of_success(DieRoll::new(die, modifier), dc, &[], &OptionSet::new())
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(outcome(10, 5, 15).value, DegreeOfSuccess::Success);
        assert_eq!(outcome(15, 10, 15).value, DegreeOfSuccess::CriticalSuccess);
        assert_eq!(outcome(10, 4, 15).value, DegreeOfSuccess::Failure);
        assert_eq!(outcome(5, 0, 15).value, DegreeOfSuccess::CriticalFailure);
    }

    #[test]
    fn test_natural_twenty_upgrades() {
        // 20 + 0 vs 25 is a failure, raised to success
        let result = outcome(20, 0, 25);
        assert_eq!(result.unadjusted, DegreeOfSuccess::Failure);
        assert_eq!(result.value, DegreeOfSuccess::Success);
        assert_eq!(result.die_value_adjustment, Some(AdjustmentDirection::Increase));

        let capped = outcome(20, 10, 15);
        assert_eq!(capped.value, DegreeOfSuccess::CriticalSuccess);
        assert_eq!(capped.die_value_adjustment, None);
    }

    #[test]
    fn test_natural_one_downgrades() {
        let result = outcome(1, 20, 15);
        assert_eq!(result.unadjusted, DegreeOfSuccess::Success);
        assert_eq!(result.value, DegreeOfSuccess::Failure);

        let floored = outcome(1, 0, 15);
        assert_eq!(floored.value, DegreeOfSuccess::CriticalFailure);
        assert_eq!(floored.die_value_adjustment, None);
    }

    #[test]
    fn test_adjustment_requires_predicate() {
        let adjustments = vec![DegreeAdjustment::new(
            "Evasion",
            AdjustmentScope::Success,
            AdjustmentDirection::Increase,
        )
        .with_predicate(Predicate::all_of(["reflex"]))];

        let roll = DieRoll::new(12, 5);
        let without = calculate_degree_of_success(roll, 15, &adjustments, &OptionSet::new());
        assert_eq!(without.value, DegreeOfSuccess::Success);
        assert_eq!(without.adjustment, None);

        let options: OptionSet = ["reflex"].into_iter().collect();
        let with = calculate_degree_of_success(roll, 15, &adjustments, &options);
        assert_eq!(with.value, DegreeOfSuccess::CriticalSuccess);
        assert_eq!(with.adjustment.map(|a| a.label), Some("Evasion".to_string()));
    }

    #[test]
    fn test_only_first_matching_adjustment_applies() {
        let adjustments = vec![
            DegreeAdjustment::new("Lower", AdjustmentScope::Failure, AdjustmentDirection::Lower),
            DegreeAdjustment::new("Raise", AdjustmentScope::All, AdjustmentDirection::Increase),
            DegreeAdjustment::new(
                "Raise again",
                AdjustmentScope::All,
                AdjustmentDirection::Increase,
            ),
        ];
        let roll = DieRoll::new(10, 0);
        let result = calculate_degree_of_success(roll, 15, &adjustments, &OptionSet::new());
        assert_eq!(result.value, DegreeOfSuccess::CriticalFailure);
        assert_eq!(result.adjustment.unwrap().label, "Lower");
    }

    #[test]
    fn test_scope_uses_tier_after_natural_roll() {
        let adjustments = vec![DegreeAdjustment::new(
            "Juggernaut",
            AdjustmentScope::Success,
            AdjustmentDirection::Increase,
        )];
        // Failure raised to success by the natural 20, then raised again
        let roll = DieRoll::new(20, 0);
        let result = calculate_degree_of_success(roll, 25, &adjustments, &OptionSet::new());
        assert_eq!(result.value, DegreeOfSuccess::CriticalSuccess);
    }

    #[test]
    fn test_noop_adjustment_is_not_reported() {
        let adjustments = vec![DegreeAdjustment::new(
            "Raise",
            AdjustmentScope::All,
            AdjustmentDirection::Increase,
        )];
        let roll = DieRoll::new(15, 10);
        let result = calculate_degree_of_success(roll, 15, &adjustments, &OptionSet::new());
        assert_eq!(result.value, DegreeOfSuccess::CriticalSuccess);
        assert_eq!(result.adjustment, None);

        let lower = vec![DegreeAdjustment::new(
            "Lower",
            AdjustmentScope::CriticalFailure,
            AdjustmentDirection::Lower,
        )];
        let result = calculate_degree_of_success(DieRoll::new(2, 0), 15, &lower, &OptionSet::new());
        assert_eq!(result.value, DegreeOfSuccess::CriticalFailure);
        assert_eq!(result.adjustment, None);
    }

    #[test]
    fn test_adjust_clamps() {
        assert_eq!(
            DegreeOfSuccess::CriticalSuccess.adjust(AdjustmentDirection::Increase),
            DegreeOfSuccess::CriticalSuccess
        );
        assert_eq!(
            DegreeOfSuccess::CriticalFailure.adjust(AdjustmentDirection::Lower),
            DegreeOfSuccess::CriticalFailure
        );
        assert!(DegreeOfSuccess::Failure < DegreeOfSuccess::Success);
    }

    #[test]
    fn test_roll_d20_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let roll = DieRoll::roll_d20(3, &mut rng);
            assert!((1..=20).contains(&roll.die_value));
            assert_eq!(roll.total(), roll.die_value + 3);
        }
    }
}
