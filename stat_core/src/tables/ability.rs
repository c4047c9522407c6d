//! Ability score modifiers

use modifier_core::{Ability, Modifier, ModifierType};

/// `floor((score - 10) / 2)`
pub fn ability_modifier_value(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Ability-typed modifier for a score
pub fn ability_modifier(ability: Ability, score: i32) -> Modifier {
    Modifier::new(ability.abbreviation(), ability_modifier_value(score), ModifierType::Ability)
        .with_label(ability.name())
}

/// Ability modifier looked up by abbreviation
///
/// An unknown abbreviation logs a warning and yields a zero-value untyped
/// modifier so one bad source does not break the whole statistic.
pub fn ability_modifier_by_abbreviation(abbreviation: &str, score: i32) -> Modifier {
    match abbreviation.parse::<Ability>() {
        Ok(ability) => ability_modifier(ability, score),
        Err(error) => {
            tracing::warn!("{}; using a zero modifier", error);
            Modifier::untyped(abbreviation, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_values() {
        assert_eq!(ability_modifier_value(16), 3);
        assert_eq!(ability_modifier_value(10), 0);
        assert_eq!(ability_modifier_value(11), 0);
        assert_eq!(ability_modifier_value(9), -1);
        assert_eq!(ability_modifier_value(8), -1);
        assert_eq!(ability_modifier_value(7), -2);
    }

    #[test]
    fn test_ability_modifier() {
        let modifier = ability_modifier(Ability::Strength, 16);
        assert_eq!(modifier.value, 3);
        assert_eq!(modifier.modifier_type, ModifierType::Ability);
        assert_eq!(modifier.label(), "Strength");
    }

    #[test]
    fn test_by_abbreviation() {
        let modifier = ability_modifier_by_abbreviation("dex", 18);
        assert_eq!(modifier.value, 4);
        assert_eq!(modifier.name, "dex");
    }

    #[test]
    fn test_unknown_abbreviation_degrades() {
        let modifier = ability_modifier_by_abbreviation("luk", 18);
        assert_eq!(modifier.value, 0);
        assert_eq!(modifier.modifier_type, ModifierType::Untyped);
    }
}
