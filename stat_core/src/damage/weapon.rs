//! Weapon damage profile: base dice, runes and traits

use modifier_core::{DamageCategory, DamageType, DieSize};
use serde::{Deserialize, Serialize};

/// The weapon's own damage dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDamage {
    pub dice_number: i32,
    pub die_size: DieSize,
    pub damage_type: DamageType,
    #[serde(default)]
    pub category: Option<DamageCategory>,
}

impl BaseDamage {
    pub fn new(dice_number: i32, die_size: DieSize, damage_type: DamageType) -> Self {
        BaseDamage {
            dice_number,
            die_size,
            damage_type,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponRange {
    #[default]
    Melee,
    Ranged,
}

impl WeaponRange {
    /// Roll option added for damage predicates
    pub fn option_tag(&self) -> &'static str {
        match self {
            WeaponRange::Melee => "melee",
            WeaponRange::Ranged => "ranged",
        }
    }
}

/// Striking rune grade; its dice count as weapon dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrikingRune {
    #[default]
    None,
    Striking,
    GreaterStriking,
    MajorStriking,
}

impl StrikingRune {
    pub fn dice(&self) -> i32 {
        match self {
            StrikingRune::None => 0,
            StrikingRune::Striking => 1,
            StrikingRune::GreaterStriking => 2,
            StrikingRune::MajorStriking => 3,
        }
    }

    /// Number of deadly dice added on a critical hit
    pub fn deadly_dice(&self) -> i32 {
        match self {
            StrikingRune::None | StrikingRune::Striking => 1,
            StrikingRune::GreaterStriking => 2,
            StrikingRune::MajorStriking => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrikingRune::None => "",
            StrikingRune::Striking => "Striking",
            StrikingRune::GreaterStriking => "Greater Striking",
            StrikingRune::MajorStriking => "Major Striking",
        }
    }
}

/// Property runes that add a d6 of energy damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyRune {
    Flaming,
    Frost,
    Shock,
    Corrosive,
    Thundering,
}

impl PropertyRune {
    pub fn slug(&self) -> &'static str {
        match self {
            PropertyRune::Flaming => "flaming",
            PropertyRune::Frost => "frost",
            PropertyRune::Shock => "shock",
            PropertyRune::Corrosive => "corrosive",
            PropertyRune::Thundering => "thundering",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyRune::Flaming => "Flaming",
            PropertyRune::Frost => "Frost",
            PropertyRune::Shock => "Shock",
            PropertyRune::Corrosive => "Corrosive",
            PropertyRune::Thundering => "Thundering",
        }
    }

    pub fn damage_type(&self) -> DamageType {
        match self {
            PropertyRune::Flaming => DamageType::Fire,
            PropertyRune::Frost => DamageType::Cold,
            PropertyRune::Shock => DamageType::Electricity,
            PropertyRune::Corrosive => DamageType::Acid,
            PropertyRune::Thundering => DamageType::Sonic,
        }
    }
}

/// Everything about a weapon the damage synthesizer reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub slug: String,
    pub name: String,
    pub base: BaseDamage,
    #[serde(default)]
    pub range: WeaponRange,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub striking: StrikingRune,
    #[serde(default)]
    pub property_runes: Vec<PropertyRune>,
    #[serde(default)]
    pub splash_damage: i32,
    #[serde(default)]
    pub bonus_damage: i32,
}

impl Weapon {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, base: BaseDamage) -> Self {
        Weapon {
            slug: slug.into(),
            name: name.into(),
            base,
            range: WeaponRange::Melee,
            traits: Vec::new(),
            striking: StrikingRune::None,
            property_runes: Vec::new(),
            splash_damage: 0,
            bonus_damage: 0,
        }
    }

    pub fn ranged(mut self) -> Self {
        self.range = WeaponRange::Ranged;
        self
    }

    pub fn with_traits<S: Into<String>>(mut self, traits: impl IntoIterator<Item = S>) -> Self {
        self.traits.extend(traits.into_iter().map(Into::into));
        self
    }

    pub fn with_striking(mut self, striking: StrikingRune) -> Self {
        self.striking = striking;
        self
    }

    pub fn with_property_rune(mut self, rune: PropertyRune) -> Self {
        self.property_runes.push(rune);
        self
    }

    pub fn with_splash_damage(mut self, value: i32) -> Self {
        self.splash_damage = value;
        self
    }

    pub fn with_bonus_damage(mut self, value: i32) -> Self {
        self.bonus_damage = value;
        self
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }

    /// Traits of the form `<prefix>-<value>`, yielding `(full trait, value)`
    pub fn traits_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.traits.iter().filter_map(move |t| {
            t.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('-'))
                .map(|value| (t.as_str(), value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_striking_dice() {
        assert_eq!(StrikingRune::None.dice(), 0);
        assert_eq!(StrikingRune::MajorStriking.dice(), 3);
        assert_eq!(StrikingRune::Striking.deadly_dice(), 1);
        assert_eq!(StrikingRune::GreaterStriking.deadly_dice(), 2);
    }

    #[test]
    fn test_traits_with_prefix() {
        let weapon = Weapon::new(
            "rapier",
            "Rapier",
            BaseDamage::new(1, DieSize::D6, DamageType::Piercing),
        )
        .with_traits(["deadly-d8", "disarm", "finesse", "deadlyish"]);

        let deadly: Vec<_> = weapon.traits_with_prefix("deadly").collect();
        assert_eq!(deadly, vec![("deadly-d8", "d8")]);
        assert!(weapon.has_trait("finesse"));
        assert!(!weapon.has_trait("agile"));
    }

    #[test]
    fn test_weapon_deserializes_with_defaults() {
        let json = r#"{
            "slug": "shortbow",
            "name": "Shortbow",
            "base": {"dice_number": 1, "die_size": "d6", "damage_type": "piercing"},
            "range": "ranged",
            "traits": ["deadly-d10"]
        }"#;
        let weapon: Weapon = serde_json::from_str(json).unwrap();
        assert_eq!(weapon.range, WeaponRange::Ranged);
        assert_eq!(weapon.striking, StrikingRune::None);
        assert!(weapon.property_runes.is_empty());
    }
}
