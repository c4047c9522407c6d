//! Modifier and DamageDie value objects

use crate::predicate::{OptionSet, Predicate};
use crate::types::{DamageCategory, DamageType, DieSize, ModifierType};
use serde::{Deserialize, Serialize};

/// A named numeric contribution to a statistic or damage roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// Identity used for de-duplication
    pub name: String,
    /// Display label, falls back to `name`
    #[serde(default)]
    pub label: Option<String>,
    pub value: i32,
    #[serde(rename = "type", default)]
    pub modifier_type: ModifierType,
    /// Set by stacking resolution
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Set by whoever evaluated the predicate; ignored modifiers never count
    #[serde(default)]
    pub ignored: bool,
    /// Added by a user rather than derived from data
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub damage_category: Option<DamageCategory>,
    #[serde(default, deserialize_with = "crate::predicate::deserialize_lenient")]
    pub predicate: Option<Predicate>,
    /// Only applies on a critical hit
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub traits: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Modifier {
    pub fn new(name: impl Into<String>, value: i32, modifier_type: ModifierType) -> Self {
        Modifier {
            name: name.into(),
            label: None,
            value,
            modifier_type,
            enabled: true,
            ignored: false,
            custom: false,
            source: None,
            notes: None,
            damage_type: None,
            damage_category: None,
            predicate: None,
            critical: false,
            traits: Vec::new(),
        }
    }

    pub fn untyped(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, value, ModifierType::Untyped)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn with_category(mut self, category: DamageCategory) -> Self {
        self.damage_category = Some(category);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_traits<S: Into<String>>(mut self, traits: impl IntoIterator<Item = S>) -> Self {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn custom(mut self) -> Self {
        self.custom = true;
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_bonus(&self) -> bool {
        self.value >= 0
    }

    /// Evaluate the predicate (if any) and record a failure in `ignored`
    ///
    /// A modifier already ignored by the caller stays ignored. Returns
    /// whether the modifier is still eligible to count.
    pub fn apply_predicate(&mut self, options: &OptionSet) -> bool {
        let passes = self.predicate.as_ref().map_or(true, |p| p.test(options));
        self.ignored = self.ignored || !passes;
        !self.ignored
    }
}

/// Replacement applied to the weapon's own dice when a die is active
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieOverride {
    #[serde(default)]
    pub die_size: Option<DieSize>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
}

/// Extra damage dice contributed to a damage roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageDie {
    #[serde(default)]
    pub selector: String,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    pub dice_number: i32,
    /// `None` means "the weapon's die" and is resolved at pooling time
    #[serde(default)]
    pub die_size: Option<DieSize>,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub category: Option<DamageCategory>,
    /// `None` means the weapon's damage type
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(rename = "override", default)]
    pub die_override: Option<DieOverride>,
    #[serde(default, deserialize_with = "crate::predicate::deserialize_lenient")]
    pub predicate: Option<Predicate>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl DamageDie {
    pub fn new(name: impl Into<String>, dice_number: i32, die_size: Option<DieSize>) -> Self {
        DamageDie {
            selector: String::new(),
            name: name.into(),
            label: None,
            dice_number,
            die_size,
            critical: false,
            category: None,
            damage_type: None,
            traits: Vec::new(),
            die_override: None,
            predicate: None,
            enabled: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn with_category(mut self, category: DamageCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_override(mut self, die_override: DieOverride) -> Self {
        self.die_override = Some(die_override);
        self
    }

    pub fn with_traits<S: Into<String>>(mut self, traits: impl IntoIterator<Item = S>) -> Self {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Evaluate the predicate (if any); a failure disables the die
    ///
    /// A die the caller already disabled stays disabled.
    pub fn apply_predicate(&mut self, options: &OptionSet) -> bool {
        let passes = self.predicate.as_ref().map_or(true, |p| p.test(options));
        self.enabled = self.enabled && passes;
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_defaults() {
        let modifier = Modifier::new("bless", 1, ModifierType::Status);
        assert!(modifier.enabled);
        assert!(!modifier.ignored);
        assert_eq!(modifier.label(), "bless");
        assert_eq!(modifier.with_label("Bless").label(), "Bless");
    }

    #[test]
    fn test_modifier_predicate_sets_ignored() {
        let mut modifier = Modifier::untyped("rage", 2).with_predicate(Predicate::all_of(["rage"]));
        assert!(!modifier.apply_predicate(&OptionSet::new()));
        assert!(modifier.ignored);

        let raging: OptionSet = ["rage"].into_iter().collect();
        assert!(modifier.apply_predicate(&raging));
        assert!(!modifier.ignored);
    }

    #[test]
    fn test_damage_die_predicate_sets_enabled() {
        let mut die = DamageDie::new("sneak-attack", 1, Some(DieSize::D6))
            .with_predicate(Predicate::all_of(["target:flat-footed"]));
        assert!(!die.apply_predicate(&OptionSet::new()));
        assert!(!die.enabled);
    }

    #[test]
    fn test_predicate_keeps_caller_ignored() {
        let mut modifier = Modifier::new("inspired", 5, ModifierType::Status);
        modifier.ignored = true;
        assert!(!modifier.apply_predicate(&OptionSet::new()));
        assert!(modifier.ignored);

        let mut gated = Modifier::untyped("rage", 2).with_predicate(Predicate::all_of(["rage"]));
        gated.ignored = true;
        let raging: OptionSet = ["rage"].into_iter().collect();
        assert!(!gated.apply_predicate(&raging));
        assert!(gated.ignored);
    }

    #[test]
    fn test_predicate_keeps_caller_disabled_die() {
        let mut die = DamageDie::new("spirit", 1, Some(DieSize::D8));
        die.enabled = false;
        assert!(!die.apply_predicate(&OptionSet::new()));
        assert!(!die.enabled);

        let mut gated = DamageDie::new("sneak-attack", 1, Some(DieSize::D6))
            .with_predicate(Predicate::all_of(["target:flat-footed"]));
        gated.enabled = false;
        let flat_footed: OptionSet = ["target:flat-footed"].into_iter().collect();
        assert!(!gated.apply_predicate(&flat_footed));
    }

    #[test]
    fn test_modifier_deserializes_with_defaults() {
        let modifier: Modifier =
            serde_json::from_str(r#"{"name":"shield","value":2,"type":"circumstance"}"#).unwrap();
        assert_eq!(modifier.modifier_type, ModifierType::Circumstance);
        assert!(modifier.enabled);
        assert!(modifier.traits.is_empty());
    }

    #[test]
    fn test_malformed_predicate_field_fails_open() {
        let json = r#"{"name":"x","value":1,"predicate":{"all":"rage","sometimes":[1]}}"#;
        let mut modifier: Modifier = serde_json::from_str(json).unwrap();
        assert_eq!(modifier.predicate, Some(Predicate::default()));
        assert!(modifier.apply_predicate(&OptionSet::new()));

        let json = r#"{"name":"spirit","dice_number":1,"die_size":"d8","predicate":7}"#;
        let mut die: DamageDie = serde_json::from_str(json).unwrap();
        assert!(die.apply_predicate(&OptionSet::new()));
    }

    #[test]
    fn test_predicate_field_well_formed_and_null() {
        let json = r#"{"name":"rage","value":2,"predicate":{"all":["rage"]}}"#;
        let modifier: Modifier = serde_json::from_str(json).unwrap();
        assert_eq!(modifier.predicate, Some(Predicate::all_of(["rage"])));

        let modifier: Modifier =
            serde_json::from_str(r#"{"name":"rage","value":2,"predicate":null}"#).unwrap();
        assert_eq!(modifier.predicate, None);
    }

    #[test]
    fn test_damage_die_override_field_name() {
        let die = DamageDie::new("fatal", 1, Some(DieSize::D12)).with_override(DieOverride {
            die_size: Some(DieSize::D12),
            damage_type: None,
        });
        let json = serde_json::to_value(&die).unwrap();
        assert_eq!(json["override"]["die_size"], "d12");
    }
}
