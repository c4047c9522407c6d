use modifier_core::{DamageCategory, DamageType, DieSize, ModifierType};
use serde::Deserialize;

/// TOML configuration for a rule file
#[derive(Debug, Deserialize)]
pub struct RuleFileConfig {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Configuration for a single rule entry
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// `FlatModifier` or `DamageDice`
    pub key: String,
    pub selector: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Predicates are kept raw and parsed leniently at compile time
    #[serde(default)]
    pub predicate: Option<toml::Value>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub category: Option<DamageCategory>,
    #[serde(default)]
    pub critical: bool,

    // FlatModifier fields
    #[serde(default)]
    pub value: Option<ValueConfig>,
    #[serde(rename = "type", default)]
    pub modifier_type: Option<ModifierType>,

    // DamageDice fields
    #[serde(default)]
    pub dice_number: Option<ValueConfig>,
    /// Omitted means the weapon's own die
    #[serde(default)]
    pub die_size: Option<DieSize>,
}

/// A value can be a fixed number or a list of level brackets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueConfig {
    Fixed(i32),
    Brackets(Vec<BracketConfig>),
}

/// Inclusive level range; a missing bound is open
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BracketConfig {
    #[serde(default)]
    pub start: Option<i32>,
    #[serde(default)]
    pub end: Option<i32>,
    pub value: i32,
}
