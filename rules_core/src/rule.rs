use crate::config::{RuleConfig, ValueConfig};
use crate::RuleError;
use modifier_core::{
    DamageCategory, DamageDie, DamageType, DieSize, Modifier, ModifierPools, ModifierType,
    Predicate,
};

/// One level range of a bracketed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub start: Option<i32>,
    pub end: Option<i32>,
    pub value: i32,
}

impl Bracket {
    fn contains(&self, level: i32) -> bool {
        self.start.map_or(true, |start| level >= start) && self.end.map_or(true, |end| level <= end)
    }
}

/// A rule value resolved against the actor level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValue {
    Fixed(i32),
    Brackets(Vec<Bracket>),
}

impl RuleValue {
    fn from_config(key: &str, config: ValueConfig) -> Result<Self, RuleError> {
        match config {
            ValueConfig::Fixed(value) => Ok(RuleValue::Fixed(value)),
            ValueConfig::Brackets(brackets) if brackets.is_empty() => {
                Err(RuleError::EmptyBrackets(key.to_string()))
            }
            ValueConfig::Brackets(brackets) => Ok(RuleValue::Brackets(
                brackets
                    .into_iter()
                    .map(|b| Bracket {
                        start: b.start,
                        end: b.end,
                        value: b.value,
                    })
                    .collect(),
            )),
        }
    }

    /// First bracket containing `level` wins; no match is zero
    pub fn resolve(&self, level: i32) -> i32 {
        match self {
            RuleValue::Fixed(value) => *value,
            RuleValue::Brackets(brackets) => match brackets.iter().find(|b| b.contains(level)) {
                Some(bracket) => bracket.value,
                None => {
                    tracing::warn!("No bracket matches level {}; using 0", level);
                    0
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleEffect {
    FlatModifier {
        modifier_type: ModifierType,
        value: RuleValue,
    },
    DamageDice {
        dice_number: RuleValue,
        die_size: Option<DieSize>,
    },
}

/// A compiled rule from a rule file
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// File stem the rule was loaded from
    pub source: String,
    pub selector: String,
    pub slug: String,
    pub label: Option<String>,
    pub predicate: Option<Predicate>,
    pub damage_type: Option<DamageType>,
    pub category: Option<DamageCategory>,
    pub critical: bool,
    pub effect: RuleEffect,
}

impl Rule {
    /// Compile a rule entry; `index` names rules that have neither slug nor label
    pub fn from_config(source: &str, index: usize, config: RuleConfig) -> Result<Self, RuleError> {
        let effect = match config.key.as_str() {
            "FlatModifier" => RuleEffect::FlatModifier {
                modifier_type: config.modifier_type.unwrap_or_default(),
                value: RuleValue::from_config(
                    &config.key,
                    config.value.ok_or_else(|| RuleError::MissingField {
                        key: config.key.clone(),
                        field: "value",
                    })?,
                )?,
            },
            "DamageDice" => RuleEffect::DamageDice {
                dice_number: RuleValue::from_config(
                    &config.key,
                    config.dice_number.ok_or_else(|| RuleError::MissingField {
                        key: config.key.clone(),
                        field: "dice_number",
                    })?,
                )?,
                die_size: config.die_size,
            },
            other => return Err(RuleError::UnknownKey(other.to_string())),
        };

        let slug = config
            .slug
            .or_else(|| config.label.as_deref().map(slugify))
            .unwrap_or_else(|| format!("{}-{}", source, index));

        Ok(Rule {
            source: source.to_string(),
            selector: config.selector,
            slug,
            label: config.label,
            predicate: config.predicate.as_ref().map(Predicate::from_value_lenient),
            damage_type: config.damage_type,
            category: config.category,
            critical: config.critical,
            effect,
        })
    }

    /// Add this rule's modifier or dice to `pools` at the given level
    pub fn apply(&self, level: i32, pools: &mut ModifierPools) {
        match &self.effect {
            RuleEffect::FlatModifier {
                modifier_type,
                value,
            } => {
                let mut modifier =
                    Modifier::new(self.slug.as_str(), value.resolve(level), *modifier_type)
                        .with_source(self.source.as_str());
                modifier.label = self.label.clone();
                modifier.predicate = self.predicate.clone();
                modifier.damage_type = self.damage_type;
                modifier.damage_category = self.category;
                modifier.critical = self.critical;
                pools.add_modifier(self.selector.as_str(), modifier);
            }
            RuleEffect::DamageDice {
                dice_number,
                die_size,
            } => {
                let mut die =
                    DamageDie::new(self.slug.as_str(), dice_number.resolve(level), *die_size);
                die.label = self.label.clone();
                die.predicate = self.predicate.clone();
                die.damage_type = self.damage_type;
                die.category = self.category;
                die.critical = self.critical;
                pools.add_die(self.selector.as_str(), die);
            }
        }
    }
}

/// `"Inspire Courage"` -> `"inspire-courage"`
fn slugify(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
