//! Dice pools - per damage type, per die size accumulators
//!
//! A pool collects dice counts and flat modifiers for each damage type and
//! renders them as a dice expression segment:
//!
//! - the weapon's own dice become a keep-highest group `{NdM,1}kh`
//! - every other die size becomes `NdM`
//! - the flat total is appended as `+ K` or `- K`
//!
//! Damage types keep the order they were first added in, so identical
//! inputs always render identical strings.

use modifier_core::{DamageType, DieSize};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceTerm {
    pub die_size: DieSize,
    pub dice_number: i32,
}

impl DiceTerm {
    fn render(&self, factor: i32) -> String {
        format!("{}{}", self.dice_number * factor, self.die_size)
    }

    fn roll(&self, factor: i32, rng: &mut impl Rng) -> i32 {
        let faces = self.die_size.faces() as i32;
        (0..self.dice_number * factor).map(|_| rng.gen_range(1..=faces)).sum()
    }
}

/// Everything of one damage type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypePool {
    pub damage_type: DamageType,
    /// The weapon's own dice, rendered as a keep-highest group
    pub weapon_dice: Option<DiceTerm>,
    pub dice: Vec<DiceTerm>,
    pub modifier: i32,
}

impl TypePool {
    fn new(damage_type: DamageType) -> Self {
        TypePool {
            damage_type,
            weapon_dice: None,
            dice: Vec::new(),
            modifier: 0,
        }
    }

    fn add_dice(&mut self, die_size: DieSize, dice_number: i32) {
        if let Some(weapon) = self.weapon_dice.as_mut().filter(|w| w.die_size == die_size) {
            weapon.dice_number += dice_number;
            return;
        }
        match self.dice.iter_mut().find(|t| t.die_size == die_size) {
            Some(term) => term.dice_number += dice_number,
            None => self.dice.push(DiceTerm {
                die_size,
                dice_number,
            }),
        }
    }

    fn active_weapon_dice(&self) -> Option<&DiceTerm> {
        self.weapon_dice.as_ref().filter(|t| t.dice_number > 0)
    }

    fn active_dice(&self) -> impl Iterator<Item = &DiceTerm> {
        self.dice.iter().filter(|t| t.dice_number > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.active_weapon_dice().is_none()
            && self.active_dice().next().is_none()
            && self.modifier == 0
    }

    /// Render this type's segment with every count and flat term multiplied by `factor`
    pub fn render(&self, factor: i32) -> String {
        let mut terms: Vec<String> = Vec::new();
        if let Some(weapon) = self.active_weapon_dice() {
            terms.push(format!("{{{},1}}kh", weapon.render(factor)));
        }
        terms.extend(self.active_dice().map(|t| t.render(factor)));

        let flat = self.modifier * factor;
        if flat != 0 {
            terms.push(flat.to_string());
        }
        join_terms(terms)
    }

    pub fn minimum(&self, factor: i32) -> i32 {
        let weapon = self
            .active_weapon_dice()
            .map_or(0, |t| (t.dice_number * factor).max(1));
        let dice: i32 = self.active_dice().map(|t| t.dice_number * factor).sum();
        weapon + dice + self.modifier * factor
    }

    pub fn maximum(&self, factor: i32) -> i32 {
        let faces = |t: &DiceTerm| t.dice_number * factor * t.die_size.faces() as i32;
        let weapon = self.active_weapon_dice().map_or(0, faces);
        let dice: i32 = self.active_dice().map(faces).sum();
        weapon + dice + self.modifier * factor
    }

    pub fn roll(&self, factor: i32, rng: &mut impl Rng) -> i32 {
        let weapon = self
            .active_weapon_dice()
            .map_or(0, |t| t.roll(factor, rng).max(1));
        let dice: i32 = self
            .dice
            .iter()
            .filter(|t| t.dice_number > 0)
            .map(|t| t.roll(factor, rng))
            .sum();
        weapon + dice + self.modifier * factor
    }
}

/// Damage types mapped to their dice and flat totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DamagePool {
    types: Vec<TypePool>,
}

impl DamagePool {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, damage_type: DamageType) -> &mut TypePool {
        let index = match self.types.iter().position(|p| p.damage_type == damage_type) {
            Some(index) => index,
            None => {
                self.types.push(TypePool::new(damage_type));
                self.types.len() - 1
            }
        };
        &mut self.types[index]
    }

    /// Seed the weapon's own dice group for a damage type
    pub fn add_weapon_dice(
        &mut self,
        damage_type: DamageType,
        die_size: DieSize,
        dice_number: i32,
    ) {
        let pool = self.entry(damage_type);
        match pool.weapon_dice.as_mut() {
            Some(weapon) if weapon.die_size == die_size => weapon.dice_number += dice_number,
            Some(_) => pool.add_dice(die_size, dice_number),
            None => {
                pool.weapon_dice = Some(DiceTerm {
                    die_size,
                    dice_number,
                })
            }
        }
    }

    pub fn add_dice(&mut self, damage_type: DamageType, die_size: DieSize, dice_number: i32) {
        self.entry(damage_type).add_dice(die_size, dice_number);
    }

    pub fn add_flat(&mut self, damage_type: DamageType, value: i32) {
        self.entry(damage_type).modifier += value;
    }

    pub fn types(&self) -> impl Iterator<Item = &TypePool> {
        self.types.iter().filter(|p| !p.is_empty())
    }

    pub fn get(&self, damage_type: DamageType) -> Option<&TypePool> {
        self.types().find(|p| p.damage_type == damage_type)
    }

    pub fn is_empty(&self) -> bool {
        self.types().next().is_none()
    }

    /// Every type's segment joined with ` + `
    pub fn render(&self, factor: i32) -> String {
        join_terms(self.types().map(|p| p.render(factor)))
    }

    pub fn minimum(&self, factor: i32) -> i32 {
        self.types().map(|p| p.minimum(factor)).sum()
    }

    pub fn maximum(&self, factor: i32) -> i32 {
        self.types().map(|p| p.maximum(factor)).sum()
    }

    pub fn roll(&self, factor: i32, rng: &mut impl Rng) -> i32 {
        self.types().map(|p| p.roll(factor, rng)).sum()
    }
}

/// Join expression parts with ` + `, folding a leading minus into ` - `
pub(crate) fn join_terms(parts: impl IntoIterator<Item = String>) -> String {
    let mut out = String::new();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if out.is_empty() {
            out = part;
        } else if let Some(negated) = part.strip_prefix('-') {
            out.push_str(" - ");
            out.push_str(negated);
        } else {
            out.push_str(" + ");
            out.push_str(&part);
        }
    }
    out
}
