//! Damage calculation - turning a weapon + strike context into formulas

use super::{
    BaseDamage, DamageFormula, DamageFormulas, DamagePool, Scaling, StrikeContext, Weapon,
    WeaponDamage, WeaponRange,
};
use crate::config::{CriticalDoubling, EngineConfig};
use crate::statistic::apply_stacking_rules;
use crate::types::{ActorKind, Feature};
use modifier_core::{
    weapon_damage_selector, Ability, DamageCategory, DamageDie, DamageType, DieOverride, DieSize,
    Modifier, ModifierType, OptionSet, Predicate, DAMAGE_SELECTOR,
};
use std::collections::BTreeMap;

/// Synthesize success and critical success formulas for a weapon strike
pub fn calculate_weapon_damage(
    weapon: &Weapon,
    context: &StrikeContext,
    config: &EngineConfig,
) -> WeaponDamage {
    // Step 1: Resolve base die size and type from active toggles
    let base = resolve_base_damage(weapon, context.options);

    let mut options = context.options.with_traits(&weapon.traits);
    options.insert(weapon.range.option_tag());
    options.insert(context.proficiency.option_tag());

    // Step 2: Effect dice count only the weapon's own dice and striking dice
    let effect_dice = base.dice_number + weapon.striking.dice();

    let selectors = [weapon_damage_selector(&weapon.slug), DAMAGE_SELECTOR.to_string()];

    // Step 3: Dice modifiers
    let mut dice_modifiers = weapon_dice(weapon, context.actor);
    dice_modifiers.extend(context.pools.dice_for(&selectors));
    for die in &mut dice_modifiers {
        die.apply_predicate(&options);
    }

    // Step 4: Numeric modifiers; untyped ones take the weapon's type at pooling
    let mut numeric_modifiers = weapon_numerics(weapon, context);
    numeric_modifiers.extend(context.pools.modifiers_for(&selectors));
    for modifier in &mut numeric_modifiers {
        modifier.apply_predicate(&options);
    }

    // Step 5: Stacking runs separately for each damage type
    let numeric_modifiers = stack_by_damage_type(numeric_modifiers, base.damage_type);

    // Step 6 + 7: Pool and render
    let (normal, _) = build_pools(&base, &dice_modifiers, &numeric_modifiers, false);
    let success = DamageFormula::new(vec![(normal, Scaling::Once)]);

    let (normal, critical_only) = build_pools(&base, &dice_modifiers, &numeric_modifiers, true);
    let scaling = match config.damage.critical_doubling {
        CriticalDoubling::DoubleResult => Scaling::DoubleResult,
        CriticalDoubling::DoubleDice => Scaling::DoubleTerms,
    };
    let critical_success =
        DamageFormula::new(vec![(normal, scaling), (critical_only, Scaling::Once)]);

    // Step 8: Traits from everything that is still active
    let traits = merge_traits(weapon, &dice_modifiers, &numeric_modifiers);

    WeaponDamage {
        base,
        effect_dice,
        dice_modifiers,
        numeric_modifiers,
        traits,
        formula: DamageFormulas {
            success,
            critical_success,
        },
    }
}

/// Apply `two-hand-<die>` and `versatile-<type>` when their toggle is in the options
fn resolve_base_damage(weapon: &Weapon, options: &OptionSet) -> BaseDamage {
    let mut base = weapon.base;

    for (toggle, value) in weapon.traits_with_prefix("two-hand") {
        if !options.contains(toggle) {
            continue;
        }
        match value.parse::<DieSize>() {
            Ok(die_size) => base.die_size = die_size,
            Err(error) => tracing::warn!("Weapon '{}': {}", weapon.slug, error),
        }
    }

    for (toggle, value) in weapon.traits_with_prefix("versatile") {
        if !options.contains(toggle) {
            continue;
        }
        match value.parse::<DamageType>() {
            Ok(damage_type) => base.damage_type = damage_type,
            Err(error) => tracing::warn!("Weapon '{}': {}", weapon.slug, error),
        }
    }

    base
}

/// Dice the weapon and actor contribute before any external pool
fn weapon_dice(weapon: &Weapon, actor: &ActorKind) -> Vec<DamageDie> {
    let mut dice = Vec::new();

    let striking = weapon.striking.dice();
    if striking > 0 {
        dice.push(DamageDie::new("striking", striking, None).with_label(weapon.striking.label()));
    }

    for rune in &weapon.property_runes {
        dice.push(
            DamageDie::new(rune.slug(), 1, Some(DieSize::D6))
                .with_label(rune.label())
                .with_damage_type(rune.damage_type()),
        );
    }

    for feature in actor.features() {
        if let Feature::SneakAttack { dice: count } = feature {
            let predicate = Predicate::all_of(["target:flat-footed"])
                .and(Predicate::any_of(["agile", "finesse", "ranged"]));
            dice.push(
                DamageDie::new("sneak-attack", *count, Some(DieSize::D6))
                    .with_label("Sneak Attack")
                    .with_category(DamageCategory::Precision)
                    .with_predicate(predicate),
            );
        }
    }

    for (_, value) in weapon.traits_with_prefix("deadly") {
        match value.parse::<DieSize>() {
            Ok(die_size) => dice.push(
                DamageDie::new("deadly", weapon.striking.deadly_dice(), Some(die_size))
                    .with_label("Deadly")
                    .critical(),
            ),
            Err(error) => tracing::warn!("Weapon '{}': {}", weapon.slug, error),
        }
    }

    for (_, value) in weapon.traits_with_prefix("fatal") {
        match value.parse::<DieSize>() {
            Ok(die_size) => dice.push(
                DamageDie::new("fatal", 1, Some(die_size))
                    .with_label("Fatal")
                    .with_override(DieOverride {
                        die_size: Some(die_size),
                        damage_type: None,
                    })
                    .critical(),
            ),
            Err(error) => tracing::warn!("Weapon '{}': {}", weapon.slug, error),
        }
    }

    dice
}

/// Flat modifiers the weapon and actor contribute before any external pool
fn weapon_numerics(weapon: &Weapon, context: &StrikeContext) -> Vec<Modifier> {
    let mut modifiers = Vec::new();

    if let Some((ability, value)) = damage_ability(weapon, context.actor) {
        if value != 0 {
            modifiers.push(
                Modifier::new(ability.abbreviation(), value, ModifierType::Ability)
                    .with_label(ability.name()),
            );
        }
    }

    if let ActorKind::Character(character) = context.actor {
        let rank = context.proficiency.value() as i32;
        let greater = character.has_feature(Feature::GreaterWeaponSpecialization);
        if rank > 1 && (greater || character.has_feature(Feature::WeaponSpecialization)) {
            let (value, label) = if greater {
                (rank * 2, "Greater Weapon Specialization")
            } else {
                (rank, "Weapon Specialization")
            };
            modifiers.push(Modifier::untyped("weapon-specialization", value).with_label(label));
        }
    }

    if weapon.splash_damage != 0 {
        modifiers.push(
            Modifier::untyped("splash-damage", weapon.splash_damage)
                .with_label("Splash")
                .with_category(DamageCategory::Splash),
        );
    }

    if weapon.bonus_damage != 0 {
        modifiers.push(
            Modifier::untyped("bonus-damage", weapon.bonus_damage).with_label("Bonus Damage"),
        );
    }

    modifiers
}

/// Ability used for damage and its modifier, applying precedence in order:
/// range, propulsive, then the thief racket finesse override
fn damage_ability(weapon: &Weapon, actor: &ActorKind) -> Option<(Ability, i32)> {
    let ActorKind::Character(character) = actor else {
        return None;
    };
    let strength = character.abilities.modifier(Ability::Strength);
    let dexterity = character.abilities.modifier(Ability::Dexterity);

    let mut chosen = match weapon.range {
        WeaponRange::Melee => (Ability::Strength, strength),
        WeaponRange::Ranged if is_thrown(weapon) => (Ability::Strength, strength),
        WeaponRange::Ranged => (Ability::Dexterity, dexterity),
    };

    if weapon.has_trait("propulsive") {
        let value = if strength > 0 { strength / 2 } else { strength };
        chosen = (Ability::Strength, value);
    }

    if character.has_feature(Feature::ThiefRacket)
        && weapon.range == WeaponRange::Melee
        && weapon.has_trait("finesse")
        && dexterity > chosen.1
    {
        chosen = (Ability::Dexterity, dexterity);
    }

    Some(chosen)
}

fn is_thrown(weapon: &Weapon) -> bool {
    weapon.has_trait("thrown") || weapon.traits_with_prefix("thrown").next().is_some()
}

/// Resolve stacking within each damage type, preserving input order
///
/// Untyped modifiers stack with those typed as `default`.
fn stack_by_damage_type(modifiers: Vec<Modifier>, default: DamageType) -> Vec<Modifier> {
    let mut groups: BTreeMap<DamageType, Vec<(usize, Modifier)>> = BTreeMap::new();
    for (index, modifier) in modifiers.into_iter().enumerate() {
        let damage_type = modifier.damage_type.unwrap_or(default);
        groups.entry(damage_type).or_default().push((index, modifier));
    }

    let mut stacked = Vec::new();
    for group in groups.into_values() {
        let (indices, mut group): (Vec<usize>, Vec<Modifier>) = group.into_iter().unzip();
        apply_stacking_rules(&mut group);
        stacked.extend(indices.into_iter().zip(group));
    }
    stacked.sort_by_key(|(index, _)| *index);
    stacked.into_iter().map(|(_, modifier)| modifier).collect()
}

/// Fold enabled dice and modifiers into the normal and critical-only pools
///
/// Critical entries and critical die overrides are only included when
/// `critical` is set.
fn build_pools(
    base: &BaseDamage,
    dice: &[DamageDie],
    modifiers: &[Modifier],
    critical: bool,
) -> (DamagePool, DamagePool) {
    let is_active = |enabled: bool, is_critical: bool| enabled && (critical || !is_critical);

    let mut weapon_die = base.die_size;
    let mut weapon_type = base.damage_type;
    for die_override in dice
        .iter()
        .filter(|d| is_active(d.enabled, d.critical))
        .filter_map(|d| d.die_override.as_ref())
    {
        if let Some(die_size) = die_override.die_size {
            weapon_die = die_size;
        }
        if let Some(damage_type) = die_override.damage_type {
            weapon_type = damage_type;
        }
    }

    let mut normal = DamagePool::new();
    let mut critical_only = DamagePool::new();
    normal.add_weapon_dice(weapon_type, weapon_die, base.dice_number);

    for die in dice.iter().filter(|d| is_active(d.enabled, d.critical)) {
        let pool = if die.critical { &mut critical_only } else { &mut normal };
        pool.add_dice(
            die.damage_type.unwrap_or(weapon_type),
            die.die_size.unwrap_or(weapon_die),
            die.dice_number,
        );
    }

    for modifier in modifiers.iter().filter(|m| is_active(m.enabled, m.critical)) {
        let pool = if modifier.critical { &mut critical_only } else { &mut normal };
        pool.add_flat(modifier.damage_type.unwrap_or(weapon_type), modifier.value);
    }

    (normal, critical_only)
}

fn merge_traits(weapon: &Weapon, dice: &[DamageDie], modifiers: &[Modifier]) -> Vec<String> {
    let contributed = dice
        .iter()
        .filter(|d| d.enabled)
        .flat_map(|d| d.traits.iter())
        .chain(modifiers.iter().filter(|m| m.enabled).flat_map(|m| m.traits.iter()));

    let mut traits: Vec<String> = Vec::new();
    for t in weapon.traits.iter().chain(contributed) {
        if !traits.contains(t) {
            traits.push(t.clone());
        }
    }
    traits
}
