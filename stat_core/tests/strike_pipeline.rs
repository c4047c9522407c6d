//! Rule files -> pools -> attack statistic -> degree of success -> damage formula

use rules_core::RuleRegistry;
use stat_core::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, content: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn rules_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "heroism.toml",
        r#"
[[rules]]
key = "FlatModifier"
selector = "all"
label = "Heroism"
type = "status"
value = 1
"#,
    );
    write_file(
        dir.path(),
        "bless.toml",
        r#"
[[rules]]
key = "FlatModifier"
selector = "attack"
label = "Bless"
type = "status"
value = 1
"#,
    );
    write_file(
        dir.path(),
        "frightened.toml",
        r#"
[[rules]]
key = "FlatModifier"
selector = "all"
label = "Frightened"
type = "status"
value = -1
predicate = { all = ["self:frightened"] }
"#,
    );
    write_file(
        dir.path(),
        "shortsword.toml",
        r#"
[[rules]]
key = "FlatModifier"
selector = "shortsword-attack"
label = "Weapon Potency"
type = "item"
value = 1

[[rules]]
key = "FlatModifier"
selector = "damage"
label = "Potent Strikes"
type = "item"
value = 2

[[rules]]
key = "DamageDice"
selector = "shortsword-damage"
label = "Flaming"
dice_number = 1
die_size = "d6"
damage_type = "fire"
"#,
    );
    dir
}

fn fighter() -> ActorKind {
    let mut abilities = AbilityScores::default();
    abilities.set(Ability::Strength, 16);
    ActorKind::Character(CharacterData::new(5, abilities))
}

fn shortsword() -> Weapon {
    Weapon::new(
        "shortsword",
        "Shortsword",
        BaseDamage::new(1, DieSize::D6, DamageType::Slashing),
    )
    .with_striking(StrikingRune::Striking)
}

fn attack_statistic(
    pools: &ModifierPools,
    options: &OptionSet,
    config: &EngineConfig,
) -> StatisticModifier {
    let base = vec![
        ability_modifier(Ability::Strength, 16),
        proficiency_modifier(5, ProficiencyRank::Trained, &config.proficiency),
    ];
    StatisticModifier::from_pools(
        "shortsword-attack",
        base,
        pools,
        &["all", "attack", "shortsword-attack"],
        options,
    )
}

#[test]
fn test_attack_total_from_rule_files() {
    let dir = rules_dir();
    let registry = RuleRegistry::load(dir.path()).unwrap();
    let config = EngineConfig::default();
    let pools = registry.pools(5);

    let attack = attack_statistic(&pools, &OptionSet::new(), &config);
    // str +3, trained +7, one status +1, item +1
    assert_eq!(attack.total_modifier(), 12);
    assert_eq!(
        attack.breakdown_string(),
        "Strength +3, Trained +7, Bless +1, Weapon Potency +1"
    );

    let frightened: OptionSet = ["self:frightened"].into_iter().collect();
    let attack = attack_statistic(&pools, &frightened, &config);
    assert_eq!(attack.total_modifier(), 11);
}

#[test]
fn test_attack_roll_degrees() {
    let dir = rules_dir();
    let registry = RuleRegistry::load(dir.path()).unwrap();
    let config = EngineConfig::default();
    let attack = attack_statistic(&registry.pools(5), &OptionSet::new(), &config);
    let check = CheckModifier::new(&attack, Vec::new());

    let roll = DieRoll::new(15, check.total_modifier());
    let hit = calculate_degree_of_success(roll, 27, &[], &OptionSet::new());
    assert_eq!(hit.value, DegreeOfSuccess::Success);

    let roll = DieRoll::new(20, check.total_modifier());
    let natural_twenty = calculate_degree_of_success(roll, 27, &[], &OptionSet::new());
    assert_eq!(natural_twenty.unadjusted, DegreeOfSuccess::Success);
    assert_eq!(natural_twenty.value, DegreeOfSuccess::CriticalSuccess);
}

#[test]
fn test_damage_from_rule_files() {
    let dir = rules_dir();
    let registry = RuleRegistry::load(dir.path()).unwrap();
    let config = EngineConfig::default();
    let pools = registry.pools(5);
    let actor = fighter();
    let options = OptionSet::new();
    let context = StrikeContext::new(&actor, ProficiencyRank::Trained, &pools, &options);

    let damage = calculate_weapon_damage(&shortsword(), &context, &config);
    assert_eq!(damage.effect_dice, 2);
    assert_eq!(damage.formula.success.formula, "{2d6,1}kh + 5 + 1d6");
    assert_eq!(
        damage.formula_for(DegreeOfSuccess::CriticalSuccess).map(|f| f.formula.as_str()),
        Some("2 * ({2d6,1}kh + 5 + 1d6)")
    );
    assert!(damage.formula_for(DegreeOfSuccess::Failure).is_none());
}

#[test]
fn test_damage_with_configured_doubling() {
    let dir = rules_dir();
    write_file(
        dir.path(),
        "engine.config",
        r#"
[damage]
critical_doubling = "double_dice"
"#,
    );
    let config = EngineConfig::load_from_path(&dir.path().join("engine.config")).unwrap();
    let registry = RuleRegistry::load(dir.path()).unwrap();
    let pools = registry.pools(5);
    let actor = fighter();
    let options = OptionSet::new();
    let context = StrikeContext::new(&actor, ProficiencyRank::Trained, &pools, &options);

    let damage = calculate_weapon_damage(&shortsword(), &context, &config);
    assert_eq!(damage.formula.critical_success.formula, "{4d6,1}kh + 10 + 2d6");
}

#[test]
fn test_pipeline_is_deterministic() {
    let dir = rules_dir();
    let config = EngineConfig::default();
    let actor = fighter();
    let options: OptionSet = ["self:frightened", "target:flat-footed"].into_iter().collect();

    let run = || {
        let registry = RuleRegistry::load(dir.path()).unwrap();
        let pools = registry.pools(5);
        let attack = attack_statistic(&pools, &options, &config);
        let context = StrikeContext::new(&actor, ProficiencyRank::Trained, &pools, &options);
        let damage = calculate_weapon_damage(&shortsword(), &context, &config);
        (attack, damage)
    };

    let (first_attack, first_damage) = run();
    let (second_attack, second_damage) = run();
    assert_eq!(first_attack, second_attack);
    assert_eq!(first_damage, second_damage);
    assert_eq!(
        first_damage.formula.success.roll_seeded(42),
        second_damage.formula.success.roll_seeded(42)
    );
}
