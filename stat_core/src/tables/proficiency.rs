//! Proficiency modifiers from rank and level

use crate::config::ProficiencyConfig;
use modifier_core::{Modifier, ModifierType, ProficiencyRank, RankError};

/// Proficiency bonus for a rank at a level
///
/// Untrained only ever gets its configured base. Trained and above add the
/// level when the configuration scales with level.
pub fn proficiency_bonus(level: i32, rank: ProficiencyRank, config: &ProficiencyConfig) -> i32 {
    let base = config.base_for(rank);
    match rank {
        ProficiencyRank::Untrained => base,
        _ if config.scales_with_level => base + level,
        _ => base,
    }
}

/// Proficiency-typed modifier for a rank at a level
pub fn proficiency_modifier(
    level: i32,
    rank: ProficiencyRank,
    config: &ProficiencyConfig,
) -> Modifier {
    let label = match rank {
        ProficiencyRank::Untrained => "Untrained",
        ProficiencyRank::Trained => "Trained",
        ProficiencyRank::Expert => "Expert",
        ProficiencyRank::Master => "Master",
        ProficiencyRank::Legendary => "Legendary",
    };
    Modifier::new(
        "proficiency",
        proficiency_bonus(level, rank, config),
        ModifierType::Proficiency,
    )
    .with_label(label)
}

/// Proficiency modifier from a raw rank value
///
/// A rank outside `0..=4` means corrupted input data and is returned as an
/// error for the caller to abort the pass with.
pub fn proficiency_modifier_from_rank(
    level: i32,
    rank: i64,
    config: &ProficiencyConfig,
) -> Result<Modifier, RankError> {
    let rank = ProficiencyRank::try_from(rank)?;
    Ok(proficiency_modifier(level, rank, config))
}
