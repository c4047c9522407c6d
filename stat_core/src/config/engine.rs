//! Proficiency scaling and critical damage configuration

use super::ConfigError;
use modifier_core::ProficiencyRank;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub proficiency: ProficiencyConfig,
    #[serde(default)]
    pub damage: DamageConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config: EngineConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.proficiency;
        let bases = [
            p.untrained_base,
            p.trained_base,
            p.expert_base,
            p.master_base,
            p.legendary_base,
        ];
        if bases.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::Validation(format!(
                "proficiency bases must not decrease with rank: {:?}",
                bases
            )));
        }
        Ok(())
    }
}

/// Flat bonus per proficiency rank, and whether level is added on top
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyConfig {
    #[serde(default)]
    pub untrained_base: i32,
    #[serde(default = "default_trained_base")]
    pub trained_base: i32,
    #[serde(default = "default_expert_base")]
    pub expert_base: i32,
    #[serde(default = "default_master_base")]
    pub master_base: i32,
    #[serde(default = "default_legendary_base")]
    pub legendary_base: i32,
    #[serde(default = "default_scales_with_level")]
    pub scales_with_level: bool,
}

impl Default for ProficiencyConfig {
    fn default() -> Self {
        ProficiencyConfig {
            untrained_base: 0,
            trained_base: default_trained_base(),
            expert_base: default_expert_base(),
            master_base: default_master_base(),
            legendary_base: default_legendary_base(),
            scales_with_level: default_scales_with_level(),
        }
    }
}

impl ProficiencyConfig {
    /// Variant rule where level is never added to proficiency
    pub fn without_level() -> Self {
        ProficiencyConfig {
            scales_with_level: false,
            ..Default::default()
        }
    }

    pub fn base_for(&self, rank: ProficiencyRank) -> i32 {
        match rank {
            ProficiencyRank::Untrained => self.untrained_base,
            ProficiencyRank::Trained => self.trained_base,
            ProficiencyRank::Expert => self.expert_base,
            ProficiencyRank::Master => self.master_base,
            ProficiencyRank::Legendary => self.legendary_base,
        }
    }
}

fn default_trained_base() -> i32 {
    2
}
fn default_expert_base() -> i32 {
    4
}
fn default_master_base() -> i32 {
    6
}
fn default_legendary_base() -> i32 {
    8
}
fn default_scales_with_level() -> bool {
    true
}

/// How a damage formula is doubled on a critical hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CriticalDoubling {
    /// `2 * (formula)`
    #[default]
    DoubleResult,
    /// Every dice count and flat term doubled in place
    DoubleDice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageConfig {
    #[serde(default)]
    pub critical_doubling: CriticalDoubling,
}
