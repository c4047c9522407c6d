//! Rendered damage formulas

use super::pool::{join_terms, DamagePool};
use modifier_core::DamageType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a pool contributes to a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    Once,
    /// `2 * (...)` around the whole pool
    DoubleResult,
    /// Every dice count and flat term doubled
    DoubleTerms,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct FormulaPart {
    pool: DamagePool,
    scaling: Scaling,
}

impl FormulaPart {
    fn render_with(&self, render: impl Fn(i32) -> String) -> String {
        match self.scaling {
            Scaling::Once => render(1),
            Scaling::DoubleTerms => render(2),
            Scaling::DoubleResult => {
                let inner = render(1);
                if inner.is_empty() {
                    inner
                } else {
                    format!("2 * ({})", inner)
                }
            }
        }
    }

    fn total_with(&self, total: impl Fn(i32) -> i32) -> i32 {
        match self.scaling {
            Scaling::Once => total(1),
            Scaling::DoubleTerms => total(2),
            Scaling::DoubleResult => 2 * total(1),
        }
    }
}

/// A dice expression plus its per-damage-type segments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageFormula {
    pub formula: String,
    pub partials: BTreeMap<DamageType, String>,
    #[serde(skip)]
    parts: Vec<FormulaPart>,
}

impl DamageFormula {
    pub fn new(parts: Vec<(DamagePool, Scaling)>) -> Self {
        let parts: Vec<FormulaPart> = parts
            .into_iter()
            .map(|(pool, scaling)| FormulaPart { pool, scaling })
            .collect();

        let formula =
            join_terms(parts.iter().map(|part| part.render_with(|f| part.pool.render(f))));

        let mut segments: BTreeMap<DamageType, Vec<String>> = BTreeMap::new();
        for part in &parts {
            for type_pool in part.pool.types() {
                segments
                    .entry(type_pool.damage_type)
                    .or_default()
                    .push(part.render_with(|f| type_pool.render(f)));
            }
        }
        let partials = segments
            .into_iter()
            .map(|(damage_type, parts)| (damage_type, join_terms(parts)))
            .collect();

        DamageFormula {
            formula,
            partials,
            parts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.formula.is_empty()
    }

    pub fn minimum(&self) -> i32 {
        self.parts
            .iter()
            .map(|part| part.total_with(|f| part.pool.minimum(f)))
            .sum()
    }

    pub fn maximum(&self) -> i32 {
        self.parts
            .iter()
            .map(|part| part.total_with(|f| part.pool.maximum(f)))
            .sum()
    }

    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        let mut total = 0;
        for part in &self.parts {
            total += match part.scaling {
                Scaling::Once => part.pool.roll(1, rng),
                Scaling::DoubleTerms => part.pool.roll(2, rng),
                Scaling::DoubleResult => 2 * part.pool.roll(1, rng),
            };
        }
        total
    }

    /// Reproducible roll from a seed
    pub fn roll_seeded(&self, seed: u64) -> i32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.roll(&mut rng)
    }
}

impl std::fmt::Display for DamageFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formula)
    }
}
