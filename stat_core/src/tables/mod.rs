//! Ability and proficiency lookup tables

mod ability;
mod proficiency;

pub use ability::{ability_modifier, ability_modifier_by_abbreviation, ability_modifier_value};
pub use proficiency::{proficiency_bonus, proficiency_modifier, proficiency_modifier_from_rank};
