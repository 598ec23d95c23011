//! Data entities
//!
//! SeaORM entity definitions, one module per table, and the choice sets
//! they share.

use sea_orm::ActiveValue::{self, Set};
use sea_orm::entity::prelude::DateTimeUtc;

pub mod prelude;

// === choice sets ===
pub mod choices;

// === SeaORM entities (one per table) ===
pub mod abilities;
pub mod ability_values;
pub mod alchemists;
pub mod enhancement_formulas;
pub mod enhancements;
pub mod factions;
pub mod formulas;
pub mod profile_factions;
pub mod profiles;

/// Stamps a game-data record with the current time on every save.
fn touch(updated_at: &mut ActiveValue<DateTimeUtc>) {
    *updated_at = Set(chrono::Utc::now());
}
