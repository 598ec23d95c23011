//! Shortcut imports for the entities.

// === SeaORM entities ===
pub use super::abilities::Entity as Abilities;
pub use super::ability_values::Entity as AbilityValues;
pub use super::alchemists::Entity as Alchemists;
pub use super::enhancement_formulas::Entity as EnhancementFormulas;
pub use super::enhancements::Entity as Enhancements;
pub use super::factions::Entity as Factions;
pub use super::formulas::Entity as Formulas;
pub use super::profile_factions::Entity as ProfileFactions;
pub use super::profiles::Entity as Profiles;

// === choice sets ===
pub use super::choices::{Lang, Status, Threshold};
