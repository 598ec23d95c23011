//! Profile entity
//!
//! A playable character template. Combat stats that vary with the
//! character's state (life points, movement, damage) are stored as
//! comma-separated integer lists, e.g. `"3,2,1"`.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::choices::{Lang, Status};

/// Size given to a profile when none is provided
pub const DEFAULT_SIZE: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(30))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub title: String,

    // === general characteristics ===
    #[sea_orm(column_type = "String(StringLen::N(8))")]
    pub life_points: String,
    #[sea_orm(column_type = "String(StringLen::N(8))")]
    pub movement: String,
    pub action_points: i32,
    pub cost: i32,
    pub size: i32,

    // === combat ===
    #[sea_orm(column_type = "String(StringLen::N(16))")]
    pub damage_cc: String,
    #[sea_orm(column_type = "String(StringLen::N(16))")]
    pub damage_ra: String,

    // === skills ===
    pub combat: i32,
    pub defense: i32,
    pub mind: i32,
    pub reflexes: i32,

    // === game data ===
    pub lang: Lang,
    pub status: Status,
    pub updated_at: DateTimeUtc,
}

/// Splits a stored comma-separated integer list. Malformed items are skipped;
/// values are validated on write.
pub fn split_int_list(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|item| item.trim().parse().ok())
        .collect()
}

impl Model {
    pub fn life_points_values(&self) -> Vec<u32> {
        split_int_list(&self.life_points)
    }

    pub fn movement_values(&self) -> Vec<u32> {
        split_int_list(&self.movement)
    }

    /// Melee damage per state
    pub fn damage_cc_values(&self) -> Vec<u32> {
        split_int_list(&self.damage_cc)
    }

    /// Ranged damage per state; empty for profiles without a ranged attack
    pub fn damage_ra_values(&self) -> Vec<u32> {
        split_int_list(&self.damage_ra)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::alchemists::Entity")]
    Alchemists,
    #[sea_orm(has_many = "super::ability_values::Entity")]
    AbilityValues,
    #[sea_orm(has_many = "super::profile_factions::Entity")]
    ProfileFactions,
}

impl Related<super::alchemists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alchemists.def()
    }
}

impl Related<super::ability_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AbilityValues.def()
    }
}

impl Related<super::profile_factions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileFactions.def()
    }
}

impl Related<super::factions::Entity> for Entity {
    fn to() -> RelationDef {
        super::profile_factions::Relation::Faction.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::profile_factions::Relation::Profile.def().rev())
    }
}

impl Related<super::abilities::Entity> for Entity {
    fn to() -> RelationDef {
        super::ability_values::Relation::Ability.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::ability_values::Relation::Profile.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::touch(&mut self.updated_at);
        Ok(self)
    }
}
