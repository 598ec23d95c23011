//! Faction entity
//!
//! Each profile belongs to one or more factions. Two factions are equal when
//! their names are equal, whatever their ids.

use std::fmt;
use std::hash::{Hash, Hasher};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::choices::{Lang, Status};

#[derive(Clone, Debug, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "factions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,

    // === game data ===
    pub lang: Lang,
    pub status: Status,
    pub updated_at: DateTimeUtc,
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::profile_factions::Entity")]
    ProfileFactions,
}

impl Related<super::profile_factions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfileFactions.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        super::profile_factions::Relation::Profile.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::profile_factions::Relation::Faction.def().rev())
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
