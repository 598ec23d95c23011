//! Ability entity
//!
//! Standard ability descriptions, listed on their own and in profile details.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::choices::{Lang, Status};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "abilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    // === game data ===
    pub lang: Lang,
    pub status: Status,
    pub updated_at: DateTimeUtc,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ability_values::Entity")]
    AbilityValues,
}

impl Related<super::ability_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AbilityValues.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        super::ability_values::Relation::Profile.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::ability_values::Relation::Ability.def().rev())
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
