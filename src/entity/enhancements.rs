//! Enhancement entity
//!
//! Formula modifiers. An enhancement may apply to several formulas and
//! displays as its description.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::choices::{Lang, Status};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enhancements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    // === game data ===
    pub lang: Lang,
    pub status: Status,
    pub updated_at: DateTimeUtc,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enhancement_formulas::Entity")]
    EnhancementFormulas,
}

impl Related<super::enhancement_formulas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnhancementFormulas.def()
    }
}

impl Related<super::formulas::Entity> for Entity {
    fn to() -> RelationDef {
        super::enhancement_formulas::Relation::Formula.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enhancement_formulas::Relation::Enhancement.def().rev())
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
