//! Formula entity
//!
//! Spell-like actions. Each formula is owned by one alchemist and is deleted
//! with it.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::choices::{Lang, Status, Threshold};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "formulas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub effect: String,
    pub focus_level: i32,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub components: String,
    pub threshold: Threshold,
    pub range: i32,
    pub alchemist_id: i32,

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
    #[sea_orm(
        belongs_to = "super::alchemists::Entity",
        from = "Column::AlchemistId",
        to = "super::alchemists::Column::ProfileId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Alchemist,
    #[sea_orm(has_many = "super::enhancement_formulas::Entity")]
    EnhancementFormulas,
}

impl Related<super::alchemists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alchemist.def()
    }
}

impl Related<super::enhancement_formulas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnhancementFormulas.def()
    }
}

impl Related<super::enhancements::Entity> for Entity {
    fn to() -> RelationDef {
        super::enhancement_formulas::Relation::Enhancement.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enhancement_formulas::Relation::Formula.def().rev())
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
