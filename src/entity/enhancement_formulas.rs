//! Enhancement <-> formula link entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enhancement_formulas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub enhancement_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub formula_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enhancements::Entity",
        from = "Column::EnhancementId",
        to = "super::enhancements::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Enhancement,
    #[sea_orm(
        belongs_to = "super::formulas::Entity",
        from = "Column::FormulaId",
        to = "super::formulas::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Formula,
}

impl Related<super::enhancements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enhancement.def()
    }
}

impl Related<super::formulas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Formula.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
