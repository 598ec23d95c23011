//! AbilityValue entity
//!
//! Associates an ability to a profile, as an ability may carry a specific
//! value for a given profile. The value is optional and stored blank when
//! absent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ability_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ability_id: i32,
    pub profile_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub value: String,
}

/// `"Name (value)"` when a value is set, the bare ability name otherwise.
pub fn format_label(ability_name: &str, value: &str) -> String {
    if value.is_empty() {
        ability_name.to_string()
    } else {
        format!("{} ({})", ability_name, value)
    }
}

impl Model {
    pub fn label(&self, ability: &super::abilities::Model) -> String {
        format_label(&ability.name, &self.value)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::abilities::Entity",
        from = "Column::AbilityId",
        to = "super::abilities::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Ability,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Profile,
}

impl Related<super::abilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ability.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
