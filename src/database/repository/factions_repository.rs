use sea_orm::*;

use super::{fetch, RecordFilter};
use crate::database::dto::{FactionUpdate, NewFaction};
use crate::entity::factions;
use crate::entity::prelude::*;
use crate::error::DataResult;

/// Faction data repository
pub struct FactionsRepository;

impl FactionsRepository {
    /// Create a faction
    pub async fn create(db: &DatabaseConnection, faction: NewFaction) -> DataResult<factions::Model> {
        faction.validate()?;

        let active = factions::ActiveModel {
            id: NotSet,
            name: Set(faction.name),
            lang: Set(faction.lang),
            status: Set(faction.status),
            updated_at: NotSet,
        };

        let model = active.insert(db).await?;
        log::debug!("Faction created: {} ({})", model.name, model.id);
        Ok(model)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> DataResult<Option<factions::Model>> {
        Ok(Factions::find_by_id(id).one(db).await?)
    }

    /// All factions matching `filter`, by name
    pub async fn find_all(
        db: &DatabaseConnection,
        filter: RecordFilter,
    ) -> DataResult<Vec<factions::Model>> {
        Ok(filter
            .apply(Factions::find())
            .order_by_asc(factions::Column::Name)
            .all(db)
            .await?)
    }

    /// Factions with this exact name, one per language at most in practice
    pub async fn find_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> DataResult<Vec<factions::Model>> {
        Ok(Factions::find()
            .filter(factions::Column::Name.eq(name))
            .order_by_asc(factions::Column::Id)
            .all(db)
            .await?)
    }

    /// Update a faction; unset fields are left as they are
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: FactionUpdate,
    ) -> DataResult<factions::Model> {
        updates.validate()?;

        let existing = fetch::<Factions, _>(db, "faction", id).await?;
        let mut active: factions::ActiveModel = existing.into();

        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(lang) = updates.lang {
            active.lang = Set(lang);
        }
        if let Some(status) = updates.status {
            active.status = Set(status);
        }

        Ok(active.update(db).await?)
    }

    /// Delete a faction; its profile links go with it
    pub async fn delete(db: &DatabaseConnection, id: i32) -> DataResult<DeleteResult> {
        Ok(Factions::delete_by_id(id).exec(db).await?)
    }

    pub async fn count(db: &DatabaseConnection, filter: RecordFilter) -> DataResult<u64> {
        Ok(filter.apply(Factions::find()).count(db).await?)
    }
}
