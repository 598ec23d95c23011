//! Repositories, one per aggregate.
//!
//! Every repository is a unit struct of associated async functions taking
//! the connection first. Listings of game-data records accept a
//! [`RecordFilter`] on language and status.

pub mod abilities_repository;
pub mod alchemists_repository;
pub mod enhancements_repository;
pub mod factions_repository;
pub mod formulas_repository;
pub mod profiles_repository;

use sea_orm::*;
use serde::{Deserialize, Serialize};

use crate::entity::choices::{Lang, Status};
use crate::entity::prelude::*;
use crate::entity::{abilities, enhancements, factions, formulas, profiles};
use crate::error::{DataError, DataResult};

pub use abilities_repository::AbilitiesRepository;
pub use alchemists_repository::{AlchemistsRepository, FullAlchemist};
pub use enhancements_repository::EnhancementsRepository;
pub use factions_repository::FactionsRepository;
pub use formulas_repository::FormulasRepository;
pub use profiles_repository::{AbilityValueDetail, ProfilesRepository};

/// Tables carrying the shared `lang` / `status` columns
pub trait GameDataEntity: EntityTrait {
    fn lang_column() -> Self::Column;
    fn status_column() -> Self::Column;
}

macro_rules! game_data_entity {
    ($($module:ident),+ $(,)?) => {
        $(
            impl GameDataEntity for $module::Entity {
                fn lang_column() -> Self::Column {
                    $module::Column::Lang
                }

                fn status_column() -> Self::Column {
                    $module::Column::Status
                }
            }
        )+
    };
}

game_data_entity!(factions, abilities, profiles, formulas, enhancements);

/// Language / status filter for listings. Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub lang: Option<Lang>,
    pub status: Option<Status>,
}

impl RecordFilter {
    /// Everything, removed records included
    pub fn all() -> Self {
        Self::default()
    }

    /// Published records in one language
    pub fn published(lang: Lang) -> Self {
        Self {
            lang: Some(lang),
            status: Some(Status::Published),
        }
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn apply<E: GameDataEntity>(&self, mut query: Select<E>) -> Select<E> {
        if let Some(lang) = self.lang {
            query = query.filter(E::lang_column().eq(lang));
        }
        if let Some(status) = self.status {
            query = query.filter(E::status_column().eq(status));
        }
        query
    }
}

/// Loads a record by id or fails with `NotFound`.
pub(crate) async fn fetch<E, C>(db: &C, entity: &'static str, id: i32) -> DataResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DataError::not_found(entity, id))
}

/// Record counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub factions: u64,
    pub abilities: u64,
    pub profiles: u64,
    pub alchemists: u64,
    pub formulas: u64,
    pub enhancements: u64,
}

impl StoreSummary {
    pub async fn collect(db: &DatabaseConnection) -> DataResult<Self> {
        Ok(Self {
            factions: Factions::find().count(db).await?,
            abilities: Abilities::find().count(db).await?,
            profiles: Profiles::find().count(db).await?,
            alchemists: Alchemists::find().count(db).await?,
            formulas: Formulas::find().count(db).await?,
            enhancements: Enhancements::find().count(db).await?,
        })
    }
}
