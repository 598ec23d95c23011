use std::fmt;

use sea_orm::*;
use serde::{Deserialize, Serialize};

use super::profiles_repository::{apply_profile_update, insert_profile};
use super::{fetch, RecordFilter};
use crate::database::dto::{AlchemistUpdate, NewAlchemist};
use crate::entity::prelude::*;
use crate::entity::{alchemists, formulas, profiles};
use crate::error::DataResult;

/// An alchemist: its profile row together with the alchemist columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullAlchemist {
    pub profile: profiles::Model,
    pub details: alchemists::Model,
}

impl FullAlchemist {
    /// The alchemist's id, which is its profile id
    pub fn id(&self) -> i32 {
        self.profile.id
    }
}

impl fmt::Display for FullAlchemist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.profile.name)
    }
}

/// Alchemist data repository
pub struct AlchemistsRepository;

impl AlchemistsRepository {
    /// Create an alchemist, profile row included, in one transaction
    pub async fn create(db: &DatabaseConnection, alchemist: NewAlchemist) -> DataResult<FullAlchemist> {
        alchemist.validate()?;

        let txn = db.begin().await?;

        let profile = insert_profile(&txn, alchemist.profile).await?;
        let details = alchemists::ActiveModel {
            profile_id: Set(profile.id),
            element: Set(alchemist.element),
            rank: Set(alchemist.rank),
            stones: Set(alchemist.stones),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::debug!("Alchemist created: {} ({})", profile.name, profile.id);
        Ok(FullAlchemist { profile, details })
    }

    /// Look up an alchemist by its profile id; plain profiles yield `None`
    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> DataResult<Option<FullAlchemist>> {
        let found = Alchemists::find_by_id(id)
            .find_also_related(Profiles)
            .one(db)
            .await?;

        Ok(match found {
            Some((details, Some(profile))) => Some(FullAlchemist { profile, details }),
            _ => None,
        })
    }

    /// All alchemists whose profile matches `filter`, by name
    pub async fn find_all(
        db: &DatabaseConnection,
        filter: RecordFilter,
    ) -> DataResult<Vec<FullAlchemist>> {
        let rows = filter
            .apply(Profiles::find())
            .inner_join(Alchemists)
            .select_also(Alchemists)
            .order_by_asc(profiles::Column::Name)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(profile, details)| {
                details.map(|details| FullAlchemist { profile, details })
            })
            .collect())
    }

    pub async fn is_alchemist(db: &DatabaseConnection, profile_id: i32) -> DataResult<bool> {
        Ok(Alchemists::find_by_id(profile_id).one(db).await?.is_some())
    }

    /// Update profile and alchemist columns in one transaction.
    ///
    /// The profile row is always saved so its update time moves even when
    /// only alchemist columns change.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: AlchemistUpdate,
    ) -> DataResult<FullAlchemist> {
        updates.validate()?;

        let txn = db.begin().await?;

        let details = fetch::<Alchemists, _>(&txn, "alchemist", id).await?;
        let profile = fetch::<Profiles, _>(&txn, "profile", id).await?;

        let mut details_active: alchemists::ActiveModel = details.clone().into();
        if let Some(element) = updates.element {
            details_active.element = Set(element);
        }
        if let Some(rank) = updates.rank {
            details_active.rank = Set(rank);
        }
        if let Some(stones) = updates.stones {
            details_active.stones = Set(stones);
        }
        let details = if details_active.is_changed() {
            details_active.update(&txn).await?
        } else {
            details
        };

        let mut profile_active: profiles::ActiveModel = profile.into();
        apply_profile_update(&mut profile_active, updates.profile);
        let profile = profile_active.update(&txn).await?;

        txn.commit().await?;
        Ok(FullAlchemist { profile, details })
    }

    /// Delete an alchemist together with its profile and formulas
    pub async fn delete(db: &DatabaseConnection, id: i32) -> DataResult<DeleteResult> {
        let txn = db.begin().await?;

        fetch::<Alchemists, _>(&txn, "alchemist", id).await?;
        let result = Profiles::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        log::debug!("Alchemist deleted: {}", id);
        Ok(result)
    }

    pub async fn count(db: &DatabaseConnection, filter: RecordFilter) -> DataResult<u64> {
        Ok(filter
            .apply(Profiles::find())
            .inner_join(Alchemists)
            .count(db)
            .await?)
    }

    /// Formulas of an alchemist, by name
    pub async fn formulas_of(
        db: &DatabaseConnection,
        id: i32,
    ) -> DataResult<Vec<formulas::Model>> {
        let details = fetch::<Alchemists, _>(db, "alchemist", id).await?;
        Ok(details
            .find_related(Formulas)
            .order_by_asc(formulas::Column::Name)
            .all(db)
            .await?)
    }
}
