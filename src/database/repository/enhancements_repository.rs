use sea_orm::*;

use super::{fetch, RecordFilter};
use crate::database::dto::{EnhancementUpdate, NewEnhancement};
use crate::entity::prelude::*;
use crate::entity::{enhancement_formulas, enhancements, formulas};
use crate::error::DataResult;

/// Enhancement data repository
pub struct EnhancementsRepository;

impl EnhancementsRepository {
    pub async fn create(
        db: &DatabaseConnection,
        enhancement: NewEnhancement,
    ) -> DataResult<enhancements::Model> {
        enhancement.validate()?;

        let active = enhancements::ActiveModel {
            id: NotSet,
            description: Set(enhancement.description),
            lang: Set(enhancement.lang),
            status: Set(enhancement.status),
            updated_at: NotSet,
        };

        let model = active.insert(db).await?;
        log::debug!("Enhancement created: {}", model.id);
        Ok(model)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> DataResult<Option<enhancements::Model>> {
        Ok(Enhancements::find_by_id(id).one(db).await?)
    }

    pub async fn find_all(
        db: &DatabaseConnection,
        filter: RecordFilter,
    ) -> DataResult<Vec<enhancements::Model>> {
        Ok(filter
            .apply(Enhancements::find())
            .order_by_asc(enhancements::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: EnhancementUpdate,
    ) -> DataResult<enhancements::Model> {
        updates.validate()?;

        let existing = fetch::<Enhancements, _>(db, "enhancement", id).await?;
        let mut active: enhancements::ActiveModel = existing.into();

        if let Some(description) = updates.description {
            active.description = Set(description);
        }
        if let Some(lang) = updates.lang {
            active.lang = Set(lang);
        }
        if let Some(status) = updates.status {
            active.status = Set(status);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> DataResult<DeleteResult> {
        Ok(Enhancements::delete_by_id(id).exec(db).await?)
    }

    pub async fn count(db: &DatabaseConnection, filter: RecordFilter) -> DataResult<u64> {
        Ok(filter.apply(Enhancements::find()).count(db).await?)
    }

    // ==================== formula links ====================

    /// Attach an enhancement to a formula. Returns `false` if already attached.
    pub async fn attach_formula(
        db: &DatabaseConnection,
        enhancement_id: i32,
        formula_id: i32,
    ) -> DataResult<bool> {
        fetch::<Enhancements, _>(db, "enhancement", enhancement_id).await?;
        fetch::<Formulas, _>(db, "formula", formula_id).await?;

        if EnhancementFormulas::find_by_id((enhancement_id, formula_id))
            .one(db)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        enhancement_formulas::ActiveModel {
            enhancement_id: Set(enhancement_id),
            formula_id: Set(formula_id),
        }
        .insert(db)
        .await?;
        Ok(true)
    }

    pub async fn detach_formula(
        db: &DatabaseConnection,
        enhancement_id: i32,
        formula_id: i32,
    ) -> DataResult<DeleteResult> {
        Ok(EnhancementFormulas::delete_by_id((enhancement_id, formula_id))
            .exec(db)
            .await?)
    }

    /// Formulas an enhancement applies to, by name
    pub async fn formulas_of(
        db: &DatabaseConnection,
        enhancement_id: i32,
    ) -> DataResult<Vec<formulas::Model>> {
        let enhancement = fetch::<Enhancements, _>(db, "enhancement", enhancement_id).await?;
        Ok(enhancement
            .find_related(Formulas)
            .order_by_asc(formulas::Column::Name)
            .all(db)
            .await?)
    }

    /// Enhancements available for a formula
    pub async fn enhancements_of_formula(
        db: &DatabaseConnection,
        formula_id: i32,
    ) -> DataResult<Vec<enhancements::Model>> {
        let formula = fetch::<Formulas, _>(db, "formula", formula_id).await?;
        Ok(formula
            .find_related(Enhancements)
            .order_by_asc(enhancements::Column::Id)
            .all(db)
            .await?)
    }
}
