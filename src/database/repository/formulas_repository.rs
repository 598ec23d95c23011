use sea_orm::*;

use super::{fetch, RecordFilter};
use crate::database::dto::{FormulaUpdate, NewFormula};
use crate::entity::prelude::*;
use crate::entity::formulas;
use crate::error::DataResult;

/// Formula data repository
pub struct FormulasRepository;

impl FormulasRepository {
    /// Create a formula for an existing alchemist
    pub async fn create(db: &DatabaseConnection, formula: NewFormula) -> DataResult<formulas::Model> {
        formula.validate()?;
        fetch::<Alchemists, _>(db, "alchemist", formula.alchemist_id).await?;

        let active = formulas::ActiveModel {
            id: NotSet,
            name: Set(formula.name),
            effect: Set(formula.effect),
            focus_level: Set(formula.focus_level),
            components: Set(formula.components),
            threshold: Set(formula.threshold),
            range: Set(formula.range),
            alchemist_id: Set(formula.alchemist_id),
            lang: Set(formula.lang),
            status: Set(formula.status),
            updated_at: NotSet,
        };

        let model = active.insert(db).await?;
        log::debug!("Formula created: {} ({})", model.name, model.id);
        Ok(model)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> DataResult<Option<formulas::Model>> {
        Ok(Formulas::find_by_id(id).one(db).await?)
    }

    /// All formulas matching `filter`, by name
    pub async fn find_all(
        db: &DatabaseConnection,
        filter: RecordFilter,
    ) -> DataResult<Vec<formulas::Model>> {
        Ok(filter
            .apply(Formulas::find())
            .order_by_asc(formulas::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn find_by_alchemist(
        db: &DatabaseConnection,
        alchemist_id: i32,
        filter: RecordFilter,
    ) -> DataResult<Vec<formulas::Model>> {
        Ok(filter
            .apply(Formulas::find())
            .filter(formulas::Column::AlchemistId.eq(alchemist_id))
            .order_by_asc(formulas::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: FormulaUpdate,
    ) -> DataResult<formulas::Model> {
        updates.validate()?;

        let existing = fetch::<Formulas, _>(db, "formula", id).await?;
        let mut active: formulas::ActiveModel = existing.into();

        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(effect) = updates.effect {
            active.effect = Set(effect);
        }
        if let Some(focus_level) = updates.focus_level {
            active.focus_level = Set(focus_level);
        }
        if let Some(components) = updates.components {
            active.components = Set(components);
        }
        if let Some(threshold) = updates.threshold {
            active.threshold = Set(threshold);
        }
        if let Some(range) = updates.range {
            active.range = Set(range);
        }
        if let Some(alchemist_id) = updates.alchemist_id {
            fetch::<Alchemists, _>(db, "alchemist", alchemist_id).await?;
            active.alchemist_id = Set(alchemist_id);
        }
        if let Some(lang) = updates.lang {
            active.lang = Set(lang);
        }
        if let Some(status) = updates.status {
            active.status = Set(status);
        }

        Ok(active.update(db).await?)
    }

    /// Delete a formula; its enhancement links go with it
    pub async fn delete(db: &DatabaseConnection, id: i32) -> DataResult<DeleteResult> {
        Ok(Formulas::delete_by_id(id).exec(db).await?)
    }

    pub async fn count(db: &DatabaseConnection, filter: RecordFilter) -> DataResult<u64> {
        Ok(filter.apply(Formulas::find()).count(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::dto::NewAlchemist;
    use crate::database::repository::{AlchemistsRepository, ProfilesRepository};
    use crate::entity::choices::{Lang, Status, Threshold};
    use crate::error::{DataError, ValidationError};
    use crate::test_support::{backdate, memory_db, sample_profile};

    async fn alchemist(db: &DatabaseConnection, name: &str) -> i32 {
        AlchemistsRepository::create(
            db,
            NewAlchemist {
                profile: sample_profile(name),
                element: "Air".to_string(),
                rank: "Adepte".to_string(),
                stones: 2,
            },
        )
        .await
        .unwrap()
        .id()
    }

    fn new_formula(name: &str, alchemist_id: i32) -> NewFormula {
        NewFormula {
            name: name.to_string(),
            effect: "Repousse la cible de 2 cm".to_string(),
            focus_level: 1,
            components: "Air".to_string(),
            threshold: Threshold::default(),
            range: 10,
            alchemist_id,
            lang: Lang::default(),
            status: Status::default(),
        }
    }

    #[tokio::test]
    async fn create_defaults_threshold_to_target() {
        let db = memory_db().await;
        let owner = alchemist(&db, "Zaïa").await;

        let formula = FormulasRepository::create(&db, new_formula("Bourrasque", owner))
            .await
            .unwrap();
        assert_eq!(formula.threshold, Threshold::Target);
        assert_eq!(formula.to_string(), "Bourrasque");
    }

    #[tokio::test]
    async fn formula_needs_an_alchemist() {
        let db = memory_db().await;
        let golem = ProfilesRepository::create(&db, sample_profile("Golem"))
            .await
            .unwrap();

        let err = FormulasRepository::create(&db, new_formula("Bourrasque", golem.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::NotFound {
                entity: "alchemist",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn blank_components_are_rejected() {
        let db = memory_db().await;
        let owner = alchemist(&db, "Zaïa").await;
        let mut payload = new_formula("Bourrasque", owner);
        payload.components = " ".to_string();

        let err = FormulasRepository::create(&db, payload).await.unwrap_err();
        assert!(matches!(
            err,
            DataError::Validation(ValidationError::RequiredFieldMissing {
                field: "components"
            })
        ));
    }

    #[tokio::test]
    async fn listing_is_by_name_and_per_alchemist() {
        let db = memory_db().await;
        let zaia = alchemist(&db, "Zaïa").await;
        let aldo = alchemist(&db, "Aldo").await;
        for name in ["Tornade", "Bourrasque"] {
            FormulasRepository::create(&db, new_formula(name, zaia))
                .await
                .unwrap();
        }
        let mut published = new_formula("Éclair", aldo);
        published.status = Status::Published;
        FormulasRepository::create(&db, published).await.unwrap();

        let all = FormulasRepository::find_all(&db, RecordFilter::all())
            .await
            .unwrap();
        let names: Vec<_> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Bourrasque", "Tornade", "Éclair"]);

        let of_zaia = FormulasRepository::find_by_alchemist(&db, zaia, RecordFilter::all())
            .await
            .unwrap();
        assert_eq!(of_zaia.len(), 2);

        let published = RecordFilter::published(Lang::French);
        assert_eq!(FormulasRepository::count(&db, published).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_moves_formula_and_refreshes_timestamp() {
        let db = memory_db().await;
        let zaia = alchemist(&db, "Zaïa").await;
        let aldo = alchemist(&db, "Aldo").await;
        let formula = FormulasRepository::create(&db, new_formula("Bourrasque", zaia))
            .await
            .unwrap();
        let old = backdate::<Formulas>(&db, formulas::Column::UpdatedAt).await;

        let updated = FormulasRepository::update(
            &db,
            formula.id,
            FormulaUpdate {
                threshold: Some(Threshold::Auto),
                alchemist_id: Some(aldo),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.threshold, Threshold::Auto);
        assert_eq!(updated.alchemist_id, aldo);
        assert!(updated.updated_at > old);

        let err = FormulasRepository::update(
            &db,
            formula.id,
            FormulaUpdate {
                alchemist_id: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DataError::NotFound { id: 999, .. }));
    }

    #[tokio::test]
    async fn database_rejects_codes_outside_the_sets() {
        let db = memory_db().await;
        let owner = alchemist(&db, "Zaïa").await;

        let insert = |lang: &str, status: &str, threshold: &str| {
            Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "INSERT INTO formulas (name, effect, focus_level, components, threshold, \"range\", alchemist_id, lang, status, updated_at) \
                 VALUES ('Raw', 'Effet', 1, 'Air', ?, 3, ?, ?, ?, '2024-03-01 00:00:00')",
                [
                    threshold.into(),
                    owner.into(),
                    lang.into(),
                    status.into(),
                ],
            )
        };

        db.execute(insert("fr", "pub", "Auto")).await.unwrap();
        assert!(db.execute(insert("de", "pub", "Auto")).await.is_err());
        assert!(db.execute(insert("fr", "archived", "Auto")).await.is_err());
        assert!(db.execute(insert("fr", "pub", "Self")).await.is_err());

        assert_eq!(
            FormulasRepository::count(&db, RecordFilter::all()).await.unwrap(),
            1
        );
    }
}
