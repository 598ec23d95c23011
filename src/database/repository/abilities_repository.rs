use sea_orm::*;

use super::{fetch, RecordFilter};
use crate::database::dto::{AbilityUpdate, NewAbility};
use crate::entity::prelude::*;
use crate::entity::{abilities, profiles};
use crate::error::DataResult;

/// Ability data repository
pub struct AbilitiesRepository;

impl AbilitiesRepository {
    pub async fn create(db: &DatabaseConnection, ability: NewAbility) -> DataResult<abilities::Model> {
        ability.validate()?;

        let active = abilities::ActiveModel {
            id: NotSet,
            name: Set(ability.name),
            description: Set(ability.description),
            lang: Set(ability.lang),
            status: Set(ability.status),
            updated_at: NotSet,
        };

        let model = active.insert(db).await?;
        log::debug!("Ability created: {} ({})", model.name, model.id);
        Ok(model)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> DataResult<Option<abilities::Model>> {
        Ok(Abilities::find_by_id(id).one(db).await?)
    }

    pub async fn find_all(
        db: &DatabaseConnection,
        filter: RecordFilter,
    ) -> DataResult<Vec<abilities::Model>> {
        Ok(filter
            .apply(Abilities::find())
            .order_by_asc(abilities::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: AbilityUpdate,
    ) -> DataResult<abilities::Model> {
        updates.validate()?;

        let existing = fetch::<Abilities, _>(db, "ability", id).await?;
        let mut active: abilities::ActiveModel = existing.into();

        if let Some(name) = updates.name {
            active.name = Set(name);
        }
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

    /// Delete an ability; every profile's value for it is removed too
    pub async fn delete(db: &DatabaseConnection, id: i32) -> DataResult<DeleteResult> {
        Ok(Abilities::delete_by_id(id).exec(db).await?)
    }

    pub async fn count(db: &DatabaseConnection, filter: RecordFilter) -> DataResult<u64> {
        Ok(filter.apply(Abilities::find()).count(db).await?)
    }

    /// Profiles listing this ability, by name
    pub async fn profiles_with(
        db: &DatabaseConnection,
        ability_id: i32,
    ) -> DataResult<Vec<profiles::Model>> {
        let ability = fetch::<Abilities, _>(db, "ability", ability_id).await?;
        Ok(ability
            .find_related(Profiles)
            .order_by_asc(profiles::Column::Name)
            .distinct()
            .all(db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::choices::{Lang, Status};
    use crate::error::{DataError, ValidationError};
    use crate::test_support::{backdate, memory_db, sample_profile};
    use crate::database::repository::ProfilesRepository;

    fn new_ability(name: &str, description: &str) -> NewAbility {
        NewAbility {
            name: name.to_string(),
            description: description.to_string(),
            lang: Lang::default(),
            status: Status::default(),
        }
    }

    #[tokio::test]
    async fn description_is_required() {
        let db = memory_db().await;
        let err = AbilitiesRepository::create(&db, new_ability("Vol", " "))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::Validation(ValidationError::RequiredFieldMissing {
                field: "description"
            })
        ));
    }

    #[tokio::test]
    async fn update_refreshes_timestamp() {
        let db = memory_db().await;
        let ability = AbilitiesRepository::create(&db, new_ability("Vol", "Ignore le terrain"))
            .await
            .unwrap();
        let old = backdate::<Abilities>(&db, abilities::Column::UpdatedAt).await;

        let updated = AbilitiesRepository::update(
            &db,
            ability.id,
            AbilityUpdate {
                description: Some("Ignore les obstacles".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.description, "Ignore les obstacles");
        assert!(updated.updated_at > old);
    }

    #[tokio::test]
    async fn profiles_with_lists_each_profile_once() {
        let db = memory_db().await;
        let ability = AbilitiesRepository::create(&db, new_ability("Armure", "Réduit les dégâts"))
            .await
            .unwrap();
        let profile = ProfilesRepository::create(&db, sample_profile("Golem"))
            .await
            .unwrap();
        ProfilesRepository::add_ability(&db, profile.id, ability.id, "1".to_string())
            .await
            .unwrap();
        ProfilesRepository::add_ability(&db, profile.id, ability.id, "2".to_string())
            .await
            .unwrap();

        let holders = AbilitiesRepository::profiles_with(&db, ability.id).await.unwrap();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].name, "Golem");
    }
}
