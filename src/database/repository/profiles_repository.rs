use std::collections::HashSet;
use std::fmt;

use sea_orm::*;
use serde::{Deserialize, Serialize};

use super::{fetch, RecordFilter};
use crate::database::dto::{validate_ability_value, NewProfile, ProfileUpdate};
use crate::entity::ability_values::format_label;
use crate::entity::prelude::*;
use crate::entity::{abilities, ability_values, factions, profile_factions, profiles};
use crate::error::{DataError, DataResult};

/// A profile's value for one ability, with the ability loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityValueDetail {
    pub id: i32,
    pub profile_id: i32,
    pub ability: abilities::Model,
    pub value: String,
}

impl fmt::Display for AbilityValueDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_label(&self.ability.name, &self.value))
    }
}

/// Profile data repository
///
/// Lists and lookups cover every profile, alchemists included.
pub struct ProfilesRepository;

/// Inserts a profile row on any connection, so alchemist creation can
/// share its transaction.
pub(crate) async fn insert_profile<C: ConnectionTrait>(
    conn: &C,
    profile: NewProfile,
) -> Result<profiles::Model, DbErr> {
    let active = profiles::ActiveModel {
        id: NotSet,
        name: Set(profile.name),
        title: Set(profile.title),
        life_points: Set(profile.life_points),
        movement: Set(profile.movement),
        action_points: Set(profile.action_points),
        cost: Set(profile.cost),
        size: Set(profile.size),
        damage_cc: Set(profile.damage_cc),
        damage_ra: Set(profile.damage_ra),
        combat: Set(profile.combat),
        defense: Set(profile.defense),
        mind: Set(profile.mind),
        reflexes: Set(profile.reflexes),
        lang: Set(profile.lang),
        status: Set(profile.status),
        updated_at: NotSet,
    };
    active.insert(conn).await
}

/// Copies the provided fields of `updates` onto `active`.
pub(crate) fn apply_profile_update(active: &mut profiles::ActiveModel, updates: ProfileUpdate) {
    if let Some(v) = updates.name {
        active.name = Set(v);
    }
    if let Some(v) = updates.title {
        active.title = Set(v);
    }
    if let Some(v) = updates.life_points {
        active.life_points = Set(v);
    }
    if let Some(v) = updates.movement {
        active.movement = Set(v);
    }
    if let Some(v) = updates.damage_cc {
        active.damage_cc = Set(v);
    }
    if let Some(v) = updates.damage_ra {
        active.damage_ra = Set(v);
    }
    if let Some(v) = updates.action_points {
        active.action_points = Set(v);
    }
    if let Some(v) = updates.cost {
        active.cost = Set(v);
    }
    if let Some(v) = updates.combat {
        active.combat = Set(v);
    }
    if let Some(v) = updates.defense {
        active.defense = Set(v);
    }
    if let Some(v) = updates.mind {
        active.mind = Set(v);
    }
    if let Some(v) = updates.reflexes {
        active.reflexes = Set(v);
    }
    if let Some(v) = updates.size {
        active.size = Set(v);
    }
    if let Some(v) = updates.lang {
        active.lang = Set(v);
    }
    if let Some(v) = updates.status {
        active.status = Set(v);
    }
}

impl ProfilesRepository {
    // ==================== profile CRUD ====================

    pub async fn create(db: &DatabaseConnection, profile: NewProfile) -> DataResult<profiles::Model> {
        profile.validate()?;
        let model = insert_profile(db, profile).await?;
        log::debug!("Profile created: {} ({})", model.name, model.id);
        Ok(model)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> DataResult<Option<profiles::Model>> {
        Ok(Profiles::find_by_id(id).one(db).await?)
    }

    /// All profiles matching `filter`, by name
    pub async fn find_all(
        db: &DatabaseConnection,
        filter: RecordFilter,
    ) -> DataResult<Vec<profiles::Model>> {
        Ok(filter
            .apply(Profiles::find())
            .order_by_asc(profiles::Column::Name)
            .all(db)
            .await?)
    }

    /// Profiles belonging to a faction with this name, by name
    pub async fn find_by_faction_name(
        db: &DatabaseConnection,
        faction_name: &str,
    ) -> DataResult<Vec<profiles::Model>> {
        Ok(Profiles::find()
            .inner_join(Factions)
            .filter(factions::Column::Name.eq(faction_name))
            .order_by_asc(profiles::Column::Name)
            .distinct()
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: ProfileUpdate,
    ) -> DataResult<profiles::Model> {
        updates.validate()?;

        let existing = fetch::<Profiles, _>(db, "profile", id).await?;
        let mut active: profiles::ActiveModel = existing.into();
        apply_profile_update(&mut active, updates);

        Ok(active.update(db).await?)
    }

    /// Delete a profile.
    ///
    /// Cascades to its faction links, its ability values and, for an
    /// alchemist, the alchemist row and its formulas.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> DataResult<DeleteResult> {
        Ok(Profiles::delete_by_id(id).exec(db).await?)
    }

    pub async fn count(db: &DatabaseConnection, filter: RecordFilter) -> DataResult<u64> {
        Ok(filter.apply(Profiles::find()).count(db).await?)
    }

    // ==================== factions ====================

    /// Factions of a profile, by name
    pub async fn factions_of(
        db: &DatabaseConnection,
        profile_id: i32,
    ) -> DataResult<Vec<factions::Model>> {
        let profile = fetch::<Profiles, _>(db, "profile", profile_id).await?;
        Ok(profile
            .find_related(Factions)
            .order_by_asc(factions::Column::Name)
            .all(db)
            .await?)
    }

    /// Link a profile to a faction. Returns `false` if the link already existed.
    pub async fn add_faction(
        db: &DatabaseConnection,
        profile_id: i32,
        faction_id: i32,
    ) -> DataResult<bool> {
        fetch::<Profiles, _>(db, "profile", profile_id).await?;
        fetch::<Factions, _>(db, "faction", faction_id).await?;

        if ProfileFactions::find_by_id((profile_id, faction_id))
            .one(db)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        profile_factions::ActiveModel {
            profile_id: Set(profile_id),
            faction_id: Set(faction_id),
        }
        .insert(db)
        .await?;
        Ok(true)
    }

    pub async fn remove_faction(
        db: &DatabaseConnection,
        profile_id: i32,
        faction_id: i32,
    ) -> DataResult<DeleteResult> {
        Ok(ProfileFactions::delete_by_id((profile_id, faction_id))
            .exec(db)
            .await?)
    }

    /// Replace the factions of a profile with `faction_ids`.
    ///
    /// Only the difference is written: links no longer listed are deleted,
    /// new ones inserted, kept ones untouched. Runs in one transaction.
    pub async fn set_factions(
        db: &DatabaseConnection,
        profile_id: i32,
        faction_ids: Vec<i32>,
    ) -> DataResult<()> {
        let wanted: HashSet<i32> = faction_ids.into_iter().collect();

        let txn = db.begin().await?;

        fetch::<Profiles, _>(&txn, "profile", profile_id).await?;

        // 1. every requested faction must exist
        if !wanted.is_empty() {
            let found: Vec<i32> = Factions::find()
                .filter(factions::Column::Id.is_in(wanted.iter().copied()))
                .all(&txn)
                .await?
                .into_iter()
                .map(|faction| faction.id)
                .collect();
            if let Some(missing) = wanted.iter().find(|id| !found.contains(*id)) {
                return Err(DataError::not_found("faction", *missing));
            }
        }

        // 2. current links
        let current: HashSet<i32> = ProfileFactions::find()
            .filter(profile_factions::Column::ProfileId.eq(profile_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.faction_id)
            .collect();

        // 3. drop links that are no longer wanted
        let to_delete: Vec<i32> = current.difference(&wanted).copied().collect();
        if !to_delete.is_empty() {
            ProfileFactions::delete_many()
                .filter(profile_factions::Column::ProfileId.eq(profile_id))
                .filter(profile_factions::Column::FactionId.is_in(to_delete))
                .exec(&txn)
                .await?;
        }

        // 4. insert the new ones
        let to_insert: Vec<profile_factions::ActiveModel> = wanted
            .difference(&current)
            .map(|&faction_id| profile_factions::ActiveModel {
                profile_id: Set(profile_id),
                faction_id: Set(faction_id),
            })
            .collect();
        if !to_insert.is_empty() {
            ProfileFactions::insert_many(to_insert)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    // ==================== ability values ====================

    /// Abilities of a profile with their values, in insertion order
    pub async fn abilities_of(
        db: &DatabaseConnection,
        profile_id: i32,
    ) -> DataResult<Vec<AbilityValueDetail>> {
        fetch::<Profiles, _>(db, "profile", profile_id).await?;

        let rows = AbilityValues::find()
            .filter(ability_values::Column::ProfileId.eq(profile_id))
            .order_by_asc(ability_values::Column::Id)
            .find_also_related(Abilities)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, ability)| {
                ability.map(|ability| AbilityValueDetail {
                    id: link.id,
                    profile_id: link.profile_id,
                    ability,
                    value: link.value,
                })
            })
            .collect())
    }

    /// Give a profile an ability, with an optional value (blank for none)
    pub async fn add_ability(
        db: &DatabaseConnection,
        profile_id: i32,
        ability_id: i32,
        value: String,
    ) -> DataResult<ability_values::Model> {
        validate_ability_value(&value)?;
        fetch::<Profiles, _>(db, "profile", profile_id).await?;
        fetch::<Abilities, _>(db, "ability", ability_id).await?;

        let active = ability_values::ActiveModel {
            id: NotSet,
            ability_id: Set(ability_id),
            profile_id: Set(profile_id),
            value: Set(value),
        };
        Ok(active.insert(db).await?)
    }

    pub async fn update_ability_value(
        db: &DatabaseConnection,
        ability_value_id: i32,
        value: String,
    ) -> DataResult<ability_values::Model> {
        validate_ability_value(&value)?;

        let existing = fetch::<AbilityValues, _>(db, "ability value", ability_value_id).await?;
        let mut active: ability_values::ActiveModel = existing.into();
        active.value = Set(value);
        Ok(active.update(db).await?)
    }

    pub async fn remove_ability_value(
        db: &DatabaseConnection,
        ability_value_id: i32,
    ) -> DataResult<DeleteResult> {
        Ok(AbilityValues::delete_by_id(ability_value_id).exec(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::dto::{NewAbility, NewFaction};
    use crate::database::repository::{AbilitiesRepository, FactionsRepository};
    use crate::entity::choices::{Lang, Status};
    use crate::error::ValidationError;
    use crate::test_support::{backdate, memory_db, sample_profile};

    async fn faction(db: &DatabaseConnection, name: &str) -> factions::Model {
        FactionsRepository::create(
            db,
            NewFaction {
                name: name.to_string(),
                lang: Lang::French,
                status: Status::Published,
            },
        )
        .await
        .unwrap()
    }

    async fn ability(db: &DatabaseConnection, name: &str) -> abilities::Model {
        AbilitiesRepository::create(
            db,
            NewAbility {
                name: name.to_string(),
                description: format!("{} description", name),
                lang: Lang::French,
                status: Status::Published,
            },
        )
        .await
        .unwrap()
    }

    fn faction_names(factions: &[factions::Model]) -> Vec<&str> {
        factions.iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_keeps_stats_and_defaults() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();

        assert_eq!(profile.size, 2);
        assert_eq!(profile.title, "");
        assert_eq!(profile.life_points_values(), vec![3, 2, 1]);
        assert!(profile.damage_ra_values().is_empty());
        assert_eq!(profile.lang, Lang::French);
        assert_eq!(profile.status, Status::Draft);
    }

    #[tokio::test]
    async fn malformed_stats_are_rejected() {
        let db = memory_db().await;
        let mut payload = sample_profile("Arkéo");
        payload.damage_cc = "2;3".to_string();

        let err = ProfilesRepository::create(&db, payload).await.unwrap_err();
        assert!(matches!(
            err,
            DataError::Validation(ValidationError::InvalidFormat {
                field: "damage_cc",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn update_refreshes_timestamp() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let old = backdate::<Profiles>(&db, profiles::Column::UpdatedAt).await;

        let updated = ProfilesRepository::update(
            &db,
            profile.id,
            ProfileUpdate {
                title: Some("Le Gardien".to_string()),
                damage_ra: Some("1,1,0".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Le Gardien");
        assert_eq!(updated.damage_ra_values(), vec![1, 1, 0]);
        assert_eq!(updated.name, "Arkéo");
        assert!(updated.updated_at > old);
    }

    #[tokio::test]
    async fn set_factions_replaces_by_difference() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let avalon = faction(&db, "Avalon").await;
        let syrtis = faction(&db, "Syrtis").await;
        let khalimans = faction(&db, "Khalimans").await;

        ProfilesRepository::set_factions(&db, profile.id, vec![syrtis.id, avalon.id, avalon.id])
            .await
            .unwrap();
        let current = ProfilesRepository::factions_of(&db, profile.id).await.unwrap();
        assert_eq!(faction_names(&current), ["Avalon", "Syrtis"]);

        ProfilesRepository::set_factions(&db, profile.id, vec![khalimans.id, avalon.id])
            .await
            .unwrap();
        let current = ProfilesRepository::factions_of(&db, profile.id).await.unwrap();
        assert_eq!(faction_names(&current), ["Avalon", "Khalimans"]);

        ProfilesRepository::set_factions(&db, profile.id, Vec::new())
            .await
            .unwrap();
        assert!(ProfilesRepository::factions_of(&db, profile.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn set_factions_with_unknown_faction_changes_nothing() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let avalon = faction(&db, "Avalon").await;
        ProfilesRepository::add_faction(&db, profile.id, avalon.id)
            .await
            .unwrap();

        let err = ProfilesRepository::set_factions(&db, profile.id, vec![avalon.id, 999])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::NotFound {
                entity: "faction",
                id: 999
            }
        ));

        let current = ProfilesRepository::factions_of(&db, profile.id).await.unwrap();
        assert_eq!(faction_names(&current), ["Avalon"]);
    }

    #[tokio::test]
    async fn add_faction_is_idempotent() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let avalon = faction(&db, "Avalon").await;

        assert!(ProfilesRepository::add_faction(&db, profile.id, avalon.id)
            .await
            .unwrap());
        assert!(!ProfilesRepository::add_faction(&db, profile.id, avalon.id)
            .await
            .unwrap());

        let removed = ProfilesRepository::remove_faction(&db, profile.id, avalon.id)
            .await
            .unwrap();
        assert_eq!(removed.rows_affected, 1);
    }

    #[tokio::test]
    async fn filter_by_faction_name() {
        let db = memory_db().await;
        let avalon = faction(&db, "Avalon").await;
        let syrtis = faction(&db, "Syrtis").await;
        let zelda = ProfilesRepository::create(&db, sample_profile("Zelda"))
            .await
            .unwrap();
        let arkeo = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let brutus = ProfilesRepository::create(&db, sample_profile("Brutus"))
            .await
            .unwrap();
        ProfilesRepository::set_factions(&db, zelda.id, vec![avalon.id, syrtis.id])
            .await
            .unwrap();
        ProfilesRepository::set_factions(&db, arkeo.id, vec![avalon.id])
            .await
            .unwrap();
        ProfilesRepository::set_factions(&db, brutus.id, vec![syrtis.id])
            .await
            .unwrap();

        let members = ProfilesRepository::find_by_faction_name(&db, "Avalon")
            .await
            .unwrap();
        let names: Vec<_> = members.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Arkéo", "Zelda"]);
    }

    #[tokio::test]
    async fn deleting_a_faction_unlinks_profiles() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let avalon = faction(&db, "Avalon").await;
        ProfilesRepository::add_faction(&db, profile.id, avalon.id)
            .await
            .unwrap();

        FactionsRepository::delete(&db, avalon.id).await.unwrap();

        assert!(ProfilesRepository::factions_of(&db, profile.id)
            .await
            .unwrap()
            .is_empty());
        assert!(ProfilesRepository::find_by_id(&db, profile.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn ability_values_render_with_optional_value() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let flight = ability(&db, "Vol").await;
        let armor = ability(&db, "Armure").await;

        ProfilesRepository::add_ability(&db, profile.id, flight.id, String::new())
            .await
            .unwrap();
        ProfilesRepository::add_ability(&db, profile.id, armor.id, "2".to_string())
            .await
            .unwrap();

        let details = ProfilesRepository::abilities_of(&db, profile.id).await.unwrap();
        let labels: Vec<String> = details.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["Vol", "Armure (2)"]);
    }

    #[tokio::test]
    async fn ability_value_can_be_changed_and_removed() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let armor = ability(&db, "Armure").await;
        let link = ProfilesRepository::add_ability(&db, profile.id, armor.id, "1".to_string())
            .await
            .unwrap();

        let changed = ProfilesRepository::update_ability_value(&db, link.id, "3".to_string())
            .await
            .unwrap();
        assert_eq!(changed.label(&armor), "Armure (3)");

        let err = ProfilesRepository::update_ability_value(&db, link.id, "x".repeat(11))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Validation(ValidationError::TooLong { .. })));

        ProfilesRepository::remove_ability_value(&db, link.id)
            .await
            .unwrap();
        assert!(ProfilesRepository::abilities_of(&db, profile.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn ability_pairing_requires_both_sides() {
        let db = memory_db().await;
        let profile = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();

        let err = ProfilesRepository::add_ability(&db, profile.id, 77, String::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::NotFound {
                entity: "ability",
                id: 77
            }
        ));
    }

    #[tokio::test]
    async fn deleting_profile_or_ability_removes_ability_values() {
        let db = memory_db().await;
        let arkeo = ProfilesRepository::create(&db, sample_profile("Arkéo"))
            .await
            .unwrap();
        let zelda = ProfilesRepository::create(&db, sample_profile("Zelda"))
            .await
            .unwrap();
        let flight = ability(&db, "Vol").await;
        let armor = ability(&db, "Armure").await;
        for profile in [&arkeo, &zelda] {
            for ability in [&flight, &armor] {
                ProfilesRepository::add_ability(&db, profile.id, ability.id, String::new())
                    .await
                    .unwrap();
            }
        }
        assert_eq!(AbilityValues::find().count(&db).await.unwrap(), 4);

        ProfilesRepository::delete(&db, arkeo.id).await.unwrap();
        assert_eq!(AbilityValues::find().count(&db).await.unwrap(), 2);

        AbilitiesRepository::delete(&db, armor.id).await.unwrap();
        let remaining = AbilityValues::find().all(&db).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].profile_id, zelda.id);
        assert_eq!(remaining[0].ability_id, flight.id);
    }
}
