//! Core game-data tables
//!
//! Creates factions, abilities and profiles together with the two
//! profile association tables:
//! 1. profile_factions links a profile to any number of factions
//! 2. ability_values pairs a profile with an ability and an optional value

use sea_orm_migration::prelude::*;

use crate::columns::{
    blank_string_col, cascade_fk, id_col, index, lang_col, status_col, string_col,
    updated_at_col,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. factions
        manager
            .create_table(
                Table::create()
                    .table(Factions::Table)
                    .if_not_exists()
                    .col(id_col(Factions::Id))
                    .col(string_col(Factions::Name, 50))
                    .col(lang_col(Factions::Lang))
                    .col(status_col(Factions::Status))
                    .col(updated_at_col(Factions::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 2. abilities
        manager
            .create_table(
                Table::create()
                    .table(Abilities::Table)
                    .if_not_exists()
                    .col(id_col(Abilities::Id))
                    .col(string_col(Abilities::Name, 50))
                    .col(ColumnDef::new(Abilities::Description).text().not_null())
                    .col(lang_col(Abilities::Lang))
                    .col(status_col(Abilities::Status))
                    .col(updated_at_col(Abilities::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 3. profiles
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(id_col(Profiles::Id))
                    .col(string_col(Profiles::Name, 30))
                    .col(blank_string_col(Profiles::Title, 50))
                    .col(string_col(Profiles::LifePoints, 8))
                    .col(string_col(Profiles::Movement, 8))
                    .col(string_col(Profiles::DamageCc, 16))
                    .col(blank_string_col(Profiles::DamageRa, 16))
                    .col(ColumnDef::new(Profiles::ActionPoints).integer().not_null())
                    .col(ColumnDef::new(Profiles::Cost).integer().not_null())
                    .col(ColumnDef::new(Profiles::Combat).integer().not_null())
                    .col(ColumnDef::new(Profiles::Defense).integer().not_null())
                    .col(ColumnDef::new(Profiles::Mind).integer().not_null())
                    .col(ColumnDef::new(Profiles::Reflexes).integer().not_null())
                    .col(
                        ColumnDef::new(Profiles::Size)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(lang_col(Profiles::Lang))
                    .col(status_col(Profiles::Status))
                    .col(updated_at_col(Profiles::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 4. profile <-> faction links
        manager
            .create_table(
                Table::create()
                    .table(ProfileFactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileFactions::ProfileId).integer().not_null())
                    .col(ColumnDef::new(ProfileFactions::FactionId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProfileFactions::ProfileId)
                            .col(ProfileFactions::FactionId),
                    )
                    .foreign_key(&mut cascade_fk(
                        "fk_profile_factions_profile",
                        ProfileFactions::Table,
                        ProfileFactions::ProfileId,
                        Profiles::Table,
                        Profiles::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_profile_factions_faction",
                        ProfileFactions::Table,
                        ProfileFactions::FactionId,
                        Factions::Table,
                        Factions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 5. ability values
        manager
            .create_table(
                Table::create()
                    .table(AbilityValues::Table)
                    .if_not_exists()
                    .col(id_col(AbilityValues::Id))
                    .col(ColumnDef::new(AbilityValues::AbilityId).integer().not_null())
                    .col(ColumnDef::new(AbilityValues::ProfileId).integer().not_null())
                    .col(blank_string_col(AbilityValues::Value, 10))
                    .foreign_key(&mut cascade_fk(
                        "fk_ability_values_ability",
                        AbilityValues::Table,
                        AbilityValues::AbilityId,
                        Abilities::Table,
                        Abilities::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_ability_values_profile",
                        AbilityValues::Table,
                        AbilityValues::ProfileId,
                        Profiles::Table,
                        Profiles::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 6. indexes
        let indexes = [
            index("idx_factions_name", Factions::Table, Factions::Name),
            index("idx_abilities_name", Abilities::Table, Abilities::Name),
            index("idx_profiles_name", Profiles::Table, Profiles::Name),
            index(
                "idx_profile_factions_faction_id",
                ProfileFactions::Table,
                ProfileFactions::FactionId,
            ),
            index(
                "idx_ability_values_profile_id",
                AbilityValues::Table,
                AbilityValues::ProfileId,
            ),
            index(
                "idx_ability_values_ability_id",
                AbilityValues::Table,
                AbilityValues::AbilityId,
            ),
        ];
        for statement in indexes {
            manager.create_index(statement).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            AbilityValues::Table.into_iden(),
            ProfileFactions::Table.into_iden(),
            Profiles::Table.into_iden(),
            Abilities::Table.into_iden(),
            Factions::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone)]
enum Factions {
    Table,
    Id,
    Name,
    Lang,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden, Clone)]
enum Abilities {
    Table,
    Id,
    Name,
    Description,
    Lang,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden, Clone)]
enum Profiles {
    Table,
    Id,
    Name,
    Title,
    LifePoints,
    Movement,
    DamageCc,
    DamageRa,
    ActionPoints,
    Cost,
    Combat,
    Defense,
    Mind,
    Reflexes,
    Size,
    Lang,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProfileFactions {
    Table,
    ProfileId,
    FactionId,
}

#[derive(DeriveIden)]
enum AbilityValues {
    Table,
    Id,
    AbilityId,
    ProfileId,
    Value,
}
