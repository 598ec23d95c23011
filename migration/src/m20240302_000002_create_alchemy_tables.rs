//! Alchemy tables
//!
//! An alchemist is a profile with extra columns: its row is keyed by the
//! profile id and disappears with the profile. Formulas belong to exactly
//! one alchemist; enhancements attach to any number of formulas.

use sea_orm_migration::prelude::*;

use crate::columns::{
    cascade_fk, choice_col, id_col, index, lang_col, status_col, string_col, updated_at_col,
    THRESHOLD_CODES,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. alchemists (one-to-one with profiles)
        manager
            .create_table(
                Table::create()
                    .table(Alchemists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alchemists::ProfileId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string_col(Alchemists::Element, 10))
                    .col(string_col(Alchemists::Rank, 30))
                    .col(ColumnDef::new(Alchemists::Stones).integer().not_null())
                    .foreign_key(&mut cascade_fk(
                        "fk_alchemists_profile",
                        Alchemists::Table,
                        Alchemists::ProfileId,
                        Profiles::Table,
                        Profiles::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 2. formulas
        manager
            .create_table(
                Table::create()
                    .table(Formulas::Table)
                    .if_not_exists()
                    .col(id_col(Formulas::Id))
                    .col(string_col(Formulas::Name, 50))
                    .col(ColumnDef::new(Formulas::Effect).text().not_null())
                    .col(ColumnDef::new(Formulas::FocusLevel).integer().not_null())
                    .col(string_col(Formulas::Components, 20))
                    .col(choice_col(Formulas::Threshold, 5, &THRESHOLD_CODES, "Cible"))
                    .col(ColumnDef::new(Formulas::Range).integer().not_null())
                    .col(ColumnDef::new(Formulas::AlchemistId).integer().not_null())
                    .col(lang_col(Formulas::Lang))
                    .col(status_col(Formulas::Status))
                    .col(updated_at_col(Formulas::UpdatedAt))
                    .foreign_key(&mut cascade_fk(
                        "fk_formulas_alchemist",
                        Formulas::Table,
                        Formulas::AlchemistId,
                        Alchemists::Table,
                        Alchemists::ProfileId,
                    ))
                    .to_owned(),
            )
            .await?;

        // 3. enhancements
        manager
            .create_table(
                Table::create()
                    .table(Enhancements::Table)
                    .if_not_exists()
                    .col(id_col(Enhancements::Id))
                    .col(ColumnDef::new(Enhancements::Description).text().not_null())
                    .col(lang_col(Enhancements::Lang))
                    .col(status_col(Enhancements::Status))
                    .col(updated_at_col(Enhancements::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 4. enhancement <-> formula links
        manager
            .create_table(
                Table::create()
                    .table(EnhancementFormulas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EnhancementFormulas::EnhancementId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EnhancementFormulas::FormulaId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EnhancementFormulas::EnhancementId)
                            .col(EnhancementFormulas::FormulaId),
                    )
                    .foreign_key(&mut cascade_fk(
                        "fk_enhancement_formulas_enhancement",
                        EnhancementFormulas::Table,
                        EnhancementFormulas::EnhancementId,
                        Enhancements::Table,
                        Enhancements::Id,
                    ))
                    .foreign_key(&mut cascade_fk(
                        "fk_enhancement_formulas_formula",
                        EnhancementFormulas::Table,
                        EnhancementFormulas::FormulaId,
                        Formulas::Table,
                        Formulas::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // 5. indexes
        let indexes = [
            index("idx_formulas_name", Formulas::Table, Formulas::Name),
            index(
                "idx_formulas_alchemist_id",
                Formulas::Table,
                Formulas::AlchemistId,
            ),
            index(
                "idx_enhancement_formulas_formula_id",
                EnhancementFormulas::Table,
                EnhancementFormulas::FormulaId,
            ),
        ];
        for statement in indexes {
            manager.create_index(statement).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            EnhancementFormulas::Table.into_iden(),
            Enhancements::Table.into_iden(),
            Formulas::Table.into_iden(),
            Alchemists::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Alchemists {
    Table,
    ProfileId,
    Element,
    Rank,
    Stones,
}

#[derive(DeriveIden, Clone)]
enum Formulas {
    Table,
    Id,
    Name,
    Effect,
    FocusLevel,
    Components,
    Threshold,
    Range,
    AlchemistId,
    Lang,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden, Clone)]
enum Enhancements {
    Table,
    Id,
    Description,
    Lang,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EnhancementFormulas {
    Table,
    EnhancementId,
    FormulaId,
}
