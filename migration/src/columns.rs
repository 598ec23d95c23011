//! Column definitions shared by every game-data table.
//!
//! `lang`, `status` and `updated_at` are mixed into factions, abilities,
//! profiles, formulas and enhancements. Choice columns carry a CHECK
//! constraint so the database rejects codes outside the closed set.

use sea_orm_migration::prelude::*;

pub const LANG_CODES: [&str; 2] = ["fr", "en"];
pub const STATUS_CODES: [&str; 3] = ["dft", "pub", "del"];
pub const THRESHOLD_CODES: [&str; 2] = ["Cible", "Auto"];

/// Integer primary key with autoincrement
pub fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Required bounded string
pub fn string_col<T: IntoIden>(col: T, len: u32) -> ColumnDef {
    ColumnDef::new(col).string_len(len).not_null().to_owned()
}

/// Bounded string that may be left blank
pub fn blank_string_col<T: IntoIden>(col: T, len: u32) -> ColumnDef {
    ColumnDef::new(col)
        .string_len(len)
        .not_null()
        .default("")
        .to_owned()
}

/// String column restricted to `codes`, with a default
pub fn choice_col<T: IntoIden + Clone + 'static>(col: T, len: u32, codes: &[&str], default: &str) -> ColumnDef {
    ColumnDef::new(col.clone())
        .string_len(len)
        .not_null()
        .default(default)
        .check(Expr::col(col).is_in(codes.iter().copied()))
        .to_owned()
}

pub fn lang_col<T: IntoIden + Clone + 'static>(col: T) -> ColumnDef {
    choice_col(col, 2, &LANG_CODES, "fr")
}

pub fn status_col<T: IntoIden + Clone + 'static>(col: T) -> ColumnDef {
    choice_col(col, 3, &STATUS_CODES, "dft")
}

pub fn updated_at_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

/// Cascading foreign key; `name` must be unique in the schema.
pub fn cascade_fk<FT, FC, TT, TC>(
    name: &str,
    from_table: FT,
    from_col: FC,
    to_table: TT,
    to_col: TC,
) -> ForeignKeyCreateStatement
where
    FT: IntoIden + 'static,
    FC: IntoIden,
    TT: IntoIden + 'static,
    TC: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Plain index on a single column
pub fn index<T, C>(name: &str, table: T, col: C) -> IndexCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden,
{
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(col)
        .to_owned()
}
