//! Game data store for the Alkemy tabletop game.
//!
//! Factions, abilities, character profiles, alchemists, formulas and
//! enhancements, persisted in SQLite through SeaORM.

pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod logs;

#[cfg(test)]
mod test_support;

pub use config::DatabaseConfig;
pub use database::dto::*;
pub use database::repository::{
    AbilitiesRepository, AbilityValueDetail, AlchemistsRepository, EnhancementsRepository,
    FactionsRepository, FormulasRepository, FullAlchemist, ProfilesRepository, RecordFilter,
    StoreSummary,
};
pub use database::{backup_database, close_connection, establish_connection, init_database};
pub use entity::choices::{Lang, Status, Threshold};
pub use error::{DataError, DataResult, ValidationError};

/// Open the store, apply pending migrations and report its content.
///
/// With `backup`, a hot copy of the database is written to the configured
/// backup directory before closing.
pub async fn run(config: &DatabaseConfig, backup: bool) -> DataResult<()> {
    let conn = init_database(config).await?;

    let summary = StoreSummary::collect(&conn).await?;
    log::info!(
        "Store content: {} factions, {} abilities, {} profiles ({} alchemists), {} formulas, {} enhancements",
        summary.factions,
        summary.abilities,
        summary.profiles,
        summary.alchemists,
        summary.formulas,
        summary.enhancements
    );

    if backup {
        let backup_dir = config.resolve_backup_dir()?;
        match backup_database(&conn, &backup_dir).await {
            Ok(path) => log::info!("Backup written: {}", path.display()),
            Err(e) => {
                log::error!("Backup failed: {}", e);
                close_connection(conn).await?;
                return Err(e);
            }
        }
    }

    match close_connection(conn).await {
        Ok(_) => log::info!("Database connection closed"),
        Err(e) => log::warn!("Error while closing the database connection: {}", e),
    }
    Ok(())
}
