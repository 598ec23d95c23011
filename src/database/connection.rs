use std::fs;
use std::path::{Path, PathBuf};

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;
use crate::error::{DataError, DataResult};

/// Establish a SeaORM database connection.
pub async fn establish_connection(config: &DatabaseConfig) -> DataResult<DatabaseConnection> {
    // 1. make sure the directory of a file database exists
    if let Some(db_path) = config.sqlite_file() {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                log::info!("Creating database directory: {}", parent.display());
            }
        }
        log::info!("Using database file: {}", db_path.display());
    } else {
        log::info!("Using database: {}", config.url);
    }

    // 2. connect
    let conn = Database::connect(config.connect_options()).await?;
    Ok(conn)
}

/// Connects and brings the schema up to date.
pub async fn init_database(config: &DatabaseConfig) -> DataResult<DatabaseConnection> {
    let conn = establish_connection(config).await?;
    log::info!("Database connection established");

    log::info!("Running database migrations...");
    Migrator::up(&conn, None).await?;
    log::info!("Database migrations complete");

    Ok(conn)
}

/// Close the database connection
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

// ==================== backup ====================

/// Timestamped backup file name
fn generate_backup_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    format!("alkemy_{}.db", timestamp)
}

/// Hot backup with `VACUUM INTO`.
///
/// SQLite writes a compacted copy of the live database while it stays in
/// use. Returns the path of the new file inside `backup_dir`.
pub async fn backup_database(db: &DatabaseConnection, backup_dir: &Path) -> DataResult<PathBuf> {
    if !backup_dir.exists() {
        fs::create_dir_all(backup_dir)?;
    }

    let target_path = backup_dir.join(generate_backup_filename());
    if target_path.exists() {
        return Err(DataError::Config(format!(
            "Backup file already exists: {}",
            target_path.display()
        )));
    }

    // SQLite accepts forward slashes on every platform
    let target_path_str = target_path
        .to_str()
        .ok_or_else(|| DataError::Config("Backup path is not valid UTF-8".to_string()))?
        .replace('\\', "/");

    // only single quotes need escaping inside the literal
    let escaped_path = target_path_str.replace('\'', "''");
    db.execute_unprepared(&format!("VACUUM INTO '{}'", escaped_path))
        .await?;

    // an in-memory database accepts VACUUM INTO without writing anything
    if !target_path.exists() {
        log::warn!("Backup produced no file: {}", target_path_str);
        return Err(DataError::Config(format!(
            "Backup was not written to {}; in-memory databases cannot be backed up",
            target_path.display()
        )));
    }

    log::info!("Database backup written: {}", target_path_str);
    Ok(target_path)
}
