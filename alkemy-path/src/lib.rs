use std::path::{Path, PathBuf};

/// Database path constants
pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "alkemy.db";
pub const DB_BACKUP_SUBDIR: &str = "backups";
pub const RESOURCE_DIR: &str = "resources";

/// Whether the store runs in portable mode.
///
/// Portable mode is detected by the presence of `resources/data/alkemy.db`
/// next to the executable.
pub fn is_portable_mode() -> bool {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let portable_base = exe_dir.join(RESOURCE_DIR);
            return portable_base.join(DB_DATA_DIR).exists()
                && db_path_in(&portable_base).exists();
        }
    }
    false
}

/// Base data directory: the executable's `resources` folder in portable
/// mode, the per-user data directory otherwise.
pub fn get_base_data_dir() -> Result<PathBuf, String> {
    if is_portable_mode() {
        let exe_path = std::env::current_exe()
            .map_err(|e| format!("Cannot resolve executable path: {}", e))?;
        let exe_dir = exe_path
            .parent()
            .ok_or_else(|| "Executable has no parent directory".to_string())?;
        Ok(exe_dir.join(RESOURCE_DIR))
    } else {
        get_system_data_dir()
    }
}

fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs =
        BaseDirs::new().ok_or_else(|| "Cannot resolve system directories".to_string())?;

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        Ok(base_dirs.data_dir().join("com.alkemy.data"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(base_dirs.data_dir().join("alkemy-data"))
    }
}

/// Database file location under a given base directory.
pub fn db_path_in(base: &Path) -> PathBuf {
    base.join(DB_DATA_DIR).join(DB_FILE_NAME)
}

/// Backup directory under a given base directory.
pub fn backup_dir_in(base: &Path) -> PathBuf {
    base.join(DB_DATA_DIR).join(DB_BACKUP_SUBDIR)
}

/// Database file path
pub fn get_db_path() -> Result<PathBuf, String> {
    Ok(db_path_in(&get_base_data_dir()?))
}

/// Default directory for database backups
pub fn get_default_db_backup_path() -> Result<PathBuf, String> {
    Ok(backup_dir_in(&get_base_data_dir()?))
}
