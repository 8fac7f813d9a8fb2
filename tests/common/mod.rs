use chatvault::config::Config;
use tempfile::TempDir;

/// Config pointing both backends at a fresh temporary directory.
///
/// Returns the `TempDir` alongside so the caller keeps ownership of the
/// directory (preventing it from being removed).
#[allow(dead_code)]
pub fn temp_config() -> (Config, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let mut config = Config::default();
    config.storage.data_dir = Some(tmp.path().to_path_buf());
    (config, tmp)
}

/// Config whose primary database path is deterministically unopenable.
///
/// A directory squats on the SQLite file path, so opening the primary
/// backend fails while the sled fallback in the same data directory
/// keeps working.
#[allow(dead_code)]
pub fn config_with_blocked_primary() -> (Config, TempDir) {
    let (config, tmp) = temp_config();
    let db_path = config.primary_db_path().expect("primary path");
    std::fs::create_dir_all(db_path).expect("failed to block primary path");
    (config, tmp)
}
