use super::types::{StoreState, STORE_VERSION};
use crate::ranking::Weights;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default store file path (~/.config/saw-rank/store.json)
pub fn get_store_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("store.json"))
}

/// Load the store from a JSON file
///
/// If the file doesn't exist, returns a new store seeded with `default_weights`.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path, default_weights: Weights) -> Result<StoreState> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "store file missing, starting empty");
        return Ok(StoreState::new(default_weights));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open store file at {}", path.display()))?;

    let state: StoreState = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse store file at {}", path.display()))?;

    if state.version != STORE_VERSION {
        anyhow::bail!("Unsupported store version: {}", state.version);
    }

    tracing::debug!(
        path = %path.display(),
        users = state.users.len(),
        products = state.products.len(),
        "store loaded"
    );
    Ok(state)
}

/// Save the store to a JSON file atomically
///
/// The file is written to a temporary sibling and renamed into place, so a
/// crash never leaves a half-written store. Creates the parent directory if
/// it doesn't exist.
pub fn save_store(path: &Path, state: &StoreState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize store")?;

    file.commit()
        .with_context(|| format!("Failed to save store to {}", path.display()))?;

    tracing::debug!(path = %path.display(), "store saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_uses_default_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let weights = Weights::new(50.0, 25.0, 25.0);

        let state = load_store(&path, weights).unwrap();
        assert_eq!(state.version, STORE_VERSION);
        assert!(state.users.is_empty());
        assert_eq!(state.weights(), weights);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut state = StoreState::default();
        let user_id = state
            .add_user("Siti Aminah", "siti@example.com", None)
            .unwrap()
            .id
            .clone();
        state
            .add_product("Kopi Susu", 100.0, 50.0, 20.0, Some(user_id.as_str()))
            .unwrap();
        state.set_weights(Weights::new(30.0, 30.0, 40.0)).unwrap();

        save_store(&path, &state).unwrap();
        let loaded = load_store(&path, Weights::default()).unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut state = StoreState::default();
        state.version = 2;
        save_store(&path, &state).unwrap();

        let err = load_store(&path, Weights::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported store version: 2"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_store(&path, Weights::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse store file"));
    }
}
