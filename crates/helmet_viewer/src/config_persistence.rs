use bevy::prelude::*;
use helmet_config::{ConfigError, HelmetExportConfig, ZoneConfigStore};

use super::{CustomizerState, HelmetViewerConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PersistenceRequest {
    Save,
    Load,
}

#[derive(Debug)]
pub(super) enum PersistenceError {
    Config(ConfigError),
    Io(String),
    Missing,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Config(err) => write!(f, "{err}"),
            PersistenceError::Io(reason) => write!(f, "storage error: {reason}"),
            PersistenceError::Missing => write!(f, "no saved design"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<ConfigError> for PersistenceError {
    fn from(value: ConfigError) -> Self {
        PersistenceError::Config(value)
    }
}

/// Where saved designs live: a JSON file on native targets, a
/// `localStorage` entry in the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct DesignStorage {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    path: std::path::PathBuf,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    key: String,
}

impl DesignStorage {
    pub(super) fn from_config(config: &HelmetViewerConfig) -> Self {
        Self {
            path: std::path::PathBuf::from(config.save_path.as_str()),
            key: config.storage_key.clone(),
        }
    }

    pub(super) fn location(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            format!("localStorage[{}]", self.key)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.path.display().to_string()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read(&self) -> Result<String, PersistenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(PersistenceError::Missing)
            }
            Err(err) => Err(PersistenceError::Io(err.to_string())),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write(&self, payload: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| PersistenceError::Io(err.to_string()))?;
            }
        }
        std::fs::write(&self.path, payload).map_err(|err| PersistenceError::Io(err.to_string()))
    }

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| PersistenceError::Io("localStorage unavailable".to_string()))
    }

    #[cfg(target_arch = "wasm32")]
    fn read(&self) -> Result<String, PersistenceError> {
        let storage = Self::local_storage()?;
        storage
            .get_item(self.key.as_str())
            .map_err(|_| PersistenceError::Io("localStorage read failed".to_string()))?
            .ok_or(PersistenceError::Missing)
    }

    #[cfg(target_arch = "wasm32")]
    fn write(&self, payload: &str) -> Result<(), PersistenceError> {
        Self::local_storage()?
            .set_item(self.key.as_str(), payload)
            .map_err(|_| PersistenceError::Io("localStorage write failed".to_string()))
    }
}

#[derive(Resource, Debug)]
pub(super) struct DesignPersistence {
    pub storage: DesignStorage,
    pub pending: Option<PersistenceRequest>,
    pub last_message: Option<String>,
}

impl DesignPersistence {
    pub(super) fn new(storage: DesignStorage) -> Self {
        Self {
            storage,
            pending: None,
            last_message: None,
        }
    }
}

pub(super) fn unix_millis_now() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

pub(super) fn save_design(
    storage: &DesignStorage,
    store: &ZoneConfigStore,
    timestamp: u64,
) -> Result<(), PersistenceError> {
    let payload = HelmetExportConfig::from_store(store, timestamp).to_json_pretty()?;
    storage.write(payload.as_str())
}

/// Returns the repair warnings produced while restoring.
pub(super) fn load_saved_design(
    storage: &DesignStorage,
    store: &mut ZoneConfigStore,
) -> Result<Vec<String>, PersistenceError> {
    let content = storage.read()?;
    if content.trim().is_empty() {
        return Err(PersistenceError::Missing);
    }
    let export = HelmetExportConfig::from_json(content.as_str())?;
    Ok(export.restore(store))
}

pub(super) fn restore_saved_design(
    mut persistence: ResMut<DesignPersistence>,
    mut state: ResMut<CustomizerState>,
) {
    let message = restore_with_log(&persistence.storage, &mut state.store);
    persistence.last_message = message;
}

fn restore_with_log(storage: &DesignStorage, store: &mut ZoneConfigStore) -> Option<String> {
    match load_saved_design(storage, store) {
        Ok(warnings) => {
            for warning in &warnings {
                warn!("saved design: {warning}");
            }
            info!("restored saved design from {}", storage.location());
            Some(format!(
                "Loaded design ({} repaired field(s))",
                warnings.len()
            ))
        }
        Err(PersistenceError::Missing) => None,
        Err(err) => {
            warn!("could not restore design from {}: {err}", storage.location());
            Some(format!("Load failed: {err}"))
        }
    }
}

pub(super) fn persist_design_requests(
    mut persistence: ResMut<DesignPersistence>,
    mut state: ResMut<CustomizerState>,
) {
    let Some(request) = persistence.pending.take() else {
        return;
    };
    let message = match request {
        PersistenceRequest::Save => {
            match save_design(&persistence.storage, &state.store, unix_millis_now()) {
                Ok(()) => {
                    info!("saved design to {}", persistence.storage.location());
                    Some("Design saved".to_string())
                }
                Err(err) => {
                    warn!("could not save design: {err}");
                    Some(format!("Save failed: {err}"))
                }
            }
        }
        PersistenceRequest::Load => restore_with_log(&persistence.storage, &mut state.store)
            .or_else(|| Some("No saved design".to_string())),
    };
    persistence.last_message = message;
}
