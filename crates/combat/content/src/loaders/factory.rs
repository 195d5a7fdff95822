//! Content factory for building a dispatcher from data files.

use std::path::{Path, PathBuf};

use combat_core::{BehaviorTable, CombatConfig, EventDispatcher, ModifierRegistry};

use crate::loaders::{ConfigLoader, LoadResult, ModifierLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// └── modifiers/
///     ├── ascendancy.ron
///     └── ...
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("combat.toml"))
    }

    /// Load every `*.ron` catalog under `modifiers/`, in file name order.
    ///
    /// A later catalog's definition replaces an earlier one with the same id.
    pub fn load_modifiers(&self, behaviors: &BehaviorTable) -> LoadResult<ModifierRegistry> {
        let dir = self.data_dir.join("modifiers");
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
            .collect();
        paths.sort();

        let mut registry = ModifierRegistry::new();
        for path in &paths {
            let catalog = ModifierLoader::load(path)?;
            catalog
                .validate(behaviors)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            for definition in catalog.modifiers {
                registry.register(definition);
            }
        }
        Ok(registry)
    }

    /// Build a dispatcher with the built-in behaviors and the loaded content.
    pub fn build_dispatcher(&self) -> LoadResult<EventDispatcher> {
        let behaviors = BehaviorTable::with_defaults();
        let config = self.load_config()?;
        let registry = self.load_modifiers(&behaviors)?;
        Ok(EventDispatcher::new(registry)
            .with_behaviors(behaviors)
            .with_config(config))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
