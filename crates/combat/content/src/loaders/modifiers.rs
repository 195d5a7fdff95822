//! Modifier catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{ActionKind, BehaviorTable, ModifierDefinition, ModifierRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

const BUILTIN_CATALOG: &str = include_str!("../../data/modifiers/ascendancy.ron");

/// Modifier catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierCatalog {
    pub modifiers: Vec<ModifierDefinition>,
}

impl ModifierCatalog {
    /// Checks ids are unique and every `Behavior` action has a handler in
    /// `behaviors`.
    pub fn validate(&self, behaviors: &BehaviorTable) -> LoadResult<()> {
        let mut seen = HashSet::new();
        for definition in &self.modifiers {
            anyhow::ensure!(!definition.id.is_empty(), "modifier with empty id");
            anyhow::ensure!(
                seen.insert(definition.id.as_str()),
                "duplicate modifier id '{}'",
                definition.id
            );

            let uses_behavior = definition
                .effects
                .iter()
                .flat_map(|e| &e.actions)
                .any(|a| matches!(a.kind, ActionKind::Behavior));
            anyhow::ensure!(
                !uses_behavior || behaviors.contains(&definition.id),
                "modifier '{}' uses a behavior action but no behavior is registered under that id",
                definition.id
            );
        }
        Ok(())
    }

    pub fn into_registry(self) -> ModifierRegistry {
        ModifierRegistry::from_definitions(self.modifiers)
    }
}

/// Loader for modifier catalogs from RON files.
pub struct ModifierLoader;

impl ModifierLoader {
    /// Load a modifier catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ModifierCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        debug!(
            target: "content::loaders",
            path = %path.display(),
            modifiers = catalog.modifiers.len(),
            "loaded modifier catalog"
        );
        Ok(catalog)
    }

    /// Parse a modifier catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<ModifierCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse modifier catalog RON: {}", e))
    }

    /// Load, validate against `behaviors`, and build a registry.
    pub fn load_registry(path: &Path, behaviors: &BehaviorTable) -> LoadResult<ModifierRegistry> {
        let catalog = Self::load(path)?;
        catalog.validate(behaviors)?;
        Ok(catalog.into_registry())
    }
}

/// The modifier catalog compiled into the crate.
pub fn builtin_modifiers() -> LoadResult<ModifierCatalog> {
    ModifierLoader::parse(BUILTIN_CATALOG)
}
