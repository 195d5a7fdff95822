//! Combat balance loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat balance from TOML files.
///
/// Every key is optional; missing keys keep their built-in defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load balance data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse balance data from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &CombatConfig) -> LoadResult<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.resistance_floor),
        "resistance_floor must be within [0, 1], got {}",
        config.resistance_floor
    );
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.guard_decay),
        "guard_decay must be within [0, 1], got {}",
        config.guard_decay
    );
    anyhow::ensure!(
        config.default_crit_multiplier >= 1.0,
        "default_crit_multiplier must be at least 1, got {}",
        config.default_crit_multiplier
    );
    Ok(())
}
