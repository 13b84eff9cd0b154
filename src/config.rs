use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::ledger::Ledger;
use crate::models::Category;

const CONFIG_FILE: &str = "config.json";

/// Session configuration: the fixed category list and optional starting budgets.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AppConfig {
    #[serde(default = "default_categories")]
    pub(crate) categories: Vec<String>,

    #[serde(default)]
    pub(crate) budgets: BTreeMap<String, Decimal>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            budgets: BTreeMap::new(),
        }
    }
}

fn default_categories() -> Vec<String> {
    Category::defaults().into_iter().map(|c| c.name).collect()
}

impl AppConfig {
    /// Load the config from `explicit` if given (must exist), otherwise from
    /// the platform config directory (optional).
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub(crate) fn from_json(raw: &str) -> Result<Self> {
        let cfg: AppConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            bail!("at least one category is required");
        }
        let mut seen: Vec<String> = Vec::with_capacity(self.categories.len());
        for name in &self.categories {
            let key = name.trim().to_lowercase();
            if key.is_empty() {
                bail!("category names cannot be empty");
            }
            if seen.contains(&key) {
                bail!("duplicate category: {name}");
            }
            seen.push(key);
        }
        Ok(())
    }

    /// Build a fresh ledger with the configured categories and starting budgets.
    pub(crate) fn build_ledger(&self) -> Result<Ledger> {
        let categories = self
            .categories
            .iter()
            .map(|n| Category::new(n.trim()))
            .collect();
        let mut ledger = Ledger::new(categories);
        for (category, amount) in &self.budgets {
            ledger
                .set_budget(category, *amount)
                .with_context(|| format!("Invalid starting budget for '{category}'"))?;
        }
        Ok(ledger)
    }
}

fn default_config_path() -> Option<PathBuf> {
    let Some(proj_dirs) = directories::ProjectDirs::from("com", "budgetdash", "BudgetDash") else {
        warn!("could not determine config directory, using defaults");
        return None;
    };
    Some(proj_dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
