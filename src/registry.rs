//! Symbol registry: ordered catalogs per category plus hand-written overrides.

use crate::config::{Config, SymbolLists};
use crate::error::{Error, Result};
use crate::model::{Category, OverrideEntry};
use std::collections::{BTreeMap, HashMap};

/// Every symbol to document, in generation order. Immutable once built.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<(Category, String)>,
    overrides: BTreeMap<String, OverrideEntry>,
}

impl Registry {
    /// Build the registry, rejecting names listed more than once.
    pub fn new(symbols: &SymbolLists, overrides: BTreeMap<String, OverrideEntry>) -> Result<Self> {
        let mut seen: HashMap<&str, Category> = HashMap::new();
        let mut entries = Vec::new();

        for category in Category::ALL {
            for name in symbols.get(category) {
                if let Some(first) = seen.insert(name.as_str(), category) {
                    return Err(Error::DuplicateSymbol {
                        name: name.clone(),
                        first: first.key(),
                        second: category.key(),
                    });
                }
                entries.push((category, name.clone()));
            }
        }

        for name in overrides.keys() {
            if !seen.contains_key(name.as_str()) {
                tracing::warn!(symbol = %name, "override for a symbol that is not registered");
            }
        }

        Ok(Registry { entries, overrides })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.symbols, config.overrides.clone())
    }

    /// All entries: categories in generation order, names in declared order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, &str)> {
        self.entries.iter().map(|(category, name)| (*category, name.as_str()))
    }

    /// Exact, case-sensitive override lookup.
    pub fn override_for(&self, name: &str) -> Option<&OverrideEntry> {
        self.overrides.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
