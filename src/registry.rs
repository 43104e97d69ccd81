//! Alias registry: case-insensitive mapping from user-facing or legacy column
//! labels to canonical column names.
//!
//! Keys are stored in their Unicode case-folded form; canonical names are kept
//! exactly as supplied. Once [`AliasRegistry::freeze`] has been called every
//! mutating operation fails with [`AliasError::Frozen`].

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

use anyhow::Context;
use log::debug;

use crate::{
    error::{AliasError, Result},
    label::ColumnLabel,
};

/// Case-folds `name` using full Unicode case folding (`ß` folds to `ss`).
pub fn fold_case(name: &str) -> String {
    caseless::default_case_fold_str(name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasRegistry {
    aliases: BTreeMap<String, String>,
    frozen: bool,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `mapping`, validating every entry through
    /// [`AliasRegistry::add_alias`]. `frozen` only sets the starting flag, so a
    /// registry can be constructed already frozen.
    pub fn with_aliases<I, A, C>(mapping: I, frozen: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        let mut registry = Self::new();
        registry.add_aliases(mapping, false)?;
        registry.frozen = frozen;
        Ok(registry)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Snapshot of the normalized-alias to canonical mapping.
    pub fn aliases(&self) -> BTreeMap<String, String> {
        self.aliases.clone()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&str> {
        self.aliases.get(&fold_case(name)).map(String::as_str)
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            Err(AliasError::Frozen)
        } else {
            Ok(())
        }
    }

    pub fn add_alias(
        &mut self,
        alias: &str,
        canonical: impl Into<String>,
        overwrite: bool,
    ) -> Result<()> {
        self.ensure_mutable()?;
        let canonical = canonical.into();
        let key = fold_case(alias);
        if let Some(existing) = self.aliases.get(&key)
            && *existing != canonical
        {
            if !overwrite {
                return Err(AliasError::Conflict {
                    alias: alias.to_string(),
                    existing: existing.clone(),
                    requested: canonical,
                });
            }
            debug!("Overwriting alias '{key}': '{existing}' -> '{canonical}'");
        }
        self.aliases.insert(key, canonical);
        Ok(())
    }

    /// Non-overwriting add, the equivalent of assigning `registry[alias] = canonical`.
    pub fn insert(&mut self, alias: &str, canonical: impl Into<String>) -> Result<()> {
        self.add_alias(alias, canonical, false)
    }

    /// Adds each entry in turn. Entries applied before a failing one stay applied.
    pub fn add_aliases<I, A, C>(&mut self, mapping: I, overwrite: bool) -> Result<()>
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        for (alias, canonical) in mapping {
            self.add_alias(alias.as_ref(), canonical, overwrite)?;
        }
        Ok(())
    }

    pub fn add_alias_groups<I, C, G, A>(&mut self, groups: I, overwrite: bool) -> Result<()>
    where
        I: IntoIterator<Item = (C, G)>,
        C: AsRef<str>,
        G: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        for (canonical, aliases) in groups {
            for alias in aliases {
                self.add_alias(alias.as_ref(), canonical.as_ref(), overwrite)?;
            }
        }
        Ok(())
    }

    /// Removes `alias` if registered; unknown aliases are ignored.
    pub fn remove_alias(&mut self, alias: &str) -> Result<()> {
        self.ensure_mutable()?;
        self.aliases.remove(&fold_case(alias));
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.aliases.clear();
        Ok(())
    }

    /// Makes the registry permanently immutable. Calling it again has no effect.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns the canonical name for `name`, or `name` itself when it is not a
    /// registered alias.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.lookup(name).unwrap_or(name)
    }

    /// All normalized aliases mapped to `canonical`.
    pub fn aliases_for(&self, canonical: &str) -> Vec<String> {
        self.aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.clone())
            .collect()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(&fold_case(alias))
    }

    /// Maps each text label to its canonical name and passes other labels
    /// through. An absent label sequence yields `None`, not an empty vector.
    pub fn resolve(&self, labels: Option<&[ColumnLabel]>) -> Option<Vec<ColumnLabel>> {
        let labels = labels?;
        Some(
            labels
                .iter()
                .map(|label| match label {
                    ColumnLabel::Text(name) => ColumnLabel::Text(self.canonical(name).to_string()),
                    other => other.clone(),
                })
                .collect(),
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.aliases)?)
    }

    /// Parses a flat JSON object and rebuilds the registry through the
    /// validated constructor path.
    pub fn from_json(text: &str) -> Result<Self> {
        let mapping: BTreeMap<String, String> = serde_json::from_str(text)?;
        Self::with_aliases(mapping, false)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let mut file =
            File::create(path).with_context(|| format!("Creating alias file {path:?}"))?;
        let serialized = serde_json::to_string_pretty(&self.aliases)
            .context("Serializing alias map to JSON")?;
        file.write_all(serialized.as_bytes())
            .with_context(|| format!("Writing alias file {path:?}"))?;
        file.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening alias file {path:?}"))?;
        let mut raw = String::new();
        BufReader::new(file)
            .read_to_string(&mut raw)
            .with_context(|| format!("Reading alias file {path:?}"))?;
        Self::from_json(&raw).with_context(|| format!("Parsing alias file {path:?}"))
    }
}
