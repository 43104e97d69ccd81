//! Alias files on disk.
//!
//! `.yaml`/`.yml` files hold alias groups keyed by canonical name:
//!
//! ```yaml
//! quantity: [qty, units]
//! amount: [amt]
//! ```
//!
//! Any other extension is read as the flat JSON object produced by
//! [`AliasRegistry::to_json`].

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::debug;

use crate::registry::AliasRegistry;

pub type AliasGroups = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasFileFormat {
    Json,
    Yaml,
}

impl AliasFileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                AliasFileFormat::Yaml
            }
            _ => AliasFileFormat::Json,
        }
    }
}

/// Groups the registry's aliases under their canonical names, aliases sorted.
pub fn to_groups(registry: &AliasRegistry) -> AliasGroups {
    registry
        .aliases()
        .into_iter()
        .map(|(alias, canonical)| (canonical, alias))
        .into_group_map()
        .into_iter()
        .map(|(canonical, aliases)| (canonical, aliases.into_iter().sorted().collect()))
        .collect()
}

pub fn load(path: &Path) -> Result<AliasRegistry> {
    match AliasFileFormat::from_path(path) {
        AliasFileFormat::Json => AliasRegistry::load(path),
        AliasFileFormat::Yaml => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Reading alias file {path:?}"))?;
            let groups: AliasGroups = serde_yaml::from_str(&raw)
                .with_context(|| format!("Parsing alias groups from {path:?}"))?;
            let mut registry = AliasRegistry::new();
            registry
                .add_alias_groups(&groups, false)
                .with_context(|| format!("Registering alias groups from {path:?}"))?;
            debug!("Loaded {} alias(es) from {:?}", registry.len(), path);
            Ok(registry)
        }
    }
}

pub fn save(registry: &AliasRegistry, path: &Path) -> Result<()> {
    match AliasFileFormat::from_path(path) {
        AliasFileFormat::Json => registry.save(path),
        AliasFileFormat::Yaml => {
            let serialized =
                serde_yaml::to_string(&to_groups(registry)).context("Serializing alias groups")?;
            fs::write(path, serialized).with_context(|| format!("Writing alias file {path:?}"))
        }
    }
}
