//! Renaming table columns between aliases and canonical names.
//!
//! [`AliasRegistry::to_canonical_in_place`] records the renames it applied in the
//! table's metadata bag under [`RENAME_RECORD_KEY`];
//! [`AliasRegistry::restore_aliases_in_place`] inverts the most recent record.
//! The non-`_in_place` variants work on a copy and leave the input untouched.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    error::{AliasError, Result},
    frame::LabeledTable,
    registry::{AliasRegistry, fold_case},
};

/// Metadata key holding the most recent rename record.
pub const RENAME_RECORD_KEY: &str = "alias_map";

/// Alias label as found on the table mapped to the canonical name it became.
pub type RenameRecord = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalOptions {
    /// Skip renames that would collide with an existing column instead of failing.
    pub drop_conflicts: bool,
    /// Store the applied renames in the table metadata for a later restore.
    pub remember: bool,
}

impl Default for CanonicalOptions {
    fn default() -> Self {
        Self {
            drop_conflicts: false,
            remember: true,
        }
    }
}

impl AliasRegistry {
    /// Renames for every text column whose label is a registered alias.
    pub fn rename_plan<T: LabeledTable>(&self, table: &T) -> RenameRecord {
        table
            .columns()
            .iter()
            .filter_map(|label| label.as_text())
            .filter_map(|name| {
                self.lookup(name)
                    .map(|canonical| (name.to_string(), canonical.to_string()))
            })
            .collect()
    }

    /// Aliases in `plan` whose canonical target already exists, case-insensitively,
    /// as a different column on `table`. Renames where the alias already equals
    /// its canonical name are never reported.
    pub fn collisions<T: LabeledTable>(&self, table: &T, plan: &RenameRecord) -> Vec<String> {
        let existing = table
            .columns()
            .iter()
            .filter_map(|label| label.as_text())
            .map(|name| (name, fold_case(name)))
            .collect::<Vec<_>>();
        plan.iter()
            .filter(|(alias, canonical)| alias != canonical)
            .filter(|(alias, canonical)| {
                let target = fold_case(canonical);
                existing
                    .iter()
                    .any(|(name, folded)| *folded == target && *name != alias.as_str())
            })
            .map(|(alias, _)| alias.clone())
            .collect()
    }

    pub fn to_canonical_in_place<'t, T: LabeledTable>(
        &self,
        table: &'t mut T,
        options: CanonicalOptions,
    ) -> Result<&'t mut T> {
        let mut plan = self.rename_plan(table);
        let collisions = self.collisions(table, &plan);
        if !collisions.is_empty() {
            if !options.drop_conflicts {
                return Err(AliasError::Collision {
                    aliases: collisions,
                });
            }
            warn!(
                "Skipping {} colliding alias rename(s): {:?}",
                collisions.len(),
                collisions
            );
            for alias in &collisions {
                plan.remove(alias);
            }
        }
        debug!("Renaming {} column(s) to canonical names", plan.len());
        table.rename_columns(&plan);
        if options.remember {
            table.set_metadata(RENAME_RECORD_KEY, serde_json::to_value(&plan)?);
        }
        Ok(table)
    }

    pub fn to_canonical<T: LabeledTable>(&self, table: &T, options: CanonicalOptions) -> Result<T> {
        let mut target = table.clone();
        self.to_canonical_in_place(&mut target, options)?;
        Ok(target)
    }

    /// Renames canonical columns back to the aliases recorded by the last
    /// [`AliasRegistry::to_canonical_in_place`] call on this table. Without a
    /// record this fails when `strict`, and leaves the table untouched otherwise.
    pub fn restore_aliases_in_place<'t, T: LabeledTable>(
        &self,
        table: &'t mut T,
        strict: bool,
    ) -> Result<&'t mut T> {
        restore_aliases_in_place(table, strict)
    }

    pub fn restore_aliases<T: LabeledTable>(&self, table: &T, strict: bool) -> Result<T> {
        let mut target = table.clone();
        restore_aliases_in_place(&mut target, strict)?;
        Ok(target)
    }
}

/// Restores from the table's own rename record; no registry lookups are needed.
pub fn restore_aliases_in_place<T: LabeledTable>(table: &mut T, strict: bool) -> Result<&mut T> {
    let record = match table.metadata(RENAME_RECORD_KEY).cloned() {
        Some(value) => serde_json::from_value::<RenameRecord>(value).map_err(|source| {
            AliasError::InvalidRecord {
                key: RENAME_RECORD_KEY.to_string(),
                source,
            }
        })?,
        None if strict => {
            return Err(AliasError::MissingRecord {
                key: RENAME_RECORD_KEY.to_string(),
            });
        }
        None => {
            debug!("No rename record found; leaving columns unchanged");
            return Ok(table);
        }
    };
    let reverse = record
        .into_iter()
        .map(|(alias, canonical)| (canonical, alias))
        .collect::<BTreeMap<_, _>>();
    debug!("Restoring {} column(s) to their aliases", reverse.len());
    table.rename_columns(&reverse);
    Ok(table)
}
