//! Discovers asset files under the content root.

use crate::config::AssetTypeTable;
use crate::error::Result;
use std::collections::BTreeSet;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Turn a path below `root` into a forward-slash asset identifier.
pub fn asset_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

pub struct AssetScanner<'a> {
    root: &'a Path,
    table: &'a AssetTypeTable,
}

impl<'a> AssetScanner<'a> {
    pub fn new(root: &'a Path, table: &'a AssetTypeTable) -> Self {
        Self { root, table }
    }

    /// Walk the content root and return every recognized asset identifier.
    ///
    /// A missing root yields an empty set; any other traversal error aborts.
    pub fn scan(&self) -> Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();

        if !self.root.exists() {
            tracing::warn!("Content directory {} does not exist", self.root.display());
            return Ok(found);
        }

        for entry in WalkDir::new(self.root) {
            let entry = entry?;
            // Linked directories are not descended into, but a link to a
            // regular file still counts as an asset.
            let is_file = if entry.path_is_symlink() {
                entry.path().is_file()
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                continue;
            }

            let Some(asset) = asset_id(self.root, entry.path()) else {
                continue;
            };
            let Some(group) = self.table.group_for(&asset) else {
                continue;
            };

            if !group.accepts(&asset) {
                tracing::debug!("Skipping {} (outside {} prefix)", asset, group.name);
                continue;
            }

            found.insert(asset);
        }

        tracing::debug!(
            "Discovered {} assets under {}",
            found.len(),
            self.root.display()
        );
        Ok(found)
    }
}
