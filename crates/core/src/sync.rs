//! Brings an `.mgcb` file up to date with the content directory.
//!
//! A run is a single pass: read the registered set, scan the content tree,
//! subtract, and append one stanza per new asset in sorted order. Existing
//! file content is never rewritten.

use crate::config::{AssetTypeTable, SyncConfig};
use crate::error::{MgcbError, Result};
use crate::registry::read_registered;
use crate::scanner::AssetScanner;
use crate::stanza::generate_entry;
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// What a run would do, computed without touching the MGCB file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub registered: BTreeSet<String>,
    pub discovered: BTreeSet<String>,
    /// Discovered but not registered, sorted.
    pub pending: Vec<String>,
}

impl SyncPlan {
    pub fn new(registered: BTreeSet<String>, discovered: BTreeSet<String>) -> Self {
        let pending = discovered.difference(&registered).cloned().collect();
        Self {
            registered,
            discovered,
            pending,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Outcome of applying a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Assets whose stanza was appended (or would be, on a dry run).
    pub added: Vec<String>,
    /// Pending assets with no matching asset group.
    pub skipped: Vec<String>,
    pub dry_run: bool,
}

pub struct ContentSync {
    config: SyncConfig,
    table: AssetTypeTable,
}

impl ContentSync {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let table = config.table()?;
        if table.is_empty() {
            return Err(MgcbError::Config("no asset extensions configured".into()));
        }
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn table(&self) -> &AssetTypeTable {
        &self.table
    }

    pub fn mgcb_path(&self) -> PathBuf {
        self.config.mgcb_path()
    }

    pub fn plan(&self) -> Result<SyncPlan> {
        let registered = read_registered(&self.mgcb_path())?;
        let discovered = AssetScanner::new(&self.config.content_dir, &self.table).scan()?;
        let plan = SyncPlan::new(registered, discovered);

        info!(
            "Sync plan: {} registered, {} discovered, {} new",
            plan.registered.len(),
            plan.discovered.len(),
            plan.pending.len()
        );
        Ok(plan)
    }

    /// Append a stanza for every pending asset. An empty plan leaves the file
    /// untouched.
    pub fn apply(&self, plan: &SyncPlan) -> Result<SyncReport> {
        self.apply_with(plan, |_| {})
    }

    /// Like [`ContentSync::apply`], calling `on_added` right after each
    /// stanza has been written, so additions made before a failure are
    /// still reported.
    pub fn apply_with<F>(&self, plan: &SyncPlan, mut on_added: F) -> Result<SyncReport>
    where
        F: FnMut(&str),
    {
        let (entries, skipped) = self.render(plan);
        let mut report = SyncReport {
            added: Vec::with_capacity(entries.len()),
            skipped,
            dry_run: false,
        };

        if entries.is_empty() {
            return Ok(report);
        }

        let path = self.mgcb_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| MgcbError::io(&path, e))?;
        let mut writer = BufWriter::new(file);

        for (asset, entry) in entries {
            write!(writer, "\n{}", entry).map_err(|e| MgcbError::io(&path, e))?;
            writer.flush().map_err(|e| MgcbError::io(&path, e))?;
            on_added(&asset);
            report.added.push(asset);
        }

        info!("Appended {} stanzas to {}", report.added.len(), path.display());
        Ok(report)
    }

    /// Same report as [`ContentSync::apply`] without writing anything.
    pub fn preview(&self, plan: &SyncPlan) -> SyncReport {
        let (entries, skipped) = self.render(plan);
        SyncReport {
            added: entries.into_iter().map(|(asset, _)| asset).collect(),
            skipped,
            dry_run: true,
        }
    }

    pub fn run(&self) -> Result<SyncReport> {
        let plan = self.plan()?;
        self.apply(&plan)
    }

    fn render(&self, plan: &SyncPlan) -> (Vec<(String, String)>, Vec<String>) {
        let mut entries = Vec::with_capacity(plan.pending.len());
        let mut skipped = Vec::new();

        for asset in &plan.pending {
            match generate_entry(asset, &self.table) {
                Some(entry) => entries.push((asset.clone(), entry)),
                None => {
                    debug!("No asset group for {}, skipping", asset);
                    skipped.push(asset.clone());
                }
            }
        }

        (entries, skipped)
    }
}
