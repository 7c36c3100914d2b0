//! Data source configuration: which collections make up each snapshot, and the options the
//! context and classifier are built with.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::ClassifierConfig;
use crate::context::{ContextOptions, Snapshot, Sources};
use crate::file::{load_collection, FromJsonFile};
use crate::team::AliasTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSource {
    pub label: String,
    pub standings: PathBuf,
    #[serde(default)]
    pub players: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// In merge order.
    pub snapshots: Vec<SnapshotSource>,
    pub season_performance: Vec<PathBuf>,
    /// Added to the default alias table, replacing any default entry for the same alias.
    pub aliases: BTreeMap<String, String>,
    pub context: ContextOptions,
    pub classifier: ClassifierConfig,
}

impl DataConfig {
    /// Reads the configuration at `path`, resolving relative collection paths against the
    /// directory containing it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let mut config = Self::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.snapshots.is_empty() {
            bail!("at least one snapshot must be configured");
        }
        for snapshot in &self.snapshots {
            if snapshot.label.trim().is_empty() {
                bail!("snapshot label cannot be blank");
            }
        }
        self.classifier.validate()
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        for snapshot in &mut self.snapshots {
            rebase(&mut snapshot.standings);
            if let Some(players) = &mut snapshot.players {
                rebase(players);
            }
        }
        self.season_performance.iter_mut().for_each(rebase);
    }

    pub fn alias_table(&self) -> AliasTable {
        let mut aliases = AliasTable::default();
        for (alias, official) in &self.aliases {
            aliases.insert(alias.as_str(), official.as_str());
        }
        aliases
    }

    /// Loads every configured collection. Collections that cannot be read are empty.
    pub fn sources(&self) -> Sources {
        let snapshots = self
            .snapshots
            .iter()
            .map(|source| Snapshot {
                label: source.label.clone(),
                standings: load_collection(&source.standings),
                players: source
                    .players
                    .as_ref()
                    .map(load_collection)
                    .unwrap_or_default(),
            })
            .collect::<Vec<_>>();
        let season = self
            .season_performance
            .iter()
            .flat_map(load_collection)
            .collect::<Vec<_>>();
        info!(
            "loaded {} snapshots and {} season records",
            snapshots.len(),
            season.len()
        );
        Sources {
            snapshots,
            season,
            aliases: self.alias_table(),
        }
    }
}
