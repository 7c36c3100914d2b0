//! Win/loss standings, merged across leagues and seasons into a single table keyed by
//! [TeamIdentity].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::team::{AliasTable, TeamIdentity};

/// A standings row as it arrives from a source collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStanding {
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    /// Winning percentage, e.g. `"55.6%"`.
    pub pct: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub wins: u32,
    pub losses: u32,
    /// Winning percentage in `[0, 1]`.
    pub pct: f64,
}

/// Precedence applied when two snapshots carry a standing for the same team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergePolicy {
    /// The snapshot merged last overwrites earlier ones.
    #[default]
    LaterWins,
    /// Any collision is an error.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StandingsError {
    #[error("malformed percentage '{pct}' for team '{team}'")]
    MalformedPct { team: String, pct: String },

    #[error("duplicate standing for '{0}'")]
    Collision(TeamIdentity),
}

/// Parses a percentage string such as `"55.6%"` (or `"55.6"`) into a fraction.
pub fn parse_pct(raw: &str) -> Option<f64> {
    let value = raw.trim().trim_end_matches('%').trim().parse::<f64>().ok()?;
    if value.is_finite() {
        Some(value / 100.)
    } else {
        None
    }
}

/// Converts one source collection into canonical rows, preserving their order. Team names are
/// canonicalised through `aliases` only; no approximate matching takes place here.
pub fn parse_snapshot(
    raw: &[RawStanding],
    aliases: &AliasTable,
) -> Result<Vec<(TeamIdentity, TeamStanding)>, StandingsError> {
    raw.iter()
        .map(|row| {
            let pct = parse_pct(&row.pct).ok_or_else(|| StandingsError::MalformedPct {
                team: row.team_name.clone(),
                pct: row.pct.clone(),
            })?;
            let identity = TeamIdentity::new(aliases.canonicalise(&row.team_name));
            Ok((
                identity,
                TeamStanding {
                    wins: row.wins,
                    losses: row.losses,
                    pct,
                },
            ))
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    merged: BTreeMap<TeamIdentity, TeamStanding>,
    rows: Vec<(TeamIdentity, TeamStanding)>,
}

impl Standings {
    /// Merges a parsed snapshot. Under [MergePolicy::Strict] nothing is merged if any team
    /// collides, either with an earlier snapshot or within `snapshot` itself.
    pub fn merge(
        &mut self,
        snapshot: Vec<(TeamIdentity, TeamStanding)>,
        policy: MergePolicy,
    ) -> Result<(), StandingsError> {
        if policy == MergePolicy::Strict {
            let mut seen = std::collections::BTreeSet::new();
            for (identity, _) in &snapshot {
                if self.merged.contains_key(identity) || !seen.insert(identity) {
                    return Err(StandingsError::Collision(identity.clone()));
                }
            }
        }
        for (identity, standing) in snapshot {
            if let Some(previous) = self.merged.insert(identity.clone(), standing) {
                debug!("standing for {identity} replaced: {previous:?} -> {standing:?}");
            }
            self.rows.push((identity, standing));
        }
        Ok(())
    }

    pub fn get(&self, team: &str) -> Option<&TeamStanding> {
        self.merged.get(team)
    }

    pub fn contains(&self, team: &str) -> bool {
        self.merged.contains_key(team)
    }

    pub fn identities(&self) -> impl Iterator<Item = &TeamIdentity> {
        self.merged.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamIdentity, &TeamStanding)> {
        self.merged.iter()
    }

    /// Every row merged so far, in merge order, including those later overwritten.
    pub fn rows(&self) -> &[(TeamIdentity, TeamStanding)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }
}

/// Parses and merges `snapshots` in order.
pub fn aggregate<'a>(
    snapshots: impl IntoIterator<Item = &'a [RawStanding]>,
    aliases: &AliasTable,
    policy: MergePolicy,
) -> Result<Standings, StandingsError> {
    let mut standings = Standings::default();
    for snapshot in snapshots {
        standings.merge(parse_snapshot(snapshot, aliases)?, policy)?;
    }
    Ok(standings)
}
