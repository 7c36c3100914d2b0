//! Team strength in its two forms: the pct-weighted sum of player scores consumed by the
//! closed-form predictor, and the top-N roster scores consumed by the classifier. The two are
//! separate types and cannot stand in for each other.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::player::{PlayerRecord, PositionIndex};
use crate::resolve::Resolver;
use crate::scoring::{score, ScoringScheme};
use crate::standings::Standings;
use crate::team::TeamIdentity;

/// Sum of `player score × team pct` over a team's players.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct WeightedStrength(pub f64);

impl WeightedStrength {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Display for WeightedStrength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strengths {
    by_team: BTreeMap<TeamIdentity, WeightedStrength>,
}

impl Strengths {
    /// Accumulates strengths for one standings snapshot and the players who played in it.
    /// Players whose team does not resolve, or resolves to a team absent from `standings`,
    /// are dropped.
    pub fn accumulate(
        players: &[PlayerRecord],
        standings: &Standings,
        resolver: &Resolver,
        positions: &PositionIndex,
        scheme: ScoringScheme,
    ) -> Self {
        let mut resolved: FxHashMap<&str, Option<TeamIdentity>> = FxHashMap::default();
        let mut by_team = BTreeMap::new();
        let mut dropped = 0;
        for player in players {
            let identity = resolved
                .entry(player.team.as_str())
                .or_insert_with(|| resolver.resolve(&player.team).ok());
            let Some(identity) = identity else {
                dropped += 1;
                continue;
            };
            let Some(standing) = standings.get(identity.as_str()) else {
                dropped += 1;
                continue;
            };
            let strength: &mut WeightedStrength = by_team.entry(identity.clone()).or_default();
            strength.0 += scheme.score(player, positions) * standing.pct;
        }
        if dropped > 0 {
            debug!("dropped {dropped} of {} players without a standing", players.len());
        }
        Self { by_team }
    }

    /// Merges `other` into `self`; teams in `other` replace those already present.
    pub fn merge(&mut self, other: Strengths) {
        self.by_team.extend(other.by_team);
    }

    pub fn get(&self, team: &str) -> Option<WeightedStrength> {
        self.by_team.get(team).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamIdentity, &WeightedStrength)> {
        self.by_team.iter()
    }

    pub fn len(&self) -> usize {
        self.by_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }
}

impl FromIterator<(TeamIdentity, WeightedStrength)> for Strengths {
    fn from_iter<I: IntoIterator<Item = (TeamIdentity, WeightedStrength)>>(iter: I) -> Self {
        Self {
            by_team: iter.into_iter().collect(),
        }
    }
}

pub const ROSTER_SIZE: usize = 9;

/// The best [ROSTER_SIZE] player scores of a team in descending order, padded with zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterScores([f64; ROSTER_SIZE]);

impl RosterScores {
    pub fn empty() -> Self {
        Self([0.; ROSTER_SIZE])
    }

    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut scores: Vec<_> = scores.into_iter().collect();
        scores.sort_by(|a, b| b.total_cmp(a));
        let mut top = [0.; ROSTER_SIZE];
        for (slot, score) in top.iter_mut().zip(scores) {
            *slot = score;
        }
        Self(top)
    }

    pub fn scores(&self) -> &[f64; ROSTER_SIZE] {
        &self.0
    }
}

impl Default for RosterScores {
    fn default() -> Self {
        Self::empty()
    }
}

/// Roster scores keyed by the team name exactly as it appears in the player records
/// (trimmed), without resolution.
#[derive(Debug, Clone, Default)]
pub struct Rosters {
    by_team: FxHashMap<String, RosterScores>,
}

impl Rosters {
    pub fn from_players<'a>(
        players: impl IntoIterator<Item = &'a PlayerRecord>,
        positions: &PositionIndex,
    ) -> Self {
        let mut scores: FxHashMap<String, Vec<f64>> = FxHashMap::default();
        for player in players {
            scores
                .entry(player.team.trim().to_string())
                .or_default()
                .push(score(player, positions.position_of(player)));
        }
        Self {
            by_team: scores
                .into_iter()
                .map(|(team, scores)| (team, RosterScores::from_scores(scores)))
                .collect(),
        }
    }

    pub fn get(&self, team: &str) -> Option<&RosterScores> {
        self.by_team.get(team)
    }

    /// The roster for `team`, or all zeros if no players are known.
    pub fn get_or_empty(&self, team: &str) -> RosterScores {
        self.get(team).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RosterScores)> {
        self.by_team.iter().map(|(team, roster)| (team.as_str(), roster))
    }

    pub fn len(&self) -> usize {
        self.by_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }
}
