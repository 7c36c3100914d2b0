//! The lookup tables shared by both predictors, built once from parsed source collections.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::closed_form::ClosedFormPredictor;
use crate::features::{feature_vector, AveragePoints, FeatureVector, SeasonPerformance};
use crate::player::{PlayerRecord, PositionIndex};
use crate::resolve::{Resolver, UnresolvedTeam};
use crate::scoring::ScoringScheme;
use crate::standings::{
    parse_snapshot, MergePolicy, RawStanding, Standings, StandingsError, TeamStanding,
};
use crate::strength::{Rosters, Strengths};
use crate::team::{AliasTable, TeamIdentity};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    TeamNotFound(#[from] UnresolvedTeam),
}

/// The standings of one league season and the players who played in it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub label: String,
    pub standings: Vec<RawStanding>,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// In merge order; later snapshots take precedence.
    pub snapshots: Vec<Snapshot>,
    pub season: Vec<SeasonPerformance>,
    pub aliases: AliasTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextOptions {
    #[serde(default)]
    pub scoring: ScoringScheme,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

#[derive(Debug, Clone)]
pub struct Context {
    resolver: Resolver,
    standings: Standings,
    strengths: Strengths,
    positions: PositionIndex,
    rosters: Rosters,
    avg_points: AveragePoints,
}

impl Context {
    /// Builds the tables from `sources`. A snapshot with malformed standings is logged and
    /// contributes nothing; a collision under [MergePolicy::Strict] is an error.
    pub fn build(sources: &Sources, options: &ContextOptions) -> Result<Self, StandingsError> {
        let parsed: Vec<_> = sources
            .snapshots
            .iter()
            .map(
                |snapshot| match parse_snapshot(&snapshot.standings, &sources.aliases) {
                    Ok(rows) => rows,
                    Err(err) => {
                        warn!("ignoring standings of {}: {err}", snapshot.label);
                        vec![]
                    }
                },
            )
            .collect();

        let mut standings = Standings::default();
        for rows in &parsed {
            standings.merge(rows.clone(), options.merge_policy)?;
        }
        let resolver = Resolver::new(sources.aliases.clone(), standings.identities().cloned());

        let all_players = || sources.snapshots.iter().flat_map(|snapshot| &snapshot.players);
        let positions = PositionIndex::from_records(all_players());

        let mut strengths = Strengths::default();
        for (snapshot, rows) in sources.snapshots.iter().zip(parsed) {
            let mut snapshot_standings = Standings::default();
            snapshot_standings.merge(rows, MergePolicy::LaterWins)?;
            let snapshot_strengths = Strengths::accumulate(
                &snapshot.players,
                &snapshot_standings,
                &resolver,
                &positions,
                options.scoring,
            );
            debug!(
                "{}: {} strengths from {} players",
                snapshot.label,
                snapshot_strengths.len(),
                snapshot.players.len()
            );
            strengths.merge(snapshot_strengths);
        }

        let rosters = Rosters::from_players(all_players(), &positions);
        let avg_points = AveragePoints::from_records(&sources.season);
        info!(
            "context built: {} teams, {} standings rows, {} strengths, {} rosters, {} season averages",
            standings.len(),
            standings.rows().len(),
            strengths.len(),
            rosters.len(),
            avg_points.len()
        );

        Ok(Self {
            resolver,
            standings,
            strengths,
            positions,
            rosters,
            avg_points,
        })
    }

    pub fn resolve(&self, raw: &str) -> Result<TeamIdentity, PredictError> {
        Ok(self.resolver.resolve(raw)?)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn strengths(&self) -> &Strengths {
        &self.strengths
    }

    pub fn positions(&self) -> &PositionIndex {
        &self.positions
    }

    pub fn rosters(&self) -> &Rosters {
        &self.rosters
    }

    pub fn avg_points(&self) -> &AveragePoints {
        &self.avg_points
    }

    pub fn closed_form(&self) -> ClosedFormPredictor<'_> {
        ClosedFormPredictor::new(&self.resolver, &self.strengths)
    }

    /// Feature vector of `team` under its latest merged standing.
    pub fn features(&self, team: &TeamIdentity) -> FeatureVector {
        self.features_with(team, self.standings.get(team.as_str()))
    }

    /// One feature vector per standings row across all snapshots, labelled by whether the
    /// team won more than half its games.
    pub fn training_rows(&self) -> (Vec<FeatureVector>, Vec<bool>) {
        self.standings
            .rows()
            .iter()
            .map(|(team, standing)| (self.features_with(team, Some(standing)), standing.pct > 0.5))
            .unzip()
    }

    fn features_with(
        &self,
        team: &TeamIdentity,
        standing: Option<&TeamStanding>,
    ) -> FeatureVector {
        feature_vector(
            standing,
            self.avg_points.get_or_zero(team.as_str()),
            &self.rosters.get_or_empty(team.as_str()),
        )
    }
}
