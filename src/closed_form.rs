//! Closed-form match prediction: a logistic win probability over the strength differential
//! and a linear score band around a league-average total.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum_macros::{EnumIter, IntoStaticStr};
use thiserror::Error;
use tracing::debug;

use crate::context::PredictError;
use crate::resolve::Resolver;
use crate::strength::Strengths;
use crate::team::TeamIdentity;

/// Multiplier applied to the home side's strength.
pub const HOME_ADVANTAGE: f64 = 1.05;

/// Strength differential that shifts the logistic by one unit.
pub const STRENGTH_SCALE: f64 = 1000.;

/// Points scored by either side when strengths are equal.
pub const AVG_POINTS_PER_GAME: f64 = 90.;

/// Half-width of the predicted score band.
pub const SCORE_SPREAD: f64 = 5.;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Venue {
    #[strum(serialize = "yes")]
    AHome,
    #[strum(serialize = "no")]
    BHome,
    #[strum(serialize = "neutral")]
    Neutral,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised venue '{0}' (expected yes, no or neutral)")]
pub struct ParseVenueError(String);

impl FromStr for Venue {
    type Err = ParseVenueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "a" => Ok(Venue::AHome),
            "no" | "n" | "b" => Ok(Venue::BHome),
            "neutral" => Ok(Venue::Neutral),
            _ => Err(ParseVenueError(s.to_string())),
        }
    }
}

impl Display for Venue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label: &'static str = (*self).into();
        write!(f, "{label}")
    }
}

/// Win probability of a side with strength `a` against one with strength `b`, in percent.
pub fn win_probability(a: f64, b: f64) -> f64 {
    100. / (1. + (-(a - b) / STRENGTH_SCALE).exp())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

impl Display for ScoreRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.min, self.max)
    }
}

/// Points band for a side with `offence` strength facing a side with `defence` strength.
/// Bounds are rounded half-to-even and never negative.
pub fn simulate_score(offence: f64, defence: f64) -> ScoreRange {
    let base = AVG_POINTS_PER_GAME + AVG_POINTS_PER_GAME * (offence - defence) / STRENGTH_SCALE;
    let bound = |value: f64| value.round_ties_even().max(0.) as u32;
    ScoreRange {
        min: bound(base - SCORE_SPREAD),
        max: bound(base + SCORE_SPREAD),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SideForecast {
    pub team: TeamIdentity,
    pub home: bool,
    /// Strength after any home boost.
    pub strength: f64,
    /// In percent.
    pub win_probability: f64,
    pub score: ScoreRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchForecast {
    pub venue: Venue,
    pub a: SideForecast,
    pub b: SideForecast,
}

impl MatchForecast {
    fn side_label(side: &SideForecast, venue: Venue) -> &'static str {
        match (venue, side.home) {
            (Venue::Neutral, _) => "",
            (_, true) => " (home)",
            (_, false) => " (away)",
        }
    }
}

impl Display for MatchForecast {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (first, second) = match self.venue {
            Venue::BHome => (&self.b, &self.a),
            _ => (&self.a, &self.b),
        };
        writeln!(
            f,
            "{}{} win probability: {:.2}%, {}{} win probability: {:.2}%",
            first.team,
            Self::side_label(first, self.venue),
            first.win_probability,
            second.team,
            Self::side_label(second, self.venue),
            second.win_probability
        )?;
        write!(
            f,
            "expected score: {} {} - {} {}",
            self.a.team, self.a.score, self.b.team, self.b.score
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClosedFormPredictor<'a> {
    resolver: &'a Resolver,
    strengths: &'a Strengths,
}

impl<'a> ClosedFormPredictor<'a> {
    pub fn new(resolver: &'a Resolver, strengths: &'a Strengths) -> Self {
        Self {
            resolver,
            strengths,
        }
    }

    /// Forecasts `team_a` against `team_b`. A resolved team without a strength counts as
    /// zero strength.
    pub fn predict(
        &self,
        team_a: &str,
        team_b: &str,
        venue: Venue,
    ) -> Result<MatchForecast, PredictError> {
        let identity_a = self.resolver.resolve(team_a)?;
        let identity_b = self.resolver.resolve(team_b)?;
        let strength_of = |identity: &TeamIdentity| {
            self.strengths
                .get(identity.as_str())
                .map(|strength| strength.value())
                .unwrap_or_else(|| {
                    debug!("no strength for {identity}, assuming 0");
                    0.
                })
        };
        let (mut strength_a, mut strength_b) = (strength_of(&identity_a), strength_of(&identity_b));
        match venue {
            Venue::AHome => strength_a *= HOME_ADVANTAGE,
            Venue::BHome => strength_b *= HOME_ADVANTAGE,
            Venue::Neutral => {}
        }

        let (prob_a, prob_b) = match venue {
            Venue::BHome => {
                let prob_b = win_probability(strength_b, strength_a);
                (100. - prob_b, prob_b)
            }
            _ => {
                let prob_a = win_probability(strength_a, strength_b);
                (prob_a, 100. - prob_a)
            }
        };

        Ok(MatchForecast {
            venue,
            a: SideForecast {
                team: identity_a,
                home: venue == Venue::AHome,
                strength: strength_a,
                win_probability: prob_a,
                score: simulate_score(strength_a, strength_b),
            },
            b: SideForecast {
                team: identity_b,
                home: venue == Venue::BHome,
                strength: strength_b,
                win_probability: prob_b,
                score: simulate_score(strength_b, strength_a),
            },
        })
    }
}

#[cfg(test)]
mod tests;
