//! Match prediction from a random forest over per-team feature vectors. Each team's win
//! probability is the forest's probability of a winning record for that team alone, so the
//! two probabilities need not sum to one.

use std::fmt::{Display, Formatter};

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::closed_form::HOME_ADVANTAGE;
use crate::context::{Context, PredictError};
use crate::features::FeatureVector;
use crate::forest::{ForestConfig, RandomForest, TrainError};
use crate::noise::{Noise, SCORE_NOISE_STD_DEV};
use crate::split::train_test_split;
use crate::team::TeamIdentity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub forest: ForestConfig,
    /// Fraction of the rows held out for validation.
    pub test_fraction: f64,
    pub split_seed: u64,
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.forest.validate()?;
        if !(0.0..1.0).contains(&self.test_fraction) {
            bail!("test fraction must lie in [0, 1)");
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            forest: ForestConfig::default(),
            test_fraction: 0.2,
            split_seed: 42,
        }
    }
}

#[derive(Debug)]
pub struct Classifier<'a> {
    context: &'a Context,
    forest: RandomForest,
    validation_accuracy: Option<f64>,
}

impl<'a> Classifier<'a> {
    /// Trains on a shuffled split of every standings row in `context`, retaining the forest
    /// and its accuracy on the held-out rows.
    pub fn train(context: &'a Context, config: &ClassifierConfig) -> Result<Self, TrainError> {
        config.validate()?;
        let (rows, labels) = context.training_rows();
        if rows.is_empty() {
            return Err(TrainError::NoSamples);
        }
        let split = train_test_split(rows.len(), config.test_fraction, config.split_seed);
        let pick = |indices: &[usize]| -> (Vec<FeatureVector>, Vec<bool>) {
            indices.iter().map(|&i| (rows[i], labels[i])).unzip()
        };
        let (train_rows, train_labels) = pick(&split.train);
        let (test_rows, test_labels) = pick(&split.test);
        debug!(
            "training on {} rows, validating on {}",
            train_rows.len(),
            test_rows.len()
        );

        let forest = RandomForest::fit(&config.forest, &train_rows, &train_labels)?;
        let validation_accuracy = forest.accuracy(&test_rows, &test_labels);
        match validation_accuracy {
            Some(accuracy) => info!(
                "validation accuracy: {:.1}% over {} rows",
                accuracy * 100.,
                test_rows.len()
            ),
            None => info!("no rows held out for validation"),
        }
        Ok(Self {
            context,
            forest,
            validation_accuracy,
        })
    }

    pub fn validation_accuracy(&self) -> Option<f64> {
        self.validation_accuracy
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Forecasts `team1` against `team2`. A `home` label that does not resolve to either
    /// team confers no advantage.
    pub fn predict(
        &self,
        team1: &str,
        team2: &str,
        home: Option<&str>,
        noise: &mut impl Noise,
    ) -> Result<ClassifierForecast, PredictError> {
        let identity1 = self.context.resolve(team1)?;
        let identity2 = self.context.resolve(team2)?;
        let home = home.and_then(|label| match self.context.resolve(label) {
            Ok(identity) => Some(identity),
            Err(err) => {
                warn!("no home advantage applied: {err}");
                None
            }
        });

        let mut estimate = |identity: TeamIdentity| {
            let features = self.context.features(&identity);
            let avg_points = self.context.avg_points().get_or_zero(identity.as_str());
            let mut points = avg_points + noise.sample(SCORE_NOISE_STD_DEV);
            let is_home = home.as_ref() == Some(&identity);
            if is_home {
                points *= HOME_ADVANTAGE;
            }
            SideEstimate {
                win_probability: self.forest.predict_proba(&features),
                predicted_points: points,
                home: is_home,
                team: identity,
            }
        };
        let a = estimate(identity1);
        let b = estimate(identity2);
        Ok(ClassifierForecast { a, b, home })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SideEstimate {
    pub team: TeamIdentity,
    /// In `[0, 1]`.
    pub win_probability: f64,
    pub predicted_points: f64,
    pub home: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierForecast {
    pub a: SideEstimate,
    pub b: SideEstimate,
    pub home: Option<TeamIdentity>,
}

impl Display for ClassifierForecast {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} vs {}:", self.a.team, self.b.team)?;
        for side in [&self.a, &self.b] {
            writeln!(f, "  {} win probability: {:.2}", side.team, side.win_probability)?;
        }
        for side in [&self.a, &self.b] {
            writeln!(f, "  {} predicted points: {:.1}", side.team, side.predicted_points)?;
        }
        match &self.home {
            Some(home) => write!(f, "  home team: {home}"),
            None => write!(f, "  home team: none"),
        }
    }
}
