//! A bagged ensemble of Gini decision trees for binary classification, with optional
//! class-balanced sample weights. Each tree is fitted by `linfa-trees` on a bootstrap draw of
//! the rows (and optionally a random subset of the features); the class-1 probability is the
//! fraction of trees that vote for class 1.

use anyhow::bail;
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinyrand::{Seeded, StdRand};
use tracing::debug;

use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::random::{random_index, shuffle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub trees: usize,
    /// Unlimited if `None`.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features each tree is grown on, drawn at random per tree; all of them if `None`.
    pub features_per_tree: Option<usize>,
    pub bootstrap: bool,
    pub class_balanced: bool,
    pub seed: u64,
}

impl ForestConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.trees == 0 {
            bail!("forest must have at least one tree");
        }
        if self.min_samples_split < 2 {
            bail!("minimum samples to split cannot be fewer than 2");
        }
        if let Some(features) = self.features_per_tree {
            if features == 0 || features > FEATURE_COUNT {
                bail!("features per tree must lie in 1..={FEATURE_COUNT}");
            }
        }
        if self.max_depth == Some(0) {
            bail!("maximum depth cannot be zero");
        }
        Ok(())
    }

    fn features_per_tree(&self) -> usize {
        self.features_per_tree.unwrap_or(FEATURE_COUNT)
    }
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: None,
            min_samples_split: 2,
            features_per_tree: None,
            bootstrap: true,
            class_balanced: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("no training samples")]
    NoSamples,

    #[error("{rows} samples but {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },

    #[error(transparent)]
    InvalidConfig(#[from] anyhow::Error),

    #[error("tree fitting failed: {0}")]
    Tree(#[from] linfa::Error),
}

/// One fitted tree and the feature columns it was grown on, in ascending order.
#[derive(Debug, Clone)]
pub struct BaggedTree {
    features: Vec<usize>,
    tree: DecisionTree<f64, bool>,
}

impl BaggedTree {
    fn fit(
        config: &ForestConfig,
        rows: &[FeatureVector],
        labels: &[bool],
        weights: &[f64],
        features: Vec<usize>,
    ) -> Result<Self, TrainError> {
        let drawn: Vec<_> = (0..rows.len()).filter(|&i| weights[i] > 0.).collect();
        let records = Array2::from_shape_fn((drawn.len(), features.len()), |(i, j)| {
            rows[drawn[i]][features[j]]
        });
        let targets: Array1<bool> = drawn.iter().map(|&i| labels[i]).collect();
        let sample_weights: Array1<f32> = drawn.iter().map(|&i| weights[i] as f32).collect();
        let dataset = Dataset::new(records, targets).with_weights(sample_weights);

        let tree = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(config.max_depth)
            .min_weight_split(config.min_samples_split as f32)
            .min_weight_leaf(0.)
            .fit(&dataset)?;
        Ok(Self { features, tree })
    }

    pub fn predict(&self, features: &FeatureVector) -> bool {
        let record = Array2::from_shape_fn((1, self.features.len()), |(_, j)| {
            features[self.features[j]]
        });
        self.tree.predict(&record)[0]
    }

    pub fn features(&self) -> &[usize] {
        &self.features
    }

    pub fn leaves(&self) -> usize {
        self.tree.num_leaves()
    }

    pub fn depth(&self) -> usize {
        self.tree.max_depth()
    }
}

/// `n / (classes · n_class)` for each class present; the weight of an absent class is unused.
fn balanced_class_weights(labels: &[bool]) -> [f64; 2] {
    let positives = labels.iter().filter(|&&label| label).count();
    let counts = [labels.len() - positives, positives];
    let classes = counts.iter().filter(|&&count| count > 0).count();
    counts.map(|count| {
        if count == 0 {
            0.
        } else {
            labels.len() as f64 / (classes * count) as f64
        }
    })
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<BaggedTree>,
}

impl RandomForest {
    pub fn fit(
        config: &ForestConfig,
        rows: &[FeatureVector],
        labels: &[bool],
    ) -> Result<Self, TrainError> {
        config.validate()?;
        if rows.len() != labels.len() {
            return Err(TrainError::LabelMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(TrainError::NoSamples);
        }

        let class_weights = if config.class_balanced {
            balanced_class_weights(labels)
        } else {
            [1., 1.]
        };
        debug!("class weights: {class_weights:?}");

        let mut rand = StdRand::seed(config.seed);
        let mut counts = vec![0usize; rows.len()];
        let mut weights = vec![0.; rows.len()];
        let mut columns: [usize; FEATURE_COUNT] = std::array::from_fn(|i| i);
        let trees = (0..config.trees)
            .map(|_| {
                if config.bootstrap {
                    counts.fill(0);
                    for _ in 0..rows.len() {
                        counts[random_index(&mut rand, rows.len())] += 1;
                    }
                } else {
                    counts.fill(1);
                }
                for (i, weight) in weights.iter_mut().enumerate() {
                    *weight = class_weights[labels[i] as usize] * counts[i] as f64;
                }

                let mut features = if config.features_per_tree() < FEATURE_COUNT {
                    shuffle(&mut columns, &mut rand);
                    columns[..config.features_per_tree()].to_vec()
                } else {
                    columns.to_vec()
                };
                features.sort_unstable();
                BaggedTree::fit(config, rows, labels, &weights, features)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trees })
    }

    /// Probability of class 1 (`true`).
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        let votes = self
            .trees
            .iter()
            .filter(|tree| tree.predict(features))
            .count();
        votes as f64 / self.trees.len() as f64
    }

    pub fn predict(&self, features: &FeatureVector) -> bool {
        self.predict_proba(features) > 0.5
    }

    /// Fraction of `rows` whose predicted class matches `labels`; `None` if `rows` is empty.
    pub fn accuracy(&self, rows: &[FeatureVector], labels: &[bool]) -> Option<f64> {
        if rows.is_empty() {
            return None;
        }
        let correct = rows
            .iter()
            .zip(labels)
            .filter(|(row, &label)| self.predict(row) == label)
            .count();
        Some(correct as f64 / rows.len() as f64)
    }

    pub fn trees(&self) -> &[BaggedTree] {
        &self.trees
    }
}
