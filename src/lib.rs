//! Basketball team strength estimation and match prediction from league standings and player
//! box-score statistics. Team names are resolved through an alias table with approximate
//! matching as a fallback; matches are forecast either in closed form from pct-weighted
//! team strengths, or by a random forest over per-team feature vectors.

pub mod classifier;
pub mod closed_form;
pub mod context;
pub mod data;
pub mod features;
pub mod file;
pub mod forest;
pub mod noise;
pub mod player;
pub mod print;
pub mod random;
pub mod resolve;
pub mod scoring;
pub mod split;
pub mod standings;
pub mod strength;
pub mod team;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
