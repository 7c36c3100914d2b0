//! Resolution of free-text team names to canonical [TeamIdentity] values, via the alias table
//! first and approximate string matching second.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use difflib::sequencematcher::SequenceMatcher;
use thiserror::Error;
use tracing::warn;

use crate::team::{AliasTable, TeamIdentity};

/// Minimum similarity for an approximate match to be accepted.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

/// Ratcliff/Obershelp ratio over chars: twice the matched chars over the total length.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b).ratio() as f64
}

/// A candidate identity and how similar it is to the input, in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    pub identity: TeamIdentity,
    pub similarity: f64,
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' (similarity {:.2})", self.identity, self.similarity)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("team '{input}' not found{}", nearest_hint(.nearest))]
pub struct UnresolvedTeam {
    pub input: String,
    pub nearest: Option<Suggestion>,
}

fn nearest_hint(nearest: &Option<Suggestion>) -> String {
    match nearest {
        None => String::new(),
        Some(suggestion) => format!(", nearest is {suggestion}"),
    }
}

/// How a name was resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum Via {
    /// The input (or its alias) is a known identity.
    Exact,
    /// The input was found in the alias table.
    Alias,
    /// Approximate match with the given similarity.
    Fuzzy(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    pub identity: TeamIdentity,
    pub via: Via,
}

#[derive(Clone, Debug)]
pub struct Resolver {
    aliases: AliasTable,
    canonical: BTreeSet<TeamIdentity>,
}

impl Resolver {
    /// Creates a resolver over the `known` identities. A known name that the alias table maps
    /// onto a different known identity is superseded and never returned, so that resolving
    /// an already-resolved name yields the same identity.
    pub fn new(aliases: AliasTable, known: impl IntoIterator<Item = TeamIdentity>) -> Self {
        let known: BTreeSet<_> = known.into_iter().collect();
        let canonical = known
            .iter()
            .filter(|identity| match aliases.lookup(identity.as_str()) {
                Some(official) => official == identity.as_str() || !known.contains(official),
                None => true,
            })
            .cloned()
            .collect();
        Self { aliases, canonical }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn identities(&self) -> impl Iterator<Item = &TeamIdentity> {
        self.canonical.iter()
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical.contains(name)
    }

    pub fn resolve(&self, raw: &str) -> Result<TeamIdentity, UnresolvedTeam> {
        self.resolve_detailed(raw).map(|resolved| resolved.identity)
    }

    pub fn resolve_detailed(&self, raw: &str) -> Result<Resolved, UnresolvedTeam> {
        let trimmed = raw.trim();
        let alias = self.aliases.lookup(trimmed);
        let mapped = alias.unwrap_or(trimmed);

        if let Some(identity) = self.canonical.get(mapped) {
            return Ok(Resolved {
                identity: identity.clone(),
                via: if alias.is_some() { Via::Alias } else { Via::Exact },
            });
        }
        if let Some(identity) = self.canonical.get(trimmed) {
            return Ok(Resolved {
                identity: identity.clone(),
                via: Via::Exact,
            });
        }

        match self.nearest(mapped) {
            Some(suggestion) if suggestion.similarity >= SIMILARITY_CUTOFF => {
                warn!("team '{mapped}' not found, assuming {suggestion}");
                Ok(Resolved {
                    identity: suggestion.identity,
                    via: Via::Fuzzy(suggestion.similarity),
                })
            }
            nearest => {
                match &nearest {
                    None => warn!("team '{mapped}' not found, no known teams to match against"),
                    Some(suggestion) => {
                        warn!("team '{mapped}' not found, nearest is {suggestion}")
                    }
                }
                Err(UnresolvedTeam {
                    input: mapped.to_string(),
                    nearest,
                })
            }
        }
    }

    /// The canonical identity most similar to `name`, regardless of the cutoff. Ties go to the
    /// identity that sorts first.
    pub fn nearest(&self, name: &str) -> Option<Suggestion> {
        let mut best: Option<Suggestion> = None;
        for identity in &self.canonical {
            let similarity = similarity(name, identity.as_str());
            if best
                .as_ref()
                .map_or(true, |best| similarity > best.similarity)
            {
                best = Some(Suggestion {
                    identity: identity.clone(),
                    similarity,
                });
            }
        }
        best
    }
}
