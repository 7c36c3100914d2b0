//! Canonical team identities and the alias table that maps historical or abbreviated names
//! onto them.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The canonical name of a team. Once created, an identity is never mutated; every lookup
/// table in the crate is keyed by it.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamIdentity(String);

impl TeamIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TeamIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TeamIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TeamIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamIdentity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Renamed and shortened team names, as they appear in older seasons and in user input.
const DEFAULT_ALIASES: [(&str, &str); 9] = [
    ("高雄鋼鐵人", "高雄17直播鋼鐵人"),
    ("台啤永豐雲豹", "桃園台啤永豐雲豹"),
    ("臺北戰神", "臺北台新戰神"),
    ("台鋼獵鷹", "臺南台鋼獵鷹"),
    ("夢想家", "福爾摩沙夢想家"),
    ("攻城獅", "新竹御頂攻城獅"),
    ("領航猿", "桃園璞園領航猿"),
    ("富邦勇士", "臺北富邦勇士"),
    ("勇士", "臺北富邦勇士"),
];

/// Maps an alternative team name to its official name. Lookups ignore surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, alias: impl Into<String>, official: impl Into<String>) -> Self {
        self.insert(alias, official);
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, official: impl Into<String>) {
        let alias = alias.into().trim().to_string();
        let official = official.into().trim().to_string();
        self.entries.insert(alias, official);
    }

    /// Adds all entries of `other`, overwriting any alias already present.
    pub fn extend(&mut self, other: &AliasTable) {
        for (alias, official) in &other.entries {
            self.entries.insert(alias.clone(), official.clone());
        }
    }

    /// The official name for `name`, or `None` if `name` is not an alias.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name.trim()).map(String::as_str)
    }

    /// Applies the table to `name`, passing unknown names through (trimmed).
    pub fn canonicalise<'a>(&'a self, name: &'a str) -> &'a str {
        self.lookup(name).unwrap_or_else(|| name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, official)| (alias.as_str(), official.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (alias, official) in DEFAULT_ALIASES {
            table.insert(alias, official);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_whitespace() {
        let aliases = AliasTable::default();
        assert_eq!(Some("桃園璞園領航猿"), aliases.lookup("  領航猿\t"));
        assert_eq!(Some("臺北富邦勇士"), aliases.lookup("勇士 "));
        assert_eq!(None, aliases.lookup("新北國王"));
    }

    #[test]
    fn canonicalise_passes_unknown_names_through() {
        let aliases = AliasTable::default();
        assert_eq!("新北國王", aliases.canonicalise(" 新北國王 "));
        assert_eq!("福爾摩沙夢想家", aliases.canonicalise("夢想家"));
    }

    #[test]
    fn extend_overwrites() {
        let mut aliases = AliasTable::default();
        aliases.extend(&AliasTable::empty().with("勇士", "Braves"));
        assert_eq!(Some("Braves"), aliases.lookup("勇士"));
        assert_eq!(DEFAULT_ALIASES.len(), aliases.len());
    }

    #[test]
    fn identity_borrows_as_str() {
        let mut map = BTreeMap::new();
        map.insert(TeamIdentity::new("新北國王"), 1);
        assert_eq!(Some(&1), map.get("新北國王"));
        assert_eq!("新北國王", TeamIdentity::from("新北國王").to_string());
    }
}
