//! Flag registry and help visibility
//!
//! Every command-line flag has a key (its long name). `FlagVisibility` keeps a
//! visible/hidden bit per key; bulk changes are set operations over keys.
//! Short names are mapped to keys one character at a time, so a shorthand
//! can only ever select the flag it belongs to.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// One registered flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    /// Long name, also the registry key
    pub key: &'static str,
    /// Argument id used by the command-line parser
    pub id: &'static str,
    pub short: Option<char>,
}

const fn flag(key: &'static str, id: &'static str, short: Option<char>) -> FlagSpec {
    FlagSpec { key, id, short }
}

/// All flags the CLI registers, in help order
pub const FLAGS: &[FlagSpec] = &[
    flag("db-dir", "db_dir", Some('d')),
    flag("outfile", "outfile", Some('o')),
    flag("catalog", "catalog", Some('c')),
    flag("search", "search", Some('s')),
    flag("catalog-name", "catalog_name", None),
    flag("gtree", "gtree", Some('t')),
    flag("debug", "debug", Some('D')),
    flag("pretty", "pretty", Some('p')),
    flag("gtokens", "gtokens", Some('k')),
    flag("validate", "validate", Some('v')),
    flag("import", "import", Some('m')),
    flag("zero-out", "zero_out", Some('z')),
    flag("symlinks", "follow_symlinks", Some('L')),
    flag("group-gen", "group_gen", Some('g')),
    flag("rest-port", "rest_port", Some('r')),
];

/// Look up a flag by key
pub fn find(key: &str) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|f| f.key == key)
}

/// Look up a flag by its short name
pub fn find_short(short: char) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|f| f.short == Some(short))
}

/// Visible/hidden state for every registered flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagVisibility {
    visible: BTreeMap<&'static str, bool>,
}

impl Default for FlagVisibility {
    fn default() -> Self {
        Self {
            visible: FLAGS.iter().map(|f| (f.key, true)).collect(),
        }
    }
}

impl FlagVisibility {
    pub fn enable_all(&mut self) {
        self.visible.values_mut().for_each(|v| *v = true);
    }

    pub fn disable_all(&mut self) {
        self.visible.values_mut().for_each(|v| *v = false);
    }

    /// Show the flags named by `keys`. Unknown keys are rejected before any
    /// change is made.
    pub fn enable<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> Result<()> {
        self.set(keys, true)
    }

    /// Hide the flags named by `keys`
    pub fn disable<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> Result<()> {
        self.set(keys, false)
    }

    /// Show the flags whose short names appear in `shorts`
    pub fn enable_shorts(&mut self, shorts: &str) -> Result<()> {
        let keys = shorts_to_keys(shorts)?;
        self.set(keys, true)
    }

    /// Hide the flags whose short names appear in `shorts`
    pub fn disable_shorts(&mut self, shorts: &str) -> Result<()> {
        let keys = shorts_to_keys(shorts)?;
        self.set(keys, false)
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.get(key).copied().unwrap_or(false)
    }

    /// Keys of hidden flags, sorted
    pub fn hidden_keys(&self) -> BTreeSet<&'static str> {
        self.visible
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Parser ids of hidden flags, in registry order
    pub fn hidden_ids(&self) -> Vec<&'static str> {
        FLAGS
            .iter()
            .filter(|f| !self.is_visible(f.key))
            .map(|f| f.id)
            .collect()
    }

    fn set<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>, visible: bool) -> Result<()> {
        let specs = keys
            .into_iter()
            .map(|key| {
                find(key).ok_or_else(|| Error::UnknownFlag {
                    key: key.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        for spec in specs {
            self.visible.insert(spec.key, visible);
        }
        Ok(())
    }
}

fn shorts_to_keys(shorts: &str) -> Result<Vec<&'static str>> {
    shorts
        .chars()
        .map(|c| {
            find_short(c)
                .map(|f| f.key)
                .ok_or_else(|| Error::UnknownFlag {
                    key: format!("-{}", c),
                })
        })
        .collect()
}
