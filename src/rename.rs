//! Path renaming with ordered, first-match-wins rules.
//!
//! A rule matches a whole path or its leading segments only, never a
//! substring inside a longer name: `src` renames `src/main.rs` but leaves
//! `srcs/main.rs` and `app/src/main.rs` alone.

use crate::config::RenameRule;
use crate::ignore::normalize_path;

/// Maps a source-relative path to a target-relative path.
///
/// Rules are tried in the given order and the first one that matches wins.
pub fn rename(path: &str, rules: &[RenameRule]) -> String {
    for rule in rules {
        let from = normalize_path(&rule.from);
        let from = from.strip_prefix("./").unwrap_or(&from);
        if from.is_empty() {
            continue;
        }
        let to = normalize_path(&rule.to);
        if path == from {
            return to;
        }
        if let Some(suffix) = path.strip_prefix(from).filter(|rest| rest.starts_with('/')) {
            return format!("{to}{suffix}");
        }
    }
    path.to_string()
}

/// Stable sort by descending `from` length, so longer rules are tried first.
pub fn sort_rename_rules(rules: &mut [RenameRule]) {
    rules.sort_by(|a, b| b.from.len().cmp(&a.from.len()));
}

/// An ordered list of rename rules.
///
/// Because matching is first-match-wins, the order of the rules is part of
/// their meaning. Use [`Renamer::longest_first`] whenever rules come from
/// more than one place (e.g. user rules combined with generated variations).
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    rules: Vec<RenameRule>,
}

impl Renamer {
    /// Keeps the rules in declared order.
    pub fn new(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }

    /// Sorts the rules by descending `from` length; ties keep their declared order.
    pub fn longest_first(mut rules: Vec<RenameRule>) -> Self {
        sort_rename_rules(&mut rules);
        Self { rules }
    }

    pub fn rename(&self, path: &str) -> String {
        rename(path, &self.rules)
    }

    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }
}
