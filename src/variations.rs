//! Naming-convention variations of project names.
//!
//! A project called `MyBank` usually shows up as `MyBank`, `my-bank`,
//! `my_bank` and `MYBANK` across its files. Renaming it to `NewApp` needs one
//! rule per spelling, and the rules must be applied longest first so that
//! `MyBankService` is rewritten before `MyBank` can match inside it.

use crate::config::{Config, RenameRule, Replacement};
use crate::rename::sort_rename_rules;
use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

/// Variation keys in priority order. When two keys render the same source
/// string, the first key decides the target spelling.
pub const VARIATION_KEYS: [&str; 9] =
    ["pascal", "kebab", "snake", "screaming", "camel", "upper", "lower", "title", "original"];

/// Renders `name` in every supported naming convention.
///
/// `upper` and `lower` join the words without separators (`MYBANK`,
/// `mybank`); `original` is the trimmed input. A blank name yields no
/// variations.
pub fn generate_variations(name: &str) -> IndexMap<&'static str, String> {
    let name = name.trim();
    let mut variations = IndexMap::new();
    if name.is_empty() {
        return variations;
    }

    let snake = name.to_snake_case();
    let joined = snake.replace('_', "");
    for key in VARIATION_KEYS {
        let value = match key {
            "pascal" => name.to_pascal_case(),
            "kebab" => name.to_kebab_case(),
            "snake" => snake.clone(),
            "screaming" => name.to_screaming_snake_case(),
            "camel" => name.to_camel_case(),
            "upper" => joined.to_uppercase(),
            "lower" => joined.to_lowercase(),
            "title" => name.to_title_case(),
            _ => name.to_string(),
        };
        variations.insert(key, value);
    }
    variations
}

/// Replacements and rename rules that turn one project name into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variations {
    pub replacements: Vec<Replacement>,
    pub rename_rules: Vec<RenameRule>,
}

impl Variations {
    /// Appends the derived rules to the config's lists and re-sorts both
    /// lists longest first. The sort is stable, so on equal lengths the rules
    /// already in the config keep precedence over derived ones.
    pub fn extend_config(self, config: &mut Config) {
        config.replacements.extend(self.replacements);
        config.rename_rules.extend(self.rename_rules);
        sort_replacements(&mut config.replacements);
        sort_rename_rules(&mut config.rename_rules);
    }
}

/// Derives one replacement and one rename rule per convention whose source
/// and target spellings differ. The result is sorted longest first.
pub fn derive_rules(source: &str, target: &str) -> Variations {
    let source_variations = generate_variations(source);
    let target_variations = generate_variations(target);

    let mut seen = HashSet::new();
    let mut variations = Variations::default();
    for (key, from) in &source_variations {
        let Some(to) = target_variations.get(key) else {
            continue;
        };
        if from.is_empty() || from == to || !seen.insert(from.as_str()) {
            continue;
        }
        debug!("Variation {key}: '{from}' -> '{to}'");
        variations.replacements.push(Replacement::new(from, to));
        variations.rename_rules.push(RenameRule::new(from, to));
    }

    sort_replacements(&mut variations.replacements);
    sort_rename_rules(&mut variations.rename_rules);
    variations
}

/// Stable sort by descending `find` length.
pub fn sort_replacements(replacements: &mut [Replacement]) {
    replacements.sort_by(|a, b| b.find.len().cmp(&a.find.len()));
}
