//! Variable resolution.
//!
//! Final values are computed from three sources, in priority order:
//! 1. overrides (`SCAFFO_<NAME>` environment variables or explicit pairs),
//! 2. prompted input for variables without a `from` dependency,
//! 3. a transform of the `from` variable's value for dependent variables.
//!
//! Declared defaults fill the gaps. Names are processed in lexicographic
//! order so prompting is reproducible across runs.

use crate::config::Variable;
use crate::constants::ENV_PREFIX;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::HashMap;

/// Resolved variable values, keyed by variable name in lexicographic order.
pub type Values = IndexMap<String, String>;

/// Source of values that bypass prompting.
pub trait Overrides {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl Overrides for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Reads `<prefix><NAME>` from the process environment, with explicitly set
/// pairs taking precedence.
#[derive(Debug, Clone)]
pub struct EnvOverrides {
    prefix: String,
    explicit: HashMap<String, String>,
}

impl Default for EnvOverrides {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvOverrides {
    pub fn new() -> Self {
        Self::with_prefix(ENV_PREFIX)
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self { prefix: prefix.to_string(), explicit: HashMap::new() }
    }

    pub fn with_values<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.explicit.extend(pairs);
        self
    }
}

impl Overrides for EnvOverrides {
    fn lookup(&self, name: &str) -> Option<String> {
        self.explicit
            .get(name)
            .cloned()
            .or_else(|| std::env::var(format!("{}{}", self.prefix, name)).ok())
    }
}

/// Computes the final value of every declared variable.
pub struct Resolver<'a> {
    overrides: &'a dyn Overrides,
    prompter: &'a dyn Prompter,
}

impl<'a> Resolver<'a> {
    pub fn new(overrides: &'a dyn Overrides, prompter: &'a dyn Prompter) -> Self {
        Self { overrides, prompter }
    }

    /// Resolves all variables.
    ///
    /// # Errors
    /// * `Error::UnknownSourceVariableError` if a `from` names an undeclared variable
    /// * `Error::MissingValueError` if a required variable ends up without a value
    /// * prompt backend errors
    pub fn resolve(&self, variables: &IndexMap<String, Variable>) -> Result<Values> {
        let mut names: Vec<&str> = variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        check_sources(&names, variables)?;

        let mut values = Values::with_capacity(variables.len());

        for name in &names {
            let variable = &variables[*name];
            if let Some(value) = self.overrides.lookup(name).filter(|v| !v.trim().is_empty()) {
                debug!("Variable '{name}' set by override");
                values.insert(name.to_string(), value);
                continue;
            }
            if variable.source().is_some() {
                continue;
            }
            let value = self.prompt(name, variable)?;
            values.insert(name.to_string(), value);
        }

        // Dependents are resolved once their source is no longer pending.
        let mut pending: Vec<&str> =
            names.iter().copied().filter(|name| !values.contains_key(*name)).collect();
        while !pending.is_empty() {
            let index = pending
                .iter()
                .position(|name| {
                    variables[*name].source().map_or(true, |source| !pending.contains(&source))
                })
                .unwrap_or_else(|| {
                    warn!("Circular dependency between variables: {}", pending.join(", "));
                    0
                });
            let name = pending.remove(index);
            let value = derive(name, &variables[name], &values)?;
            debug!("Variable '{name}' derived as '{value}'");
            values.insert(name.to_string(), value);
        }

        values.sort_keys();
        Ok(values)
    }

    fn prompt(&self, name: &str, variable: &Variable) -> Result<String> {
        let question = match variable.description.trim() {
            "" => "Enter value",
            description => description,
        };
        loop {
            let Some(input) = self.prompter.ask(name, question, variable.default_value())? else {
                return fallback(name, variable);
            };
            let input = input.trim();
            if !input.is_empty() {
                return Ok(input.to_string());
            }
            if let Some(default) = variable.default_value() {
                return Ok(default.to_string());
            }
            if !variable.required {
                return Ok(String::new());
            }
            warn!("Value required for '{name}'");
        }
    }
}

fn check_sources(names: &[&str], variables: &IndexMap<String, Variable>) -> Result<()> {
    for name in names {
        if let Some(source) = variables[*name].source() {
            if !variables.contains_key(source) {
                return Err(Error::UnknownSourceVariableError {
                    name: name.to_string(),
                    from: source.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn derive(name: &str, variable: &Variable, values: &Values) -> Result<String> {
    if let Some(source) = variable.source() {
        if let Some(value) = values.get(source).filter(|v| !v.trim().is_empty()) {
            return Ok(apply_transform(value, variable.transform.as_deref().unwrap_or_default()));
        }
    }
    fallback(name, variable)
}

fn fallback(name: &str, variable: &Variable) -> Result<String> {
    match variable.default_value() {
        Some(default) => Ok(default.to_string()),
        None if variable.required => Err(Error::MissingValueError { name: name.to_string() }),
        None => Ok(String::new()),
    }
}

/// Applies a named transform. Names are case-insensitive; unknown names act
/// as `identity`.
pub fn apply_transform(input: &str, transform: &str) -> String {
    match transform.trim().to_lowercase().as_str() {
        "" | "identity" => input.to_string(),
        "slug-kebab" => slugify(input, '-'),
        "slug-snake" => slugify(input, '_'),
        "upper" => input.to_uppercase(),
        "lower" => input.to_lowercase(),
        "title" => title_case(input),
        other => {
            debug!("Unknown transform '{other}', value left unchanged");
            input.to_string()
        }
    }
}

/// Lowercase alphanumeric runs joined by `separator`.
fn slugify(input: &str, separator: char) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut gap = false;
    for c in input.chars() {
        if c.is_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push(separator);
            }
            gap = false;
            slug.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }
    slug
}

fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
