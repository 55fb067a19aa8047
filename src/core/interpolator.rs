// src/core/interpolator.rs

use crate::constants::MAX_EXPANSION_DEPTH;
use crate::core::properties::PropertyStore;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

lazy_static! {
    // Finds ANY ${...} placeholder; validation of the name happens in the
    // expansion logic, not the regex.
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Unknown placeholder '${{{name}}}' in value of '{key}'.")]
    UnknownPlaceholder { key: String, name: String },
    #[error(
        "Maximum expansion depth ({depth}) exceeded while expanding '{key}'. Check for indirect cycles."
    )]
    MaxDepth { key: String, depth: u32 },
    #[error("Cyclical placeholder reference detected: {cycle_path}")]
    Cycle { cycle_path: String },
}

/// Expands `${...}` placeholders in string-typed property values.
///
/// Lookup order for a placeholder name: the property store, then the process
/// environment. Expansion recurses into referenced property values, guarded
/// by a depth cap and direct cycle detection. This is a narrow substitution
/// pass over slots that opt in, never a general evaluation mechanism.
#[derive(Debug)]
pub struct Interpolator<'a> {
    properties: &'a PropertyStore,
    recursion_stack: HashSet<String>,
    depth: u32,
}

impl<'a> Interpolator<'a> {
    pub fn new(properties: &'a PropertyStore) -> Self {
        Self {
            properties,
            recursion_stack: HashSet::new(),
            depth: 0,
        }
    }

    /// Expands every placeholder in `template`. `key` is the name of the slot
    /// or property the value belongs to, used for diagnostics.
    pub fn expand(&mut self, key: &str, template: &str) -> Result<String, ExpandError> {
        if !template.contains("${") {
            return Ok(template.to_string());
        }
        if self.depth >= MAX_EXPANSION_DEPTH {
            return Err(ExpandError::MaxDepth {
                key: key.to_string(),
                depth: MAX_EXPANSION_DEPTH,
            });
        }

        let mut result = String::with_capacity(template.len());
        let mut last_index = 0;
        for caps in PLACEHOLDER_RE.captures_iter(template) {
            let (Some(full_match), Some(name_match)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            result.push_str(&template[last_index..full_match.start()]);
            let name = name_match.as_str().trim();
            let replacement = self.lookup(key, name)?;
            result.push_str(&replacement);
            last_index = full_match.end();
        }
        result.push_str(&template[last_index..]);
        Ok(result)
    }

    fn lookup(&mut self, key: &str, name: &str) -> Result<String, ExpandError> {
        if let Some(raw) = self.properties.get(name) {
            if self.recursion_stack.contains(name) {
                let mut path: Vec<String> = self.recursion_stack.iter().cloned().collect();
                path.sort();
                return Err(ExpandError::Cycle {
                    cycle_path: format!("{} -> {}", path.join(" -> "), name),
                });
            }
            let raw = raw.to_string();
            self.recursion_stack.insert(name.to_string());
            self.depth += 1;
            let expanded = self.expand(name, &raw)?;
            self.depth -= 1;
            self.recursion_stack.remove(name);
            return Ok(expanded);
        }
        if let Ok(value) = std::env::var(name) {
            return Ok(value);
        }
        Err(ExpandError::UnknownPlaceholder {
            key: key.to_string(),
            name: name.to_string(),
        })
    }
}

// MARK: --- UNIT TESTS ---
