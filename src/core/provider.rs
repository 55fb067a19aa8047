// src/core/provider.rs

use crate::core::context::BuildContext;
use crate::core::interpolator::{ExpandError, Interpolator};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Property '{key}': expected a boolean (true/false/yes/no/on/off/1/0), got '{value}'.")]
    InvalidBool { key: String, value: String },
    #[error("Property '{key}': expected an integer number of seconds, got '{value}'.")]
    InvalidInt {
        key: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Property '{key}': could not split '{value}' into arguments.")]
    InvalidList { key: String, value: String },
    #[error(transparent)]
    Expand(#[from] ExpandError),
}

/// Conversion from a raw property string into a typed slot value.
///
/// Malformed input is an error naming the key and the offending value; it is
/// never silently replaced by a default.
pub trait PropertyValue: Sized + Clone {
    fn parse_property(key: &str, raw: &str) -> Result<Self, ResolveError>;
}

impl PropertyValue for String {
    fn parse_property(_key: &str, raw: &str) -> Result<Self, ResolveError> {
        Ok(raw.to_string())
    }
}

impl PropertyValue for bool {
    fn parse_property(key: &str, raw: &str) -> Result<Self, ResolveError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ResolveError::InvalidBool {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

impl PropertyValue for u32 {
    fn parse_property(key: &str, raw: &str) -> Result<Self, ResolveError> {
        raw.trim()
            .parse::<Self>()
            .map_err(|source| ResolveError::InvalidInt {
                key: key.to_string(),
                value: raw.to_string(),
                source,
            })
    }
}

impl PropertyValue for PathBuf {
    fn parse_property(_key: &str, raw: &str) -> Result<Self, ResolveError> {
        Ok(Self::from(shellexpand::tilde(raw).into_owned()))
    }
}

impl PropertyValue for Vec<String> {
    fn parse_property(key: &str, raw: &str) -> Result<Self, ResolveError> {
        shlex::split(raw).ok_or_else(|| ResolveError::InvalidList {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }
}

/// One fallback producer in a slot's convention chain.
#[derive(Debug, Clone)]
pub enum Source<T> {
    /// Look the value up in the external property store under a dotted key,
    /// optionally running `${...}` expansion on the raw string first.
    Property { key: &'static str, expand: bool },
    /// A fixed fallback value.
    Value(T),
    /// A fallback computed from build-scope state, evaluated lazily so it
    /// observes the context as it is at resolution time.
    Computed(fn(&BuildContext) -> Option<T>),
}

/// A single configuration slot resolved on demand.
///
/// Precedence: an explicitly assigned value always wins; otherwise the
/// convention chain is consulted left to right and the first entry that
/// produces a non-empty value is used; otherwise the slot resolves to
/// `None`. Resolution never mutates anything, so it is idempotent for a
/// fixed snapshot of explicit value and property inputs, and concurrent
/// reads are safe.
#[derive(Debug, Clone)]
pub struct Provider<T> {
    name: &'static str,
    explicit: Option<T>,
    chain: Vec<Source<T>>,
}

impl<T: PropertyValue> Provider<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            explicit: None,
            chain: Vec::new(),
        }
    }

    /// Appends a fallback to the convention chain.
    pub fn convention(mut self, source: Source<T>) -> Self {
        self.chain.push(source);
        self
    }

    /// Assigns the explicit value. Once set, the convention chain is ignored.
    pub fn set(&mut self, value: T) {
        self.explicit = Some(value);
    }

    /// Whether an explicit value was ever assigned.
    pub fn is_set(&self) -> bool {
        self.explicit.is_some()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves the slot. An absent optional value is `Ok(None)`,
    /// distinguishable from an explicitly assigned empty string.
    pub fn resolve(&self, ctx: &BuildContext) -> Result<Option<T>, ResolveError> {
        if let Some(value) = &self.explicit {
            return Ok(Some(value.clone()));
        }
        for source in &self.chain {
            match source {
                Source::Property { key, expand } => {
                    let Some(raw) = ctx.properties().get(key) else {
                        continue;
                    };
                    let raw = if *expand {
                        Interpolator::new(ctx.properties()).expand(key, raw)?
                    } else {
                        raw.to_string()
                    };
                    if raw.is_empty() {
                        log::debug!("Property '{key}' is empty, trying next fallback.");
                        continue;
                    }
                    return T::parse_property(key, &raw).map(Some);
                }
                Source::Value(value) => return Ok(Some(value.clone())),
                Source::Computed(producer) => {
                    if let Some(value) = producer(ctx) {
                        return Ok(Some(value));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Resolves the slot, substituting `default` when nothing produced a value.
    pub fn resolve_or(&self, ctx: &BuildContext, default: T) -> Result<T, ResolveError> {
        Ok(self.resolve(ctx)?.unwrap_or(default))
    }
}

// MARK: --- UNIT TESTS ---
