//! Hook configuration: hook names mapped to their conditions, in declaration order.

use anyhow::{Context as _, Result, anyhow};
use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use crate::condition::Condition;

/// Ordered mapping from hook name to condition.
///
/// Declaration order is preserved and decides the order of emitted rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HookConfig {
    hooks: IndexMap<String, Condition>,
}

impl HookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a hook. A replaced hook keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, condition: impl Into<Condition>) {
        self.hooks.insert(name.into(), condition.into());
    }

    /// Builder-style [`HookConfig::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, condition: impl Into<Condition>) -> Self {
        self.insert(name, condition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.hooks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hooks in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.hooks
            .iter()
            .map(|(name, condition)| (name.as_str(), condition))
    }

    /// Parse a configuration from JSON text. See [`HookConfig::from_json_value`].
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or not a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).context("Hook configuration is not valid JSON")?;
        Self::from_json_value(&value)
    }

    /// Build a configuration from a JSON object of `name -> condition`.
    ///
    /// Entries whose value is not a condition (numbers, arrays, objects without
    /// exactly one of `or`/`and`) are skipped with a warning rather than failing
    /// the whole configuration.
    ///
    /// # Errors
    /// Returns an error if `value` is not a JSON object.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let entries = value
            .as_object()
            .ok_or_else(|| anyhow!("Hook configuration must be a JSON object, got {value}"))?;
        let mut config = Self::new();
        for (name, spec) in entries {
            match Condition::from_json(spec) {
                Some(condition) => config.insert(name.clone(), condition),
                None => warn!("Skipping hook `{name}`: unrecognized condition {spec}"),
            }
        }
        Ok(config)
    }

    /// JSON object form of the configuration.
    pub fn to_json_value(&self) -> Value {
        Value::Object(
            self.hooks
                .iter()
                .map(|(name, condition)| {
                    let encoded = serde_json::to_value(condition).unwrap_or(Value::Null);
                    (name.clone(), encoded)
                })
                .collect(),
        )
    }
}

impl<Name, Spec> FromIterator<(Name, Spec)> for HookConfig
where
    Name: Into<String>,
    Spec: Into<Condition>,
{
    fn from_iter<I: IntoIterator<Item = (Name, Spec)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (name, condition) in iter {
            config.insert(name, condition);
        }
        config
    }
}
