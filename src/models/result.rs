//! Matched feature names per layer.

use std::collections::BTreeMap;
use std::io::{self, Write};

use super::LayerKey;

/// Layer key to matched feature name.
///
/// Backed by a `BTreeMap` so rendering is always in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    names: BTreeMap<LayerKey, String>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the name matched in a layer
    pub fn insert(&mut self, layer: LayerKey, name: String) {
        self.names.insert(layer, name);
    }

    pub fn get(&self, layer: LayerKey) -> Option<&str> {
        self.names.get(&layer).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerKey, &str)> {
        self.names.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Write one `key=name` line per entry.
    pub fn write_lines<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (key, name) in self.iter() {
            writeln!(writer, "{}={}", key, name)?;
        }
        Ok(())
    }

    /// Render the result exactly as it is written to the output file
    pub fn to_lines(&self) -> String {
        self.iter()
            .map(|(key, name)| format!("{}={}\n", key, name))
            .collect()
    }
}
