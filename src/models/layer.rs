//! Polygon layer keys and their identifying attributes.

/// The three polygon layers a point is located against.
///
/// Variant order is the lexicographic order of the keys, which is the order
/// results are written in. Lookups run in [`LayerKey::processing_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKey {
    /// County boundaries
    County,
    /// Local Emergency Planning Committee districts
    Lepc,
    /// Zip Code Tabulation Areas
    Zip,
}

impl LayerKey {
    /// Layers in the order they are queried.
    pub fn processing_order() -> &'static [LayerKey] {
        &[LayerKey::Zip, LayerKey::Lepc, LayerKey::County]
    }

    /// Key as written to the output file
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKey::County => "county",
            LayerKey::Lepc => "lepc",
            LayerKey::Zip => "zip",
        }
    }

    /// Attribute holding the feature name in the census/state source data
    pub fn default_name_field(&self) -> &'static str {
        match self {
            LayerKey::County | LayerKey::Lepc => "NAME",
            LayerKey::Zip => "ZCTA5CE10",
        }
    }

    /// Whether a point may fall outside every polygon of this layer.
    ///
    /// ZCTAs do not cover the whole state, so a gap is not an error.
    pub fn allows_no_match(&self) -> bool {
        matches!(self, LayerKey::Zip)
    }
}

impl std::fmt::Display for LayerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
