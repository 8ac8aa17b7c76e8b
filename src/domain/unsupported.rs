//! Fidelity-loss records accumulated during conversion.

use serde::Serialize;
use std::fmt;

/// A recorded instance where source content could not be represented
/// exactly in the output format.
///
/// Records are append-only log entries with no identity beyond position;
/// the report consumes them in bulk, ordered by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedFeature {
    pub block_type: String,
    pub feature: String,
    pub block_id: String,
}

impl UnsupportedFeature {
    pub fn new(
        block_type: impl Into<String>,
        feature: impl Into<String>,
        block_id: impl Into<String>,
    ) -> Self {
        Self {
            block_type: block_type.into(),
            feature: feature.into(),
            block_id: block_id.into(),
        }
    }

    /// The grouping key used by the report.
    pub fn key(&self) -> String {
        format!("{}.{}", self.block_type, self.feature)
    }
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported: {}.{} (block: {})",
            self.block_type, self.feature, self.block_id
        )
    }
}
