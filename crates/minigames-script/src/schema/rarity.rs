//! Tier and modifier lists

use minigames_luck::TierDefinition;
use serde::{Deserialize, Serialize};

/// Contents of a rarity file
///
/// Either list may be left out, so tiers and modifiers can live in separate
/// files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RarityDefs {
    #[serde(default)]
    pub tiers: Vec<TierDefinition>,
    /// Modifier names; the first one must be `""`
    #[serde(default)]
    pub modifiers: Vec<String>,
}
