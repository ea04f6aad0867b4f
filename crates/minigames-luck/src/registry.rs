//! Tier registry
//!
//! The ordered list of named rarity tiers (index = tier) and the parallel
//! list of modifier names. Index 0 of the modifiers is always the empty
//! "no modifier" entry.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Display metadata for one rarity tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDefinition {
    pub name: String,
    #[serde(default)]
    pub display_tag: Option<String>,
}

impl TierDefinition {
    /// Create a tier with no display tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_tag: None,
        }
    }

    /// Set the display tag (builder pattern)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.display_tag = Some(tag.into());
        self
    }
}

/// Validated tiers and modifiers
///
/// Tier names are unique, non-empty and single-spaced so identities parse
/// back to exactly one tier. Modifier names (past index 0) are unique,
/// non-empty and contain no whitespace, so the first word of an identity is
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierRegistry {
    tiers: Vec<TierDefinition>,
    modifiers: Vec<String>,
}

impl TierRegistry {
    /// Create a registry, validating names and the empty first modifier
    pub fn new(tiers: Vec<TierDefinition>, modifiers: Vec<String>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::NoTiers);
        }
        let mut seen = HashSet::new();
        for (index, tier) in tiers.iter().enumerate() {
            if tier.name.trim().is_empty() {
                return Err(Error::EmptyTierName { index });
            }
            if tier.name.split_whitespace().collect::<Vec<_>>().join(" ") != tier.name {
                return Err(Error::IrregularTierName(tier.name.clone()));
            }
            if !seen.insert(tier.name.as_str()) {
                return Err(Error::DuplicateTier(tier.name.clone()));
            }
        }

        match modifiers.first() {
            Some(none) if none.is_empty() => {}
            _ => return Err(Error::MissingNoneModifier),
        }
        let mut seen = HashSet::new();
        for name in &modifiers[1..] {
            let reason = if name.is_empty() {
                Some("empty name")
            } else if name.chars().any(char::is_whitespace) {
                Some("contains whitespace")
            } else if !seen.insert(name.as_str()) {
                Some("duplicate name")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(Error::InvalidModifier {
                    name: name.clone(),
                    reason,
                });
            }
        }

        let registry = Self { tiers, modifiers };
        for tier in &registry.tiers {
            if let Some((first, rest)) = tier.name.split_once(' ') {
                if registry.modifier_index(first).is_some() && registry.tier_index(rest).is_some() {
                    return Err(Error::AmbiguousTier(tier.name.clone()));
                }
            }
        }
        Ok(registry)
    }

    /// Get all tiers, lowest first
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// Modifier names, starting with the empty "no modifier" entry
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Number of named tiers
    pub fn tier_count(&self) -> u64 {
        self.tiers.len() as u64
    }

    /// Number of modifiers, including the empty one
    pub fn modifier_count(&self) -> u64 {
        self.modifiers.len() as u64
    }

    /// Get a named tier by index
    pub fn tier(&self, index: u64) -> Option<&TierDefinition> {
        usize::try_from(index).ok().and_then(|i| self.tiers.get(i))
    }

    /// Highest named tier
    pub fn last_tier(&self) -> &TierDefinition {
        // non-empty by construction
        &self.tiers[self.tiers.len() - 1]
    }

    /// Get a modifier name by index
    pub fn modifier(&self, index: u64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.modifiers.get(i))
            .map(String::as_str)
    }

    /// Index of a tier name
    pub fn tier_index(&self, name: &str) -> Option<u64> {
        self.tiers
            .iter()
            .position(|t| t.name == name)
            .map(|i| i as u64)
    }

    /// Index of a named modifier; never matches the "no modifier" entry
    pub fn modifier_index(&self, name: &str) -> Option<u64> {
        if name.is_empty() {
            return None;
        }
        self.modifiers
            .iter()
            .position(|m| m == name)
            .map(|i| i as u64)
    }

    /// Every `(tier, modifier)` pair, tier-major
    pub fn pairs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        let modifiers = self.modifier_count();
        (0..self.tier_count()).flat_map(move |tier| (0..modifiers).map(move |m| (tier, m)))
    }
}

impl Default for TierRegistry {
    fn default() -> Self {
        let tagged = [
            ("Common", "bg-gradient-to-r from-gray-100 to-gray-200"),
            ("Uncommon", "bg-gradient-to-r from-green-100 to-green-200 border-green-300"),
            ("Rare", "bg-gradient-to-r from-blue-100 to-blue-200 border-blue-400"),
            ("Epic", "bg-gradient-to-r from-purple-100 to-purple-200 border-purple-300"),
            ("Legendary", "bg-gradient-to-r from-yellow-100 to-yellow-200 border-yellow-300"),
            ("Mythical", "bg-gradient-to-r from-pink-100 to-pink-200 border-pink-300"),
            ("Godlike", "bg-gradient-to-r from-cyan-100 to-cyan-200 border-cyan-300"),
        ];
        let plain = [
            "Ultimate",
            "Transcendent",
            "Cosmic",
            "Celestial",
            "Divine",
            "Mystical",
            "Supreme",
            "Exalted",
            "Ethereal",
            "Unfathomable",
            "Mythos",
            "Apex",
            "Timeless",
            "Primordial",
            "Eonian",
            "Eternal",
            "Venerable",
            "Enigmatic",
            "Illustrious",
        ];

        let mut tiers: Vec<TierDefinition> = tagged
            .iter()
            .map(|(name, tag)| TierDefinition::new(*name).with_tag(*tag))
            .collect();
        tiers.extend(plain.iter().map(|name| TierDefinition::new(*name)));
        tiers.push(TierDefinition::new("Singularity").with_tag("rarity-singularity"));
        tiers.push(TierDefinition::new("Infinite").with_tag("rarity-infinite"));

        let modifiers = ["", "Ice", "Venom", "Ghost", "Fire", "Wind", "Illuminated", "Dark"]
            .iter()
            .map(|m| m.to_string())
            .collect();

        Self { tiers, modifiers }
    }
}
