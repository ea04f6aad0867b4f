//! RON content loader

use crate::error::{Error, Result};
use crate::schema::{CardDef, EnemyDef, RarityDefs};
use indexmap::IndexMap;
use minigames_core::GameConfig;
use minigames_luck::{TierDefinition, TierRegistry};
use minigames_rpg::{Card, Unit};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Loaded game content
#[derive(Debug, Default)]
pub struct GameContent {
    /// Tiers in load order
    pub tiers: Vec<TierDefinition>,
    /// Modifier names in load order
    pub modifiers: Vec<String>,
    /// Cards by name
    pub cards: IndexMap<String, Arc<Card>>,
    /// Enemies by name
    pub enemies: IndexMap<String, EnemyDef>,
    pub config: Option<GameConfig>,
}

impl GameContent {
    /// Create empty content
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a card by name
    pub fn get_card(&self, name: &str) -> Option<&Arc<Card>> {
        self.cards.get(name)
    }

    /// Build the tier registry
    ///
    /// With no tiers loaded this is the built-in registry. Without modifiers
    /// only the empty "no modifier" entry is used.
    pub fn registry(&self) -> Result<TierRegistry> {
        if self.tiers.is_empty() && self.modifiers.is_empty() {
            return Ok(TierRegistry::default());
        }
        let modifiers = if self.modifiers.is_empty() {
            vec![String::new()]
        } else {
            self.modifiers.clone()
        };
        Ok(TierRegistry::new(self.tiers.clone(), modifiers)?)
    }

    /// Loaded configuration, or the defaults
    pub fn config(&self) -> GameConfig {
        self.config.clone().unwrap_or_default()
    }

    /// Build one enemy unit with its cards
    pub fn enemy(&self, name: &str) -> Result<Option<Unit>> {
        self.enemies
            .get(name)
            .map(|def| self.build_enemy(def))
            .transpose()
    }

    /// Build every enemy unit, in load order
    pub fn build_enemies(&self) -> Result<Vec<Unit>> {
        self.enemies
            .values()
            .map(|def| self.build_enemy(def))
            .collect()
    }

    fn build_enemy(&self, def: &EnemyDef) -> Result<Unit> {
        let mut unit = Unit::new(&def.name);
        for card in &def.cards {
            let card = self.cards.get(card).ok_or_else(|| Error::UnknownCard {
                enemy: def.name.clone(),
                card: card.clone(),
            })?;
            unit.add_card(Arc::clone(card));
        }
        Ok(unit)
    }
}

/// What a content file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Rarity,
    Cards,
    Enemies,
    Config,
}

impl ContentKind {
    fn detect(filename: &str, content: &str) -> Option<Self> {
        if filename.contains("card") {
            Some(Self::Cards)
        } else if filename.contains("enem") {
            Some(Self::Enemies)
        } else if filename.contains("rarit")
            || filename.contains("tier")
            || filename.contains("modifier")
        {
            Some(Self::Rarity)
        } else if filename.contains("config") {
            Some(Self::Config)
        } else if content.contains("enemies:") {
            Some(Self::Enemies)
        } else if content.contains("cards:") {
            Some(Self::Cards)
        } else if content.contains("tiers:") || content.contains("modifiers:") {
            Some(Self::Rarity)
        } else if ["seed:", "reward_scale:", "exact_roll_limit:", "value_exponent:"]
            .iter()
            .any(|key| content.contains(key))
        {
            Some(Self::Config)
        } else {
            None
        }
    }
}

/// Loader for RON content files
pub struct Loader {
    content: GameContent,
}

impl Loader {
    /// Create a loader with no content
    pub fn new() -> Self {
        Self {
            content: GameContent::new(),
        }
    }

    /// Load a single RON file
    ///
    /// The kind of content is picked from the file name, then from the
    /// top-level field names.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading content file");

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match ContentKind::detect(filename, &content) {
            Some(ContentKind::Rarity) => self.load_rarity_str(&content),
            Some(ContentKind::Cards) => self.load_cards_str(&content),
            Some(ContentKind::Enemies) => self.load_enemies_str(&content),
            Some(ContentKind::Config) => self.load_config_str(&content),
            None => Err(Error::InvalidSchema(format!(
                "cannot tell what {} contains",
                path.display()
            ))),
        }
    }

    /// Load tiers and/or modifiers from a RON string
    pub fn load_rarity_str(&mut self, content: &str) -> Result<()> {
        let file: RarityDefs = ron::from_str(content)?;

        for tier in file.tiers {
            if self.content.tiers.iter().any(|t| t.name == tier.name) {
                return Err(Error::DuplicateDefinition(format!("tier {}", tier.name)));
            }
            self.content.tiers.push(tier);
        }
        for modifier in file.modifiers {
            if self.content.modifiers.contains(&modifier) {
                return Err(Error::DuplicateDefinition(format!(
                    "modifier {modifier:?}"
                )));
            }
            self.content.modifiers.push(modifier);
        }
        Ok(())
    }

    /// Load cards from a RON string
    pub fn load_cards_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        struct CardFile {
            cards: Vec<CardDef>,
        }

        let file: CardFile = ron::from_str(content)?;
        for def in file.cards {
            if self.content.cards.contains_key(&def.name) {
                return Err(Error::DuplicateDefinition(format!("card {}", def.name)));
            }
            let card = def.build()?;
            self.content.cards.insert(def.name, Arc::new(card));
        }
        Ok(())
    }

    /// Load enemies from a RON string
    ///
    /// Card names are resolved when enemies are built, so enemy files may be
    /// loaded before the cards they use.
    pub fn load_enemies_str(&mut self, content: &str) -> Result<()> {
        #[derive(serde::Deserialize)]
        #[serde(deny_unknown_fields)]
        struct EnemyFile {
            enemies: Vec<EnemyDef>,
        }

        let file: EnemyFile = ron::from_str(content)?;
        for def in file.enemies {
            if self.content.enemies.contains_key(&def.name) {
                return Err(Error::DuplicateDefinition(format!("enemy {}", def.name)));
            }
            self.content.enemies.insert(def.name.clone(), def);
        }
        Ok(())
    }

    /// Load the game configuration from a RON string
    pub fn load_config_str(&mut self, content: &str) -> Result<()> {
        if self.content.config.is_some() {
            return Err(Error::DuplicateDefinition("config".to_string()));
        }
        self.content.config = Some(GameConfig::from_ron(content)?);
        Ok(())
    }

    /// Load all RON files from a directory, in file name order
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut paths = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for file_path in paths {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the content
    pub fn finish(self) -> GameContent {
        self.content
    }

    /// Content loaded so far
    pub fn content(&self) -> &GameContent {
        &self.content
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minigames_core::Decimal;
    use minigames_rpg::CardKind;

    const CARDS: &str = r#"
    (
        cards: [
            (
                name: "crueler king",
                description: "the crueler king",
                kind: Passive,
                effects: [
                    Boost(stat: Hp, id: "base", op: Set, value: 30),
                    Boost(stat: Strength, id: "base", op: Set, value: 5),
                ],
            ),
            (
                name: "ice dagger but crueler",
                description: "cold",
                kind: Action,
                effects: [
                    Action(
                        name: "ice dagger but crueler",
                        description: "cold",
                        requires_target: true,
                        effect: RandomStrike,
                    ),
                ],
            ),
            (
                name: "Black Hole",
                kind: Passive,
                effects: [
                    Boost(stat: Strength, id: "card-black-hole-attack", order: 2, op: Mul, value: 2),
                ],
            ),
        ]
    )
    "#;

    #[test]
    fn test_load_rarity() {
        let content = r#"
        (
            tiers: [
                (name: "Common"),
                (name: "Rare", display_tag: Some("rare")),
            ],
            modifiers: ["", "Shiny"],
        )
        "#;

        let mut loader = Loader::new();
        loader.load_rarity_str(content).unwrap();

        let registry = loader.finish().registry().unwrap();
        assert_eq!(registry.tier_count(), 2);
        assert_eq!(registry.tier(1).unwrap().display_tag.as_deref(), Some("rare"));
        assert_eq!(registry.modifier_index("Shiny"), Some(1));
    }

    #[test]
    fn test_tiers_without_modifiers() {
        let mut loader = Loader::new();
        loader
            .load_rarity_str(r#"(tiers: [(name: "Common")])"#)
            .unwrap();
        let registry = loader.finish().registry().unwrap();
        assert_eq!(registry.modifier_count(), 1);
    }

    #[test]
    fn test_empty_content_uses_builtin_registry() {
        let registry = GameContent::new().registry().unwrap();
        assert_eq!(registry, TierRegistry::default());
    }

    #[test]
    fn test_duplicate_tier_rejected() {
        let mut loader = Loader::new();
        loader
            .load_rarity_str(r#"(tiers: [(name: "Common")])"#)
            .unwrap();
        let err = loader
            .load_rarity_str(r#"(tiers: [(name: "Common")])"#)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_bad_registry_reported() {
        let mut loader = Loader::new();
        loader
            .load_rarity_str(r#"(tiers: [(name: "Common")], modifiers: ["Shiny"])"#)
            .unwrap();
        assert!(matches!(
            loader.finish().registry(),
            Err(Error::Luck(minigames_luck::Error::MissingNoneModifier))
        ));
    }

    #[test]
    fn test_load_cards() {
        let mut loader = Loader::new();
        loader.load_cards_str(CARDS).unwrap();

        let content = loader.finish();
        let king = content.get_card("crueler king").unwrap();
        assert_eq!(king.kind, CardKind::Passive);
        assert_eq!(king.effects.len(), 2);

        let mut unit = Unit::new("hero").with_cards([Arc::clone(
            content.get_card("Black Hole").unwrap(),
        )]);
        unit.reset_before_battle();
        assert_eq!(unit.strength(), Decimal::from(2.0));
    }

    #[test]
    fn test_enemies_resolve_cards() {
        let mut loader = Loader::new();
        loader
            .load_enemies_str(
                r#"(enemies: [(name: "crueler king", cards: ["crueler king", "ice dagger but crueler"])])"#,
            )
            .unwrap();
        loader.load_cards_str(CARDS).unwrap();

        let content = loader.finish();
        let mut king = content.enemy("crueler king").unwrap().unwrap();
        king.reset_before_battle();
        assert_eq!(king.hp(), Decimal::from(30.0));
        assert!(king.action("ice dagger but crueler").is_some());
        assert!(content.enemy("nobody").unwrap().is_none());
    }

    #[test]
    fn test_unknown_enemy_card() {
        let mut loader = Loader::new();
        loader
            .load_enemies_str(r#"(enemies: [(name: "slime", cards: ["goo"])])"#)
            .unwrap();
        assert!(matches!(
            loader.finish().build_enemies(),
            Err(Error::UnknownCard { .. })
        ));
    }

    #[test]
    fn test_load_config() {
        let mut loader = Loader::new();
        loader.load_config_str("(seed: 99, reward_scale: 10.0)").unwrap();
        let config = loader.content().config();
        assert_eq!(config.seed(), 99);
        assert_eq!(config.reward_scale(), 10.0);
        assert!(loader.load_config_str("(seed: 1)").is_err());
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "minigames-script-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_card_file_mentioning_tiers() {
        let cards = r#"
        (
            cards: [
                (
                    name: "Prism",
                    description: "shines across all tiers: a lens",
                    kind: Passive,
                    effects: [
                        Boost(stat: Hp, id: "prism", op: Add, value: 1),
                    ],
                ),
            ]
        )
        "#;
        let dir = scratch_dir("prism");
        let path = dir.join("cards.ron");
        fs::write(&path, cards).unwrap();

        let mut loader = Loader::new();
        loader.load_file(&path).unwrap();
        assert!(loader.content().get_card("Prism").is_some());
        assert!(loader.content().tiers.is_empty());

        // the same text under a neutral name is still read as cards
        assert_eq!(
            ContentKind::detect("misc.ron", cards),
            Some(ContentKind::Cards)
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_misrouted_content_fails() {
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_rarity_str(CARDS),
            Err(Error::Ron(_))
        ));
        assert!(loader
            .load_cards_str(r#"(enemies: [(name: "slime", cards: [])])"#)
            .is_err());
        assert!(loader
            .load_enemies_str(r#"(cards: [], tiers: [])"#)
            .is_err());
        assert!(loader.content().cards.is_empty());
    }

    #[test]
    fn test_unrecognised_file_rejected() {
        let dir = scratch_dir("unknown");
        let path = dir.join("notes.ron");
        fs::write(&path, "(hello: 1)").unwrap();

        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_file(&path),
            Err(Error::InvalidSchema(_))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_content_kind_by_name() {
        assert_eq!(ContentKind::detect("tiers.ron", ""), Some(ContentKind::Rarity));
        assert_eq!(ContentKind::detect("enemies.ron", ""), Some(ContentKind::Enemies));
        assert_eq!(ContentKind::detect("config.ron", ""), Some(ContentKind::Config));
        assert_eq!(
            ContentKind::detect("game.ron", "(seed: 3)"),
            Some(ContentKind::Config)
        );
        assert_eq!(ContentKind::detect("game.ron", "()"), None);
    }

    #[test]
    fn test_missing_directory() {
        let mut loader = Loader::new();
        assert!(matches!(
            loader.load_directory("/definitely/not/here"),
            Err(Error::Io(_))
        ));
    }
}
