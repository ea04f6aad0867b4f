//! Luck Roller Example
//!
//! Rolls for items, records them in a persistent inventory, then sends a
//! hero against the crueler king.
//!
//! Usage: `luck_roller [content-dir]`. Set `LUCK_ROLLER_DB` to keep the
//! inventory in a database file between runs.

use minigames_core::Decimal;
use minigames_db::Store;
use minigames_luck::LuckContext;
use minigames_rpg::{catalog, Battle, StandardExecutor, Unit, UnitId};
use minigames_script::{GameContent, Loader};
use std::path::PathBuf;

const HERO: UnitId = UnitId { side: 0, slot: 0 };
const KING: UnitId = UnitId { side: 1, slot: 0 };
const MAX_TURNS: usize = 40;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Luck Roller Example ===\n");

    let content = load_content()?;
    let config = content.config();
    let store = match std::env::var_os("LUCK_ROLLER_DB") {
        Some(path) => Store::open(path)?,
        None => Store::in_memory()?,
    };
    let mut luck = LuckContext::new(store, content.registry()?, &config);

    // Single rolls at rising luck
    for value in [1.0, 10.0, 1000.0] {
        let report = luck.roll_once(&Decimal::from(value))?;
        for item in &report.acquisitions {
            println!(
                "luck {:>6}: {} (+{} coins)",
                value, item.identity, report.coins_gained
            );
        }
    }

    // A batch far too big to roll one by one
    let count: Decimal = "1e12".parse()?;
    let report = luck.roll(&count, &Decimal::from(5.0))?;
    println!(
        "\nRolled {} items at luck 5: {} kinds, +{} coins",
        count,
        report.acquisitions.len(),
        report.coins_gained
    );

    println!("\nInventory:");
    for entry in luck.ledger().entries()?.values() {
        if entry.amount.is_positive() {
            println!("  {:<24} {}", entry.identity, entry.amount);
        }
    }
    println!("Coins: {}", luck.ledger().coins()?);

    let outcome = luck.multiplier_roll(&Decimal::from(100.0));
    println!(
        "\nMultiplier roll at luck 100: {} (roll {})",
        outcome.name(luck.model()),
        outcome.roll
    );
    if let Some(best) = luck.repeat_roll(50) {
        println!("Best of 50 rolls: {} (roll {})", best.name(luck.model()), best.roll);
    }

    println!("\n=== Battle ===\n");
    battle(&content, config.seed()).await?;

    Ok(())
}

fn load_content() -> Result<GameContent, minigames_script::Error> {
    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/content")));

    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "content directory missing, using built-in content");
        return Ok(GameContent::new());
    }

    let mut loader = Loader::new();
    loader.load_directory(&dir)?;
    let content = loader.finish();
    tracing::info!(
        cards = content.cards.len(),
        enemies = content.enemies.len(),
        "loaded content"
    );
    Ok(content)
}

async fn battle(content: &GameContent, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut hero = Unit::new("hero");
    for name in ["Sword", "Black Hole"] {
        match content.get_card(name) {
            Some(card) => hero.add_card(card.clone()),
            None => tracing::warn!(card = name, "card not found"),
        }
    }
    let king = content
        .enemy(catalog::CRUELER_KING)?
        .unwrap_or_else(catalog::crueler_king);

    let mut battle = Battle::new(vec![vec![hero], vec![king]])?;
    battle.reset_all();
    let executor = StandardExecutor::new(seed);

    for _ in 0..MAX_TURNS {
        if battle.is_defeated(HERO)? || battle.is_defeated(KING)? {
            break;
        }
        match battle.current_side() {
            0 => {
                if battle.unit(HERO)?.action("slash").is_some() {
                    battle.queue_action(HERO, "slash", KING)?;
                }
            }
            _ => battle.queue_action(KING, catalog::ICE_DAGGER_BUT_CRUELER, HERO)?,
        }
        battle.advance_to_next_turn(&executor).await?;
        println!(
            "hero {} hp | {} {} hp",
            battle.unit(HERO)?.hp(),
            battle.unit(KING)?.name(),
            battle.unit(KING)?.hp()
        );
    }

    let winner = if battle.is_defeated(KING)? {
        "hero"
    } else if battle.is_defeated(HERO)? {
        catalog::CRUELER_KING
    } else {
        "nobody"
    };
    println!("\nWinner: {winner}");
    Ok(())
}
