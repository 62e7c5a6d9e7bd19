//! Herosmith - command-line host for the character roster.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use herosmith_domain::rules;
use herosmith_domain::{AbilityKey, Character, CharacterId, FeatureKind, Level, RulesHook};
use herosmith_engine::repositories::PersistOutcome;
use herosmith_engine::use_cases::{build_sheet, BuildOutcome, BuildSheet};
use herosmith_engine::{App, Config};

const USAGE: &str = "Usage: herosmith <command>

Commands:
  list                    List saved characters, newest first
  show <id>               Print a character sheet
  delete <id>             Delete a character
  create <sheet.json>     Build and save a character from a build sheet
  slots                   Print feat slots per level";

fn main() -> anyhow::Result<()> {
    // Load environment from repo root, then from the working directory.
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herosmith_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let command = args.next();
    let argument = args.next();

    match (command.as_deref(), argument.as_deref()) {
        (Some("slots"), _) => {
            print_slot_table();
            Ok(())
        }
        (Some("list"), _) => list(&open_app()?),
        (Some("show"), Some(id)) => show(&open_app()?, id),
        (Some("delete"), Some(id)) => delete(&mut open_app()?, id),
        (Some("create"), Some(path)) => create(&mut open_app()?, Path::new(path)),
        (Some(cmd @ ("show" | "delete" | "create")), None) => {
            anyhow::bail!("Missing argument for {cmd}\n\n{USAGE}")
        }
        (Some(cmd), _) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        (None, _) => anyhow::bail!("{USAGE}"),
    }
}

fn open_app() -> anyhow::Result<App> {
    let config = Config::from_env();
    App::new(&config).context("loading catalog")
}

fn parse_id(raw: &str) -> anyhow::Result<CharacterId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a character id"))
}

// =============================================================================
// Commands
// =============================================================================

fn list(app: &App) -> anyhow::Result<()> {
    let entries = app.use_cases.roster.list(&app.roster);
    if entries.is_empty() {
        println!("No saved characters.");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{}  {:<24} L{:<2} {} {}  (updated {})",
            entry.id,
            entry.name,
            entry.level,
            entry.kin,
            entry.class,
            entry.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn show(app: &App, raw_id: &str) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    let character = app
        .roster
        .get(id)
        .with_context(|| format!("No character with id {id}"))?;
    print_sheet(app, character);
    Ok(())
}

fn delete(app: &mut App, raw_id: &str) -> anyhow::Result<()> {
    let id = parse_id(raw_id)?;
    match app.use_cases.roster.delete(&mut app.roster, id) {
        PersistOutcome::Saved => println!("Deleted {id}."),
        PersistOutcome::Unchanged => println!("No character with id {id}."),
        PersistOutcome::Failed(e) => anyhow::bail!("Deleted {id} but could not save: {e}"),
    }
    Ok(())
}

fn create(app: &mut App, path: &Path) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading build sheet {}", path.display()))?;
    let sheet = BuildSheet::from_json(&data)?;
    let mut session = app.wizard_session();

    match build_sheet::run(&sheet, &mut session, &mut app.roster)? {
        BuildOutcome::Committed {
            character_id,
            persistence,
            ignored,
        } => {
            for choice in &ignored {
                println!("Ignored {} on {}: {:?}", choice.id, choice.step, choice.reason);
            }
            if let PersistOutcome::Failed(e) = persistence {
                anyhow::bail!("Created {character_id} but could not save: {e}");
            }
            if let Some(character) = app.roster.get(character_id) {
                print_sheet(app, character);
            }
            Ok(())
        }
        BuildOutcome::Blocked { validation, .. } => {
            println!("Stopped at {}:", validation.step);
            for unmet in &validation.unmet {
                println!("  - {unmet}");
            }
            anyhow::bail!("build sheet is incomplete")
        }
        BuildOutcome::Rejected { report, .. } => {
            println!("{report}");
            anyhow::bail!("build sheet failed review")
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn print_sheet(app: &App, character: &Character) {
    let catalog = &app.catalog;
    let entry = app.use_cases.roster.entry(character);

    println!("{} ({})", entry.name, entry.id);
    println!("Level {} {} {}", entry.level, entry.kin, entry.class);
    if !character.notes().is_empty() {
        println!("{}", character.notes());
    }

    println!();
    for key in AbilityKey::ALL {
        let boosted = if character.boosts().contains(&key) { " *" } else { "" };
        println!(
            "  {:<3} {:>2} ({:+}){}",
            key.abbreviation(),
            character.ability_scores().get(key),
            character.modifier(key),
            boosted
        );
    }

    println!();
    for power_id in character.kin_power_ids() {
        let name = catalog
            .kin_power(power_id)
            .map_or(power_id.as_str(), |(_, power)| power.name.as_str());
        println!("  Kin power: {name}");
    }
    for kind in FeatureKind::ALL {
        let chosen = character.picks().bucket(kind);
        if chosen.is_empty() {
            continue;
        }
        let names: Vec<&str> = chosen
            .iter()
            .map(|id| catalog.feature(id).map_or(id.as_str(), |f| f.name.as_str()))
            .collect();
        println!("  {}: {}", kind.bucket_name(), names.join(", "));
    }
    let feats: Vec<&str> = character
        .feat_ids()
        .iter()
        .map(|id| catalog.feat(id).map_or(id.as_str(), |f| f.name.as_str()))
        .collect();
    println!("  feats: {}", if feats.is_empty() { "-".to_string() } else { feats.join(", ") });
    println!("  feat slots: {}", character.feat_slots(catalog));

    let equipment = character.equipment();
    if !equipment.is_empty() {
        println!();
        for weapon in &equipment.weapons {
            println!("  Weapon: {weapon}");
        }
        if let Some(armor) = &equipment.armor {
            println!("  Armor: {armor}");
        }
        if let Some(shield) = &equipment.shield {
            println!("  Shield: {shield}");
        }
        for implement in &equipment.implements {
            println!("  Implement: {implement}");
        }
        for item in &equipment.items {
            println!("  Item: {item}");
        }
    }
}

fn print_slot_table() {
    let resourceful = [RulesHook::BonusFeatSlotAtHighestTier].into_iter().collect();
    let none = Default::default();
    println!("Level  Base                        With Resourceful");
    for level in Level::all() {
        println!(
            "{:>5}  {:<26}  {}",
            level.value(),
            rules::feat_slots(level, &none).to_string(),
            rules::feat_slots(level, &resourceful)
        );
    }
}

fn load_dotenv() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
