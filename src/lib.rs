//! Deterministic PvP duel simulation and match-up ranking.
//!
//! The library half loads a gamemaster catalog and a picks document, ranks
//! every candidate against every opponent and derives lead advice per row;
//! the binary half is a thin argument parser over [`run`].

pub mod catalog;
pub mod damage;
pub mod duel;
pub mod fighter;
pub mod league;
pub mod loadout;
pub mod log;
pub mod policy;
pub mod ranking;
pub mod types;

use crate::catalog::Catalog;
use crate::duel::DuelWinner;
use crate::fighter::{Pick, PicksFile};
use crate::league::LeagueCap;
use crate::policy::{ThresholdShields, ThrowChoice};
use crate::ranking::{matchup_matrix, validate_picks, write_matrix_csv, LeadAdvice, MatrixRow};
use anyhow::Context;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub gamemaster_path: PathBuf,
    pub picks_path: PathBuf,
    pub league: LeagueCap,
    pub my_shields: u8,
    pub foe_shields: u8,
    pub throw_policy: ThrowChoice,
    pub output_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for CliOptions {
    fn default() -> CliOptions {
        CliOptions {
            gamemaster_path: PathBuf::from("gamemaster.json"),
            picks_path: PathBuf::from("picks.json"),
            league: LeagueCap::Unlimited,
            my_shields: 2,
            foe_shields: 2,
            throw_policy: ThrowChoice::Greedy,
            output_path: None,
            json: false,
        }
    }
}

/// Reads and parses a gamemaster dump into a catalog.
pub fn load_gamemaster(path: &Path) -> anyhow::Result<Catalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gamemaster file at {}", path.display()))?;
    let doc: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    Ok(Catalog::from_source(&doc))
}

/// Reads, parses and validates a picks document.
pub fn load_picks(path: &Path) -> anyhow::Result<PicksFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read picks file at {}", path.display()))?;
    let picks: PicksFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_picks(&picks)?;
    Ok(picks)
}

/// Loads everything, computes the match-up matrix and prints or writes it.
pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let catalog = load_gamemaster(&opts.gamemaster_path)?;
    let picks = load_picks(&opts.picks_path)?;
    println!(
        "Catalog ready: {} species, {} moves",
        catalog.species_count(),
        catalog.move_count()
    );

    let team: Vec<Pick> = picks.team.iter().map(loadout::fill_moves).collect();
    let mut opponents = Vec::new();
    let mut skipped = Vec::new();
    for pick in &picks.opponents {
        let filled = loadout::fill_moves(pick);
        let eligible = catalog
            .species(&filled.species_id)
            .map_or(true, |s| league::eligible_for_cap(s, opts.league));
        if eligible {
            opponents.push(filled);
        } else {
            skipped.push(filled.display_name().to_string());
        }
    }
    if !skipped.is_empty() {
        println!(
            "Skipping {} opponent(s) over the cap: {}",
            skipped.len(),
            skipped.join(", ")
        );
    }
    if opponents.is_empty() {
        anyhow::bail!("no eligible opponents for this tier");
    }

    let throw_policy = opts.throw_policy.policy();
    let shield_policy = ThresholdShields::default();
    let rows = matchup_matrix(
        &team,
        &opponents,
        opts.my_shields,
        opts.foe_shields,
        &catalog,
        opts.league,
        &*throw_policy,
        &shield_policy,
    );

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&rows);
    }

    if let Some(path) = &opts.output_path {
        write_matrix_csv(&rows, path)?;
        println!("Wrote {} rows to {}", rows.len(), path.display());
    }
    Ok(())
}

fn print_table(rows: &[MatrixRow]) {
    println!(
        "{:<24} {:<12} {:<28} {:<20} Danger",
        "Opponent", "Lead", "Advice", "Best pick"
    );
    for row in rows {
        let lead = match row.lead.as_ref() {
            Some(f) => match f.winner {
                DuelWinner::A => format!("Win {}%", f.hp_a),
                DuelWinner::B => format!("Loss {}%", f.hp_b),
                DuelWinner::Draw => "Draw".to_string(),
            },
            None => "-".to_string(),
        };
        let advice = match &row.advice {
            LeadAdvice::Stay => "stay".to_string(),
            LeadAdvice::Swap { to } => format!("swap to {}", humanize(to)),
        };
        let best = row.best_pick.as_deref().map(humanize).unwrap_or_default();
        let danger = row
            .danger
            .as_ref()
            .map(|d| format!("{} in {} fasts (~{:.1}s)", d.id, d.fasts, d.seconds))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<12} {:<28} {:<20} {}",
            humanize(&row.opponent),
            lead,
            advice,
            best,
            danger
        );
    }
}

/// `zacian_crowned_sword` reads better as `Zacian Crowned Sword`. Names that
/// already contain spaces only get word starts capitalized.
fn humanize(id: &str) -> String {
    id.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
