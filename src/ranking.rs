//! Candidate ranking and the parallel match-up matrix.

use crate::catalog::{Catalog, Move};
use crate::duel::{simulate_duel_with, DangerMove, DuelReport, DuelWinner, TURN_SECONDS};
use crate::fighter::{Pick, PicksFile};
use crate::league::LeagueCap;
use crate::policy::{GreedyThrow, ShieldPolicy, ThresholdShields, ThrowPolicy};
use anyhow::bail;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// All candidate-versus-opponent reports, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub fights: Vec<DuelReport>,
}

impl Ranking {
    pub fn best(&self) -> Option<&DuelReport> {
        self.fights.first()
    }
}

/// Ranks every candidate against one opponent with the default policies.
pub fn rank_against_one(
    candidates: &[Pick],
    opponent: &Pick,
    my_shields: u8,
    foe_shields: u8,
    catalog: &Catalog,
    cap: LeagueCap,
) -> Ranking {
    rank_against_one_with(
        candidates,
        opponent,
        my_shields,
        foe_shields,
        catalog,
        cap,
        &GreedyThrow,
        &ThresholdShields::default(),
    )
}

/// Ranks every candidate against one opponent. Ordering: wins before draws
/// before losses, then more HP kept, then less HP left to the opponent. The
/// sort is stable, so equally scored candidates keep their input order.
#[allow(clippy::too_many_arguments)]
pub fn rank_against_one_with(
    candidates: &[Pick],
    opponent: &Pick,
    my_shields: u8,
    foe_shields: u8,
    catalog: &Catalog,
    cap: LeagueCap,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
) -> Ranking {
    let mut fights: Vec<DuelReport> = candidates
        .iter()
        .map(|candidate| {
            simulate_duel_with(
                candidate,
                opponent,
                my_shields,
                foe_shields,
                catalog,
                cap,
                throw_policy,
                shield_policy,
            )
        })
        .collect();
    fights.sort_by(compare_reports);
    Ranking { fights }
}

fn compare_reports(x: &DuelReport, y: &DuelReport) -> std::cmp::Ordering {
    y.score_for_a()
        .cmp(&x.score_for_a())
        .then_with(|| y.hp_a.cmp(&x.hp_a))
        .then_with(|| x.hp_b.cmp(&y.hp_b))
}

/// What to do with the current lead against one opponent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadAdvice {
    Stay,
    Swap { to: String },
}

/// One matrix row: the full ranking against an opponent plus lead-centric
/// advice derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub opponent: String,
    /// The first team slot's own fight, if it is part of the ranking.
    pub lead: Option<DuelReport>,
    pub advice: LeadAdvice,
    pub best_pick: Option<String>,
    /// The opponent's hardest-hitting charged move against the lead.
    pub danger: Option<DangerMove>,
    pub ranking: Ranking,
}

/// Builds the full match-up matrix, one row per opponent, in parallel. The
/// first team entry is treated as the lead; swap advice points at the first
/// alternative that outright wins, falling back to the best-ranked pick.
#[allow(clippy::too_many_arguments)]
pub fn matchup_matrix(
    team: &[Pick],
    opponents: &[Pick],
    my_shields: u8,
    foe_shields: u8,
    catalog: &Catalog,
    cap: LeagueCap,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
) -> Vec<MatrixRow> {
    let lead_name = team.first().map(|p| p.display_name().to_string());
    opponents
        .par_iter()
        .map(|opponent| {
            let ranking = rank_against_one_with(
                team,
                opponent,
                my_shields,
                foe_shields,
                catalog,
                cap,
                throw_policy,
                shield_policy,
            );
            let lead = lead_name
                .as_deref()
                .and_then(|name| ranking.fights.iter().find(|f| f.name_a == name))
                .cloned();
            let advice = advise(lead.as_ref(), lead_name.as_deref(), &ranking);
            let best_pick = ranking.best().map(|f| f.name_a.clone());
            let danger = lead.as_ref().and_then(|f| f.danger_b.first().cloned());
            MatrixRow {
                opponent: opponent.display_name().to_string(),
                lead,
                advice,
                best_pick,
                danger,
                ranking,
            }
        })
        .collect()
}

fn advise(lead: Option<&DuelReport>, lead_name: Option<&str>, ranking: &Ranking) -> LeadAdvice {
    match lead.map(|f| f.winner) {
        Some(DuelWinner::A) | Some(DuelWinner::Draw) | None => LeadAdvice::Stay,
        Some(DuelWinner::B) => {
            let alternative = ranking
                .fights
                .iter()
                .find(|f| f.winner == DuelWinner::A && Some(f.name_a.as_str()) != lead_name)
                .or_else(|| ranking.best());
            match alternative {
                Some(f) => LeadAdvice::Swap {
                    to: f.name_a.clone(),
                },
                None => LeadAdvice::Stay,
            }
        }
    }
}

/// Fast-move uses needed from zero energy to afford a charged move. `None`
/// when the pair is not actually fast-plus-charged.
pub fn fasts_to_first_charged(fast: &Move, charged: &Move) -> Option<u32> {
    if !fast.is_fast() || !charged.is_charged() {
        return None;
    }
    let gain = i64::from(fast.energy_gain().max(1));
    let cost = i64::from(charged.energy_cost().max(0));
    Some(((cost + gain - 1) / gain) as u32)
}

/// Wall-clock seconds until the first affordable throw of `charged`.
pub fn seconds_to_first_charged(fast: &Move, charged: &Move) -> Option<f64> {
    let fasts = fasts_to_first_charged(fast, charged)?;
    let turns = fasts * fast.turns();
    Some(f64::from(turns) * TURN_SECONDS)
}

/// Sanity checks on a parsed picks document.
pub fn validate_picks(file: &PicksFile) -> anyhow::Result<()> {
    if file.team.is_empty() {
        bail!("picks file needs at least one team entry");
    }
    if file.opponents.is_empty() {
        bail!("picks file needs at least one opponent");
    }
    for pick in file.team.iter().chain(file.opponents.iter()) {
        if pick.species_id.trim().is_empty() {
            bail!("every pick needs a speciesId");
        }
    }
    Ok(())
}

/// Writes the matrix in CSV form, one row per opponent.
pub fn write_matrix_csv(rows: &[MatrixRow], path: &Path) -> anyhow::Result<()> {
    let mut out = String::new();
    out.push_str("opponent,best_pick,lead_result,lead_hp,advice,danger_move,danger_seconds\n");
    for row in rows {
        let lead_result = match row.lead.as_ref().map(|f| f.winner) {
            Some(DuelWinner::A) => "win",
            Some(DuelWinner::B) => "loss",
            Some(DuelWinner::Draw) => "draw",
            None => "",
        };
        let lead_hp = row
            .lead
            .as_ref()
            .map(|f| f.hp_a.to_string())
            .unwrap_or_default();
        let advice = match &row.advice {
            LeadAdvice::Stay => "stay".to_string(),
            LeadAdvice::Swap { to } => format!("swap:{to}"),
        };
        let danger_move = row.danger.as_ref().map(|d| d.id.as_str()).unwrap_or("");
        let danger_seconds = row
            .danger
            .as_ref()
            .map(|d| format!("{:.1}", d.seconds))
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.opponent,
            row.best_pick.as_deref().unwrap_or(""),
            lead_result,
            lead_hp,
            advice,
            danger_move,
            danger_seconds,
        ));
    }
    std::fs::write(path, out)?;
    Ok(())
}
