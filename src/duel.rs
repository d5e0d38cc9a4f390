//! The deterministic duel simulator.
//!
//! Turns are 0.5 seconds. Each turn is either an exchange turn (at least one
//! side can afford a charged move; fast moves do not land) or a fast turn
//! (both fast cooldowns tick and any due fast move lands). Exchange ordering
//! follows the effective attack stat; an exact tie resolves both throws
//! simultaneously against the pre-step state, which is what lets two
//! identical picks finish in a draw instead of handing the win to side A.

use crate::catalog::{Catalog, Move};
use crate::damage;
use crate::fighter::{Fighter, Pick};
use crate::league::LeagueCap;
use crate::log::DuelLog;
use crate::policy::{GreedyThrow, ShieldPolicy, ThresholdShields, ThrowPolicy};
use serde::Serialize;

/// Hard ceiling on simulated turns; a duel still running is scored on HP.
pub const MAX_TURNS: u32 = 2000;
/// Stored energy never exceeds this.
pub const ENERGY_CAP: i32 = 100;
/// Wall-clock length of one turn.
pub const TURN_SECONDS: f64 = 0.5;
/// Shields per side; larger requests clamp down.
pub const MAX_SHIELDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuelWinner {
    A,
    B,
    Draw,
}

/// One charged move of the opponent with the time it takes to come online.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerMove {
    pub id: String,
    pub fasts: u32,
    pub turns: u32,
    pub seconds: f64,
}

/// Outcome of one simulated duel, with the advisory extras callers display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelReport {
    pub name_a: String,
    pub name_b: String,
    pub winner: DuelWinner,
    /// Remaining HP as a rounded percentage of max HP.
    pub hp_a: i32,
    pub hp_b: i32,
    /// Hardest-hitting charged move per side, energy ignored.
    pub recommended_a: Option<String>,
    pub recommended_b: Option<String>,
    /// Each side's charged moves ranked by damage dealt to the other side.
    pub danger_a: Vec<DangerMove>,
    pub danger_b: Vec<DangerMove>,
    pub summary: Vec<String>,
}

impl DuelReport {
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            DuelWinner::A => Some(&self.name_a),
            DuelWinner::B => Some(&self.name_b),
            DuelWinner::Draw => None,
        }
    }

    /// Ranking score from side A's perspective: win 1, draw 0, loss -1.
    pub fn score_for_a(&self) -> i32 {
        match self.winner {
            DuelWinner::A => 1,
            DuelWinner::Draw => 0,
            DuelWinner::B => -1,
        }
    }
}

/// Simulates a duel between two picks with the default policies.
pub fn simulate_duel(
    pick_a: &Pick,
    pick_b: &Pick,
    shields_a: u8,
    shields_b: u8,
    catalog: &Catalog,
    cap: LeagueCap,
) -> DuelReport {
    simulate_duel_with(
        pick_a,
        pick_b,
        shields_a,
        shields_b,
        catalog,
        cap,
        &GreedyThrow,
        &ThresholdShields::default(),
    )
}

/// Simulates a duel with explicit throw and shield policies.
#[allow(clippy::too_many_arguments)]
pub fn simulate_duel_with(
    pick_a: &Pick,
    pick_b: &Pick,
    shields_a: u8,
    shields_b: u8,
    catalog: &Catalog,
    cap: LeagueCap,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
) -> DuelReport {
    let mut a = Fighter::from_pick(pick_a, catalog, cap);
    let mut b = Fighter::from_pick(pick_b, catalog, cap);
    a.shields = shields_a.min(MAX_SHIELDS);
    b.shields = shields_b.min(MAX_SHIELDS);
    run_duel(a, b, throw_policy, shield_policy)
}

/// Runs the turn loop on two prepared fighters.
pub fn run_duel(
    mut a: Fighter,
    mut b: Fighter,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
) -> DuelReport {
    let recommended_a = best_charged(&a, &b).map(|m| m.id.clone());
    let recommended_b = best_charged(&b, &a).map(|m| m.id.clone());
    let danger_a = danger_list(&a, &b);
    let danger_b = danger_list(&b, &a);
    let mut log = DuelLog::new();

    if a.max_hp <= 0 || b.max_hp <= 0 {
        log.note("degenerate stats; treating as draw");
        return DuelReport {
            name_a: a.name,
            name_b: b.name,
            winner: DuelWinner::Draw,
            hp_a: 0,
            hp_b: 0,
            recommended_a,
            recommended_b,
            danger_a,
            danger_b,
            summary: log.into_summary(),
        };
    }

    let mut turn = 0;
    while !a.is_fainted() && !b.is_fainted() && turn < MAX_TURNS {
        turn += 1;
        let a_ready = can_throw(&a);
        let b_ready = can_throw(&b);
        if a_ready || b_ready {
            resolve_exchange(
                &mut a,
                &mut b,
                a_ready,
                b_ready,
                throw_policy,
                shield_policy,
                &mut log,
            );
        } else {
            resolve_fast_turn(&mut a, &mut b);
        }
    }

    let winner = decide_winner(&a, &b);
    let hp_a = hp_percent(a.hp, a.max_hp);
    let hp_b = hp_percent(b.hp, b.max_hp);
    DuelReport {
        name_a: a.name,
        name_b: b.name,
        winner,
        hp_a,
        hp_b,
        recommended_a,
        recommended_b,
        danger_a,
        danger_b,
        summary: log.into_summary(),
    }
}

fn can_throw(fighter: &Fighter) -> bool {
    fighter
        .charged
        .iter()
        .any(|m| fighter.energy >= m.energy_cost())
}

/// A throw resolved against a frozen view of both sides, applied later.
struct ThrowPlan {
    move_id: String,
    damage: i32,
    shielded: bool,
    cost: i32,
    cooldown_reset: i32,
}

fn plan_throw(
    user: &Fighter,
    target: &Fighter,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
) -> Option<ThrowPlan> {
    let mv = throw_policy.choose_throw(user, target)?;
    let shielded = shield_policy.should_shield(user, target, mv);
    let damage = if shielded {
        0
    } else {
        damage::move_damage(user, target, mv)
    };
    Some(ThrowPlan {
        move_id: mv.id.clone(),
        damage,
        shielded,
        cost: mv.energy_cost(),
        cooldown_reset: user.fast.turns() as i32,
    })
}

fn apply_throw(
    user: &mut Fighter,
    target: &mut Fighter,
    label: &str,
    plan: ThrowPlan,
    log: &mut DuelLog,
) {
    if plan.shielded {
        target.shields = target.shields.saturating_sub(1);
    } else {
        target.hp = (target.hp - plan.damage).max(0);
    }
    user.energy -= plan.cost;
    user.cooldown = plan.cooldown_reset;
    log.throw(label, &plan.move_id, plan.shielded);
}

fn throw_charged(
    user: &mut Fighter,
    target: &mut Fighter,
    label: &str,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
    log: &mut DuelLog,
) {
    if let Some(plan) = plan_throw(user, target, throw_policy, shield_policy) {
        apply_throw(user, target, label, plan, log);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_exchange(
    a: &mut Fighter,
    b: &mut Fighter,
    a_ready: bool,
    b_ready: bool,
    throw_policy: &dyn ThrowPolicy,
    shield_policy: &dyn ShieldPolicy,
    log: &mut DuelLog,
) {
    if a_ready && b_ready && a.attack == b.attack {
        // Exact attack tie: both sides decide against the pre-step state and
        // both damages land, so mutual knockouts are possible.
        let plan_a = plan_throw(a, b, throw_policy, shield_policy);
        let plan_b = plan_throw(b, a, throw_policy, shield_policy);
        if let Some(plan) = plan_a {
            apply_throw(a, b, "A", plan, log);
        }
        if let Some(plan) = plan_b {
            apply_throw(b, a, "B", plan, log);
        }
        return;
    }

    let a_first = a_ready && (!b_ready || a.attack >= b.attack);
    if a_first {
        throw_charged(a, b, "A", throw_policy, shield_policy, log);
        if b_ready && !b.is_fainted() {
            throw_charged(b, a, "B", throw_policy, shield_policy, log);
        } else if !b_ready {
            b.cooldown -= 1;
        }
    } else {
        throw_charged(b, a, "B", throw_policy, shield_policy, log);
        if a_ready && !a.is_fainted() {
            throw_charged(a, b, "A", throw_policy, shield_policy, log);
        } else if !a_ready {
            a.cooldown -= 1;
        }
    }
}

/// Both cooldowns tick before either landing resolves, so a side that falls
/// this turn still gets its due fast move.
fn resolve_fast_turn(a: &mut Fighter, b: &mut Fighter) {
    a.cooldown -= 1;
    b.cooldown -= 1;
    let a_due = a.cooldown <= 0;
    let b_due = b.cooldown <= 0;
    if a_due {
        land_fast(a, b);
    }
    if b_due {
        land_fast(b, a);
    }
}

fn land_fast(user: &mut Fighter, target: &mut Fighter) {
    let hit = damage::move_damage(user, target, &user.fast);
    target.hp = (target.hp - hit).max(0);
    user.energy = (user.energy + user.fast.energy_gain()).min(ENERGY_CAP);
    user.cooldown = user.fast.turns() as i32;
}

fn decide_winner(a: &Fighter, b: &Fighter) -> DuelWinner {
    if a.is_fainted() && b.is_fainted() {
        DuelWinner::Draw
    } else if a.is_fainted() {
        DuelWinner::B
    } else if b.is_fainted() {
        DuelWinner::A
    } else if a.hp == b.hp {
        DuelWinner::Draw
    } else if a.hp > b.hp {
        DuelWinner::A
    } else {
        DuelWinner::B
    }
}

/// Hardest-hitting charged move against this foe, energy ignored. Ties keep
/// the earlier list entry.
fn best_charged<'a>(user: &'a Fighter, foe: &Fighter) -> Option<&'a Move> {
    let mut pick: Option<&Move> = None;
    let mut best = i32::MIN;
    for mv in &user.charged {
        let value = damage::move_damage(user, foe, mv);
        if value > best {
            best = value;
            pick = Some(mv);
        }
    }
    pick
}

/// Fast-move uses needed from empty energy, with non-positive gains floored.
fn fasts_needed(gain: i32, cost: i32) -> u32 {
    let gain = gain.max(1) as i64;
    let cost = cost.max(0) as i64;
    ((cost + gain - 1) / gain) as u32
}

fn danger_list(user: &Fighter, foe: &Fighter) -> Vec<DangerMove> {
    let mut scored: Vec<(i32, DangerMove)> = user
        .charged
        .iter()
        .map(|mv| {
            let value = damage::move_damage(user, foe, mv);
            let fasts = fasts_needed(user.fast.energy_gain(), mv.energy_cost());
            let turns = fasts * user.fast.turns();
            let entry = DangerMove {
                id: mv.id.clone(),
                fasts,
                turns,
                seconds: turns as f64 * TURN_SECONDS,
            };
            (value, entry)
        })
        .collect();
    // Stable by damage descending; equal damage keeps the pick's order.
    scored.sort_by(|x, y| y.0.cmp(&x.0));
    scored.into_iter().map(|(_, entry)| entry).collect()
}

fn hp_percent(hp: i32, max_hp: i32) -> i32 {
    if max_hp <= 0 {
        return 0;
    }
    ((hp as f64 / max_hp as f64) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MoveKind;
    use crate::types::Type;

    fn fast_move(gain: i32, turns: u32) -> Move {
        Move {
            id: "FAST".to_string(),
            move_type: Type::Normal,
            power: 3.0,
            kind: MoveKind::Fast {
                energy_gain: gain,
                turns,
            },
        }
    }

    fn charged_move(id: &str, power: f64, cost: i32) -> Move {
        Move {
            id: id.to_string(),
            move_type: Type::Normal,
            power,
            kind: MoveKind::Charged { energy_cost: cost },
        }
    }

    fn fighter(name: &str, attack: f64, hp: i32, fast: Move, charged: Vec<Move>) -> Fighter {
        let cooldown = fast.turns() as i32;
        Fighter {
            name: name.to_string(),
            species_key: name.to_ascii_lowercase(),
            types: vec![Type::Normal],
            attack,
            defense: 160.06,
            max_hp: hp,
            hp,
            energy: 0,
            cooldown,
            shields: 0,
            fast,
            charged,
        }
    }

    fn greedy() -> GreedyThrow {
        GreedyThrow
    }

    fn shields() -> ThresholdShields {
        ThresholdShields::default()
    }

    #[test]
    fn mirror_duel_is_a_draw() {
        let a = fighter(
            "A",
            160.06,
            160,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        let b = fighter(
            "B",
            160.06,
            160,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        let report = run_duel(a, b, &greedy(), &shields());
        assert_eq!(report.winner, DuelWinner::Draw);
        assert_eq!(report.hp_a, 0);
        assert_eq!(report.hp_b, 0);
        // Three simultaneous exchanges, two lines each.
        assert_eq!(report.summary.len(), 6);
    }

    #[test]
    fn higher_attack_throws_first_and_wins() {
        let a = fighter(
            "A",
            184.069,
            160,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        let b = fighter(
            "B",
            160.06,
            160,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        let report = run_duel(a, b, &greedy(), &shields());
        assert_eq!(report.winner, DuelWinner::A);
        assert_eq!(report.winner_name(), Some("A"));
        assert_eq!(report.hp_b, 0);
        assert_eq!(report.hp_a, 18);
        assert_eq!(report.summary[0], "A throws CHG");
        // The finishing throw lands before the slower side can answer.
        assert_eq!(report.summary.len(), 5);
        assert_eq!(report.summary[4], "A throws CHG");
    }

    #[test]
    fn sequential_exchange_shields_and_ticks() {
        let mut a = fighter(
            "A",
            184.069,
            160,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        let mut b = fighter(
            "B",
            160.06,
            160,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        a.energy = 50;
        b.shields = 2;
        b.cooldown = 1;
        let mut log = DuelLog::new();
        resolve_exchange(&mut a, &mut b, true, false, &greedy(), &shields(), &mut log);

        // The shield eats the whole hit and the non-ready side only ticks.
        assert_eq!(b.hp, 160);
        assert_eq!(b.shields, 1);
        assert_eq!(b.cooldown, 0);
        assert_eq!(b.energy, 0);
        assert_eq!(a.energy, 5);
        assert_eq!(a.cooldown, 1);
        assert_eq!(log.lines(), ["A throws CHG (shielded)"]);
    }

    #[test]
    fn tied_exchange_can_knock_both_out() {
        let mut a = fighter(
            "A",
            160.06,
            30,
            fast_move(13, 1),
            vec![charged_move("CHG", 90.0, 45)],
        );
        let mut b = a.clone();
        b.name = "B".to_string();
        a.energy = 45;
        b.energy = 45;
        let mut log = DuelLog::new();
        resolve_exchange(&mut a, &mut b, true, true, &greedy(), &shields(), &mut log);
        assert!(a.is_fainted());
        assert!(b.is_fainted());
        assert_eq!(log.lines().len(), 2);
    }

    #[test]
    fn fast_turn_lands_due_moves_and_caps_energy() {
        let mut a = fighter("A", 160.06, 160, fast_move(13, 1), vec![]);
        let mut b = fighter("B", 160.06, 160, fast_move(40, 2), vec![]);
        a.energy = 95;
        resolve_fast_turn(&mut a, &mut b);

        // A's one-turn move lands and its gain clips at the cap; B's two-turn
        // move is still winding up.
        assert_eq!(a.energy, ENERGY_CAP);
        assert_eq!(a.cooldown, 1);
        assert_eq!(b.hp, 158);
        assert_eq!(b.energy, 0);
        assert_eq!(b.cooldown, 1);
        assert_eq!(a.hp, 160);

        // Next tick both land.
        resolve_fast_turn(&mut a, &mut b);
        assert_eq!(b.energy, 40);
        assert_eq!(a.hp, 158);
        assert_eq!(b.hp, 156);
    }

    #[test]
    fn stalemate_hits_the_turn_ceiling_and_scores_on_hp() {
        // No charged moves at all: pure fast war for the full 2000 turns.
        let a = fighter("A", 160.06, 10_000, fast_move(8, 1), vec![]);
        let b = fighter("B", 160.06, 12_000, fast_move(8, 1), vec![]);
        let report = run_duel(a, b, &greedy(), &shields());
        assert_eq!(report.winner, DuelWinner::B);
        assert_eq!(report.hp_a, 60);
        assert_eq!(report.hp_b, 67);

        let a = fighter("A", 160.06, 10_000, fast_move(8, 1), vec![]);
        let b = fighter("B", 160.06, 10_000, fast_move(8, 1), vec![]);
        let report = run_duel(a, b, &greedy(), &shields());
        assert_eq!(report.winner, DuelWinner::Draw);
    }

    #[test]
    fn degenerate_stats_score_as_a_draw() {
        let mut a = fighter("A", 160.06, 160, fast_move(13, 1), vec![]);
        a.max_hp = 0;
        a.hp = 0;
        let b = fighter("B", 160.06, 160, fast_move(13, 1), vec![]);
        let report = run_duel(a, b, &greedy(), &shields());
        assert_eq!(report.winner, DuelWinner::Draw);
        assert_eq!(report.hp_a, 0);
        assert_eq!(report.hp_b, 0);
        assert_eq!(report.summary, ["degenerate stats; treating as draw"]);
    }

    #[test]
    fn recommendations_and_danger_lists_rank_by_damage() {
        let a = fighter(
            "A",
            160.06,
            160,
            fast_move(13, 1),
            vec![
                charged_move("LIGHT", 40.0, 35),
                charged_move("HEAVY", 90.0, 55),
            ],
        );
        let b = fighter(
            "B",
            160.06,
            160,
            fast_move(8, 1),
            vec![charged_move("ANSWER", 70.0, 45)],
        );
        let report = run_duel(a, b, &greedy(), &shields());

        assert_eq!(report.recommended_a.as_deref(), Some("HEAVY"));
        assert_eq!(report.recommended_b.as_deref(), Some("ANSWER"));

        let ids: Vec<&str> = report.danger_a.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["HEAVY", "LIGHT"]);
        // 55 energy at 13 per fast is 5 fasts, one turn each, 2.5 seconds.
        assert_eq!(report.danger_a[0].fasts, 5);
        assert_eq!(report.danger_a[0].turns, 5);
        assert_eq!(report.danger_a[0].seconds, 2.5);
        // 45 energy at 8 per fast is 6 fasts.
        assert_eq!(report.danger_b[0].fasts, 6);
        assert_eq!(report.danger_b[0].seconds, 3.0);
    }

    #[test]
    fn reports_are_reproducible() {
        let build = || {
            (
                fighter(
                    "A",
                    184.069,
                    160,
                    fast_move(13, 1),
                    vec![charged_move("CHG", 90.0, 45)],
                ),
                fighter(
                    "B",
                    160.06,
                    160,
                    fast_move(8, 1),
                    vec![charged_move("OTHER", 70.0, 45)],
                ),
            )
        };
        let (a1, b1) = build();
        let (a2, b2) = build();
        let first = run_duel(a1, b1, &greedy(), &shields());
        let second = run_duel(a2, b2, &greedy(), &shields());
        assert_eq!(first, second);
    }
}
