//! Pluggable in-duel decision making.
//!
//! Policies are stateless and shared across the rayon workers that fill a
//! match-up matrix, hence the `Sync` bound.

use crate::catalog::Move;
use crate::damage;
use crate::fighter::Fighter;

/// Decides whether the defender burns a shield on an incoming charged move.
pub trait ShieldPolicy: Sync {
    fn should_shield(&self, attacker: &Fighter, defender: &Fighter, incoming: &Move) -> bool;
}

/// Picks which charged move to throw once energy allows one. `None` means no
/// affordable charged move exists.
pub trait ThrowPolicy: Sync {
    fn choose_throw<'a>(&self, user: &'a Fighter, foe: &Fighter) -> Option<&'a Move>;
}

/// Shields on lethal hits, and otherwise on hits above a fraction of max HP.
/// The fraction is stricter while both shields are still up.
#[derive(Debug, Clone)]
pub struct ThresholdShields {
    pub two_left: f64,
    pub last_one: f64,
}

impl Default for ThresholdShields {
    fn default() -> ThresholdShields {
        ThresholdShields {
            two_left: 0.32,
            last_one: 0.45,
        }
    }
}

impl ShieldPolicy for ThresholdShields {
    fn should_shield(&self, attacker: &Fighter, defender: &Fighter, incoming: &Move) -> bool {
        if defender.shields == 0 {
            return false;
        }
        let hit = damage::move_damage(attacker, defender, incoming);
        if hit >= defender.hp {
            return true;
        }
        let fraction = if defender.shields >= 2 {
            self.two_left
        } else {
            self.last_one
        };
        hit as f64 >= defender.max_hp as f64 * fraction
    }
}

/// Always throws the hardest-hitting affordable charged move. Ties keep the
/// earlier move in the pick's list.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyThrow;

impl ThrowPolicy for GreedyThrow {
    fn choose_throw<'a>(&self, user: &'a Fighter, foe: &Fighter) -> Option<&'a Move> {
        let mut pick: Option<&Move> = None;
        let mut best = i32::MIN;
        for mv in &user.charged {
            if user.energy < mv.energy_cost() {
                continue;
            }
            let value = damage::move_damage(user, foe, mv);
            if value > best {
                best = value;
                pick = Some(mv);
            }
        }
        pick
    }
}

/// Greedy, except that while the foe still holds shields and the big hit
/// cannot finish, a strictly cheaper move of acceptable damage-per-energy is
/// thrown instead to pull a shield.
#[derive(Debug, Clone)]
pub struct BaitThrow {
    pub efficiency_floor: f64,
}

impl Default for BaitThrow {
    fn default() -> BaitThrow {
        BaitThrow {
            efficiency_floor: 0.6,
        }
    }
}

/// Selector for the throw policy, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowChoice {
    Greedy,
    Bait,
}

impl ThrowChoice {
    pub fn policy(self) -> Box<dyn ThrowPolicy> {
        match self {
            ThrowChoice::Greedy => Box::new(GreedyThrow),
            ThrowChoice::Bait => Box::new(BaitThrow::default()),
        }
    }
}

impl ThrowPolicy for BaitThrow {
    fn choose_throw<'a>(&self, user: &'a Fighter, foe: &Fighter) -> Option<&'a Move> {
        let best = GreedyThrow.choose_throw(user, foe)?;
        if foe.shields == 0 {
            return Some(best);
        }
        let best_damage = damage::move_damage(user, foe, best);
        if best_damage >= foe.hp {
            return Some(best);
        }
        let mut bait: Option<&Move> = None;
        for mv in &user.charged {
            if user.energy < mv.energy_cost() || mv.energy_cost() >= best.energy_cost() {
                continue;
            }
            if bait.map_or(true, |b| mv.energy_cost() < b.energy_cost()) {
                bait = Some(mv);
            }
        }
        let bait = match bait {
            Some(b) => b,
            None => return Some(best),
        };
        let bait_efficiency =
            damage::move_damage(user, foe, bait) as f64 / bait.energy_cost().max(1) as f64;
        let best_efficiency = best_damage as f64 / best.energy_cost().max(1) as f64;
        if bait_efficiency >= best_efficiency * self.efficiency_floor {
            Some(bait)
        } else {
            Some(best)
        }
    }
}
