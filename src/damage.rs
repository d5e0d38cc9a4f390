//! Damage arithmetic shared by the duel loop, the policies and the reports.

use crate::catalog::Move;
use crate::fighter::Fighter;
use crate::types::{self, Type};

/// Same-type attack bonus applied when a move shares a type with its user.
pub const STAB: f64 = 1.2;

pub fn is_stab(move_type: Type, user_types: &[Type]) -> bool {
    user_types.contains(&move_type)
}

/// Core formula: `floor(0.5 * power * atk/def * stab * eff) + 1`, never below
/// one. Defense is floored at 1 so degenerate stats cannot divide by zero.
pub fn damage(power: f64, attack: f64, defense: f64, stab: f64, effectiveness: f64) -> i32 {
    let raw = 0.5 * power * (attack / defense.max(1.0)) * stab * effectiveness;
    (raw.floor() as i32 + 1).max(1)
}

/// Damage `mv` deals from `attacker` to `defender`, typing and STAB included.
pub fn move_damage(attacker: &Fighter, defender: &Fighter, mv: &Move) -> i32 {
    let stab = if is_stab(mv.move_type, &attacker.types) {
        STAB
    } else {
        1.0
    };
    let mult = types::effectiveness(mv.move_type, &defender.types);
    damage(mv.power, attacker.attack, defender.defense, stab, mult)
}
