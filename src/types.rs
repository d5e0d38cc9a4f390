//! Elemental typing and the effectiveness chart.

use std::fmt;

/// The 18 elemental types recognized by the duel ruleset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl Type {
    pub fn all() -> [Type; 18] {
        [
            Type::Normal,
            Type::Fighting,
            Type::Flying,
            Type::Poison,
            Type::Ground,
            Type::Rock,
            Type::Bug,
            Type::Ghost,
            Type::Steel,
            Type::Fire,
            Type::Water,
            Type::Grass,
            Type::Electric,
            Type::Psychic,
            Type::Ice,
            Type::Dragon,
            Type::Dark,
            Type::Fairy,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Normal => "Normal",
            Type::Fighting => "Fighting",
            Type::Flying => "Flying",
            Type::Poison => "Poison",
            Type::Ground => "Ground",
            Type::Rock => "Rock",
            Type::Bug => "Bug",
            Type::Ghost => "Ghost",
            Type::Steel => "Steel",
            Type::Fire => "Fire",
            Type::Water => "Water",
            Type::Grass => "Grass",
            Type::Electric => "Electric",
            Type::Psychic => "Psychic",
            Type::Ice => "Ice",
            Type::Dragon => "Dragon",
            Type::Dark => "Dark",
            Type::Fairy => "Fairy",
        }
    }

    /// Parses a raw type label from catalog data. Accepts plain names and the
    /// `POKEMON_TYPE_` prefixed form, in any letter case, with underscores for
    /// spaces.
    pub fn from_raw(raw: &str) -> Option<Type> {
        let stripped = raw.strip_prefix("POKEMON_TYPE_").unwrap_or(raw);
        let cleaned = stripped.replace('_', " ");
        let cleaned = cleaned.trim();
        Type::all()
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(cleaned))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Combined multiplier of an attacking type against a defender's type list.
/// Dual-typed defenders multiply both entries; an empty list is neutral.
pub fn effectiveness(attacking: Type, defending: &[Type]) -> f64 {
    defending
        .iter()
        .map(|d| single_effectiveness(attacking, *d))
        .product()
}

/// Single-pair multiplier. Super-effective 1.6, resisted 0.625, double-resisted
/// 0.390625, everything else neutral.
fn single_effectiveness(attacking: Type, defending: Type) -> f64 {
    use Type::*;
    match attacking {
        Fighting => match defending {
            Normal | Rock | Ice | Dark | Steel => 1.6,
            Flying | Poison | Bug | Psychic | Fairy => 0.625,
            _ => 1.0,
        },
        Flying => match defending {
            Fighting | Bug | Grass => 1.6,
            Rock | Steel | Electric => 0.625,
            _ => 1.0,
        },
        Poison => match defending {
            Grass | Fairy => 1.6,
            Poison | Ground | Rock | Ghost => 0.625,
            Steel => 0.390625,
            _ => 1.0,
        },
        Ground => match defending {
            Poison | Rock | Steel | Fire | Electric => 1.6,
            Bug | Grass => 0.625,
            Flying => 0.390625,
            _ => 1.0,
        },
        Rock => match defending {
            Flying | Bug | Fire | Ice => 1.6,
            Fighting | Ground | Steel => 0.625,
            _ => 1.0,
        },
        Bug => match defending {
            Grass | Psychic | Dark => 1.6,
            Fighting | Flying | Poison | Ghost | Steel | Fire | Fairy => 0.625,
            _ => 1.0,
        },
        Ghost => match defending {
            Ghost | Psychic => 1.6,
            Dark => 0.625,
            _ => 1.0,
        },
        Steel => match defending {
            Rock | Ice | Fairy => 1.6,
            Steel | Fire | Water | Electric => 0.625,
            _ => 1.0,
        },
        Fire => match defending {
            Bug | Steel | Grass | Ice => 1.6,
            Rock | Fire | Water | Dragon => 0.625,
            _ => 1.0,
        },
        Water => match defending {
            Ground | Rock | Fire => 1.6,
            Water | Grass | Dragon => 0.625,
            _ => 1.0,
        },
        Grass => match defending {
            Ground | Rock | Water => 1.6,
            Flying | Poison | Bug | Steel | Fire | Grass | Dragon => 0.625,
            _ => 1.0,
        },
        Electric => match defending {
            Flying | Water => 1.6,
            Grass | Electric | Dragon => 0.625,
            Ground => 0.390625,
            _ => 1.0,
        },
        Psychic => match defending {
            Fighting | Poison => 1.6,
            Psychic | Steel => 0.625,
            Dark => 0.390625,
            _ => 1.0,
        },
        Ice => match defending {
            Flying | Ground | Grass | Dragon => 1.6,
            Steel | Fire | Water | Ice => 0.625,
            _ => 1.0,
        },
        Dragon => match defending {
            Dragon => 1.6,
            Steel => 0.625,
            Fairy => 0.390625,
            _ => 1.0,
        },
        Dark => match defending {
            Ghost | Psychic => 1.6,
            Fighting | Dark | Fairy => 0.625,
            _ => 1.0,
        },
        Fairy => match defending {
            Fighting | Dragon | Dark => 1.6,
            Poison | Steel | Fire => 0.625,
            _ => 1.0,
        },
        Normal => 1.0,
    }
}
