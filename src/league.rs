//! League caps, combat-power math and level selection.

use crate::catalog::Species;

/// Highest level with a defined combat-power multiplier.
pub const MAX_LEVEL: usize = 83;

/// Combat-power multiplier per level, indexed by level. Index 0 is unused.
const CPM: [f64; MAX_LEVEL + 1] = [
    0.0, // levels start at 1
    0.094,
    0.135137432,
    0.16639787,
    0.192650919,
    0.21573247,
    0.236572661,
    0.25572005,
    0.273530381,
    0.29024988,
    0.306057377,
    0.3210876,
    0.335445036,
    0.34921268,
    0.362457751,
    0.37523559,
    0.387592406,
    0.39956728,
    0.411193551,
    0.42250001,
    0.432926419,
    0.44310755,
    0.4530599578,
    0.46279839,
    0.472336083,
    0.48168495,
    0.4908558,
    0.49985844,
    0.508701765,
    0.51739395,
    0.525942511,
    0.53435433,
    0.542635767,
    0.55079269,
    0.558830576,
    0.56675452,
    0.574569153,
    0.58227891,
    0.589887907,
    0.59740001,
    0.604818814,
    0.61215729,
    0.619399365,
    0.62656713,
    0.633644533,
    0.64065295,
    0.647576426,
    0.65443563,
    0.661214806,
    0.667934,
    0.674577537,
    0.68116492,
    0.687680648,
    0.69414365,
    0.700538673,
    0.70688421,
    0.713164996,
    0.71939909,
    0.725571552,
    0.7317,
    0.734741009,
    0.73776948,
    0.740785574,
    0.74378943,
    0.746781211,
    0.74976104,
    0.752729087,
    0.75568551,
    0.758630378,
    0.76156384,
    0.764486065,
    0.76739717,
    0.770297266,
    0.7731865,
    0.776064962,
    0.77893275,
    0.781790055,
    0.78463697,
    0.787473578,
    0.79030001,
    0.792803968,
    0.79530001,
    0.797803921,
    0.8003,
];

/// A tier's combat-power ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeagueCap {
    Limit(f64),
    Unlimited,
}

impl LeagueCap {
    /// Maps a tier name to its cap. Case-insensitive, with or without the
    /// "League" suffix; unknown names are unbounded.
    pub fn from_name(name: &str) -> LeagueCap {
        let lowered = name.trim().to_ascii_lowercase();
        let bare = lowered.strip_suffix(" league").unwrap_or(&lowered);
        match bare {
            "great" => LeagueCap::Limit(1500.0),
            "ultra" => LeagueCap::Limit(2500.0),
            _ => LeagueCap::Unlimited,
        }
    }
}

/// Combat power of base stats scaled by one multiplier.
pub fn combat_power(attack: f64, defense: f64, stamina: f64, cpm: f64) -> i64 {
    let scaled = (attack * cpm) * (defense * cpm).sqrt() * (stamina * cpm).sqrt();
    (scaled / 10.0).floor() as i64
}

pub fn cpm_for_level(level: usize) -> f64 {
    CPM.get(level).copied().unwrap_or(0.0)
}

/// Highest level whose combat power stays at or under the cap, never below
/// level 1. Uncapped tiers play at the table maximum.
pub fn level_for_cap(attack: f64, defense: f64, stamina: f64, cap: LeagueCap) -> usize {
    let ceiling = match cap {
        LeagueCap::Unlimited => return MAX_LEVEL,
        LeagueCap::Limit(c) => c,
    };
    let mut best = 1;
    for level in 1..=MAX_LEVEL {
        if combat_power(attack, defense, stamina, CPM[level]) as f64 <= ceiling {
            best = level;
        }
    }
    best
}

/// A species may enter a finite tier only if its level-1 combat power fits.
pub fn eligible_for_cap(species: &Species, cap: LeagueCap) -> bool {
    match cap {
        LeagueCap::Unlimited => true,
        LeagueCap::Limit(ceiling) => {
            let floor_cp = combat_power(species.attack, species.defense, species.stamina, CPM[1]);
            floor_cp as f64 <= ceiling
        }
    }
}
