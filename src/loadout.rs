//! Curated loadouts for picks that arrive without move choices.

use crate::catalog::normalize_species_key;
use crate::fighter::Pick;
use phf::phf_map;

/// A curated fast-plus-charged loadout for one species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loadout {
    pub fast: &'static str,
    pub charged: [&'static str; 2],
}

static RECOMMENDED: phf::Map<&'static str, Loadout> = phf_map! {
    "dragonite" => Loadout { fast: "DRAGON_BREATH", charged: ["DRAGON_CLAW", "SUPERPOWER"] },
    "dialga" => Loadout { fast: "DRAGON_BREATH", charged: ["IRON_HEAD", "DRACO_METEOR"] },
    "dialga_origin" => Loadout { fast: "DRAGON_BREATH", charged: ["ROAR_OF_TIME", "IRON_HEAD"] },
    "garchomp" => Loadout { fast: "MUD_SHOT", charged: ["EARTH_POWER", "OUTRAGE"] },
    "kyurem" => Loadout { fast: "DRAGON_BREATH", charged: ["GLACIATE", "DRAGON_CLAW"] },
    "palkia" => Loadout { fast: "DRAGON_BREATH", charged: ["AQUA_TAIL", "DRACO_METEOR"] },
    "reshiram" => Loadout { fast: "DRAGON_BREATH", charged: ["FUSION_FLARE", "DRACO_METEOR"] },
    "zekrom" => Loadout { fast: "DRAGON_BREATH", charged: ["FUSION_BOLT", "CRUNCH"] },
    "groudon" => Loadout { fast: "MUD_SHOT", charged: ["PRECIPICE_BLADES", "FIRE_PUNCH"] },
    "kyogre" => Loadout { fast: "WATERFALL", charged: ["SURF", "THUNDER"] },
    "ho_oh" => Loadout { fast: "INCINERATE", charged: ["SACRED_FIRE", "BRAVE_BIRD"] },
    "mewtwo" => Loadout { fast: "PSYCHO_CUT", charged: ["PSYSTRIKE", "SHADOW_BALL"] },
    "metagross" => Loadout { fast: "BULLET_PUNCH", charged: ["METEOR_MASH", "EARTHQUAKE"] },
    "melmetal" => Loadout { fast: "THUNDER_SHOCK", charged: ["DOUBLE_IRON_BASH", "ROCK_SLIDE"] },
    "rhyperior" => Loadout { fast: "SMACK_DOWN", charged: ["ROCK_WRECKER", "SURF"] },
    "excadrill" => Loadout { fast: "MUD_SHOT", charged: ["DRILL_RUN", "ROCK_SLIDE"] },
    "landorus_therian" => Loadout { fast: "MUD_SHOT", charged: ["STONE_EDGE", "EARTHQUAKE"] },
    "togekiss" => Loadout { fast: "CHARM", charged: ["ANCIENT_POWER", "FLAMETHROWER"] },
    "yveltal" => Loadout { fast: "SNARL", charged: ["OBLIVION_WING", "DARK_PULSE"] },
    "xerneas" => Loadout { fast: "GEOMANCY", charged: ["MOONBLAST", "THUNDER"] },
    "hydreigon" => Loadout { fast: "DRAGON_BREATH", charged: ["BRUTAL_SWING", "DRAGON_PULSE"] },
    "zacian_crowned_sword" => Loadout { fast: "METAL_CLAW", charged: ["CLOSE_COMBAT", "IRON_HEAD"] },
    "zamazenta_crowned_shield" => Loadout { fast: "METAL_CLAW", charged: ["CLOSE_COMBAT", "IRON_HEAD"] },
    "primarina" => Loadout { fast: "CHARM", charged: ["MOONBLAST", "HYDRO_PUMP"] },
};

/// Curated loadout for a species, looked up by any raw id spelling.
pub fn recommended_loadout(species: &str) -> Option<&'static Loadout> {
    RECOMMENDED.get(normalize_species_key(species).as_str())
}

/// Returns a pick with move slots filled in. Picks that already chose any
/// move keep it untouched; unlisted species get the sentinel moves so the
/// duel still has something to throw.
pub fn fill_moves(pick: &Pick) -> Pick {
    if pick.fast_move.is_some() || !pick.charged_moves.is_empty() {
        return pick.clone();
    }
    let mut filled = pick.clone();
    match recommended_loadout(&pick.species_id) {
        Some(rec) => {
            filled.fast_move = Some(rec.fast.to_string());
            filled.charged_moves = rec.charged.iter().map(|s| s.to_string()).collect();
        }
        None => {
            filled.fast_move = Some("TACKLE".to_string());
            filled.charged_moves = vec![
                "GENERIC_CHARGED".to_string(),
                "GENERIC_CHARGED2".to_string(),
            ];
        }
    }
    filled
}
