//! Pick documents and duel-ready combatants.

use crate::catalog::{self, Catalog, Move, Species};
use crate::league::{self, LeagueCap};
use crate::types::Type;
use serde::Deserialize;
use std::collections::HashMap;

/// One pick slot as supplied by callers: a species plus optional move choices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pick {
    #[serde(alias = "species")]
    pub species_id: String,
    pub name: Option<String>,
    pub fast_move: Option<String>,
    pub charged_moves: Vec<String>,
    #[serde(flatten)]
    pub extras: HashMap<String, serde_json::Value>,
}

impl Pick {
    pub fn new(species_id: &str) -> Pick {
        Pick {
            species_id: species_id.to_string(),
            ..Pick::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.species_id)
    }
}

/// On-disk picks document: your candidates plus the opposing picks to rank
/// against. Unknown top-level fields are tolerated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicksFile {
    pub team: Vec<Pick>,
    pub opponents: Vec<Pick>,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

/// A duel-ready combatant: tier-scaled stats plus in-duel move state.
#[derive(Debug, Clone)]
pub struct Fighter {
    pub name: String,
    pub species_key: String,
    pub types: Vec<Type>,
    pub attack: f64,
    pub defense: f64,
    pub max_hp: i32,
    pub hp: i32,
    pub energy: i32,
    /// Turns until the fast move lands. May go negative during exchange
    /// turns; any value at or below zero is due.
    pub cooldown: i32,
    pub shields: u8,
    pub fast: Move,
    pub charged: Vec<Move>,
}

impl Fighter {
    /// Builds a combatant from a pick. Lookup misses never abort: unknown
    /// species become the neutral placeholder and unresolved moves fall back
    /// to the sentinels.
    pub fn from_pick(pick: &Pick, catalog: &Catalog, cap: LeagueCap) -> Fighter {
        let species_key = catalog::normalize_species_key(&pick.species_id);
        let base = match catalog.species(&pick.species_id) {
            Some(found) => found.clone(),
            None => Species::placeholder(&species_key),
        };
        let level = league::level_for_cap(base.attack, base.defense, base.stamina, cap);
        let cpm = league::cpm_for_level(level);
        let attack = base.attack * cpm;
        let defense = base.defense * cpm;
        let max_hp = ((base.stamina * cpm).floor() as i32).max(1);

        let fast = pick
            .fast_move
            .as_deref()
            .and_then(|id| catalog.find_move(id))
            .filter(|m| m.is_fast())
            .cloned()
            .unwrap_or_else(|| catalog.tackle().clone());
        let mut charged: Vec<Move> = pick
            .charged_moves
            .iter()
            .filter_map(|id| catalog.find_move(id))
            .filter(|m| m.is_charged())
            .cloned()
            .collect();
        if charged.is_empty() {
            charged.push(catalog.generic_charged().clone());
            charged.push(catalog.generic_charged2().clone());
        }

        let cooldown = fast.turns() as i32;
        Fighter {
            name: pick.display_name().to_string(),
            species_key,
            types: base.types,
            attack,
            defense,
            max_hp,
            hp: max_hp,
            energy: 0,
            cooldown,
            shields: 0,
            fast,
            charged,
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_catalog() -> Catalog {
        let gm = json!({
            "pokemon": [
                {
                    "speciesId": "alpha",
                    "baseAttack": 200, "baseDefense": 200, "baseStamina": 200,
                    "types": ["POKEMON_TYPE_NORMAL"]
                },
                {
                    "speciesId": "fighter",
                    "baseAttack": 210, "baseDefense": 190, "baseStamina": 200,
                    "types": ["POKEMON_TYPE_FIGHTING"]
                }
            ],
            "moves": [
                { "moveId": "FAST_BIG", "type": "POKEMON_TYPE_NORMAL", "power": 3, "energyGain": 13, "durationTurns": 1 },
                { "moveId": "CHG_45", "type": "POKEMON_TYPE_NORMAL", "power": 90, "energy": 45 },
                { "moveId": "SLOW_FAST", "type": "POKEMON_TYPE_NORMAL", "power": 6, "energyGain": 9, "durationTurns": 3 }
            ]
        });
        Catalog::from_source(&gm)
    }

    fn pick(species: &str, fast: Option<&str>, charged: &[&str]) -> Pick {
        Pick {
            species_id: species.to_string(),
            fast_move: fast.map(str::to_string),
            charged_moves: charged.iter().map(|s| s.to_string()).collect(),
            ..Pick::default()
        }
    }

    #[test]
    fn scales_stats_at_the_uncapped_ceiling() {
        let catalog = sample_catalog();
        let built = Fighter::from_pick(
            &pick("alpha", Some("FAST_BIG"), &["CHG_45"]),
            &catalog,
            LeagueCap::Unlimited,
        );
        assert!((built.attack - 200.0 * 0.8003).abs() < 1e-9);
        assert!((built.defense - 200.0 * 0.8003).abs() < 1e-9);
        assert_eq!(built.max_hp, 160);
        assert_eq!(built.hp, 160);
        assert_eq!(built.energy, 0);
        assert_eq!(built.shields, 0);
    }

    #[test]
    fn capped_tier_scales_down() {
        let catalog = sample_catalog();
        let capped = Fighter::from_pick(
            &pick("alpha", Some("FAST_BIG"), &["CHG_45"]),
            &catalog,
            LeagueCap::Limit(1500.0),
        );
        let open = Fighter::from_pick(
            &pick("alpha", Some("FAST_BIG"), &["CHG_45"]),
            &catalog,
            LeagueCap::Unlimited,
        );
        assert!(capped.attack < open.attack);
        assert!(capped.max_hp < open.max_hp);
        assert!(capped.max_hp >= 1);
    }

    #[test]
    fn unknown_species_uses_placeholder() {
        let catalog = sample_catalog();
        let built = Fighter::from_pick(
            &pick("Missing? No.", None, &[]),
            &catalog,
            LeagueCap::Unlimited,
        );
        assert_eq!(built.species_key, "missing_no");
        assert_eq!(built.types, vec![Type::Normal]);
        assert_eq!(built.max_hp, 160);
    }

    #[test]
    fn fast_move_falls_back_to_tackle() {
        let catalog = sample_catalog();
        for fast in [None, Some("NOT_A_MOVE"), Some("CHG_45")] {
            let built = Fighter::from_pick(&pick("alpha", fast, &[]), &catalog, LeagueCap::Unlimited);
            assert_eq!(built.fast.id, "TACKLE");
        }
        let built = Fighter::from_pick(
            &pick("alpha", Some("SLOW_FAST"), &[]),
            &catalog,
            LeagueCap::Unlimited,
        );
        assert_eq!(built.fast.id, "SLOW_FAST");
        assert_eq!(built.cooldown, 3);
    }

    #[test]
    fn charged_misses_drop_and_empty_lists_get_generics() {
        let catalog = sample_catalog();
        let built = Fighter::from_pick(
            &pick("alpha", None, &["NOT_A_MOVE", "CHG_45", "FAST_BIG"]),
            &catalog,
            LeagueCap::Unlimited,
        );
        let ids: Vec<&str> = built.charged.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["CHG_45"]);

        let built = Fighter::from_pick(
            &pick("alpha", None, &["NOT_A_MOVE"]),
            &catalog,
            LeagueCap::Unlimited,
        );
        let ids: Vec<&str> = built.charged.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["GENERIC_CHARGED", "GENERIC_CHARGED2"]);
    }

    #[test]
    fn display_name_prefers_the_explicit_name() {
        let mut named = pick("alpha", None, &[]);
        named.name = Some("Lead Alpha".to_string());
        assert_eq!(named.display_name(), "Lead Alpha");
        assert_eq!(pick("alpha", None, &[]).display_name(), "alpha");
    }

    #[test]
    fn picks_deserialize_with_aliases_and_extras() {
        let parsed: Pick = serde_json::from_value(json!({
            "species": "fighter",
            "fastMove": "FAST_BIG",
            "chargedMoves": ["CHG_45"],
            "notes": "from the ui"
        }))
        .unwrap();
        assert_eq!(parsed.species_id, "fighter");
        assert_eq!(parsed.fast_move.as_deref(), Some("FAST_BIG"));
        assert_eq!(parsed.charged_moves, vec!["CHG_45".to_string()]);
        assert!(parsed.extras.contains_key("notes"));
    }
}
