//! Species and move catalogs built from raw gamemaster JSON.
//!
//! Gamemaster dumps come in several shapes depending on which mirror produced
//! them, so every lookup here probes a list of known key spellings and falls
//! back to safe defaults instead of failing. Building is idempotent: the same
//! document always yields the same catalog.

use crate::types::Type;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Fallback fast move used when a pick's fast move cannot be resolved.
pub static TACKLE: Lazy<Move> = Lazy::new(|| Move {
    id: "TACKLE".to_string(),
    move_type: Type::Normal,
    power: 3.0,
    kind: MoveKind::Fast {
        energy_gain: 8,
        turns: 1,
    },
});

/// Fallback charged move, always present in every catalog.
pub static GENERIC_CHARGED: Lazy<Move> = Lazy::new(|| Move {
    id: "GENERIC_CHARGED".to_string(),
    move_type: Type::Normal,
    power: 70.0,
    kind: MoveKind::Charged { energy_cost: 45 },
});

/// Heavier fallback charged move, always present in every catalog.
pub static GENERIC_CHARGED2: Lazy<Move> = Lazy::new(|| Move {
    id: "GENERIC_CHARGED2".to_string(),
    move_type: Type::Normal,
    power: 90.0,
    kind: MoveKind::Charged { energy_cost: 55 },
});

/// Fast moves generate energy over a fixed turn duration; charged moves spend
/// it. The two kinds never share fields, so the distinction lives in the type.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveKind {
    Fast { energy_gain: i32, turns: u32 },
    Charged { energy_cost: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub id: String,
    pub move_type: Type,
    pub power: f64,
    pub kind: MoveKind,
}

impl Move {
    pub fn is_fast(&self) -> bool {
        matches!(self.kind, MoveKind::Fast { .. })
    }

    pub fn is_charged(&self) -> bool {
        matches!(self.kind, MoveKind::Charged { .. })
    }

    /// Energy gained per use. Zero for charged moves.
    pub fn energy_gain(&self) -> i32 {
        match self.kind {
            MoveKind::Fast { energy_gain, .. } => energy_gain,
            MoveKind::Charged { .. } => 0,
        }
    }

    /// Energy required to throw. Zero for fast moves.
    pub fn energy_cost(&self) -> i32 {
        match self.kind {
            MoveKind::Fast { .. } => 0,
            MoveKind::Charged { energy_cost } => energy_cost,
        }
    }

    /// Turn duration of a fast move. Zero for charged moves.
    pub fn turns(&self) -> u32 {
        match self.kind {
            MoveKind::Fast { turns, .. } => turns,
            MoveKind::Charged { .. } => 0,
        }
    }
}

/// Base stats and typing for one species, keyed by normalized id.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub id: String,
    pub attack: f64,
    pub defense: f64,
    pub stamina: f64,
    pub types: Vec<Type>,
}

impl Species {
    /// Stand-in for species missing from the catalog: flat 200s, mono-Normal.
    pub fn placeholder(id: &str) -> Species {
        Species {
            id: id.to_string(),
            attack: 200.0,
            defense: 200.0,
            stamina: 200.0,
            types: vec![Type::Normal],
        }
    }
}

/// Lowercase species key: alphanumerics and underscores survive, any other
/// run collapses to a single underscore, edges are trimmed.
pub fn normalize_species_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if gap && !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            gap = false;
        } else {
            gap = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Uppercase move key with gamemaster template prefixes stripped, so that
/// `COMBAT_V0013_MOVE_WRAP`, `V0013_WRAP` and `wrap` all land on `WRAP`.
pub fn canonical_move_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = strip_move_prefixes(trimmed);
    let mut out = String::with_capacity(stripped.len());
    let mut gap = false;
    for ch in stripped.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_uppercase());
            gap = false;
        } else {
            gap = true;
        }
    }
    out
}

fn strip_move_prefixes(s: &str) -> &str {
    // A combat prefix can expose a bare version prefix underneath.
    let rest = strip_combat_prefix(s).unwrap_or(s);
    strip_version_prefix(rest).unwrap_or(rest)
}

fn strip_combat_prefix(s: &str) -> Option<&str> {
    const HEAD: &str = "COMBAT_V";
    const TAIL: &str = "_MOVE_";
    let head = s.get(..HEAD.len())?;
    if !head.eq_ignore_ascii_case(HEAD) {
        return None;
    }
    let rest = &s[HEAD.len()..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after = &rest[digits..];
    let tail = after.get(..TAIL.len())?;
    if !tail.eq_ignore_ascii_case(TAIL) {
        return None;
    }
    Some(&after[TAIL.len()..])
}

fn strip_version_prefix(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('V').or_else(|| s.strip_prefix('v'))?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    rest[digits..].strip_prefix('_')
}

/// First candidate that is present and non-null.
fn first_present<'a>(candidates: &[Option<&'a Value>]) -> Option<&'a Value> {
    candidates.iter().copied().flatten().find(|v| !v.is_null())
}

/// First candidate usable as an identifier: a non-empty string or a number.
fn first_id(candidates: &[Option<&Value>]) -> Option<String> {
    candidates.iter().copied().flatten().find_map(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Lenient numeric coercion: numbers pass, numeric strings parse, everything
/// else is rejected so the caller's default applies.
fn coerce_num(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn num_or(v: Option<&Value>, default: f64) -> f64 {
    v.and_then(coerce_num).unwrap_or(default)
}

fn sub<'a>(obj: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    obj.and_then(|o| o.get(key))
}

fn record_lists<'a>(gm: &'a Value, keys: &[&str]) -> Vec<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| {
            let mut node = gm;
            for part in key.split('.') {
                node = node.get(part)?;
            }
            node.as_array()
        })
        .collect()
}

fn build_species(gm: &Value) -> HashMap<String, Species> {
    let lists = record_lists(
        gm,
        &[
            "pokemon",
            "data.pokemon",
            "species",
            "pokemonList",
            "pokemonSettings",
        ],
    );
    let mut out = HashMap::new();
    for list in lists {
        for record in list {
            let Some(raw_id) = first_id(&[
                record.get("speciesId"),
                record.get("pokemonId"),
                record.get("templateId"),
                record.get("id"),
                record.get("name"),
            ]) else {
                continue;
            };
            let key = normalize_species_key(&raw_id);
            if key.is_empty() {
                continue;
            }
            let base = record
                .get("baseStats")
                .filter(|v| !v.is_null())
                .or_else(|| record.get("stats"));
            let attack = num_or(
                first_present(&[
                    record.get("baseAttack"),
                    sub(base, "atk"),
                    sub(base, "attack"),
                    record.get("attack"),
                ]),
                200.0,
            );
            let defense = num_or(
                first_present(&[
                    record.get("baseDefense"),
                    sub(base, "def"),
                    sub(base, "defense"),
                    record.get("defense"),
                ]),
                200.0,
            );
            let stamina = num_or(
                first_present(&[
                    record.get("baseStamina"),
                    sub(base, "sta"),
                    sub(base, "stamina"),
                    sub(base, "hp"),
                    record.get("stamina"),
                ]),
                200.0,
            );
            let types = parse_types(record);
            // Later lists overwrite earlier entries for the same key.
            out.insert(
                key.clone(),
                Species {
                    id: key,
                    attack,
                    defense,
                    stamina,
                    types,
                },
            );
        }
    }
    out
}

fn parse_types(record: &Value) -> Vec<Type> {
    let declared: Vec<&Value> = match record.get("types").and_then(Value::as_array) {
        Some(arr) => arr.iter().collect(),
        None => [record.get("type1"), record.get("type2")]
            .into_iter()
            .flatten()
            .collect(),
    };
    let mut types: Vec<Type> = declared
        .iter()
        .filter_map(|v| v.as_str())
        .filter_map(Type::from_raw)
        .collect();
    types.truncate(2);
    if types.is_empty() {
        types.push(Type::Normal);
    }
    types
}

fn build_moves(gm: &Value) -> HashMap<String, Move> {
    let lists = record_lists(
        gm,
        &[
            "moves",
            "combatMoves",
            "data.moves",
            "data.combatMoves",
            "moveList",
        ],
    );
    let mut out: HashMap<String, Move> = HashMap::new();
    for list in lists {
        for record in list {
            let Some(raw_id) = first_id(&[
                record.get("moveId"),
                record.get("id"),
                record.get("uniqueId"),
                record.get("templateId"),
                record.get("name"),
            ]) else {
                continue;
            };
            let key = canonical_move_key(&raw_id);
            if key.is_empty() {
                continue;
            }
            // Only the first declared type label counts, even if it fails to
            // parse; a bad label degrades to Normal rather than probing on.
            let move_type = [
                record.get("type"),
                record.get("pokemonType"),
                record.get("moveType"),
            ]
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .find(|s| !s.is_empty())
            .and_then(Type::from_raw)
            .unwrap_or(Type::Normal);
            let power = num_or(
                first_present(&[
                    record.get("pvpPower"),
                    record.get("power"),
                    record.get("combatPower"),
                    record.get("damage"),
                ]),
                3.0,
            );
            let kind = parse_kind(record);
            let mv = Move {
                id: key.clone(),
                move_type,
                power,
                kind,
            };
            match out.entry(key) {
                // Duplicate ids keep the strictly stronger variant.
                Entry::Occupied(mut e) => {
                    if mv.power > e.get().power {
                        e.insert(mv);
                    }
                }
                Entry::Vacant(e) => {
                    e.insert(mv);
                }
            }
        }
    }
    out.entry(TACKLE.id.clone()).or_insert_with(|| TACKLE.clone());
    out.insert(GENERIC_CHARGED.id.clone(), GENERIC_CHARGED.clone());
    out.insert(GENERIC_CHARGED2.id.clone(), GENERIC_CHARGED2.clone());
    out
}

/// Classifies a move record. The first energy field present wins: a signed
/// `energyDelta`, then `energyGain`, then `energy`; a record with none of them
/// is a fast move. Non-positive gains and costs take the sentinel defaults.
fn parse_kind(record: &Value) -> MoveKind {
    let delta = record.get("energyDelta").filter(|v| !v.is_null());
    let gain = record.get("energyGain").filter(|v| !v.is_null());
    let cost = record.get("energy").filter(|v| !v.is_null());

    let draft = if let Some(v) = delta {
        let ed = num_or(Some(v), 0.0);
        if ed < 0.0 {
            MoveKind::Charged {
                energy_cost: -ed as i32,
            }
        } else {
            MoveKind::Fast {
                energy_gain: ed as i32,
                turns: 0,
            }
        }
    } else if let Some(v) = gain {
        MoveKind::Fast {
            energy_gain: num_or(Some(v), 0.0) as i32,
            turns: 0,
        }
    } else if let Some(v) = cost {
        MoveKind::Charged {
            energy_cost: num_or(Some(v), 0.0).abs() as i32,
        }
    } else {
        MoveKind::Fast {
            energy_gain: 0,
            turns: 0,
        }
    };

    match draft {
        MoveKind::Fast { energy_gain, .. } => {
            let raw_turns = num_or(
                first_present(&[
                    record.get("durationTurns"),
                    record.get("turns"),
                    record.get("cooldownTurns"),
                ]),
                1.0,
            );
            MoveKind::Fast {
                energy_gain: if energy_gain <= 0 { 8 } else { energy_gain },
                turns: raw_turns.floor().max(1.0) as u32,
            }
        }
        MoveKind::Charged { energy_cost } => MoveKind::Charged {
            energy_cost: if energy_cost <= 0 { 45 } else { energy_cost },
        },
    }
}

/// Immutable species and move books for one gamemaster document.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    species: HashMap<String, Species>,
    moves: HashMap<String, Move>,
}

impl Catalog {
    /// Catalog with no species and only the sentinel moves.
    pub fn empty() -> Catalog {
        Catalog {
            species: HashMap::new(),
            moves: build_moves(&Value::Null),
        }
    }

    /// Builds both books from a raw gamemaster document.
    pub fn from_source(gm: &Value) -> Catalog {
        Catalog {
            species: build_species(gm),
            moves: build_moves(gm),
        }
    }

    /// Looks up a species by any raw spelling of its id.
    pub fn species(&self, raw: &str) -> Option<&Species> {
        self.species.get(&normalize_species_key(raw))
    }

    /// Looks up a move by any raw spelling of its id.
    pub fn find_move(&self, raw: &str) -> Option<&Move> {
        self.moves.get(&canonical_move_key(raw))
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn tackle(&self) -> &Move {
        self.moves.get(TACKLE.id.as_str()).unwrap_or(&TACKLE)
    }

    pub fn generic_charged(&self) -> &Move {
        self.moves
            .get(GENERIC_CHARGED.id.as_str())
            .unwrap_or(&GENERIC_CHARGED)
    }

    pub fn generic_charged2(&self) -> &Move {
        self.moves
            .get(GENERIC_CHARGED2.id.as_str())
            .unwrap_or(&GENERIC_CHARGED2)
    }
}

impl Default for Catalog {
    fn default() -> Catalog {
        Catalog::empty()
    }
}

/// Shared catalog handle. Readers clone the current `Arc` and keep using it
/// even while a rebuild swaps in a replacement.
#[derive(Debug)]
pub struct SharedCatalog {
    inner: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> SharedCatalog {
        SharedCatalog {
            inner: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn empty() -> SharedCatalog {
        SharedCatalog::new(Catalog::empty())
    }

    pub fn load(&self) -> Arc<Catalog> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn store(&self, catalog: Catalog) {
        match self.inner.write() {
            Ok(mut guard) => *guard = Arc::new(catalog),
            Err(poisoned) => *poisoned.into_inner() = Arc::new(catalog),
        }
    }
}

impl Default for SharedCatalog {
    fn default() -> SharedCatalog {
        SharedCatalog::empty()
    }
}
