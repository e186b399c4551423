//! Collaborator contracts for the external rules engine and the
//! tile-efficiency search.
//!
//! The client never tracks hand legality, scoring flags, or shanten itself;
//! it drives a [`RulesEngine`] one event at a time and reads the answers
//! back. Both traits are narrow on purpose so deterministic doubles can
//! stand in during tests.

use crate::candidate::ActionCandidate;
use crate::tile::NUM_TILE_TYPES;

use anyhow::Result;
use serde_json::Value;

/// One seat's rules engine.
///
/// `update` must be called once per event, in arrival order; skipping or
/// reordering events breaks the engine's hand-tracking invariants. All other
/// methods are read accessors over the state the engine has accumulated.
pub trait RulesEngine {
    /// Applies one mjai event and returns the refreshed legality snapshot.
    fn update(&mut self, event: &Value) -> Result<ActionCandidate>;

    /// Current round, 0-based (East 1 is 0).
    fn kyoku(&self) -> u8;

    /// Dealer-repeat counter.
    fn honba(&self) -> u8;

    /// Whether this seat is the dealer.
    fn is_oya(&self) -> bool;

    /// Concealed hand as a 34-slot count vector, reds not distinguished.
    fn tehai(&self) -> [u8; NUM_TILE_TYPES];

    /// Red-five flags for manzu, pinzu, souzu.
    fn akas_in_hand(&self) -> [bool; 3];

    /// Tile exchanges to a complete hand.
    fn shanten(&self) -> i8;

    /// mjai symbol of the tile drawn this turn, if any.
    fn last_self_tsumo(&self) -> Option<String>;

    /// mjai symbol of the most recent discard by any seat, if any.
    fn last_kawa_tile(&self) -> Option<String>;

    /// Whether this seat has declared riichi.
    fn self_riichi_declared(&self) -> bool;

    /// Human-readable state summary for the diagnostic channel.
    fn brief_info(&self) -> String;
}

/// Black-box tile-efficiency search.
///
/// Side-effect free: given a hand in tenhou notation, returns unordered
/// `(discard tile type, improving tile types)` pairs.
pub trait TileEfficiency {
    fn improving_tiles(&self, tenhou_hand: &str) -> Vec<(u8, Vec<u8>)>;
}
