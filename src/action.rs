//! Outbound mjai actions.
//!
//! A closed set of variants, each serializing to exactly the wire shape the
//! protocol expects. Serialization is compact (no inserted whitespace) and
//! puts the `type` tag first.

use serde::Serialize;

/// One decision, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Discard `pai`; `tsumogiri` marks it as the tile just drawn rather
    /// than a discard from hand.
    Dahai {
        pai: String,
        actor: u8,
        tsumogiri: bool,
    },
    /// Declare riichi.
    Reach { actor: u8 },
    /// Win. `target` is the seat paid from: the winner itself on a
    /// self-draw, the discarder on a ron.
    Hora { actor: u8, target: u8, pai: String },
    /// Explicit no-op.
    None,
}

impl Action {
    /// Serializes to one compact mjai JSON object.
    #[must_use]
    pub fn to_mjai(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}
