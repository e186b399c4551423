//! Legality snapshot produced by the rules engine.

use serde::{Deserialize, Serialize};

/// Which actions are legal for the seat right now, refreshed wholly on every
/// event application. `target_actor` is the seat a reactive call or win
/// answers; it is only meaningful when one of the reactive flags is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCandidate {
    pub can_discard: bool,
    pub can_riichi: bool,
    pub can_tsumo_agari: bool,
    pub can_ron_agari: bool,
    pub can_ryukyoku: bool,
    pub can_kakan: bool,
    pub can_daiminkan: bool,
    pub can_ankan: bool,
    pub can_pon: bool,
    pub can_chi_low: bool,
    pub can_chi_mid: bool,
    pub can_chi_high: bool,
    pub can_act: bool,
    pub can_pass: bool,
    pub target_actor: u8,
}

impl ActionCandidate {
    /// Win by self-draw or by discard.
    #[inline]
    #[must_use]
    pub const fn can_agari(&self) -> bool {
        self.can_tsumo_agari || self.can_ron_agari
    }

    /// Any of the three kan subtypes.
    #[inline]
    #[must_use]
    pub const fn can_kan(&self) -> bool {
        self.can_ankan || self.can_kakan || self.can_daiminkan
    }

    /// Any of the three chi shapes.
    #[inline]
    #[must_use]
    pub const fn can_chi(&self) -> bool {
        self.can_chi_low || self.can_chi_mid || self.can_chi_high
    }
}
