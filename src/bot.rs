//! One seat's view of the game and the decision-policy contract.
//!
//! [`Bot`] wraps the injected rules engine, keeps the most recent
//! [`ActionCandidate`] snapshot, and exposes the accessor surface policies
//! decide from. Accessors that read the snapshot return a precondition
//! error until the first event has been applied, so a policy can never act
//! on legality data that does not exist yet.

use crate::action::Action;
use crate::candidate::ActionCandidate;
use crate::engine::{RulesEngine, TileEfficiency};
use crate::errors::{ClientError, ClientResult};
use crate::tile::{
    tile_to_mjai, tiles_to_mjai, tiles_to_tenhou, FIVE_MANZU, FIVE_PINZU, FIVE_SOUZU,
    NUM_TILE_TYPES,
};

use std::cmp::Reverse;

/// Decision policy: one method, state in, action out.
///
/// The bot argument is the full facade, so implementations may read hand
/// notation, call the efficiency search, or branch on any candidate flag.
pub trait Policy<E: RulesEngine> {
    fn decide(&mut self, bot: &Bot<E>) -> ClientResult<Action>;
}

/// Facade over one seat's rules engine.
pub struct Bot<E> {
    player_id: u8,
    engine: E,
    last_cans: Option<ActionCandidate>,
}

impl<E: RulesEngine> Bot<E> {
    /// Panics if `player_id` is outside of range [0, 3].
    #[must_use]
    pub fn new(player_id: u8, engine: E) -> Self {
        assert!(player_id < 4, "{player_id} is not in range [0, 3]");
        Self {
            player_id,
            engine,
            last_cans: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn player_id(&self) -> u8 {
        self.player_id
    }

    /// Applies one event through the engine and retains the snapshot it
    /// produced. Events must arrive once each, in order.
    pub fn apply(&mut self, event: &serde_json::Value) -> ClientResult<ActionCandidate> {
        let cans = self
            .engine
            .update(event)
            .map_err(|e| ClientError::EngineRejection {
                message: e.to_string(),
            })?;
        self.last_cans = Some(cans);
        Ok(cans)
    }

    /// The most recent snapshot, or a precondition error before the first
    /// event application.
    pub fn cans(&self) -> ClientResult<ActionCandidate> {
        self.last_cans.ok_or_else(|| ClientError::Precondition {
            message: "action candidate queried before any event was applied".to_owned(),
        })
    }

    // ------------------------------------------------------------------
    // Snapshot-gated accessors
    // ------------------------------------------------------------------

    pub fn can_discard(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_discard)
    }
    pub fn can_riichi(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_riichi)
    }
    pub fn can_agari(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_agari())
    }
    pub fn can_tsumo_agari(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_tsumo_agari)
    }
    pub fn can_ron_agari(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_ron_agari)
    }
    pub fn can_ryukyoku(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_ryukyoku)
    }
    pub fn can_kan(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_kan())
    }
    pub fn can_kakan(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_kakan)
    }
    pub fn can_daiminkan(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_daiminkan)
    }
    pub fn can_ankan(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_ankan)
    }
    pub fn can_pon(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_pon)
    }
    pub fn can_chi(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_chi())
    }
    pub fn can_chi_low(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_chi_low)
    }
    pub fn can_chi_mid(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_chi_mid)
    }
    pub fn can_chi_high(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_chi_high)
    }
    pub fn can_act(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_act)
    }
    pub fn can_pass(&self) -> ClientResult<bool> {
        Ok(self.cans()?.can_pass)
    }

    /// Seat a reactive call or win answers.
    pub fn target_actor(&self) -> ClientResult<u8> {
        Ok(self.cans()?.target_actor)
    }

    // ------------------------------------------------------------------
    // Engine pass-through
    // ------------------------------------------------------------------

    /// Current round as a 1-indexed number: East 1 is 1, East 2 is 2, ...
    #[must_use]
    pub fn kyoku(&self) -> u8 {
        self.engine.kyoku() + 1
    }

    #[must_use]
    pub fn honba(&self) -> u8 {
        self.engine.honba()
    }

    #[must_use]
    pub fn is_oya(&self) -> bool {
        self.engine.is_oya()
    }

    #[must_use]
    pub fn self_riichi_declared(&self) -> bool {
        self.engine.self_riichi_declared()
    }

    #[must_use]
    pub fn shanten(&self) -> i8 {
        self.engine.shanten()
    }

    /// Concealed hand as a count vector. Reds are not distinguished here;
    /// see [`Bot::akas_in_hand`].
    #[must_use]
    pub fn tehai(&self) -> [u8; NUM_TILE_TYPES] {
        self.engine.tehai()
    }

    #[must_use]
    pub fn akas_in_hand(&self) -> [bool; 3] {
        self.engine.akas_in_hand()
    }

    /// The tile drawn this turn. Precondition error when the seat has not
    /// drawn yet.
    pub fn last_self_tsumo(&self) -> ClientResult<String> {
        self.engine
            .last_self_tsumo()
            .ok_or_else(|| ClientError::Precondition {
                message: "no self-drawn tile this turn".to_owned(),
            })
    }

    /// The most recent discard seen from any seat. Precondition error when
    /// nothing has been discarded yet.
    pub fn last_kawa_tile(&self) -> ClientResult<String> {
        self.engine
            .last_kawa_tile()
            .ok_or_else(|| ClientError::Precondition {
                message: "no discard has been observed".to_owned(),
            })
    }

    /// Hand as mjai symbols, reds last.
    #[must_use]
    pub fn tehai_mjai(&self) -> Vec<String> {
        tiles_to_mjai(&self.engine.tehai(), &self.engine.akas_in_hand())
    }

    /// Hand in tenhou.net/2 notation, the format the efficiency search
    /// consumes.
    #[must_use]
    pub fn tehai_tenhou(&self) -> String {
        tiles_to_tenhou(&self.engine.tehai(), &self.engine.akas_in_hand())
    }

    /// Engine state summary for the diagnostic channel.
    #[must_use]
    pub fn brief_info(&self) -> String {
        self.engine.brief_info()
    }

    // ------------------------------------------------------------------
    // Action construction
    // ------------------------------------------------------------------

    /// Discard `pai`, marking it tsumogiri when it equals the tile just
    /// drawn.
    #[must_use]
    pub fn action_discard(&self, pai: &str) -> Action {
        let tsumogiri = self.engine.last_self_tsumo().as_deref() == Some(pai);
        Action::Dahai {
            pai: pai.to_owned(),
            actor: self.player_id,
            tsumogiri,
        }
    }

    pub fn action_tsumo_agari(&self) -> ClientResult<Action> {
        Ok(Action::Hora {
            actor: self.player_id,
            target: self.target_actor()?,
            pai: self.last_self_tsumo()?,
        })
    }

    pub fn action_ron_agari(&self) -> ClientResult<Action> {
        Ok(Action::Hora {
            actor: self.player_id,
            target: self.target_actor()?,
            pai: self.last_kawa_tile()?,
        })
    }

    #[must_use]
    pub fn action_riichi(&self) -> Action {
        Action::Reach {
            actor: self.player_id,
        }
    }

    #[must_use]
    pub fn action_nothing(&self) -> Action {
        Action::None
    }

    // ------------------------------------------------------------------
    // Efficiency search
    // ------------------------------------------------------------------

    /// Runs the efficiency search over the current hand and returns
    /// `(discard symbol, improving symbols)` pairs, best first.
    ///
    /// Ordering is a stable sort descending by improving-tile count, so
    /// equal counts keep the search routine's relative order. When a ranked
    /// discard is the only five of its suit and that suit's red flag is
    /// set, the red symbol is substituted so the wire action names the
    /// physical tile.
    #[must_use]
    pub fn find_improving_tiles(&self, search: &impl TileEfficiency) -> Vec<(String, Vec<String>)> {
        let mut candidates = search.improving_tiles(&self.tehai_tenhou());
        candidates.sort_by_key(|(_, improving)| Reverse(improving.len()));

        candidates
            .into_iter()
            .map(|(discard, improving)| {
                (
                    self.akaize(tile_to_mjai(discard)),
                    improving
                        .into_iter()
                        .map(|t| tile_to_mjai(t).to_owned())
                        .collect(),
                )
            })
            .collect()
    }

    /// Substitutes the red-five symbol for a plain five when the held five
    /// of that same suit is unique and flagged red. Each suit checks only
    /// its own slot and flag.
    fn akaize(&self, pai: &str) -> String {
        let tehai = self.engine.tehai();
        let akas = self.engine.akas_in_hand();
        match pai {
            "5m" if tehai[FIVE_MANZU] == 1 && akas[0] => "5mr".to_owned(),
            "5p" if tehai[FIVE_PINZU] == 1 && akas[1] => "5pr".to_owned(),
            "5s" if tehai[FIVE_SOUZU] == 1 && akas[2] => "5sr".to_owned(),
            other => other.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::Value;

    struct StubEngine {
        cans: ActionCandidate,
        kyoku: u8,
        tehai: [u8; NUM_TILE_TYPES],
        akas: [bool; 3],
        last_tsumo: Option<String>,
        last_kawa: Option<String>,
        reject: bool,
    }

    impl Default for StubEngine {
        fn default() -> Self {
            Self {
                cans: ActionCandidate::default(),
                kyoku: 0,
                tehai: [0; NUM_TILE_TYPES],
                akas: [false; 3],
                last_tsumo: None,
                last_kawa: None,
                reject: false,
            }
        }
    }

    impl RulesEngine for StubEngine {
        fn update(&mut self, _event: &Value) -> Result<ActionCandidate> {
            if self.reject {
                anyhow::bail!("scripted rejection");
            }
            Ok(self.cans)
        }
        fn kyoku(&self) -> u8 {
            self.kyoku
        }
        fn honba(&self) -> u8 {
            0
        }
        fn is_oya(&self) -> bool {
            false
        }
        fn tehai(&self) -> [u8; NUM_TILE_TYPES] {
            self.tehai
        }
        fn akas_in_hand(&self) -> [bool; 3] {
            self.akas
        }
        fn shanten(&self) -> i8 {
            0
        }
        fn last_self_tsumo(&self) -> Option<String> {
            self.last_tsumo.clone()
        }
        fn last_kawa_tile(&self) -> Option<String> {
            self.last_kawa.clone()
        }
        fn self_riichi_declared(&self) -> bool {
            false
        }
        fn brief_info(&self) -> String {
            "stub".to_owned()
        }
    }

    #[test]
    fn candidate_accessors_fail_before_first_event() {
        let bot = Bot::new(0, StubEngine::default());
        assert!(matches!(
            bot.can_discard(),
            Err(ClientError::Precondition { .. }),
        ));
        assert!(matches!(
            bot.target_actor(),
            Err(ClientError::Precondition { .. }),
        ));
    }

    #[test]
    fn candidate_available_after_apply() {
        let engine = StubEngine {
            cans: ActionCandidate {
                can_discard: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut bot = Bot::new(0, engine);
        bot.apply(&serde_json::json!({"type": "tsumo"})).unwrap();
        assert!(bot.can_discard().unwrap());
        assert!(!bot.can_riichi().unwrap());
    }

    #[test]
    fn engine_rejection_is_typed() {
        let engine = StubEngine {
            reject: true,
            ..Default::default()
        };
        let mut bot = Bot::new(0, engine);
        let err = bot
            .apply(&serde_json::json!({"type": "tsumo"}))
            .unwrap_err();
        assert!(matches!(err, ClientError::EngineRejection { .. }));
    }

    #[test]
    fn kyoku_is_one_indexed() {
        let engine = StubEngine {
            kyoku: 0,
            ..Default::default()
        };
        let bot = Bot::new(1, engine);
        assert_eq!(bot.kyoku(), 1); // East 1
    }

    #[test]
    fn last_self_tsumo_gated_when_no_draw() {
        let bot = Bot::new(0, StubEngine::default());
        assert!(matches!(
            bot.last_self_tsumo(),
            Err(ClientError::Precondition { .. }),
        ));
    }

    #[test]
    fn discard_marks_tsumogiri_only_for_drawn_tile() {
        let engine = StubEngine {
            last_tsumo: Some("5m".to_owned()),
            ..Default::default()
        };
        let bot = Bot::new(0, engine);
        assert_eq!(
            bot.action_discard("5m"),
            Action::Dahai {
                pai: "5m".to_owned(),
                actor: 0,
                tsumogiri: true,
            },
        );
        assert_eq!(
            bot.action_discard("1p"),
            Action::Dahai {
                pai: "1p".to_owned(),
                actor: 0,
                tsumogiri: false,
            },
        );
    }

    #[test]
    fn tsumo_agari_targets_own_seat() {
        let engine = StubEngine {
            cans: ActionCandidate {
                can_tsumo_agari: true,
                target_actor: 2,
                ..Default::default()
            },
            last_tsumo: Some("9s".to_owned()),
            ..Default::default()
        };
        let mut bot = Bot::new(2, engine);
        bot.apply(&serde_json::json!({"type": "tsumo"})).unwrap();
        assert_eq!(
            bot.action_tsumo_agari().unwrap(),
            Action::Hora {
                actor: 2,
                target: 2,
                pai: "9s".to_owned(),
            },
        );
    }

    #[test]
    fn ron_agari_names_the_discarder() {
        let engine = StubEngine {
            cans: ActionCandidate {
                can_ron_agari: true,
                target_actor: 1,
                ..Default::default()
            },
            last_kawa: Some("1z".to_owned()),
            ..Default::default()
        };
        let mut bot = Bot::new(3, engine);
        bot.apply(&serde_json::json!({"type": "dahai"})).unwrap();
        assert_eq!(
            bot.action_ron_agari().unwrap(),
            Action::Hora {
                actor: 3,
                target: 1,
                pai: "1z".to_owned(),
            },
        );
    }

    #[test]
    fn riichi_and_nothing_are_plain_constructors() {
        let bot = Bot::new(1, StubEngine::default());
        assert_eq!(bot.action_riichi(), Action::Reach { actor: 1 });
        assert_eq!(bot.action_nothing(), Action::None);
    }

    #[test]
    fn hand_notations_read_through_the_engine() {
        let mut tehai = [0u8; NUM_TILE_TYPES];
        tehai[4] = 1;
        tehai[33] = 2;
        let engine = StubEngine {
            tehai,
            akas: [true, false, false],
            ..Default::default()
        };
        let bot = Bot::new(0, engine);
        assert_eq!(bot.tehai_mjai(), ["C", "C", "5mr"]);
        assert_eq!(bot.tehai_tenhou(), "0m77z");
    }

    struct FixedSearch(Vec<(u8, Vec<u8>)>);

    impl TileEfficiency for FixedSearch {
        fn improving_tiles(&self, _tenhou_hand: &str) -> Vec<(u8, Vec<u8>)> {
            self.0.clone()
        }
    }

    #[test]
    fn improving_tiles_sorted_stable_by_count() {
        let bot = Bot::new(0, StubEngine::default());
        // (1m, 2), (1p, 2), (1s, 3): the 3-count entry wins, the tied pair
        // keeps search order.
        let search = FixedSearch(vec![
            (0, vec![1, 2]),
            (9, vec![10, 11]),
            (18, vec![19, 20, 21]),
        ]);
        let ranked = bot.find_improving_tiles(&search);
        let discards: Vec<&str> = ranked.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(discards, ["1s", "1m", "1p"]);
        assert_eq!(ranked[0].1, ["2s", "3s", "4s"]);
    }
}
