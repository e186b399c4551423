//! Shipped decision policies.
//!
//! [`Tsumogiri`] is the default: discard whatever was just drawn, pass
//! otherwise. [`ImprovingTiles`] ranks discards through the injected
//! efficiency search and discards the best candidate.

use crate::action::Action;
use crate::bot::{Bot, Policy};
use crate::engine::{RulesEngine, TileEfficiency};
use crate::errors::ClientResult;

/// Discard the tile just drawn; otherwise do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tsumogiri;

impl<E: RulesEngine> Policy<E> for Tsumogiri {
    fn decide(&mut self, bot: &Bot<E>) -> ClientResult<Action> {
        if bot.can_discard()? {
            let pai = bot.last_self_tsumo()?;
            Ok(bot.action_discard(&pai))
        } else {
            Ok(bot.action_nothing())
        }
    }
}

/// Discard the candidate with the most improving tiles, falling back to
/// tsumogiri when the search returns nothing.
pub struct ImprovingTiles<S> {
    search: S,
}

impl<S: TileEfficiency> ImprovingTiles<S> {
    #[must_use]
    pub fn new(search: S) -> Self {
        Self { search }
    }
}

impl<E: RulesEngine, S: TileEfficiency> Policy<E> for ImprovingTiles<S> {
    fn decide(&mut self, bot: &Bot<E>) -> ClientResult<Action> {
        if !bot.can_discard()? {
            return Ok(bot.action_nothing());
        }
        match bot.find_improving_tiles(&self.search).into_iter().next() {
            Some((pai, _)) => Ok(bot.action_discard(&pai)),
            None => {
                let pai = bot.last_self_tsumo()?;
                Ok(bot.action_discard(&pai))
            }
        }
    }
}
