//! The reactive loop: one line of events in, one action line out.
//!
//! Recoverable failures (bad JSON, empty batch, engine rejection, a buggy
//! policy tripping a precondition) never break the cadence: the loop logs a
//! diagnostic to the error sink and answers `{"type":"none"}` so the
//! controller is never left waiting on this seat.

use crate::action::Action;
use crate::bot::{Bot, Policy};
use crate::engine::RulesEngine;
use crate::errors::{ClientError, ClientResult};

use std::io::{self, BufRead, Write};

/// Session object for one seat: the state facade plus the decision policy.
/// Construct once per seat assignment.
pub struct Client<E, P> {
    bot: Bot<E>,
    policy: P,
}

impl<E: RulesEngine, P: Policy<E>> Client<E, P> {
    /// Panics if `player_id` is outside of range [0, 3].
    #[must_use]
    pub fn new(player_id: u8, engine: E, policy: P) -> Self {
        Self {
            bot: Bot::new(player_id, engine),
            policy,
        }
    }

    #[must_use]
    pub fn bot(&self) -> &Bot<E> {
        &self.bot
    }

    /// Handles one input line, writing diagnostics for recoverable failures
    /// to `diag`. Always returns exactly one response line.
    pub fn react_with(&mut self, line: &str, diag: &mut impl Write) -> String {
        match self.try_react(line) {
            Ok(response) => response,
            Err(err) => {
                self.write_diagnostic(&err, diag);
                Action::None.to_mjai()
            }
        }
    }

    /// Handles one input line, diagnostics to stderr.
    pub fn react(&mut self, line: &str) -> String {
        self.react_with(line, &mut io::stderr())
    }

    fn try_react(&mut self, line: &str) -> ClientResult<String> {
        let events: Vec<serde_json::Value> =
            serde_json::from_str(line).map_err(|e| ClientError::ProtocolParse {
                message: e.to_string(),
            })?;
        if events.is_empty() {
            return Err(ClientError::ProtocolParse {
                message: "empty event batch".to_owned(),
            });
        }

        // Strict arrival order; only the final snapshot feeds the decision.
        for event in &events {
            self.bot.apply(event)?;
        }

        let action = self.policy.decide(&self.bot)?;
        Ok(action.to_mjai())
    }

    fn write_diagnostic(&self, err: &ClientError, diag: &mut impl Write) {
        let _ = writeln!(diag, "===========================================");
        let _ = writeln!(diag, "error: {err}");
        let _ = writeln!(diag, "brief info:");
        let _ = writeln!(diag, "{}", self.bot.brief_info());
    }

    /// Runs until end of input. One response line per input line; EOF is a
    /// clean shutdown.
    pub fn run(
        &mut self,
        input: impl BufRead,
        mut output: impl Write,
        mut diag: impl Write,
    ) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let response = self.react_with(line.trim(), &mut diag);
            writeln!(output, "{response}")?;
            output.flush()?;
        }
        Ok(())
    }

    /// [`Client::run`] wired to the process's stdin/stdout/stderr.
    pub fn run_stdio(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock(), io::stderr())
    }
}
