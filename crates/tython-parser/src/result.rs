//! The parser's explicit result envelope.
//!
//! Each grammar production returns a [`ParseResult`] instead of raising.
//! The envelope tracks how many tokens the production consumed
//! (`advance_count`), which makes speculative parsing possible: a caller can
//! `try_register` a sub-production and, when it fails, rewind the token
//! index by the recorded `to_reverse_count` and try something else.

use tython_common::error::Error;

use crate::ast::Node;

/// Result of one grammar production.
#[derive(Debug, Default)]
pub struct ParseResult {
    pub node: Option<Node>,
    pub error: Option<Error>,
    /// Tokens consumed by this production, including sub-productions.
    pub advance_count: usize,
    /// Tokens the caller must rewind after a failed `try_register`.
    pub to_reverse_count: usize,
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one consumed token. Must be called for every `Parser::advance`.
    pub fn register_advancement(&mut self) {
        self.advance_count += 1;
    }

    /// Absorb a sub-production's result, keeping its error if it failed.
    ///
    /// Returns the sub-node; `None` means the sub-production failed and the
    /// caller should return `self` unchanged.
    pub fn register(&mut self, res: ParseResult) -> Option<Node> {
        self.advance_count += res.advance_count;
        if res.error.is_some() {
            self.error = res.error;
        }
        res.node
    }

    /// Absorb a sub-production's result, converting failure into `None`
    /// without recording the error.
    ///
    /// On failure the sub-production's advance count is stored in
    /// `to_reverse_count` so the caller can rewind the parser.
    pub fn try_register(&mut self, res: ParseResult) -> Option<Node> {
        if res.error.is_some() {
            self.to_reverse_count = res.advance_count;
            return None;
        }
        self.register(res)
    }

    /// Finish the production successfully.
    pub fn success(mut self, node: Node) -> Self {
        self.node = Some(node);
        self
    }

    /// Finish the production with an error.
    ///
    /// Keeps the deepest error seen: a new error only replaces a recorded
    /// one when this production consumed no tokens, so the message closest
    /// to the real problem survives speculative attempts.
    pub fn failure(mut self, error: Error) -> Self {
        if self.error.is_none() || self.advance_count == 0 {
            self.error = Some(error);
        }
        self
    }
}
