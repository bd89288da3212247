//! The evaluator's explicit result envelope.
//!
//! Every visitor returns a [`RuntimeResult`] carrying at most one of: a
//! value, an error, a pending `return` value, a `continue` signal, a `break`
//! signal. Signals travel upward through `register` until a loop or call
//! visitor consumes them.

use tython_common::error::Error;

use crate::value::Value;

/// Result of evaluating one node.
#[derive(Debug, Default)]
pub struct RuntimeResult {
    pub value: Option<Value>,
    pub error: Option<Error>,
    pub func_return_value: Option<Value>,
    pub loop_should_continue: bool,
    pub loop_should_break: bool,
}

impl RuntimeResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.value = None;
        self.error = None;
        self.func_return_value = None;
        self.loop_should_continue = false;
        self.loop_should_break = false;
    }

    /// Absorb a sub-evaluation, taking over its error and signals.
    ///
    /// Returns the sub-value; callers must check [`should_return`] before
    /// using it.
    ///
    /// [`should_return`]: RuntimeResult::should_return
    pub fn register(&mut self, res: RuntimeResult) -> Option<Value> {
        self.error = res.error;
        self.func_return_value = res.func_return_value;
        self.loop_should_continue = res.loop_should_continue;
        self.loop_should_break = res.loop_should_break;
        res.value
    }

    /// Finish with a plain value.
    pub fn success(mut self, value: Value) -> Self {
        self.reset();
        self.value = Some(value);
        self
    }

    /// Finish with a pending `return` signal.
    pub fn success_return(mut self, value: Value) -> Self {
        self.reset();
        self.func_return_value = Some(value);
        self
    }

    /// Finish with a `continue` signal.
    pub fn success_continue(mut self) -> Self {
        self.reset();
        self.loop_should_continue = true;
        self
    }

    /// Finish with a `break` signal.
    pub fn success_break(mut self) -> Self {
        self.reset();
        self.loop_should_break = true;
        self
    }

    /// Finish with an error.
    pub fn failure(mut self, error: Error) -> Self {
        self.reset();
        self.error = Some(error);
        self
    }

    /// Whether the enclosing visitor must stop and propagate this result.
    pub fn should_return(&self) -> bool {
        self.error.is_some()
            || self.func_return_value.is_some()
            || self.loop_should_continue
            || self.loop_should_break
    }
}
