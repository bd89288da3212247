// Tython runtime -- values, contexts, evaluator, and built-ins.
//
// The [`Runtime`] owns the global context (`True`, `False`, `Null`, and the
// system functions) and drives the full pipeline over source text. Errors
// carry spans and are rendered by the caller against the source they came
// from.

pub mod builtins;
pub mod context;
mod eval;
mod result;
pub mod value;

pub use eval::eval;
pub use result::RuntimeResult;

use std::cell::RefCell;
use std::rc::Rc;

use tython_common::error::Error;
use tython_common::span::Span;

use builtins::SystemFn;
use context::{Context, SymbolTable};
use value::{Value, ValueKind};

/// A persistent interpreter session.
///
/// Holds the `<program>` context, so consecutive `run` calls (as in the
/// REPL) see each other's definitions.
pub struct Runtime {
    ctx: Rc<Context>,
}

impl Runtime {
    /// A fresh runtime with the global names pre-bound.
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(SymbolTable::new()));
        {
            let mut table = globals.borrow_mut();
            let span = Span::point(0);
            table.set("Null", Value::null(span, None));
            table.set("True", Value::bool(true, span, None));
            table.set("False", Value::bool(false, span, None));
            for func in SystemFn::ALL {
                table.set(
                    func.name(),
                    Value::new(ValueKind::SystemFunction(func), span, None),
                );
            }
        }
        Self {
            ctx: Context::program(globals),
        }
    }

    /// Lex, parse, and evaluate a program.
    ///
    /// On success the value is the top-level list of statement values.
    pub fn run(&self, source: &str) -> Result<Value, Error> {
        let ast = tython_parser::parse(source)?;
        let mut res = eval(&ast, &self.ctx);
        match res.error.take() {
            Some(err) => Err(err),
            None => Ok(res.value.take().expect("evaluation produces a value")),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a program against a fresh runtime.
pub fn run(source: &str) -> Result<Value, Error> {
    Runtime::new().run(source)
}
