//! Scoping and tracing records.
//!
//! A [`SymbolTable`] is a chained name-to-value mapping; lookups walk the
//! parent chain, writes land in the current frame. A [`Context`] pairs a
//! symbol table with a display name and a parent link, serving two roles:
//! lexical enclosure (a function value holds the context it was defined in)
//! and traceback rendering for runtime errors.
//!
//! Contexts are shared via `Rc` because function values outlive the call
//! that created their defining context. A named `def` stored in its own
//! scope forms an `Rc` cycle; that leak is accepted for a short-lived
//! interpreter process.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tython_common::error::TraceFrame;
use tython_common::span::Span;

use crate::value::Value;

/// A chained name-to-value mapping.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, Value>,
    parent: Option<Rc<RefCell<SymbolTable>>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Rc<RefCell<SymbolTable>>) -> Self {
        Self {
            symbols: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Look up a name, walking the parent chain. Returns a clone of the
    /// stored value.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.symbols.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().get(name))
    }

    /// Bind a name in the current frame.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.symbols.insert(name.into(), value);
    }

    /// Remove a name from the current frame.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.symbols.remove(name)
    }
}

/// A scoping/tracing record: display name, parent link, entry position, and
/// the symbol table of the frame.
#[derive(Debug)]
pub struct Context {
    pub display_name: String,
    pub parent: Option<Rc<Context>>,
    /// Where execution entered this context (the call site). `None` for the
    /// top-level program context.
    pub parent_entry_span: Option<Span>,
    pub symbols: Rc<RefCell<SymbolTable>>,
}

impl Context {
    /// The top-level `<program>` context over the given symbol table.
    pub fn program(symbols: Rc<RefCell<SymbolTable>>) -> Rc<Self> {
        Rc::new(Self {
            display_name: "<program>".to_string(),
            parent: None,
            parent_entry_span: None,
            symbols,
        })
    }

    /// A fresh child context whose symbol table chains to the parent's.
    pub fn child(name: impl Into<String>, parent: &Rc<Context>, entry: Span) -> Rc<Self> {
        Rc::new(Self {
            display_name: name.into(),
            parent: Some(Rc::clone(parent)),
            parent_entry_span: Some(entry),
            symbols: Rc::new(RefCell::new(SymbolTable::with_parent(Rc::clone(
                &parent.symbols,
            )))),
        })
    }

    /// The symbol table at the root of this context chain (the global
    /// table).
    pub fn root_symbols(self: &Rc<Self>) -> Rc<RefCell<SymbolTable>> {
        let mut ctx = self;
        while let Some(parent) = &ctx.parent {
            ctx = parent;
        }
        Rc::clone(&ctx.symbols)
    }

    /// Build the traceback for an error raised at `span` inside this
    /// context: one frame per enclosing context, outermost first.
    pub fn traceback(self: &Rc<Self>, span: Span) -> Vec<TraceFrame> {
        let mut frames = Vec::new();
        let mut ctx = Some(self);
        let mut pos = Some(span);
        while let (Some(c), Some(p)) = (ctx, pos) {
            frames.push(TraceFrame {
                display_name: c.display_name.clone(),
                span: p,
            });
            pos = c.parent_entry_span;
            ctx = c.parent.as_ref();
        }
        frames.reverse();
        frames
    }
}
