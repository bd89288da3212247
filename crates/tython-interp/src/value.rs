//! Runtime values.
//!
//! A single tagged union with per-operator methods. Each method implements
//! only the combinations that are meaningful for its operand kinds and
//! returns `RuntimeError("Illegal operation")` for everything else --
//! unsupported combinations are always errors, never silently `Null`.
//!
//! Values carry the span they were produced at and the context they belong
//! to; both are re-stamped by the evaluator whenever a value flows through a
//! variable access or a call boundary.

use std::fmt;
use std::rc::Rc;

use tython_common::error::Error;
use tython_common::span::Span;
use tython_common::token::TypeTag;
use tython_parser::ast::Node;

use crate::builtins::SystemFn;
use crate::context::Context;

/// A runtime value: kind plus span and owning context.
#[derive(Debug, Clone)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
    pub ctx: Option<Rc<Context>>,
}

/// Every kind of runtime value.
#[derive(Debug, Clone)]
pub enum ValueKind {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Function(Rc<FuncData>),
    SystemFunction(SystemFn),
    Type(TypeTag),
}

/// A user-defined function value. Closes over its definition context: each
/// call chains a fresh context to `def_ctx`, never to the caller's.
#[derive(Debug)]
pub struct FuncData {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Node,
    pub def_ctx: Rc<Context>,
    /// True for the `-> expr` form whose body value is the return value.
    pub auto_return: bool,
}

impl FuncData {
    /// Name used in contexts and diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueKind::Null, ValueKind::Null) => true,
            (ValueKind::Bool(a), ValueKind::Bool(b)) => a == b,
            (ValueKind::Int(a), ValueKind::Int(b)) => a == b,
            (ValueKind::Float(a), ValueKind::Float(b)) => a == b,
            (ValueKind::Str(a), ValueKind::Str(b)) => a == b,
            (ValueKind::List(a), ValueKind::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.kind == y.kind)
            }
            (ValueKind::Function(a), ValueKind::Function(b)) => Rc::ptr_eq(a, b),
            (ValueKind::SystemFunction(a), ValueKind::SystemFunction(b)) => a == b,
            (ValueKind::Type(a), ValueKind::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn new(kind: ValueKind, span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self { kind, span, ctx }
    }

    pub fn null(span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self::new(ValueKind::Null, span, ctx)
    }

    pub fn bool(value: bool, span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self::new(ValueKind::Bool(value), span, ctx)
    }

    pub fn int(value: i64, span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self::new(ValueKind::Int(value), span, ctx)
    }

    pub fn float(value: f64, span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self::new(ValueKind::Float(value), span, ctx)
    }

    pub fn str(value: impl Into<String>, span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self::new(ValueKind::Str(value.into()), span, ctx)
    }

    pub fn list(elements: Vec<Value>, span: Span, ctx: Option<Rc<Context>>) -> Self {
        Self::new(ValueKind::List(elements), span, ctx)
    }

    /// The reified type of this value.
    pub fn type_tag(&self) -> TypeTag {
        match &self.kind {
            ValueKind::Null => TypeTag::Null,
            ValueKind::Bool(_) => TypeTag::Bool,
            ValueKind::Int(_) => TypeTag::Int,
            ValueKind::Float(_) => TypeTag::Float,
            ValueKind::Str(_) => TypeTag::String,
            ValueKind::List(_) => TypeTag::List,
            ValueKind::Function(_) => TypeTag::Function,
            ValueKind::SystemFunction(_) => TypeTag::SystemFunction,
            ValueKind::Type(_) => TypeTag::Type,
        }
    }

    /// Truthiness: `Null` is false, booleans are themselves, numbers are
    /// nonzero, strings are nonempty, lists are always true, everything
    /// else is false.
    pub fn is_true(&self) -> bool {
        match &self.kind {
            ValueKind::Null => false,
            ValueKind::Bool(b) => *b,
            ValueKind::Int(n) => *n != 0,
            ValueKind::Float(f) => *f != 0.0,
            ValueKind::Str(s) => !s.is_empty(),
            ValueKind::List(_) => true,
            ValueKind::Function(_) | ValueKind::SystemFunction(_) | ValueKind::Type(_) => false,
        }
    }

    /// Re-stamp span and context, as a variable access or call does.
    pub fn stamped(mut self, span: Span, ctx: &Rc<Context>) -> Self {
        self.span = span;
        self.ctx = Some(Rc::clone(ctx));
        self
    }

    // ── Error helpers ──────────────────────────────────────────────────

    fn runtime_error(&self, span: Span, details: impl Into<String>) -> Error {
        let trace = self
            .ctx
            .as_ref()
            .map(|c| c.traceback(span))
            .unwrap_or_default();
        Error::runtime(span, details, trace)
    }

    fn illegal_operation(&self, other: &Value) -> Error {
        self.runtime_error(self.span.merge(other.span), "Illegal operation")
    }

    fn illegal_unary(&self) -> Error {
        self.runtime_error(self.span, "Illegal operation")
    }

    // ── Arithmetic ─────────────────────────────────────────────────────

    pub fn add(&self, other: &Value) -> Result<Value, Error> {
        match (&self.kind, &other.kind) {
            (ValueKind::Int(a), ValueKind::Int(b)) => Ok(self.derive(ValueKind::Int(a.wrapping_add(*b)))),
            (ValueKind::Float(a), ValueKind::Float(b)) => Ok(self.derive(ValueKind::Float(a + b))),
            (ValueKind::Str(a), ValueKind::Str(b)) => {
                Ok(self.derive(ValueKind::Str(format!("{a}{b}"))))
            }
            (ValueKind::List(elements), _) => {
                let mut elements = elements.clone();
                elements.push(other.clone());
                Ok(self.derive(ValueKind::List(elements)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, Error> {
        match (&self.kind, &other.kind) {
            (ValueKind::Int(a), ValueKind::Int(b)) => Ok(self.derive(ValueKind::Int(a.wrapping_sub(*b)))),
            (ValueKind::Float(a), ValueKind::Float(b)) => Ok(self.derive(ValueKind::Float(a - b))),
            // String subtraction removes the first occurrence of the right
            // operand.
            (ValueKind::Str(a), ValueKind::Str(b)) => {
                Ok(self.derive(ValueKind::Str(a.replacen(b.as_str(), "", 1))))
            }
            // List subtraction removes the element at the given index.
            (ValueKind::List(elements), ValueKind::Int(idx)) => {
                let Some(i) = resolve_index(elements.len(), *idx) else {
                    return Err(
                        self.runtime_error(self.span.merge(other.span), "Index out of bounds")
                    );
                };
                let mut elements = elements.clone();
                elements.remove(i);
                Ok(self.derive(ValueKind::List(elements)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, Error> {
        match (&self.kind, &other.kind) {
            (ValueKind::Int(a), ValueKind::Int(b)) => Ok(self.derive(ValueKind::Int(a.wrapping_mul(*b)))),
            (ValueKind::Float(a), ValueKind::Float(b)) => Ok(self.derive(ValueKind::Float(a * b))),
            // String repetition; a non-positive count yields the empty string.
            (ValueKind::Str(a), ValueKind::Int(n)) => {
                Ok(self.derive(ValueKind::Str(a.repeat((*n).max(0) as usize))))
            }
            // List multiplication concatenates.
            (ValueKind::List(a), ValueKind::List(b)) => {
                let mut elements = a.clone();
                elements.extend(b.iter().cloned());
                Ok(self.derive(ValueKind::List(elements)))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn divide(&self, other: &Value) -> Result<Value, Error> {
        match (&self.kind, &other.kind) {
            (ValueKind::Int(a), ValueKind::Int(b)) => {
                if *b == 0 {
                    return Err(self.runtime_error(other.span, "Cannot divide by zero"));
                }
                Ok(self.derive(ValueKind::Int(a.wrapping_div(*b))))
            }
            (ValueKind::Float(a), ValueKind::Float(b)) => {
                if *b == 0.0 {
                    return Err(self.runtime_error(other.span, "Cannot divide by zero"));
                }
                Ok(self.derive(ValueKind::Float(a / b)))
            }
            // List division is element access.
            (ValueKind::List(elements), ValueKind::Int(idx)) => {
                let Some(i) = resolve_index(elements.len(), *idx) else {
                    return Err(
                        self.runtime_error(self.span.merge(other.span), "Index out of bounds")
                    );
                };
                Ok(elements[i].clone())
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn power(&self, other: &Value) -> Result<Value, Error> {
        match (&self.kind, &other.kind) {
            (ValueKind::Int(a), ValueKind::Int(b)) => {
                if *b >= 0 {
                    let exp = (*b).min(u32::MAX as i64) as u32;
                    Ok(self.derive(ValueKind::Int(a.wrapping_pow(exp))))
                } else {
                    // A negative exponent leaves the integers.
                    Ok(self.derive(ValueKind::Float((*a as f64).powf(*b as f64))))
                }
            }
            (ValueKind::Float(a), ValueKind::Float(b)) => {
                Ok(self.derive(ValueKind::Float(a.powf(*b))))
            }
            _ => Err(self.illegal_operation(other)),
        }
    }

    /// Unary minus.
    pub fn negate(&self) -> Result<Value, Error> {
        match &self.kind {
            ValueKind::Int(n) => Ok(self.derive(ValueKind::Int(n.wrapping_neg()))),
            ValueKind::Float(f) => Ok(self.derive(ValueKind::Float(-f))),
            _ => Err(self.illegal_unary()),
        }
    }

    // ── Comparison ─────────────────────────────────────────────────────

    pub fn compare_eq(&self, other: &Value) -> Result<Value, Error> {
        self.compare(other, |o| o == std::cmp::Ordering::Equal)
    }

    pub fn compare_ne(&self, other: &Value) -> Result<Value, Error> {
        self.compare(other, |o| o != std::cmp::Ordering::Equal)
    }

    pub fn compare_lt(&self, other: &Value) -> Result<Value, Error> {
        self.compare(other, |o| o == std::cmp::Ordering::Less)
    }

    pub fn compare_gt(&self, other: &Value) -> Result<Value, Error> {
        self.compare(other, |o| o == std::cmp::Ordering::Greater)
    }

    pub fn compare_lte(&self, other: &Value) -> Result<Value, Error> {
        self.compare(other, |o| o != std::cmp::Ordering::Greater)
    }

    pub fn compare_gte(&self, other: &Value) -> Result<Value, Error> {
        self.compare(other, |o| o != std::cmp::Ordering::Less)
    }

    fn compare(
        &self,
        other: &Value,
        accept: impl Fn(std::cmp::Ordering) -> bool,
    ) -> Result<Value, Error> {
        let ordering = match (&self.kind, &other.kind) {
            (ValueKind::Int(a), ValueKind::Int(b)) => a.cmp(b),
            (ValueKind::Float(a), ValueKind::Float(b)) => {
                a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Greater)
            }
            _ => return Err(self.illegal_operation(other)),
        };
        Ok(self.derive(ValueKind::Bool(accept(ordering))))
    }

    // ── Logic ──────────────────────────────────────────────────────────

    /// `and` over operand truthiness.
    pub fn and_(&self, other: &Value) -> Result<Value, Error> {
        Ok(self.derive(ValueKind::Bool(self.is_true() && other.is_true())))
    }

    /// `or` over operand truthiness.
    pub fn or_(&self, other: &Value) -> Result<Value, Error> {
        Ok(self.derive(ValueKind::Bool(self.is_true() || other.is_true())))
    }

    /// `not` inverts truthiness.
    pub fn not_(&self) -> Result<Value, Error> {
        Ok(self.derive(ValueKind::Bool(!self.is_true())))
    }

    /// A result value inheriting this value's span and context.
    fn derive(&self, kind: ValueKind) -> Value {
        Value::new(kind, self.span, self.ctx.clone())
    }
}

/// Resolve a possibly-negative index against a list length.
fn resolve_index(len: usize, idx: i64) -> Option<usize> {
    let resolved = if idx < 0 { idx + len as i64 } else { idx };
    if (0..len as i64).contains(&resolved) {
        Some(resolved as usize)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Null => write!(f, "Null"),
            ValueKind::Bool(true) => write!(f, "True"),
            ValueKind::Bool(false) => write!(f, "False"),
            ValueKind::Int(n) => write!(f, "{n}"),
            ValueKind::Float(v) => {
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            ValueKind::Str(s) => write!(f, "{s}"),
            ValueKind::List(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            ValueKind::Function(func) => write!(f, "<function {}>", func.display_name()),
            ValueKind::SystemFunction(func) => write!(f, "<system function {}>", func.name()),
            ValueKind::Type(tag) => write!(f, "<{tag}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Value {
        Value::int(v, Span::new(0, 1), None)
    }

    fn float(v: f64) -> Value {
        Value::float(v, Span::new(0, 1), None)
    }

    fn string(s: &str) -> Value {
        Value::str(s, Span::new(0, 1), None)
    }

    fn list(elements: Vec<Value>) -> Value {
        Value::list(elements, Span::new(0, 1), None)
    }

    #[test]
    fn int_arithmetic() {
        assert_eq!(int(2).add(&int(3)).unwrap().kind, ValueKind::Int(5));
        assert_eq!(int(2).subtract(&int(3)).unwrap().kind, ValueKind::Int(-1));
        assert_eq!(int(2).multiply(&int(3)).unwrap().kind, ValueKind::Int(6));
        assert_eq!(int(7).divide(&int(2)).unwrap().kind, ValueKind::Int(3));
        assert_eq!(int(2).power(&int(9)).unwrap().kind, ValueKind::Int(512));
    }

    #[test]
    fn float_arithmetic() {
        assert_eq!(
            float(1.5).add(&float(2.5)).unwrap().kind,
            ValueKind::Float(4.0)
        );
        assert_eq!(
            float(9.0).divide(&float(2.0)).unwrap().kind,
            ValueKind::Float(4.5)
        );
    }

    #[test]
    fn mixed_numeric_arithmetic_is_illegal() {
        let err = int(1).add(&float(2.0)).unwrap_err();
        assert_eq!(err.details, "Illegal operation");
    }

    #[test]
    fn divide_by_zero() {
        let err = int(1).divide(&int(0)).unwrap_err();
        assert_eq!(err.details, "Cannot divide by zero");
        let err = float(1.0).divide(&float(0.0)).unwrap_err();
        assert_eq!(err.details, "Cannot divide by zero");
    }

    #[test]
    fn negative_exponent_leaves_the_integers() {
        assert_eq!(int(2).power(&int(-1)).unwrap().kind, ValueKind::Float(0.5));
    }

    #[test]
    fn string_operators() {
        assert_eq!(
            string("ab").add(&string("cd")).unwrap().kind,
            ValueKind::Str("abcd".to_string())
        );
        assert_eq!(
            string("ab").multiply(&int(3)).unwrap().kind,
            ValueKind::Str("ababab".to_string())
        );
        // Subtraction removes only the first occurrence.
        assert_eq!(
            string("banana").subtract(&string("an")).unwrap().kind,
            ValueKind::Str("bana".to_string())
        );
        assert!(string("ab").subtract(&int(1)).is_err());
    }

    #[test]
    fn list_operators() {
        let l = list(vec![int(1), int(2)]);

        let appended = l.add(&int(3)).unwrap();
        assert_eq!(
            appended.kind,
            ValueKind::List(vec![int(1), int(2), int(3)])
        );

        let removed = l.subtract(&int(0)).unwrap();
        assert_eq!(removed.kind, ValueKind::List(vec![int(2)]));

        let joined = l.multiply(&list(vec![int(3)])).unwrap();
        assert_eq!(joined.kind, ValueKind::List(vec![int(1), int(2), int(3)]));

        let element = l.divide(&int(1)).unwrap();
        assert_eq!(element.kind, ValueKind::Int(2));

        // Negative indices count from the end.
        let last = l.divide(&int(-1)).unwrap();
        assert_eq!(last.kind, ValueKind::Int(2));

        let err = l.divide(&int(5)).unwrap_err();
        assert_eq!(err.details, "Index out of bounds");
        let err = l.subtract(&int(-3)).unwrap_err();
        assert_eq!(err.details, "Index out of bounds");
    }

    #[test]
    fn comparisons_yield_bools() {
        assert_eq!(int(1).compare_lt(&int(2)).unwrap().kind, ValueKind::Bool(true));
        assert_eq!(int(2).compare_lte(&int(2)).unwrap().kind, ValueKind::Bool(true));
        assert_eq!(int(3).compare_eq(&int(4)).unwrap().kind, ValueKind::Bool(false));
        assert_eq!(int(3).compare_ne(&int(4)).unwrap().kind, ValueKind::Bool(true));
        assert_eq!(
            float(1.5).compare_gt(&float(1.0)).unwrap().kind,
            ValueKind::Bool(true)
        );
        assert!(int(1).compare_eq(&string("1")).is_err());
    }

    #[test]
    fn logic_uses_truthiness() {
        assert_eq!(
            int(1).and_(&string("x")).unwrap().kind,
            ValueKind::Bool(true)
        );
        assert_eq!(int(0).or_(&int(0)).unwrap().kind, ValueKind::Bool(false));
        assert_eq!(int(0).not_().unwrap().kind, ValueKind::Bool(true));
        assert_eq!(string("x").not_().unwrap().kind, ValueKind::Bool(false));
    }

    #[test]
    fn truthiness_table() {
        assert!(!Value::null(Span::point(0), None).is_true());
        assert!(!Value::bool(false, Span::point(0), None).is_true());
        assert!(Value::bool(true, Span::point(0), None).is_true());
        assert!(!int(0).is_true());
        assert!(int(-1).is_true());
        assert!(!float(0.0).is_true());
        assert!(!string("").is_true());
        assert!(string("x").is_true());
        assert!(list(vec![]).is_true());
    }

    #[test]
    fn negate_numbers_only() {
        assert_eq!(int(5).negate().unwrap().kind, ValueKind::Int(-5));
        assert_eq!(float(2.5).negate().unwrap().kind, ValueKind::Float(-2.5));
        assert!(string("x").negate().is_err());
    }

    #[test]
    fn display_forms() {
        assert_eq!(int(5).to_string(), "5");
        assert_eq!(float(3.0).to_string(), "3.0");
        assert_eq!(float(3.25).to_string(), "3.25");
        assert_eq!(string("hi").to_string(), "hi");
        assert_eq!(Value::null(Span::point(0), None).to_string(), "Null");
        assert_eq!(Value::bool(true, Span::point(0), None).to_string(), "True");
        assert_eq!(list(vec![int(1), int(2)]).to_string(), "[1, 2]");
        assert_eq!(
            Value::new(ValueKind::Type(TypeTag::Int), Span::point(0), None).to_string(),
            "<Int>"
        );
    }

    #[test]
    fn type_tags() {
        assert_eq!(int(1).type_tag(), TypeTag::Int);
        assert_eq!(float(1.0).type_tag(), TypeTag::Float);
        assert_eq!(string("").type_tag(), TypeTag::String);
        assert_eq!(list(vec![]).type_tag(), TypeTag::List);
        assert_eq!(Value::null(Span::point(0), None).type_tag(), TypeTag::Null);
    }
}
