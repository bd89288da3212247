//! Built-in system functions.
//!
//! Each built-in is a [`SystemFn`] variant bound at global scope as a
//! `SystemFunction` value and dispatched here by name. Like user functions,
//! a call gets a fresh context with the declared parameter names bound by
//! position, and the same arity errors.

use std::io::Write;
use std::rc::Rc;

use tython_common::error::Error;
use tython_common::span::Span;

use crate::context::Context;
use crate::eval::eval;
use crate::result::RuntimeResult;
use crate::value::{Value, ValueKind};

/// The built-in function table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemFn {
    Print,
    Input,
    InputInt,
    Clear,
    Type,
    Len,
    Run,
    Return,
}

impl SystemFn {
    /// All built-ins, for pre-binding the global table.
    pub const ALL: [SystemFn; 8] = [
        SystemFn::Print,
        SystemFn::Input,
        SystemFn::InputInt,
        SystemFn::Clear,
        SystemFn::Type,
        SystemFn::Len,
        SystemFn::Run,
        SystemFn::Return,
    ];

    /// The global name the built-in is bound to.
    pub fn name(self) -> &'static str {
        match self {
            SystemFn::Print => "print",
            SystemFn::Input => "input",
            SystemFn::InputInt => "input_int",
            SystemFn::Clear => "clear",
            SystemFn::Type => "type",
            SystemFn::Len => "len",
            SystemFn::Run => "run",
            SystemFn::Return => "return",
        }
    }

    /// Declared parameter names, bound by position at the call.
    pub fn params(self) -> &'static [&'static str] {
        match self {
            SystemFn::Print | SystemFn::Type | SystemFn::Return => &["value"],
            SystemFn::Len => &["list"],
            SystemFn::Run => &["fn"],
            SystemFn::Input | SystemFn::InputInt | SystemFn::Clear => &[],
        }
    }
}

/// Execute a built-in with already-evaluated arguments.
///
/// `ctx` is the calling context; the built-in runs in a fresh child of it.
pub fn execute(
    func: SystemFn,
    args: Vec<Value>,
    call_span: Span,
    ctx: &Rc<Context>,
) -> RuntimeResult {
    let res = RuntimeResult::new();
    let exec_ctx = Context::child(func.name(), ctx, call_span);

    let params = func.params();
    if args.len() > params.len() {
        return res.failure(runtime_error(
            &exec_ctx,
            call_span,
            format!(
                "too many args passed into '{}' (Expected {})",
                func.name(),
                params.len()
            ),
        ));
    }
    if args.len() < params.len() {
        return res.failure(runtime_error(
            &exec_ctx,
            call_span,
            format!(
                "too few args passed into '{}' (Expected {})",
                func.name(),
                params.len()
            ),
        ));
    }
    for (param, arg) in params.iter().zip(args) {
        let span = arg.span;
        let arg = arg.stamped(span, &exec_ctx);
        exec_ctx.symbols.borrow_mut().set(*param, arg);
    }

    match func {
        SystemFn::Print => execute_print(&exec_ctx, call_span, res),
        SystemFn::Input => execute_input(&exec_ctx, call_span, res),
        SystemFn::InputInt => execute_input_int(&exec_ctx, call_span, res),
        SystemFn::Clear => execute_clear(&exec_ctx, call_span, res),
        SystemFn::Type => execute_type(&exec_ctx, call_span, res),
        SystemFn::Len => execute_len(&exec_ctx, call_span, res),
        SystemFn::Run => execute_run(&exec_ctx, call_span, res),
        SystemFn::Return => execute_return(&exec_ctx, call_span, res),
    }
}

fn runtime_error(ctx: &Rc<Context>, span: Span, details: impl Into<String>) -> Error {
    Error::runtime(span, details, ctx.traceback(span))
}

fn bound_arg(ctx: &Rc<Context>, name: &str) -> Value {
    ctx.symbols
        .borrow()
        .get(name)
        .expect("arity check binds every declared parameter")
}

// ── Handlers ───────────────────────────────────────────────────────────

fn execute_print(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    println!("{}", bound_arg(ctx, "value"));
    res.success(Value::null(span, Some(Rc::clone(ctx))))
}

fn execute_input(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    match read_line() {
        Some(text) => res.success(Value::str(text, span, Some(Rc::clone(ctx)))),
        None => res.failure(runtime_error(ctx, span, "Failed to read input")),
    }
}

fn execute_input_int(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    loop {
        let Some(text) = read_line() else {
            return res.failure(runtime_error(ctx, span, "Failed to read input"));
        };
        match text.parse::<i64>() {
            Ok(number) => {
                return res.success(Value::int(number, span, Some(Rc::clone(ctx))));
            }
            Err(_) => println!("'{text}' must be of type <Int>"),
        }
    }
}

fn execute_clear(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    // ANSI clear screen + cursor home.
    print!("\x1b[2J\x1b[1;1H");
    let _ = std::io::stdout().flush();
    res.success(Value::null(span, Some(Rc::clone(ctx))))
}

fn execute_type(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    let value = bound_arg(ctx, "value");
    res.success(Value::new(
        ValueKind::Type(value.type_tag()),
        span,
        Some(Rc::clone(ctx)),
    ))
}

fn execute_len(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    let value = bound_arg(ctx, "list");
    let ValueKind::List(elements) = &value.kind else {
        return res.failure(runtime_error(
            ctx,
            span,
            "Argument must be of type <List>",
        ));
    };
    res.success(Value::int(
        elements.len() as i64,
        span,
        Some(Rc::clone(ctx)),
    ))
}

/// Load a script file and run it against the root symbol table of the
/// current context chain, so its definitions persist in the session.
fn execute_run(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    let value = bound_arg(ctx, "fn");
    let ValueKind::Str(filename) = &value.kind else {
        return res.failure(runtime_error(
            ctx,
            span,
            "Argument must be of type <String>",
        ));
    };

    let source = match std::fs::read_to_string(filename) {
        Ok(source) => source,
        Err(err) => {
            return res.failure(runtime_error(
                ctx,
                span,
                format!("Failed to load script \"{filename}\"\n{err}"),
            ));
        }
    };

    let failed = |error: &Error| {
        runtime_error(
            ctx,
            span,
            format!(
                "Failed to finish executing script \"{filename}\"\n{}",
                error.render(filename, &source)
            ),
        )
    };

    let ast = match tython_parser::parse(&source) {
        Ok(ast) => ast,
        Err(err) => return res.failure(failed(&err)),
    };

    let script_ctx = Context::program(ctx.root_symbols());
    let mut script_res = eval(&ast, &script_ctx);
    if let Some(err) = script_res.error.take() {
        return res.failure(failed(&err));
    }

    res.success(Value::null(span, Some(Rc::clone(ctx))))
}

/// Type-preserving identity for primitive kinds; anything else stringifies.
fn execute_return(ctx: &Rc<Context>, span: Span, res: RuntimeResult) -> RuntimeResult {
    let value = bound_arg(ctx, "value");
    let kind = match &value.kind {
        ValueKind::Int(n) => ValueKind::Int(*n),
        ValueKind::Float(v) => ValueKind::Float(*v),
        ValueKind::Str(s) => ValueKind::Str(s.clone()),
        ValueKind::Bool(b) => ValueKind::Bool(*b),
        _ => ValueKind::Str(value.to_string()),
    };
    res.success(Value::new(kind, span, Some(Rc::clone(ctx))))
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(_) => {
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            Some(line)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use tython_common::token::TypeTag;

    use crate::context::SymbolTable;

    fn program_ctx() -> Rc<Context> {
        Context::program(Rc::new(RefCell::new(SymbolTable::new())))
    }

    #[test]
    fn names_and_params() {
        assert_eq!(SystemFn::Print.name(), "print");
        assert_eq!(SystemFn::Print.params(), &["value"]);
        assert_eq!(SystemFn::InputInt.name(), "input_int");
        assert_eq!(SystemFn::InputInt.params().len(), 0);
        assert_eq!(SystemFn::Len.params(), &["list"]);
        assert_eq!(SystemFn::Run.params(), &["fn"]);
        assert_eq!(SystemFn::ALL.len(), 8);
    }

    #[test]
    fn type_reifies_the_argument_type() {
        let ctx = program_ctx();
        let args = vec![Value::int(3, Span::point(0), None)];
        let mut res = execute(SystemFn::Type, args, Span::point(0), &ctx);
        let value = res.value.take().expect("type() returns a value");
        assert_eq!(value.kind, ValueKind::Type(TypeTag::Int));
    }

    #[test]
    fn len_requires_a_list() {
        let ctx = program_ctx();
        let list = Value::list(
            vec![
                Value::int(1, Span::point(0), None),
                Value::int(2, Span::point(0), None),
            ],
            Span::point(0),
            None,
        );
        let mut res = execute(SystemFn::Len, vec![list], Span::point(0), &ctx);
        assert_eq!(res.value.take().unwrap().kind, ValueKind::Int(2));

        let res = execute(
            SystemFn::Len,
            vec![Value::int(1, Span::point(0), None)],
            Span::point(0),
            &ctx,
        );
        assert_eq!(
            res.error.unwrap().details,
            "Argument must be of type <List>"
        );
    }

    #[test]
    fn arity_is_checked() {
        let ctx = program_ctx();
        let res = execute(SystemFn::Print, vec![], Span::point(0), &ctx);
        assert_eq!(
            res.error.unwrap().details,
            "too few args passed into 'print' (Expected 1)"
        );

        let args = vec![
            Value::int(1, Span::point(0), None),
            Value::int(2, Span::point(0), None),
        ];
        let res = execute(SystemFn::Type, args, Span::point(0), &ctx);
        assert_eq!(
            res.error.unwrap().details,
            "too many args passed into 'type' (Expected 1)"
        );
    }

    #[test]
    fn return_is_identity_for_primitives() {
        let ctx = program_ctx();
        let mut res = execute(
            SystemFn::Return,
            vec![Value::float(1.5, Span::point(0), None)],
            Span::point(0),
            &ctx,
        );
        assert_eq!(res.value.take().unwrap().kind, ValueKind::Float(1.5));

        // Non-primitive values stringify.
        let list = Value::list(vec![Value::int(1, Span::point(0), None)], Span::point(0), None);
        let mut res = execute(SystemFn::Return, vec![list], Span::point(0), &ctx);
        assert_eq!(
            res.value.take().unwrap().kind,
            ValueKind::Str("[1]".to_string())
        );
    }

    #[test]
    fn run_reports_missing_files() {
        let ctx = program_ctx();
        let arg = Value::str("/nonexistent/script.ty", Span::point(0), None);
        let res = execute(SystemFn::Run, vec![arg], Span::point(0), &ctx);
        let err = res.error.unwrap();
        assert!(err
            .details
            .starts_with("Failed to load script \"/nonexistent/script.ty\""));
    }
}
