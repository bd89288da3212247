//! The tree-walking evaluator.
//!
//! One exhaustive match over node kinds. Every arm that evaluates a child
//! checks `should_return` afterwards so errors and `return`/`break`/
//! `continue` signals propagate without being inspected anywhere else.

use std::rc::Rc;

use tython_common::error::Error;
use tython_common::span::Span;
use tython_common::token::TypeTag;
use tython_parser::ast::{BinOp, Node, NodeKind, UnaryOp};

use crate::builtins;
use crate::context::Context;
use crate::result::RuntimeResult;
use crate::value::{FuncData, Value, ValueKind};

/// Evaluate a node in the given context.
pub fn eval(node: &Node, ctx: &Rc<Context>) -> RuntimeResult {
    let res = RuntimeResult::new();
    match &node.kind {
        NodeKind::Int(value) => res.success(Value::int(*value, node.span, Some(Rc::clone(ctx)))),
        NodeKind::Float(value) => {
            res.success(Value::float(*value, node.span, Some(Rc::clone(ctx))))
        }
        NodeKind::Str(value) => {
            res.success(Value::str(value.clone(), node.span, Some(Rc::clone(ctx))))
        }
        // A list literal and a statement block package their element values
        // the same way.
        NodeKind::List(elements) | NodeKind::Statements(elements) => {
            eval_elements(elements, node.span, ctx, res)
        }
        NodeKind::VarAccess(name) => eval_var_access(name, node.span, ctx, res),
        NodeKind::VarAssign {
            name,
            name_span,
            declared,
            value,
        } => eval_var_assign(name, *name_span, *declared, value, ctx, res),
        NodeKind::BinOp { left, op, right } => eval_bin_op(left, *op, right, node.span, ctx, res),
        NodeKind::UnaryOp { op, operand } => eval_unary_op(*op, operand, node.span, ctx, res),
        NodeKind::If { cases, else_case } => eval_if(cases, else_case, node.span, ctx, res),
        NodeKind::For {
            var,
            start,
            end,
            step,
            body,
            is_block,
        } => eval_for(var, start, end, step.as_deref(), body, *is_block, node.span, ctx, res),
        NodeKind::While {
            cond,
            body,
            is_block,
        } => eval_while(cond, body, *is_block, node.span, ctx, res),
        NodeKind::FuncDef {
            name,
            params,
            body,
            auto_return,
        } => eval_func_def(name, params, body, *auto_return, node.span, ctx, res),
        NodeKind::Call { callee, args } => eval_call(callee, args, node.span, ctx, res),
        NodeKind::Return(value) => eval_return(value.as_deref(), node.span, ctx, res),
        NodeKind::Continue => res.success_continue(),
        NodeKind::Break => res.success_break(),
    }
}

fn runtime_error(ctx: &Rc<Context>, span: Span, details: impl Into<String>) -> Error {
    Error::runtime(span, details, ctx.traceback(span))
}

// ── Visitors ───────────────────────────────────────────────────────────

fn eval_elements(
    elements: &[Node],
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        let value = res.register(eval(element, ctx));
        if res.should_return() {
            return res;
        }
        values.push(value.expect("no signal implies a value"));
    }
    res.success(Value::list(values, span, Some(Rc::clone(ctx))))
}

fn eval_var_access(
    name: &str,
    span: Span,
    ctx: &Rc<Context>,
    res: RuntimeResult,
) -> RuntimeResult {
    let value = ctx.symbols.borrow().get(name);
    match value {
        // Accessing a variable copies the stored value and re-stamps it to
        // the access site.
        Some(value) => res.success(value.stamped(span, ctx)),
        None => res.failure(runtime_error(ctx, span, format!("{name} is not defined"))),
    }
}

fn eval_var_assign(
    name: &str,
    name_span: Span,
    declared: TypeTag,
    value_node: &Node,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let value = res.register(eval(value_node, ctx));
    if res.should_return() {
        return res;
    }
    let value = value.expect("no signal implies a value");

    let actual = value.type_tag();
    let accepted = declared == TypeTag::Any
        || declared == actual
        || (declared == TypeTag::Number && matches!(actual, TypeTag::Int | TypeTag::Float));
    if !accepted {
        return res.failure(Error::type_error(
            name_span,
            format!(
                "Cannot assign value of type <{actual}> to variable '{name}' of type <{declared}>"
            ),
        ));
    }

    ctx.symbols.borrow_mut().set(name, value.clone());
    res.success(value)
}

fn eval_bin_op(
    left: &Node,
    op: BinOp,
    right: &Node,
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let left_value = res.register(eval(left, ctx));
    if res.should_return() {
        return res;
    }
    let left_value = left_value.expect("no signal implies a value");

    let right_value = res.register(eval(right, ctx));
    if res.should_return() {
        return res;
    }
    let right_value = right_value.expect("no signal implies a value");

    let outcome = match op {
        BinOp::Add => left_value.add(&right_value),
        BinOp::Sub => left_value.subtract(&right_value),
        BinOp::Mul => left_value.multiply(&right_value),
        BinOp::Div => left_value.divide(&right_value),
        BinOp::Pow => left_value.power(&right_value),
        BinOp::Eq => left_value.compare_eq(&right_value),
        BinOp::Ne => left_value.compare_ne(&right_value),
        BinOp::Lt => left_value.compare_lt(&right_value),
        BinOp::Gt => left_value.compare_gt(&right_value),
        BinOp::Le => left_value.compare_lte(&right_value),
        BinOp::Ge => left_value.compare_gte(&right_value),
        BinOp::And => left_value.and_(&right_value),
        BinOp::Or => left_value.or_(&right_value),
    };
    match outcome {
        Ok(value) => res.success(value.stamped(span, ctx)),
        Err(err) => res.failure(err),
    }
}

fn eval_unary_op(
    op: UnaryOp,
    operand: &Node,
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let value = res.register(eval(operand, ctx));
    if res.should_return() {
        return res;
    }
    let value = value.expect("no signal implies a value");

    let outcome = match op {
        UnaryOp::Neg => value.negate(),
        UnaryOp::Not => value.not_(),
        // Unary plus passes the operand through unchanged.
        UnaryOp::Pos => Ok(value),
    };
    match outcome {
        Ok(value) => res.success(value.stamped(span, ctx)),
        Err(err) => res.failure(err),
    }
}

fn eval_if(
    cases: &[tython_parser::ast::IfCase],
    else_case: &Option<Box<tython_parser::ast::ElseCase>>,
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    for case in cases {
        let cond = res.register(eval(&case.cond, ctx));
        if res.should_return() {
            return res;
        }
        if !cond.expect("no signal implies a value").is_true() {
            continue;
        }

        let value = res.register(eval(&case.body, ctx));
        if res.should_return() {
            return res;
        }
        return res.success(if case.is_block {
            Value::null(span, Some(Rc::clone(ctx)))
        } else {
            value.expect("no signal implies a value")
        });
    }

    if let Some(else_case) = else_case {
        let value = res.register(eval(&else_case.body, ctx));
        if res.should_return() {
            return res;
        }
        return res.success(if else_case.is_block {
            Value::null(span, Some(Rc::clone(ctx)))
        } else {
            value.expect("no signal implies a value")
        });
    }

    res.success(Value::null(span, Some(Rc::clone(ctx))))
}

#[allow(clippy::too_many_arguments)]
fn eval_for(
    var: &str,
    start: &Node,
    end: &Node,
    step: Option<&Node>,
    body: &Node,
    is_block: bool,
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let start_value = res.register(eval(start, ctx));
    if res.should_return() {
        return res;
    }
    let end_value = res.register(eval(end, ctx));
    if res.should_return() {
        return res;
    }
    let step_value = match step {
        Some(step) => {
            let value = res.register(eval(step, ctx));
            if res.should_return() {
                return res;
            }
            value
        }
        None => Some(Value::int(1, span, Some(Rc::clone(ctx)))),
    };

    let bounds = (
        as_int(&start_value, start.span),
        as_int(&end_value, end.span),
        as_int(&step_value, step.map(|s| s.span).unwrap_or(span)),
    );
    let (mut i, end_bound, step_bound) = match bounds {
        (Ok(a), Ok(b), Ok(c)) => (a, b, c),
        (Err(bad_span), ..) | (_, Err(bad_span), _) | (.., Err(bad_span)) => {
            return res.failure(runtime_error(
                ctx,
                bad_span,
                "For loop bounds must be of type <Int>",
            ));
        }
    };

    let mut elements = Vec::new();
    loop {
        let keep_going = if step_bound >= 0 {
            i < end_bound
        } else {
            i > end_bound
        };
        if !keep_going {
            break;
        }

        ctx.symbols
            .borrow_mut()
            .set(var, Value::int(i, span, Some(Rc::clone(ctx))));
        i = i.wrapping_add(step_bound);

        let value = res.register(eval(body, ctx));
        if res.should_return() && !res.loop_should_continue && !res.loop_should_break {
            return res;
        }
        if res.loop_should_continue {
            continue;
        }
        if res.loop_should_break {
            break;
        }
        if !is_block {
            elements.push(value.expect("no signal implies a value"));
        }
    }

    res.success(if is_block {
        Value::null(span, Some(Rc::clone(ctx)))
    } else {
        Value::list(elements, span, Some(Rc::clone(ctx)))
    })
}

fn eval_while(
    cond: &Node,
    body: &Node,
    is_block: bool,
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let mut elements = Vec::new();
    loop {
        let cond_value = res.register(eval(cond, ctx));
        if res.should_return() {
            return res;
        }
        if !cond_value.expect("no signal implies a value").is_true() {
            break;
        }

        let value = res.register(eval(body, ctx));
        if res.should_return() && !res.loop_should_continue && !res.loop_should_break {
            return res;
        }
        if res.loop_should_continue {
            continue;
        }
        if res.loop_should_break {
            break;
        }
        if !is_block {
            elements.push(value.expect("no signal implies a value"));
        }
    }

    res.success(if is_block {
        Value::null(span, Some(Rc::clone(ctx)))
    } else {
        Value::list(elements, span, Some(Rc::clone(ctx)))
    })
}

fn eval_func_def(
    name: &Option<String>,
    params: &[String],
    body: &Node,
    auto_return: bool,
    span: Span,
    ctx: &Rc<Context>,
    res: RuntimeResult,
) -> RuntimeResult {
    let func = Value::new(
        ValueKind::Function(Rc::new(FuncData {
            name: name.clone(),
            params: params.to_vec(),
            body: body.clone(),
            def_ctx: Rc::clone(ctx),
            auto_return,
        })),
        span,
        Some(Rc::clone(ctx)),
    );

    if let Some(name) = name {
        ctx.symbols.borrow_mut().set(name.clone(), func.clone());
    }
    res.success(func)
}

fn eval_call(
    callee: &Node,
    args: &[Node],
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let callee_value = res.register(eval(callee, ctx));
    if res.should_return() {
        return res;
    }
    let callee_value = callee_value
        .expect("no signal implies a value")
        .stamped(span, ctx);

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        let value = res.register(eval(arg, ctx));
        if res.should_return() {
            return res;
        }
        arg_values.push(value.expect("no signal implies a value"));
    }

    let call_res = match &callee_value.kind {
        ValueKind::Function(func) => call_function(func, arg_values, span),
        ValueKind::SystemFunction(func) => builtins::execute(*func, arg_values, span, ctx),
        _ => {
            return res.failure(runtime_error(ctx, span, "Illegal operation"));
        }
    };

    let value = res.register(call_res);
    if res.should_return() {
        return res;
    }
    let value = value.expect("no signal implies a value").stamped(span, ctx);
    res.success(value)
}

/// Execute a user-defined function.
///
/// The fresh context chains to the function's *definition* context, which
/// is what makes scoping lexical and closures work.
fn call_function(func: &Rc<FuncData>, args: Vec<Value>, call_span: Span) -> RuntimeResult {
    let mut res = RuntimeResult::new();
    let exec_ctx = Context::child(func.display_name(), &func.def_ctx, call_span);

    if args.len() > func.params.len() {
        return res.failure(runtime_error(
            &exec_ctx,
            call_span,
            format!(
                "too many args passed into '{}' (Expected {})",
                func.display_name(),
                func.params.len()
            ),
        ));
    }
    if args.len() < func.params.len() {
        return res.failure(runtime_error(
            &exec_ctx,
            call_span,
            format!(
                "too few args passed into '{}' (Expected {})",
                func.display_name(),
                func.params.len()
            ),
        ));
    }

    for (param, arg) in func.params.iter().zip(args) {
        let arg_span = arg.span;
        let arg = arg.stamped(arg_span, &exec_ctx);
        exec_ctx.symbols.borrow_mut().set(param.clone(), arg);
    }

    let body_value = res.register(eval(&func.body, &exec_ctx));
    if res.error.is_some() {
        return res;
    }

    // Return value: the body value for `-> expr` functions, else a pending
    // `return`, else Null. Loop signals die at the function boundary.
    let body_value = if func.auto_return { body_value } else { None };
    let ret = body_value
        .or_else(|| res.func_return_value.take())
        .unwrap_or_else(|| Value::null(call_span, Some(Rc::clone(&exec_ctx))));
    res.success(ret)
}

fn eval_return(
    value: Option<&Node>,
    span: Span,
    ctx: &Rc<Context>,
    mut res: RuntimeResult,
) -> RuntimeResult {
    let value = match value {
        Some(node) => {
            let value = res.register(eval(node, ctx));
            if res.should_return() {
                return res;
            }
            value.expect("no signal implies a value")
        }
        None => Value::null(span, Some(Rc::clone(ctx))),
    };
    res.success_return(value)
}

/// Extract an `Int` loop bound, reporting the offending span otherwise.
fn as_int(value: &Option<Value>, span: Span) -> Result<i64, Span> {
    match value.as_ref().map(|v| &v.kind) {
        Some(ValueKind::Int(n)) => Ok(*n),
        _ => Err(span),
    }
}
