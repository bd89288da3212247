// Tython parser -- recursive descent over the token stream.
//
// Each grammar production is a method returning a `ParseResult`. The
// explicit advance-count bookkeeping in the result envelope is what makes
// speculative parsing work: `statements` optimistically tries another
// statement after a run of newlines and rewinds when it does not parse, and
// `return` optimistically tries to parse a return value.

pub mod ast;
mod result;

pub use result::ParseResult;

use tython_common::error::Error;
use tython_common::span::Span;
use tython_common::token::{Keyword, Token, TokenKind};

use ast::{BinOp, ElseCase, IfCase, Node, NodeKind, UnaryOp};

/// Lex and parse source text into the top-level `Statements` node.
pub fn parse(source: &str) -> Result<Node, Error> {
    let tokens = tython_lexer::Lexer::tokenize(source)?;
    parse_tokens(tokens)
}

/// Parse a token stream (which must end in `Eof`) into the AST root.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, Error> {
    let mut parser = Parser::new(tokens);
    let mut res = parser.statements();
    if res.error.is_none() && parser.current().kind != TokenKind::Eof {
        res = res.failure(Error::syntax(
            parser.current().span,
            "Expected '+', '-', '*', '/', or '^'",
        ));
    }
    match res.error {
        Some(err) => Err(err),
        None => Ok(res.node.expect("successful parse produces a node")),
    }
}

struct Parser {
    tokens: Vec<Token>,
    tok_idx: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)),
            "token stream must end in Eof"
        );
        Self { tokens, tok_idx: 0 }
    }

    // ── Token access ───────────────────────────────────────────────────

    fn current(&self) -> &Token {
        &self.tokens[self.tok_idx]
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    /// Move to the next token. Stays put on the trailing `Eof`.
    fn advance(&mut self) {
        if self.tok_idx + 1 < self.tokens.len() {
            self.tok_idx += 1;
        }
    }

    /// Rewind after a failed speculative parse.
    fn reverse(&mut self, amount: usize) {
        self.tok_idx = self.tok_idx.saturating_sub(amount);
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.current().is_keyword(kw)
    }

    // ── Grammar ────────────────────────────────────────────────────────

    /// `NEWLINE* statement (NEWLINE+ statement)* NEWLINE*`
    fn statements(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let mut statements = Vec::new();
        let start = self.current_span();

        while self.current().kind == TokenKind::Newline {
            res.register_advancement();
            self.advance();
        }

        let first = self.statement();
        let Some(stmt) = res.register(first) else {
            return res;
        };
        statements.push(stmt);

        loop {
            let mut newline_count = 0;
            while self.current().kind == TokenKind::Newline {
                res.register_advancement();
                self.advance();
                newline_count += 1;
            }
            if newline_count == 0 {
                break;
            }

            let attempt = self.statement();
            let Some(stmt) = res.try_register(attempt) else {
                let rewind = res.to_reverse_count;
                self.reverse(rewind);
                break;
            };
            statements.push(stmt);
        }

        let end = statements.last().map(|s| s.span).unwrap_or(start);
        res.success(Node::new(NodeKind::Statements(statements), start.merge(end)))
    }

    /// `KW:return expr? | KW:continue | KW:break | expr`
    fn statement(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let start = self.current_span();

        if self.at_keyword(Keyword::Return) {
            res.register_advancement();
            self.advance();

            let attempt = self.expr();
            let value = res.try_register(attempt);
            if value.is_none() {
                let rewind = res.to_reverse_count;
                self.reverse(rewind);
            }
            let span = value.as_ref().map(|v| start.merge(v.span)).unwrap_or(start);
            return res.success(Node::new(NodeKind::Return(value.map(Box::new)), span));
        }

        if self.at_keyword(Keyword::Continue) {
            res.register_advancement();
            self.advance();
            return res.success(Node::new(NodeKind::Continue, start));
        }

        if self.at_keyword(Keyword::Break) {
            res.register_advancement();
            self.advance();
            return res.success(Node::new(NodeKind::Break, start));
        }

        let expr = self.expr();
        let node = res.register(expr);
        if res.error.is_some() {
            return res.failure(Error::syntax(
                start,
                "Expected expression, 'return', 'continue', or 'break'",
            ));
        }
        res.success(node.expect("no error implies a node"))
    }

    /// `TYPE IDENTIFIER EQ expr | comp_expr ((KW:and|KW:or) comp_expr)*`
    fn expr(&mut self) -> ParseResult {
        let mut res = ParseResult::new();

        if let TokenKind::TypeName(declared) = self.current().kind.clone() {
            res.register_advancement();
            self.advance();

            let name_tok = self.current().clone();
            let TokenKind::Ident(name) = name_tok.kind else {
                return res.failure(Error::syntax(name_tok.span, "Expected identifier"));
            };
            res.register_advancement();
            self.advance();

            if self.current().kind != TokenKind::Eq {
                return res.failure(Error::syntax(self.current_span(), "Expected '='"));
            }
            res.register_advancement();
            self.advance();

            let value = self.expr();
            let Some(value) = res.register(value) else {
                return res;
            };
            let span = name_tok.span.merge(value.span);
            return res.success(Node::new(
                NodeKind::VarAssign {
                    name,
                    name_span: name_tok.span,
                    declared,
                    value: Box::new(value),
                },
                span,
            ));
        }

        let inner = self.bin_op(Self::comp_expr, &[BinOp::And, BinOp::Or], Self::comp_expr);
        let node = res.register(inner);
        if res.error.is_some() {
            return res.failure(Error::syntax(self.current_span(), "Expected expression"));
        }
        res.success(node.expect("no error implies a node"))
    }

    /// `KW:not comp_expr | arith ((EE|NE|LT|GT|LTE|GTE) arith)*`
    fn comp_expr(&mut self) -> ParseResult {
        let mut res = ParseResult::new();

        if self.at_keyword(Keyword::Not) {
            let op_span = self.current_span();
            res.register_advancement();
            self.advance();

            let inner = self.comp_expr();
            let Some(operand) = res.register(inner) else {
                return res;
            };
            let span = op_span.merge(operand.span);
            return res.success(Node::new(
                NodeKind::UnaryOp {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        let inner = self.bin_op(
            Self::arith_expr,
            &[BinOp::Eq, BinOp::Ne, BinOp::Lt, BinOp::Gt, BinOp::Le, BinOp::Ge],
            Self::arith_expr,
        );
        let node = res.register(inner);
        if res.error.is_some() {
            return res.failure(Error::syntax(
                self.current_span(),
                "Expected int, float, identifier, '+', '-', '(', or 'not'",
            ));
        }
        res.success(node.expect("no error implies a node"))
    }

    /// `term ((PLUS|MINUS) term)*`
    fn arith_expr(&mut self) -> ParseResult {
        self.bin_op(Self::term, &[BinOp::Add, BinOp::Sub], Self::term)
    }

    /// `factor ((MUL|DIV) factor)*`
    fn term(&mut self) -> ParseResult {
        self.bin_op(Self::factor, &[BinOp::Mul, BinOp::Div], Self::factor)
    }

    /// `(PLUS|MINUS) factor | power`
    fn factor(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let tok_span = self.current_span();

        let op = match self.current().kind {
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            res.register_advancement();
            self.advance();

            let inner = self.factor();
            let Some(operand) = res.register(inner) else {
                return res;
            };
            let span = tok_span.merge(operand.span);
            return res.success(Node::new(
                NodeKind::UnaryOp {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        self.power()
    }

    /// `call (POWER factor)*` -- the `factor` right-hand side makes `^`
    /// right-associative.
    fn power(&mut self) -> ParseResult {
        self.bin_op(Self::call, &[BinOp::Pow], Self::factor)
    }

    /// `atom (LPAREN (expr (COMMA expr)*)? RPAREN)?`
    fn call(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let atom = self.atom();
        let Some(callee) = res.register(atom) else {
            return res;
        };

        if self.current().kind != TokenKind::LParen {
            return res.success(callee);
        }
        res.register_advancement();
        self.advance();

        let mut args = Vec::new();
        let rparen_span;

        if self.current().kind == TokenKind::RParen {
            rparen_span = self.current_span();
            res.register_advancement();
            self.advance();
        } else {
            let first = self.expr();
            let node = res.register(first);
            if res.error.is_some() {
                return res.failure(Error::syntax(self.current_span(), "Expected expression"));
            }
            args.push(node.expect("no error implies a node"));

            while self.current().kind == TokenKind::Comma {
                res.register_advancement();
                self.advance();

                let next = self.expr();
                let Some(arg) = res.register(next) else {
                    return res;
                };
                args.push(arg);
            }

            if self.current().kind != TokenKind::RParen {
                return res.failure(Error::syntax(self.current_span(), "Expected ',' or ')'"));
            }
            rparen_span = self.current_span();
            res.register_advancement();
            self.advance();
        }

        let span = callee.span.merge(rparen_span);
        res.success(Node::new(
            NodeKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    /// Literals, variable access, parenthesized expressions, and the
    /// keyword-introduced forms.
    fn atom(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let tok = self.current().clone();

        match tok.kind {
            TokenKind::Int(value) => {
                res.register_advancement();
                self.advance();
                res.success(Node::new(NodeKind::Int(value), tok.span))
            }
            TokenKind::Float(value) => {
                res.register_advancement();
                self.advance();
                res.success(Node::new(NodeKind::Float(value), tok.span))
            }
            TokenKind::Str(value) => {
                res.register_advancement();
                self.advance();
                res.success(Node::new(NodeKind::Str(value), tok.span))
            }
            TokenKind::Ident(name) => {
                res.register_advancement();
                self.advance();

                // A dotted method suffix parses but carries no semantics;
                // the access resolves the base name.
                if self.current().kind == TokenKind::Dot {
                    res.register_advancement();
                    self.advance();
                    if !matches!(self.current().kind, TokenKind::Method(_)) {
                        return res
                            .failure(Error::syntax(self.current_span(), "Expected method"));
                    }
                    res.register_advancement();
                    self.advance();
                }

                res.success(Node::new(NodeKind::VarAccess(name), tok.span))
            }
            TokenKind::LParen => {
                res.register_advancement();
                self.advance();

                let inner = self.expr();
                let Some(node) = res.register(inner) else {
                    return res;
                };
                if self.current().kind != TokenKind::RParen {
                    return res.failure(Error::syntax(self.current_span(), "Expected ')'"));
                }
                res.register_advancement();
                self.advance();
                res.success(node)
            }
            TokenKind::LBracket => self.list_expr(),
            TokenKind::Keyword(Keyword::If) => self.if_expr(),
            TokenKind::Keyword(Keyword::For) => self.for_expr(),
            TokenKind::Keyword(Keyword::While) => self.while_expr(),
            TokenKind::Keyword(Keyword::Def) => self.func_def(),
            _ => res.failure(Error::syntax(
                tok.span,
                "Expected int, float, identifier, '+', '-' or '('",
            )),
        }
    }

    /// `LSQUARE (expr (COMMA expr)*)? RSQUARE`
    fn list_expr(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let start = self.current_span();
        let mut elements = Vec::new();

        if self.current().kind != TokenKind::LBracket {
            return res.failure(Error::syntax(start, "Expected '['"));
        }
        res.register_advancement();
        self.advance();

        let end_span;
        if self.current().kind == TokenKind::RBracket {
            end_span = self.current_span();
            res.register_advancement();
            self.advance();
        } else {
            let first = self.expr();
            let node = res.register(first);
            if res.error.is_some() {
                return res.failure(Error::syntax(
                    self.current_span(),
                    "Expected expression or ']'",
                ));
            }
            elements.push(node.expect("no error implies a node"));

            while self.current().kind == TokenKind::Comma {
                res.register_advancement();
                self.advance();

                let next = self.expr();
                let Some(element) = res.register(next) else {
                    return res;
                };
                elements.push(element);
            }

            if self.current().kind != TokenKind::RBracket {
                return res.failure(Error::syntax(self.current_span(), "Expected ',' or ']'"));
            }
            end_span = self.current_span();
            res.register_advancement();
            self.advance();
        }

        res.success(Node::new(NodeKind::List(elements), start.merge(end_span)))
    }

    /// `KW:if expr KW:':' body (KW:elif ...)* (KW:else body)?`
    ///
    /// Each arm independently takes either an inline statement or a
    /// newline-introduced block. A chain whose last arm is a block is closed
    /// by a single `stop`.
    fn if_expr(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let start = self.current_span();
        let mut cases: Vec<IfCase> = Vec::new();
        let mut else_case: Option<Box<ElseCase>> = None;
        let mut end = start;

        if !self.at_keyword(Keyword::If) {
            return res.failure(Error::syntax(start, "Expected 'if'"));
        }

        let mut closed_by_stop = false;
        loop {
            // Consume the `if` / `elif` that brought us here.
            res.register_advancement();
            self.advance();

            let cond_res = self.expr();
            let Some(cond) = res.register(cond_res) else {
                return res;
            };

            if !self.at_keyword(Keyword::Colon) {
                return res.failure(Error::syntax(self.current_span(), "Expected ':'"));
            }
            res.register_advancement();
            self.advance();

            if self.current().kind == TokenKind::Newline {
                res.register_advancement();
                self.advance();

                let body_res = self.statements();
                let Some(body) = res.register(body_res) else {
                    return res;
                };
                end = body.span;
                cases.push(IfCase {
                    cond,
                    body,
                    is_block: true,
                });

                if self.at_keyword(Keyword::Stop) {
                    end = self.current_span();
                    res.register_advancement();
                    self.advance();
                    closed_by_stop = true;
                    break;
                }
                if self.at_keyword(Keyword::Elif) {
                    continue;
                }
                if self.at_keyword(Keyword::Else) {
                    break;
                }
                return res.failure(Error::syntax(self.current_span(), "Expected 'stop'"));
            }

            let body_res = self.statement();
            let Some(body) = res.register(body_res) else {
                return res;
            };
            end = body.span;
            cases.push(IfCase {
                cond,
                body,
                is_block: false,
            });

            if self.at_keyword(Keyword::Elif) {
                continue;
            }
            break;
        }

        if !closed_by_stop && self.at_keyword(Keyword::Else) {
            res.register_advancement();
            self.advance();

            if self.current().kind == TokenKind::Newline {
                res.register_advancement();
                self.advance();

                let body_res = self.statements();
                let Some(body) = res.register(body_res) else {
                    return res;
                };
                if !self.at_keyword(Keyword::Stop) {
                    return res.failure(Error::syntax(self.current_span(), "Expected 'stop'"));
                }
                end = self.current_span();
                res.register_advancement();
                self.advance();
                else_case = Some(Box::new(ElseCase {
                    body: Box::new(body),
                    is_block: true,
                }));
            } else {
                let body_res = self.expr();
                let Some(body) = res.register(body_res) else {
                    return res;
                };
                end = body.span;
                else_case = Some(Box::new(ElseCase {
                    body: Box::new(body),
                    is_block: false,
                }));
            }
        }

        res.success(Node::new(
            NodeKind::If { cases, else_case },
            start.merge(end),
        ))
    }

    /// `KW:for IDENT EQ expr KW:to expr (KW:step expr)? KW:':' body`
    fn for_expr(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let start = self.current_span();

        if !self.at_keyword(Keyword::For) {
            return res.failure(Error::syntax(start, "Expected 'for'"));
        }
        res.register_advancement();
        self.advance();

        let var_tok = self.current().clone();
        let TokenKind::Ident(var) = var_tok.kind else {
            return res.failure(Error::syntax(var_tok.span, "Expected identifier"));
        };
        res.register_advancement();
        self.advance();

        if self.current().kind != TokenKind::Eq {
            return res.failure(Error::syntax(self.current_span(), "Expected '='"));
        }
        res.register_advancement();
        self.advance();

        let start_res = self.expr();
        let Some(start_value) = res.register(start_res) else {
            return res;
        };

        if !self.at_keyword(Keyword::To) {
            return res.failure(Error::syntax(self.current_span(), "Expected 'to'"));
        }
        res.register_advancement();
        self.advance();

        let end_res = self.expr();
        let Some(end_value) = res.register(end_res) else {
            return res;
        };

        let step_value = if self.at_keyword(Keyword::Step) {
            res.register_advancement();
            self.advance();

            let step_res = self.expr();
            let Some(step) = res.register(step_res) else {
                return res;
            };
            Some(Box::new(step))
        } else {
            None
        };

        if !self.at_keyword(Keyword::Colon) {
            return res.failure(Error::syntax(self.current_span(), "Expected ':'"));
        }
        res.register_advancement();
        self.advance();

        let (body, is_block, end) = if self.current().kind == TokenKind::Newline {
            res.register_advancement();
            self.advance();

            let body_res = self.statements();
            let Some(body) = res.register(body_res) else {
                return res;
            };
            if !self.at_keyword(Keyword::Stop) {
                return res.failure(Error::syntax(self.current_span(), "Expected 'stop'"));
            }
            let stop_span = self.current_span();
            res.register_advancement();
            self.advance();
            (body, true, stop_span)
        } else {
            let body_res = self.statement();
            let Some(body) = res.register(body_res) else {
                return res;
            };
            let span = body.span;
            (body, false, span)
        };

        res.success(Node::new(
            NodeKind::For {
                var,
                start: Box::new(start_value),
                end: Box::new(end_value),
                step: step_value,
                body: Box::new(body),
                is_block,
            },
            start.merge(end),
        ))
    }

    /// `KW:while expr KW:':' body`
    fn while_expr(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let start = self.current_span();

        if !self.at_keyword(Keyword::While) {
            return res.failure(Error::syntax(start, "Expected 'while'"));
        }
        res.register_advancement();
        self.advance();

        let cond_res = self.expr();
        let Some(cond) = res.register(cond_res) else {
            return res;
        };

        if !self.at_keyword(Keyword::Colon) {
            return res.failure(Error::syntax(self.current_span(), "Expected ':'"));
        }
        res.register_advancement();
        self.advance();

        let (body, is_block, end) = if self.current().kind == TokenKind::Newline {
            res.register_advancement();
            self.advance();

            let body_res = self.statements();
            let Some(body) = res.register(body_res) else {
                return res;
            };
            if !self.at_keyword(Keyword::Stop) {
                return res.failure(Error::syntax(self.current_span(), "Expected 'stop'"));
            }
            let stop_span = self.current_span();
            res.register_advancement();
            self.advance();
            (body, true, stop_span)
        } else {
            let body_res = self.statement();
            let Some(body) = res.register(body_res) else {
                return res;
            };
            let span = body.span;
            (body, false, span)
        };

        res.success(Node::new(
            NodeKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
                is_block,
            },
            start.merge(end),
        ))
    }

    /// `KW:def IDENT? LPAREN (IDENT (COMMA IDENT)*)? RPAREN
    ///  (ARROW expr | NEWLINE statements KW:stop)`
    fn func_def(&mut self) -> ParseResult {
        let mut res = ParseResult::new();
        let start = self.current_span();

        if !self.at_keyword(Keyword::Def) {
            return res.failure(Error::syntax(start, "Expected 'def'"));
        }
        res.register_advancement();
        self.advance();

        let name = if let TokenKind::Ident(name) = self.current().kind.clone() {
            res.register_advancement();
            self.advance();
            if self.current().kind != TokenKind::LParen {
                return res.failure(Error::syntax(self.current_span(), "Expected '('"));
            }
            Some(name)
        } else {
            if self.current().kind != TokenKind::LParen {
                return res.failure(Error::syntax(
                    self.current_span(),
                    "Expected identifier or '('",
                ));
            }
            None
        };
        res.register_advancement();
        self.advance();

        let mut params = Vec::new();
        if let TokenKind::Ident(param) = self.current().kind.clone() {
            params.push(param);
            res.register_advancement();
            self.advance();

            while self.current().kind == TokenKind::Comma {
                res.register_advancement();
                self.advance();

                let TokenKind::Ident(param) = self.current().kind.clone() else {
                    return res
                        .failure(Error::syntax(self.current_span(), "Expected identifier"));
                };
                params.push(param);
                res.register_advancement();
                self.advance();
            }

            if self.current().kind != TokenKind::RParen {
                return res.failure(Error::syntax(self.current_span(), "Expected ',' or ')'"));
            }
        } else if self.current().kind != TokenKind::RParen {
            return res.failure(Error::syntax(
                self.current_span(),
                "Expected identifier or ')'",
            ));
        }
        res.register_advancement();
        self.advance();

        if self.current().kind == TokenKind::Arrow {
            res.register_advancement();
            self.advance();

            let body_res = self.expr();
            let Some(body) = res.register(body_res) else {
                return res;
            };
            let span = start.merge(body.span);
            return res.success(Node::new(
                NodeKind::FuncDef {
                    name,
                    params,
                    body: Box::new(body),
                    auto_return: true,
                },
                span,
            ));
        }

        if self.current().kind != TokenKind::Newline {
            return res.failure(Error::syntax(
                self.current_span(),
                "Expected '->' or new line",
            ));
        }
        res.register_advancement();
        self.advance();

        let body_res = self.statements();
        let Some(body) = res.register(body_res) else {
            return res;
        };

        if !self.at_keyword(Keyword::Stop) {
            return res.failure(Error::syntax(self.current_span(), "Expected 'stop'"));
        }
        let stop_span = self.current_span();
        res.register_advancement();
        self.advance();

        res.success(Node::new(
            NodeKind::FuncDef {
                name,
                params,
                body: Box::new(body),
                auto_return: false,
            },
            start.merge(stop_span),
        ))
    }

    // ── Shared helpers ─────────────────────────────────────────────────

    /// Fold a left-associative chain `first (op rest)*` into a left-leaning
    /// `BinOp` tree. Right-associativity (for `^`) comes from passing a
    /// `rest` production that re-enters the same level.
    fn bin_op(
        &mut self,
        first: fn(&mut Parser) -> ParseResult,
        ops: &[BinOp],
        rest: fn(&mut Parser) -> ParseResult,
    ) -> ParseResult {
        let mut res = ParseResult::new();
        let left_res = first(self);
        let Some(mut left) = res.register(left_res) else {
            return res;
        };

        while let Some(op) = binop_of(&self.current().kind).filter(|op| ops.contains(op)) {
            res.register_advancement();
            self.advance();

            let right_res = rest(self);
            let Some(right) = res.register(right_res) else {
                return res;
            };
            let span = left.span.merge(right.span);
            left = Node::new(
                NodeKind::BinOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }

        res.success(left)
    }
}

/// Map an operator token to its binary operator, if it is one.
fn binop_of(kind: &TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Sub),
        TokenKind::Star => Some(BinOp::Mul),
        TokenKind::Slash => Some(BinOp::Div),
        TokenKind::Caret => Some(BinOp::Pow),
        TokenKind::EqEq => Some(BinOp::Eq),
        TokenKind::NotEq => Some(BinOp::Ne),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::LtEq => Some(BinOp::Le),
        TokenKind::GtEq => Some(BinOp::Ge),
        TokenKind::Keyword(Keyword::And) => Some(BinOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinOp::Or),
        _ => None,
    }
}
