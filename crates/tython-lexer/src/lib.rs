// Tython lexer -- tokenizer for the Tython language.

mod cursor;

use cursor::Cursor;
use tython_common::error::Error;
use tython_common::span::Span;
use tython_common::token::{keyword_from_str, type_from_str, Keyword, Token, TokenKind};

/// The Tython lexer. Converts source text into a stream of tokens.
///
/// Wraps a [`Cursor`] for byte-level iteration. Lexing stops at the first
/// error; on success the returned stream always ends with an `Eof` token.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The returned vector includes the final `Eof` token.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
        Lexer::new(source).run()
    }

    fn run(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let start = self.cursor.pos();
            let Some(c) = self.cursor.peek() else {
                tokens.push(Token::new(TokenKind::Eof, start, start));
                return Ok(tokens);
            };

            match c {
                // ── Statement terminators ──────────────────────────────
                '\n' | ';' => {
                    self.cursor.advance();
                    tokens.push(Token::new(TokenKind::Newline, start, self.cursor.pos()));
                }
                '\r' => {
                    self.cursor.advance();
                    // \r\n = single Newline
                    if self.cursor.peek() == Some('\n') {
                        self.cursor.advance();
                    }
                    tokens.push(Token::new(TokenKind::Newline, start, self.cursor.pos()));
                }

                // ── Single-character tokens ────────────────────────────
                '+' => tokens.push(self.single_char_token(TokenKind::Plus, start)),
                '*' => tokens.push(self.single_char_token(TokenKind::Star, start)),
                '/' => tokens.push(self.single_char_token(TokenKind::Slash, start)),
                '^' => tokens.push(self.single_char_token(TokenKind::Caret, start)),
                '(' => tokens.push(self.single_char_token(TokenKind::LParen, start)),
                ')' => tokens.push(self.single_char_token(TokenKind::RParen, start)),
                '[' => tokens.push(self.single_char_token(TokenKind::LBracket, start)),
                ']' => tokens.push(self.single_char_token(TokenKind::RBracket, start)),
                ',' => tokens.push(self.single_char_token(TokenKind::Comma, start)),
                '.' => tokens.push(self.single_char_token(TokenKind::Dot, start)),
                ':' => tokens
                    .push(self.single_char_token(TokenKind::Keyword(Keyword::Colon), start)),

                // ── Multi-character operators ──────────────────────────
                '-' => tokens.push(self.lex_minus(start)),
                '=' => tokens.push(self.lex_eq(start)),
                '<' => tokens.push(self.lex_lt(start)),
                '>' => tokens.push(self.lex_gt(start)),
                '!' => tokens.push(self.lex_bang(start)?),

                // ── Literals, identifiers ──────────────────────────────
                '0'..='9' => tokens.push(self.lex_number(start)),
                '"' => tokens.push(self.lex_string(start)),
                c if is_ident_start(c) => self.lex_ident(start, &mut tokens),

                // ── Anything else is an error ──────────────────────────
                _ => {
                    self.cursor.advance();
                    return Err(Error::illegal_char(
                        Span::new(start, self.cursor.pos()),
                        c,
                    ));
                }
            }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────

    /// Skip whitespace characters (spaces and tabs only -- newlines are tokens).
    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(|c| c == ' ' || c == '\t');
    }

    /// Consume one character and return a token of the given kind.
    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        Token::new(kind, start, self.cursor.pos())
    }

    // ── Operator lexing ────────────────────────────────────────────────

    /// `-` -> `Minus`, `->` -> `Arrow`
    fn lex_minus(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '-'
        if self.cursor.peek() == Some('>') {
            self.cursor.advance();
            Token::new(TokenKind::Arrow, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Minus, start, self.cursor.pos())
        }
    }

    /// `=` -> `Eq`, `==` -> `EqEq`
    fn lex_eq(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '='
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::EqEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Eq, start, self.cursor.pos())
        }
    }

    /// `<` -> `Lt`, `<=` -> `LtEq`
    fn lex_lt(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '<'
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::LtEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Lt, start, self.cursor.pos())
        }
    }

    /// `>` -> `Gt`, `>=` -> `GtEq`
    fn lex_gt(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '>'
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Token::new(TokenKind::GtEq, start, self.cursor.pos())
        } else {
            Token::new(TokenKind::Gt, start, self.cursor.pos())
        }
    }

    /// `!=` -> `NotEq`; a lone `!` is an error.
    fn lex_bang(&mut self, start: u32) -> Result<Token, Error> {
        self.cursor.advance(); // consume '!'
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            Ok(Token::new(TokenKind::NotEq, start, self.cursor.pos()))
        } else {
            self.cursor.advance();
            Err(Error::expected_char(
                Span::new(start, self.cursor.pos()),
                "'=' (after '!')",
            ))
        }
    }

    // ── Number literals ────────────────────────────────────────────────

    /// Lex a run of digits with at most one `.`.
    ///
    /// Zero dots makes an `Int`, one a `Float`. A second dot terminates the
    /// literal. An integer literal too large for `i64` falls back to `Float`.
    fn lex_number(&mut self, start: u32) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        let mut is_float = false;
        if self.cursor.peek() == Some('.') {
            is_float = true;
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = if is_float {
            TokenKind::Float(text.parse().unwrap_or(0.0))
        } else {
            match text.parse::<i64>() {
                Ok(n) => TokenKind::Int(n),
                Err(_) => TokenKind::Float(text.parse().unwrap_or(0.0)),
            }
        };
        Token::new(kind, start, self.cursor.pos())
    }

    // ── String literals ────────────────────────────────────────────────

    /// Lex a `"`-delimited string.
    ///
    /// `\n` and `\t` escape to newline and tab; any other escaped character
    /// passes through literally. End of input terminates the literal.
    fn lex_string(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume opening '"'
        let mut content = String::new();

        loop {
            match self.cursor.advance() {
                None | Some('"') => break,
                Some('\\') => match self.cursor.advance() {
                    Some('n') => content.push('\n'),
                    Some('t') => content.push('\t'),
                    Some(c) => content.push(c),
                    None => break,
                },
                Some(c) => content.push(c),
            }
        }

        Token::new(TokenKind::Str(content), start, self.cursor.pos())
    }

    // ── Identifiers, keywords, type names ──────────────────────────────

    /// Lex an identifier and classify it as keyword / type name / identifier.
    ///
    /// The dotted form `name.method` emits three tokens: the classified name,
    /// `Dot`, and a `Method` carrying the text after the dot.
    fn lex_ident(&mut self, start: u32, tokens: &mut Vec<Token>) {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());

        let kind = if let Some(kw) = keyword_from_str(text) {
            TokenKind::Keyword(kw)
        } else if let Some(tag) = type_from_str(text) {
            TokenKind::TypeName(tag)
        } else {
            TokenKind::Ident(text.to_string())
        };
        tokens.push(Token::new(kind, start, self.cursor.pos()));

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(is_ident_start)
        {
            let dot_start = self.cursor.pos();
            self.cursor.advance(); // consume '.'
            tokens.push(Token::new(TokenKind::Dot, dot_start, self.cursor.pos()));

            let method_start = self.cursor.pos();
            self.cursor.eat_while(is_ident_continue);
            let method = self.cursor.slice(method_start, self.cursor.pos());
            tokens.push(Token::new(
                TokenKind::Method(method.to_string()),
                method_start,
                self.cursor.pos(),
            ));
        }
    }
}

/// Whether a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
