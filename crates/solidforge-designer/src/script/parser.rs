//! Recursive-descent parser for modeling scripts.
//!
//! ```text
//! script     := statement (SEP statement)*
//! statement  := "let" IDENT "=" expr | IDENT "=" expr | expr | <empty>
//! expr       := term (("+" | "-") term)*
//! term       := unary (("*" | "/") unary)*
//! unary      := "-" unary | primary
//! primary    := NUMBER | IDENT | IDENT "(" args? ")" | "(" expr ")"
//! args       := arg ("," arg)* ","?
//! arg        := IDENT "=" expr | expr
//! ```

use super::lexer::{Token, TokenKind};
use super::{ScriptFailure, Span};

/// Deepest expression nesting a script may use. Parentheses, unary minus,
/// call arguments and each binary operator in a chain all count one level.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable { name: String, span: Span },
    Negate { operand: Box<Expr>, span: Span },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Call {
        function: String,
        args: Vec<Arg>,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    /// Keyword, when passed as `name = value`
    pub name: Option<String>,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { name: String, value: Expr },
    Expr(Expr),
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Enter one nesting level. Failures abort the whole parse, so levels
    /// are only given back on success.
    fn descend(&mut self, span: Span) -> Result<(), ScriptFailure> {
        if self.depth >= MAX_DEPTH {
            return Err(ScriptFailure::new(
                span,
                format!("expression nested deeper than {} levels", MAX_DEPTH),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ScriptFailure> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ScriptFailure::new(
                token.span,
                format!("expected {}, found {}", what, token.kind.describe()),
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ScriptFailure> {
        let token = self.advance();
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            other => Err(ScriptFailure::new(
                token.span,
                format!("expected a name, found {}", other.describe()),
            )),
        }
    }

    pub fn parse_script(&mut self) -> Result<Vec<Stmt>, ScriptFailure> {
        let mut statements = Vec::new();

        loop {
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Separator => {
                    self.advance();
                }
                _ => {
                    statements.push(self.parse_statement()?);
                    let token = self.advance();
                    if !matches!(token.kind, TokenKind::Separator | TokenKind::Eof) {
                        return Err(ScriptFailure::new(
                            token.span,
                            format!("expected end of statement, found {}", token.kind.describe()),
                        ));
                    }
                    if token.kind == TokenKind::Eof {
                        break;
                    }
                }
            }
        }

        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Stmt, ScriptFailure> {
        if matches!(&self.peek().kind, TokenKind::Ident(word) if word == "let") {
            self.advance();
            let name = self.expect_ident()?;
            self.expect(TokenKind::Assign, "'='")?;
            let value = self.parse_expr()?;
            return Ok(Stmt::Assign { name, value });
        }

        if matches!(self.peek().kind, TokenKind::Ident(_))
            && self.peek_kind_at(1) == Some(&TokenKind::Assign)
        {
            let name = self.expect_ident()?;
            self.advance();
            let value = self.parse_expr()?;
            return Ok(Stmt::Assign { name, value });
        }

        Ok(Stmt::Expr(self.parse_expr()?))
    }

    fn parse_expr(&mut self) -> Result<Expr, ScriptFailure> {
        let base = self.depth;
        let span = self.peek().span;
        self.descend(span)?;
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            let span = self.advance().span;
            self.descend(span)?;
            let rhs = self.parse_term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ScriptFailure> {
        let base = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            let span = self.advance().span;
            self.descend(span)?;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ScriptFailure> {
        if self.peek().kind == TokenKind::Minus {
            let span = self.advance().span;
            self.descend(span)?;
            let operand = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Negate {
                operand: Box::new(operand),
                span,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ScriptFailure> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Ident(name) => {
                if self.peek().kind == TokenKind::LParen {
                    self.advance();
                    let args = self.parse_args()?;
                    Ok(Expr::Call {
                        function: name,
                        args,
                        span: token.span,
                    })
                } else {
                    Ok(Expr::Variable {
                        name,
                        span: token.span,
                    })
                }
            }
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            other => Err(ScriptFailure::new(
                token.span,
                format!("expected an expression, found {}", other.describe()),
            )),
        }
    }

    /// Arguments after the opening parenthesis, through the closing one.
    fn parse_args(&mut self) -> Result<Vec<Arg>, ScriptFailure> {
        let mut args = Vec::new();

        loop {
            if self.peek().kind == TokenKind::RParen {
                self.advance();
                return Ok(args);
            }

            let span = self.peek().span;
            let is_keyword = matches!(self.peek().kind, TokenKind::Ident(_))
                && self.peek_kind_at(1) == Some(&TokenKind::Assign);
            let name = if is_keyword {
                let name = self.expect_ident()?;
                self.advance();
                Some(name)
            } else {
                None
            };
            let value = self.parse_expr()?;
            args.push(Arg { name, value, span });

            let token = self.advance();
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => return Ok(args),
                other => {
                    return Err(ScriptFailure::new(
                        token.span,
                        format!("expected ',' or ')', found {}", other.describe()),
                    ))
                }
            }
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, ScriptFailure> {
    Parser::new(tokens).parse_script()
}
