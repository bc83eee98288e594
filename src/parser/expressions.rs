//! Expression evaluation tiers.
//!
//! Recursive descent with one method per precedence level, evaluating
//! directly to a `u64` as it parses (there is no AST). Lowest to highest
//! binding:
//!
//! ```text
//! assignment := [IDENT '=']* or_expr ';'   (repeatable statements)
//! or_expr    := xor_expr ('|' xor_expr)*
//! xor_expr   := and_expr ('^' and_expr)*
//! and_expr   := shift_expr ('&' shift_expr)*
//! shift_expr := add_expr (('<<' | '>>') add_expr)*
//! add_expr   := factor_expr (('+' | '-') factor_expr)*
//! factor_expr := signed_expr (('*' | '/' | '%') signed_expr)*
//! signed_expr := ('~' | '+' | '-')* function_expr
//! function_expr := IDENT '(' [expr (',' expr)*] ')' | primary
//! primary    := NUMBER | IDENT | '(' expr ')'
//! ```
//!
//! All arithmetic wraps at 64 bits; division and modulo by zero are
//! reported as parse errors rather than panicking.

use crate::parser::functions::MAX_ARGS;
use crate::parser::parse::Parser;
use crate::parser::symbol::{SymbolId, SymbolKind};
use crate::parser::token::{BitOp, FactorOp, ShiftOp, SignOp, Token, TokenKind};

/// Deepest run of prefix operators (`~`, unary `+`/`-`) in front of one
/// operand.
const MAX_PREFIX_DEPTH: usize = 10;

#[derive(Clone, Copy)]
enum Prefix {
    Not,
    Negate,
    Keep,
}

impl Parser<'_> {
    /// Top of the grammar.
    pub(crate) fn expr(&mut self) -> u64 {
        self.assignment()
    }

    /// When the lookahead is an identifier immediately followed by `=`,
    /// returns its symbol. The cursor is restored either way.
    fn assignment_target(&mut self) -> Option<SymbolId> {
        let Token::Ident(id) = self.lookahead else {
            return None;
        };
        let saved = self.column;
        let followed_by_assign = matches!(self.next_token(), Ok(Token::Assign));
        self.column = saved;
        followed_by_assign.then_some(id)
    }

    /// Assignment statements. Every `$name =` prefix is collected, the
    /// right-hand side evaluated once and stored into each target, and the
    /// terminating `;` consumed; remaining input starts the next
    /// statement. Anything else falls straight through to `or_expr`.
    fn assignment(&mut self) -> u64 {
        let mut targets: Vec<SymbolId> = Vec::new();
        let mut prefixes = 0;
        while let Some(id) = self.assignment_target() {
            prefixes += 1;
            match self.ctx.table.symbol(id).kind() {
                SymbolKind::Variable(_) => targets.push(id),
                SymbolKind::Function(_) => {
                    let name = self.ctx.table.symbol(id).name().to_string();
                    self.error_at_cursor(format_args!(
                        "Cannot assign to '{}': not a variable",
                        name
                    ));
                }
            }
            self.advance(); // identifier
            self.advance(); // '='
        }

        let value = self.or_expr();
        if prefixes == 0 {
            return value;
        }

        self.expect(TokenKind::Terminator);
        for id in targets {
            self.ctx.table.set_variable(id, value);
        }
        if self.lookahead != Token::End {
            return self.assignment();
        }
        value
    }

    fn or_expr(&mut self) -> u64 {
        let left = self.xor_expr();
        if self.lookahead != Token::Op(BitOp::Or) {
            return left;
        }
        self.advance();
        left | self.or_expr()
    }

    fn xor_expr(&mut self) -> u64 {
        let left = self.and_expr();
        if self.lookahead != Token::Op(BitOp::Xor) {
            return left;
        }
        self.advance();
        left ^ self.xor_expr()
    }

    fn and_expr(&mut self) -> u64 {
        let left = self.shift_expr();
        if self.lookahead != Token::Op(BitOp::And) {
            return left;
        }
        self.advance();
        left & self.and_expr()
    }

    fn shift_expr(&mut self) -> u64 {
        let mut left = self.add_expr();
        while let Token::Shift(op) = self.lookahead {
            self.advance();
            let right = self.add_expr();
            // shift counts wrap at the register width
            left = match op {
                ShiftOp::Left => left.wrapping_shl(right as u32),
                ShiftOp::Right => left.wrapping_shr(right as u32),
            };
        }
        left
    }

    fn add_expr(&mut self) -> u64 {
        let mut left = self.factor_expr();
        while let Token::Sign(op) = self.lookahead {
            self.advance();
            let right = self.factor_expr();
            left = match op {
                SignOp::Plus => left.wrapping_add(right),
                SignOp::Minus => left.wrapping_sub(right),
            };
        }
        left
    }

    fn factor_expr(&mut self) -> u64 {
        let mut left = self.signed_expr();
        while let Token::Factor(op) = self.lookahead {
            self.advance();
            let right = self.signed_expr();
            left = match op {
                FactorOp::Div | FactorOp::Mod if right == 0 => {
                    self.error_at_cursor(format_args!("Division by zero"));
                    return left;
                }
                FactorOp::Mul => left.wrapping_mul(right),
                FactorOp::Div => left / right,
                FactorOp::Mod => left % right,
            };
        }
        left
    }

    /// Prefix operators are stacked as read and applied in reverse, so
    /// the operator nearest the operand acts first: `~-16` negates, then
    /// complements.
    fn signed_expr(&mut self) -> u64 {
        let mut stack = [Prefix::Keep; MAX_PREFIX_DEPTH];
        let mut depth = 0;
        loop {
            let prefix = match self.lookahead {
                Token::Not => Prefix::Not,
                Token::Sign(SignOp::Minus) => Prefix::Negate,
                Token::Sign(SignOp::Plus) => Prefix::Keep,
                _ => break,
            };
            if depth == MAX_PREFIX_DEPTH {
                self.error_at_cursor(format_args!(
                    "Exceeded maximum prefix depth of {}",
                    MAX_PREFIX_DEPTH
                ));
                return 0;
            }
            stack[depth] = prefix;
            depth += 1;
            self.advance();
        }

        let mut value = self.function_expr();
        for prefix in stack[..depth].iter().rev() {
            value = match prefix {
                Prefix::Not => !value,
                Prefix::Negate => value.wrapping_neg(),
                Prefix::Keep => value,
            };
        }
        value
    }

    /// A function-typed identifier heads a call; anything else is a
    /// primary. Calling a variable is reported, as is any error the
    /// builtin itself returns.
    fn function_expr(&mut self) -> u64 {
        let Token::Ident(id) = self.lookahead else {
            return self.primary();
        };
        let builtin = match self.ctx.table.symbol(id).kind() {
            SymbolKind::Function(builtin) => builtin,
            SymbolKind::Variable(_) => {
                let value = self.primary();
                if self.lookahead == Token::LParen {
                    let name = self.ctx.table.symbol(id).name().to_string();
                    self.error_at_cursor(format_args!("'{}' is not a function", name));
                }
                return value;
            }
        };

        self.advance(); // function identifier
        self.expect(TokenKind::LParen);

        let mut args = [0u64; MAX_ARGS];
        let mut argc = 0;
        if self.lookahead != Token::RParen {
            loop {
                args[argc] = self.expr();
                argc += 1;
                if self.lookahead != Token::Comma || argc == MAX_ARGS {
                    break;
                }
                self.expect(TokenKind::Comma);
            }
        }
        self.expect(TokenKind::RParen);

        match builtin.call(&args[..argc]) {
            Ok(value) => value,
            Err(err) => {
                self.error_at_cursor(format_args!("{}(): {}", builtin.name(), err));
                0
            }
        }
    }

    fn primary(&mut self) -> u64 {
        match self.lookahead {
            Token::LParen => {
                self.advance();
                let value = self.expr();
                self.expect(TokenKind::RParen);
                value
            }
            Token::Ident(id) => {
                let value = match self.ctx.table.symbol(id).kind() {
                    SymbolKind::Variable(value) => value,
                    SymbolKind::Function(_) => {
                        // call heads are consumed by function_expr before
                        // primary ever sees them
                        let name = self.ctx.table.symbol(id).name().to_string();
                        self.error_at_cursor(format_args!("'{}' is not a value", name));
                        0
                    }
                };
                self.advance();
                value
            }
            Token::Number(value) => {
                self.advance();
                value
            }
            _ => {
                // mismatch: reports "expected number" unless suppressed
                self.expect(TokenKind::Number);
                0
            }
        }
    }
}
