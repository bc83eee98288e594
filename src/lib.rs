//! # Introduction
//!
//! bmath evaluates infix bitwise/arithmetic expressions over unsigned
//! 64-bit integers and presents each result in the radixes a systems
//! programmer actually wants: decimal, signed views, hex at several
//! widths, ASCII/Unicode, and binary.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Line → Lexer → Recursive-descent tiers → u64 → Multi-radix rendering
//!           ↕
//!     Symbol table (builtins + $variables, radix trie)
//! ```
//!
//! 1. [`parser`] — tokenizes one line with single-token lookahead and
//!    evaluates it directly through mutually recursive precedence tiers;
//!    identifiers resolve against a per-session symbol table, so
//!    `$name = expr;` assignments persist across evaluations.
//! 2. [`output`] — renders the resulting value; not consulted on parse
//!    errors, which go to the context's diagnostic sink instead.
//!
//! The interactive front end (REPL, stdin pipe, file watching) lives in
//! the binary and is not part of the library API.
//!
//! ## Supported grammar
//!
//! Operators: `| ^ & << >> + - * / %`, unary `~ + -`, parentheses.
//! Literals: decimal and `0x` hex. Variables: `$name`, created on first
//! use. Builtins: `align`, `align_down`, `bswap`, `clz`, `ctz`, `mask`,
//! `popcnt`.

pub mod output;
pub mod parser;
