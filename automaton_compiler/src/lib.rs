//! Thompson NFA construction and subset construction
//!
//! This library turns a regular expression written in a small recursive grammar
//! into a nondeterministic finite automaton, and turns that NFA into an
//! equivalent deterministic finite automaton.
//!
//! ```text
//! regex  ::= term ('|' term)*
//! term   ::= factor*
//! factor ::= base '*'*
//! base   ::= char | '\' char | '(' regex ')'
//! ```
//!
//! The pieces, leaf first:
//! - [`Automaton`]: states, alphabet, start, finals and a multi-labeled transition table
//! - [`compiler`]: the Thompson operators (literal, concatenation, union, star)
//! - [`Parser`]: recursive descent over the grammar, driving the operators
//! - [`determinize`]: epsilon closure, symbol moves and the subset construction
//! - [`Matcher`]: closure-and-move simulation, used to validate constructions
//!
//! ```
//! use automaton_compiler::{Compiler, Matcher};
//!
//! let dfa = Compiler::new().compile_dfa("(a|b)*abb").unwrap();
//! let matcher = Matcher::new(dfa.automaton());
//! assert!(matcher.is_match("babb"));
//! assert!(!matcher.is_match("abbb"));
//! ```

#[macro_use]
mod macros;

pub mod automaton;
pub mod compiler;
pub mod determinize;
pub mod matcher;
pub mod parser;

pub use automaton::{Automaton, StateId, StateSet, Symbol, Transitions};
pub use compiler::Compiler;
pub use determinize::{subset_construction, Dfa};
pub use matcher::Matcher;
pub use parser::Parser;

/// The result of building an automaton
pub type CompileResult<T> = Result<T, CompileError>;

/// What the parser was looking for when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// One specific character, such as a closing parenthesis
    Char(char),
    /// Any character at all (a literal after `\`, for instance)
    AnyChar,
    /// A literal, an escape or a parenthesized group
    Atom,
    /// A non-empty alternation branch
    Term,
    /// Nothing: the pattern should have ended here
    EndOfInput,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Char(c) => write!(f, "'{}'", c),
            Expected::AnyChar => write!(f, "a character"),
            Expected::Atom => write!(f, "a literal, an escape or a group"),
            Expected::Term => write!(f, "a non-empty alternative"),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Errors that can occur while building an automaton
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A character does not fit the grammar production being parsed
    Syntax {
        expected: Expected,
        actual: char,
        /// Character offset of `actual` in the pattern
        position: usize,
    },
    /// The pattern ended while a production still needed input
    UnexpectedEndOfInput { expected: Expected, position: usize },
    /// Groups were nested deeper than the parser's nest limit
    NestLimitExceeded {
        limit: u32,
        /// Character offset of the `(` that went over the limit
        position: usize,
    },
    /// An operation needed states or a start state the automaton does not have
    InvalidAutomatonState(String),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Syntax { expected, actual, position } => write!(
                f,
                "syntax error at position {}: expected {}, got '{}'",
                position, expected, actual
            ),
            CompileError::UnexpectedEndOfInput { expected, position } => write!(
                f,
                "unexpected end of input at position {}: expected {}",
                position, expected
            ),
            CompileError::NestLimitExceeded { limit, position } => write!(
                f,
                "nest limit of {} exceeded at position {}",
                limit, position
            ),
            CompileError::InvalidAutomatonState(msg) => write!(f, "invalid automaton: {}", msg),
        }
    }
}

impl std::error::Error for CompileError {}
