//! Recursive descent parser for the pattern grammar.
//!
//! ```text
//! regex  ::= term ('|' term)*
//! term   ::= factor*
//! factor ::= base '*'*
//! base   ::= char | '\' char | '(' regex ')'
//! ```
//!
//! The parser builds the automaton bottom-up while it descends: every
//! production returns the fragment for the text it consumed. Only groups
//! recurse, and their depth is bounded by a nest limit.

use crate::{
    automaton::Automaton,
    compiler::{alternation, basic_construct, concatenation, empty_construct, star_operation},
    CompileError, CompileResult, Expected,
};
use std::{iter::Peekable, str::Chars};

/// How deeply groups may nest unless configured otherwise
pub const DEFAULT_NEST_LIMIT: u32 = 250;

/// Cursor over the remaining pattern text
pub struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    /// Characters consumed so far
    position: usize,
    /// Groups currently open
    depth: u32,
    nest_limit: u32,
}

impl<'a> Parser<'a> {
    /// Create a parser positioned at the start of `pattern`
    pub fn new(pattern: &'a str) -> Self {
        Self {
            chars: pattern.chars().peekable(),
            position: 0,
            depth: 0,
            nest_limit: DEFAULT_NEST_LIMIT,
        }
    }

    /// Allow at most `limit` groups open at once. `0` forbids groups.
    pub fn nest_limit(mut self, limit: u32) -> Self {
        self.nest_limit = limit;
        self
    }

    /// Parse the whole pattern. Input left over after the top-level regex,
    /// such as an unbalanced `)`, is an error.
    pub fn parse(mut self) -> CompileResult<Automaton> {
        let nfa = self.parse_regex()?;
        match self.chars.peek().copied() {
            Some(actual) => Err(self.syntax(Expected::EndOfInput, actual)),
            None => Ok(nfa),
        }
    }

    /// Character offset of the cursor
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the pattern is exhausted
    pub fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// The next character, without consuming it
    pub fn peek(&mut self) -> CompileResult<char> {
        self.chars.peek().copied().ok_or(CompileError::UnexpectedEndOfInput {
            expected: Expected::AnyChar,
            position: self.position,
        })
    }

    /// Consume the next character, failing unless it is `expected`
    pub fn eat(&mut self, expected: char) -> CompileResult<()> {
        match self.chars.peek().copied() {
            Some(actual) if actual == expected => {
                self.advance();
                Ok(())
            }
            Some(actual) => Err(self.syntax(Expected::Char(expected), actual)),
            None => Err(CompileError::UnexpectedEndOfInput {
                expected: Expected::Char(expected),
                position: self.position,
            }),
        }
    }

    /// Consume and return the next character
    pub fn next(&mut self) -> CompileResult<char> {
        let c = self.peek()?;
        self.advance();
        Ok(c)
    }

    fn advance(&mut self) {
        if self.chars.next().is_some() {
            self.position += 1;
        }
    }

    /// Whether the next character is `c`
    fn at(&mut self, c: char) -> bool {
        self.chars.peek() == Some(&c)
    }

    fn syntax(&self, expected: Expected, actual: char) -> CompileError {
        CompileError::Syntax {
            expected,
            actual,
            position: self.position,
        }
    }

    /// `base ::= char | '\' char | '(' regex ')'`
    pub fn parse_base(&mut self) -> CompileResult<Automaton> {
        match self.peek()? {
            '(' => {
                if self.depth >= self.nest_limit {
                    return Err(CompileError::NestLimitExceeded {
                        limit: self.nest_limit,
                        position: self.position,
                    });
                }
                self.eat('(')?;
                self.depth += 1;
                let group = self.parse_regex();
                self.depth -= 1;
                let group = group?;
                self.eat(')')?;
                Ok(group)
            }
            '\\' => {
                self.eat('\\')?;
                let escaped = self.next()?;
                Ok(basic_construct(Some(escaped)))
            }
            // operators never start a base
            c @ ('*' | '|' | ')') => Err(self.syntax(Expected::Atom, c)),
            _ => {
                let literal = self.next()?;
                Ok(basic_construct(Some(literal)))
            }
        }
    }

    /// `factor ::= base '*'*`
    pub fn parse_factor(&mut self) -> CompileResult<Automaton> {
        let mut base = self.parse_base()?;
        while self.at('*') {
            self.eat('*')?;
            base = star_operation(base)?;
        }
        Ok(base)
    }

    /// `term ::= factor*`, starting from the empty-string fragment
    pub fn parse_term(&mut self) -> CompileResult<Automaton> {
        let mut term = empty_construct();
        while !self.is_at_end() && !self.at(')') && !self.at('|') {
            let factor = self.parse_factor()?;
            term = concatenation(term, factor)?;
        }
        Ok(term)
    }

    /// `regex ::= term ('|' term)*`, the branches joined by [`alternation`]
    /// so that `a|b|c` is `a|(b|c)`.
    ///
    /// Every branch of an alternation must consume at least one character.
    pub fn parse_regex(&mut self) -> CompileResult<Automaton> {
        let mut branches = Vec::new();
        loop {
            let start = self.position;
            branches.push(self.parse_term()?);
            if !self.at('|') {
                break;
            }
            if self.position == start {
                return Err(self.syntax(Expected::Term, '|'));
            }

            self.eat('|')?;
            match self.chars.peek().copied() {
                None => {
                    return Err(CompileError::UnexpectedEndOfInput {
                        expected: Expected::Term,
                        position: self.position,
                    })
                }
                Some(c @ (')' | '|')) => return Err(self.syntax(Expected::Term, c)),
                Some(_) => {}
            }
        }
        alternation(branches)
    }
}
