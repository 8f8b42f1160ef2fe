/*!
This crate builds finite automata from regular expressions.

A pattern is parsed by a recursive descent parser into a nondeterministic
finite automaton using Thompson construction, and the NFA is turned into an
equivalent deterministic finite automaton by subset construction. The crate
only constructs automata: both are exposed as read-only graphs (states,
alphabet, start, finals and transitions) for other tools to inspect or render.

# Syntax

```text
regex  ::= term ('|' term)*
term   ::= factor*
factor ::= base '*'*
base   ::= char | '\' char | '(' regex ')'
```

A backslash makes the next character a literal, so `\*`, `\|`, `\(`, `\)` and
`\\` match those characters. An alternative may not be empty (`a|` and `|a`
are errors), but a whole pattern or group may be (`""` and `"()"` denote the
empty string). Groups may nest 250 deep by default; see
[`Compiler::nest_limit`].

# Example

```
use regex_fsa::Pattern;

let pattern = Pattern::new("(a|b)*abb").unwrap();
let dfa = pattern.dfa().automaton();
assert!(dfa.is_deterministic());
assert_eq!(dfa.start(), Some(1));
assert_eq!(dfa.len(), 5);
```

# Crate features

* **logging** - Emits construction messages through the `log` crate. Pair it
  with a logger such as `env_logger` to see them.
*/

#![deny(missing_docs)]

// Runs the README example as a doctest.
#[cfg(doctest)]
doc_comment::doctest!("../README.md");

pub use automaton_compiler::{
    compiler, determinize, parser, subset_construction, Automaton, CompileError,
    CompileResult, Compiler, Dfa, Expected, Matcher, Parser, StateId, StateSet,
    Symbol, Transitions,
};

/// A compiled pattern: its source text, its NFA and its DFA.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    nfa: Automaton,
    dfa: Dfa,
}

impl Pattern {
    /// Compile `pattern` into both automata.
    ///
    /// Fails with the first syntax error found in the pattern.
    pub fn new(pattern: &str) -> CompileResult<Pattern> {
        let nfa = Compiler::new().compile(pattern)?;
        let dfa = subset_construction(&nfa)?;
        Ok(Pattern { pattern: pattern.to_string(), nfa, dfa })
    }

    /// The pattern this was compiled from
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The Thompson NFA
    pub fn nfa(&self) -> &Automaton {
        &self.nfa
    }

    /// The DFA built from [`nfa`](Pattern::nfa)
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }
}

impl std::str::FromStr for Pattern {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Pattern> {
        Pattern::new(s)
    }
}
