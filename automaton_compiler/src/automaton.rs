use crate::{CompileError, CompileResult};
use std::collections::{BTreeMap, BTreeSet};

/// A state ID in an automaton
pub type StateId = usize;

/// An ordered set of states. Ordered sets hash and compare independently of
/// insertion order, so they double as keys for the subset construction.
pub type StateSet = BTreeSet<StateId>;

/// Transition table: `from -> to -> symbols on that edge`
pub type Transitions = BTreeMap<StateId, BTreeMap<StateId, BTreeSet<Symbol>>>;

/// A transition label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// No input consumed
    Epsilon,
    /// Consumes exactly this character
    Char(char),
}

impl Symbol {
    /// Whether this is the epsilon label
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The character this symbol consumes, if any
    pub fn as_char(&self) -> Option<char> {
        match *self {
            Symbol::Char(c) => Some(c),
            Symbol::Epsilon => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

/// A finite automaton over `char`, stored as a multi-labeled directed graph.
///
/// One edge `(from, to)` may carry several symbols and a state may have any
/// number of successors, so the same type represents both the NFAs built by
/// the [`compiler`](crate::compiler) operators and the DFAs produced by
/// [`subset_construction`](crate::subset_construction).
///
/// Every state named by the start, the finals or the transition table is also
/// in [`states`](Automaton::states).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    states: StateSet,
    /// Input symbols; epsilon is never part of it
    alphabet: BTreeSet<char>,
    start: Option<StateId>,
    finals: StateSet,
    transitions: Transitions,
}

impl Automaton {
    /// Create an empty automaton over the given alphabet
    pub fn new<I: IntoIterator<Item = char>>(alphabet: I) -> Self {
        Self {
            alphabet: alphabet.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Declare the unique start state; last write wins.
    ///
    /// A replaced start state stays in [`states`](Automaton::states).
    pub fn set_start(&mut self, state: StateId) {
        self.start = Some(state);
        self.states.insert(state);
    }

    /// Mark states as accepting
    pub fn add_final<I: IntoIterator<Item = StateId>>(&mut self, states: I) {
        for state in states {
            self.finals.insert(state);
            self.states.insert(state);
        }
    }

    /// Replace the accepting states
    pub(crate) fn set_finals(&mut self, finals: StateSet) {
        self.states.extend(finals.iter().copied());
        self.finals = finals;
    }

    /// Add the symbols to the edge `from -> to`.
    ///
    /// The symbols are copied into this automaton's own edge set, so the
    /// caller's set and any other automaton's edges are never shared.
    /// Character symbols join the alphabet.
    pub fn add_transition(&mut self, from: StateId, to: StateId, symbols: &BTreeSet<Symbol>) {
        self.states.insert(from);
        self.states.insert(to);
        self.alphabet.extend(symbols.iter().filter_map(Symbol::as_char));
        self.transitions
            .entry(from)
            .or_default()
            .entry(to)
            .or_default()
            .extend(symbols.iter().copied());
    }

    /// Add a single-symbol edge
    pub fn add_symbol(&mut self, from: StateId, to: StateId, symbol: Symbol) {
        self.add_transition(from, to, &BTreeSet::from([symbol]));
    }

    /// Add an epsilon edge
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_symbol(from, to, Symbol::Epsilon);
    }

    /// Apply [`add_transition`](Automaton::add_transition) for every edge of another table
    pub fn merge_transitions(&mut self, other: &Transitions) {
        for (&from, targets) in other {
            for (&to, symbols) in targets {
                self.add_transition(from, to, symbols);
            }
        }
    }

    /// Take over another automaton's states, alphabet and edges.
    /// Start and finals are left to the caller.
    pub(crate) fn absorb(&mut self, other: &Automaton) {
        self.states.extend(other.states.iter().copied());
        self.alphabet.extend(other.alphabet.iter().copied());
        self.merge_transitions(&other.transitions);
    }

    /// Return an isomorphic automaton with every state shifted up by `offset`
    pub fn rename(self, offset: StateId) -> Automaton {
        let shift = |state: StateId| state + offset;
        let transitions = self
            .transitions
            .into_iter()
            .map(|(from, targets)| {
                let targets = targets
                    .into_iter()
                    .map(|(to, symbols)| (shift(to), symbols))
                    .collect();
                (shift(from), targets)
            })
            .collect();

        Automaton {
            states: self.states.into_iter().map(shift).collect(),
            alphabet: self.alphabet,
            start: self.start.map(shift),
            finals: self.finals.into_iter().map(shift).collect(),
            transitions,
        }
    }

    /// All states
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Input alphabet, without epsilon
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// The start state, if one was declared
    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    /// The start state, or an error for automata that never declared one
    pub(crate) fn require_start(&self) -> CompileResult<StateId> {
        self.start.ok_or_else(|| {
            CompileError::InvalidAutomatonState("automaton has no start state".to_string())
        })
    }

    /// Accepting states
    pub fn finals(&self) -> &StateSet {
        &self.finals
    }

    /// Whether `state` is accepting
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// The whole transition table
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Symbols on the edge `from -> to`, if the edge exists
    pub fn symbols(&self, from: StateId, to: StateId) -> Option<&BTreeSet<Symbol>> {
        self.transitions.get(&from)?.get(&to)
    }

    /// States reachable from `from` over one edge labeled `symbol`
    pub fn targets(&self, from: StateId, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&from)
            .into_iter()
            .flat_map(|targets| targets.iter())
            .filter(move |(_, symbols)| symbols.contains(&symbol))
            .map(|(&to, _)| to)
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the automaton has no states at all
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Smallest state ID
    pub fn min_state(&self) -> CompileResult<StateId> {
        self.states.iter().next().copied().ok_or_else(Self::no_states)
    }

    /// Largest state ID
    pub fn max_state(&self) -> CompileResult<StateId> {
        self.states.iter().next_back().copied().ok_or_else(Self::no_states)
    }

    fn no_states() -> CompileError {
        CompileError::InvalidAutomatonState("automaton has no states".to_string())
    }

    /// Whether no state has an epsilon edge or two edges sharing a symbol
    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|targets| {
            let mut seen = BTreeSet::new();
            targets
                .values()
                .flatten()
                .all(|symbol| !symbol.is_epsilon() && seen.insert(*symbol))
        })
    }
}
