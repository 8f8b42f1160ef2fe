//! Subset construction: converts an NFA with epsilon edges into a DFA.
//!
//! Each DFA state stands for the epsilon closure of a set of NFA states. The
//! number of such sets is bounded by `2^n` for an `n`-state NFA and every set
//! is expanded at most once, so the construction always terminates, even
//! though star fragments put epsilon cycles into the NFA.

use crate::{
    automaton::{Automaton, StateId, StateSet, Symbol},
    CompileResult,
};
use std::collections::{BTreeMap, HashMap, VecDeque};

impl Automaton {
    /// Every state reachable from `states` over epsilon edges alone,
    /// including `states` themselves.
    ///
    /// The traversal keeps a visited set, so epsilon cycles are walked once.
    pub fn epsilon_closure<I: IntoIterator<Item = StateId>>(&self, states: I) -> StateSet {
        let mut closure = StateSet::new();
        let mut stack: Vec<StateId> = states.into_iter().collect();

        while let Some(state) = stack.pop() {
            if !closure.insert(state) {
                continue;
            }
            for target in self.targets(state, Symbol::Epsilon) {
                if !closure.contains(&target) {
                    stack.push(target);
                }
            }
        }

        closure
    }

    /// Close `states`, follow every edge labeled `symbol`, and close the
    /// result. Empty when no such edge leaves the closure.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: char) -> StateSet {
        let closure = self.epsilon_closure(states.iter().copied());
        let reached: StateSet = closure
            .iter()
            .flat_map(|&state| self.targets(state, Symbol::Char(symbol)))
            .collect();
        self.epsilon_closure(reached)
    }
}

/// A deterministic automaton together with the NFA subset behind each state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    automaton: Automaton,
    subsets: BTreeMap<StateId, StateSet>,
}

impl Dfa {
    /// The DFA itself
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Give up the subset mapping and keep the automaton
    pub fn into_automaton(self) -> Automaton {
        self.automaton
    }

    /// The NFA states a DFA state was built from
    pub fn subset(&self, state: StateId) -> Option<&StateSet> {
        self.subsets.get(&state)
    }

    /// Every DFA state with its NFA subset
    pub fn subsets(&self) -> &BTreeMap<StateId, StateSet> {
        &self.subsets
    }

    /// The unique successor of `state` on `symbol`, if any
    pub fn next_state(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.automaton.targets(state, Symbol::Char(symbol)).next()
    }
}

/// Assigns DFA IDs to NFA subsets, 1, 2, 3... in discovery order
#[derive(Debug, Default)]
struct SubsetMemo {
    ids: HashMap<StateSet, StateId>,
}

impl SubsetMemo {
    /// The ID of `subset` and whether it was allocated by this call
    fn get_or_insert(&mut self, subset: &StateSet) -> (StateId, bool) {
        if let Some(&id) = self.ids.get(subset) {
            return (id, false);
        }
        let id = self.ids.len() + 1;
        self.ids.insert(subset.clone(), id);
        (id, true)
    }

    fn into_subsets(self) -> BTreeMap<StateId, StateSet> {
        self.ids.into_iter().map(|(subset, id)| (id, subset)).collect()
    }
}

/// Build the DFA equivalent to `nfa`.
///
/// DFA state 1 is the epsilon closure of the NFA start. A DFA state is final
/// when its subset contains an NFA final. Symbols that lead nowhere produce no
/// edge, so the DFA is partial rather than having a dead state.
pub fn subset_construction(nfa: &Automaton) -> CompileResult<Dfa> {
    let start = nfa.require_start()?;
    let mut memo = SubsetMemo::default();
    let mut dfa = Automaton::new(nfa.alphabet().iter().copied());
    let mut worklist = VecDeque::new();

    let initial = nfa.epsilon_closure([start]);
    let (initial_id, _) = memo.get_or_insert(&initial);
    dfa.set_start(initial_id);
    if !initial.is_disjoint(nfa.finals()) {
        dfa.add_final([initial_id]);
    }
    worklist.push_back((initial_id, initial));

    while let Some((current_id, current)) = worklist.pop_front() {
        for &symbol in nfa.alphabet() {
            let next = nfa.move_on_symbol(&current, symbol);
            if next.is_empty() {
                continue;
            }

            let (next_id, is_new) = memo.get_or_insert(&next);
            dfa.add_symbol(current_id, next_id, Symbol::Char(symbol));
            if is_new {
                trace!("subset {:?} on {:?} -> new DFA state {} {:?}", current_id, symbol, next_id, next);
                if !next.is_disjoint(nfa.finals()) {
                    dfa.add_final([next_id]);
                }
                worklist.push_back((next_id, next));
            }
        }
    }

    debug!(
        "subset construction: {} NFA states -> {} DFA states, {} finals",
        nfa.len(),
        dfa.len(),
        dfa.finals().len()
    );

    Ok(Dfa {
        automaton: dfa,
        subsets: memo.into_subsets(),
    })
}
