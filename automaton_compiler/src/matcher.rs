use crate::automaton::{Automaton, StateSet};

/// Decides acceptance by simulating an automaton with epsilon closures and
/// symbol moves.
///
/// This is a validation tool for constructed automata, not a search engine:
/// it only answers whether the whole input is in the language. It works the
/// same way for NFAs and for the DFAs built by
/// [`subset_construction`](crate::subset_construction).
pub struct Matcher<'a> {
    automaton: &'a Automaton,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given automaton
    pub fn new(automaton: &'a Automaton) -> Self {
        Self { automaton }
    }

    /// Check if the entire input is accepted
    pub fn is_match(&self, input: &str) -> bool {
        let current = self.run(input);
        self.is_accepting(&current)
    }

    /// The set of states the automaton can be in after reading `input`.
    /// Empty once the input leaves the language's prefixes, or when the
    /// automaton has no start state.
    pub fn run(&self, input: &str) -> StateSet {
        let mut current = match self.automaton.start() {
            Some(start) => self.automaton.epsilon_closure([start]),
            None => return StateSet::new(),
        };

        for c in input.chars() {
            current = self.automaton.move_on_symbol(&current, c);
            if current.is_empty() {
                break;
            }
        }

        current
    }

    /// Check if any state in the set is accepting
    pub fn is_accepting(&self, states: &StateSet) -> bool {
        !states.is_disjoint(self.automaton.finals())
    }
}
