use regex_fsa::{Automaton, Matcher};

/// Sends `logging` output to the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every string over `alphabet` of length at most `max_len`, shortest first.
pub fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |&c| {
                    let mut s = prefix.clone();
                    s.push(c);
                    s
                })
            })
            .collect();
        all.extend(layer.iter().cloned());
    }
    all
}

/// The first input on which the two automata disagree, if any.
pub fn disagreement(a: &Automaton, b: &Automaton, inputs: &[String]) -> Option<String> {
    let (ma, mb) = (Matcher::new(a), Matcher::new(b));
    inputs
        .iter()
        .find(|input| ma.is_match(input) != mb.is_match(input))
        .cloned()
}

/// Checks the graph invariants every constructed automaton has.
pub fn is_well_formed(automaton: &Automaton) -> bool {
    let states = automaton.states();
    let start_ok = automaton.start().map_or(false, |start| states.contains(&start));
    let finals_ok = automaton.finals().is_subset(states);
    let edges_ok = automaton.transitions().iter().all(|(from, targets)| {
        states.contains(from) && targets.keys().all(|to| states.contains(to))
    });
    start_ok && finals_ok && edges_ok
}

#[test]
fn strings_enumerates_by_length() {
    let all = strings(&['a', 'b'], 2);
    assert_eq!(all, vec!["", "a", "b", "aa", "ab", "ba", "bb"]);
}
