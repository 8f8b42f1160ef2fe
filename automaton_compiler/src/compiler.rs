//! Thompson construction over [`Automaton`] fragments.
//!
//! Every operator takes its fragments by value and returns the combined
//! automaton. Fragments are renumbered before they are merged so that their
//! state IDs never collide.

use crate::{
    automaton::{Automaton, StateId, StateSet, Symbol},
    determinize::{subset_construction, Dfa},
    parser::{Parser, DEFAULT_NEST_LIMIT},
    CompileError, CompileResult,
};

/// Compiler that turns a pattern into an NFA, and optionally a DFA
#[derive(Debug, Clone, Copy)]
pub struct Compiler {
    nest_limit: u32,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            nest_limit: DEFAULT_NEST_LIMIT,
        }
    }
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how deeply groups may nest before parsing fails with
    /// [`CompileError::NestLimitExceeded`].
    ///
    /// The parser recurses once per group, so a large limit permits deep
    /// recursion on hostile patterns.
    pub fn nest_limit(&mut self, limit: u32) -> &mut Compiler {
        self.nest_limit = limit;
        self
    }

    /// Parse the whole pattern into a Thompson NFA
    pub fn compile(&self, pattern: &str) -> CompileResult<Automaton> {
        let nfa = Parser::new(pattern).nest_limit(self.nest_limit).parse()?;
        debug!(
            "compiled {:?} into an NFA with {} states and {} finals",
            pattern,
            nfa.len(),
            nfa.finals().len()
        );
        Ok(nfa)
    }

    /// Parse the pattern and determinize the resulting NFA
    pub fn compile_dfa(&self, pattern: &str) -> CompileResult<Dfa> {
        let nfa = self.compile(pattern)?;
        subset_construction(&nfa)
    }
}

/// Two-state fragment `1 -> 2` on `symbol`, or on epsilon when there is none
pub fn basic_construct(symbol: Option<char>) -> Automaton {
    let mut basic = Automaton::new(symbol);
    basic.set_start(1);
    basic.add_final([2]);
    basic.add_symbol(1, 2, symbol.map_or(Symbol::Epsilon, Symbol::Char));
    basic
}

/// Fragment accepting only the empty string, the identity of [`concatenation`]
pub fn empty_construct() -> Automaton {
    basic_construct(None)
}

/// Offset that moves every state of `fragment` above `floor`
fn offset_above(floor: usize, fragment: &Automaton) -> CompileResult<usize> {
    Ok((floor + 1).saturating_sub(fragment.min_state()?))
}

/// Fails unless every state of `low` is below every state of `high`
fn ensure_disjoint(low: &Automaton, high: &Automaton) -> CompileResult<()> {
    let (top, bottom) = (low.max_state()?, high.min_state()?);
    if top >= bottom {
        return Err(CompileError::InvalidAutomatonState(format!(
            "renamed fragments overlap: {} >= {}",
            top, bottom
        )));
    }
    Ok(())
}

/// Accept `left` followed by `right`.
///
/// `right` is renumbered above `left`, every final of `left` gets an epsilon
/// edge to the start of `right`, and the finals of `right` become the finals
/// of the result.
pub fn concatenation(mut left: Automaton, right: Automaton) -> CompileResult<Automaton> {
    left.require_start()?;
    let offset = offset_above(left.max_state()?, &right)?;
    let right = right.rename(offset);
    ensure_disjoint(&left, &right)?;
    let right_start = right.require_start()?;

    left.absorb(&right);
    for pre_final in left.finals().clone() {
        left.add_epsilon(pre_final, right_start);
    }
    left.set_finals(right.finals().clone());
    Ok(left)
}

/// Accept either `basic` or `parallel`.
///
/// `basic` is shifted up by one to leave room for a fresh start state below
/// it, `parallel` is renumbered above `basic`, and a fresh final state above
/// both collects every previous final.
pub fn union(basic: Automaton, parallel: Automaton) -> CompileResult<Automaton> {
    let mut basic = basic.rename(1);
    let offset = offset_above(basic.max_state()?, &parallel)?;
    let parallel = parallel.rename(offset);
    ensure_disjoint(&basic, &parallel)?;

    let basic_start = basic.require_start()?;
    let parallel_start = parallel.require_start()?;
    // min >= 1 after the shift
    let new_start = basic.min_state()? - 1;
    let new_final = parallel.max_state()? + 1;
    let pre_finals: StateSet = basic.finals().union(parallel.finals()).copied().collect();

    basic.absorb(&parallel);
    basic.add_epsilon(new_start, basic_start);
    basic.add_epsilon(new_start, parallel_start);
    basic.set_start(new_start);

    for pre_final in pre_finals {
        basic.add_epsilon(pre_final, new_final);
    }
    basic.set_finals(StateSet::from([new_final]));
    Ok(basic)
}

/// Accept any of `branches`.
///
/// Builds the same automaton as folding [`union`] from the right,
/// `union(b0, union(b1, .. union(bn-2, bn-1)))`, but renames every branch
/// once instead of copying the growing right operand at each level. The
/// layout is `s0 b0 s1 b1 .. sn-2 bn-2 bn-1 fn-2 .. f0`, where `sk` and `fk`
/// are the start and final of the union nested at depth `k`.
pub fn alternation(branches: Vec<Automaton>) -> CompileResult<Automaton> {
    let n = branches.len();
    if n < 2 {
        return branches.into_iter().next().ok_or_else(|| {
            CompileError::InvalidAutomatonState("alternation needs a branch".to_string())
        });
    }

    let mut bounds = Vec::with_capacity(n);
    for branch in &branches {
        bounds.push((branch.min_state()?, branch.max_state()?));
    }
    // shifts[k]: where the union nested at depth k lands; tops[k]: its largest
    // state before that shift, which is its final for k < n - 1
    let mut shifts: Vec<StateId> = vec![0; n];
    for k in 1..n {
        let (_, prev_max) = bounds[k - 1];
        shifts[k] = shifts[k - 1] + (prev_max + 2).saturating_sub(bounds[k].0);
    }
    let mut tops: Vec<StateId> = vec![bounds[n - 1].1; n];
    for k in (0..n - 1).rev() {
        tops[k] = tops[k + 1] + (shifts[k + 1] - shifts[k]) + 1;
    }

    let mut result = Automaton::default();
    let mut entries = Vec::with_capacity(n);
    let mut exits = Vec::with_capacity(n);
    for (k, branch) in branches.into_iter().enumerate() {
        let last = k == n - 1;
        let branch = branch.rename(if last { shifts[k] } else { shifts[k] + 1 });
        if k > 0 {
            ensure_disjoint(&result, &branch)?;
        }
        entries.push(branch.require_start()?);
        exits.push(branch.finals().clone());
        result.absorb(&branch);
    }

    // wire from the innermost union outwards
    let mut inner_start = entries[n - 1];
    let mut inner_finals = exits[n - 1].clone();
    for k in (0..n - 1).rev() {
        let start = bounds[k].0 + shifts[k];
        let end = tops[k] + shifts[k];
        result.add_epsilon(start, entries[k]);
        result.add_epsilon(start, inner_start);
        for &pre_final in exits[k].iter().chain(inner_finals.iter()) {
            result.add_epsilon(pre_final, end);
        }
        inner_start = start;
        inner_finals = StateSet::from([end]);
    }
    result.set_start(inner_start);
    result.set_finals(inner_finals);
    Ok(result)
}

/// Kleene star: epsilon edges both ways between the start and every final.
///
/// No states are added, so the result has an epsilon cycle through the start
/// state.
pub fn star_operation(mut fragment: Automaton) -> CompileResult<Automaton> {
    let start = fragment.require_start()?;
    for final_state in fragment.finals().clone() {
        fragment.add_epsilon(start, final_state);
        fragment.add_epsilon(final_state, start);
    }
    Ok(fragment)
}
