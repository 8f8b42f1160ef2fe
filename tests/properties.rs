use crate::util::{disagreement, init_logging, is_well_formed, strings};
use once_cell::sync::Lazy;
use quickcheck::{Arbitrary, Gen, QuickCheck};
use regex_fsa::{compiler, Automaton, Compiler, StateId};

/// Expression trees that always render to a valid pattern.
#[derive(Clone, Debug)]
enum Expr {
    Literal(char),
    /// A metacharacter (or a plain one) behind a backslash
    Escaped(char),
    /// `()`
    Empty,
    Concat(Box<Expr>, Box<Expr>),
    Alternate(Box<Expr>, Box<Expr>),
    Star(Box<Expr>),
}

impl Expr {
    fn leaf(g: &mut Gen) -> Expr {
        match *g.choose(&[0u8, 0, 0, 1, 2]).unwrap_or(&0) {
            0 => Expr::Literal(*g.choose(&['a', 'b', 'c']).unwrap_or(&'a')),
            1 => Expr::Escaped(*g.choose(&['*', '(', ')', '|', '\\', 'a']).unwrap_or(&'*')),
            _ => Expr::Empty,
        }
    }

    fn generate(g: &mut Gen, depth: usize) -> Expr {
        let choice = if depth == 0 { 0 } else { *g.choose(&[0u8, 1, 2, 3]).unwrap_or(&0) };
        match choice {
            0 => Expr::leaf(g),
            1 => Expr::Concat(
                Box::new(Expr::generate(g, depth - 1)),
                Box::new(Expr::generate(g, depth - 1)),
            ),
            2 => Expr::Alternate(
                Box::new(Expr::generate(g, depth - 1)),
                Box::new(Expr::generate(g, depth - 1)),
            ),
            _ => Expr::Star(Box::new(Expr::generate(g, depth - 1))),
        }
    }

    fn pattern(&self) -> String {
        match self {
            Expr::Literal(c) => c.to_string(),
            Expr::Escaped(c) => format!("\\{}", c),
            Expr::Empty => "()".to_string(),
            Expr::Concat(a, b) => format!("{}{}", a.pattern(), b.pattern()),
            Expr::Alternate(a, b) => format!("({}|{})", a.pattern(), b.pattern()),
            // only a concatenation needs a group to take a star
            Expr::Star(a) => match **a {
                Expr::Concat(..) => format!("({})*", a.pattern()),
                _ => format!("{}*", a.pattern()),
            },
        }
    }

    fn nfa(&self) -> Automaton {
        Compiler::new()
            .compile(&self.pattern())
            .unwrap_or_else(|e| panic!("{:?} failed to compile: {}", self.pattern(), e))
    }
}

impl Arbitrary for Expr {
    fn arbitrary(g: &mut Gen) -> Expr {
        Expr::generate(g, 4)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Expr>> {
        match self {
            Expr::Literal(_) | Expr::Escaped(_) | Expr::Empty => quickcheck::empty_shrinker(),
            Expr::Concat(a, b) | Expr::Alternate(a, b) => {
                Box::new(vec![(**a).clone(), (**b).clone()].into_iter())
            }
            Expr::Star(a) => quickcheck::single_shrinker((**a).clone()),
        }
    }
}

static INPUTS: Lazy<Vec<String>> = Lazy::new(|| strings(&['a', 'b', 'c', '*', '('], 4));

fn qc() -> QuickCheck {
    QuickCheck::new().tests(200)
}

#[test]
fn prop_parse_is_well_formed() {
    init_logging();
    fn prop(expr: Expr) -> bool {
        let nfa = expr.nfa();
        is_well_formed(&nfa) && nfa.finals().len() == 1
    }
    qc().quickcheck(prop as fn(Expr) -> bool);
}

#[test]
fn prop_dfa_is_deterministic_and_equivalent() {
    init_logging();
    fn prop(expr: Expr) -> bool {
        let nfa = expr.nfa();
        let dfa = match regex_fsa::subset_construction(&nfa) {
            Ok(dfa) => dfa.into_automaton(),
            Err(_) => return false,
        };
        is_well_formed(&dfa)
            && dfa.is_deterministic()
            && disagreement(&nfa, &dfa, &INPUTS).is_none()
    }
    qc().quickcheck(prop as fn(Expr) -> bool);
}

#[test]
fn prop_union_is_commutative() {
    fn prop(a: Expr, b: Expr) -> bool {
        let ab = compiler::union(a.nfa(), b.nfa());
        let ba = compiler::union(b.nfa(), a.nfa());
        match (ab, ba) {
            (Ok(ab), Ok(ba)) => disagreement(&ab, &ba, &INPUTS).is_none(),
            _ => false,
        }
    }
    qc().quickcheck(prop as fn(Expr, Expr) -> bool);
}

#[test]
fn prop_concatenation_is_associative() {
    fn prop(a: Expr, b: Expr, c: Expr) -> bool {
        let left = compiler::concatenation(a.nfa(), b.nfa())
            .and_then(|ab| compiler::concatenation(ab, c.nfa()));
        let right = compiler::concatenation(b.nfa(), c.nfa())
            .and_then(|bc| compiler::concatenation(a.nfa(), bc));
        match (left, right) {
            (Ok(left), Ok(right)) => disagreement(&left, &right, &INPUTS).is_none(),
            _ => false,
        }
    }
    qc().quickcheck(prop as fn(Expr, Expr, Expr) -> bool);
}

#[test]
fn prop_combined_operands_keep_their_states() {
    fn prop(a: Expr, b: Expr) -> bool {
        let (left, right) = (a.nfa(), b.nfa());
        let sum = left.len() + right.len();
        let concat = compiler::concatenation(left.clone(), right.clone());
        let union = compiler::union(left, right);
        match (concat, union) {
            (Ok(concat), Ok(union)) => concat.len() == sum && union.len() == sum + 2,
            _ => false,
        }
    }
    qc().quickcheck(prop as fn(Expr, Expr) -> bool);
}

/// Picks NFA states by index so that arbitrary numbers always name real states
fn pick(nfa: &Automaton, picks: &[usize]) -> Vec<StateId> {
    let states: Vec<StateId> = nfa.states().iter().copied().collect();
    picks.iter().map(|&i| states[i % states.len()]).collect()
}

#[test]
fn prop_epsilon_closure_is_idempotent() {
    fn prop(expr: Expr, picks: Vec<usize>) -> bool {
        let nfa = expr.nfa();
        let closure = nfa.epsilon_closure(pick(&nfa, &picks));
        nfa.epsilon_closure(closure.iter().copied()) == closure
    }
    qc().quickcheck(prop as fn(Expr, Vec<usize>) -> bool);
}

#[test]
fn prop_epsilon_closure_is_monotone() {
    fn prop(expr: Expr, seeds: Vec<usize>, more: Vec<usize>) -> bool {
        let nfa = expr.nfa();
        let seeds = pick(&nfa, &seeds);
        let mut all = seeds.clone();
        all.extend(pick(&nfa, &more));
        nfa.epsilon_closure(seeds).is_subset(&nfa.epsilon_closure(all))
    }
    qc().quickcheck(prop as fn(Expr, Vec<usize>, Vec<usize>) -> bool);
}
