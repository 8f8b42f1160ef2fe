use automaton_compiler::{Automaton, Compiler, Dfa};
use std::io::{self, Write};

fn main() -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Thompson NFA / Subset Construction DFA Demo")?;
    writeln!(out, "===========================================")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let patterns: Vec<&str> = if args.is_empty() {
        vec![
            "a",
            r"\*",
            "a*",
            "ab",
            "a|b",
            "(a|b)",
            "(a|b)*ab",
            "(a|b)*abb",
            "a**",
            "((a*)*|b*)*",
            // malformed patterns
            "(ab",
            "ab)",
            r"a\",
            "*a",
            "a||b",
        ]
    } else {
        args.iter().map(String::as_str).collect()
    };

    let compiler = Compiler::new();
    for pattern in patterns {
        writeln!(out, "\n=== Pattern: '{}' ===", pattern)?;

        let nfa = match compiler.compile(pattern) {
            Ok(nfa) => nfa,
            Err(e) => {
                writeln!(out, "Failed to compile: {}", e)?;
                continue;
            }
        };

        writeln!(out, "--- NFA ---")?;
        print_automaton(&mut out, &nfa)?;

        match automaton_compiler::subset_construction(&nfa) {
            Ok(dfa) => {
                writeln!(out, "--- DFA ---")?;
                print_dfa(&mut out, &dfa)?;
            }
            Err(e) => writeln!(out, "Failed to determinize: {}", e)?,
        }
    }

    Ok(())
}

fn print_automaton<W: Write>(out: &mut W, automaton: &Automaton) -> io::Result<()> {
    writeln!(out, "States: {:?}", automaton.states())?;
    writeln!(out, "Alphabet: {:?}", automaton.alphabet())?;
    match automaton.start() {
        Some(start) => writeln!(out, "Start state: {}", start)?,
        None => writeln!(out, "Start state: none")?,
    }
    writeln!(out, "Final states: {:?}", automaton.finals())?;
    writeln!(out, "Transitions:")?;

    for (from, targets) in automaton.transitions() {
        for (to, symbols) in targets {
            let labels: Vec<String> = symbols.iter().map(ToString::to_string).collect();
            writeln!(out, "  {} -> {} on {}", from, to, labels.join(", "))?;
        }
    }
    Ok(())
}

fn print_dfa<W: Write>(out: &mut W, dfa: &Dfa) -> io::Result<()> {
    print_automaton(out, dfa.automaton())?;
    writeln!(out, "Subsets:")?;
    for (id, subset) in dfa.subsets() {
        writeln!(out, "  {} = {:?}", id, subset)?;
    }
    Ok(())
}
