mod common;

use std::time::{Duration, Instant};

use anaphora_protocol::{Gender, Number};
use anaphora_solver::{Hobbs, ResolverConfig};

use common::*;

const BUDGET: Duration = Duration::from_secs(5);

#[test]
fn test_deeply_nested_clauses() {
    // (S (NP box) (VP v (S (NP box) (VP v ... (NP it)))))
    let levels = 300;
    let mut brackets = String::new();
    let mut words = Vec::new();
    for _ in 0..levels {
        brackets.push_str("(S (NP box) (VP v ");
        words.push(thing("box"));
        words.push(plain("v"));
    }
    brackets.push_str("(NP it)");
    words.push(pronoun("it", Gender::Neuter, Number::Singular));
    brackets.push_str(&"))".repeat(levels));

    let start = Instant::now();
    let mut hobbs = Hobbs::default();
    hobbs.process(&sentence(&brackets, words)).unwrap();

    let candidates = candidates_of(&hobbs.export(), "it_1");
    assert!(start.elapsed() < BUDGET);
    assert_eq!(candidates.len(), ResolverConfig::default().max_proposals);
    assert!(candidates.iter().all(|c| c == "box"));
}

#[test]
fn test_very_wide_history_sentence() {
    let width = 2000;
    let mut brackets = String::from("(S");
    let mut words = Vec::new();
    for _ in 0..width {
        brackets.push_str(" (NP box)");
        words.push(thing("box"));
    }
    brackets.push_str(" (VP fell))");
    words.push(plain("fell"));

    let start = Instant::now();
    let mut hobbs = Hobbs::default();
    hobbs.process(&sentence(&brackets, words)).unwrap();
    hobbs
        .process(&sentence(
            "(S (NP it) (VP broke))",
            vec![pronoun("it", Gender::Neuter, Number::Singular), plain("broke")],
        ))
        .unwrap();

    let candidates = candidates_of(&hobbs.export(), "it_1");
    assert!(start.elapsed() < BUDGET);
    assert_eq!(candidates.len(), 10);
}

#[test]
fn test_unbounded_budget_on_deep_tree_terminates() {
    let levels = 300;
    let mut brackets = String::new();
    let mut words = Vec::new();
    for _ in 0..levels {
        brackets.push_str("(S (NP box) (VP v ");
        words.push(thing("box"));
        words.push(plain("v"));
    }
    brackets.push_str("(NP it)");
    words.push(pronoun("it", Gender::Neuter, Number::Singular));
    brackets.push_str(&"))".repeat(levels));

    let config = ResolverConfig { max_proposals: usize::MAX, ..ResolverConfig::default() };
    let mut hobbs = Hobbs::new(config);
    hobbs.process(&sentence(&brackets, words)).unwrap();

    // Every box but the one sharing the pronoun's clause
    let candidates = candidates_of(&hobbs.export(), "it_1");
    assert_eq!(candidates.len(), levels - 1);
}

#[test]
fn test_very_deep_history_sentence() {
    // (S (VP (VP ... (VP v (NP box)) ...)))
    let depth = 50_000;
    let brackets = format!("(S {}v (NP box){})", "(VP ".repeat(depth), ")".repeat(depth));

    let start = Instant::now();
    let mut hobbs = Hobbs::default();
    hobbs.process(&sentence(&brackets, vec![plain("v"), thing("box")])).unwrap();
    hobbs
        .process(&sentence(
            "(S (NP it) (VP broke))",
            vec![pronoun("it", Gender::Neuter, Number::Singular), plain("broke")],
        ))
        .unwrap();

    assert!(start.elapsed() < BUDGET);
    assert_eq!(candidates_of(&hobbs.export(), "it_1"), vec!["box"]);
}

#[test]
fn test_very_deep_path_to_the_anaphor() {
    // (S (NP box) (VP v (VP (VP ... (NP lamp) (NP itself)))))
    let depth = 50_000;
    let brackets = format!(
        "(S (NP box) (VP v {}(NP lamp) (NP itself){}))",
        "(VP ".repeat(depth),
        ")".repeat(depth)
    );
    let words = vec![thing("box"), plain("v"), thing("lamp"), reflexive("itself", Gender::Neuter)];

    let start = Instant::now();
    let mut hobbs = Hobbs::default();
    hobbs.process(&sentence(&brackets, words)).unwrap();

    assert!(start.elapsed() < BUDGET);
    assert_eq!(candidates_of(&hobbs.export(), "itself_1"), vec!["box", "lamp"]);
}
