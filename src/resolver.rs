//! This module computes the candidate transitions for a single step. Candidates are
//! returned as indices into the automaton's transition list, in declaration order,
//! which is the authoritative tie-break for automatic exploration.

use crate::automaton::Automaton;
use crate::types::Transition;

/// What a step request is asking to match, besides the symbol at the cursor.
///
/// Manual play resolves either by the symbol the user typed or by the
/// destination node the user picked; automatic play always resolves by the
/// symbol at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Match transitions labeled with this symbol.
    Symbol(char),
    /// Match transitions leading to this node.
    Target(String),
}

impl Criterion {
    /// Returns `true` if `transition` satisfies this criterion.
    fn matches(&self, transition: &Transition) -> bool {
        match self {
            Criterion::Symbol(symbol) => transition.symbol == *symbol,
            Criterion::Target(node) => transition.to == *node,
        }
    }
}

/// Computes the ordered candidate transitions for one step.
///
/// A transition is a candidate when it leaves `from`, satisfies `criterion`,
/// and is labeled with `at`, the symbol currently under the cursor. The last
/// filter is what ties manual requests to the working sequence: typing a
/// symbol other than the expected one, or picking a destination whose edge
/// reads a different symbol, yields no candidates.
///
/// # Arguments
///
/// * `automaton` - The automaton whose transitions are searched.
/// * `from` - The id of the current node.
/// * `criterion` - The requested symbol or destination.
/// * `at` - The symbol at the run cursor.
///
/// # Returns
///
/// * The matching transition indices, in declaration order. Empty means a dead end.
pub fn resolve(automaton: &Automaton, from: &str, criterion: &Criterion, at: char) -> Vec<usize> {
    automaton
        .transitions()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.from == from)
        .filter(|(_, t)| criterion.matches(t))
        .filter(|(_, t)| t.symbol == at)
        .map(|(index, _)| index)
        .collect()
}
