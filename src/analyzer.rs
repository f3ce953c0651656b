//! This module provides functions for analyzing automaton definitions before they are
//! used. Hard validation rejects definitions whose ids do not resolve; a separate
//! inspection pass reports non-fatal findings such as unreachable nodes.

use crate::automaton::Automaton;
use crate::types::{in_alphabet, Definition, NfaMachineError};
use std::collections::HashSet;

/// Represents the defects that make a definition unusable.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates a definition that declares no nodes at all.
    NoNodes,
    /// Indicates node ids that are declared more than once.
    DuplicateNodes(Vec<String>),
    /// Indicates that the start node id does not reference a declared node.
    UnknownInit(String),
    /// Indicates transitions whose endpoints do not reference declared nodes.
    DanglingTransitions(Vec<String>),
    /// Indicates accepting ids that do not reference declared nodes.
    UnknownAccepting(Vec<String>),
}

impl From<AnalysisError> for NfaMachineError {
    /// Converts an `AnalysisError` into a `NfaMachineError::MalformedAutomaton`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoNodes => {
                NfaMachineError::MalformedAutomaton("No nodes declared".to_string())
            }
            AnalysisError::DuplicateNodes(ids) => NfaMachineError::MalformedAutomaton(format!(
                "Duplicate node ids: {:?}",
                ids
            )),
            AnalysisError::UnknownInit(id) => {
                NfaMachineError::MalformedAutomaton(format!("Unknown init node: {}", id))
            }
            AnalysisError::DanglingTransitions(transitions) => {
                NfaMachineError::MalformedAutomaton(format!(
                    "Transitions reference undeclared nodes: {:?}",
                    transitions
                ))
            }
            AnalysisError::UnknownAccepting(ids) => NfaMachineError::MalformedAutomaton(format!(
                "Accepting ids reference undeclared nodes: {:?}",
                ids
            )),
        }
    }
}

/// Validates an automaton `Definition` for structural soundness.
///
/// Every id a definition mentions (init, transition endpoints, accepting set)
/// must reference a declared node, and node ids must be unique. A definition
/// that passes this check can never fail an id lookup mid-run.
///
/// # Arguments
///
/// * `definition` - A reference to the `Definition` to be validated.
///
/// # Returns
///
/// * `Ok(())` if no defects are found.
/// * `Err(NfaMachineError::MalformedAutomaton)` describing the first defect otherwise.
pub fn validate(definition: &Definition) -> Result<(), NfaMachineError> {
    let errors = [
        check_nodes,
        check_duplicate_ids,
        check_init,
        check_transition_endpoints,
        check_accepting,
    ]
    .iter()
    .filter_map(|f| f(definition).err())
    .collect::<Vec<_>>();

    if !errors.is_empty() {
        // Return the first error
        if let Some(first_error) = errors.first() {
            return Err((*first_error).clone().into());
        }
    }

    Ok(())
}

/// Collects the declared node ids of a definition into a set.
fn declared_ids(definition: &Definition) -> HashSet<&str> {
    definition.nodes.iter().map(|node| node.id.as_str()).collect()
}

/// Checks that the definition declares at least one node.
fn check_nodes(definition: &Definition) -> Result<(), AnalysisError> {
    if definition.nodes.is_empty() {
        return Err(AnalysisError::NoNodes);
    }

    Ok(())
}

/// Checks that no node id is declared twice.
fn check_duplicate_ids(definition: &Definition) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = definition
        .nodes
        .iter()
        .filter(|node| !seen.insert(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect();

    if !duplicates.is_empty() {
        duplicates.sort();
        duplicates.dedup();
        return Err(AnalysisError::DuplicateNodes(duplicates));
    }

    Ok(())
}

/// Checks that the start node id references a declared node.
fn check_init(definition: &Definition) -> Result<(), AnalysisError> {
    if !declared_ids(definition).contains(definition.init.as_str()) {
        return Err(AnalysisError::UnknownInit(definition.init.clone()));
    }

    Ok(())
}

/// Checks that every transition's `from` and `to` reference declared nodes.
///
/// # Returns
///
/// * `Ok(())` if all endpoints resolve.
/// * `Err(AnalysisError::DanglingTransitions)` listing the offending transitions otherwise.
fn check_transition_endpoints(definition: &Definition) -> Result<(), AnalysisError> {
    let ids = declared_ids(definition);

    let dangling: Vec<String> = definition
        .transitions
        .iter()
        .filter(|t| !ids.contains(t.from.as_str()) || !ids.contains(t.to.as_str()))
        .map(|t| format!("{} -{}-> {}", t.from, t.symbol, t.to))
        .collect();

    if !dangling.is_empty() {
        return Err(AnalysisError::DanglingTransitions(dangling));
    }

    Ok(())
}

/// Checks that every accepting id references a declared node.
fn check_accepting(definition: &Definition) -> Result<(), AnalysisError> {
    let ids = declared_ids(definition);

    let mut unknown: Vec<String> = definition
        .accepting
        .iter()
        .filter(|id| !ids.contains(id.as_str()))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        unknown.sort();
        unknown.dedup();
        return Err(AnalysisError::UnknownAccepting(unknown));
    }

    Ok(())
}

/// A non-fatal finding about a valid automaton.
///
/// Advisories point at suspicious shapes (nodes that can never be entered,
/// symbols that can never be typed) without preventing simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Nodes that cannot be reached from the start node.
    UnreachableNodes(Vec<String>),
    /// Transition symbols outside the input alphabet; such transitions can
    /// never match a valid working sequence.
    ForeignSymbols(Vec<char>),
    /// Non-accepting nodes with no outgoing transitions; every path entering
    /// one is doomed.
    TrapNodes(Vec<String>),
}

/// Inspects a validated automaton and reports non-fatal findings.
///
/// # Arguments
///
/// * `automaton` - A reference to the `Automaton` to inspect.
///
/// # Returns
///
/// * A possibly empty `Vec<Advisory>`, in a fixed order, each sorted for
///   deterministic output.
pub fn inspect(automaton: &Automaton) -> Vec<Advisory> {
    [find_unreachable_nodes, find_foreign_symbols, find_trap_nodes]
        .iter()
        .filter_map(|f| f(automaton))
        .collect()
}

/// Walks the automaton from the start node and reports nodes never visited.
fn find_unreachable_nodes(automaton: &Automaton) -> Option<Advisory> {
    let mut visited = HashSet::new();
    let mut stack = vec![automaton.init().to_string()];

    while let Some(id) = stack.pop() {
        if visited.contains(&id) {
            continue;
        }

        visited.insert(id.clone());

        for transition in automaton.transitions() {
            if transition.from == id && !visited.contains(&transition.to) {
                stack.push(transition.to.clone());
            }
        }
    }

    let mut unreachable: Vec<String> = automaton
        .nodes()
        .iter()
        .filter(|node| !visited.contains(&node.id))
        .map(|node| node.id.clone())
        .collect();

    if unreachable.is_empty() {
        return None;
    }

    unreachable.sort(); // Sort for deterministic output
    Some(Advisory::UnreachableNodes(unreachable))
}

/// Reports transition symbols that fall outside the input alphabet.
fn find_foreign_symbols(automaton: &Automaton) -> Option<Advisory> {
    let mut foreign: Vec<char> = automaton
        .transitions()
        .iter()
        .filter(|t| !in_alphabet(t.symbol))
        .map(|t| t.symbol)
        .collect();

    if foreign.is_empty() {
        return None;
    }

    foreign.sort();
    foreign.dedup();
    Some(Advisory::ForeignSymbols(foreign))
}

/// Reports non-accepting nodes that no transition leaves.
fn find_trap_nodes(automaton: &Automaton) -> Option<Advisory> {
    let mut traps: Vec<String> = automaton
        .nodes()
        .iter()
        .filter(|node| !automaton.is_accepting(&node.id))
        .filter(|node| !automaton.transitions().iter().any(|t| t.from == node.id))
        .map(|node| node.id.clone())
        .collect();

    if traps.is_empty() {
        return None;
    }

    traps.sort();
    Some(Advisory::TrapNodes(traps))
}
