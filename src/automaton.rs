//! This module defines the `Automaton` struct, the validated, immutable form of a
//! `Definition`. Construction is the only place ids are checked; a constructed
//! automaton can never fail an id lookup during simulation.

use crate::analyzer::validate;
use crate::types::{Definition, NfaMachineError, Node, Transition};
use std::collections::HashSet;

/// A validated automaton.
///
/// Nodes and transitions keep their declaration order; transition order is the
/// authoritative tie-break for automatic exploration. The fields are private so
/// the invariants established at construction cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Automaton {
    name: String,
    nodes: Vec<Node>,
    transitions: Vec<Transition>,
    init: String,
    accepting: Vec<String>,
}

impl Automaton {
    /// Builds an `Automaton` from a raw `Definition`, validating it first.
    ///
    /// Node display names left empty by the definition default to the node id.
    ///
    /// # Arguments
    ///
    /// * `definition` - The definition to validate and take ownership of.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if every referenced id resolves to a declared node.
    /// * `Err(NfaMachineError::MalformedAutomaton)` otherwise.
    pub fn new(mut definition: Definition) -> Result<Self, NfaMachineError> {
        validate(&definition)?;

        for node in &mut definition.nodes {
            if node.name.is_empty() {
                node.name = node.id.clone();
            }
        }

        Ok(Self {
            name: definition.name,
            nodes: definition.nodes,
            transitions: definition.transitions,
            init: definition.init,
            accepting: definition.accepting,
        })
    }

    /// Returns the display name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared nodes, in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the declared transitions, in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the id of the start node.
    pub fn init(&self) -> &str {
        &self.init
    }

    /// Returns the ids of the accepting nodes.
    pub fn accepting(&self) -> &[String] {
        &self.accepting
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns `true` if `id` names an accepting node.
    pub fn is_accepting(&self, id: &str) -> bool {
        self.accepting.iter().any(|accepting| accepting == id)
    }

    /// Returns `true` if no `(from, symbol)` pair has more than one transition.
    ///
    /// A deterministic automaton never produces branch frames or choice
    /// prompts, no matter the working sequence.
    pub fn is_deterministic(&self) -> bool {
        let mut seen = HashSet::new();
        self.transitions
            .iter()
            .all(|t| seen.insert((t.from.as_str(), t.symbol)))
    }

    /// Turns the automaton back into a plain `Definition`, e.g. for serialization.
    pub fn to_definition(&self) -> Definition {
        Definition {
            name: self.name.clone(),
            nodes: self.nodes.clone(),
            transitions: self.transitions.clone(),
            init: self.init.clone(),
            accepting: self.accepting.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_branching_definition() -> Definition {
        Definition {
            name: "Branching".to_string(),
            nodes: vec![
                Node {
                    id: "q0".to_string(),
                    name: String::new(),
                },
                Node {
                    id: "q1".to_string(),
                    name: "done".to_string(),
                },
            ],
            transitions: vec![
                Transition {
                    from: "q0".to_string(),
                    to: "q0".to_string(),
                    symbol: '1',
                },
                Transition {
                    from: "q0".to_string(),
                    to: "q1".to_string(),
                    symbol: '1',
                },
            ],
            init: "q0".to_string(),
            accepting: vec!["q1".to_string()],
        }
    }

    #[test]
    fn test_construction_normalizes_names() {
        let automaton = Automaton::new(create_branching_definition()).unwrap();

        assert_eq!(automaton.name(), "Branching");
        assert_eq!(automaton.node("q0").unwrap().name, "q0");
        assert_eq!(automaton.node("q1").unwrap().name, "done");
        assert_eq!(automaton.init(), "q0");
    }

    #[test]
    fn test_construction_rejects_dangling_ids() {
        let mut definition = create_branching_definition();
        definition.transitions.push(Transition {
            from: "q1".to_string(),
            to: "ghost".to_string(),
            symbol: '0',
        });

        let result = Automaton::new(definition);
        assert!(matches!(
            result,
            Err(NfaMachineError::MalformedAutomaton(_))
        ));
    }

    #[test]
    fn test_is_accepting() {
        let automaton = Automaton::new(create_branching_definition()).unwrap();

        assert!(automaton.is_accepting("q1"));
        assert!(!automaton.is_accepting("q0"));
        assert!(!automaton.is_accepting("ghost"));
    }

    #[test]
    fn test_is_deterministic() {
        let automaton = Automaton::new(create_branching_definition()).unwrap();
        assert!(!automaton.is_deterministic());

        let mut definition = create_branching_definition();
        definition.transitions.remove(1);
        let automaton = Automaton::new(definition).unwrap();
        assert!(automaton.is_deterministic());
    }

    #[test]
    fn test_to_definition_round_trip() {
        let automaton = Automaton::new(create_branching_definition()).unwrap();
        let definition = automaton.to_definition();

        assert_eq!(definition.name, "Branching");
        assert_eq!(definition.nodes.len(), 2);
        assert_eq!(definition.nodes[0].name, "q0"); // normalized
        assert_eq!(Automaton::new(definition).unwrap(), automaton);
    }
}
